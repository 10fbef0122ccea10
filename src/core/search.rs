//! Free-text search over list records
//!
//! Every list screen has a search box that narrows the table to records
//! whose id or one of a handful of text columns contains the typed text,
//! ignoring case.

use crate::core::field::{FieldPath, FieldSource, ID_FIELD};
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::iter;

fn number_text(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        return i.to_string();
    }
    if let Some(u) = number.as_u64() {
        return u.to_string();
    }
    // f64's Display drops the fraction of integral values (50.0 -> "50")
    number.as_f64().map(|f| f.to_string()).unwrap_or_default()
}

/// Text a field contributes to search, `None` if it can never match
pub fn searchable_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whether the query is blank and should show everything
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Whether `record` matches an already-lowercased `needle`
///
/// The `id` field is always searched in addition to `fields`.
pub fn matches_query<R: FieldSource + ?Sized>(
    record: &R,
    needle: &str,
    fields: &[FieldPath],
) -> bool {
    let id = FieldPath::parse(ID_FIELD);
    iter::once(&id).chain(fields).any(|path| {
        record
            .field(path)
            .and_then(searchable_text)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Keep the records matching `query` in any of `fields`
///
/// A blank query keeps everything in the original order. Otherwise the
/// comparison is a case-insensitive substring match; the query itself is
/// only lowercased, not trimmed. The source slice is never modified.
///
/// ```
/// use gestor::core::field::FieldPath;
/// use gestor::core::search::filter_by_query;
/// use serde_json::json;
///
/// let clientes = vec![json!({"id": 1, "nombre": "Ana"}), json!({"id": 2, "nombre": "Beto"})];
/// let fields = [FieldPath::parse("nombre")];
/// let hits = filter_by_query(&clientes, "AN", &fields);
/// assert_eq!(hits, vec![&clientes[0]]);
/// ```
pub fn filter_by_query<'a, R: FieldSource>(
    records: &'a [R],
    query: &str,
    fields: &[FieldPath],
) -> Vec<&'a R> {
    if is_blank_query(query) {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_query(*record, &needle, fields))
        .collect()
}
