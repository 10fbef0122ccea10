//! Stable, path-based record ordering
//!
//! Sorting always goes through a comparator that is a total preorder over
//! the records, and [`sort_stable`] extends it to a total order with the
//! original position as the final tie-break. Re-sorting already sorted data
//! in the other direction therefore keeps any earlier grouping intact.
//!
//! # Ordering rules
//!
//! - Numbers compare numerically as `f64`, strings by UTF-16 code units (no
//!   locale collation), booleans `false < true`.
//! - Values of different kinds are ranked: numbers, strings, booleans, then
//!   arrays and objects (which all tie with each other).
//! - Missing and `null` values always sort after present values, whatever
//!   the direction.

use crate::core::error::QueryError;
use crate::core::field::{FieldPath, FieldSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    /// Report screens open in this direction
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(QueryError::InvalidSortDirection {
                direction: other.to_string(),
            }),
        }
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        Value::Array(_) | Value::Object(_) => 3,
        Value::Null => 4,
    }
}

fn compare_numbers(a: &serde_json::Number, b: &serde_json::Number) -> Ordering {
    // Every pair goes through f64, integers included
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Ascending order between two present values
///
/// ```
/// use gestor::core::sort::compare_values;
/// use serde_json::json;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_values(&json!(10), &json!(9.5)), Ordering::Greater);
/// assert_eq!(compare_values(&json!("Zorro"), &json!("ana")), Ordering::Less);
/// ```
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => a.encode_utf16().cmp(b.encode_utf16()),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn compare_resolved(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let descending = compare_values(b, a);
            match direction {
                SortDirection::Descending => descending,
                SortDirection::Ascending => descending.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare `b`'s field against `a`'s, so larger values come first
pub fn compare_descending_by_path<R: FieldSource + ?Sized>(
    a: &R,
    b: &R,
    path: &FieldPath,
) -> Ordering {
    compare_resolved(a.field(path), b.field(path), SortDirection::Descending)
}

/// Sort key and direction bound together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    path: FieldPath,
    direction: SortDirection,
}

impl Comparator {
    pub fn new(direction: SortDirection, path: impl Into<FieldPath>) -> Self {
        Self {
            path: path.into(),
            direction,
        }
    }

    pub fn compare<R: FieldSource + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        compare_resolved(a.field(&self.path), b.field(&self.path), self.direction)
    }
}

impl From<&SortSpec> for Comparator {
    fn from(spec: &SortSpec) -> Self {
        Comparator::new(spec.direction, spec.field.clone())
    }
}

/// Build a comparison closure for a direction and field path
///
/// Descending uses [`compare_descending_by_path`] as is; ascending negates
/// it. Missing values stay last in both cases.
pub fn make_comparator<R: FieldSource + ?Sized>(
    direction: SortDirection,
    path: impl Into<FieldPath>,
) -> impl Fn(&R, &R) -> Ordering {
    let comparator = Comparator::new(direction, path);
    move |a: &R, b: &R| comparator.compare(a, b)
}

/// Sort into a new vector, keeping input order among equal elements
///
/// `compare` must be a total preorder. Each element is decorated with its
/// original index, which breaks every remaining tie.
pub fn sort_stable<T, F>(items: &[T], compare: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut decorated: Vec<(usize, &T)> = items.iter().enumerate().collect();
    decorated.sort_unstable_by(|&(ia, a), &(ib, b)| compare(a, b).then_with(|| ia.cmp(&ib)));
    decorated.into_iter().map(|(_, item)| item.clone()).collect()
}

/// A sort column with its direction
///
/// Parses from `field`, `field:asc` or `field:desc`; a bare field sorts
/// ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortSpec {
    pub field: FieldPath,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<FieldPath>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<FieldPath>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn desc(field: impl Into<FieldPath>) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    pub fn parse(expression: &str) -> Result<Self, QueryError> {
        let expression = expression.trim();
        let (field, direction) = match expression.rsplit_once(':') {
            Some((field, direction)) => (field, direction.parse()?),
            None => (expression, SortDirection::Ascending),
        };

        if field.is_empty() {
            return Err(QueryError::EmptySortField {
                expression: expression.to_string(),
            });
        }

        Ok(Self::new(field, direction))
    }

    /// Column header click
    ///
    /// Clicking the column currently sorted ascending flips it to
    /// descending; every other click sorts the clicked column ascending.
    pub fn request_sort(current: Option<&SortSpec>, field: impl Into<FieldPath>) -> Self {
        let field = field.into();
        let is_asc = current
            .is_some_and(|spec| spec.field == field && spec.direction == SortDirection::Ascending);
        if is_asc {
            Self::desc(field)
        } else {
            Self::asc(field)
        }
    }

    pub fn comparator(&self) -> Comparator {
        Comparator::from(self)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction)
    }
}

impl FromStr for SortSpec {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SortSpec {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SortSpec> for String {
    fn from(spec: SortSpec) -> Self {
        spec.to_string()
    }
}
