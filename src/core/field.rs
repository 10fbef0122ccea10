//! Record field access and dotted field paths

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Name of the scalar identity field every record exposes to search
pub const ID_FIELD: &str = "id";

/// A typed path into a (possibly nested) record
///
/// Parsed from a dot-delimited string such as `"cliente.nombre"`. An empty
/// string parses to the empty path, which resolves to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Build a path from a dotted string
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::default();
        }
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    /// Build a path from explicit segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk `value` along this path
    ///
    /// Returns `None` as soon as a segment is absent or an intermediate
    /// value is not an object. A `null` leaf counts as absent.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.resolve_in(value.as_object()?)
    }

    /// Walk an already unwrapped record object along this path
    pub fn resolve_in<'a>(&self, record: &'a Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut current = record.get(first)?;
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        (!current.is_null()).then_some(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Anything that can hand out field values by path
///
/// Implemented for JSON records as returned by the backend. Typed entities
/// can implement it to take part in sorting and searching without being
/// converted to JSON first.
pub trait FieldSource {
    /// Resolve a field, `None` when missing or `null`
    fn field(&self, path: &FieldPath) -> Option<&Value>;
}

impl FieldSource for Value {
    fn field(&self, path: &FieldPath) -> Option<&Value> {
        path.resolve(self)
    }
}

impl FieldSource for Map<String, Value> {
    fn field(&self, path: &FieldPath) -> Option<&Value> {
        path.resolve_in(self)
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field(&self, path: &FieldPath) -> Option<&Value> {
        (**self).field(path)
    }
}

impl<T: FieldSource + ?Sized> FieldSource for Box<T> {
    fn field(&self, path: &FieldPath) -> Option<&Value> {
        (**self).field(path)
    }
}

/// Resolve a dotted path against a record
///
/// ```
/// use gestor::core::field::resolve_path;
/// use serde_json::json;
///
/// let venta = json!({"cliente": {"nombre": "Ana"}});
/// assert_eq!(resolve_path(&venta, "cliente.nombre"), Some(&json!("Ana")));
/// assert_eq!(resolve_path(&venta, "cliente.cedula"), None);
/// ```
pub fn resolve_path<'a, R: FieldSource + ?Sized>(record: &'a R, path: &str) -> Option<&'a Value> {
    record.field(&FieldPath::parse(path))
}
