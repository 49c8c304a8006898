use bytes::Bytes;

/// A reply from a key-value client.
///
/// Follows the conventions of dynamically typed Redis drivers: a missing key
/// or a rejected command comes back as `Bool(false)`, and `+OK` as
/// `Bool(true)`. The same `false` also stands for a legitimately false reply
/// (for example `exists` on a missing key), so callers that need to tell the
/// two apart must look at the operation, not the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Status reply other than `OK`, e.g. `PONG` or a type name.
    Status(String),
    Bulk(Bytes),
    Array(Vec<Value>),
}

impl Value {
    pub fn ok() -> Self {
        Value::Bool(true)
    }

    pub fn bulk(data: impl Into<Bytes>) -> Self {
        Value::Bulk(data.into())
    }

    pub fn status(s: impl Into<String>) -> Self {
        Value::Status(s.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(items)
    }

    /// The literal `false` sentinel.
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Loose truthiness: nil, false, zero, `""`, `"0"` and empty arrays are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Status(s) => !s.is_empty() && s != "0",
            Value::Bulk(b) => !b.is_empty() && b.as_ref() != b"0",
            Value::Array(items) => !items.is_empty(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bulk(b) => std::str::from_utf8(b).ok()?.parse().ok(),
            Value::Status(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bulk(b) => Some(b),
            Value::Status(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Convert to a UTF-8 string, if possible.
    pub fn to_string_lossy(&self) -> Option<String> {
        self.as_bytes()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn into_array(self) -> Option<Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bulk(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bulk(Bytes::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_false_sentinel() {
        assert!(Value::Bool(false).is_false());
        assert!(!Value::Nil.is_false());
        assert!(!Value::Int(0).is_false());
        assert!(!Value::from("").is_false());
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::from("0").is_truthy());
        assert!(!Value::array(vec![]).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(Value::from("00").is_truthy());
        assert!(Value::status("PONG").is_truthy());
        assert!(Value::array(vec![Value::Nil]).is_truthy());
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::from("42").as_int(), Some(42));
        assert_eq!(Value::from("x").as_int(), None);
        assert_eq!(Value::Nil.as_int(), None);
    }
}
