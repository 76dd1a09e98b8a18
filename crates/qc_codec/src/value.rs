use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

// -----------------------------------------------------------------------------
// Value

/// The dynamic in-memory value produced and consumed by a [`Codec`].
///
/// Structs and string-keyed maps both use [`Value::Object`], whose members
/// keep their order.
///
/// # Examples
///
/// ```
/// use qc_codec::Value;
///
/// let value = Value::Object(vec![
///     ("name".to_owned(), Value::from("qc")),
///     ("tags".to_owned(), Value::from(vec![Value::from(1), Value::from(2)])),
/// ]);
///
/// assert_eq!(value.kind(), "object");
/// assert_eq!(value.get("name").and_then(Value::as_str), Some("qc"));
/// assert_eq!(value.get("tags").and_then(Value::as_list).map(<[_]>::len), Some(2));
/// assert!(value.get("missing").is_none());
/// ```
///
/// [`Codec`]: crate::Codec
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Returns the kind name used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as `f64`, integers included.
    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Self::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Returns the first member called `name` of an object.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value)
    }
}

// -----------------------------------------------------------------------------
// From

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// -----------------------------------------------------------------------------
// Serialize

/// Bridges decoded values to any `serde` data format.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Self::Object(members) => {
                let mut state = serializer.serialize_map(Some(members.len()))?;
                for (name, value) in members {
                    state.serialize_entry(name, value)?;
                }
                state.end()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Value;

    fn sample() -> Value {
        Value::Object(vec![
            ("list".to_owned(), Value::from(vec![Value::from("b"), Value::from("a")])),
            ("n".to_owned(), Value::from(3_i32)),
            ("none".to_owned(), Value::from(None::<bool>)),
        ])
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(Value::from(2_u32).as_int(), Some(2));
        assert_eq!(Value::from(2_i64).as_float(), Some(2.0));
        assert_eq!(Value::from(true).as_str(), None);
        assert!(Value::default().is_null());
        assert_eq!(Value::from(Some("x")), Value::String("x".to_owned()));
    }

    #[test]
    fn serializes_through_serde_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"list":["b","a"],"n":3,"none":null}"#);
    }

    #[test]
    fn serializes_through_ron() {
        let value = Value::List(vec![Value::from(1_i64), Value::from("x"), Value::Null]);
        let text = ron::to_string(&value).unwrap();
        assert_eq!(text, r#"[1,"x",()]"#);
    }
}
