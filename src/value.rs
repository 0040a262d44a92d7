use std::fmt;

use derive_more::with_trait::From;
use serde::de::{self, Deserialize, Deserializer};

/// Scalar value carried by an [`InputValue`].
///
/// [`InputValue`]: crate::InputValue
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, From, PartialEq)]
pub enum DefaultScalarValue {
    Int(i32),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl DefaultScalarValue {
    /// Name of the builtin GraphQL scalar this value belongs to.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::Boolean(_) => "Boolean",
        }
    }

    /// Views this value as a string slice, if it's a [`String`] one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Views this value as an `i32`, if it's an `Int` one.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Views this value as an `f64`.
    ///
    /// `Int` values are widened, as GraphQL allows integers in `Float`
    /// positions.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(f64::from(*i)),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Views this value as a `bool`, if it's a `Boolean` one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for DefaultScalarValue {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl fmt::Display for DefaultScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl<'de> Deserialize<'de> for DefaultScalarValue {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = DefaultScalarValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a valid scalar value")
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Self::Value, E> {
                Ok(DefaultScalarValue::Boolean(b))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Self::Value, E> {
                // Integers outside of `i32` range are what browsers emit for
                // large floats without a fractional part.
                Ok(i32::try_from(n)
                    .map(DefaultScalarValue::Int)
                    .unwrap_or(DefaultScalarValue::Float(n as f64)))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Self::Value, E> {
                Ok(i32::try_from(n)
                    .map(DefaultScalarValue::Int)
                    .unwrap_or(DefaultScalarValue::Float(n as f64)))
            }

            fn visit_f64<E: de::Error>(self, n: f64) -> Result<Self::Value, E> {
                Ok(DefaultScalarValue::Float(n))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                Ok(DefaultScalarValue::String(s.into()))
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
                Ok(DefaultScalarValue::String(s))
            }
        }

        de.deserialize_any(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::DefaultScalarValue;

    #[test]
    fn deserializes_json_numbers() {
        let int: DefaultScalarValue = serde_json::from_str("42").unwrap();
        assert_eq!(int, DefaultScalarValue::Int(42));

        let big: DefaultScalarValue = serde_json::from_str("3000000000").unwrap();
        assert_eq!(big, DefaultScalarValue::Float(3_000_000_000.0));

        let float: DefaultScalarValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(float, DefaultScalarValue::Float(1.5));
    }

    #[test]
    fn widens_int_to_float() {
        assert_eq!(DefaultScalarValue::Int(3).as_float(), Some(3.0));
        assert_eq!(DefaultScalarValue::from("3").as_float(), None);
    }
}
