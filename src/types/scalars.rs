use std::ops::Deref;

use arcstr::literal;
use derive_more::with_trait::{Display, Error, From, Into};
use serde::Deserialize;

use crate::{
    ast::{FromInputValue, InputType, InputValue, ToInputValue, Type},
    field::output::{DeclaredType, NamedOutput, OutputType},
    value::DefaultScalarValue,
};

/// An ID as defined by the GraphQL specification
///
/// Represented as a string, but can be converted _to_ from an integer as well.
#[derive(Clone, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq)]
pub struct ID(String);

impl ID {
    /// Construct a new ID from anything implementing `Into<String>`
    pub fn new<S: Into<String>>(value: S) -> Self {
        ID(value.into())
    }
}

impl Deref for ID {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// Conversion failure of a builtin scalar.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
#[display("Expected `{expected}`, found: {found}")]
pub struct ScalarConversionError {
    expected: &'static str,
    found: String,
}

impl ScalarConversionError {
    fn new(expected: &'static str, found: &InputValue) -> Self {
        Self {
            expected,
            found: found.to_string(),
        }
    }
}

macro_rules! builtin_scalar {
    ($ty:ty, $name:literal, |$s:ident| $convert:expr, |$v:ident| $to:expr) => {
        impl FromInputValue for $ty {
            type Error = ScalarConversionError;

            fn from_input_value(v: &InputValue) -> Result<Self, Self::Error> {
                v.as_scalar()
                    .and_then(|$s: &DefaultScalarValue| $convert)
                    .ok_or_else(|| ScalarConversionError::new($name, v))
            }
        }

        impl ToInputValue for $ty {
            fn to_input_value(&self) -> InputValue {
                let $v = self;
                InputValue::Scalar($to)
            }
        }

        impl InputType for $ty {
            fn input_type() -> Type {
                Type::NonNullNamed(literal!($name))
            }
        }

        impl OutputType for $ty {
            fn declared() -> DeclaredType {
                DeclaredType::named::<Self>()
            }
        }

        impl NamedOutput for $ty {}
    };
}

builtin_scalar!(
    String,
    "String",
    |s| s.as_str().map(str::to_owned),
    |v| v.clone().into()
);
builtin_scalar!(bool, "Boolean", |s| s.as_bool(), |v| (*v).into());
builtin_scalar!(i32, "Int", |s| s.as_int(), |v| (*v).into());
builtin_scalar!(f64, "Float", |s| s.as_float(), |v| (*v).into());
builtin_scalar!(
    ID,
    "ID",
    |s| match s {
        DefaultScalarValue::String(s) => Some(ID(s.clone())),
        DefaultScalarValue::Int(i) => Some(ID(i.to_string())),
        DefaultScalarValue::Float(_) | DefaultScalarValue::Boolean(_) => None,
    },
    |v| v.0.clone().into()
);

#[cfg(test)]
mod tests {
    use crate::ast::{FromInputValue as _, InputType as _, InputValue};

    use super::ID;

    #[test]
    fn test_id_from_string() {
        let actual = ID::from(String::from("foo"));
        let expected = ID("foo".into());
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_id_deref() {
        let id = ID::new("foo");
        assert_eq!(id.len(), 3);
        assert_eq!(id.to_string(), "foo");
    }

    #[test]
    fn id_accepts_ints() {
        assert_eq!(
            ID::from_input_value(&InputValue::scalar(7)),
            Ok(ID::new("7")),
        );
        assert!(ID::from_input_value(&InputValue::scalar(true)).is_err());
    }

    #[test]
    fn float_accepts_ints() {
        assert_eq!(f64::from_input_value(&InputValue::scalar(2)), Ok(2.0));
    }

    #[test]
    fn string_rejects_null() {
        let err = String::from_input_value(&InputValue::Null).unwrap_err();
        assert_eq!(err.to_string(), "Expected `String`, found: null");
        assert_eq!(String::input_type().to_string(), "String!");
    }
}
