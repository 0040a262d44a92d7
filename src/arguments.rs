//! Argument shapes and their binding from raw query inputs.

use std::fmt;

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    ast::{FromInputValue, InputValue},
    error::ArgumentBindingError,
    schema::{meta::Argument, registry::HostType},
};

/// Raw name/value pairs supplied to a field by the query executor.
///
/// Variables are already substituted at this point.
pub type RawArguments = IndexMap<String, InputValue>;

/// Typed set of arguments a field accepts.
///
/// Usually implemented with the [`graphql_arguments!`] macro. The empty shape
/// is `()`.
///
/// [`graphql_arguments!`]: crate::graphql_arguments
pub trait ArgumentShape: Sized + 'static {
    /// Describes the accepted arguments, in declaration order.
    fn descriptors() -> Vec<Argument>;

    /// Builds the typed value out of arguments the binder has already checked
    /// against [`ArgumentShape::descriptors`].
    ///
    /// # Errors
    ///
    /// If a value can't be converted into its Rust type.
    fn from_arguments(args: &Arguments) -> Result<Self, ArgumentBindingError>;
}

impl ArgumentShape for () {
    fn descriptors() -> Vec<Argument> {
        Vec::new()
    }

    fn from_arguments(_: &Arguments) -> Result<Self, ArgumentBindingError> {
        Ok(())
    }
}

/// Identity of an [`ArgumentShape`], kept by a field so binding always uses
/// the shape the field was built with.
#[derive(Clone, Copy)]
pub struct ArgumentShapeInfo {
    host_type: HostType,
    descriptors: fn() -> Vec<Argument>,
}

impl ArgumentShapeInfo {
    /// Captures the shape `A`.
    pub fn of<A: ArgumentShape>() -> Self {
        Self {
            host_type: HostType::of::<A>(),
            descriptors: A::descriptors,
        }
    }

    /// Rust type of the shape.
    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    /// Argument descriptors of the shape.
    pub fn descriptors(&self) -> Vec<Argument> {
        (self.descriptors)()
    }

    /// Whether this is the empty `()` shape.
    pub fn is_empty(&self) -> bool {
        self.host_type == HostType::of::<()>()
    }
}

impl fmt::Debug for ArgumentShapeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArgumentShapeInfo")
            .field(&self.host_type)
            .finish()
    }
}

/// Arguments checked against a shape, with defaults applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: IndexMap<ArcStr, InputValue>,
}

impl Arguments {
    /// Get and convert an argument into the desired type.
    ///
    /// An absent argument converts as an implicit `null`.
    ///
    /// # Errors
    ///
    /// [`ArgumentBindingError::Invalid`] if the conversion fails.
    pub fn get<T: FromInputValue>(&self, name: &str) -> Result<T, ArgumentBindingError> {
        match self.values.get(name) {
            Some(v) => v.convert(),
            None => T::from_implicit_null(),
        }
        .map_err(|e| ArgumentBindingError::Invalid {
            name: name.into(),
            message: e.to_string(),
        })
    }

    /// Raw value of an argument, if it was supplied or defaulted.
    pub fn raw(&self, name: &str) -> Option<&InputValue> {
        self.values.get(name)
    }

    /// Number of supplied or defaulted arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no argument was supplied or defaulted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Binds `raw` arguments to the shape `A`.
///
/// Every supplied name must be declared by `A`, every required argument must
/// be supplied, and defaults fill in the rest before conversion.
///
/// # Errors
///
/// - [`ArgumentBindingError::Unknown`] for the first undeclared name;
/// - [`ArgumentBindingError::Missing`] listing all absent required arguments;
/// - [`ArgumentBindingError::Invalid`] for explicit `null`s in non-null
///   positions and failed conversions.
pub fn bind<A: ArgumentShape>(raw: &RawArguments) -> Result<A, ArgumentBindingError> {
    let args = check(&A::descriptors(), raw)?;
    A::from_arguments(&args)
}

fn check(descriptors: &[Argument], raw: &RawArguments) -> Result<Arguments, ArgumentBindingError> {
    if let Some(name) = raw
        .keys()
        .find(|name| !descriptors.iter().any(|d| d.name.as_str() == name.as_str()))
    {
        return Err(ArgumentBindingError::Unknown { name: name.clone() });
    }

    let mut values = IndexMap::with_capacity(descriptors.len());
    let mut missing = Vec::new();
    for arg in descriptors {
        match (raw.get(arg.name.as_str()), &arg.default_value) {
            (Some(v), _) if !v.is_null() => {
                values.insert(arg.name.clone(), v.clone());
            }
            (None, Some(default)) => {
                values.insert(arg.name.clone(), default.clone());
            }
            (Some(_), _) if arg.arg_type.is_non_null() => {
                return Err(ArgumentBindingError::Invalid {
                    name: arg.name.clone(),
                    message: format!("Expected `{}`, found: null", arg.arg_type),
                });
            }
            (Some(null), _) => {
                values.insert(arg.name.clone(), null.clone());
            }
            (None, None) if arg.is_required() => missing.push(arg.name.clone()),
            (None, None) => {}
        }
    }

    if !missing.is_empty() {
        return Err(ArgumentBindingError::Missing { names: missing });
    }
    Ok(Arguments { values })
}

#[cfg(test)]
mod tests {
    use arcstr::literal;
    use pretty_assertions::assert_eq;

    use crate::{
        ArgumentBindingError,
        ast::{InputValue, Type},
        schema::{meta::Argument, registry::HostType},
    };

    use super::{ArgumentShape, ArgumentShapeInfo, Arguments, RawArguments, bind};

    #[derive(Debug, PartialEq)]
    struct Paging {
        first: i32,
        after: Option<String>,
        tags: Vec<String>,
    }

    impl ArgumentShape for Paging {
        fn descriptors() -> Vec<Argument> {
            vec![
                Argument::new("first", Type::NonNullNamed(literal!("Int")))
                    .default_value(InputValue::scalar(10)),
                Argument::new("after", Type::Named(literal!("String"))),
                Argument::new(
                    "tags",
                    Type::NonNullList(Box::new(Type::NonNullNamed(literal!("String")))),
                ),
            ]
        }

        fn from_arguments(args: &Arguments) -> Result<Self, ArgumentBindingError> {
            Ok(Self {
                first: args.get("first")?,
                after: args.get("after")?,
                tags: args.get("tags")?,
            })
        }
    }

    fn raw<const N: usize>(items: [(&str, InputValue); N]) -> RawArguments {
        items.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
    }

    #[test]
    fn applies_defaults() {
        let paging = bind::<Paging>(&raw([("tags", InputValue::scalar("rust"))])).unwrap();

        assert_eq!(
            paging,
            Paging {
                first: 10,
                after: None,
                tags: vec!["rust".into()],
            },
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = bind::<Paging>(&raw([
            ("tags", InputValue::list(vec![])),
            ("last", InputValue::scalar(3)),
        ]))
        .unwrap_err();

        assert_eq!(err, ArgumentBindingError::Unknown { name: "last".into() });
    }

    #[test]
    fn reports_missing_required() {
        let err = bind::<Paging>(&raw([("first", InputValue::scalar(3))])).unwrap_err();

        assert_eq!(
            err,
            ArgumentBindingError::Missing {
                names: vec![literal!("tags")],
            },
        );
    }

    #[test]
    fn rejects_explicit_null_for_non_null() {
        let err = bind::<Paging>(&raw([("tags", InputValue::null())])).unwrap_err();

        assert!(matches!(err, ArgumentBindingError::Invalid { ref name, .. } if name.as_str() == "tags"));
    }

    #[test]
    fn explicit_null_for_defaulted_non_null_is_invalid() {
        let err = bind::<Paging>(&raw([
            ("first", InputValue::null()),
            ("tags", InputValue::list(vec![])),
        ]))
        .unwrap_err();

        assert!(err.mentions("first"));
    }

    #[test]
    fn reports_conversion_failures() {
        let err = bind::<Paging>(&raw([("tags", InputValue::scalar(1))])).unwrap_err();

        assert_eq!(
            err,
            ArgumentBindingError::Invalid {
                name: literal!("tags"),
                message: "Expected `String`, found: 1".into(),
            },
        );
    }

    #[test]
    fn empty_shape() {
        assert_eq!(bind::<()>(&RawArguments::new()), Ok(()));
        assert!(bind::<()>(&raw([("any", InputValue::null())])).is_err());

        let info = ArgumentShapeInfo::of::<()>();
        assert!(info.is_empty());
        assert!(info.descriptors().is_empty());
    }

    #[test]
    fn shape_info_keeps_identity() {
        let info = ArgumentShapeInfo::of::<Paging>();
        assert_eq!(info.host_type(), HostType::of::<Paging>());
        assert!(!info.is_empty());
        assert_eq!(
            info.descriptors()
                .iter()
                .map(|a| (a.name.as_str(), a.is_required()))
                .collect::<Vec<_>>(),
            [("first", false), ("after", false), ("tags", true)],
        );
    }
}
