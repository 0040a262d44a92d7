//! Errors raised while building and executing fields.

use std::error::Error as StdError;

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};
use itertools::Itertools as _;

use crate::{field::output::DeclaredType, schema::registry::HostType};

/// Boxed error returned by host-supplied mutation operations.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A referenced result type was never registered in the schema.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("Type `{_0}` is not registered in the schema")]
pub struct TypeNotFound(#[error(not(source))] pub HostType);

/// Raw arguments don't match the argument shape a field declares.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum ArgumentBindingError {
    /// An argument was supplied which the shape doesn't declare.
    #[display("Unknown argument \"{name}\"")]
    Unknown {
        /// Name of the argument as supplied.
        #[error(not(source))]
        name: String,
    },

    /// Required arguments were neither supplied nor defaulted.
    #[display("Missing required argument(s): {}", names.iter().join(", "))]
    Missing {
        /// Names of every missing argument, in declaration order.
        #[error(not(source))]
        names: Vec<ArcStr>,
    },

    /// A supplied value couldn't be converted into the argument's type.
    #[display("Invalid value for argument \"{name}\": {message}")]
    Invalid {
        /// Name of the argument.
        name: ArcStr,
        /// Conversion error.
        message: String,
    },
}

impl ArgumentBindingError {
    /// Whether `name` is among the arguments this error complains about.
    pub fn mentions(&self, name: &str) -> bool {
        match self {
            Self::Unknown { name: n } => n == name,
            Self::Missing { names } => names.iter().any(|n| n.as_str() == name),
            Self::Invalid { name: n, .. } => n.as_str() == name,
        }
    }
}

/// Error of building or executing a [`Field`].
///
/// `TypeNotFound`, `UnsupportedNestedList` and `DuplicateField` happen while
/// the schema is built and must keep it from serving queries. The rest are
/// per-request failures of a single field.
///
/// [`Field`]: crate::Field
#[derive(Debug, Display)]
pub enum FieldError {
    /// The result type of a field isn't registered.
    #[display("{_0}")]
    TypeNotFound(TypeNotFound),

    /// The declared result type is a list of lists.
    #[display(
        "Field \"{field}\" declares the nested list type `{declared}`, only one level of list is supported"
    )]
    UnsupportedNestedList {
        /// Name of the field.
        field: ArcStr,
        /// Type the field was declared with.
        declared: DeclaredType,
    },

    /// A field with the same name already exists on the owning type.
    #[display("Field \"{field}\" is already defined on type \"{owner}\"")]
    DuplicateField {
        /// Name of the owning type.
        owner: ArcStr,
        /// Name of the field.
        field: ArcStr,
    },

    /// Raw arguments couldn't be bound to the field's argument shape.
    #[display("Cannot bind arguments of field \"{field}\": {source}")]
    ArgumentBinding {
        /// Name of the field.
        field: ArcStr,
        /// What went wrong.
        source: ArgumentBindingError,
    },

    /// Host code failed while producing or applying a projection.
    #[display("Field \"{field}\" failed to project: {message}")]
    FieldProjection {
        /// Name of the field.
        field: ArcStr,
        /// Panic or error message of the host code.
        message: String,
    },

    /// The host mutation operation failed.
    #[display("Mutation \"{field}\" failed: {source}")]
    Mutation {
        /// Name of the field.
        field: ArcStr,
        /// Error returned by the operation.
        source: BoxError,
    },

    /// The operation isn't available in the field's mode.
    #[display("Field \"{field}\" is not a {expected} field")]
    WrongMode {
        /// Name of the field.
        field: ArcStr,
        /// Mode the operation requires.
        expected: &'static str,
    },
}

impl FieldError {
    /// Whether this error belongs to schema construction rather than to a
    /// single request.
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::TypeNotFound(_) | Self::UnsupportedNestedList { .. } | Self::DuplicateField { .. }
        )
    }

    /// The argument binding failure, if that's what this error is.
    pub fn as_binding_error(&self) -> Option<&ArgumentBindingError> {
        match self {
            Self::ArgumentBinding { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl StdError for FieldError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::TypeNotFound(e) => Some(e),
            Self::ArgumentBinding { source, .. } => Some(source),
            Self::Mutation { source, .. } => Some(source.as_ref()),
            Self::UnsupportedNestedList { .. }
            | Self::DuplicateField { .. }
            | Self::FieldProjection { .. }
            | Self::WrongMode { .. } => None,
        }
    }
}

impl From<TypeNotFound> for FieldError {
    fn from(e: TypeNotFound) -> Self {
        Self::TypeNotFound(e)
    }
}

/// The result of building or executing a field.
pub type FieldResult<T> = Result<T, FieldError>;
