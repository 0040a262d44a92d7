#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

#[doc(hidden)]
#[macro_use]
pub mod macros;
mod arguments;
mod ast;
mod error;
mod field;
pub mod integrations;
pub(crate) mod schema;
mod types;
mod util;
mod value;

#[cfg(test)]
mod tests;

// Needs to be public because macros use it.
#[doc(hidden)]
pub use crate::util::{doc_description, to_camel_case};

pub use crate::{
    arguments::{ArgumentShape, ArgumentShapeInfo, Arguments, RawArguments, bind},
    ast::{FromInputValue, InputType, InputValue, ToInputValue, Type},
    error::{ArgumentBindingError, BoxError, FieldError, FieldResult, TypeNotFound},
    field::{
        Complexity, Field, FieldKind, Mutation, Projection, ResolutionType,
        output::{DeclaredType, FieldValue, NamedOutput, OutputType},
    },
    schema::{
        meta,
        model::{FieldSet, ResolveTypes, SchemaConfig, ensure_resolved},
        registry::{HostType, SchemaRegistry, SharedRegistry, TypeRegistry},
    },
    types::scalars::{ID, ScalarConversionError},
    value::DefaultScalarValue,
};
