//! Types used to describe a `GraphQL` schema

use std::sync::Arc;

use arcstr::ArcStr;

use crate::ast::{InputValue, Type};

/// Whether an item is deprecated, with context.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum DeprecationStatus {
    /// The field/variant is not deprecated.
    #[default]
    Current,
    /// The field/variant is deprecated, with an optional reason
    Deprecated(Option<ArcStr>),
}

impl DeprecationStatus {
    /// If this deprecation status indicates the item is deprecated.
    pub fn is_deprecated(&self) -> bool {
        match self {
            Self::Current => false,
            Self::Deprecated(_) => true,
        }
    }

    /// An optional reason for the deprecation, or none if `Current`.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Current => None,
            Self::Deprecated(rsn) => rsn.as_deref(),
        }
    }
}

/// The meta type of a schema type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypeKind {
    /// ## Scalar types
    ///
    /// Scalar types appear as the leaf nodes of GraphQL queries.
    Scalar,

    /// ## Object types
    ///
    /// Objects have fields and can implement interfaces.
    Object,

    /// ## Interface types
    Interface,

    /// ## Union types
    Union,

    /// ## Enum types
    ///
    /// Like scalars, enum types appear as the leaf nodes of GraphQL queries.
    Enum,

    /// ## Input objects
    ///
    /// Represents complex values provided in queries _into_ the system.
    InputObject,
}

/// Schema type node stored in a [`TypeRegistry`].
///
/// [`TypeRegistry`]: crate::TypeRegistry
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetaType {
    name: ArcStr,
    description: Option<ArcStr>,
    kind: TypeKind,
}

impl MetaType {
    /// Builds a new [`MetaType`] of the given `kind`.
    pub fn new(name: impl Into<ArcStr>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
        }
    }

    /// Builds a new scalar [`MetaType`].
    pub fn scalar(name: impl Into<ArcStr>) -> Self {
        Self::new(name, TypeKind::Scalar)
    }

    /// Builds a new object [`MetaType`].
    pub fn object(name: impl Into<ArcStr>) -> Self {
        Self::new(name, TypeKind::Object)
    }

    /// Builds a new enum [`MetaType`].
    pub fn enumeration(name: impl Into<ArcStr>) -> Self {
        Self::new(name, TypeKind::Enum)
    }

    /// Sets the `description` of this [`MetaType`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name of this type, as exposed in the schema.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Human-readable description, if any.
    pub fn description_text(&self) -> Option<&ArcStr> {
        self.description.as_ref()
    }

    /// Kind of this type.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns true if the type can occur in leaf positions in queries
    ///
    /// Only enums and scalars are leaf types.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, TypeKind::Enum | TypeKind::Scalar)
    }

    /// Returns true if the type is a composite type
    ///
    /// Objects, interfaces, and unions are composite.
    pub fn is_composite(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Object | TypeKind::Interface | TypeKind::Union
        )
    }

    /// Returns true if the type is built-in to GraphQL.
    pub fn is_builtin(&self) -> bool {
        // "used exclusively by GraphQL’s introspection system"
        self.name.starts_with("__")
            || matches!(&*self.name, "Boolean" | "String" | "Int" | "Float" | "ID")
    }
}

/// Result type of a field, resolved against the schema.
///
/// Lists wrap exactly one named type, as fields never declare nested lists.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedType {
    /// A single value of the named type.
    Named(Arc<MetaType>),
    /// A list of values of the inner type.
    List(Box<ResolvedType>),
}

impl ResolvedType {
    /// Wraps this type into a list.
    #[must_use]
    pub fn into_list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Whether the outermost layer is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The named type at the core of this type.
    pub fn innermost(&self) -> &Arc<MetaType> {
        match self {
            Self::Named(meta) => meta,
            Self::List(inner) => inner.innermost(),
        }
    }

    /// Construct a [`Type`] literal, e.g. for introspection output.
    pub fn as_type(&self) -> Type {
        match self {
            Self::Named(meta) => Type::Named(meta.name().clone()),
            Self::List(inner) => Type::List(Box::new(inner.as_type())),
        }
    }
}

/// Metadata for an argument to a field
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: Type,
    #[doc(hidden)]
    pub default_value: Option<InputValue>,
}

impl Argument {
    /// Builds a new [`Argument`] of the given [`Type`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>, arg_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arg_type,
            default_value: None,
        }
    }

    /// Sets the `description` of this [`Argument`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value of this [`Argument`].
    ///
    /// Overwrites any previously set default value.
    #[must_use]
    pub fn default_value(mut self, val: InputValue) -> Self {
        self.default_value = Some(val);
        self
    }

    /// An argument must be supplied when its type is non-null and there is no
    /// default value to fall back to.
    pub fn is_required(&self) -> bool {
        self.arg_type.is_non_null() && self.default_value.is_none()
    }

    /// Returns true if the type is built-in to GraphQL.
    pub fn is_builtin(&self) -> bool {
        // "used exclusively by GraphQL’s introspection system"
        self.name.starts_with("__")
    }
}
