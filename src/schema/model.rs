use std::fmt;

use arcstr::ArcStr;
use indexmap::{IndexMap, map::Entry};
use serde::Deserialize;

use crate::{
    error::{FieldError, FieldResult},
    field::{Complexity, Field},
};

/// Schema-wide settings applied while fields are added to their owning
/// types.
///
/// Every setting has a default, so an empty document is a valid config.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Weight given to fields which were built without an explicit
    /// [`Complexity`].
    pub default_complexity: u64,

    /// Resolve result types as soon as fields are added, instead of on
    /// first use.
    ///
    /// Requires every result type to be registered before its fields.
    pub eager_type_resolution: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            default_complexity: Complexity::DEFAULT_WEIGHT,
            eager_type_resolution: false,
        }
    }
}

/// Fields of one owning object type, in declaration order.
pub struct FieldSet<CtxT, E> {
    owner: ArcStr,
    config: SchemaConfig,
    fields: IndexMap<ArcStr, Field<CtxT, E>>,
}

impl<CtxT, E> FieldSet<CtxT, E> {
    /// Creates an empty set for the type named `owner`.
    pub fn new(owner: impl Into<ArcStr>) -> Self {
        Self::with_config(owner, SchemaConfig::default())
    }

    /// Creates an empty set for the type named `owner`, with custom settings.
    pub fn with_config(owner: impl Into<ArcStr>, config: SchemaConfig) -> Self {
        Self {
            owner: owner.into(),
            config,
            fields: IndexMap::new(),
        }
    }

    /// Name of the owning type.
    pub fn owner(&self) -> &ArcStr {
        &self.owner
    }

    /// Settings of this set.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Adds a field.
    ///
    /// # Errors
    ///
    /// - [`FieldError::DuplicateField`] if a field with the same name exists;
    /// - [`FieldError::TypeNotFound`] if eager type resolution is enabled and
    ///   the result type isn't registered.
    pub fn add(&mut self, field: Field<CtxT, E>) -> FieldResult<&Field<CtxT, E>> {
        let default_complexity = self.config.default_complexity;
        let field = field.or_complexity(|| Complexity::Fixed(default_complexity));
        if self.config.eager_type_resolution {
            field.result_type()?;
        }

        match self.fields.entry(field.name().clone()) {
            Entry::Occupied(_) => {
                tracing::warn!(owner = %self.owner, field = %field.name(), "duplicate field");
                Err(FieldError::DuplicateField {
                    owner: self.owner.clone(),
                    field: field.name().clone(),
                })
            }
            Entry::Vacant(e) => {
                tracing::debug!(owner = %self.owner, field = %field.name(), "added field");
                Ok(&*e.insert(field))
            }
        }
    }

    /// Looks a field up by name.
    pub fn get(&self, name: &str) -> Option<&Field<CtxT, E>> {
        self.fields.get(name)
    }

    /// Iterates over the fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Field<CtxT, E>> {
        self.fields.values()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Checks whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sum of the complexity of every field, each given `children` as the
    /// cost of its selection.
    pub fn total_complexity(&self, children: u64) -> u64 {
        self.iter()
            .map(|f| f.complexity_weight().cost(children))
            .fold(0, u64::saturating_add)
    }
}

impl<'a, CtxT, E> IntoIterator for &'a FieldSet<CtxT, E> {
    type Item = &'a Field<CtxT, E>;
    type IntoIter = indexmap::map::Values<'a, ArcStr, Field<CtxT, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

impl<CtxT, E> fmt::Debug for FieldSet<CtxT, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSet")
            .field("owner", &self.owner)
            .field("config", &self.config)
            .field("fields", &self.fields.values().collect::<Vec<_>>())
            .finish()
    }
}

/// Something holding fields whose result types must all resolve before the
/// schema may serve queries.
///
/// Object-safe, so sets of differently typed entities can be checked
/// together with [`ensure_resolved`].
pub trait ResolveTypes {
    /// Resolves the result type of every field.
    ///
    /// # Errors
    ///
    /// The first [`FieldError::TypeNotFound`] encountered.
    fn resolve_types(&self) -> FieldResult<()>;
}

impl<CtxT, E> ResolveTypes for FieldSet<CtxT, E> {
    fn resolve_types(&self) -> FieldResult<()> {
        let _span = tracing::debug_span!("resolve_types", owner = %self.owner).entered();
        self.iter().try_for_each(|f| f.result_type().map(drop))
    }
}

/// Resolves the result types of all `sets`, failing on the first type which
/// isn't registered.
///
/// # Errors
///
/// The first [`FieldError::TypeNotFound`] encountered.
pub fn ensure_resolved<'a>(
    sets: impl IntoIterator<Item = &'a dyn ResolveTypes>,
) -> FieldResult<()> {
    sets.into_iter().try_for_each(ResolveTypes::resolve_types)
}
