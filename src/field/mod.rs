//! Schema fields: named, typed, argument-accepting members of a GraphQL
//! object type.

mod complexity;
mod factory;
pub mod output;
mod projection;

use std::{fmt, sync::OnceLock};

use arcstr::ArcStr;

use crate::{
    arguments::{ArgumentShapeInfo, RawArguments},
    error::{FieldError, FieldResult},
    field::output::FieldValue,
    schema::{
        meta::{Argument, DeprecationStatus, ResolvedType},
        registry::{HostType, SharedRegistry},
    },
};

use self::projection::catch_host_panic;

pub use self::{
    complexity::{Complexity, ResolutionType},
    factory::Mutation,
    projection::Projection,
};

/// Type-erased derived-mode behavior, with the argument shape fixed at
/// construction.
pub(crate) trait DerivedResolver<CtxT, E>: Send + Sync {
    fn project(&self, field: &ArcStr, raw: &RawArguments) -> FieldResult<Projection<CtxT, E>>;

    fn mutate(&self, field: &ArcStr, ctx: &CtxT, raw: &RawArguments) -> FieldResult<()>;

    fn has_mutation(&self) -> bool;
}

static DEFAULT_COMPLEXITY: Complexity = Complexity::Fixed(Complexity::DEFAULT_WEIGHT);

pub(crate) type Supplier = Box<dyn Fn() -> FieldValue + Send + Sync>;

pub(crate) enum FieldMode<CtxT, E> {
    Derived(Box<dyn DerivedResolver<CtxT, E>>),
    ComputedOnce(Supplier),
}

/// How a [`Field`] produces its value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// The value is projected from the source entity, using bound arguments.
    Derived,
    /// The value comes from a supplier which needs no context and no
    /// arguments.
    ComputedOnce,
}

impl FieldKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Derived => "derived",
            Self::ComputedOnce => "computed-once",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field of a GraphQL object type whose source entities are `E` and whose
/// request context is `CtxT`.
///
/// Built with [`Field::derived`], [`Field::derived_with_mutation`],
/// [`Field::derived_as`] or [`Field::computed_once`]. The schema type of the
/// result is looked up lazily on the first call to [`Field::result_type`] and
/// kept for the field's lifetime, so the type may be registered after the
/// field is built.
///
/// Fields are immutable after construction, except for that cache, and may be
/// shared between threads.
pub struct Field<CtxT, E> {
    name: ArcStr,
    description: Option<ArcStr>,
    deprecation_status: DeprecationStatus,
    result_element_type: HostType,
    is_list: bool,
    argument_shape: ArgumentShapeInfo,
    mode: FieldMode<CtxT, E>,
    complexity: Option<Complexity>,
    resolution_type: ResolutionType,
    registry: SharedRegistry,
    resolved_type: OnceLock<ResolvedType>,
}

static_assertions::assert_impl_all!(Field<(), ()>: Send, Sync);

impl<CtxT, E> Field<CtxT, E> {
    fn new(
        registry: &SharedRegistry,
        name: ArcStr,
        result_element_type: HostType,
        is_list: bool,
        argument_shape: ArgumentShapeInfo,
        mode: FieldMode<CtxT, E>,
    ) -> Self {
        Self {
            name,
            description: None,
            deprecation_status: DeprecationStatus::Current,
            result_element_type,
            is_list,
            argument_shape,
            mode,
            complexity: None,
            resolution_type: ResolutionType::default(),
            registry: registry.clone(),
            resolved_type: OnceLock::new(),
        }
    }

    /// Sets the description of the field.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the field as deprecated, with an optional reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason.map(Into::into));
        self
    }

    /// Sets the cost weight of the field.
    #[must_use]
    pub fn complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = Some(complexity);
        self
    }

    /// Sets the cost weight unless one was set explicitly.
    pub(crate) fn or_complexity(mut self, complexity: impl FnOnce() -> Complexity) -> Self {
        self.complexity.get_or_insert_with(complexity);
        self
    }

    /// Sets how the engine shapes the projected value.
    #[must_use]
    pub fn resolution_type(mut self, resolution_type: ResolutionType) -> Self {
        self.resolution_type = resolution_type;
        self
    }

    /// Name of the field, unique within its owning type.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Description of the field, if any.
    pub fn description_text(&self) -> Option<&ArcStr> {
        self.description.as_ref()
    }

    /// Deprecation status of the field.
    pub fn deprecation_status(&self) -> &DeprecationStatus {
        &self.deprecation_status
    }

    /// Rust type of the result, with one list layer removed.
    pub fn result_element_type(&self) -> HostType {
        self.result_element_type
    }

    /// Whether the result is a list of [`Field::result_element_type`].
    pub fn is_list(&self) -> bool {
        self.is_list
    }

    /// Argument shape the field was built with.
    pub fn argument_shape(&self) -> ArgumentShapeInfo {
        self.argument_shape
    }

    /// Mode of the field.
    pub fn kind(&self) -> FieldKind {
        match self.mode {
            FieldMode::Derived(_) => FieldKind::Derived,
            FieldMode::ComputedOnce(_) => FieldKind::ComputedOnce,
        }
    }

    /// Whether a mutation operation is attached.
    pub fn has_mutation(&self) -> bool {
        match &self.mode {
            FieldMode::Derived(resolver) => resolver.has_mutation(),
            FieldMode::ComputedOnce(_) => false,
        }
    }

    /// Cost weight of the field, [`Complexity::default`] unless set.
    pub fn complexity_weight(&self) -> &Complexity {
        self.complexity.as_ref().unwrap_or(&DEFAULT_COMPLEXITY)
    }

    /// How the engine shapes the projected value.
    pub fn resolution(&self) -> ResolutionType {
        self.resolution_type
    }

    /// Schema type of the field's result.
    ///
    /// The first call looks the element type up in the registry and wraps it
    /// into a list if needed. Later calls return the same value without
    /// touching the registry. A failed lookup isn't cached.
    ///
    /// # Errors
    ///
    /// [`FieldError::TypeNotFound`] if the element type was never registered.
    pub fn result_type(&self) -> FieldResult<&ResolvedType> {
        if let Some(ty) = self.resolved_type.get() {
            return Ok(ty);
        }

        let meta = self
            .registry
            .resolve(&self.result_element_type)
            .inspect_err(|e| tracing::warn!(field = %self.name, "{e}"))?;
        let ty = ResolvedType::Named(meta);
        let ty = if self.is_list { ty.into_list() } else { ty };
        tracing::debug!(field = %self.name, r#type = %ty.as_type(), "resolved field type");

        // Concurrent first calls may both look the type up, but only one
        // value is ever published.
        Ok(self.resolved_type.get_or_init(|| ty))
    }

    /// Arguments the field accepts, in declaration order.
    pub fn arguments(&self) -> Vec<Argument> {
        self.argument_shape.descriptors()
    }

    /// Binds `raw` arguments to the field's argument shape and produces the
    /// projection deriving the value.
    ///
    /// The projection isn't applied here.
    ///
    /// # Errors
    ///
    /// - [`FieldError::ArgumentBinding`] if `raw` doesn't match the shape;
    /// - [`FieldError::FieldProjection`] if the host code panics;
    /// - [`FieldError::WrongMode`] for computed-once fields.
    pub fn bind_and_project(&self, raw: &RawArguments) -> FieldResult<Projection<CtxT, E>> {
        let _span = tracing::debug_span!("bind_and_project", field = %self.name).entered();
        match &self.mode {
            FieldMode::Derived(resolver) => resolver.project(&self.name, raw),
            FieldMode::ComputedOnce(_) => Err(self.wrong_mode(FieldKind::Derived)),
        }
    }

    /// Binds `raw` arguments and runs the attached mutation operation.
    ///
    /// Without an attached operation the arguments are still bound and
    /// nothing else happens.
    ///
    /// # Errors
    ///
    /// - [`FieldError::ArgumentBinding`] if `raw` doesn't match the shape;
    /// - [`FieldError::Mutation`] with the operation's own error;
    /// - [`FieldError::WrongMode`] for computed-once fields.
    pub fn run_mutation(&self, ctx: &CtxT, raw: &RawArguments) -> FieldResult<()> {
        let _span = tracing::debug_span!("run_mutation", field = %self.name).entered();
        match &self.mode {
            FieldMode::Derived(resolver) => resolver.mutate(&self.name, ctx, raw),
            FieldMode::ComputedOnce(_) => Err(self.wrong_mode(FieldKind::Derived)),
        }
    }

    /// Invokes the supplier of a computed-once field.
    ///
    /// # Errors
    ///
    /// - [`FieldError::FieldProjection`] if the supplier panics;
    /// - [`FieldError::WrongMode`] for derived fields.
    pub fn evaluate_computed_once(&self) -> FieldResult<FieldValue> {
        match &self.mode {
            FieldMode::ComputedOnce(supply) => {
                tracing::trace!(field = %self.name, "evaluating computed-once field");
                catch_host_panic(&self.name, || supply())
            }
            FieldMode::Derived(_) => Err(self.wrong_mode(FieldKind::ComputedOnce)),
        }
    }

    fn wrong_mode(&self, expected: FieldKind) -> FieldError {
        FieldError::WrongMode {
            field: self.name.clone(),
            expected: expected.as_str(),
        }
    }
}

impl<CtxT, E> fmt::Debug for Field<CtxT, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("deprecation_status", &self.deprecation_status)
            .field("result_element_type", &self.result_element_type)
            .field("is_list", &self.is_list)
            .field("argument_shape", &self.argument_shape)
            .field("kind", &self.kind())
            .field("complexity", self.complexity_weight())
            .field("resolution_type", &self.resolution_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Complexity, Field, ResolutionType,
        schema::{meta::DeprecationStatus, registry::SchemaRegistry},
    };

    #[test]
    fn builder_metadata() {
        let registry = SchemaRegistry::new().into_shared();
        let field = Field::derived(&registry, "oldTitle", |(): ()| {
            |_: &(), s: &String| s.clone()
        })
        .unwrap()
        .description("Title before the rename")
        .deprecated(Some("Use `title`"))
        .complexity(Complexity::Fixed(5))
        .resolution_type(ResolutionType::FirstOrDefault);

        assert_eq!(
            field.description_text().map(|d| d.as_str()),
            Some("Title before the rename"),
        );
        assert_eq!(
            field.deprecation_status(),
            &DeprecationStatus::Deprecated(Some("Use `title`".into())),
        );
        assert_eq!(field.complexity_weight().cost(1), 6);
        assert_eq!(field.resolution(), ResolutionType::FirstOrDefault);

        let debug = format!("{field:?}");
        assert!(debug.contains("oldTitle"), "{debug}");
    }

    #[test]
    fn defaults() {
        let registry = SchemaRegistry::new().into_shared();
        let field = Field::derived(&registry, "flag", |(): ()| |_: &(), _: &()| true).unwrap();

        assert_eq!(field.description_text(), None);
        assert!(!field.deprecation_status().is_deprecated());
        assert!(field.complexity_weight().is_default());
        assert_eq!(field.resolution(), ResolutionType::Unmodified);
    }
}
