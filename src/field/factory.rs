use std::sync::Arc;

use arcstr::ArcStr;

use crate::{
    arguments::{self, ArgumentShape, ArgumentShapeInfo, RawArguments},
    error::{BoxError, FieldError, FieldResult},
    field::{
        DerivedResolver, Field, FieldMode, Supplier,
        output::{DeclaredType, FieldValue, NamedOutput, OutputType},
        projection::{Projection, ProjectionFn, catch_host_panic},
    },
    schema::registry::SharedRegistry,
};

/// Host operation performing the side effect of a mutation field.
pub type Mutation<CtxT, A> = Box<dyn Fn(&CtxT, A) -> Result<(), BoxError> + Send + Sync>;

type Projector<CtxT, E, A> = Box<dyn Fn(A) -> ProjectionFn<CtxT, E> + Send + Sync>;

struct TypedResolver<CtxT, E, A> {
    project: Projector<CtxT, E, A>,
    mutation: Option<Mutation<CtxT, A>>,
}

impl<CtxT, E, A: ArgumentShape> TypedResolver<CtxT, E, A> {
    fn bind(field: &ArcStr, raw: &RawArguments) -> FieldResult<A> {
        arguments::bind::<A>(raw).map_err(|source| {
            tracing::debug!(field = %field, error = %source, "failed to bind arguments");
            FieldError::ArgumentBinding {
                field: field.clone(),
                source,
            }
        })
    }
}

impl<CtxT, E, A: ArgumentShape> DerivedResolver<CtxT, E> for TypedResolver<CtxT, E, A> {
    fn project(&self, field: &ArcStr, raw: &RawArguments) -> FieldResult<Projection<CtxT, E>> {
        let args = Self::bind(field, raw)?;
        let apply = catch_host_panic(field, || (self.project)(args))?;
        Ok(Projection::new(field.clone(), apply))
    }

    fn mutate(&self, field: &ArcStr, ctx: &CtxT, raw: &RawArguments) -> FieldResult<()> {
        let args = Self::bind(field, raw)?;
        let Some(mutation) = &self.mutation else {
            tracing::trace!(field = %field, "no mutation attached");
            return Ok(());
        };
        mutation(ctx, args).map_err(|source| FieldError::Mutation {
            field: field.clone(),
            source,
        })
    }

    fn has_mutation(&self) -> bool {
        self.mutation.is_some()
    }
}

impl<CtxT: 'static, E: 'static> Field<CtxT, E> {
    /// Builds a derived field producing `R`.
    ///
    /// `project` receives the bound arguments of shape `A` and returns the
    /// projection from the context and the source entity. A `Vec<T>` result
    /// makes a list field of `T`.
    ///
    /// # Errors
    ///
    /// [`FieldError::UnsupportedNestedList`] if `R` is a collection of
    /// collections.
    pub fn derived<A, R, P, F>(
        registry: &SharedRegistry,
        name: impl Into<ArcStr>,
        project: F,
    ) -> FieldResult<Self>
    where
        A: ArgumentShape,
        R: OutputType,
        F: Fn(A) -> P + Send + Sync + 'static,
        P: Fn(&CtxT, &E) -> R + Send + Sync + 'static,
    {
        Self::derived_as(registry, name, R::declared(), project, None)
    }

    /// Builds a derived field producing `R`, with a mutation operation run
    /// by [`Field::run_mutation`].
    ///
    /// # Errors
    ///
    /// [`FieldError::UnsupportedNestedList`] if `R` is a collection of
    /// collections.
    pub fn derived_with_mutation<A, R, P, F, M>(
        registry: &SharedRegistry,
        name: impl Into<ArcStr>,
        project: F,
        mutation: M,
    ) -> FieldResult<Self>
    where
        A: ArgumentShape,
        R: OutputType,
        F: Fn(A) -> P + Send + Sync + 'static,
        P: Fn(&CtxT, &E) -> R + Send + Sync + 'static,
        M: Fn(&CtxT, A) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let mutation: Mutation<CtxT, A> = Box::new(mutation);
        Self::derived_as(registry, name, R::declared(), project, Some(mutation))
    }

    /// Builds a derived field with an explicitly declared result type.
    ///
    /// Useful when the Rust value produced by the projection isn't the
    /// type the schema should see.
    ///
    /// # Errors
    ///
    /// [`FieldError::UnsupportedNestedList`] if `declared` is a collection of
    /// collections.
    pub fn derived_as<A, R, P, F>(
        registry: &SharedRegistry,
        name: impl Into<ArcStr>,
        declared: DeclaredType,
        project: F,
        mutation: Option<Mutation<CtxT, A>>,
    ) -> FieldResult<Self>
    where
        A: ArgumentShape,
        R: Send + 'static,
        F: Fn(A) -> P + Send + Sync + 'static,
        P: Fn(&CtxT, &E) -> R + Send + Sync + 'static,
    {
        let name = name.into();
        let Some((element, is_list)) = declared.unwrap_list() else {
            tracing::warn!(field = %name, declared = %declared, "nested lists are not supported");
            return Err(FieldError::UnsupportedNestedList {
                field: name,
                declared,
            });
        };

        let project: Projector<CtxT, E, A> = Box::new(move |args: A| -> ProjectionFn<CtxT, E> {
            let project = project(args);
            Arc::new(move |ctx: &CtxT, entity: &E| FieldValue::new(project(ctx, entity)))
        });
        let resolver = TypedResolver { project, mutation };

        tracing::debug!(
            field = %name,
            element = %element,
            is_list,
            arguments = %ArgumentShapeInfo::of::<A>().host_type(),
            "built derived field"
        );
        Ok(Self::new(
            registry,
            name,
            element,
            is_list,
            ArgumentShapeInfo::of::<A>(),
            FieldMode::Derived(Box::new(resolver)),
        ))
    }

    /// Builds a computed-once field whose value comes from `supplier`.
    ///
    /// Such a field takes no arguments, never sees a context or a source
    /// entity, and can't produce a list.
    pub fn computed_once<R, S>(registry: &SharedRegistry, name: impl Into<ArcStr>, supplier: S) -> Self
    where
        R: NamedOutput,
        S: Fn() -> R + Send + Sync + 'static,
    {
        let name = name.into();
        let supply: Supplier = Box::new(move || FieldValue::new(supplier()));

        tracing::debug!(field = %name, element = %R::host_type(), "built computed-once field");
        Self::new(
            registry,
            name,
            R::host_type(),
            false,
            ArgumentShapeInfo::of::<()>(),
            FieldMode::ComputedOnce(supply),
        )
    }
}
