use std::{
    any::{self, Any},
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use arcstr::ArcStr;

use crate::{
    error::{FieldError, FieldResult},
    field::output::FieldValue,
};

/// Shortcut for a type-erased projection closure.
pub(crate) type ProjectionFn<CtxT, E> = Arc<dyn Fn(&CtxT, &E) -> FieldValue + Send + Sync>;

/// Description of how to derive a field's value from a context and a source
/// entity.
///
/// Returned by [`Field::bind_and_project`] with the arguments already bound.
/// The field never applies it; the execution engine does, possibly as part of
/// a larger query plan.
///
/// [`Field::bind_and_project`]: crate::Field::bind_and_project
pub struct Projection<CtxT, E> {
    field: ArcStr,
    apply: ProjectionFn<CtxT, E>,
}

impl<CtxT, E> Projection<CtxT, E> {
    pub(crate) fn new(field: ArcStr, apply: ProjectionFn<CtxT, E>) -> Self {
        Self { field, apply }
    }

    /// Name of the field this projection belongs to.
    pub fn field(&self) -> &ArcStr {
        &self.field
    }

    /// Derives the value from `ctx` and `entity`.
    ///
    /// # Errors
    ///
    /// [`FieldError::FieldProjection`] if the host code panics.
    pub fn apply(&self, ctx: &CtxT, entity: &E) -> FieldResult<FieldValue> {
        catch_host_panic(&self.field, || (self.apply)(ctx, entity))
    }

    /// Derives the value and takes it out as an `R`.
    ///
    /// # Errors
    ///
    /// [`FieldError::FieldProjection`] if the host code panics or the value
    /// isn't an `R`.
    pub fn apply_as<R: Any>(&self, ctx: &CtxT, entity: &E) -> FieldResult<R> {
        self.apply(ctx, entity)?
            .downcast()
            .map_err(|_| FieldError::FieldProjection {
                field: self.field.clone(),
                message: format!("projected value is not a `{}`", any::type_name::<R>()),
            })
    }
}

impl<CtxT, E> Clone for Projection<CtxT, E> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            apply: self.apply.clone(),
        }
    }
}

impl<CtxT, E> fmt::Debug for Projection<CtxT, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Runs host code, turning a panic into [`FieldError::FieldProjection`].
pub(crate) fn catch_host_panic<T>(field: &ArcStr, f: impl FnOnce() -> T) -> FieldResult<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::error!(field = %field, %message, "host code panicked");
        FieldError::FieldProjection {
            field: field.clone(),
            message,
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".into()
    }
}
