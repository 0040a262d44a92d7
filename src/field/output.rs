//! Result types of fields and the values they produce.

use std::{any::Any, fmt};

use crate::schema::registry::HostType;

/// Result type a field is declared with: a named element type wrapped into
/// zero or more list layers.
///
/// Only built from [`NamedOutput`] types, so the element is never a
/// collection itself:
///
/// ```compile_fail
/// # use juniper_fields::DeclaredType;
/// let _ = DeclaredType::named::<Vec<String>>();
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeclaredType {
    element: HostType,
    list_depth: usize,
}

impl DeclaredType {
    /// Declares a single value of `T`.
    pub fn named<T: NamedOutput>() -> Self {
        Self {
            element: T::host_type(),
            list_depth: 0,
        }
    }

    /// Declares a collection of `T` values.
    pub fn list_of<T: NamedOutput>() -> Self {
        Self::named::<T>().into_list()
    }

    /// Wraps this type into a collection.
    #[must_use]
    pub fn into_list(self) -> Self {
        Self {
            list_depth: self.list_depth + 1,
            ..self
        }
    }

    /// Named type at the bottom of all list layers.
    pub fn element(&self) -> HostType {
        self.element
    }

    /// Number of list layers around [`DeclaredType::element`].
    pub fn list_depth(&self) -> usize {
        self.list_depth
    }

    /// Unwraps at most one collection layer.
    ///
    /// Returns the element type and whether a layer was removed, or [`None`]
    /// for collections of collections.
    pub fn unwrap_list(&self) -> Option<(HostType, bool)> {
        match self.list_depth {
            0 => Some((self.element, false)),
            1 => Some((self.element, true)),
            _ => None,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.list_depth;
        write!(f, "{}{}{}", "[".repeat(depth), self.element, "]".repeat(depth))
    }
}

/// Rust types a field can produce.
///
/// Collections implement this by wrapping their element's declaration, so
/// list-ness is known statically at the place a field is built.
pub trait OutputType: Send + 'static {
    /// The declared type of a field producing `Self`.
    fn declared() -> DeclaredType;
}

/// [`OutputType`]s which are not collections.
///
/// Computed-once fields are restricted to these.
pub trait NamedOutput: OutputType {
    /// Identity the schema type is registered under.
    fn host_type() -> HostType {
        HostType::of::<Self>()
    }
}

impl<T: OutputType> OutputType for Vec<T> {
    fn declared() -> DeclaredType {
        T::declared().into_list()
    }
}

impl<T: OutputType> OutputType for Option<T> {
    fn declared() -> DeclaredType {
        T::declared()
    }
}

impl<T: NamedOutput> NamedOutput for Option<T> {
    fn host_type() -> HostType {
        T::host_type()
    }
}

/// Value produced by a field, with its concrete type erased.
///
/// The execution engine knows the type from the field's result type and gets
/// it back with [`FieldValue::downcast`].
pub struct FieldValue(Box<dyn Any + Send>);

impl FieldValue {
    /// Erases the type of `value`.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Checks whether the value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Views the value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Takes the value out as a `T`, giving `self` back on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        self.0.downcast().map(|v| *v).map_err(Self)
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldValue").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::registry::HostType;

    use super::{DeclaredType, FieldValue, NamedOutput as _, OutputType as _};

    #[test]
    fn unwraps_one_list_layer() {
        assert_eq!(
            DeclaredType::named::<String>().unwrap_list(),
            Some((HostType::of::<String>(), false)),
        );
        assert_eq!(
            DeclaredType::list_of::<String>().unwrap_list(),
            Some((HostType::of::<String>(), true)),
        );
        assert_eq!(DeclaredType::list_of::<String>().into_list().unwrap_list(), None);
    }

    #[test]
    fn optional_element_is_transparent() {
        let declared = DeclaredType::list_of::<Option<String>>();

        assert_eq!(declared.element(), HostType::of::<String>());
        assert_eq!(declared.list_depth(), 1);
    }

    #[test]
    fn declared_from_rust_types() {
        assert_eq!(<Vec<String>>::declared(), DeclaredType::list_of::<String>());
        assert_eq!(<Option<i32>>::declared(), DeclaredType::named::<i32>());
        assert_eq!(<Option<i32>>::host_type(), HostType::of::<i32>());
        assert_eq!(
            <Vec<Vec<bool>>>::declared(),
            DeclaredType::list_of::<bool>().into_list(),
        );
    }

    #[test]
    fn display_nested() {
        let declared = DeclaredType::list_of::<bool>().into_list();
        assert_eq!(declared.to_string(), "[[bool]]");
    }

    #[test]
    fn field_value_downcast() {
        let value = FieldValue::new(vec![1, 2, 3]);
        assert!(value.is::<Vec<i32>>());
        assert_eq!(value.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));

        let value = value.downcast::<String>().unwrap_err();
        assert_eq!(value.downcast::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
    }
}
