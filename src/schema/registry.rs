//! Lookup of schema types by the Rust type they were declared with.

use std::{
    any::{self, TypeId},
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, PoisonError, RwLock},
};

use fnv::FnvHashMap;

use crate::{
    error::TypeNotFound,
    schema::meta::MetaType,
    types::scalars::ID,
};

/// Identity of a Rust type used as a field result or argument shape.
///
/// Equality and hashing only consider the [`TypeId`]; the name is kept for
/// error messages and logs.
#[derive(Clone, Copy)]
pub struct HostType {
    id: TypeId,
    name: &'static str,
}

impl HostType {
    /// Identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust name of the type.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for HostType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HostType {}

impl Hash for HostType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostType").field(&self.name).finish()
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Schema-wide store mapping [`HostType`]s to schema type nodes.
///
/// Lookups happen lazily, so a type only has to be registered by the time a
/// field asks for it, not by the time the field is constructed.
pub trait TypeRegistry: Send + Sync {
    /// Looks up the schema type registered for `ty`.
    ///
    /// # Errors
    ///
    /// [`TypeNotFound`] if nothing was registered for `ty`.
    fn resolve(&self, ty: &HostType) -> Result<Arc<MetaType>, TypeNotFound>;
}

/// Shared handle to the registry fields resolve their result types against.
pub type SharedRegistry = Arc<dyn TypeRegistry>;

/// In-memory [`TypeRegistry`] which can keep growing while fields referencing
/// it already exist.
pub struct SchemaRegistry {
    types: RwLock<FnvHashMap<HostType, Arc<MetaType>>>,
}

impl SchemaRegistry {
    /// Creates a registry knowing only the builtin scalars.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register::<i32>(MetaType::scalar("Int"));
        registry.register::<f64>(MetaType::scalar("Float"));
        registry.register::<String>(MetaType::scalar("String"));
        registry.register::<bool>(MetaType::scalar("Boolean"));
        registry.register::<ID>(MetaType::scalar("ID"));
        registry
    }

    /// Creates a registry without any types, not even builtin scalars.
    pub fn empty() -> Self {
        Self {
            types: RwLock::new(FnvHashMap::default()),
        }
    }

    /// Registers `meta` as the schema type of `T`, replacing any previous
    /// registration.
    pub fn register<T: ?Sized + 'static>(&self, meta: MetaType) -> Arc<MetaType> {
        self.register_host(HostType::of::<T>(), meta)
    }

    /// Registers `meta` as the schema type of `ty`, replacing any previous
    /// registration.
    pub fn register_host(&self, ty: HostType, meta: MetaType) -> Arc<MetaType> {
        let meta = Arc::new(meta);
        tracing::trace!(host_type = ty.name(), schema_type = %meta.name(), "registering type");
        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ty, meta.clone());
        meta
    }

    /// Checks whether `T` has been registered.
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&HostType::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Checks whether the registry holds no types at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts this registry into a [`SharedRegistry`] handle.
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(self)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_map()
            .entries(types.iter().map(|(k, v)| (k.name(), v.name())))
            .finish()
    }
}

impl TypeRegistry for SchemaRegistry {
    fn resolve(&self, ty: &HostType) -> Result<Arc<MetaType>, TypeNotFound> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ty)
            .cloned()
            .ok_or(TypeNotFound(*ty))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::schema::meta::MetaType;

    use super::{HostType, SchemaRegistry, TypeRegistry as _};

    struct Post;

    #[test]
    fn builtin_scalars_are_registered() {
        let registry = SchemaRegistry::new();

        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.resolve(&HostType::of::<String>()).unwrap().name(),
            "String",
        );
    }

    #[test]
    fn resolves_types_registered_later() {
        let registry = Arc::new(SchemaRegistry::empty());
        let ty = HostType::of::<Post>();

        let err = registry.resolve(&ty).unwrap_err();
        assert_eq!(err.0, ty);

        let meta = registry.register::<Post>(MetaType::object("Post"));
        assert!(Arc::ptr_eq(&registry.resolve(&ty).unwrap(), &meta));
        assert!(registry.contains::<Post>());
    }

    #[test]
    fn host_type_identity() {
        assert_eq!(HostType::of::<Post>(), HostType::of::<Post>());
        assert_ne!(HostType::of::<Post>(), HostType::of::<Vec<Post>>());
        assert!(HostType::of::<Post>().name().ends_with("Post"));
    }
}
