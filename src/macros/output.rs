/// Implements [`OutputType`] and [`NamedOutput`] for Rust types registered
/// as named schema types.
///
/// ```rust
/// # use juniper_fields::{DeclaredType, OutputType as _, graphql_output};
/// #
/// struct Post;
/// struct User;
///
/// graphql_output!(Post, User);
///
/// assert_eq!(<Vec<Post>>::declared(), DeclaredType::list_of::<Post>());
/// ```
///
/// [`NamedOutput`]: crate::NamedOutput
/// [`OutputType`]: crate::OutputType
#[macro_export]
macro_rules! graphql_output {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::OutputType for $ty {
            fn declared() -> $crate::DeclaredType {
                $crate::DeclaredType::named::<Self>()
            }
        }

        impl $crate::NamedOutput for $ty {}
    )+};
}
