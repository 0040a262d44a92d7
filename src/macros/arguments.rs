//! [`graphql_arguments!`] macro implementation.
//!
//! [`graphql_arguments!`]: graphql_arguments

/// Declares a struct and implements [`ArgumentShape`] for it.
///
/// Every field becomes an argument named by its `camelCase` spelling, typed
/// by its [`InputType`], and described by its doc comments. A field may have
/// a default value, given as anything its type can be built [`From`].
///
/// ```rust
/// # use juniper_fields::{InputValue, RawArguments, bind, graphql_arguments};
/// #
/// graphql_arguments! {
///     /// Arguments of the `posts` field.
///     #[derive(Debug)]
///     pub struct PostsArgs {
///         /// Maximum number of posts to return.
///         pub first_n: i32 = 10,
///         pub tag: Option<String>,
///     }
/// }
///
/// let args = PostsArgs::descriptors();
/// assert_eq!(args[0].name, "firstN");
/// assert_eq!(args[0].description.as_deref(), Some("Maximum number of posts to return."));
///
/// let raw: RawArguments = [("tag".to_owned(), InputValue::scalar("rust"))].into();
/// let bound = bind::<PostsArgs>(&raw).unwrap();
/// assert_eq!(bound.first_n, 10);
/// assert_eq!(bound.tag.as_deref(), Some("rust"));
/// #
/// # use juniper_fields::ArgumentShape as _;
/// ```
///
/// [`ArgumentShape`]: crate::ArgumentShape
/// [`InputType`]: crate::InputType
#[macro_export]
macro_rules! graphql_arguments {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::ArgumentShape for $name {
            fn descriptors() -> ::std::vec::Vec<$crate::meta::Argument> {
                ::std::vec![$({
                    let arg = $crate::meta::Argument::new(
                        $crate::to_camel_case(::core::stringify!($field)),
                        <$ty as $crate::InputType>::input_type(),
                    );
                    let arg = match $crate::doc_description(&[$($doc),*]) {
                        ::core::option::Option::Some(d) => arg.description(d),
                        ::core::option::Option::None => arg,
                    };
                    $(
                        let default: $ty = ::core::convert::From::from($default);
                        let arg = arg.default_value($crate::ToInputValue::to_input_value(&default));
                    )?
                    arg
                }),*]
            }

            fn from_arguments(
                args: &$crate::Arguments,
            ) -> ::core::result::Result<Self, $crate::ArgumentBindingError> {
                ::core::result::Result::Ok(Self {
                    $(
                        $field: args.get(&$crate::to_camel_case(::core::stringify!($field)))?,
                    )*
                })
            }
        }
    };
}
