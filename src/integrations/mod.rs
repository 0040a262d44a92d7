//! Integrations with external crates.

#[doc(hidden)]
pub mod serde;
