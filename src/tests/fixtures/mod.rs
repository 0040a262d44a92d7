//! Library fixtures

/// Blog schema with users, posts and a post-creating mutation.
pub mod blog;
