//! Library tests and fixtures

pub mod fixtures;
mod mutation_tests;
