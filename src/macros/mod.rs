//! Declarative macros for declaring argument shapes and output types.

#[macro_use]
mod arguments;
#[macro_use]
mod output;
