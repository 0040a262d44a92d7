pub mod containers;
pub mod scalars;
