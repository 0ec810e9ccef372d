//! CLI command implementations

pub mod mask;
pub mod validate;
