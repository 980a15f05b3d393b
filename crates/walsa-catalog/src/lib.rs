// ABOUTME: Method catalog for the parameter browser: descriptors, built-in tables, file loading
// ABOUTME: Validates that every dropdown option resolves to a descriptor or a display fallback

mod builtin;
pub mod catalog;
pub mod descriptor;
pub mod validation;

pub use catalog::*;
pub use descriptor::*;
pub use validation::*;
