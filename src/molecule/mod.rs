pub mod descriptors;
pub mod standardization;
pub mod validation;

pub use validation::{validate, validate_with, SmilesString, ValidationOptions};
