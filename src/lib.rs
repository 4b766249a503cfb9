#![deny(clippy::print_stdout)]

pub mod catalog;
pub mod command_line;
pub mod errors;
pub mod formatting;
pub mod molecule;
pub mod prediction;
pub mod rest_api;
