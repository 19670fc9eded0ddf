//! Terminal output.

#[macro_use]
mod macros;

pub mod shell;
pub mod style;
