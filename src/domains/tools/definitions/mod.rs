//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod count_letter;

pub use count_letter::{CountEsParams, CountEsTool, count_occurrences};
