//! Business domains module.
//!
//! This crate has a single bounded context: the tools domain, which holds
//! the letter-counting capability and the machinery exposing it over MCP.

pub mod tools;
