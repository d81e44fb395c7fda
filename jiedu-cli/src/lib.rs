//! jiedu CLI library
//!
//! Command implementations for the jiedu reading-analysis tool.

pub mod commands;
pub mod input;
pub mod output;
