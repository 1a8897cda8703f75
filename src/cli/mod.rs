//! CLI definitions for the convert-idl binary

mod commands;

pub use commands::*;
