//! Anchor IDL schemas and conversion
//!
//! Types for the new (0.30+) and legacy (pre-0.29) IDL formats, plus the
//! downgrade conversion between them.

mod convert;
mod legacy;
mod types;

pub use convert::*;
pub use legacy::*;
pub use types::*;
