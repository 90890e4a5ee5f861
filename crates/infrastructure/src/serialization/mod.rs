//! Deterministic JSON serialization for report files.
//!
//! Output is stable across runs:
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
