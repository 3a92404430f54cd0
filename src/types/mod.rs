//! Type-safe wrapper types for improved compile-time guarantees.
//!
//! This module provides NewType pattern implementations to prevent
//! primitive type misuse and improve API clarity.

mod newtypes;
mod target;

pub use newtypes::{CanonicalPath, FileHash, ServerName};
pub use target::{Privilege, ScanMode, ScanTarget};
