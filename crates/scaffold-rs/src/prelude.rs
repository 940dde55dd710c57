//! Convenience re-exports for common `scaffold-rs` types.
//!
//! Meant to be glob-imported:
//!
//! ```ignore
//! use scaffold_rs::prelude::*;
//! ```
//!
//! Pulls in both scaffold entry points, the request type, the instruction
//! table, and configuration. The block builder and domain name constants
//! stay in their modules.

// ── Composition ─────────────────────────────────────────────────────
pub use crate::scaffold::{
    DEFAULT_ROLE, DEFAULT_WRAP_INSTRUCTION, Router, Scaffold, ScaffoldRequest, Wrapper, compose,
    wrap,
};

// ── Tables & config ─────────────────────────────────────────────────
pub use crate::config::ScaffoldConfig;
pub use crate::error::ScaffoldError;
pub use crate::table::{InstructionTable, Resolved};
