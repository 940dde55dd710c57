//! Prompt scaffolds for steering language-model input.
//!
//! `scaffold-rs` wraps raw user text with fixed framing before it would be
//! sent to a model: a safety instruction chosen by domain, a role (persona)
//! sentence, and the user's text, verbatim. Nothing here calls a model or
//! evaluates a response; every function is a pure string transform.
//!
//! # Entry points
//!
//! - [`wrap`](scaffold::wrap) / [`Wrapper`](scaffold::Wrapper): fixed
//!   instruction plus a `User:` / `Assistant:` frame.
//! - [`compose`](scaffold::compose) / [`Router`](scaffold::Router): domain
//!   routing over an [`InstructionTable`](table::InstructionTable) plus role
//!   framing. Unknown domains fall back to `"general"`.
//! - [`ScaffoldConfig`](config::ScaffoldConfig): defaults, JSON config files,
//!   and custom instruction tables.
//!
//! # Example
//!
//! ```
//! use scaffold_rs::prelude::*;
//!
//! let router = Router::new(InstructionTable::builtin());
//! let request = ScaffoldRequest::new("How can I pay less tax?")
//!     .with_role("a responsible financial assistant")
//!     .with_domain("finance");
//!
//! let prompt = router.compose(&request);
//! assert!(prompt.starts_with(router.table().get("finance").unwrap()));
//! assert!(prompt.ends_with("following:\n\nHow can I pay less tax?\n"));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod names;
pub mod prelude;
pub mod scaffold;
pub mod table;

pub use config::ScaffoldConfig;
pub use error::ScaffoldError;
pub use scaffold::{Router, Scaffold, ScaffoldRequest, Wrapper, compose, wrap};
pub use table::InstructionTable;
