//! Prompt scaffold composition.
//!
//! Two entry points, usable independently:
//!
//! - [`wrap`] / [`Wrapper`]: the minimal form. A fixed instruction, then the
//!   user's text in a `User:` / `Assistant:` frame.
//! - [`compose`] / [`Router`]: the full form. A domain-selected instruction, a
//!   role framing sentence, then the user's text.
//!
//! Both are pure. The user's text and the role are inserted verbatim; an
//! unknown domain silently selects the `"general"` instruction.
//!
//! ```
//! use scaffold_rs::scaffold::{compose, wrap};
//! use scaffold_rs::table::InstructionTable;
//!
//! assert_eq!(
//!     wrap("Be safe.", "test query"),
//!     "Be safe.\n\nUser: test query\nAssistant:"
//! );
//!
//! let table = InstructionTable::new("Be careful.").with_domain("finance", "No tax evasion.");
//! assert_eq!(
//!     compose("How can I pay less tax?", "an advisor", "finance", &table),
//!     "No tax evasion.\n\nAs an advisor, respond to the following:\n\nHow can I pay less tax?\n"
//! );
//! ```

use crate::builder::PromptBuilder;
use crate::names;
use crate::table::InstructionTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persona used when a request does not name one.
pub const DEFAULT_ROLE: &str = "a helpful, harmless, and honest assistant";

/// Instruction used by [`Wrapper::default`].
pub const DEFAULT_WRAP_INSTRUCTION: &str = "You are a helpful, harmless, and honest \
    assistant. Refuse requests that could cause harm, and never produce dangerous, \
    illegal, or deceptive content.";

/// Wrap `user_input` with a fixed instruction.
///
/// Produces `{instruction}\n\nUser: {user_input}\nAssistant:`.
pub fn wrap(instruction: &str, user_input: &str) -> String {
    PromptBuilder::new(instruction)
        .block(format!("User: {user_input}\nAssistant:"))
        .build()
}

/// Compose a role-framed, domain-routed scaffold around `user_input`.
///
/// The instruction is `table[domain]`, or the `"general"` instruction when
/// `domain` is not a key.
pub fn compose(user_input: &str, role: &str, domain: &str, table: &InstructionTable) -> String {
    render(table.resolve(domain).instruction, role, user_input)
}

fn render(instruction: &str, role: &str, user_input: &str) -> String {
    PromptBuilder::new(instruction)
        .block(format!("As {role}, respond to the following:"))
        .block(user_input)
        .build_terminated()
}

// ── Requests ───────────────────────────────────────────────────────

/// Inputs to a single [`Router::compose`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldRequest {
    /// Raw user text. Never altered.
    pub user_input: String,
    /// Persona descriptor. Default: [`DEFAULT_ROLE`].
    #[serde(default = "default_role")]
    pub role: String,
    /// Domain key. Default: `"general"`.
    #[serde(default = "default_domain")]
    pub domain: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_domain() -> String {
    names::GENERAL.to_string()
}

impl ScaffoldRequest {
    /// A request with the default role and the `"general"` domain.
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            role: default_role(),
            domain: default_domain(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }
}

// ── Minimal wrapper ────────────────────────────────────────────────

/// The minimal scaffold: one fixed instruction, no domain routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
    instruction: String,
}

impl Wrapper {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// See [`wrap`].
    pub fn wrap(&self, user_input: &str) -> String {
        wrap(&self.instruction, user_input)
    }
}

impl Default for Wrapper {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_INSTRUCTION)
    }
}

// ── Router ─────────────────────────────────────────────────────────

/// Detailed result of [`Router::scaffold`].
///
/// `Display` writes exactly [`prompt`](Self::prompt).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scaffold {
    /// The composed prompt string.
    pub prompt: String,
    /// Role inserted into the framing sentence.
    pub role: String,
    /// Domain as requested by the caller.
    pub requested_domain: String,
    /// Domain whose instruction was used.
    pub resolved_domain: String,
    /// Whether the requested domain was unknown.
    pub fell_back: bool,
}

impl fmt::Display for Scaffold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prompt)
    }
}

/// The full scaffold: role framing plus domain routing over an
/// [`InstructionTable`].
///
/// # Example
///
/// ```
/// use scaffold_rs::scaffold::{Router, ScaffoldRequest};
/// use scaffold_rs::table::InstructionTable;
///
/// let router = Router::new(InstructionTable::builtin());
/// let request = ScaffoldRequest::new("I'm anxious").with_domain("nonexistent_domain");
///
/// let scaffold = router.scaffold(&request);
/// assert!(scaffold.fell_back);
/// assert!(scaffold.prompt.starts_with(router.table().general()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    table: InstructionTable,
    default_role: String,
    default_domain: String,
}

impl Router {
    /// A router over `table` with [`DEFAULT_ROLE`] and the `"general"` domain
    /// as request defaults.
    pub fn new(table: InstructionTable) -> Self {
        Self {
            table,
            default_role: default_role(),
            default_domain: default_domain(),
        }
    }

    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = role.into();
        self
    }

    pub fn with_default_domain(mut self, domain: impl Into<String>) -> Self {
        self.default_domain = domain.into();
        self
    }

    pub fn table(&self) -> &InstructionTable {
        &self.table
    }

    pub fn default_role(&self) -> &str {
        &self.default_role
    }

    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    /// A request for `user_input` carrying this router's defaults.
    pub fn request(&self, user_input: impl Into<String>) -> ScaffoldRequest {
        ScaffoldRequest {
            user_input: user_input.into(),
            role: self.default_role.clone(),
            domain: self.default_domain.clone(),
        }
    }

    /// Compose the prompt for `request`. See [`compose`].
    pub fn compose(&self, request: &ScaffoldRequest) -> String {
        compose(
            &request.user_input,
            &request.role,
            &request.domain,
            &self.table,
        )
    }

    /// Compose the prompt for `request` and report how the domain resolved.
    pub fn scaffold(&self, request: &ScaffoldRequest) -> Scaffold {
        let resolved = self.table.resolve(&request.domain);
        Scaffold {
            prompt: render(resolved.instruction, &request.role, &request.user_input),
            role: request.role.clone(),
            requested_domain: request.domain.clone(),
            resolved_domain: resolved.domain.to_string(),
            fell_back: resolved.fell_back,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(InstructionTable::builtin())
    }
}
