//! Blank-line block joiner.
//!
//! [`PromptBuilder`] assembles a prompt from ordered text blocks separated by
//! a blank line (`"\n\n"`). Blocks are appended verbatim: nothing is trimmed,
//! escaped, or reinterpreted, and an empty block still contributes its
//! separator.

/// Block separator placed between consecutive blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Builder for blank-line separated prompts.
///
/// # Example
///
/// ```
/// use scaffold_rs::builder::PromptBuilder;
///
/// let prompt = PromptBuilder::new("Be careful.")
///     .block("As a tutor, respond to the following:")
///     .block("What is 2 + 2?")
///     .build_terminated();
///
/// assert_eq!(
///     prompt,
///     "Be careful.\n\nAs a tutor, respond to the following:\n\nWhat is 2 + 2?\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    blocks: Vec<String>,
}

impl PromptBuilder {
    /// Create a builder whose first block is `lead`.
    pub fn new(lead: impl Into<String>) -> Self {
        Self {
            blocks: vec![lead.into()],
        }
    }

    /// Append a block. Empty content is kept.
    pub fn block(mut self, content: impl Into<String>) -> Self {
        self.blocks.push(content.into());
        self
    }

    /// Join all blocks with [`BLOCK_SEPARATOR`].
    pub fn build(self) -> String {
        self.blocks.join(BLOCK_SEPARATOR)
    }

    /// Like [`build`](Self::build), followed by a single trailing newline.
    pub fn build_terminated(self) -> String {
        let mut out = self.build();
        out.push('\n');
        out
    }
}
