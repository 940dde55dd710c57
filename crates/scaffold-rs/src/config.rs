//! Scaffold configuration with sensible defaults.
//!
//! [`ScaffoldConfig`] captures the settings the scaffold entry points need and
//! converts them into library types via [`build_router`](ScaffoldConfig::build_router)
//! and [`build_wrapper`](ScaffoldConfig::build_wrapper). Every field has a
//! default, so a config file only lists what it overrides:
//!
//! ```json
//! {
//!   "default_role": "a careful research assistant",
//!   "table_path": "instructions.json",
//!   "extra_domains": { "education": "Explain step by step." }
//! }
//! ```

use crate::error::ScaffoldError;
use crate::names;
use crate::scaffold::{DEFAULT_ROLE, DEFAULT_WRAP_INSTRUCTION, Router, Wrapper};
use crate::table::InstructionTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for building a [`Router`] and a [`Wrapper`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Role used when a request does not name one. Default: [`DEFAULT_ROLE`].
    pub default_role: String,
    /// Domain used when a request does not name one. Default: `"general"`.
    pub default_domain: String,
    /// Instruction for the minimal wrapper. Default: [`DEFAULT_WRAP_INSTRUCTION`].
    pub wrap_instruction: String,
    /// JSON instruction table replacing the built-in one. Default: `None`.
    pub table_path: Option<PathBuf>,
    /// Domains merged over the active table. Default: empty.
    pub extra_domains: BTreeMap<String, String>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            default_role: DEFAULT_ROLE.to_string(),
            default_domain: names::GENERAL.to_string(),
            wrap_instruction: DEFAULT_WRAP_INSTRUCTION.to_string(),
            table_path: None,
            extra_domains: BTreeMap::new(),
        }
    }
}

impl ScaffoldConfig {
    /// Load a config from a JSON file.
    ///
    /// A relative `table_path` is resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self, ScaffoldError> {
        let data = std::fs::read_to_string(path).map_err(|source| ScaffoldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: ScaffoldConfig =
            serde_json::from_str(&data).map_err(|source| ScaffoldError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let relative = config
            .table_path
            .as_deref()
            .zip(path.parent())
            .filter(|(table, _)| table.is_relative())
            .map(|(table, dir)| dir.join(table));
        if relative.is_some() {
            config.table_path = relative;
        }

        debug!("Loaded scaffold config from {}", path.display());
        Ok(config)
    }

    pub fn with_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_path = Some(path.into());
        self
    }

    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = role.into();
        self
    }

    pub fn with_default_domain(mut self, domain: impl Into<String>) -> Self {
        self.default_domain = domain.into();
        self
    }

    pub fn with_wrap_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.wrap_instruction = instruction.into();
        self
    }

    /// Add a domain merged over the active table.
    pub fn with_extra_domain(
        mut self,
        domain: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        self.extra_domains.insert(domain.into(), instruction.into());
        self
    }

    /// The active instruction table: the file at `table_path` (or the
    /// built-ins), with `extra_domains` applied on top.
    pub fn load_table(&self) -> Result<InstructionTable, ScaffoldError> {
        let base = match &self.table_path {
            Some(path) => InstructionTable::load(path)?,
            None => InstructionTable::builtin(),
        };
        Ok(base.with_domains(
            self.extra_domains
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        ))
    }

    /// Build a [`Router`] over [`load_table`](Self::load_table) with this
    /// config's request defaults.
    pub fn build_router(&self) -> Result<Router, ScaffoldError> {
        Ok(Router::new(self.load_table()?)
            .with_default_role(&self.default_role)
            .with_default_domain(&self.default_domain))
    }

    /// Build a [`Wrapper`] around `wrap_instruction`.
    pub fn build_wrapper(&self) -> Wrapper {
        Wrapper::new(&self.wrap_instruction)
    }
}
