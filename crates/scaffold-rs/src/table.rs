//! Domain → safety-instruction lookup.
//!
//! An [`InstructionTable`] maps case-sensitive domain keys to the instruction
//! prepended to a scaffold. The `"general"` entry is stored apart from the
//! other domains so it can never be missing: every lookup that misses falls
//! back to it.
//!
//! Tables are built by value ([`with_domain`](InstructionTable::with_domain))
//! and are immutable once shared. Adding a domain never requires touching the
//! compose functions in [`scaffold`](crate::scaffold).

use crate::error::ScaffoldError;
use crate::names;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const GENERAL_INSTRUCTION: &str = "You are a responsible AI assistant. Provide helpful, \
    accurate, and safe information. Avoid harmful, biased, or misleading content, and \
    say so when you are not sure of an answer.";

const HEALTH_INSTRUCTION: &str = "You are not a medical professional. Share general \
    health information only. Do not diagnose conditions or prescribe treatment, and \
    encourage the user to consult a qualified healthcare provider.";

const MENTAL_HEALTH_INSTRUCTION: &str = "Respond with empathy and without judgment. Do \
    not offer diagnoses or clinical advice. If the user mentions self-harm or a crisis, \
    encourage them to contact local emergency services or a crisis hotline.";

const FINANCE_INSTRUCTION: &str = "Provide general financial education, not personalized \
    investment or tax advice. Never suggest illegal ways to avoid taxes or other \
    obligations, and recommend consulting a licensed financial professional.";

const LEGAL_INSTRUCTION: &str = "Provide general legal information, not legal advice. \
    Laws vary by jurisdiction, so recommend consulting a qualified attorney about \
    specific situations.";

/// Immutable domain → instruction mapping with a guaranteed `"general"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTable {
    general: String,
    domains: BTreeMap<String, String>,
}

/// Outcome of looking a domain up in an [`InstructionTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Key whose instruction was selected (`"general"` on a miss).
    pub domain: &'a str,
    /// The selected instruction text.
    pub instruction: &'a str,
    /// Whether the requested domain was missing and `"general"` was used.
    pub fell_back: bool,
}

impl InstructionTable {
    /// Create a table holding only the `"general"` instruction.
    pub fn new(general: impl Into<String>) -> Self {
        Self {
            general: general.into(),
            domains: BTreeMap::new(),
        }
    }

    /// The built-in five-domain table.
    pub fn builtin() -> Self {
        Self::new(GENERAL_INSTRUCTION)
            .with_domain(names::HEALTH, HEALTH_INSTRUCTION)
            .with_domain(names::MENTAL_HEALTH, MENTAL_HEALTH_INSTRUCTION)
            .with_domain(names::FINANCE, FINANCE_INSTRUCTION)
            .with_domain(names::LEGAL, LEGAL_INSTRUCTION)
    }

    /// Return a table with `domain` mapped to `instruction`.
    ///
    /// An existing entry is replaced. Passing `"general"` replaces the
    /// fallback instruction.
    pub fn with_domain(mut self, domain: impl Into<String>, instruction: impl Into<String>) -> Self {
        let domain = domain.into();
        let instruction = instruction.into();
        if domain == names::GENERAL {
            self.general = instruction;
        } else {
            self.domains.insert(domain, instruction);
        }
        self
    }

    /// Apply [`with_domain`](Self::with_domain) for every pair, in order.
    pub fn with_domains<K, V>(self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        entries
            .into_iter()
            .fold(self, |table, (k, v)| table.with_domain(k, v))
    }

    /// Build a table from raw entries. Returns `None` without a `"general"` key.
    pub fn from_entries(mut entries: BTreeMap<String, String>) -> Option<Self> {
        let general = entries.remove(names::GENERAL)?;
        Some(Self {
            general,
            domains: entries,
        })
    }

    /// Load a table from a JSON object of `{ "domain": "instruction" }`.
    pub fn load(path: &Path) -> Result<Self, ScaffoldError> {
        let data = std::fs::read_to_string(path).map_err(|source| ScaffoldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&data).map_err(|source| ScaffoldError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let table = Self::from_entries(entries).ok_or_else(|| ScaffoldError::MissingGeneral {
            path: path.to_path_buf(),
        })?;
        debug!(
            "Loaded instruction table from {} ({} domains)",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    /// The fallback instruction.
    pub fn general(&self) -> &str {
        &self.general
    }

    /// Exact, case-sensitive lookup. No fallback.
    pub fn get(&self, domain: &str) -> Option<&str> {
        if domain == names::GENERAL {
            Some(&self.general)
        } else {
            self.domains.get(domain).map(String::as_str)
        }
    }

    /// Check whether `domain` is a key of this table.
    pub fn contains(&self, domain: &str) -> bool {
        self.get(domain).is_some()
    }

    /// Look `domain` up, falling back to `"general"` on a miss.
    pub fn resolve<'a>(&'a self, domain: &str) -> Resolved<'a> {
        if domain == names::GENERAL {
            return Resolved {
                domain: names::GENERAL,
                instruction: &self.general,
                fell_back: false,
            };
        }
        match self.domains.get_key_value(domain) {
            Some((key, instruction)) => Resolved {
                domain: key,
                instruction,
                fell_back: false,
            },
            None => {
                debug!("Unknown domain '{domain}', falling back to '{}'", names::GENERAL);
                Resolved {
                    domain: names::GENERAL,
                    instruction: &self.general,
                    fell_back: true,
                }
            }
        }
    }

    /// All domain keys, sorted, `"general"` included.
    pub fn domains(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.domains.keys().map(String::as_str).collect();
        keys.push(names::GENERAL);
        keys.sort_unstable();
        keys
    }

    /// Number of domains, `"general"` included.
    pub fn len(&self) -> usize {
        self.domains.len() + 1
    }

    /// Always false: the `"general"` entry is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flatten into a plain sorted map, `"general"` included.
    pub fn to_entries(&self) -> BTreeMap<String, String> {
        let mut entries = self.domains.clone();
        entries.insert(names::GENERAL.to_string(), self.general.clone());
        entries
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Serialize for InstructionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_entries().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_has_five_domains() {
        let table = InstructionTable::builtin();
        assert_eq!(
            table.domains(),
            vec!["finance", "general", "health", "legal", "mental_health"]
        );
        assert_eq!(table.len(), 5);
        assert!(!table.is_empty());
    }

    #[test]
    fn default_is_builtin() {
        assert_eq!(InstructionTable::default(), InstructionTable::builtin());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let table = InstructionTable::builtin();
        assert!(table.contains("finance"));
        assert!(!table.contains("Finance"));
        assert!(table.resolve("FINANCE").fell_back);
    }

    #[test]
    fn resolve_known_domain() {
        let table = InstructionTable::builtin();
        let resolved = table.resolve(names::LEGAL);
        assert_eq!(resolved.domain, "legal");
        assert_eq!(resolved.instruction, LEGAL_INSTRUCTION);
        assert!(!resolved.fell_back);
    }

    #[test]
    fn resolve_unknown_falls_back_to_general() {
        let table = InstructionTable::builtin();
        let resolved = table.resolve("nonexistent_domain");
        assert_eq!(resolved.domain, names::GENERAL);
        assert_eq!(resolved.instruction, table.general());
        assert!(resolved.fell_back);
    }

    #[test]
    fn resolve_empty_domain_falls_back() {
        let table = InstructionTable::builtin();
        assert!(table.resolve("").fell_back);
    }

    #[test]
    fn with_domain_extends_and_replaces() {
        let table = InstructionTable::new("G")
            .with_domain("education", "Teach.")
            .with_domain("education", "Teach patiently.")
            .with_domain(names::GENERAL, "G2");
        assert_eq!(table.get("education"), Some("Teach patiently."));
        assert_eq!(table.general(), "G2");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn with_domains_folds_in_order() {
        let table = InstructionTable::new("G").with_domains([("a", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(table.get("a"), Some("3"));
        assert_eq!(table.get("b"), Some("2"));
    }

    #[test]
    fn from_entries_requires_general() {
        let mut entries = BTreeMap::new();
        entries.insert("finance".to_string(), "F".to_string());
        assert!(InstructionTable::from_entries(entries.clone()).is_none());

        entries.insert("general".to_string(), "G".to_string());
        let table = InstructionTable::from_entries(entries).unwrap();
        assert_eq!(table.general(), "G");
        assert_eq!(table.get("finance"), Some("F"));
    }

    #[test]
    fn entries_round_trip_through_json() {
        let table = InstructionTable::builtin();
        let json = serde_json::to_string(&table).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(InstructionTable::from_entries(entries), Some(table));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"general": "Be safe.", "travel": "Check advisories."}}"#).unwrap();

        let table = InstructionTable::load(file.path()).unwrap();
        assert_eq!(table.general(), "Be safe.");
        assert_eq!(table.get("travel"), Some("Check advisories."));
        assert!(!table.contains("finance"));
    }

    #[test]
    fn load_rejects_table_without_general() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"travel": "Check advisories."}}"#).unwrap();

        let err = InstructionTable::load(file.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingGeneral { .. }));
    }

    #[test]
    fn load_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = InstructionTable::load(file.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::Parse { .. }));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = InstructionTable::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { .. }));
    }
}
