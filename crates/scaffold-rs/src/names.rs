//! Canonical domain name constants.
//!
//! Domain-key string literals should reference these constants. Keys are
//! case-sensitive: `"Finance"` is not [`FINANCE`].

pub const GENERAL: &str = "general";
pub const HEALTH: &str = "health";
pub const MENTAL_HEALTH: &str = "mental_health";
pub const FINANCE: &str = "finance";
pub const LEGAL: &str = "legal";
