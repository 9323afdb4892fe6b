//! Place-name reconciliation between the catalog and boundary datasets.
//!
//! Product records carry free-text state/district names; boundary
//! datasets carry their own spellings (historical names, differing UT
//! conventions, concatenated words). Resolution is a three-tier lookup:
//! a static alias table wins outright, then exact match after
//! normalization, then substring containment in either direction.
//!
//! Alias tables are compile-time YAML embedded with `include_str!`.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Error types for alias table operations.
#[derive(Error, Debug)]
pub enum NameAliasError {
    #[error("Failed to parse name alias YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Duplicate 'from' name in alias file: {0}")]
    DuplicateFrom(String),
}

/// Top-level structure for a name alias YAML file.
#[derive(Deserialize, Debug)]
pub struct NameAliasFile {
    pub aliases: Vec<NameAlias>,
}

/// A single alias mapping.
///
/// `from` is the boundary dataset's spelling; `to` is the catalog's
/// canonical spelling.
#[derive(Deserialize, Debug, Clone)]
pub struct NameAlias {
    pub from: String,
    pub to: String,
}

/// Parse name aliases from YAML content into a lookup map.
/// Duplicate `from` keys are rejected.
pub fn parse_name_aliases(yaml_content: &str) -> Result<HashMap<String, String>, NameAliasError> {
    let file: NameAliasFile = serde_yml::from_str(yaml_content)?;

    let mut map = HashMap::new();
    for alias in file.aliases {
        if map.contains_key(&alias.from) {
            return Err(NameAliasError::DuplicateFrom(alias.from));
        }
        map.insert(alias.from, alias.to);
    }

    Ok(map)
}

/// Load the state-level alias table embedded at compile time.
pub fn load_state_aliases() -> Result<HashMap<String, String>, NameAliasError> {
    let yaml_content = include_str!("../../seed_data/state_aliases.yml");
    parse_name_aliases(yaml_content)
}

/// Load the district-level alias table embedded at compile time.
pub fn load_district_aliases() -> Result<HashMap<String, String>, NameAliasError> {
    let yaml_content = include_str!("../../seed_data/district_aliases.yml");
    parse_name_aliases(yaml_content)
}

/// Canonicalize a place name for comparison: lower-case, drop all
/// whitespace, and strip parentheses, ampersands, hyphens, and periods.
///
/// Total and idempotent; never fails.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '&' | '-' | '.'))
        .collect()
}

/// Resolve a boundary-dataset name to a catalog canonical name.
///
/// Tiers, first hit wins:
/// 1. Alias table lookup. A hit is returned unconditionally, even if the
///    mapped value is absent from `canonical_names`.
/// 2. Exact match after normalization.
/// 3. Containment after normalization, in either direction. The first
///    canonical name in slice order wins; callers supply the slice in a
///    deterministic order.
///
/// Returns `None` when nothing matches. Tier 3 can produce false
/// positives when one canonical name is a short substring of an
/// unrelated boundary name; this mirrors the catalog's established
/// matching behavior and is not corrected here.
pub fn resolve(
    boundary_name: &str,
    aliases: &HashMap<String, String>,
    canonical_names: &[&str],
) -> Option<String> {
    if let Some(mapped) = aliases.get(boundary_name) {
        return Some(mapped.clone());
    }

    let needle = normalize(boundary_name);
    if needle.is_empty() {
        return None;
    }

    for canonical in canonical_names {
        if normalize(canonical) == needle {
            return Some(canonical.to_string());
        }
    }

    for canonical in canonical_names {
        let candidate = normalize(canonical);
        if needle.contains(&candidate) || candidate.contains(&needle) {
            return Some(canonical.to_string());
        }
    }

    None
}
