//! Fixture files consumed by the seeder
//!
//! Three JSON files drive a seed run: a config object naming the root
//! intern, the member list, and an optional list of indirect links. The
//! config and member files are required; a missing indirect file means an
//! empty link list.

use serde::Deserialize;
use std::path::Path;

use crate::types::ApiError;

/// Seed config object: `{ "rootInternId": "..." }`
#[derive(Deserialize, Debug)]
struct SeedConfig {
    #[serde(rename = "rootInternId")]
    root_intern_id: Option<String>,
}

/// One member entry: `{ "internId": "...", "name": "..." }`
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct MemberFixture {
    #[serde(rename = "internId")]
    pub intern_id: String,
    pub name: String,
}

/// One indirect link entry: `{ "parentId": "...", "childId": "..." }`
///
/// Children named here are excluded from default direct-from-root
/// parentage; the link itself becomes their parent edge.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct IndirectLink {
    #[serde(rename = "parentId")]
    pub parent_id: String,
    #[serde(rename = "childId")]
    pub child_id: String,
}

/// Load the root intern id from the config file
///
/// Fails if the file is missing or the field is absent or empty.
pub fn load_root_id(path: &Path) -> Result<String, ApiError> {
    if !path.exists() {
        return Err(ApiError::Config(format!(
            "Config file missing: {}",
            path.display()
        )));
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| ApiError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    let config: SeedConfig = serde_json::from_str(&raw)
        .map_err(|e| ApiError::Config(format!("Invalid config JSON: {}", e)))?;

    match config.root_intern_id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ApiError::Config(
            "rootInternId missing in config file".to_string(),
        )),
    }
}

/// Load the member list
///
/// Fails if the file is missing or the list is empty.
pub fn load_members(path: &Path) -> Result<Vec<MemberFixture>, ApiError> {
    if !path.exists() {
        return Err(ApiError::Fixture(format!(
            "Members JSON file not found at {}",
            path.display()
        )));
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| ApiError::Fixture(format!("Failed to read {}: {}", path.display(), e)))?;
    let members: Vec<MemberFixture> = serde_json::from_str(&raw)
        .map_err(|e| ApiError::Fixture(format!("Invalid members JSON: {}", e)))?;

    if members.is_empty() {
        return Err(ApiError::Fixture(
            "Members JSON is empty, cannot seed".to_string(),
        ));
    }

    Ok(members)
}

/// Load the indirect link list; a missing file yields an empty list
pub fn load_indirect_links(path: &Path) -> Result<Vec<IndirectLink>, ApiError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| ApiError::Fixture(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ApiError::Fixture(format!("Invalid indirect links JSON: {}", e)))
}
