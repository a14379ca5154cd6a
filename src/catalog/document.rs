//! Trait catalog wire format
//!
//! The traits endpoint serves one JSON document per shard: every trait
//! record plus the class/race/faction eligibility tables, rank chains, and
//! exclusivity groups. Every key is optional. A partial document
//! deserializes to empty defaults and degrades to empty buckets downstream,
//! never to an error.

use crate::core::error::Result;
use crate::core::types::TraitId;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional/required trait id lists for one class, race, or faction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitEligibility {
    #[serde(default)]
    pub optional: Vec<TraitId>,
    #[serde(default)]
    pub required: Vec<TraitId>,
}

/// One exclusivity group
///
/// At least `min_required` and at most `max_allowed` of `ids` may end up
/// selected. The bounds are carried on every derived member record; no
/// transition enforces them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusivityGroup {
    #[serde(default)]
    pub ids: Vec<TraitId>,
    #[serde(default)]
    pub min_required: u32,
    #[serde(default)]
    pub max_allowed: u32,
}

/// One trait record as served by the endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogTrait {
    pub id: TraitId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub prerequisites: Vec<TraitId>,
}

/// The full traits document for one shard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraitCatalog {
    #[serde(default)]
    pub classes: AHashMap<String, TraitEligibility>,
    #[serde(default)]
    pub races: AHashMap<String, TraitEligibility>,
    #[serde(default)]
    pub factions: AHashMap<String, TraitEligibility>,
    /// Rank chains, ordered weakest to strongest
    #[serde(default)]
    pub ranks: Vec<Vec<TraitId>>,
    #[serde(default)]
    pub exclusivity: Vec<ExclusivityGroup>,
    #[serde(default)]
    pub traits: Vec<CatalogTrait>,
}

impl TraitCatalog {
    /// Parse a catalog from raw JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file on disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Look up a trait record by id
    pub fn find(&self, id: &TraitId) -> Option<&CatalogTrait> {
        self.traits.iter().find(|t| &t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }
}
