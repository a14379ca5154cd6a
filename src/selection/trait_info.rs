//! Per-trait record shared by the catalog buckets and the selection lists

use crate::catalog::document::CatalogTrait;
use crate::core::types::{TraitCategory, TraitId};
use serde::{Deserialize, Serialize};

/// Which selection list and bucket column a trait belongs to
///
/// Point sign is the sole discriminator: positive costs are boons, negative
/// costs are banes. Zero-point traits belong to neither and are never
/// offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSign {
    Boon,
    Bane,
}

/// One bane or boon as tracked by the selection state
///
/// The same record type serves catalog buckets, rank chain members, and
/// selection list slots. A record with an empty id is the placeholder
/// marking an unoccupied slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitInfo {
    pub id: TraitId,
    pub name: String,
    pub description: String,
    pub points: i32,
    pub icon: String,
    /// Granted automatically by the chosen class, race, or faction
    pub required: bool,
    pub category: Option<TraitCategory>,
    pub selected: bool,
    /// Prerequisite trait ids carried for display; not enforced here
    pub prerequisites: Vec<TraitId>,
    /// Position within `ranks` when this record is a chain member
    pub rank: Option<usize>,
    /// The full rank chain this trait belongs to (empty when unranked)
    pub ranks: Vec<TraitId>,
    pub exclusivity_group: Option<usize>,
    pub min_required: Option<u32>,
    pub max_allowed: Option<u32>,
    /// Set once the chain has been walked off either end
    pub finished: bool,
}

impl TraitInfo {
    /// The placeholder filling unoccupied selection slots
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty()
    }

    /// Boon or bane by point sign; None for zero-point traits
    pub fn sign(&self) -> Option<PointSign> {
        if self.points >= 1 {
            Some(PointSign::Boon)
        } else if self.points <= -1 {
            Some(PointSign::Bane)
        } else {
            None
        }
    }

    /// True when the trait is part of a multi-rank chain
    pub fn is_ranked(&self) -> bool {
        !self.ranks.is_empty()
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_category(mut self, category: Option<TraitCategory>) -> Self {
        self.category = category;
        self
    }

    pub fn with_finished(mut self, finished: bool) -> Self {
        self.finished = finished;
        self
    }

    /// Mark as granted by the character choice and occupying a slot
    pub fn as_required(mut self) -> Self {
        self.required = true;
        self.selected = true;
        self
    }
}

impl From<&CatalogTrait> for TraitInfo {
    fn from(raw: &CatalogTrait) -> Self {
        Self {
            id: raw.id.clone(),
            name: raw.name.clone(),
            description: raw.description.clone(),
            points: raw.points,
            icon: raw.icon.clone(),
            prerequisites: raw.prerequisites.clone(),
            ..Self::default()
        }
    }
}
