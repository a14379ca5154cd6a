//! Selection actions
//!
//! The closed set of inputs the reducer accepts. Every state change is one
//! of these; there is no other way to move a selection state.

use crate::catalog::document::TraitCatalog;
use crate::core::types::{PlayerChoice, RankEvent};
use crate::selection::trait_info::TraitInfo;
use serde::{Deserialize, Serialize};

/// One dispatchable selection action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Action {
    /// Build buckets and selection lists from a fetched catalog
    Initialize {
        choice: PlayerChoice,
        catalog: Box<TraitCatalog>,
    },
    /// Add a trait to the selection list matching its point sign
    Select(TraitInfo),
    /// Remove a trait from the selection list matching its point sign
    Cancel(TraitInfo),
    /// Move one step along a ranked trait's chain
    RankStep { info: TraitInfo, event: RankEvent },
    /// Return to the pre-initialization snapshot
    Reset,
}
