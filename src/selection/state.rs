//! Selection state container
//!
//! The whole banes-and-boons session lives in one value. Transitions go
//! through the reducer; nothing here mutates in place on behalf of callers.

use crate::core::types::{TraitCategory, TraitId};
use crate::selection::trait_info::{PointSign, TraitInfo};
use serde::{Deserialize, Serialize};

/// Selection slots presented before a list starts growing
pub const BASE_SLOTS: usize = 5;

/// Full state of one banes-and-boons session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// True until the first Initialize lands; selection is unusable before
    pub initial: bool,
    pub total_points: i32,
    pub added_banes: Vec<TraitInfo>,
    pub added_boons: Vec<TraitInfo>,
    pub general_boons: Vec<TraitInfo>,
    pub class_boons: Vec<TraitInfo>,
    pub race_boons: Vec<TraitInfo>,
    pub faction_boons: Vec<TraitInfo>,
    pub general_banes: Vec<TraitInfo>,
    pub class_banes: Vec<TraitInfo>,
    pub race_banes: Vec<TraitInfo>,
    pub faction_banes: Vec<TraitInfo>,
    /// Every trait referenced as some other trait's prerequisite
    pub all_prerequisites: Vec<TraitInfo>,
    /// Every rank chain member, flattened, with rank metadata merged in
    pub all_ranks: Vec<TraitInfo>,
    /// Every exclusivity group member with group bounds merged in
    pub all_exclusives: Vec<TraitInfo>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            initial: true,
            total_points: 0,
            added_banes: vec![TraitInfo::placeholder(); BASE_SLOTS],
            added_boons: vec![TraitInfo::placeholder(); BASE_SLOTS],
            general_boons: Vec::new(),
            class_boons: Vec::new(),
            race_boons: Vec::new(),
            faction_boons: Vec::new(),
            general_banes: Vec::new(),
            class_banes: Vec::new(),
            race_banes: Vec::new(),
            faction_banes: Vec::new(),
            all_prerequisites: Vec::new(),
            all_ranks: Vec::new(),
            all_exclusives: Vec::new(),
        }
    }
}

impl SelectionState {
    /// The selection list for one point sign
    pub fn list(&self, sign: PointSign) -> &Vec<TraitInfo> {
        match sign {
            PointSign::Boon => &self.added_boons,
            PointSign::Bane => &self.added_banes,
        }
    }

    pub fn list_mut(&mut self, sign: PointSign) -> &mut Vec<TraitInfo> {
        match sign {
            PointSign::Boon => &mut self.added_boons,
            PointSign::Bane => &mut self.added_banes,
        }
    }

    /// The single bucket holding `category` traits of the given sign
    pub fn bucket(&self, category: TraitCategory, sign: PointSign) -> &Vec<TraitInfo> {
        match (category, sign) {
            (TraitCategory::General, PointSign::Boon) => &self.general_boons,
            (TraitCategory::Class, PointSign::Boon) => &self.class_boons,
            (TraitCategory::Race, PointSign::Boon) => &self.race_boons,
            (TraitCategory::Faction, PointSign::Boon) => &self.faction_boons,
            (TraitCategory::General, PointSign::Bane) => &self.general_banes,
            (TraitCategory::Class, PointSign::Bane) => &self.class_banes,
            (TraitCategory::Race, PointSign::Bane) => &self.race_banes,
            (TraitCategory::Faction, PointSign::Bane) => &self.faction_banes,
        }
    }

    pub fn bucket_mut(&mut self, category: TraitCategory, sign: PointSign) -> &mut Vec<TraitInfo> {
        match (category, sign) {
            (TraitCategory::General, PointSign::Boon) => &mut self.general_boons,
            (TraitCategory::Class, PointSign::Boon) => &mut self.class_boons,
            (TraitCategory::Race, PointSign::Boon) => &mut self.race_boons,
            (TraitCategory::Faction, PointSign::Boon) => &mut self.faction_boons,
            (TraitCategory::General, PointSign::Bane) => &mut self.general_banes,
            (TraitCategory::Class, PointSign::Bane) => &mut self.class_banes,
            (TraitCategory::Race, PointSign::Bane) => &mut self.race_banes,
            (TraitCategory::Faction, PointSign::Bane) => &mut self.faction_banes,
        }
    }

    /// Sum of point costs across all occupied selection slots
    ///
    /// Always equals `total_points`: initialization seeds the total with the
    /// required entries and every transition moves both together.
    pub fn selected_points(&self) -> i32 {
        self.added_banes
            .iter()
            .chain(self.added_boons.iter())
            .filter(|t| !t.is_placeholder())
            .map(|t| t.points)
            .sum()
    }

    /// Occupied (non-placeholder) entries in a selection list
    pub fn occupied(list: &[TraitInfo]) -> usize {
        list.iter().filter(|t| !t.is_placeholder()).count()
    }

    /// Check every exclusivity group's selected count against its bounds
    ///
    /// Pure report for a submission-time gate; transitions never consult it.
    pub fn exclusivity_report(&self) -> Vec<ExclusivityViolation> {
        let mut groups: Vec<(usize, u32, u32)> = Vec::new();
        for member in &self.all_exclusives {
            let (Some(group), Some(min), Some(max)) =
                (member.exclusivity_group, member.min_required, member.max_allowed)
            else {
                continue;
            };
            if !groups.iter().any(|(g, _, _)| *g == group) {
                groups.push((group, min, max));
            }
        }

        let mut violations = Vec::new();
        for (group, min_required, max_allowed) in groups {
            let selected = self
                .all_exclusives
                .iter()
                .filter(|m| m.exclusivity_group == Some(group))
                .filter(|m| self.holds(&m.id))
                .count() as u32;
            if selected < min_required || selected > max_allowed {
                violations.push(ExclusivityViolation {
                    group,
                    selected,
                    min_required,
                    max_allowed,
                });
            }
        }
        violations
    }

    /// True when either selection list holds the given trait id
    pub fn holds(&self, id: &TraitId) -> bool {
        !id.is_empty()
            && self
                .added_banes
                .iter()
                .chain(self.added_boons.iter())
                .any(|t| &t.id == id)
    }
}

/// One exclusivity group whose selected count is out of bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusivityViolation {
    pub group: usize,
    pub selected: u32,
    pub min_required: u32,
    pub max_allowed: u32,
}
