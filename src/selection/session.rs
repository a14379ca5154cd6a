//! Selection session
//!
//! Owns the current [`SelectionState`] and feeds actions through the
//! reducer. Picking or dropping a ranked trait takes two coordinated
//! actions; the session issues them in the right order so callers deal in
//! single trait picks.

use crate::catalog::client::CatalogClient;
use crate::catalog::document::TraitCatalog;
use crate::core::types::{PlayerChoice, RankEvent};
use crate::selection::actions::Action;
use crate::selection::reducer::reduce;
use crate::selection::state::SelectionState;
use crate::selection::trait_info::TraitInfo;

#[derive(Debug, Default)]
pub struct Session {
    state: SelectionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Apply one action and keep the result
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, &action);
    }

    /// Fetch the shard catalog and build the opening state for a character
    ///
    /// A fetch failure initializes from an empty catalog rather than
    /// leaving the session unusable.
    pub async fn initialize(&mut self, client: &CatalogClient, choice: PlayerChoice) {
        let catalog = client.fetch_or_empty().await;
        self.initialize_with(catalog, choice);
    }

    /// Build the opening state from an already-loaded catalog
    pub fn initialize_with(&mut self, catalog: TraitCatalog, choice: PlayerChoice) {
        tracing::info!(
            "Initializing selection for {} / {} / {}",
            choice.player_class,
            choice.race,
            choice.faction
        );
        self.dispatch(Action::Initialize {
            choice,
            catalog: Box::new(catalog),
        });
    }

    /// Pick a trait offered in one of the buckets
    ///
    /// `info` should be the bucket entry as currently displayed. For ranked
    /// traits the first pick claims a list slot and then steps the chain;
    /// later picks only step.
    pub fn select_trait(&mut self, info: &TraitInfo) {
        if info.is_ranked() {
            if !info.selected {
                self.dispatch(Action::Select(info.clone()));
            }
            if !info.finished {
                self.dispatch(Action::RankStep {
                    info: info.clone(),
                    event: RankEvent::Select,
                });
            }
        } else {
            self.dispatch(Action::Select(info.clone()));
        }
    }

    /// Drop a previously picked trait
    ///
    /// `info` should be the held entry from the selection list. Dropping a
    /// rank-0 chain member releases the chain and frees its slot.
    pub fn cancel_trait(&mut self, info: &TraitInfo) {
        if info.is_ranked() {
            self.dispatch(Action::RankStep {
                info: info.clone(),
                event: RankEvent::Cancel,
            });
            if info.rank == Some(0) {
                self.dispatch(Action::Cancel(info.clone()));
            }
        } else {
            self.dispatch(Action::Cancel(info.clone()));
        }
    }

    /// Throw away every choice and return to the pre-fetch state
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{TraitCategory, TraitId};
    use crate::selection::state::BASE_SLOTS;

    fn plain(id: &str, points: i32) -> TraitInfo {
        TraitInfo {
            id: TraitId::from(id),
            points,
            ..TraitInfo::default()
        }
    }

    fn session() -> Session {
        let mut session = Session::new();
        session.initialize_with(
            TraitCatalog::default(),
            PlayerChoice::new("Warden", "Northkin", "Dawnward"),
        );
        session
    }

    #[test]
    fn test_select_and_cancel_flat_trait() {
        let mut session = session();
        session.select_trait(&plain("swift", 2));
        assert_eq!(session.state().total_points, 2);
        assert_eq!(session.state().added_boons[0].id, TraitId::from("swift"));

        session.cancel_trait(&plain("swift", 2));
        assert_eq!(session.state().total_points, 0);
        assert!(session.state().added_boons[0].is_placeholder());
    }

    #[test]
    fn test_ranked_chain_through_session() {
        let chain = vec![TraitId::from("r0"), TraitId::from("r1")];
        let member = |id: &str, points: i32, rank: usize| TraitInfo {
            id: TraitId::from(id),
            points,
            rank: Some(rank),
            ranks: chain.clone(),
            category: Some(TraitCategory::General),
            ..TraitInfo::default()
        };

        let mut session = session();
        session.state.all_ranks = vec![member("r0", 1, 0), member("r1", 2, 1)];
        session.state.general_boons = vec![member("r0", 1, 0)];

        // first pick claims the slot and advances the bucket
        let head = session.state().general_boons[0].clone();
        session.select_trait(&head);
        assert_eq!(session.state().total_points, 1);
        assert_eq!(session.state().added_boons[0].id, TraitId::from("r0"));
        assert_eq!(session.state().general_boons[0].id, TraitId::from("r1"));

        // second pick only steps
        let shown = session.state().general_boons[0].clone();
        session.select_trait(&shown);
        assert_eq!(session.state().total_points, 2);
        assert_eq!(session.state().added_boons[0].id, TraitId::from("r1"));
        assert!(session.state().general_boons[0].finished);

        // picking the finished entry changes nothing
        let shown = session.state().general_boons[0].clone();
        session.select_trait(&shown);
        assert_eq!(session.state().total_points, 2);

        // retreat one rank, then release the chain
        let held = session.state().added_boons[0].clone();
        session.cancel_trait(&held);
        assert_eq!(session.state().total_points, 1);
        assert_eq!(session.state().added_boons[0].id, TraitId::from("r0"));

        let held = session.state().added_boons[0].clone();
        assert_eq!(held.rank, Some(0));
        session.cancel_trait(&held);
        assert_eq!(session.state().total_points, 0);
        assert!(session.state().added_boons[0].is_placeholder());
        assert_eq!(session.state().general_boons[0].id, TraitId::from("r0"));
        assert!(!session.state().general_boons[0].selected);
    }

    #[test]
    fn test_reset_returns_to_pristine() {
        let mut session = session();
        session.select_trait(&plain("swift", 2));
        session.reset();
        assert!(session.state().initial);
        assert_eq!(session.state().total_points, 0);
        assert_eq!(session.state().added_boons.len(), BASE_SLOTS);
    }
}
