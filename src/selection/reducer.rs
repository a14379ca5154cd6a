//! Pure selection reducer
//!
//! `reduce` never mutates its input: each action clones the previous state
//! and rewrites only what it touches. Replaying the same action list over
//! the same starting state always lands on the same result, which is what
//! makes snapshots, undo, and the replay tests possible.

use crate::catalog::document::TraitCatalog;
use crate::core::types::{PlayerChoice, RankEvent, TraitId};
use crate::selection::actions::Action;
use crate::selection::partition::partition;
use crate::selection::state::{SelectionState, BASE_SLOTS};
use crate::selection::trait_info::TraitInfo;

/// Apply one action to a selection state, producing the next state
pub fn reduce(state: &SelectionState, action: &Action) -> SelectionState {
    match action {
        Action::Initialize { choice, catalog } => initialize(choice, catalog),
        Action::Select(info) => select(state, info),
        Action::Cancel(info) => cancel(state, info),
        Action::RankStep { info, event } => step_rank(state, info, *event),
        Action::Reset => SelectionState::default(),
    }
}

/// Build the post-fetch state: required entries seeded into the lists,
/// buckets and derived collections rebuilt wholesale
fn initialize(choice: &PlayerChoice, catalog: &TraitCatalog) -> SelectionState {
    let parts = partition(catalog, choice);
    SelectionState {
        initial: false,
        total_points: parts.total_points,
        added_banes: pad_slots(parts.required_banes),
        added_boons: pad_slots(parts.required_boons),
        general_boons: parts.general_boons,
        class_boons: parts.class_boons,
        race_boons: parts.race_boons,
        faction_boons: parts.faction_boons,
        general_banes: parts.general_banes,
        class_banes: parts.class_banes,
        race_banes: parts.race_banes,
        faction_banes: parts.faction_banes,
        all_prerequisites: parts.all_prerequisites,
        all_ranks: parts.all_ranks,
        all_exclusives: parts.all_exclusives,
    }
}

/// Pad a selection list with placeholders up to the base slot count
///
/// Saturating: more than five required entries simply start the list long.
fn pad_slots(mut list: Vec<TraitInfo>) -> Vec<TraitInfo> {
    while list.len() < BASE_SLOTS {
        list.push(TraitInfo::placeholder());
    }
    list
}

fn select(state: &SelectionState, info: &TraitInfo) -> SelectionState {
    let mut next = state.clone();
    let Some(sign) = info.sign() else {
        tracing::warn!("Select ignored for zero-point trait '{}'", info.id);
        return next;
    };
    let list = next.list_mut(sign);
    if list.iter().any(|t| t.id == info.id) {
        tracing::warn!("Select ignored: '{}' is already in its list", info.id);
        return next;
    }
    let entry = info.clone().with_selected(true);
    match list.iter_mut().find(|t| t.is_placeholder()) {
        Some(slot) => *slot = entry,
        None => list.push(entry),
    }
    next.total_points += info.points;
    next
}

fn cancel(state: &SelectionState, info: &TraitInfo) -> SelectionState {
    let mut next = state.clone();
    let Some(sign) = info.sign() else {
        tracing::warn!("Cancel ignored for zero-point trait '{}'", info.id);
        return next;
    };
    let list = next.list_mut(sign);
    let Some(index) = list.iter().position(|t| t.id == info.id) else {
        tracing::warn!("Cancel ignored: '{}' is not in its list", info.id);
        return next;
    };
    // At the base length the slot stays and empties; past it the entry goes.
    // Lists never shrink below the base slot count.
    if list.len() <= BASE_SLOTS {
        list[index] = TraitInfo::placeholder();
    } else {
        list.remove(index);
    }
    next.total_points -= info.points;
    next
}

/// One step along a rank chain
///
/// `info` is the chain's current public face: on select, the bucket entry
/// being clicked; on cancel, the held entry from the selection list. The
/// bucket entry always shows the next acquirable rank after the step, and
/// the selection list always holds the rank the character actually has.
fn step_rank(state: &SelectionState, info: &TraitInfo, event: RankEvent) -> SelectionState {
    let mut next_state = state.clone();
    let Some(rank) = info.rank else {
        tracing::warn!("Rank step ignored: '{}' carries no rank", info.id);
        return next_state;
    };
    let Some(sign) = info.sign() else {
        tracing::warn!("Rank step ignored for zero-point trait '{}'", info.id);
        return next_state;
    };

    // One step up: the next chain member, or this trait marked finished
    let next_rank = match info.ranks.get(rank + 1) {
        Some(id) => chain_entry(state, info, id, rank + 1).with_selected(true),
        None => info.clone().with_selected(true).with_finished(true),
    };
    // One step down: the previous chain member, or this trait marked
    // finished and unselected (the chain is fully released)
    let prev_rank = match rank.checked_sub(1) {
        Some(below) => match info.ranks.get(below) {
            Some(id) => chain_entry(state, info, id, below),
            None => info.clone().with_selected(false).with_finished(true),
        },
        None => info.clone().with_selected(false).with_finished(true),
    };

    match event {
        RankEvent::Select => {
            // The held entry one rank below advances to this rank
            if let Some(index) = position_of(next_state.list(sign), &prev_rank.id) {
                next_state.list_mut(sign)[index] = info.clone().with_selected(true);
            }
            // First acquisition collapses prev to info itself: delta zero
            if !info.finished {
                next_state.total_points += info.points - prev_rank.points;
            }
            if let Some(category) = info.category {
                let bucket = next_state.bucket_mut(category, sign);
                if let Some(index) = position_of(bucket, &info.id) {
                    bucket[index] = next_rank;
                }
            }
        }
        RankEvent::Cancel => {
            if let Some(index) = position_of(next_state.list(sign), &info.id) {
                let replacement = if rank >= 1 {
                    // A real rank remains held
                    prev_rank.clone().with_selected(true)
                } else {
                    // Terminal form; callers follow up with Cancel to free
                    // the slot once they see the finished flag
                    prev_rank.clone()
                };
                next_state.list_mut(sign)[index] = replacement;
            }
            if !info.finished {
                next_state.total_points -= info.points - prev_rank.points;
            }
            // Symmetric to select: the bucket slot showing next_rank steps
            // back to this trait. At the top of the chain next_rank is the
            // finished form of this trait, so the entry un-finishes.
            if let Some(category) = info.category {
                let bucket = next_state.bucket_mut(category, sign);
                if let Some(index) = position_of(bucket, &next_rank.id) {
                    bucket[index] = info
                        .clone()
                        .with_selected(rank >= 1)
                        .with_finished(false);
                }
            }
        }
    }
    next_state
}

fn position_of(list: &[TraitInfo], id: &TraitId) -> Option<usize> {
    list.iter().position(|t| &t.id == id)
}

/// Look up a chain member in the derived rank collection, carrying over the
/// stepping trait's chain metadata and category. Catalog gaps resolve to a
/// placeholder base so the step never fails.
fn chain_entry(
    state: &SelectionState,
    info: &TraitInfo,
    id: &TraitId,
    position: usize,
) -> TraitInfo {
    let mut entry = match state.all_ranks.iter().find(|t| &t.id == id) {
        Some(found) => found.clone(),
        None => {
            tracing::debug!("Rank chain entry '{}' missing from catalog", id);
            TraitInfo {
                id: id.clone(),
                ..TraitInfo::placeholder()
            }
        }
    };
    entry.rank = Some(position);
    entry.ranks = info.ranks.clone();
    entry.category = info.category;
    entry
}
