//! Catalog partitioning
//!
//! Splits a fetched trait catalog into the required lists and the eight
//! optional buckets for one class/race/faction choice. Rank chains are
//! flattened once here; only rank-0 members surface in buckets. Traits with
//! no class/race/faction affiliation anywhere in the catalog form the
//! general buckets.

use crate::catalog::document::{TraitCatalog, TraitEligibility};
use crate::core::types::{PlayerChoice, TraitCategory, TraitId};
use crate::selection::trait_info::{PointSign, TraitInfo};
use ahash::AHashSet;

/// Everything derived from one catalog and one character choice
#[derive(Debug, Clone, Default)]
pub struct PartitionedTraits {
    pub required_boons: Vec<TraitInfo>,
    pub required_banes: Vec<TraitInfo>,
    pub general_boons: Vec<TraitInfo>,
    pub class_boons: Vec<TraitInfo>,
    pub race_boons: Vec<TraitInfo>,
    pub faction_boons: Vec<TraitInfo>,
    pub general_banes: Vec<TraitInfo>,
    pub class_banes: Vec<TraitInfo>,
    pub race_banes: Vec<TraitInfo>,
    pub faction_banes: Vec<TraitInfo>,
    pub all_prerequisites: Vec<TraitInfo>,
    pub all_ranks: Vec<TraitInfo>,
    pub all_exclusives: Vec<TraitInfo>,
    /// Sum of all required trait points (the session's starting total)
    pub total_points: i32,
}

/// Partition a catalog for the chosen class, race, and faction
pub fn partition(catalog: &TraitCatalog, choice: &PlayerChoice) -> PartitionedTraits {
    // Rank chains, flattened with rank metadata merged over the base record
    let chains: Vec<Vec<TraitInfo>> = catalog
        .ranks
        .iter()
        .map(|chain| {
            chain
                .iter()
                .enumerate()
                .map(|(position, id)| chain_member(catalog, chain, position, id))
                .collect()
        })
        .collect();
    let first_ranks: Vec<TraitInfo> = chains
        .iter()
        .filter_map(|chain| chain.first().cloned())
        .collect();
    let all_ranks: Vec<TraitInfo> = chains.into_iter().flatten().collect();
    let ranked_ids: AHashSet<TraitId> = all_ranks.iter().map(|t| t.id.clone()).collect();

    // Exclusivity members with group bounds merged over the base record
    let all_exclusives: Vec<TraitInfo> = catalog
        .exclusivity
        .iter()
        .enumerate()
        .flat_map(|(group, exclusive)| {
            exclusive.ids.iter().map(move |id| {
                let mut member = resolve(catalog, id);
                member.exclusivity_group = Some(group);
                member.min_required = Some(exclusive.min_required);
                member.max_allowed = Some(exclusive.max_allowed);
                member
            })
        })
        .collect();

    // Eligibility rows for the chosen names; unknown names degrade to empty
    let class_row = eligibility_row(&catalog.classes, &choice.player_class, "class");
    let race_row = eligibility_row(&catalog.races, &choice.race, "race");
    let faction_row = eligibility_row(&catalog.factions, &choice.faction, "faction");

    // Required traits, in class/faction/race order, split by point sign
    let required: Vec<TraitInfo> = [&class_row, &faction_row, &race_row]
        .into_iter()
        .flat_map(|row| resolve_all(catalog, &row.required))
        .map(TraitInfo::as_required)
        .collect();
    let required_boons: Vec<TraitInfo> = required
        .iter()
        .filter(|t| t.points >= 1)
        .cloned()
        .collect();
    let required_banes: Vec<TraitInfo> = required
        .iter()
        .filter(|t| t.points <= -1)
        .cloned()
        .collect();
    let total_points = required_boons.iter().map(|t| t.points).sum::<i32>()
        + required_banes.iter().map(|t| t.points).sum::<i32>();

    // Traits offered by any class, race, or faction are not general
    let affiliated: AHashSet<TraitId> = catalog
        .classes
        .values()
        .chain(catalog.races.values())
        .chain(catalog.factions.values())
        .flat_map(|row| row.optional.iter().chain(row.required.iter()))
        .cloned()
        .collect();

    let class_bucket = |sign| {
        category_bucket(catalog, &class_row, &first_ranks, &ranked_ids, TraitCategory::Class, sign)
    };
    let race_bucket = |sign| {
        category_bucket(catalog, &race_row, &first_ranks, &ranked_ids, TraitCategory::Race, sign)
    };
    let faction_bucket = |sign| {
        category_bucket(catalog, &faction_row, &first_ranks, &ranked_ids, TraitCategory::Faction, sign)
    };

    PartitionedTraits {
        class_boons: class_bucket(PointSign::Boon),
        class_banes: class_bucket(PointSign::Bane),
        race_boons: race_bucket(PointSign::Boon),
        race_banes: race_bucket(PointSign::Bane),
        faction_boons: faction_bucket(PointSign::Boon),
        faction_banes: faction_bucket(PointSign::Bane),
        general_boons: general_bucket(catalog, &first_ranks, &ranked_ids, &affiliated, PointSign::Boon),
        general_banes: general_bucket(catalog, &first_ranks, &ranked_ids, &affiliated, PointSign::Bane),
        all_prerequisites: collect_prerequisites(catalog),
        all_ranks,
        all_exclusives,
        required_boons,
        required_banes,
        total_points,
    }
}

/// One bucket: the row's unranked optional traits of the given sign, plus
/// the rank-0 representative of every chain the row offers
fn category_bucket(
    catalog: &TraitCatalog,
    row: &TraitEligibility,
    first_ranks: &[TraitInfo],
    ranked_ids: &AHashSet<TraitId>,
    category: TraitCategory,
    sign: PointSign,
) -> Vec<TraitInfo> {
    let optional = resolve_all(catalog, &row.optional);
    let unranked = optional
        .iter()
        .filter(|t| matches_sign(t.points, sign) && !ranked_ids.contains(&t.id))
        .cloned();
    let chain_heads = first_ranks
        .iter()
        .filter(|head| {
            optional
                .iter()
                .any(|t| t.id == head.id && matches_sign(t.points, sign))
        })
        .cloned();
    unranked
        .chain(chain_heads)
        .map(|t| t.with_category(Some(category)).with_selected(false))
        .collect()
}

/// General buckets take every trait no class, race, or faction lays claim to
fn general_bucket(
    catalog: &TraitCatalog,
    first_ranks: &[TraitInfo],
    ranked_ids: &AHashSet<TraitId>,
    affiliated: &AHashSet<TraitId>,
    sign: PointSign,
) -> Vec<TraitInfo> {
    let unranked = catalog
        .traits
        .iter()
        .filter(|t| {
            matches_sign(t.points, sign)
                && !ranked_ids.contains(&t.id)
                && !affiliated.contains(&t.id)
        })
        .map(TraitInfo::from);
    let chain_heads = first_ranks
        .iter()
        .filter(|head| matches_sign(head.points, sign) && !affiliated.contains(&head.id))
        .cloned();
    unranked
        .chain(chain_heads)
        .map(|t| t.with_category(Some(TraitCategory::General)).with_selected(false))
        .collect()
}

/// Every trait referenced as some other trait's prerequisite
fn collect_prerequisites(catalog: &TraitCatalog) -> Vec<TraitInfo> {
    let referenced: AHashSet<TraitId> = catalog
        .traits
        .iter()
        .flat_map(|t| t.prerequisites.iter().cloned())
        .collect();
    catalog
        .traits
        .iter()
        .filter(|t| referenced.contains(&t.id))
        .map(TraitInfo::from)
        .collect()
}

fn matches_sign(points: i32, sign: PointSign) -> bool {
    match sign {
        PointSign::Boon => points >= 1,
        PointSign::Bane => points <= -1,
    }
}

/// Resolve one referenced id; catalog gaps merge over a placeholder base
fn resolve(catalog: &TraitCatalog, id: &TraitId) -> TraitInfo {
    match catalog.find(id) {
        Some(raw) => TraitInfo::from(raw),
        None => {
            tracing::debug!("Catalog lookup missed trait '{}'", id);
            TraitInfo {
                id: id.clone(),
                ..TraitInfo::placeholder()
            }
        }
    }
}

/// Resolve a list of ids to trait records, preserving catalog order
///
/// Ids with no catalog record are dropped, matching how the original data
/// pipeline silently ignored dangling references in eligibility lists.
fn resolve_all(catalog: &TraitCatalog, ids: &[TraitId]) -> Vec<TraitInfo> {
    catalog
        .traits
        .iter()
        .filter(|t| ids.contains(&t.id))
        .map(TraitInfo::from)
        .collect()
}

fn chain_member(
    catalog: &TraitCatalog,
    chain: &[TraitId],
    position: usize,
    id: &TraitId,
) -> TraitInfo {
    let mut member = resolve(catalog, id);
    member.rank = Some(position);
    member.ranks = chain.to_vec();
    member
}

fn eligibility_row(
    table: &ahash::AHashMap<String, TraitEligibility>,
    name: &str,
    kind: &str,
) -> TraitEligibility {
    match table.get(name) {
        Some(row) => row.clone(),
        None => {
            tracing::debug!("No {} named '{}' in catalog; using empty row", kind, name);
            TraitEligibility::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::document::{CatalogTrait, ExclusivityGroup};

    fn raw(id: &str, points: i32) -> CatalogTrait {
        CatalogTrait {
            id: TraitId::from(id),
            name: id.to_uppercase(),
            points,
            ..CatalogTrait::default()
        }
    }

    fn sample_catalog() -> TraitCatalog {
        let mut catalog = TraitCatalog::default();
        catalog.traits = vec![
            raw("swift", 2),         // Warden optional boon
            raw("frail", -2),        // Warden optional bane
            raw("oathbound", 1),     // Warden required boon
            raw("sunmark", -2),      // Dawnward required bane
            raw("thickhide", 3),     // Northkin optional boon
            raw("keeneye1", 1),      // chain head, general
            raw("keeneye2", 2),
            raw("lone", 4),          // unaffiliated boon
            raw("cursed", -3),       // unaffiliated bane
            raw("neutral", 0),       // zero-point, never offered
        ];
        catalog.ranks = vec![vec![TraitId::from("keeneye1"), TraitId::from("keeneye2")]];
        catalog.exclusivity = vec![ExclusivityGroup {
            ids: vec![TraitId::from("swift"), TraitId::from("thickhide")],
            min_required: 0,
            max_allowed: 1,
        }];
        catalog.classes.insert(
            "Warden".into(),
            TraitEligibility {
                optional: vec![TraitId::from("swift"), TraitId::from("frail")],
                required: vec![TraitId::from("oathbound")],
            },
        );
        catalog.races.insert(
            "Northkin".into(),
            TraitEligibility {
                optional: vec![TraitId::from("thickhide")],
                required: vec![],
            },
        );
        catalog.factions.insert(
            "Dawnward".into(),
            TraitEligibility {
                optional: vec![],
                required: vec![TraitId::from("sunmark")],
            },
        );
        catalog
    }

    fn choice() -> PlayerChoice {
        PlayerChoice::new("Warden", "Northkin", "Dawnward")
    }

    fn ids(list: &[TraitInfo]) -> Vec<&str> {
        list.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_required_split_by_sign() {
        let parts = partition(&sample_catalog(), &choice());
        assert_eq!(ids(&parts.required_boons), vec!["oathbound"]);
        assert_eq!(ids(&parts.required_banes), vec!["sunmark"]);
        assert!(parts.required_boons[0].required);
        assert!(parts.required_boons[0].selected);
        assert_eq!(parts.total_points, 1 - 2);
    }

    #[test]
    fn test_category_buckets() {
        let parts = partition(&sample_catalog(), &choice());
        assert_eq!(ids(&parts.class_boons), vec!["swift"]);
        assert_eq!(ids(&parts.class_banes), vec!["frail"]);
        assert_eq!(ids(&parts.race_boons), vec!["thickhide"]);
        assert!(parts.race_banes.is_empty());
        assert!(parts.faction_boons.is_empty());
        assert!(parts.faction_banes.is_empty());
        assert_eq!(parts.class_boons[0].category, Some(TraitCategory::Class));
        assert!(!parts.class_boons[0].selected);
    }

    #[test]
    fn test_general_excludes_affiliated_and_zero_point() {
        let parts = partition(&sample_catalog(), &choice());
        // keeneye1 is a chain head with no affiliation, lone is plain general
        assert_eq!(ids(&parts.general_boons), vec!["lone", "keeneye1"]);
        assert_eq!(ids(&parts.general_banes), vec!["cursed"]);
        assert!(ids(&parts.general_boons).iter().all(|id| *id != "neutral"));
    }

    #[test]
    fn test_only_rank_zero_surfaces() {
        let parts = partition(&sample_catalog(), &choice());
        let head = parts
            .general_boons
            .iter()
            .find(|t| t.id.as_str() == "keeneye1")
            .unwrap();
        assert_eq!(head.rank, Some(0));
        assert_eq!(head.ranks.len(), 2);
        assert!(parts
            .general_boons
            .iter()
            .all(|t| t.id.as_str() != "keeneye2"));
        // the flattened chain keeps every member
        assert_eq!(parts.all_ranks.len(), 2);
        assert_eq!(parts.all_ranks[1].rank, Some(1));
    }

    #[test]
    fn test_exclusives_carry_group_bounds() {
        let parts = partition(&sample_catalog(), &choice());
        assert_eq!(parts.all_exclusives.len(), 2);
        assert!(parts
            .all_exclusives
            .iter()
            .all(|m| m.exclusivity_group == Some(0)
                && m.min_required == Some(0)
                && m.max_allowed == Some(1)));
    }

    #[test]
    fn test_prerequisite_collection() {
        let mut catalog = sample_catalog();
        catalog.traits[0].prerequisites = vec![TraitId::from("lone")];
        let parts = partition(&catalog, &choice());
        assert_eq!(ids(&parts.all_prerequisites), vec!["lone"]);
    }

    #[test]
    fn test_unknown_choice_degrades_to_empty() {
        let parts = partition(
            &sample_catalog(),
            &PlayerChoice::new("Nobody", "Nowhere", "Nothing"),
        );
        assert!(parts.class_boons.is_empty());
        assert!(parts.race_boons.is_empty());
        assert!(parts.faction_banes.is_empty());
        assert!(parts.required_boons.is_empty());
        assert_eq!(parts.total_points, 0);
        // general derivation is independent of the choice
        assert_eq!(ids(&parts.general_boons), vec!["lone", "keeneye1"]);
    }

    #[test]
    fn test_empty_catalog() {
        let parts = partition(&TraitCatalog::default(), &choice());
        assert!(parts.general_boons.is_empty());
        assert!(parts.all_ranks.is_empty());
        assert!(parts.all_exclusives.is_empty());
        assert_eq!(parts.total_points, 0);
    }

    #[test]
    fn test_chain_with_missing_record_merges_placeholder() {
        let mut catalog = sample_catalog();
        catalog.ranks.push(vec![TraitId::from("ghost1"), TraitId::from("ghost2")]);
        let parts = partition(&catalog, &choice());
        let ghost = parts
            .all_ranks
            .iter()
            .find(|t| t.id.as_str() == "ghost1")
            .unwrap();
        // merge metadata survives, display fields stay empty
        assert_eq!(ghost.rank, Some(0));
        assert_eq!(ghost.points, 0);
        assert!(ghost.name.is_empty());
        // zero points keeps the ghost chain out of every bucket
        assert!(parts.general_boons.iter().all(|t| t.id.as_str() != "ghost1"));
    }
}
