//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Catalog identifier for a trait
///
/// The empty id is reserved for the placeholder that marks an unoccupied
/// selection slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitId(pub String);

impl TraitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TraitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Which trait column a bucket entry is offered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitCategory {
    General,
    Class,
    Race,
    Faction,
}

/// Direction of motion along a rank chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankEvent {
    Select,
    Cancel,
}

/// The class/race/faction combination locked in before trait selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerChoice {
    pub player_class: String,
    pub race: String,
    pub faction: String,
}

impl PlayerChoice {
    pub fn new(
        player_class: impl Into<String>,
        race: impl Into<String>,
        faction: impl Into<String>,
    ) -> Self {
        Self {
            player_class: player_class.into(),
            race: race.into(),
            faction: faction.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_id_equality() {
        let a = TraitId::from("swift");
        let b = TraitId::new("swift");
        let c = TraitId::from("sluggish");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_trait_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<TraitId, i32> = HashMap::new();
        map.insert(TraitId::from("swift"), 2);
        assert_eq!(map.get(&TraitId::from("swift")), Some(&2));
    }

    #[test]
    fn test_default_trait_id_is_empty() {
        assert!(TraitId::default().is_empty());
        assert!(!TraitId::from("swift").is_empty());
    }

    #[test]
    fn test_player_choice_constructor() {
        let choice = PlayerChoice::new("Warden", "Northkin", "Dawnward");
        assert_eq!(choice.player_class, "Warden");
        assert_eq!(choice.race, "Northkin");
        assert_eq!(choice.faction, "Dawnward");
    }
}
