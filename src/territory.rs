// territory.rs
use crate::continent::ContinentId;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Index into the board's territory arena. Territories are stored in name
/// order, so ordering ids orders names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerritoryId(pub usize);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Territory {
    pub name: String,
    pub continent: ContinentId,
    pub adjacent_territories: BTreeSet<TerritoryId>,
    pub owner: Option<PlayerId>,
    pub armies: u32,
}

impl Territory {
    pub fn new(name: &str, continent: ContinentId) -> Self {
        Self {
            name: name.to_string(),
            continent,
            adjacent_territories: BTreeSet::new(),
            owner: None,
            armies: 0,
        }
    }

    pub fn add_adjacent(&mut self, adjacent: TerritoryId) {
        self.adjacent_territories.insert(adjacent);
    }

    pub fn is_adjacent(&self, territory: TerritoryId) -> bool {
        self.adjacent_territories.contains(&territory)
    }

    /// More than one army, so it can attack or fortify from here.
    pub fn is_usable(&self) -> bool {
        self.armies > 1
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_needs_two_armies() {
        let mut territory = Territory::new("Peru", ContinentId(0));
        assert!(!territory.is_usable());
        territory.owner = Some(PlayerId(1));
        territory.armies = 1;
        assert!(!territory.is_usable());
        territory.armies = 2;
        assert!(territory.is_usable());
        assert!(territory.is_owned_by(PlayerId(1)));
        assert!(!territory.is_owned_by(PlayerId(2)));
    }
}
