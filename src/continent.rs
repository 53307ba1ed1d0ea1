// continent.rs
use crate::territory::TerritoryId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContinentId(pub usize);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Continent {
    pub name: String,
    pub bonus_armies: u32,
    /// Members in the order the map lists them.
    pub territories: Vec<TerritoryId>,
}

impl Continent {
    pub fn new(name: &str, bonus_armies: u32) -> Self {
        Self {
            name: name.to_string(),
            bonus_armies,
            territories: Vec::new(),
        }
    }

    pub fn add_territory(&mut self, territory: TerritoryId) {
        if !self.territories.contains(&territory) {
            self.territories.push(territory);
        }
    }

    pub fn get_bonus(&self) -> u32 {
        self.bonus_armies
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.bonus_armies)
    }
}
