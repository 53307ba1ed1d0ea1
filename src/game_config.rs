// game_config.rs
use crate::board::Board;
use crate::continent::{Continent, ContinentId};
use crate::error::GameError;
use crate::territory::{Territory, TerritoryId};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

lazy_static! {
    static ref STANDARD_MAP: MapConfig =
        serde_json::from_str(include_str!("map.json")).expect("Unable to parse embedded map.json");
}

/// The world map as data: continents with their member territories, plus
/// the undirected adjacency edges between territories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub continents: Vec<ContinentConfig>,
    pub adjacencies: Vec<(String, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinentConfig {
    pub name: String,
    pub bonus_armies: u32,
    pub territories: Vec<String>,
}

impl MapConfig {
    /// The classic 42-territory world map.
    pub fn standard() -> &'static MapConfig {
        &STANDARD_MAP
    }

    pub fn territory_count(&self) -> usize {
        self.continents.iter().map(|c| c.territories.len()).sum()
    }

    pub fn to_board(&self) -> Result<Board, GameError> {
        let mut continent_names = HashSet::new();
        for continent in &self.continents {
            if !continent_names.insert(continent.name.as_str()) {
                return Err(GameError::Map(format!("duplicate continent '{}'", continent.name)));
            }
        }

        let mut continent_order: Vec<usize> = (0..self.continents.len()).collect();
        continent_order.sort_by(|&a, &b| self.continents[a].name.cmp(&self.continents[b].name));
        let mut continent_ids = vec![ContinentId(0); self.continents.len()];
        for (position, &config_index) in continent_order.iter().enumerate() {
            continent_ids[config_index] = ContinentId(position);
        }

        // Name order is arena order.
        let mut territory_continent: BTreeMap<&str, ContinentId> = BTreeMap::new();
        for (config_index, continent) in self.continents.iter().enumerate() {
            for name in &continent.territories {
                if territory_continent
                    .insert(name.as_str(), continent_ids[config_index])
                    .is_some()
                {
                    return Err(GameError::Map(format!(
                        "territory '{}' is listed more than once",
                        name
                    )));
                }
            }
        }
        let territory_ids: BTreeMap<&str, TerritoryId> = territory_continent
            .keys()
            .enumerate()
            .map(|(index, &name)| (name, TerritoryId(index)))
            .collect();

        let mut territories: Vec<Territory> = territory_continent
            .iter()
            .map(|(&name, &continent)| Territory::new(name, continent))
            .collect();

        let continents: Vec<Continent> = continent_order
            .iter()
            .map(|&config_index| {
                let config = &self.continents[config_index];
                let mut continent = Continent::new(&config.name, config.bonus_armies);
                for name in &config.territories {
                    continent.add_territory(territory_ids[name.as_str()]);
                }
                continent
            })
            .collect();

        let lookup = |name: &str| {
            territory_ids
                .get(name)
                .copied()
                .ok_or_else(|| GameError::Map(format!("edge names unknown territory '{}'", name)))
        };
        for (from, to) in &self.adjacencies {
            let from_id = lookup(from.as_str())?;
            let to_id = lookup(to.as_str())?;
            if from_id == to_id {
                return Err(GameError::Map(format!("'{}' cannot border itself", from)));
            }
            territories[from_id.0].add_adjacent(to_id);
            territories[to_id.0].add_adjacent(from_id);
        }

        Ok(Board::new(territories, continents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_map() -> MapConfig {
        MapConfig {
            continents: vec![
                ContinentConfig {
                    name: "West".to_string(),
                    bonus_armies: 2,
                    territories: vec!["Cove".to_string(), "Bay".to_string()],
                },
                ContinentConfig {
                    name: "East".to_string(),
                    bonus_armies: 3,
                    territories: vec!["Alps".to_string()],
                },
            ],
            adjacencies: vec![
                ("Cove".to_string(), "Bay".to_string()),
                ("Bay".to_string(), "Alps".to_string()),
            ],
        }
    }

    #[test]
    fn standard_map_shape() {
        let map = MapConfig::standard();
        assert_eq!(map.continents.len(), 6);
        assert_eq!(map.territory_count(), 42);
        assert_eq!(map.adjacencies.len(), 79);
        assert!(map.to_board().is_ok());
    }

    #[test]
    fn ids_follow_name_order() {
        let board = tiny_map().to_board().expect("tiny map is valid");
        let names: Vec<&str> = board.territories().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Alps", "Bay", "Cove"]);
        let continents: Vec<&str> = board.continents().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(continents, vec!["East", "West"]);
        // members keep map order
        let west = &board.continents()[1];
        assert_eq!(west.territories, vec![TerritoryId(2), TerritoryId(1)]);
        assert_eq!(board.territory(TerritoryId(0)).continent, ContinentId(0));
    }

    #[test]
    fn adjacency_is_symmetric() {
        let board = tiny_map().to_board().expect("tiny map is valid");
        let bay = board.territory(TerritoryId(1));
        assert!(bay.is_adjacent(TerritoryId(0)));
        assert!(bay.is_adjacent(TerritoryId(2)));
        assert!(board.territory(TerritoryId(0)).is_adjacent(TerritoryId(1)));
        assert!(!board.territory(TerritoryId(0)).is_adjacent(TerritoryId(2)));
    }

    #[test]
    fn rejects_bad_maps() {
        let mut unknown = tiny_map();
        unknown.adjacencies.push(("Alps".to_string(), "Atlantis".to_string()));
        assert!(matches!(unknown.to_board(), Err(GameError::Map(_))));

        let mut duplicate = tiny_map();
        duplicate.continents[1].territories.push("Bay".to_string());
        assert!(matches!(duplicate.to_board(), Err(GameError::Map(_))));

        let mut loop_edge = tiny_map();
        loop_edge.adjacencies.push(("Cove".to_string(), "Cove".to_string()));
        assert!(matches!(loop_edge.to_board(), Err(GameError::Map(_))));
    }
}
