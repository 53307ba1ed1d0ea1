// board.rs
use crate::card::{trade_in_bonus, Card, CardSet, Deck};
use crate::continent::{Continent, ContinentId};
use crate::dice::Randomness;
use crate::error::GameError;
use crate::game_config::MapConfig;
use crate::player::PlayerId;
use crate::territory::{Territory, TerritoryId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// The territory and continent arenas plus the card deck and the history of
/// traded-in sets. Territories and continents are indexed in name order, so
/// every list the board hands out is already sorted by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    territories: Vec<Territory>,
    continents: Vec<Continent>,
    territory_index: HashMap<String, TerritoryId>,
    deck: Deck,
    card_sets_traded_in: Vec<CardSet>,
}

impl Board {
    /// Territories must already be sorted by name and continents likewise;
    /// `MapConfig::to_board` guarantees both.
    pub fn new(territories: Vec<Territory>, continents: Vec<Continent>) -> Self {
        let territory_index = territories
            .iter()
            .enumerate()
            .map(|(index, territory)| (territory.name.clone(), TerritoryId(index)))
            .collect();
        let deck = Deck::new(territories.iter().map(|territory| territory.name.as_str()));
        Self {
            territories,
            continents,
            territory_index,
            deck,
            card_sets_traded_in: Vec::new(),
        }
    }

    /// Fresh classic world map with an unshuffled deck.
    pub fn standard() -> Result<Self, GameError> {
        MapConfig::standard().to_board()
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn territory_ids(&self) -> impl Iterator<Item = TerritoryId> {
        (0..self.territories.len()).map(TerritoryId)
    }

    pub fn territory(&self, id: TerritoryId) -> &Territory {
        &self.territories[id.0]
    }

    pub fn territory_id(&self, name: &str) -> Result<TerritoryId, GameError> {
        self.territory_index
            .get(name)
            .copied()
            .ok_or_else(|| GameError::UnknownTerritory(name.to_string()))
    }

    pub fn get_territory(&self, name: &str) -> Option<&Territory> {
        self.territory_index.get(name).map(|&id| self.territory(id))
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn continent(&self, id: ContinentId) -> &Continent {
        &self.continents[id.0]
    }

    pub fn get_continent(&self, name: &str) -> Option<&Continent> {
        self.continents.iter().find(|continent| continent.name == name)
    }

    /// Hands `id` to `owner` with exactly `armies` on it.
    pub fn occupy(&mut self, id: TerritoryId, owner: PlayerId, armies: u32) {
        let territory = &mut self.territories[id.0];
        territory.owner = Some(owner);
        territory.armies = armies;
    }

    /// Changes hands after a capture. The army count is left as it is (zero)
    /// until the conqueror moves in.
    pub fn set_owner(&mut self, id: TerritoryId, owner: PlayerId) {
        self.territories[id.0].owner = Some(owner);
    }

    pub fn add_armies(&mut self, id: TerritoryId, armies: u32) {
        self.territories[id.0].armies += armies;
    }

    pub fn remove_armies(&mut self, id: TerritoryId, armies: u32) {
        let territory = &mut self.territories[id.0];
        territory.armies = territory.armies.saturating_sub(armies);
    }

    pub fn move_armies(&mut self, from: TerritoryId, to: TerritoryId, armies: u32) {
        let moved = armies.min(self.territories[from.0].armies);
        self.remove_armies(from, moved);
        self.add_armies(to, moved);
    }

    /// The player holding every member territory, if there is exactly one.
    pub fn continent_owner(&self, id: ContinentId) -> Option<PlayerId> {
        let mut owners = self.continent(id).territories.iter().map(|&t| self.territory(t).owner);
        let first = owners.next()??;
        owners.all(|owner| owner == Some(first)).then_some(first)
    }

    /// Continents reachable across a single border, excluding `id` itself.
    pub fn adjacent_continents(&self, id: ContinentId) -> Vec<ContinentId> {
        let adjacent: BTreeSet<ContinentId> = self
            .continent(id)
            .territories
            .iter()
            .flat_map(|&t| self.territory(t).adjacent_territories.iter())
            .map(|&neighbour| self.territory(neighbour).continent)
            .filter(|&continent| continent != id)
            .collect();
        adjacent.into_iter().collect()
    }

    pub fn occupied_territories(&self, player: PlayerId) -> Vec<TerritoryId> {
        self.territory_ids()
            .filter(|&id| self.territory(id).is_owned_by(player))
            .collect()
    }

    pub fn occupied_continents(&self, player: PlayerId) -> Vec<ContinentId> {
        (0..self.continents.len())
            .map(ContinentId)
            .filter(|&id| self.continent_owner(id) == Some(player))
            .collect()
    }

    pub fn usable_territories(&self, player: PlayerId) -> Vec<TerritoryId> {
        self.territory_ids()
            .filter(|&id| {
                let territory = self.territory(id);
                territory.is_owned_by(player) && territory.is_usable()
            })
            .collect()
    }

    /// Neighbours held by someone else. Empty unless `id` is owned and usable.
    pub fn attackable_territories(&self, id: TerritoryId) -> Vec<TerritoryId> {
        self.neighbours_where(id, |owner, neighbour_owner| neighbour_owner != Some(owner))
    }

    /// Neighbours held by the same player. Empty unless `id` is owned and usable.
    pub fn fortifiable_territories(&self, id: TerritoryId) -> Vec<TerritoryId> {
        self.neighbours_where(id, |owner, neighbour_owner| neighbour_owner == Some(owner))
    }

    fn neighbours_where(
        &self,
        id: TerritoryId,
        keep: impl Fn(PlayerId, Option<PlayerId>) -> bool,
    ) -> Vec<TerritoryId> {
        let territory = self.territory(id);
        let owner = match territory.owner {
            Some(owner) if territory.is_usable() => owner,
            _ => return Vec::new(),
        };
        territory
            .adjacent_territories
            .iter()
            .copied()
            .filter(|&neighbour| keep(owner, self.territory(neighbour).owner))
            .collect()
    }

    /// The player holding every territory on the board, if any.
    pub fn sole_owner(&self) -> Option<PlayerId> {
        let mut owners = self.territories.iter().map(|territory| territory.owner);
        let first = owners.next()??;
        owners.all(|owner| owner == Some(first)).then_some(first)
    }

    pub fn shuffle_deck<R: Randomness>(&mut self, rng: &mut R) {
        self.deck.shuffle(rng);
    }

    pub fn draw_card(&mut self) -> Option<Card> {
        let card = self.deck.draw();
        if card.is_none() {
            debug!("card deck exhausted");
        }
        card
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    /// Records the trade and returns the armies it is worth.
    pub fn trade_in_card_set(&mut self, set: CardSet) -> u32 {
        self.card_sets_traded_in.push(set);
        let trade_number = self.num_card_sets_traded_in();
        let bonus = trade_in_bonus(trade_number as u32);
        debug!(trade_number, bonus, "card set traded in");
        bonus
    }

    pub fn num_card_sets_traded_in(&self) -> usize {
        self.card_sets_traded_in.len()
    }

    pub fn card_sets_traded_in(&self) -> &[CardSet] {
        &self.card_sets_traded_in
    }
}
