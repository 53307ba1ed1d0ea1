// player.rs
use crate::card::{Card, CardSet, CARD_SET_SIZE};
use crate::combinations::combinations;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Assigned by the session in creation order, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Players compare by id alone; two players may share a name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    cards: Vec<Card>,
    armies_in_hand: u32,
    eliminated: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, armies_in_hand: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            cards: Vec::new(),
            armies_in_hand,
            eliminated: false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn num_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn armies_in_hand(&self) -> u32 {
        self.armies_in_hand
    }

    pub fn add_armies(&mut self, armies: u32) {
        self.armies_in_hand += armies;
    }

    pub fn take_armies(&mut self, armies: u32) {
        self.armies_in_hand = self.armies_in_hand.saturating_sub(armies);
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    /// There is no way back in once eliminated.
    pub fn eliminate(&mut self) {
        self.eliminated = true;
    }

    /// Every tradeable triple in the current hand, in hand-index order.
    pub fn calculate_card_sets(&self) -> Vec<CardSet> {
        if self.cards.len() < CARD_SET_SIZE {
            return Vec::new();
        }
        combinations(&self.cards, CARD_SET_SIZE)
            .into_iter()
            .filter_map(CardSet::new)
            .collect()
    }

    /// Removes one hand card per card in `set`. Returns false, leaving the
    /// hand untouched, if the hand does not hold the whole set.
    pub fn remove_card_set(&mut self, set: &CardSet) -> bool {
        let mut remaining = self.cards.clone();
        for card in set.cards() {
            match remaining.iter().position(|held| held == card) {
                Some(index) => {
                    remaining.remove(index);
                }
                None => return false,
            }
        }
        self.cards = remaining;
        true
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardKind::*;

    fn hand(player: &mut Player, cards: Vec<Card>) {
        for card in cards {
            player.add_card(card);
        }
    }

    #[test]
    fn identity_is_the_id() {
        let a = Player::new(PlayerId(1), "Sam", 35);
        let b = Player::new(PlayerId(2), "Sam", 35);
        let c = Player::new(PlayerId(1), "Alex", 0);
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn no_sets_below_three_cards() {
        let mut player = Player::new(PlayerId(1), "Sam", 0);
        hand(&mut player, vec![Card::wild(), Card::for_territory("Peru", Infantry)]);
        assert!(player.calculate_card_sets().is_empty());
    }

    #[test]
    fn finds_every_valid_triple() {
        let mut player = Player::new(PlayerId(1), "Sam", 0);
        hand(
            &mut player,
            vec![
                Card::for_territory("Peru", Infantry),
                Card::for_territory("Siam", Infantry),
                Card::for_territory("Japan", Cavalry),
                Card::for_territory("Egypt", Artillery),
            ],
        );
        let sets = player.calculate_card_sets();
        // (Peru, Japan, Egypt) and (Siam, Japan, Egypt) are runs, nothing else
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].cards()[0].territory.as_deref(), Some("Peru"));
        assert_eq!(sets[1].cards()[0].territory.as_deref(), Some("Siam"));
    }

    #[test]
    fn two_wilds_never_share_a_set() {
        let mut player = Player::new(PlayerId(1), "Sam", 0);
        hand(
            &mut player,
            vec![Card::wild(), Card::wild(), Card::for_territory("Peru", Infantry)],
        );
        assert!(player.calculate_card_sets().is_empty());
    }

    #[test]
    fn removing_a_set_keeps_the_other_wild() {
        let mut player = Player::new(PlayerId(1), "Sam", 0);
        hand(
            &mut player,
            vec![
                Card::wild(),
                Card::for_territory("Peru", Infantry),
                Card::wild(),
                Card::for_territory("Siam", Cavalry),
            ],
        );
        let sets = player.calculate_card_sets();
        let set = sets[0].clone();
        assert!(player.remove_card_set(&set));
        assert_eq!(player.cards(), &[Card::wild()]);
        assert!(!player.remove_card_set(&set));
        assert_eq!(player.num_cards(), 1);
    }

    #[test]
    fn army_pool() {
        let mut player = Player::new(PlayerId(3), "Sam", 2);
        player.add_armies(5);
        player.take_armies(4);
        assert_eq!(player.armies_in_hand(), 3);
        player.take_armies(10);
        assert_eq!(player.armies_in_hand(), 0);
        player.eliminate();
        assert!(player.is_eliminated());
    }
}
