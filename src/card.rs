// card.rs
use crate::dice::Randomness;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

pub const CARD_SET_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardKind {
    Infantry,
    Cavalry,
    Artillery,
    Wild,
}

impl CardKind {
    pub const NON_WILD: [CardKind; 3] = [CardKind::Infantry, CardKind::Cavalry, CardKind::Artillery];
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardKind::Infantry => "INFANTRY",
            CardKind::Cavalry => "CAVALRY",
            CardKind::Artillery => "ARTILLERY",
            CardKind::Wild => "WILD",
        };
        f.write_str(name)
    }
}

/// Equal when both the territory and the kind match. Wild cards carry no
/// territory, so the two wilds in a deck compare equal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub territory: Option<String>,
    pub kind: CardKind,
}

impl Card {
    pub fn new(territory: Option<String>, kind: CardKind) -> Self {
        Self { territory, kind }
    }

    pub fn for_territory(territory: &str, kind: CardKind) -> Self {
        Self::new(Some(territory.to_string()), kind)
    }

    pub fn wild() -> Self {
        Self::new(None, CardKind::Wild)
    }

    pub fn is_wild(&self) -> bool {
        self.kind == CardKind::Wild
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.territory {
            Some(territory) if !self.is_wild() => write!(f, "{} - {}", territory, self.kind),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Three cards that can be traded in: one wild with any two others, one of
/// each non-wild kind, or three of the same non-wild kind.
pub fn is_valid_trade(kinds: &[CardKind]) -> bool {
    if kinds.len() != CARD_SET_SIZE {
        return false;
    }
    let count = |wanted: CardKind| kinds.iter().filter(|&&kind| kind == wanted).count();
    let infantry_count = count(CardKind::Infantry);
    let cavalry_count = count(CardKind::Cavalry);
    let artillery_count = count(CardKind::Artillery);
    let wild_count = count(CardKind::Wild);

    match wild_count {
        1 => true,
        0 => {
            (infantry_count == 1 && cavalry_count == 1 && artillery_count == 1)
                || infantry_count == 3
                || cavalry_count == 3
                || artillery_count == 3
        }
        _ => false,
    }
}

/// A validated triple of cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardSet {
    cards: Vec<Card>,
}

impl CardSet {
    pub fn new(cards: Vec<Card>) -> Option<Self> {
        let kinds: Vec<CardKind> = cards.iter().map(|card| card.kind).collect();
        is_valid_trade(&kinds).then_some(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        write!(f, "[{}]", cards.join(", "))
    }
}

/// Armies awarded for the `trade_number`-th set traded in this game
/// (counting from 1): 4, 6, 8, 10, 12, 15, 20, 25, ...
pub fn trade_in_bonus(trade_number: u32) -> u32 {
    let base_score = trade_number.min(5);
    let mut bonus = 2 + 2 * base_score;
    if trade_number > base_score {
        bonus += 3 + 5 * (trade_number - 6);
    }
    bonus
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// One card per territory, kinds cycling cavalry, artillery, infantry in
    /// the order given, followed by two wilds. Not shuffled.
    pub fn new<'a>(territory_names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut cards: VecDeque<Card> = territory_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let kind = CardKind::NON_WILD[(i + 1) % CardKind::NON_WILD.len()];
                Card::for_territory(name, kind)
            })
            .collect();
        cards.push_back(Card::wild());
        cards.push_back(Card::wild());
        Self { cards }
    }

    pub fn shuffle<R: Randomness>(&mut self, rng: &mut R) {
        rng.shuffle(self.cards.make_contiguous());
    }

    /// Takes the top card, or `None` once the deck is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::RngDice;
    use CardKind::*;

    #[test]
    fn set_rules() {
        assert!(is_valid_trade(&[Infantry, Cavalry, Artillery]));
        assert!(is_valid_trade(&[Infantry, Infantry, Infantry]));
        assert!(is_valid_trade(&[Artillery, Artillery, Artillery]));
        assert!(is_valid_trade(&[Wild, Infantry, Artillery]));
        assert!(is_valid_trade(&[Infantry, Wild, Infantry]));
        assert!(!is_valid_trade(&[Infantry, Infantry, Cavalry]));
        assert!(!is_valid_trade(&[Wild, Wild, Cavalry]));
        assert!(!is_valid_trade(&[Infantry, Cavalry]));
    }

    #[test]
    fn bonus_schedule() {
        let bonuses: Vec<u32> = (1..=10).map(trade_in_bonus).collect();
        assert_eq!(bonuses, vec![4, 6, 8, 10, 12, 15, 20, 25, 30, 35]);
    }

    #[test]
    fn deck_layout() {
        let mut deck = Deck::new(["Alaska", "Brazil", "China", "Egypt"]);
        assert_eq!(deck.len(), 6);
        assert_eq!(deck.draw(), Some(Card::for_territory("Alaska", Cavalry)));
        assert_eq!(deck.draw(), Some(Card::for_territory("Brazil", Artillery)));
        assert_eq!(deck.draw(), Some(Card::for_territory("China", Infantry)));
        assert_eq!(deck.draw(), Some(Card::for_territory("Egypt", Cavalry)));
        assert_eq!(deck.draw(), Some(Card::wild()));
        assert_eq!(deck.draw(), Some(Card::wild()));
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let names = ["Alaska", "Brazil", "China", "Egypt", "India", "Japan"];
        let mut deck = Deck::new(names);
        deck.shuffle(&mut RngDice::seeded(7));
        let mut drawn = Vec::new();
        while let Some(card) = deck.draw() {
            drawn.push(card);
        }
        assert_eq!(drawn.len(), 8);
        assert_eq!(drawn.iter().filter(|card| card.is_wild()).count(), 2);
        for name in names {
            assert!(drawn.iter().any(|card| card.territory.as_deref() == Some(name)));
        }
    }

    #[test]
    fn card_display() {
        assert_eq!(Card::for_territory("Peru", Infantry).to_string(), "Peru - INFANTRY");
        assert_eq!(Card::wild().to_string(), "WILD");
        let set = CardSet::new(vec![
            Card::wild(),
            Card::for_territory("Peru", Infantry),
            Card::for_territory("Siam", Artillery),
        ]);
        assert_eq!(
            set.map(|set| set.to_string()).as_deref(),
            Some("[WILD, Peru - INFANTRY, Siam - ARTILLERY]")
        );
        assert!(CardSet::new(vec![Card::wild(), Card::wild(), Card::for_territory("Peru", Cavalry)]).is_none());
    }
}
