// combat.rs
use serde::{Deserialize, Serialize};

pub const MAX_ATTACK_DICE: u32 = 3;
pub const MAX_DEFENSE_DICE: u32 = 2;

/// Pairs highest roll against highest roll for as many pairs as the shorter
/// side has. Ties go to the defender.
///
/// Positive result: armies the defender loses. Negative: armies the attacker
/// loses. Zero: one each. Both slices must be sorted highest first.
pub fn resolve_rolls(attacker: &[u8], defender: &[u8]) -> i8 {
    attacker
        .iter()
        .zip(defender)
        .map(|(attack, defend)| if attack > defend { 1 } else { -1 })
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Casualties {
    pub attacker: u32,
    pub defender: u32,
}

impl Casualties {
    pub fn from_rolls(attacker: &[u8], defender: &[u8]) -> Self {
        match resolve_rolls(attacker, defender) {
            -2 => Self::new(2, 0),
            -1 => Self::new(1, 0),
            0 => Self::new(1, 1),
            1 => Self::new(0, 1),
            _ => Self::new(0, 2),
        }
    }

    fn new(attacker: u32, defender: u32) -> Self {
        Self { attacker, defender }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attacker_sweeps_both_pairs() {
        assert_eq!(resolve_rolls(&[6, 4], &[5, 3]), 2);
        assert_eq!(Casualties::from_rolls(&[6, 4], &[5, 3]), Casualties::new(0, 2));
    }

    #[test]
    fn tie_goes_to_defender() {
        assert_eq!(resolve_rolls(&[3], &[3]), -1);
        assert_eq!(resolve_rolls(&[5, 3], &[4, 3]), 0);
        assert_eq!(Casualties::from_rolls(&[5, 3], &[4, 3]), Casualties::new(1, 1));
    }

    #[test]
    fn only_shorter_side_is_compared() {
        assert_eq!(resolve_rolls(&[6, 6, 6], &[1]), 1);
        assert_eq!(resolve_rolls(&[2], &[6, 6]), -1);
        assert_eq!(Casualties::from_rolls(&[4, 2, 1], &[5, 3]), Casualties::new(2, 0));
    }
}
