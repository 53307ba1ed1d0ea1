// turn_phase.rs
use crate::board::Board;
use crate::card::CardSet;
use crate::combat::{Casualties, MAX_ATTACK_DICE, MAX_DEFENSE_DICE};
use crate::console::{Console, MenuOption};
use crate::dice::Randomness;
use crate::error::GameError;
use crate::game::GameSession;
use crate::player::PlayerId;
use crate::territory::TerritoryId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Once a hand reaches this size the player must trade in a set.
pub const MANDATORY_TRADE_HAND_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Setup,
    Placement,
    Reinforce,
    Attack,
    Fortify,
    GameOver,
}

/// One army per three territories held, never fewer than three.
pub fn territory_bonus(occupied_territories: usize) -> u32 {
    (occupied_territories as u32 / 3).max(3)
}

/// Armies for the turn. Trading cards caps what territories and continents
/// add to at most two above the card bonus.
pub fn reinforcement_total(territory_armies: u32, continent_armies: u32, card_armies: u32) -> u32 {
    let board_armies = territory_armies + continent_armies;
    if card_armies == 0 {
        board_armies
    } else {
        card_armies.max((card_armies + 2).min(board_armies))
    }
}

impl<C: Console, R: Randomness> GameSession<C, R> {
    pub(crate) fn take_turn(&mut self, index: usize) -> Result<(), GameError> {
        let name = self.players[index].name.clone();
        self.say(format!("{}, it is now your turn.", name))?;

        self.turn_phase = TurnPhase::Reinforce;
        debug!(player = %name, phase = ?self.turn_phase, "phase started");
        self.award_reinforcements(index)?;
        while self.players[index].armies_in_hand() > 0 {
            self.place_reinforcements(index, false)?;
        }

        self.turn_phase = TurnPhase::Attack;
        debug!(player = %name, phase = ?self.turn_phase, "phase started");
        self.attack_phase(index)?;
        if self.victor.is_some() {
            return Ok(());
        }

        self.turn_phase = TurnPhase::Fortify;
        debug!(player = %name, phase = ?self.turn_phase, "phase started");
        self.fortify_phase(index)
    }

    /// Adds this turn's armies to the player's hand and returns how many.
    pub(crate) fn award_reinforcements(&mut self, index: usize) -> Result<u32, GameError> {
        let player_id = self.players[index].id;
        let name = self.players[index].name.clone();

        let occupied = self.board.occupied_territories(player_id).len();
        let territory_armies = territory_bonus(occupied);
        self.say(format!(
            "{} controls {} territories ({} armies awarded)",
            name, occupied, territory_armies
        ))?;

        let mut continent_armies = 0;
        for continent_id in self.board.occupied_continents(player_id) {
            let continent = self.board.continent(continent_id);
            let (continent_name, bonus) = (continent.name.clone(), continent.get_bonus());
            continent_armies += bonus;
            self.say(format!(
                "{} controls {} ({} armies awarded)",
                name, continent_name, bonus
            ))?;
        }

        let card_armies = self.trade_in_card_sets(index)?;
        let total = reinforcement_total(territory_armies, continent_armies, card_armies);
        self.say(format!("{} received {} new armies this turn.", name, total))?;
        info!(
            player = %name,
            territory_armies,
            continent_armies,
            card_armies,
            total,
            "reinforcements awarded"
        );
        self.players[index].add_armies(total);
        Ok(total)
    }

    /// Lets the player trade in sets for as long as they hold one, forcing a
    /// trade while the hand is at the mandatory size. Returns the armies won.
    fn trade_in_card_sets(&mut self, index: usize) -> Result<u32, GameError> {
        let name = self.players[index].name.clone();
        let mut card_armies = 0;
        loop {
            let card_sets = self.players[index].calculate_card_sets();
            if card_sets.is_empty() {
                return Ok(card_armies);
            }
            self.say(
                "NOTE: On a single turn, you may receive no more than 2 extra armies above and \
                 beyond those you receive for the matched sets of cards you trade in.",
            )?;
            let allow_done = self.players[index].num_cards() < MANDATORY_TRADE_HAND_SIZE;
            let prompt = if allow_done {
                format!("{}, select a set to turn in (type 'done' to skip): ", name)
            } else {
                format!("{}, select a set to turn in: ", name)
            };
            let options: Vec<MenuOption<CardSet>> = card_sets
                .into_iter()
                .enumerate()
                .map(|(i, set)| MenuOption::new((i + 1).to_string(), set.to_string(), set))
                .collect();
            let choice = self.console.prompt_option(
                &prompt,
                "Please select a set number...",
                &options,
                allow_done,
            )?;
            let Some(set) = choice.cloned() else {
                return Ok(card_armies);
            };
            if !self.players[index].remove_card_set(&set) {
                warn!(player = %name, set = %set, "card set not in hand, trade skipped");
                return Ok(card_armies);
            }
            let set_armies = self.board.trade_in_card_set(set);
            self.say(format!(
                "{} received {} armies for turning in a card set.",
                name, set_armies
            ))?;
            card_armies += set_armies;
        }
    }

    /// Repeated attacks until the player stops, runs out of options or wins.
    /// Capturing anything earns one card at the end.
    fn attack_phase(&mut self, index: usize) -> Result<(), GameError> {
        let player_id = self.players[index].id;
        let name = self.players[index].name.clone();
        let mut captured_any = false;

        loop {
            let sources = self.sources(player_id, |board, id| board.attackable_territories(id));
            if sources.is_empty() {
                self.say(format!("{} has no territory that can attack.", name))?;
                break;
            }
            let options = self.territory_menu(&sources);
            let Some(&from) = self.console.prompt_option(
                &format!(
                    "{}, select a territory from which to attack (type 'done' to end attack phase): ",
                    name
                ),
                "Please select a territory or type 'done'...",
                &options,
                true,
            )?
            else {
                break;
            };

            let targets = self.board.attackable_territories(from);
            let options = self.territory_menu(&targets);
            let Some(&to) = self.console.prompt_option(
                &format!(
                    "{}, select a territory to attack (type 'done' to cancel the attack): ",
                    name
                ),
                "Please select a territory or type 'done'...",
                &options,
                true,
            )?
            else {
                continue;
            };

            captured_any |= self.do_attacks(from, to)?;
            if self.check_for_victory() {
                break;
            }
        }

        if captured_any {
            match self.board.draw_card() {
                Some(card) => {
                    self.say(format!(
                        "{} captured at least one territory and drew a '{}' card.",
                        name, card
                    ))?;
                    self.players[index].add_card(card);
                }
                None => {
                    self.say(format!(
                        "Sorry, {}, there are no more Risk(y) cards available...",
                        name
                    ))?;
                }
            }
        }
        Ok(())
    }

    /// Rounds of dice between two territories until the defender falls, the
    /// attacker is down to one army, or the attacker stops. Returns whether
    /// the territory was captured.
    fn do_attacks(&mut self, from: TerritoryId, to: TerritoryId) -> Result<bool, GameError> {
        let (Some(attacker), Some(defender)) =
            (self.board.territory(from).owner, self.board.territory(to).owner)
        else {
            return Ok(false);
        };
        let attacker_name = self.player_name(attacker).to_string();
        let defender_name = self.player_name(defender).to_string();
        let from_name = self.territory_name(from).to_string();
        let to_name = self.territory_name(to).to_string();
        self.say(format!(
            "{} is attacking {} in {} from {}!",
            attacker_name, defender_name, to_name, from_name
        ))?;

        let mut attacking = true;
        while attacking && self.board.territory(from).armies > 1 {
            let attacker_armies = self.board.territory(from).armies;
            let num_attacking = self.console.prompt_int(
                &format!("{}, how many armies do you wish to attack with?", attacker_name),
                1,
                MAX_ATTACK_DICE.min(attacker_armies - 1),
            )?;
            let defender_armies = self.board.territory(to).armies;
            let num_defending = if defender_armies > 1 {
                self.console.prompt_int(
                    &format!("{}, how many armies do you wish to defend with?", defender_name),
                    1,
                    MAX_DEFENSE_DICE.min(defender_armies),
                )?
            } else {
                self.say(format!("{} is defending with their sole army.", defender_name))?;
                defender_armies
            };

            let attacker_rolls = self.dice.roll_dice(num_attacking as usize);
            self.say(format!("{} rolled {:?}...", attacker_name, attacker_rolls))?;
            let defender_rolls = self.dice.roll_dice(num_defending as usize);
            self.say(format!("{} rolled {:?}...", defender_name, defender_rolls))?;

            let casualties = Casualties::from_rolls(&attacker_rolls, &defender_rolls);
            self.board.remove_armies(from, casualties.attacker);
            self.board.remove_armies(to, casualties.defender);
            self.report_casualties(from, to, attacker, defender, casualties)?;

            if self.board.territory(to).armies == 0 {
                self.capture(from, to, attacker, defender, num_attacking)?;
                return Ok(true);
            }
            if self.board.territory(from).armies == 1 {
                self.say(format!(
                    "{}'s attack on {} has halted due to insufficient armies in {}.",
                    attacker_name, to_name, from_name
                ))?;
                attacking = false;
            } else {
                attacking = self.console.prompt_yes_no(&format!(
                    "{}, do you wish to continue the attack?",
                    attacker_name
                ))?;
            }
        }
        Ok(false)
    }

    fn report_casualties(
        &mut self,
        from: TerritoryId,
        to: TerritoryId,
        attacker: PlayerId,
        defender: PlayerId,
        casualties: Casualties,
    ) -> Result<(), GameError> {
        let attacker_side = format!(
            "{} armies remain in {}",
            self.board.territory(from).armies,
            self.territory_name(from)
        );
        let defender_side = format!(
            "{} armies remain in {}",
            self.board.territory(to).armies,
            self.territory_name(to)
        );
        let message = match (casualties.attacker, casualties.defender) {
            (0, lost) => format!(
                "{} lost {} while defending the attack! ({})",
                self.player_name(defender),
                armies_phrase(lost),
                defender_side
            ),
            (lost, 0) => format!(
                "{} lost {} in the attack! ({})",
                self.player_name(attacker),
                armies_phrase(lost),
                attacker_side
            ),
            _ => format!(
                "Both {} and {} lost an army in the attack! ({} and {})",
                self.player_name(attacker),
                self.player_name(defender),
                attacker_side,
                defender_side
            ),
        };
        self.say(message)
    }

    /// Hands the emptied territory to the attacker, knocks out the defender
    /// if that was their last one, and moves the conquering armies in.
    fn capture(
        &mut self,
        from: TerritoryId,
        to: TerritoryId,
        attacker: PlayerId,
        defender: PlayerId,
        num_attacking: u32,
    ) -> Result<(), GameError> {
        let attacker_name = self.player_name(attacker).to_string();
        let defender_name = self.player_name(defender).to_string();
        let from_name = self.territory_name(from).to_string();
        let to_name = self.territory_name(to).to_string();

        self.board.set_owner(to, attacker);
        self.say(format!(
            "{} has captured {} from {}!",
            attacker_name, to_name, defender_name
        ))?;
        info!(attacker = %attacker_name, defender = %defender_name, territory = %to_name, "territory captured");

        if self.board.occupied_territories(defender).is_empty() {
            if let Some(player) = self.players.iter_mut().find(|p| p.id == defender) {
                player.eliminate();
            }
            self.say(format!(
                "{} no longer controls any territories and has been eliminated!",
                defender_name
            ))?;
            info!(player = %defender_name, "player eliminated");
        }
        let won = self.check_for_victory();

        let max_armies = self.board.territory(from).armies.saturating_sub(1);
        let min_armies = max_armies.min(num_attacking);
        let armies = if min_armies == max_armies || won {
            self.say(format!(
                "{} is forced to move {} armies from {} to {}.",
                attacker_name, min_armies, from_name, to_name
            ))?;
            min_armies
        } else {
            self.console.prompt_int(
                &format!(
                    "{}, select the number of armies to move from {} to {}",
                    attacker_name, from_name, to_name
                ),
                min_armies,
                max_armies,
            )?
        };
        self.board.move_armies(from, to, armies);
        Ok(())
    }

    /// At most one move of armies between two neighbouring territories.
    fn fortify_phase(&mut self, index: usize) -> Result<(), GameError> {
        let player_id = self.players[index].id;
        let name = self.players[index].name.clone();

        loop {
            let sources = self.sources(player_id, |board, id| board.fortifiable_territories(id));
            if sources.is_empty() {
                self.say(format!("{} has no territory to fortify from.", name))?;
                return Ok(());
            }
            let options = self.territory_menu(&sources);
            let Some(&from) = self.console.prompt_option(
                &format!(
                    "{}, select a territory from which to fortify (type 'done' to skip fortification): ",
                    name
                ),
                "Please select a territory or type 'done'...",
                &options,
                true,
            )?
            else {
                return Ok(());
            };

            let targets = self.board.fortifiable_territories(from);
            let options = self.territory_menu(&targets);
            let Some(&to) = self.console.prompt_option(
                &format!(
                    "{}, select a territory to fortify (type 'done' to cancel this fortification action): ",
                    name
                ),
                "Please select a territory or type 'done'...",
                &options,
                true,
            )?
            else {
                continue;
            };

            let source_armies = self.board.territory(from).armies;
            let armies = if source_armies == 2 {
                1
            } else {
                self.console.prompt_int(
                    &format!("{}, how many armies do you wish to move?", name),
                    1,
                    source_armies - 1,
                )?
            };
            self.board.move_armies(from, to, armies);
            self.say(format!(
                "{} fortified {} with {} armies from {}.",
                name,
                self.territory_name(to),
                armies,
                self.territory_name(from)
            ))?;
            return Ok(());
        }
    }

    /// Usable territories of `player` that have at least one target.
    fn sources(
        &self,
        player: PlayerId,
        targets: impl Fn(&Board, TerritoryId) -> Vec<TerritoryId>,
    ) -> Vec<TerritoryId> {
        self.board
            .usable_territories(player)
            .into_iter()
            .filter(|&id| !targets(&self.board, id).is_empty())
            .collect()
    }
}

fn armies_phrase(count: u32) -> String {
    if count == 1 {
        "an army".to_string()
    } else {
        format!("{} armies", count)
    }
}
