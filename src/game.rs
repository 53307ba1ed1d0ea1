// game.rs
use crate::board::Board;
use crate::console::{Console, MenuOption};
use crate::dice::Randomness;
use crate::error::GameError;
use crate::player::{Player, PlayerId};
use crate::territory::TerritoryId;
use crate::turn_phase::TurnPhase;
use tracing::{debug, info, warn};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 6;

/// Armies each player starts with: 35, 30, 25 or 20 for 3 to 6 players.
/// Rosters of ten or more get none.
pub fn starting_armies(num_players: usize) -> u32 {
    50u32.saturating_sub(5u32.saturating_mul(num_players as u32))
}

/// One full game, from reading in the players to the last capture.
///
/// `players` is the turn order. Eliminated players keep their seat and are
/// skipped.
#[derive(Debug)]
pub struct GameSession<C, R> {
    pub(crate) console: C,
    pub(crate) dice: R,
    pub(crate) board: Board,
    pub(crate) players: Vec<Player>,
    pub(crate) victor: Option<PlayerId>,
    pub(crate) turn_phase: TurnPhase,
    pub(crate) round: u32,
}

impl<C: Console, R: Randomness> GameSession<C, R> {
    /// Builds the board, shuffles the deck and asks for the players.
    pub fn new(mut console: C, mut dice: R) -> Result<Self, GameError> {
        let mut board = Board::standard()?;
        board.shuffle_deck(&mut dice);
        let players = read_players(&mut console)?;
        Self::from_parts(console, dice, board, players)
    }

    /// Starts from a prepared board and roster, e.g. to replay a position.
    pub fn from_parts(
        console: C,
        dice: R,
        board: Board,
        players: Vec<Player>,
    ) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(GameError::PlayerCount(players.len()));
        }
        Ok(Self {
            console,
            dice,
            board,
            players,
            victor: None,
            turn_phase: TurnPhase::Setup,
            round: 0,
        })
    }

    /// Places every army and then plays turns until someone owns the world.
    pub fn play(&mut self) -> Result<PlayerId, GameError> {
        self.turn_phase = TurnPhase::Placement;
        self.randomize_players()?;
        self.occupy_territories()?;
        self.send_initial_reinforcements()?;
        self.randomize_players()?;
        self.run_main_loop()
    }

    /// Round after round of turns in the current order. Returns the victor.
    pub fn run_main_loop(&mut self) -> Result<PlayerId, GameError> {
        self.say("All armies placed... Let the game begin!")?;
        self.check_for_victory();
        loop {
            if let Some(victor) = self.victor {
                self.turn_phase = TurnPhase::GameOver;
                info!(victor = %victor, rounds = self.round, "game over");
                return Ok(victor);
            }
            self.round += 1;
            self.say(format!("--- Round #{} ---", self.round))?;
            debug!(round = self.round, "round started");
            for index in 0..self.players.len() {
                if self.players[index].is_eliminated() {
                    continue;
                }
                self.take_turn(index)?;
                if self.victor.is_some() {
                    break;
                }
            }
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn victor(&self) -> Option<PlayerId> {
        self.victor
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.turn_phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn dice(&self) -> &R {
        &self.dice
    }

    pub(crate) fn say(&mut self, text: impl AsRef<str>) -> Result<(), GameError> {
        self.console.write_line(text.as_ref())
    }

    pub(crate) fn player_name(&self, id: PlayerId) -> &str {
        self.player(id).map_or("NONE", |player| player.name.as_str())
    }

    pub(crate) fn territory_name(&self, id: TerritoryId) -> &str {
        &self.board.territory(id).name
    }

    /// `Alaska (Ann => 3)`
    pub(crate) fn territory_label(&self, id: TerritoryId) -> String {
        let territory = self.board.territory(id);
        let owner = territory.owner.map_or("NONE", |owner| self.player_name(owner));
        format!("{} ({} => {})", territory.name, owner, territory.armies)
    }

    pub(crate) fn territory_menu(&self, ids: &[TerritoryId]) -> Vec<MenuOption<TerritoryId>> {
        ids.iter()
            .map(|&id| MenuOption::new(self.territory_name(id), self.territory_label(id), id))
            .collect()
    }

    /// Sets the victor once a single player holds every territory.
    pub(crate) fn check_for_victory(&mut self) -> bool {
        match self.board.sole_owner() {
            Some(owner) => {
                self.victor = Some(owner);
                self.turn_phase = TurnPhase::GameOver;
                true
            }
            None => false,
        }
    }

    fn randomize_players(&mut self) -> Result<(), GameError> {
        self.say("Randomizing player order...")?;
        self.dice.shuffle(&mut self.players);
        debug!(order = ?self.players.iter().map(|p| p.id.0).collect::<Vec<_>>(), "turn order");
        Ok(())
    }

    /// Players take turns claiming free territories, one army each, until
    /// none are left.
    fn occupy_territories(&mut self) -> Result<(), GameError> {
        let mut free: Vec<TerritoryId> = self.board.territory_ids().collect();
        while !free.is_empty() {
            for index in 0..self.players.len() {
                let options = self.territory_menu(&free);
                let prompt = format!("{}, choose a territory to occupy: ", self.players[index].name);
                let choice = *self.console.prompt_choice(
                    &prompt,
                    "Please select a free territory...",
                    &options,
                )?;
                free.retain(|&id| id != choice);
                let player = &mut self.players[index];
                self.board.occupy(choice, player.id, 1);
                player.take_armies(1);
                if free.is_empty() {
                    break;
                }
            }
        }
        info!("all territories occupied");
        Ok(())
    }

    fn send_initial_reinforcements(&mut self) -> Result<(), GameError> {
        self.say("All territories occupied... send in the reinforcements!")?;
        while self.players.iter().any(|player| player.armies_in_hand() > 0) {
            for index in 0..self.players.len() {
                if self.players[index].armies_in_hand() > 0 {
                    self.place_reinforcements(index, true)?;
                }
            }
        }
        Ok(())
    }

    /// Puts some of the player's armies in hand onto one of their
    /// territories: a single army when `one_at_a_time`, otherwise as many
    /// as they choose.
    pub(crate) fn place_reinforcements(
        &mut self,
        index: usize,
        one_at_a_time: bool,
    ) -> Result<(), GameError> {
        let player_id = self.players[index].id;
        let in_hand = self.players[index].armies_in_hand();
        let occupied = self.board.occupied_territories(player_id);
        let name = self.players[index].name.clone();
        self.say(format!(
            "{}, you have {} armies remaining to place on the board.",
            name, in_hand
        ))?;

        let territory = match occupied.as_slice() {
            [] => {
                warn!(player = %player_id, in_hand, "no territory to reinforce, armies discarded");
                self.players[index].take_armies(in_hand);
                return Ok(());
            }
            [only] => *only,
            _ => {
                let options = self.territory_menu(&occupied);
                *self.console.prompt_choice(
                    &format!("{}, choose an occupied territory to reinforce: ", name),
                    "Please select an occupied territory...",
                    &options,
                )?
            }
        };

        let armies = if one_at_a_time || in_hand == 1 {
            1
        } else if occupied.len() > 1 {
            self.console
                .prompt_int("Select number of armies to reinforce with", 1, in_hand)?
        } else {
            in_hand
        };

        self.board.add_armies(territory, armies);
        self.players[index].take_armies(armies);
        if occupied.len() == 1 {
            self.say(format!(
                "{} has reinforced {} with {} armies.",
                name,
                self.territory_name(territory),
                armies
            ))?;
        }
        Ok(())
    }
}

fn read_players<C: Console>(console: &mut C) -> Result<Vec<Player>, GameError> {
    let num_players = console.prompt_int(
        "Enter number of players",
        MIN_PLAYERS as u32,
        MAX_PLAYERS as u32,
    )? as usize;
    let armies = starting_armies(num_players);
    let mut players = Vec::with_capacity(num_players);
    for seat in 1..=num_players {
        let name = console.prompt_line(&format!("Player {}'s name: ", seat))?;
        players.push(Player::new(PlayerId(seat as u32), name.trim(), armies));
    }
    console.write_line(&format!("Welcome {}!", join_names(&players)))?;
    Ok(players)
}

/// `Ann, Bob and Cy`
fn join_names(players: &[Player]) -> String {
    match players {
        [] => String::new(),
        [only] => only.name.clone(),
        [rest @ .., last] => {
            let rest: Vec<&str> = rest.iter().map(|player| player.name.as_str()).collect();
            format!("{} and {}", rest.join(", "), last.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::dice::{LoadedDice, RngDice};

    #[test]
    fn starting_army_allotment() {
        let armies: Vec<u32> = (MIN_PLAYERS..=MAX_PLAYERS).map(starting_armies).collect();
        assert_eq!(armies, vec![35, 30, 25, 20]);
        assert_eq!(starting_armies(10), 0);
        assert_eq!(starting_armies(11), 0);
    }

    #[test]
    fn setup_reads_players() {
        let console = ScriptedConsole::new(["7", "3", "Ann", "Bob", "Cy"]);
        let session = GameSession::new(console, RngDice::seeded(1)).expect("setup succeeds");
        let names: Vec<&str> = session.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cy"]);
        let ids: Vec<u32> = session.players().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(session.players().iter().all(|p| p.armies_in_hand() == 35));
        assert!(session.console().transcript_contains("Welcome Ann, Bob and Cy!"));
        assert!(session.console().transcript_contains("Please enter a number from 3 to 6, inclusive..."));
        assert_eq!(session.board().cards_remaining(), 44);
        assert_eq!(session.turn_phase(), TurnPhase::Setup);
    }

    #[test]
    fn setup_aborts_when_input_runs_out() {
        let console = ScriptedConsole::new(["4", "Ann"]);
        let result = GameSession::new(console, LoadedDice::default());
        assert!(matches!(result, Err(GameError::InputClosed)));
    }

    #[test]
    fn placement_uses_every_army() {
        let mut inputs = vec!["3".to_string(), "Ann".into(), "Bob".into(), "Cy".into()];
        // take the first free territory, then always reinforce the first owned one
        inputs.extend(std::iter::repeat("1".to_string()).take(42 + 63));
        let console = ScriptedConsole::new(inputs);
        let mut session =
            GameSession::new(console, LoadedDice::default()).expect("setup succeeds");
        session.turn_phase = TurnPhase::Placement;
        session.occupy_territories().expect("occupation succeeds");
        // with the loaded dice nothing is shuffled: seats claim names in rotation
        let afghanistan = session.board().territory_id("Afghanistan").expect("exists");
        let alaska = session.board().territory_id("Alaska").expect("exists");
        assert_eq!(session.board().territory(afghanistan).owner, Some(PlayerId(1)));
        assert_eq!(session.board().territory(alaska).owner, Some(PlayerId(2)));
        for player in session.players() {
            assert_eq!(session.board().occupied_territories(player.id).len(), 14);
            assert_eq!(player.armies_in_hand(), 21);
        }

        session.send_initial_reinforcements().expect("placement succeeds");
        assert!(session.players().iter().all(|p| p.armies_in_hand() == 0));
        let total: u32 = session.board().territories().iter().map(|t| t.armies).sum();
        assert_eq!(total, 105);
        // every extra army went to each player's alphabetically first territory
        assert_eq!(session.board().territory(afghanistan).armies, 22);
        assert_eq!(session.console().remaining_inputs(), 0);
    }

    #[test]
    fn roster_size_is_checked() {
        let board = Board::standard().expect("standard map is valid");
        let players = vec![Player::new(PlayerId(1), "Ann", 0), Player::new(PlayerId(2), "Bob", 0)];
        let result = GameSession::from_parts(ScriptedConsole::default(), LoadedDice::default(), board, players);
        assert!(matches!(result, Err(GameError::PlayerCount(2))));
    }

    #[test]
    fn join_names_reads_naturally() {
        let players: Vec<Player> = ["Ann", "Bob", "Cy", "Di"]
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId(i as u32 + 1), name, 0))
            .collect();
        assert_eq!(join_names(&players[..1]), "Ann");
        assert_eq!(join_names(&players[..2]), "Ann and Bob");
        assert_eq!(join_names(&players), "Ann, Bob, Cy and Di");
    }
}
