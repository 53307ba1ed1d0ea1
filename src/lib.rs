// lib.rs
pub mod board;
pub mod card;
pub mod combat;
pub mod combinations;
pub mod console;
pub mod continent;
pub mod dice;
pub mod error;
pub mod game;
pub mod game_config;
pub mod player;
pub mod territory;
pub mod turn_phase;

pub use error::GameError;
pub use game::GameSession;
