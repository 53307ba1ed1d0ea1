// error.rs
use thiserror::Error;

/// Failures that end or abort a game session.
///
/// Bad player input never shows up here; the console re-prompts until it
/// gets something usable.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("input closed before the game finished")]
    InputClosed,

    #[error("game cancelled")]
    Cancelled,

    #[error("min should not be greater than max (min={min},max={max})")]
    InvalidRange { min: u32, max: u32 },

    #[error("a menu needs at least one option when it cannot be cancelled")]
    EmptyMenu,

    #[error("unknown territory '{0}'")]
    UnknownTerritory(String),

    #[error("a game needs 3 to 6 players, got {0}")]
    PlayerCount(usize),

    #[error("invalid map: {0}")]
    Map(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
