use crate::deck::DeckError;
use crate::hand::HandError;

/// Engine invariant violations. These signal a bug in the caller or the engine
/// and are never produced by a player's own (illegal) action request.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("player {uuid} cannot pay {amount} with a stack of {stack}")]
    InsufficientChips { uuid: String, amount: f64, stack: f64 },
    #[error("player {0} already holds hole cards")]
    HoleCardsAlreadyDealt(String),
    #[error("expected exactly two hole cards, got {0}")]
    HoleCardCount(usize),
    #[error("ante must be positive, got {0}")]
    NonPositiveAnte(f64),
    #[error("small blind must be positive, got {0}")]
    NonPositiveBlind(f64),
    #[error("player {0} has no hole cards to evaluate")]
    MissingHoleCards(String),
    #[error("no active players left when checking agreement")]
    NoActivePlayers,
    #[error("pot of {0} has no active eligible player")]
    NoEligibleWinner(f64),
    #[error("blind positions are not set on the table")]
    BlindPositionsUnset,
    #[error("seat {seat} out of range for {seats} seats")]
    SeatOutOfRange { seat: usize, seats: usize },
    #[error("deck exhausted: wanted {wanted}, {left} left")]
    DeckExhausted { wanted: usize, left: usize },
    #[error("round already finished")]
    RoundFinished,
    #[error("no player is waiting to act")]
    NoPlayerToAct,
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Deck(#[from] DeckError),
}
