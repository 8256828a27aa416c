//! Notifications produced by the round engine.
//!
//! The engine does not deliver anything itself: every transition returns an
//! ordered list of [`Envelope`]s and the caller routes them, for example with
//! [`crate::agents::dispatch`].

use crate::action_checker::{Action, LegalActions};
use crate::game_evaluator::HandInfo;
use crate::hand::HoleCards;
use crate::round::{GameState, Street};
use crate::table::Seats;

/// Settings of a whole game. The multi-round loop that consumes them lives
/// outside this crate; they travel in [`Message::GameStart`] and
/// [`Message::GameResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub max_round: u32,
    pub initial_stack: f64,
    pub small_blind_amount: f64,
    pub ante: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { max_round: 10, initial_stack: 100.0, small_blind_amount: 5.0, ante: 0.0 }
    }
}

impl GameConfig {
    pub fn with_max_round(mut self, max_round: u32) -> Self {
        self.max_round = max_round;
        self
    }

    pub fn with_initial_stack(mut self, stack: f64) -> Self {
        self.initial_stack = stack;
        self
    }

    pub fn with_small_blind(mut self, amount: f64) -> Self {
        self.small_blind_amount = amount;
        self
    }

    pub fn with_ante(mut self, ante: f64) -> Self {
        self.ante = ante;
        self
    }
}

/// Who a message is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Player(String),
    Broadcast,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub recipient: Recipient,
    pub message: Message,
}

impl Envelope {
    pub fn to_player(uuid: impl Into<String>, message: Message) -> Self {
        Self { recipient: Recipient::Player(uuid.into()), message }
    }

    pub fn broadcast(message: Message) -> Self {
        Self { recipient: Recipient::Broadcast, message }
    }

    pub fn is_for(&self, uuid: &str) -> bool {
        match &self.recipient {
            Recipient::Broadcast => true,
            Recipient::Player(target) => target == uuid,
        }
    }
}

/// States are snapshots: later transitions never change a message already sent.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Message {
    GameStart {
        config: GameConfig,
        seats: Seats,
    },
    RoundStart {
        round_count: u32,
        seat_index: usize,
        hole_cards: Option<HoleCards>,
        seats: Seats,
    },
    StreetStart {
        street: Street,
        state: GameState,
    },
    Ask {
        player_uuid: String,
        legal_actions: LegalActions,
        state: GameState,
    },
    GameUpdate {
        actor_uuid: String,
        action: Action,
        amount: f64,
        state: GameState,
    },
    RoundResult {
        round_count: u32,
        /// Seats with the best hand.
        winners: Vec<usize>,
        hand_info: Vec<HandInfo>,
        /// Chips won, indexed by seat.
        prize_map: Vec<f64>,
        state: GameState,
    },
    GameResult {
        seats: Seats,
        config: GameConfig,
    },
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Message::GameStart { .. } => "game_start",
            Message::RoundStart { .. } => "round_start",
            Message::StreetStart { .. } => "street_start",
            Message::Ask { .. } => "ask",
            Message::GameUpdate { .. } => "game_update",
            Message::RoundResult { .. } => "round_result",
            Message::GameResult { .. } => "game_result",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = GameConfig::default().with_max_round(3).with_small_blind(2.5).with_ante(1.0);
        assert_eq!(config.max_round, 3);
        assert_eq!(config.small_blind_amount, 2.5);
        assert_eq!(config.ante, 1.0);
        assert_eq!(config.initial_stack, 100.0);
    }

    #[test]
    fn envelope_addressing() {
        let start = Message::GameStart { config: GameConfig::default(), seats: Seats::new() };
        assert!(Envelope::broadcast(start.clone()).is_for("anyone"));
        let direct = Envelope::to_player("p1", start);
        assert!(direct.is_for("p1"));
        assert!(!direct.is_for("p2"));
        assert_eq!(direct.message.kind(), "game_start");
    }
}
