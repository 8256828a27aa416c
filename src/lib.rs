//! holdem-round: a Texas Hold'em round engine
//!
//! Goals:
//! - Exact chip accounting: blinds, antes, all-ins and side pots
//! - Pure state transitions; every step returns a new [`round::GameState`]
//! - Illegal player requests are corrected, never raised as errors
//! - Engine invariant violations surface as [`error::EngineError`]
//!
//! ## Quick start: play a heads-up round
//! ```
//! use holdem_round::action_checker::Action;
//! use holdem_round::player::Player;
//! use holdem_round::round::{RoundManager, Street};
//! use holdem_round::table::Table;
//!
//! let mut table = Table::new();
//! table.seats.sitdown(Player::new("uuid-a", 100.0, "alice"));
//! table.seats.sitdown(Player::new("uuid-b", 100.0, "bob"));
//! table.set_blind_positions(0, 1).unwrap();
//!
//! let manager = RoundManager::new().with_shuffle_seed(42);
//! let (state, _messages) = manager.start_new_round(1, 5.0, 0.0, &table).unwrap();
//! assert_eq!(state.street(), Street::Preflop);
//! assert_eq!(state.table().seats.players()[0].stack(), 95.0);
//! assert_eq!(state.table().seats.players()[1].stack(), 90.0);
//!
//! // the small blind folds; the big blind takes the pot
//! let (state, _messages) = manager.apply_action(&state, Action::Fold, 0.0).unwrap();
//! assert!(state.is_finished());
//! assert_eq!(state.table().seats.players()[1].stack(), 105.0);
//! ```
//!
//! ## Evaluate a hand
//! ```
//! use holdem_round::cards::parse_cards;
//! use holdem_round::evaluator::{eval_hand, Category};
//!
//! let hole = "SA HA".parse().unwrap();
//! let board = parse_cards("CK DQ HJ S3 C2").unwrap();
//! assert_eq!(eval_hand(&hole, &board).category(), Category::Pair);
//! ```

pub mod action_checker;
pub mod agents;
pub mod cards;
pub mod deck;
pub mod error;
pub mod evaluator;
pub mod game_evaluator;
pub mod hand;
pub mod message;
pub mod player;
pub mod round;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
