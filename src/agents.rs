//! Agents: the players behind the seats.
//!
//! A [`PlayerAgent`] answers `Ask` notifications with an action and may watch
//! every other notification through its `receive_*` hooks. [`AgentTable`]
//! routes a round's envelopes to the agents by uuid and feeds their answers
//! back into a [`RoundManager`] until the round finishes.

use crate::action_checker::{Action, LegalActions};
use crate::error::EngineError;
use crate::evaluator::HandEvaluator;
use crate::game_evaluator::HandInfo;
use crate::hand::HoleCards;
use crate::message::{Envelope, GameConfig, Message};
use crate::round::{GameState, RoundManager, Street};
use crate::table::{Seats, Table};
use core::fmt;

/// A decision maker for one seat.
pub trait PlayerAgent {
    /// Choose an action when asked. Illegal answers are corrected by the engine.
    fn declare_action(
        &mut self,
        legal_actions: &LegalActions,
        hole_cards: Option<HoleCards>,
        state: &GameState,
    ) -> (Action, f64);

    fn receive_game_start(&mut self, _config: &GameConfig, _seats: &Seats) {}

    fn receive_round_start(
        &mut self,
        _round_count: u32,
        _seat_index: usize,
        _hole_cards: Option<HoleCards>,
        _seats: &Seats,
    ) {
    }

    fn receive_street_start(&mut self, _street: Street, _state: &GameState) {}

    fn receive_game_update(
        &mut self,
        _actor_uuid: &str,
        _action: Action,
        _amount: f64,
        _state: &GameState,
    ) {
    }

    fn receive_round_result(
        &mut self,
        _winners: &[usize],
        _hand_info: &[HandInfo],
        _state: &GameState,
    ) {
    }

    fn receive_game_result(&mut self, _seats: &Seats, _config: &GameConfig) {}
}

/// Hand one message to an agent. Returns the agent's answer for `Ask`.
pub fn dispatch(message: &Message, agent: &mut dyn PlayerAgent) -> Option<(Action, f64)> {
    match message {
        Message::GameStart { config, seats } => agent.receive_game_start(config, seats),
        Message::RoundStart { round_count, seat_index, hole_cards, seats } => {
            agent.receive_round_start(*round_count, *seat_index, *hole_cards, seats)
        }
        Message::StreetStart { street, state } => agent.receive_street_start(*street, state),
        Message::Ask { player_uuid, legal_actions, state } => {
            let hole_cards = state
                .table()
                .seats
                .players()
                .iter()
                .find(|p| p.uuid() == player_uuid)
                .and_then(|p| p.hole_cards());
            return Some(agent.declare_action(legal_actions, hole_cards, state));
        }
        Message::GameUpdate { actor_uuid, action, amount, state } => {
            agent.receive_game_update(actor_uuid, *action, *amount, state)
        }
        Message::RoundResult { winners, hand_info, state, .. } => {
            agent.receive_round_result(winners, hand_info, state)
        }
        Message::GameResult { seats, config } => agent.receive_game_result(seats, config),
    }
    None
}

/// Agents keyed by player uuid.
#[derive(Default)]
pub struct AgentTable {
    agents: Vec<(String, Box<dyn PlayerAgent>)>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let uuids: Vec<&str> = self.agents.iter().map(|(uuid, _)| uuid.as_str()).collect();
        f.debug_struct("AgentTable").field("agents", &uuids).finish()
    }
}

impl AgentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `agent` to the player `uuid`, replacing any previous agent.
    pub fn register(&mut self, uuid: impl Into<String>, agent: Box<dyn PlayerAgent>) {
        let uuid = uuid.into();
        self.agents.retain(|(u, _)| *u != uuid);
        self.agents.push((uuid, agent));
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Deliver envelopes in order. Returns the answer to the last `Ask`
    /// delivered, if its addressee has an agent.
    pub fn deliver(&mut self, envelopes: &[Envelope]) -> Option<(Action, f64)> {
        let mut answer = None;
        for envelope in envelopes {
            for (uuid, agent) in self.agents.iter_mut() {
                if envelope.is_for(uuid) {
                    if let Some(reply) = dispatch(&envelope.message, agent.as_mut()) {
                        answer = Some(reply);
                    }
                }
            }
        }
        answer
    }

    /// Play one round to the end. A seat without an agent folds when asked.
    pub fn play_round<E: HandEvaluator>(
        &mut self,
        manager: &RoundManager<E>,
        round_count: u32,
        small_blind_amount: f64,
        ante: f64,
        table: &Table,
    ) -> Result<GameState, EngineError> {
        let (mut state, mut messages) =
            manager.start_new_round(round_count, small_blind_amount, ante, table)?;
        while !state.is_finished() {
            let (action, amount) = self.deliver(&messages).unwrap_or((Action::Fold, 0.0));
            let (next, next_messages) = manager.apply_action(&state, action, amount)?;
            state = next;
            messages = next_messages;
        }
        self.deliver(&messages);
        Ok(state)
    }
}
