//! The per-round state machine.
//!
//! ```text
//! Preflop -> Flop -> Turn -> River -> Showdown -> Finished
//! ```
//!
//! [`RoundManager::start_new_round`] and [`RoundManager::apply_action`] never
//! mutate their input: each returns a fresh [`GameState`] together with the
//! notifications the transition produced, in delivery order.

use crate::action_checker::{self, Action};
use crate::deck::Deck;
use crate::error::EngineError;
use crate::evaluator::{HandEvaluator, StandardEvaluator};
use crate::game_evaluator::GameEvaluator;
use crate::message::{Envelope, Message};
use crate::player::{ActionKind, PayStatus, Player};
use crate::table::Table;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Finished,
}

impl Street {
    /// `Finished` is terminal.
    pub const fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown | Street::Finished => Street::Finished,
        }
    }

    /// Community cards dealt as the street opens.
    pub const fn community_cards_dealt(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            _ => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
            Street::Finished => "finished",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of one round in progress. Cloning yields a fully independent copy.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) round_count: u32,
    pub(crate) small_blind_amount: f64,
    pub(crate) street: Street,
    pub(crate) next_player: Option<usize>,
    pub(crate) table: Table,
}

impl GameState {
    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    pub fn small_blind_amount(&self) -> f64 {
        self.small_blind_amount
    }

    pub fn street(&self) -> Street {
        self.street
    }

    /// Seat expected to act next, if any.
    pub fn next_player(&self) -> Option<usize> {
        self.next_player
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.next_player.and_then(|pos| self.table.seats.players().get(pos))
    }

    pub fn is_finished(&self) -> bool {
        self.street == Street::Finished
    }
}

/// Drives a single round. Holds configuration only; every call works on the
/// state it is given.
#[derive(Debug, Clone, Default)]
pub struct RoundManager<E = StandardEvaluator> {
    game_evaluator: GameEvaluator<E>,
    shuffle_seed: Option<u64>,
}

impl RoundManager<StandardEvaluator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: HandEvaluator> RoundManager<E> {
    /// Judge showdowns with a custom hand evaluator.
    pub fn with_evaluator(evaluator: E) -> Self {
        Self { game_evaluator: GameEvaluator::with_evaluator(evaluator), shuffle_seed: None }
    }

    /// Shuffle every round's deck reproducibly; the round count is mixed into the seed.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn game_evaluator(&self) -> &GameEvaluator<E> {
        &self.game_evaluator
    }

    /// Post antes and blinds, deal hole cards and open the preflop street.
    ///
    /// The table must have its blind positions set and an undrawn deck.
    pub fn start_new_round(
        &self,
        round_count: u32,
        small_blind_amount: f64,
        ante: f64,
        table: &Table,
    ) -> Result<(GameState, Vec<Envelope>), EngineError> {
        let mut state = GameState {
            round_count,
            small_blind_amount,
            street: Street::Preflop,
            next_player: None,
            table: table.clone(),
        };
        info!(
            "round {round_count} starting: {} seats, small blind {small_blind_amount}, ante {ante}",
            state.table.seats.len()
        );

        self.shuffle_deck(&mut state.table.deck, round_count)?;
        if ante != 0.0 {
            collect_ante(&mut state.table, ante)?;
        }
        collect_blinds(&mut state.table, small_blind_amount)?;
        deal_hole_cards(&mut state.table)?;

        let mut messages = round_start_messages(&state);
        messages.extend(self.start_street(&mut state)?);
        Ok((state, messages))
    }

    /// Apply the next player's requested action.
    ///
    /// Illegal requests are corrected before anything moves (see
    /// [`action_checker::correct_action`]); the `GameUpdate` reports the
    /// action that was actually applied.
    pub fn apply_action(
        &self,
        state: &GameState,
        action: Action,
        amount: f64,
    ) -> Result<(GameState, Vec<Envelope>), EngineError> {
        if state.is_finished() {
            return Err(EngineError::RoundFinished);
        }
        let pos = state.next_player.ok_or(EngineError::NoPlayerToAct)?;
        let mut state = state.clone();

        let (action, amount) = accept_action(&mut state, pos, action, amount)?;
        let actor_uuid = player_at(&state.table, pos)?.uuid().to_string();
        debug!("{} {actor_uuid} {action} {amount}", state.street);
        let mut messages = vec![Envelope::broadcast(Message::GameUpdate {
            actor_uuid,
            action,
            amount,
            state: state.clone(),
        })];

        if is_everyone_agreed(&state)? {
            let street = state.street;
            for player in state.table.seats.players_mut() {
                player.save_street_action_histories(street);
            }
            state.street = street.next();
            messages.extend(self.start_street(&mut state)?);
        } else {
            state.next_player = state.table.next_ask_waiting_player_pos(pos);
            messages.push(ask_message(&state)?);
        }
        Ok((state, messages))
    }

    fn shuffle_deck(&self, deck: &mut Deck, round_count: u32) -> Result<(), EngineError> {
        match self.shuffle_seed {
            Some(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(round_count)));
                deck.shuffle_with(&mut rng)?;
            }
            None => deck.shuffle()?,
        }
        Ok(())
    }

    fn start_street(&self, state: &mut GameState) -> Result<Vec<Envelope>, EngineError> {
        state.next_player = first_to_act(state)?;
        match state.street {
            Street::Preflop => {
                // skip past the two blind posters
                for _ in 0..2 {
                    state.next_player =
                        state.next_player.and_then(|p| state.table.next_ask_waiting_player_pos(p));
                }
                self.forward_street(state)
            }
            Street::Flop | Street::Turn | Street::River => {
                deal_community_cards(&mut state.table, state.street.community_cards_dealt())?;
                self.forward_street(state)
            }
            Street::Showdown => self.showdown(state),
            Street::Finished => Ok(Vec::new()),
        }
    }

    fn forward_street(&self, state: &mut GameState) -> Result<Vec<Envelope>, EngineError> {
        let mut messages = Vec::new();
        if state.table.seats.count_active_players() != 1 {
            messages.push(Envelope::broadcast(Message::StreetStart {
                street: state.street,
                state: state.clone(),
            }));
        }
        if state.table.seats.count_ask_wait_players() <= 1 {
            debug!("nobody left to bet on the {}, dealing on", state.street);
            state.street = state.street.next();
            messages.extend(self.start_street(state)?);
        } else {
            debug!("{} starts with seat {:?}", state.street, state.next_player);
            messages.push(ask_message(state)?);
        }
        Ok(messages)
    }

    fn showdown(&self, state: &mut GameState) -> Result<Vec<Envelope>, EngineError> {
        let judgement = self.game_evaluator.judge(&state.table)?;
        for (player, prize) in state.table.seats.players_mut().iter_mut().zip(&judgement.prize_map) {
            player.append_chip(*prize);
        }
        info!(
            "round {} finished: winners {:?}, prizes {:?}",
            state.round_count, judgement.winners, judgement.prize_map
        );
        let result = Message::RoundResult {
            round_count: state.round_count,
            winners: judgement.winners,
            hand_info: judgement.hand_info,
            prize_map: judgement.prize_map,
            state: state.clone(),
        };
        state.table.reset();
        state.street = Street::Finished;
        state.next_player = None;
        Ok(vec![Envelope::broadcast(result)])
    }
}

fn player_at(table: &Table, pos: usize) -> Result<&Player, EngineError> {
    let seats = table.seats.len();
    table.seats.players().get(pos).ok_or(EngineError::SeatOutOfRange { seat: pos, seats })
}

fn player_at_mut(table: &mut Table, pos: usize) -> Result<&mut Player, EngineError> {
    let seats = table.seats.len();
    table.seats.players_mut().get_mut(pos).ok_or(EngineError::SeatOutOfRange { seat: pos, seats })
}

fn collect_ante(table: &mut Table, ante: f64) -> Result<(), EngineError> {
    for player in table.seats.players_mut().iter_mut().filter(|p| p.is_active()) {
        player.collect_bet(ante)?;
        player.pay_info.update_by_pay(ante);
        player.record_ante(ante)?;
    }
    Ok(())
}

fn collect_blinds(table: &mut Table, sb_amount: f64) -> Result<(), EngineError> {
    let sb_pos = table.sb_pos()?;
    let bb_pos = table.bb_pos()?;
    for (pos, small) in [(sb_pos, true), (bb_pos, false)] {
        let amount = if small { sb_amount } else { sb_amount * 2.0 };
        let player = player_at_mut(table, pos)?;
        player.collect_bet(amount)?;
        player.record_blind(small, sb_amount)?;
        player.pay_info.update_by_pay(amount);
    }
    Ok(())
}

fn deal_hole_cards(table: &mut Table) -> Result<(), EngineError> {
    let Table { seats, deck, .. } = table;
    for player in seats.players_mut() {
        let left = deck.size();
        let cards = deck.draw_n(2).ok_or(EngineError::DeckExhausted { wanted: 2, left })?;
        player.add_hole_cards(&cards)?;
    }
    Ok(())
}

fn deal_community_cards(table: &mut Table, count: usize) -> Result<(), EngineError> {
    let left = table.deck.size();
    let cards = table.deck.draw_n(count).ok_or(EngineError::DeckExhausted { wanted: count, left })?;
    for card in cards {
        table.add_community_card(card)?;
    }
    Ok(())
}

fn round_start_messages(state: &GameState) -> Vec<Envelope> {
    let seats = &state.table.seats;
    seats
        .players()
        .iter()
        .enumerate()
        .map(|(seat_index, player)| {
            Envelope::to_player(
                player.uuid(),
                Message::RoundStart {
                    round_count: state.round_count,
                    seat_index,
                    hole_cards: player.hole_cards(),
                    seats: seats.clone(),
                },
            )
        })
        .collect()
}

/// Streets open with the first waiting seat from the small blind on, except
/// that heads-up the big blind opens every street after the flop is dealt.
fn first_to_act(state: &GameState) -> Result<Option<usize>, EngineError> {
    let table = &state.table;
    let seats = table.seats.len();
    if seats == 0 {
        return Ok(None);
    }
    let postflop = matches!(state.street, Street::Flop | Street::Turn | Street::River);
    if seats == 2 && postflop {
        let bb_pos = table.bb_pos()?;
        if player_at(table, bb_pos)?.is_waiting_ask() {
            return Ok(Some(bb_pos));
        }
        return Ok(table.next_ask_waiting_player_pos(bb_pos));
    }
    let sb_pos = table.sb_pos()?;
    Ok(table.next_ask_waiting_player_pos((sb_pos + seats - 1) % seats))
}

fn ask_message(state: &GameState) -> Result<Envelope, EngineError> {
    let pos = state.next_player.ok_or(EngineError::NoPlayerToAct)?;
    let player = player_at(&state.table, pos)?;
    let legal_actions =
        action_checker::legal_actions(state.table.seats.players(), pos, state.small_blind_amount)?;
    Ok(Envelope::to_player(
        player.uuid(),
        Message::Ask { player_uuid: player.uuid().to_string(), legal_actions, state: state.clone() },
    ))
}

/// Correct the request, move the chips and write the ledger line. Returns the
/// action as applied.
fn accept_action(
    state: &mut GameState,
    pos: usize,
    requested: Action,
    requested_amount: f64,
) -> Result<(Action, f64), EngineError> {
    let sb_amount = state.small_blind_amount;
    let players = state.table.seats.players();
    let (action, amount) =
        action_checker::correct_action(players, pos, sb_amount, requested, requested_amount)?;
    if (action, amount) != (requested, requested_amount) {
        warn!("seat {pos} asked for {requested} {requested_amount}, applying {action} {amount}");
    }
    let allin = action_checker::is_allin(player_at(&state.table, pos)?, action, amount);
    let agree_amount = action_checker::agree_amount(players);

    let player = player_at_mut(&mut state.table, pos)?;
    if allin {
        player.pay_info.update_to_allin();
    }
    match action {
        Action::Call => {
            pay(player, amount)?;
            player.record_call(amount);
        }
        Action::Raise => {
            pay(player, amount)?;
            player.record_raise(amount, amount - agree_amount);
        }
        Action::Fold => {
            player.record_fold();
            player.pay_info.update_to_fold();
        }
    }
    Ok((action, amount))
}

fn pay(player: &mut Player, street_total: f64) -> Result<(), EngineError> {
    let need = action_checker::need_amount_for_action(player, street_total);
    player.collect_bet(need)?;
    player.pay_info.update_by_pay(need);
    Ok(())
}

fn is_everyone_agreed(state: &GameState) -> Result<bool, EngineError> {
    let seats = &state.table.seats;
    let active = seats.count_active_players();
    if active == 0 {
        return Err(EngineError::NoActivePlayers);
    }
    let players = seats.players();
    let max_pay = players.iter().map(Player::paid_sum).fold(0.0, f64::max);
    let preflop = state.street == Street::Preflop;

    let everyone_agreed = players.iter().all(|p| is_agreed(max_pay, p, preflop));
    let lonely_player = active == 1;
    let no_need_to_ask = seats.count_ask_wait_players() == 1
        && state
            .next_player
            .and_then(|pos| state.table.next_ask_waiting_player_pos(pos))
            .and_then(|pos| players.get(pos))
            .is_some_and(|p| p.is_waiting_ask() && p.paid_sum() == max_pay);
    Ok(everyone_agreed || lonely_player || no_need_to_ask)
}

fn is_agreed(max_pay: f64, player: &Player, preflop: bool) -> bool {
    if matches!(player.pay_info().status, PayStatus::Folded | PayStatus::AllIn) {
        return true;
    }
    // the big blind has to be asked once even when nobody raised
    if preflop && only_posted_big_blind(player) {
        return false;
    }
    player.paid_sum() == max_pay && !player.action_histories().is_empty()
}

fn only_posted_big_blind(player: &Player) -> bool {
    let mut betting = player.action_histories().iter().filter(|h| h.kind != ActionKind::Ante);
    matches!(
        (betting.next(), betting.next()),
        (Some(first), None) if first.kind == ActionKind::BigBlind
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with(entries: &[(ActionKind, f64)]) -> Player {
        let mut p = Player::new("p", 100.0, "p");
        for &(kind, amount) in entries {
            match kind {
                ActionKind::Ante => p.record_ante(amount).unwrap(),
                ActionKind::BigBlind => p.record_blind(false, amount / 2.0).unwrap(),
                ActionKind::SmallBlind => p.record_blind(true, amount).unwrap(),
                ActionKind::Call => p.record_call(amount),
                _ => unreachable!(),
            }
        }
        p
    }

    #[test]
    fn streets_advance_to_a_terminal_state() {
        let mut street = Street::Preflop;
        let mut seen = vec![street];
        while street != Street::Finished {
            street = street.next();
            seen.push(street);
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(Street::Finished.next(), Street::Finished);
        assert!(Street::Flop < Street::River);
    }

    #[test]
    fn community_cards_per_street() {
        let dealt: usize = [Street::Preflop, Street::Flop, Street::Turn, Street::River, Street::Showdown]
            .iter()
            .map(|s| s.community_cards_dealt())
            .sum();
        assert_eq!(dealt, 5);
    }

    #[test]
    fn big_blind_must_act_once_preflop() {
        let bb = player_with(&[(ActionKind::BigBlind, 10.0)]);
        assert!(!is_agreed(10.0, &bb, true));
        assert!(is_agreed(10.0, &bb, false));

        let with_ante = player_with(&[(ActionKind::Ante, 1.0), (ActionKind::BigBlind, 10.0)]);
        assert!(!is_agreed(10.0, &with_ante, true));

        let checked = player_with(&[(ActionKind::BigBlind, 10.0), (ActionKind::Call, 10.0)]);
        assert!(is_agreed(10.0, &checked, true));
    }

    #[test]
    fn players_who_have_not_acted_are_not_agreed() {
        let idle = player_with(&[]);
        assert!(!is_agreed(0.0, &idle, false));
        let mut folded = player_with(&[]);
        folded.pay_info.update_to_fold();
        assert!(is_agreed(10.0, &folded, false));
    }

    #[test]
    fn seeded_managers_shuffle_identically() {
        let manager = RoundManager::new().with_shuffle_seed(7);
        let mut a = Deck::new();
        let mut b = Deck::new();
        manager.shuffle_deck(&mut a, 3).unwrap();
        manager.shuffle_deck(&mut b, 3).unwrap();
        assert_eq!(a.remaining(), b.remaining());
        assert_ne!(a.remaining(), Deck::new().remaining());
    }
}
