//! Legality checks for player action requests.
//!
//! Every function here is pure over the seat list; nothing is cached between
//! calls. Illegal requests are not errors: [`correct_action`] rewrites them.

use crate::error::EngineError;
use crate::player::{ActionHistoryEntry, Player};
use std::fmt;
use std::str::FromStr;

/// What a player may ask for when it is their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Call,
    Raise,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::Call => "call",
            Action::Raise => "raise",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionParseError {
    #[error("unknown action: '{0}'")]
    Unknown(String),
}

impl FromStr for Action {
    type Err = ActionParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(Action::Fold),
            "call" => Ok(Action::Call),
            "raise" => Ok(Action::Raise),
            _ => Err(ActionParseError::Unknown(s.to_string())),
        }
    }
}

/// Street totals a raise may bring the actor to. Both ends are `-1` when no
/// raise is possible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaiseRange {
    pub min: f64,
    pub max: f64,
}

impl RaiseRange {
    pub const UNAVAILABLE: RaiseRange = RaiseRange { min: -1.0, max: -1.0 };

    pub fn is_available(&self) -> bool {
        self.min >= 0.0 && self.max >= self.min
    }

    pub fn contains(&self, amount: f64) -> bool {
        self.is_available() && amount >= self.min && amount <= self.max
    }
}

/// Legal actions for the actor. Folding is always legal and costs nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegalActions {
    pub call_amount: f64,
    pub raise: RaiseRange,
}

impl LegalActions {
    pub const FOLD_AMOUNT: f64 = 0.0;
}

fn player_at(players: &[Player], pos: usize) -> Result<&Player, EngineError> {
    players.get(pos).ok_or(EngineError::SeatOutOfRange { seat: pos, seats: players.len() })
}

/// Highest raise-class entry this street; the first one wins ties.
fn fetch_last_raise(players: &[Player]) -> Option<&ActionHistoryEntry> {
    players
        .iter()
        .flat_map(|p| p.action_histories().iter())
        .filter(|h| h.kind.is_raise_class())
        .fold(None, |best: Option<&ActionHistoryEntry>, h| match best {
            Some(b) if b.amount >= h.amount => Some(b),
            _ => Some(h),
        })
}

/// The street total a call has to match.
pub fn agree_amount(players: &[Player]) -> f64 {
    fetch_last_raise(players).map_or(0.0, |h| h.amount)
}

/// Smallest street total a raise may bring the actor to.
pub fn min_raise_amount(players: &[Player], sb_amount: f64) -> f64 {
    fetch_last_raise(players).map_or(sb_amount * 2.0, |h| h.amount + h.add_amount)
}

/// Chips that still have to leave the stack to reach `amount` this street.
pub fn need_amount_for_action(player: &Player, amount: f64) -> f64 {
    amount - player.paid_sum()
}

/// The all-in ceiling: stack plus what is already in this street.
fn allin_amount(player: &Player) -> f64 {
    player.stack() + player.paid_sum()
}

/// ```
/// use holdem_round::action_checker::{legal_actions, RaiseRange};
/// use holdem_round::player::Player;
///
/// let mut sb = Player::new("sb", 100.0, "small blind");
/// sb.collect_bet(2.5).unwrap();
/// sb.record_blind(true, 2.5).unwrap();
/// let legal = legal_actions(&[sb], 0, 2.5).unwrap();
/// assert_eq!(legal.call_amount, 2.5);
/// assert_eq!(legal.raise, RaiseRange { min: 5.0, max: 100.0 });
/// ```
pub fn legal_actions(
    players: &[Player],
    pos: usize,
    sb_amount: f64,
) -> Result<LegalActions, EngineError> {
    let actor = player_at(players, pos)?;
    let min = min_raise_amount(players, sb_amount);
    let max = allin_amount(actor);
    let raise = if max < min { RaiseRange::UNAVAILABLE } else { RaiseRange { min, max } };
    Ok(LegalActions { call_amount: agree_amount(players), raise })
}

/// A call that reaches the ceiling, or a raise exactly to it, puts the player all in.
pub fn is_allin(player: &Player, action: Action, amount: f64) -> bool {
    match action {
        Action::Call => amount >= allin_amount(player),
        Action::Raise => amount == allin_amount(player),
        Action::Fold => false,
    }
}

pub fn is_legal(
    players: &[Player],
    pos: usize,
    sb_amount: f64,
    action: Action,
    amount: f64,
) -> Result<bool, EngineError> {
    let actor = player_at(players, pos)?;
    let short_of_money = actor.stack() < need_amount_for_action(actor, amount);
    let legal = match action {
        Action::Fold => true,
        Action::Call => !short_of_money && amount == agree_amount(players),
        Action::Raise => !short_of_money && amount >= min_raise_amount(players, sb_amount),
    };
    Ok(legal)
}

/// Rewrite a request into what the engine will apply.
///
/// All-in requests are forced to the exact ceiling; any other illegal request
/// becomes `(Fold, 0)`. Legal requests pass through unchanged.
pub fn correct_action(
    players: &[Player],
    pos: usize,
    sb_amount: f64,
    action: Action,
    amount: f64,
) -> Result<(Action, f64), EngineError> {
    let actor = player_at(players, pos)?;
    if is_allin(actor, action, amount) {
        return Ok((action, allin_amount(actor)));
    }
    if !is_legal(players, pos, sb_amount, action, amount)? {
        return Ok((Action::Fold, LegalActions::FOLD_AMOUNT));
    }
    Ok((action, amount))
}
