use crate::cards::Card;
use crate::error::EngineError;
use crate::hand::HoleCards;
use crate::round::Street;
use std::collections::BTreeMap;

/// Per-round contribution status. Only moves away from `PayTillEnd` until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum PayStatus {
    #[default]
    PayTillEnd,
    AllIn,
    Folded,
}

/// Chips committed this round (across all streets) and the player's status.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PayInfo {
    pub amount: f64,
    pub status: PayStatus,
}

impl PayInfo {
    pub fn update_by_pay(&mut self, amount: f64) {
        self.amount += amount;
    }

    pub fn update_to_fold(&mut self) {
        self.status = PayStatus::Folded;
    }

    pub fn update_to_allin(&mut self) {
        if self.status == PayStatus::PayTillEnd {
            self.status = PayStatus::AllIn;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum ActionKind {
    Fold,
    Call,
    Raise,
    SmallBlind,
    BigBlind,
    Ante,
}

impl ActionKind {
    /// Actions that set the amount a call has to match.
    pub fn is_raise_class(self) -> bool {
        matches!(self, ActionKind::Raise | ActionKind::SmallBlind | ActionKind::BigBlind)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Fold => "FOLD",
            ActionKind::Call => "CALL",
            ActionKind::Raise => "RAISE",
            ActionKind::SmallBlind => "SMALLBLIND",
            ActionKind::BigBlind => "BIGBLIND",
            ActionKind::Ante => "ANTE",
        }
    }
}

/// One ledger line in a player's street history.
///
/// `amount` is the street total the action brings the player to (for calls,
/// raises and blinds) or the ante posted; `paid` is the chips that actually
/// left the stack for this line.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionHistoryEntry {
    pub uuid: String,
    pub kind: ActionKind,
    pub amount: f64,
    pub add_amount: f64,
    pub paid: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub(crate) uuid: String,
    pub(crate) name: String,
    pub(crate) stack: f64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) action_histories: Vec<ActionHistoryEntry>,
    pub(crate) round_action_histories: BTreeMap<Street, Vec<ActionHistoryEntry>>,
    pub(crate) pay_info: PayInfo,
}

impl Player {
    pub fn new(uuid: impl Into<String>, stack: f64, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            stack,
            hole: None,
            action_histories: Vec::new(),
            round_action_histories: BTreeMap::new(),
            pay_info: PayInfo::default(),
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chips not yet committed to the pot.
    pub fn stack(&self) -> f64 {
        self.stack
    }

    pub fn hole_cards(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Ledger of the street in progress.
    pub fn action_histories(&self) -> &[ActionHistoryEntry] {
        &self.action_histories
    }

    /// Ledger archived for a finished street this round.
    pub fn street_action_histories(&self, street: Street) -> Option<&[ActionHistoryEntry]> {
        self.round_action_histories.get(&street).map(Vec::as_slice)
    }

    pub fn pay_info(&self) -> &PayInfo {
        &self.pay_info
    }

    pub fn pay_info_mut(&mut self) -> &mut PayInfo {
        &mut self.pay_info
    }

    /// Not folded.
    pub fn is_active(&self) -> bool {
        self.pay_info.status != PayStatus::Folded
    }

    /// Still expected to act (neither folded nor all-in).
    pub fn is_waiting_ask(&self) -> bool {
        self.pay_info.status == PayStatus::PayTillEnd
    }

    /// Mark a seated player as out of the next round, e.g. because they are busted.
    pub fn sit_out(&mut self) {
        self.pay_info.update_to_fold();
    }

    pub fn add_hole_cards(&mut self, cards: &[Card]) -> Result<(), EngineError> {
        if self.hole.is_some() {
            return Err(EngineError::HoleCardsAlreadyDealt(self.uuid.clone()));
        }
        if cards.len() != 2 {
            return Err(EngineError::HoleCardCount(cards.len()));
        }
        self.hole = Some(HoleCards::from_slice(cards)?);
        Ok(())
    }

    pub fn clear_hole_cards(&mut self) {
        self.hole = None;
    }

    pub fn collect_bet(&mut self, amount: f64) -> Result<(), EngineError> {
        if amount > self.stack {
            return Err(EngineError::InsufficientChips {
                uuid: self.uuid.clone(),
                amount,
                stack: self.stack,
            });
        }
        self.stack -= amount;
        Ok(())
    }

    pub fn append_chip(&mut self, amount: f64) {
        self.stack += amount;
    }

    /// Street total already put in by calls, raises and blinds. Antes do not count.
    pub fn paid_sum(&self) -> f64 {
        self.action_histories
            .iter()
            .rev()
            .find(|h| !matches!(h.kind, ActionKind::Fold | ActionKind::Ante))
            .map_or(0.0, |h| h.amount)
    }

    pub fn record_fold(&mut self) {
        self.push_history(ActionKind::Fold, 0.0, 0.0, 0.0);
    }

    pub fn record_call(&mut self, amount: f64) {
        let paid = amount - self.paid_sum();
        self.push_history(ActionKind::Call, amount, 0.0, paid);
    }

    pub fn record_raise(&mut self, amount: f64, add_amount: f64) {
        let paid = amount - self.paid_sum();
        self.push_history(ActionKind::Raise, amount, add_amount, paid);
    }

    /// Small blind posts `sb_amount`, big blind posts twice that; both raise by `sb_amount`.
    pub fn record_blind(&mut self, small: bool, sb_amount: f64) -> Result<(), EngineError> {
        if sb_amount <= 0.0 {
            return Err(EngineError::NonPositiveBlind(sb_amount));
        }
        let (kind, amount) = if small {
            (ActionKind::SmallBlind, sb_amount)
        } else {
            (ActionKind::BigBlind, sb_amount * 2.0)
        };
        self.push_history(kind, amount, sb_amount, amount);
        Ok(())
    }

    pub fn record_ante(&mut self, amount: f64) -> Result<(), EngineError> {
        if amount <= 0.0 {
            return Err(EngineError::NonPositiveAnte(amount));
        }
        self.push_history(ActionKind::Ante, amount, 0.0, amount);
        Ok(())
    }

    fn push_history(&mut self, kind: ActionKind, amount: f64, add_amount: f64, paid: f64) {
        self.action_histories.push(ActionHistoryEntry {
            uuid: self.uuid.clone(),
            kind,
            amount,
            add_amount,
            paid,
        });
    }

    /// Archive the current street ledger under `street` and start a fresh one.
    pub fn save_street_action_histories(&mut self, street: Street) {
        let finished = std::mem::take(&mut self.action_histories);
        self.round_action_histories.insert(street, finished);
    }

    pub fn clear_action_histories(&mut self) {
        self.action_histories.clear();
        self.round_action_histories.clear();
    }

    pub fn clear_pay_info(&mut self) {
        self.pay_info = PayInfo::default();
    }

    /// Chips paid this round across the current and archived streets.
    pub fn total_paid(&self) -> f64 {
        self.round_action_histories
            .values()
            .flatten()
            .chain(self.action_histories.iter())
            .map(|h| h.paid)
            .sum()
    }
}
