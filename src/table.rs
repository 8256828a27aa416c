use crate::cards::Card;
use crate::deck::Deck;
use crate::error::EngineError;
use crate::hand::Board;
use crate::player::Player;

/// Fixed-order list of players. A player's index is their seat for the whole round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Seats {
    players: Vec<Player>,
}

impl Seats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sitdown(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn count_active_players(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    pub fn count_ask_wait_players(&self) -> usize {
        self.players.iter().filter(|p| p.is_waiting_ask()).count()
    }
}

impl FromIterator<Player> for Seats {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        Self { players: iter.into_iter().collect() }
    }
}

/// Seats plus everything dealt or positioned around them.
///
/// ```
/// use holdem_round::player::Player;
/// use holdem_round::table::Table;
///
/// let mut table = Table::new();
/// for i in 0..3 {
///     table.seats.sitdown(Player::new(format!("uuid-{i}"), 100.0, format!("p{i}")));
/// }
/// table.set_blind_positions(1, 2).unwrap();
/// assert_eq!(table.next_ask_waiting_player_pos(2), Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub seats: Seats,
    pub(crate) deck: Deck,
    pub(crate) community: Board,
    pub(crate) dealer_btn: usize,
    pub(crate) sb_pos: Option<usize>,
    pub(crate) bb_pos: Option<usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deck(deck: Deck) -> Self {
        Self { deck, ..Self::default() }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn community_cards(&self) -> &[Card] {
        self.community.as_slice()
    }

    pub fn add_community_card(&mut self, card: Card) -> Result<(), EngineError> {
        self.community.try_push(card)?;
        Ok(())
    }

    pub fn dealer_btn(&self) -> usize {
        self.dealer_btn
    }

    pub fn set_dealer_btn(&mut self, pos: usize) -> Result<(), EngineError> {
        self.check_seat(pos)?;
        self.dealer_btn = pos;
        Ok(())
    }

    /// Move the button to the next active player who still has chips.
    pub fn shift_dealer_button(&mut self) {
        if let Some(pos) = self.next_active_player_pos(self.dealer_btn) {
            self.dealer_btn = pos;
        }
    }

    pub fn set_blind_positions(&mut self, sb_pos: usize, bb_pos: usize) -> Result<(), EngineError> {
        self.check_seat(sb_pos)?;
        self.check_seat(bb_pos)?;
        self.sb_pos = Some(sb_pos);
        self.bb_pos = Some(bb_pos);
        Ok(())
    }

    pub fn sb_pos(&self) -> Result<usize, EngineError> {
        self.sb_pos.ok_or(EngineError::BlindPositionsUnset)
    }

    pub fn bb_pos(&self) -> Result<usize, EngineError> {
        self.bb_pos.ok_or(EngineError::BlindPositionsUnset)
    }

    /// First seat after `start_pos` (cyclic, `start_pos` itself checked last)
    /// that is still active and holds chips.
    pub fn next_active_player_pos(&self, start_pos: usize) -> Option<usize> {
        self.find_entitled_player_pos(start_pos, |p| p.is_active() && p.stack() != 0.0)
    }

    /// First seat after `start_pos` (cyclic, `start_pos` itself checked last)
    /// that is still waiting to act.
    pub fn next_ask_waiting_player_pos(&self, start_pos: usize) -> Option<usize> {
        self.find_entitled_player_pos(start_pos, Player::is_waiting_ask)
    }

    fn find_entitled_player_pos<F>(&self, start_pos: usize, entitled: F) -> Option<usize>
    where
        F: Fn(&Player) -> bool,
    {
        let players = self.seats.players();
        let n = players.len();
        (1..=n).map(|offset| (start_pos + offset) % n).find(|&i| entitled(&players[i]))
    }

    /// Clear per-round state: deck restored, board emptied, and each player's
    /// hole cards, ledgers and pay info cleared. Stacks are kept.
    pub fn reset(&mut self) {
        self.deck.restore();
        self.community.clear();
        for p in self.seats.players_mut() {
            p.clear_hole_cards();
            p.clear_action_histories();
            p.clear_pay_info();
        }
    }

    fn check_seat(&self, seat: usize) -> Result<(), EngineError> {
        if seat >= self.seats.len() {
            return Err(EngineError::SeatOutOfRange { seat, seats: self.seats.len() });
        }
        Ok(())
    }
}
