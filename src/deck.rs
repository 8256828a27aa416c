use crate::cards::{Card, CardParseError};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("cannot shuffle after {0} card(s) were drawn")]
    ShuffleAfterDraw(usize),
    #[error("invalid card id in deck: {0}")]
    Card(#[from] CardParseError),
    #[error("malformed deck snapshot: '{0}'")]
    Malformed(String),
}

/// A 52-card deck with a draw pointer.
///
/// Cards are drawn front to back; `size() == cards.len() - drawn` always holds.
/// A cheat deck replays a fixed id sequence instead of a shuffled permutation.
///
/// ```
/// use holdem_round::deck::Deck;
///
/// let mut deck = Deck::new();
/// assert_eq!(deck.size(), 52);
/// deck.draw_n(2).unwrap();
/// assert_eq!(deck.size(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    drawn: usize,
    cheat: bool,
    cheat_card_ids: Vec<u8>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Standard deck in id order (clubs ace first).
    pub fn new() -> Self {
        Self { cards: standard_cards(), drawn: 0, cheat: false, cheat_card_ids: Vec::new() }
    }

    /// A deck that deals `ids` in the given order and ignores shuffles.
    pub fn cheat(ids: &[u8]) -> Result<Self, DeckError> {
        let cards = cards_from_ids(ids)?;
        Ok(Self { cards, drawn: 0, cheat: true, cheat_card_ids: ids.to_vec() })
    }

    pub fn is_cheat(&self) -> bool {
        self.cheat
    }

    pub fn cheat_card_ids(&self) -> &[u8] {
        &self.cheat_card_ids
    }

    /// Number of cards still available to draw.
    pub fn size(&self) -> usize {
        self.cards.len() - self.drawn
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Cards not yet drawn, in draw order.
    pub fn remaining(&self) -> &[Card] {
        &self.cards[self.drawn..]
    }

    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.get(self.drawn).copied()?;
        self.drawn += 1;
        Some(card)
    }

    /// Draw exactly `n` cards, or none at all if fewer remain.
    pub fn draw_n(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.size() < n {
            return None;
        }
        let out = self.cards[self.drawn..self.drawn + n].to_vec();
        self.drawn += n;
        Some(out)
    }

    /// Shuffle from the thread RNG. No-op for cheat decks.
    pub fn shuffle(&mut self) -> Result<(), DeckError> {
        self.shuffle_with(&mut rand::rng())
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) -> Result<(), DeckError> {
        self.shuffle_with(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DeckError> {
        if self.drawn > 0 {
            return Err(DeckError::ShuffleAfterDraw(self.drawn));
        }
        if !self.cheat {
            self.cards.shuffle(rng);
        }
        Ok(())
    }

    /// Put every card back: standard order, or the cheat sequence.
    pub fn restore(&mut self) {
        self.cards = if self.cheat {
            // ids were validated when the cheat deck was built
            self.cheat_card_ids.iter().filter_map(|&id| Card::from_id(id).ok()).collect()
        } else {
            standard_cards()
        };
        self.drawn = 0;
    }

    pub fn serialize(&self) -> DeckSnapshot {
        DeckSnapshot {
            cheat: self.cheat,
            cheat_card_ids: self.cheat_card_ids.clone(),
            remaining_ids: self.remaining().iter().map(|c| c.id()).collect(),
        }
    }

    pub fn deserialize(snapshot: &DeckSnapshot) -> Result<Self, DeckError> {
        // validate the cheat sequence too; restore() relies on it
        cards_from_ids(&snapshot.cheat_card_ids)?;
        Ok(Self {
            cards: cards_from_ids(&snapshot.remaining_ids)?,
            drawn: 0,
            cheat: snapshot.cheat,
            cheat_card_ids: snapshot.cheat_card_ids.clone(),
        })
    }
}

fn standard_cards() -> Vec<Card> {
    (Card::MIN_ID..=Card::MAX_ID).filter_map(|id| Card::from_id(id).ok()).collect()
}

fn cards_from_ids(ids: &[u8]) -> Result<Vec<Card>, DeckError> {
    ids.iter().map(|&id| Card::from_id(id).map_err(DeckError::from)).collect()
}

/// Persisted deck: `(cheat flag, cheat id sequence, remaining id sequence)`.
///
/// Text form is `<0|1>;<ids>;<ids>` with comma-separated ids.
///
/// ```
/// use holdem_round::deck::{Deck, DeckSnapshot};
///
/// let mut deck = Deck::cheat(&[12, 15, 2]).unwrap();
/// deck.draw();
/// let text = deck.serialize().to_string();
/// assert_eq!(text, "1;12,15,2;15,2");
/// let restored = Deck::deserialize(&text.parse::<DeckSnapshot>().unwrap()).unwrap();
/// assert_eq!(restored.serialize(), deck.serialize());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSnapshot {
    pub cheat: bool,
    pub cheat_card_ids: Vec<u8>,
    pub remaining_ids: Vec<u8>,
}

fn write_ids(f: &mut fmt::Formatter<'_>, ids: &[u8]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{id}")?;
    }
    Ok(())
}

fn parse_ids(part: &str, whole: &str) -> Result<Vec<u8>, DeckError> {
    part.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u8>().map_err(|_| DeckError::Malformed(whole.to_string())))
        .collect()
}

impl fmt::Display for DeckSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};", u8::from(self.cheat))?;
        write_ids(f, &self.cheat_card_ids)?;
        f.write_str(";")?;
        write_ids(f, &self.remaining_ids)
    }
}

impl FromStr for DeckSnapshot {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(';').collect();
        let [flag, cheat_ids, remaining] = parts.as_slice() else {
            return Err(DeckError::Malformed(s.to_string()));
        };
        let cheat = match flag.trim() {
            "0" => false,
            "1" => true,
            _ => return Err(DeckError::Malformed(s.to_string())),
        };
        Ok(DeckSnapshot {
            cheat,
            cheat_card_ids: parse_ids(cheat_ids, s)?,
            remaining_ids: parse_ids(remaining, s)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let d = Deck::new();
        assert_eq!(d.size(), 52);
        let mut ids: Vec<u8> = d.remaining().iter().map(|c| c.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::new();
        let mut d2 = Deck::new();
        d1.shuffle_seeded(42).unwrap();
        d2.shuffle_seeded(42).unwrap();
        assert_eq!(d1.remaining(), d2.remaining());
        assert_ne!(d1.remaining(), Deck::new().remaining());
    }

    #[test]
    fn shuffle_after_draw_is_rejected() {
        let mut d = Deck::new();
        d.draw().unwrap();
        assert_eq!(d.shuffle_seeded(1), Err(DeckError::ShuffleAfterDraw(1)));
    }

    #[test]
    fn draw_advances_pointer() {
        let mut d = Deck::new();
        d.shuffle_seeded(7).unwrap();
        let c1 = d.draw().unwrap();
        let c2 = d.draw().unwrap();
        assert_ne!(c1, c2);
        assert_eq!(d.size(), 50);
        assert_eq!(d.draw_n(5).unwrap().len(), 5);
        assert_eq!(d.size(), 45);
        assert!(d.draw_n(46).is_none());
        assert_eq!(d.size(), 45);
    }

    #[test]
    fn cheat_deck_replays_sequence_and_ignores_shuffle() {
        let mut d = Deck::cheat(&[40, 1, 27]).unwrap();
        d.shuffle_seeded(99).unwrap();
        assert_eq!(d.draw(), Some(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!(d.draw(), Some(Card::new(Rank::Ace, Suit::Clubs)));
        assert_eq!(d.draw(), Some(Card::new(Rank::Ace, Suit::Hearts)));
        assert_eq!(d.draw(), None);
        d.restore();
        assert_eq!(d.size(), 3);
        assert_eq!(d.draw(), Some(Card::new(Rank::Ace, Suit::Spades)));
    }

    #[test]
    fn restore_rebuilds_standard_deck() {
        let mut d = Deck::new();
        d.shuffle_seeded(3).unwrap();
        d.draw_n(9).unwrap();
        d.restore();
        assert_eq!(d.size(), 52);
        assert_eq!(d, Deck::new());
    }

    #[test]
    fn cheat_ids_are_validated() {
        assert!(matches!(Deck::cheat(&[0]), Err(DeckError::Card(_))));
    }

    #[test]
    fn snapshot_text_rejects_garbage() {
        assert!("1;2;3;4".parse::<DeckSnapshot>().is_err());
        assert!("x;;".parse::<DeckSnapshot>().is_err());
        assert!("0;;a".parse::<DeckSnapshot>().is_err());
        let empty: DeckSnapshot = "0;;".parse().unwrap();
        assert!(empty.remaining_ids.is_empty());
    }
}
