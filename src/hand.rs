use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("community cards are limited to {max}, got {0}", max = Board::MAX_CARDS)]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards.
///
/// ```
/// use holdem_round::hand::HoleCards;
///
/// let hole: HoleCards = "SA SK".parse().unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    /// Higher and lower hole rank values (2..=14).
    pub fn high_low_values(&self) -> (u8, u8) {
        let a = self.0.rank().value();
        let b = self.1.rank().value();
        (a.max(b), a.min(b))
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Community cards (flop, turn, river). Only grows during a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX_CARDS: usize = 5;

    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(Self::MAX_CARDS) }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX_CARDS {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= Self::MAX_CARDS
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn try_push(&mut self, card: Card) -> Result<(), HandError> {
        if self.is_full() {
            return Err(HandError::TooManyBoardCards(self.cards.len() + 1));
        }
        if self.cards.contains(&card) {
            return Err(HandError::DuplicateBoardCards);
        }
        self.cards.push(card);
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert!(matches!(HoleCards::try_new(a, a), Err(HandError::DuplicateHoleCards)));
    }

    #[test]
    fn hole_cards_need_exactly_two() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(HoleCards::from_slice(&[a]), Err(HandError::HoleCount(1)));
        assert_eq!(HoleCards::from_slice(&[]), Err(HandError::HoleCount(0)));
    }

    #[test]
    fn high_low_uses_ace_high() {
        let hole: HoleCards = "C3 HA".parse().unwrap();
        assert_eq!(hole.high_low_values(), (14, 3));
    }

    #[test]
    fn board_limits_and_dupes() {
        let mut b: Board = "C2 C3 C4 C5 C6".parse().unwrap();
        assert!(b.is_full());
        assert_eq!(
            b.try_push(Card::new(Rank::Seven, Suit::Clubs)),
            Err(HandError::TooManyBoardCards(6))
        );

        let cards = vec![Card::new(Rank::Two, Suit::Clubs), Card::new(Rank::Two, Suit::Clubs)];
        assert!(matches!(Board::try_new(cards), Err(HandError::DuplicateBoardCards)));

        let mut b = Board::new();
        b.try_push(Card::new(Rank::Two, Suit::Clubs)).unwrap();
        assert_eq!(b.try_push(Card::new(Rank::Two, Suit::Clubs)), Err(HandError::DuplicateBoardCards));
        b.clear();
        assert!(b.is_empty());
    }
}
