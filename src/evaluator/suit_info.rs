use super::straight_info::rank_mask;
use crate::cards::{Card, Rank, Suit};

/// The suit holding five or more of the cards, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub is_flush: bool,
    pub flush_suit: Option<Suit>,
    /// Highest rank among the flush suit's cards.
    pub flush_high: Option<Rank>,
    /// Rank mask of the flush suit's cards, zero without a flush.
    pub flush_mask: u16,
}

impl SuitInfo {
    pub fn detect(cards: &[Card]) -> Self {
        // with more than nine cards two suits could qualify; the higher top card wins
        let best = Suit::ALL
            .iter()
            .copied()
            .filter_map(|suit| {
                let ranks: Vec<Rank> =
                    cards.iter().filter(|c| c.suit() == suit).map(|c| c.rank()).collect();
                let high = ranks.iter().copied().max()?;
                (ranks.len() >= 5).then(|| (suit, high, rank_mask(ranks)))
            })
            .max_by_key(|&(_, high, _)| high);

        match best {
            Some((suit, high, mask)) => SuitInfo {
                is_flush: true,
                flush_suit: Some(suit),
                flush_high: Some(high),
                flush_mask: mask,
            },
            None => SuitInfo { is_flush: false, flush_suit: None, flush_high: None, flush_mask: 0 },
        }
    }
}
