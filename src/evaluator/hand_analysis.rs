use super::rank_groups::RankGroups;
use super::straight_info::{rank_mask, StraightInfo};
use super::suit_info::SuitInfo;
use crate::cards::Card;
use crate::hand::HoleCards;

/// Pre-computed facts about hole cards plus board, shared by every detector.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub hole_high: u8,
    pub hole_low: u8,
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
    /// Straight search restricted to the flush suit.
    pub flush_straight_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(hole: &HoleCards, community: &[Card]) -> Self {
        let cards: Vec<Card> = hole.as_array().into_iter().chain(community.iter().copied()).collect();

        let mut rank_counts = [0u8; 15];
        for card in &cards {
            rank_counts[card.rank().value() as usize] += 1;
        }

        let suit_info = SuitInfo::detect(&cards);
        let (hole_high, hole_low) = hole.high_low_values();
        Self {
            hole_high,
            hole_low,
            rank_groups: RankGroups::from_counts(&rank_counts),
            straight_info: StraightInfo::detect(rank_mask(cards.iter().map(|c| c.rank()))),
            flush_straight_info: StraightInfo::detect(suit_info.flush_mask),
            suit_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Rank, Suit};

    fn analyze(hole: &str, board: &str) -> HandAnalysis {
        HandAnalysis::new(&hole.parse().unwrap(), &parse_cards(board).unwrap())
    }

    #[test]
    fn flush_and_straight_are_tracked_separately() {
        // straight 5..9 across suits, flush in hearts without a straight
        let a = analyze("H5 C6", "H7 D8 H9 HK H2");
        assert!(a.straight_info.is_straight);
        assert_eq!(a.straight_info.low_rank, Some(Rank::Five));
        assert_eq!(a.suit_info.flush_suit, Some(Suit::Hearts));
        assert!(!a.flush_straight_info.is_straight);
    }

    #[test]
    fn straight_flush_inside_the_suit() {
        let a = analyze("S9 ST", "SJ SQ SK C2 D2");
        assert_eq!(a.flush_straight_info.low_rank, Some(Rank::Nine));
        assert_eq!(a.rank_groups.pairs(), &[Rank::Two]);
    }

    #[test]
    fn hole_ranks_are_ordered() {
        let a = analyze("C3 SA", "");
        assert_eq!((a.hole_high, a.hole_low), (14, 3));
        assert!(!a.suit_info.is_flush);
    }
}
