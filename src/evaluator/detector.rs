use super::hand_analysis::HandAnalysis;
use crate::evaluator::Category;

/// Primary and secondary rank values of a matched category.
pub type MadeRanks = (u8, u8);

/// Strategy pattern: each detector recognises one category and reports its ranks.
pub trait CategoryDetector {
    fn category(&self) -> Category;
    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks>;
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks> {
        analysis.flush_straight_info.low_rank.map(|low| (low.value(), 0))
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks> {
        analysis.rank_groups.quad().map(|r| (r.value(), 0))
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks> {
        analysis.rank_groups.full_house().map(|(trips, pair)| (trips.value(), pair.value()))
    }
}

/// Ranked by the flush suit's highest card only.
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks> {
        analysis.suit_info.flush_high.map(|r| (r.value(), 0))
    }
}

/// Ranked by the lowest card of the highest run.
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks> {
        analysis.straight_info.low_rank.map(|r| (r.value(), 0))
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks> {
        analysis.rank_groups.trips().map(|r| (r.value(), 0))
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks> {
        match analysis.rank_groups.pairs() {
            [high, low, ..] => Some((high.value(), low.value())),
            _ => None,
        }
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks> {
        analysis.rank_groups.best_pair().map(|r| (r.value(), 0))
    }
}

/// Always matches; the made ranks are the hole ranks.
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<MadeRanks> {
        Some((analysis.hole_high, analysis.hole_low))
    }
}

/// Detectors in match order, strongest category first.
pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyze(hole: &str, board: &str) -> HandAnalysis {
        HandAnalysis::new(&hole.parse().unwrap(), &parse_cards(board).unwrap())
    }

    #[test]
    fn detector_order_matches_category_strength() {
        let order: Vec<Category> = DETECTORS.iter().map(|d| d.category()).collect();
        assert_eq!(order, Category::BY_STRENGTH.to_vec());
    }

    #[test]
    fn straight_flush_reports_low_rank() {
        let a = analyze("H5 H6", "H7 H8 H9 C2 D3");
        assert_eq!(StraightFlushDetector.detect(&a), Some((5, 0)));
    }

    #[test]
    fn full_house_ranks() {
        let a = analyze("SK HK", "DK CQ SQ H2 D3");
        assert_eq!(FullHouseDetector.detect(&a), Some((13, 12)));
        assert_eq!(TwoPairDetector.detect(&a), None);
    }

    #[test]
    fn two_pair_keeps_top_two() {
        let a = analyze("SA HA", "DK CK S4 H4 D9");
        assert_eq!(TwoPairDetector.detect(&a), Some((14, 13)));
    }

    #[test]
    fn flush_uses_highest_suited_card() {
        let a = analyze("DA S3", "D2 D7 D9 DJ H4");
        assert_eq!(FlushDetector.detect(&a), Some((14, 0)));
    }

    #[test]
    fn nothing_made_falls_back_to_hole_ranks() {
        let a = analyze("C9 D4", "HA SK CQ D7 H2");
        assert_eq!(OnePairDetector.detect(&a), None);
        assert_eq!(HighCardDetector.detect(&a), Some((9, 4)));
    }
}
