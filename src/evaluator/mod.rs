pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::Card;
use crate::hand::HoleCards;
use core::cmp::Ordering;

/// Poker hand category from weakest to strongest.
///
/// Discriminants are the single-bit flags stored in a [`HandScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u16)]
pub enum Category {
    HighCard = 0,
    Pair = 1 << 0,
    TwoPair = 1 << 1,
    ThreeOfAKind = 1 << 2,
    Straight = 1 << 3,
    Flush = 1 << 4,
    FullHouse = 1 << 5,
    FourOfAKind = 1 << 6,
    StraightFlush = 1 << 7,
}

impl Category {
    /// Strongest first; this is the order hands are matched in.
    pub const BY_STRENGTH: [Category; 9] = [
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::Pair,
        Category::HighCard,
    ];

    pub const fn flag(self) -> u16 {
        self as u16
    }

    pub fn from_flag(flag: u16) -> Option<Category> {
        Self::BY_STRENGTH.iter().copied().find(|c| c.flag() == flag)
    }

    /// Names used in hand reports.
    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "HIGHCARD",
            Category::Pair => "ONEPAIR",
            Category::TwoPair => "TWOPAIR",
            Category::ThreeOfAKind => "THREECARD",
            Category::Straight => "STRAIGHT",
            Category::Flush => "FLASH",
            Category::FullHouse => "FULLHOUSE",
            Category::FourOfAKind => "FOURCARD",
            Category::StraightFlush => "STRAIGHTFLASH",
        }
    }
}

/// Packed, totally ordered hand strength. Higher is better.
///
/// Layout, most significant first:
/// `[category flag (9 bits)][primary (4)][secondary (4)][hole high (4)][hole low (4)]`.
/// Hole ranks always come from the two hole cards and only break ties within
/// the same category and made ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandScore(u32);

impl HandScore {
    const CATEGORY_SHIFT: u32 = 16;
    const PRIMARY_SHIFT: u32 = 12;
    const SECONDARY_SHIFT: u32 = 8;
    const HOLE_HIGH_SHIFT: u32 = 4;
    const NIBBLE: u32 = 0xF;
    const CATEGORY_MASK: u32 = 0x1FF;

    pub fn from_parts(
        category: Category,
        primary: u8,
        secondary: u8,
        hole_high: u8,
        hole_low: u8,
    ) -> Self {
        let nib = |v: u8| u32::from(v) & Self::NIBBLE;
        HandScore(
            (u32::from(category.flag()) & Self::CATEGORY_MASK) << Self::CATEGORY_SHIFT
                | nib(primary) << Self::PRIMARY_SHIFT
                | nib(secondary) << Self::SECONDARY_SHIFT
                | nib(hole_high) << Self::HOLE_HIGH_SHIFT
                | nib(hole_low),
        )
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn category(self) -> Category {
        let flag = (self.0 >> Self::CATEGORY_SHIFT) & Self::CATEGORY_MASK;
        // scores are only built by from_parts, so the flag is always known
        u16::try_from(flag).ok().and_then(Category::from_flag).unwrap_or(Category::HighCard)
    }

    pub const fn primary_rank(self) -> u8 {
        ((self.0 >> Self::PRIMARY_SHIFT) & Self::NIBBLE) as u8
    }

    pub const fn secondary_rank(self) -> u8 {
        ((self.0 >> Self::SECONDARY_SHIFT) & Self::NIBBLE) as u8
    }

    pub const fn hole_high_rank(self) -> u8 {
        ((self.0 >> Self::HOLE_HIGH_SHIFT) & Self::NIBBLE) as u8
    }

    pub const fn hole_low_rank(self) -> u8 {
        (self.0 & Self::NIBBLE) as u8
    }

    pub fn rank_info(self) -> HandRankInfo {
        HandRankInfo {
            category: self.category(),
            high: self.primary_rank(),
            low: self.secondary_rank(),
            hole_high: self.hole_high_rank(),
            hole_low: self.hole_low_rank(),
        }
    }
}

/// Decomposed score, as revealed at showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandRankInfo {
    pub category: Category,
    pub high: u8,
    pub low: u8,
    pub hole_high: u8,
    pub hole_low: u8,
}

/// Hand-evaluation strategy. Implementations must be pure: the same cards
/// always give the same score.
pub trait HandEvaluator {
    fn eval_hand(&self, hole: &HoleCards, community: &[Card]) -> HandScore;
}

/// The default evaluator: [`eval_hand`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn eval_hand(&self, hole: &HoleCards, community: &[Card]) -> HandScore {
        eval_hand(hole, community)
    }
}

/// Score two hole cards plus up to five community cards.
///
/// Categories are tried strongest first. Straights count the ace as high only.
///
/// ```
/// use holdem_round::cards::parse_cards;
/// use holdem_round::evaluator::{eval_hand, Category};
/// use holdem_round::hand::HoleCards;
///
/// let hole: HoleCards = "SA HA".parse().unwrap();
/// let board = parse_cards("CK DQ HJ S3 C2").unwrap();
/// let score = eval_hand(&hole, &board);
/// assert_eq!(score.category(), Category::Pair);
/// assert_eq!(score.primary_rank(), 14);
/// ```
pub fn eval_hand(hole: &HoleCards, community: &[Card]) -> HandScore {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(hole, community);
    let (hole_high, hole_low) = hole.high_low_values();
    for detector in DETECTORS.iter() {
        if let Some((primary, secondary)) = detector.detect(&analysis) {
            return HandScore::from_parts(
                detector.category(),
                primary,
                secondary,
                hole_high,
                hole_low,
            );
        }
    }
    // the high-card detector always matches; keep a total function anyway
    HandScore::from_parts(Category::HighCard, hole_high, hole_low, hole_high, hole_low)
}

pub fn gen_hand_rank_info(hole: &HoleCards, community: &[Card]) -> HandRankInfo {
    eval_hand(hole, community).rank_info()
}

/// Compare two hands on a shared board.
pub fn compare_hands(a: &HoleCards, b: &HoleCards, community: &[Card]) -> Ordering {
    eval_hand(a, community).cmp(&eval_hand(b, community))
}
