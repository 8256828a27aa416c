use crate::cards::Rank;

/// The highest five-rank run in a set of ranks, identified by its lowest rank.
///
/// Aces only count high, so A-2-3-4-5 is not a straight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub low_rank: Option<Rank>,
}

impl StraightInfo {
    const RUN: u16 = 0b1_1111;

    /// `rank_mask` has bit `r` set for every rank value `r` present.
    pub fn detect(rank_mask: u16) -> Self {
        let low_rank = (Rank::Two.value()..=Rank::Ten.value())
            .rev()
            .find(|&low| (rank_mask >> low) & Self::RUN == Self::RUN)
            .and_then(Rank::from_value);
        StraightInfo { is_straight: low_rank.is_some(), low_rank }
    }
}

pub fn rank_mask<I: IntoIterator<Item = Rank>>(ranks: I) -> u16 {
    ranks.into_iter().fold(0u16, |mask, r| mask | (1u16 << r.value()))
}
