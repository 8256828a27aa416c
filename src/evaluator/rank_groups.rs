use crate::cards::Rank;

/// Ranks grouped by multiplicity, each list ordered high to low.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    quads: Vec<Rank>,
    trips: Vec<Rank>,
    pairs: Vec<Rank>,
}

impl RankGroups {
    /// `counts` is indexed by rank value (2..=14).
    pub fn from_counts(counts: &[u8; 15]) -> Self {
        let mut groups = RankGroups { quads: Vec::new(), trips: Vec::new(), pairs: Vec::new() };
        for rank in Rank::ALL.iter().rev().copied() {
            match counts[rank.value() as usize] {
                0 | 1 => {}
                2 => groups.pairs.push(rank),
                3 => groups.trips.push(rank),
                _ => groups.quads.push(rank),
            }
        }
        groups
    }

    pub fn quad(&self) -> Option<Rank> {
        self.quads.first().copied()
    }

    /// Highest rank seen at least three times.
    pub fn trips(&self) -> Option<Rank> {
        self.quads.first().or(self.trips.first()).copied()
    }

    /// Ranks seen exactly twice.
    pub fn pairs(&self) -> &[Rank] {
        &self.pairs
    }

    /// Highest rank seen at least twice.
    pub fn best_pair(&self) -> Option<Rank> {
        [self.quads.first(), self.trips.first(), self.pairs.first()]
            .into_iter()
            .flatten()
            .max()
            .copied()
    }

    /// Top trips plus the best remaining pair, where a second set of trips
    /// also serves as the pair.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        let (top, rest) = self.trips.split_first()?;
        let pair = self.pairs.iter().chain(rest.iter()).max()?;
        Some((*top, *pair))
    }
}
