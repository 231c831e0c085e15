/// Rank assigned to any classification absent from a table.
pub const SENTINEL_RANK: u32 = 999;

/// Fixed mapping from classification label to sort priority (lower first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTable {
    entries: &'static [(&'static str, u32)],
}

/// Education and student-status levels.
pub const EDUCATION_LEVELS: RankTable = RankTable::new(&[
    ("博士研究生", 1),
    ("硕士研究生", 2),
    ("本科", 3),
    ("专科", 4),
]);

/// Canonical degree type labels, as produced by degree-type extraction.
pub const DEGREE_TYPES: RankTable = RankTable::new(&[
    ("博士", 1),
    ("硕士", 2),
    ("学士", 3),
]);

/// Categories without a priority order; every record ranks as sentinel.
pub const NO_RANKS: RankTable = RankTable::new(&[]);

impl RankTable {
    pub const fn new(entries: &'static [(&'static str, u32)]) -> Self {
        Self { entries }
    }

    /// Rank for a classification. Missing or empty keys get the sentinel.
    pub fn rank(&self, key: Option<&str>) -> u32 {
        match key {
            Some(k) if !k.is_empty() => self
                .entries
                .iter()
                .find(|(label, _)| *label == k)
                .map(|(_, rank)| *rank)
                .unwrap_or(SENTINEL_RANK),
            _ => SENTINEL_RANK,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(label, _)| *label == key)
    }

    /// Valid labels ordered by rank, for selection lists.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut entries: Vec<_> = self.entries.to_vec();
        entries.sort_by_key(|(_, rank)| *rank);
        entries.into_iter().map(|(label, _)| label).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
