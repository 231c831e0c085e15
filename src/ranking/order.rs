use super::rank_table::RankTable;

/// A record that carries a classification label used for ordering.
pub trait Rankable {
    /// Classification label, or `None` when the record has none.
    fn rank_key(&self) -> Option<&str>;
}

/// Stable sort by rank. The input is left untouched.
pub fn sort_by_rank<T>(records: &[T], table: &RankTable) -> Vec<T>
where
    T: Rankable + Clone,
{
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| table.rank(r.rank_key()));
    sorted
}

/// Insert `record` into an already sorted slice, after all records of equal
/// or higher priority. Equivalent to `sort_by_rank` over the appended slice.
pub fn insert_by_rank<T>(sorted: &[T], record: T, table: &RankTable) -> Vec<T>
where
    T: Rankable + Clone,
{
    let rank = table.rank(record.rank_key());
    let position = sorted
        .iter()
        .position(|existing| table.rank(existing.rank_key()) > rank)
        .unwrap_or(sorted.len());

    let mut out = Vec::with_capacity(sorted.len() + 1);
    out.extend_from_slice(&sorted[..position]);
    out.push(record);
    out.extend_from_slice(&sorted[position..]);
    out
}
