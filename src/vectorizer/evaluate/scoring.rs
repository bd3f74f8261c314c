use std::{cmp::Ordering, fmt};

use serde::Serialize;

/// One scored corpus row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitEntry {
    /// Row of the record in the corpus
    pub row: usize,
    /// Career name of that row
    pub name: String,
    /// Cosine similarity to the query, in [0, 1]
    pub score: f64,
}

/// Structure to store ranking results
#[derive(Clone, Default, PartialEq, Serialize)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort by descending score.
    /// Equal scores keep ascending row order, so output is deterministic
    /// even when every score is 0.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list
            .sort_by(|a, b| compare_desc((a.row, a.score), (b.row, b.score)));
        self
    }

    /// Keep the first `k` entries
    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    /// Drop entries with zero similarity
    pub fn nonzero(mut self) -> Self {
        self.list.retain(|hit| hit.score > 0.0);
        self
    }

    /// Career names in list order, duplicates kept
    pub fn names(&self) -> Vec<String> {
        self.list.iter().map(|hit| hit.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry> {
        self.list.iter()
    }
}

/// Order two (row, score) pairs: descending score, NaN last, ties by ascending row
pub(crate) fn compare_desc((a_row, a_score): (usize, f64), (b_row, b_score): (usize, f64)) -> Ordering {
    match (a_score.is_nan(), b_score.is_nan()) {
        (false, false) => b_score.total_cmp(&a_score),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
    .then_with(|| a_row.cmp(&b_row))
}

impl IntoIterator for Hits {
    type Item = HitEntry;
    type IntoIter = std::vec::IntoIter<HitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl fmt::Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // each hit on its own line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    #{} {:?}: {:.6}", hit.row, hit.name, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl fmt::Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, hit) in self.list.iter().enumerate() {
            writeln!(f, "{:>3}. {} ({:.4})", rank + 1, hit.name, hit.score)?;
        }
        Ok(())
    }
}
