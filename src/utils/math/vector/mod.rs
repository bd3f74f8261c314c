pub mod math;

use std::fmt::{self, Debug};

use num::Num;
use serde::{Deserialize, Serialize};

use crate::utils::sort::sort_by_index_soa;

/// SparseVec is a sparse vector that stores only non-zero elements.
/// It holds `inds` and `vals` side by side:
/// `inds` keeps the column of each stored element,
/// `vals` keeps its value.
///
/// Stored elements are guaranteed to be sorted by ascending `inds`
/// and no stored value is zero.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVec<N>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    /// logical dimension
    len: usize,
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// Create an all-zero vector of dimension `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Build from (column, value) entries in any order.
    /// Zero values are dropped. Entries must not repeat a column.
    ///
    /// # Arguments
    /// * `len` - logical dimension
    /// * `entries` - (column, value) pairs, every column `< len`
    pub fn from_entries<I>(len: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, N)>,
    {
        let (mut inds, mut vals): (Vec<u32>, Vec<N>) = entries
            .into_iter()
            .filter(|(_, v)| !v.is_zero())
            .unzip();
        sort_by_index_soa(&mut inds, &mut vals);
        debug_assert!(
            inds.windows(2).all(|w| w[0] < w[1]),
            "duplicate column in sparse entries"
        );
        debug_assert!(
            inds.last().map_or(true, |&i| (i as usize) < len),
            "column out of range"
        );
        Self { inds, vals, len }
    }

    /// Logical dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// true when no element is stored
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Get the value at `index`.
    /// Returns `None` when out of range, zero when not stored.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate stored elements as (column, value) in column order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    /// Dense copy, mainly for inspection and tests
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (i, v) in self.raw_iter() {
            dense[i] = v;
        }
        dense
    }

    #[inline]
    pub(crate) fn inds(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub(crate) fn vals(&self) -> &[N] {
        &self.vals
    }

    #[inline]
    pub(crate) fn vals_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }
}

impl<N> Debug for SparseVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "SparseVec {{")?;
            writeln!(f, "    len: {},", self.len)?;
            writeln!(f, "    nnz: {},", self.nnz())?;
            writeln!(f, "    entries: [")?;
            for (i, v) in self.raw_iter() {
                writeln!(f, "        {}: {:?},", i, v)?;
            }
            writeln!(f, "    ]")?;
            write!(f, "}}")
        } else {
            f.debug_map().entries(self.raw_iter()).finish()
        }
    }
}
