use std::{cmp::Ordering, ops::AddAssign};

use num::{Float, Num};

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// Compute the dot product
    ///
    /// # Arguments
    /// * `other` - another vector of the same dimension
    ///
    /// # Returns
    /// * `R` - dot product accumulated in `R`
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        let (a_inds, a_vals) = (self.inds(), self.vals());
        let (b_inds, b_vals) = (other.inds(), other.vals());
        if a_inds.is_empty() || b_inds.is_empty() {
            return result;
        }

        let mut i = 0;
        let mut j = 0;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    let a: R = a_vals[i].into();
                    let b: R = b_vals[j].into();
                    result += a * b;
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }
}

impl<N> SparseVec<N>
where
    N: Float,
{
    /// L2 norm
    #[inline]
    pub fn norm(&self) -> N {
        self.vals()
            .iter()
            .fold(N::zero(), |acc, &v| acc + v * v)
            .sqrt()
    }

    /// Scale to unit L2 length in place.
    /// A zero vector is left untouched and `false` is returned.
    pub fn normalize(&mut self) -> bool {
        let norm = self.norm();
        if norm.is_zero() || !norm.is_finite() {
            return false;
        }
        for v in self.vals_mut() {
            *v = *v / norm;
        }
        true
    }
}
