use num::Float;

use crate::utils::math::vector::SparseVec;

use super::{token::TermFrequency, vocabulary::Vocabulary};

/// TF-IDF calculation engine.
/// Plug a different weighting strategy into `Index<N, E>` by implementing this.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// Build the IDF vector, one entry per vocabulary column
    ///
    /// # Arguments
    /// * `vocabulary` - corpus vocabulary with document frequencies
    /// * `doc_num` - number of documents in the corpus
    fn idf_vec(vocabulary: &Vocabulary, doc_num: usize) -> Vec<N>;

    /// Build the TF vector of one document over the vocabulary.
    /// Terms outside the vocabulary are dropped.
    fn tf_vec(freq: &TermFrequency, vocabulary: &Vocabulary) -> SparseVec<N>;

    /// TF-IDF vector scaled to unit length.
    /// Documents without any vocabulary term stay all-zero.
    fn tfidf_vec(freq: &TermFrequency, vocabulary: &Vocabulary, idf: &[N]) -> SparseVec<N> {
        debug_assert_eq!(vocabulary.len(), idf.len(), "idf/vocabulary dimension mismatch");
        let tf = Self::tf_vec(freq, vocabulary);
        let mut weights = SparseVec::from_entries(
            tf.len(),
            tf.raw_iter().map(|(col, v)| (col as u32, v * idf[col])),
        );
        weights.normalize();
        weights
    }
}

/// Default TF-IDF engine
///
/// - `tf(t, d)`: raw count of `t` in `d`
/// - `idf(t) = ln((1 + N) / (1 + df(t))) + 1`
///
/// The +1 smoothing on both sides of the ratio acts as if one extra document
/// contained every term, so no term gets a zero or infinite weight.
/// The trailing +1 keeps terms present in every document from vanishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

macro_rules! impl_default_engine {
    ($t:ty) => {
        impl TFIDFEngine<$t> for DefaultTFIDFEngine {
            fn idf_vec(vocabulary: &Vocabulary, doc_num: usize) -> Vec<$t> {
                let n = doc_num as f64;
                vocabulary
                    .iter()
                    .map(|(_, df)| (((1.0 + n) / (1.0 + df as f64)).ln() + 1.0) as $t)
                    .collect()
            }

            fn tf_vec(freq: &TermFrequency, vocabulary: &Vocabulary) -> SparseVec<$t> {
                SparseVec::from_entries(
                    vocabulary.len(),
                    freq.iter().filter_map(|(term, count)| {
                        vocabulary.column(term).map(|col| (col as u32, count as $t))
                    }),
                )
            }
        }
    };
}

impl_default_engine!(f32);
impl_default_engine!(f64);
