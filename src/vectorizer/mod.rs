pub mod analyzer;
pub mod corpus;
pub mod evaluate;
pub mod stop_words;
pub mod tfidf;
pub mod token;
pub mod vocabulary;

use std::marker::PhantomData;

use num::Float;
use tracing::debug;

use crate::{
    error::{DataError, DataResult},
    utils::math::vector::SparseVec,
    vectorizer::{
        analyzer::Analyzer,
        corpus::Corpus,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TermFrequency,
        vocabulary::Vocabulary,
    },
};

/// Corpus size from which query scoring fans out over the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

/// TF-IDF index over a career corpus.
///
/// Holds one consistent snapshot:
/// - the corpus records (row = identity)
/// - the vocabulary (term -> column, document frequency)
/// - the IDF vector, one entry per column
/// - the term weight matrix, one unit-length sparse row per record
/// - the analyzer the rows were tokenized with
///
/// All parts are built together by [`Index::build`] and never mutated
/// afterwards; a corpus reload builds a new `Index`.
///
/// `Index<N, E>`:
/// - `N`: weight type (`f32` or `f64`)
/// - `E`: TF-IDF engine, `DefaultTFIDFEngine` by default
#[derive(Debug, Clone)]
pub struct Index<N = f64, E = DefaultTFIDFEngine>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    corpus: Corpus,
    vocabulary: Vocabulary,
    idf: Vec<N>,
    matrix: Vec<SparseVec<N>>,
    analyzer: Analyzer,
    parallel_threshold: usize,
    _marker: PhantomData<E>,
}

impl<N, E> Index<N, E>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    /// Build the index with the English analyzer
    ///
    /// # Errors
    /// * `DataError::EmptyCorpus` - `corpus` has no records
    pub fn build(corpus: Corpus) -> DataResult<Self> {
        Self::build_with_analyzer(corpus, Analyzer::english())
    }

    /// Build the index with a custom analyzer.
    /// Queries against this index are tokenized by the same analyzer.
    pub fn build_with_analyzer(corpus: Corpus, analyzer: Analyzer) -> DataResult<Self> {
        if corpus.is_empty() {
            return Err(DataError::EmptyCorpus);
        }

        let freqs: Vec<TermFrequency> = corpus
            .iter()
            .map(|record| analyzer.term_frequency(&record.description))
            .collect();
        let vocabulary = Vocabulary::from_documents(&freqs);
        let idf = E::idf_vec(&vocabulary, corpus.len());
        let matrix: Vec<SparseVec<N>> = freqs
            .iter()
            .map(|freq| {
                let mut row = E::tfidf_vec(freq, &vocabulary, &idf);
                row.shrink_to_fit();
                row
            })
            .collect();

        debug!(
            rows = corpus.len(),
            vocabulary = vocabulary.len(),
            empty_rows = matrix.iter().filter(|row| row.is_zero()).count(),
            "built tf-idf index"
        );

        Ok(Self {
            corpus,
            vocabulary,
            idf,
            matrix,
            analyzer,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            _marker: PhantomData,
        })
    }

    /// Set the corpus size from which scoring runs in parallel.
    /// Scores and ordering are the same either way.
    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = rows;
        self
    }

    /// Project text into the vocabulary space.
    /// Out-of-vocabulary terms are dropped; the result is unit length,
    /// or all-zero when no term is recognized.
    pub fn project(&self, text: &str) -> SparseVec<N> {
        let freq = self.analyzer.term_frequency(text);
        E::tfidf_vec(&freq, &self.vocabulary, &self.idf)
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn idf(&self) -> &[N] {
        &self.idf
    }

    #[inline]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Weight row of corpus record `row`
    #[inline]
    pub fn row(&self, row: usize) -> Option<&SparseVec<N>> {
        self.matrix.get(row)
    }

    /// All weight rows, in corpus order
    #[inline]
    pub fn matrix(&self) -> &[SparseVec<N>] {
        &self.matrix
    }

    /// Number of corpus rows
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.matrix.len()
    }

    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }
}
