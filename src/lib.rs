//! This crate recommends careers for a free-text description of interests,
//! ranking a career catalog by TF-IDF cosine similarity.

pub mod config;
pub mod error;
pub mod snapshot;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Index
/// The top-level struct of this crate. It is built once from a corpus of
/// career records and ranks free-text queries against it.
///
/// Internally, it holds:
/// - The corpus records (row index = identity)
/// - The vocabulary (term -> column, document frequency)
/// - The IDF vector
/// - One unit-length sparse TF-IDF row per record
/// - The analyzer used for both the corpus and the queries
///
/// `Index<N, E>` has the following generic parameters:
/// - `N`: weight type (`f32` or `f64`, default `f64`)
/// - `E`: TF-IDF calculation engine (default `DefaultTFIDFEngine`)
///
/// An `Index` is immutable. To follow a changing corpus file, use `IndexHandle`.
pub use vectorizer::Index;

/// Career catalog
/// `CareerRecord` is one `(name, description)` row; `Corpus` is the ordered
/// collection, loadable from CSV with `Career` and `Description` columns.
pub use vectorizer::corpus::{CareerRecord, Corpus};

/// Text analyzer
/// Lower-cases, extracts word tokens of two or more characters and removes
/// English stop words.
pub use vectorizer::analyzer::Analyzer;

/// Vocabulary of an index: term -> column, with document frequencies
pub use vectorizer::vocabulary::Vocabulary;

/// Term Frequency structure
/// Counts the occurrences of each term in one document.
pub use vectorizer::token::TermFrequency;

/// TF IDF Calculation Engine Trait
/// Defines how term and document frequencies turn into weights.
/// `DefaultTFIDFEngine` uses raw counts and the smoothed IDF
/// `ln((1 + N) / (1 + df)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Ranking results
/// - `Hits`: ordered list of scored rows
/// - `HitEntry`: row, career name and cosine similarity
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};

/// Snapshot handle
/// Publishes an `Arc<Index>` and swaps in a rebuilt index atomically when the
/// corpus file changes.
pub use snapshot::IndexHandle;

pub use config::Config;
pub use error::{ConfigError, DataError, Error};
