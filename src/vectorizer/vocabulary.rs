use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::token::TermFrequency;

/// Term dimension of the vector space.
/// Maps every corpus term to a stable column index and keeps
/// the number of documents the term occurs in.
///
/// Columns follow lexicographic term order, so the same corpus
/// always produces the same layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// term -> document frequency; the entry position is the column
    #[serde(with = "indexmap::map::serde_seq")]
    doc_freq: IndexMap<Box<str>, u32>,
}

impl Vocabulary {
    /// Collect the vocabulary of a tokenized corpus
    ///
    /// # Arguments
    /// * `documents` - one term frequency per corpus row
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a TermFrequency>,
    {
        let mut doc_freq: IndexMap<Box<str>, u32> = IndexMap::new();
        for doc in documents {
            for (term, _) in doc.iter() {
                match doc_freq.get_mut(term) {
                    Some(df) => *df += 1,
                    None => {
                        doc_freq.insert(term.into(), 1);
                    }
                }
            }
        }
        doc_freq.sort_unstable_keys();
        Self { doc_freq }
    }

    /// Column of `term`, `None` when out of vocabulary
    #[inline]
    pub fn column(&self, term: &str) -> Option<usize> {
        self.doc_freq.get_index_of(term)
    }

    /// Number of documents containing the term at `column`
    #[inline]
    pub fn doc_freq(&self, column: usize) -> Option<u32> {
        self.doc_freq.get_index(column).map(|(_, &df)| df)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.doc_freq.contains_key(term)
    }

    /// Number of columns
    #[inline]
    pub fn len(&self) -> usize {
        self.doc_freq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.doc_freq.is_empty()
    }

    /// Iterate (term, document frequency) in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.doc_freq.iter().map(|(t, &df)| (&**t, df))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(terms: &[&str]) -> TermFrequency {
        let mut f = TermFrequency::new();
        f.add_terms(terms);
        f
    }

    #[test]
    fn columns_are_sorted_terms() {
        let docs = [freq(&["data", "models", "data"]), freq(&["cook", "data"])];
        let vocab = Vocabulary::from_documents(&docs);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec![("cook", 1), ("data", 2), ("models", 1)]);
        assert_eq!(vocab.column("data"), Some(1));
        assert_eq!(vocab.column("kitchen"), None);
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let docs = [freq(&["cook", "cook", "cook"])];
        let vocab = Vocabulary::from_documents(&docs);
        assert_eq!(vocab.doc_freq(0), Some(1));
        assert_eq!(vocab.doc_freq(1), None);
    }

    #[test]
    fn empty_documents_give_empty_vocabulary() {
        let docs = [TermFrequency::new(), TermFrequency::new()];
        assert!(Vocabulary::from_documents(&docs).is_empty());
    }
}
