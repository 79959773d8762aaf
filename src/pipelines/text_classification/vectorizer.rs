use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{pipeline::FitError, stop_words::StopWords};

/// A sparse feature vector: `(column, value)` pairs sorted by column
pub type SparseVector = Vec<(usize, f64)>;

/// Split text into lowercase tokens: maximal runs of word characters (alphanumeric or `_`) that
/// are at least two characters long.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().nth(1).is_some())
        .map(str::to_lowercase)
}

/// Maps raw text to L2-normalized TF-IDF vectors over a vocabulary learned at fit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TfIdfVectorizer {
    /// Term to column index, columns assigned in sorted term order
    vocabulary: BTreeMap<String, usize>,

    /// Smoothed inverse document frequency per column
    idf: Vec<f64>,

    /// Terms dropped before counting
    stop_words: BTreeSet<String>,
}

impl TfIdfVectorizer {
    /// Learn the vocabulary and IDF weights from the given documents
    pub fn fit<S: AsRef<str>>(documents: &[S], stop_words: &StopWords) -> Result<Self, FitError> {
        if documents.is_empty() {
            return Err(FitError::NoDocuments);
        }

        let stop_words: BTreeSet<String> = stop_words.to_set().into_iter().collect();

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for document in documents {
            let terms: HashSet<String> = tokenize(document.as_ref())
                .filter(|term| !stop_words.contains(term))
                .collect();

            for term in terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(FitError::EmptyVocabulary);
        }

        let n_documents = documents.len() as f64;

        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());

        // BTreeMap iteration is sorted, so columns follow term order
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self {
            vocabulary,
            idf,
            stop_words,
        })
    }

    /// The dimension of the produced vectors
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Check that every vocabulary column has an IDF weight
    pub fn validate(&self) -> Result<(), String> {
        if let Some((term, index)) = self
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= self.idf.len())
        {
            return Err(format!(
                "term {:?} maps to column {} but there are only {} IDF weights",
                term,
                index,
                self.idf.len()
            ));
        }

        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "{} vocabulary terms but {} IDF weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }

        Ok(())
    }

    /// Transform one document. Terms outside the vocabulary are ignored, so the result may be
    /// empty.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for term in tokenize(document) {
            if self.stop_words.contains(&term) {
                continue;
            }

            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        vector.sort_unstable_by_key(|(index, _)| *index);

        let norm = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();

        if norm > 0.0 {
            for (_, value) in vector.iter_mut() {
                *value /= norm;
            }
        }

        vector
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tokenizes_like_a_word_pattern() {
        let tokens: Vec<String> = tokenize("WIN a £1000 prize!! Call_now, ok? x").collect();

        assert_eq!(tokens, vec!["win", "1000", "prize", "call_now", "ok"]);
    }

    #[test]
    fn builds_sorted_vocabulary_without_stop_words() {
        let docs = ["the cat sat", "the dog sat"];
        let vectorizer = TfIdfVectorizer::fit(&docs, &StopWords::English).unwrap();

        let terms: Vec<(&str, usize)> = vectorizer
            .vocabulary
            .iter()
            .map(|(t, i)| (t.as_str(), *i))
            .collect();

        assert_eq!(terms, vec![("cat", 0), ("dog", 1), ("sat", 2)]);

        // "sat" appears everywhere, so it gets the minimum weight of 1.0
        assert_eq!(vectorizer.idf[2], 1.0);
        assert!((vectorizer.idf[0] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn transform_is_l2_normalized() {
        let docs = ["free prize now", "lunch at noon", "free lunch"];
        let vectorizer = TfIdfVectorizer::fit(&docs, &StopWords::English).unwrap();

        let vector = vectorizer.transform("FREE free prize unknownword");
        let norm: f64 = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();

        assert_eq!(vector.len(), 2);
        assert!((norm - 1.0).abs() < 1e-12);
        assert!(vector.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn unknown_text_maps_to_empty_vector() {
        let vectorizer = TfIdfVectorizer::fit(&["hello world"], &StopWords::None).unwrap();

        assert!(vectorizer.transform("nothing familiar").is_empty());
    }

    #[test]
    fn rejects_documents_made_of_stop_words() {
        let result = TfIdfVectorizer::fit(&["the and of", "a"], &StopWords::English);

        assert!(matches!(result, Err(FitError::EmptyVocabulary)));
    }

    #[test]
    fn rejects_no_documents() {
        let docs: [&str; 0] = [];

        assert!(matches!(
            TfIdfVectorizer::fit(&docs, &StopWords::English),
            Err(FitError::NoDocuments)
        ));
    }
}
