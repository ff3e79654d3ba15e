//! Tag-text vectorization: tokenizer, stop-word filtering, TF-IDF weighting,
//! and cosine similarity over sparse vectors.
//!
//! The vectorizer is fitted once over a catalog's tag corpus and then queried
//! by document index. Fitting assigns vocabulary indexes in first-seen order
//! and weights each term by raw term frequency times smoothed inverse document
//! frequency:
//!
//! ```text
//! idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1
//! ```
//!
//! Everything here is pure and deterministic for a fixed corpus.

use std::collections::HashMap;

/// Fixed English stop-word list applied during tokenization.
///
/// Function words carry no signal for tag similarity, so they are dropped
/// before term counting.
pub const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has",
    "have", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his",
    "how", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more",
    "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Lowercase and split `text` on non-alphanumeric boundaries, keeping tokens
/// of length >= 2 that are not stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !STOP_WORDS.contains(t))
        .map(|t| t.to_string())
        .collect()
}

/// A sparse TF-IDF vector: `(term_index, weight)` pairs sorted by term index,
/// with the Euclidean norm precomputed at construction.
#[derive(Debug, Clone)]
pub struct SparseVector {
    terms: Vec<(usize, f64)>,
    norm: f64,
}

impl SparseVector {
    fn new(mut terms: Vec<(usize, f64)>) -> Self {
        terms.sort_by_key(|&(idx, _)| idx);
        let norm = terms.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        Self { terms, norm }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Compute cosine similarity between two sparse vectors.
///
/// Returns a value in `[0.0, 1.0]` for TF-IDF vectors (all weights are
/// non-negative). Returns `0.0` when either vector has zero magnitude.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.norm < f64::EPSILON || b.norm < f64::EPSILON {
        return 0.0;
    }

    // Merge walk over the two index-sorted term lists.
    let mut dot = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.terms.len() && j < b.terms.len() {
        let (ai, aw) = a.terms[i];
        let (bi, bw) = b.terms[j];
        match ai.cmp(&bi) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += aw * bw;
                i += 1;
                j += 1;
            }
        }
    }

    dot / (a.norm * b.norm)
}

/// TF-IDF vectorizer fitted over a corpus of tag strings.
///
/// Holds one [`SparseVector`] per input document, in corpus order. Documents
/// whose tags reduce to nothing after tokenization get an empty vector and
/// score `0.0` against everything.
#[derive(Debug, Clone)]
pub struct TagVectorizer {
    vocab: HashMap<String, usize>,
    vectors: Vec<SparseVector>,
}

impl TagVectorizer {
    /// Fit the vectorizer over `corpus`, producing one vector per document.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = corpus.iter().map(|s| tokenize(s.as_ref())).collect();

        // Vocabulary indexes in first-seen order, document frequency per term.
        let mut vocab: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        for tokens in &tokenized {
            let mut seen: Vec<usize> = Vec::new();
            for token in tokens {
                let next_idx = vocab.len();
                let idx = *vocab.entry(token.clone()).or_insert_with(|| {
                    doc_freq.push(0);
                    next_idx
                });
                if !seen.contains(&idx) {
                    doc_freq[idx] += 1;
                    seen.push(idx);
                }
            }
        }

        let n_docs = corpus.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors: Vec<SparseVector> = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for token in tokens {
                    *counts.entry(vocab[token]).or_insert(0.0) += 1.0;
                }
                let terms: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(idx, tf)| (idx, tf * idf[idx]))
                    .collect();
                SparseVector::new(terms)
            })
            .collect();

        Self { vocab, vectors }
    }

    /// Number of documents the vectorizer was fitted over.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vocabulary size after stop-word removal.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// The fitted vector for document `doc`.
    ///
    /// # Panics
    ///
    /// Panics if `doc` is out of range.
    pub fn vector(&self, doc: usize) -> &SparseVector {
        &self.vectors[doc]
    }

    /// Cosine similarity between two fitted documents.
    pub fn similarity(&self, a: usize, b: usize) -> f64 {
        cosine_similarity(&self.vectors[a], &self.vectors[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokens = tokenize("Red-Cotton SHIRT, casual!");
        assert_eq!(tokens, vec!["red", "cotton", "shirt", "casual"]);
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("a shirt for the beach");
        assert_eq!(tokens, vec!["shirt", "beach"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("a of the").is_empty());
    }

    #[test]
    fn test_cosine_identical_documents() {
        let v = TagVectorizer::fit(&["red cotton shirt", "red cotton shirt"]);
        assert!((v.similarity(0, 1) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_disjoint_documents() {
        let v = TagVectorizer::fit(&["red cotton shirt", "electronics computer"]);
        assert!(v.similarity(0, 1).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        // Second document tokenizes to nothing.
        let v = TagVectorizer::fit(&["red shirt", "of the"]);
        assert_eq!(v.similarity(0, 1), 0.0);
        assert!(v.vector(1).is_empty());
    }

    #[test]
    fn test_partial_overlap_scores_between_zero_and_one() {
        let v = TagVectorizer::fit(&["red cotton shirt casual", "blue cotton shirt casual"]);
        let sim = v.similarity(0, 1);
        assert!(sim > 0.0 && sim < 1.0, "similarity out of range: {}", sim);
    }

    #[test]
    fn test_rarer_terms_weigh_more() {
        // "shirt" appears in four docs, "wool" in two. Overlap on the rarer
        // term must beat overlap on the common one.
        let v = TagVectorizer::fit(&[
            "wool shirt",
            "wool coat",
            "cotton shirt",
            "linen shirt",
            "silk shirt",
        ]);
        assert!(v.similarity(0, 1) > v.similarity(0, 2));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = ["red cotton shirt", "blue denim jeans", "red wool scarf"];
        let a = TagVectorizer::fit(&corpus);
        let b = TagVectorizer::fit(&corpus);
        for i in 0..corpus.len() {
            for j in 0..corpus.len() {
                assert_eq!(a.similarity(i, j), b.similarity(i, j));
            }
        }
    }

    #[test]
    fn test_vocab_excludes_stop_words() {
        let v = TagVectorizer::fit(&["the red shirt and the blue shirt"]);
        assert_eq!(v.vocab_size(), 3); // red, shirt, blue
    }
}
