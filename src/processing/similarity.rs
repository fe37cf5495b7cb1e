//! Bag-of-words similarity: count vectors over a joint vocabulary, compared by cosine

use crate::processing::normalizer::NormalizedText;
use regex::Regex;
use std::collections::BTreeMap;

pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 2;

/// Splits text into word-character runs, dropping runs shorter than `min_token_length` chars
pub struct Tokenizer {
    word_regex: Regex,
    min_token_length: usize,
}

impl Tokenizer {
    pub fn new(min_token_length: usize) -> Self {
        let word_regex = Regex::new(r"\w+").expect("Invalid word regex");
        Self {
            word_regex,
            min_token_length: min_token_length.max(1),
        }
    }

    pub fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.word_regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| token.chars().count() >= self.min_token_length)
            .collect()
    }
}

/// Term counts of two documents laid out over their joint, sorted vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct CountMatrix {
    pub vocabulary: Vec<String>,
    pub left: Vec<u32>,
    pub right: Vec<u32>,
}

impl CountMatrix {
    pub fn fit(tokenizer: &Tokenizer, left: &str, right: &str) -> Self {
        let mut counts: BTreeMap<&str, (u32, u32)> = BTreeMap::new();

        for token in tokenizer.tokenize(left) {
            counts.entry(token).or_default().0 += 1;
        }
        for token in tokenizer.tokenize(right) {
            counts.entry(token).or_default().1 += 1;
        }

        let mut vocabulary = Vec::with_capacity(counts.len());
        let mut left_counts = Vec::with_capacity(counts.len());
        let mut right_counts = Vec::with_capacity(counts.len());
        for (term, (l, r)) in counts {
            vocabulary.push(term.to_string());
            left_counts.push(l);
            right_counts.push(r);
        }

        Self {
            vocabulary,
            left: left_counts,
            right: right_counts,
        }
    }

    /// Cosine of the angle between the two count vectors; 0.0 when either is all zeros
    pub fn cosine_similarity(&self) -> f64 {
        let dot: f64 = self
            .left
            .iter()
            .zip(&self.right)
            .map(|(&a, &b)| a as f64 * b as f64)
            .sum();
        let left_norm = Self::norm(&self.left);
        let right_norm = Self::norm(&self.right);

        if left_norm == 0.0 || right_norm == 0.0 {
            return 0.0;
        }

        dot / (left_norm * right_norm)
    }

    fn norm(counts: &[u32]) -> f64 {
        counts
            .iter()
            .map(|&c| c as f64 * c as f64)
            .sum::<f64>()
            .sqrt()
    }
}

pub struct SimilarityScorer {
    tokenizer: Tokenizer,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_LENGTH)
    }
}

impl SimilarityScorer {
    pub fn new(min_token_length: usize) -> Self {
        Self {
            tokenizer: Tokenizer::new(min_token_length),
        }
    }

    /// Similarity on a 0-100 scale, rounded to two decimals
    pub fn score(&self, a: &NormalizedText, b: &NormalizedText) -> f64 {
        let matrix = CountMatrix::fit(&self.tokenizer, a.as_str(), b.as_str());
        let percentage = matrix.cosine_similarity() * 100.0;
        round_to_hundredths(percentage).clamp(0.0, 100.0)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
