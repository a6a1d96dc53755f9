//! Residual sentiment accumulated for words missing from the seed lexicon.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use happystates_core::{ResolvedPost, SentimentLexicon};

/// Running residual sum for one word.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WordStat {
    /// Sum of the residuals attributed to the word.
    pub total: f64,
    /// Number of occurrences that received a residual.
    pub count: u32,
}

impl WordStat {
    /// Average residual per occurrence.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "inferred scores are the mean of float residuals"
    )]
    pub fn mean(self) -> f64 {
        self.total / f64::from(self.count.max(1))
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "residual totals are float sums"
    )]
    const fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            count: self.count.saturating_add(other.count),
        }
    }
}

/// Word statistics gathered during the first scoring pass.
///
/// Only words absent from the lexicon used for the pass ever appear here.
/// [`WordStats::combine`] adds partial accumulations, so folding chunks in
/// any grouping yields the same totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordStats {
    words: BTreeMap<String, WordStat>,
}

impl WordStats {
    /// Statistic recorded for `word`, if any.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<WordStat> {
        self.words.get(word).copied()
    }

    /// Number of distinct words with a statistic.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Report whether no word received a residual.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Merge `other` into `self` by summing per-word totals and counts.
    #[must_use]
    pub fn combine(mut self, other: Self) -> Self {
        for (word, stat) in other.words {
            self.record(word, stat);
        }
        self
    }

    /// Mean residual per word, ordered by word.
    #[must_use]
    pub fn inferred_scores(&self) -> BTreeMap<String, f64> {
        self.words
            .iter()
            .map(|(word, stat)| (word.clone(), stat.mean()))
            .collect()
    }

    fn record(&mut self, word: String, stat: WordStat) {
        match self.words.entry(word) {
            Entry::Vacant(slot) => {
                slot.insert(stat);
            }
            Entry::Occupied(mut slot) => {
                let merged = slot.get().add(stat);
                slot.insert(merged);
            }
        }
    }
}

/// First pass: spread each post's known sentiment over its unknown words.
///
/// A post contributes only when its known words sum to a non-zero score and
/// at least one of its words is unknown. Each unknown occurrence then
/// receives `score / unknown_count`, so a word repeated in one post is
/// credited once per occurrence.
#[must_use]
pub fn collect_word_stats(posts: &[ResolvedPost], lexicon: &SentimentLexicon) -> WordStats {
    posts
        .iter()
        .map(|post| post_word_stats(&post.words, lexicon))
        .fold(WordStats::default(), WordStats::combine)
}

#[expect(
    clippy::float_arithmetic,
    clippy::float_cmp,
    clippy::cast_precision_loss,
    reason = "residuals divide a float score by a small word count"
)]
fn post_word_stats(words: &[String], lexicon: &SentimentLexicon) -> WordStats {
    let mut stats = WordStats::default();
    let known = lexicon.score(words);
    let unknown = words.len().saturating_sub(known.known);
    if known.total == 0.0 || unknown == 0 {
        return stats;
    }
    let residual = known.total / unknown as f64;
    for word in words.iter().filter(|word| lexicon.lookup(word).is_none()) {
        stats.record(
            word.clone(),
            WordStat {
                total: residual,
                count: 1,
            },
        );
    }
    stats
}
