//! Word to sentiment score mapping.

use std::collections::{BTreeMap, HashMap};

/// Summed sentiment of a word sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LexiconScore {
    /// Sum of the scores of every known word occurrence.
    pub total: f64,
    /// Number of word occurrences found in the lexicon.
    pub known: usize,
}

/// Sentiment lexicon built from a seed table and extended by inference.
///
/// Seed entries always take precedence: [`SentimentLexicon::merge`] never
/// replaces a seed score, and an inferred entry, once present, is never
/// replaced either.
///
/// # Examples
///
/// ```
/// use happystates_core::SentimentLexicon;
///
/// let seed = SentimentLexicon::seed([("good".to_owned(), 3)]);
/// let extended = seed.merge([("good".to_owned(), -9.0), ("awesome".to_owned(), 3.0)]);
///
/// assert_eq!(extended.lookup("good"), Some(3.0));
/// assert_eq!(extended.lookup("awesome"), Some(3.0));
/// assert_eq!(extended.inferred_len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentLexicon {
    seed: HashMap<String, f64>,
    inferred: BTreeMap<String, f64>,
}

impl SentimentLexicon {
    /// Build a lexicon from integer seed scores. Later duplicates replace
    /// earlier ones.
    pub fn seed<I>(table: I) -> Self
    where
        I: IntoIterator<Item = (String, i32)>,
    {
        Self {
            seed: table
                .into_iter()
                .map(|(word, score)| (word, f64::from(score)))
                .collect(),
            inferred: BTreeMap::new(),
        }
    }

    /// Score for `word`, if known.
    #[must_use]
    pub fn lookup(&self, word: &str) -> Option<f64> {
        self.seed
            .get(word)
            .or_else(|| self.inferred.get(word))
            .copied()
    }

    /// Report whether `word` came from the seed table.
    #[must_use]
    pub fn is_seed(&self, word: &str) -> bool {
        self.seed.contains_key(word)
    }

    /// Add inferred scores, skipping words that are already known.
    #[must_use]
    pub fn merge<I>(mut self, inferred: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        for (word, score) in inferred {
            if !self.seed.contains_key(&word) {
                self.inferred.entry(word).or_insert(score);
            }
        }
        self
    }

    /// Sum the scores of the known words in `words`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "sentiment scores are summed as floats"
    )]
    pub fn score<S: AsRef<str>>(&self, words: &[S]) -> LexiconScore {
        words
            .iter()
            .filter_map(|word| self.lookup(word.as_ref()))
            .fold(LexiconScore::default(), |acc, score| LexiconScore {
                total: acc.total + score,
                known: acc.known + 1,
            })
    }

    /// Inferred entries in word order.
    pub fn inferred(&self) -> impl Iterator<Item = (&str, f64)> {
        self.inferred
            .iter()
            .map(|(word, score)| (word.as_str(), *score))
    }

    /// Number of seed entries.
    #[must_use]
    pub fn seed_len(&self) -> usize {
        self.seed.len()
    }

    /// Number of inferred entries.
    #[must_use]
    pub fn inferred_len(&self) -> usize {
        self.inferred.len()
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seed.len() + self.inferred.len()
    }

    /// Report whether the lexicon has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seed.is_empty() && self.inferred.is_empty()
    }
}
