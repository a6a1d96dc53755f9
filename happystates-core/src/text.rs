//! Turn raw post text into sentiment-bearing word tokens.
//!
//! Normalisation is a fixed sequence of rewrites over the whole text followed
//! by per-token clean-up. Order matters: mentions and links are replaced
//! after lowercasing, so the placeholder tokens `URL` and `USER` stay upper
//! case and never collide with ordinary words.

use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

/// Placeholder substituted for links.
pub const URL_TOKEN: &str = "URL";
/// Placeholder substituted for `@mentions`.
pub const USER_TOKEN: &str = "USER";

const URL_PATTERN: &str = r"(www\.\S+)|(https?://\S+)";
const MENTION_PATTERN: &str = r"@\S+";
const WHITESPACE_PATTERN: &str = r"\s+";
const HASHTAG_PATTERN: &str = r"#(\S+)";
const WORD_PATTERN: &str = r"[A-Za-z0-9_']+";

/// Quotes trimmed from both ends of the whole text.
const TEXT_QUOTES: [char; 2] = ['\'', '"'];
/// Characters trimmed from both ends of every token.
const TOKEN_PUNCTUATION: [char; 5] = ['\'', '"', '?', ',', '.'];
/// Longest run of one repeated character kept inside a token.
const MAX_REPEAT: usize = 2;

/// Errors returned by [`TextNormalizer::new`].
#[derive(Debug, Error)]
pub enum NormalizerError {
    /// One of the built-in patterns failed to compile.
    #[error("failed to compile {name} pattern")]
    Pattern {
        /// Which pattern failed.
        name: &'static str,
        /// Source error from `regex`.
        #[source]
        source: regex::Error,
    },
}

/// Cleans and tokenises post text.
///
/// Tokens keep their text order and duplicates. Word characters are ASCII
/// letters, digits and underscores; apostrophes join word characters during
/// extraction and are then cut away together with any suffix.
///
/// # Examples
///
/// ```
/// use happystates_core::TextNormalizer;
///
/// # fn main() -> Result<(), happystates_core::NormalizerError> {
/// let normalizer = TextNormalizer::new()?;
/// let words = normalizer.normalize("Soooo HAPPY!! @bob don't miss http://t.co/x #win");
/// assert_eq!(words, ["soo", "happy", "USER", "don", "miss", "URL", "win"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    url: Regex,
    mention: Regex,
    whitespace: Regex,
    hashtag: Regex,
    word: Regex,
}

impl TextNormalizer {
    /// Compile the normalisation patterns.
    ///
    /// # Errors
    /// Returns [`NormalizerError::Pattern`] if a built-in pattern is rejected
    /// by the regex engine.
    pub fn new() -> Result<Self, NormalizerError> {
        Ok(Self {
            url: compile("url", URL_PATTERN)?,
            mention: compile("mention", MENTION_PATTERN)?,
            whitespace: compile("whitespace", WHITESPACE_PATTERN)?,
            hashtag: compile("hashtag", HASHTAG_PATTERN)?,
            word: compile("word", WORD_PATTERN)?,
        })
    }

    /// Normalise `raw_text` into an ordered list of tokens.
    #[must_use]
    pub fn normalize(&self, raw_text: &str) -> Vec<String> {
        let lowered = raw_text.to_lowercase();
        let linked = self.url.replace_all(&lowered, URL_TOKEN);
        let mentioned = self.mention.replace_all(&linked, USER_TOKEN);
        let spaced = self.whitespace.replace_all(&mentioned, " ");
        let untagged = self.hashtag.replace_all(&spaced, "${1}");
        let trimmed = untagged.trim_matches(TEXT_QUOTES);

        self.word
            .find_iter(trimmed)
            .filter_map(|token| clean_token(token.as_str()))
            .collect()
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, NormalizerError> {
    Regex::new(pattern).map_err(|source| NormalizerError::Pattern { name, source })
}

/// Per-token clean-up; `None` drops the token.
fn clean_token(raw: &str) -> Option<String> {
    let squeezed = squeeze_repeats(raw);
    let stripped = squeezed.trim_matches(TOKEN_PUNCTUATION);
    let word = stripped
        .split_once('\'')
        .map_or(stripped, |(head, _)| head);
    let first = word.chars().next()?;
    (!first.is_ascii_digit()).then(|| word.to_owned())
}

/// Collapse every run of one repeated character to at most [`MAX_REPEAT`].
fn squeeze_repeats(token: &str) -> String {
    let mut squeezed = String::with_capacity(token.len());
    let mut previous = None;
    let mut run = 0_usize;
    for ch in token.chars() {
        if previous == Some(ch) {
            run += 1;
        } else {
            previous = Some(ch);
            run = 1;
        }
        if run <= MAX_REPEAT {
            squeezed.push(ch);
        }
    }
    squeezed
}

/// Tokens excluded from scoring.
///
/// Matching is exact: the list is applied to normalised tokens, so entries
/// should be lower case, apart from the `URL` and `USER` placeholders.
///
/// # Examples
///
/// ```
/// use happystates_core::StopWords;
///
/// let stopwords: StopWords = ["the".to_owned(), "USER".to_owned()].into_iter().collect();
/// let words = vec!["USER".to_owned(), "the".to_owned(), "sun".to_owned()];
/// assert_eq!(stopwords.retain_content(words), ["sun"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Report whether `word` is a stopword.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Remove stopwords from `words`, keeping order and duplicates of the rest.
    #[must_use]
    pub fn retain_content(&self, mut words: Vec<String>) -> Vec<String> {
        words.retain(|word| !self.contains(word));
        words
    }

    /// Number of stopwords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Report whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<String> for StopWords {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}
