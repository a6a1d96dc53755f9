//! Stopword lists and the seed sentiment lexicon.

use std::collections::HashSet;
use std::io::Write;

use camino::Utf8Path;
use happystates_core::{SentimentLexicon, StopWords};
use log::warn;

use crate::error::{LoadError, OutputError};
use crate::fs::{create_utf8_file, read_to_string};

/// Load a stopword list: one word per line, surrounding whitespace trimmed,
/// blank lines ignored.
///
/// # Errors
/// Returns [`LoadError::Read`] when the file cannot be read.
pub fn load_stopwords(path: &Utf8Path) -> Result<StopWords, LoadError> {
    let contents = read_to_string(path)?;
    Ok(parse_stopwords(&contents))
}

/// Parse a stopword list already held in memory.
#[must_use]
pub fn parse_stopwords(contents: &str) -> StopWords {
    contents
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Load an AFINN style lexicon: `term<TAB>integer` per line.
///
/// A term listed twice keeps its last score and logs a warning.
///
/// # Errors
/// Returns [`LoadError`] when the file cannot be read, a line has no tab, or
/// a score is not an integer.
pub fn load_lexicon(path: &Utf8Path) -> Result<SentimentLexicon, LoadError> {
    let contents = read_to_string(path)?;
    parse_lexicon(&contents, path)
}

/// Parse an AFINN lexicon already held in memory; `path` is used for error
/// context only.
///
/// # Errors
/// See [`load_lexicon`].
pub fn parse_lexicon(contents: &str, path: &Utf8Path) -> Result<SentimentLexicon, LoadError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for (index, raw) in contents.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let Some((term, score)) = raw.split_once('\t') else {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                line,
                message: "expected `term<TAB>score`".to_owned(),
            });
        };
        let parsed = score
            .trim()
            .parse::<i32>()
            .map_err(|_| LoadError::InvalidNumber {
                path: path.to_path_buf(),
                line,
                field: "score",
                value: score.to_owned(),
            })?;
        if !seen.insert(term) {
            warn!("{path}:{line}: lexicon term {term:?} repeated; keeping the later score");
        }
        entries.push((term.to_owned(), parsed));
    }
    Ok(SentimentLexicon::seed(entries))
}

/// Write the inferred entries of `lexicon` to `path` as `term<TAB>score`
/// lines sorted by term.
///
/// # Errors
/// Returns [`OutputError`] when the file or its parent directory cannot be
/// created or written.
pub fn write_inferred_lexicon(
    path: &Utf8Path,
    lexicon: &SentimentLexicon,
) -> Result<(), OutputError> {
    let file = create_utf8_file(path)?;
    let mut writer = std::io::BufWriter::new(file);
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    for (term, score) in lexicon.inferred() {
        writeln!(writer, "{term}\t{score:?}").map_err(write_error)?;
    }
    writer.flush().map_err(write_error)
}
