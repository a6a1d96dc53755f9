//! Scored rows written as CSV or JSON lines.

use std::io::{self, BufWriter, Write};

use camino::Utf8Path;
use clap::ValueEnum;
use happystates_core::OutputRow;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::OutputError;
use crate::fs::create_utf8_file;

/// Column names of the CSV output, in order.
pub const CSV_HEADER: [&str; 7] = ["id", "state", "lat", "lon", "words", "text", "score"];

/// Serialisation used for output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with a header row; words joined by spaces.
    #[default]
    Csv,
    /// One JSON object per row.
    Jsonl,
}

/// Write `rows` to `path` in `format`, creating parent directories as needed.
///
/// # Errors
/// Returns [`OutputError`] when the file cannot be created or written.
pub fn write_output(
    path: &Utf8Path,
    format: OutputFormat,
    rows: &[OutputRow],
) -> Result<(), OutputError> {
    let file = create_utf8_file(path)?;
    write_rows(BufWriter::new(file), format, rows).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `rows` to any sink in `format`, flushing at the end.
///
/// CSV always starts with [`CSV_HEADER`], even when there are no rows.
///
/// # Errors
/// Propagates I/O errors from `writer`, including CSV and JSON serialisation
/// failures surfaced as I/O errors.
pub fn write_rows<W: Write>(mut writer: W, format: OutputFormat, rows: &[OutputRow]) -> io::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut csv_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(&mut writer);
            csv_writer.write_record(CSV_HEADER)?;
            for row in rows {
                csv_writer.serialize(CsvRecord::from(row))?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Jsonl => {
            for row in rows {
                serde_json::to_writer(&mut writer, row)?;
                writer.write_all(b"\n")?;
            }
        }
    }
    writer.flush()
}

/// One CSV line; fields follow [`CSV_HEADER`].
#[derive(Serialize)]
struct CsvRecord<'a> {
    id: u64,
    state: &'a str,
    lat: f64,
    lon: f64,
    #[serde(serialize_with = "join_words")]
    words: &'a [String],
    text: &'a str,
    score: f64,
}

impl<'a> From<&'a OutputRow> for CsvRecord<'a> {
    fn from(row: &'a OutputRow) -> Self {
        Self {
            id: row.id,
            state: &row.region,
            lat: row.lat,
            lon: row.lon,
            words: &row.words,
            text: &row.raw_text,
            score: row.score,
        }
    }
}

/// Tokens never hold whitespace, so a single space keeps them separable.
fn join_words<S: Serializer>(words: &&[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&words.join(" "))
}
