//! File formats for the happystates pipeline.
//!
//! Responsibilities:
//! - Load the static tables: region boundaries, the city gazetteer, the
//!   stopword list and the seed sentiment lexicon.
//! - Decode the post stream.
//! - Write scored rows and the inferred lexicon.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `happystates-core`).
//! - Every loader returns a fully built value; nothing is read lazily.
//!
//! Invariants:
//! - Errors carry the offending path and, where meaningful, the line.
//! - No global mutable state.

#![forbid(unsafe_code)]

mod cities;
mod error;
pub mod fs;
mod output;
mod posts;
mod regions;
mod words;

pub use cities::{load_cities, parse_cities};
pub use error::{LoadError, OutputError};
pub use output::{CSV_HEADER, OutputFormat, write_output, write_rows};
pub use posts::{DEFAULT_PLACE_COUNTRY, PostReaderOptions, read_posts, read_posts_from};
pub use regions::{load_regions, parse_regions};
pub use words::{
    load_lexicon, load_stopwords, parse_lexicon, parse_stopwords, write_inferred_lexicon,
};
