//! Two-pass sentiment scoring for geotagged posts.
//!
//! The crate turns raw [`Post`](happystates_core::Post)s into scored
//! [`OutputRow`](happystates_core::OutputRow)s:
//! - **Preparation** drops posts in other languages, locates the rest with a
//!   [`LocationResolver`](happystates_core::LocationResolver), attributes them
//!   to a region and tokenises their text.
//! - **Pass 1** ([`collect_word_stats`]) spreads each post's known sentiment
//!   over the words the seed lexicon does not cover.
//! - **Extension** merges the mean residual of every such word into the
//!   lexicon; seed entries are never replaced.
//! - **Pass 2** ([`score_posts`]) rescores every post with the extended
//!   lexicon.
//!
//! # Examples
//!
//! ```
//! use happystates_core::{LocationSource, OutputRow, Post, ResolvedPost, SentimentLexicon};
//! use happystates_scorer::{collect_word_stats, score_posts};
//!
//! let seed = SentimentLexicon::seed([("good".to_owned(), 3)]);
//! let post = ResolvedPost {
//!     post: Post::new(1, "good awesome"),
//!     region: "Texas".to_owned(),
//!     location: geo::Coord { x: -97.7, y: 30.3 },
//!     source: LocationSource::Coordinates,
//!     words: vec!["good".to_owned(), "awesome".to_owned()],
//! };
//!
//! let stats = collect_word_stats(std::slice::from_ref(&post), &seed);
//! let extended = seed.merge(stats.inferred_scores());
//! let rows: Vec<OutputRow> = score_posts(vec![post], &extended);
//! assert_eq!(rows.first().map(|row| row.score), Some(6.0));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregator;
mod error;
mod report;
mod stats;

pub use aggregator::{DEFAULT_LANGUAGE, Prepared, SentimentAggregator, SentimentRun, score_posts};
pub use error::AggregatorError;
pub use report::RunReport;
pub use stats::{WordStat, WordStats, collect_word_stats};

#[cfg(test)]
mod tests;
