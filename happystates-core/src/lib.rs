//! Core domain types for the happystates sentiment pipeline.
//!
//! The crate holds the pure building blocks: region polygons and the
//! point-in-region classifier, the location resolver, the text normaliser
//! and the sentiment lexicon. Nothing here performs I/O; loaders live in
//! `happystates-data` and orchestration in `happystates-scorer`.
//!
//! Coordinates are `geo::Coord<f64>` with `x = longitude`, `y = latitude`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod lexicon;
pub mod location;
pub mod post;
pub mod region;
pub mod text;

pub use lexicon::{LexiconScore, SentimentLexicon};
pub use location::{CityTable, LocationResolver, LocationSource, Resolution};
pub use post::{LocationSignals, OutputRow, Post, ResolvedPost};
pub use region::{MIN_VERTICES, Region, RegionError, RegionIndex};
pub use text::{NormalizerError, StopWords, TextNormalizer, URL_TOKEN, USER_TOKEN};
