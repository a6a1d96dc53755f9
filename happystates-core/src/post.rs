//! Posts, their location signals, and the rows produced after scoring.

use geo::Coord;

use crate::location::LocationSource;

/// Optional location hints attached to a post.
///
/// Coordinates use `x = longitude` and `y = latitude`. Each signal is
/// independent; [`LocationResolver`](crate::LocationResolver) decides which
/// one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationSignals {
    /// Exact coordinates reported with the post.
    pub coordinates: Option<Coord<f64>>,
    /// First vertex of the tagged place's bounding box.
    pub place_vertex: Option<Coord<f64>>,
    /// Free-text location from the author's profile.
    pub user_location: Option<String>,
}

/// A single post as ingested.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use happystates_core::Post;
///
/// let post = Post::new(7, "sunny day in #austin")
///     .with_language("en")
///     .with_coordinates(Coord { x: -97.74, y: 30.27 });
/// assert_eq!(post.language.as_deref(), Some("en"));
/// assert!(post.signals.coordinates.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Opaque identifier, unique within a batch.
    pub id: u64,
    /// Language code reported for the post, if any.
    pub language: Option<String>,
    /// Original text, kept verbatim.
    pub raw_text: String,
    /// Location hints.
    pub signals: LocationSignals,
}

impl Post {
    /// Construct a post without language or location signals.
    pub fn new(id: u64, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            language: None,
            raw_text: raw_text.into(),
            signals: LocationSignals::default(),
        }
    }

    /// Set the language code.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set explicit coordinates.
    #[must_use]
    pub fn with_coordinates(mut self, coordinates: Coord<f64>) -> Self {
        self.signals.coordinates = Some(coordinates);
        self
    }

    /// Set the place bounding-box vertex.
    #[must_use]
    pub fn with_place_vertex(mut self, vertex: Coord<f64>) -> Self {
        self.signals.place_vertex = Some(vertex);
        self
    }

    /// Set the free-text user location.
    #[must_use]
    pub fn with_user_location(mut self, location: impl Into<String>) -> Self {
        self.signals.user_location = Some(location.into());
        self
    }
}

/// A post attributed to a region, with its cleaned words.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPost {
    /// The ingested post.
    pub post: Post,
    /// Name of the containing region.
    pub region: String,
    /// Coordinate used for classification.
    pub location: Coord<f64>,
    /// Which signal produced `location`.
    pub source: LocationSource,
    /// Cleaned tokens in text order, duplicates kept, stopwords removed.
    pub words: Vec<String>,
}

/// One line of pipeline output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputRow {
    /// Post identifier.
    pub id: u64,
    /// Attributed region.
    #[cfg_attr(feature = "serde", serde(rename = "state"))]
    pub region: String,
    /// Latitude of the resolved location.
    pub lat: f64,
    /// Longitude of the resolved location.
    pub lon: f64,
    /// Cleaned words.
    pub words: Vec<String>,
    /// Original post text.
    #[cfg_attr(feature = "serde", serde(rename = "text"))]
    pub raw_text: String,
    /// Final sentiment score.
    pub score: f64,
}

impl OutputRow {
    /// Build the output row for `resolved` with its final `score`.
    #[must_use]
    pub fn from_resolved(resolved: ResolvedPost, score: f64) -> Self {
        Self {
            id: resolved.post.id,
            region: resolved.region,
            lat: resolved.location.y,
            lon: resolved.location.x,
            words: resolved.words,
            raw_text: resolved.post.raw_text,
            score,
        }
    }
}
