//! Posts from a Twitter streaming dump, one JSON object per line.
//!
//! Only the handful of fields the pipeline consumes are decoded; everything
//! else in the payload is ignored. Lines without a `text` field are stream
//! notices (deletions, rate limits) and are skipped.

use std::io::{BufRead, BufReader};

use camino::Utf8Path;
use geo::Coord;
use happystates_core::Post;
use serde::Deserialize;

use crate::error::LoadError;
use crate::fs::open_utf8_file;

/// Country whose place tags are trusted by default.
pub const DEFAULT_PLACE_COUNTRY: &str = "United States";

/// Options controlling how posts are decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReaderOptions {
    /// Place tags are only used when their country equals this value.
    pub place_country: String,
}

impl Default for PostReaderOptions {
    fn default() -> Self {
        Self {
            place_country: DEFAULT_PLACE_COUNTRY.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPost {
    id: Option<u64>,
    text: Option<String>,
    lang: Option<String>,
    user: Option<RawUser>,
    coordinates: Option<RawPoint>,
    place: Option<RawPlace>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    lang: Option<String>,
    location: Option<String>,
}

/// GeoJSON point: `[longitude, latitude]`.
#[derive(Debug, Deserialize)]
struct RawPoint {
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    country: Option<String>,
    bounding_box: Option<RawBoundingBox>,
}

/// GeoJSON polygon: rings of `[longitude, latitude]` pairs.
#[derive(Debug, Deserialize)]
struct RawBoundingBox {
    coordinates: Vec<Vec<[f64; 2]>>,
}

fn to_coord([lon, lat]: [f64; 2]) -> Coord<f64> {
    Coord { x: lon, y: lat }
}

impl RawPost {
    fn into_post(self, options: &PostReaderOptions) -> Option<Result<Post, &'static str>> {
        let text = self.text?;
        let Some(id) = self.id else {
            return Some(Err("post has text but no id"));
        };
        let (user_lang, user_location) = self
            .user
            .map_or((None, None), |user| (user.lang, user.location));

        let mut post = Post::new(id, text);
        post.language = user_lang.or(self.lang);
        post.signals.coordinates = self.coordinates.map(|point| to_coord(point.coordinates));
        post.signals.place_vertex = self
            .place
            .filter(|place| place.country.as_deref() == Some(options.place_country.as_str()))
            .and_then(|place| place.bounding_box)
            .and_then(|bbox| bbox.coordinates.into_iter().next())
            .and_then(|ring| ring.into_iter().next())
            .map(to_coord);
        post.signals.user_location = user_location.filter(|location| !location.is_empty());
        Some(Ok(post))
    }
}

/// Read every post in the file at `path`, preserving line order.
///
/// # Errors
/// Returns [`LoadError`] when the file cannot be read or a non-blank line is
/// not a JSON object of the expected shape.
pub fn read_posts(path: &Utf8Path, options: &PostReaderOptions) -> Result<Vec<Post>, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_posts_from(BufReader::new(file), path, options)
}

/// Read posts from any buffered source; `path` is used for error context
/// only.
///
/// # Errors
/// See [`read_posts`].
pub fn read_posts_from<R: BufRead>(
    reader: R,
    path: &Utf8Path,
    options: &PostReaderOptions,
) -> Result<Vec<Post>, LoadError> {
    let mut posts = Vec::new();
    for (index, read) in reader.lines().enumerate() {
        let line = index + 1;
        let raw = read.map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if raw.trim().is_empty() {
            continue;
        }
        let decoded: RawPost = serde_json::from_str(&raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            line,
            source,
        })?;
        match decoded.into_post(options) {
            Some(Ok(post)) => posts.push(post),
            Some(Err(message)) => {
                return Err(LoadError::Malformed {
                    path: path.to_path_buf(),
                    line,
                    message: message.to_owned(),
                });
            }
            None => {}
        }
    }
    Ok(posts)
}
