//! Named boundary polygons and the point-in-region classifier.
//!
//! Containment uses parity ray casting. The test runs over `(latitude,
//! longitude)` pairs: edges are selected by the longitude band they span and
//! the ray travels along the latitude axis. The band is exclusive at its
//! lower end and inclusive at its upper end, so a point lying exactly on a
//! shared edge or vertex is attributed to one side only.

use geo::{BoundingRect, Coord, LineString, Rect};
use thiserror::Error;

/// Smallest number of vertices that encloses an area.
pub const MIN_VERTICES: usize = 3;

/// A named jurisdiction, such as a US state, bounded by a closed ring.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The ring
/// closes implicitly: the last vertex connects back to the first.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use happystates_core::Region;
///
/// # fn main() -> Result<(), happystates_core::RegionError> {
/// let square = Region::new(
///     "Square",
///     vec![
///         Coord { x: 0.0, y: 0.0 },
///         Coord { x: 0.0, y: 10.0 },
///         Coord { x: 10.0, y: 10.0 },
///         Coord { x: 10.0, y: 0.0 },
///     ],
/// )?;
/// assert!(square.contains(Coord { x: 5.0, y: 5.0 }));
/// assert!(!square.contains(Coord { x: 15.0, y: 5.0 }));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    ring: LineString<f64>,
    bounds: Rect<f64>,
}

/// Errors returned by [`Region::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    /// The boundary cannot enclose an area.
    #[error("region {name:?} needs at least {MIN_VERTICES} vertices, found {found}")]
    TooFewVertices {
        /// Name of the rejected region.
        name: String,
        /// Number of vertices supplied.
        found: usize,
    },
    /// A vertex was NaN or infinite.
    #[error("region {name:?} has a non-finite vertex")]
    NonFiniteVertex {
        /// Name of the rejected region.
        name: String,
    },
}

impl Region {
    /// Validates and constructs a [`Region`].
    ///
    /// # Errors
    /// Returns [`RegionError`] when fewer than [`MIN_VERTICES`] vertices are
    /// given or when any vertex is not finite.
    pub fn new(name: impl Into<String>, boundary: Vec<Coord<f64>>) -> Result<Self, RegionError> {
        let region_name: String = name.into();
        if boundary.len() < MIN_VERTICES {
            return Err(RegionError::TooFewVertices {
                found: boundary.len(),
                name: region_name,
            });
        }
        if boundary
            .iter()
            .any(|vertex| !vertex.x.is_finite() || !vertex.y.is_finite())
        {
            return Err(RegionError::NonFiniteVertex { name: region_name });
        }
        let ring = LineString::new(boundary);
        let Some(bounds) = ring.bounding_rect() else {
            return Err(RegionError::TooFewVertices {
                name: region_name,
                found: 0,
            });
        };
        Ok(Self {
            name: region_name,
            ring,
            bounds,
        })
    }

    /// Region name as loaded.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Boundary vertices in ring order, without a repeated closing vertex.
    #[must_use]
    pub fn boundary(&self) -> &[Coord<f64>] {
        &self.ring.0
    }

    /// Report whether `point` lies inside the region.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::float_cmp,
        reason = "ray casting computes and compares edge intercepts in floating point"
    )]
    pub fn contains(&self, point: Coord<f64>) -> bool {
        let (lat, lon) = (point.y, point.x);
        let (min, max) = (self.bounds.min(), self.bounds.max());
        // No edge band can admit the point; the edge test below would agree.
        if lon <= min.x || lon > max.x || lat > max.y {
            return false;
        }

        let vertices = &self.ring.0;
        let closing = vertices.iter().cycle().skip(1);
        let mut inside = false;
        for (start, end) in vertices.iter().zip(closing) {
            let (lat1, lon1) = (start.y, start.x);
            let (lat2, lon2) = (end.y, end.x);
            if lon > lon1.min(lon2) && lon <= lon1.max(lon2) && lat <= lat1.max(lat2) {
                // Inside the band lon1 != lon2, so the edge is never flat here.
                let crosses =
                    lat1 == lat2 || lat <= (lon - lon1) * (lat2 - lat1) / (lon2 - lon1) + lat1;
                if crosses {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Ordered collection of regions answering "which region contains this point".
///
/// Lookup scans every region in load order and returns the first match, so
/// overlapping regions resolve to whichever was loaded first.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use happystates_core::{Region, RegionIndex};
///
/// # fn main() -> Result<(), happystates_core::RegionError> {
/// let triangle = Region::new(
///     "Triangle",
///     vec![
///         Coord { x: 0.0, y: 0.0 },
///         Coord { x: 4.0, y: 0.0 },
///         Coord { x: 2.0, y: 4.0 },
///     ],
/// )?;
/// let index = RegionIndex::new(vec![triangle]);
/// assert_eq!(index.classify(Coord { x: 2.0, y: 1.0 }), Some("Triangle"));
/// assert_eq!(index.classify(Coord { x: 40.0, y: 40.0 }), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionIndex {
    regions: Vec<Region>,
}

impl RegionIndex {
    /// Build an index that preserves the order of `regions`.
    #[must_use]
    pub const fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Name of the first region containing `point`, or `None` when the point
    /// lies outside every region.
    #[must_use]
    pub fn classify(&self, point: Coord<f64>) -> Option<&str> {
        self.regions
            .iter()
            .find(|region| region.contains(point))
            .map(Region::name)
    }

    /// Number of indexed regions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.regions.len()
    }

    /// Report whether the index holds no regions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate regions in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }
}

impl FromIterator<Region> for RegionIndex {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
