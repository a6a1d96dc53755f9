//! Pick a single coordinate for a post from its location signals.

use std::collections::HashMap;

use geo::Coord;

use crate::post::LocationSignals;

/// User-location text that names the city by a shorter alias.
const NEW_YORK_ALIAS: &str = "New York";
/// Name under which the city table stores New York.
const NEW_YORK_CITY: &str = "New York City";

/// City name to coordinate lookup.
///
/// Holds at most one coordinate per name; loaders are expected to keep the
/// most populous entry when a name repeats.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use happystates_core::CityTable;
///
/// let table: CityTable = [("Boston".to_owned(), Coord { x: -71.06, y: 42.36 })]
///     .into_iter()
///     .collect();
/// assert!(table.get("Boston").is_some());
/// assert!(table.get("boston").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityTable {
    cities: HashMap<String, Coord<f64>>,
}

impl CityTable {
    /// Coordinate stored for `name`, matched exactly.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Coord<f64>> {
        self.cities.get(name).copied()
    }

    /// Number of cities in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Report whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl FromIterator<(String, Coord<f64>)> for CityTable {
    fn from_iter<I: IntoIterator<Item = (String, Coord<f64>)>>(iter: I) -> Self {
        Self {
            cities: iter.into_iter().collect(),
        }
    }
}

/// The signal a resolved coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocationSource {
    /// Exact coordinates reported with the post.
    Coordinates,
    /// First vertex of the place bounding box.
    Place,
    /// City named in the author's profile location.
    City,
}

/// A coordinate chosen for a post.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Chosen coordinate (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Signal that produced the coordinate.
    pub source: LocationSource,
}

/// Chooses one coordinate per post by signal priority.
///
/// Priority is explicit coordinates, then the place bounding-box vertex,
/// then (only when a city table was supplied) the city named before the
/// first comma of the profile location. The first signal present wins even
/// if a lower-priority signal would classify differently.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use happystates_core::{CityTable, LocationResolver, LocationSource, Post};
///
/// let cities: CityTable = [("New York City".to_owned(), Coord { x: -74.0, y: 40.7 })]
///     .into_iter()
///     .collect();
/// let resolver = LocationResolver::with_cities(cities);
/// let post = Post::new(1, "hello").with_user_location("New York, NY");
///
/// let resolution = resolver.resolve(&post.signals).expect("city should resolve");
/// assert_eq!(resolution.source, LocationSource::City);
/// assert_eq!(resolution.location, Coord { x: -74.0, y: 40.7 });
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationResolver {
    cities: Option<CityTable>,
}

impl LocationResolver {
    /// Resolver that only trusts coordinate signals.
    #[must_use]
    pub const fn new() -> Self {
        Self { cities: None }
    }

    /// Resolver that also looks up profile locations in `cities`.
    #[must_use]
    pub const fn with_cities(cities: CityTable) -> Self {
        Self {
            cities: Some(cities),
        }
    }

    /// Report whether profile locations are consulted.
    #[must_use]
    pub const fn resolves_cities(&self) -> bool {
        self.cities.is_some()
    }

    /// Choose a coordinate for `signals`, or `None` when nothing usable is
    /// present.
    #[must_use]
    pub fn resolve(&self, signals: &LocationSignals) -> Option<Resolution> {
        if let Some(location) = signals.coordinates {
            return Some(Resolution {
                location,
                source: LocationSource::Coordinates,
            });
        }
        if let Some(location) = signals.place_vertex {
            return Some(Resolution {
                location,
                source: LocationSource::Place,
            });
        }
        let cities = self.cities.as_ref()?;
        let name = city_name(signals.user_location.as_deref()?)?;
        cities.get(name).map(|location| Resolution {
            location,
            source: LocationSource::City,
        })
    }
}

/// City part of a profile location: the text before the first comma.
fn city_name(user_location: &str) -> Option<&str> {
    let head = user_location
        .split_once(',')
        .map_or(user_location, |(city, _)| city);
    match head {
        "" => None,
        NEW_YORK_ALIAS => Some(NEW_YORK_CITY),
        city => Some(city),
    }
}
