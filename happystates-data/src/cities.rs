//! City coordinates from a GeoNames tab-separated dump.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use camino::Utf8Path;
use geo::Coord;
use happystates_core::CityTable;

use crate::error::LoadError;
use crate::fs::read_to_string;

const ASCII_NAME: usize = 2;
const LATITUDE: usize = 4;
const LONGITUDE: usize = 5;
const POPULATION: usize = 14;
const MIN_COLUMNS: usize = POPULATION + 1;

struct CityRecord {
    location: Coord<f64>,
    population: u64,
}

/// Load the city table at `path`.
///
/// When a name repeats, the more populous city wins; on equal population the
/// earlier line is kept.
///
/// # Errors
/// Returns [`LoadError`] when the file cannot be read, a line has fewer than
/// fifteen columns, or a coordinate or population is not numeric.
pub fn load_cities(path: &Utf8Path) -> Result<CityTable, LoadError> {
    let contents = read_to_string(path)?;
    parse_cities(&contents, path)
}

/// Parse a city dump already held in memory; `path` is used for error
/// context only.
///
/// # Errors
/// See [`load_cities`].
pub fn parse_cities(contents: &str, path: &Utf8Path) -> Result<CityTable, LoadError> {
    let mut cities: HashMap<String, CityRecord> = HashMap::new();
    for (index, raw) in contents.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let fields: Vec<&str> = raw.split('\t').collect();
        let (Some(name), Some(lat), Some(lon), Some(population)) = (
            fields.get(ASCII_NAME),
            fields.get(LATITUDE),
            fields.get(LONGITUDE),
            fields.get(POPULATION),
        ) else {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                line,
                message: format!(
                    "expected at least {MIN_COLUMNS} tab-separated columns, found {}",
                    fields.len()
                ),
            });
        };
        let record = CityRecord {
            location: Coord {
                x: parse_field(lon, "longitude", path, line)?,
                y: parse_field(lat, "latitude", path, line)?,
            },
            population: parse_field(population, "population", path, line)?,
        };
        match cities.entry((*name).to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) if slot.get().population < record.population => {
                slot.insert(record);
            }
            Entry::Occupied(_) => {}
        }
    }
    Ok(cities
        .into_iter()
        .map(|(name, record)| (name, record.location))
        .collect())
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
    path: &Utf8Path,
    line: usize,
) -> Result<T, LoadError> {
    raw.trim()
        .parse()
        .map_err(|_| LoadError::InvalidNumber {
            path: path.to_path_buf(),
            line,
            field,
            value: raw.to_owned(),
        })
}
