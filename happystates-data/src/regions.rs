//! Region boundaries from a `states.xml` style document.
//!
//! The document holds `<state name="...">` elements, each wrapping
//! `<point lat="..." lng="..."/>` vertices in ring order. Only those two
//! element types are read; comments and every other element are ignored.

use std::collections::HashSet;

use camino::Utf8Path;
use geo::Coord;
use happystates_core::{Region, RegionIndex};
use log::warn;
use roxmltree::{Document, Node};

use crate::error::LoadError;
use crate::fs::read_to_string;

const STATE_TAG: &str = "state";
const POINT_TAG: &str = "point";

/// Load every region in `path`, keeping document order.
///
/// A name that appears more than once is kept once per occurrence, so
/// multi-part regions classify under the same name.
///
/// # Errors
/// Returns [`LoadError`] when the file cannot be read or is not well-formed
/// XML, a state has no name, a point lacks a coordinate, a coordinate is not
/// numeric, or a boundary has fewer than three vertices.
pub fn load_regions(path: &Utf8Path) -> Result<RegionIndex, LoadError> {
    let document = read_to_string(path)?;
    parse_regions(&document, path)
}

/// Parse a region document already held in memory; `path` is used for
/// error context only.
///
/// # Errors
/// See [`load_regions`].
pub fn parse_regions(document: &str, path: &Utf8Path) -> Result<RegionIndex, LoadError> {
    let tree = Document::parse(document).map_err(|source| LoadError::Xml {
        path: path.to_path_buf(),
        source,
    })?;
    let parser = RegionParser { path, tree: &tree };
    let regions = tree
        .descendants()
        .filter(|node| node.has_tag_name(STATE_TAG))
        .map(|state| parser.region(state))
        .collect::<Result<Vec<_>, _>>()?;
    warn_on_repeated_names(&regions, path);
    Ok(RegionIndex::new(regions))
}

struct RegionParser<'a, 'input> {
    path: &'a Utf8Path,
    tree: &'a Document<'input>,
}

impl RegionParser<'_, '_> {
    fn region(&self, state: Node<'_, '_>) -> Result<Region, LoadError> {
        let name = state
            .attribute("name")
            .ok_or_else(|| self.malformed(state, "state without a name"))?;
        let boundary = state
            .descendants()
            .filter(|node| node.has_tag_name(POINT_TAG))
            .map(|point| {
                let lat = self.coordinate(point, "lat")?;
                let lng = self.coordinate(point, "lng")?;
                Ok(Coord { x: lng, y: lat })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;
        Region::new(name, boundary).map_err(|source| {
            warn!("rejecting region at {}:{}", self.path, self.line_of(state));
            LoadError::Region {
                path: self.path.to_path_buf(),
                source,
            }
        })
    }

    fn coordinate(&self, point: Node<'_, '_>, field: &'static str) -> Result<f64, LoadError> {
        let raw = point.attribute(field).ok_or_else(|| {
            self.malformed(point, &format!("point without a {field} attribute"))
        })?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| LoadError::InvalidNumber {
                path: self.path.to_path_buf(),
                line: self.line_of(point),
                field,
                value: raw.to_owned(),
            })
    }

    fn malformed(&self, node: Node<'_, '_>, message: &str) -> LoadError {
        LoadError::Malformed {
            path: self.path.to_path_buf(),
            line: self.line_of(node),
            message: message.to_owned(),
        }
    }

    /// One-based line on which `node` starts.
    fn line_of(&self, node: Node<'_, '_>) -> usize {
        let position = self.tree.text_pos_at(node.range().start);
        usize::try_from(position.row).unwrap_or(usize::MAX)
    }
}

fn warn_on_repeated_names(regions: &[Region], path: &Utf8Path) {
    let mut seen = HashSet::new();
    for region in regions {
        if !seen.insert(region.name()) {
            warn!(
                "region {:?} appears more than once in {path}; keeping every part",
                region.name()
            );
        }
    }
}
