//! Counters describing what happened to each post in a run.
#![forbid(unsafe_code)]

use std::fmt;

use happystates_core::LocationSource;

/// Tally of posts at each stage of a run, plus lexicon sizes.
///
/// `read` always equals `language_filtered + unresolved + outside_regions +
/// scored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Posts handed to the aggregator.
    pub read: usize,
    /// Posts dropped by the language filter.
    pub language_filtered: usize,
    /// Posts with no usable location signal.
    pub unresolved: usize,
    /// Posts whose location lies outside every region.
    pub outside_regions: usize,
    /// Posts attributed to a region and scored.
    pub scored: usize,
    /// Scored posts located by explicit coordinates.
    pub from_coordinates: usize,
    /// Scored posts located by their place bounding box.
    pub from_place: usize,
    /// Scored posts located through the city table.
    pub from_city: usize,
    /// Entries in the seed lexicon.
    pub seed_terms: usize,
    /// Entries inferred during the run.
    pub inferred_terms: usize,
}

impl RunReport {
    pub(crate) const fn record_source(&mut self, source: LocationSource) {
        match source {
            LocationSource::Coordinates => self.from_coordinates += 1,
            LocationSource::Place => self.from_place += 1,
            LocationSource::City => self.from_city += 1,
        }
        self.scored += 1;
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read {} posts: {} scored ({} by coordinates, {} by place, {} by city), \
             {} wrong language, {} unresolved, {} outside regions; \
             lexicon {} seed + {} inferred terms",
            self.read,
            self.scored,
            self.from_coordinates,
            self.from_place,
            self.from_city,
            self.language_filtered,
            self.unresolved,
            self.outside_regions,
            self.seed_terms,
            self.inferred_terms,
        )
    }
}
