//! The resolution stage and the two scoring passes.
#![forbid(unsafe_code)]

use happystates_core::{
    LocationResolver, OutputRow, Post, RegionIndex, ResolvedPost, SentimentLexicon, StopWords,
    TextNormalizer,
};
use log::{debug, info};

use crate::error::AggregatorError;
use crate::report::RunReport;
use crate::stats::collect_word_stats;

/// Language accepted when none is configured explicitly.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Posts that survived filtering, with the tally so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    /// Resolved posts in input order.
    pub posts: Vec<ResolvedPost>,
    /// Filtering counts; lexicon sizes are not yet filled in.
    pub report: RunReport,
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentRun {
    /// One row per scored post, in input order.
    pub rows: Vec<OutputRow>,
    /// Seed lexicon extended with the inferred entries.
    pub lexicon: SentimentLexicon,
    /// Counters for the run.
    pub report: RunReport,
}

/// Second pass: score each post against the extended lexicon.
#[must_use]
pub fn score_posts(posts: Vec<ResolvedPost>, lexicon: &SentimentLexicon) -> Vec<OutputRow> {
    posts
        .into_iter()
        .map(|post| {
            let score = lexicon.score(&post.words).total;
            OutputRow::from_resolved(post, score)
        })
        .collect()
}

/// Attributes posts to regions and scores them with a self-extending
/// lexicon.
///
/// The tables are fixed at construction. [`SentimentAggregator::run`] first
/// collects residual statistics over every post, then extends the seed
/// lexicon, and only then scores, so every post is scored against the same
/// lexicon.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use happystates_core::{LocationResolver, Post, Region, RegionIndex, SentimentLexicon, StopWords};
/// use happystates_scorer::SentimentAggregator;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let square = Region::new(
///     "Square",
///     vec![
///         Coord { x: 0.0, y: 0.0 },
///         Coord { x: 0.0, y: 10.0 },
///         Coord { x: 10.0, y: 10.0 },
///         Coord { x: 10.0, y: 0.0 },
///     ],
/// )?;
/// let aggregator = SentimentAggregator::new(
///     RegionIndex::new(vec![square]),
///     LocationResolver::new(),
///     StopWords::default(),
///     SentimentLexicon::seed([("good".to_owned(), 3)]),
/// )?;
/// let post = Post::new(1, "good awesome")
///     .with_language("en")
///     .with_coordinates(Coord { x: 5.0, y: 5.0 });
///
/// let run = aggregator.run(vec![post]);
/// assert_eq!(run.lexicon.lookup("awesome"), Some(3.0));
/// assert_eq!(run.rows.first().map(|row| row.score), Some(6.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SentimentAggregator {
    regions: RegionIndex,
    resolver: LocationResolver,
    normalizer: TextNormalizer,
    stopwords: StopWords,
    lexicon: SentimentLexicon,
    language: Option<String>,
}

impl SentimentAggregator {
    /// Build an aggregator accepting [`DEFAULT_LANGUAGE`] posts.
    ///
    /// # Errors
    /// Returns [`AggregatorError::Normalizer`] when the text normaliser
    /// cannot be built.
    pub fn new(
        regions: RegionIndex,
        resolver: LocationResolver,
        stopwords: StopWords,
        lexicon: SentimentLexicon,
    ) -> Result<Self, AggregatorError> {
        let normalizer =
            TextNormalizer::new().map_err(|source| AggregatorError::Normalizer { source })?;
        Ok(Self {
            regions,
            resolver,
            normalizer,
            stopwords,
            lexicon,
            language: Some(DEFAULT_LANGUAGE.to_owned()),
        })
    }

    /// Accept only posts in `language`; `None` accepts every post.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Filter, locate and tokenise `posts`, keeping input order.
    #[must_use]
    pub fn prepare(&self, posts: Vec<Post>) -> Prepared {
        let mut report = RunReport {
            read: posts.len(),
            ..RunReport::default()
        };
        let mut resolved = Vec::with_capacity(posts.len());
        for post in posts {
            if !self.accepts_language(&post) {
                debug!("post {} dropped: language {:?}", post.id, post.language);
                report.language_filtered += 1;
                continue;
            }
            let Some(resolution) = self.resolver.resolve(&post.signals) else {
                debug!("post {} dropped: no usable location", post.id);
                report.unresolved += 1;
                continue;
            };
            let Some(region_name) = self.regions.classify(resolution.location) else {
                debug!(
                    "post {} dropped: ({}, {}) lies outside every region",
                    post.id, resolution.location.y, resolution.location.x
                );
                report.outside_regions += 1;
                continue;
            };
            let region = region_name.to_owned();
            let words = self
                .stopwords
                .retain_content(self.normalizer.normalize(&post.raw_text));
            report.record_source(resolution.source);
            resolved.push(ResolvedPost {
                post,
                region,
                location: resolution.location,
                source: resolution.source,
                words,
            });
        }
        Prepared {
            posts: resolved,
            report,
        }
    }

    /// Run the whole pipeline over `posts`.
    #[must_use]
    pub fn run(&self, posts: Vec<Post>) -> SentimentRun {
        let Prepared {
            posts: resolved,
            mut report,
        } = self.prepare(posts);

        let stats = collect_word_stats(&resolved, &self.lexicon);
        let lexicon = self.lexicon.clone().merge(stats.inferred_scores());
        let rows = score_posts(resolved, &lexicon);

        report.seed_terms = lexicon.seed_len();
        report.inferred_terms = lexicon.inferred_len();
        info!("{report}");
        SentimentRun {
            rows,
            lexicon,
            report,
        }
    }

    fn accepts_language(&self, post: &Post) -> bool {
        self.language
            .as_deref()
            .is_none_or(|wanted| post.language.as_deref() == Some(wanted))
    }
}
