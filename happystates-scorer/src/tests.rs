//! Unit coverage for the scoring passes and the aggregator.
#![forbid(unsafe_code)]

use geo::Coord;
use happystates_core::{
    CityTable, LocationResolver, LocationSource, Post, Region, RegionIndex, ResolvedPost,
    SentimentLexicon, StopWords,
};
use rstest::{fixture, rstest};

use crate::{SentimentAggregator, WordStat, WordStats, collect_word_stats, score_posts};

fn resolved(id: u64, words: &[&str]) -> ResolvedPost {
    ResolvedPost {
        post: Post::new(id, words.join(" ")),
        region: "Square".to_owned(),
        location: Coord { x: 5.0, y: 5.0 },
        source: LocationSource::Coordinates,
        words: words.iter().map(|word| (*word).to_owned()).collect(),
    }
}

fn seed(entries: &[(&str, i32)]) -> SentimentLexicon {
    SentimentLexicon::seed(
        entries
            .iter()
            .map(|(word, score)| ((*word).to_owned(), *score)),
    )
}

fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(delta <= 1.0e-9, "expected {expected}, got {actual}");
}

#[fixture]
fn square_index() -> RegionIndex {
    let square = Region::new(
        "Square",
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 10.0 },
            Coord { x: 10.0, y: 10.0 },
            Coord { x: 10.0, y: 0.0 },
        ],
    )
    .expect("square region");
    RegionIndex::new(vec![square])
}

#[rstest]
fn zero_score_post_infers_nothing() {
    let lexicon = seed(&[("good", 2), ("bad", -2)]);
    let posts = [resolved(1, &["good", "bad", "great"])];

    let stats = collect_word_stats(&posts, &lexicon);
    assert!(stats.is_empty());

    let extended = lexicon.merge(stats.inferred_scores());
    let rows = score_posts(posts.to_vec(), &extended);
    assert_eq!(rows.first().map(|row| row.score), Some(0.0));
}

#[rstest]
fn residual_goes_to_unknown_word() {
    let lexicon = seed(&[("good", 3)]);
    let posts = [resolved(1, &["good", "awesome"])];

    let stats = collect_word_stats(&posts, &lexicon);
    assert_eq!(
        stats.get("awesome"),
        Some(WordStat {
            total: 3.0,
            count: 1,
        })
    );

    let extended = lexicon.merge(stats.inferred_scores());
    assert_eq!(extended.lookup("awesome"), Some(3.0));
    let rows = score_posts(posts.to_vec(), &extended);
    assert_eq!(rows.first().map(|row| row.score), Some(6.0));
}

#[rstest]
fn fully_known_post_infers_nothing() {
    let lexicon = seed(&[("good", 3), ("love", 3)]);
    let stats = collect_word_stats(&[resolved(1, &["good", "love", "good"])], &lexicon);
    assert!(stats.is_empty());
}

#[rstest]
fn empty_post_scores_zero_and_infers_nothing() {
    let lexicon = seed(&[("good", 3)]);
    let posts = [resolved(1, &[])];
    assert!(collect_word_stats(&posts, &lexicon).is_empty());
    let rows = score_posts(posts.to_vec(), &lexicon);
    assert_eq!(rows.first().map(|row| row.score), Some(0.0));
}

#[rstest]
fn repeated_unknown_word_counts_each_occurrence() {
    let lexicon = seed(&[("sad", -4)]);
    let stats = collect_word_stats(&[resolved(1, &["sad", "rain", "rain"])], &lexicon);
    let rain = stats.get("rain").expect("rain recorded");
    assert_eq!(rain.count, 2);
    assert_close(rain.total, -4.0);
    assert_close(rain.mean(), -2.0);
}

#[rstest]
fn inferred_score_averages_across_posts() {
    let lexicon = seed(&[("good", 3), ("bad", -3)]);
    let posts = [
        resolved(1, &["good", "coffee"]),
        resolved(2, &["bad", "bad", "coffee", "queue"]),
    ];
    let inferred = collect_word_stats(&posts, &lexicon).inferred_scores();
    // Post 1 gives coffee 3.0; post 2 spreads -6.0 over two unknown words.
    assert_close(*inferred.get("coffee").expect("coffee inferred"), 0.0);
    assert_close(*inferred.get("queue").expect("queue inferred"), -3.0);
}

#[rstest]
fn combine_matches_single_fold() {
    let lexicon = seed(&[("good", 3), ("bad", -3)]);
    let posts = [
        resolved(1, &["good", "tea"]),
        resolved(2, &["bad", "tea", "cold"]),
        resolved(3, &["good", "good", "cold"]),
    ];
    let whole = collect_word_stats(&posts, &lexicon);
    let (left, right) = posts.split_at(1);
    let split = collect_word_stats(right, &lexicon).combine(collect_word_stats(left, &lexicon));
    assert_eq!(whole, split);
    assert_eq!(WordStats::default().combine(whole.clone()), whole);
}

#[rstest]
fn merge_keeps_seed_when_inference_collides() {
    let lexicon = seed(&[("good", 3)]);
    let extended = lexicon.merge([("good".to_owned(), -10.0)]);
    assert_eq!(extended.lookup("good"), Some(3.0));
    assert_eq!(extended.inferred_len(), 0);
}

#[rstest]
fn prepare_counts_every_drop(square_index: RegionIndex) {
    let aggregator = SentimentAggregator::new(
        square_index,
        LocationResolver::new(),
        StopWords::default(),
        seed(&[("good", 3)]),
    )
    .expect("aggregator");
    let posts = vec![
        Post::new(1, "good").with_language("en").with_coordinates(Coord { x: 5.0, y: 5.0 }),
        Post::new(2, "bueno").with_language("es").with_coordinates(Coord { x: 5.0, y: 5.0 }),
        Post::new(3, "lost").with_language("en"),
        Post::new(4, "far").with_language("en").with_coordinates(Coord { x: 50.0, y: 50.0 }),
        Post::new(5, "placed").with_language("en").with_place_vertex(Coord { x: 2.0, y: 2.0 }),
    ];

    let prepared = aggregator.prepare(posts);
    let ids: Vec<_> = prepared.posts.iter().map(|post| post.post.id).collect();
    assert_eq!(ids, [1, 5]);
    let report = prepared.report;
    assert_eq!(report.read, 5);
    assert_eq!(report.language_filtered, 1);
    assert_eq!(report.unresolved, 1);
    assert_eq!(report.outside_regions, 1);
    assert_eq!(report.scored, 2);
    assert_eq!(report.from_coordinates, 1);
    assert_eq!(report.from_place, 1);
    assert_eq!(report.from_city, 0);
}

#[rstest]
fn language_filter_can_be_disabled(square_index: RegionIndex) {
    let aggregator = SentimentAggregator::new(
        square_index,
        LocationResolver::new(),
        StopWords::default(),
        SentimentLexicon::default(),
    )
    .expect("aggregator")
    .with_language(None);
    let posts = vec![
        Post::new(1, "hola").with_language("es").with_coordinates(Coord { x: 5.0, y: 5.0 }),
        Post::new(2, "unlabelled").with_coordinates(Coord { x: 5.0, y: 5.0 }),
    ];
    assert_eq!(aggregator.prepare(posts).report.scored, 2);
}

#[rstest]
fn stopwords_removed_before_scoring(square_index: RegionIndex) {
    let stopwords: StopWords = ["the".to_owned(), "USER".to_owned()].into_iter().collect();
    let aggregator = SentimentAggregator::new(
        square_index,
        LocationResolver::new(),
        stopwords,
        seed(&[("good", 3)]),
    )
    .expect("aggregator");
    let post = Post::new(1, "@bob the good life")
        .with_language("en")
        .with_coordinates(Coord { x: 5.0, y: 5.0 });

    let run = aggregator.run(vec![post]);
    let row = run.rows.first().expect("one row");
    assert_eq!(row.words, ["good", "life"]);
    assert_close(row.score, 6.0);
    assert_eq!(run.report.seed_terms, 1);
    assert_eq!(run.report.inferred_terms, 1);
}

#[rstest]
fn city_resolution_uses_new_york_alias() {
    let new_york = Region::new(
        "New York",
        vec![
            Coord { x: -79.8, y: 40.5 },
            Coord { x: -79.8, y: 45.0 },
            Coord { x: -71.9, y: 45.0 },
            Coord { x: -71.9, y: 40.5 },
        ],
    )
    .expect("new york region");
    let cities: CityTable = [("New York City".to_owned(), Coord { x: -74.0, y: 40.7 })]
        .into_iter()
        .collect();
    let aggregator = SentimentAggregator::new(
        RegionIndex::new(vec![new_york]),
        LocationResolver::with_cities(cities),
        StopWords::default(),
        seed(&[("love", 3)]),
    )
    .expect("aggregator");
    let post = Post::new(9, "love this city")
        .with_language("en")
        .with_user_location("New York, NY");

    let run = aggregator.run(vec![post]);
    let row = run.rows.first().expect("one row");
    assert_eq!(row.region, "New York");
    assert_close(row.lat, 40.7);
    assert_close(row.lon, -74.0);
    assert_eq!(run.report.from_city, 1);
}
