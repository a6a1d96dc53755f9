//! `run` command: load the tables, score the posts, write the rows.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use happystates_core::LocationResolver;
use happystates_data::{
    DEFAULT_PLACE_COUNTRY, OutputFormat, PostReaderOptions, load_cities, load_lexicon,
    load_regions, load_stopwords, read_posts, write_inferred_lexicon, write_output,
};
use happystates_scorer::{DEFAULT_LANGUAGE, RunReport, SentimentAggregator};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CITIES, ARG_FORMAT, ARG_INFERRED_LEXICON, ARG_INPUTS_DIR, ARG_LANGUAGE, ARG_LEXICON,
    ARG_OUTPUT, ARG_PLACE_COUNTRY, ARG_POSTS, ARG_REGIONS, ARG_RESOLVE_CITIES, ARG_STOPWORDS,
    CliError, ENV_OUTPUT, ENV_POSTS,
};

/// Directory searched for the input tables when no directory is configured.
pub(crate) const DEFAULT_INPUTS_DIR: &str = "input_files";
pub(crate) const DEFAULT_REGIONS_FILE: &str = "states.xml";
pub(crate) const DEFAULT_CITIES_FILE: &str = "US_cities.txt";
pub(crate) const DEFAULT_STOPWORDS_FILE: &str = "stopwords.txt";
pub(crate) const DEFAULT_LEXICON_FILE: &str = "AFINN-111.txt";
/// `--language` value that disables the language filter.
pub(crate) const ANY_LANGUAGE: &str = "any";

/// CLI arguments for the `run` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Attribute each post in a JSON-lines dump to the US state it \
                 was sent from, extend the AFINN lexicon with words inferred \
                 from context, and write one scored row per located post. \
                 Paths can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Score the sentiment of geotagged posts"
)]
#[ortho_config(prefix = "HAPPYSTATES")]
pub(crate) struct RunArgs {
    /// Path to the posts, one JSON object per line.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) posts: Option<Utf8PathBuf>,
    /// Where to write the scored rows.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Directory containing the default input table filenames.
    #[arg(long = ARG_INPUTS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) inputs_dir: Option<Utf8PathBuf>,
    /// Override the region boundary file (`states.xml`).
    #[arg(long = ARG_REGIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) regions: Option<Utf8PathBuf>,
    /// Override the city table (`US_cities.txt`).
    #[arg(long = ARG_CITIES, value_name = "path")]
    #[serde(default)]
    pub(crate) cities: Option<Utf8PathBuf>,
    /// Override the stopword list (`stopwords.txt`).
    #[arg(long = ARG_STOPWORDS, value_name = "path")]
    #[serde(default)]
    pub(crate) stopwords: Option<Utf8PathBuf>,
    /// Override the seed lexicon (`AFINN-111.txt`).
    #[arg(long = ARG_LEXICON, value_name = "path")]
    #[serde(default)]
    pub(crate) lexicon: Option<Utf8PathBuf>,
    /// Locate posts by the city named in the author's profile.
    #[arg(long = ARG_RESOLVE_CITIES, value_name = "bool")]
    #[serde(default)]
    pub(crate) resolve_cities: Option<bool>,
    /// Only score posts in this language (`any` accepts every post).
    #[arg(long = ARG_LANGUAGE, value_name = "code")]
    #[serde(default)]
    pub(crate) language: Option<String>,
    /// Trust place tags only from this country.
    #[arg(long = ARG_PLACE_COUNTRY, value_name = "name")]
    #[serde(default)]
    pub(crate) place_country: Option<String>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Also write the inferred lexicon entries to this path.
    #[arg(long = ARG_INFERRED_LEXICON, value_name = "path")]
    #[serde(default)]
    pub(crate) inferred_lexicon: Option<Utf8PathBuf>,
}

impl RunArgs {
    pub(crate) fn into_config(self) -> Result<RunConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RunConfig::try_from(merged)
    }
}

/// Resolved `run` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunConfig {
    /// JSON-lines post dump.
    pub(crate) posts: Utf8PathBuf,
    /// Destination for scored rows.
    pub(crate) output: Utf8PathBuf,
    /// Region boundary file.
    pub(crate) regions: Utf8PathBuf,
    /// City table; read only when `resolve_cities` is set.
    pub(crate) cities: Utf8PathBuf,
    /// Stopword list.
    pub(crate) stopwords: Utf8PathBuf,
    /// Seed lexicon.
    pub(crate) lexicon: Utf8PathBuf,
    /// Whether profile locations are looked up in the city table.
    pub(crate) resolve_cities: bool,
    /// Accepted post language; `None` accepts every post.
    pub(crate) language: Option<String>,
    /// Country whose place tags are trusted.
    pub(crate) place_country: String,
    /// Serialisation of the scored rows.
    pub(crate) format: OutputFormat,
    /// Optional destination for the inferred lexicon.
    pub(crate) inferred_lexicon: Option<Utf8PathBuf>,
}

impl RunConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.posts, ARG_POSTS)?;
        Self::require_existing(&self.regions, ARG_REGIONS)?;
        if self.resolve_cities {
            Self::require_existing(&self.cities, ARG_CITIES)?;
        }
        Self::require_existing(&self.stopwords, ARG_STOPWORDS)?;
        Self::require_existing(&self.lexicon, ARG_LEXICON)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match happystates_data::fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn post_reader_options(&self) -> PostReaderOptions {
        PostReaderOptions {
            place_country: self.place_country.clone(),
        }
    }
}

impl TryFrom<RunArgs> for RunConfig {
    type Error = CliError;

    fn try_from(args: RunArgs) -> Result<Self, Self::Error> {
        let posts = args.posts.ok_or(CliError::MissingArgument {
            field: ARG_POSTS,
            env: ENV_POSTS,
        })?;
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_OUTPUT,
        })?;

        let inputs_dir = args
            .inputs_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_INPUTS_DIR));
        let regions = args
            .regions
            .unwrap_or_else(|| inputs_dir.join(DEFAULT_REGIONS_FILE));
        let cities = args
            .cities
            .unwrap_or_else(|| inputs_dir.join(DEFAULT_CITIES_FILE));
        let stopwords = args
            .stopwords
            .unwrap_or_else(|| inputs_dir.join(DEFAULT_STOPWORDS_FILE));
        let lexicon = args
            .lexicon
            .unwrap_or_else(|| inputs_dir.join(DEFAULT_LEXICON_FILE));

        let language = match args.language {
            Some(code) if code.eq_ignore_ascii_case(ANY_LANGUAGE) => None,
            Some(code) => Some(code),
            None => Some(DEFAULT_LANGUAGE.to_owned()),
        };

        Ok(Self {
            posts,
            output,
            regions,
            cities,
            stopwords,
            lexicon,
            resolve_cities: args.resolve_cities.unwrap_or(false),
            language,
            place_country: args
                .place_country
                .unwrap_or_else(|| DEFAULT_PLACE_COUNTRY.to_owned()),
            format: args.format.unwrap_or_default(),
            inferred_lexicon: args.inferred_lexicon,
        })
    }
}

pub(crate) fn run_pipeline(args: RunArgs) -> Result<RunReport, CliError> {
    let config = resolve_run_config(args)?;
    execute(&config)
}

fn resolve_run_config(args: RunArgs) -> Result<RunConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Run the pipeline for an already validated configuration.
pub(crate) fn execute(config: &RunConfig) -> Result<RunReport, CliError> {
    let regions = load_regions(&config.regions)?;
    let resolver = if config.resolve_cities {
        let cities = load_cities(&config.cities)?;
        info!("loaded {} cities from {}", cities.len(), config.cities);
        LocationResolver::with_cities(cities)
    } else {
        LocationResolver::new()
    };
    if !resolver.resolves_cities() {
        info!("profile locations are ignored; pass --{ARG_RESOLVE_CITIES} true to use them");
    }
    let stopwords = load_stopwords(&config.stopwords)?;
    let lexicon = load_lexicon(&config.lexicon)?;
    info!(
        "loaded {} regions, {} stopwords and {} lexicon terms",
        regions.len(),
        stopwords.len(),
        lexicon.seed_len()
    );

    let aggregator = SentimentAggregator::new(regions, resolver, stopwords, lexicon)?
        .with_language(config.language.clone());
    let posts = read_posts(&config.posts, &config.post_reader_options())?;
    let run = aggregator.run(posts);

    write_output(&config.output, config.format, &run.rows)?;
    info!("wrote {} rows to {}", run.rows.len(), config.output);
    if let Some(path) = &config.inferred_lexicon {
        write_inferred_lexicon(path, &run.lexicon)?;
        info!(
            "wrote {} inferred terms to {path}",
            run.lexicon.inferred_len()
        );
    }
    Ok(run.report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RunConfig, CliError> {
    let merged = RunArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RunConfig::try_from(merged)
}
