//! Command-line interface for the happystates sentiment pipeline.
#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod pipeline;

pub use error::CliError;

use pipeline::{RunArgs, run_pipeline};

pub(crate) const ARG_POSTS: &str = "posts";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_INPUTS_DIR: &str = "inputs-dir";
pub(crate) const ARG_REGIONS: &str = "regions";
pub(crate) const ARG_CITIES: &str = "cities";
pub(crate) const ARG_STOPWORDS: &str = "stopwords";
pub(crate) const ARG_LEXICON: &str = "lexicon";
pub(crate) const ARG_RESOLVE_CITIES: &str = "resolve-cities";
pub(crate) const ARG_LANGUAGE: &str = "language";
pub(crate) const ARG_PLACE_COUNTRY: &str = "place-country";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ARG_INFERRED_LEXICON: &str = "inferred-lexicon";
pub(crate) const ENV_POSTS: &str = "HAPPYSTATES_CMDS_RUN_POSTS";
pub(crate) const ENV_OUTPUT: &str = "HAPPYSTATES_CMDS_RUN_OUTPUT";

/// Run the happystates CLI with the current process arguments and
/// environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, an
/// input cannot be loaded, or the results cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Run(args) => {
            let report = run_pipeline(args)?;
            log::info!("scored {} of {} posts", report.scored, report.read);
        }
    }
    Ok(())
}

/// Install the `tracing` formatter; `log` records are bridged into it.
///
/// `RUST_LOG` wins when set, otherwise `-v` raises the level from `info`.
fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        log::debug!("a global logger is already installed");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "happystates",
    about = "Geotag posts to US states and score their sentiment",
    version
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Attribute posts to states and write their sentiment scores.
    Run(RunArgs),
}

#[cfg(test)]
mod tests;
