//! Command-line argument parsing for the composer driver
//!
//! Supports:
//! - Loading a composition from JSON (a lone profile header otherwise)
//! - Scripted region clicks, option clicks and rich control input, run in
//!   command-line order
//! - An alternate config file

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::options::OptionKey;

/// Drive a composer from the command line and print the result
#[derive(Parser, Debug)]
#[command(
    name = "doge-composer",
    version,
    about = "Direct-manipulation content composer"
)]
pub struct CliArgs {
    /// Composition JSON file
    #[arg(value_name = "COMPOSITION")]
    pub composition: Option<PathBuf>,

    /// Click the region with this edit name
    #[arg(long = "click", value_name = "NAME")]
    pub clicks: Vec<String>,

    /// Click this option in the active toolbelt
    #[arg(long = "option", value_name = "KEY")]
    pub options: Vec<String>,

    /// Type into a rich control of the active toolbelt
    #[arg(long = "input", value_name = "KEY=VALUE")]
    pub inputs: Vec<String>,

    /// Config file to use instead of the user config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Command-line positions of `clicks`, `options` and `inputs`
    #[arg(skip)]
    pub positions: StepPositions,
}

/// Where each step argument appeared on the command line
#[derive(Debug, Clone, Default)]
pub struct StepPositions {
    pub clicks: Vec<usize>,
    pub options: Vec<usize>,
    pub inputs: Vec<usize>,
}

impl StepPositions {
    fn from_matches(matches: &ArgMatches) -> Self {
        let of = |id: &str| {
            matches
                .indices_of(id)
                .map(|indices| indices.collect())
                .unwrap_or_default()
        };
        Self {
            clicks: of("clicks"),
            options: of("options"),
            inputs: of("inputs"),
        }
    }
}

/// One scripted interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    ClickRegion(String),
    ClickOption(String),
    Input { option: OptionKey, value: String },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub composition: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Steps in the order they were given
    pub steps: Vec<Step>,
}

impl CliArgs {
    /// Parse the process arguments, recording step positions
    ///
    /// Exits with usage on invalid arguments, like [`Parser::parse`].
    pub fn parse_ordered() -> Self {
        let matches = Self::command().get_matches();
        Self::from_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    pub fn try_parse_ordered<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut args = Self::from_arg_matches(matches)?;
        args.positions = StepPositions::from_matches(matches);
        Ok(args)
    }

    /// Convert parsed CLI args into a session script
    ///
    /// Steps without a recorded position keep region clicks, then option
    /// clicks, then inputs.
    pub fn into_session(self) -> Result<SessionConfig, String> {
        let CliArgs {
            composition,
            clicks,
            options,
            inputs,
            config,
            positions,
        } = self;
        let at = |indices: &[usize], i: usize| indices.get(i).copied().unwrap_or(usize::MAX);

        let mut steps: Vec<(usize, Step)> = Vec::new();
        for (i, name) in clicks.into_iter().enumerate() {
            steps.push((at(&positions.clicks, i), Step::ClickRegion(name)));
        }
        for (i, key) in options.into_iter().enumerate() {
            steps.push((at(&positions.options, i), Step::ClickOption(key)));
        }
        for (i, raw) in inputs.iter().enumerate() {
            let Some((key, value)) = raw.split_once('=') else {
                return Err(format!("Expected KEY=VALUE for --input, got '{}'", raw));
            };
            let option: OptionKey = key.trim().parse()?;
            let step = Step::Input {
                option,
                value: value.to_string(),
            };
            steps.push((at(&positions.inputs, i), step));
        }
        steps.sort_by_key(|(position, _)| *position);

        Ok(SessionConfig {
            composition,
            config,
            steps: steps.into_iter().map(|(_, step)| step).collect(),
        })
    }
}
