//! Driver configuration.
//!
//! Engine limits come from the environment first and command-line options
//! second, so a flag always wins over a variable:
//!
//! | Variable | Option | Engine setting |
//! |----------|--------|----------------|
//! | `KNOT_MAX_DEPTH` | `--max-depth=<n>` | `ParseConfig::max_depth` |
//! | `KNOT_MAX_REPETITIONS` | `--max-repetitions=<n>` | `ParseConfig::max_repetitions` |

use knot_parse::ParseConfig;
use thiserror::Error;

pub const MAX_DEPTH_VAR: &str = "KNOT_MAX_DEPTH";
pub const MAX_REPETITIONS_VAR: &str = "KNOT_MAX_REPETITIONS";

/// A setting that could not be read.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {source_name}: expected a non-negative integer")]
    InvalidNumber { source_name: String, value: String },
    #[error("unknown option `{0}`")]
    UnknownOption(String),
}

/// Limits the driver passes to the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    pub max_depth: Option<usize>,
    pub max_repetitions: Option<usize>,
}

fn parse_number(source_name: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            source_name: source_name.to_string(),
            value: value.to_string(),
        })
}

impl CliConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = CliConfig::default();
        if let Some(value) = lookup(MAX_DEPTH_VAR) {
            config.max_depth = Some(parse_number(MAX_DEPTH_VAR, &value)?);
        }
        if let Some(value) = lookup(MAX_REPETITIONS_VAR) {
            config.max_repetitions = Some(parse_number(MAX_REPETITIONS_VAR, &value)?);
        }
        Ok(config)
    }

    /// Apply `--option=value` flags from `args` and return the remaining
    /// positional arguments in order.
    pub fn apply_args<'a>(&mut self, args: &'a [String]) -> Result<Vec<&'a str>, ConfigError> {
        let mut positional = Vec::new();
        for arg in args {
            if let Some(value) = arg.strip_prefix("--max-depth=") {
                self.max_depth = Some(parse_number("--max-depth", value)?);
            } else if let Some(value) = arg.strip_prefix("--max-repetitions=") {
                self.max_repetitions = Some(parse_number("--max-repetitions", value)?);
            } else if arg.starts_with("--") {
                return Err(ConfigError::UnknownOption(arg.clone()));
            } else {
                positional.push(arg.as_str());
            }
        }
        Ok(positional)
    }

    /// The engine configuration these limits describe.
    pub fn parse_config(&self) -> ParseConfig {
        let mut config = ParseConfig::default();
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        if let Some(limit) = self.max_repetitions {
            config = config.with_max_repetitions(limit);
        }
        config
    }
}

#[cfg(test)]
mod tests;
