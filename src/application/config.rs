use thiserror::Error;

use crate::domain::{DEFAULT_DENSITY, DEFAULT_MUTATION_CHANCE};

/// Board side length used when none is given
pub const DEFAULT_SIZE: usize = 20;
/// Pause between generations, in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 250;
/// Longest pause the speed control allows
pub const MAX_DELAY_MS: u64 = 1000;
/// Generations the headless driver runs by default
pub const DEFAULT_GENERATIONS: u64 = 100;

/// Errors raised when building a simulation configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    ZeroSize,
    #[error("density {0} must be between 0.0 and 1.0")]
    InvalidDensity(f64),
    #[error("mutation chance {numerator}/{denominator} is not a probability")]
    InvalidMutationChance { numerator: u32, denominator: u32 },
    #[error("delay {0}ms exceeds the {max}ms maximum", max = MAX_DELAY_MS)]
    DelayTooLong(u64),
    #[error("unknown argument `{0}`")]
    UnknownArgument(String),
    #[error("`{0}` expects a value")]
    MissingValue(&'static str),
    #[error("invalid value `{value}` for `{flag}`")]
    InvalidValue { flag: &'static str, value: String },
}

/// Simulation parameters shared by the session and the binaries
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub size: usize,
    pub density: f64,
    /// Per-generation mutation odds as (numerator, denominator)
    pub mutation_chance: (u32, u32),
    pub delay_ms: u64,
    /// Fixed seed for reproducible runs; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Evolve rows on the rayon pool
    pub parallel: bool,
    /// Generations to run (headless driver only)
    pub generations: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            density: DEFAULT_DENSITY,
            mutation_chance: DEFAULT_MUTATION_CHANCE,
            delay_ms: DEFAULT_DELAY_MS,
            seed: None,
            parallel: false,
            generations: DEFAULT_GENERATIONS,
        }
    }
}

impl SimulationConfig {
    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::InvalidDensity(self.density));
        }
        let (numerator, denominator) = self.mutation_chance;
        if denominator == 0 || numerator > denominator {
            return Err(ConfigError::InvalidMutationChance { numerator, denominator });
        }
        if self.delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::DelayTooLong(self.delay_ms));
        }
        Ok(())
    }

    /// Build a validated config from command line tokens (program name excluded).
    ///
    /// Flags: `--size N`, `--density D`, `--seed S`, `--delay MS`,
    /// `--mutation N/D`, `--generations G`, `--parallel`.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--size" => config.size = parse_value("--size", args.next())?,
                "--density" => config.density = parse_value("--density", args.next())?,
                "--seed" => config.seed = Some(parse_value("--seed", args.next())?),
                "--delay" => config.delay_ms = parse_value("--delay", args.next())?,
                "--generations" => config.generations = parse_value("--generations", args.next())?,
                "--mutation" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--mutation"))?;
                    config.mutation_chance = parse_ratio(&value)
                        .ok_or(ConfigError::InvalidValue { flag: "--mutation", value })?;
                }
                "--parallel" => config.parallel = true,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(
    flag: &'static str,
    value: Option<String>,
) -> Result<T, ConfigError> {
    let value = value.ok_or(ConfigError::MissingValue(flag))?;
    value.parse().map_err(|_| ConfigError::InvalidValue { flag, value })
}

/// Parse `N/D`
fn parse_ratio(value: &str) -> Option<(u32, u32)> {
    let (n, d) = value.split_once('/')?;
    Some((n.trim().parse().ok()?, d.trim().parse().ok()?))
}
