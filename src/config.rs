//! Settings file and command-line overrides
//!
//! Settings are read from `<config_dir>/day-carousel/config.toml` (or the
//! path given with `--config`). Every field is optional; command-line flags
//! win over the file, and the file wins over built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use serde::Deserialize;

use crate::capacity::CapacityPolicy;
use crate::carousel::ClampMode;
use crate::days;

const APP_NAME: &str = "day-carousel";
const DEFAULT_DAYS: usize = 14;
const DEFAULT_LOAD_DELAY_MS: u64 = 300;

/// Command-line arguments
#[derive(Debug, Default, Parser)]
#[command(name = "day-carousel", version, about = "Pick a day from a scrolling carousel")]
pub struct Cli {
    /// First day in the carousel (YYYY-MM-DD, default today)
    #[arg(long, value_parser = days::parse_date)]
    pub start: Option<NaiveDate>,

    /// Number of days to show
    #[arg(long, value_parser = clap::value_parser!(u64).range(..=days::MAX_DAYS as u64))]
    pub days: Option<u64>,

    /// Fixed number of visible days, overriding the width breakpoint
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Viewport width below which the narrow capacity is used
    #[arg(long)]
    pub breakpoint: Option<u32>,

    /// How long a selected day stays loading, in milliseconds
    #[arg(long)]
    pub load_delay_ms: Option<u64>,

    /// When to pull a stale window offset back into range
    #[arg(long, value_enum)]
    pub clamp: Option<ClampMode>,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(long)]
    pub debug: bool,
}

/// Contents of the config file
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub days: Option<usize>,
    pub capacity: Option<usize>,
    pub breakpoint: Option<u32>,
    pub narrow_capacity: Option<usize>,
    pub wide_capacity: Option<usize>,
    pub load_delay_ms: Option<u64>,
    pub clamp: Option<ClampMode>,
}

impl FileConfig {
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse config")?;
        if let Some(days) = config.days {
            if days > days::MAX_DAYS {
                bail!("days = {} exceeds the limit of {}", days, days::MAX_DAYS);
            }
        }
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("In {}", path.display()))
    }
}

/// Effective settings after merging defaults, file and CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub start: NaiveDate,
    pub days: usize,
    pub capacity: Option<usize>,
    pub policy: CapacityPolicy,
    pub load_delay: Duration,
    pub clamp: ClampMode,
}

impl Settings {
    /// Resolve settings for `cli`, reading the config file it points at
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match cli.config.as_deref() {
            Some(path) => FileConfig::load(path)?,
            None => match default_config_path() {
                Some(path) => FileConfig::load(&path)?,
                None => FileConfig::default(),
            },
        };
        Ok(Self::merge(cli, &file, days::today()))
    }

    /// Merge with precedence CLI > file > defaults
    pub fn merge(cli: &Cli, file: &FileConfig, today: NaiveDate) -> Self {
        let defaults = CapacityPolicy::default();
        let policy = CapacityPolicy {
            breakpoint: cli
                .breakpoint
                .or(file.breakpoint)
                .unwrap_or(defaults.breakpoint),
            narrow: file.narrow_capacity.unwrap_or(defaults.narrow),
            wide: file.wide_capacity.unwrap_or(defaults.wide),
        };

        let capacity = cli.capacity.or(file.capacity);
        if capacity == Some(0) {
            tracing::warn!("capacity 0 requested, using 1");
        }

        Self {
            start: cli.start.unwrap_or(today),
            days: cli
                .days
                .map(|d| usize::try_from(d).unwrap_or(usize::MAX))
                .or(file.days)
                .unwrap_or(DEFAULT_DAYS)
                .min(days::MAX_DAYS),
            capacity,
            policy,
            load_delay: Duration::from_millis(
                cli.load_delay_ms
                    .or(file.load_delay_ms)
                    .unwrap_or(DEFAULT_LOAD_DELAY_MS),
            ),
            clamp: cli.clamp.or(file.clamp).unwrap_or_default(),
        }
    }
}

/// `<config_dir>/day-carousel/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
}

/// Directory for the log file
pub fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .map(|d| d.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::merge(&Cli::default(), &FileConfig::default(), today());

        assert_eq!(settings.start, today());
        assert_eq!(settings.days, 14);
        assert_eq!(settings.capacity, None);
        assert_eq!(settings.policy, CapacityPolicy::default());
        assert_eq!(settings.load_delay, Duration::from_millis(300));
        assert_eq!(settings.clamp, ClampMode::Eager);
    }

    #[test]
    fn test_parse_file() {
        let file = FileConfig::parse(
            r#"
            days = 30
            breakpoint = 1000
            narrow_capacity = 2
            wide_capacity = 7
            clamp = "lazy"
            "#,
        )
        .unwrap();

        let settings = Settings::merge(&Cli::default(), &file, today());
        assert_eq!(settings.days, 30);
        assert_eq!(
            settings.policy,
            CapacityPolicy {
                breakpoint: 1000,
                narrow: 2,
                wide: 7
            }
        );
        assert_eq!(settings.clamp, ClampMode::Lazy);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileConfig::parse("colour = \"red\"").is_err());
        assert!(FileConfig::parse("days = \"many\"").is_err());
    }

    #[test]
    fn test_day_count_limit() {
        let at_limit = format!("days = {}", days::MAX_DAYS);
        assert_eq!(
            FileConfig::parse(&at_limit).unwrap().days,
            Some(days::MAX_DAYS)
        );
        let over = format!("days = {}", days::MAX_DAYS + 1);
        assert!(FileConfig::parse(&over).is_err());

        let limit = days::MAX_DAYS.to_string();
        let cli = Cli::try_parse_from(["day-carousel", "--days", limit.as_str()]).unwrap();
        assert_eq!(cli.days, Some(days::MAX_DAYS as u64));
        assert!(Cli::try_parse_from(["day-carousel", "--days", "3661"]).is_err());
        assert!(Cli::try_parse_from(["day-carousel", "--days", "18446744073709551615"]).is_err());

        // Values that bypass clap are still capped
        let cli = Cli {
            days: Some(u64::MAX),
            ..Default::default()
        };
        let settings = Settings::merge(&cli, &FileConfig::default(), today());
        assert_eq!(settings.days, days::MAX_DAYS);
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = FileConfig {
            days: Some(30),
            capacity: Some(4),
            load_delay_ms: Some(50),
            clamp: Some(ClampMode::Lazy),
            ..Default::default()
        };
        let cli = Cli::parse_from([
            "day-carousel",
            "--days",
            "7",
            "--capacity",
            "3",
            "--load-delay-ms",
            "0",
            "--clamp",
            "eager",
            "--start",
            "2026-01-05",
        ]);

        let settings = Settings::merge(&cli, &file, today());
        assert_eq!(settings.days, 7);
        assert_eq!(settings.capacity, Some(3));
        assert_eq!(settings.load_delay, Duration::ZERO);
        assert_eq!(settings.clamp, ClampMode::Eager);
        assert_eq!(settings.start, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    }

    #[test]
    fn test_load_missing_and_present_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(FileConfig::load(&path).unwrap(), FileConfig::default());

        fs::write(&path, "capacity = 6\n").unwrap();
        assert_eq!(FileConfig::load(&path).unwrap().capacity, Some(6));

        fs::write(&path, "capacity = [").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }
}
