//! Feriados - countdown to the next Argentine public holiday.
//!
//! Prints the panel label or the "next holiday" notification, forces a
//! refresh of the cached holiday list, edits the two selection settings, or
//! keeps a live label on screen that follows settings changes.

mod watch;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feriados_core::{Config, Countdown, FilterPolicy, NextHoliday, Notification};

// ============================================================================
// Constants
// ============================================================================

/// Default seconds between config re-reads in watch mode
const DEFAULT_WATCH_INTERVAL_SECS: u64 = 60;

#[derive(Parser)]
#[command(name = "feriados")]
#[command(about = "Countdown to the next Argentine public holiday", long_about = None)]
struct Cli {
    /// Directory for the cached holiday list
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Base URL of the holidays API
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print the countdown label using the configured settings
    Label,
    /// Show the next holiday with its date and kind
    Next {
        /// Skip holidays that fall on a weekend
        #[arg(long)]
        skip_weekends: bool,
    },
    /// Drop the cached holiday list, fetch it again and print the label
    Refresh,
    /// Change a selection setting
    Set {
        #[arg(value_enum)]
        key: SettingKey,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Keep printing the label, following settings changes
    Watch {
        /// Seconds between config re-reads
        #[arg(long, default_value_t = DEFAULT_WATCH_INTERVAL_SECS)]
        interval: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SettingKey {
    SkipWeekends,
    SkipToday,
}

impl SettingKey {
    fn as_str(&self) -> &'static str {
        match self {
            SettingKey::SkipWeekends => "skip-weekends",
            SettingKey::SkipToday => "skip-today",
        }
    }
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Config file values with environment, then command line, overrides applied.
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?.with_env_overrides();
    if let Some(ref dir) = cli.cache_dir {
        config.cache_dir = Some(dir.clone());
    }
    if let Some(ref url) = cli.api_url {
        config.api_url = Some(url.clone());
    }
    Ok(config)
}

/// Panel label for a holiday, relative to the date it was selected on.
pub(crate) fn label(next: &NextHoliday, today: NaiveDate) -> String {
    Countdown::for_holiday(next, today).to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    let config = effective_config(&cli)?;
    let today = Local::now().date_naive();
    let command = cli.command.unwrap_or(Command::Label);

    match command {
        Command::Label => {
            let selector = feriados_core::open(&config)?;
            if let Some(next) = selector.next_holiday_on(today, config.policy()).await {
                println!("{}", label(&next, today));
            }
        }
        Command::Next { skip_weekends } => {
            let selector = feriados_core::open(&config)?;
            let next = if skip_weekends {
                selector.next_skipping_weekends().await
            } else {
                selector.next_unfiltered().await
            };
            if let Some(next) = next {
                println!("{}", Notification::for_holiday(&next));
            }
        }
        Command::Refresh => {
            let selector = feriados_core::open(&config)?;
            info!("Refreshing holiday data");
            if let Some(next) = selector.refresh_on(today, config.policy()).await {
                println!("{}", label(&next, today));
            }
        }
        Command::Set { key, value } => {
            // Persist only the settings, not one-off command line overrides
            let mut stored = Config::load()?;
            stored.set(key.as_str(), value)?;
            stored.save()?;
            info!(key = key.as_str(), value, "Setting saved");
        }
        Command::Watch { interval } => {
            let selector = feriados_core::open(&config)?;
            let interval = Duration::from_secs(interval.max(1));
            watch::run(selector, config.policy(), interval, || {
                Ok::<FilterPolicy, anyhow::Error>(Config::load()?.policy())
            })
            .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use feriados_core::HolidayRecord;

    #[test]
    fn test_default_command_is_label() {
        let cli = Cli::try_parse_from(["feriados"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_next_skip_weekends_flag() {
        let cli = Cli::try_parse_from(["feriados", "next", "--skip-weekends"]).unwrap();
        assert_eq!(cli.command, Some(Command::Next { skip_weekends: true }));

        let cli = Cli::try_parse_from(["feriados", "next"]).unwrap();
        assert_eq!(cli.command, Some(Command::Next { skip_weekends: false }));
    }

    #[test]
    fn test_set_parses_key_and_value() {
        let cli = Cli::try_parse_from(["feriados", "set", "skip-today", "true"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Set {
                key: SettingKey::SkipToday,
                value: true
            })
        );
        assert!(Cli::try_parse_from(["feriados", "set", "skip-mondays", "true"]).is_err());
        assert!(Cli::try_parse_from(["feriados", "set", "skip-today", "maybe"]).is_err());
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::try_parse_from([
            "feriados",
            "refresh",
            "--cache-dir",
            "/tmp/feriados",
            "--api-url",
            "http://localhost:8080/feriados",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Command::Refresh));
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/feriados")));
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8080/feriados"));
    }

    #[test]
    fn test_label_counts_from_selection_date() {
        let next = NextHoliday::new(
            HolidayRecord::new(1, 1, "Año Nuevo", "inamovible"),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        let new_years_eve = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(label(&next, new_years_eve), "Falta 1 día!");
        assert_eq!(label(&next, next.date), "Es hoy!");
    }

    #[test]
    fn test_setting_keys_match_config_names() {
        let mut config = Config::default();
        config.set(SettingKey::SkipWeekends.as_str(), true).unwrap();
        config.set(SettingKey::SkipToday.as_str(), true).unwrap();
        assert_eq!(config.policy(), FilterPolicy::new(true, true));
    }
}
