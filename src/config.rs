//! Command line configuration and logging setup

use crate::messages::Language;
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Fastest auto-play interval
pub const MIN_SPEED_MS: u64 = 50;
/// Slowest auto-play interval
pub const MAX_SPEED_MS: u64 = 5000;
/// Increment used by the speed keys
pub const SPEED_STEP_MS: u64 = 50;

/// Step through a shunting-yard evaluation of a math expression
#[derive(Debug, Parser)]
#[command(name = "yardstep", version, about)]
pub struct Cli {
    /// Expression to evaluate (prompted for in the TUI when omitted)
    pub expression: Option<String>,

    /// Auto-play interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub speed: u64,

    /// Narration language (`en` or `ar`); defaults to the locale
    #[arg(long, value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Print every step to stdout instead of starting the TUI
    #[arg(long)]
    pub plain: bool,

    /// Write logs to this file (filtered by `RUST_LOG`)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn language(&self) -> Language {
        match self.lang {
            Some(lang) => lang,
            None => Language::detect(None),
        }
    }

    /// Auto-play interval, clamped to the supported range
    pub fn interval(&self) -> Duration {
        Duration::from_millis(clamp_speed(self.speed))
    }
}

pub fn clamp_speed(ms: u64) -> u64 {
    ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS)
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| {
        let known: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        format!("unknown language '{code}' (expected one of: {})", known.join(", "))
    })
}

/// Install the global `tracing` subscriber.
///
/// Logs go to `log_file` when given. Without one they go to stderr in plain
/// mode and nowhere in TUI mode, since the TUI owns the terminal.
pub fn init_logging(log_file: Option<&PathBuf>, plain: bool) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            // Ignore a second initialization
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None if plain => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from(["yardstep", "2+3", "--speed", "250", "--lang", "ar", "--plain"]);
        assert_eq!(cli.expression.as_deref(), Some("2+3"));
        assert_eq!(cli.interval(), Duration::from_millis(250));
        assert_eq!(cli.language(), Language::Arabic);
        assert!(cli.plain);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["yardstep"]);
        assert!(cli.expression.is_none());
        assert_eq!(cli.speed, 1000);
        assert!(!cli.plain);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_speed_is_clamped() {
        assert_eq!(clamp_speed(1), MIN_SPEED_MS);
        assert_eq!(clamp_speed(60_000), MAX_SPEED_MS);
        assert_eq!(clamp_speed(300), 300);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["yardstep", "--lang", "xx"]).is_err());
    }
}
