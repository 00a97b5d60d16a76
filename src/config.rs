//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::{feedback::SampleLoader, state::app_state::AppOptions};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "boomtick")]
#[command(about = "A countdown bomb timer and domination bar served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Seconds for one side to fill the domination bar (clamped to 1-3600)
    #[arg(short, long, default_value = "60")]
    pub fill_duration: f64,

    /// Explosion sample played when the countdown expires
    #[arg(long)]
    pub explosion_sample: Option<PathBuf>,

    /// How long an explosion waits for the sample before using the synthesized sound
    #[arg(long, default_value = "300")]
    pub sample_timeout_ms: u64,

    /// Disable sound cues
    #[arg(long)]
    pub mute: bool,

    /// Disable vibration cues
    #[arg(long)]
    pub no_haptics: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Application options derived from the command line
    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            port: self.port,
            host: self.host.clone(),
            fill_duration: self.fill_duration,
            sample: SampleLoader::new(
                self.explosion_sample.clone(),
                Duration::from_millis(self.sample_timeout_ms),
            ),
            audio: !self.mute,
            haptics: !self.no_haptics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_all_feedback() {
        let config = Config::try_parse_from(["boomtick"]).expect("config");
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");

        let options = config.app_options();
        assert!(options.audio && options.haptics);
        assert_eq!(options.fill_duration, 60.0);
        assert_eq!(options.sample.timeout(), Duration::from_millis(300));
    }

    #[test]
    fn flags_disable_feedback() {
        let config = Config::try_parse_from([
            "boomtick",
            "--mute",
            "--no-haptics",
            "-v",
            "-f",
            "15",
            "--explosion-sample",
            "assets/explosion.wav",
        ])
        .expect("config");

        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.explosion_sample, Some(PathBuf::from("assets/explosion.wav")));
        let options = config.app_options();
        assert!(!options.audio && !options.haptics);
        assert_eq!(options.fill_duration, 15.0);
    }
}
