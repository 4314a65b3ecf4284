//! Command-line argument parsing for the globe viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Globe viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "globe", about = "Procedural globe with zoom-to-city choreography")]
pub struct CliArgs {
    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Point of interest to select once the session starts.
    #[arg(long)]
    pub select: Option<String>,

    /// Write an equirectangular PNG of the surface to this path.
    #[arg(long)]
    pub bake: Option<PathBuf>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(frames) = args.frames {
            self.app.frames = frames;
        }
        if let Some(seed) = args.seed {
            self.surface.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            frames: Some(30),
            seed: Some(99),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.app.frames, 30);
        assert_eq!(config.surface.seed, 99);
        // Non-overridden fields retain defaults
        assert_eq!(config.debug.log_level, "info");
        assert_eq!(config.app.tick_rate_hz, 60);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "globe",
            "--select",
            "MADWRLD",
            "--bake",
            "out.png",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.select.as_deref(), Some("MADWRLD"));
        assert_eq!(args.bake, Some(PathBuf::from("out.png")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.frames.is_none());
    }
}
