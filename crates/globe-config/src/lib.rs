//! Configuration for the globe viewer.
//!
//! Settings persist to disk as a RON file. Supports CLI overrides via clap,
//! hot-reload detection, and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AppConfig, ChoreographyConfig, Config, DebugConfig, PointOfInterestConfig, SurfaceConfig,
};
pub use error::ConfigError;
