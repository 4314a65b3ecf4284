//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Procedural surface settings.
    pub surface: SurfaceConfig,
    /// Camera choreography timing and thresholds.
    pub choreography: ChoreographyConfig,
    /// Points of interest placed on the globe.
    pub points_of_interest: Vec<PointOfInterestConfig>,
    /// Headless session settings.
    pub app: AppConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Procedural surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Seed for the gradient noise permutation table.
    pub seed: u32,
    /// Maximum continental displacement along the surface normal.
    pub elevation: f32,
    /// Octaves per fbm sum.
    pub octaves: u32,
    /// Camera distance at which the finest noise scale is reached.
    pub lod_near: f32,
    /// Camera distance at which the broadest noise scale is reached.
    pub lod_far: f32,
}

/// Camera choreography configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChoreographyConfig {
    /// Duration of each of the three approach stages.
    pub stage_duration: f32,
    /// Duration of the flight back to the default pose.
    pub return_duration: f32,
    /// Camera-to-point distance that triggers an automatic approach.
    pub proximity_threshold: f32,
    /// Distance of the default camera from the globe center.
    pub default_distance: f32,
    /// Closest the orbit controls may bring the camera to the globe center.
    pub min_orbit_distance: f32,
    /// Farthest the orbit controls may pull the camera back.
    pub max_orbit_distance: f32,
}

/// A named location on the globe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointOfInterestConfig {
    /// Identifier used by selection events.
    pub id: String,
    /// Direction from the globe center; normalized on load.
    pub direction: [f32; 3],
}

/// Headless session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Number of frames to simulate.
    pub frames: u32,
    /// Simulation rate in Hz.
    pub tick_rate_hz: u32,
    /// Frames to linger at street level before flying home.
    pub street_level_dwell_frames: u32,
    /// Width of a baked equirectangular texture.
    pub bake_width: u32,
    /// Height of a baked equirectangular texture.
    pub bake_height: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the log directory in debug builds.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            choreography: ChoreographyConfig::default(),
            points_of_interest: vec![PointOfInterestConfig::default()],
            app: AppConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            elevation: 0.04,
            octaves: 4,
            lod_near: 1.5,
            lod_far: 4.0,
        }
    }
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            stage_duration: 2.0,
            return_duration: 3.0,
            proximity_threshold: 2.5,
            default_distance: 5.0,
            min_orbit_distance: 1.5,
            max_orbit_distance: 7.0,
        }
    }
}

impl Default for PointOfInterestConfig {
    fn default() -> Self {
        Self {
            id: "MADWRLD".to_string(),
            direction: [0.5, 0.1, -0.5],
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frames: 900,
            tick_rate_hz: 60,
            street_level_dwell_frames: 120,
            bake_width: 1024,
            bake_height: 512,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join("config.ron");
        let write_error = |source| ConfigError::Write {
            path: config_path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(write_error)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join("config.ron"))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot drive the viewer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.choreography;
        for (field, value) in [
            ("choreography.stage_duration", c.stage_duration),
            ("choreography.return_duration", c.return_duration),
            ("choreography.default_distance", c.default_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
        }
        if !(c.proximity_threshold.is_finite() && c.proximity_threshold >= 0.0) {
            return Err(ConfigError::invalid(
                "choreography.proximity_threshold",
                format!("must be non-negative, got {}", c.proximity_threshold),
            ));
        }
        if !(c.min_orbit_distance > 1.0 && c.min_orbit_distance <= c.max_orbit_distance)
            || !c.max_orbit_distance.is_finite()
        {
            return Err(ConfigError::invalid(
                "choreography.min_orbit_distance",
                format!(
                    "orbit range {}..{} must lie outside the globe and be ordered",
                    c.min_orbit_distance, c.max_orbit_distance
                ),
            ));
        }

        let s = &self.surface;
        if s.octaves == 0 {
            return Err(ConfigError::invalid("surface.octaves", "must be at least 1"));
        }
        if !(s.lod_near < s.lod_far) {
            return Err(ConfigError::invalid(
                "surface.lod_near",
                format!("must be below lod_far ({} >= {})", s.lod_near, s.lod_far),
            ));
        }

        if self.app.tick_rate_hz == 0 {
            return Err(ConfigError::invalid("app.tick_rate_hz", "must be positive"));
        }

        let mut ids = HashSet::new();
        for poi in &self.points_of_interest {
            let field = format!("points_of_interest[{}]", poi.id);
            if poi.id.is_empty() {
                return Err(ConfigError::invalid("points_of_interest", "empty id"));
            }
            if !ids.insert(poi.id.as_str()) {
                return Err(ConfigError::invalid(field, "duplicate id"));
            }
            let [x, y, z] = poi.direction;
            let length_sq = x * x + y * y + z * z;
            if !(length_sq.is_finite() && length_sq > 1e-12) {
                return Err(ConfigError::invalid(field, "direction must be a non-zero finite vector"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("stage_duration: 2.0"));
        assert!(ron_str.contains("MADWRLD"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(surface: (seed: 7), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.surface.seed, 7);
        assert_eq!(config.surface.octaves, 4);
        assert_eq!(config.choreography, ChoreographyConfig::default());
        assert_eq!(config.points_of_interest.len(), 1);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(effect_mode: \"storm\")");
        assert!(result.is_ok());
    }

    #[test]
    fn test_points_of_interest_parse() {
        let ron_str = r#"(points_of_interest: [
            (id: "north", direction: (0.0, 1.0, 0.0)),
            (id: "east", direction: (1.0, 0.0, 0.0)),
        ])"#;
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.points_of_interest.len(), 2);
        assert_eq!(config.points_of_interest[1].id, "east");
        assert_eq!(config.points_of_interest[0].direction, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.surface.seed = 1234;
        config.choreography.proximity_threshold = 1.8;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.choreography.stage_duration = 1.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().choreography.stage_duration, 1.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        match &err {
            ConfigError::Parse { path, .. } => assert!(path.ends_with("config.ron")),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(err.to_string().contains("config.ron"));
    }

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_point_of_interest_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.ron"),
            r#"(points_of_interest: [(id: "void", direction: (0.0, 0.0, 0.0))])"#,
        )
        .unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(
            matches!(&err, ConfigError::Invalid { field, .. } if field.contains("void")),
            "{err:?}"
        );
    }

    #[test]
    fn test_duplicate_point_ids_rejected() {
        let mut config = Config::default();
        config.points_of_interest.push(PointOfInterestConfig::default());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_non_positive_durations_rejected() {
        for bad in [0.0, -1.0, f32::NAN] {
            let mut config = Config::default();
            config.choreography.stage_duration = bad;
            assert!(config.validate().is_err(), "stage_duration {bad} accepted");

            let mut config = Config::default();
            config.choreography.return_duration = bad;
            assert!(config.validate().is_err(), "return_duration {bad} accepted");
        }
    }

    #[test]
    fn test_orbit_range_must_clear_the_globe() {
        let mut config = Config::default();
        config.choreography.min_orbit_distance = 0.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.choreography.max_orbit_distance = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reload_rejects_invalid_edit() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut broken = config.clone();
        broken.surface.octaves = 0;
        broken.save(dir.path()).unwrap();
        assert!(matches!(
            config.reload(dir.path()),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
