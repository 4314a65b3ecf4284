//! A scripted viewer session.
//!
//! Each step advances the choreographer, rebuilds the surface uniforms from
//! the new pose and samples the surface under the camera, the same work a
//! windowed frame does before drawing. The script selects a point of
//! interest at start, lingers at street level for a configured number of
//! frames and then deselects.

use crossbeam_channel::Receiver;
use glam::Vec3;
use globe_camera::{Choreographer, PointOfInterest, ViewEvent, ViewMode, ViewState};
use globe_config::{Config, PointOfInterestConfig, SurfaceConfig};
use globe_surface::{ShadingResult, SurfaceGenerator, SurfaceParams, SurfacePoint, SurfaceUniforms};
use globe_ui::{ContentOverlay, ImmersiveCity, TitleAnimator};
use tracing::{debug, info, warn};

/// Surface parameters from the config file.
pub fn surface_params(config: &SurfaceConfig) -> SurfaceParams {
    SurfaceParams {
        seed: config.seed,
        octaves: config.octaves,
        elevation: config.elevation,
        lod_near: config.lod_near,
        lod_far: config.lod_far,
        ..Default::default()
    }
}

/// Choreography timing from the config file; stage geometry keeps its
/// defaults.
pub fn choreography_config(
    config: &globe_config::ChoreographyConfig,
) -> globe_camera::ChoreographyConfig {
    globe_camera::ChoreographyConfig {
        stage_duration: config.stage_duration,
        return_duration: config.return_duration,
        proximity_threshold: config.proximity_threshold,
        default_distance: config.default_distance,
        min_orbit_distance: config.min_orbit_distance,
        max_orbit_distance: config.max_orbit_distance,
        ..Default::default()
    }
}

/// Points of interest from the config file. Entries with a degenerate
/// direction are skipped.
pub fn points_of_interest(configs: &[PointOfInterestConfig]) -> Vec<PointOfInterest> {
    configs
        .iter()
        .filter_map(|c| {
            let point = PointOfInterest::new(c.id.clone(), Vec3::from_array(c.direction));
            if point.is_none() {
                warn!(id = %c.id, direction = ?c.direction, "skipping point of interest");
            }
            point
        })
        .collect()
}

/// What happened over a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub steps: u64,
    pub approaches: u32,
    pub reached_street_level: bool,
    pub returned_home: bool,
}

pub struct Session {
    generator: SurfaceGenerator,
    choreographer: Choreographer,
    events: Receiver<ViewEvent>,
    overlay: ContentOverlay,
    title: TitleAnimator,
    city_seed: u64,
    city: Option<ImmersiveCity>,
    pending_selection: Option<String>,
    dwell_frames: u32,
    dwell: u32,
    deselected: bool,
    time: f32,
    uniforms: SurfaceUniforms,
    ground: Option<ShadingResult>,
    summary: SessionSummary,
}

impl Session {
    /// Build a session from `config`, selecting `selection` on the first step.
    pub fn new(config: &Config, selection: Option<String>) -> Self {
        let generator = SurfaceGenerator::new(surface_params(&config.surface));
        let points = points_of_interest(&config.points_of_interest);
        info!(count = points.len(), "points of interest loaded");

        let mut choreographer =
            Choreographer::new(points, choreography_config(&config.choreography));
        let events = choreographer.subscribe();
        let uniforms = generator.uniforms(choreographer.pose().distance());

        Self {
            generator,
            choreographer,
            events,
            overlay: ContentOverlay::hidden(),
            title: TitleAnimator::new(u64::from(config.surface.seed)),
            city_seed: u64::from(config.surface.seed),
            city: None,
            pending_selection: selection,
            dwell_frames: config.app.street_level_dwell_frames,
            dwell: 0,
            deselected: false,
            time: 0.0,
            uniforms,
            ground: None,
            summary: SessionSummary::default(),
        }
    }

    /// Advance the whole viewer by one fixed step.
    pub fn step(&mut self, dt: f32) {
        if let Some(id) = self.pending_selection.take() {
            self.choreographer.select_point_of_interest(&id);
        }

        let distance = self.choreographer.pose().distance();
        let pose = self.choreographer.advance_frame(dt, distance);
        self.time += dt;

        if self.choreographer.state() == ViewState::StreetLevel && !self.deselected {
            self.dwell += 1;
            if self.dwell >= self.dwell_frames {
                self.choreographer.deselect();
                self.deselected = true;
            }
        }

        let focus = self
            .choreographer
            .target()
            .map_or(Vec3::ZERO, PointOfInterest::world_position);
        self.uniforms = self
            .generator
            .uniforms(pose.distance())
            .with_focus(focus)
            .with_time(self.time);
        self.ground = SurfacePoint::new(pose.position)
            .map(|p| self.generator.evaluate(p, pose.position, &self.uniforms));

        self.overlay.update(self.choreographer.store(), dt);
        self.title.update(dt);
        self.drain_events();
        self.summary.steps += 1;
    }

    fn drain_events(&mut self) {
        let events: Vec<ViewEvent> = self.events.try_iter().collect();
        for event in events {
            match &event {
                ViewEvent::StageStarted(0) => self.summary.approaches += 1,
                ViewEvent::ModeChanged(ViewMode::StreetLevel) => {
                    self.summary.reached_street_level = true;
                }
                ViewEvent::CameraInput(true) if self.deselected => {
                    self.summary.returned_home = true;
                }
                ViewEvent::ImmersiveEntered => self.enter_city(),
                ViewEvent::ImmersiveExited => self.city = None,
                _ => {}
            }
            match event {
                ViewEvent::StageStarted(_) | ViewEvent::CameraInput(_) => {
                    debug!(?event, time = self.time, "view event");
                }
                _ => info!(?event, time = self.time, "view event"),
            }
        }
    }

    /// Each point of interest gets its own skyline, stable across visits.
    fn enter_city(&mut self) {
        let Some(index) = self
            .choreographer
            .target()
            .and_then(|t| self.choreographer.points().iter().position(|p| p.id == t.id))
        else {
            return;
        };
        let city = ImmersiveCity::generate(self.city_seed.wrapping_add(index as u64));
        info!(
            buildings = city.buildings().len(),
            windows = city.window_count(),
            street_lights = city.street_lights().len(),
            "entered city"
        );
        self.city = Some(city);
    }

    /// The street-level city while the immersive view is on.
    pub fn city(&self) -> Option<&ImmersiveCity> {
        self.city.as_ref()
    }

    pub fn choreographer(&self) -> &Choreographer {
        &self.choreographer
    }

    pub fn generator(&self) -> &SurfaceGenerator {
        &self.generator
    }

    /// Uniforms the surface would be drawn with this frame.
    pub fn uniforms(&self) -> &SurfaceUniforms {
        &self.uniforms
    }

    /// Surface directly below the camera.
    pub fn ground(&self) -> Option<&ShadingResult> {
        self.ground.as_ref()
    }

    pub fn overlay(&self) -> &ContentOverlay {
        &self.overlay
    }

    pub fn title(&self) -> &TitleAnimator {
        &self.title
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }
}
