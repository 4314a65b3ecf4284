//! The view state machine.
//!
//! Transitions:
//!
//! - `Orbit -> Approaching { stage: 0 }` on a select of a known id, or when
//!   an idle orbiting camera comes within the proximity threshold of a point.
//! - `Approaching { stage: n } -> Approaching { stage: n + 1 }` when a stage's
//!   tween completes; leftover frame time carries into the next stage.
//! - `Approaching { stage: 2 } -> StreetLevel` on the last stage completing.
//! - any state `-> Orbit` on deselect, followed by an eased flight home.
//!
//! At most one tween is in flight. Selections that arrive while one is
//! running are dropped; a deselect replaces it.

use crossbeam_channel::Receiver;
use glam::Vec3;

use crate::config::ChoreographyConfig;
use crate::easing::EasingFunction;
use crate::pose::{CameraPose, PointOfInterest};
use crate::state::{ViewMode, ViewState};
use crate::store::{EffectMode, ObservedStore, ViewEvent, ViewStore};
use crate::tween::Tween;

const GLOBE_RADIUS: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Leg {
    Approach { target: usize, stage: u8 },
    Return,
}

#[derive(Clone, Debug)]
struct Flight {
    leg: Leg,
    tween: Tween,
}

/// Drives the camera between orbit, approach and street level.
#[derive(Debug)]
pub struct Choreographer {
    points: Vec<PointOfInterest>,
    config: ChoreographyConfig,
    easing: EasingFunction,
    state: ViewState,
    pose: CameraPose,
    flight: Option<Flight>,
    target: Option<usize>,
    input_enabled: bool,
    /// Per point: the camera has been outside the threshold since the last
    /// proximity trigger.
    armed: Vec<bool>,
    store: ObservedStore,
}

impl Choreographer {
    pub fn new(points: Vec<PointOfInterest>, config: ChoreographyConfig) -> Self {
        let pose = CameraPose::home(config.default_distance);
        let armed = vec![true; points.len()];
        Self {
            points,
            config,
            easing: EasingFunction::EaseInOut,
            state: ViewState::Orbit,
            pose,
            flight: None,
            target: None,
            input_enabled: true,
            armed,
            store: ObservedStore::new(pose),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Whether free orbit/pan/zoom input is currently honoured.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn immersive(&self) -> bool {
        self.store.get().immersive()
    }

    pub fn store(&self) -> &ViewStore {
        self.store.get()
    }

    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    pub fn config(&self) -> &ChoreographyConfig {
        &self.config
    }

    /// The point being approached or viewed at street level.
    pub fn target(&self) -> Option<&PointOfInterest> {
        self.target.and_then(|i| self.points.get(i))
    }

    /// `true` while any tween, approach or return, is running.
    pub fn in_flight(&self) -> bool {
        self.flight.is_some()
    }

    /// Receive every subsequent [`ViewEvent`].
    pub fn subscribe(&mut self) -> Receiver<ViewEvent> {
        self.store.subscribe()
    }

    /// Decorative effect selection; does not affect choreography.
    pub fn set_effect_mode(&mut self, effect_mode: EffectMode) {
        self.store.set_effect_mode(effect_mode);
    }

    /// Begin the approach toward the point with `id`.
    ///
    /// Unknown ids are ignored, as is any select while a tween is in flight
    /// or the camera is already at street level.
    pub fn select_point_of_interest(&mut self, id: &str) {
        let Some(index) = self.points.iter().position(|p| p.id == id) else {
            tracing::debug!(id, "ignoring selection of unknown point of interest");
            return;
        };
        if !self.is_idle_orbit() {
            tracing::debug!(id, state = ?self.state, "ignoring selection during transition");
            return;
        }
        self.start_approach(index);
    }

    /// Leave whatever state the camera is in and fly home.
    ///
    /// Immersive view is switched off and the selection cleared immediately;
    /// input comes back when the camera lands.
    pub fn deselect(&mut self) {
        tracing::info!(from = ?self.state, "deselect: returning to orbit");

        let home = CameraPose::home(self.config.default_distance);
        let tween = Tween::new(
            self.pose.position,
            home.position,
            home.look_at,
            self.config.return_duration,
            self.easing,
        );
        self.pose = tween.pose();
        self.flight = Some(Flight {
            leg: Leg::Return,
            tween,
        });
        self.target = None;
        self.state = ViewState::Orbit;

        self.store.set_immersive(false);
        self.store.set_selection(None);
        self.set_input_enabled(false);
        self.store.set_mode(ViewMode::Orbit);
    }

    /// External orbit control moved the camera.
    ///
    /// Ignored while input is disabled or for a zero or non-finite position.
    /// In orbit the distance is clamped to the orbit range and the camera
    /// keeps looking at the globe center; at street level it may come down
    /// to the surface.
    pub fn set_camera_position(&mut self, position: Vec3) {
        if !self.input_enabled {
            return;
        }
        let Some(direction) = position.try_normalize() else {
            tracing::debug!(?position, "ignoring degenerate camera position");
            return;
        };

        let min = match self.state {
            ViewState::StreetLevel => GLOBE_RADIUS,
            _ => self.config.min_orbit_distance,
        };
        let max = self.config.max_orbit_distance.max(min);
        let distance = position.length().clamp(min, max);

        self.pose.position = direction * distance;
        if self.state == ViewState::Orbit {
            self.pose.look_at = Vec3::ZERO;
        }
        self.store.set_camera(self.pose.position, distance);
    }

    /// Advance by `dt` seconds and return the pose for this frame.
    ///
    /// `camera_distance` is recorded for level-of-detail consumers. A
    /// negative or non-finite `dt` leaves everything untouched.
    pub fn advance_frame(&mut self, dt: f32, camera_distance: f32) -> CameraPose {
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!(dt, "skipping frame with invalid delta time");
            return self.pose;
        }

        let mut remaining = dt;
        while let Some(flight) = self.flight.as_mut() {
            let leftover = flight.tween.advance(remaining);
            self.pose = flight.tween.pose();
            let progress = flight.tween.progress();
            let leg = flight.leg;

            if let Leg::Approach { stage, .. } = leg {
                self.state = ViewState::Approaching { stage, progress };
            }

            match leftover {
                Some(rest) => {
                    remaining = rest;
                    self.finish_leg(leg);
                }
                None => break,
            }
        }

        self.store.set_camera(self.pose.position, camera_distance);
        self.update_proximity();
        self.pose
    }

    fn is_idle_orbit(&self) -> bool {
        self.state == ViewState::Orbit && self.flight.is_none()
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if self.input_enabled != enabled {
            self.input_enabled = enabled;
            self.store.emit(ViewEvent::CameraInput(enabled));
        }
    }

    fn start_approach(&mut self, index: usize) {
        let id = self.points[index].id.clone();
        tracing::info!(%id, "approach started");

        self.target = Some(index);
        self.armed[index] = false;
        self.set_input_enabled(false);
        self.store.set_selection(Some(id));
        self.start_stage(index, 0);
        self.store.set_mode(ViewMode::Approaching);
    }

    fn start_stage(&mut self, index: usize, stage: u8) {
        let poi = self.points[index].world_position();
        let tween = Tween::new(
            self.pose.position,
            self.config.stages[stage as usize].target(poi),
            poi,
            self.config.stage_duration,
            self.easing,
        );
        self.pose = tween.pose();
        self.flight = Some(Flight {
            leg: Leg::Approach {
                target: index,
                stage,
            },
            tween,
        });
        self.state = ViewState::Approaching {
            stage,
            progress: 0.0,
        };
        tracing::debug!(stage, "approach stage started");
        self.store.emit(ViewEvent::StageStarted(stage));
    }

    fn finish_leg(&mut self, leg: Leg) {
        self.flight = None;
        match leg {
            Leg::Approach { target, stage } => {
                let next = stage + 1;
                if (next as usize) < self.config.stages.len() {
                    self.start_stage(target, next);
                } else {
                    tracing::info!(id = %self.points[target].id, "arrived at street level");
                    self.state = ViewState::StreetLevel;
                    self.set_input_enabled(true);
                    self.store.set_immersive(true);
                    self.store.set_mode(ViewMode::StreetLevel);
                }
            }
            Leg::Return => {
                tracing::info!("returned to orbit");
                self.set_input_enabled(true);
            }
        }
    }

    /// Re-arm points the camera has left; in idle orbit, approach the first
    /// armed point inside the threshold.
    fn update_proximity(&mut self) {
        let camera = self.pose.position;
        let threshold = self.config.proximity_threshold;
        let mut triggered = None;

        for (i, point) in self.points.iter().enumerate() {
            let near = camera.distance(point.world_position()) < threshold;
            if !near {
                self.armed[i] = true;
            } else if self.armed[i] && triggered.is_none() {
                triggered = Some(i);
            }
        }

        if let Some(index) = triggered {
            if self.is_idle_orbit() {
                tracing::info!(id = %self.points[index].id, "proximity trigger");
                self.start_approach(index);
            } else {
                tracing::debug!(id = %self.points[index].id, "proximity ignored during transition");
            }
        }
    }
}
