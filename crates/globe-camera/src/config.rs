use glam::Vec3;

/// One leg of the approach: the camera flies to
/// `poi * radius_factor + (0, lift, 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproachStage {
    pub radius_factor: f32,
    pub lift: f32,
}

impl ApproachStage {
    /// Target position for a point of interest at `poi`.
    pub fn target(&self, poi: Vec3) -> Vec3 {
        poi * self.radius_factor + Vec3::Y * self.lift
    }
}

/// Timing and geometry of the view transitions.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoreographyConfig {
    /// Duration of each approach stage.
    pub stage_duration: f32,
    /// Duration of the flight home after a deselect.
    pub return_duration: f32,
    /// Camera-to-point distance below which an idle orbit auto-approaches.
    pub proximity_threshold: f32,
    /// Home pose distance along +Z.
    pub default_distance: f32,
    /// Closest orbit controls may bring the camera to the globe center.
    pub min_orbit_distance: f32,
    /// Farthest orbit controls may pull the camera back.
    pub max_orbit_distance: f32,
    /// The three approach legs, in order.
    pub stages: [ApproachStage; 3],
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
            stages: [
                ApproachStage {
                    radius_factor: 3.0,
                    lift: 0.0,
                },
                ApproachStage {
                    radius_factor: 1.5,
                    lift: 0.2,
                },
                ApproachStage {
                    radius_factor: 1.02,
                    lift: 0.05,
                },
            ],
        }
    }
}

impl ChoreographyConfig {
    /// Total time from select to street level.
    pub fn approach_duration(&self) -> f32 {
        self.stage_duration * self.stages.len() as f32
    }
}
