//! View choreography: a frame-driven state machine that flies the camera
//! from a free orbit down to street level over a point of interest and back.
//!
//! The [`Choreographer`] owns the camera pose and the [`ViewStore`]; every
//! mutation happens inside [`Choreographer::advance_frame`] or one of the two
//! trigger calls. Decorative consumers read the store or subscribe to
//! [`ViewEvent`]s.

mod choreographer;
mod config;
mod easing;
mod pose;
mod state;
mod store;
mod tween;

pub use choreographer::Choreographer;
pub use config::{ApproachStage, ChoreographyConfig};
pub use easing::EasingFunction;
pub use pose::{CameraPose, PointOfInterest};
pub use state::{ViewMode, ViewState};
pub use store::{EffectMode, ViewEvent, ViewStore};
pub use tween::Tween;
