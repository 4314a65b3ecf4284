//! Observable view state.

/// Choreographer state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ViewState {
    /// Free global view.
    #[default]
    Orbit,
    /// Scripted flight toward a point of interest.
    Approaching {
        /// Stage index, 0..=2.
        stage: u8,
        /// Linear progress within the stage, 0..=1.
        progress: f32,
    },
    /// Immersive close-up; left only by a deselect.
    StreetLevel,
}

/// Coarse view mode without the approach parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Orbit,
    Approaching,
    StreetLevel,
}

impl From<ViewState> for ViewMode {
    fn from(state: ViewState) -> Self {
        match state {
            ViewState::Orbit => ViewMode::Orbit,
            ViewState::Approaching { .. } => ViewMode::Approaching,
            ViewState::StreetLevel => ViewMode::StreetLevel,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViewMode::Orbit => "orbit",
            ViewMode::Approaching => "approaching",
            ViewMode::StreetLevel => "street-level",
        };
        f.write_str(name)
    }
}
