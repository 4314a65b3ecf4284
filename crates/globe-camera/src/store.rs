//! Read-only view store and its change notifications.
//!
//! The store is owned by the choreographer. Everything else reads a
//! `&ViewStore` or drains a [`ViewEvent`] receiver.

use crossbeam_channel::{Receiver, Sender};
use glam::Vec3;

use crate::pose::CameraPose;
use crate::state::ViewMode;

/// Visual effect layered over the globe by decorative UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EffectMode {
    #[default]
    Normal,
    Fire,
    Storm,
}

/// A change to the store, in the order it happened.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    SelectionChanged(Option<String>),
    ModeChanged(ViewMode),
    /// An approach stage (0..=2) began.
    StageStarted(u8),
    ImmersiveEntered,
    ImmersiveExited,
    /// Free camera input was enabled (`true`) or disabled.
    CameraInput(bool),
    EffectModeChanged(EffectMode),
}

/// Snapshot of UI-facing view state.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewStore {
    selection: Option<String>,
    mode: ViewMode,
    immersive: bool,
    camera_position: Vec3,
    camera_distance: f32,
    effect_mode: EffectMode,
}

impl Default for ViewStore {
    fn default() -> Self {
        let pose = CameraPose::default();
        Self {
            selection: None,
            mode: ViewMode::Orbit,
            immersive: false,
            camera_position: pose.position,
            camera_distance: pose.distance(),
            effect_mode: EffectMode::Normal,
        }
    }
}

impl ViewStore {
    /// Id of the selected point of interest, if any.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Whether the immersive street view should be rendered.
    pub fn immersive(&self) -> bool {
        self.immersive
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    /// Last camera distance reported by the render loop; drives surface LOD.
    pub fn camera_distance(&self) -> f32 {
        self.camera_distance
    }

    pub fn effect_mode(&self) -> EffectMode {
        self.effect_mode
    }
}

/// Store plus its subscribers. Setters publish only real changes.
#[derive(Debug)]
pub(crate) struct ObservedStore {
    store: ViewStore,
    observers: Vec<Sender<ViewEvent>>,
}

impl ObservedStore {
    pub(crate) fn new(camera: CameraPose) -> Self {
        Self {
            store: ViewStore {
                camera_position: camera.position,
                camera_distance: camera.distance(),
                ..ViewStore::default()
            },
            observers: Vec::new(),
        }
    }

    pub(crate) fn get(&self) -> &ViewStore {
        &self.store
    }

    pub(crate) fn subscribe(&mut self) -> Receiver<ViewEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.observers.push(tx);
        rx
    }

    pub(crate) fn emit(&mut self, event: ViewEvent) {
        // Disconnected receivers are dropped here.
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub(crate) fn set_selection(&mut self, selection: Option<String>) {
        if self.store.selection != selection {
            self.store.selection = selection.clone();
            self.emit(ViewEvent::SelectionChanged(selection));
        }
    }

    pub(crate) fn set_mode(&mut self, mode: ViewMode) {
        if self.store.mode != mode {
            self.store.mode = mode;
            self.emit(ViewEvent::ModeChanged(mode));
        }
    }

    pub(crate) fn set_immersive(&mut self, immersive: bool) {
        if self.store.immersive != immersive {
            self.store.immersive = immersive;
            self.emit(if immersive {
                ViewEvent::ImmersiveEntered
            } else {
                ViewEvent::ImmersiveExited
            });
        }
    }

    pub(crate) fn set_effect_mode(&mut self, effect_mode: EffectMode) {
        if self.store.effect_mode != effect_mode {
            self.store.effect_mode = effect_mode;
            self.emit(ViewEvent::EffectModeChanged(effect_mode));
        }
    }

    pub(crate) fn set_camera(&mut self, position: Vec3, distance: f32) {
        self.store.camera_position = position;
        if distance.is_finite() {
            self.store.camera_distance = distance;
        }
    }

    #[cfg(test)]
    pub(crate) fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
