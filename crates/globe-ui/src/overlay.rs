//! Content card shown while a point of interest is selected.

use globe_camera::ViewStore;

/// Seconds for the card to fade fully in or out.
pub const FADE_DURATION: f32 = 0.3;

/// View model of the content card.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentOverlay {
    heading: Option<String>,
    opacity: f32,
}

impl ContentOverlay {
    /// Card state for `store`, already at its resting opacity.
    pub fn from_store(store: &ViewStore) -> Self {
        let heading = store.selection().map(str::to_owned);
        let opacity = if heading.is_some() { 1.0 } else { 0.0 };
        Self { heading, opacity }
    }

    /// Hidden card with no selection.
    pub fn hidden() -> Self {
        Self {
            heading: None,
            opacity: 0.0,
        }
    }

    /// Follow the store and fade toward the matching opacity.
    ///
    /// The heading keeps the last selection while fading out.
    pub fn update(&mut self, store: &ViewStore, dt: f32) {
        if let Some(id) = store.selection() {
            self.heading = Some(id.to_owned());
        }
        let target = if self.visible_in(store) { 1.0 } else { 0.0 };
        let step = if dt.is_finite() { dt.max(0.0) / FADE_DURATION } else { 0.0 };
        self.opacity = if self.opacity < target {
            (self.opacity + step).min(target)
        } else {
            (self.opacity - step).max(target)
        };
    }

    fn visible_in(&self, store: &ViewStore) -> bool {
        store.selection().is_some()
    }

    /// Whether the card is showing at all.
    pub fn visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn body(&self) -> Option<String> {
        self.heading.as_ref().map(|id| format!("Content for {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globe_camera::{ChoreographyConfig, Choreographer, PointOfInterest};
    use glam::Vec3;

    fn choreographer() -> Choreographer {
        let city = PointOfInterest::new("MADWRLD", Vec3::new(0.5, 0.1, -0.5)).unwrap();
        Choreographer::new(vec![city], ChoreographyConfig::default())
    }

    #[test]
    fn test_hidden_without_selection() {
        let c = choreographer();
        let overlay = ContentOverlay::from_store(c.store());
        assert!(!overlay.visible());
        assert_eq!(overlay.heading(), None);
        assert_eq!(overlay.body(), None);
    }

    #[test]
    fn test_shows_selection() {
        let mut c = choreographer();
        c.select_point_of_interest("MADWRLD");
        let overlay = ContentOverlay::from_store(c.store());
        assert!(overlay.visible());
        assert_eq!(overlay.heading(), Some("MADWRLD"));
        assert_eq!(overlay.body().as_deref(), Some("Content for MADWRLD"));
    }

    #[test]
    fn test_fades_in_and_out() {
        let mut c = choreographer();
        let mut overlay = ContentOverlay::hidden();
        c.select_point_of_interest("MADWRLD");

        overlay.update(c.store(), 0.15);
        assert!((overlay.opacity() - 0.5).abs() < 1e-5);
        overlay.update(c.store(), 0.3);
        assert_eq!(overlay.opacity(), 1.0);

        c.deselect();
        overlay.update(c.store(), 0.15);
        assert!(overlay.visible());
        assert_eq!(overlay.heading(), Some("MADWRLD"));
        overlay.update(c.store(), 1.0);
        assert!(!overlay.visible());
    }

    #[test]
    fn test_invalid_dt_holds_opacity() {
        let mut c = choreographer();
        let mut overlay = ContentOverlay::hidden();
        c.select_point_of_interest("MADWRLD");
        overlay.update(c.store(), f32::NAN);
        assert_eq!(overlay.opacity(), 0.0);
    }
}
