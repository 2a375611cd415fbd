use crate::camera::{CameraAdapter, FlyToOptions};
use crate::core::constants::{FLY_DURATION_MS, INITIAL_ZOOM, MAX_ZOOM};
use crate::core::geo::LatLng;
use crate::view::selection::SelectionState;
use std::time::Duration;

/// Decides when the camera flies and to what target and zoom, based on
/// selection changes, without ever issuing a redundant or conflicting command.
///
/// The synchronizer is idempotent with respect to re-renders: re-running
/// [`sync`] against an unchanged selection issues nothing, because the id
/// of the last selection it acted on is kept here, owned by the instance
/// rather than by ambient state. It is reset only when the synchronizer is
/// rebuilt (a full remount).
///
/// [`sync`]: ViewSynchronizer::sync
pub struct ViewSynchronizer {
    default_position: LatLng,
    initial_zoom: f64,
    max_zoom: f64,
    fly_duration: Duration,
    last_synced_selection_id: Option<String>,
}

impl ViewSynchronizer {
    /// Creates a synchronizer flying back to `default_position` whenever
    /// the selection clears.
    pub fn new(default_position: LatLng) -> Self {
        Self {
            default_position,
            initial_zoom: INITIAL_ZOOM,
            max_zoom: MAX_ZOOM,
            fly_duration: Duration::from_millis(FLY_DURATION_MS),
            last_synced_selection_id: None,
        }
    }

    /// Overrides the home and selection zoom levels.
    pub fn with_zoom_levels(mut self, initial_zoom: f64, max_zoom: f64) -> Self {
        self.initial_zoom = initial_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Overrides the flight duration.
    pub fn with_fly_duration(mut self, duration: Duration) -> Self {
        self.fly_duration = duration;
        self
    }

    /// Updates the home position (e.g. after the catalog finishes loading).
    pub fn set_default_position(&mut self, position: LatLng) {
        self.default_position = position;
    }

    pub fn default_position(&self) -> LatLng {
        self.default_position
    }

    /// Id of the selection the camera was last flown for.
    pub fn last_synced_selection_id(&self) -> Option<&str> {
        self.last_synced_selection_id.as_deref()
    }

    /// Reconciles the camera with the current selection. Call once per
    /// settled state snapshot; calling again without a selection change is
    /// a no-op.
    ///
    /// Zoom policy: the first selection out of the empty state flies at the
    /// fixed maximum zoom; switching between two selected events preserves
    /// whatever zoom the camera currently has.
    pub fn sync(&mut self, selection: &SelectionState, camera: &mut dyn CameraAdapter) {
        match selection.selected() {
            Some(event) => {
                if self.last_synced_selection_id.as_deref() == Some(event.id.as_str()) {
                    // Re-render without a logical selection change.
                    return;
                }

                let target_zoom = if self.last_synced_selection_id.is_none() {
                    self.max_zoom
                } else {
                    camera.current_zoom()
                };

                match event.valid_position() {
                    Some(position) => {
                        #[cfg(feature = "debug")]
                        log::debug!("Flying to event '{}' at zoom {}", event.id, target_zoom);

                        camera.fly_to(
                            position,
                            target_zoom,
                            FlyToOptions {
                                duration: self.fly_duration,
                                animate: true,
                            },
                        );
                    }
                    None => {
                        // Unusable coordinates: skip the flight, but still
                        // record the id so a later switch to a different
                        // event is not silently ignored.
                        #[cfg(feature = "debug")]
                        log::warn!("Event '{}' has no usable location; skipping flight", event.id);
                    }
                }

                self.last_synced_selection_id = Some(event.id.clone());
            }
            None => {
                if self.last_synced_selection_id.is_some() {
                    #[cfg(feature = "debug")]
                    log::debug!("Selection cleared; flying home");

                    camera.fly_to(
                        self.default_position,
                        self.initial_zoom,
                        FlyToOptions {
                            duration: self.fly_duration,
                            animate: true,
                        },
                    );
                    self.last_synced_selection_id = None;
                }
                // Nothing selected and nothing was synced: initial mount,
                // no spurious flight.
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PassportEvent;

    /// Camera double that records every commanded flight.
    struct RecordingCamera {
        zoom: f64,
        flights: Vec<(LatLng, f64)>,
    }

    impl RecordingCamera {
        fn new(zoom: f64) -> Self {
            Self {
                zoom,
                flights: Vec::new(),
            }
        }
    }

    impl CameraAdapter for RecordingCamera {
        fn fly_to(&mut self, target: LatLng, zoom: f64, _options: FlyToOptions) {
            self.zoom = zoom;
            self.flights.push((target, zoom));
        }

        fn current_zoom(&self) -> f64 {
            self.zoom
        }
    }

    fn event(id: &str, lat: f64, lng: f64) -> PassportEvent {
        PassportEvent {
            id: id.to_string(),
            image_url: format!("https://example.com/{id}.png"),
            location: LatLng::new(lat, lng),
            title: None,
            available_from: None,
            available_until: None,
            collect_hint: None,
        }
    }

    fn home() -> LatLng {
        LatLng::new(13.7563, 100.5018)
    }

    #[test]
    fn test_first_selection_flies_at_max_zoom() {
        let mut sync = ViewSynchronizer::new(home());
        let mut camera = RecordingCamera::new(11.0);
        let mut selection = SelectionState::new();

        selection.select(event("a", 13.7, 100.5));
        sync.sync(&selection, &mut camera);

        assert_eq!(camera.flights, vec![(LatLng::new(13.7, 100.5), MAX_ZOOM)]);
        assert_eq!(sync.last_synced_selection_id(), Some("a"));
    }

    #[test]
    fn test_reselection_is_idempotent() {
        let mut sync = ViewSynchronizer::new(home());
        let mut camera = RecordingCamera::new(11.0);
        let mut selection = SelectionState::new();

        selection.select(event("a", 13.7, 100.5));
        sync.sync(&selection, &mut camera);
        sync.sync(&selection, &mut camera);

        // Selecting the same event again still only counts once.
        selection.select(event("a", 13.7, 100.5));
        sync.sync(&selection, &mut camera);

        assert_eq!(camera.flights.len(), 1);
    }

    #[test]
    fn test_switching_selection_preserves_current_zoom() {
        let mut sync = ViewSynchronizer::new(home());
        let mut camera = RecordingCamera::new(11.0);
        let mut selection = SelectionState::new();

        selection.select(event("a", 13.7, 100.5));
        sync.sync(&selection, &mut camera);

        // The user may have zoomed since the first flight.
        camera.zoom = 15.5;

        selection.select(event("b", 13.8, 100.6));
        sync.sync(&selection, &mut camera);

        assert_eq!(camera.flights.len(), 2);
        assert_eq!(camera.flights[1], (LatLng::new(13.8, 100.6), 15.5));
    }

    #[test]
    fn test_deselection_returns_home() {
        let mut sync = ViewSynchronizer::new(home());
        let mut camera = RecordingCamera::new(11.0);
        let mut selection = SelectionState::new();

        selection.select(event("a", 13.7, 100.5));
        sync.sync(&selection, &mut camera);

        selection.clear();
        sync.sync(&selection, &mut camera);

        assert_eq!(
            camera.flights,
            vec![
                (LatLng::new(13.7, 100.5), MAX_ZOOM),
                (home(), INITIAL_ZOOM),
            ]
        );
        assert_eq!(sync.last_synced_selection_id(), None);
    }

    #[test]
    fn test_initial_mount_with_no_selection_is_quiet() {
        let mut sync = ViewSynchronizer::new(home());
        let mut camera = RecordingCamera::new(11.0);
        let selection = SelectionState::new();

        sync.sync(&selection, &mut camera);
        sync.sync(&selection, &mut camera);

        assert!(camera.flights.is_empty());
    }

    #[test]
    fn test_invalid_coordinates_never_reach_the_camera() {
        let mut sync = ViewSynchronizer::new(home());
        let mut camera = RecordingCamera::new(11.0);
        let mut selection = SelectionState::new();

        selection.select(event("broken", f64::NAN, 0.0));
        sync.sync(&selection, &mut camera);

        assert!(camera.flights.is_empty());
        // The id is still recorded: each distinct id gets exactly one
        // evaluation, so a later switch is not ignored.
        assert_eq!(sync.last_synced_selection_id(), Some("broken"));

        selection.select(event("ok", 13.7, 100.5));
        sync.sync(&selection, &mut camera);

        assert_eq!(camera.flights.len(), 1);
        // Switching away from a (skipped) selection preserves zoom.
        assert_eq!(camera.flights[0], (LatLng::new(13.7, 100.5), 11.0));
    }

    #[test]
    fn test_deselecting_a_skipped_selection_still_flies_home() {
        let mut sync = ViewSynchronizer::new(home());
        let mut camera = RecordingCamera::new(11.0);
        let mut selection = SelectionState::new();

        selection.select(event("broken", f64::NAN, 0.0));
        sync.sync(&selection, &mut camera);

        selection.clear();
        sync.sync(&selection, &mut camera);

        assert_eq!(camera.flights, vec![(home(), INITIAL_ZOOM)]);
    }

    #[test]
    fn test_custom_zoom_levels() {
        let mut sync = ViewSynchronizer::new(home()).with_zoom_levels(15.0, 18.0);
        let mut camera = RecordingCamera::new(11.0);
        let mut selection = SelectionState::new();

        selection.select(event("a", 13.7, 100.5));
        sync.sync(&selection, &mut camera);

        selection.clear();
        sync.sync(&selection, &mut camera);

        assert_eq!(
            camera.flights,
            vec![(LatLng::new(13.7, 100.5), 18.0), (home(), 15.0)]
        );
    }
}
