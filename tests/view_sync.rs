use passbook::constants::{INITIAL_ZOOM, MAX_ZOOM};
use passbook::prelude::*;

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

fn demo_catalog() -> PassportData {
    PassportData::from_json(
        r#"{
            "passport": {
                "name": "Chinatown Manhole Covers",
                "description": "Collect the painted manhole covers of Yaowarat.",
                "events": [
                    {
                        "id": "a",
                        "image_url": "https://example.com/a.png",
                        "location": { "lat": 13.7, "lng": 100.5 }
                    },
                    {
                        "id": "b",
                        "image_url": "https://example.com/b.png",
                        "location": { "lat": 13.8, "lng": 100.6 }
                    }
                ],
                "partner": {
                    "display_name": "Coral",
                    "profile_image": "https://example.com/coral.png"
                }
            }
        }"#,
    )
    .unwrap()
}

/// The full desktop browsing scenario: select, reselect, switch, clear.
#[test]
fn test_desktop_selection_scenario() {
    let passport = demo_catalog();
    let default_position = passport.first_valid_position();
    assert_eq!(default_position, LatLng::new(13.7, 100.5));

    let mut resolver = LayoutResolver::new();
    let router = MemoryRouter::new();
    let resolution = resolver.resolve(true, router.tab());
    assert_eq!(resolution.mode, LayoutMode::Desktop);
    assert_eq!(resolution.correction, None);

    let mut sync = ViewSynchronizer::new(default_position);
    let mut camera = RecordingCamera::new(INITIAL_ZOOM);
    let mut selection = SelectionState::new();

    // First selection flies at the fixed max zoom.
    selection.select(passport.events[0].clone());
    sync.sync(&selection, &mut camera);
    assert_eq!(camera.flights, vec![(LatLng::new(13.7, 100.5), MAX_ZOOM)]);

    // Re-selecting the same event does not fly again.
    selection.select(passport.events[0].clone());
    sync.sync(&selection, &mut camera);
    assert_eq!(camera.flights.len(), 1);

    // Switching to another event preserves the current zoom.
    selection.select(passport.events[1].clone());
    sync.sync(&selection, &mut camera);
    assert_eq!(camera.flights.len(), 2);
    assert_eq!(camera.flights[1], (LatLng::new(13.8, 100.6), MAX_ZOOM));

    // Clearing flies home at the initial zoom.
    selection.clear();
    sync.sync(&selection, &mut camera);
    assert_eq!(camera.flights.len(), 3);
    assert_eq!(camera.flights[2], (default_position, INITIAL_ZOOM));
}

/// Selection switches landing in the same reaction are coalesced: the
/// synchronizer only ever sees the settled state.
#[test]
fn test_sync_runs_against_settled_state() {
    let passport = demo_catalog();
    let mut sync = ViewSynchronizer::new(passport.first_valid_position());
    let mut camera = RecordingCamera::new(INITIAL_ZOOM);
    let mut selection = SelectionState::new();

    selection.select(passport.events[0].clone());
    selection.select(passport.events[1].clone());
    sync.sync(&selection, &mut camera);

    assert_eq!(camera.flights, vec![(LatLng::new(13.8, 100.6), MAX_ZOOM)]);
}

/// Sweep of the whole (is_desktop, tab) table: the desktop/map-tab
/// combination always resolves to desktop plus a URL correction.
#[test]
fn test_desktop_map_tab_is_unreachable() {
    for (is_desktop, query) in [
        (true, ""),
        (true, "tab=map"),
        (true, "tab=bogus"),
        (false, ""),
        (false, "tab=map"),
        (false, "tab=bogus"),
    ] {
        let mut resolver = LayoutResolver::new();
        let mut router = MemoryRouter::from_query(query);
        let resolution = resolver.resolve(is_desktop, router.tab());

        if let Some(correction) = resolution.correction {
            router.apply(correction);
        }

        // After applying any correction, re-resolving is stable and the
        // invalid combination never renders.
        let settled = resolver.resolve(is_desktop, router.tab());
        assert_eq!(settled.correction, None);
        if is_desktop {
            assert_eq!(settled.mode, LayoutMode::Desktop);
            assert_eq!(router.tab(), None);
        }
    }
}

/// A phone rotation / window resize across the breakpoint while the map
/// tab is open rewrites the URL without touching the selection.
#[test]
fn test_breakpoint_crossing_corrects_url() {
    let passport = demo_catalog();
    let mut resolver = LayoutResolver::new();
    let mut router = MemoryRouter::from_query("tab=map");
    let mut sync = ViewSynchronizer::new(passport.first_valid_position());
    let mut camera = RecordingCamera::new(INITIAL_ZOOM);
    let mut selection = SelectionState::new();

    // Mobile map view with a selection.
    let mobile = resolver.resolve(false, router.tab());
    assert_eq!(mobile.mode, LayoutMode::MobileMap);
    selection.select(passport.events[0].clone());
    sync.sync(&selection, &mut camera);

    // Grow past the breakpoint.
    let desktop = resolver.resolve(true, router.tab());
    assert!(desktop.crossed_breakpoint);
    assert_eq!(desktop.mode, LayoutMode::Desktop);
    router.apply(desktop.correction.expect("stale map tab must be dropped"));
    assert_eq!(router.tab(), None);
    assert_eq!(router.applied(), &[RouteAction::ClearTab]);

    // The selection (and therefore the camera) is untouched by the
    // layout transition.
    sync.sync(&selection, &mut camera);
    assert_eq!(camera.flights.len(), 1);
    assert_eq!(sync.last_synced_selection_id(), Some("a"));

    // Shrink back: grid view, no further URL change.
    let narrowed = resolver.resolve(false, router.tab());
    assert_eq!(narrowed.mode, LayoutMode::MobileGrid);
    assert_eq!(narrowed.correction, None);
}

/// Malformed coordinates are absorbed: the camera never sees them and the
/// catalog still produces a legal home position.
#[test]
fn test_malformed_catalog_is_absorbed() {
    let mut passport = demo_catalog();
    passport.events[0].location = LatLng::new(f64::NAN, 100.5);

    let home = passport.first_valid_position();
    assert_eq!(home, LatLng::new(13.8, 100.6));

    let mut sync = ViewSynchronizer::new(home);
    let mut camera = RecordingCamera::new(INITIAL_ZOOM);
    let mut selection = SelectionState::new();

    selection.select(passport.events[0].clone());
    sync.sync(&selection, &mut camera);
    assert!(camera.flights.is_empty());
    assert_eq!(sync.last_synced_selection_id(), Some("a"));

    selection.select(passport.events[1].clone());
    sync.sync(&selection, &mut camera);
    assert_eq!(camera.flights, vec![(LatLng::new(13.8, 100.6), INITIAL_ZOOM)]);
}

/// The in-crate camera implementation honours the adapter contract well
/// enough to drive the synchronizer: supersession, zoom reads, and final
/// targets all line up.
#[test]
fn test_synchronizer_drives_map_camera() {
    let passport = demo_catalog();
    let home = passport.first_valid_position();

    let mut camera = MapCamera::new(home, INITIAL_ZOOM, Point::new(800.0, 600.0));
    let mut sync = ViewSynchronizer::new(home);
    let mut selection = SelectionState::new();

    selection.select(passport.events[0].clone());
    sync.sync(&selection, &mut camera);
    assert!(camera.is_in_flight());

    // Switch targets mid-flight; the new flight supersedes the old one.
    selection.select(passport.events[1].clone());
    camera.update(0.3);
    sync.sync(&selection, &mut camera);

    // Run the animation to completion.
    let mut guard = 0;
    while camera.update(0.25) {
        guard += 1;
        assert!(guard < 64, "flight must terminate");
    }

    assert_eq!(camera.viewport().center, LatLng::new(13.8, 100.6));
}
