use crate::camera::MapCamera;
use crate::core::constants::{INITIAL_ZOOM, MINI_MAP_MAX_ZOOM, MIN_ZOOM_LIMIT};
use crate::core::geo::{LatLng, Point};
use crate::ui::map_view::MapView;
use crate::ui::style::ShellStyle;
use crate::view::{selection::SelectionState, sync::ViewSynchronizer};
use egui::{Ui, Vec2};

/// The non-interactive locator map inside the event detail panel.
///
/// Runs its own camera and synchronizer pair against the same selection
/// state as the main map, so it inherits the exact flight semantics
/// (idempotent reselection, fly home on clear) at its own zoom ceiling.
pub struct MiniMap {
    camera: MapCamera,
    sync: ViewSynchronizer,
}

impl MiniMap {
    pub fn new(default_position: LatLng) -> Self {
        let mut camera = MapCamera::new(default_position, INITIAL_ZOOM, Point::new(320.0, 192.0));
        camera.set_zoom_limits(MIN_ZOOM_LIMIT, MINI_MAP_MAX_ZOOM);

        Self {
            camera,
            sync: ViewSynchronizer::new(default_position)
                .with_zoom_levels(INITIAL_ZOOM, MINI_MAP_MAX_ZOOM),
        }
    }

    pub fn set_default_position(&mut self, position: LatLng) {
        self.sync.set_default_position(position);
    }

    /// Reconciles with the selection and advances the flight. Returns true
    /// while animating so the shell can request another frame.
    pub fn tick(&mut self, selection: &SelectionState, delta_time: f64) -> bool {
        self.sync.sync(selection, &mut self.camera);
        self.camera.update(delta_time)
    }

    /// Draws the mini map with the selected event's marker and geofence.
    pub fn show(&mut self, ui: &mut Ui, height: f32, selection: &SelectionState, style: &ShellStyle) {
        let size = Vec2::new(ui.available_width(), height);
        self.camera
            .set_size(Point::new(size.x as f64, size.y as f64));

        let selected = selection.selected();
        let events: Vec<_> = selected.cloned().into_iter().collect();
        let geofence = selected.and_then(|event| event.valid_position());

        MapView::show(
            ui,
            size,
            self.camera.viewport(),
            &events,
            selection.selected_id(),
            None,
            geofence,
            style,
        );
    }
}
