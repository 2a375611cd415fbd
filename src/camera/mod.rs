//! The geo-camera boundary.
//!
//! All camera movement in the application is funnelled through the
//! [`CameraAdapter`] trait: the view synchronizer commands flights, the
//! presentation shell reads the resulting viewport, and marker clicks come
//! back through [`MarkerEvents`]. Selection drives the camera; the camera
//! never drives selection.

pub mod transitions;

pub use transitions::{EasingFunction, Transition, TransitionManager, TransitionState, TransitionType};

use crate::core::{
    constants::FLY_DURATION_MS,
    geo::{LatLng, Point},
    viewport::Viewport,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::Duration;

/// Options for an animated camera flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyToOptions {
    pub duration: Duration,
    pub animate: bool,
}

impl Default for FlyToOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(FLY_DURATION_MS),
            animate: true,
        }
    }
}

/// Contract between the view synchronizer and whatever renders the map.
///
/// `fly_to` is fire-and-forget: callers never await completion, and a new
/// request supersedes an in-flight animation.
pub trait CameraAdapter {
    fn fly_to(&mut self, target: LatLng, zoom: f64, options: FlyToOptions);
    fn current_zoom(&self) -> f64;
}

/// A marker click on the map, identified by the event it belongs to.
/// The sole selection-intent signal the map surface emits.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEvent {
    pub event_id: String,
}

/// Clonable sender half handed to the map surface.
#[derive(Debug, Clone)]
pub struct MarkerEventSender {
    tx: Sender<MarkerEvent>,
}

impl MarkerEventSender {
    pub fn emit(&self, event_id: impl Into<String>) {
        // Receiver dropping just means the shell went away; nothing to do.
        let _ = self.tx.send(MarkerEvent {
            event_id: event_id.into(),
        });
    }
}

/// Marker-click event source.
pub struct MarkerEvents {
    tx: Sender<MarkerEvent>,
    rx: Receiver<MarkerEvent>,
}

impl MarkerEvents {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Hands out a sender for the map surface to emit clicks through.
    pub fn sender(&self) -> MarkerEventSender {
        MarkerEventSender {
            tx: self.tx.clone(),
        }
    }

    /// Drains every click received since the last call.
    pub fn drain(&self) -> Vec<MarkerEvent> {
        self.rx.try_iter().collect()
    }
}

impl Default for MarkerEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// The in-crate camera implementation: a viewport animated by the
/// transition engine.
pub struct MapCamera {
    viewport: Viewport,
    transitions: TransitionManager,
    flight_count: u64,
}

impl MapCamera {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            viewport: Viewport::new(center, zoom, size),
            transitions: TransitionManager::new(),
            flight_count: 0,
        }
    }

    /// Advances the active transition. Returns true while a flight is in
    /// progress so callers know to request another frame.
    pub fn update(&mut self, delta_time: f64) -> bool {
        if let Some(interpolated) = self.transitions.update(delta_time) {
            self.viewport.set_center(interpolated.center);
            self.viewport.set_zoom(interpolated.zoom);
        }
        self.transitions.has_active_transition()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Resizes the viewport (window/panel resize).
    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.viewport.set_zoom_limits(min_zoom, max_zoom);
    }

    /// Instantly repositions the camera without animation.
    pub fn jump_to(&mut self, center: LatLng, zoom: f64) {
        self.transitions.stop_current();
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
    }

    pub fn is_in_flight(&self) -> bool {
        self.transitions.has_active_transition()
    }
}

impl CameraAdapter for MapCamera {
    fn fly_to(&mut self, target: LatLng, zoom: f64, options: FlyToOptions) {
        if !target.is_finite() {
            #[cfg(feature = "debug")]
            log::warn!("Ignoring fly_to with non-finite target");
            return;
        }

        if !options.animate {
            self.jump_to(target, zoom);
            return;
        }

        self.flight_count += 1;
        let transition = Transition::new(
            format!("flight_{}", self.flight_count),
            TransitionType::FlyTo {
                target_center: target,
                target_zoom: zoom,
            },
            self.viewport.clone(),
            options.duration.as_secs_f64(),
        );
        self.transitions.start_transition(transition);
    }

    fn current_zoom(&self) -> f64 {
        self.viewport.zoom
    }
}
