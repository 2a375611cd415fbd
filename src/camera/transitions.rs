use crate::core::{geo::LatLng, viewport::Viewport};
use instant::Instant;

/// Types of camera transitions
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionType {
    /// Combined pan and zoom with linear interpolation
    SetView {
        target_center: LatLng,
        target_zoom: f64,
    },
    /// Smooth fly-to animation (like Leaflet's flyTo)
    FlyTo {
        target_center: LatLng,
        target_zoom: f64,
    },
}

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

/// Easing functions used by camera transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingFunction {
    Linear,
    EaseOutCubic,
    EaseInOutQuad,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Spherical interpolation between two coordinates (great circle path)
pub fn slerp_lat_lng(start: &LatLng, end: &LatLng, t: f64) -> LatLng {
    let start_rad = (start.lat.to_radians(), start.lng.to_radians());
    let end_rad = (end.lat.to_radians(), end.lng.to_radians());

    let start_cart = (
        start_rad.0.cos() * start_rad.1.cos(),
        start_rad.0.cos() * start_rad.1.sin(),
        start_rad.0.sin(),
    );
    let end_cart = (
        end_rad.0.cos() * end_rad.1.cos(),
        end_rad.0.cos() * end_rad.1.sin(),
        end_rad.0.sin(),
    );

    let dot = start_cart.0 * end_cart.0 + start_cart.1 * end_cart.1 + start_cart.2 * end_cart.2;
    let theta = dot.clamp(-1.0, 1.0).acos();

    if theta.abs() < 1e-6 {
        // Points are very close, use linear interpolation
        return start.lerp(end, t);
    }

    let sin_theta = theta.sin();
    let a = ((1.0 - t) * theta).sin() / sin_theta;
    let b = (t * theta).sin() / sin_theta;

    let result_cart = (
        a * start_cart.0 + b * end_cart.0,
        a * start_cart.1 + b * end_cart.1,
        a * start_cart.2 + b * end_cart.2,
    );

    let lat = result_cart.2.asin().to_degrees();
    let lng = result_cart.1.atan2(result_cart.0).to_degrees();

    LatLng::new(lat, lng)
}

/// A viewport transition animation
pub struct Transition {
    /// Unique identifier
    pub id: String,
    /// Type of transition
    pub transition_type: TransitionType,
    /// Duration in seconds
    pub duration: f64,
    /// Easing function
    pub easing: EasingFunction,
    /// Current state
    pub state: TransitionState,
    /// Start time
    pub start_time: Option<Instant>,
    /// Elapsed time
    pub elapsed_time: f64,
    /// Initial viewport state
    pub start_viewport: Viewport,
    /// Target viewport state
    pub target_viewport: Viewport,
    /// Current viewport state (interpolated)
    pub current_viewport: Viewport,
}

impl Transition {
    /// Create a new transition
    pub fn new(
        id: String,
        transition_type: TransitionType,
        current_viewport: Viewport,
        duration: f64,
    ) -> Self {
        let target_viewport = Self::calculate_target_viewport(&transition_type, &current_viewport);

        Self {
            id,
            transition_type,
            duration,
            easing: EasingFunction::EaseInOutQuad,
            state: TransitionState::NotStarted,
            start_time: None,
            elapsed_time: 0.0,
            start_viewport: current_viewport.clone(),
            target_viewport,
            current_viewport,
        }
    }

    fn calculate_target_viewport(transition_type: &TransitionType, current: &Viewport) -> Viewport {
        let mut target = current.clone();

        match transition_type {
            TransitionType::SetView {
                target_center,
                target_zoom,
            }
            | TransitionType::FlyTo {
                target_center,
                target_zoom,
            } => {
                target.set_center(*target_center);
                target.set_zoom(*target_zoom);
            }
        }

        target
    }

    /// Set the easing function
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Start the transition
    pub fn start(&mut self) {
        if self.state == TransitionState::NotStarted {
            self.start_time = Some(Instant::now());
            self.state = TransitionState::Running;
            self.elapsed_time = 0.0;
        }
    }

    /// Stop the transition
    pub fn stop(&mut self) {
        self.state = TransitionState::Cancelled;
    }

    /// Update the transition; returns true while it is producing frames
    pub fn update(&mut self, delta_time: f64) -> bool {
        match self.state {
            TransitionState::NotStarted => {
                self.start();
                false
            }
            TransitionState::Running => {
                self.elapsed_time += delta_time;
                let progress = (self.elapsed_time / self.duration).clamp(0.0, 1.0);
                let eased_progress = self.easing.apply(progress);

                self.update_viewport(eased_progress);

                if progress >= 1.0 {
                    self.complete();
                }

                true
            }
            _ => false,
        }
    }

    fn update_viewport(&mut self, progress: f64) {
        match &self.transition_type {
            TransitionType::FlyTo {
                target_center,
                target_zoom,
            } => {
                self.update_flyto_viewport(progress, *target_center, *target_zoom);
            }
            TransitionType::SetView { .. } => {
                self.current_viewport.center = self
                    .start_viewport
                    .center
                    .lerp(&self.target_viewport.center, progress);
                self.current_viewport.zoom = self.start_viewport.zoom
                    + (self.target_viewport.zoom - self.start_viewport.zoom) * progress;
            }
        }
    }

    /// Fly-to simulates flying up and then down: the zoom follows a
    /// parabolic arc while the center travels the great-circle path.
    fn update_flyto_viewport(&mut self, progress: f64, target_center: LatLng, target_zoom: f64) {
        let start_center = self.start_viewport.center;
        let start_zoom = self.start_viewport.zoom;

        let distance = start_center.distance_to(&target_center);
        let flight_floor = if distance < 1.0 {
            start_zoom.min(target_zoom)
        } else {
            let zoom_for_distance = (-distance / 1000.0).max(-32.0) + 10.0;
            (start_zoom.min(target_zoom) - 2.0).max(zoom_for_distance)
        };

        let zoom_progress = if progress < 0.5 {
            // Flying up (zooming out)
            let t = progress * 2.0;
            let zoom_out_amount = start_zoom - flight_floor;
            start_zoom - zoom_out_amount * (2.0 * t - t * t)
        } else {
            // Flying down (zooming in)
            let t = (progress - 0.5) * 2.0;
            let zoom_in_amount = target_zoom - flight_floor;
            flight_floor + zoom_in_amount * (t * t)
        };

        self.current_viewport.center = slerp_lat_lng(&start_center, &target_center, progress);
        self.current_viewport.zoom = zoom_progress;
    }

    fn complete(&mut self) {
        self.state = TransitionState::Completed;
        self.current_viewport = self.target_viewport.clone();
    }

    /// Check if the transition is finished
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Completed | TransitionState::Cancelled
        )
    }

    /// Get the current progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration == 0.0 {
            1.0
        } else {
            (self.elapsed_time / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Manager for camera transitions.
///
/// A new transition always supersedes the in-flight one; interrupted
/// flights are cancelled mid-animation and never resumed.
pub struct TransitionManager {
    current_transition: Option<Transition>,
}

impl TransitionManager {
    pub fn new() -> Self {
        Self {
            current_transition: None,
        }
    }

    /// Start a new transition, cancelling any in-flight one
    pub fn start_transition(&mut self, transition: Transition) {
        if let Some(ref mut current) = self.current_transition {
            current.stop();
        }

        let mut new_transition = transition;
        new_transition.start();
        self.current_transition = Some(new_transition);
    }

    /// Update the active transition and return the interpolated viewport
    pub fn update(&mut self, delta_time: f64) -> Option<Viewport> {
        let mut result_viewport = None;

        if let Some(ref mut transition) = self.current_transition {
            if transition.update(delta_time) {
                result_viewport = Some(transition.current_viewport.clone());
            }

            if transition.is_finished() {
                self.current_transition = None;
            }
        }

        result_viewport
    }

    /// Stop the current transition
    pub fn stop_current(&mut self) {
        if let Some(ref mut transition) = self.current_transition {
            transition.stop();
        }
    }

    /// Check if there's an active transition
    pub fn has_active_transition(&self) -> bool {
        self.current_transition
            .as_ref()
            .map(|t| !t.is_finished())
            .unwrap_or(false)
    }

    /// Get reference to the current transition
    pub fn current_transition(&self) -> Option<&Transition> {
        self.current_transition.as_ref()
    }
}

impl Default for TransitionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;

    fn test_viewport() -> Viewport {
        Viewport::new(LatLng::new(13.75, 100.5), 14.0, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_flyto_reaches_target() {
        let target = LatLng::new(13.7386, 100.5133);
        let mut transition = Transition::new(
            "flight_1".to_string(),
            TransitionType::FlyTo {
                target_center: target,
                target_zoom: 17.0,
            },
            test_viewport(),
            1.0,
        );
        transition.start();

        transition.update(0.5);
        assert_eq!(transition.state, TransitionState::Running);

        transition.update(0.6);
        assert!(transition.is_finished());
        assert_eq!(transition.current_viewport.center, target);
        assert_eq!(transition.current_viewport.zoom, 17.0);
    }

    #[test]
    fn test_flyto_arcs_through_lower_zoom() {
        let target = LatLng::new(13.7386, 100.5133);
        let mut transition = Transition::new(
            "flight_2".to_string(),
            TransitionType::FlyTo {
                target_center: target,
                target_zoom: 17.0,
            },
            test_viewport(),
            1.0,
        )
        .with_easing(EasingFunction::Linear);
        transition.start();

        transition.update(0.5);
        let midway_zoom = transition.current_viewport.zoom;
        assert!(midway_zoom < 14.0, "midway zoom {midway_zoom} should dip");
    }

    #[test]
    fn test_new_transition_supersedes_in_flight_one() {
        let mut manager = TransitionManager::new();
        let first = Transition::new(
            "flight_a".to_string(),
            TransitionType::FlyTo {
                target_center: LatLng::new(13.7386, 100.5133),
                target_zoom: 17.0,
            },
            test_viewport(),
            1.0,
        );
        manager.start_transition(first);
        manager.update(0.2);
        assert!(manager.has_active_transition());

        let second = Transition::new(
            "flight_b".to_string(),
            TransitionType::FlyTo {
                target_center: LatLng::new(13.7566, 100.5025),
                target_zoom: 17.0,
            },
            test_viewport(),
            1.0,
        );
        manager.start_transition(second);

        assert_eq!(
            manager.current_transition().unwrap().id,
            "flight_b".to_string()
        );

        manager.update(1.5);
        assert!(!manager.has_active_transition());
    }

    #[test]
    fn test_set_view_interpolates_linearly() {
        let mut transition = Transition::new(
            "view_1".to_string(),
            TransitionType::SetView {
                target_center: LatLng::new(14.75, 100.5),
                target_zoom: 16.0,
            },
            test_viewport(),
            1.0,
        )
        .with_easing(EasingFunction::Linear);
        transition.start();

        transition.update(0.5);
        assert!((transition.current_viewport.zoom - 15.0).abs() < 1e-9);
        assert!((transition.current_viewport.center.lat - 14.25).abs() < 1e-9);
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = LatLng::new(13.7386, 100.5133);
        let b = LatLng::new(13.7566, 100.5025);
        let start = slerp_lat_lng(&a, &b, 0.0);
        let end = slerp_lat_lng(&a, &b, 1.0);
        assert!((start.lat - a.lat).abs() < 1e-6);
        assert!((end.lng - b.lng).abs() < 1e-6);
    }
}
