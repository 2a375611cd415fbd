//! Engine-wide constants derived from Leaflet defaults and the passport
//! product configuration. Keeping them in a single place makes it easier to
//! tweak the magic numbers.

use crate::core::geo::LatLng;

/// Default square tile size in pixels (slippy-map convention).
pub const TILE_SIZE: u32 = 256;

/// Zoom the camera starts at and returns to when nothing is selected.
pub const INITIAL_ZOOM: f64 = 14.0;

/// Zoom used when flying to a freshly selected event.
pub const MAX_ZOOM: f64 = 17.0;

/// Zoom ceiling for the detail panel's mini map.
pub const MINI_MAP_MAX_ZOOM: f64 = 18.0;

/// Hard zoom limits enforced by the viewport.
pub const MIN_ZOOM_LIMIT: f64 = 0.0;
pub const MAX_ZOOM_LIMIT: f64 = 18.0;

/// Duration of an animated camera flight.
pub const FLY_DURATION_MS: u64 = 1000;

/// Viewport width at or above which the desktop layout applies.
pub const DESKTOP_BREAKPOINT_PX: f32 = 768.0;

/// Radius of the collectible geofence drawn on the mini map, in meters.
pub const GEOFENCE_RADIUS_M: f64 = 50.0;

/// City-level fallback camera target used when no event in the catalog
/// carries a usable coordinate (Bangkok city centre, the catalog's home).
pub const FALLBACK_POSITION: LatLng = LatLng {
    lat: 13.7563,
    lng: 100.5018,
};
