use crate::core::constants::{MAX_ZOOM_LIMIT, MIN_ZOOM_LIMIT, TILE_SIZE};
use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const EARTH_RADIUS: f64 = 6378137.0;

/// Manages the current view of the map: center, zoom, and screen dimensions.
///
/// This is the state the camera adapter animates; the presentation shell
/// reads it to place markers. It deliberately knows nothing about selection
/// or layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Pixel origin for coordinate transformations (to avoid precision issues)
    pixel_origin: Option<Point>,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM_LIMIT, MAX_ZOOM_LIMIT),
            size,
            min_zoom: MIN_ZOOM_LIMIT,
            max_zoom: MAX_ZOOM_LIMIT,
            pixel_origin: None,
        }
    }

    /// Sets the center of the viewport, clamped to world bounds
    pub fn set_center(&mut self, center: LatLng) {
        self.center = Self::clamp_center(center);
        self.update_pixel_origin();
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.update_pixel_origin();
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
        self.update_pixel_origin();
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// using the standard Web Mercator projection (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE as f64 * 2_f64.powf(z);

        let lat = LatLng::clamp_lat(lat_lng.lat);
        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;

        let pixel_x = (x + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;
        let pixel_y = (-y + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE as f64 * 2_f64.powf(z);

        let x = (pixel.x / scale) * (2.0 * PI * EARTH_RADIUS) - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * (2.0 * PI * EARTH_RADIUS);

        let lng = x / EARTH_RADIUS * 180.0 / PI;
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0) * 180.0 / PI;

        LatLng::new(lat, lng)
    }

    /// Gets or calculates the pixel origin for this viewport.
    /// Keeps pixel coordinates small to avoid f64 precision issues.
    pub fn get_pixel_origin(&self) -> Point {
        self.pixel_origin
            .unwrap_or_else(|| self.project(&self.center, None).floor())
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = Some(self.project(&self.center, None).floor());
    }

    /// Converts a geographical coordinate to screen pixel coordinates
    /// (container relative)
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let layer_point = self.lat_lng_to_layer_point(lat_lng);
        Point::new(
            layer_point.x + self.size.x / 2.0,
            layer_point.y + self.size.y / 2.0,
        )
    }

    /// Converts screen pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let layer_point = Point::new(pixel.x - self.size.x / 2.0, pixel.y - self.size.y / 2.0);
        self.layer_point_to_lat_lng(&layer_point)
    }

    /// Converts LatLng to layer point (relative to the viewport center)
    fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
        let projected = self.project(lat_lng, None);
        let center = self.project(&self.center, None);
        projected.subtract(&center)
    }

    /// Converts layer point back to LatLng
    fn layer_point_to_lat_lng(&self, point: &Point) -> LatLng {
        let center = self.project(&self.center, None);
        self.unproject(&point.add(&center), None)
    }

    /// Gets the resolution in meters per pixel at the current zoom level,
    /// corrected for latitude
    pub fn resolution(&self) -> f64 {
        let earth_circumference = 40_075_016.0;
        earth_circumference * self.center.lat.to_radians().cos()
            / (TILE_SIZE as f64 * self.scale())
    }

    /// Clamps center to world bounds
    fn clamp_center(center: LatLng) -> LatLng {
        LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(13.7563, 100.5018),
            14.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 14.0);
        assert_eq!(viewport.center.lat, 13.7563);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_coordinate_round_trip() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let center_pixel = Point::new(256.0, 256.0);
        let center_lat_lng = viewport.pixel_to_lat_lng(&center_pixel);

        assert!((center_lat_lng.lat - 0.0).abs() < 0.01);
        assert!((center_lat_lng.lng - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_center_projects_to_screen_center() {
        let viewport = Viewport::new(
            LatLng::new(13.7563, 100.5018),
            14.0,
            Point::new(800.0, 600.0),
        );

        let pixel = viewport.lat_lng_to_pixel(&viewport.center);
        assert!((pixel.x - 400.0).abs() < 0.5);
        assert!((pixel.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0); // Below minimum
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0); // Above maximum
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_center_clamped_to_world() {
        let mut viewport = Viewport::default();
        viewport.set_center(LatLng::new(95.0, 200.0));
        assert!(viewport.center.lat < 90.0);
        assert_eq!(viewport.center.lng, 180.0);
    }
}
