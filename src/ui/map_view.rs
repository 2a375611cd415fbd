use crate::camera::MarkerEventSender;
use crate::catalog::PassportEvent;
use crate::core::constants::GEOFENCE_RADIUS_M;
use crate::core::geo::{LatLng, Point};
use crate::core::viewport::Viewport;
use crate::ui::style::ShellStyle;
use egui::{Align2, FontId, Pos2, Rect, Response, Sense, Ui, Vec2};

/// The flat map surface: a graticule background with one marker per event.
///
/// Tile rendering belongs to the external map widget; this surface only
/// needs the viewport projection to place markers and to report which one
/// was clicked. Clicks are emitted through the marker-event channel, never
/// handled here.
pub struct MapView;

impl MapView {
    /// Draws a `size`d surface at the cursor. Pass a sender to make markers
    /// clickable; `None` renders a non-interactive surface (mini map).
    /// The viewport is expected to already match `size`.
    pub fn show(
        ui: &mut Ui,
        size: Vec2,
        viewport: &Viewport,
        events: &[PassportEvent],
        selected_id: Option<&str>,
        sender: Option<&MarkerEventSender>,
        geofence: Option<LatLng>,
        style: &ShellStyle,
    ) -> Response {
        let sense = if sender.is_some() {
            Sense::click()
        } else {
            Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(size, sense);
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 0.0, style.map_fill);
        Self::draw_graticule(&painter, rect, viewport, style);

        if let Some(center) = geofence {
            if center.is_finite() {
                let pixel = viewport.lat_lng_to_pixel(&center);
                let screen = Self::to_screen(rect, pixel);
                let radius = (GEOFENCE_RADIUS_M / viewport.resolution()) as f32;
                painter.circle_filled(screen, radius, style.geofence_fill);
                painter.circle_stroke(screen, radius, style.geofence_stroke);
            }
        }

        let mut clicked: Option<(&str, f32)> = None;
        let pointer = response.interact_pointer_pos();

        for event in events {
            let Some(position) = event.valid_position() else {
                continue;
            };

            let pixel = viewport.lat_lng_to_pixel(&position);
            let screen = Self::to_screen(rect, pixel);
            if !rect.expand(style.marker_selected_radius).contains(screen) {
                continue;
            }

            let is_selected = selected_id == Some(event.id.as_str());
            let (radius, fill) = if is_selected {
                (style.marker_selected_radius, style.marker_selected_fill)
            } else {
                (style.marker_radius, style.marker_fill)
            };

            painter.circle_filled(screen, radius, fill);
            painter.circle_stroke(screen, radius, style.marker_stroke);

            if response.clicked() {
                if let Some(pos) = pointer {
                    let distance = pos.distance(screen);
                    if distance <= radius + 4.0
                        && clicked.map(|(_, best)| distance < best).unwrap_or(true)
                    {
                        clicked = Some((event.id.as_str(), distance));
                    }
                }
            }
        }

        if let (Some((event_id, _)), Some(sender)) = (clicked, sender) {
            sender.emit(event_id);
        }

        response
    }

    /// Light lat/lng grid so the surface reads as a map even without tiles.
    fn draw_graticule(painter: &egui::Painter, rect: Rect, viewport: &Viewport, style: &ShellStyle) {
        let north_west = viewport.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let south_east = viewport.pixel_to_lat_lng(&Point::new(
            rect.width() as f64,
            rect.height() as f64,
        ));

        let lat_span = (north_west.lat - south_east.lat).abs();
        let lng_span = (south_east.lng - north_west.lng).abs();
        let span = lat_span.max(lng_span).max(1e-9);
        let step = 10_f64.powf((span / 4.0).log10().floor());

        let mut lng = (north_west.lng / step).floor() * step;
        while lng <= south_east.lng + step {
            let pixel = viewport.lat_lng_to_pixel(&LatLng::new(viewport.center.lat, lng));
            let x = rect.min.x + pixel.x as f32;
            painter.line_segment(
                [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
                style.map_grid_stroke,
            );
            lng += step;
        }

        let mut lat = (south_east.lat / step).floor() * step;
        while lat <= north_west.lat + step {
            let pixel = viewport.lat_lng_to_pixel(&LatLng::new(lat, viewport.center.lng));
            let y = rect.min.y + pixel.y as f32;
            painter.line_segment(
                [Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)],
                style.map_grid_stroke,
            );
            lat += step;
        }

        painter.text(
            rect.left_bottom() + egui::vec2(6.0, -4.0),
            Align2::LEFT_BOTTOM,
            format!("z{:.1}", viewport.zoom),
            FontId::proportional(10.0),
            style.map_grid_stroke.color,
        );
    }

    fn to_screen(rect: Rect, pixel: Point) -> Pos2 {
        Pos2::new(rect.min.x + pixel.x as f32, rect.min.y + pixel.y as f32)
    }
}
