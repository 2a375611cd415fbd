use egui::{Color32, Stroke};

/// Visual styling for the passport shell.
#[derive(Debug, Clone)]
pub struct ShellStyle {
    /// Deep partner blue used for panels and the mobile background.
    pub panel_fill: Color32,
    /// Translucent card fill layered on panels.
    pub card_fill: Color32,
    /// Accent used for the collect button and selected markers.
    pub accent: Color32,
    /// Counter/achievement green.
    pub emerald: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    /// Flat map surface behind the markers.
    pub map_fill: Color32,
    pub map_grid_stroke: Stroke,
    pub marker_fill: Color32,
    pub marker_selected_fill: Color32,
    pub marker_stroke: Stroke,
    /// Geofence circle on the mini map.
    pub geofence_fill: Color32,
    pub geofence_stroke: Stroke,
    pub marker_radius: f32,
    pub marker_selected_radius: f32,
    pub rounding: f32,
}

impl Default for ShellStyle {
    fn default() -> Self {
        Self {
            panel_fill: Color32::from_rgb(0, 41, 77),
            card_fill: Color32::from_rgba_unmultiplied(255, 255, 255, 40),
            accent: Color32::from_rgb(255, 20, 147),
            emerald: Color32::from_rgb(52, 211, 153),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(203, 213, 225),
            map_fill: Color32::from_rgb(229, 231, 235),
            map_grid_stroke: Stroke::new(0.5, Color32::from_rgb(209, 213, 219)),
            marker_fill: Color32::from_rgb(17, 24, 39),
            marker_selected_fill: Color32::from_rgb(255, 20, 147),
            marker_stroke: Stroke::new(1.5, Color32::WHITE),
            geofence_fill: Color32::from_rgba_unmultiplied(255, 20, 147, 50),
            geofence_stroke: Stroke::new(1.0, Color32::from_rgb(255, 20, 147)),
            marker_radius: 7.0,
            marker_selected_radius: 11.0,
            rounding: 12.0,
        }
    }
}
