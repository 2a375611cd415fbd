use crate::catalog::{PassportData, PassportEvent, PassportPartner};
use crate::core::constants::GEOFENCE_RADIUS_M;
use crate::ui::image::ImageCache;
use crate::ui::mini_map::MiniMap;
use crate::ui::style::ShellStyle;
use crate::view::route::Tab;
use crate::view::selection::SelectionState;
use egui::{Align2, Color32, Frame, Margin, Rect, RichText, Rounding, Sense, Stroke, Ui, Vec2};

/// Navigation intent raised by the header's tab row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    ShowGrid,
    ShowMap,
}

/// Partner branding, passport title and description, collection counter,
/// and (on mobile) the grid/map tab row.
pub struct PassportHeader;

impl PassportHeader {
    pub fn show(
        ui: &mut Ui,
        passport: &PassportData,
        images: &mut ImageCache,
        style: &ShellStyle,
        show_tabs: bool,
        active_tab: Option<Tab>,
        start_collapsed: bool,
    ) -> Option<HeaderAction> {
        let mut action = None;

        Frame::none()
            .fill(style.card_fill)
            .rounding(Rounding::same(style.rounding))
            .inner_margin(Margin::same(12.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    Self::avatar(ui, images, &passport.partner, 28.0);
                    ui.label(
                        RichText::new(&passport.partner.display_name)
                            .strong()
                            .size(16.0)
                            .color(style.text_primary),
                    );
                });

                ui.add_space(4.0);
                ui.label(
                    RichText::new(&passport.name)
                        .strong()
                        .size(18.0)
                        .color(style.text_primary),
                );

                egui::CollapsingHeader::new(
                    RichText::new("About this passport").color(style.text_secondary),
                )
                .id_source(("passport-header", show_tabs))
                .default_open(!start_collapsed)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(&passport.description)
                            .size(13.0)
                            .color(style.text_secondary),
                    );
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("0/{}", passport.len()))
                                .strong()
                                .size(26.0)
                                .color(style.emerald),
                        );
                        ui.label(
                            RichText::new("Collectibles\nCollected")
                                .size(12.0)
                                .color(style.text_primary),
                        );
                    });
                });

                if show_tabs {
                    ui.separator();
                    ui.columns(2, |columns| {
                        let grid_active = active_tab.is_none();
                        if columns[0]
                            .selectable_label(grid_active, RichText::new("⊞ Grid View").size(14.0))
                            .clicked()
                            && !grid_active
                        {
                            action = Some(HeaderAction::ShowGrid);
                        }

                        let map_active = active_tab == Some(Tab::Map);
                        if columns[1]
                            .selectable_label(map_active, RichText::new("📍 Map View").size(14.0))
                            .clicked()
                            && !map_active
                        {
                            action = Some(HeaderAction::ShowMap);
                        }
                    });
                }
            });

        action
    }

    fn avatar(ui: &mut Ui, images: &mut ImageCache, partner: &PassportPartner, size: f32) {
        let texture = images.texture(ui.ctx(), &partner.profile_image);
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
        ui.painter().image(
            texture.id(),
            rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}

/// The 4-column badge grid shown in the mobile grid view and the desktop
/// side panel. Returns the event the user tapped, if any.
pub struct EventGrid;

impl EventGrid {
    const COLUMNS: usize = 4;

    pub fn show(
        ui: &mut Ui,
        passport: &PassportData,
        selection: &SelectionState,
        images: &mut ImageCache,
        style: &ShellStyle,
    ) -> Option<PassportEvent> {
        let mut clicked = None;
        let spacing = 8.0;
        let cell = ((ui.available_width() - spacing * (Self::COLUMNS as f32 - 1.0))
            / Self::COLUMNS as f32)
            .max(24.0);

        for row in passport.events.chunks(Self::COLUMNS) {
            ui.horizontal(|ui| {
                for event in row {
                    let (rect, response) =
                        ui.allocate_exact_size(Vec2::splat(cell), Sense::click());
                    let texture = images.texture(ui.ctx(), &event.image_url);

                    ui.painter().image(
                        texture.id(),
                        rect,
                        Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );

                    if selection.is_selected(&event.id) {
                        ui.painter().rect_stroke(
                            rect,
                            Rounding::same(4.0),
                            Stroke::new(2.0, style.text_primary),
                        );
                    }

                    if response.clicked() {
                        clicked = Some(event.clone());
                    }
                }
            });
            ui.add_space(spacing);
        }

        clicked
    }
}

/// Shared body of the event detail panel and the mobile detail drawer:
/// badge image, availability window, collect stub, how-to accordion with
/// the mini map, and the partner preview block.
pub struct EventDetailContent;

impl EventDetailContent {
    pub fn show(
        ui: &mut Ui,
        partner: &PassportPartner,
        event: &PassportEvent,
        selection: &SelectionState,
        mini_map: &mut MiniMap,
        images: &mut ImageCache,
        style: &ShellStyle,
    ) {
        let badge = images.texture(ui.ctx(), &event.image_url);
        let badge_size = (ui.available_width() - 32.0).clamp(120.0, 260.0);
        ui.vertical_centered(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(badge_size), Sense::hover());
            ui.painter().image(
                badge.id(),
                rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        });

        ui.add_space(8.0);
        ui.label(
            RichText::new(event.display_title())
                .strong()
                .size(20.0)
                .color(style.text_primary),
        );
        ui.label(
            RichText::new(Self::availability_line(event))
                .size(13.0)
                .color(style.text_secondary),
        );

        ui.add_space(8.0);
        let collect = egui::Button::new(
            RichText::new("Collect Now")
                .strong()
                .color(style.text_primary),
        )
        .fill(style.accent)
        .rounding(Rounding::same(18.0))
        .min_size(Vec2::new(ui.available_width(), 36.0));
        if ui.add(collect).clicked() {
            // Redemption is stubbed; there is nothing to collect yet.
            #[cfg(feature = "debug")]
            log::info!("Collect requested for event '{}'", event.id);
        }

        ui.add_space(8.0);
        Frame::none()
            .fill(style.card_fill)
            .rounding(Rounding::same(style.rounding))
            .inner_margin(Margin::same(8.0))
            .show(ui, |ui| {
                egui::CollapsingHeader::new(
                    RichText::new("How to collect this collectible").size(15.0),
                )
                .default_open(true)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(Self::collect_hint(event))
                            .size(13.0)
                            .color(style.text_secondary),
                    );
                    ui.add_space(6.0);
                    mini_map.show(ui, 192.0, selection, style);
                });
            });

        ui.add_space(8.0);
        Frame::none()
            .fill(style.card_fill)
            .rounding(Rounding::same(style.rounding))
            .inner_margin(Margin::same(8.0))
            .show(ui, |ui| {
                egui::CollapsingHeader::new(RichText::new("Collectible Preview").size(15.0))
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.label(RichText::new("by").size(13.0).color(style.text_secondary));
                        ui.horizontal(|ui| {
                            PassportHeader::avatar(ui, images, partner, 24.0);
                            ui.label(
                                RichText::new(&partner.display_name)
                                    .strong()
                                    .size(15.0)
                                    .color(style.text_primary),
                            );
                        });
                    });
            });
    }

    fn availability_line(event: &PassportEvent) -> String {
        match (&event.available_from, &event.available_until) {
            (Some(from), Some(until)) => {
                format!("Available to collect from {from} to {until}")
            }
            (Some(from), None) => format!("Available to collect from {from}"),
            (None, Some(until)) => format!("Available to collect until {until}"),
            (None, None) => "Available to collect now".to_string(),
        }
    }

    fn collect_hint(event: &PassportEvent) -> String {
        event.collect_hint.clone().unwrap_or_else(|| {
            format!(
                "Visit this location within {GEOFENCE_RADIUS_M:.0} meters of the marker to collect this badge."
            )
        })
    }
}

/// Floating event detail card for the desktop layout. Returns true when
/// the close button was clicked.
pub struct DesktopEventPanel;

impl DesktopEventPanel {
    pub fn show(
        ctx: &egui::Context,
        partner: &PassportPartner,
        event: &PassportEvent,
        selection: &SelectionState,
        mini_map: &mut MiniMap,
        images: &mut ImageCache,
        style: &ShellStyle,
    ) -> bool {
        let mut close = false;
        let max_height = ctx.screen_rect().height() - 96.0;

        egui::Window::new("Event details")
            .title_bar(false)
            .resizable(false)
            .anchor(Align2::LEFT_TOP, Vec2::new(16.0, 72.0))
            .fixed_size(Vec2::new(380.0, max_height.min(560.0)))
            .frame(
                Frame::none()
                    .fill(style.panel_fill)
                    .rounding(Rounding::same(style.rounding))
                    .inner_margin(Margin::same(16.0)),
            )
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui.button(RichText::new("✕").size(14.0)).clicked() {
                        close = true;
                    }
                });

                egui::ScrollArea::vertical()
                    .max_height(max_height.min(560.0) - 48.0)
                    .show(ui, |ui| {
                        EventDetailContent::show(
                            ui, partner, event, selection, mini_map, images, style,
                        );
                    });
            });

        close
    }
}
