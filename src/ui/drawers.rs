use crate::catalog::{PassportData, PassportEvent, PassportPartner};
use crate::ui::image::ImageCache;
use crate::ui::mini_map::MiniMap;
use crate::ui::panels::EventDetailContent;
use crate::ui::style::ShellStyle;
use crate::view::selection::SelectionState;
use egui::{Color32, Frame, Margin, Rect, RichText, Rounding, Sense, Stroke, Ui, Vec2};

const DRAWER_ROUNDING: f32 = 16.0;

fn drawer_frame(style: &ShellStyle) -> Frame {
    Frame::none()
        .fill(style.panel_fill)
        .rounding(Rounding {
            nw: DRAWER_ROUNDING,
            ne: DRAWER_ROUNDING,
            sw: 0.0,
            se: 0.0,
        })
        .inner_margin(Margin::same(16.0))
}

/// Bottom drawer with the selected event's details (mobile layouts).
/// Returns true when the close affordance was used.
pub struct EventInfoDrawer;

impl EventInfoDrawer {
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
        let max_height = ctx.screen_rect().height() * 0.75;

        egui::TopBottomPanel::bottom("event-info-drawer")
            .resizable(false)
            .frame(drawer_frame(style))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui.button(RichText::new("✕").size(14.0)).clicked() {
                        close = true;
                    }
                });

                egui::ScrollArea::vertical()
                    .max_height(max_height)
                    .show(ui, |ui| {
                        EventDetailContent::show(
                            ui, partner, event, selection, mini_map, images, style,
                        );
                    });
            });

        close
    }
}

/// Bottom drawer listing every badge while the mobile map view has no
/// selection. Returns the event the user tapped, if any.
pub struct EventSelecterDrawer;

impl EventSelecterDrawer {
    pub fn show(
        ctx: &egui::Context,
        passport: &PassportData,
        images: &mut ImageCache,
        style: &ShellStyle,
    ) -> Option<PassportEvent> {
        let mut clicked = None;

        egui::TopBottomPanel::bottom("event-selecter-drawer")
            .resizable(false)
            .frame(drawer_frame(style))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Tap a slot or location pin for information")
                            .size(14.0)
                            .color(style.text_primary),
                    );
                });
                ui.add_space(8.0);

                egui::ScrollArea::horizontal().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for event in &passport.events {
                            if Self::badge_slot(ui, event, images, style) {
                                clicked = Some(event.clone());
                            }
                        }
                    });
                });
                ui.add_space(8.0);
            });

        clicked
    }

    fn badge_slot(
        ui: &mut Ui,
        event: &PassportEvent,
        images: &mut ImageCache,
        style: &ShellStyle,
    ) -> bool {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(64.0), Sense::click());
        let texture = images.texture(ui.ctx(), &event.image_url);

        ui.painter().image(
            texture.id(),
            rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        if response.hovered() {
            ui.painter().rect_stroke(
                rect,
                Rounding::same(4.0),
                Stroke::new(1.5, style.text_primary),
            );
        }

        response.clicked()
    }
}
