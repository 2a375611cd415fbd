use crate::camera::{MapCamera, MarkerEventSender, MarkerEvents};
use crate::catalog::PassportData;
use crate::core::constants::{DESKTOP_BREAKPOINT_PX, INITIAL_ZOOM, MAX_ZOOM, MIN_ZOOM_LIMIT};
use crate::core::geo::Point;
use crate::ui::drawers::{EventInfoDrawer, EventSelecterDrawer};
use crate::ui::image::ImageCache;
use crate::ui::map_view::MapView;
use crate::ui::mini_map::MiniMap;
use crate::ui::panels::{DesktopEventPanel, EventGrid, HeaderAction, PassportHeader};
use crate::ui::style::ShellStyle;
use crate::view::layout::{LayoutMode, LayoutResolver};
use crate::view::route::{RouteAction, Router, Tab};
use crate::view::selection::SelectionState;
use crate::view::sync::ViewSynchronizer;
use egui::{Frame, Margin};
use std::sync::Arc;

/// The top-level passport view.
///
/// Owns the whole view-state machine (selection, layout resolver, camera,
/// synchronizer) and renders whichever combination of map, panel and
/// drawers the resolved layout calls for. Rendering is derived; per frame
/// the shell drains input events, reconciles URL and layout, runs the
/// camera synchronizer exactly once against the settled state, then draws.
pub struct PassportShell {
    passport: Arc<PassportData>,
    router: Box<dyn Router>,
    selection: SelectionState,
    layout: LayoutResolver,
    sync: ViewSynchronizer,
    camera: MapCamera,
    marker_events: MarkerEvents,
    marker_sender: MarkerEventSender,
    mini_map: MiniMap,
    images: ImageCache,
    style: ShellStyle,
    /// Whether the session started on the mobile map tab (header begins
    /// collapsed there).
    opened_on_map_tab: bool,
}

impl PassportShell {
    pub fn new(passport: Arc<PassportData>, router: Box<dyn Router>) -> Self {
        let home = passport.first_valid_position();

        let mut camera = MapCamera::new(home, INITIAL_ZOOM, Point::new(800.0, 600.0));
        camera.set_zoom_limits(MIN_ZOOM_LIMIT, MAX_ZOOM);

        let marker_events = MarkerEvents::new();
        let marker_sender = marker_events.sender();
        let opened_on_map_tab = router.tab() == Some(Tab::Map);

        Self {
            mini_map: MiniMap::new(home),
            sync: ViewSynchronizer::new(home),
            passport,
            router,
            selection: SelectionState::new(),
            layout: LayoutResolver::new(),
            camera,
            marker_events,
            marker_sender,
            images: ImageCache::new(),
            style: ShellStyle::default(),
            opened_on_map_tab,
        }
    }

    pub fn with_style(mut self, style: ShellStyle) -> Self {
        self.style = style;
        self
    }

    /// Runtime handle for image fetches. Needed when the shell is built
    /// outside a tokio context (eframe's update thread).
    #[cfg(feature = "tokio-runtime")]
    pub fn with_runtime(mut self, handle: tokio::runtime::Handle) -> Self {
        self.images.set_runtime(handle);
        self
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn camera(&self) -> &MapCamera {
        &self.camera
    }

    pub fn router(&self) -> &dyn Router {
        self.router.as_ref()
    }

    /// Sender for an external map widget to report marker clicks through.
    pub fn marker_sender(&self) -> MarkerEventSender {
        self.marker_sender.clone()
    }

    /// Runs one frame: input, reconciliation, camera sync, rendering.
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.images.poll(ctx);

        // Marker clicks are the map's only selection-intent signal.
        for marker in self.marker_events.drain() {
            if let Some(event) = self.passport.event_by_id(&marker.event_id) {
                self.selection.select(event.clone());
            }
        }

        let is_desktop = ctx.screen_rect().width() >= DESKTOP_BREAKPOINT_PX;
        let resolution = self.layout.resolve(is_desktop, self.router.tab());
        if let Some(correction) = resolution.correction {
            self.router.apply(correction);
        }

        // One camera reconciliation per settled frame state. Selection
        // changes made while rendering below are picked up next frame.
        self.sync.sync(&self.selection, &mut self.camera);

        let delta_time = ctx.input(|i| i.stable_dt) as f64;
        let mut animating = self.camera.update(delta_time);
        animating |= self.mini_map.tick(&self.selection, delta_time);

        match resolution.mode {
            LayoutMode::Desktop => self.desktop_ui(ctx),
            LayoutMode::MobileGrid => self.mobile_grid_ui(ctx),
            LayoutMode::MobileMap => self.mobile_map_ui(ctx),
        }

        if animating {
            ctx.request_repaint();
        } else if self.images.has_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn panel_frame(&self) -> Frame {
        Frame::none()
            .fill(self.style.panel_fill)
            .inner_margin(Margin::same(16.0))
    }

    fn desktop_ui(&mut self, ctx: &egui::Context) {
        let panel_width = (ctx.screen_rect().width() * 0.35).clamp(300.0, 450.0);

        egui::SidePanel::right("passport-panel")
            .exact_width(panel_width)
            .resizable(false)
            .frame(self.panel_frame())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    PassportHeader::show(
                        ui,
                        &self.passport,
                        &mut self.images,
                        &self.style,
                        false,
                        None,
                        false,
                    );
                    ui.add_space(12.0);
                    if let Some(event) = EventGrid::show(
                        ui,
                        &self.passport,
                        &self.selection,
                        &mut self.images,
                        &self.style,
                    ) {
                        self.selection.select(event);
                    }
                });
            });

        egui::CentralPanel::default()
            .frame(Frame::none())
            .show(ctx, |ui| {
                self.map_surface(ui);
            });

        if let Some(event) = self.selection.selected().cloned() {
            let close = DesktopEventPanel::show(
                ctx,
                &self.passport.partner,
                &event,
                &self.selection,
                &mut self.mini_map,
                &mut self.images,
                &self.style,
            );
            if close {
                self.selection.clear();
            }
        }
    }

    fn mobile_grid_ui(&mut self, ctx: &egui::Context) {
        self.mobile_detail_drawer(ctx);

        egui::CentralPanel::default()
            .frame(self.panel_frame())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = PassportHeader::show(
                        ui,
                        &self.passport,
                        &mut self.images,
                        &self.style,
                        true,
                        None,
                        self.opened_on_map_tab,
                    );
                    if action == Some(HeaderAction::ShowMap) {
                        // Entering the map tab always starts deselected.
                        self.selection.clear();
                        self.router.apply(RouteAction::SetTab(Tab::Map));
                    }

                    ui.add_space(12.0);
                    if let Some(event) = EventGrid::show(
                        ui,
                        &self.passport,
                        &self.selection,
                        &mut self.images,
                        &self.style,
                    ) {
                        self.selection.select(event);
                    }
                });
            });
    }

    fn mobile_map_ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("mobile-map-header")
            .resizable(false)
            .frame(self.panel_frame())
            .show(ctx, |ui| {
                let action = PassportHeader::show(
                    ui,
                    &self.passport,
                    &mut self.images,
                    &self.style,
                    true,
                    Some(Tab::Map),
                    self.opened_on_map_tab,
                );
                if action == Some(HeaderAction::ShowGrid) {
                    self.router.apply(RouteAction::ClearTab);
                }
            });

        if self.selection.selected().is_some() {
            self.mobile_detail_drawer(ctx);
        } else if let Some(event) =
            EventSelecterDrawer::show(ctx, &self.passport, &mut self.images, &self.style)
        {
            self.selection.select(event);
        }

        egui::CentralPanel::default()
            .frame(Frame::none())
            .show(ctx, |ui| {
                self.map_surface(ui);
            });
    }

    fn mobile_detail_drawer(&mut self, ctx: &egui::Context) {
        if let Some(event) = self.selection.selected().cloned() {
            let close = EventInfoDrawer::show(
                ctx,
                &self.passport.partner,
                &event,
                &self.selection,
                &mut self.mini_map,
                &mut self.images,
                &self.style,
            );
            if close {
                self.selection.clear();
            }
        }
    }

    fn map_surface(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        self.camera
            .set_size(Point::new(size.x as f64, size.y as f64));

        MapView::show(
            ui,
            size,
            self.camera.viewport(),
            &self.passport.events,
            self.selection.selected_id(),
            Some(&self.marker_sender),
            None,
            &self.style,
        );
    }
}
