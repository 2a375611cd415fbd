use std::sync::Arc;

use passbook::catalog::fetch::StaticCatalogSource;
use passbook::prelude::*;
use passbook::ui::PassportShell;

const DEMO_CATALOG: &str = include_str!("../assets/passport.json");

type CatalogResult = std::result::Result<PassportData, String>;

/// Standalone passport viewer application
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let runtime = tokio::runtime::Handle::current();
    let (tx, rx) = crossbeam_channel::bounded(1);

    // One-shot catalog fetch; the UI polls for the result.
    let catalog_url = std::env::args().nth(1);
    tokio::spawn(async move {
        let result = match catalog_url {
            Some(url) => HttpCatalogSource::new(url).load().await,
            None => StaticCatalogSource::new(DEMO_CATALOG).load().await,
        };
        let _ = tx.send(result.map_err(|e| e.to_string()));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([360.0, 600.0])
            .with_title("Passbook - Digital Passport Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "passbook-app",
        options,
        Box::new(move |_cc| Box::new(PassbookApp::new(runtime, rx))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}

enum CatalogState {
    Loading,
    Ready(PassportShell),
    Failed(String),
}

/// The main application struct
struct PassbookApp {
    runtime: tokio::runtime::Handle,
    catalog_rx: crossbeam_channel::Receiver<CatalogResult>,
    state: CatalogState,
}

impl PassbookApp {
    fn new(
        runtime: tokio::runtime::Handle,
        catalog_rx: crossbeam_channel::Receiver<CatalogResult>,
    ) -> Self {
        Self {
            runtime,
            catalog_rx,
            state: CatalogState::Loading,
        }
    }

    fn poll_catalog(&mut self) {
        if !matches!(self.state, CatalogState::Loading) {
            return;
        }

        match self.catalog_rx.try_recv() {
            Ok(Ok(passport)) => {
                let shell = PassportShell::new(Arc::new(passport), Box::new(MemoryRouter::new()))
                    .with_runtime(self.runtime.clone());
                self.state = CatalogState::Ready(shell);
            }
            Ok(Err(message)) => {
                self.state = CatalogState::Failed(message);
            }
            Err(_) => {}
        }
    }
}

impl eframe::App for PassbookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_catalog();

        match &mut self.state {
            CatalogState::Ready(shell) => shell.ui(ctx),
            CatalogState::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                });
                ctx.request_repaint_after(std::time::Duration::from_millis(100));
            }
            CatalogState::Failed(message) => {
                let message = message.clone();
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading("Passport unavailable");
                            ui.label("The passport catalog could not be loaded.");
                            ui.label(egui::RichText::new(message).weak().small());
                        });
                    });
                });
            }
        }
    }
}
