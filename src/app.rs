use std::path::PathBuf;

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use brewery_dashboard::config::DashboardConfig;
use brewery_dashboard::data::loader;
use brewery_dashboard::data::model::Snapshot;
use brewery_dashboard::state::{LoadTicket, Session};

use crate::color::ColorMap;
use crate::ui::{chart, panels};

type LoadMessage = (LoadTicket, Result<Snapshot>);

/// Something the panels asked the app to do after drawing.
pub enum UiAction {
    OpenFile(PathBuf),
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BreweryDashboardApp {
    pub session: Session,
    pub config: DashboardConfig,
    pub color_map: ColorMap,
    load_tx: Sender<LoadMessage>,
    load_rx: Receiver<LoadMessage>,
}

impl BreweryDashboardApp {
    /// Create the app and kick off the catalog fetch.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let (load_tx, load_rx) = crossbeam_channel::unbounded();
        let mut app = Self {
            session: Session::new(),
            config,
            color_map: ColorMap::default(),
            load_tx,
            load_rx,
        };
        app.rebuild_color_map();

        let fetch_config = app.config.clone();
        app.spawn_load(cc.egui_ctx.clone(), move || {
            loader::fetch_catalog(&fetch_config)
        });
        app
    }

    /// Run `job` on a worker thread; its result arrives via `poll_loads`.
    fn spawn_load<F>(&mut self, ctx: egui::Context, job: F)
    where
        F: FnOnce() -> Result<Snapshot> + Send + 'static,
    {
        let ticket = self.session.begin_load();
        let tx = self.load_tx.clone();
        std::thread::spawn(move || {
            if tx.send((ticket, job())).is_err() {
                log::error!("Failed to send load result");
            }
            ctx.request_repaint();
        });
    }

    /// Install any finished load results.
    fn poll_loads(&mut self) {
        while let Ok((ticket, outcome)) = self.load_rx.try_recv() {
            if self.session.finish_load(ticket, outcome) {
                self.rebuild_color_map();
            }
        }
    }

    fn rebuild_color_map(&mut self) {
        self.color_map = ColorMap::new(&self.session.snapshot().type_options());
    }

    fn handle(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::OpenFile(path) => {
                log::info!("Loading snapshot from {}", path.display());
                self.spawn_load(ctx.clone(), move || loader::load_file(&path));
            }
        }
    }
}

impl eframe::App for BreweryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();

        // ---- Top panel: menu bar ----
        let mut action = None;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            action = panels::top_bar(ui, &self.session);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.session);
            });

        // ---- Central panel: summary, chart, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::summary_cards(ui, self.session.summary());
            ui.separator();
            chart::type_breakdown(ui, self.session.summary(), &self.color_map);
            ui.separator();
            panels::results_table(ui, &self.session, &self.color_map, self.config.display_rows);
        });

        if let Some(action) = action {
            self.handle(ctx, action);
        }
    }
}
