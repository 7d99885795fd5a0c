// app.rs - eframe front end: controls, canvas and the repaint-driven frame loop

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke};
use log::{debug, error, info};

use conway::{Preset, Universe};

use crate::bitgrid::Dimensions;
use crate::config::Config;
use crate::engine::Backend;
use crate::fps::SystemClock;
use crate::renderer::GridRenderer;
use crate::scheduler::{FrameHandle, FrameHost};
use crate::session::LifeSession;
use crate::surface::Surface;
use crate::{Error, Result};

/// Paints backing-store coordinates onto an egui painter, scaled to fit.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
    scale: f32,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Pos2, scale: f32) -> Self {
        Self { painter, origin, scale }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.origin + pos.to_vec2() * self.scale
    }
}

impl Surface for PainterSurface<'_> {
    fn stroke_line(&mut self, from: Pos2, to: Pos2, color: Color32) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            Stroke::new(self.scale.min(1.0), color),
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let rect = Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max));
        self.painter.rect_filled(rect, 0.0, color);
    }
}

/// Frame callbacks on top of egui's repaint requests: a requested frame fires
/// on the next `update` unless it was cancelled first.
pub struct RepaintHost {
    ctx: egui::Context,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl RepaintHost {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx, next_id: 0, pending: None }
    }

    /// The frame due in this update, if any.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameHost for RepaintHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.ctx.request_repaint();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

pub struct LifeApp {
    session: LifeSession<Backend>,
    host: RepaintHost,
    clock: SystemClock,
    config: Config,
    selected_preset: Preset,
    halted: Option<String>,
}

impl LifeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, backend: Backend) -> Self {
        let clock = SystemClock::default();
        let renderer = GridRenderer::new(config.cell_size);
        let mut session = LifeSession::new(backend, renderer, config.step_multiplier, &clock);
        let mut host = RepaintHost::new(cc.egui_ctx.clone());
        if !config.start_paused {
            session.play(&mut host);
        }

        Self {
            session,
            host,
            clock,
            selected_preset: config.preset,
            config,
            halted: None,
        }
    }

    /// Builds the engine, opens the window and runs until it is closed.
    pub fn run(config: Config) -> Result<()> {
        let universe = Universe::from_preset(config.preset, config.width, config.height, config.seed);
        let backend = Backend::new(universe, config.row_tasks)?;
        info!(
            "{}x{} universe, preset {}, {} stepping, {} step(s) per frame",
            config.width,
            config.height,
            config.preset,
            backend.name(),
            config.step_multiplier
        );

        let size = GridRenderer::new(config.cell_size)
            .canvas_size(Dimensions::new(config.width, config.height));
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([size.x.max(480.0) + 40.0, size.y + 160.0]),
            ..Default::default()
        };

        eframe::run_native(
            "Conway's Game of Life",
            options,
            Box::new(move |cc| Box::new(LifeApp::new(cc, config, backend))),
        )
        .map_err(|e| Error::Ui(e.to_string()))
    }

    fn load_preset(&mut self, preset: Preset) {
        let (width, height, seed) = (self.config.width, self.config.height, self.config.seed);
        debug!("loading preset {preset}");
        self.session.restart(&self.clock, |backend| {
            backend.load(Universe::from_preset(preset, width, height, seed));
        });
        self.config.seed = self.config.seed.wrapping_add(1);
        self.halted = None;
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = self.session.scheduler().button_label();
            if ui.button(label).clicked() {
                let playback = self.session.toggle_playback(&mut self.host);
                debug!("play/pause -> {playback:?}");
                self.halted = None;
            }

            if ui.button("⏹ Clear").clicked() {
                self.load_preset(Preset::Empty);
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("preset_selector")
                .selected_text(self.selected_preset.name())
                .show_ui(ui, |ui| {
                    for preset in Preset::all() {
                        ui.selectable_value(&mut self.selected_preset, preset, preset.name());
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.load_preset(self.selected_preset);
            }

            ui.separator();

            let mut steps = self.session.step_multiplier();
            if ui
                .add(egui::Slider::new(&mut steps, 0..=20).text("steps / frame"))
                .changed()
            {
                self.session.set_step_multiplier(steps);
            }
        });

        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", self.session.generations()));
            ui.separator();
            ui.label(format!("Live cells: {}", self.session.population()));
            ui.separator();
            ui.monospace(self.session.fps().text());
        });

        if let Some(message) = &self.halted {
            ui.colored_label(Color32::RED, format!("Stopped: {message}"));
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let backing = self.session.canvas_size();
        let available = ui.available_size();
        let scale = (available.x / backing.x).min(available.y / backing.y).max(0.1);

        let (response, painter) = ui.allocate_painter(backing * scale, egui::Sense::click());
        let bounds = response.rect;
        let mut surface = PainterSurface::new(&painter, bounds.min, scale);

        let mut drawn = false;
        if let Some(handle) = self.host.take_due() {
            match self.session.on_frame(handle, &mut self.host, &mut surface, &self.clock) {
                Ok(ran) => drawn = ran,
                Err(err) => {
                    error!("animation stopped: {err}");
                    self.halted = Some(err.to_string());
                }
            }
        }
        // Immediate mode: every update paints the grid, frame or not.
        if !drawn {
            self.session.redraw(&mut surface);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                match self.session.click(pos, bounds, &mut surface) {
                    Ok(_) => ui.ctx().request_repaint(),
                    Err(err) => {
                        error!("toggle failed: {err}");
                        self.halted = Some(err.to_string());
                    }
                }
            }
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ui);
        });
    }
}
