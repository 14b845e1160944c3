//! Moving-mesh window built with eframe/egui.
//!
//! This module binds the core [`Driver`] to egui:
//! - [`PanelBounds`] stands in for a resize observer on the central panel.
//! - [`RepaintScheduler`] turns frame requests into `request_repaint`.
//! - [`PainterSurface`] draws the mesh with an [`egui::Painter`].
//!
//! [`Viewer`] implements [`eframe::App`] and owns all of it.

use eframe::App;
use glam::Vec2;
use mesh_core::{
    config::Settings,
    driver::{BoundsSource, Driver, FrameOutcome, FrameScheduler, Phase},
    render::Surface,
    types::FrameHandle,
};
use rand::rngs::ThreadRng;
use tracing::warn;

/// Resize subscription for the central panel.
///
/// egui has no resize events, so the viewer compares the panel size on
/// every pass and only forwards it while this source is subscribed.
#[derive(Debug, Default)]
pub struct PanelBounds {
    subscribed: bool,
}

impl PanelBounds {
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

impl BoundsSource for PanelBounds {
    fn subscribe(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}

/// Frame scheduler backed by egui repaints.
///
/// A request is "fired" by the next `update` pass; the viewer keeps
/// asking egui for repaints while one is outstanding.
#[derive(Debug, Default)]
pub struct RepaintScheduler {
    next: u64,
    pending: Option<FrameHandle>,
}

impl RepaintScheduler {
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

type MeshDriver = Driver<PanelBounds, RepaintScheduler, ThreadRng>;

/// Parses a settings color: a handful of CSS names or `#rgb[a]` /
/// `#rrggbb[aa]` hex.
pub fn parse_color(s: &str) -> Option<egui::Color32> {
    let s = s.trim();
    let named = match s.to_ascii_lowercase().as_str() {
        "white" => Some(egui::Color32::WHITE),
        "black" => Some(egui::Color32::BLACK),
        "red" => Some(egui::Color32::RED),
        "green" => Some(egui::Color32::GREEN),
        "blue" => Some(egui::Color32::BLUE),
        "yellow" => Some(egui::Color32::YELLOW),
        "gray" | "grey" => Some(egui::Color32::GRAY),
        "none" | "transparent" => Some(egui::Color32::TRANSPARENT),
        _ => None,
    };

    named.or_else(|| {
        if s.starts_with('#') {
            egui::Color32::from_hex(s).ok()
        } else {
            None
        }
    })
}

fn color_or_white(s: &str) -> egui::Color32 {
    parse_color(s).unwrap_or(egui::Color32::WHITE)
}

/// Warns once about any color in `settings` that will fall back to white.
fn check_colors(settings: &Settings) {
    let colors = [
        ("vertexFill", &settings.vertex_fill),
        ("vertexStroke", &settings.vertex_stroke),
        ("lineStroke", &settings.line_stroke),
    ];
    for (field, value) in colors {
        if parse_color(value).is_none() {
            warn!(field, value = value.as_str(), "unrecognized color, using white");
        }
    }
}

/// Draws mesh primitives relative to the top-left corner of a panel.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self { painter, origin }
    }

    fn to_screen(&self, p: Vec2) -> egui::Pos2 {
        self.origin + egui::vec2(p.x, p.y)
    }
}

impl Surface for PainterSurface<'_> {
    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke: &str, width: f32) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(width, color_or_white(stroke)),
        );
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, fill: &str, stroke: &str, stroke_width: f32) {
        self.painter.circle(
            self.to_screen(center),
            radius,
            color_or_white(fill),
            egui::Stroke::new(stroke_width, color_or_white(stroke)),
        );
    }
}

/// Main application state.
///
/// ### Fields
/// - `driver` - The running mesh driver for the current session.
/// - `draft` - Settings edited in the side panel; applied on restart.
/// - `observed` - Last panel size forwarded to the driver.
/// - `last_outcome` - Result of the most recent frame callback.
pub struct Viewer {
    driver: MeshDriver,
    draft: Settings,
    observed: Option<egui::Vec2>,
    last_outcome: Option<FrameOutcome>,
}

impl Viewer {
    /// Creates a viewer and attaches a driver for `settings`.
    pub fn new(settings: Settings) -> Self {
        let driver = Self::start_driver(settings.clone());

        Self {
            driver,
            draft: settings,
            observed: None,
            last_outcome: None,
        }
    }

    fn start_driver(settings: Settings) -> MeshDriver {
        check_colors(&settings);
        let mut driver = Driver::new(
            settings,
            PanelBounds::default(),
            RepaintScheduler::default(),
            rand::rng(),
        );
        driver.attach();
        driver
    }

    /// Tears down the current driver and attaches a new one with the
    /// draft settings.
    ///
    /// A detached driver cannot be revived, so a restart is always a
    /// fresh instance.
    fn restart(&mut self) {
        self.driver.detach();
        self.driver = Self::start_driver(self.draft.clone());
        self.observed = None;
        self.last_outcome = None;
    }

    /// Delivers one pass worth of events to the driver.
    ///
    /// 1. If the panel size changed and the driver is subscribed, forward it.
    /// 2. If a frame request is outstanding, fire it at `now_ms`.
    ///
    /// ### Returns
    /// The frame outcome, or `None` if no frame was pending.
    fn pump(&mut self, size: egui::Vec2, now_ms: f64) -> Option<FrameOutcome> {
        if self.driver.bounds_source().is_subscribed() && self.observed != Some(size) {
            self.observed = Some(size);
            self.driver.on_bounds_changed(size.x, size.y);
        }

        self.driver.scheduler().pending()?;
        let outcome = self.driver.on_frame(now_ms);
        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    /// Helper to draw a labeled [`egui::DragValue`].
    fn labeled_drag<N: egui::emath::Numeric>(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut N,
        range: std::ops::RangeInclusive<N>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    fn labeled_text(ui: &mut egui::Ui, label: &str, value: &mut String) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::TextEdit::singleline(value).desired_width(80.0));
        });
    }

    /// Builds the top panel (restart / stop controls).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⟳ Restart").clicked() {
                    self.restart();
                }

                let attached = self.driver.is_attached();
                if ui.add_enabled(attached, egui::Button::new("⏹ Stop")).clicked() {
                    self.driver.detach();
                }
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("fps cap = {:.1}", self.driver.settings().fps));
                if let Some(t) = self.driver.last_tick() {
                    ui.label(format!("last tick = {:.0} ms", t));
                }
                ui.separator();
                if let Some(b) = self.driver.bounds() {
                    ui.label(format!("bounds = {:.0} × {:.0}", b.width, b.height));
                }
                ui.label(format!(
                    "vertices = {}",
                    self.driver.mesh().map_or(0, |m| m.len())
                ));
                ui.separator();
                ui.label(phase_label(self.driver.phase()));
            });
        });
    }

    /// Builds the right-hand settings panel. Changes apply on restart.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Settings");
                ui.label("Applied on restart");

                ui.separator();
                ui.label("Simulation");
                Self::labeled_drag(ui, "fps:", &mut self.draft.fps, 1.0..=120.0, 0.5);
                Self::labeled_drag(ui, "vertexCount:", &mut self.draft.vertex_count, 0..=500, 1.0);
                Self::labeled_drag(ui, "velocity:", &mut self.draft.velocity, 0.0..=10.0, 0.01);
                Self::labeled_drag(ui, "maxVelocity:", &mut self.draft.max_velocity, 0.0..=20.0, 0.05);
                Self::labeled_drag(ui, "entropy:", &mut self.draft.entropy, 0.0..=1.0, 0.01);
                Self::labeled_drag(ui, "dVelocity:", &mut self.draft.d_velocity, 0.0..=5.0, 0.01);
                Self::labeled_drag(ui, "gravity:", &mut self.draft.gravity, -1.0..=1.0, 0.005);
                Self::labeled_drag(ui, "radius:", &mut self.draft.radius, 0.0..=50.0, 0.2);

                ui.separator();
                ui.label("Style");
                Self::labeled_text(ui, "vertexFill:", &mut self.draft.vertex_fill);
                Self::labeled_text(ui, "vertexStroke:", &mut self.draft.vertex_stroke);
                Self::labeled_drag(
                    ui,
                    "vertexStrokeWidth:",
                    &mut self.draft.vertex_stroke_width,
                    0.0..=20.0,
                    0.1,
                );
                Self::labeled_text(ui, "lineStroke:", &mut self.draft.line_stroke);
                Self::labeled_drag(
                    ui,
                    "lineStrokeWidth:",
                    &mut self.draft.line_stroke_width,
                    0.0..=20.0,
                    0.1,
                );

                ui.separator();
                if ui.button("Reset to defaults").clicked() {
                    self.draft = Settings::default();
                }
            });
    }

    /// Builds the central panel that hosts the mesh.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_rgb(24, 28, 40)))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                let now_ms = ctx.input(|i| i.time) * 1000.0;
                self.pump(rect.size(), now_ms);

                let mut surface = PainterSurface::new(&painter, rect.min);
                self.driver.draw(&mut surface);

                // Keep the frame loop alive while a request is outstanding.
                if self.driver.scheduler().pending().is_some() {
                    ctx.request_repaint();
                }
            });
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Unattached => "unattached",
        Phase::AwaitingBounds => "awaiting bounds",
        Phase::Running => "running",
        Phase::Detached => "stopped",
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.driver.detach();
    }
}
