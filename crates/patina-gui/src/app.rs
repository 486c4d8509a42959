use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use patina_core::config::ViewerConfig;
use patina_core::layers::LayerSet;
use patina_core::scheduler::TimerQueue;
use patina_core::sequencer::Phase;
use patina_core::Controller;
use tracing::{error, info};

use crate::assets::{self, Surface};
use crate::input::InputTracker;
use crate::panels;

/// A loaded assets folder driving one controller.
pub struct Viewer {
    pub controller: Controller<TimerQueue>,
    pub layers: LayerSet<Surface>,
    pub config: ViewerConfig,
    /// Pixel size of the rest layer; the container keeps its aspect.
    pub image_size: egui::Vec2,
    pub assets: PathBuf,
    /// Zero point of the controller's clock.
    pub started: Instant,
}

impl Viewer {
    fn open(ctx: &egui::Context, dir: PathBuf) -> Result<Self> {
        let config = assets::load_config(&dir)?;
        let layers = assets::load_layers(ctx, &dir, &config.layers)?;
        let controller = Controller::new(&config, layers.decay_count(), TimerQueue::new())?;
        let size = layers
            .rest
            .texture()
            .map(|texture| texture.size())
            .context("The rest layer must be an image")?;
        info!(assets = %dir.display(), decay = layers.decay_count(), "Assets loaded");

        Ok(Self {
            controller,
            layers,
            config,
            image_size: egui::vec2(size[0] as f32, size[1] as f32),
            assets: dir,
            started: Instant::now(),
        })
    }

    /// Fire every timer due by wall-clock time.
    pub fn tick(&mut self) {
        self.controller.advance_to(self.started.elapsed());
    }
}

pub struct PatinaApp {
    pub viewer: Option<Viewer>,
    pub load_error: Option<String>,
    pub tracker: InputTracker,
    pub pick_tx: mpsc::Sender<PathBuf>,
    pick_rx: mpsc::Receiver<PathBuf>,
}

impl PatinaApp {
    pub fn new(ctx: &egui::Context, assets: Option<PathBuf>) -> Self {
        let (pick_tx, pick_rx) = mpsc::channel();
        let mut app = Self {
            viewer: None,
            load_error: None,
            tracker: InputTracker::default(),
            pick_tx,
            pick_rx,
        };
        if let Some(dir) = assets {
            app.open(ctx, dir);
        }
        app
    }

    /// Replace the current viewer. A folder that fails to load leaves no
    /// viewer behind.
    pub fn open(&mut self, ctx: &egui::Context, dir: PathBuf) {
        self.tracker = InputTracker::default();
        match Viewer::open(ctx, dir) {
            Ok(viewer) => {
                self.viewer = Some(viewer);
                self.load_error = None;
            }
            Err(err) => {
                error!("{err:#}");
                self.viewer = None;
                self.load_error = Some(format!("{err:#}"));
            }
        }
    }

    fn poll_picked(&mut self, ctx: &egui::Context) {
        while let Ok(dir) = self.pick_rx.try_recv() {
            self.open(ctx, dir);
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        let Some(viewer) = self.viewer.as_ref() else {
            return;
        };
        if matches!(viewer.controller.phase(), Phase::Transitioning { .. }) {
            // The glitch overlay animates every frame.
            ctx.request_repaint();
        } else if let Some(deadline) = viewer.controller.scheduler().next_deadline() {
            ctx.request_repaint_after(deadline.saturating_sub(viewer.started.elapsed()));
        }
    }
}

impl eframe::App for PatinaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_picked(ctx);
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.tick();
        }

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        self.schedule_repaint(ctx);
    }
}
