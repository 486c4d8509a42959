use patina_core::sequencer::Phase;

use crate::app::PatinaApp;

pub fn show(ctx: &egui::Context, app: &PatinaApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        let Some(viewer) = app.viewer.as_ref() else {
            ui.label("No assets loaded");
            ui.add_space(2.0);
            return;
        };
        let controller = &viewer.controller;

        // Dwell and transition countdown.
        let now = viewer.started.elapsed();
        let remaining = controller
            .scheduler()
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(now));
        let (total, text) = match controller.phase() {
            Phase::Holding { .. } => (Some(viewer.config.timing.hold_delay()), "Holding"),
            Phase::Transitioning { .. } => {
                (Some(viewer.config.timing.transition_duration()), "Transitioning")
            }
            Phase::Active => (None, ""),
        };
        let fraction = match (total, remaining) {
            (Some(total), Some(remaining)) if !total.is_zero() => {
                1.0 - remaining.as_secs_f32() / total.as_secs_f32()
            }
            _ => 0.0,
        };
        ui.add(egui::ProgressBar::new(fraction.clamp(0.0, 1.0)).text(text));

        ui.horizontal(|ui| {
            ui.label(format!("Zoom {:.2}x", controller.zoom()));
            ui.separator();
            ui.label(format!(
                "Stage {}/{}",
                controller.stage(),
                viewer.layers.decay_count()
            ));
            ui.separator();
            ui.label(controller.gesture_mode().to_string());
            ui.separator();
            ui.monospace(controller.frame().layers.to_string());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(viewer.assets.display().to_string());
            });
        });
        ui.add_space(2.0);
    });
}
