use patina_core::frame::RenderFrame;

use crate::app::{PatinaApp, Viewer};
use crate::input::{to_egui_rect, to_kurbo_rect};
use crate::panels::menu_bar;

const UV: egui::Rect = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

pub fn show(ctx: &egui::Context, app: &mut PatinaApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let Some(viewer) = app.viewer.as_mut() else {
            show_placeholder(ui, app);
            return;
        };

        // Claim the area so egui does not treat drags here as window moves.
        ui.allocate_rect(rect, egui::Sense::click_and_drag());

        let container = fit_rect(rect, viewer.image_size);
        viewer.controller.set_container(to_kurbo_rect(container));
        for input in app.tracker.collect(ctx, container) {
            viewer.controller.handle(&input);
        }

        let frame = viewer.controller.frame();
        let time = ui.input(|i| i.time);
        draw_layers(&ui.painter_at(rect), viewer, &frame, container, time);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(20));
}

/// Largest rect with the image's aspect ratio centered in `available`.
fn fit_rect(available: egui::Rect, image_size: egui::Vec2) -> egui::Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return available;
    }
    let scale = (available.width() / image_size.x).min(available.height() / image_size.y);
    egui::Rect::from_center_size(available.center(), image_size * scale)
}

fn draw_layers(
    painter: &egui::Painter,
    viewer: &Viewer,
    frame: &RenderFrame,
    container: egui::Rect,
    time: f64,
) {
    let target = to_egui_rect(frame.transform.apply_to_rect(to_kurbo_rect(container)));

    let effect = viewer.layers.effect.texture().map(|texture| texture.id());
    for (surface, visible) in viewer.layers.pairs(&frame.layers) {
        let Some(texture) = surface.texture().filter(|_| visible) else {
            continue;
        };
        if Some(texture.id()) == effect {
            draw_glitch(painter, texture.id(), target, time);
        } else {
            painter.image(texture.id(), target, UV, egui::Color32::WHITE);
        }
    }
}

/// Two channel-split copies of the effect surface, jittered over time.
fn draw_glitch(painter: &egui::Painter, texture: egui::TextureId, target: egui::Rect, time: f64) {
    let jitter = ((time * 53.0).sin() * 6.0) as f32;
    let alpha = (0.45 + 0.35 * (time * 31.0).sin().abs()) as f32;

    painter.image(
        texture,
        target.translate(egui::vec2(jitter, 0.0)),
        UV,
        egui::Color32::from_rgb(255, 60, 60).gamma_multiply(alpha),
    );
    painter.image(
        texture,
        target.translate(egui::vec2(-jitter, jitter * 0.5)),
        UV,
        egui::Color32::from_rgb(60, 255, 255).gamma_multiply(alpha),
    );
}

fn show_placeholder(ui: &mut egui::Ui, app: &PatinaApp) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            let message = app
                .load_error
                .as_deref()
                .unwrap_or("Open an assets folder to begin");
            let color = if app.load_error.is_some() {
                egui::Color32::from_rgb(220, 90, 90)
            } else {
                egui::Color32::from_gray(100)
            };
            ui.label(egui::RichText::new(message).size(18.0).color(color));
            if ui.button("Open assets folder...").clicked() {
                menu_bar::pick_folder(app);
            }
        });
    });
}
