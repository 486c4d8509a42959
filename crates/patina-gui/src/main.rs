mod app;
mod assets;
mod input;
mod panels;

use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let assets = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Patina"),
        ..Default::default()
    };

    eframe::run_native(
        "Patina",
        options,
        Box::new(move |cc| Ok(Box::new(app::PatinaApp::new(&cc.egui_ctx, assets)))),
    )
}
