use std::path::PathBuf;

use console::Style;
use patina_core::config::ViewerConfig;
use patina_core::layers::LayerSet;
use patina_core::script::Snapshot;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_config_summary(config: &ViewerConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Patina Viewer"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    println!("  {}", s.header.apply_to("Zoom"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Max"),
        s.value.apply_to(config.zoom.max_zoom)
    );
    let thresholds: Vec<String> = config.zoom.thresholds.iter().map(|t| t.to_string()).collect();
    println!(
        "    {:<14}{}",
        s.label.apply_to("Thresholds"),
        s.value.apply_to(thresholds.join(", "))
    );
    println!();

    println!("  {}", s.header.apply_to("Timing"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Hold"),
        s.value.apply_to(format!("{} ms", config.timing.hold_delay_ms))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Transition"),
        s.value.apply_to(format!("{} ms", config.timing.transition_ms))
    );
    println!();

    println!("  {}", s.header.apply_to("Input"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Wheel scale"),
        s.value.apply_to(config.input.wheel_zoom_scale)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Wheel focus"),
        s.value.apply_to(config.input.wheel_focus)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Touch scale"),
        s.value.apply_to(config.input.touch_zoom_scale)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Pinch"),
        s.value.apply_to(config.input.pinch_sensitivity)
    );
    println!();
}

pub fn print_layer_paths(layers: &LayerSet<Option<PathBuf>>) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Layers"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Container"),
        s.value.apply_to("viewport")
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Rest"),
        s.path.apply_to(display(&layers.rest))
    );
    for (i, path) in layers.decay.iter().enumerate() {
        println!(
            "    {:<14}{}",
            s.label.apply_to(format!("Decay {}", i + 1)),
            s.path.apply_to(display(path))
        );
    }
    println!(
        "    {:<14}{}",
        s.label.apply_to("Effect"),
        s.path.apply_to(display(&layers.effect))
    );
    println!();
}

fn display(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "viewport".to_string())
}

pub fn print_snapshots(snapshots: &[Snapshot]) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Replay"));
    for snapshot in snapshots {
        println!("    {}", snapshot);
    }
    println!();
}
