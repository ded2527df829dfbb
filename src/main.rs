use canvas_markers::app::MarkerApp;
use canvas_markers::config::{Command, Config, USAGE};
use eframe::egui;

// ── Main ────────────────────────────────────────────────────────────────────

fn main() {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let logs = canvas_markers::logview::init(config.log_lines);

    let title = format!("canvas-markers - {}", config.markers_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_title(&title),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(MarkerApp::new(config, logs)))),
    ) {
        log::error!("failed to run eframe: {err}");
        std::process::exit(1);
    }
}
