mod app;
mod cli;
mod dialog;
mod interval;
mod overlay;
mod scheduler;
mod settings;
mod surface;
mod timer;

use anyhow::Context;
use clap::Parser;

fn init_logger(level: log::LevelFilter) -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .with_module_level("eframe", log::LevelFilter::Info)
        .with_module_level("egui", log::LevelFilter::Info)
        .with_module_level("wgpu_core", log::LevelFilter::Warn)
        .with_module_level("wgpu_hal", log::LevelFilter::Warn)
        .with_module_level("naga", log::LevelFilter::Warn)
        .env()
        .init()
        .context("failed to initialize logger")
}

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_logger(cli.log_level())?;

    let settings = settings::load(cli.config.as_deref())?;
    let interval = match cli.interval {
        Some(interval) => interval,
        None => settings.initial_interval()?,
    };
    log::info!("Starting with a {interval} minute interval");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Blinkly")
            .with_inner_size([400.0, 200.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Blinkly",
        native_options,
        Box::new(move |cc| Box::new(app::BlinklyApp::new(cc, settings, interval))),
    )?;
    log::info!("GUI exited");
    Ok(())
}
