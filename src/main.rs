mod app;
mod scene;
mod util;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DeviceClassArg {
    Auto,
    Desktop,
    Compact,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long)]
    data: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = DeviceClassArg::Auto)]
    device_class: DeviceClassArg,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (records, source_label) = scene::load_with_fallback(args.data)?;
    let graph = scene::assemble_scene_graph(records);
    let device_override = match args.device_class {
        DeviceClassArg::Auto => None,
        DeviceClassArg::Desktop => Some(app::DeviceClass::Desktop),
        DeviceClassArg::Compact => Some(app::DeviceClass::Compact),
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "scene-atlas",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::SceneAtlasApp::new(
                cc,
                graph,
                source_label,
                device_override,
            )))
        }),
    )
    .map_err(|error| anyhow!("eframe terminated with error: {error}"))
}
