//! Write the default installation configuration as JSON

use std::path::PathBuf;
use std::process;

use artwork_sonify::KioskConfig;
use clap::Parser;

#[derive(Parser)]
#[command(name = "generate-config")]
#[command(about = "Write the default kiosk configuration file")]
struct Args {
    /// Output path for the JSON configuration
    output: PathBuf,
}

fn main() {
    let args = Args::parse();

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = KioskConfig::default_installation();
    if let Err(e) = config.to_json_file(&args.output) {
        eprintln!("Error saving config: {}", e);
        process::exit(1);
    }

    eprintln!("Configuration saved to {}", args.output.display());
    eprintln!();
    eprintln!("Config summary:");
    eprintln!("  Artwork:  {}", config.assets.artwork_path.display());
    eprintln!("  Tables:   {}", config.output.directory.display());
    eprintln!("  OSC:      {}", config.osc.endpoint());
    eprintln!(
        "  Screen:   {}x{} @ {} fps",
        config.display.screen_width, config.display.screen_height, config.display.frame_rate
    );
    eprintln!(
        "  Hue k={}, value k={} ({}..={})",
        config.hue_table.clusters,
        config.value_table.levels,
        config.value_table.intensity_min,
        config.value_table.intensity_max
    );
}
