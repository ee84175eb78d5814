//! Generate the Hue.txt and Value.txt lookup tables for the installed artwork
//!
//! Runs the kiosk startup pass on its own and announces the tables to the
//! audio engine.

use std::path::PathBuf;
use std::process;

use artwork_sonify::logging::init_logging;
use artwork_sonify::{prepare_installation, KioskConfig, LogSink, OscTransport, SignalSink};
use clap::Parser;
use log::{error, info};

#[derive(Parser)]
#[command(name = "build-tables")]
#[command(about = "Build hue and value lookup tables from the kiosk artwork")]
struct Args {
    /// Configuration file (JSON); installation defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `artwork_sonify=debug`
    #[arg(long, default_value = "info")]
    log: String,

    /// Also write rotated log files into this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Override the output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the OSC announcement
    #[arg(long)]
    no_signal: bool,
}

fn main() {
    let args = Args::parse();

    let _logger = match init_logging(&args.log, args.log_dir.as_deref()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        error!("{}", e);
        error!("{}", e.user_message());
        process::exit(1);
    }
}

fn run(args: Args) -> artwork_sonify::Result<()> {
    let mut config = KioskConfig::load_or_default(args.config.as_deref())?;
    if let Some(dir) = args.output {
        config.output.directory = dir;
    }

    let mut sink: Box<dyn SignalSink> = if args.no_signal {
        Box::new(LogSink)
    } else {
        Box::new(OscTransport::connect(&config.osc)?)
    };

    let installation = prepare_installation(&config, sink.as_mut())?;
    let tables = &installation.tables;

    println!("Hue centers:   {:?}", tables.hue_centers);
    println!("Value centers: {:?}", tables.value_centers);
    info!(
        "Tables ready: {} and {}",
        installation.written.hue_path.display(),
        installation.written.value_path.display()
    );
    Ok(())
}
