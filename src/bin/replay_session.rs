//! Replay a scripted visitor session against the audio engine
//!
//! Performs the full kiosk startup, then feeds the session state machine from
//! a timed script at the configured frame rate.

use std::path::PathBuf;
use std::process;

use artwork_sonify::logging::init_logging;
use artwork_sonify::{
    prepare_installation, run_session, FrameClock, KioskConfig, LogSink, OscTransport,
    ScriptedInput, SignalSink,
};
use clap::Parser;
use log::error;

#[derive(Parser)]
#[command(name = "replay-session")]
#[command(about = "Drive the kiosk session from a timed input script")]
struct Args {
    /// Script with one `<ms> move|press x y`, `<ms> escape` or `<ms> quit` per line
    script: PathBuf,

    /// Configuration file (JSON); installation defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `artwork_sonify=debug`
    #[arg(long, default_value = "info")]
    log: String,

    /// Also write rotated log files into this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log signals instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// Run as fast as possible instead of in real time
    #[arg(long)]
    fast: bool,
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
    let config = KioskConfig::load_or_default(args.config.as_deref())?;
    let mut script = ScriptedInput::from_file(&args.script)?;

    let mut sink: Box<dyn SignalSink> = if args.dry_run {
        Box::new(LogSink)
    } else {
        Box::new(OscTransport::connect(&config.osc)?)
    };

    let installation = prepare_installation(&config, sink.as_mut())?;
    let mut session = installation.into_session(&config);

    let fps = config.display.frame_rate;
    let mut clock = if args.fast {
        FrameClock::simulated(fps)
    } else {
        FrameClock::real_time(fps)
    };

    let summary = run_session(&mut session, &mut script, sink.as_mut(), &mut clock);
    println!(
        "{} frames, {} signals{}",
        summary.frames,
        summary.signals,
        if summary.quit_requested { ", quit" } else { "" }
    );
    Ok(())
}
