//! # Artwork Sonify
//!
//! Backend of a museum kiosk that turns the colours of an artwork into sound.
//!
//! The crate covers the two halves of the installation:
//! - A one-time analysis pass that builds hue and value histograms of the
//!   artwork, picks quantile centers and writes the `Hue.txt`/`Value.txt`
//!   lookup tables read by the audio engine
//! - A headless, frame-driven session state machine that samples the colour
//!   under the visitor's pointer and streams control signals over OSC
//!
//! ## Example
//!
//! ```rust,no_run
//! use artwork_sonify::{prepare_installation, KioskConfig, OscTransport};
//!
//! let config = KioskConfig::default_installation();
//! let mut osc = OscTransport::connect(&config.osc)?;
//! let installation = prepare_installation(&config, &mut osc)?;
//! println!("hue centers: {:?}", installation.tables.hue_centers);
//! # Ok::<(), artwork_sonify::KioskError>(())
//! ```

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod layout;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod tables;
pub mod transport;

pub use config::KioskConfig;
pub use error::{KioskError, Result};
pub use image_loader::{Artwork, Assets};
pub use layout::Layout;
pub use runtime::{run_session, FrameClock, InputSource, RunSummary, ScriptedInput};
pub use session::{FrameInput, FrameOutcome, InputEvent, Session, Signal};
pub use tables::{GeneratedTables, TableBuilder, WrittenTables};
pub use transport::{LogSink, OscTransport, RecordingSink, SignalSink};

/// Loaded assets plus the tables generated from them
#[derive(Debug, Clone)]
pub struct Installation {
    pub assets: Assets,
    pub tables: GeneratedTables,
    pub written: WrittenTables,
}

impl Installation {
    /// Session over the prepared artwork
    pub fn into_session(self, config: &KioskConfig) -> Session {
        Session::new(self.assets.layout, self.assets.artwork, &config.sampling)
    }
}

/// Run the startup sequence of the kiosk
///
/// Loads both images, lays them out, generates and writes the lookup tables,
/// then announces them with one [`Signal::TablesReady`].
///
/// # Errors
///
/// Every failure here is fatal: a missing or undecodable image, a malformed
/// table, or an unwritable output directory.
pub fn prepare_installation<S>(config: &KioskConfig, sink: &mut S) -> Result<Installation>
where
    S: SignalSink + ?Sized,
{
    let assets = Assets::load(config)?;

    let builder = TableBuilder::new(config.hue_table.clone(), config.value_table.clone());
    let tables = builder.generate(&assets.artwork.sample)?;
    let written = tables.write(&config.output)?;

    sink.send_best_effort(&Signal::TablesReady);

    Ok(Installation {
        assets,
        tables,
        written,
    })
}
