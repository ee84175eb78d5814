//! Runtime kiosk session
//!
//! A [`Session`] owns the UI state and turns one [`FrameInput`] at a time into
//! the signals the audio engine should receive. It performs no I/O: the
//! caller forwards the returned signals through a
//! [`SignalSink`](crate::transport::SignalSink).
//!
//! Screen flow is Title → Main → Title, ending on quit or escape.
//!
//! Colour sampling runs only on the main screen while inspection is on and
//! the pointer is over the artwork. A sampled colour is forwarded when it
//! differs enough from the last one sent and the minimum interval has passed;
//! the interval is waived on the first frame of an inspection stretch.

pub mod input;
pub mod signal;
pub mod state;

pub use input::{FrameInput, InputEvent};
pub use signal::{Signal, SignalLedger};
pub use state::{Controls, Screen, SoundMode};

use std::time::Duration;

use log::debug;

use crate::color::{hsv_triplet, rgb_delta, rgb_to_hex};
use crate::config::SamplingConfig;
use crate::image_loader::Artwork;
use crate::layout::Layout;

/// Signals produced by one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    pub signals: Vec<Signal>,
    /// The visitor (or operator) asked to leave; the session is over
    pub quit: bool,
}

/// What the colour panel in the corner should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorReadout {
    pub visible: bool,
    /// Swatch colour: the last sample that passed the send checks
    pub color: [u8; 3],
    pub rgb: [u8; 3],
    pub hsv: [u16; 3],
}

impl ColorReadout {
    /// Last sent colour as `#RRGGBB`
    pub fn hex(&self) -> String {
        rgb_to_hex(self.rgb)
    }
}

/// Pointer sampling thresholds resolved from [`SamplingConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SamplingRules {
    step: u32,
    delta_threshold: u32,
    min_interval: Duration,
}

/// Kiosk state machine
pub struct Session {
    layout: Layout,
    artwork: Artwork,
    rules: SamplingRules,
    controls: Controls,
    ledger: SignalLedger,
    /// Sampling was active on the previous frame
    was_active: bool,
    readout: ColorReadout,
}

impl Session {
    pub fn new(layout: Layout, artwork: Artwork, sampling: &SamplingConfig) -> Self {
        Self {
            layout,
            artwork,
            rules: SamplingRules {
                step: sampling.sample_step_px,
                delta_threshold: sampling.rgb_delta_threshold,
                min_interval: sampling.min_send_interval(),
            },
            controls: Controls::default(),
            ledger: SignalLedger::new(),
            was_active: false,
            readout: ColorReadout::default(),
        }
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn readout(&self) -> ColorReadout {
        self.readout
    }

    /// Advance one frame
    pub fn step(&mut self, frame: &FrameInput) -> FrameOutcome {
        let mut signals = Vec::new();
        let mut reset = false;

        for event in &frame.events {
            match *event {
                InputEvent::Quit | InputEvent::Escape => return self.quit(signals),
                InputEvent::PrimaryPress { x, y } => reset |= self.press((x, y)),
            }
        }

        if reset {
            self.ledger.offer(Signal::Tempo(false), &mut signals);
            self.ledger.zero_color(&mut signals);
            self.ledger
                .offer(Signal::Delay(self.controls.delay_enabled), &mut signals);
        }

        let over_artwork = self.layout.artwork_local(frame.pointer);

        self.ledger
            .offer(Signal::SoundMode(self.controls.sound_mode), &mut signals);
        self.ledger
            .offer(Signal::Delay(self.controls.delay_enabled), &mut signals);
        self.ledger.offer(
            Signal::Tempo(self.controls.inspecting && over_artwork.is_some()),
            &mut signals,
        );

        let local = over_artwork.filter(|_| {
            self.controls.screen == Screen::Main && self.controls.inspecting
        });
        match local {
            Some((x, y)) => self.sample(x, y, frame.now, &mut signals),
            None => {
                self.readout.visible = false;
                if self.was_active && !reset {
                    self.ledger.zero_color(&mut signals);
                }
            }
        }
        self.was_active = local.is_some();

        FrameOutcome {
            signals,
            quit: false,
        }
    }

    /// Apply a primary press; returns whether it triggered a reset burst
    fn press(&mut self, at: (i32, i32)) -> bool {
        let layout = &self.layout;
        match self.controls.screen {
            Screen::Title => {
                if layout.start_button.contains_inclusive(at) {
                    debug!("Title -> Main");
                    self.controls.screen = Screen::Main;
                    self.controls.inspecting = false;
                    return true;
                }
            }
            Screen::Main => {
                if layout.exit_button.contains_inclusive(at) {
                    debug!("Main -> Title");
                    self.controls.screen = Screen::Title;
                    self.controls.inspecting = false;
                    return true;
                }

                if layout.watch_button.contains_inclusive(at) {
                    self.controls.inspecting = !self.controls.inspecting;
                    debug!("Inspection {}", if self.controls.inspecting { "on" } else { "off" });
                }

                if let Some(i) = layout
                    .sound_buttons
                    .iter()
                    .position(|rect| rect.contains_inclusive(at))
                {
                    self.controls.sound_mode = SoundMode::ALL[i];
                }

                if layout.delay_button.contains_inclusive(at) {
                    self.controls.delay_enabled = !self.controls.delay_enabled;
                }
            }
        }
        false
    }

    fn sample(&mut self, x: i32, y: i32, now: Duration, signals: &mut Vec<Signal>) {
        let rgb = self.artwork.sample_at(x, y, self.rules.step);

        let changed = self
            .ledger
            .last_rgb()
            .map_or(true, |last| rgb_delta(rgb, last) >= self.rules.delta_threshold);

        let entered = !self.was_active;
        let rate_ok = entered
            || self
                .ledger
                .last_color_send()
                .map_or(true, |t| now.saturating_sub(t) >= self.rules.min_interval);

        if changed && rate_ok {
            debug!("Colour {} at ({}, {})", rgb_to_hex(rgb), x, y);
            self.readout.color = rgb;
            self.ledger.offer(Signal::Rgb(rgb), signals);
            self.ledger.offer(Signal::Hsv(hsv_triplet(rgb)), signals);
            self.ledger.mark_color_send(now);
        }

        self.readout.visible = true;
        self.readout.rgb = self.ledger.last_rgb().unwrap_or_default();
        self.readout.hsv = self.ledger.last_hsv().unwrap_or_default();
    }

    /// Silence the engine as if the window had been closed
    pub fn shutdown(&mut self) -> FrameOutcome {
        self.quit(Vec::new())
    }

    fn quit(&mut self, mut signals: Vec<Signal>) -> FrameOutcome {
        debug!("Quit requested");
        self.ledger.offer(Signal::Tempo(false), &mut signals);
        self.ledger.zero_color(&mut signals);
        self.ledger.offer(Signal::Delay(false), &mut signals);
        self.was_active = false;
        self.readout.visible = false;
        FrameOutcome {
            signals,
            quit: true,
        }
    }
}
