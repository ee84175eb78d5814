//! Outbound control signals and last-sent bookkeeping

use std::time::Duration;

use crate::session::state::SoundMode;

/// One message for the audio engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Lookup tables were written (sent once at startup)
    TablesReady,
    SoundMode(SoundMode),
    Delay(bool),
    /// Inspection is active with the pointer over the artwork
    Tempo(bool),
    Rgb([u8; 3]),
    /// `(hue degrees, saturation %, value %)`
    Hsv([u16; 3]),
}

impl Signal {
    pub const ZERO_RGB: Signal = Signal::Rgb([0, 0, 0]);
    pub const ZERO_HSV: Signal = Signal::Hsv([0, 0, 0]);
}

/// Last value sent on each channel
///
/// A channel is only re-sent when its value changes. The zero colour is the
/// exception: it is always sent when requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalLedger {
    sound_mode: Option<SoundMode>,
    delay: Option<bool>,
    tempo: Option<bool>,
    rgb: Option<[u8; 3]>,
    hsv: Option<[u16; 3]>,
    last_color_send: Option<Duration>,
}

impl SignalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `signal` if it differs from the last value on its channel
    ///
    /// Returns whether it was queued.
    pub fn offer(&mut self, signal: Signal, out: &mut Vec<Signal>) -> bool {
        let changed = match signal {
            Signal::TablesReady => true,
            Signal::SoundMode(mode) => replace_if_changed(&mut self.sound_mode, mode),
            Signal::Delay(on) => replace_if_changed(&mut self.delay, on),
            Signal::Tempo(on) => replace_if_changed(&mut self.tempo, on),
            Signal::Rgb(rgb) => replace_if_changed(&mut self.rgb, rgb),
            Signal::Hsv(hsv) => replace_if_changed(&mut self.hsv, hsv),
        };
        if changed {
            out.push(signal);
        }
        changed
    }

    /// Queue the zero colour pair unconditionally
    pub fn zero_color(&mut self, out: &mut Vec<Signal>) {
        out.push(Signal::ZERO_RGB);
        out.push(Signal::ZERO_HSV);
        self.rgb = Some([0, 0, 0]);
        self.hsv = Some([0, 0, 0]);
    }

    pub fn last_rgb(&self) -> Option<[u8; 3]> {
        self.rgb
    }

    pub fn last_hsv(&self) -> Option<[u16; 3]> {
        self.hsv
    }

    pub fn last_color_send(&self) -> Option<Duration> {
        self.last_color_send
    }

    pub fn mark_color_send(&mut self, now: Duration) {
        self.last_color_send = Some(now);
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}
