//! Frame pacing and the session driver loop

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::{KioskError, Result};
use crate::session::{FrameInput, InputEvent, Session};
use crate::transport::SignalSink;

/// How the clock advances between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep until each frame boundary
    RealTime,
    /// Advance by exactly one frame per tick without sleeping
    Simulated,
}

/// Fixed-rate frame clock
#[derive(Debug, Clone)]
pub struct FrameClock {
    pacing: Pacing,
    start: Instant,
    frame: Duration,
    frames: u32,
    last: Duration,
}

impl FrameClock {
    pub fn new(fps: u32, pacing: Pacing) -> Self {
        Self {
            pacing,
            start: Instant::now(),
            frame: Duration::from_secs(1) / fps.max(1),
            frames: 0,
            last: Duration::ZERO,
        }
    }

    pub fn real_time(fps: u32) -> Self {
        Self::new(fps, Pacing::RealTime)
    }

    pub fn simulated(fps: u32) -> Self {
        Self::new(fps, Pacing::Simulated)
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Timestamp of the most recent frame
    pub fn elapsed(&self) -> Duration {
        self.last
    }

    /// Wait for the next frame boundary and return its timestamp
    pub fn tick(&mut self) -> Duration {
        let target = self.frame * self.frames;
        self.frames = self.frames.saturating_add(1);

        self.last = match self.pacing {
            Pacing::Simulated => target,
            Pacing::RealTime => {
                let elapsed = self.start.elapsed();
                if target > elapsed {
                    thread::sleep(target - elapsed);
                }
                self.start.elapsed()
            }
        };
        self.last
    }
}

/// Supplies one input snapshot per frame
pub trait InputSource {
    /// Input for the frame at `now`, or `None` once the source is exhausted
    fn next_frame(&mut self, now: Duration) -> Option<FrameInput>;
}

/// What happened during a driven session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: usize,
    pub signals: usize,
    /// Ended by a quit or escape event rather than input exhaustion
    pub quit_requested: bool,
}

/// Drive `session` until the input quits or runs out
///
/// Every signal goes to `sink`. Running out of input applies the same
/// cleanup as a quit so the engine is left silent.
pub fn run_session<I, S>(
    session: &mut Session,
    input: &mut I,
    sink: &mut S,
    clock: &mut FrameClock,
) -> RunSummary
where
    I: InputSource + ?Sized,
    S: SignalSink + ?Sized,
{
    let mut summary = RunSummary::default();

    loop {
        let now = clock.tick();
        let Some(frame) = input.next_frame(now) else {
            debug!("Input exhausted at {:?}", now);
            let outcome = session.shutdown();
            summary.signals += outcome.signals.len();
            sink.send_all(&outcome.signals);
            break;
        };

        let outcome = session.step(&frame);
        summary.frames += 1;
        summary.signals += outcome.signals.len();
        sink.send_all(&outcome.signals);

        if outcome.quit {
            summary.quit_requested = true;
            break;
        }
    }

    info!(
        "Session ended after {} frames, {} signals",
        summary.frames, summary.signals
    );
    summary
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(i32, i32),
    Press(i32, i32),
    Escape,
    Quit,
}

/// Timed pointer and key script
///
/// One command per line, `<ms> move x y`, `<ms> press x y`, `<ms> escape` or
/// `<ms> quit`. Blank lines and `#` comments are ignored. Times are
/// milliseconds since the session start and must not decrease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedInput {
    commands: Vec<(Duration, Command)>,
    next: usize,
    pointer: (i32, i32),
}

impl ScriptedInput {
    pub fn parse(text: &str) -> Result<Self> {
        let mut commands = Vec::new();
        let mut last = Duration::ZERO;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = raw.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let fail = |reason: String| KioskError::ScriptError { line, reason };
            let tokens: Vec<&str> = content.split_whitespace().collect();

            let at = tokens[0]
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| fail(format!("bad timestamp '{}'", tokens[0])))?;
            if at < last {
                return Err(fail(format!("time goes backwards ({:?} < {:?})", at, last)));
            }
            last = at;

            let coords = |args: &[&str]| -> Result<(i32, i32)> {
                match args {
                    [x, y] => {
                        let x = x.parse().map_err(|_| fail(format!("bad x '{}'", x)))?;
                        let y = y.parse().map_err(|_| fail(format!("bad y '{}'", y)))?;
                        Ok((x, y))
                    }
                    _ => Err(fail("expected two coordinates".to_string())),
                }
            };

            let command = match (tokens.get(1).copied(), &tokens[tokens.len().min(2)..]) {
                (Some("move"), args) => {
                    let (x, y) = coords(args)?;
                    Command::Move(x, y)
                }
                (Some("press"), args) => {
                    let (x, y) = coords(args)?;
                    Command::Press(x, y)
                }
                (Some("escape"), []) => Command::Escape,
                (Some("quit"), []) => Command::Quit,
                (Some(name @ ("escape" | "quit")), _) => {
                    return Err(fail(format!("'{}' takes no arguments", name)))
                }
                (Some(other), _) => return Err(fail(format!("unknown command '{}'", other))),
                (None, _) => return Err(fail("missing command".to_string())),
            };
            commands.push((at, command));
        }

        Ok(Self {
            commands,
            next: 0,
            pointer: (0, 0),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            KioskError::config(format!("cannot read script {}", path.display()), e)
        })?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn next_frame(&mut self, now: Duration) -> Option<FrameInput> {
        if self.next >= self.commands.len() {
            return None;
        }

        let mut events = Vec::new();
        while let Some(&(at, command)) = self.commands.get(self.next) {
            if at > now {
                break;
            }
            self.next += 1;
            match command {
                Command::Move(x, y) => self.pointer = (x, y),
                Command::Press(x, y) => {
                    self.pointer = (x, y);
                    events.push(InputEvent::PrimaryPress { x, y });
                }
                Command::Escape => events.push(InputEvent::Escape),
                Command::Quit => events.push(InputEvent::Quit),
            }
        }

        Some(FrameInput {
            now,
            pointer: self.pointer,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KioskConfig;
    use crate::image_loader::Artwork;
    use crate::layout::Layout;
    use crate::session::Signal;
    use crate::transport::RecordingSink;
    use image::{Rgb, RgbImage};

    fn session() -> Session {
        let layout = Layout::compute(1440, 900, 1600, 1000);
        let sample = RgbImage::from_pixel(800, 500, Rgb([255, 0, 0]));
        let artwork = Artwork {
            display: sample.clone(),
            sample,
        };
        Session::new(layout, artwork, &KioskConfig::default_installation().sampling)
    }

    #[test]
    fn test_simulated_clock_advances_one_frame_per_tick() {
        let mut clock = FrameClock::simulated(50);
        assert_eq!(clock.tick(), Duration::ZERO);
        assert_eq!(clock.tick(), Duration::from_millis(20));
        assert_eq!(clock.tick(), Duration::from_millis(40));
        assert_eq!(clock.elapsed(), Duration::from_millis(40));
    }

    #[test]
    fn test_real_time_clock_paces() {
        let mut clock = FrameClock::real_time(100);
        clock.tick();
        clock.tick();
        let t = clock.tick();
        assert!(t >= Duration::from_millis(20), "only {:?} elapsed", t);
    }

    #[test]
    fn test_parse_script() {
        let script = ScriptedInput::parse(
            "# rehearsal\n\
             0 move 10 20\n\
             \n\
             100 press 700 500   # start\n\
             250 escape\n",
        )
        .unwrap();
        assert_eq!(script.len(), 3);
    }

    #[test]
    fn test_parse_errors_report_line() {
        let cases = [
            ("abc move 1 2", 1),
            ("0 move 1\n", 1),
            ("0 move 1 2\n5 jump 1 2", 2),
            ("10 quit\n5 quit", 2),
            ("0 escape now", 1),
            ("0", 1),
        ];
        for (text, expected_line) in cases {
            match ScriptedInput::parse(text) {
                Err(KioskError::ScriptError { line, .. }) => {
                    assert_eq!(line, expected_line, "script {:?}", text)
                }
                other => panic!("Expected ScriptError for {:?}, got: {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_events_are_grouped_by_frame() {
        let mut script = ScriptedInput::parse(
            "0 move 5 5\n\
             10 press 1 2\n\
             12 move 3 4\n\
             40 quit",
        )
        .unwrap();

        let f0 = script.next_frame(Duration::ZERO).unwrap();
        assert_eq!(f0.pointer, (5, 5));
        assert!(f0.events.is_empty());

        let f1 = script.next_frame(Duration::from_millis(20)).unwrap();
        assert_eq!(f1.pointer, (3, 4));
        assert_eq!(f1.events, vec![InputEvent::PrimaryPress { x: 1, y: 2 }]);

        let f2 = script.next_frame(Duration::from_millis(40)).unwrap();
        assert_eq!(f2.events, vec![InputEvent::Quit]);

        assert!(script.next_frame(Duration::from_millis(60)).is_none());
    }

    #[test]
    fn test_run_until_quit() {
        let mut script = ScriptedInput::parse(
            "0 move 100 100\n\
             100 press 700 500\n\
             200 press 700 720\n\
             300 move 400 300\n\
             400 quit",
        )
        .unwrap();
        let mut sink = RecordingSink::new();
        let mut clock = FrameClock::simulated(60);

        let summary = run_session(&mut session(), &mut script, &mut sink, &mut clock);

        assert!(summary.quit_requested);
        assert_eq!(summary.signals, sink.signals.len());
        assert!(sink.signals.contains(&Signal::Rgb([255, 0, 0])));
        assert!(sink.signals.contains(&Signal::Hsv([0, 100, 100])));
        assert_eq!(
            &sink.signals[sink.signals.len() - 4..],
            &[
                Signal::Tempo(false),
                Signal::ZERO_RGB,
                Signal::ZERO_HSV,
                Signal::Delay(false),
            ]
        );
    }

    #[test]
    fn test_exhausted_input_applies_cleanup() {
        let mut script = ScriptedInput::parse("0 move 100 100").unwrap();
        let mut sink = RecordingSink::new();
        let mut clock = FrameClock::simulated(60);

        let summary = run_session(&mut session(), &mut script, &mut sink, &mut clock);

        assert!(!summary.quit_requested);
        assert_eq!(summary.frames, 1);
        assert_eq!(sink.signals.last(), Some(&Signal::Delay(false)));
        assert!(sink.signals.contains(&Signal::ZERO_RGB));
    }
}
