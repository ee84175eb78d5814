//! OSC transport to the audio engine
//!
//! All outbound traffic goes through [`SignalSink::send_best_effort`]. The
//! receiver may be absent or restarting at any time, so a failed send is
//! logged and dropped; the next state change supersedes it anyway.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use log::{debug, info};
use rosc::{encoder, OscMessage, OscPacket, OscType};

use crate::config::OscConfig;
use crate::constants::osc;
use crate::error::{KioskError, Result};
use crate::session::Signal;

/// Destination for kiosk signals
pub trait SignalSink {
    /// Deliver `signal` if possible; never fails, never retries
    fn send_best_effort(&mut self, signal: &Signal);

    fn send_all(&mut self, signals: &[Signal]) {
        for signal in signals {
            self.send_best_effort(signal);
        }
    }
}

impl Signal {
    /// OSC message carrying this signal
    pub fn to_osc(&self) -> OscMessage {
        let (addr, args) = match *self {
            Signal::TablesReady => (osc::TABLES_READY, vec![osc::TABLES_READY_ARG]),
            Signal::SoundMode(mode) => (osc::SOUND_MODE, vec![mode.number() as i32]),
            Signal::Delay(on) => (osc::DELAY, vec![on as i32]),
            Signal::Tempo(on) => (osc::TEMPO, vec![on as i32]),
            Signal::Rgb(rgb) => (osc::RGB, rgb.iter().map(|&c| c as i32).collect()),
            Signal::Hsv(hsv) => (osc::HSV, hsv.iter().map(|&c| c as i32).collect()),
        };
        OscMessage {
            addr: addr.to_string(),
            args: args.into_iter().map(OscType::Int).collect(),
        }
    }
}

/// UDP sender for the configured OSC endpoint
pub struct OscTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl OscTransport {
    /// Resolve the endpoint and bind an ephemeral local socket
    ///
    /// # Errors
    ///
    /// Returns `KioskError::TransportError` if the endpoint does not resolve
    /// or no local socket can be bound.
    pub fn connect(config: &OscConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        let target = endpoint
            .to_socket_addrs()
            .map_err(|e| KioskError::transport(format!("cannot resolve {}", endpoint), e))?
            .next()
            .ok_or_else(|| KioskError::TransportError {
                message: format!("{} resolved to no address", endpoint),
                source: None,
            })?;

        let local = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local)
            .map_err(|e| KioskError::transport("cannot bind local UDP socket", e))?;

        info!("Sending OSC to {}", target);
        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    fn send(&self, signal: &Signal) -> Result<()> {
        let packet = OscPacket::Message(signal.to_osc());
        let bytes = encoder::encode(&packet).map_err(|e| KioskError::TransportError {
            message: format!("cannot encode {:?}: {:?}", signal, e),
            source: None,
        })?;
        self.socket
            .send_to(&bytes, self.target)
            .map_err(|e| KioskError::transport(format!("send to {} failed", self.target), e))?;
        Ok(())
    }
}

impl SignalSink for OscTransport {
    fn send_best_effort(&mut self, signal: &Signal) {
        if let Err(e) = self.send(signal) {
            debug!("Dropped {:?}: {}", signal, e);
        }
    }
}

/// Keeps every signal in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub signals: Vec<Signal>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SignalSink for RecordingSink {
    fn send_best_effort(&mut self, signal: &Signal) {
        self.signals.push(*signal);
    }
}

/// Logs signals instead of sending them (dry runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl SignalSink for LogSink {
    fn send_best_effort(&mut self, signal: &Signal) {
        let msg = signal.to_osc();
        info!("{} {:?}", msg.addr, msg.args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SoundMode;
    use rosc::decoder;
    use std::time::Duration;

    #[test]
    fn test_osc_addresses_and_arguments() {
        let msg = Signal::TablesReady.to_osc();
        assert_eq!(msg.addr, "/txt");
        assert_eq!(msg.args, vec![OscType::Int(1)]);

        let msg = Signal::SoundMode(SoundMode::Two).to_osc();
        assert_eq!(msg.addr, "/MODES");
        assert_eq!(msg.args, vec![OscType::Int(2)]);

        assert_eq!(Signal::Delay(false).to_osc().args, vec![OscType::Int(0)]);
        assert_eq!(Signal::Tempo(true).to_osc().addr, "/TEMPO");

        let msg = Signal::Hsv([359, 100, 7]).to_osc();
        assert_eq!(msg.addr, "/hsv");
        assert_eq!(
            msg.args,
            vec![OscType::Int(359), OscType::Int(100), OscType::Int(7)]
        );
    }

    #[test]
    fn test_udp_delivery() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut transport = OscTransport::connect(&OscConfig {
            host: "127.0.0.1".to_string(),
            port,
        })
        .unwrap();
        transport.send_best_effort(&Signal::Rgb([10, 20, 30]));

        let mut buf = [0u8; rosc::decoder::MTU];
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        let (_, packet) = decoder::decode_udp(&buf[..len]).unwrap();
        match packet {
            OscPacket::Message(msg) => {
                assert_eq!(msg.addr, "/rgb");
                assert_eq!(
                    msg.args,
                    vec![OscType::Int(10), OscType::Int(20), OscType::Int(30)]
                );
            }
            other => panic!("Expected message, got: {:?}", other),
        }
    }

    #[test]
    fn test_send_to_absent_receiver_is_swallowed() {
        // nothing listens on the discard port; the send must not panic
        let mut transport = OscTransport::connect(&OscConfig {
            host: "127.0.0.1".to_string(),
            port: 9,
        })
        .unwrap();
        transport.send_best_effort(&Signal::Tempo(false));
        transport.send_best_effort(&Signal::Tempo(true));
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.send_all(&[Signal::Delay(true), Signal::ZERO_RGB]);
        assert_eq!(sink.signals, vec![Signal::Delay(true), Signal::ZERO_RGB]);
    }
}
