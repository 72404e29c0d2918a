//! OSC note sink: sends scheduled notes to a synthesis server over UDP.

use std::io;
use std::net::{SocketAddr, UdpSocket};

use rosc::{OscMessage, OscPacket, OscType};

use chordloop_types::NoteEvent;

use crate::sink::NoteSink;

/// Sends `/chordloop/note` and `/chordloop/cancel` messages to a fixed
/// server address. The receiving synth owns voicing and envelopes; this
/// side only describes what to play and for how long.
pub struct OscSink {
    socket: UdpSocket,
    server_addr: SocketAddr,
}

impl OscSink {
    pub fn connect(server_addr: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        Ok(Self {
            socket,
            server_addr,
        })
    }

    fn send_message(&self, addr: &str, args: Vec<OscType>) -> io::Result<()> {
        let msg = OscPacket::Message(OscMessage {
            addr: addr.to_string(),
            args,
        });
        let buf = rosc::encoder::encode(&msg)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        self.socket.send_to(&buf, self.server_addr)?;
        Ok(())
    }
}

impl NoteSink for OscSink {
    /// /chordloop/note voice length_token length_secs offset_secs pitch...
    fn play(&mut self, event: &NoteEvent, length_secs: f64) -> io::Result<()> {
        let mut args: Vec<OscType> = vec![
            OscType::String(event.voice.name().to_string()),
            OscType::String(event.length.name().to_string()),
            OscType::Float(length_secs as f32),
            OscType::Float(event.at_secs as f32),
        ];
        for pitch in &event.pitches {
            args.push(OscType::String(pitch.to_string()));
        }
        self.send_message("/chordloop/note", args)
    }

    fn cancel_pending(&mut self) -> io::Result<()> {
        self.send_message("/chordloop/cancel", Vec::new())
    }
}
