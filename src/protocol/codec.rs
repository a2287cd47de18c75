//! Line-delimited JSON framing.

use std::fmt;
use std::io::{BufRead, Write};

use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::{BotError, BotResult, Phase, ProtocolError};
use crate::policy::Action;
use crate::world::{Delta, TurnUpdate};

use super::message::{Envelope, ObjectBatch, TankIds};

/// Out-of-band sentinels the server sends instead of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// All init snapshots have been sent.
    EndInit,
    /// The session is over.
    End,
}

impl Signal {
    /// The sentinel text on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Signal::EndInit => "END_INIT",
            Signal::End => "END",
        }
    }

    /// Recognize a sentinel line, bare or as a JSON string.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let bare = line
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(line);
        match bare {
            "END_INIT" => Some(Signal::EndInit),
            "END" => Some(Signal::End),
            _ => None,
        }
    }
}

/// One non-blank inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A sentinel.
    Signal(Signal),
    /// A JSON payload, not yet decoded.
    Payload(String),
}

/// Reads inbound frames, optionally copying each line to a transcript.
pub struct MessageReader<R> {
    input: R,
    recorder: Option<Box<dyn Write>>,
    buf: String,
    lines_read: u64,
}

impl<R> fmt::Debug for MessageReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageReader")
            .field("recording", &self.recorder.is_some())
            .field("lines_read", &self.lines_read)
            .finish_non_exhaustive()
    }
}

impl<R: BufRead> MessageReader<R> {
    /// Wrap a buffered input.
    #[must_use]
    pub fn new(input: R) -> Self {
        Self {
            input,
            recorder: None,
            buf: String::new(),
            lines_read: 0,
        }
    }

    /// Copy every non-blank inbound line to `recorder`.
    #[must_use]
    pub fn with_recorder(mut self, recorder: Box<dyn Write>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Number of non-blank lines read so far.
    #[must_use]
    pub const fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Read the next non-blank line.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnexpectedEof`] if input ends, or an I/O error.
    pub fn next_frame(&mut self, phase: Phase) -> BotResult<Frame> {
        loop {
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                return Err(ProtocolError::UnexpectedEof { phase }.into());
            }
            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            self.lines_read += 1;
            trace!(%phase, len = line.len(), "frame");
            if let Some(recorder) = self.recorder.as_mut() {
                writeln!(recorder, "{line}")?;
                recorder.flush()?;
            }
            return Ok(match Signal::parse(line) {
                Some(signal) => Frame::Signal(signal),
                None => Frame::Payload(line.to_string()),
            });
        }
    }

    /// Read the handshake carrying the tank identifiers.
    ///
    /// # Errors
    ///
    /// Fails on a sentinel, malformed JSON, end of input or I/O errors.
    pub fn read_handshake(&mut self) -> BotResult<TankIds> {
        let payload = self.expect_payload(Phase::Handshake)?;
        decode(&payload, Phase::Handshake)
    }

    /// Read one init snapshot, or `None` at the end-of-init sentinel.
    ///
    /// # Errors
    ///
    /// Fails on the session-end sentinel, a malformed or invalid message,
    /// end of input or I/O errors.
    pub fn read_init(&mut self) -> BotResult<Option<Delta>> {
        match self.next_frame(Phase::Init)? {
            Frame::Signal(Signal::EndInit) => Ok(None),
            Frame::Signal(signal) => Err(unexpected(signal, Phase::Init)),
            Frame::Payload(payload) => {
                let batch: ObjectBatch = decode(&payload, Phase::Init)?;
                Ok(Some(batch.into_delta()?))
            }
        }
    }

    /// Read one turn message.
    ///
    /// # Errors
    ///
    /// Fails on the end-of-init sentinel, a malformed or invalid message,
    /// end of input or I/O errors.
    pub fn read_turn(&mut self) -> BotResult<TurnUpdate> {
        match self.next_frame(Phase::Turn)? {
            Frame::Signal(Signal::End) => Ok(TurnUpdate::End),
            Frame::Signal(signal) => Err(unexpected(signal, Phase::Turn)),
            Frame::Payload(payload) => {
                let batch: ObjectBatch = decode(&payload, Phase::Turn)?;
                Ok(TurnUpdate::Delta(batch.into_delta()?))
            }
        }
    }

    fn expect_payload(&mut self, phase: Phase) -> BotResult<String> {
        match self.next_frame(phase)? {
            Frame::Payload(payload) => Ok(payload),
            Frame::Signal(signal) => Err(unexpected(signal, phase)),
        }
    }
}

fn decode<T: DeserializeOwned>(payload: &str, phase: Phase) -> BotResult<T> {
    serde_json::from_str::<Envelope<T>>(payload)
        .map(|envelope| envelope.message)
        .map_err(|source| ProtocolError::Malformed { phase, source }.into())
}

fn unexpected(signal: Signal, phase: Phase) -> BotError {
    ProtocolError::UnexpectedSignal {
        signal: signal.as_str(),
        phase,
    }
    .into()
}

/// Writes one action per line, flushing after each.
#[derive(Debug)]
pub struct MessageWriter<W> {
    output: W,
    actions_written: u64,
}

impl<W: Write> MessageWriter<W> {
    /// Wrap an output sink.
    #[must_use]
    pub const fn new(output: W) -> Self {
        Self {
            output,
            actions_written: 0,
        }
    }

    /// Number of actions written so far.
    #[must_use]
    pub const fn actions_written(&self) -> u64 {
        self.actions_written
    }

    /// Serialize and flush one action.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn write_action(&mut self, action: &Action) -> BotResult<()> {
        serde_json::to_writer(&mut self.output, action).map_err(BotError::Encode)?;
        self.output.write_all(b"\n")?;
        self.output.flush()?;
        self.actions_written += 1;
        Ok(())
    }

    /// Unwrap the output sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.output
    }
}
