//! Host fakes for the hardware seams.
#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use digit_matrix::{ByteSource, Result, StatusSink, WireChannel, status};
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;

/// What happened on the line, in order, across a channel and a delay sharing one log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireEvent {
    Byte(u8),
    Flush,
    Wait { ns: u64 },
}

pub type WireLog = Rc<RefCell<Vec<WireEvent>>>;

/// Records every configuration call, byte sent and flush.
#[derive(Default)]
pub struct FakeChannel {
    pub configured: Vec<u32>,
    pub bytes: Vec<u8>,
    /// Bytes sent so far at each flush.
    pub flushed_at: Vec<usize>,
    pub log: Option<WireLog>,
}

impl FakeChannel {
    pub fn logging_to(log: &WireLog) -> Self {
        Self {
            log: Some(Rc::clone(log)),
            ..Self::default()
        }
    }

    fn record(&self, event: WireEvent) {
        if let Some(log) = &self.log {
            log.borrow_mut().push(event);
        }
    }
}

impl WireChannel for FakeChannel {
    fn configure(&mut self, bit_rate_hz: u32) {
        self.configured.push(bit_rate_hz);
    }

    async fn send_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
        self.record(WireEvent::Byte(byte));
    }

    async fn flush(&mut self) {
        self.flushed_at.push(self.bytes.len());
        self.record(WireEvent::Flush);
    }
}

/// Records each requested wait in nanoseconds, returns immediately.
#[derive(Default)]
pub struct FakeDelay {
    pub waits_ns: Vec<u64>,
    pub log: Option<WireLog>,
}

impl FakeDelay {
    pub fn logging_to(log: &WireLog) -> Self {
        Self {
            log: Some(Rc::clone(log)),
            ..Self::default()
        }
    }

    fn wait(&mut self, ns: u64) {
        self.waits_ns.push(ns);
        if let Some(log) = &self.log {
            log.borrow_mut().push(WireEvent::Wait { ns });
        }
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.wait(u64::from(ns));
    }

    async fn delay_us(&mut self, us: u32) {
        self.wait(u64::from(us) * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.wait(u64::from(ms) * 1_000_000);
    }
}

/// Output pin remembering every level it was driven to.
#[derive(Default)]
pub struct FakePin {
    pub levels: Vec<bool>,
}

impl FakePin {
    pub fn is_high(&self) -> bool {
        self.levels.last().copied().unwrap_or(false)
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        self.levels.push(true);
        Ok(())
    }
}

/// One piece of text drawn on the status screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawnText {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Collects completed frames.
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<Vec<DrawnText>>,
    current: Vec<DrawnText>,
    pub fail_draws: bool,
}

impl RecordingSink {
    pub fn last_frame(&self) -> &[DrawnText] {
        self.frames.last().map_or(&[], Vec::as_slice)
    }

    /// Value column text on row `y` of the last frame.
    pub fn value_at(&self, y: i32) -> Option<&str> {
        self.last_frame()
            .iter()
            .find(|drawn| drawn.x == status::VALUE_X && drawn.y == y)
            .map(|drawn| drawn.text.as_str())
    }
}

impl StatusSink for RecordingSink {
    fn begin_frame(&mut self) -> Result<()> {
        self.current.clear();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<()> {
        if self.fail_draws {
            return Err(digit_matrix::Error::Display);
        }
        self.current.push(DrawnText {
            text: text.to_owned(),
            x,
            y,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.current));
        Ok(())
    }
}

/// Serial input fed from a script.
#[derive(Default)]
pub struct ScriptedSource {
    pub connected: bool,
    pub pending: VecDeque<char>,
    pub polls: usize,
}

impl ScriptedSource {
    pub fn connected_with(input: &str) -> Self {
        Self {
            connected: true,
            pending: input.chars().collect(),
            polls: 0,
        }
    }
}

impl ByteSource for ScriptedSource {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn try_read_char(&mut self) -> Option<char> {
        self.polls += 1;
        self.pending.pop_front()
    }
}
