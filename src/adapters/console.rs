//! Serial console input.
//!
//! A dedicated reader thread blocks on stdin, assembles the bytes into
//! lines and hands them to the control loop through a bounded
//! `embassy-sync` channel. The control loop drains the channel at the start
//! of every pass, so a command waits at most one pass before it is applied.
//! Stdin is left in its default blocking mode. The 10 ms back-off only
//! applies once a read returns end-of-input, `WouldBlock` or an error, so a
//! closed stdin does not spin the thread.
//!
//! ```text
//! ┌──────────────┐  ConsoleLine  ┌──────────────┐
//! │ console task │──────────────▶│ control loop │
//! │ (std thread) │   depth 4     │   (sync)     │
//! └──────────────┘               └──────────────┘
//! ```

use std::io::{ErrorKind, Read};
use std::thread::JoinHandle;
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::{String, Vec};
use log::{info, warn};

use crate::error::{Error, Result};

/// Longest accepted command line, in bytes.
pub const LINE_CAPACITY: usize = 64;

/// One complete console line, newline stripped.
pub type ConsoleLine = String<LINE_CAPACITY>;

const LINE_DEPTH: usize = 4;

/// Inbound line channel: console thread → control loop.
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, ConsoleLine, LINE_DEPTH> = Channel::new();

const IDLE_BACKOFF: Duration = Duration::from_millis(10);

// ───────────────────────────────────────────────────────────────
// LineAssembler
// ───────────────────────────────────────────────────────────────

/// Accumulates bytes into `\n`-terminated lines in a fixed buffer.
///
/// A `\r` directly before the `\n` is dropped and does not count toward
/// the `N`-byte limit. A line longer than `N` bytes is discarded up to its
/// newline, as is a line that is not valid UTF-8.
#[derive(Debug, Default)]
pub struct LineAssembler<const N: usize> {
    buf: Vec<u8, N>,
    overflowed: bool,
    /// A `\r` seen but not yet stored; dropped if `\n` follows.
    pending_cr: bool,
}

impl<const N: usize> LineAssembler<N> {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
            pending_cr: false,
        }
    }

    /// Feed one byte; returns a line when `byte` completes one.
    pub fn push(&mut self, byte: u8) -> Option<String<N>> {
        if byte == b'\n' {
            self.pending_cr = false;
            let line = core::mem::take(&mut self.buf);
            if core::mem::take(&mut self.overflowed) {
                return None;
            }
            return String::from_utf8(line).ok();
        }

        if core::mem::take(&mut self.pending_cr) {
            self.store(b'\r');
        }
        if byte == b'\r' {
            self.pending_cr = true;
        } else {
            self.store(byte);
        }
        None
    }

    fn store(&mut self, byte: u8) {
        if !self.overflowed && self.buf.push(byte).is_err() {
            self.overflowed = true;
            self.buf.clear();
        }
    }

    /// Bytes buffered for the line in progress.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

// ───────────────────────────────────────────────────────────────
// Channel helpers
// ───────────────────────────────────────────────────────────────

/// Queue a line for the control loop; drops it if the queue is full.
pub fn submit_line(line: ConsoleLine) {
    if LINE_CHANNEL.try_send(line).is_err() {
        warn!("console: line queue full, dropping input");
    }
}

/// Hand every queued line to `f`, oldest first.
pub fn drain_lines(mut f: impl FnMut(&str)) {
    while let Ok(line) = LINE_CHANNEL.try_receive() {
        f(line.as_str());
    }
}

/// Pump bytes from `reader` until it reports no more data.
///
/// Returns the number of lines submitted. `WouldBlock` and end-of-input
/// both end the call; the caller decides how long to back off.
pub fn pump<R: Read>(reader: &mut R, assembler: &mut LineAssembler<LINE_CAPACITY>) -> std::io::Result<usize> {
    let mut chunk = [0u8; 32];
    let mut lines = 0;
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return Ok(lines),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(lines),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        for &byte in &chunk[..n] {
            if let Some(line) = assembler.push(byte) {
                submit_line(line);
                lines += 1;
            }
        }
    }
}

/// Spawn the console reader thread.
///
/// The thread parks in a blocking stdin read between lines and sleeps
/// for the back-off only when [`pump`] returns.
pub fn spawn_console_reader() -> Result<JoinHandle<()>> {
    let handle = std::thread::Builder::new()
        .name("console".into())
        .stack_size(4096)
        .spawn(|| {
            let mut stdin = std::io::stdin();
            let mut assembler = LineAssembler::<LINE_CAPACITY>::new();
            loop {
                if let Err(e) = pump(&mut stdin, &mut assembler) {
                    warn!("console: read failed: {}", e);
                }
                std::thread::sleep(IDLE_BACKOFF);
            }
        })
        .map_err(|_| Error::Init("console reader thread spawn failed"))?;

    info!("console: reader started");
    Ok(handle)
}
