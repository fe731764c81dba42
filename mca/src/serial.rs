//! COM1 `log` backend for bare-metal execution.
//!
//! Minimal, no-allocation serial output. Records are formatted straight
//! into the UART, one byte at a time.

use core::fmt;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::pio::{HardwarePorts, PortIo};

/// Serial port base address (COM1).
pub const COM1: u16 = 0x3F8;

/// Line status register offset and its "transmit holding register empty" bit.
const LSR: u16 = 5;
const LSR_THRE: u8 = 0x20;

/// Polls of LSR before a byte is dropped.
const TX_RETRIES: u32 = 100;

/// Byte sink for a 16550-compatible UART.
pub struct SerialWriter<P: PortIo> {
    io: P,
    base: u16,
}

impl<P: PortIo> SerialWriter<P> {
    pub fn new(io: P, base: u16) -> Self {
        Self { io, base }
    }

    /// Write a single byte, waiting (bounded) for the transmitter.
    ///
    /// Returns `false` if the port never became ready; the byte is dropped.
    pub fn write_byte(&mut self, byte: u8) -> bool {
        let mut retries = 0u32;
        while self.io.inb(self.base + LSR) & LSR_THRE == 0 {
            retries += 1;
            if retries > TX_RETRIES {
                return false; // Port not responding
            }
            core::hint::spin_loop();
        }
        self.io.outb(self.base, byte);
        true
    }

    pub fn into_inner(self) -> P {
        self.io
    }
}

impl<P: PortIo> fmt::Write for SerialWriter<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if !self.write_byte(byte) {
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}

/// `log` implementation printing `[LEVEL] message\r\n` to COM1.
pub struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // SAFETY: the logger is only installed by `init`, whose caller
        // vouches for I/O privilege.
        let io = unsafe { HardwarePorts::new() };
        // A dead UART has nowhere to report to
        let _ = write_record(&mut SerialWriter::new(io, COM1), record);
    }

    fn flush(&self) {}
}

fn write_record<W: fmt::Write>(w: &mut W, record: &Record<'_>) -> fmt::Result {
    write!(w, "[{}] {}\r\n", record.level(), record.args())
}

/// Install [`SerialLogger`] as the global logger.
///
/// # Safety
/// Every subsequent log record performs port I/O on COM1; the caller must
/// run with I/O privilege for the rest of the program.
pub unsafe fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
