//! The serial byte source.
//!
//! `ByteSource` abstracts the serial link so the acquisition pipeline can be
//! driven from a real port in production and a scripted mock in tests. The
//! contract is strictly non-blocking: `drain` reads only the bytes the
//! transport has already buffered and never waits for more, so an
//! acquisition tick can never stall on a quiet instrument.

use crate::error::{AppResult, WattscopeError};
use log::{info, trace};
use serialport::SerialPort;
use std::io::Read;
use std::time::Duration;

/// A non-blocking source of instrument bytes.
pub trait ByteSource {
    /// Number of bytes currently available without blocking.
    fn bytes_to_read(&mut self) -> AppResult<usize>;

    /// Append all currently available bytes to `buf`, returning how many
    /// were read. Must never wait for bytes the transport has not already
    /// buffered.
    fn drain(&mut self, buf: &mut Vec<u8>) -> AppResult<usize>;
}

/// Production byte source over a real serial port.
pub struct SerialByteSource {
    port: Box<dyn SerialPort>,
}

impl SerialByteSource {
    /// Opens the serial port. Failure here is fatal to the caller: without
    /// the port no data can ever be decoded.
    pub fn open(port_name: &str, baud_rate: u32) -> AppResult<Self> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(100))
            .open()
            .map_err(|source| WattscopeError::SourceUnavailable {
                port: port_name.to_string(),
                source,
            })?;

        info!("Opened serial port '{}' at {} baud", port_name, baud_rate);
        Ok(Self { port })
    }
}

impl ByteSource for SerialByteSource {
    fn bytes_to_read(&mut self) -> AppResult<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn drain(&mut self, buf: &mut Vec<u8>) -> AppResult<usize> {
        let available = self.bytes_to_read()?;
        if available == 0 {
            return Ok(0);
        }

        let start = buf.len();
        buf.resize(start + available, 0);
        // `read` may return fewer bytes than `bytes_to_read` reported if the
        // driver races us; keep only what actually arrived.
        let n = self.port.read(&mut buf[start..])?;
        buf.truncate(start + n);

        trace!("Drained {} bytes from serial port", n);
        Ok(n)
    }
}
