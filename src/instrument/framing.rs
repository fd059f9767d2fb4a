//! Frame synchronization for the instrument's fixed 32-byte frames.
//!
//! The instrument marks the start of every frame with `0xFF`. The
//! synchronizer accumulates drained bytes, discards any garbage ahead of the
//! first marker, and emits one aligned [`RawFrame`] at a time once 32 bytes
//! are buffered. Bytes left over after a frame is consumed are retained for
//! the next cycle rather than discarded, so a frame arriving split across
//! two drains is never lost.

use log::debug;

/// Length of one instrument frame in bytes.
pub const FRAME_LEN: usize = 32;

/// First byte of every valid frame.
pub const START_MARKER: u8 = 0xFF;

/// A complete, aligned 32-byte frame. By construction the first byte is the
/// start marker, which is what lets the decoder skip any validity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame {
    bytes: [u8; FRAME_LEN],
}

impl RawFrame {
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }
}

/// Accumulating buffer that locates and extracts aligned frames.
#[derive(Debug, Default)]
pub struct FrameSynchronizer {
    buffer: Vec<u8>,
}

impl FrameSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly drained bytes to the working buffer.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes currently buffered and not yet consumed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Extract the next complete frame, or `None` if the buffer does not yet
    /// hold one. "No frame yet" is the normal quiet-line outcome, not an
    /// error; the caller simply retries after the next drain.
    ///
    /// Markers are only ever searched for at the buffer head. Once the head
    /// is aligned, payload bytes that happen to equal `0xFF` cannot trigger
    /// a false resynchronization mid-frame.
    pub fn next_frame(&mut self) -> Option<RawFrame> {
        if self.buffer.first() != Some(&START_MARKER) {
            match self.buffer.iter().position(|&b| b == START_MARKER) {
                Some(pos) => {
                    debug!("Discarding {} garbage bytes ahead of frame marker", pos);
                    self.buffer.drain(..pos);
                }
                None => {
                    if !self.buffer.is_empty() {
                        debug!("Discarding {} bytes with no frame marker", self.buffer.len());
                        self.buffer.clear();
                    }
                    return None;
                }
            }
        }

        if self.buffer.len() < FRAME_LEN {
            return None;
        }

        let mut bytes = [0u8; FRAME_LEN];
        bytes.copy_from_slice(&self.buffer[..FRAME_LEN]);
        self.buffer.drain(..FRAME_LEN);
        Some(RawFrame { bytes })
    }
}
