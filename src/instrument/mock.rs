//! Mock byte source for testing without physical hardware.

use crate::error::AppResult;
use crate::instrument::byte_source::ByteSource;
use std::collections::VecDeque;

/// A scripted byte source. Each queued chunk models the bytes the transport
/// buffered between two acquisition ticks: one `drain` call delivers exactly
/// one chunk, so tests can exercise frames split across tick boundaries.
#[derive(Debug, Default)]
pub struct MockByteSource {
    chunks: VecDeque<Vec<u8>>,
}

impl MockByteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chunk to be delivered by a future `drain` call.
    pub fn push_chunk(&mut self, bytes: impl Into<Vec<u8>>) {
        self.chunks.push_back(bytes.into());
    }

    /// Number of chunks not yet drained.
    pub fn pending_chunks(&self) -> usize {
        self.chunks.len()
    }
}

impl ByteSource for MockByteSource {
    fn bytes_to_read(&mut self) -> AppResult<usize> {
        Ok(self.chunks.front().map_or(0, Vec::len))
    }

    fn drain(&mut self, buf: &mut Vec<u8>) -> AppResult<usize> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                buf.extend_from_slice(&chunk);
                Ok(chunk.len())
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_one_chunk_per_drain() {
        let mut source = MockByteSource::new();
        source.push_chunk([1u8, 2, 3]);
        source.push_chunk([4u8]);

        let mut buf = Vec::new();
        assert_eq!(source.bytes_to_read().unwrap(), 3);
        assert_eq!(source.drain(&mut buf).unwrap(), 3);
        assert_eq!(source.drain(&mut buf).unwrap(), 1);
        assert_eq!(buf, vec![1, 2, 3, 4]);
        assert_eq!(source.drain(&mut buf).unwrap(), 0);
        assert_eq!(buf.len(), 4);
    }
}
