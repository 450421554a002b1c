use std::io::Read;

use chunk_error::Result;

use crate::chunks::Chunks;

/// Per-byte view over [`Chunks`].
///
/// Equivalent to concatenating all chunks in order, but only one chunk is
/// materialized at a time. An I/O error is yielded once at the position it
/// occurred; iteration then ends.
pub struct Bytes<R> {
    chunks: Chunks<R>,
    current: std::vec::IntoIter<u8>,
}

impl<R: Read> Bytes<R> {
    /// Create a per-byte iterator reading `chunk_size` bytes at a time.
    pub fn new(reader: R, chunk_size: usize) -> Result<Self> {
        Ok(Chunks::new(reader, chunk_size)?.into_bytes())
    }

    pub(crate) fn from_chunks(chunks: Chunks<R>) -> Self {
        Bytes {
            chunks,
            current: Vec::new().into_iter(),
        }
    }
}

impl<R: Read> Iterator for Bytes<R> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(byte) = self.current.next() {
                return Some(Ok(byte));
            }
            match self.chunks.next()? {
                Ok(chunk) => self.current = chunk.into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
