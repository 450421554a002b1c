use std::fs::File;
use std::io::Read;
use std::path::Path;

use chunk_error::{ChunkError, Result};

use crate::bytes::Bytes;

/// Lazy iterator over fixed-size chunks of a byte source.
///
/// The read buffer is allocated once at construction and reused for every
/// pull; each yielded chunk is a freshly right-sized copy, so chunks stay
/// valid after the iterator advances. The final chunk may be shorter than
/// the configured chunk size; an empty chunk is never yielded, end of
/// source is signalled by the iterator ending.
///
/// The iterator owns whatever is passed to [`Chunks::new`]. Pass the
/// reader by value to have it closed when the iterator is dropped, or pass
/// `&mut reader` to keep it open for further use by the caller.
pub struct Chunks<R> {
    reader: R,
    buffer: Vec<u8>,
    done: bool,
}

impl<R: Read> Chunks<R> {
    /// Create a chunking iterator over `reader`.
    ///
    /// No read is issued until iteration starts. Fails with
    /// [`ChunkError::InvalidChunkSize`] if `chunk_size` is zero.
    pub fn new(reader: R, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ChunkError::InvalidChunkSize(chunk_size));
        }
        log::debug!("Chunking byte source, {} bytes per chunk", chunk_size);

        Ok(Chunks {
            reader,
            buffer: vec![0u8; chunk_size],
            done: false,
        })
    }

    /// The configured maximum chunk length.
    pub fn chunk_size(&self) -> usize {
        self.buffer.len()
    }

    /// Consume the iterator and hand the underlying reader back without
    /// closing it. The reader keeps its advanced position.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Flatten into a per-byte iterator over the same source.
    pub fn into_bytes(self) -> Bytes<R> {
        Bytes::from_chunks(self)
    }
}

impl Chunks<File> {
    /// Open the file at `path` and chunk its contents.
    pub fn open<P: AsRef<Path>>(path: P, chunk_size: usize) -> Result<Self> {
        log::debug!("Chunking file: {:?}", path.as_ref());

        let file = File::open(path)?;
        Chunks::new(file, chunk_size)
    }
}

impl<R: Read> Iterator for Chunks<R> {
    type Item = Result<Vec<u8>>;

    /// Issues exactly one read against the source. A short read yields a
    /// short chunk; no second read is made to top it up.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read(&mut self.buffer) {
            Ok(0) => {
                log::trace!("byte source exhausted");
                self.done = true;
                None
            }
            Ok(read) => Some(Ok(self.buffer[..read].to_vec())),
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}
