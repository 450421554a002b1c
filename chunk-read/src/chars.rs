use std::io::Read;

use chunk_error::{ChunkError, Result};

use crate::decoder::Utf8Decoder;

/// Lazy iterator over chunks of chars decoded from a UTF-8 byte source.
///
/// Each pull reads at most `chunk_size` bytes and yields the chars those
/// bytes decode to, so every chunk holds between 1 and `chunk_size` chars.
/// A scalar split across two reads is completed on the next pull; a read
/// that completes no scalar at all pulls again instead of yielding an
/// empty chunk.
///
/// Ownership of the reader works as for [`crate::Chunks`]: pass by value
/// to close the source on drop, pass `&mut reader` to keep it.
pub struct CharChunks<R> {
    reader: R,
    buffer: Vec<u8>,
    decoder: Utf8Decoder,
    done: bool,
}

impl<R: Read> CharChunks<R> {
    /// Create a char-chunking iterator over `reader`.
    ///
    /// No read is issued until iteration starts. Fails with
    /// [`ChunkError::InvalidChunkSize`] if `chunk_size` is zero.
    pub fn new(reader: R, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ChunkError::InvalidChunkSize(chunk_size));
        }
        log::debug!("Chunking char source, {} bytes per read", chunk_size);

        Ok(CharChunks {
            reader,
            buffer: vec![0u8; chunk_size],
            decoder: Utf8Decoder::new(),
            done: false,
        })
    }

    /// The configured maximum chunk length.
    pub fn chunk_size(&self) -> usize {
        self.buffer.len()
    }

    /// Consume the iterator and hand the underlying reader back without
    /// closing it.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Flatten into a per-char iterator over the same source.
    pub fn into_chars(self) -> Chars<R> {
        Chars::from_chunks(self)
    }
}

impl<R: Read> Iterator for CharChunks<R> {
    type Item = Result<Vec<char>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    log::trace!("char source exhausted");
                    self.done = true;
                    return match self.decoder.finish() {
                        Ok(()) => None,
                        Err(e) => Some(Err(e)),
                    };
                }
                Ok(read) => {
                    let mut chunk = Vec::with_capacity(read);
                    if let Err(e) =
                        self.decoder.decode(&self.buffer[..read], &mut chunk)
                    {
                        self.done = true;
                        return Some(Err(e));
                    }
                    if !chunk.is_empty() {
                        return Some(Ok(chunk));
                    }
                    // Every byte was the prefix of one scalar; pull again.
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

/// Per-char view over [`CharChunks`].
pub struct Chars<R> {
    chunks: CharChunks<R>,
    current: std::vec::IntoIter<char>,
}

impl<R: Read> Chars<R> {
    /// Create a per-char iterator reading `chunk_size` bytes at a time.
    pub fn new(reader: R, chunk_size: usize) -> Result<Self> {
        Ok(CharChunks::new(reader, chunk_size)?.into_chars())
    }

    pub(crate) fn from_chunks(chunks: CharChunks<R>) -> Self {
        Chars {
            chunks,
            current: Vec::new().into_iter(),
        }
    }
}

impl<R: Read> Iterator for Chars<R> {
    type Item = Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(c) = self.current.next() {
                return Some(Ok(c));
            }
            match self.chunks.next()? {
                Ok(chunk) => self.current = chunk.into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
