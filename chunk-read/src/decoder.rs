use std::str;

use chunk_error::{ChunkError, Result};

/// Incremental UTF-8 decoder.
///
/// Feeds of arbitrary byte slices may end in the middle of a multi-byte
/// scalar; the incomplete tail (at most 3 bytes) is carried over and
/// completed by the next feed.
pub(crate) struct Utf8Decoder {
    partial: [u8; 4],
    partial_len: usize,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Utf8Decoder {
            partial: [0; 4],
            partial_len: 0,
        }
    }

    /// Decode `input`, appending completed chars to `out`.
    pub fn decode(
        &mut self,
        mut input: &[u8],
        out: &mut Vec<char>,
    ) -> Result<()> {
        // Finish a scalar left over from the previous feed, one byte at a
        // time until it completes or turns out invalid.
        while self.partial_len > 0 && !input.is_empty() {
            self.partial[self.partial_len] = input[0];
            self.partial_len += 1;
            input = &input[1..];

            match str::from_utf8(&self.partial[..self.partial_len]) {
                Ok(s) => {
                    out.extend(s.chars());
                    self.partial_len = 0;
                }
                Err(e) if e.error_len().is_none() && self.partial_len < 4 => {}
                Err(e) => return Err(ChunkError::Utf8(e)),
            }
        }
        if input.is_empty() {
            return Ok(());
        }

        match str::from_utf8(input) {
            Ok(s) => out.extend(s.chars()),
            Err(e) => {
                let valid = &input[..e.valid_up_to()];
                out.extend(
                    str::from_utf8(valid).map_err(ChunkError::Utf8)?.chars(),
                );
                if e.error_len().is_some() {
                    return Err(ChunkError::Utf8(e));
                }
                // Incomplete trailing scalar, keep it for the next feed.
                let rest = &input[e.valid_up_to()..];
                self.partial[..rest.len()].copy_from_slice(rest);
                self.partial_len = rest.len();
            }
        }
        Ok(())
    }

    /// Report a scalar left incomplete at end of source.
    pub fn finish(&self) -> Result<()> {
        if self.partial_len > 0 {
            return Err(ChunkError::TruncatedUtf8);
        }
        Ok(())
    }
}
