use std::io::Read;

use chunk_error::Result;

use crate::{CharChunks, Chunks};

/// Read `reader` to its end, collecting every byte.
pub fn read_all_bytes<R: Read>(
    reader: R,
    chunk_size: usize,
) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for chunk in Chunks::new(reader, chunk_size)? {
        bytes.extend_from_slice(&chunk?);
    }
    Ok(bytes)
}

/// Read a UTF-8 `reader` to its end, collecting the decoded text.
pub fn read_all_text<R: Read>(reader: R, chunk_size: usize) -> Result<String> {
    let mut text = String::new();
    for chunk in CharChunks::new(reader, chunk_size)? {
        text.extend(chunk?);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunk_error::ChunkError;
    use std::io::Cursor;

    #[test]
    fn collects_all_bytes() {
        let data: Vec<u8> = (0..100).collect();
        let bytes = read_all_bytes(Cursor::new(data.clone()), 7)
            .expect("Failed to read bytes");
        assert_eq!(bytes, data);
    }

    #[test]
    fn collects_all_text() {
        let text = "héllo €𝄞 world";
        let collected = read_all_text(Cursor::new(text.as_bytes().to_vec()), 4)
            .expect("Failed to read text");
        assert_eq!(collected, text);
    }

    #[test]
    fn invalid_utf8_fails_text_collection() {
        let result = read_all_text(Cursor::new(vec![b'a', 0xff]), 4);
        assert!(matches!(result, Err(ChunkError::Utf8(_))));
    }
}
