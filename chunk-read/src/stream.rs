use async_stream::stream;
use futures::{pin_mut, Stream, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use chunk_error::{ChunkError, Result};

use crate::decoder::Utf8Decoder;

/// Async analogue of [`crate::Chunks`]: a lazy stream of byte chunks.
///
/// A single read is in flight at a time; no prefetching happens. The
/// cancellation token is checked before every read, including the first;
/// once cancelled the stream yields [`ChunkError::Cancelled`] and ends.
/// Responsiveness of an in-flight read to cancellation is left to the
/// underlying reader.
///
/// Pass the reader by value to have it closed when the stream is dropped,
/// or pass `&mut reader` to keep it open for further use by the caller.
pub fn chunk_stream<R>(
    mut reader: R,
    chunk_size: usize,
    cancel: CancellationToken,
) -> Result<impl Stream<Item = Result<Vec<u8>>>>
where
    R: AsyncRead + Unpin,
{
    if chunk_size == 0 {
        return Err(ChunkError::InvalidChunkSize(chunk_size));
    }
    log::debug!("Chunking async byte source, {} bytes per chunk", chunk_size);

    Ok(stream! {
        let mut buffer = vec![0u8; chunk_size];
        loop {
            if cancel.is_cancelled() {
                yield Err(ChunkError::Cancelled);
                break;
            }
            match reader.read(&mut buffer).await {
                Ok(0) => {
                    log::trace!("async byte source exhausted");
                    break;
                }
                Ok(read) => {
                    yield Ok(buffer[..read].to_vec());
                }
                Err(e) => {
                    yield Err(e.into());
                    break;
                }
            }
        }
    })
}

/// Per-byte view over [`chunk_stream`].
pub fn byte_stream<R>(
    reader: R,
    chunk_size: usize,
    cancel: CancellationToken,
) -> Result<impl Stream<Item = Result<u8>>>
where
    R: AsyncRead + Unpin,
{
    let chunks = chunk_stream(reader, chunk_size, cancel)?;
    Ok(stream! {
        pin_mut!(chunks);
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(chunk) => {
                    for byte in chunk {
                        yield Ok(byte);
                    }
                }
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
    })
}

/// Async analogue of [`crate::CharChunks`]: a lazy stream of char chunks
/// decoded from a UTF-8 byte source.
///
/// Cancellation and ownership behave as for [`chunk_stream`].
pub fn char_chunk_stream<R>(
    mut reader: R,
    chunk_size: usize,
    cancel: CancellationToken,
) -> Result<impl Stream<Item = Result<Vec<char>>>>
where
    R: AsyncRead + Unpin,
{
    if chunk_size == 0 {
        return Err(ChunkError::InvalidChunkSize(chunk_size));
    }
    log::debug!("Chunking async char source, {} bytes per read", chunk_size);

    Ok(stream! {
        let mut buffer = vec![0u8; chunk_size];
        let mut decoder = Utf8Decoder::new();
        loop {
            if cancel.is_cancelled() {
                yield Err(ChunkError::Cancelled);
                break;
            }
            match reader.read(&mut buffer).await {
                Ok(0) => {
                    log::trace!("async char source exhausted");
                    if let Err(e) = decoder.finish() {
                        yield Err(e);
                    }
                    break;
                }
                Ok(read) => {
                    let mut chunk = Vec::with_capacity(read);
                    match decoder.decode(&buffer[..read], &mut chunk) {
                        // Every byte was the prefix of one scalar; read on.
                        Ok(()) if chunk.is_empty() => {}
                        Ok(()) => {
                            yield Ok(chunk);
                        }
                        Err(e) => {
                            yield Err(e);
                            break;
                        }
                    }
                }
                Err(e) => {
                    yield Err(e.into());
                    break;
                }
            }
        }
    })
}

/// Per-char view over [`char_chunk_stream`].
pub fn char_stream<R>(
    reader: R,
    chunk_size: usize,
    cancel: CancellationToken,
) -> Result<impl Stream<Item = Result<char>>>
where
    R: AsyncRead + Unpin,
{
    let chunks = char_chunk_stream(reader, chunk_size, cancel)?;
    Ok(stream! {
        pin_mut!(chunks);
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(chunk) => {
                    for c in chunk {
                        yield Ok(c);
                    }
                }
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    async fn collect_chunks<S: Stream<Item = Result<Vec<u8>>>>(
        stream: S,
    ) -> Vec<Vec<u8>> {
        pin_mut!(stream);
        let mut chunks = Vec::new();
        while let Some(chunk) = stream.next().await {
            chunks.push(chunk.expect("Failed to read chunk"));
        }
        chunks
    }

    #[tokio::test]
    async fn seven_bytes_chunked_in_threes() {
        let data: &[u8] = &[1, 2, 3, 4, 5, 6, 7];
        let stream =
            chunk_stream(data, 3, CancellationToken::new()).unwrap();

        let chunks = collect_chunks(stream).await;
        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[tokio::test]
    async fn zero_chunk_size_is_rejected_eagerly() {
        let data: &[u8] = &[1, 2, 3];
        let result = chunk_stream(data, 0, CancellationToken::new());
        assert!(matches!(
            result.map(|_| ()),
            Err(ChunkError::InvalidChunkSize(0))
        ));
    }

    #[tokio::test]
    async fn cancelled_token_stops_the_stream_before_the_first_read() {
        let data: &[u8] = &[1, 2, 3, 4, 5];
        let cancel = CancellationToken::new();
        cancel.cancel();

        let stream = chunk_stream(data, 2, cancel).unwrap();
        pin_mut!(stream);

        assert!(matches!(
            stream.next().await,
            Some(Err(ChunkError::Cancelled))
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn cancelling_mid_iteration_fails_the_next_pull() {
        let data: &[u8] = &[1, 2, 3, 4, 5, 6];
        let cancel = CancellationToken::new();

        let stream = chunk_stream(data, 2, cancel.clone()).unwrap();
        pin_mut!(stream);

        assert_eq!(stream.next().await.unwrap().unwrap(), vec![1, 2]);
        cancel.cancel();

        assert!(matches!(
            stream.next().await,
            Some(Err(ChunkError::Cancelled))
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn borrowed_reader_keeps_its_position_after_the_stream_drops() {
        let mut reader = Cursor::new(vec![1u8, 2, 3, 4, 5, 6, 7]);

        {
            let stream =
                chunk_stream(&mut reader, 3, CancellationToken::new())
                    .unwrap();
            pin_mut!(stream);
            assert_eq!(stream.next().await.unwrap().unwrap(), vec![1, 2, 3]);
        }

        assert_eq!(reader.position(), 3);
    }

    #[tokio::test]
    async fn flattened_bytes_preserve_order() {
        let data: Vec<u8> = (0..=20).collect();
        let stream = byte_stream(
            Cursor::new(data.clone()),
            3,
            CancellationToken::new(),
        )
        .unwrap();
        pin_mut!(stream);

        let mut bytes = Vec::new();
        while let Some(byte) = stream.next().await {
            bytes.push(byte.expect("Failed to read byte"));
        }
        assert_eq!(bytes, data);
    }

    #[tokio::test]
    async fn char_chunks_reassemble_split_scalars() {
        let text = "héllo wörld €𝄞";
        let stream = char_chunk_stream(
            text.as_bytes(),
            2,
            CancellationToken::new(),
        )
        .unwrap();
        pin_mut!(stream);

        let mut chunks = Vec::new();
        while let Some(chunk) = stream.next().await {
            chunks.push(chunk.expect("Failed to read char chunk"));
        }

        assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= 2));
        let flat: String = chunks.concat().into_iter().collect();
        assert_eq!(flat, text);
    }

    #[tokio::test]
    async fn truncated_scalar_fails_the_final_pull() {
        let bytes: &[u8] = &[b'a', 0xc3];
        let stream =
            char_chunk_stream(bytes, 8, CancellationToken::new()).unwrap();
        pin_mut!(stream);

        assert_eq!(stream.next().await.unwrap().unwrap(), vec!['a']);
        assert!(matches!(
            stream.next().await,
            Some(Err(ChunkError::TruncatedUtf8))
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn flattened_chars_preserve_order() {
        let text = "grüße, 世界";
        let stream =
            char_stream(text.as_bytes(), 4, CancellationToken::new())
                .unwrap();
        pin_mut!(stream);

        let mut chars = Vec::new();
        while let Some(c) = stream.next().await {
            chars.push(c.expect("Failed to read char"));
        }
        assert_eq!(chars, text.chars().collect::<Vec<_>>());
    }
}
