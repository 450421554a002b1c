//! # Chunk Read
//!
//! `chunk-read` turns readable byte and character sources into lazy
//! sequences of right-sized chunks. A source is never materialized in full:
//! each pull issues exactly one read against the underlying source and
//! yields whatever that read produced.
//!
//! Four variants share one design:
//!
//! - [`Chunks`]: synchronous byte chunks over any [`std::io::Read`]
//! - [`CharChunks`]: synchronous char chunks, decoding UTF-8 incrementally
//! - [`chunk_stream`]: asynchronous byte chunks over [`tokio::io::AsyncRead`]
//! - [`char_chunk_stream`]: asynchronous char chunks
//!
//! Each has a per-element flattened view ([`Bytes`], [`Chars`],
//! [`byte_stream`], [`char_stream`]).
//!
//! The adapters assume a single consumer; the read cursor lives in the
//! underlying source, so a second adapter over the same source resumes
//! from wherever the first one stopped.

mod bytes;
mod chars;
mod chunks;
mod collect;
mod decoder;
mod stream;

pub use bytes::Bytes;
pub use chars::{CharChunks, Chars};
pub use chunks::Chunks;
pub use collect::{read_all_bytes, read_all_text};
pub use stream::{byte_stream, char_chunk_stream, char_stream, chunk_stream};
