//! # Chunk Hash
//!
//! `chunk-hash` computes digests of readable byte sources by streaming
//! them through the chunk adapter from `chunk-read`, so a source of any
//! size is hashed without being materialized in memory. Two digest types
//! are provided: [`Crc32`] (non-cryptographic) and [`Blake3`]
//! (cryptographic).

use core::{fmt::Display, str::FromStr};
use std::{fmt::Debug, hash::Hash, io::Read, path::Path};

use chunk_error::Result;
use serde::Serialize;

pub mod blake3;
pub mod crc32;

pub use crate::blake3::Blake3;
pub use crate::crc32::Crc32;

/// Number of bytes fed to the hasher per chunk.
pub(crate) const CHUNK_CAPACITY: usize = 512 * 1024;

/// A digest over the full contents of a byte source.
///
/// Implementors must stream the source chunk by chunk rather than reading
/// it whole.
pub trait StreamDigest:
    Debug
    + Display
    + FromStr
    + Clone
    + PartialEq
    + Eq
    + Ord
    + PartialOrd
    + Hash
    + Serialize
{
    /// Compute the digest by streaming `reader` to its end.
    fn from_reader<R: Read>(reader: R) -> Result<Self>;

    /// Compute the digest of the file at `file_path`.
    fn from_path<P: AsRef<Path>>(file_path: P) -> Result<Self>;

    /// Compute the digest of an in-memory byte slice.
    fn from_bytes(data: &[u8]) -> Result<Self>;
}
