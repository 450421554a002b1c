use core::{fmt::Display, str::FromStr};
use std::{fs, io::Read, path::Path};

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use chunk_error::Result;
use chunk_read::Chunks;

use crate::{StreamDigest, CHUNK_CAPACITY};

/// CRC32 digest of a byte source.
///
/// Uses the [`crc32fast`] crate to compute the hash value.
#[derive(
    Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct Crc32(pub u32);

impl FromStr for Crc32 {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Ok(Crc32(u32::from_str(s)?))
    }
}

impl Display for Crc32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StreamDigest for Crc32 {
    fn from_reader<R: Read>(reader: R) -> Result<Self> {
        log::debug!("Computing CRC32 hash from byte source");

        let mut hasher = Hasher::new();
        for chunk in Chunks::new(reader, CHUNK_CAPACITY)? {
            hasher.update(&chunk?);
        }
        Ok(Crc32(hasher.finalize()))
    }

    fn from_path<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        log::debug!("Computing CRC32 hash for file: {:?}", file_path.as_ref());

        let file = fs::File::open(file_path)?;
        Self::from_reader(file)
    }

    fn from_bytes(data: &[u8]) -> Result<Self> {
        log::debug!("Computing CRC32 hash for bytes");

        let mut hasher = Hasher::new();
        hasher.update(data);
        Ok(Crc32(hasher.finalize()))
    }
}
