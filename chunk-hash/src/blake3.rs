use core::{fmt::Display, str::FromStr};
use std::{fs, io::Read, path::Path};

use blake3::Hasher;
use hex::encode;
use serde::{Deserialize, Serialize};

use chunk_error::Result;
use chunk_read::Chunks;

use crate::{StreamDigest, CHUNK_CAPACITY};

/// BLAKE3 digest of a byte source, hex-encoded.
///
/// Uses the [`blake3`] crate to compute the hash value.
#[derive(
    Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct Blake3(pub String);

impl FromStr for Blake3 {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        hex::decode(s)?;
        Ok(Blake3(s.to_string()))
    }
}

impl Display for Blake3 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StreamDigest for Blake3 {
    fn from_reader<R: Read>(reader: R) -> Result<Self> {
        log::debug!("Computing BLAKE3 hash from byte source");

        let mut hasher = Hasher::new();
        for chunk in Chunks::new(reader, CHUNK_CAPACITY)? {
            hasher.update(&chunk?);
        }
        let hash = hasher.finalize();
        Ok(Blake3(encode(hash.as_bytes())))
    }

    fn from_path<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        log::debug!(
            "Computing BLAKE3 hash for file: {:?}",
            file_path.as_ref()
        );

        let file = fs::File::open(file_path)?;
        Self::from_reader(file)
    }

    fn from_bytes(data: &[u8]) -> Result<Self> {
        log::debug!("Computing BLAKE3 hash for bytes");

        let mut hasher = Hasher::new();
        hasher.update(data);
        let hash = hasher.finalize();
        Ok(Blake3(encode(hash.as_bytes())))
    }
}
