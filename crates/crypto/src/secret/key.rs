// Copyright (C) Microsoft Corporation. All rights reserved.

//! Raw secret key.

use super::*;

/// Secret key holding raw bytes, used as input keying material for KDFs.
///
/// The bytes live in a [`KeyBlob`] and are wiped on drop.
pub struct RawSecretKey {
    bytes: KeyBlob,
}

impl RawSecretKey {
    /// Key bytes.
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Key for RawSecretKey {
    fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl SecretKey for RawSecretKey {}

impl ImportableKey for RawSecretKey {
    /// Any non-empty byte string is a valid raw secret.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            Err(CryptoError::InvalidKeyLength)?;
        }
        Ok(Self {
            bytes: blob_from_slice(bytes)?,
        })
    }
}

impl ExportableKey for RawSecretKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        match bytes {
            None => Ok(self.bytes.len()),
            Some(bytes) => copy_out(&self.bytes, bytes),
        }
    }
}

impl KeyGenerationOp for RawSecretKey {
    type Key = Self;

    /// Generates a random secret of `bits` bits; `bits` must be a positive
    /// multiple of 8.
    fn generate(bits: usize) -> Result<Self::Key, CryptoError> {
        if bits == 0 || bits % 8 != 0 {
            Err(CryptoError::InvalidKeyLength)?;
        }
        let mut bytes = alloc_blob(bits / 8)?;
        Rng::rand_bytes(&mut bytes)?;
        Ok(Self { bytes })
    }
}
