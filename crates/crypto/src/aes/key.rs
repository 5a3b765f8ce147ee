// Copyright (C) Microsoft Corporation. All rights reserved.

//! AES key.

use super::*;

/// Raw AES-128, AES-192 or AES-256 key; the bytes are wiped on drop.
pub struct AesKey {
    bytes: KeyBlob,
}

impl AesKey {
    /// Key bytes.
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn check_size(size: usize) -> Result<(), CryptoError> {
        match size {
            16 | 24 | 32 => Ok(()),
            _ => {
                tracing::error!(size, "invalid AES key size");
                Err(CryptoError::AesInvalidKeySize)
            }
        }
    }
}

impl Key for AesKey {
    fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl SecretKey for AesKey {}

impl ImportableKey for AesKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::check_size(bytes.len())?;
        Ok(Self {
            bytes: blob_from_slice(bytes)?,
        })
    }
}

impl ExportableKey for AesKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        match bytes {
            None => Ok(self.bytes.len()),
            Some(bytes) => copy_out(&self.bytes, bytes),
        }
    }
}

impl KeyGenerationOp for AesKey {
    type Key = Self;

    /// Generates a random key of 128, 192 or 256 bits.
    fn generate(bits: usize) -> Result<Self::Key, CryptoError> {
        if bits % 8 != 0 {
            Err(CryptoError::AesInvalidKeySize)?;
        }
        Self::check_size(bits / 8)?;
        Ok(Self {
            bytes: Rng::rand_blob(bits / 8)?,
        })
    }
}
