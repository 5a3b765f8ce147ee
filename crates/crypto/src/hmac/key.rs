// Copyright (C) Microsoft Corporation. All rights reserved.

//! HMAC key.

use openssl::pkey::PKey;
use openssl::pkey::Private;

use super::*;

/// Raw HMAC key; the bytes are wiped on drop.
pub struct HmacKey {
    bytes: KeyBlob,
}

impl HmacKey {
    /// Wraps the key bytes in an OpenSSL HMAC key.
    pub(crate) fn pkey(&self) -> Result<PKey<Private>, CryptoError> {
        PKey::hmac(&self.bytes).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::HmacFailed
        })
    }
}

impl Key for HmacKey {
    fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl SecretKey for HmacKey {}

impl ImportableKey for HmacKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            tracing::error!("HMAC key is empty");
            Err(CryptoError::HmacInvalidKeySize)?;
        }
        Ok(Self {
            bytes: blob_from_slice(bytes)?,
        })
    }
}

impl ExportableKey for HmacKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        match bytes {
            None => Ok(self.bytes.len()),
            Some(bytes) => copy_out(&self.bytes, bytes),
        }
    }
}

impl KeyGenerationOp for HmacKey {
    type Key = Self;

    /// Generates a random key; `bits` must be a positive multiple of 8.
    fn generate(bits: usize) -> Result<Self::Key, CryptoError> {
        if bits == 0 || bits % 8 != 0 {
            tracing::error!(bits, "HMAC key length must be a positive multiple of 8");
            Err(CryptoError::HmacInvalidKeySize)?;
        }
        Ok(Self {
            bytes: Rng::rand_blob(bits / 8)?,
        })
    }
}
