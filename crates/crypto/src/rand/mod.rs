// Copyright (C) Microsoft Corporation. All rights reserved.

//! Cryptographically secure random numbers from the OpenSSL DRBG.

use super::*;

/// Random number generator.
pub struct Rng;

impl Rng {
    /// Fills `buf` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngFailed`] if the DRBG fails.
    pub fn rand_bytes(buf: &mut [u8]) -> Result<(), CryptoError> {
        openssl::rand::rand_bytes(buf).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::RngFailed
        })
    }

    /// Returns `len` random bytes in a zeroizing buffer.
    pub fn rand_blob(len: usize) -> Result<KeyBlob, CryptoError> {
        let mut blob = alloc_blob(len)?;
        Self::rand_bytes(&mut blob)?;
        Ok(blob)
    }
}

/// Fill-random ability.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    Rng::rand_bytes(buf)
}
