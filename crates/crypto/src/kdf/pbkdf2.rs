// Copyright (C) Microsoft Corporation. All rights reserved.

//! PBKDF2 (RFC 8018) with an HMAC pseudorandom function.

use openssl::hash::MessageDigest;

use super::*;

/// PBKDF2 bound to a digest, salt and iteration count.
pub struct Pbkdf2Algo<'a> {
    md: MessageDigest,
    salt: &'a [u8],
    iterations: usize,
}

impl<'a> Pbkdf2Algo<'a> {
    /// Creates the algorithm.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedDigest`] outside SHA-1..SHA-512
    /// - [`CryptoError::KdfInvalidParameter`] for a zero iteration count
    pub fn new(digest: Digest, salt: &'a [u8], iterations: u32) -> Result<Self, CryptoError> {
        if !digest.is_sha() {
            tracing::error!(?digest, "PBKDF2 requires a SHA digest");
            Err(CryptoError::UnsupportedDigest)?;
        }
        if iterations == 0 {
            tracing::error!("PBKDF2 iteration count is zero");
            Err(CryptoError::KdfInvalidParameter)?;
        }
        Ok(Self {
            md: message_digest(digest)?,
            salt,
            iterations: iterations as usize,
        })
    }
}

impl DeriveOp for Pbkdf2Algo<'_> {
    type Key = RawSecretKey;

    fn derive(&self, key: &Self::Key, derived: &mut [u8]) -> Result<usize, CryptoError> {
        if derived.is_empty() {
            Err(CryptoError::KdfInvalidParameter)?;
        }
        openssl::pkcs5::pbkdf2_hmac(key.bytes(), self.salt, self.iterations, self.md, derived)
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                CryptoError::KdfFailed
            })?;
        Ok(derived.len())
    }
}
