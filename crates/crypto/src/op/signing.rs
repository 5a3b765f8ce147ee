// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits for signatures and MACs.
//!
//! [`SignOp`] and [`VerifyOp`] cover whole messages. HMAC additionally
//! supports streaming through [`SignStreamingOp`] and [`SignOpContext`].

use super::*;

/// One-shot signature (or MAC) creation.
pub trait SignOp {
    /// Key type accepted by the algorithm.
    type Key: Key;

    /// Signs `data` into `signature`.
    ///
    /// # Returns
    ///
    /// Bytes written, or the maximum signature size if `signature` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is too small, the key cannot sign, or the
    /// provider fails.
    fn sign(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}

/// One-shot signature verification.
pub trait VerifyOp {
    /// Key type accepted by the algorithm.
    type Key: Key;

    /// Verifies `signature` over `data`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the signature is valid, `Ok(false)` if it is not.
    ///
    /// # Errors
    ///
    /// Returns an error only if the verification could not be carried out.
    fn verify(&mut self, key: &Self::Key, data: &[u8], signature: &[u8])
        -> Result<bool, CryptoError>;
}

/// Streaming signature initialisation.
pub trait SignStreamingOp {
    /// Key type accepted by the algorithm.
    type Key: Key;

    /// Context produced by initialisation.
    type Context: SignOpContext;

    /// Creates a streaming signing context.
    fn sign_init(self, key: &Self::Key) -> Result<Self::Context, CryptoError>;
}

/// Active streaming signature operation.
pub trait SignOpContext {
    /// Feeds `data` into the signature.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Produces the signature.
    ///
    /// # Returns
    ///
    /// Bytes written, or the signature size if `signature` is `None`.
    fn finish(&mut self, signature: Option<&mut [u8]>) -> Result<usize, CryptoError>;
}
