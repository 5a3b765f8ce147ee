// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits for hash computation.

use super::*;

/// One-shot hashing.
pub trait HashOp {
    /// Hashes `data` into `output`.
    ///
    /// # Returns
    ///
    /// Bytes written, or the digest size if `output` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if `output` is shorter than the digest or the
    /// provider fails.
    fn hash(&mut self, data: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError>;
}

/// Streaming hash initialisation.
pub trait HashStreamingOp {
    /// Context produced by initialisation.
    type Context: HashOpContext;

    /// Creates a streaming hash context.
    fn hash_init(self) -> Result<Self::Context, CryptoError>;
}

/// Active streaming hash operation.
pub trait HashOpContext {
    /// Feeds `data` into the digest.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Completes the digest.
    ///
    /// # Returns
    ///
    /// Bytes written, or the digest size if `output` is `None`.
    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError>;
}
