// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits for encryption and decryption.
//!
//! Two levels are provided:
//!
//! - **One-shot**: [`EncryptOp`] and [`DecryptOp`] process a whole message.
//! - **Streaming**: [`CipherStreamingOp`] creates a [`CipherOpContext`] that
//!   processes the message in chunks and is closed by
//!   [`finish`](CipherOpContext::finish).

use super::*;

/// One-shot encryption.
pub trait EncryptOp {
    /// Key type accepted by the algorithm.
    type Key: Key;

    /// Encrypts `input` into `output`.
    ///
    /// # Returns
    ///
    /// Bytes written, or the required size if `output` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output buffer is too small, the input shape is
    /// invalid for the mode, or the provider fails.
    fn encrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}

/// One-shot decryption.
pub trait DecryptOp {
    /// Key type accepted by the algorithm.
    type Key: Key;

    /// Decrypts `input` into `output`.
    ///
    /// # Returns
    ///
    /// Bytes written, or an upper bound of the required size if `output` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output buffer is too small, padding or
    /// authentication fails, or the provider fails.
    fn decrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}

/// Streaming cipher initialisation.
///
/// # Lifecycle
///
/// 1. [`cipher_init`](Self::cipher_init) creates the context
/// 2. [`update`](CipherOpContext::update) is called zero or more times
/// 3. [`finish`](CipherOpContext::finish) flushes and closes the context
pub trait CipherStreamingOp {
    /// Key type accepted by the algorithm.
    type Key: Key;

    /// Context produced by initialisation.
    type Context: CipherOpContext;

    /// Creates a streaming context bound to `key` and `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or the mode parameters are invalid, or the
    /// provider fails to initialise.
    fn cipher_init(self, key: &Self::Key, direction: Direction)
        -> Result<Self::Context, CryptoError>;
}

/// Active streaming cipher operation.
///
/// Contexts are not thread-safe; drive each one from a single sequence of calls.
pub trait CipherOpContext {
    /// Processes a chunk.
    ///
    /// Block modes may buffer a partial block, so fewer bytes than `input`
    /// can be produced.
    ///
    /// # Returns
    ///
    /// Bytes written, or the maximum that can be written if `output` is `None`.
    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Flushes buffered data, applies padding and completes authentication.
    ///
    /// # Returns
    ///
    /// Bytes written, or the maximum that can be written if `output` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if padding or the authentication tag does not verify.
    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError>;
}
