// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits for key derivation and key agreement.

use super::*;

/// Derivation of key material from a main key.
pub trait DeriveOp {
    /// Key type accepted as input keying material.
    type Key: Key;

    /// Fills `derived` with key material.
    ///
    /// # Returns
    ///
    /// The number of bytes written, always `derived.len()` on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the provider fails.
    fn derive(&self, key: &Self::Key, derived: &mut [u8]) -> Result<usize, CryptoError>;
}

/// Key agreement between a local private key and a peer public key.
pub trait AgreeOp {
    /// Local private key type.
    type PrivateKey: PrivateKey;

    /// Peer public key type.
    type PublicKey: PublicKey;

    /// Computes the shared secret.
    ///
    /// # Returns
    ///
    /// Bytes written, or the shared secret size if `secret` is `None`.
    fn agree(
        &self,
        private: &Self::PrivateKey,
        peer: &Self::PublicKey,
        secret: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}
