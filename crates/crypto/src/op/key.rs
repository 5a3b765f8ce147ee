// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key traits.
//!
//! Keys are imported from and exported to the engine's wire format: raw
//! bytes for symmetric keys, the key-material blobs for asymmetric keys.

use super::*;

/// Base trait for all keys.
pub trait Key {
    /// Key size in bytes.
    fn size(&self) -> usize;

    /// Key size in bits.
    fn bits(&self) -> usize {
        self.size() * 8
    }
}

/// Marker for symmetric keys whose bytes must stay secret.
pub trait SecretKey: Key {}

/// Marker for public halves of asymmetric keys.
pub trait PublicKey: Key {}

/// Private half of an asymmetric key pair.
pub trait PrivateKey: Key {
    /// The matching public key type.
    type PublicKey: PublicKey;
}

/// Keys that can be rebuilt from their wire format.
pub trait ImportableKey: Key + Sized {
    /// Imports a key from its wire format.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidKeyInfo`] if the blob fails validation
    /// - [`ErrorKind::CryptoEngine`] if the provider rejects the components
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError>;
}

/// Keys that can be written to their wire format.
pub trait ExportableKey: Key {
    /// Exports the key.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Destination buffer, or `None` to query the size.
    ///
    /// # Returns
    ///
    /// The number of bytes written, or the required size if `bytes` is `None`.
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Exports the key into a freshly allocated zeroizing buffer.
    fn to_blob(&self) -> Result<KeyBlob, CryptoError> {
        let len = self.to_bytes(None)?;
        let mut blob = alloc_blob(len)?;
        let written = self.to_bytes(Some(&mut blob))?;
        blob.truncate(written);
        Ok(blob)
    }
}

/// Key generation.
pub trait KeyGenerationOp {
    /// The generated key type.
    type Key;

    /// Generates a key of `bits` bits.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidKeyLength`] if `bits` is not supported
    /// - [`CryptoError::KeyGenFailed`] if the provider fails
    fn generate(bits: usize) -> Result<Self::Key, CryptoError>;
}
