// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key-material codec.
//!
//! Asymmetric keys travel as private binary blobs: a header of little-endian
//! `u32` fields followed by the key components back to back. The header
//! starts with the algorithm id and the key size in bits, then carries the
//! byte length of every component in layout order.
//!
//! | Family     | Header fields                              | Components        |
//! |------------|--------------------------------------------|-------------------|
//! | RSA        | alg, bits, n, e, d                         | N E D             |
//! | ECC        | alg, bits, x, y, z                         | X Y Z             |
//! | DSA        | alg, bits, x, y, p, q, g                   | X Y P Q G         |
//! | DH         | alg, bits, public, private, reserved       | PUB PRI           |
//! | Curve25519 | alg, bits, public, private                 | PUB PRI           |
//!
//! Integers are unsigned big-endian; Curve25519 keys are the raw RFC 7748 /
//! RFC 8032 byte strings. A public-only blob has its private size set to
//! zero and omits the private bytes.
//!
//! [`KeyMaterial::decode`] checks that the blob length equals the header
//! size plus the declared component sizes before slicing anything.

mod curve25519_blob;
mod dh_blob;
mod dsa_blob;
mod ecc_blob;
mod header;
mod rsa_blob;

pub use curve25519_blob::*;
pub use dh_blob::*;
pub use dsa_blob::*;
pub use ecc_blob::*;
use header::*;
pub use rsa_blob::*;

use super::*;

/// Parsed key material of one algorithm family.
pub trait KeyMaterial: Sized {
    /// Size of the blob header in bytes.
    const HEADER_SIZE: usize;

    /// Serializes the material into a new blob.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyBlobComponentTooLarge`] if a component does
    /// not fit the header field or the family limit.
    fn encode(&self) -> Result<KeyBlob, CryptoError>;

    /// Parses and validates a blob.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::KeyBlobTooShort`] if the blob is shorter than the header
    /// - [`CryptoError::KeyBlobAlgorithmMismatch`] if the tag is not of this family
    /// - [`CryptoError::KeyBlobSizeMismatch`] if the declared sizes do not add up
    ///   to the blob length
    fn decode(blob: &[u8]) -> Result<Self, CryptoError>;

    /// Whether the private component is absent.
    fn is_public_only(&self) -> bool;

    /// Copy of the material without the private component.
    fn to_public(&self) -> Result<Self, CryptoError>;

    /// Get-public-key transform on a blob.
    ///
    /// Produces a blob of the same family whose private-size field is zero and
    /// which carries only the public components. Applying it twice yields the
    /// same bytes as applying it once.
    fn extract_public(blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let public = Self::decode(blob)?.to_public()?;
        Ok(public.encode()?.to_vec())
    }
}

/// Reads the algorithm tag of a blob without validating the rest.
pub fn blob_alg(blob: &[u8]) -> Result<KeyAlg, CryptoError> {
    let [alg] = read_header::<1>(blob)?;
    KeyAlg::try_from(alg).map_err(|_| CryptoError::KeyBlobAlgorithmMismatch)
}
