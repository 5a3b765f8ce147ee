// Copyright (C) Microsoft Corporation. All rights reserved.

//! Finite-field Diffie-Hellman engine over the RFC 3526 MODP groups
//! (2048, 3072 and 4096 bits, generator 2).

mod dh_agree;
mod key;

pub use dh_agree::*;
pub use key::*;
use zeroize::Zeroizing;

use super::*;

/// Generate-key ability. Both values are padded to the group size.
#[tracing::instrument(skip_all, fields(bits = spec.key_len))]
pub fn dh_generate_key(spec: &KeySpec) -> Result<KeyBlob, CryptoError> {
    if spec.alg != KeyAlg::Dh {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    DhPrivateKey::generate(spec.key_len as usize)?.to_blob()
}

/// Get-public-key ability.
pub fn dh_get_public_key(key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    DhKeyMaterial::extract_public(key)
}

/// Agree-key ability.
///
/// Computes the group-sized secret and writes its first `spec.key_len / 8`
/// bytes to `shared`.
///
/// # Errors
///
/// - [`CryptoError::DhSharedSecretTooShort`] if the group is smaller than the
///   requested length
/// - [`CryptoError::BufferTooSmall`] if `shared` cannot hold the requested length
#[tracing::instrument(skip_all, fields(bits = spec.key_len))]
pub fn dh_agree_key(
    private: &[u8],
    peer: &[u8],
    spec: &KeySpec,
    shared: &mut [u8],
) -> Result<usize, CryptoError> {
    if spec.alg != KeyAlg::Dh {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    let requested = spec.key_bytes();
    if requested == 0 {
        Err(CryptoError::InvalidKeyLength)?;
    }
    let private = DhPrivateKey::from_bytes(private)?;
    if requested > private.size() {
        tracing::error!(requested, group = private.size(), "DH group too small for request");
        Err(CryptoError::DhSharedSecretTooShort)?;
    }
    if shared.len() < requested {
        Err(CryptoError::BufferTooSmall)?;
    }
    let peer = DhPublicKey::from_bytes(peer)?;

    let mut secret = alloc_blob(private.size())?;
    DhAgreeAlgo.agree(&private, &peer, Some(&mut secret))?;
    copy_out(&secret[..requested], shared)
}

#[cfg(test)]
mod tests;
