// Copyright (C) Microsoft Corporation. All rights reserved.

//! Curve25519 engine: X25519 agreement, Ed25519 signatures, and agreement
//! with Ed25519 keys through conversion to X25519.
//!
//! Keys travel as [`Curve25519KeyMaterial`] blobs carrying the raw 32-byte
//! RFC 7748 / RFC 8032 encodings; the blob tag selects the algorithm.

mod convert;
mod ed25519;
mod key;
mod x25519;

pub use convert::*;
pub use ed25519::*;
pub use key::*;
pub use x25519::*;
use zeroize::Zeroizing;

use super::*;

fn check_key_len(spec: &KeySpec) -> Result<(), CryptoError> {
    if spec.key_len != CURVE25519_KEY_BITS {
        tracing::error!(bits = spec.key_len, "Curve25519 keys are 256 bits");
        Err(CryptoError::InvalidKeyLength)?;
    }
    Ok(())
}

fn expect_blob_alg(key: &[u8], alg: KeyAlg) -> Result<(), CryptoError> {
    if blob_alg(key)? != alg {
        tracing::error!(expected = ?alg, "key blob tag mismatch");
        Err(CryptoError::KeyBlobAlgorithmMismatch)?;
    }
    Ok(())
}

/// Generate-key ability for [`KeyAlg::X25519`] and [`KeyAlg::Ed25519`].
#[tracing::instrument(skip_all, fields(alg = ?spec.alg))]
pub fn curve25519_generate_key(spec: &KeySpec) -> Result<KeyBlob, CryptoError> {
    if !matches!(spec.alg, KeyAlg::X25519 | KeyAlg::Ed25519) {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    check_key_len(spec)?;
    Curve25519PrivateKey::generate_for(spec.alg)?.to_blob()
}

/// Get-public-key ability.
pub fn curve25519_get_public_key(key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    Curve25519KeyMaterial::extract_public(key)
}

/// Sign ability (Ed25519). The message is signed as is.
pub fn ed25519_sign(
    key: &[u8],
    usage: &UsageSpec,
    message: &[u8],
    signature: &mut [u8],
) -> Result<usize, CryptoError> {
    if usage.alg != KeyAlg::Ed25519 {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    expect_blob_alg(key, KeyAlg::Ed25519)?;
    let key = Curve25519PrivateKey::from_bytes(key)?;
    Ed25519Algo.sign(&key, message, Some(signature))
}

/// Verify ability (Ed25519).
pub fn ed25519_verify(
    key: &[u8],
    usage: &UsageSpec,
    message: &[u8],
    signature: &[u8],
) -> Result<(), CryptoError> {
    if usage.alg != KeyAlg::Ed25519 {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    expect_blob_alg(key, KeyAlg::Ed25519)?;
    let key = Curve25519PublicKey::from_bytes(key)?;
    if !Ed25519Algo.verify(&key, message, signature)? {
        tracing::error!("Ed25519 signature mismatch");
        Err(CryptoError::SignatureVerifyFailed)?;
    }
    Ok(())
}

/// Agree-key ability (X25519). Writes the 32-byte shared secret.
#[tracing::instrument(skip_all)]
pub fn x25519_agree_key(
    private: &[u8],
    peer: &[u8],
    spec: &KeySpec,
    shared: &mut [u8],
) -> Result<usize, CryptoError> {
    if spec.alg != KeyAlg::X25519 {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    check_key_len(spec)?;
    expect_blob_alg(private, KeyAlg::X25519)?;
    expect_blob_alg(peer, KeyAlg::X25519)?;
    let private = Curve25519PrivateKey::from_bytes(private)?;
    let peer = Curve25519PublicKey::from_bytes(peer)?;
    X25519Algo.agree(&private, &peer, Some(shared))
}

/// Agree-key ability with Ed25519 keys.
///
/// Both keys are converted to X25519 (the local seed to its clamped scalar,
/// the peer point through the birational map) and agreed with X25519.
#[tracing::instrument(skip_all)]
pub fn ed25519_agree_key(
    private: &[u8],
    peer: &[u8],
    spec: &KeySpec,
    shared: &mut [u8],
) -> Result<usize, CryptoError> {
    if spec.alg != KeyAlg::Ed25519 {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    check_key_len(spec)?;
    let private = Curve25519KeyMaterial::decode(private)?;
    let peer = Curve25519KeyMaterial::decode(peer)?;
    if private.alg != KeyAlg::Ed25519 || peer.alg != KeyAlg::Ed25519 {
        Err(CryptoError::KeyBlobAlgorithmMismatch)?;
    }
    if private.is_public_only() {
        Err(CryptoError::KeyBlobMissingComponent)?;
    }

    let scalar = ed25519_private_to_x25519(&private.private)?;
    let point = ed25519_public_to_x25519(&peer.public)?;
    let private = Curve25519PrivateKey::from_raw(KeyAlg::X25519, &scalar)?;
    let peer = Curve25519PublicKey::from_raw(KeyAlg::X25519, &point)?;
    X25519Algo.agree(&private, &peer, Some(shared))
}

#[cfg(test)]
mod tests;
