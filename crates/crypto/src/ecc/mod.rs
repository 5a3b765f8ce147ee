// Copyright (C) Microsoft Corporation. All rights reserved.

//! ECC engine: ECDSA and ECDH on the NIST prime curves.
//!
//! The curve follows the key length: 224, 256, 384 or 521 bits. Keys travel
//! as [`EccKeyMaterial`] blobs tagged [`KeyAlg::Ecc`] or [`KeyAlg::Ecdh`];
//! both tags are accepted by every operation.

mod ecdh;
mod ecdsa;
mod key;

pub use ecdh::*;
pub use ecdsa::*;
pub use key::*;

use super::*;

/// Generate-key ability for [`KeyAlg::Ecc`] and [`KeyAlg::Ecdh`].
///
/// The blob carries the requested algorithm as its tag.
#[tracing::instrument(skip_all, fields(alg = ?spec.alg, bits = spec.key_len))]
pub fn ecc_generate_key(spec: &KeySpec) -> Result<KeyBlob, CryptoError> {
    if !matches!(spec.alg, KeyAlg::Ecc | KeyAlg::Ecdh) {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    EccPrivateKey::generate(spec.key_len as usize)?
        .to_material(spec.alg)?
        .encode()
}

/// Get-public-key ability.
pub fn ecc_get_public_key(key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    EccKeyMaterial::extract_public(key)
}

/// Sign ability (ECDSA). The signature is DER-encoded.
pub fn ecdsa_sign(
    key: &[u8],
    usage: &UsageSpec,
    message: &[u8],
    signature: &mut [u8],
) -> Result<usize, CryptoError> {
    if usage.alg != KeyAlg::Ecc {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    let mut algo = EcdsaAlgo::new(usage.digest)?;
    let key = EccPrivateKey::from_bytes(key)?;
    algo.sign(&key, message, Some(signature))
}

/// Verify ability (ECDSA).
pub fn ecdsa_verify(
    key: &[u8],
    usage: &UsageSpec,
    message: &[u8],
    signature: &[u8],
) -> Result<(), CryptoError> {
    if usage.alg != KeyAlg::Ecc {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    let mut algo = EcdsaAlgo::new(usage.digest)?;
    let key = EccPublicKey::from_bytes(key)?;
    if !algo.verify(&key, message, signature)? {
        tracing::error!("ECDSA signature mismatch");
        Err(CryptoError::SignatureVerifyFailed)?;
    }
    Ok(())
}

/// Agree-key ability (ECDH).
///
/// `spec.key_len` must name the curve of the local key. The shared secret is
/// sized to the curve.
#[tracing::instrument(skip_all, fields(bits = spec.key_len))]
pub fn ecdh_agree_key(
    private: &[u8],
    peer: &[u8],
    spec: &KeySpec,
    shared: &mut [u8],
) -> Result<usize, CryptoError> {
    if !matches!(spec.alg, KeyAlg::Ecc | KeyAlg::Ecdh) {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    let private = EccPrivateKey::from_bytes(private)?;
    if private.curve().bits() != spec.key_len {
        tracing::error!(bits = private.bits(), "ECDH key length does not match key");
        Err(CryptoError::InvalidKeyLength)?;
    }
    let peer = EccPublicKey::from_bytes(peer)?;
    EcdhAlgo.agree(&private, &peer, Some(shared))
}
