// Copyright (C) Microsoft Corporation. All rights reserved.

//! RSA engine.
//!
//! Keys travel as [`RsaKeyMaterial`] blobs. Generation uses a fixed public
//! exponent of 65537 and moduli of 512 to 4096 bits.
//!
//! - Encrypt/decrypt: no padding, PKCS#1 v1.5, or OAEP with the usage digest
//!   for both the OAEP hash and MGF1.
//! - Sign/verify: PKCS#1 v1.5 or PSS over the message hashed with the usage
//!   digest (SHA-256 when none is given).
//!
//! Decryption and signing need the private exponent; public-only blobs are
//! rejected with [`CryptoError::RsaMissingPrivateExponent`].

mod key;
mod rsa_enc;
mod rsa_sign;

pub use key::*;
pub use rsa_enc::*;
pub use rsa_sign::*;

use super::*;

fn check_usage_alg(usage: &UsageSpec) -> Result<(), CryptoError> {
    if usage.alg != KeyAlg::Rsa {
        tracing::error!(alg = ?usage.alg, "usage routed to RSA engine");
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    Ok(())
}

/// Generate-key ability.
#[tracing::instrument(skip_all, fields(bits = spec.key_len))]
pub fn rsa_generate_key(spec: &KeySpec) -> Result<KeyBlob, CryptoError> {
    if spec.alg != KeyAlg::Rsa {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    RsaPrivateKey::generate(spec.key_len as usize)?.to_blob()
}

/// Get-public-key ability.
pub fn rsa_get_public_key(key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    RsaKeyMaterial::extract_public(key)
}

/// Encrypt ability. Only the public components of `key` are used; `tag` is
/// ignored.
pub fn rsa_encrypt(
    key: &[u8],
    usage: &UsageSpec,
    input: &[u8],
    output: &mut [u8],
    _tag: &mut [u8],
) -> Result<usize, CryptoError> {
    check_usage_alg(usage)?;
    let key = RsaPublicKey::from_bytes(key)?;
    RsaEncryptAlgo::from_usage(usage)?.encrypt(&key, input, Some(output))
}

/// Decrypt ability.
pub fn rsa_decrypt(
    key: &[u8],
    usage: &UsageSpec,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, CryptoError> {
    check_usage_alg(usage)?;
    let mut algo = RsaEncryptAlgo::from_usage(usage)?;
    let key = RsaPrivateKey::from_bytes(key)?;
    algo.decrypt(&key, input, Some(output))
}

/// Sign ability.
///
/// # Returns
///
/// Signature length, equal to the modulus size.
#[tracing::instrument(skip_all, fields(padding = ?usage.padding, digest = ?usage.digest))]
pub fn rsa_sign(
    key: &[u8],
    usage: &UsageSpec,
    message: &[u8],
    signature: &mut [u8],
) -> Result<usize, CryptoError> {
    check_usage_alg(usage)?;
    let mut algo = RsaSignAlgo::from_usage(usage)?;
    let key = RsaPrivateKey::from_bytes(key)?;
    algo.sign(&key, message, Some(signature))
}

/// Verify ability.
///
/// # Errors
///
/// Returns [`CryptoError::SignatureVerifyFailed`] if the signature does not
/// match.
#[tracing::instrument(skip_all, fields(padding = ?usage.padding, digest = ?usage.digest))]
pub fn rsa_verify(
    key: &[u8],
    usage: &UsageSpec,
    message: &[u8],
    signature: &[u8],
) -> Result<(), CryptoError> {
    check_usage_alg(usage)?;
    let mut algo = RsaSignAlgo::from_usage(usage)?;
    let key = RsaPublicKey::from_bytes(key)?;
    if !algo.verify(&key, message, signature)? {
        tracing::error!("RSA signature mismatch");
        Err(CryptoError::SignatureVerifyFailed)?;
    }
    Ok(())
}
