// Copyright (C) Microsoft Corporation. All rights reserved.

//! DSA engine.
//!
//! Key generation creates fresh domain parameters for any key length that is
//! a multiple of 8 bits. In the blob, `x` and `q` are 20 bytes below 2048
//! bits and 32 bytes from 2048 bits up; `y`, `p` and `g` take the key length.

mod dsa_sign;
mod key;

pub use dsa_sign::*;
pub use key::*;

use super::*;

/// Generate-key ability.
#[tracing::instrument(skip_all, fields(bits = spec.key_len))]
pub fn dsa_generate_key(spec: &KeySpec) -> Result<KeyBlob, CryptoError> {
    if spec.alg != KeyAlg::Dsa {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    DsaPrivateKey::generate(spec.key_len as usize)?.to_blob()
}

/// Get-public-key ability.
pub fn dsa_get_public_key(key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    DsaKeyMaterial::extract_public(key)
}

/// Sign ability. The signature is DER-encoded.
pub fn dsa_sign(
    key: &[u8],
    usage: &UsageSpec,
    message: &[u8],
    signature: &mut [u8],
) -> Result<usize, CryptoError> {
    if usage.alg != KeyAlg::Dsa {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    let mut algo = DsaSignAlgo::new(usage.digest)?;
    let key = DsaPrivateKey::from_bytes(key)?;
    algo.sign(&key, message, Some(signature))
}

/// Verify ability.
pub fn dsa_verify(
    key: &[u8],
    usage: &UsageSpec,
    message: &[u8],
    signature: &[u8],
) -> Result<(), CryptoError> {
    if usage.alg != KeyAlg::Dsa {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    let mut algo = DsaSignAlgo::new(usage.digest)?;
    let key = DsaPublicKey::from_bytes(key)?;
    if !algo.verify(&key, message, signature)? {
        tracing::error!("DSA signature mismatch");
        Err(CryptoError::SignatureVerifyFailed)?;
    }
    Ok(())
}
