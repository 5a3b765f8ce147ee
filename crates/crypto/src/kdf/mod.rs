// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key derivation engine: HKDF and PBKDF2 over a raw main key.
//!
//! The output length is the length of the caller's buffer.

mod hkdf;
mod pbkdf2;

pub use hkdf::*;
pub use pbkdf2::*;

use super::*;

/// Derive-key ability.
///
/// # Errors
///
/// - [`CryptoError::UnsupportedAlgorithm`] unless `spec.alg` is HKDF or PBKDF2
/// - [`CryptoError::InvalidKeyLength`] for an empty main key
/// - [`CryptoError::KdfInvalidParameter`] for an empty output or zero iterations
#[tracing::instrument(skip_all, fields(alg = ?spec.alg, digest = ?spec.digest, len = derived.len()))]
pub fn kdf_derive_key(key: &[u8], spec: &DeriveSpec, derived: &mut [u8]) -> Result<usize, CryptoError> {
    let key = RawSecretKey::from_bytes(key)?;
    match spec.alg {
        KeyAlg::Hkdf => HkdfAlgo::new(spec.digest, &spec.salt, &spec.info)?.derive(&key, derived),
        KeyAlg::Pbkdf2 => {
            Pbkdf2Algo::new(spec.digest, &spec.salt, spec.iterations)?.derive(&key, derived)
        }
        alg => {
            tracing::error!(?alg, "not a key derivation algorithm");
            Err(CryptoError::UnsupportedAlgorithm)
        }
    }
}

#[cfg(test)]
mod tests;
