// Copyright (C) Microsoft Corporation. All rights reserved.

//! HMAC engine.
//!
//! Keys are raw byte strings whose length is a positive multiple of 8 bits.
//! SHA-1 through SHA-512 are accepted as the underlying digest. The one-shot
//! entry point is Init, a single Update over the whole message, then Final;
//! an undersized MAC buffer is rejected before any computation.

mod hmac_ossl;
mod key;

pub use hmac_ossl::*;
pub use key::*;

use super::*;

/// Generate-key ability for [`KeyAlg::Hmac`].
pub fn hmac_generate_key(spec: &KeySpec) -> Result<KeyBlob, CryptoError> {
    if spec.alg != KeyAlg::Hmac {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    HmacKey::generate(spec.key_len as usize)?.to_blob()
}

/// HMAC ability: one-shot MAC of `msg` into `mac`.
///
/// # Errors
///
/// - [`CryptoError::HmacInvalidKeySize`] for an empty key
/// - [`CryptoError::UnsupportedDigest`] for a digest outside SHA-1..SHA-512
/// - [`CryptoError::BufferTooSmall`] if `mac` is shorter than the digest
pub fn hmac(key: &[u8], digest: Digest, msg: &[u8], mac: &mut [u8]) -> Result<usize, CryptoError> {
    if mac.len() < digest.size() {
        tracing::error!(?digest, mac_len = mac.len(), "MAC buffer too small");
        Err(CryptoError::BufferTooSmall)?;
    }
    let mut handle = Some(hmac_init(key, digest)?);
    hmac_update(&mut handle, msg)?;
    hmac_final(&mut handle, &[], mac)
}

/// HMAC-init ability.
pub fn hmac_init(key: &[u8], digest: Digest) -> Result<CryptoContext, CryptoError> {
    let key = HmacKey::from_bytes(key)?;
    let context = HmacAlgo::new(digest)?.sign_init(&key)?;
    Ok(CryptoContext::Hmac(context))
}

/// HMAC-update ability.
pub fn hmac_update(handle: &mut Option<CryptoContext>, msg: &[u8]) -> Result<(), CryptoError> {
    match context_mut(handle)? {
        CryptoContext::Hmac(context) => context.update(msg),
        _ => Err(CryptoError::ContextMismatch),
    }
}

/// HMAC-final ability.
///
/// Consumes the context whether or not the call succeeds.
pub fn hmac_final(
    handle: &mut Option<CryptoContext>,
    msg: &[u8],
    mac: &mut [u8],
) -> Result<usize, CryptoError> {
    let mut context = match take_context(handle)? {
        CryptoContext::Hmac(context) => context,
        _ => Err(CryptoError::ContextMismatch)?,
    };

    if mac.len() < context.size() {
        tracing::error!(
            expected = context.size(),
            actual = mac.len(),
            "MAC buffer too small"
        );
        Err(CryptoError::BufferTooSmall)?;
    }

    context.update(msg)?;
    context.finish(Some(mac))
}
