// Copyright (C) Microsoft Corporation. All rights reserved.

//! Digest engine.
//!
//! Supports MD5, SHA-1, SHA-224, SHA-256, SHA-384 and SHA-512 in one-shot and
//! streaming form. The one-shot entry point is defined as Init, a single
//! Update over the whole message, then Final.
//!
//! # Streaming
//!
//! [`hash_init`] stores a [`HashAlgoContext`] in a [`CryptoContext`];
//! [`hash_update`] feeds it; [`hash_final`] takes it out of the handle,
//! feeds the last chunk and writes the digest. The context is released by
//! `hash_final` on every path, or by [`free_context`] if the flow is abandoned.

mod hash_ossl;

pub use hash_ossl::*;

use super::*;

/// Hash ability: one-shot digest of `msg` into `digest_out`.
///
/// # Errors
///
/// - [`CryptoError::UnsupportedDigest`] for [`Digest::None`]
/// - [`CryptoError::BufferTooSmall`] if `digest_out` is shorter than the digest
pub fn hash(digest: Digest, msg: &[u8], digest_out: &mut [u8]) -> Result<usize, CryptoError> {
    let mut handle = Some(hash_init(digest)?);
    hash_update(&mut handle, msg)?;
    hash_final(&mut handle, &[], digest_out)
}

/// Hash-init ability.
pub fn hash_init(digest: Digest) -> Result<CryptoContext, CryptoError> {
    let context = HashAlgo::new(digest)?.hash_init()?;
    Ok(CryptoContext::Hash(context))
}

/// Hash-update ability.
pub fn hash_update(handle: &mut Option<CryptoContext>, msg: &[u8]) -> Result<(), CryptoError> {
    match context_mut(handle)? {
        CryptoContext::Hash(context) => context.update(msg),
        #[allow(unreachable_patterns)]
        _ => Err(CryptoError::ContextMismatch),
    }
}

/// Hash-final ability.
///
/// Consumes the context whether or not the call succeeds.
pub fn hash_final(
    handle: &mut Option<CryptoContext>,
    msg: &[u8],
    digest_out: &mut [u8],
) -> Result<usize, CryptoError> {
    let mut context = match take_context(handle)? {
        CryptoContext::Hash(context) => context,
        #[allow(unreachable_patterns)]
        _ => Err(CryptoError::ContextMismatch)?,
    };

    if digest_out.len() < context.size() {
        tracing::error!(
            expected = context.size(),
            actual = digest_out.len(),
            "digest buffer too small"
        );
        Err(CryptoError::BufferTooSmall)?;
    }

    context.update(msg)?;
    context.finish(Some(digest_out))
}

#[cfg(test)]
mod tests;
