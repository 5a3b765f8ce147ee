// Copyright (C) Microsoft Corporation. All rights reserved.

//! Crypto Context handles for streaming abilities.
//!
//! A streaming flow keeps its state in a caller-owned
//! `Option<CryptoContext>`. `*Init` abilities produce the context, `*Update`
//! borrows it, and `*Final` takes it out of the handle before doing any work,
//! so the context is dropped on success and failure alike. An empty handle is
//! rejected with [`CryptoError::ContextMissing`].
//!
//! Each variant owns its provider handle and scratch buffers; buffers that
//! may hold key material or plaintext are zeroized when the context drops.

use super::*;

/// State of one streaming cipher, digest or MAC operation.
pub enum CryptoContext {
    /// Streaming digest.
    Hash(HashAlgoContext),
    /// Streaming HMAC.
    #[cfg(feature = "hmac")]
    Hmac(HmacAlgoContext),
    /// Streaming AES cipher.
    #[cfg(feature = "aes")]
    Cipher(AesContext),
}

impl CryptoContext {
    /// Short name of the operation family, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            CryptoContext::Hash(_) => "hash",
            #[cfg(feature = "hmac")]
            CryptoContext::Hmac(_) => "hmac",
            #[cfg(feature = "aes")]
            CryptoContext::Cipher(_) => "cipher",
        }
    }
}

impl std::fmt::Debug for CryptoContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CryptoContext").field(&self.name()).finish()
    }
}

/// Borrows the context held by `handle`.
pub(crate) fn context_mut(
    handle: &mut Option<CryptoContext>,
) -> Result<&mut CryptoContext, CryptoError> {
    handle.as_mut().ok_or_else(|| {
        tracing::error!("crypto context missing");
        CryptoError::ContextMissing
    })
}

/// Takes the context out of `handle`, leaving it empty.
pub(crate) fn take_context(handle: &mut Option<CryptoContext>) -> Result<CryptoContext, CryptoError> {
    handle.take().ok_or_else(|| {
        tracing::error!("crypto context missing");
        CryptoError::ContextMissing
    })
}

/// Free ability shared by every streaming family.
///
/// Drops the context held by `handle`, if any. Freeing an empty handle is a
/// no-op.
pub fn free_context(handle: &mut Option<CryptoContext>) {
    if let Some(context) = handle.take() {
        tracing::debug!(context = context.name(), "crypto context freed");
    }
}
