// Copyright (C) Microsoft Corporation. All rights reserved.

//! OpenSSL-backed HMAC.
//!
//! Streaming contexts drive an `EVP_MD_CTX` through `MdCtx`; the context
//! keeps its own reference to the key so it does not borrow the caller's.

use openssl::md::MdRef;
use openssl::md_ctx::MdCtx;
use openssl::pkey::PKey;
use openssl::pkey::Private;

use super::*;

/// HMAC algorithm bound to one digest.
pub struct HmacAlgo {
    digest: Digest,
    md: &'static MdRef,
}

impl HmacAlgo {
    /// Creates the algorithm for `digest`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedDigest`] unless `digest` is SHA-1
    /// through SHA-512.
    pub fn new(digest: Digest) -> Result<Self, CryptoError> {
        if !digest.is_sha() {
            tracing::error!(?digest, "digest not allowed for HMAC");
            Err(CryptoError::UnsupportedDigest)?;
        }
        Ok(Self {
            digest,
            md: md(digest)?,
        })
    }

    /// MAC size in bytes.
    pub fn size(&self) -> usize {
        self.digest.size()
    }
}

impl SignStreamingOp for HmacAlgo {
    type Key = HmacKey;
    type Context = HmacAlgoContext;

    fn sign_init(self, key: &Self::Key) -> Result<Self::Context, CryptoError> {
        let pkey = key.pkey()?;
        let mut ctx = MdCtx::new().map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::HmacFailed
        })?;
        ctx.digest_sign_init(Some(self.md), &pkey)
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                CryptoError::HmacFailed
            })?;

        Ok(HmacAlgoContext {
            size: self.size(),
            _pkey: pkey,
            ctx,
        })
    }
}

/// Streaming HMAC context.
pub struct HmacAlgoContext {
    size: usize,
    _pkey: PKey<Private>,
    ctx: MdCtx,
}

impl HmacAlgoContext {
    /// MAC size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl SignOpContext for HmacAlgoContext {
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.ctx
            .digest_sign_update(data)
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                CryptoError::HmacFailed
            })
    }

    fn finish(&mut self, signature: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let Some(signature) = signature else {
            return Ok(self.size);
        };
        if signature.len() < self.size {
            Err(CryptoError::BufferTooSmall)?;
        }

        self.ctx
            .digest_sign_final(Some(&mut signature[..self.size]))
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                CryptoError::HmacFailed
            })
    }
}
