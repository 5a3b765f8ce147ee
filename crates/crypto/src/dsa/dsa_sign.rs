// Copyright (C) Microsoft Corporation. All rights reserved.

//! DSA signatures over a hashed message, DER-encoded.

use openssl::md::MdRef;
use openssl::md_ctx::MdCtx;

use super::*;

/// DSA signature configuration.
pub struct DsaSignAlgo {
    md: &'static MdRef,
}

impl DsaSignAlgo {
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedDigest`] unless the digest is SHA-1
    /// or SHA-2.
    pub fn new(digest: Digest) -> Result<Self, CryptoError> {
        if !digest.is_sha() {
            tracing::error!(?digest, "digest not valid for DSA");
            Err(CryptoError::UnsupportedDigest)?;
        }
        Ok(Self { md: md(digest)? })
    }
}

impl SignOp for DsaSignAlgo {
    type Key = DsaPrivateKey;

    /// # Returns
    ///
    /// DER signature length, or the maximum DER length if `signature` is `None`.
    fn sign(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let max = key.pkey().size();
        let Some(signature) = signature else {
            return Ok(max);
        };
        if signature.len() < max {
            tracing::error!(needed = max, actual = signature.len(), "signature buffer too small");
            Err(CryptoError::BufferTooSmall)?;
        }

        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::SignFailed
        };
        let mut ctx = MdCtx::new().map_err(fail)?;
        ctx.digest_sign_init(Some(self.md), key.pkey()).map_err(fail)?;
        ctx.digest_sign(data, Some(&mut signature[..max]))
            .map_err(fail)
    }
}

impl VerifyOp for DsaSignAlgo {
    type Key = DsaPublicKey;

    fn verify(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, CryptoError> {
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::SignatureVerifyFailed
        };
        let mut ctx = MdCtx::new().map_err(fail)?;
        ctx.digest_verify_init(Some(self.md), key.pkey())
            .map_err(fail)?;
        Ok(ctx.digest_verify(data, signature).unwrap_or(false))
    }
}
