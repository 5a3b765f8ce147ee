// Copyright (C) Microsoft Corporation. All rights reserved.

//! RSA signatures with PKCS#1 v1.5 or PSS padding over a hashed message.

use openssl::md::MdRef;
use openssl::md_ctx::MdCtx;
use openssl::pkey_ctx::PkeyCtxRef;
use openssl::rsa::Padding as RsaPadding;
use openssl::sign::RsaPssSaltlen;

use super::*;

/// Digest used when the usage specification names none.
pub const RSA_DEFAULT_DIGEST: Digest = Digest::Sha256;

/// RSA signature configuration.
pub struct RsaSignAlgo {
    padding: RsaPadding,
    md: &'static MdRef,
}

impl RsaSignAlgo {
    /// Validates the padding and digest of a usage specification.
    ///
    /// [`Digest::None`] selects [`RSA_DEFAULT_DIGEST`]. PSS uses a salt as long
    /// as the digest and MGF1 over the same digest.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedPadding`] unless the padding is
    /// PKCS#1 v1.5 or PSS.
    pub fn from_usage(usage: &UsageSpec) -> Result<Self, CryptoError> {
        let padding = match usage.padding {
            Padding::Pkcs1V1_5 => RsaPadding::PKCS1,
            Padding::Pss => RsaPadding::PKCS1_PSS,
            padding => {
                tracing::error!(?padding, "padding not valid for RSA signatures");
                Err(CryptoError::UnsupportedPadding)?
            }
        };
        let digest = match usage.digest {
            Digest::None => RSA_DEFAULT_DIGEST,
            digest => digest,
        };
        Ok(Self {
            padding,
            md: md(digest)?,
        })
    }

    fn configure<T>(&self, pkey_ctx: &mut PkeyCtxRef<T>) -> Result<(), openssl::error::ErrorStack> {
        pkey_ctx.set_rsa_padding(self.padding)?;
        if self.padding == RsaPadding::PKCS1_PSS {
            pkey_ctx.set_rsa_pss_saltlen(RsaPssSaltlen::DIGEST_LENGTH)?;
            pkey_ctx.set_rsa_mgf1_md(self.md)?;
        }
        Ok(())
    }
}

impl SignOp for RsaSignAlgo {
    type Key = RsaPrivateKey;

    fn sign(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::SignFailed
        };
        let mut ctx = MdCtx::new().map_err(fail)?;
        let pkey_ctx = ctx.digest_sign_init(Some(self.md), key.pkey()).map_err(fail)?;
        self.configure(pkey_ctx).map_err(fail)?;

        let len = key.size();
        let Some(signature) = signature else {
            return Ok(len);
        };
        if signature.len() < len {
            tracing::error!(needed = len, actual = signature.len(), "signature buffer too small");
            Err(CryptoError::BufferTooSmall)?;
        }
        ctx.digest_sign(data, Some(&mut signature[..len]))
            .map_err(fail)
    }
}

impl VerifyOp for RsaSignAlgo {
    type Key = RsaPublicKey;

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
        let pkey_ctx = ctx
            .digest_verify_init(Some(self.md), key.pkey())
            .map_err(fail)?;
        self.configure(pkey_ctx).map_err(fail)?;

        // A malformed signature surfaces as a provider error, not `false`.
        Ok(ctx.digest_verify(data, signature).unwrap_or(false))
    }
}
