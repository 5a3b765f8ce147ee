// Copyright (C) Microsoft Corporation. All rights reserved.

//! HKDF (RFC 5869), extract then expand.

use openssl::md::MdRef;
use openssl::pkey::Id;
use openssl::pkey_ctx::HkdfMode;
use openssl::pkey_ctx::PkeyCtx;

use super::*;

/// Longest HKDF output, in digest-sized blocks.
const HKDF_MAX_BLOCKS: usize = 255;

/// HKDF bound to a digest, salt and info.
pub struct HkdfAlgo<'a> {
    md: &'static MdRef,
    digest: Digest,
    salt: &'a [u8],
    info: &'a [u8],
}

impl<'a> HkdfAlgo<'a> {
    /// Creates the algorithm.
    ///
    /// An empty salt stands for a digest-length string of zeros.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedDigest`] outside SHA-1..SHA-512.
    pub fn new(digest: Digest, salt: &'a [u8], info: &'a [u8]) -> Result<Self, CryptoError> {
        if !digest.is_sha() {
            tracing::error!(?digest, "HKDF requires a SHA digest");
            Err(CryptoError::UnsupportedDigest)?;
        }
        Ok(Self {
            md: md(digest)?,
            digest,
            salt,
            info,
        })
    }

    fn configure<T>(&self, ctx: &mut PkeyCtx<T>, key: &[u8]) -> Result<(), openssl::error::ErrorStack> {
        ctx.derive_init()?;
        ctx.set_hkdf_md(self.md)?;
        ctx.set_hkdf_mode(HkdfMode::EXTRACT_THEN_EXPAND)?;
        ctx.set_hkdf_key(key)?;
        if !self.salt.is_empty() {
            ctx.set_hkdf_salt(self.salt)?;
        }
        if !self.info.is_empty() {
            ctx.add_hkdf_info(self.info)?;
        }
        Ok(())
    }
}

impl DeriveOp for HkdfAlgo<'_> {
    type Key = RawSecretKey;

    fn derive(&self, key: &Self::Key, derived: &mut [u8]) -> Result<usize, CryptoError> {
        let max = HKDF_MAX_BLOCKS * self.digest.size();
        if derived.is_empty() || derived.len() > max {
            tracing::error!(len = derived.len(), max, "HKDF output length out of range");
            Err(CryptoError::KdfInvalidParameter)?;
        }

        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::KdfFailed
        };
        let mut ctx = PkeyCtx::new_id(Id::HKDF).map_err(fail)?;
        self.configure(&mut ctx, key.bytes()).map_err(fail)?;
        let len = ctx.derive(Some(derived)).map_err(fail)?;
        if len != derived.len() {
            tracing::error!(len, expected = derived.len(), "HKDF produced a short output");
            Err(CryptoError::KdfFailed)?;
        }
        Ok(len)
    }
}
