// Copyright (C) Microsoft Corporation. All rights reserved.

//! AES-CCM, one-shot only.
//!
//! CCM needs the message length before any data, so it has no streaming
//! form. The AAD is bound right after the length, ahead of the payload.

use openssl::cipher::Cipher;
use openssl::cipher::CipherRef;
use openssl::cipher_ctx::CipherCtx;

use super::*;

/// Accepted CCM nonce sizes.
const CCM_NONCE_SIZES: std::ops::RangeInclusive<usize> = 7..=13;

/// AES-CCM configuration.
pub struct AesCcmAlgo {
    nonce: Vec<u8>,
    aad: Vec<u8>,
    tag: Vec<u8>,
}

impl AesCcmAlgo {
    /// Validates a CCM usage specification.
    pub fn from_usage(usage: &UsageSpec) -> Result<Self, CryptoError> {
        check_padding(CipherMode::Ccm, usage.padding)?;
        let aead = usage.aead().ok_or(CryptoError::InvalidUsageParam)?;
        if !CCM_NONCE_SIZES.contains(&aead.nonce.len()) {
            tracing::error!(len = aead.nonce.len(), "invalid CCM nonce size");
            Err(CryptoError::CcmInvalidNonceSize)?;
        }
        Ok(Self {
            nonce: aead.nonce.clone(),
            aad: aead.aad.clone(),
            tag: aead.tag.clone(),
        })
    }

    /// Expected tag before decryption, computed tag after encryption.
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    fn cipher(key: &AesKey) -> Result<&'static CipherRef, CryptoError> {
        match key.size() {
            16 => Ok(Cipher::aes_128_ccm()),
            24 => Ok(Cipher::aes_192_ccm()),
            32 => Ok(Cipher::aes_256_ccm()),
            _ => Err(CryptoError::AesInvalidKeySize),
        }
    }

    /// Creates a context with nonce, tag, key, length and AAD bound.
    fn init(
        &self,
        key: &AesKey,
        direction: Direction,
        len: usize,
    ) -> Result<CipherCtx, CryptoError> {
        let cipher = Self::cipher(key)?;
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            match direction {
                Direction::Encrypt => CryptoError::AesEncryptFailed,
                Direction::Decrypt => CryptoError::AesDecryptFailed,
            }
        };

        let mut ctx = CipherCtx::new().map_err(fail)?;
        match direction {
            Direction::Encrypt => {
                ctx.encrypt_init(Some(cipher), None, None).map_err(fail)?;
                ctx.set_iv_length(self.nonce.len()).map_err(fail)?;
                ctx.set_tag_length(AES_TAG_SIZE).map_err(fail)?;
                ctx.encrypt_init(None, Some(key.bytes()), Some(&self.nonce))
                    .map_err(fail)?;
            }
            Direction::Decrypt => {
                ctx.decrypt_init(Some(cipher), None, None).map_err(fail)?;
                ctx.set_iv_length(self.nonce.len()).map_err(fail)?;
                ctx.set_tag(&self.tag).map_err(fail)?;
                ctx.decrypt_init(None, Some(key.bytes()), Some(&self.nonce))
                    .map_err(fail)?;
            }
        }
        ctx.set_data_len(len).map_err(fail)?;
        if !self.aad.is_empty() {
            ctx.cipher_update(&self.aad, None).map_err(fail)?;
        }
        Ok(ctx)
    }
}

impl EncryptOp for AesCcmAlgo {
    type Key = AesKey;

    fn encrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let Some(output) = output else {
            return Ok(input.len());
        };
        if output.len() < input.len() {
            Err(CryptoError::BufferTooSmall)?;
        }

        let mut ctx = self.init(key, Direction::Encrypt, input.len())?;
        let mut scratch = alloc_blob(input.len() + AES_BLOCK_SIZE)?;
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::AesEncryptFailed
        };
        let written = ctx
            .cipher_update(input, Some(&mut scratch))
            .map_err(fail)?;
        let mut tail = [0u8; AES_BLOCK_SIZE];
        ctx.cipher_final(&mut tail).map_err(fail)?;

        let mut tag = vec![0u8; AES_TAG_SIZE];
        ctx.tag(&mut tag).map_err(fail)?;
        self.tag = tag;

        copy_out(&scratch[..written], output)
    }
}

impl DecryptOp for AesCcmAlgo {
    type Key = AesKey;

    /// Decrypts and verifies; the tag is checked by the provider while the
    /// payload is processed.
    fn decrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let Some(output) = output else {
            return Ok(input.len());
        };
        if output.len() < input.len() {
            Err(CryptoError::BufferTooSmall)?;
        }
        if self.tag.len() != AES_TAG_SIZE {
            tracing::error!(len = self.tag.len(), "invalid CCM tag size");
            Err(CryptoError::AeadInvalidTagSize)?;
        }

        let mut ctx = self.init(key, Direction::Decrypt, input.len())?;
        let mut scratch = alloc_blob(input.len() + AES_BLOCK_SIZE)?;
        let written = ctx
            .cipher_update(input, Some(&mut scratch))
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                CryptoError::AeadTagMismatch
            })?;

        copy_out(&scratch[..written], output)
    }
}
