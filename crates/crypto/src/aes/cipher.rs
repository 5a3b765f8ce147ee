// Copyright (C) Microsoft Corporation. All rights reserved.

//! AES in ECB, CBC, CTR and GCM over an OpenSSL `CipherCtx`.
//!
//! One context type serves all four modes; the mode only changes the cipher
//! selected at initialisation, the parameters bound to it and the buffering
//! rules tracked by [`AesBlock`].

use openssl::cipher::Cipher;
use openssl::cipher::CipherRef;
use openssl::cipher_ctx::CipherCtx;

use super::*;

/// AEAD tag size used for GCM and CCM.
pub const AES_TAG_SIZE: usize = 16;

/// Smallest accepted GCM nonce.
pub const GCM_MIN_NONCE_SIZE: usize = 12;

/// AES cipher configuration for the streaming modes.
#[derive(Clone)]
pub struct AesCipherAlgo {
    mode: CipherMode,
    padding: Padding,
    iv: Vec<u8>,
    aad: Vec<u8>,
    tag: Vec<u8>,
}

impl AesCipherAlgo {
    /// Validates a usage specification and captures its parameters.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedMode`] if the mode is missing or not ECB,
    ///   CBC, CTR or GCM
    /// - [`CryptoError::UnsupportedPadding`] if the padding does not suit the mode
    /// - [`CryptoError::InvalidUsageParam`] if the parameter block is missing
    /// - [`CryptoError::AesInvalidIvSize`] or [`CryptoError::GcmInvalidNonceSize`]
    pub fn from_usage(usage: &UsageSpec) -> Result<Self, CryptoError> {
        let Some(mode) = usage.mode else {
            tracing::error!("AES usage without a cipher mode");
            return Err(CryptoError::UnsupportedMode);
        };
        check_padding(mode, usage.padding)?;

        let (iv, aad, tag) = match mode {
            CipherMode::Ecb => (Vec::new(), Vec::new(), Vec::new()),
            CipherMode::Cbc | CipherMode::Ctr => {
                let iv = usage.iv().ok_or(CryptoError::InvalidUsageParam)?;
                if iv.len() != AES_BLOCK_SIZE {
                    tracing::error!(len = iv.len(), "invalid AES IV size");
                    Err(CryptoError::AesInvalidIvSize)?;
                }
                (iv.to_vec(), Vec::new(), Vec::new())
            }
            CipherMode::Gcm => {
                let aead = usage.aead().ok_or(CryptoError::InvalidUsageParam)?;
                if aead.nonce.len() < GCM_MIN_NONCE_SIZE {
                    tracing::error!(len = aead.nonce.len(), "invalid GCM nonce size");
                    Err(CryptoError::GcmInvalidNonceSize)?;
                }
                (aead.nonce.clone(), aead.aad.clone(), aead.tag.clone())
            }
            CipherMode::Ccm => {
                tracing::error!("CCM has no streaming form");
                Err(CryptoError::UnsupportedMode)?
            }
        };

        Ok(Self {
            mode,
            padding: usage.padding,
            iv,
            aad,
            tag,
        })
    }

    /// Cipher mode.
    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// GCM tag: the expected tag before decryption, the computed tag after
    /// one-shot encryption.
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    fn cipher(&self, key: &AesKey) -> Result<&'static CipherRef, CryptoError> {
        let cipher = match (self.mode, key.size()) {
            (CipherMode::Ecb, 16) => Cipher::aes_128_ecb(),
            (CipherMode::Ecb, 24) => Cipher::aes_192_ecb(),
            (CipherMode::Ecb, 32) => Cipher::aes_256_ecb(),
            (CipherMode::Cbc, 16) => Cipher::aes_128_cbc(),
            (CipherMode::Cbc, 24) => Cipher::aes_192_cbc(),
            (CipherMode::Cbc, 32) => Cipher::aes_256_cbc(),
            (CipherMode::Ctr, 16) => Cipher::aes_128_ctr(),
            (CipherMode::Ctr, 24) => Cipher::aes_192_ctr(),
            (CipherMode::Ctr, 32) => Cipher::aes_256_ctr(),
            (CipherMode::Gcm, 16) => Cipher::aes_128_gcm(),
            (CipherMode::Gcm, 24) => Cipher::aes_192_gcm(),
            (CipherMode::Gcm, 32) => Cipher::aes_256_gcm(),
            (mode, size) => {
                tracing::error!(?mode, size, "unsupported AES key size and mode");
                Err(CryptoError::AesInvalidKeySize)?
            }
        };
        Ok(cipher)
    }
}

/// Checks the padding policy of a mode.
pub(crate) fn check_padding(mode: CipherMode, padding: Padding) -> Result<(), CryptoError> {
    let allowed = match mode {
        CipherMode::Ecb | CipherMode::Cbc => matches!(padding, Padding::None | Padding::Pkcs7),
        CipherMode::Ctr | CipherMode::Gcm | CipherMode::Ccm => padding == Padding::None,
    };
    if !allowed {
        tracing::error!(?mode, ?padding, "padding not allowed for AES mode");
        Err(CryptoError::UnsupportedPadding)?;
    }
    Ok(())
}

fn engine_error(direction: Direction) -> CryptoError {
    match direction {
        Direction::Encrypt => CryptoError::AesEncryptFailed,
        Direction::Decrypt => CryptoError::AesDecryptFailed,
    }
}

impl CipherStreamingOp for AesCipherAlgo {
    type Key = AesKey;
    type Context = AesContext;

    /// Initialises the provider context.
    ///
    /// For GCM the AAD is fed immediately so it is bound before any data, and
    /// on decryption the expected tag is installed.
    fn cipher_init(
        self,
        key: &Self::Key,
        direction: Direction,
    ) -> Result<Self::Context, CryptoError> {
        let cipher = self.cipher(key)?;
        let gcm = self.mode == CipherMode::Gcm;
        if gcm && direction == Direction::Decrypt && self.tag.len() != AES_TAG_SIZE {
            tracing::error!(len = self.tag.len(), "invalid GCM tag size");
            Err(CryptoError::AeadInvalidTagSize)?;
        }

        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            engine_error(direction)
        };

        let mut ctx = CipherCtx::new().map_err(fail)?;
        let iv = (!self.iv.is_empty()).then_some(self.iv.as_slice());
        let init = match direction {
            Direction::Encrypt => ctx.encrypt_init(Some(cipher), None, None),
            Direction::Decrypt => ctx.decrypt_init(Some(cipher), None, None),
        };
        init.map_err(fail)?;
        if gcm && self.iv.len() != GCM_MIN_NONCE_SIZE {
            ctx.set_iv_length(self.iv.len()).map_err(fail)?;
        }
        let init = match direction {
            Direction::Encrypt => ctx.encrypt_init(None, Some(key.bytes()), iv),
            Direction::Decrypt => ctx.decrypt_init(None, Some(key.bytes()), iv),
        };
        init.map_err(fail)?;
        ctx.set_padding(self.padding == Padding::Pkcs7);

        if gcm {
            if direction == Direction::Decrypt {
                ctx.set_tag(&self.tag).map_err(fail)?;
            }
            if !self.aad.is_empty() {
                ctx.cipher_update(&self.aad, None).map_err(fail)?;
            }
        }

        tracing::debug!(mode = ?self.mode, ?direction, "AES context initialised");
        Ok(AesContext {
            block: AesBlock::new(self.mode, self.padding, direction),
            direction,
            algo: self,
            ctx,
        })
    }
}

/// Streaming AES context.
///
/// Owns the provider context and the parameters captured at
/// initialisation. Scratch buffers are zeroizing.
pub struct AesContext {
    algo: AesCipherAlgo,
    direction: Direction,
    block: AesBlock,
    ctx: CipherCtx,
}

impl AesContext {
    /// Direction fixed at initialisation.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cipher mode.
    pub fn mode(&self) -> CipherMode {
        self.algo.mode
    }

    /// GCM tag; meaningful after a successful encrypting
    /// [`finish`](CipherOpContext::finish).
    pub fn tag(&self) -> &[u8] {
        &self.algo.tag
    }

    /// Processes the last chunk and finishes.
    ///
    /// The whole size check happens before the provider sees the input. On
    /// failure every byte written to `output` is zeroed.
    pub fn finalize(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CryptoError> {
        let needed = self.block.final_len(input.len());
        if output.len() < needed {
            tracing::error!(needed, actual = output.len(), "AES output buffer too small");
            Err(CryptoError::BufferTooSmall)?;
        }
        self.block.check_final(input.len())?;

        let result = self.process_last(input, output);
        if result.is_err() {
            output[..needed].fill(0);
        }
        result
    }

    fn process_last(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CryptoError> {
        let written = self.update(input, Some(&mut *output))?;
        let tail = self.finish(Some(&mut output[written..]))?;
        Ok(written + tail)
    }
}

impl CipherOpContext for AesContext {
    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let max = self.block.update_len(input.len());
        let Some(output) = output else {
            return Ok(max);
        };
        if output.len() < max {
            tracing::error!(needed = max, actual = output.len(), "AES output buffer too small");
            Err(CryptoError::BufferTooSmall)?;
        }

        // The provider may write up to one extra block; stage through scratch.
        let mut scratch = alloc_blob(input.len() + AES_BLOCK_SIZE)?;
        let written = self
            .ctx
            .cipher_update(input, Some(&mut scratch))
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                engine_error(self.direction)
            })?;
        self.block.record(input.len(), written);
        copy_out(&scratch[..written], output)
    }

    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let max = self.block.finish_len();
        let Some(output) = output else {
            return Ok(max);
        };
        if output.len() < max {
            Err(CryptoError::BufferTooSmall)?;
        }
        self.block.check_final(0)?;

        let mut scratch = alloc_blob(2 * AES_BLOCK_SIZE)?;
        let gcm = self.algo.mode == CipherMode::Gcm;
        let written = self.ctx.cipher_final(&mut scratch).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            if gcm && self.direction == Direction::Decrypt {
                CryptoError::AeadTagMismatch
            } else {
                engine_error(self.direction)
            }
        })?;
        self.block.record(0, written);

        if gcm && self.direction == Direction::Encrypt {
            let mut tag = vec![0u8; AES_TAG_SIZE];
            self.ctx.tag(&mut tag).map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                CryptoError::AesEncryptFailed
            })?;
            self.algo.tag = tag;
        }

        copy_out(&scratch[..written], output)
    }
}
