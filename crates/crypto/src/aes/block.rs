// Copyright (C) Microsoft Corporation. All rights reserved.

//! Output-size accounting for the provider's block buffering.
//!
//! OpenSSL holds back a partial block on every update, and on padded
//! decryption it also holds back the last full block until finalisation.
//! [`AesBlock`] mirrors that count so every output buffer can be checked
//! before the provider writes into it.

use super::*;

/// AES block size in bytes.
pub(crate) const AES_BLOCK_SIZE: usize = 16;

/// Bytes consumed by the provider but not yet emitted.
pub(crate) struct AesBlock {
    /// 1 for stream modes (CTR, GCM), [`AES_BLOCK_SIZE`] for ECB and CBC.
    block_size: usize,
    padded: bool,
    direction: Direction,
    pending: usize,
}

impl AesBlock {
    pub(crate) fn new(mode: CipherMode, padding: Padding, direction: Direction) -> Self {
        let block_size = match mode {
            CipherMode::Ecb | CipherMode::Cbc => AES_BLOCK_SIZE,
            _ => 1,
        };
        Self {
            block_size,
            padded: padding == Padding::Pkcs7,
            direction,
            pending: 0,
        }
    }

    fn is_stream(&self) -> bool {
        self.block_size == 1
    }

    /// Maximum bytes an update over `len` more input can emit.
    pub(crate) fn update_len(&self, len: usize) -> usize {
        if self.is_stream() {
            return len;
        }
        (self.pending + len) / self.block_size * self.block_size
    }

    /// Records an update that consumed `consumed` bytes and emitted `emitted`.
    pub(crate) fn record(&mut self, consumed: usize, emitted: usize) {
        self.pending = (self.pending + consumed).saturating_sub(emitted);
    }

    /// Maximum bytes finalisation can emit in the current state.
    pub(crate) fn finish_len(&self) -> usize {
        if self.is_stream() {
            return 0;
        }
        match (self.direction, self.padded) {
            (Direction::Encrypt, true) => self.block_size,
            _ => self.pending,
        }
    }

    /// Maximum bytes an update over `len` input followed by finalisation can emit.
    pub(crate) fn final_len(&self, len: usize) -> usize {
        if self.is_stream() {
            return len;
        }
        let total = self.pending + len;
        match (self.direction, self.padded) {
            (Direction::Encrypt, true) => (total / self.block_size + 1) * self.block_size,
            _ => total,
        }
    }

    /// Rejects a flow whose total input cannot end on a block boundary.
    ///
    /// Unpadded ECB/CBC and padded decryption both need whole blocks.
    pub(crate) fn check_final(&self, len: usize) -> Result<(), CryptoError> {
        if self.is_stream() || (self.padded && self.direction == Direction::Encrypt) {
            return Ok(());
        }
        if (self.pending + len) % self.block_size != 0 {
            tracing::error!(
                pending = self.pending,
                len,
                "input not a multiple of the block size"
            );
            Err(CryptoError::AesUnalignedInput)?;
        }
        Ok(())
    }
}
