// Copyright (C) Microsoft Corporation. All rights reserved.

//! Finite-field DH agreement.

use super::*;

/// DH agreement producing a group-sized, left-zero-padded secret.
pub struct DhAgreeAlgo;

impl AgreeOp for DhAgreeAlgo {
    type PrivateKey = DhPrivateKey;
    type PublicKey = DhPublicKey;

    fn agree(
        &self,
        private: &Self::PrivateKey,
        peer: &Self::PublicKey,
        secret: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let size = private.group().size();
        let Some(secret) = secret else {
            return Ok(size);
        };
        if private.group() != peer.group() {
            tracing::error!(local = ?private.group(), peer = ?peer.group(), "DH group mismatch");
            Err(CryptoError::AgreeFailed)?;
        }
        if secret.len() < size {
            tracing::error!(needed = size, actual = secret.len(), "shared secret buffer too small");
            Err(CryptoError::BufferTooSmall)?;
        }

        // The provider strips leading zero bytes; restore the group width.
        let raw = Zeroizing::new(private.dh().compute_key(peer.value()).map_err(
            |openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                CryptoError::AgreeFailed
            },
        )?);
        let pad = size.checked_sub(raw.len()).ok_or(CryptoError::AgreeFailed)?;
        secret[..pad].fill(0);
        secret[pad..size].copy_from_slice(&raw);
        Ok(size)
    }
}
