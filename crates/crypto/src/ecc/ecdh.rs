// Copyright (C) Microsoft Corporation. All rights reserved.

//! ECDH.

use openssl::derive::Deriver;

use super::*;

/// ECDH key agreement; the secret is the X coordinate of the shared point.
pub struct EcdhAlgo;

impl AgreeOp for EcdhAlgo {
    type PrivateKey = EccPrivateKey;
    type PublicKey = EccPublicKey;

    fn agree(
        &self,
        private: &Self::PrivateKey,
        peer: &Self::PublicKey,
        secret: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let len = private.curve().coord_size();
        let Some(secret) = secret else {
            return Ok(len);
        };
        if private.curve() != peer.curve() {
            tracing::error!(
                local = ?private.curve(),
                peer = ?peer.curve(),
                "ECDH curve mismatch"
            );
            Err(CryptoError::AgreeFailed)?;
        }
        if secret.len() < len {
            tracing::error!(needed = len, actual = secret.len(), "shared secret buffer too small");
            Err(CryptoError::BufferTooSmall)?;
        }

        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::AgreeFailed
        };
        let mut deriver = Deriver::new(private.pkey()).map_err(fail)?;
        deriver.set_peer(peer.pkey()).map_err(fail)?;
        let mut shared = alloc_blob(deriver.len().map_err(fail)?)?;
        let written = deriver.derive(&mut shared).map_err(fail)?;
        copy_out(&shared[..written], secret)
    }
}
