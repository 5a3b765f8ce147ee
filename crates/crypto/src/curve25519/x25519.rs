// Copyright (C) Microsoft Corporation. All rights reserved.

//! X25519 Diffie-Hellman (RFC 7748).

use openssl::derive::Deriver;

use super::*;

/// X25519 shared secret length in bytes.
pub const X25519_SHARED_SIZE: usize = 32;

/// X25519 scalar multiplication of the peer point by the local scalar.
pub struct X25519Algo;

impl AgreeOp for X25519Algo {
    type PrivateKey = Curve25519PrivateKey;
    type PublicKey = Curve25519PublicKey;

    fn agree(
        &self,
        private: &Self::PrivateKey,
        peer: &Self::PublicKey,
        secret: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let Some(secret) = secret else {
            return Ok(X25519_SHARED_SIZE);
        };
        if private.alg() != KeyAlg::X25519 || peer.alg() != KeyAlg::X25519 {
            Err(CryptoError::KeyBlobAlgorithmMismatch)?;
        }
        if secret.len() < X25519_SHARED_SIZE {
            Err(CryptoError::BufferTooSmall)?;
        }

        // Low-order peer points yield an all-zero secret, which the provider rejects.
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::AgreeFailed
        };
        let mut deriver = Deriver::new(private.pkey()).map_err(fail)?;
        deriver.set_peer(peer.pkey()).map_err(fail)?;
        deriver
            .derive(&mut secret[..X25519_SHARED_SIZE])
            .map_err(fail)
    }
}
