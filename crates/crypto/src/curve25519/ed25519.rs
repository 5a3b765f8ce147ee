// Copyright (C) Microsoft Corporation. All rights reserved.

//! Pure Ed25519 signatures (RFC 8032, no prehash).

use openssl::sign::Signer;
use openssl::sign::Verifier;

use super::*;

/// Ed25519 signature length in bytes.
pub const ED25519_SIGNATURE_SIZE: usize = 64;

/// Ed25519 signing and verification.
pub struct Ed25519Algo;

impl SignOp for Ed25519Algo {
    type Key = Curve25519PrivateKey;

    fn sign(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let Some(signature) = signature else {
            return Ok(ED25519_SIGNATURE_SIZE);
        };
        if signature.len() < ED25519_SIGNATURE_SIZE {
            Err(CryptoError::BufferTooSmall)?;
        }

        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::SignFailed
        };
        let mut signer = Signer::new_without_digest(key.pkey()).map_err(fail)?;
        signer
            .sign_oneshot(&mut signature[..ED25519_SIGNATURE_SIZE], data)
            .map_err(fail)
    }
}

impl VerifyOp for Ed25519Algo {
    type Key = Curve25519PublicKey;

    fn verify(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, CryptoError> {
        if signature.len() != ED25519_SIGNATURE_SIZE {
            return Ok(false);
        }
        let mut verifier = Verifier::new_without_digest(key.pkey()).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::SignatureVerifyFailed
        })?;
        Ok(verifier.verify_oneshot(signature, data).unwrap_or(false))
    }
}
