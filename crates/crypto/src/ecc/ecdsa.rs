// Copyright (C) Microsoft Corporation. All rights reserved.

//! ECDSA with DER-encoded signatures.
//!
//! The message is hashed with the usage digest first. With
//! [`Digest::None`] the message is taken to be a precomputed digest.

use openssl::ecdsa::EcdsaSig;

use super::*;

/// ECDSA configuration.
pub struct EcdsaAlgo {
    hash: Option<HashAlgo>,
}

impl EcdsaAlgo {
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedDigest`] for MD5.
    pub fn new(digest: Digest) -> Result<Self, CryptoError> {
        let hash = match digest {
            Digest::None => None,
            digest if digest.is_sha() => Some(HashAlgo::new(digest)?),
            digest => {
                tracing::error!(?digest, "digest not valid for ECDSA");
                Err(CryptoError::UnsupportedDigest)?
            }
        };
        Ok(Self { hash })
    }

    fn digest(&mut self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match &mut self.hash {
            Some(hash) => hash.hash_vec(data),
            None => Ok(data.to_vec()),
        }
    }
}

impl SignOp for EcdsaAlgo {
    type Key = EccPrivateKey;

    /// # Returns
    ///
    /// DER signature length, or the curve's maximum DER length if
    /// `signature` is `None`.
    fn sign(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let max = key.curve().max_signature_size();
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
        let digest = self.digest(data)?;
        let ec_key = key.ec_key()?;
        let der = EcdsaSig::sign(&digest, &ec_key)
            .and_then(|sig| sig.to_der())
            .map_err(fail)?;
        copy_out(&der, signature)
    }
}

impl VerifyOp for EcdsaAlgo {
    type Key = EccPublicKey;

    fn verify(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, CryptoError> {
        let Ok(sig) = EcdsaSig::from_der(signature) else {
            tracing::error!("malformed ECDSA signature");
            return Ok(false);
        };
        let digest = self.digest(data)?;
        let ec_key = key.ec_key()?;
        Ok(sig.verify(&digest, &ec_key).unwrap_or(false))
    }
}
