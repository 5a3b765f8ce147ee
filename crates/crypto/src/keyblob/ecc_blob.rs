// Copyright (C) Microsoft Corporation. All rights reserved.

//! ECC key material: header `{alg, bits, |x|, |y|, |z|}` then X, Y, Z.
//!
//! The same layout serves ECDSA and ECDH keys; the tag is either
//! [`KeyAlg::Ecc`] or [`KeyAlg::Ecdh`].

use super::*;

/// Affine public point and (optional) private scalar.
#[derive(Clone, PartialEq, Eq)]
pub struct EccKeyMaterial {
    pub alg: KeyAlg,
    /// Curve size in bits.
    pub key_size: u32,
    pub x: Vec<u8>,
    pub y: Vec<u8>,
    /// Private scalar; empty for public-only material.
    pub z: KeyBlob,
}

impl std::fmt::Debug for EccKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EccKeyMaterial")
            .field("alg", &self.alg)
            .field("key_size", &self.key_size)
            .field("x", &self.x.len())
            .field("y", &self.y.len())
            .field("z", &Redacted(self.z.len()))
            .finish()
    }
}

impl KeyMaterial for EccKeyMaterial {
    const HEADER_SIZE: usize = 20;

    fn encode(&self) -> Result<KeyBlob, CryptoError> {
        expect_alg(self.alg.id(), &[KeyAlg::Ecc, KeyAlg::Ecdh])?;
        write_blob(
            &[
                self.alg.id(),
                self.key_size,
                field_len(&self.x)?,
                field_len(&self.y)?,
                field_len(&self.z)?,
            ],
            &[&self.x, &self.y, &self.z],
        )
    }

    fn decode(blob: &[u8]) -> Result<Self, CryptoError> {
        let [alg, key_size, x_size, y_size, z_size] = read_header::<5>(blob)?;
        let alg = expect_alg(alg, &[KeyAlg::Ecc, KeyAlg::Ecdh])?;
        let [x, y, z] = split_components(blob, Self::HEADER_SIZE, [x_size, y_size, z_size])?;
        if x.is_empty() || y.is_empty() {
            Err(CryptoError::KeyBlobMissingComponent)?;
        }

        Ok(Self {
            alg,
            key_size,
            x: x.to_vec(),
            y: y.to_vec(),
            z: blob_from_slice(z)?,
        })
    }

    fn is_public_only(&self) -> bool {
        self.z.is_empty()
    }

    fn to_public(&self) -> Result<Self, CryptoError> {
        Ok(Self {
            alg: self.alg,
            key_size: self.key_size,
            x: self.x.clone(),
            y: self.y.clone(),
            z: KeyBlob::default(),
        })
    }
}
