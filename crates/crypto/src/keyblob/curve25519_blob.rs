// Copyright (C) Microsoft Corporation. All rights reserved.

//! Curve25519 key material: header `{alg, bits, |pub|, |pri|}` then PUB, PRI.
//!
//! X25519 and Ed25519 share this layout; the tag tells them apart. Both
//! components are raw byte strings of at most 32 bytes.

use super::*;

/// Largest raw Curve25519 key.
pub const CURVE25519_KEY_SIZE: usize = 32;

/// Raw X25519 or Ed25519 key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Curve25519KeyMaterial {
    /// [`KeyAlg::X25519`] or [`KeyAlg::Ed25519`].
    pub alg: KeyAlg,
    /// Key size in bits.
    pub key_size: u32,
    pub public: Vec<u8>,
    /// Empty for public-only material.
    pub private: KeyBlob,
}

impl std::fmt::Debug for Curve25519KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Curve25519KeyMaterial")
            .field("alg", &self.alg)
            .field("key_size", &self.key_size)
            .field("public", &self.public.len())
            .field("private", &Redacted(self.private.len()))
            .finish()
    }
}

impl KeyMaterial for Curve25519KeyMaterial {
    const HEADER_SIZE: usize = 16;

    fn encode(&self) -> Result<KeyBlob, CryptoError> {
        expect_alg(self.alg.id(), &[KeyAlg::X25519, KeyAlg::Ed25519])?;
        if self.public.len() > CURVE25519_KEY_SIZE || self.private.len() > CURVE25519_KEY_SIZE {
            Err(CryptoError::KeyBlobComponentTooLarge)?;
        }
        write_blob(
            &[
                self.alg.id(),
                self.key_size,
                field_len(&self.public)?,
                field_len(&self.private)?,
            ],
            &[&self.public, &self.private],
        )
    }

    fn decode(blob: &[u8]) -> Result<Self, CryptoError> {
        let [alg, key_size, pub_size, pri_size] = read_header::<4>(blob)?;
        let alg = expect_alg(alg, &[KeyAlg::X25519, KeyAlg::Ed25519])?;
        if pub_size as usize > CURVE25519_KEY_SIZE || pri_size as usize > CURVE25519_KEY_SIZE {
            tracing::error!(pub_size, pri_size, "curve25519 component too large");
            Err(CryptoError::KeyBlobComponentTooLarge)?;
        }
        let [public, private] = split_components(blob, Self::HEADER_SIZE, [pub_size, pri_size])?;

        Ok(Self {
            alg,
            key_size,
            public: public.to_vec(),
            private: blob_from_slice(private)?,
        })
    }

    fn is_public_only(&self) -> bool {
        self.private.is_empty()
    }

    fn to_public(&self) -> Result<Self, CryptoError> {
        Ok(Self {
            alg: self.alg,
            key_size: self.key_size,
            public: self.public.clone(),
            private: KeyBlob::default(),
        })
    }
}
