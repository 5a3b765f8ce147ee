// Copyright (C) Microsoft Corporation. All rights reserved.

//! DH key material: header `{alg, bits, |pub|, |pri|, reserved}` then PUB, PRI.

use super::*;

/// DH public value and (optional) private value for a standard group.
#[derive(Clone, PartialEq, Eq)]
pub struct DhKeyMaterial {
    /// Group size in bits.
    pub key_size: u32,
    pub public: Vec<u8>,
    /// Empty for public-only material.
    pub private: KeyBlob,
}

impl std::fmt::Debug for DhKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DhKeyMaterial")
            .field("key_size", &self.key_size)
            .field("public", &self.public.len())
            .field("private", &Redacted(self.private.len()))
            .finish()
    }
}

impl KeyMaterial for DhKeyMaterial {
    const HEADER_SIZE: usize = 20;

    fn encode(&self) -> Result<KeyBlob, CryptoError> {
        write_blob(
            &[
                KeyAlg::Dh.id(),
                self.key_size,
                field_len(&self.public)?,
                field_len(&self.private)?,
                0,
            ],
            &[&self.public, &self.private],
        )
    }

    fn decode(blob: &[u8]) -> Result<Self, CryptoError> {
        // The reserved field is read but carries no meaning.
        let [alg, key_size, pub_size, pri_size, _reserved] = read_header::<5>(blob)?;
        expect_alg(alg, &[KeyAlg::Dh])?;
        let [public, private] = split_components(blob, Self::HEADER_SIZE, [pub_size, pri_size])?;
        if public.is_empty() {
            Err(CryptoError::KeyBlobMissingComponent)?;
        }

        Ok(Self {
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
            key_size: self.key_size,
            public: self.public.clone(),
            private: KeyBlob::default(),
        })
    }
}
