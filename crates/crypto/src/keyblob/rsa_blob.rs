// Copyright (C) Microsoft Corporation. All rights reserved.

//! RSA key material: header `{alg, bits, |n|, |e|, |d|}` then N, E, D.

use super::*;

/// RSA modulus, public exponent and (optional) private exponent.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaKeyMaterial {
    /// Key size in bits.
    pub key_size: u32,
    pub n: Vec<u8>,
    pub e: Vec<u8>,
    /// Empty for public-only material.
    pub d: KeyBlob,
}

impl RsaKeyMaterial {
    /// Whether the private exponent is present.
    pub fn has_private(&self) -> bool {
        !self.d.is_empty()
    }
}

impl std::fmt::Debug for RsaKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeyMaterial")
            .field("key_size", &self.key_size)
            .field("n", &self.n.len())
            .field("e", &self.e.len())
            .field("d", &Redacted(self.d.len()))
            .finish()
    }
}

impl KeyMaterial for RsaKeyMaterial {
    const HEADER_SIZE: usize = 20;

    fn encode(&self) -> Result<KeyBlob, CryptoError> {
        write_blob(
            &[
                KeyAlg::Rsa.id(),
                self.key_size,
                field_len(&self.n)?,
                field_len(&self.e)?,
                field_len(&self.d)?,
            ],
            &[&self.n, &self.e, &self.d],
        )
    }

    fn decode(blob: &[u8]) -> Result<Self, CryptoError> {
        let [alg, key_size, n_size, e_size, d_size] = read_header::<5>(blob)?;
        expect_alg(alg, &[KeyAlg::Rsa])?;
        let [n, e, d] = split_components(blob, Self::HEADER_SIZE, [n_size, e_size, d_size])?;
        if n.is_empty() || e.is_empty() {
            Err(CryptoError::KeyBlobMissingComponent)?;
        }

        Ok(Self {
            key_size,
            n: n.to_vec(),
            e: e.to_vec(),
            d: blob_from_slice(d)?,
        })
    }

    fn is_public_only(&self) -> bool {
        !self.has_private()
    }

    fn to_public(&self) -> Result<Self, CryptoError> {
        Ok(Self {
            key_size: self.key_size,
            n: self.n.clone(),
            e: self.e.clone(),
            d: KeyBlob::default(),
        })
    }
}
