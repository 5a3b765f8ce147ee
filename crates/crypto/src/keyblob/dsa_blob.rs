// Copyright (C) Microsoft Corporation. All rights reserved.

//! DSA key material: header `{alg, bits, |x|, |y|, |p|, |q|, |g|}` then
//! X, Y, P, Q, G.
//!
//! The private value leads the layout, so a public-only blob is not a prefix
//! of the private one: the public transform drops X from the middle.

use super::*;

/// DSA domain parameters, public value and (optional) private value.
#[derive(Clone, PartialEq, Eq)]
pub struct DsaKeyMaterial {
    /// Key size in bits.
    pub key_size: u32,
    /// Private value; empty for public-only material.
    pub x: KeyBlob,
    pub y: Vec<u8>,
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub g: Vec<u8>,
}

impl std::fmt::Debug for DsaKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DsaKeyMaterial")
            .field("key_size", &self.key_size)
            .field("x", &Redacted(self.x.len()))
            .field("y", &self.y.len())
            .field("p", &self.p.len())
            .field("q", &self.q.len())
            .field("g", &self.g.len())
            .finish()
    }
}

impl KeyMaterial for DsaKeyMaterial {
    const HEADER_SIZE: usize = 28;

    fn encode(&self) -> Result<KeyBlob, CryptoError> {
        write_blob(
            &[
                KeyAlg::Dsa.id(),
                self.key_size,
                field_len(&self.x)?,
                field_len(&self.y)?,
                field_len(&self.p)?,
                field_len(&self.q)?,
                field_len(&self.g)?,
            ],
            &[&self.x, &self.y, &self.p, &self.q, &self.g],
        )
    }

    fn decode(blob: &[u8]) -> Result<Self, CryptoError> {
        let [alg, key_size, x_size, y_size, p_size, q_size, g_size] = read_header::<7>(blob)?;
        expect_alg(alg, &[KeyAlg::Dsa])?;
        let [x, y, p, q, g] = split_components(
            blob,
            Self::HEADER_SIZE,
            [x_size, y_size, p_size, q_size, g_size],
        )?;
        if y.is_empty() || p.is_empty() || q.is_empty() || g.is_empty() {
            Err(CryptoError::KeyBlobMissingComponent)?;
        }

        Ok(Self {
            key_size,
            x: blob_from_slice(x)?,
            y: y.to_vec(),
            p: p.to_vec(),
            q: q.to_vec(),
            g: g.to_vec(),
        })
    }

    fn is_public_only(&self) -> bool {
        self.x.is_empty()
    }

    fn to_public(&self) -> Result<Self, CryptoError> {
        Ok(Self {
            key_size: self.key_size,
            x: KeyBlob::default(),
            y: self.y.clone(),
            p: self.p.clone(),
            q: self.q.clone(),
            g: self.g.clone(),
        })
    }
}
