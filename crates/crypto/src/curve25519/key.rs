// Copyright (C) Microsoft Corporation. All rights reserved.

//! Raw X25519 and Ed25519 keys.

use openssl::pkey::Id;
use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::pkey::Public;

use super::*;

/// Key size recorded in Curve25519 blob headers.
pub const CURVE25519_KEY_BITS: u32 = 256;

fn pkey_id(alg: KeyAlg) -> Result<Id, CryptoError> {
    match alg {
        KeyAlg::X25519 => Ok(Id::X25519),
        KeyAlg::Ed25519 => Ok(Id::ED25519),
        _ => Err(CryptoError::UnsupportedAlgorithm),
    }
}

fn import_error(openssl_error_stack: openssl::error::ErrorStack) -> CryptoError {
    tracing::error!(?openssl_error_stack);
    CryptoError::KeyImportFailed
}

/// X25519 or Ed25519 private key.
pub struct Curve25519PrivateKey {
    alg: KeyAlg,
    pkey: PKey<Private>,
}

/// X25519 or Ed25519 public key.
pub struct Curve25519PublicKey {
    alg: KeyAlg,
    pkey: PKey<Public>,
}

impl Curve25519PrivateKey {
    /// Generates a fresh key pair for `alg`.
    pub fn generate_for(alg: KeyAlg) -> Result<Self, CryptoError> {
        let pkey = match alg {
            KeyAlg::X25519 => PKey::generate_x25519(),
            KeyAlg::Ed25519 => PKey::generate_ed25519(),
            _ => Err(CryptoError::UnsupportedAlgorithm)?,
        }
        .map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::KeyGenFailed
        })?;
        Ok(Self { alg, pkey })
    }

    /// Imports a raw 32-byte private key (an X25519 scalar or an Ed25519 seed).
    pub fn from_raw(alg: KeyAlg, private: &[u8]) -> Result<Self, CryptoError> {
        if private.len() != CURVE25519_KEY_SIZE {
            Err(CryptoError::KeyBlobMissingComponent)?;
        }
        let pkey = PKey::private_key_from_raw_bytes(private, pkey_id(alg)?).map_err(import_error)?;
        Ok(Self { alg, pkey })
    }

    pub fn alg(&self) -> KeyAlg {
        self.alg
    }

    pub(crate) fn pkey(&self) -> &PKey<Private> {
        &self.pkey
    }

    /// Raw public key bytes.
    pub fn raw_public(&self) -> Result<Vec<u8>, CryptoError> {
        self.pkey.raw_public_key().map_err(import_error)
    }

    /// Imports the key pair of decoded material.
    ///
    /// The stored public key must match the one derived from the private key.
    pub fn from_material(material: &Curve25519KeyMaterial) -> Result<Self, CryptoError> {
        if material.private.is_empty() {
            Err(CryptoError::KeyBlobMissingComponent)?;
        }
        let key = Self::from_raw(material.alg, &material.private)?;
        if key.raw_public()? != material.public {
            tracing::error!(alg = ?material.alg, "public key does not match private key");
            Err(CryptoError::KeyImportFailed)?;
        }
        Ok(key)
    }

    pub fn to_material(&self) -> Result<Curve25519KeyMaterial, CryptoError> {
        let private = Zeroizing::new(self.pkey.raw_private_key().map_err(import_error)?);
        Ok(Curve25519KeyMaterial {
            alg: self.alg,
            key_size: CURVE25519_KEY_BITS,
            public: self.raw_public()?,
            private: blob_from_slice(&private)?,
        })
    }
}

impl Curve25519PublicKey {
    /// Imports a raw 32-byte public key.
    pub fn from_raw(alg: KeyAlg, public: &[u8]) -> Result<Self, CryptoError> {
        if public.len() != CURVE25519_KEY_SIZE {
            Err(CryptoError::KeyBlobMissingComponent)?;
        }
        let pkey = PKey::public_key_from_raw_bytes(public, pkey_id(alg)?).map_err(import_error)?;
        Ok(Self { alg, pkey })
    }

    pub fn alg(&self) -> KeyAlg {
        self.alg
    }

    pub(crate) fn pkey(&self) -> &PKey<Public> {
        &self.pkey
    }

    pub fn from_material(material: &Curve25519KeyMaterial) -> Result<Self, CryptoError> {
        Self::from_raw(material.alg, &material.public)
    }
}

impl Key for Curve25519PrivateKey {
    fn size(&self) -> usize {
        CURVE25519_KEY_SIZE
    }
}

impl Key for Curve25519PublicKey {
    fn size(&self) -> usize {
        CURVE25519_KEY_SIZE
    }
}

impl PublicKey for Curve25519PublicKey {}

impl PrivateKey for Curve25519PrivateKey {
    type PublicKey = Curve25519PublicKey;
}

impl ImportableKey for Curve25519PrivateKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&Curve25519KeyMaterial::decode(bytes)?)
    }
}

impl ImportableKey for Curve25519PublicKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&Curve25519KeyMaterial::decode(bytes)?)
    }
}

impl ExportableKey for Curve25519PrivateKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let blob = self.to_material()?.encode()?;
        match bytes {
            None => Ok(blob.len()),
            Some(bytes) => copy_out(&blob, bytes),
        }
    }
}
