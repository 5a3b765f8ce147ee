// Copyright (C) Microsoft Corporation. All rights reserved.

//! RSA keys built from [`RsaKeyMaterial`] blobs.

use openssl::bn::BigNum;
use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::pkey::Public;
use openssl::rsa::Rsa;
use openssl::rsa::RsaPrivateKeyBuilder;

use super::*;

/// Public exponent used for every generated key.
pub const RSA_PUBLIC_EXPONENT: u32 = 65537;

/// Modulus sizes accepted by key generation, in bits.
pub const RSA_KEY_SIZES: [usize; 6] = [512, 768, 1024, 2048, 3072, 4096];

fn import_error(openssl_error_stack: openssl::error::ErrorStack) -> CryptoError {
    tracing::error!(?openssl_error_stack);
    CryptoError::KeyImportFailed
}

/// RSA private key.
///
/// Only the modulus and the two exponents are carried; the provider runs
/// private operations without CRT parameters.
#[derive(Clone)]
pub struct RsaPrivateKey {
    pkey: PKey<Private>,
}

/// RSA public key.
#[derive(Clone)]
pub struct RsaPublicKey {
    pkey: PKey<Public>,
}

impl RsaPrivateKey {
    pub(crate) fn pkey(&self) -> &PKey<Private> {
        &self.pkey
    }

    /// Builds the key from decoded material.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RsaMissingPrivateExponent`] for public-only material.
    pub fn from_material(material: &RsaKeyMaterial) -> Result<Self, CryptoError> {
        if !material.has_private() {
            tracing::error!("RSA private operation with a public-only blob");
            Err(CryptoError::RsaMissingPrivateExponent)?;
        }
        let n = BigNum::from_slice(&material.n).map_err(import_error)?;
        let e = BigNum::from_slice(&material.e).map_err(import_error)?;
        let d = BigNum::from_slice(&material.d).map_err(import_error)?;
        let rsa = RsaPrivateKeyBuilder::new(n, e, d)
            .map_err(import_error)?
            .build();
        let pkey = PKey::from_rsa(rsa).map_err(import_error)?;
        Ok(Self { pkey })
    }

    /// Writes the key back into blob form.
    pub fn to_material(&self) -> Result<RsaKeyMaterial, CryptoError> {
        let rsa = self.pkey.rsa().map_err(import_error)?;
        let len = self.size();
        Ok(RsaKeyMaterial {
            key_size: self.bits() as u32,
            n: bn_to_padded(rsa.n(), len)?.to_vec(),
            e: rsa.e().to_vec(),
            d: bn_to_padded(rsa.d(), len)?,
        })
    }
}

impl RsaPublicKey {
    pub(crate) fn pkey(&self) -> &PKey<Public> {
        &self.pkey
    }

    /// Builds the key from the public components of decoded material.
    pub fn from_material(material: &RsaKeyMaterial) -> Result<Self, CryptoError> {
        let n = BigNum::from_slice(&material.n).map_err(import_error)?;
        let e = BigNum::from_slice(&material.e).map_err(import_error)?;
        let rsa = Rsa::from_public_components(n, e).map_err(import_error)?;
        let pkey = PKey::from_rsa(rsa).map_err(import_error)?;
        Ok(Self { pkey })
    }
}

impl Key for RsaPrivateKey {
    fn size(&self) -> usize {
        self.pkey.size()
    }

    fn bits(&self) -> usize {
        self.pkey.bits() as usize
    }
}

impl Key for RsaPublicKey {
    fn size(&self) -> usize {
        self.pkey.size()
    }

    fn bits(&self) -> usize {
        self.pkey.bits() as usize
    }
}

impl PublicKey for RsaPublicKey {}

impl PrivateKey for RsaPrivateKey {
    type PublicKey = RsaPublicKey;
}

impl ImportableKey for RsaPrivateKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&RsaKeyMaterial::decode(bytes)?)
    }
}

impl ImportableKey for RsaPublicKey {
    /// Accepts public-only and private blobs; only N and E are read.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&RsaKeyMaterial::decode(bytes)?)
    }
}

impl ExportableKey for RsaPrivateKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let blob = self.to_material()?.encode()?;
        match bytes {
            None => Ok(blob.len()),
            Some(bytes) => copy_out(&blob, bytes),
        }
    }
}

impl KeyGenerationOp for RsaPrivateKey {
    type Key = Self;

    /// Generates a key with a [`RSA_PUBLIC_EXPONENT`] exponent.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] unless `bits` is one of
    /// [`RSA_KEY_SIZES`].
    fn generate(bits: usize) -> Result<Self::Key, CryptoError> {
        if !RSA_KEY_SIZES.contains(&bits) {
            tracing::error!(bits, "unsupported RSA key size");
            Err(CryptoError::InvalidKeyLength)?;
        }
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::KeyGenFailed
        };
        let e = BigNum::from_u32(RSA_PUBLIC_EXPONENT).map_err(fail)?;
        let rsa = Rsa::generate_with_e(bits as u32, &e).map_err(fail)?;
        let pkey = PKey::from_rsa(rsa).map_err(fail)?;
        Ok(Self { pkey })
    }
}
