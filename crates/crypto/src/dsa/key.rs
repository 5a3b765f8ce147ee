// Copyright (C) Microsoft Corporation. All rights reserved.

//! DSA keys built from [`DsaKeyMaterial`] blobs.

use openssl::bn::BigNum;
use openssl::dsa::Dsa;
use openssl::dsa::DsaRef;
use openssl::pkey::HasParams;
use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::pkey::Public;

use super::*;

/// Key size from which `x` and `q` widen from 20 to 32 bytes.
pub const DSA_LARGE_KEY_BITS: u32 = 2048;

/// Byte length of `x` and `q` for a key of `bits` bits.
pub fn dsa_small_component_size(bits: u32) -> usize {
    if bits < DSA_LARGE_KEY_BITS {
        20
    } else {
        32
    }
}

fn import_error(openssl_error_stack: openssl::error::ErrorStack) -> CryptoError {
    tracing::error!(?openssl_error_stack);
    CryptoError::KeyImportFailed
}

fn bn(bytes: &[u8]) -> Result<BigNum, CryptoError> {
    if bytes.is_empty() {
        Err(CryptoError::KeyBlobMissingComponent)?;
    }
    BigNum::from_slice(bytes).map_err(import_error)
}

/// Public part of the material: `(y, p, q, g)` padded to their field sizes.
fn public_components<T: HasParams>(
    bits: u32,
    dsa: &DsaRef<T>,
    y: &openssl::bn::BigNumRef,
) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>), CryptoError> {
    let wide = bits as usize / 8;
    let narrow = dsa_small_component_size(bits);
    Ok((
        bn_to_padded(y, wide)?.to_vec(),
        bn_to_padded(dsa.p(), wide)?.to_vec(),
        bn_to_padded(dsa.q(), narrow)?.to_vec(),
        bn_to_padded(dsa.g(), wide)?.to_vec(),
    ))
}

/// DSA private key.
#[derive(Clone)]
pub struct DsaPrivateKey {
    bits: u32,
    pkey: PKey<Private>,
}

/// DSA public key.
#[derive(Clone)]
pub struct DsaPublicKey {
    bits: u32,
    pkey: PKey<Public>,
}

impl DsaPrivateKey {
    pub(crate) fn pkey(&self) -> &PKey<Private> {
        &self.pkey
    }

    /// Builds the key from decoded material.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyBlobMissingComponent`] for public-only material.
    pub fn from_material(material: &DsaKeyMaterial) -> Result<Self, CryptoError> {
        let dsa = Dsa::from_private_components(
            bn(&material.p)?,
            bn(&material.q)?,
            bn(&material.g)?,
            bn(&material.x)?,
            bn(&material.y)?,
        )
        .map_err(import_error)?;
        let pkey = PKey::from_dsa(dsa).map_err(import_error)?;
        Ok(Self {
            bits: material.key_size,
            pkey,
        })
    }

    /// Writes the key back into blob form.
    pub fn to_material(&self) -> Result<DsaKeyMaterial, CryptoError> {
        let dsa = self.pkey.dsa().map_err(import_error)?;
        let (y, p, q, g) = public_components(self.bits, &*dsa, dsa.pub_key())?;
        Ok(DsaKeyMaterial {
            key_size: self.bits,
            x: bn_to_padded(dsa.priv_key(), dsa_small_component_size(self.bits))?,
            y,
            p,
            q,
            g,
        })
    }
}

impl DsaPublicKey {
    pub(crate) fn pkey(&self) -> &PKey<Public> {
        &self.pkey
    }

    /// Builds the key from the public components of decoded material.
    pub fn from_material(material: &DsaKeyMaterial) -> Result<Self, CryptoError> {
        let dsa = Dsa::from_public_components(
            bn(&material.p)?,
            bn(&material.q)?,
            bn(&material.g)?,
            bn(&material.y)?,
        )
        .map_err(import_error)?;
        let pkey = PKey::from_dsa(dsa).map_err(import_error)?;
        Ok(Self {
            bits: material.key_size,
            pkey,
        })
    }
}

impl Key for DsaPrivateKey {
    fn size(&self) -> usize {
        self.bits as usize / 8
    }
}

impl Key for DsaPublicKey {
    fn size(&self) -> usize {
        self.bits as usize / 8
    }
}

impl PublicKey for DsaPublicKey {}

impl PrivateKey for DsaPrivateKey {
    type PublicKey = DsaPublicKey;
}

impl ImportableKey for DsaPrivateKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&DsaKeyMaterial::decode(bytes)?)
    }
}

impl ImportableKey for DsaPublicKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&DsaKeyMaterial::decode(bytes)?)
    }
}

impl ExportableKey for DsaPrivateKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let blob = self.to_material()?.encode()?;
        match bytes {
            None => Ok(blob.len()),
            Some(bytes) => copy_out(&blob, bytes),
        }
    }
}

impl KeyGenerationOp for DsaPrivateKey {
    type Key = Self;

    /// Generates fresh domain parameters and a key pair.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if `bits` is zero or not a
    /// multiple of 8.
    fn generate(bits: usize) -> Result<Self::Key, CryptoError> {
        if bits == 0 || bits % 8 != 0 {
            tracing::error!(bits, "DSA key length must be a multiple of 8");
            Err(CryptoError::InvalidKeyLength)?;
        }
        let bits = u32::try_from(bits).map_err(|_| CryptoError::InvalidKeyLength)?;
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::KeyGenFailed
        };
        let dsa = Dsa::generate(bits).map_err(fail)?;
        let pkey = PKey::from_dsa(dsa).map_err(fail)?;
        Ok(Self { bits, pkey })
    }
}
