// Copyright (C) Microsoft Corporation. All rights reserved.

//! NIST prime-curve keys built from [`EccKeyMaterial`] blobs.

use openssl::bn::BigNum;
use openssl::bn::BigNumContext;
use openssl::ec::EcGroup;
use openssl::ec::EcKey;
use openssl::ec::EcKeyRef;
use openssl::nid::Nid;
use openssl::pkey::HasPublic;
use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::pkey::Public;

use super::*;

/// Supported curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EccCurve {
    P224,
    P256,
    P384,
    P521,
}

impl EccCurve {
    /// Selects the curve from a key length in bits.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] unless `bits` is 224, 256,
    /// 384 or 521.
    pub fn from_bits(bits: u32) -> Result<Self, CryptoError> {
        let curve = match bits {
            224 => EccCurve::P224,
            256 => EccCurve::P256,
            384 => EccCurve::P384,
            521 => EccCurve::P521,
            bits => {
                tracing::error!(bits, "unsupported ECC curve size");
                Err(CryptoError::InvalidKeyLength)?
            }
        };
        Ok(curve)
    }

    /// Field size in bits.
    pub fn bits(self) -> u32 {
        match self {
            EccCurve::P224 => 224,
            EccCurve::P256 => 256,
            EccCurve::P384 => 384,
            EccCurve::P521 => 521,
        }
    }

    /// Byte length of a coordinate, a scalar or an ECDH shared secret.
    pub fn coord_size(self) -> usize {
        (self.bits() as usize).div_ceil(8)
    }

    /// Largest DER-encoded ECDSA signature on this curve.
    pub fn max_signature_size(self) -> usize {
        // SEQUENCE of two INTEGERs, each possibly carrying a leading zero byte
        let body = 2 * (self.coord_size() + 3);
        body + if body < 128 { 2 } else { 3 }
    }

    fn nid(self) -> Nid {
        match self {
            EccCurve::P224 => Nid::SECP224R1,
            EccCurve::P256 => Nid::X9_62_PRIME256V1,
            EccCurve::P384 => Nid::SECP384R1,
            EccCurve::P521 => Nid::SECP521R1,
        }
    }

    fn group(self) -> Result<EcGroup, CryptoError> {
        EcGroup::from_curve_name(self.nid()).map_err(import_error)
    }
}

fn import_error(openssl_error_stack: openssl::error::ErrorStack) -> CryptoError {
    tracing::error!(?openssl_error_stack);
    CryptoError::KeyImportFailed
}

/// Rebuilds the public key of `material`, checking that the point is on the curve.
fn public_ec_key(curve: EccCurve, material: &EccKeyMaterial) -> Result<EcKey<Public>, CryptoError> {
    if material.x.is_empty() || material.y.is_empty() {
        Err(CryptoError::KeyBlobMissingComponent)?;
    }
    let group = curve.group()?;
    let x = BigNum::from_slice(&material.x).map_err(import_error)?;
    let y = BigNum::from_slice(&material.y).map_err(import_error)?;
    EcKey::from_public_key_affine_coordinates(&group, &x, &y).map_err(import_error)
}

/// Affine coordinates of the public point, each padded to the coordinate size.
fn coordinates<T: HasPublic>(
    curve: EccCurve,
    key: &EcKeyRef<T>,
) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    let mut ctx = BigNumContext::new().map_err(import_error)?;
    let mut x = BigNum::new().map_err(import_error)?;
    let mut y = BigNum::new().map_err(import_error)?;
    key.public_key()
        .affine_coordinates_gfp(key.group(), &mut x, &mut y, &mut ctx)
        .map_err(import_error)?;
    let len = curve.coord_size();
    Ok((bn_to_padded(&x, len)?.to_vec(), bn_to_padded(&y, len)?.to_vec()))
}

/// ECC private key.
#[derive(Clone)]
pub struct EccPrivateKey {
    curve: EccCurve,
    pkey: PKey<Private>,
}

/// ECC public key.
#[derive(Clone)]
pub struct EccPublicKey {
    curve: EccCurve,
    pkey: PKey<Public>,
}

impl EccPrivateKey {
    pub fn curve(&self) -> EccCurve {
        self.curve
    }

    pub(crate) fn pkey(&self) -> &PKey<Private> {
        &self.pkey
    }

    pub(crate) fn ec_key(&self) -> Result<EcKey<Private>, CryptoError> {
        self.pkey.ec_key().map_err(import_error)
    }

    /// Builds the key from decoded material.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::KeyBlobMissingComponent`] for public-only material
    /// - [`CryptoError::KeyImportFailed`] if the point or scalar is invalid
    pub fn from_material(material: &EccKeyMaterial) -> Result<Self, CryptoError> {
        let curve = EccCurve::from_bits(material.key_size)?;
        if material.z.is_empty() {
            tracing::error!("ECC private operation with a public-only blob");
            Err(CryptoError::KeyBlobMissingComponent)?;
        }
        let public = public_ec_key(curve, material)?;
        let group = curve.group()?;
        let z = BigNum::from_slice(&material.z).map_err(import_error)?;
        let key = EcKey::from_private_components(&group, &z, public.public_key())
            .map_err(import_error)?;
        key.check_key().map_err(import_error)?;
        let pkey = PKey::from_ec_key(key).map_err(import_error)?;
        Ok(Self { curve, pkey })
    }

    /// Writes the key back into blob form under `alg`.
    pub fn to_material(&self, alg: KeyAlg) -> Result<EccKeyMaterial, CryptoError> {
        let key = self.ec_key()?;
        let (x, y) = coordinates(self.curve, &key)?;
        Ok(EccKeyMaterial {
            alg,
            key_size: self.curve.bits(),
            x,
            y,
            z: bn_to_padded(key.private_key(), self.curve.coord_size())?,
        })
    }
}

impl EccPublicKey {
    pub fn curve(&self) -> EccCurve {
        self.curve
    }

    pub(crate) fn pkey(&self) -> &PKey<Public> {
        &self.pkey
    }

    pub(crate) fn ec_key(&self) -> Result<EcKey<Public>, CryptoError> {
        self.pkey.ec_key().map_err(import_error)
    }

    /// Builds the key from the public point of decoded material.
    pub fn from_material(material: &EccKeyMaterial) -> Result<Self, CryptoError> {
        let curve = EccCurve::from_bits(material.key_size)?;
        let key = public_ec_key(curve, material)?;
        let pkey = PKey::from_ec_key(key).map_err(import_error)?;
        Ok(Self { curve, pkey })
    }
}

impl Key for EccPrivateKey {
    fn size(&self) -> usize {
        self.curve.coord_size()
    }

    fn bits(&self) -> usize {
        self.curve.bits() as usize
    }
}

impl Key for EccPublicKey {
    fn size(&self) -> usize {
        self.curve.coord_size()
    }

    fn bits(&self) -> usize {
        self.curve.bits() as usize
    }
}

impl PublicKey for EccPublicKey {}

impl PrivateKey for EccPrivateKey {
    type PublicKey = EccPublicKey;
}

impl ImportableKey for EccPrivateKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&EccKeyMaterial::decode(bytes)?)
    }
}

impl ImportableKey for EccPublicKey {
    /// Accepts public-only and private blobs; only X and Y are read.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&EccKeyMaterial::decode(bytes)?)
    }
}

impl KeyGenerationOp for EccPrivateKey {
    type Key = Self;

    fn generate(bits: usize) -> Result<Self::Key, CryptoError> {
        let bits = u32::try_from(bits).map_err(|_| CryptoError::InvalidKeyLength)?;
        let curve = EccCurve::from_bits(bits)?;
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::KeyGenFailed
        };
        let group = EcGroup::from_curve_name(curve.nid()).map_err(fail)?;
        let key = EcKey::generate(&group).map_err(fail)?;
        let pkey = PKey::from_ec_key(key).map_err(fail)?;
        Ok(Self { curve, pkey })
    }
}
