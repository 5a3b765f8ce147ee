// Copyright (C) Microsoft Corporation. All rights reserved.

//! DH keys over the RFC 3526 MODP groups.

use openssl::bn::BigNum;
use openssl::dh::Dh;
use openssl::dh::DhRef;
use openssl::pkey::Params;
use openssl::pkey::Private;

use super::*;

/// Generator shared by every MODP group.
const DH_GENERATOR: u32 = 2;

/// RFC 3526 MODP group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DhGroup {
    Modp2048,
    Modp3072,
    Modp4096,
}

impl DhGroup {
    /// Selects the group from a key length in bits.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] unless `bits` is 2048, 3072
    /// or 4096.
    pub fn from_bits(bits: u32) -> Result<Self, CryptoError> {
        let group = match bits {
            2048 => DhGroup::Modp2048,
            3072 => DhGroup::Modp3072,
            4096 => DhGroup::Modp4096,
            bits => {
                tracing::error!(bits, "unsupported DH group size");
                Err(CryptoError::InvalidKeyLength)?
            }
        };
        Ok(group)
    }

    pub fn bits(self) -> u32 {
        match self {
            DhGroup::Modp2048 => 2048,
            DhGroup::Modp3072 => 3072,
            DhGroup::Modp4096 => 4096,
        }
    }

    /// Byte length of the prime, of every key value and of the shared secret.
    pub fn size(self) -> usize {
        self.bits() as usize / 8
    }

    pub(crate) fn params(self) -> Result<Dh<Params>, openssl::error::ErrorStack> {
        let p = match self {
            DhGroup::Modp2048 => BigNum::get_rfc3526_prime_2048()?,
            DhGroup::Modp3072 => BigNum::get_rfc3526_prime_3072()?,
            DhGroup::Modp4096 => BigNum::get_rfc3526_prime_4096()?,
        };
        Dh::from_pqg(p, None, BigNum::from_u32(DH_GENERATOR)?)
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

/// DH key pair.
pub struct DhPrivateKey {
    group: DhGroup,
    dh: Dh<Private>,
}

/// DH public value.
pub struct DhPublicKey {
    group: DhGroup,
    value: BigNum,
}

impl DhPrivateKey {
    pub fn group(&self) -> DhGroup {
        self.group
    }

    pub(crate) fn dh(&self) -> &DhRef<Private> {
        &self.dh
    }

    /// Builds the key pair from decoded material.
    pub fn from_material(material: &DhKeyMaterial) -> Result<Self, CryptoError> {
        let group = DhGroup::from_bits(material.key_size)?;
        let public = bn(&material.public)?;
        let private = bn(&material.private)?;
        let dh = group
            .params()
            .and_then(|params| params.set_key(public, private))
            .map_err(import_error)?;
        Ok(Self { group, dh })
    }

    /// Writes the key pair back into blob form.
    pub fn to_material(&self) -> Result<DhKeyMaterial, CryptoError> {
        let size = self.group.size();
        Ok(DhKeyMaterial {
            key_size: self.group.bits(),
            public: bn_to_padded(self.dh.public_key(), size)?.to_vec(),
            private: bn_to_padded(self.dh.private_key(), size)?,
        })
    }
}

impl DhPublicKey {
    pub fn group(&self) -> DhGroup {
        self.group
    }

    pub(crate) fn value(&self) -> &openssl::bn::BigNumRef {
        &self.value
    }

    /// Reads the public value of decoded material.
    pub fn from_material(material: &DhKeyMaterial) -> Result<Self, CryptoError> {
        Ok(Self {
            group: DhGroup::from_bits(material.key_size)?,
            value: bn(&material.public)?,
        })
    }
}

impl Key for DhPrivateKey {
    fn size(&self) -> usize {
        self.group.size()
    }
}

impl Key for DhPublicKey {
    fn size(&self) -> usize {
        self.group.size()
    }
}

impl PublicKey for DhPublicKey {}

impl PrivateKey for DhPrivateKey {
    type PublicKey = DhPublicKey;
}

impl ImportableKey for DhPrivateKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&DhKeyMaterial::decode(bytes)?)
    }
}

impl ImportableKey for DhPublicKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_material(&DhKeyMaterial::decode(bytes)?)
    }
}

impl ExportableKey for DhPrivateKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let blob = self.to_material()?.encode()?;
        match bytes {
            None => Ok(blob.len()),
            Some(bytes) => copy_out(&blob, bytes),
        }
    }
}

impl KeyGenerationOp for DhPrivateKey {
    type Key = Self;

    fn generate(bits: usize) -> Result<Self::Key, CryptoError> {
        let bits = u32::try_from(bits).map_err(|_| CryptoError::InvalidKeyLength)?;
        let group = DhGroup::from_bits(bits)?;
        let dh = group
            .params()
            .and_then(|params| params.generate_key())
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                CryptoError::KeyGenFailed
            })?;
        Ok(Self { group, dh })
    }
}
