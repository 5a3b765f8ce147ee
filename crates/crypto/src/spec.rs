// Copyright (C) Microsoft Corporation. All rights reserved.

//! Operation specifications.
//!
//! Callers describe each operation with one of these immutable values:
//! [`KeySpec`] for key generation and agreement, [`UsageSpec`] for cipher and
//! signature operations, [`DeriveSpec`] for key derivation. Algorithm and
//! digest identifiers carry the stable numeric values used in key blobs.

use super::*;

/// Algorithm identifier.
///
/// The discriminants are the values written into key-blob headers and must
/// stay stable.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlg {
    Rsa = 1,
    Ecc = 2,
    Dsa = 3,
    Aes = 20,
    Hmac = 50,
    Hkdf = 51,
    Pbkdf2 = 52,
    Ecdh = 100,
    X25519 = 101,
    Ed25519 = 102,
    Dh = 103,
}

impl KeyAlg {
    /// Wire value of the identifier.
    pub fn id(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for KeyAlg {
    type Error = CryptoError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        let alg = match value {
            1 => KeyAlg::Rsa,
            2 => KeyAlg::Ecc,
            3 => KeyAlg::Dsa,
            20 => KeyAlg::Aes,
            50 => KeyAlg::Hmac,
            51 => KeyAlg::Hkdf,
            52 => KeyAlg::Pbkdf2,
            100 => KeyAlg::Ecdh,
            101 => KeyAlg::X25519,
            102 => KeyAlg::Ed25519,
            103 => KeyAlg::Dh,
            other => Err(CryptoError::UnknownAlgorithmId(other))?,
        };
        Ok(alg)
    }
}

/// Digest identifier.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Digest {
    /// No digest; the input is used as is.
    #[default]
    None = 0,
    Md5 = 1,
    Sha1 = 10,
    Sha224 = 11,
    Sha256 = 12,
    Sha384 = 13,
    Sha512 = 14,
}

impl Digest {
    /// Output length in bytes; zero for [`Digest::None`].
    pub fn size(self) -> usize {
        match self {
            Digest::None => 0,
            Digest::Md5 => 16,
            Digest::Sha1 => 20,
            Digest::Sha224 => 28,
            Digest::Sha256 => 32,
            Digest::Sha384 => 48,
            Digest::Sha512 => 64,
        }
    }

    /// Whether the digest belongs to the SHA-1/SHA-2 family.
    pub fn is_sha(self) -> bool {
        matches!(
            self,
            Digest::Sha1 | Digest::Sha224 | Digest::Sha256 | Digest::Sha384 | Digest::Sha512
        )
    }
}

impl TryFrom<u32> for Digest {
    type Error = CryptoError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        let digest = match value {
            0 => Digest::None,
            1 => Digest::Md5,
            10 => Digest::Sha1,
            11 => Digest::Sha224,
            12 => Digest::Sha256,
            13 => Digest::Sha384,
            14 => Digest::Sha512,
            other => Err(CryptoError::UnknownDigestId(other))?,
        };
        Ok(digest)
    }
}

/// Symmetric cipher mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    Ecb,
    Cbc,
    Ctr,
    Gcm,
    Ccm,
}

/// Padding scheme for block ciphers and RSA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Padding {
    #[default]
    None,
    Oaep,
    Pss,
    Pkcs1V1_5,
    Pkcs7,
}

/// Direction of a cipher operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Key generation and agreement specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    /// Algorithm of the key.
    pub alg: KeyAlg,
    /// Requested key length in bits.
    pub key_len: u32,
}

impl KeySpec {
    pub fn new(alg: KeyAlg, key_len: u32) -> Self {
        Self { alg, key_len }
    }

    /// Key length rounded up to whole bytes.
    pub fn key_bytes(&self) -> usize {
        (self.key_len as usize).div_ceil(8)
    }
}

/// Block-mode parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherParam {
    pub iv: Vec<u8>,
}

/// AEAD parameters.
///
/// On decrypt `tag` carries the expected tag; on encrypt it is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AeadParam {
    pub nonce: Vec<u8>,
    pub aad: Vec<u8>,
    pub tag: Vec<u8>,
}

/// Mode-specific parameter block of a [`UsageSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UsageParam {
    #[default]
    None,
    Cipher(CipherParam),
    Aead(AeadParam),
}

/// Usage specification for cipher and signature operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSpec {
    pub alg: KeyAlg,
    pub mode: Option<CipherMode>,
    pub padding: Padding,
    pub digest: Digest,
    pub param: UsageParam,
}

impl UsageSpec {
    /// Creates a specification with no mode, no padding and no digest.
    pub fn new(alg: KeyAlg) -> Self {
        Self {
            alg,
            mode: None,
            padding: Padding::None,
            digest: Digest::None,
            param: UsageParam::None,
        }
    }

    pub fn with_mode(mut self, mode: CipherMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_digest(mut self, digest: Digest) -> Self {
        self.digest = digest;
        self
    }

    pub fn with_iv(mut self, iv: &[u8]) -> Self {
        self.param = UsageParam::Cipher(CipherParam { iv: iv.to_vec() });
        self
    }

    pub fn with_aead(mut self, nonce: &[u8], aad: &[u8], tag: &[u8]) -> Self {
        self.param = UsageParam::Aead(AeadParam {
            nonce: nonce.to_vec(),
            aad: aad.to_vec(),
            tag: tag.to_vec(),
        });
        self
    }

    /// IV of a block-mode specification.
    pub fn iv(&self) -> Option<&[u8]> {
        match &self.param {
            UsageParam::Cipher(param) => Some(&param.iv),
            _ => None,
        }
    }

    /// Parameters of an AEAD specification.
    pub fn aead(&self) -> Option<&AeadParam> {
        match &self.param {
            UsageParam::Aead(param) => Some(param),
            _ => None,
        }
    }
}

/// Key derivation specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveSpec {
    /// [`KeyAlg::Hkdf`] or [`KeyAlg::Pbkdf2`].
    pub alg: KeyAlg,
    pub digest: Digest,
    pub salt: Vec<u8>,
    /// HKDF context info; unused by PBKDF2.
    pub info: Vec<u8>,
    /// PBKDF2 iteration count; unused by HKDF.
    pub iterations: u32,
}

impl DeriveSpec {
    pub fn hkdf(digest: Digest, salt: &[u8], info: &[u8]) -> Self {
        Self {
            alg: KeyAlg::Hkdf,
            digest,
            salt: salt.to_vec(),
            info: info.to_vec(),
            iterations: 0,
        }
    }

    pub fn pbkdf2(digest: Digest, salt: &[u8], iterations: u32) -> Self {
        Self {
            alg: KeyAlg::Pbkdf2,
            digest,
            salt: salt.to_vec(),
            info: Vec::new(),
            iterations,
        }
    }
}
