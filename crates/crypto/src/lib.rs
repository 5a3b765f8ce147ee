// Copyright (C) Microsoft Corporation. All rights reserved.

//! Crypto execution engine for device key management.
//!
//! The engine routes an (operation, algorithm) pair to a concrete
//! implementation and runs it over OpenSSL. It includes:
//!
//! - **Ability registry**: the process-wide dispatch table ([`abilities`])
//! - **Key-material codec**: the private binary layouts for RSA, ECC, DSA,
//!   DH and Curve25519 keys ([`RsaKeyMaterial`], [`EccKeyMaterial`], ...)
//! - **AES**: ECB, CBC, CTR and GCM with streaming Init/Update/Final, and
//!   one-shot CCM
//! - **Asymmetric**: RSA, ECDSA/ECDH, DSA, DH, X25519 and Ed25519
//! - **Curve25519 conversion**: Ed25519 to X25519 keys via the birational map
//! - **Hash and HMAC**: MD5 and the SHA-1/SHA-2 family
//! - **KDF**: HKDF and PBKDF2
//! - **RNG** and big-number modular exponentiation
//!
//! # Features
//!
//! Each algorithm family sits behind a cargo feature (`aes`, `hmac`, `rsa`,
//! `ecc`, `dsa`, `dh`, `curve25519`, `kdf`). Disabling one removes its
//! registry entries; lookups for it report [`ErrorKind::NotSupported`].

mod ability;
mod bignum;
mod context;
mod hash;
mod keyblob;
mod op;
mod rand;
mod secret;
mod spec;

#[cfg(feature = "aes")]
mod aes;
#[cfg(feature = "curve25519")]
mod curve25519;
#[cfg(feature = "dh")]
mod dh;
#[cfg(feature = "dsa")]
mod dsa;
#[cfg(feature = "ecc")]
mod ecc;
#[cfg(feature = "hmac")]
mod hmac;
#[cfg(feature = "kdf")]
mod kdf;
#[cfg(feature = "rsa")]
mod rsa;

pub use ability::*;
pub use bignum::*;
pub use context::*;
pub use hash::*;
pub use keyblob::*;
pub use op::*;
pub use rand::*;
pub use secret::*;
pub use spec::*;

#[cfg(feature = "aes")]
pub use aes::*;
#[cfg(feature = "curve25519")]
pub use curve25519::*;
#[cfg(feature = "dh")]
pub use dh::*;
#[cfg(feature = "dsa")]
pub use dsa::*;
#[cfg(feature = "ecc")]
pub use ecc::*;
#[cfg(feature = "hmac")]
pub use hmac::*;
#[cfg(feature = "kdf")]
pub use kdf::*;
#[cfg(feature = "rsa")]
pub use rsa::*;

use thiserror::Error;

/// Error type for every engine operation.
///
/// Variants are fine-grained so logs and tests can tell failures apart;
/// callers that only need the coarse classification use [`CryptoError::kind`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    // Argument errors
    /// The streaming handle holds no context (never initialised, finalised or freed).
    #[error("crypto context is missing or already released")]
    ContextMissing,
    /// The streaming handle holds a context of another operation family.
    #[error("crypto context belongs to a different operation")]
    ContextMismatch,
    /// The caller-supplied output buffer cannot hold the result.
    #[error("output buffer too small")]
    BufferTooSmall,
    /// The algorithm id is not handled by the engine it was routed to.
    #[error("algorithm not valid for this operation")]
    UnsupportedAlgorithm,
    /// The digest is not accepted by the algorithm.
    #[error("digest not supported by this algorithm")]
    UnsupportedDigest,
    /// The padding scheme is not accepted by the algorithm or mode.
    #[error("padding not supported by this algorithm")]
    UnsupportedPadding,
    /// The cipher mode is missing or not supported.
    #[error("cipher mode not supported")]
    UnsupportedMode,
    /// The usage specification lacks the parameter block the mode needs.
    #[error("usage parameter missing or of the wrong shape")]
    InvalidUsageParam,
    /// The requested key length is not valid for the algorithm.
    #[error("invalid key length")]
    InvalidKeyLength,
    /// Algorithm id not present in the id table.
    #[error("unknown algorithm id {0}")]
    UnknownAlgorithmId(u32),
    /// Digest id not present in the id table.
    #[error("unknown digest id {0}")]
    UnknownDigestId(u32),

    // AES errors
    /// AES key size is not 16, 24 or 32 bytes.
    #[error("AES invalid key size")]
    AesInvalidKeySize,
    /// AES IV is not one block long.
    #[error("AES invalid IV size")]
    AesInvalidIvSize,
    /// Input length is not a multiple of the block size and padding is off.
    #[error("AES input not block aligned")]
    AesUnalignedInput,
    /// GCM nonce is shorter than 12 bytes.
    #[error("AES-GCM invalid nonce size")]
    GcmInvalidNonceSize,
    /// AEAD tag is not 16 bytes.
    #[error("AES AEAD invalid tag size")]
    AeadInvalidTagSize,
    /// CCM nonce is outside 7..=13 bytes.
    #[error("AES-CCM invalid nonce size")]
    CcmInvalidNonceSize,
    /// AES encryption failed inside the provider.
    #[error("AES encryption failed")]
    AesEncryptFailed,
    /// AES decryption failed inside the provider (including bad padding).
    #[error("AES decryption failed")]
    AesDecryptFailed,
    /// The AEAD tag did not verify.
    #[error("AES AEAD tag mismatch")]
    AeadTagMismatch,

    // Digest and MAC errors
    /// Hashing failed inside the provider.
    #[error("hash operation failed")]
    HashFailed,
    /// HMAC key length is not a positive multiple of 8 bits.
    #[error("HMAC invalid key size")]
    HmacInvalidKeySize,
    /// HMAC computation failed inside the provider.
    #[error("HMAC operation failed")]
    HmacFailed,

    // Random and big-number errors
    /// Random number generation failed.
    #[error("random number generation failed")]
    RngFailed,
    /// Modular exponentiation with a zero modulus.
    #[error("big number modulus is zero")]
    BnModulusZero,
    /// Big-number arithmetic failed inside the provider.
    #[error("big number operation failed")]
    BnFailed,

    // Key-material errors
    /// Blob shorter than its header.
    #[error("key blob shorter than header")]
    KeyBlobTooShort,
    /// Blob length differs from header size plus declared component sizes.
    #[error("key blob length does not match declared sizes")]
    KeyBlobSizeMismatch,
    /// Blob algorithm tag does not belong to the expected family.
    #[error("key blob algorithm tag mismatch")]
    KeyBlobAlgorithmMismatch,
    /// A declared component exceeds the family limit.
    #[error("key blob component too large")]
    KeyBlobComponentTooLarge,
    /// A component required by the operation is absent.
    #[error("key blob missing required component")]
    KeyBlobMissingComponent,
    /// RSA decrypt or sign with a public-only blob.
    #[error("RSA private exponent missing")]
    RsaMissingPrivateExponent,

    // Asymmetric engine errors
    /// The provider rejected the key components.
    #[error("key import failed")]
    KeyImportFailed,
    /// Key generation failed inside the provider.
    #[error("key generation failed")]
    KeyGenFailed,
    /// RSA encryption failed inside the provider.
    #[error("RSA encryption failed")]
    RsaEncryptFailed,
    /// RSA decryption failed inside the provider.
    #[error("RSA decryption failed")]
    RsaDecryptFailed,
    /// Signature generation failed inside the provider.
    #[error("signing failed")]
    SignFailed,
    /// The signature did not verify.
    #[error("signature verification failed")]
    SignatureVerifyFailed,
    /// Key agreement failed inside the provider.
    #[error("key agreement failed")]
    AgreeFailed,
    /// The DH group is smaller than the requested shared secret.
    #[error("DH shared secret shorter than requested")]
    DhSharedSecretTooShort,
    /// Ed25519 public key is not a valid curve point.
    #[error("Ed25519 point invalid")]
    Ed25519PointInvalid,

    // KDF errors
    /// KDF parameters are invalid (zero iterations, empty output).
    #[error("KDF invalid parameter")]
    KdfInvalidParameter,
    /// Key derivation failed inside the provider.
    #[error("key derivation failed")]
    KdfFailed,

    // Resource and registry errors
    /// Local allocation failed.
    #[error("memory allocation failed")]
    OutOfMemory,
    /// The (operation, algorithm) pair is not registered in this build.
    #[error("ability not supported")]
    AbilityNotSupported,
}

/// Coarse classification of [`CryptoError`] shared with the caller-facing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input shape, unsupported parameters or undersized output.
    InvalidArgument,
    /// Key blob failed structural or semantic validation.
    InvalidKeyInfo,
    /// The primitive provider reported a failure.
    CryptoEngine,
    /// Local allocation failed.
    ResourceExhausted,
    /// The ability was never registered.
    NotSupported,
    /// Requested key size exceeds what the key provides.
    InvalidKeySize,
}

impl CryptoError {
    /// Maps the error to its taxonomy kind.
    pub fn kind(&self) -> ErrorKind {
        use CryptoError::*;

        match self {
            ContextMissing
            | ContextMismatch
            | BufferTooSmall
            | UnsupportedAlgorithm
            | UnsupportedDigest
            | UnsupportedPadding
            | UnsupportedMode
            | InvalidUsageParam
            | InvalidKeyLength
            | UnknownAlgorithmId(_)
            | UnknownDigestId(_)
            | AesInvalidKeySize
            | AesInvalidIvSize
            | AesUnalignedInput
            | GcmInvalidNonceSize
            | AeadInvalidTagSize
            | CcmInvalidNonceSize
            | HmacInvalidKeySize
            | BnModulusZero
            | KdfInvalidParameter => ErrorKind::InvalidArgument,

            KeyBlobTooShort
            | KeyBlobSizeMismatch
            | KeyBlobAlgorithmMismatch
            | KeyBlobComponentTooLarge
            | KeyBlobMissingComponent
            | RsaMissingPrivateExponent => ErrorKind::InvalidKeyInfo,

            AesEncryptFailed
            | AesDecryptFailed
            | AeadTagMismatch
            | HashFailed
            | HmacFailed
            | RngFailed
            | BnFailed
            | KeyImportFailed
            | KeyGenFailed
            | RsaEncryptFailed
            | RsaDecryptFailed
            | SignFailed
            | SignatureVerifyFailed
            | AgreeFailed
            | Ed25519PointInvalid
            | KdfFailed => ErrorKind::CryptoEngine,

            OutOfMemory => ErrorKind::ResourceExhausted,
            AbilityNotSupported => ErrorKind::NotSupported,
            DhSharedSecretTooShort => ErrorKind::InvalidKeySize,
        }
    }
}
