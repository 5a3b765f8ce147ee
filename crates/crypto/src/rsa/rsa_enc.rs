// Copyright (C) Microsoft Corporation. All rights reserved.

//! RSA encryption and decryption: raw, PKCS#1 v1.5 and OAEP.

use openssl::encrypt::Decrypter;
use openssl::encrypt::Encrypter;
use openssl::hash::MessageDigest;
use openssl::rsa::Padding as RsaPadding;

use super::*;

/// RSA cipher configuration.
pub struct RsaEncryptAlgo {
    padding: RsaPadding,
    /// OAEP and MGF1 digest.
    oaep_md: Option<MessageDigest>,
}

impl RsaEncryptAlgo {
    /// Validates the padding and digest of a usage specification.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedPadding`] for PSS or PKCS7
    /// - [`CryptoError::UnsupportedDigest`] for OAEP without a digest
    pub fn from_usage(usage: &UsageSpec) -> Result<Self, CryptoError> {
        let algo = match usage.padding {
            Padding::None => Self {
                padding: RsaPadding::NONE,
                oaep_md: None,
            },
            Padding::Pkcs1V1_5 => Self {
                padding: RsaPadding::PKCS1,
                oaep_md: None,
            },
            Padding::Oaep => Self {
                padding: RsaPadding::PKCS1_OAEP,
                oaep_md: Some(message_digest(usage.digest)?),
            },
            padding => {
                tracing::error!(?padding, "padding not valid for RSA encryption");
                Err(CryptoError::UnsupportedPadding)?
            }
        };
        Ok(algo)
    }
}

impl EncryptOp for RsaEncryptAlgo {
    type Key = RsaPublicKey;

    fn encrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::RsaEncryptFailed
        };
        let mut encrypter = Encrypter::new(key.pkey()).map_err(fail)?;
        encrypter.set_rsa_padding(self.padding).map_err(fail)?;
        if let Some(md) = self.oaep_md {
            encrypter.set_rsa_oaep_md(md).map_err(fail)?;
            encrypter.set_rsa_mgf1_md(md).map_err(fail)?;
        }

        let len = encrypter.encrypt_len(input).map_err(fail)?;
        let Some(output) = output else {
            return Ok(len);
        };
        if output.len() < len {
            tracing::error!(needed = len, actual = output.len(), "RSA output buffer too small");
            Err(CryptoError::BufferTooSmall)?;
        }
        encrypter.encrypt(input, output).map_err(fail)
    }
}

impl DecryptOp for RsaEncryptAlgo {
    type Key = RsaPrivateKey;

    /// Decrypts through a zeroizing modulus-sized buffer, so `output` only
    /// needs to hold the recovered plaintext.
    fn decrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let fail = |openssl_error_stack: openssl::error::ErrorStack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::RsaDecryptFailed
        };
        let mut decrypter = Decrypter::new(key.pkey()).map_err(fail)?;
        decrypter.set_rsa_padding(self.padding).map_err(fail)?;
        if let Some(md) = self.oaep_md {
            decrypter.set_rsa_oaep_md(md).map_err(fail)?;
            decrypter.set_rsa_mgf1_md(md).map_err(fail)?;
        }

        let len = decrypter.decrypt_len(input).map_err(fail)?;
        let Some(output) = output else {
            return Ok(len);
        };
        let mut plain = alloc_blob(len)?;
        let written = decrypter.decrypt(input, &mut plain).map_err(fail)?;
        if output.len() < written {
            tracing::error!(needed = written, actual = output.len(), "RSA output buffer too small");
            Err(CryptoError::BufferTooSmall)?;
        }
        copy_out(&plain[..written], output)
    }
}
