// Copyright (C) Microsoft Corporation. All rights reserved.

//! OpenSSL-backed hash algorithms.

use openssl::hash::Hasher;
use openssl::hash::MessageDigest;
use openssl::md::Md;
use openssl::md::MdRef;

use super::*;

/// Maps a [`Digest`] onto the OpenSSL message digest.
///
/// # Errors
///
/// Returns [`CryptoError::UnsupportedDigest`] for [`Digest::None`].
pub(crate) fn message_digest(digest: Digest) -> Result<MessageDigest, CryptoError> {
    let md = match digest {
        Digest::Md5 => MessageDigest::md5(),
        Digest::Sha1 => MessageDigest::sha1(),
        Digest::Sha224 => MessageDigest::sha224(),
        Digest::Sha256 => MessageDigest::sha256(),
        Digest::Sha384 => MessageDigest::sha384(),
        Digest::Sha512 => MessageDigest::sha512(),
        Digest::None => Err(CryptoError::UnsupportedDigest)?,
    };
    Ok(md)
}

/// Maps a [`Digest`] onto the OpenSSL `EVP_MD` used by `MdCtx` and `PkeyCtx`.
pub(crate) fn md(digest: Digest) -> Result<&'static MdRef, CryptoError> {
    let md = match digest {
        Digest::Md5 => Md::md5(),
        Digest::Sha1 => Md::sha1(),
        Digest::Sha224 => Md::sha224(),
        Digest::Sha256 => Md::sha256(),
        Digest::Sha384 => Md::sha384(),
        Digest::Sha512 => Md::sha512(),
        Digest::None => Err(CryptoError::UnsupportedDigest)?,
    };
    Ok(md)
}

/// Hash algorithm bound to one digest.
#[derive(Clone, Copy)]
pub struct HashAlgo {
    digest: Digest,
    md: MessageDigest,
}

impl HashAlgo {
    /// Creates the algorithm for `digest`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedDigest`] for [`Digest::None`].
    pub fn new(digest: Digest) -> Result<Self, CryptoError> {
        let md = message_digest(digest)?;
        Ok(Self { digest, md })
    }

    /// Digest identifier.
    pub fn digest(&self) -> Digest {
        self.digest
    }

    /// Digest size in bytes.
    pub fn size(&self) -> usize {
        self.md.size()
    }

    /// Hashes `data` into a new vector.
    pub fn hash_vec(&mut self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = vec![0u8; self.size()];
        let len = self.hash(data, Some(&mut out))?;
        out.truncate(len);
        Ok(out)
    }
}

impl HashOp for HashAlgo {
    fn hash(&mut self, data: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let size = self.size();
        let Some(output) = output else {
            return Ok(size);
        };
        if output.len() < size {
            Err(CryptoError::BufferTooSmall)?;
        }

        let digest = openssl::hash::hash(self.md, data).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::HashFailed
        })?;
        output[..size].copy_from_slice(&digest);
        Ok(size)
    }
}

impl HashStreamingOp for HashAlgo {
    type Context = HashAlgoContext;

    fn hash_init(self) -> Result<Self::Context, CryptoError> {
        let hasher = Hasher::new(self.md).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::HashFailed
        })?;
        Ok(HashAlgoContext { algo: self, hasher })
    }
}

/// Streaming hash context wrapping an OpenSSL `Hasher`.
pub struct HashAlgoContext {
    algo: HashAlgo,
    hasher: Hasher,
}

impl HashAlgoContext {
    /// Digest size in bytes.
    pub fn size(&self) -> usize {
        self.algo.size()
    }
}

impl HashOpContext for HashAlgoContext {
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.hasher.update(data).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::HashFailed
        })
    }

    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let size = self.size();
        let Some(output) = output else {
            return Ok(size);
        };
        if output.len() < size {
            Err(CryptoError::BufferTooSmall)?;
        }

        let digest = self.hasher.finish().map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::HashFailed
        })?;
        output[..size].copy_from_slice(&digest);
        Ok(size)
    }
}
