// Copyright (C) Microsoft Corporation. All rights reserved.

//! Zeroizing buffers for key material.
//!
//! Every buffer that may hold private key bytes is a [`KeyBlob`]: the memory
//! is overwritten with zeros when the value is dropped, on success and error
//! paths alike. Buffers are allocated fallibly so an allocation failure is
//! reported as [`ErrorKind::ResourceExhausted`] instead of aborting.

mod key;

pub use key::*;
use zeroize::Zeroizing;

use super::*;

/// Owned key material that is wiped on drop.
pub type KeyBlob = Zeroizing<Vec<u8>>;

/// Allocates a zero-filled [`KeyBlob`] of `len` bytes.
///
/// # Errors
///
/// Returns [`CryptoError::OutOfMemory`] if the allocation fails.
pub fn alloc_blob(len: usize) -> Result<KeyBlob, CryptoError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| {
        tracing::error!(len, "key buffer allocation failed");
        CryptoError::OutOfMemory
    })?;
    buf.resize(len, 0);
    Ok(Zeroizing::new(buf))
}

/// Copies `bytes` into a freshly allocated [`KeyBlob`].
pub fn blob_from_slice(bytes: &[u8]) -> Result<KeyBlob, CryptoError> {
    let mut blob = alloc_blob(bytes.len())?;
    blob.copy_from_slice(bytes);
    Ok(blob)
}

/// Copies `src` into the front of `dst`.
///
/// # Errors
///
/// Returns [`CryptoError::BufferTooSmall`] without writing if `dst` is shorter
/// than `src`.
pub(crate) fn copy_out(src: &[u8], dst: &mut [u8]) -> Result<usize, CryptoError> {
    let Some(dst) = dst.get_mut(..src.len()) else {
        return Err(CryptoError::BufferTooSmall);
    };
    dst.copy_from_slice(src);
    Ok(src.len())
}

#[cfg(test)]
mod tests;
