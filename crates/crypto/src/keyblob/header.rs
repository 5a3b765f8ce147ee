// Copyright (C) Microsoft Corporation. All rights reserved.

//! Header and component framing shared by every blob family.

use super::*;

const FIELD_SIZE: usize = std::mem::size_of::<u32>();

/// Reads the first `N` little-endian `u32` header fields.
pub(super) fn read_header<const N: usize>(blob: &[u8]) -> Result<[u32; N], CryptoError> {
    if blob.len() < N * FIELD_SIZE {
        tracing::error!(len = blob.len(), header = N * FIELD_SIZE, "key blob too short");
        Err(CryptoError::KeyBlobTooShort)?;
    }

    let mut fields = [0u32; N];
    for (field, chunk) in fields.iter_mut().zip(blob.chunks_exact(FIELD_SIZE)) {
        let mut raw = [0u8; FIELD_SIZE];
        raw.copy_from_slice(chunk);
        *field = u32::from_le_bytes(raw);
    }
    Ok(fields)
}

/// Checks the algorithm tag against the family's accepted tags.
pub(super) fn expect_alg(tag: u32, accepted: &[KeyAlg]) -> Result<KeyAlg, CryptoError> {
    match KeyAlg::try_from(tag) {
        Ok(alg) if accepted.contains(&alg) => Ok(alg),
        _ => {
            tracing::error!(tag, ?accepted, "key blob algorithm mismatch");
            Err(CryptoError::KeyBlobAlgorithmMismatch)
        }
    }
}

/// Splits the payload after a `header_size`-byte header into components.
///
/// The blob length must equal `header_size` plus the sum of `sizes` exactly;
/// the check happens before any component is sliced.
pub(super) fn split_components<'a, const N: usize>(
    blob: &'a [u8],
    header_size: usize,
    sizes: [u32; N],
) -> Result<[&'a [u8]; N], CryptoError> {
    let declared = sizes.iter().try_fold(header_size, |total, size| {
        usize::try_from(*size)
            .ok()
            .and_then(|size| total.checked_add(size))
    });

    if declared != Some(blob.len()) {
        tracing::error!(len = blob.len(), ?declared, "key blob size mismatch");
        Err(CryptoError::KeyBlobSizeMismatch)?;
    }

    let empty: &[u8] = &[];
    let mut components = [empty; N];
    let mut rest = &blob[header_size..];
    for (component, size) in components.iter_mut().zip(sizes) {
        let (head, tail) = rest.split_at(size as usize);
        *component = head;
        rest = tail;
    }
    Ok(components)
}

/// Length of a component as a header field.
pub(super) fn field_len(component: &[u8]) -> Result<u32, CryptoError> {
    u32::try_from(component.len()).map_err(|_| CryptoError::KeyBlobComponentTooLarge)
}

/// Writes header fields followed by components into a new blob.
pub(super) fn write_blob(header: &[u32], components: &[&[u8]]) -> Result<KeyBlob, CryptoError> {
    let total = components
        .iter()
        .try_fold(header.len() * FIELD_SIZE, |total, c| total.checked_add(c.len()))
        .ok_or(CryptoError::KeyBlobComponentTooLarge)?;

    let mut blob = alloc_blob(total)?;
    let mut offset = 0;
    for field in header {
        blob[offset..offset + FIELD_SIZE].copy_from_slice(&field.to_le_bytes());
        offset += FIELD_SIZE;
    }
    for component in components {
        blob[offset..offset + component.len()].copy_from_slice(component);
        offset += component.len();
    }
    Ok(blob)
}

/// Formats private component sizes only, never their bytes.
pub(super) struct Redacted(pub usize);

impl std::fmt::Debug for Redacted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} bytes>", self.0)
    }
}
