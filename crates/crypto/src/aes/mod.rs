// Copyright (C) Microsoft Corporation. All rights reserved.

//! Symmetric cipher engine (AES).
//!
//! Modes: ECB, CBC, CTR and GCM with one-shot and streaming entry points,
//! plus one-shot CCM. Keys are raw 16, 24 or 32 byte strings.
//!
//! # Streaming
//!
//! ```text
//! Idle --init--> Ready --update*--> Ready --final--> Closed
//! ```
//!
//! [`aes_encrypt_init`]/[`aes_decrypt_init`] create a [`CryptoContext`].
//! [`aes_cipher_update`] emits whatever whole blocks are available (GCM and
//! CTR emit exactly the input length). [`aes_encrypt_final`] and
//! [`aes_decrypt_final`] take the context out of the handle, process the last
//! chunk, apply the padding policy and, for GCM, emit or verify the 16-byte
//! tag. One-shot [`aes_encrypt`]/[`aes_decrypt`] are init followed directly by
//! final.
//!
//! # Padding policy
//!
//! | Mode     | Padding       | IV / nonce        |
//! |----------|---------------|-------------------|
//! | ECB      | none or PKCS7 | -                 |
//! | CBC      | none or PKCS7 | 16 bytes          |
//! | CTR      | none          | 16 bytes          |
//! | GCM      | none          | at least 12 bytes |
//! | CCM      | none          | 7 to 13 bytes     |
//!
//! Unpadded ECB/CBC reject input that does not end on a block boundary.

mod block;
mod ccm;
mod cipher;
mod key;

use block::*;
pub use ccm::*;
pub use cipher::*;
pub use key::*;

use super::*;

/// Generate-key ability for [`KeyAlg::Aes`].
pub fn aes_generate_key(spec: &KeySpec) -> Result<KeyBlob, CryptoError> {
    if spec.alg != KeyAlg::Aes {
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    AesKey::generate(spec.key_len as usize)?.to_blob()
}

/// Encrypt ability.
///
/// # Arguments
///
/// * `key` - Raw AES key.
/// * `usage` - Mode, padding and parameters.
/// * `input` - Plaintext.
/// * `output` - Ciphertext buffer; must hold the padded length.
/// * `tag` - Receives the 16-byte tag for GCM and CCM; ignored otherwise.
///
/// # Returns
///
/// Ciphertext bytes written.
#[tracing::instrument(skip_all, fields(mode = ?usage.mode, len = input.len()))]
pub fn aes_encrypt(
    key: &[u8],
    usage: &UsageSpec,
    input: &[u8],
    output: &mut [u8],
    tag: &mut [u8],
) -> Result<usize, CryptoError> {
    check_usage_alg(usage)?;
    let key = AesKey::from_bytes(key)?;

    if usage.mode == Some(CipherMode::Ccm) {
        let mut algo = AesCcmAlgo::from_usage(usage)?;
        check_tag_buffer(tag)?;
        let written = algo.encrypt(&key, input, Some(output))?;
        copy_out(algo.tag(), tag)?;
        return Ok(written);
    }

    let mut handle = Some(init(&key, usage, Direction::Encrypt)?);
    aes_encrypt_final(&mut handle, input, output, tag)
}

/// Decrypt ability.
///
/// For AEAD modes the expected tag comes from the usage specification. On
/// any failure the output buffer holds no plaintext.
#[tracing::instrument(skip_all, fields(mode = ?usage.mode, len = input.len()))]
pub fn aes_decrypt(
    key: &[u8],
    usage: &UsageSpec,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, CryptoError> {
    check_usage_alg(usage)?;
    let key = AesKey::from_bytes(key)?;

    if usage.mode == Some(CipherMode::Ccm) {
        let mut algo = AesCcmAlgo::from_usage(usage)?;
        return algo.decrypt(&key, input, Some(output));
    }

    let mut handle = Some(init(&key, usage, Direction::Decrypt)?);
    aes_decrypt_final(&mut handle, input, output)
}

/// Encrypt-init ability.
pub fn aes_encrypt_init(key: &[u8], usage: &UsageSpec) -> Result<CryptoContext, CryptoError> {
    check_usage_alg(usage)?;
    init(&AesKey::from_bytes(key)?, usage, Direction::Encrypt)
}

/// Decrypt-init ability.
pub fn aes_decrypt_init(key: &[u8], usage: &UsageSpec) -> Result<CryptoContext, CryptoError> {
    check_usage_alg(usage)?;
    init(&AesKey::from_bytes(key)?, usage, Direction::Decrypt)
}

/// Encrypt-update and decrypt-update ability.
///
/// # Returns
///
/// Bytes written to `output`.
pub fn aes_cipher_update(
    handle: &mut Option<CryptoContext>,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, CryptoError> {
    match context_mut(handle)? {
        CryptoContext::Cipher(context) => context.update(input, Some(output)),
        #[allow(unreachable_patterns)]
        _ => Err(CryptoError::ContextMismatch),
    }
}

/// Encrypt-final ability.
///
/// Consumes the context whether or not the call succeeds. For GCM the tag is
/// written to `tag`.
pub fn aes_encrypt_final(
    handle: &mut Option<CryptoContext>,
    input: &[u8],
    output: &mut [u8],
    tag: &mut [u8],
) -> Result<usize, CryptoError> {
    let mut context = take_cipher(handle, Direction::Encrypt)?;
    let gcm = context.mode() == CipherMode::Gcm;
    if gcm {
        check_tag_buffer(tag)?;
    }

    let written = context.finalize(input, output)?;
    if gcm {
        copy_out(context.tag(), tag)?;
    }
    Ok(written)
}

/// Decrypt-final ability.
///
/// Consumes the context whether or not the call succeeds. For GCM a tag
/// mismatch fails the call and zeroes the output written by this call.
pub fn aes_decrypt_final(
    handle: &mut Option<CryptoContext>,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, CryptoError> {
    let mut context = take_cipher(handle, Direction::Decrypt)?;
    context.finalize(input, output)
}

fn check_usage_alg(usage: &UsageSpec) -> Result<(), CryptoError> {
    if usage.alg != KeyAlg::Aes {
        tracing::error!(alg = ?usage.alg, "usage routed to AES engine");
        Err(CryptoError::UnsupportedAlgorithm)?;
    }
    Ok(())
}

fn check_tag_buffer(tag: &[u8]) -> Result<(), CryptoError> {
    if tag.len() < AES_TAG_SIZE {
        tracing::error!(len = tag.len(), "tag buffer too small");
        Err(CryptoError::BufferTooSmall)?;
    }
    Ok(())
}

fn init(key: &AesKey, usage: &UsageSpec, direction: Direction) -> Result<CryptoContext, CryptoError> {
    let context = AesCipherAlgo::from_usage(usage)?.cipher_init(key, direction)?;
    Ok(CryptoContext::Cipher(context))
}

fn take_cipher(
    handle: &mut Option<CryptoContext>,
    direction: Direction,
) -> Result<AesContext, CryptoError> {
    match take_context(handle)? {
        CryptoContext::Cipher(context) if context.direction() == direction => Ok(context),
        other => {
            tracing::error!(context = other.name(), ?direction, "cipher context mismatch");
            Err(CryptoError::ContextMismatch)
        }
    }
}

#[cfg(test)]
mod tests;
