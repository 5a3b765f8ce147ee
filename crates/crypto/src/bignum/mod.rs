// Copyright (C) Microsoft Corporation. All rights reserved.

//! Big-number modular exponentiation.
//!
//! Operands are unsigned big-endian byte strings. The result is written
//! left-padded with zeros to the full length of the caller's buffer.

use openssl::bn::BigNum;
use openssl::bn::BigNumContext;
use openssl::bn::BigNumRef;
use zeroize::Zeroizing;

use super::*;

/// Computes `x = a^e mod n`.
///
/// # Arguments
///
/// * `x` - Output buffer; receives the result left-padded to `x.len()`.
/// * `a` - Base.
/// * `e` - Exponent.
/// * `n` - Modulus; must be non-zero.
///
/// # Errors
///
/// - [`CryptoError::BnModulusZero`] if `n` is zero
/// - [`CryptoError::BufferTooSmall`] if the result does not fit in `x`
/// - [`CryptoError::BnFailed`] if the provider fails
#[tracing::instrument(skip_all, fields(n_len = n.len(), x_len = x.len()))]
pub fn bn_exp_mod(x: &mut [u8], a: &[u8], e: &[u8], n: &[u8]) -> Result<(), CryptoError> {
    let bn_n = bn_from_slice(n)?;
    if bn_n.num_bits() == 0 {
        tracing::error!("modulus is zero");
        Err(CryptoError::BnModulusZero)?;
    }
    let bn_a = bn_from_slice(a)?;
    let bn_e = bn_from_slice(e)?;

    let mut ctx = BigNumContext::new().map_err(bn_failed)?;
    let mut result = BigNum::new().map_err(bn_failed)?;
    result
        .mod_exp(&bn_a, &bn_e, &bn_n, &mut ctx)
        .map_err(bn_failed)?;

    let needed = result.num_bytes() as usize;
    if needed > x.len() {
        tracing::error!(needed, "modexp result does not fit output");
        Err(CryptoError::BufferTooSmall)?;
    }

    let padded = bn_to_padded(&result, x.len())?;
    x.copy_from_slice(&padded);
    Ok(())
}

/// Imports an unsigned big-endian integer.
pub(crate) fn bn_from_slice(bytes: &[u8]) -> Result<BigNum, CryptoError> {
    BigNum::from_slice(bytes).map_err(bn_failed)
}

fn bn_failed(openssl_error_stack: openssl::error::ErrorStack) -> CryptoError {
    tracing::error!(?openssl_error_stack);
    CryptoError::BnFailed
}

/// Exports `bn` big-endian, left-padded to `len` bytes, into a zeroizing buffer.
///
/// # Errors
///
/// Returns [`CryptoError::BufferTooSmall`] if `bn` needs more than `len` bytes.
pub(crate) fn bn_to_padded(bn: &BigNumRef, len: usize) -> Result<KeyBlob, CryptoError> {
    let len = i32::try_from(len).map_err(|_| CryptoError::BufferTooSmall)?;
    bn.to_vec_padded(len)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::BufferTooSmall)
}

#[cfg(test)]
mod tests;
