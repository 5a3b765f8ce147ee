// Copyright (C) Microsoft Corporation. All rights reserved.

//! Ed25519 to X25519 conversion.
//!
//! Edwards25519 `-x^2 + y^2 = 1 + d x^2 y^2` and Curve25519
//! `v^2 = u^3 + 486662 u^2 + u` are birationally equivalent over
//! GF(p), p = 2^255 - 19, through `u = (1 + y) / (1 - y)`.
//!
//! Public keys convert through the map. Private keys convert through the
//! RFC 8032 secret scalar: SHA-512 of the seed, low half, clamped. Both
//! routes land on the same Montgomery point, so X25519 agreement over
//! converted keys is symmetric.

use openssl::bn::BigNum;
use openssl::bn::BigNumContext;
use openssl::bn::BigNumRef;
use openssl::error::ErrorStack;

use super::*;

/// Numerator magnitude of the Edwards constant `d = -121665 / 121666`.
const EDWARDS_D_NUM: u32 = 121665;
/// Denominator of the Edwards constant.
const EDWARDS_D_DEN: u32 = 121666;

/// Arithmetic modulo p = 2^255 - 19.
struct Field {
    p: BigNum,
    /// p - 2, the inversion exponent.
    p_minus_2: BigNum,
    /// (p - 1) / 2, the Euler criterion exponent.
    half: BigNum,
    ctx: BigNumContext,
}

impl Field {
    fn new() -> Result<Self, ErrorStack> {
        let mut p = BigNum::new()?;
        p.set_bit(255)?;
        p.sub_word(19)?;

        let mut p_minus_2 = p.to_owned()?;
        p_minus_2.sub_word(2)?;

        let mut p_minus_1 = p.to_owned()?;
        p_minus_1.sub_word(1)?;
        let mut half = BigNum::new()?;
        half.rshift1(&p_minus_1)?;

        Ok(Self {
            p,
            p_minus_2,
            half,
            ctx: BigNumContext::new()?,
        })
    }

    fn add(&mut self, a: &BigNumRef, b: &BigNumRef) -> Result<BigNum, ErrorStack> {
        let mut r = BigNum::new()?;
        r.mod_add(a, b, &self.p, &mut self.ctx)?;
        Ok(r)
    }

    fn sub(&mut self, a: &BigNumRef, b: &BigNumRef) -> Result<BigNum, ErrorStack> {
        let mut r = BigNum::new()?;
        r.mod_sub(a, b, &self.p, &mut self.ctx)?;
        Ok(r)
    }

    fn mul(&mut self, a: &BigNumRef, b: &BigNumRef) -> Result<BigNum, ErrorStack> {
        let mut r = BigNum::new()?;
        r.mod_mul(a, b, &self.p, &mut self.ctx)?;
        Ok(r)
    }

    fn pow(&mut self, a: &BigNumRef, e: &BigNumRef) -> Result<BigNum, ErrorStack> {
        let mut r = BigNum::new()?;
        r.mod_exp(a, e, &self.p, &mut self.ctx)?;
        Ok(r)
    }

    /// Inverse by Fermat: `a^(p-2)`. Zero maps to zero.
    fn inv(&mut self, a: &BigNumRef) -> Result<BigNum, ErrorStack> {
        let e = self.p_minus_2.to_owned()?;
        self.pow(a, &e)
    }

    /// Whether `a` is a non-zero square, by Euler's criterion.
    fn is_square(&mut self, a: &BigNumRef) -> Result<bool, ErrorStack> {
        let e = self.half.to_owned()?;
        let legendre = self.pow(a, &e)?;
        Ok(legendre == BigNum::from_u32(1)?)
    }

    fn d(&mut self) -> Result<BigNum, ErrorStack> {
        let zero = BigNum::new()?;
        let num = self.sub(&zero, &BigNum::from_u32(EDWARDS_D_NUM)? as &BigNumRef)?;
        let den = self.inv(&BigNum::from_u32(EDWARDS_D_DEN)? as &BigNumRef)?;
        self.mul(&num, &den)
    }

    /// `x^2 = (y^2 - 1) / (d y^2 + 1)` on the Edwards curve.
    fn edwards_x2(&mut self, y: &BigNumRef) -> Result<BigNum, ErrorStack> {
        let one = BigNum::from_u32(1)?;
        let y2 = self.mul(y, y)?;
        let num = self.sub(&y2, &one)?;
        let d = self.d()?;
        let dy2 = self.mul(&d, &y2)?;
        let den = self.add(&dy2, &one)?;
        let den_inv = self.inv(&den)?;
        self.mul(&num, &den_inv)
    }

    /// `u = (1 + y) / (1 - y)`, or `None` for `y = 1`.
    fn montgomery_u(&mut self, y: &BigNumRef) -> Result<Option<BigNum>, ErrorStack> {
        let one = BigNum::from_u32(1)?;
        let one_minus_y = self.sub(&one, y)?;
        if one_minus_y.num_bits() == 0 {
            return Ok(None);
        }
        let one_plus_y = self.add(&one, y)?;
        let inv = self.inv(&one_minus_y)?;
        self.mul(&one_plus_y, &inv).map(Some)
    }
}

fn bn_error(openssl_error_stack: ErrorStack) -> CryptoError {
    tracing::error!(?openssl_error_stack);
    CryptoError::BnFailed
}

fn point_invalid(reason: &str) -> CryptoError {
    tracing::error!(reason, "Ed25519 point rejected");
    CryptoError::Ed25519PointInvalid
}

/// Converts an encoded Ed25519 public key into the X25519 public key of the
/// same point.
///
/// The low 255 bits carry `y` little-endian; the top bit is the sign of `x`.
///
/// # Errors
///
/// Returns [`CryptoError::Ed25519PointInvalid`] if the encoding is not 32
/// bytes, `y` is not reduced, no `x` satisfies the curve equation, the sign
/// bit is set for `x = 0`, or the point is the identity (which has no
/// Montgomery image).
pub fn ed25519_public_to_x25519(public: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut encoded: [u8; CURVE25519_KEY_SIZE] = public
        .try_into()
        .map_err(|_| point_invalid("encoding is not 32 bytes"))?;
    let x_sign = encoded[CURVE25519_KEY_SIZE - 1] >> 7;
    encoded[CURVE25519_KEY_SIZE - 1] &= 0x7f;
    encoded.reverse();

    let mut field = Field::new().map_err(bn_error)?;
    let y = BigNum::from_slice(&encoded).map_err(bn_error)?;
    if y.ucmp(&field.p) != std::cmp::Ordering::Less {
        Err(point_invalid("y not reduced"))?;
    }

    let x2 = field.edwards_x2(&y).map_err(bn_error)?;
    if x2.num_bits() == 0 {
        if x_sign == 1 {
            Err(point_invalid("negative zero x"))?;
        }
    } else if !field.is_square(&x2).map_err(bn_error)? {
        Err(point_invalid("not on curve"))?;
    }

    let Some(u) = field.montgomery_u(&y).map_err(bn_error)? else {
        return Err(point_invalid("identity"));
    };

    let mut out = bn_to_padded(&u, CURVE25519_KEY_SIZE)?.to_vec();
    out.reverse();
    Ok(out)
}

/// Converts a 32-byte Ed25519 seed into the clamped X25519 scalar.
///
/// The SHA-512 digest of the seed is wiped on every path.
///
/// # Errors
///
/// Returns [`CryptoError::KeyBlobMissingComponent`] if the seed is not 32
/// bytes.
pub fn ed25519_private_to_x25519(seed: &[u8]) -> Result<KeyBlob, CryptoError> {
    if seed.len() != CURVE25519_KEY_SIZE {
        tracing::error!(len = seed.len(), "Ed25519 seed must be 32 bytes");
        Err(CryptoError::KeyBlobMissingComponent)?;
    }
    let digest = Zeroizing::new(HashAlgo::new(Digest::Sha512)?.hash_vec(seed)?);
    let mut scalar = blob_from_slice(&digest[..CURVE25519_KEY_SIZE])?;
    scalar[0] &= 0xf8;
    scalar[CURVE25519_KEY_SIZE - 1] &= 0x7f;
    scalar[CURVE25519_KEY_SIZE - 1] |= 0x40;
    Ok(scalar)
}
