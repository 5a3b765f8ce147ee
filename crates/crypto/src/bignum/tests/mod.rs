// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[test]
fn test_exp_mod_small() {
    // 4^13 mod 497 = 445
    let mut x = [0u8; 2];
    bn_exp_mod(&mut x, &[4], &[13], &[0x01, 0xF1]).expect("Failed to compute modexp");
    assert_eq!(u16::from_be_bytes(x), 445);
}

#[test]
fn test_exp_mod_left_pads_output() {
    // 3^2 mod 1000 = 9, written into a 4-byte buffer
    let mut x = [0xFFu8; 4];
    bn_exp_mod(&mut x, &[3], &[2], &[0x03, 0xE8]).expect("Failed to compute modexp");
    assert_eq!(x, [0, 0, 0, 9]);
}

#[test]
fn test_exp_mod_zero_modulus() {
    let mut x = [0u8; 4];
    let err = bn_exp_mod(&mut x, &[3], &[2], &[0, 0]).expect_err("zero modulus must fail");
    assert_eq!(err, CryptoError::BnModulusZero);
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = bn_exp_mod(&mut x, &[3], &[2], &[]).expect_err("empty modulus must fail");
    assert_eq!(err, CryptoError::BnModulusZero);
}

#[test]
fn test_exp_mod_output_too_small() {
    // 2^16 mod 2^20 = 65536 needs three bytes
    let mut x = [0u8; 2];
    let err = bn_exp_mod(&mut x, &[2], &[16], &[0x10, 0x00, 0x00])
        .expect_err("undersized output must fail");
    assert_eq!(err, CryptoError::BufferTooSmall);
}
