// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

fn unhex(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Failed to parse hex"))
        .collect()
}

#[test]
fn test_hkdf_rfc5869_case1() {
    let ikm = [0x0bu8; 22];
    let salt: Vec<u8> = (0x00..=0x0c).collect();
    let info: Vec<u8> = (0xf0..=0xf9).collect();
    let spec = DeriveSpec::hkdf(Digest::Sha256, &salt, &info);

    let mut okm = [0u8; 42];
    let len = kdf_derive_key(&ikm, &spec, &mut okm).expect("Failed to derive");
    assert_eq!(len, 42);
    assert_eq!(
        okm.to_vec(),
        unhex(
            "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf34007208d5b887185865"
        )
    );
}

#[test]
fn test_hkdf_output_prefix_and_info_binding() {
    let ikm = [0x42u8; 32];
    let mut long = [0u8; 64];
    let mut short = [0u8; 16];
    let spec = DeriveSpec::hkdf(Digest::Sha384, b"salt", b"context A");
    kdf_derive_key(&ikm, &spec, &mut long).expect("Failed to derive");
    kdf_derive_key(&ikm, &spec, &mut short).expect("Failed to derive");
    assert_eq!(short, long[..16]);

    let mut other = [0u8; 16];
    let spec = DeriveSpec::hkdf(Digest::Sha384, b"salt", b"context B");
    kdf_derive_key(&ikm, &spec, &mut other).expect("Failed to derive");
    assert_ne!(short, other);
}

#[test]
fn test_hkdf_parameter_checks() {
    let ikm = [0x42u8; 32];
    let spec = DeriveSpec::hkdf(Digest::Sha256, b"", b"");

    assert_eq!(
        kdf_derive_key(&ikm, &spec, &mut []),
        Err(CryptoError::KdfInvalidParameter)
    );
    let mut too_long = vec![0u8; 255 * 32 + 1];
    assert_eq!(
        kdf_derive_key(&ikm, &spec, &mut too_long),
        Err(CryptoError::KdfInvalidParameter)
    );
    let mut max = vec![0u8; 255 * 32];
    assert_eq!(kdf_derive_key(&ikm, &spec, &mut max), Ok(255 * 32));

    let md5 = DeriveSpec::hkdf(Digest::Md5, b"", b"");
    assert_eq!(
        kdf_derive_key(&ikm, &md5, &mut [0u8; 16]),
        Err(CryptoError::UnsupportedDigest)
    );
    assert_eq!(
        kdf_derive_key(&[], &spec, &mut [0u8; 16]),
        Err(CryptoError::InvalidKeyLength)
    );
}

#[test]
fn test_pbkdf2_rfc6070_vectors() {
    for (iterations, expected) in [
        (1, "0c60c80f961f0e71f3a9b524af6012062fe037a6"),
        (2, "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"),
    ] {
        let spec = DeriveSpec::pbkdf2(Digest::Sha1, b"salt", iterations);
        let mut dk = [0u8; 20];
        kdf_derive_key(b"password", &spec, &mut dk).expect("Failed to derive");
        assert_eq!(dk.to_vec(), unhex(expected));
    }
}

#[test]
fn test_pbkdf2_parameter_checks() {
    let zero = DeriveSpec::pbkdf2(Digest::Sha256, b"salt", 0);
    assert_eq!(
        kdf_derive_key(b"password", &zero, &mut [0u8; 32]),
        Err(CryptoError::KdfInvalidParameter)
    );

    let none = DeriveSpec::pbkdf2(Digest::None, b"salt", 1000);
    assert_eq!(
        kdf_derive_key(b"password", &none, &mut [0u8; 32]),
        Err(CryptoError::UnsupportedDigest)
    );

    let spec = DeriveSpec::pbkdf2(Digest::Sha512, b"salt", 1000);
    assert_eq!(
        kdf_derive_key(b"password", &spec, &mut []),
        Err(CryptoError::KdfInvalidParameter)
    );

    let mut spec = DeriveSpec::pbkdf2(Digest::Sha256, b"salt", 1);
    spec.alg = KeyAlg::Hmac;
    assert_eq!(
        kdf_derive_key(b"password", &spec, &mut [0u8; 32]),
        Err(CryptoError::UnsupportedAlgorithm)
    );
}
