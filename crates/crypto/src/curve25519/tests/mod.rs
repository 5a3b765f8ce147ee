// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

fn generate(alg: KeyAlg) -> KeyBlob {
    curve25519_generate_key(&KeySpec::new(alg, 256)).expect("Failed to generate key")
}

fn public_of(blob: &[u8]) -> Vec<u8> {
    curve25519_get_public_key(blob).expect("Failed to extract public key")
}

fn raw_public(blob: &[u8]) -> Vec<u8> {
    Curve25519KeyMaterial::decode(blob)
        .expect("Failed to decode blob")
        .public
}

/// Little-endian encoding of a small `y` with the given sign bit.
fn encode_y(y: u8, x_sign: bool) -> [u8; 32] {
    let mut encoded = [0u8; 32];
    encoded[0] = y;
    if x_sign {
        encoded[31] |= 0x80;
    }
    encoded
}

#[test]
fn test_curve25519_generated_blob_layout() {
    for alg in [KeyAlg::X25519, KeyAlg::Ed25519] {
        let blob = generate(alg);
        let material = Curve25519KeyMaterial::decode(&blob).expect("Failed to decode blob");
        assert_eq!(material.alg, alg);
        assert_eq!(material.key_size, 256);
        assert_eq!(material.public.len(), 32);
        assert_eq!(material.private.len(), 32);

        let public = public_of(&blob);
        let material = Curve25519KeyMaterial::decode(&public).expect("Failed to decode blob");
        assert!(material.is_public_only());
        assert_eq!(curve25519_get_public_key(&public), Ok(public));
    }
}

#[test]
fn test_curve25519_invalid_key_length() {
    for bits in [0, 255, 512] {
        assert_eq!(
            curve25519_generate_key(&KeySpec::new(KeyAlg::Ed25519, bits)).err(),
            Some(CryptoError::InvalidKeyLength)
        );
    }
}

#[test]
fn test_ed25519_sign_verify_and_mutations() {
    let private = generate(KeyAlg::Ed25519);
    let public = public_of(&private);
    let usage = UsageSpec::new(KeyAlg::Ed25519);
    let message = b"device attestation challenge";

    let mut signature = [0u8; 80];
    let len = ed25519_sign(&private, &usage, message, &mut signature).expect("Failed to sign");
    assert_eq!(len, ED25519_SIGNATURE_SIZE);
    let signature = &signature[..len];
    assert_eq!(ed25519_verify(&public, &usage, message, signature), Ok(()));

    for i in 0..message.len() {
        let mut tampered = message.to_vec();
        tampered[i] ^= 0x01;
        assert_eq!(
            ed25519_verify(&public, &usage, &tampered, signature),
            Err(CryptoError::SignatureVerifyFailed)
        );
    }
    for i in 0..signature.len() {
        let mut bad = signature.to_vec();
        bad[i] ^= 0x80;
        assert_eq!(
            ed25519_verify(&public, &usage, message, &bad),
            Err(CryptoError::SignatureVerifyFailed)
        );
    }
    assert_eq!(
        ed25519_verify(&public, &usage, message, &signature[..63]),
        Err(CryptoError::SignatureVerifyFailed)
    );
}

#[test]
fn test_ed25519_sign_parameter_checks() {
    let private = generate(KeyAlg::Ed25519);
    let usage = UsageSpec::new(KeyAlg::Ed25519);

    let mut short = [0u8; 63];
    assert_eq!(
        ed25519_sign(&private, &usage, b"msg", &mut short),
        Err(CryptoError::BufferTooSmall)
    );

    let x_private = generate(KeyAlg::X25519);
    assert_eq!(
        ed25519_sign(&x_private, &usage, b"msg", &mut [0u8; 64]),
        Err(CryptoError::KeyBlobAlgorithmMismatch)
    );

    let public = public_of(&private);
    assert_eq!(
        ed25519_sign(&public, &usage, b"msg", &mut [0u8; 64]),
        Err(CryptoError::KeyBlobMissingComponent)
    );

    assert_eq!(
        ed25519_sign(&private, &UsageSpec::new(KeyAlg::Ecc), b"msg", &mut [0u8; 64]),
        Err(CryptoError::UnsupportedAlgorithm)
    );
}

#[test]
fn test_ed25519_rejects_mismatched_public_half() {
    let blob = generate(KeyAlg::Ed25519);
    let mut material = Curve25519KeyMaterial::decode(&blob).expect("Failed to decode blob");
    material.public = raw_public(&generate(KeyAlg::Ed25519));
    let forged = material.encode().expect("Failed to encode blob");
    assert_eq!(
        ed25519_sign(&forged, &UsageSpec::new(KeyAlg::Ed25519), b"msg", &mut [0u8; 64]),
        Err(CryptoError::KeyImportFailed)
    );
}

#[test]
fn test_x25519_agreement_is_symmetric() {
    let spec = KeySpec::new(KeyAlg::X25519, 256);
    let alice = generate(KeyAlg::X25519);
    let bob = generate(KeyAlg::X25519);

    let mut ab = [0u8; 32];
    let mut ba = [0u8; 32];
    x25519_agree_key(&alice, &public_of(&bob), &spec, &mut ab).expect("Failed to agree");
    x25519_agree_key(&bob, &public_of(&alice), &spec, &mut ba).expect("Failed to agree");
    assert_eq!(ab, ba);
    assert_ne!(ab, [0u8; 32]);

    let mut short = [0u8; 31];
    assert_eq!(
        x25519_agree_key(&alice, &public_of(&bob), &spec, &mut short),
        Err(CryptoError::BufferTooSmall)
    );
    assert_eq!(
        x25519_agree_key(&alice, &public_of(&generate(KeyAlg::Ed25519)), &spec, &mut ab),
        Err(CryptoError::KeyBlobAlgorithmMismatch)
    );
}

#[test]
fn test_converted_keys_are_consistent() {
    for _ in 0..8 {
        let blob = generate(KeyAlg::Ed25519);
        let material = Curve25519KeyMaterial::decode(&blob).expect("Failed to decode blob");

        let scalar = ed25519_private_to_x25519(&material.private).expect("Failed to convert seed");
        assert_eq!(scalar[0] & 0x07, 0);
        assert_eq!(scalar[31] & 0xc0, 0x40);

        let x_private = Curve25519PrivateKey::from_raw(KeyAlg::X25519, &scalar)
            .expect("Failed to import scalar");
        let expected = x_private.raw_public().expect("Failed to derive public key");
        let converted = ed25519_public_to_x25519(&material.public).expect("Failed to convert point");
        assert_eq!(converted, expected);
    }
}

#[test]
fn test_ed25519_agreement_is_symmetric() {
    let spec = KeySpec::new(KeyAlg::Ed25519, 256);
    let a = generate(KeyAlg::Ed25519);
    let b = generate(KeyAlg::Ed25519);

    let mut ab = [0u8; 32];
    let mut ba = [0u8; 32];
    ed25519_agree_key(&a, &public_of(&b), &spec, &mut ab).expect("Failed to agree");
    ed25519_agree_key(&b, &public_of(&a), &spec, &mut ba).expect("Failed to agree");
    assert_eq!(ab, ba);

    // Same secret as X25519 over the converted pairs.
    let seed = Curve25519KeyMaterial::decode(&a).expect("Failed to decode blob").private;
    let scalar = ed25519_private_to_x25519(&seed).expect("Failed to convert seed");
    let point = ed25519_public_to_x25519(&raw_public(&b)).expect("Failed to convert point");
    let x_private = Curve25519PrivateKey::from_raw(KeyAlg::X25519, &scalar)
        .expect("Failed to import scalar");
    let x_peer = Curve25519PublicKey::from_raw(KeyAlg::X25519, &point).expect("Failed to import point");
    let mut direct = [0u8; 32];
    X25519Algo
        .agree(&x_private, &x_peer, Some(&mut direct))
        .expect("Failed to agree");
    assert_eq!(ab, direct);

    let public_a = public_of(&a);
    assert_eq!(
        ed25519_agree_key(&public_a, &public_of(&b), &spec, &mut ab),
        Err(CryptoError::KeyBlobMissingComponent)
    );
}

#[test]
fn test_public_conversion_edge_points() {
    // y = 0 is on the curve (x^2 = -1 is a square) and maps to u = 1.
    let converted = ed25519_public_to_x25519(&encode_y(0, false)).expect("Failed to convert point");
    assert_eq!(converted, encode_y(1, false));

    // y = 1 is the identity.
    assert_eq!(
        ed25519_public_to_x25519(&encode_y(1, false)),
        Err(CryptoError::Ed25519PointInvalid)
    );
    assert_eq!(
        ed25519_public_to_x25519(&encode_y(1, true)),
        Err(CryptoError::Ed25519PointInvalid)
    );

    // y = p is not reduced.
    let mut unreduced = [0xffu8; 32];
    unreduced[0] = 0xed;
    unreduced[31] = 0x7f;
    assert_eq!(
        ed25519_public_to_x25519(&unreduced),
        Err(CryptoError::Ed25519PointInvalid)
    );

    assert_eq!(
        ed25519_public_to_x25519(&[0u8; 31]),
        Err(CryptoError::Ed25519PointInvalid)
    );
}

#[test]
fn test_public_conversion_rejects_off_curve_y() {
    // About half of all y values have no matching x.
    let rejected = (2u8..64)
        .filter(|&y| ed25519_public_to_x25519(&encode_y(y, false)).is_err())
        .count();
    assert!(rejected > 0);
    assert!(rejected < 62);
}
