// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

fn generate(bits: u32) -> KeyBlob {
    dh_generate_key(&KeySpec::new(KeyAlg::Dh, bits)).expect("Failed to generate DH key")
}

fn agree(private: &[u8], peer: &[u8], bits: u32) -> Result<Vec<u8>, CryptoError> {
    let mut shared = vec![0u8; 512];
    let len = dh_agree_key(private, peer, &KeySpec::new(KeyAlg::Dh, bits), &mut shared)?;
    shared.truncate(len);
    Ok(shared)
}

#[test]
fn test_dh_generated_blob_layout() {
    let blob = generate(2048);
    let material = DhKeyMaterial::decode(&blob).expect("Failed to decode DH blob");
    assert_eq!(material.key_size, 2048);
    assert_eq!(material.public.len(), 256);
    assert_eq!(material.private.len(), 256);

    let public = dh_get_public_key(&blob).expect("Failed to extract public key");
    let material = DhKeyMaterial::decode(&public).expect("Failed to decode public blob");
    assert!(material.is_public_only());
    assert_eq!(dh_get_public_key(&public), Ok(public));
}

#[test]
fn test_dh_agreement_is_symmetric() {
    let alice = generate(2048);
    let bob = generate(2048);
    let alice_public = dh_get_public_key(&alice).expect("Failed to extract public key");
    let bob_public = dh_get_public_key(&bob).expect("Failed to extract public key");

    let ab = agree(&alice, &bob_public, 2048).expect("Failed to agree");
    let ba = agree(&bob, &alice_public, 2048).expect("Failed to agree");
    assert_eq!(ab.len(), 256);
    assert_eq!(ab, ba);

    // A shorter request yields a prefix of the full secret.
    let prefix = agree(&alice, &bob_public, 256).expect("Failed to agree");
    assert_eq!(prefix, ab[..32]);
}

#[test]
fn test_dh_request_larger_than_group() {
    let alice = generate(2048);
    let bob_public = dh_get_public_key(&generate(2048)).expect("Failed to extract public key");
    let err = agree(&alice, &bob_public, 3072).expect_err("Oversized request accepted");
    assert_eq!(err, CryptoError::DhSharedSecretTooShort);
    assert_eq!(err.kind(), ErrorKind::InvalidKeySize);
}

#[test]
fn test_dh_agree_parameter_checks() {
    let alice = generate(2048);
    let bob_public = dh_get_public_key(&generate(2048)).expect("Failed to extract public key");

    assert_eq!(
        agree(&alice, &bob_public, 0),
        Err(CryptoError::InvalidKeyLength)
    );

    let mut short = [0u8; 16];
    assert_eq!(
        dh_agree_key(&alice, &bob_public, &KeySpec::new(KeyAlg::Dh, 256), &mut short),
        Err(CryptoError::BufferTooSmall)
    );

    assert_eq!(
        dh_agree_key(&alice, &bob_public, &KeySpec::new(KeyAlg::Ecdh, 256), &mut [0u8; 32]),
        Err(CryptoError::UnsupportedAlgorithm)
    );

    // A public-only blob cannot act as the local key.
    let alice_public = dh_get_public_key(&alice).expect("Failed to extract public key");
    assert_eq!(
        agree(&alice_public, &bob_public, 256),
        Err(CryptoError::KeyBlobMissingComponent)
    );
}

#[test]
fn test_dh_group_mismatch() {
    let alice = generate(2048);
    let bob_public = dh_get_public_key(&generate(3072)).expect("Failed to extract public key");
    assert_eq!(
        agree(&alice, &bob_public, 256),
        Err(CryptoError::AgreeFailed)
    );
}

#[test]
fn test_dh_invalid_group_size() {
    for bits in [0, 1024, 2047, 8192] {
        assert_eq!(
            dh_generate_key(&KeySpec::new(KeyAlg::Dh, bits)).err(),
            Some(CryptoError::InvalidKeyLength)
        );
    }
}
