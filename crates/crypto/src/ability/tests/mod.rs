// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[cfg(all(
    feature = "rsa",
    feature = "ecc",
    feature = "dsa",
    feature = "dh",
    feature = "curve25519"
))]
const ASYMMETRIC: [(KeyAlg, &[AbilityKind]); 7] = [
    (
        KeyAlg::Rsa,
        &[
            AbilityKind::GenerateKey,
            AbilityKind::GetPublicKey,
            AbilityKind::Sign,
            AbilityKind::Verify,
            AbilityKind::Encrypt,
            AbilityKind::Decrypt,
        ],
    ),
    (
        KeyAlg::Ecc,
        &[
            AbilityKind::GenerateKey,
            AbilityKind::GetPublicKey,
            AbilityKind::Sign,
            AbilityKind::Verify,
            AbilityKind::AgreeKey,
        ],
    ),
    (
        KeyAlg::Ecdh,
        &[AbilityKind::GenerateKey, AbilityKind::GetPublicKey, AbilityKind::AgreeKey],
    ),
    (
        KeyAlg::Dsa,
        &[
            AbilityKind::GenerateKey,
            AbilityKind::GetPublicKey,
            AbilityKind::Sign,
            AbilityKind::Verify,
        ],
    ),
    (
        KeyAlg::Dh,
        &[AbilityKind::GenerateKey, AbilityKind::GetPublicKey, AbilityKind::AgreeKey],
    ),
    (
        KeyAlg::X25519,
        &[AbilityKind::GenerateKey, AbilityKind::GetPublicKey, AbilityKind::AgreeKey],
    ),
    (
        KeyAlg::Ed25519,
        &[
            AbilityKind::GenerateKey,
            AbilityKind::GetPublicKey,
            AbilityKind::Sign,
            AbilityKind::Verify,
            AbilityKind::AgreeKey,
        ],
    ),
];

#[test]
fn test_initialize_is_idempotent() {
    let first = initialize();
    let second = initialize();
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, abilities()));
    assert!(!first.is_empty());
}

#[test]
fn test_registered_entries_match_their_key() {
    let table = abilities();
    for id in table.ids() {
        let ability = table.get(id.kind, id.alg).expect("Failed to look up ability");
        assert_eq!(ability.kind(), id.kind);
    }
}

#[test]
fn test_unkeyed_abilities_registered() {
    let table = abilities();
    for kind in [
        AbilityKind::Hash,
        AbilityKind::HashInit,
        AbilityKind::HashUpdate,
        AbilityKind::HashFinal,
        AbilityKind::HashFree,
        AbilityKind::FillRandom,
        AbilityKind::BnExpMod,
    ] {
        assert!(table.contains(kind, None), "{kind:?} missing");
    }
}

#[cfg(all(
    feature = "rsa",
    feature = "ecc",
    feature = "dsa",
    feature = "dh",
    feature = "curve25519"
))]
#[test]
fn test_asymmetric_abilities_registered() {
    let table = abilities();
    for (alg, kinds) in ASYMMETRIC {
        for kind in kinds {
            assert!(table.contains(*kind, Some(alg)), "{kind:?} for {alg:?} missing");
        }
    }
}

#[cfg(all(feature = "aes", feature = "hmac", feature = "kdf"))]
#[test]
fn test_symmetric_abilities_registered() {
    let table = abilities();
    for kind in [
        AbilityKind::GenerateKey,
        AbilityKind::Encrypt,
        AbilityKind::Decrypt,
        AbilityKind::EncryptInit,
        AbilityKind::EncryptUpdate,
        AbilityKind::EncryptFinal,
        AbilityKind::EncryptFree,
        AbilityKind::DecryptInit,
        AbilityKind::DecryptUpdate,
        AbilityKind::DecryptFinal,
        AbilityKind::DecryptFree,
    ] {
        assert!(table.contains(kind, Some(KeyAlg::Aes)), "{kind:?} missing");
    }
    for kind in [
        AbilityKind::GenerateKey,
        AbilityKind::Hmac,
        AbilityKind::HmacInit,
        AbilityKind::HmacUpdate,
        AbilityKind::HmacFinal,
        AbilityKind::HmacFree,
    ] {
        assert!(table.contains(kind, Some(KeyAlg::Hmac)), "{kind:?} missing");
    }
    assert!(table.contains(AbilityKind::DeriveKey, Some(KeyAlg::Hkdf)));
    assert!(table.contains(AbilityKind::DeriveKey, Some(KeyAlg::Pbkdf2)));
}

#[test]
fn test_unsupported_pair_is_not_supported() {
    let table = abilities();
    let err = table
        .get(AbilityKind::Sign, Some(KeyAlg::Dh))
        .expect_err("DH sign must not be registered");
    assert_eq!(err, CryptoError::AbilityNotSupported);
    assert_eq!(err.kind(), ErrorKind::NotSupported);

    assert!(table.encrypt(KeyAlg::Ecdh).is_err());
    assert!(table.derive_key(KeyAlg::Rsa).is_err());
    assert!(!table.contains(AbilityKind::Hash, Some(KeyAlg::Aes)));
}

#[test]
fn test_dispatch_hash_through_registry() {
    let table = abilities();
    let hash = table.hash().expect("Failed to look up hash");
    let mut one_shot = [0u8; 32];
    hash(Digest::Sha256, b"abc", &mut one_shot).expect("Failed to hash");

    let init = table.hash_init().expect("Failed to look up hash init");
    let update = table.hash_update().expect("Failed to look up hash update");
    let finish = table.hash_final().expect("Failed to look up hash final");
    let mut handle = Some(init(Digest::Sha256).expect("Failed to init"));
    update(&mut handle, b"a").expect("Failed to update");
    let mut streamed = [0u8; 32];
    finish(&mut handle, b"bc", &mut streamed).expect("Failed to finalize");
    assert_eq!(one_shot, streamed);
    assert!(handle.is_none());

    let fill = table.fill_random().expect("Failed to look up fill random");
    let mut buf = [0u8; 32];
    fill(&mut buf).expect("Failed to fill");
}

#[cfg(feature = "aes")]
#[test]
fn test_dispatch_aes_gcm_streaming_through_registry() {
    let table = abilities();
    let alg = KeyAlg::Aes;
    let generate = table.generate_key(alg).expect("Failed to look up generate");
    let encrypt_init = table.encrypt_init(alg).expect("Failed to look up encrypt init");
    let encrypt_update = table.encrypt_update(alg).expect("Failed to look up encrypt update");
    let encrypt_final = table.encrypt_final(alg).expect("Failed to look up encrypt final");
    let decrypt = table.decrypt(alg).expect("Failed to look up decrypt");
    let decrypt_init = table.decrypt_init(alg).expect("Failed to look up decrypt init");
    let decrypt_update = table.decrypt_update(alg).expect("Failed to look up decrypt update");
    let decrypt_free = table.decrypt_free(alg).expect("Failed to look up decrypt free");

    let key = generate(&KeySpec::new(alg, 256)).expect("Failed to generate key");
    let nonce = [7u8; 12];
    let plaintext = [0x5au8; 40];

    let usage = UsageSpec::new(alg)
        .with_mode(CipherMode::Gcm)
        .with_aead(&nonce, b"header", &[]);
    let mut handle = Some(encrypt_init(&key, &usage).expect("Failed to init"));
    let mut ciphertext = [0u8; 40];
    let mut tag = [0u8; 16];
    let written =
        encrypt_update(&mut handle, &plaintext[..16], &mut ciphertext).expect("Failed to update");
    encrypt_final(&mut handle, &plaintext[16..], &mut ciphertext[written..], &mut tag)
        .expect("Failed to finalize");
    assert!(handle.is_none());

    let usage = UsageSpec::new(alg)
        .with_mode(CipherMode::Gcm)
        .with_aead(&nonce, b"header", &tag);
    let mut recovered = [0u8; 40];
    let len = decrypt(&key, &usage, &ciphertext, &mut recovered).expect("Failed to decrypt");
    assert_eq!(recovered[..len], plaintext);

    let mut handle = Some(decrypt_init(&key, &usage).expect("Failed to init"));
    decrypt_free(&mut handle);
    assert!(handle.is_none());
    assert_eq!(
        decrypt_update(&mut handle, &ciphertext, &mut recovered),
        Err(CryptoError::ContextMissing)
    );
}

#[cfg(feature = "curve25519")]
#[test]
fn test_dispatch_ed25519_through_registry() {
    let table = abilities();
    let alg = KeyAlg::Ed25519;
    let generate = table.generate_key(alg).expect("Failed to look up generate");
    let get_public = table.get_public_key(alg).expect("Failed to look up get public");
    let sign = table.sign(alg).expect("Failed to look up sign");
    let verify = table.verify(alg).expect("Failed to look up verify");

    let private = generate(&KeySpec::new(alg, 256)).expect("Failed to generate key");
    let public = get_public(&private).expect("Failed to extract public key");

    let usage = UsageSpec::new(alg);
    let mut signature = [0u8; 64];
    sign(&private, &usage, b"msg", &mut signature).expect("Failed to sign");
    assert_eq!(verify(&public, &usage, b"msg", &signature), Ok(()));
    assert_eq!(
        verify(&public, &usage, b"msh", &signature),
        Err(CryptoError::SignatureVerifyFailed)
    );
}
