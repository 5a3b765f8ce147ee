// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

// SP 800-38A F.1.1 / F.2.1 / F.5.1, first block.
const SP800_38A_KEY: [u8; 16] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
];
const SP800_38A_PT: [u8; 16] = [
    0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93, 0x17, 0x2a,
];
const SP800_38A_ECB_CT: [u8; 16] = [
    0x3a, 0xd7, 0x7b, 0xb4, 0x0d, 0x7a, 0x36, 0x60, 0xa8, 0x9e, 0xca, 0xf3, 0x24, 0x66, 0xef, 0x97,
];
const SP800_38A_CBC_IV: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];
const SP800_38A_CBC_CT: [u8; 16] = [
    0x76, 0x49, 0xab, 0xac, 0x81, 0x19, 0xb2, 0x46, 0xce, 0xe9, 0x8e, 0x9b, 0x12, 0xe9, 0x19, 0x7d,
];
const SP800_38A_CTR_IV: [u8; 16] = [
    0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xff,
];
const SP800_38A_CTR_CT: [u8; 16] = [
    0x87, 0x4d, 0x61, 0x91, 0xb6, 0x20, 0xe3, 0x26, 0x1b, 0xef, 0x68, 0x64, 0x99, 0x0d, 0xb6, 0xce,
];

// GCM specification test case 2: zero key, zero IV, one zero block.
const GCM_TC2_CT: [u8; 16] = [
    0x03, 0x88, 0xda, 0xce, 0x60, 0xb6, 0xa3, 0x92, 0xf3, 0x28, 0xc2, 0xb9, 0x71, 0xb2, 0xfe, 0x78,
];
const GCM_TC2_TAG: [u8; 16] = [
    0xab, 0x6e, 0x47, 0xd4, 0x2c, 0xec, 0x13, 0xbd, 0xf5, 0x3a, 0x67, 0xb2, 0x12, 0x57, 0xbd, 0xdf,
];

fn random(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    Rng::rand_bytes(&mut buf).expect("Failed to generate random bytes");
    buf
}

fn gcm_usage(nonce: &[u8], aad: &[u8], tag: &[u8]) -> UsageSpec {
    UsageSpec::new(KeyAlg::Aes)
        .with_mode(CipherMode::Gcm)
        .with_aead(nonce, aad, tag)
}

fn block_usage(mode: CipherMode, padding: Padding, iv: &[u8]) -> UsageSpec {
    let usage = UsageSpec::new(KeyAlg::Aes)
        .with_mode(mode)
        .with_padding(padding);
    if iv.is_empty() {
        usage
    } else {
        usage.with_iv(iv)
    }
}

fn encrypt_vec(key: &[u8], usage: &UsageSpec, input: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut output = vec![0u8; input.len() + AES_BLOCK_SIZE];
    let mut tag = vec![0u8; AES_TAG_SIZE];
    let len = aes_encrypt(key, usage, input, &mut output, &mut tag).expect("Failed to encrypt");
    output.truncate(len);
    (output, tag)
}

fn decrypt_vec(key: &[u8], usage: &UsageSpec, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut output = vec![0u8; input.len() + AES_BLOCK_SIZE];
    let len = aes_decrypt(key, usage, input, &mut output)?;
    output.truncate(len);
    Ok(output)
}

#[test]
fn test_aes_known_answers() {
    let ecb = block_usage(CipherMode::Ecb, Padding::None, &[]);
    assert_eq!(encrypt_vec(&SP800_38A_KEY, &ecb, &SP800_38A_PT).0, SP800_38A_ECB_CT);

    let cbc = block_usage(CipherMode::Cbc, Padding::None, &SP800_38A_CBC_IV);
    assert_eq!(encrypt_vec(&SP800_38A_KEY, &cbc, &SP800_38A_PT).0, SP800_38A_CBC_CT);

    let ctr = block_usage(CipherMode::Ctr, Padding::None, &SP800_38A_CTR_IV);
    assert_eq!(encrypt_vec(&SP800_38A_KEY, &ctr, &SP800_38A_PT).0, SP800_38A_CTR_CT);

    let gcm = gcm_usage(&[0; 12], &[], &[]);
    let (ct, tag) = encrypt_vec(&[0; 16], &gcm, &[0; 16]);
    assert_eq!(ct, GCM_TC2_CT);
    assert_eq!(tag, GCM_TC2_TAG);
}

#[test]
fn test_aes_gcm_256_round_trip() {
    let key = random(32);
    let nonce = random(12);
    let aad = random(16);
    let plaintext = random(37);

    let (ciphertext, tag) = encrypt_vec(&key, &gcm_usage(&nonce, &aad, &[]), &plaintext);
    assert_eq!(ciphertext.len(), 37);
    assert_ne!(ciphertext, plaintext);

    let decrypted = decrypt_vec(&key, &gcm_usage(&nonce, &aad, &tag), &ciphertext)
        .expect("Failed to decrypt");
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_aes_gcm_tamper_detected() {
    let key = random(32);
    let nonce = random(12);
    let aad = random(16);
    let plaintext = random(37);
    let (ciphertext, tag) = encrypt_vec(&key, &gcm_usage(&nonce, &aad, &[]), &plaintext);

    let mut bad_ct = ciphertext.clone();
    bad_ct[5] ^= 0x01;
    assert_eq!(
        decrypt_vec(&key, &gcm_usage(&nonce, &aad, &tag), &bad_ct),
        Err(CryptoError::AeadTagMismatch)
    );

    let mut bad_tag = tag.clone();
    bad_tag[15] ^= 0x80;
    assert_eq!(
        decrypt_vec(&key, &gcm_usage(&nonce, &aad, &bad_tag), &ciphertext),
        Err(CryptoError::AeadTagMismatch)
    );

    let mut bad_aad = aad.clone();
    bad_aad[0] ^= 0x01;
    assert_eq!(
        decrypt_vec(&key, &gcm_usage(&nonce, &bad_aad, &tag), &ciphertext),
        Err(CryptoError::AeadTagMismatch)
    );
}

#[test]
fn test_aes_gcm_failed_decrypt_zeroes_output() {
    let key = random(16);
    let nonce = random(12);
    let plaintext = [0x42u8; 32];
    let (ciphertext, mut tag) = encrypt_vec(&key, &gcm_usage(&nonce, &[], &[]), &plaintext);
    tag[0] ^= 0xFF;

    let mut output = [0u8; 32];
    let result = aes_decrypt(&key, &gcm_usage(&nonce, &[], &tag), &ciphertext, &mut output);
    assert_eq!(result, Err(CryptoError::AeadTagMismatch));
    assert_eq!(output, [0u8; 32]);
}

#[test]
fn test_aes_gcm_long_nonce() {
    let key = random(24);
    let nonce = random(16);
    let plaintext = random(40);
    let (ciphertext, tag) = encrypt_vec(&key, &gcm_usage(&nonce, b"hdr", &[]), &plaintext);
    let decrypted = decrypt_vec(&key, &gcm_usage(&nonce, b"hdr", &tag), &ciphertext)
        .expect("Failed to decrypt");
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_aes_gcm_parameter_checks() {
    let key = random(16);
    let mut out = [0u8; 32];
    let mut tag = [0u8; 16];
    assert_eq!(
        aes_encrypt(&key, &gcm_usage(&[0; 11], &[], &[]), &[0; 16], &mut out, &mut tag),
        Err(CryptoError::GcmInvalidNonceSize)
    );
    assert_eq!(
        aes_decrypt(&key, &gcm_usage(&[0; 12], &[], &[0; 12]), &[0; 16], &mut out),
        Err(CryptoError::AeadInvalidTagSize)
    );
    let mut short_tag = [0u8; 8];
    assert_eq!(
        aes_encrypt(&key, &gcm_usage(&[0; 12], &[], &[]), &[0; 16], &mut out, &mut short_tag),
        Err(CryptoError::BufferTooSmall)
    );
    let no_param = UsageSpec::new(KeyAlg::Aes).with_mode(CipherMode::Gcm);
    assert_eq!(
        aes_encrypt(&key, &no_param, &[0; 16], &mut out, &mut tag),
        Err(CryptoError::InvalidUsageParam)
    );
}

#[test]
fn test_aes_pkcs7_round_trip_lengths() {
    let key = random(32);
    let iv = random(16);
    for mode in [CipherMode::Ecb, CipherMode::Cbc] {
        let iv = if mode == CipherMode::Cbc { iv.as_slice() } else { &[] };
        let usage = block_usage(mode, Padding::Pkcs7, iv);
        for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 50] {
            let plaintext = random(len);
            let (ciphertext, _) = encrypt_vec(&key, &usage, &plaintext);
            assert_eq!(ciphertext.len(), (len / 16 + 1) * 16, "mode {mode:?} len {len}");
            let decrypted = decrypt_vec(&key, &usage, &ciphertext).expect("Failed to decrypt");
            assert_eq!(decrypted, plaintext, "mode {mode:?} len {len}");
        }
    }
}

#[test]
fn test_aes_unpadded_rejects_unaligned_input() {
    let key = random(16);
    let iv = random(16);
    let mut out = [0u8; 64];
    for usage in [
        block_usage(CipherMode::Ecb, Padding::None, &[]),
        block_usage(CipherMode::Cbc, Padding::None, &iv),
    ] {
        assert_eq!(
            aes_encrypt(&key, &usage, &[0; 17], &mut out, &mut []),
            Err(CryptoError::AesUnalignedInput)
        );
        assert_eq!(
            aes_decrypt(&key, &usage, &[0; 31], &mut out),
            Err(CryptoError::AesUnalignedInput)
        );
    }
}

#[test]
fn test_aes_output_buffer_checked() {
    let key = random(16);
    let usage = block_usage(CipherMode::Ecb, Padding::Pkcs7, &[]);
    let mut out = [0u8; 16];
    assert_eq!(
        aes_encrypt(&key, &usage, &[0; 16], &mut out, &mut []),
        Err(CryptoError::BufferTooSmall)
    );
}

#[test]
fn test_aes_ctr_round_trip_and_padding_rejected() {
    let key = random(32);
    let iv = random(16);
    let plaintext = random(45);
    let usage = block_usage(CipherMode::Ctr, Padding::None, &iv);
    let (ciphertext, _) = encrypt_vec(&key, &usage, &plaintext);
    assert_eq!(ciphertext.len(), 45);
    assert_eq!(
        decrypt_vec(&key, &usage, &ciphertext).expect("Failed to decrypt"),
        plaintext
    );

    let padded = block_usage(CipherMode::Ctr, Padding::Pkcs7, &iv);
    let mut out = [0u8; 64];
    assert_eq!(
        aes_encrypt(&key, &padded, &plaintext, &mut out, &mut []),
        Err(CryptoError::UnsupportedPadding)
    );
}

#[test]
fn test_aes_invalid_key_and_iv() {
    let mut out = [0u8; 32];
    let usage = block_usage(CipherMode::Ecb, Padding::None, &[]);
    assert_eq!(
        aes_encrypt(&[0; 20], &usage, &[0; 16], &mut out, &mut []),
        Err(CryptoError::AesInvalidKeySize)
    );
    let usage = block_usage(CipherMode::Cbc, Padding::None, &[0; 8]);
    assert_eq!(
        aes_encrypt(&[0; 16], &usage, &[0; 16], &mut out, &mut []),
        Err(CryptoError::AesInvalidIvSize)
    );
    let usage = UsageSpec::new(KeyAlg::Aes);
    assert_eq!(
        aes_encrypt(&[0; 16], &usage, &[0; 16], &mut out, &mut []),
        Err(CryptoError::UnsupportedMode)
    );
}

#[test]
fn test_aes_streaming_matches_one_shot() {
    let key = random(16);
    let iv = random(16);
    let plaintext = random(70);
    let usage = block_usage(CipherMode::Cbc, Padding::Pkcs7, &iv);
    let (expected, _) = encrypt_vec(&key, &usage, &plaintext);

    let mut handle = Some(aes_encrypt_init(&key, &usage).expect("Failed to init encrypt"));
    let mut ciphertext = vec![0u8; 96];
    let mut offset = 0;
    for chunk in [&plaintext[..5], &plaintext[5..21], &plaintext[21..40]] {
        offset += aes_cipher_update(&mut handle, chunk, &mut ciphertext[offset..])
            .expect("Failed to update");
    }
    offset += aes_encrypt_final(&mut handle, &plaintext[40..], &mut ciphertext[offset..], &mut [])
        .expect("Failed to finalize");
    ciphertext.truncate(offset);
    assert_eq!(ciphertext, expected);
    assert!(handle.is_none());

    let mut handle = Some(aes_decrypt_init(&key, &usage).expect("Failed to init decrypt"));
    let mut decrypted = vec![0u8; 96];
    let mut offset = 0;
    for chunk in ciphertext[..48].chunks(16) {
        offset += aes_cipher_update(&mut handle, chunk, &mut decrypted[offset..])
            .expect("Failed to update");
    }
    offset += aes_decrypt_final(&mut handle, &ciphertext[48..], &mut decrypted[offset..])
        .expect("Failed to finalize");
    decrypted.truncate(offset);
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_aes_gcm_streaming() {
    let key = random(32);
    let nonce = random(12);
    let aad = random(16);
    let plaintext = random(37);
    let (expected, expected_tag) = encrypt_vec(&key, &gcm_usage(&nonce, &aad, &[]), &plaintext);

    let mut handle =
        Some(aes_encrypt_init(&key, &gcm_usage(&nonce, &aad, &[])).expect("Failed to init"));
    let mut ciphertext = vec![0u8; 37];
    let mut tag = [0u8; 16];
    let first = aes_cipher_update(&mut handle, &plaintext[..10], &mut ciphertext)
        .expect("Failed to update");
    assert_eq!(first, 10);
    let last = aes_encrypt_final(&mut handle, &plaintext[10..], &mut ciphertext[10..], &mut tag)
        .expect("Failed to finalize");
    assert_eq!(first + last, 37);
    assert_eq!(ciphertext, expected);
    assert_eq!(tag.as_slice(), expected_tag.as_slice());
}

#[test]
fn test_aes_final_releases_context() {
    let key = random(16);
    let usage = block_usage(CipherMode::Ecb, Padding::None, &[]);
    let mut handle = Some(aes_encrypt_init(&key, &usage).expect("Failed to init"));
    let mut out = [0u8; 32];

    assert_eq!(
        aes_encrypt_final(&mut handle, &[0; 7], &mut out, &mut []),
        Err(CryptoError::AesUnalignedInput)
    );
    assert!(handle.is_none());
    assert_eq!(
        aes_cipher_update(&mut handle, &[0; 16], &mut out),
        Err(CryptoError::ContextMissing)
    );
}

#[test]
fn test_aes_direction_mismatch() {
    let key = random(16);
    let usage = block_usage(CipherMode::Ecb, Padding::None, &[]);
    let mut handle = Some(aes_encrypt_init(&key, &usage).expect("Failed to init"));
    let mut out = [0u8; 16];
    assert_eq!(
        aes_decrypt_final(&mut handle, &[0; 16], &mut out),
        Err(CryptoError::ContextMismatch)
    );
    assert!(handle.is_none());

    let mut handle = Some(hash_init(Digest::Sha256).expect("Failed to init hash"));
    assert_eq!(
        aes_cipher_update(&mut handle, &[0; 16], &mut out),
        Err(CryptoError::ContextMismatch)
    );
    free_context(&mut handle);
}

#[test]
fn test_aes_ccm_round_trip_and_tamper() {
    let key = random(16);
    let nonce = random(13);
    let aad = random(20);
    let plaintext = random(29);
    let usage = UsageSpec::new(KeyAlg::Aes)
        .with_mode(CipherMode::Ccm)
        .with_aead(&nonce, &aad, &[]);
    let (ciphertext, tag) = encrypt_vec(&key, &usage, &plaintext);
    assert_eq!(ciphertext.len(), 29);

    let usage = UsageSpec::new(KeyAlg::Aes)
        .with_mode(CipherMode::Ccm)
        .with_aead(&nonce, &aad, &tag);
    assert_eq!(
        decrypt_vec(&key, &usage, &ciphertext).expect("Failed to decrypt"),
        plaintext
    );

    let mut bad = ciphertext.clone();
    bad[0] ^= 0x01;
    assert_eq!(decrypt_vec(&key, &usage, &bad), Err(CryptoError::AeadTagMismatch));
}

#[test]
fn test_aes_ccm_has_no_streaming_form() {
    let usage = UsageSpec::new(KeyAlg::Aes)
        .with_mode(CipherMode::Ccm)
        .with_aead(&[0; 12], &[], &[]);
    assert_eq!(
        aes_encrypt_init(&[0; 16], &usage).err(),
        Some(CryptoError::UnsupportedMode)
    );
    let usage = UsageSpec::new(KeyAlg::Aes)
        .with_mode(CipherMode::Ccm)
        .with_aead(&[0; 6], &[], &[]);
    let mut out = [0u8; 16];
    assert_eq!(
        aes_encrypt(&[0; 16], &usage, &[0; 16], &mut out, &mut [0; 16]),
        Err(CryptoError::CcmInvalidNonceSize)
    );
}

#[test]
fn test_aes_generate_key() {
    for bits in [128, 192, 256] {
        let key = aes_generate_key(&KeySpec::new(KeyAlg::Aes, bits)).expect("Failed to generate");
        assert_eq!(key.len(), bits as usize / 8);
    }
    assert_eq!(
        aes_generate_key(&KeySpec::new(KeyAlg::Aes, 100)).err(),
        Some(CryptoError::AesInvalidKeySize)
    );
}
