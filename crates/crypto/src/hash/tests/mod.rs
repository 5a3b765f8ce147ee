// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn test_known_answers_abc() {
    let cases = [
        (Digest::Md5, "900150983cd24fb0d6963f7d28e17f72"),
        (Digest::Sha1, "a9993e364706816aba3e25717850c26c9cd0d89d"),
        (
            Digest::Sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ),
    ];

    for (digest, expected) in cases {
        let mut out = [0u8; 64];
        let len = hash(digest, b"abc", &mut out).expect("Failed to hash");
        assert_eq!(len, digest.size());
        assert_eq!(hex(&out[..len]), expected, "digest {digest:?}");
    }
}

#[test]
fn test_streaming_matches_one_shot() {
    let data: Vec<u8> = (0..=255u8).cycle().take(3000).collect();

    for digest in [
        Digest::Md5,
        Digest::Sha1,
        Digest::Sha224,
        Digest::Sha256,
        Digest::Sha384,
        Digest::Sha512,
    ] {
        let mut expected = [0u8; 64];
        let len = hash(digest, &data, &mut expected).expect("Failed to hash");

        let mut handle = Some(hash_init(digest).expect("Failed to init hash"));
        hash_update(&mut handle, &data[..1000]).expect("Failed to update hash");
        hash_update(&mut handle, &data[1000..2999]).expect("Failed to update hash");
        let mut actual = [0u8; 64];
        let final_len =
            hash_final(&mut handle, &data[2999..], &mut actual).expect("Failed to finalize hash");

        assert_eq!(final_len, len);
        assert_eq!(actual[..len], expected[..len], "digest {digest:?}");
        assert!(handle.is_none(), "final must release the context");
    }
}

#[test]
fn test_hash_none_rejected() {
    let mut out = [0u8; 32];
    assert_eq!(
        hash(Digest::None, b"abc", &mut out),
        Err(CryptoError::UnsupportedDigest)
    );
}

#[test]
fn test_hash_output_too_small() {
    let mut out = [0u8; 31];
    assert_eq!(
        hash(Digest::Sha256, b"abc", &mut out),
        Err(CryptoError::BufferTooSmall)
    );
}

#[test]
fn test_final_releases_context_on_error() {
    let mut handle = Some(hash_init(Digest::Sha512).expect("Failed to init hash"));
    let mut short = [0u8; 10];
    assert_eq!(
        hash_final(&mut handle, b"", &mut short),
        Err(CryptoError::BufferTooSmall)
    );
    assert!(handle.is_none());

    // The handle is now empty: every further call is an argument error.
    assert_eq!(
        hash_update(&mut handle, b"late"),
        Err(CryptoError::ContextMissing)
    );
    let mut out = [0u8; 64];
    assert_eq!(
        hash_final(&mut handle, b"", &mut out),
        Err(CryptoError::ContextMissing)
    );
}

#[test]
fn test_free_abandons_context() {
    let mut handle = Some(hash_init(Digest::Sha1).expect("Failed to init hash"));
    hash_update(&mut handle, b"partial").expect("Failed to update hash");
    free_context(&mut handle);
    assert!(handle.is_none());
    assert_eq!(
        hash_update(&mut handle, b"more").map_err(|e| e.kind()),
        Err(ErrorKind::InvalidArgument)
    );
}
