// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[test]
fn test_alloc_blob_zeroed() {
    let blob = alloc_blob(48).expect("Failed to allocate blob");
    assert_eq!(blob.len(), 48);
    assert!(blob.iter().all(|b| *b == 0));
}

#[test]
fn test_alloc_blob_exhausted() {
    let result = alloc_blob(usize::MAX);
    assert_eq!(result.err(), Some(CryptoError::OutOfMemory));
    assert_eq!(CryptoError::OutOfMemory.kind(), ErrorKind::ResourceExhausted);
}

#[test]
fn test_copy_out_checks_size_before_writing() {
    let mut small = [0xAAu8; 3];
    assert_eq!(
        copy_out(&[1, 2, 3, 4], &mut small),
        Err(CryptoError::BufferTooSmall)
    );
    assert_eq!(small, [0xAA; 3], "short buffer must be left untouched");

    let mut big = [0u8; 6];
    assert_eq!(copy_out(&[1, 2, 3, 4], &mut big), Ok(4));
    assert_eq!(big, [1, 2, 3, 4, 0, 0]);
}

#[test]
fn test_raw_secret_generate_and_export() {
    let key = RawSecretKey::generate(256).expect("Failed to generate secret");
    assert_eq!(key.size(), 32);
    assert_eq!(key.bits(), 256);

    let exported = key.to_blob().expect("Failed to export secret");
    let imported = RawSecretKey::from_bytes(&exported).expect("Failed to import secret");
    assert_eq!(imported.bytes(), key.bytes());

    assert!(RawSecretKey::generate(0).is_err());
    assert!(RawSecretKey::generate(12).is_err());
    assert!(RawSecretKey::from_bytes(&[]).is_err());
}
