// Copyright (C) Microsoft Corporation. All rights reserved.

//! Operation traits shared by the per-algorithm engines.
//!
//! Each engine exposes its primitives through these traits; the ability
//! entry points in each engine module are thin adapters from key blobs and
//! specifications onto them.
//!
//! # Trait Categories
//!
//! - [`key`]: key markers, import/export and generation
//! - [`encryption`]: one-shot and streaming ciphers
//! - [`hashing`]: one-shot and streaming digests
//! - [`signing`]: signatures and MACs
//! - [`derivation`]: key derivation and key agreement
//!
//! # Buffer Pattern
//!
//! Output parameters are `Option<&mut [u8]>`:
//! - `None`: query the required buffer size
//! - `Some(buffer)`: perform the operation, failing with
//!   [`CryptoError::BufferTooSmall`] before writing if `buffer` is short
mod derivation;
mod encryption;
mod hashing;
mod key;
mod signing;

pub use derivation::*;
pub use encryption::*;
pub use hashing::*;
pub use key::*;
pub use signing::*;

use super::*;
