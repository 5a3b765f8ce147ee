// Copyright (C) Microsoft Corporation. All rights reserved.

//! Ability registry.
//!
//! Routes an (operation kind, algorithm) pair to the engine entry point that
//! implements it. Every engine compiled into the build registers its
//! abilities once, the first time [`initialize`] (or [`abilities`]) runs; the
//! table is immutable afterwards and shared by all threads. A pair whose
//! engine is compiled out is simply absent and looks up as
//! [`CryptoError::AbilityNotSupported`].
//!
//! ```ignore
//! let sign = abilities().sign(KeyAlg::Ed25519)?;
//! let len = sign(&key_blob, &UsageSpec::new(KeyAlg::Ed25519), msg, &mut sig)?;
//! ```

mod table;

use std::sync::OnceLock;

pub use table::*;

use super::*;

static ABILITIES: OnceLock<AbilityTable> = OnceLock::new();

/// Builds the process-wide table. Later calls return the same table.
pub fn initialize() -> &'static AbilityTable {
    ABILITIES.get_or_init(|| {
        let mut table = AbilityTable::default();
        register_abilities(&mut table);
        tracing::debug!(count = table.len(), "ability registry initialized");
        table
    })
}

/// The process-wide table, built on first use.
pub fn abilities() -> &'static AbilityTable {
    initialize()
}

fn register_abilities(table: &mut AbilityTable) {
    register_common(table);
    #[cfg(feature = "aes")]
    register_aes(table);
    #[cfg(feature = "hmac")]
    register_hmac(table);
    #[cfg(feature = "rsa")]
    register_rsa(table);
    #[cfg(feature = "ecc")]
    register_ecc(table);
    #[cfg(feature = "dsa")]
    register_dsa(table);
    #[cfg(feature = "dh")]
    register_dh(table);
    #[cfg(feature = "curve25519")]
    register_curve25519(table);
    #[cfg(feature = "kdf")]
    register_kdf(table);
}

fn register_common(table: &mut AbilityTable) {
    table.register(None, Ability::Hash(hash));
    table.register(None, Ability::HashInit(hash_init));
    table.register(None, Ability::HashUpdate(hash_update));
    table.register(None, Ability::HashFinal(hash_final));
    table.register(None, Ability::HashFree(free_context));
    table.register(None, Ability::FillRandom(fill_random));
    table.register(None, Ability::BnExpMod(bn_exp_mod));
}

#[cfg(feature = "aes")]
fn register_aes(table: &mut AbilityTable) {
    let alg = Some(KeyAlg::Aes);
    table.register(alg, Ability::GenerateKey(aes_generate_key));
    table.register(alg, Ability::Encrypt(aes_encrypt));
    table.register(alg, Ability::Decrypt(aes_decrypt));
    table.register(alg, Ability::EncryptInit(aes_encrypt_init));
    table.register(alg, Ability::EncryptUpdate(aes_cipher_update));
    table.register(alg, Ability::EncryptFinal(aes_encrypt_final));
    table.register(alg, Ability::EncryptFree(free_context));
    table.register(alg, Ability::DecryptInit(aes_decrypt_init));
    table.register(alg, Ability::DecryptUpdate(aes_cipher_update));
    table.register(alg, Ability::DecryptFinal(aes_decrypt_final));
    table.register(alg, Ability::DecryptFree(free_context));
}

#[cfg(feature = "hmac")]
fn register_hmac(table: &mut AbilityTable) {
    let alg = Some(KeyAlg::Hmac);
    table.register(alg, Ability::GenerateKey(hmac_generate_key));
    table.register(alg, Ability::Hmac(hmac));
    table.register(alg, Ability::HmacInit(hmac_init));
    table.register(alg, Ability::HmacUpdate(hmac_update));
    table.register(alg, Ability::HmacFinal(hmac_final));
    table.register(alg, Ability::HmacFree(free_context));
}

#[cfg(feature = "rsa")]
fn register_rsa(table: &mut AbilityTable) {
    let alg = Some(KeyAlg::Rsa);
    table.register(alg, Ability::GenerateKey(rsa_generate_key));
    table.register(alg, Ability::GetPublicKey(rsa_get_public_key));
    table.register(alg, Ability::Sign(rsa_sign));
    table.register(alg, Ability::Verify(rsa_verify));
    table.register(alg, Ability::Encrypt(rsa_encrypt));
    table.register(alg, Ability::Decrypt(rsa_decrypt));
}

#[cfg(feature = "ecc")]
fn register_ecc(table: &mut AbilityTable) {
    let alg = Some(KeyAlg::Ecc);
    table.register(alg, Ability::GenerateKey(ecc_generate_key));
    table.register(alg, Ability::GetPublicKey(ecc_get_public_key));
    table.register(alg, Ability::Sign(ecdsa_sign));
    table.register(alg, Ability::Verify(ecdsa_verify));
    table.register(alg, Ability::AgreeKey(ecdh_agree_key));

    let alg = Some(KeyAlg::Ecdh);
    table.register(alg, Ability::GenerateKey(ecc_generate_key));
    table.register(alg, Ability::GetPublicKey(ecc_get_public_key));
    table.register(alg, Ability::AgreeKey(ecdh_agree_key));
}

#[cfg(feature = "dsa")]
fn register_dsa(table: &mut AbilityTable) {
    let alg = Some(KeyAlg::Dsa);
    table.register(alg, Ability::GenerateKey(dsa_generate_key));
    table.register(alg, Ability::GetPublicKey(dsa_get_public_key));
    table.register(alg, Ability::Sign(dsa_sign));
    table.register(alg, Ability::Verify(dsa_verify));
}

#[cfg(feature = "dh")]
fn register_dh(table: &mut AbilityTable) {
    let alg = Some(KeyAlg::Dh);
    table.register(alg, Ability::GenerateKey(dh_generate_key));
    table.register(alg, Ability::GetPublicKey(dh_get_public_key));
    table.register(alg, Ability::AgreeKey(dh_agree_key));
}

#[cfg(feature = "curve25519")]
fn register_curve25519(table: &mut AbilityTable) {
    let alg = Some(KeyAlg::X25519);
    table.register(alg, Ability::GenerateKey(curve25519_generate_key));
    table.register(alg, Ability::GetPublicKey(curve25519_get_public_key));
    table.register(alg, Ability::AgreeKey(x25519_agree_key));

    let alg = Some(KeyAlg::Ed25519);
    table.register(alg, Ability::GenerateKey(curve25519_generate_key));
    table.register(alg, Ability::GetPublicKey(curve25519_get_public_key));
    table.register(alg, Ability::Sign(ed25519_sign));
    table.register(alg, Ability::Verify(ed25519_verify));
    table.register(alg, Ability::AgreeKey(ed25519_agree_key));
}

#[cfg(feature = "kdf")]
fn register_kdf(table: &mut AbilityTable) {
    table.register(Some(KeyAlg::Hkdf), Ability::DeriveKey(kdf_derive_key));
    table.register(Some(KeyAlg::Pbkdf2), Ability::DeriveKey(kdf_derive_key));
}

#[cfg(test)]
mod tests;
