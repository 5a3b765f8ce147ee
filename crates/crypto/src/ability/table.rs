// Copyright (C) Microsoft Corporation. All rights reserved.

//! Ability entries and the lookup table.

use std::collections::HashMap;

use super::*;

pub type GenerateKeyFn = fn(&KeySpec) -> Result<KeyBlob, CryptoError>;
pub type GetPublicKeyFn = fn(&[u8]) -> Result<Vec<u8>, CryptoError>;
pub type SignFn = fn(&[u8], &UsageSpec, &[u8], &mut [u8]) -> Result<usize, CryptoError>;
pub type VerifyFn = fn(&[u8], &UsageSpec, &[u8], &[u8]) -> Result<(), CryptoError>;
pub type EncryptFn =
    fn(&[u8], &UsageSpec, &[u8], &mut [u8], &mut [u8]) -> Result<usize, CryptoError>;
pub type DecryptFn = fn(&[u8], &UsageSpec, &[u8], &mut [u8]) -> Result<usize, CryptoError>;
pub type CipherInitFn = fn(&[u8], &UsageSpec) -> Result<CryptoContext, CryptoError>;
pub type CipherUpdateFn =
    fn(&mut Option<CryptoContext>, &[u8], &mut [u8]) -> Result<usize, CryptoError>;
pub type EncryptFinalFn =
    fn(&mut Option<CryptoContext>, &[u8], &mut [u8], &mut [u8]) -> Result<usize, CryptoError>;
pub type DecryptFinalFn =
    fn(&mut Option<CryptoContext>, &[u8], &mut [u8]) -> Result<usize, CryptoError>;
pub type FreeFn = fn(&mut Option<CryptoContext>);
pub type AgreeKeyFn = fn(&[u8], &[u8], &KeySpec, &mut [u8]) -> Result<usize, CryptoError>;
pub type DeriveKeyFn = fn(&[u8], &DeriveSpec, &mut [u8]) -> Result<usize, CryptoError>;
pub type HashFn = fn(Digest, &[u8], &mut [u8]) -> Result<usize, CryptoError>;
pub type HashInitFn = fn(Digest) -> Result<CryptoContext, CryptoError>;
pub type UpdateFn = fn(&mut Option<CryptoContext>, &[u8]) -> Result<(), CryptoError>;
pub type FinalFn = fn(&mut Option<CryptoContext>, &[u8], &mut [u8]) -> Result<usize, CryptoError>;
pub type HmacFn = fn(&[u8], Digest, &[u8], &mut [u8]) -> Result<usize, CryptoError>;
pub type HmacInitFn = fn(&[u8], Digest) -> Result<CryptoContext, CryptoError>;
pub type FillRandomFn = fn(&mut [u8]) -> Result<(), CryptoError>;
pub type BnExpModFn = fn(&mut [u8], &[u8], &[u8], &[u8]) -> Result<(), CryptoError>;

/// Operation kind of an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    GenerateKey,
    GetPublicKey,
    Sign,
    Verify,
    Encrypt,
    Decrypt,
    EncryptInit,
    EncryptUpdate,
    EncryptFinal,
    EncryptFree,
    DecryptInit,
    DecryptUpdate,
    DecryptFinal,
    DecryptFree,
    AgreeKey,
    DeriveKey,
    Hash,
    HashInit,
    HashUpdate,
    HashFinal,
    HashFree,
    Hmac,
    HmacInit,
    HmacUpdate,
    HmacFinal,
    HmacFree,
    FillRandom,
    BnExpMod,
}

/// Registry key: operation kind plus algorithm.
///
/// Hashing, fill-random and modexp are not tied to a key algorithm and use
/// `alg: None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbilityId {
    pub kind: AbilityKind,
    pub alg: Option<KeyAlg>,
}

impl AbilityId {
    pub fn new(kind: AbilityKind, alg: Option<KeyAlg>) -> Self {
        Self { kind, alg }
    }
}

/// A registered entry point, tagged by operation kind.
#[derive(Clone, Copy)]
pub enum Ability {
    GenerateKey(GenerateKeyFn),
    GetPublicKey(GetPublicKeyFn),
    Sign(SignFn),
    Verify(VerifyFn),
    Encrypt(EncryptFn),
    Decrypt(DecryptFn),
    EncryptInit(CipherInitFn),
    EncryptUpdate(CipherUpdateFn),
    EncryptFinal(EncryptFinalFn),
    EncryptFree(FreeFn),
    DecryptInit(CipherInitFn),
    DecryptUpdate(CipherUpdateFn),
    DecryptFinal(DecryptFinalFn),
    DecryptFree(FreeFn),
    AgreeKey(AgreeKeyFn),
    DeriveKey(DeriveKeyFn),
    Hash(HashFn),
    HashInit(HashInitFn),
    HashUpdate(UpdateFn),
    HashFinal(FinalFn),
    HashFree(FreeFn),
    Hmac(HmacFn),
    HmacInit(HmacInitFn),
    HmacUpdate(UpdateFn),
    HmacFinal(FinalFn),
    HmacFree(FreeFn),
    FillRandom(FillRandomFn),
    BnExpMod(BnExpModFn),
}

impl Ability {
    /// Operation kind the entry point implements.
    pub fn kind(&self) -> AbilityKind {
        match self {
            Ability::GenerateKey(_) => AbilityKind::GenerateKey,
            Ability::GetPublicKey(_) => AbilityKind::GetPublicKey,
            Ability::Sign(_) => AbilityKind::Sign,
            Ability::Verify(_) => AbilityKind::Verify,
            Ability::Encrypt(_) => AbilityKind::Encrypt,
            Ability::Decrypt(_) => AbilityKind::Decrypt,
            Ability::EncryptInit(_) => AbilityKind::EncryptInit,
            Ability::EncryptUpdate(_) => AbilityKind::EncryptUpdate,
            Ability::EncryptFinal(_) => AbilityKind::EncryptFinal,
            Ability::EncryptFree(_) => AbilityKind::EncryptFree,
            Ability::DecryptInit(_) => AbilityKind::DecryptInit,
            Ability::DecryptUpdate(_) => AbilityKind::DecryptUpdate,
            Ability::DecryptFinal(_) => AbilityKind::DecryptFinal,
            Ability::DecryptFree(_) => AbilityKind::DecryptFree,
            Ability::AgreeKey(_) => AbilityKind::AgreeKey,
            Ability::DeriveKey(_) => AbilityKind::DeriveKey,
            Ability::Hash(_) => AbilityKind::Hash,
            Ability::HashInit(_) => AbilityKind::HashInit,
            Ability::HashUpdate(_) => AbilityKind::HashUpdate,
            Ability::HashFinal(_) => AbilityKind::HashFinal,
            Ability::HashFree(_) => AbilityKind::HashFree,
            Ability::Hmac(_) => AbilityKind::Hmac,
            Ability::HmacInit(_) => AbilityKind::HmacInit,
            Ability::HmacUpdate(_) => AbilityKind::HmacUpdate,
            Ability::HmacFinal(_) => AbilityKind::HmacFinal,
            Ability::HmacFree(_) => AbilityKind::HmacFree,
            Ability::FillRandom(_) => AbilityKind::FillRandom,
            Ability::BnExpMod(_) => AbilityKind::BnExpMod,
        }
    }
}

impl std::fmt::Debug for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Ability").field(&self.kind()).finish()
    }
}

/// Generates a typed lookup returning the entry point of one kind.
macro_rules! lookup {
    ($(#[$attr:meta])* $name:ident, $kind:ident, $fn_ty:ty) => {
        $(#[$attr])*
        pub fn $name(&self, alg: KeyAlg) -> Result<$fn_ty, CryptoError> {
            match self.get(AbilityKind::$kind, Some(alg))? {
                Ability::$kind(f) => Ok(f),
                _ => Err(CryptoError::AbilityNotSupported),
            }
        }
    };
    ($(#[$attr:meta])* $name:ident, $kind:ident, $fn_ty:ty, unkeyed) => {
        $(#[$attr])*
        pub fn $name(&self) -> Result<$fn_ty, CryptoError> {
            match self.get(AbilityKind::$kind, None)? {
                Ability::$kind(f) => Ok(f),
                _ => Err(CryptoError::AbilityNotSupported),
            }
        }
    };
}

/// Table of registered abilities.
///
/// Built once by [`initialize`] and read-only afterwards.
#[derive(Debug, Default)]
pub struct AbilityTable {
    entries: HashMap<AbilityId, Ability>,
}

impl AbilityTable {
    /// Adds an entry keyed by the ability's own kind and `alg`.
    pub(crate) fn register(&mut self, alg: Option<KeyAlg>, ability: Ability) {
        let id = AbilityId::new(ability.kind(), alg);
        if self.entries.insert(id, ability).is_some() {
            tracing::warn!(?id, "ability registered twice; keeping the last entry");
        }
    }

    /// Looks up the entry for `(kind, alg)`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::AbilityNotSupported`] if the pair is not
    /// registered in this build.
    pub fn get(&self, kind: AbilityKind, alg: Option<KeyAlg>) -> Result<Ability, CryptoError> {
        let id = AbilityId::new(kind, alg);
        self.entries.get(&id).copied().ok_or_else(|| {
            tracing::error!(?id, "ability not supported");
            CryptoError::AbilityNotSupported
        })
    }

    /// Whether `(kind, alg)` is registered.
    pub fn contains(&self, kind: AbilityKind, alg: Option<KeyAlg>) -> bool {
        self.entries.contains_key(&AbilityId::new(kind, alg))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.entries.keys().copied()
    }

    lookup!(generate_key, GenerateKey, GenerateKeyFn);
    lookup!(get_public_key, GetPublicKey, GetPublicKeyFn);
    lookup!(sign, Sign, SignFn);
    lookup!(verify, Verify, VerifyFn);
    lookup!(encrypt, Encrypt, EncryptFn);
    lookup!(decrypt, Decrypt, DecryptFn);
    lookup!(encrypt_init, EncryptInit, CipherInitFn);
    lookup!(encrypt_update, EncryptUpdate, CipherUpdateFn);
    lookup!(encrypt_final, EncryptFinal, EncryptFinalFn);
    lookup!(encrypt_free, EncryptFree, FreeFn);
    lookup!(decrypt_init, DecryptInit, CipherInitFn);
    lookup!(decrypt_update, DecryptUpdate, CipherUpdateFn);
    lookup!(decrypt_final, DecryptFinal, DecryptFinalFn);
    lookup!(decrypt_free, DecryptFree, FreeFn);
    lookup!(agree_key, AgreeKey, AgreeKeyFn);
    lookup!(derive_key, DeriveKey, DeriveKeyFn);
    lookup!(hmac, Hmac, HmacFn);
    lookup!(hmac_init, HmacInit, HmacInitFn);
    lookup!(hmac_update, HmacUpdate, UpdateFn);
    lookup!(hmac_final, HmacFinal, FinalFn);
    lookup!(hmac_free, HmacFree, FreeFn);
    lookup!(hash, Hash, HashFn, unkeyed);
    lookup!(hash_init, HashInit, HashInitFn, unkeyed);
    lookup!(hash_update, HashUpdate, UpdateFn, unkeyed);
    lookup!(hash_final, HashFinal, FinalFn, unkeyed);
    lookup!(hash_free, HashFree, FreeFn, unkeyed);
    lookup!(fill_random, FillRandom, FillRandomFn, unkeyed);
    lookup!(bn_exp_mod, BnExpMod, BnExpModFn, unkeyed);
}
