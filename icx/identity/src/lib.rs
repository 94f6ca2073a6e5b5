// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

//! ICX key management: recoverable secp256k1 signing, keystore loading and address derivation.

mod address;
mod keystore;
mod signer;

pub use crate::address::Address;
pub use crate::keystore::{key_from_key_store, write_key_store, KeyStoreError};
pub use crate::signer::{
    decode_signature, recover, verify, IcxSigner, PrivateKey, SignerError,
    RECOVERABLE_SIGNATURE_LEN, SIGNATURE_LEN,
};
pub use libsecp256k1::PublicKey;
