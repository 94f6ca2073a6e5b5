// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

//! Password protected key store files.
//!
//! Key stores use the version 3 encrypted JSON wallet layout (scrypt or pbkdf2 key derivation,
//! aes-128-ctr cipher, keccak256 mac). Files written here also carry the wallet `address` and a
//! `coinType` of `icx` so that other ICON tools can pick them up.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use zeroize::Zeroize;

use crate::signer::{IcxSigner, PrivateKey};

const COIN_TYPE: &str = "icx";

/// The single error kind for key store access. A missing file, a wrong password and a corrupted
/// file all map here; the message carries the underlying cause.
#[derive(Debug, Error)]
#[error("key store error: {message}")]
pub struct KeyStoreError {
    message: String,
}

impl KeyStoreError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Reads the key store at `path` and decrypts the private key with `password`.
pub fn key_from_key_store(
    path: impl AsRef<Path>,
    password: &str,
) -> Result<PrivateKey, KeyStoreError> {
    let path = path.as_ref();
    log::debug!("loading key store from {path:?}");

    if !path.is_file() {
        return Err(KeyStoreError::new(format!(
            "key store file not found: {path:?}"
        )));
    }

    let mut raw = eth_keystore::decrypt_key(path, password).map_err(|e| {
        log::debug!("cannot decrypt key store {path:?}: {e}");
        KeyStoreError::new(format!("cannot decrypt key store {path:?}: {e}"))
    })?;

    let private_key = PrivateKey::from_slice(&raw).map_err(|e| KeyStoreError::new(e.to_string()));
    raw.zeroize();
    private_key
}

/// Encrypts the signer's key with `password` into a new key store file under `dir`. The file is
/// named `name`, or after the key store id when no name is given. Returns the file path.
pub fn write_key_store(
    dir: impl AsRef<Path>,
    signer: &IcxSigner,
    password: &str,
    name: Option<&str>,
) -> Result<PathBuf, KeyStoreError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .map_err(|e| KeyStoreError::new(format!("cannot create key store dir {dir:?}: {e}")))?;

    let private_key = signer.private_key();
    let id = eth_keystore::encrypt_key(
        dir,
        &mut rand::thread_rng(),
        private_key.as_bytes(),
        password,
        name,
    )
    .map_err(|e| KeyStoreError::new(format!("cannot encrypt key store: {e}")))?;

    let path = dir.join(name.unwrap_or(id.as_str()));
    annotate(&path, signer)?;

    log::info!("wrote key store for {} to {path:?}", signer.address());
    Ok(path)
}

/// Adds the wallet address and coin type to a freshly written key store file.
fn annotate(path: &Path, signer: &IcxSigner) -> Result<(), KeyStoreError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| KeyStoreError::new(format!("cannot read key store {path:?}: {e}")))?;
    let mut json: Value = serde_json::from_str(&contents)
        .map_err(|e| KeyStoreError::new(format!("malformed key store {path:?}: {e}")))?;

    let Some(object) = json.as_object_mut() else {
        return Err(KeyStoreError::new(format!(
            "key store {path:?} is not a json object"
        )));
    };
    object.insert(
        "address".to_string(),
        Value::String(signer.address().to_string()),
    );
    object.insert("coinType".to_string(), Value::String(COIN_TYPE.to_string()));

    let contents = serde_json::to_string_pretty(&json)
        .map_err(|e| KeyStoreError::new(format!("cannot serialize key store: {e}")))?;
    fs::write(path, contents)
        .map_err(|e| KeyStoreError::new(format!("cannot write key store {path:?}: {e}")))
}
