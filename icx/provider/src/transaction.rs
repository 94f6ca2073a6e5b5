// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

//! Transaction hashing and signing.
//!
//! A transaction is signed over the SHA3-256 hash of its serialized "phrase":
//! `icx_sendTransaction.` followed by the params with keys in sorted order, every key and value
//! joined with `.`. Nested objects are wrapped in `{}`, arrays in `[]`, a null value is `\0` and
//! the characters `\ { } [ ] .` inside values are escaped with a backslash.

use std::time::{SystemTime, UNIX_EPOCH};

use icx_identity::{IcxSigner, SignerError};
use serde_json::{Map, Value};
use sha3::{Digest, Sha3_256};
use thiserror::Error;

const TX_PHRASE_PREFIX: &str = "icx_sendTransaction";
const SIGNATURE_KEY: &str = "signature";
const EXCLUDED_KEYS: [&str; 3] = [SIGNATURE_KEY, "txHash", "tx_hash"];

pub const DEFAULT_TX_VERSION: &str = "0x3";

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("transaction params must be a json object")]
    NotAnObject,
    #[error(transparent)]
    Signer(#[from] SignerError),
}

/// Serializes the transaction params into the phrase that is hashed for signing.
pub fn serialize(params: &Value) -> Result<String, TransactionError> {
    let object = params.as_object().ok_or(TransactionError::NotAnObject)?;

    let mut phrase = String::from(TX_PHRASE_PREFIX);
    phrase.push('.');
    encode_object_body(object, &EXCLUDED_KEYS, &mut phrase);
    Ok(phrase)
}

/// The digest a transaction signature is computed over.
pub fn tx_hash(params: &Value) -> Result<[u8; 32], TransactionError> {
    let phrase = serialize(params)?;
    Ok(Sha3_256::digest(phrase.as_bytes()).into())
}

/// Signs the params with `signer` and returns them with the `signature` attached. A missing
/// `from` is set to the signer's address before hashing.
pub fn sign_transaction(signer: &IcxSigner, params: Value) -> Result<Value, TransactionError> {
    let Value::Object(mut object) = params else {
        return Err(TransactionError::NotAnObject);
    };

    object
        .entry("from")
        .or_insert_with(|| Value::String(signer.address().to_string()));

    let mut params = Value::Object(object);
    let hash = tx_hash(&params)?;
    log::debug!("signing transaction with hash 0x{}", hex::encode(hash));

    params[SIGNATURE_KEY] = Value::String(signer.sign(&hash)?);
    Ok(params)
}

/// Fills in `version`, `nid`, `stepLimit` and `timestamp` when the params do not carry them.
pub fn fill_defaults(
    params: &mut Value,
    nid: &str,
    step_limit: &str,
) -> Result<(), TransactionError> {
    let object = params.as_object_mut().ok_or(TransactionError::NotAnObject)?;

    object
        .entry("version")
        .or_insert_with(|| Value::String(DEFAULT_TX_VERSION.to_string()));
    object
        .entry("nid")
        .or_insert_with(|| Value::String(nid.to_string()));
    object
        .entry("stepLimit")
        .or_insert_with(|| Value::String(step_limit.to_string()));
    object
        .entry("timestamp")
        .or_insert_with(|| Value::String(format!("{:#x}", now_micros())));
    Ok(())
}

fn now_micros() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or_default()
}

fn encode_object_body(object: &Map<String, Value>, excluded: &[&str], out: &mut String) {
    let mut keys = object
        .keys()
        .filter(|k| !excluded.contains(&k.as_str()))
        .collect::<Vec<_>>();
    keys.sort();

    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(key);
        out.push('.');
        encode_value(&object[key], out);
    }
}

fn encode_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("\\0"),
        Value::Object(object) => {
            out.push('{');
            encode_object_body(object, &[], out);
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push('.');
                }
                encode_value(item, out);
            }
            out.push(']');
        }
        Value::String(s) => escape(s, out),
        Value::Number(n) => escape(&n.to_string(), out),
        Value::Bool(b) => escape(&b.to_string(), out),
    }
}

fn escape(s: &str, out: &mut String) {
    for c in s.chars() {
        if matches!(c, '\\' | '{' | '}' | '[' | ']' | '.') {
            out.push('\\');
        }
        out.push(c);
    }
}
