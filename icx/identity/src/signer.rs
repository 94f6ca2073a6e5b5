// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

//! Recoverable secp256k1 signing over pre-hashed messages.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use libsecp256k1::{Message, PublicKey, RecoveryId, SecretKey, Signature};
use thiserror::Error;
use zeroize::Zeroize;

use crate::address::Address;
use crate::keystore::{key_from_key_store, KeyStoreError};

/// Length of a compact `r || s` signature.
pub const SIGNATURE_LEN: usize = 64;
/// Length of a compact signature followed by its recovery id.
pub const RECOVERABLE_SIGNATURE_LEN: usize = SIGNATURE_LEN + 1;

const PRIVATE_KEY_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    #[error("cannot recover public key: {0}")]
    Recovery(String),
}

/// A raw 32 byte secp256k1 secret. The bytes are wiped when the key is dropped and never show
/// up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; PRIVATE_KEY_LEN]);

impl PrivateKey {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignerError> {
        let raw: [u8; PRIVATE_KEY_LEN] = bytes.try_into().map_err(|_| {
            SignerError::InvalidPrivateKey(format!(
                "expected {PRIVATE_KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.0
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// Signs 32 byte digests with a fixed private key. Signatures are deterministic (RFC 6979) and
/// carry a recovery id so that verifiers can reconstruct the public key, and with it the
/// sender address, from the signature alone.
///
/// # Examples
/// ```no_run
/// use icx_identity::IcxSigner;
///
/// let signer = IcxSigner::from_key_store("./keystore.json", "password").unwrap();
/// println!("address: {}", signer.address());
/// println!("signature: {}", signer.sign(&[0u8; 32]).unwrap());
/// ```
pub struct IcxSigner {
    secret: SecretKey,
    public: PublicKey,
}

impl IcxSigner {
    pub fn new(private_key: &PrivateKey) -> Result<Self, SignerError> {
        let secret = SecretKey::parse(private_key.as_bytes())
            .map_err(|e| SignerError::InvalidPrivateKey(format!("{e:?}")))?;
        let public = PublicKey::from_secret_key(&secret);
        Ok(Self { secret, public })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignerError> {
        Self::new(&PrivateKey::from_slice(bytes)?)
    }

    /// Creates a signer with a freshly generated key.
    pub fn random() -> Self {
        let secret = SecretKey::random(&mut rand::thread_rng());
        let public = PublicKey::from_secret_key(&secret);
        Self { secret, public }
    }

    /// Loads the private key from a password protected keystore file.
    pub fn from_key_store(path: impl AsRef<Path>, password: &str) -> Result<Self, KeyStoreError> {
        let private_key = key_from_key_store(path, password)?;
        Self::new(&private_key).map_err(|e| KeyStoreError::new(e.to_string()))
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey(self.secret.serialize())
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public)
    }

    /// Signs the digest and returns the compact signature with its recovery id. The caller is
    /// responsible for hashing; `digest` is signed as is.
    pub fn sign_recoverable(
        &self,
        digest: &[u8],
    ) -> Result<([u8; SIGNATURE_LEN], u8), SignerError> {
        let message = parse_digest(digest)?;
        let (signature, recovery_id) = libsecp256k1::sign(&message, &self.secret);
        Ok((signature.serialize(), recovery_id.serialize()))
    }

    /// Same as [`IcxSigner::sign_recoverable`], with the recovery id appended to the signature
    /// and the result base64 encoded.
    pub fn sign(&self, digest: &[u8]) -> Result<String, SignerError> {
        let (signature, recovery_id) = self.sign_recoverable(digest)?;

        let mut bytes = Vec::with_capacity(RECOVERABLE_SIGNATURE_LEN);
        bytes.extend_from_slice(&signature);
        bytes.push(recovery_id);

        Ok(STANDARD.encode(bytes))
    }
}

impl fmt::Debug for IcxSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcxSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Splits a base64 signature produced by [`IcxSigner::sign`] into its compact signature and
/// recovery id.
pub fn decode_signature(encoded: &str) -> Result<([u8; SIGNATURE_LEN], u8), SignerError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;
    if bytes.len() != RECOVERABLE_SIGNATURE_LEN {
        return Err(SignerError::InvalidSignature(format!(
            "expected {RECOVERABLE_SIGNATURE_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let (signature, recovery_id) = bytes.split_at(SIGNATURE_LEN);
    let mut compact = [0u8; SIGNATURE_LEN];
    compact.copy_from_slice(signature);
    Ok((compact, recovery_id[0]))
}

/// Checks a compact signature against a digest and public key.
pub fn verify(digest: &[u8], signature: &[u8; SIGNATURE_LEN], public_key: &PublicKey) -> bool {
    let Ok(message) = parse_digest(digest) else {
        return false;
    };
    match Signature::parse_standard(signature) {
        Ok(signature) => libsecp256k1::verify(&message, &signature, public_key),
        Err(_) => false,
    }
}

/// Reconstructs the signer's public key from a recoverable signature.
pub fn recover(
    digest: &[u8],
    signature: &[u8; SIGNATURE_LEN],
    recovery_id: u8,
) -> Result<PublicKey, SignerError> {
    let message = parse_digest(digest)?;
    let signature = Signature::parse_standard(signature)
        .map_err(|e| SignerError::InvalidSignature(format!("{e:?}")))?;
    let recovery_id = RecoveryId::parse(recovery_id)
        .map_err(|e| SignerError::InvalidSignature(format!("{e:?}")))?;

    libsecp256k1::recover(&message, &signature, &recovery_id)
        .map_err(|e| SignerError::Recovery(format!("{e:?}")))
}

fn parse_digest(digest: &[u8]) -> Result<Message, SignerError> {
    let digest: &[u8; 32] = digest.try_into().map_err(|_| {
        SignerError::InvalidSignature(format!("digest must be 32 bytes, got {}", digest.len()))
    })?;
    Ok(Message::parse(digest))
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;
    use sha3::{Digest, Sha3_256};

    use super::*;

    fn hash(message: &[u8]) -> [u8; 32] {
        Sha3_256::digest(message).into()
    }

    #[test]
    fn sign_recoverable_verifies() {
        let signer = IcxSigner::random();
        let digest = hash(b"message_for_test");

        let (signature, recovery_id) = signer.sign_recoverable(&digest).unwrap();
        assert!(recovery_id < 4);
        assert!(verify(&digest, &signature, signer.public_key()));

        let other_digest = hash(b"invalid message");
        assert!(!verify(&other_digest, &signature, signer.public_key()));

        let other_signer = IcxSigner::random();
        assert!(!verify(&digest, &signature, other_signer.public_key()));
    }

    #[test]
    fn sign_recoverable_recovers_public_key() {
        let signer = IcxSigner::random();
        let digest = hash(b"recover me");

        let (signature, recovery_id) = signer.sign_recoverable(&digest).unwrap();
        let recovered = recover(&digest, &signature, recovery_id).unwrap();
        assert_eq!(&recovered, signer.public_key());
    }

    #[test]
    fn signing_is_deterministic() {
        let signer = IcxSigner::random();
        let digest = hash(b"same input");
        assert_eq!(signer.sign(&digest).unwrap(), signer.sign(&digest).unwrap());
    }

    #[test]
    fn rejects_digest_with_wrong_length() {
        let signer = IcxSigner::random();
        assert!(matches!(
            signer.sign_recoverable(b"not hashed"),
            Err(SignerError::InvalidSignature(_))
        ));
    }

    #[test]
    fn rejects_invalid_private_keys() {
        assert!(IcxSigner::from_bytes(&[1u8; 31]).is_err());
        // zero is not a valid scalar
        assert!(IcxSigner::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn private_key_roundtrip() {
        let signer = IcxSigner::random();
        let restored = IcxSigner::new(&signer.private_key()).unwrap();
        assert_eq!(restored.address(), signer.address());
        assert_eq!(format!("{:?}", signer.private_key()), "PrivateKey(..)");
    }

    #[test]
    fn decode_signature_rejects_bad_length() {
        let encoded = STANDARD.encode([0u8; SIGNATURE_LEN]);
        assert!(decode_signature(&encoded).is_err());
        assert!(decode_signature("not base64!").is_err());
    }

    #[quickcheck]
    fn prop_sign_matches_sign_recoverable(message: Vec<u8>) -> bool {
        let signer = IcxSigner::random();
        let digest = hash(&message);

        let encoded = signer.sign(&digest).unwrap();
        let decoded = decode_signature(&encoded).unwrap();

        decoded == signer.sign_recoverable(&digest).unwrap()
    }
}
