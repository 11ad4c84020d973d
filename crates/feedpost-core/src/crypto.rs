//! Identity capability: the signing contract and a default Ed25519 identity.
//!
//! The core never signs content directly. The capability signs exactly the
//! canonical encoding of a record's signed fields (everything except the
//! `signature` field itself); content integrity is covered transitively
//! through the `proof` hash embedded in the signed metadata.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signer as DalekSigner, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::SignerError;

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The public reference embedded in records as the `author` field.
    pub fn to_ref(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }

    /// Parse a public reference back into a key.
    ///
    /// Returns None for anything that is not 32 base64url bytes; callers
    /// treat an unparseable author as a verification failure, not a fault.
    pub fn from_ref(s: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(s).ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Verify a signature over a message. Any mismatch yields false.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        verifying_key.verify(message, &sig).is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", &hex::encode(self.0)[..16])
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 64-byte Ed25519 signature.
///
/// Serialized inside records as a base64url string, matching the ids.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Encode as the record wire string.
    pub fn to_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }

    /// Decode from the record wire string.
    pub fn from_base64(s: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(s).ok()?;
        let arr: [u8; 64] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// The zero signature (invalid, used as a placeholder while the
    /// signed bytes are being assembled).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &hex::encode(self.0)[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Signature::from_base64(&s)
            .ok_or_else(|| serde::de::Error::custom("expected 64 base64url bytes"))
    }
}

/// The externally supplied signing capability.
///
/// Implementations may be backed by local keys, remote services, or
/// hardware; the core only requires these two operations.
pub trait Signer {
    /// Sign a message.
    fn sign(&self, message: &[u8]) -> Result<Signature, SignerError>;

    /// The public reference embedded as the record's `author` field.
    fn public_ref(&self) -> String;
}

/// Verify a signature against an author reference.
///
/// An unparseable reference or a mismatched signature both yield false.
pub fn verify_ref(author: &str, message: &[u8], signature: &Signature) -> bool {
    match PublicKey::from_ref(author) {
        Some(key) => key.verify(message, signature),
        None => false,
    }
}

/// A local Ed25519 keypair, the default identity capability.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// Create from a 32-byte seed. Deterministic; used heavily in tests.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Get the public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl Signer for Keypair {
    fn sign(&self, message: &[u8]) -> Result<Signature, SignerError> {
        let sig = self.signing_key.sign(message);
        Ok(Signature(sig.to_bytes()))
    }

    fn public_ref(&self) -> String {
        self.public_key().to_ref()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}
