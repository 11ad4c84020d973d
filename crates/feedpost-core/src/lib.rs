//! # Feedpost Core
//!
//! Self-contained, content-addressed, signed post records for append-only
//! feeds.
//!
//! Each record couples user content (text, alt text, content-addressed
//! media mentions) with metadata chaining it to the author's previous
//! record and attesting to both its chain position and content integrity.
//! Records are immutable once signed; a changed post is a new record with
//! an incremented seq.
//!
//! This crate is the full pipeline: canonical encoding, content
//! addressing, assembly, signing, and verification. Feed storage,
//! transport, and key management are the caller's collaborators; the
//! caller supplies the correct `seq`/`prev` for the next entry and an
//! identity capability implementing [`Signer`].
//!
//! ## Key Types
//!
//! - [`SignedPost`] - A signed record of any historical shape
//! - [`PostVariant`] - The closed set of record shapes
//! - [`PostBuilder`] - Assembles and signs records
//! - [`ByteSource`] - Named-file or raw-buffer media input
//! - [`Keypair`] - Default Ed25519 identity capability
//!
//! ## Pipeline
//!
//! Canonical encoding (sorted keys, no whitespace, UTF-8) feeds both
//! hashing and signing; see [`canonical`]. Ids are base64url Blake3
//! digests; see [`address`].

pub mod address;
pub mod builder;
pub mod canonical;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod post;
pub mod source;
pub mod validation;

pub use address::{address_bytes, address_value};
pub use builder::{NewPostArgs, PostBuilder};
pub use canonical::canonical_bytes;
pub use clock::MonotonicClock;
pub use crypto::{Keypair, PublicKey, Signature, Signer};
pub use error::{PostError, SignerError};
pub use post::{
    get_id, Content, MergedContent, MergedPost, Metadata, PostType, PostVariant, PrevLink,
    SignedMetadata, SignedPost, SplitPost,
};
pub use source::ByteSource;
pub use validation::{proof_matches, verify_post};
