//! Post records: the data model and its historical shape variants.
//!
//! A post couples caller content (text, alt text, content-addressed media
//! mentions) with metadata chaining it into the author's append-only feed.
//! Once signed, a record is immutable; a changed post is a new record with
//! an incremented seq.
//!
//! The record shape evolved through a closed set of variants, all of which
//! remain first-class for reading and verification:
//!
//! - [`PostVariant::MergedPositional`]: one signed object, content embedded,
//!   positional (numeric) prev, type fixed to `"public"`.
//! - [`PostVariant::MergedAddressed`]: one signed object, content-addressed
//!   prev, caller-supplied type.
//! - [`PostVariant::Split`]: signed metadata carrying a `proof` hash, with
//!   content travelling unsigned alongside it.
//! - [`PostVariant::SplitTyped`]: split shape plus a `type` field inside
//!   the signed metadata.

use serde::{Deserialize, Serialize};

use crate::address;
use crate::canonical;
use crate::crypto::Signature;
use crate::error::PostError;

/// Classifies the intent of a post. The tag is informational only;
/// encrypting private content is a higher layer's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Public,
    Private,
}

/// The closed set of record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostVariant {
    /// Single signed object, numeric prev, type hard-coded to public.
    MergedPositional,
    /// Single signed object, content-addressed prev, caller-supplied type.
    MergedAddressed,
    /// Split metadata/content, no type field.
    Split,
    /// Split metadata/content with a type field in the signed metadata.
    SplitTyped,
}

impl PostVariant {
    /// Whether this shape keeps content outside the signed object.
    pub fn is_split(self) -> bool {
        matches!(self, Self::Split | Self::SplitTyped)
    }

    /// Whether this shape carries a caller-visible type tag.
    pub fn is_typed(self) -> bool {
        matches!(self, Self::MergedAddressed | Self::SplitTyped)
    }
}

/// Link to the author's immediately preceding record.
///
/// The positional form belongs to the merged-positional era; later shapes
/// chain by content-address, with `None` marking the first entry of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrevLink {
    /// Positional index of the previous record.
    Seq(u64),
    /// Content-address of the previous record.
    Id(String),
    /// First entry of a feed.
    None,
}

/// Unsigned post content: text, alt text, and content-addressed mentions.
///
/// Mentions are ids of attached media, optionally suffixed with `.` and
/// the original file's extension so consumers can infer a content type
/// without fetching bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub text: String,
    pub alt: String,
    pub mentions: Vec<String>,
}

/// Content as embedded in the merged shapes, which carry the type tag
/// inside the content object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedContent {
    pub text: String,
    pub alt: String,
    pub mentions: Vec<String>,
    #[serde(rename = "type")]
    pub kind: PostType,
}

/// A merged-shape record: content signed directly alongside the chain
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedPost {
    pub author: String,
    pub seq: u64,
    pub prev: PrevLink,
    pub username: String,
    pub timestamp: i64,
    pub content: MergedContent,
    pub signature: Signature,
}

/// Chain metadata for the split shapes. `proof` is the content-address of
/// the canonical encoding of the post's [`Content`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub timestamp: i64,
    pub proof: String,
    pub seq: u64,
    pub prev: Option<String>,
    pub username: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PostType>,
}

/// Signed metadata: the chain fields plus the author reference, covered
/// by the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMetadata {
    #[serde(flatten)]
    pub body: Metadata,
    pub author: String,
    pub signature: Signature,
}

/// A split-shape record: signed metadata with content travelling unsigned
/// alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPost {
    pub metadata: SignedMetadata,
    pub content: Content,
}

/// A signed post of any variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignedPost {
    Split(SplitPost),
    Merged(MergedPost),
}

/// Canonical bytes of an envelope minus its `signature` field.
///
/// This is exactly what the signing capability signs and what verification
/// recomputes. Content in the split shapes is never part of it; its
/// integrity is covered transitively through `proof`.
pub fn signing_bytes<T: Serialize>(envelope: &T) -> Result<Vec<u8>, PostError> {
    let mut value = serde_json::to_value(envelope)?;
    if let serde_json::Value::Object(ref mut map) = value {
        map.remove("signature");
    }
    Ok(canonical::value_bytes(&value))
}

impl MergedPost {
    /// The bytes covered by this record's signature.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, PostError> {
        signing_bytes(self)
    }
}

impl SignedMetadata {
    /// The bytes covered by this record's signature.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, PostError> {
        signing_bytes(self)
    }
}

impl SignedPost {
    /// Classify a record by structure.
    ///
    /// A merged record with a null prev is classified as merged-addressed:
    /// the positional era always carried a numeric prev.
    pub fn variant(&self) -> PostVariant {
        match self {
            Self::Merged(post) => match post.prev {
                PrevLink::Seq(_) => PostVariant::MergedPositional,
                PrevLink::Id(_) | PrevLink::None => PostVariant::MergedAddressed,
            },
            Self::Split(post) => match post.metadata.body.kind {
                Some(_) => PostVariant::SplitTyped,
                None => PostVariant::Split,
            },
        }
    }

    /// The author reference this record was signed under.
    pub fn author(&self) -> &str {
        match self {
            Self::Merged(post) => &post.author,
            Self::Split(post) => &post.metadata.author,
        }
    }

    /// The record's sequence number within its feed.
    pub fn seq(&self) -> u64 {
        match self {
            Self::Merged(post) => post.seq,
            Self::Split(post) => post.metadata.body.seq,
        }
    }

    /// The record's timestamp.
    pub fn timestamp(&self) -> i64 {
        match self {
            Self::Merged(post) => post.timestamp,
            Self::Split(post) => post.metadata.body.timestamp,
        }
    }

    /// The record's signature.
    pub fn signature(&self) -> &Signature {
        match self {
            Self::Merged(post) => &post.signature,
            Self::Split(post) => &post.metadata.signature,
        }
    }
}

/// Content-address the final signed envelope, signature included.
///
/// Because signatures are generally non-deterministic, re-signing
/// logically identical content yields a different id: this is a local or
/// session identifier, not a content-address guarantee. It is stable for
/// any one immutable record.
pub fn get_id(post: &SignedPost) -> Result<String, PostError> {
    address::address_value(post)
}
