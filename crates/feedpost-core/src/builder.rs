//! Post assembly: content, metadata, and the signed envelope.
//!
//! The builder is pure assembly over its inputs. It never validates or
//! recomputes chain positions; `seq` and `prev` are copied through from
//! the caller, whose feed-state component is responsible for supplying
//! correct values.

use bytes::Bytes;
use tracing::debug;

use crate::address;
use crate::clock::MonotonicClock;
use crate::crypto::{Signature, Signer};
use crate::error::PostError;
use crate::post::{
    Content, MergedContent, MergedPost, Metadata, PostType, PostVariant, PrevLink, SignedMetadata,
    SignedPost, SplitPost,
};
use crate::source::ByteSource;

/// Caller inputs for a new post.
///
/// `prev` must fit the builder's variant: a positional link for the
/// merged-positional shape, a content-address (or none, for the first
/// entry) for every other shape. `kind` is only honored by the typed
/// variants and defaults to public.
#[derive(Debug, Clone)]
pub struct NewPostArgs {
    pub text: String,
    pub alt: String,
    pub username: String,
    pub seq: u64,
    pub prev: PrevLink,
    pub kind: Option<PostType>,
}

/// Assembles and signs post records for one identity and one variant.
pub struct PostBuilder<'a, S: Signer> {
    signer: &'a S,
    variant: PostVariant,
    clock: &'a MonotonicClock,
}

impl<'a, S: Signer> PostBuilder<'a, S> {
    /// A builder writing the split (current) shape, stamped from the
    /// process-wide monotonic clock.
    pub fn new(signer: &'a S) -> Self {
        Self {
            signer,
            variant: PostVariant::Split,
            clock: MonotonicClock::global(),
        }
    }

    /// Select the record shape to produce.
    pub fn with_variant(mut self, variant: PostVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Inject a clock (tests, or serialization policies beyond the
    /// process-wide default).
    pub fn with_clock(mut self, clock: &'a MonotonicClock) -> Self {
        self.clock = clock;
        self
    }

    /// The shape this builder produces.
    pub fn variant(&self) -> PostVariant {
        self.variant
    }

    /// Build content from a byte source: one content-addressed mention
    /// plus the caller's text and alt.
    pub fn build_content(&self, source: &ByteSource, text: &str, alt: &str) -> Content {
        Content {
            text: text.to_owned(),
            alt: alt.to_owned(),
            mentions: vec![mention(source)],
        }
    }

    /// Build chain metadata for already-built content.
    ///
    /// Stamps the next monotonic timestamp and binds the content by its
    /// proof hash; `seq`, `prev`, and `username` pass through unchanged.
    pub fn build_metadata(
        &self,
        content: &Content,
        args: &NewPostArgs,
    ) -> Result<Metadata, PostError> {
        Ok(Metadata {
            timestamp: self.clock.now(),
            proof: address::address_value(content)?,
            seq: args.seq,
            prev: self.split_prev(&args.prev)?,
            username: args.username.clone(),
            kind: match self.variant {
                PostVariant::SplitTyped => Some(args.kind.unwrap_or(PostType::Public)),
                _ => None,
            },
        })
    }

    /// Assemble and sign a complete post from a byte source.
    pub fn create(&self, source: &ByteSource, args: &NewPostArgs) -> Result<SignedPost, PostError> {
        let post = match self.variant {
            PostVariant::MergedPositional | PostVariant::MergedAddressed => {
                self.create_merged(source, args)?
            }
            PostVariant::Split | PostVariant::SplitTyped => self.create_split(source, args)?,
        };

        debug!(
            variant = ?self.variant,
            seq = args.seq,
            "signed post record"
        );
        Ok(post)
    }

    /// Assemble and sign a complete post from an already-read buffer.
    ///
    /// Same contract as [`create`](Self::create) through the raw arm of
    /// [`ByteSource`]; equal bytes hash to the same mention component no
    /// matter which entry point supplied them.
    pub fn create_from_buffer(
        &self,
        bytes: impl Into<Bytes>,
        args: &NewPostArgs,
    ) -> Result<SignedPost, PostError> {
        self.create(&ByteSource::raw(bytes.into()), args)
    }

    fn create_split(&self, source: &ByteSource, args: &NewPostArgs) -> Result<SignedPost, PostError> {
        let content = self.build_content(source, &args.text, &args.alt);
        let body = self.build_metadata(&content, args)?;

        let mut metadata = SignedMetadata {
            body,
            author: self.signer.public_ref(),
            signature: Signature::ZERO,
        };
        let message = metadata.signing_bytes()?;
        metadata.signature = self.signer.sign(&message)?;

        Ok(SignedPost::Split(SplitPost { metadata, content }))
    }

    fn create_merged(&self, source: &ByteSource, args: &NewPostArgs) -> Result<SignedPost, PostError> {
        let prev = match (self.variant, &args.prev) {
            (PostVariant::MergedPositional, PrevLink::Seq(n)) => PrevLink::Seq(*n),
            (PostVariant::MergedAddressed, PrevLink::Id(id)) => PrevLink::Id(id.clone()),
            (PostVariant::MergedAddressed, PrevLink::None) => PrevLink::None,
            _ => {
                return Err(PostError::PrevShape {
                    variant: self.variant,
                })
            }
        };

        let kind = match self.variant {
            // The positional era predates the type tag; everything public.
            PostVariant::MergedPositional => PostType::Public,
            _ => args.kind.unwrap_or(PostType::Public),
        };

        let mut post = MergedPost {
            author: self.signer.public_ref(),
            seq: args.seq,
            prev,
            username: args.username.clone(),
            timestamp: self.clock.now(),
            content: MergedContent {
                text: args.text.clone(),
                alt: args.alt.clone(),
                mentions: vec![mention(source)],
                kind,
            },
            signature: Signature::ZERO,
        };
        let message = post.signing_bytes()?;
        post.signature = self.signer.sign(&message)?;

        Ok(SignedPost::Merged(post))
    }

    /// Convert a prev link to the content-addressed form the split and
    /// merged-addressed shapes require.
    fn split_prev(&self, prev: &PrevLink) -> Result<Option<String>, PostError> {
        match prev {
            PrevLink::Id(id) => Ok(Some(id.clone())),
            PrevLink::None => Ok(None),
            PrevLink::Seq(_) => Err(PostError::PrevShape {
                variant: self.variant,
            }),
        }
    }
}

/// One content-addressed mention for a byte source: the hash of its bytes,
/// suffixed with the file extension when the source carries one.
fn mention(source: &ByteSource) -> String {
    let hash = address::address_bytes(source.bytes());
    match source.extension() {
        Some(ext) => format!("{hash}.{ext}"),
        None => hash,
    }
}
