//! Test fixtures and helpers.
//!
//! Common setup code for unit and integration tests: deterministic
//! identities, a real PNG byte fixture, and one-call post construction.

use feedpost_core::{
    ByteSource, Keypair, NewPostArgs, PostBuilder, PostVariant, PrevLink, SignedPost,
};

/// A 1x1 transparent PNG, the smallest realistic media attachment.
pub const PNG_FIXTURE: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x62, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// A test fixture holding one author identity.
pub struct TestFixture {
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a fixture with a random identity.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic identity from a seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    /// The fixture author's public reference.
    pub fn author(&self) -> String {
        use feedpost_core::Signer;
        self.keypair.public_ref()
    }

    /// A builder for the given shape, signing as this fixture's identity.
    pub fn builder(&self, variant: PostVariant) -> PostBuilder<'_, Keypair> {
        PostBuilder::new(&self.keypair).with_variant(variant)
    }

    /// The PNG fixture wrapped as a named file source.
    pub fn png_source(&self) -> ByteSource {
        ByteSource::file("fixture.png", PNG_FIXTURE)
    }

    /// Create the first post of a feed in the split shape.
    pub fn first_post(&self) -> SignedPost {
        self.builder(PostVariant::Split)
            .create(&self.png_source(), &first_post_args())
            .expect("fixture post should build")
    }

    /// Create a chained post at the given position.
    pub fn chained_post(&self, seq: u64, prev: &str) -> SignedPost {
        self.builder(PostVariant::Split)
            .create(
                &self.png_source(),
                &NewPostArgs {
                    seq,
                    prev: PrevLink::Id(prev.to_owned()),
                    ..first_post_args()
                },
            )
            .expect("fixture post should build")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments for the first entry of a feed.
pub fn first_post_args() -> NewPostArgs {
    NewPostArgs {
        text: "a test post".into(),
        alt: "testing".into(),
        username: "alice".into(),
        seq: 0,
        prev: PrevLink::None,
        kind: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedpost_core::{get_id, verify_post};

    #[test]
    fn test_fixture_posts_verify() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        let first = fixture.first_post();
        assert!(verify_post(&first).unwrap());

        let id = get_id(&first).unwrap();
        let second = fixture.chained_post(1, &id);
        assert!(verify_post(&second).unwrap());
        assert_eq!(second.seq(), 1);
    }

    #[test]
    fn test_png_fixture_is_a_png() {
        assert_eq!(&PNG_FIXTURE[..8], b"\x89PNG\r\n\x1a\n");
    }
}
