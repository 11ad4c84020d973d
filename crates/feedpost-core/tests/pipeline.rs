//! End-to-end pipeline tests: build, sign, identify, and verify records
//! across every shape variant.

use feedpost_core::{
    get_id, proof_matches, verify_post, ByteSource, Keypair, NewPostArgs, PostBuilder, PostType,
    PostVariant, PrevLink, SignedPost,
};

// A 1x1 transparent PNG.
const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x62, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn first_post_args() -> NewPostArgs {
    NewPostArgs {
        text: "a test post".into(),
        alt: "testing".into(),
        username: "alice".into(),
        seq: 0,
        prev: PrevLink::None,
        kind: None,
    }
}

#[test]
fn create_first_post_in_feed() {
    init_tracing();
    let keypair = Keypair::generate();
    let builder = PostBuilder::new(&keypair);

    let post = builder
        .create(&ByteSource::file("test.png", PNG_BYTES), &first_post_args())
        .unwrap();

    let split = match &post {
        SignedPost::Split(split) => split,
        _ => panic!("split builder should produce a split record"),
    };
    assert_eq!(split.content.text, "a test post");
    assert_eq!(split.content.alt, "testing");
    assert_eq!(split.metadata.body.seq, 0);
    assert_eq!(split.metadata.body.prev, None);
    assert_eq!(split.metadata.body.username, "alice");
    assert!(!split.metadata.body.proof.is_empty());
    assert_ne!(split.metadata.signature.as_bytes(), &[0u8; 64]);

    // One mention, hash + extension.
    assert_eq!(split.content.mentions.len(), 1);
    assert!(split.content.mentions[0].ends_with(".png"));
}

#[test]
fn get_id_is_stable_per_record_but_not_across_resignings() {
    let keypair = Keypair::from_seed(&[7; 32]);
    let builder = PostBuilder::new(&keypair);
    let post = builder
        .create(&ByteSource::file("test.png", PNG_BYTES), &first_post_args())
        .unwrap();

    // Same immutable record, same id, any number of times.
    let id1 = get_id(&post).unwrap();
    let id2 = get_id(&post).unwrap();
    assert_eq!(id1, id2);
    assert!(!id1.is_empty());
}

#[test]
fn verify_and_tamper_evidence() {
    let keypair = Keypair::generate();
    let builder = PostBuilder::new(&keypair);
    let post = builder
        .create(&ByteSource::file("test.png", PNG_BYTES), &first_post_args())
        .unwrap();

    assert!(verify_post(&post).unwrap());
    assert!(proof_matches(&post).unwrap());

    // Externally mutated content: proof mismatch, independent of the
    // signature check on the untouched metadata.
    let mut mutated = post.clone();
    if let SignedPost::Split(ref mut split) = mutated {
        split.content.alt = "not the original alt".into();
    }
    assert!(verify_post(&mutated).unwrap());
    assert!(!proof_matches(&mutated).unwrap());
}

#[test]
fn entry_points_converge_on_equal_bytes() {
    let keypair = Keypair::generate();
    let builder = PostBuilder::new(&keypair);
    let args = first_post_args();

    // A file without an extension contributes no suffix, so the proof is
    // identical to the buffer path.
    let from_file = builder
        .create(&ByteSource::file("photo", PNG_BYTES), &args)
        .unwrap();
    let from_buffer = builder.create_from_buffer(PNG_BYTES, &args).unwrap();

    let (file_split, buffer_split) = match (&from_file, &from_buffer) {
        (SignedPost::Split(a), SignedPost::Split(b)) => (a, b),
        _ => panic!("expected split records"),
    };
    assert_eq!(file_split.metadata.body.proof, buffer_split.metadata.body.proof);
    assert_eq!(file_split.content.mentions, buffer_split.content.mentions);

    // With an extension, only the suffix differs: the hash component is
    // still the same.
    let named = builder
        .create(&ByteSource::file("photo.png", PNG_BYTES), &args)
        .unwrap();
    if let (SignedPost::Split(named), SignedPost::Split(buffer)) = (&named, &from_buffer) {
        let suffixed = format!("{}.png", buffer.content.mentions[0]);
        assert_eq!(named.content.mentions[0], suffixed);
    }
}

#[test]
fn back_to_back_creates_have_increasing_timestamps() {
    let keypair = Keypair::generate();
    let builder = PostBuilder::new(&keypair);

    let first = builder
        .create(&ByteSource::raw(PNG_BYTES), &first_post_args())
        .unwrap();
    let first_id = get_id(&first).unwrap();

    let second = builder
        .create(
            &ByteSource::raw(PNG_BYTES),
            &NewPostArgs {
                seq: 1,
                prev: PrevLink::Id(first_id),
                ..first_post_args()
            },
        )
        .unwrap();

    assert!(second.timestamp() > first.timestamp());
    assert_eq!(second.seq(), 1);
}

#[test]
fn historical_variants_roundtrip_and_verify() {
    let keypair = Keypair::from_seed(&[0x21; 32]);

    let cases = [
        (PostVariant::MergedPositional, PrevLink::Seq(3)),
        (PostVariant::MergedAddressed, PrevLink::Id("prior".into())),
        (PostVariant::Split, PrevLink::Id("prior".into())),
        (PostVariant::SplitTyped, PrevLink::Id("prior".into())),
    ];

    for (variant, prev) in cases {
        let builder = PostBuilder::new(&keypair).with_variant(variant);
        let post = builder
            .create(
                &ByteSource::file("clip.gif", PNG_BYTES),
                &NewPostArgs {
                    text: "older shapes still verify".into(),
                    alt: "".into(),
                    username: "bob".into(),
                    seq: 4,
                    prev,
                    kind: Some(PostType::Private),
                },
            )
            .unwrap();

        // A holder who only has the JSON can classify and verify it.
        let wire = serde_json::to_string(&post).unwrap();
        let parsed: SignedPost = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed.variant(), variant);
        assert!(verify_post(&parsed).unwrap(), "{variant:?}");
        assert!(proof_matches(&parsed).unwrap());
    }
}

#[test]
fn typed_variants_honor_the_caller_kind() {
    let keypair = Keypair::generate();
    let builder = PostBuilder::new(&keypair).with_variant(PostVariant::SplitTyped);

    let post = builder
        .create(
            &ByteSource::raw(PNG_BYTES),
            &NewPostArgs {
                kind: Some(PostType::Private),
                ..first_post_args()
            },
        )
        .unwrap();

    match post {
        SignedPost::Split(split) => {
            assert_eq!(split.metadata.body.kind, Some(PostType::Private))
        }
        _ => panic!("expected split record"),
    }
}
