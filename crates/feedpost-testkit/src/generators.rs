//! Proptest strategies for property-based testing.
//!
//! Strategies for JSON-compatible values (canonical-encoding properties)
//! and for post arguments (pipeline properties).

use proptest::prelude::*;
use serde_json::Value;

use feedpost_core::{NewPostArgs, PostType, PostVariant, PrevLink};

/// Any JSON-compatible value: nested maps with string keys, arrays,
/// strings, integers, booleans, null.
pub fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[\\x00-\\x7F]{0,24}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..6).prop_map(|map| {
                Value::Object(map.into_iter().collect())
            }),
        ]
    })
}

/// Any of the four record shapes.
pub fn arb_variant() -> impl Strategy<Value = PostVariant> {
    prop_oneof![
        Just(PostVariant::MergedPositional),
        Just(PostVariant::MergedAddressed),
        Just(PostVariant::Split),
        Just(PostVariant::SplitTyped),
    ]
}

/// Post arguments whose prev link fits the given shape.
pub fn arb_args_for(variant: PostVariant) -> impl Strategy<Value = NewPostArgs> {
    let prev = match variant {
        PostVariant::MergedPositional => any::<u64>().prop_map(PrevLink::Seq).boxed(),
        _ => prop_oneof![
            Just(PrevLink::None),
            "[A-Za-z0-9_-]{43}".prop_map(PrevLink::Id),
        ]
        .boxed(),
    };

    (
        "[\\x20-\\x7E]{0,64}",
        "[\\x20-\\x7E]{0,32}",
        "[a-z]{1,12}",
        any::<u32>(),
        prev,
        proptest::option::of(prop_oneof![
            Just(PostType::Public),
            Just(PostType::Private)
        ]),
    )
        .prop_map(|(text, alt, username, seq, prev, kind)| NewPostArgs {
            text,
            alt,
            username,
            seq: seq as u64,
            prev,
            kind,
        })
}

/// A (variant, fitting args) pair.
pub fn arb_variant_and_args() -> impl Strategy<Value = (PostVariant, NewPostArgs)> {
    arb_variant().prop_flat_map(|variant| (Just(variant), arb_args_for(variant)))
}

/// Arbitrary media bytes.
pub fn arb_media_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..256)
}
