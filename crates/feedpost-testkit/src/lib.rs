//! # Feedpost Testkit
//!
//! Testing utilities for feedpost.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: deterministic identities, a PNG byte fixture, and
//!   one-call post construction for test scenarios
//! - **Generators**: proptest strategies for JSON values and post
//!   arguments
//!
//! ## Fixtures
//!
//! ```rust
//! use feedpost_testkit::TestFixture;
//! use feedpost_core::verify_post;
//!
//! let fixture = TestFixture::with_seed([0x42; 32]);
//! let post = fixture.first_post();
//! assert!(verify_post(&post).unwrap());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use feedpost_testkit::generators::arb_json;
//! use feedpost_core::canonical::value_bytes;
//!
//! proptest! {
//!     #[test]
//!     fn encoding_is_deterministic(value in arb_json()) {
//!         prop_assert_eq!(value_bytes(&value), value_bytes(&value));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{first_post_args, TestFixture, PNG_FIXTURE};
pub use generators::{arb_args_for, arb_json, arb_media_bytes, arb_variant, arb_variant_and_args};
