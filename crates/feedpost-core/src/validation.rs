//! Record verification: signature checks and proof tamper-evidence.
//!
//! A mismatch is never a fault here. Tampered bytes, a wrong key, or a
//! corrupted signature all yield `false`; errors are reserved for inputs
//! that cannot be canonically encoded at all.

use tracing::trace;

use crate::address;
use crate::crypto;
use crate::error::PostError;
use crate::post::SignedPost;

/// Verify a record's signature against its embedded author reference.
///
/// Recomputes the canonical encoding of the signed fields (everything in
/// the envelope except the signature itself) and checks it, whichever
/// variant the record is.
pub fn verify_post(post: &SignedPost) -> Result<bool, PostError> {
    let (author, signature, message) = match post {
        SignedPost::Merged(merged) => (&merged.author, &merged.signature, merged.signing_bytes()?),
        SignedPost::Split(split) => (
            &split.metadata.author,
            &split.metadata.signature,
            split.metadata.signing_bytes()?,
        ),
    };

    let valid = crypto::verify_ref(author, &message, signature);
    trace!(valid, variant = ?post.variant(), "verified post record");
    Ok(valid)
}

/// Check that a record's content still hashes to its signed proof.
///
/// This is the tamper-evidence path for the split shapes, independent of
/// signature verification: content travels unsigned, so a mutated copy is
/// caught by recomputing its content-address. Merged shapes embed content
/// directly under the signature and trivially pass.
pub fn proof_matches(post: &SignedPost) -> Result<bool, PostError> {
    match post {
        SignedPost::Merged(_) => Ok(true),
        SignedPost::Split(split) => {
            Ok(address::address_value(&split.content)? == split.metadata.body.proof)
        }
    }
}
