//! Error types for feedpost-core.

use thiserror::Error;

use crate::post::PostVariant;

/// Errors from the signing capability.
///
/// The capability is externally supplied and may be backed by remote or
/// hardware signers, so failures are carried as opaque messages.
#[derive(Debug, Error)]
#[error("signing failed: {0}")]
pub struct SignerError(pub String);

/// Errors that can occur while building or verifying posts.
///
/// Verification mismatches are not errors: `verify` yields `false` for
/// tampered or wrongly-signed records. Errors here are caller-input
/// problems or encoding failures.
#[derive(Debug, Error)]
pub enum PostError {
    #[error(transparent)]
    Signer(#[from] SignerError),

    #[error("prev link does not fit the {variant:?} record shape")]
    PrevShape { variant: PostVariant },

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
