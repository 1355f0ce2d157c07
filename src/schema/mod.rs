//! Validated schema representations of Twitter API v2 payloads.
//!
//! Each schema type is constructed exactly once from raw input via
//! [`from_value`] or [`from_json`] and is immutable from then on. The
//! strict sub-schemas (public metrics, referenced tweets) reject
//! unrecognized keys; the top-level tweet and user schemas ignore them.

pub mod tweet;
pub mod user;

pub use tweet::{ReferencedTweet, ReferencedTweetType, ReplySettings, Tweet, TweetPublicMetrics};
pub use user::{User, UserPublicMetrics};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationError;

/// Construct and validate a schema instance from a raw JSON value.
///
/// On failure the returned error carries the path of the first offending
/// field together with the constraint it violated.
pub fn from_value<T: DeserializeOwned>(raw: Value) -> Result<T, ValidationError> {
    serde_path_to_error::deserialize(raw).map_err(|err| {
        let err = ValidationError::field(err);
        tracing::debug!(error = %err, "payload failed schema validation");
        err
    })
}

/// Construct and validate a schema instance from raw JSON text.
pub fn from_json<T: DeserializeOwned>(raw: &str) -> Result<T, ValidationError> {
    let value: Value = serde_json::from_str(raw).map_err(ValidationError::Parse)?;
    from_value(value)
}
