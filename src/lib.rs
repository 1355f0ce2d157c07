//! Schema validation and storage-entity mapping for Twitter API v2 tweet and
//! user payloads.
//!
//! Raw payloads are validated once into immutable [`schema`] instances; a
//! malformed payload surfaces as a [`ValidationError`] naming the offending
//! field path. Validated instances convert into flat storage [`entities`]
//! (with referenced tweets materialized as owned child records) or into
//! ordered key/value mappings for export to external sinks.
//!
//! ```
//! use tweetstore::Tweet;
//!
//! let tweet = Tweet::from_json(r#"{"id": 1585841080431976448, "lang": "en"}"#)?;
//!
//! let entity = tweet.to_entity();
//! assert_eq!(entity.lang.as_deref(), Some("en"));
//!
//! let mapping = tweet.to_mapping();
//! assert_eq!(mapping["id"], "1585841080431976448");
//! # Ok::<(), tweetstore::ValidationError>(())
//! ```

pub mod entities;
pub mod error;
pub mod schema;

pub use error::ValidationError;
pub use schema::{
    ReferencedTweet, ReferencedTweetType, ReplySettings, Tweet, TweetPublicMetrics, User,
    UserPublicMetrics,
};
