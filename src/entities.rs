//! Storage entity records produced by schema conversion.
//!
//! These are the persistence-layer shapes: one flat column per exported
//! field, with the nested metrics sub-objects already unpacked. Actual
//! persistence mechanics (inserts, sessions, migrations) belong to the
//! caller; nothing here performs I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tweet record, owning one [`ReferencedTweet`] child per reference carried
/// by the source payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    pub text: Option<String>,
    pub author_id: Option<u64>,
    pub conversation_id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub in_reply_to_user_id: Option<u64>,
    pub lang: Option<String>,
    pub public_metrics_retweet_count: Option<u64>,
    pub public_metrics_reply_count: Option<u64>,
    pub public_metrics_like_count: Option<u64>,
    pub public_metrics_quote_count: Option<u64>,
    pub possibly_sensitive: Option<bool>,
    pub reply_settings: Option<String>,
    pub source: Option<String>,
    pub referenced_tweets: Vec<ReferencedTweet>,
}

/// Edge record keyed by `(tweet_id, id)`: the owning tweet and the tweet it
/// points at. Never exists outside its parent [`Tweet`] entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedTweet {
    pub tweet_id: u64,
    pub id: u64,
    #[serde(rename = "type")]
    pub type_: String,
}

/// User record with audience metrics unpacked into flat columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub pinned_tweet_id: Option<u64>,
    pub profile_image_url: Option<String>,
    pub protected: Option<bool>,
    pub public_metrics_followers_count: Option<u64>,
    pub public_metrics_following_count: Option<u64>,
    pub public_metrics_tweet_count: Option<u64>,
    pub public_metrics_listed_count: Option<u64>,
    pub url: Option<String>,
    pub verified: Option<bool>,
}
