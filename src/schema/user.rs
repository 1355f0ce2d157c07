use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::entities;
use crate::error::ValidationError;

/// Audience counters attached to a user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPublicMetrics {
    pub followers_count: Option<u64>,
    pub following_count: Option<u64>,
    pub tweet_count: Option<u64>,
    pub listed_count: Option<u64>,
}

/// Validated user payload. `id`, `name` and `username` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub created_at: Option<DateTime<Utc>>,
    pub protected: Option<bool>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub verified: Option<bool>,
    #[serde(default)]
    pub public_metrics: UserPublicMetrics,
    pub pinned_tweet_id: Option<u64>,
    pub profile_image_url: Option<String>,
}

impl User {
    /// Validate a raw JSON value into a user schema instance.
    pub fn from_value(raw: Value) -> Result<Self, ValidationError> {
        crate::schema::from_value(raw)
    }

    /// Validate raw JSON text into a user schema instance.
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        crate::schema::from_json(raw)
    }

    /// Map the validated user onto its storage entity, with metrics unpacked
    /// into one flat column per counter. Users own no child records.
    pub fn to_entity(&self) -> entities::User {
        entities::User {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
            description: self.description.clone(),
            location: self.location.clone(),
            pinned_tweet_id: self.pinned_tweet_id,
            profile_image_url: self.profile_image_url.clone(),
            protected: self.protected,
            public_metrics_followers_count: self.public_metrics.followers_count,
            public_metrics_following_count: self.public_metrics.following_count,
            public_metrics_tweet_count: self.public_metrics.tweet_count,
            public_metrics_listed_count: self.public_metrics.listed_count,
            url: self.url.clone(),
            verified: self.verified,
        }
    }

    /// Flatten the user into an ordered key/value mapping for export.
    ///
    /// `id` and `pinned_tweet_id` are rendered as decimal strings; an absent
    /// `pinned_tweet_id` is exported as `null`.
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), json!(self.id.to_string()));
        map.insert("name".into(), json!(&self.name));
        map.insert("username".into(), json!(&self.username));
        map.insert("created_at".into(), json!(&self.created_at));
        map.insert("description".into(), json!(&self.description));
        map.insert("location".into(), json!(&self.location));
        map.insert(
            "pinned_tweet_id".into(),
            json!(self.pinned_tweet_id.map(|id| id.to_string())),
        );
        map.insert("profile_image_url".into(), json!(&self.profile_image_url));
        map.insert("protected".into(), json!(self.protected));
        map.insert(
            "public_metrics_followers_count".into(),
            json!(self.public_metrics.followers_count),
        );
        map.insert(
            "public_metrics_following_count".into(),
            json!(self.public_metrics.following_count),
        );
        map.insert(
            "public_metrics_tweet_count".into(),
            json!(self.public_metrics.tweet_count),
        );
        map.insert(
            "public_metrics_listed_count".into(),
            json!(self.public_metrics.listed_count),
        );
        map.insert("url".into(), json!(&self.url));
        map.insert("verified".into(), json!(self.verified));
        map
    }
}
