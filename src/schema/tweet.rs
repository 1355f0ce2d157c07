use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::entities;
use crate::error::ValidationError;

/// How one tweet relates to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencedTweetType {
    Retweeted,
    Quoted,
    RepliedTo,
}

impl ReferencedTweetType {
    /// Underlying wire string for the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retweeted => "retweeted",
            Self::Quoted => "quoted",
            Self::RepliedTo => "replied_to",
        }
    }
}

/// Who may reply to a tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplySettings {
    Everyone,
    MentionedUsers,
    Following,
}

impl ReplySettings {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Everyone => "everyone",
            Self::MentionedUsers => "mentionedUsers",
            Self::Following => "following",
        }
    }
}

/// Edge from the owning tweet to the tweet it retweets, quotes or replies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferencedTweet {
    pub id: u64,
    #[serde(rename = "type")]
    pub type_: ReferencedTweetType,
}

/// Engagement counters attached to a tweet. All counters are independently
/// optional; an absent sub-object expands to an all-`None` instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TweetPublicMetrics {
    pub retweet_count: Option<u64>,
    pub reply_count: Option<u64>,
    pub like_count: Option<u64>,
    pub quote_count: Option<u64>,
}

/// Validated tweet payload. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    pub text: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub author_id: Option<u64>,
    pub conversation_id: Option<u64>,
    pub in_reply_to_user_id: Option<u64>,
    #[serde(default)]
    pub referenced_tweets: Vec<ReferencedTweet>,
    #[serde(default)]
    pub public_metrics: TweetPublicMetrics,
    pub possibly_sensitive: Option<bool>,
    pub lang: Option<String>,
    pub reply_settings: Option<ReplySettings>,
    pub source: Option<String>,
}

impl Tweet {
    /// Validate a raw JSON value into a tweet schema instance.
    pub fn from_value(raw: Value) -> Result<Self, ValidationError> {
        crate::schema::from_value(raw)
    }

    /// Validate raw JSON text into a tweet schema instance.
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        crate::schema::from_json(raw)
    }

    /// Map the validated tweet onto its storage entity.
    ///
    /// Metrics are unpacked into one flat column per counter, and every
    /// referenced tweet becomes an owned child record keyed by this tweet's
    /// id. The returned entity is freshly allocated on every call.
    pub fn to_entity(&self) -> entities::Tweet {
        entities::Tweet {
            id: self.id,
            text: self.text.clone(),
            author_id: self.author_id,
            conversation_id: self.conversation_id,
            created_at: self.created_at,
            in_reply_to_user_id: self.in_reply_to_user_id,
            lang: self.lang.clone(),
            public_metrics_retweet_count: self.public_metrics.retweet_count,
            public_metrics_reply_count: self.public_metrics.reply_count,
            public_metrics_like_count: self.public_metrics.like_count,
            public_metrics_quote_count: self.public_metrics.quote_count,
            possibly_sensitive: self.possibly_sensitive,
            reply_settings: self.reply_settings.map(|s| s.as_str().to_owned()),
            source: self.source.clone(),
            referenced_tweets: self
                .referenced_tweets
                .iter()
                .map(|r| entities::ReferencedTweet {
                    tweet_id: self.id,
                    id: r.id,
                    type_: r.type_.as_str().to_owned(),
                })
                .collect(),
        }
    }

    /// Flatten the tweet into an ordered key/value mapping for export.
    ///
    /// Identifier fields are rendered as decimal strings so that snowflake
    /// ids survive transports that mangle large JSON numbers; an absent
    /// identifier is exported as `null`. Referenced tweets are not exported
    /// through this path.
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), json!(self.id.to_string()));
        map.insert("text".into(), json!(&self.text));
        map.insert(
            "author_id".into(),
            json!(self.author_id.map(|id| id.to_string())),
        );
        map.insert(
            "conversation_id".into(),
            json!(self.conversation_id.map(|id| id.to_string())),
        );
        map.insert("created_at".into(), json!(&self.created_at));
        map.insert(
            "in_reply_to_user_id".into(),
            json!(self.in_reply_to_user_id.map(|id| id.to_string())),
        );
        map.insert("lang".into(), json!(&self.lang));
        map.insert(
            "public_metrics_retweet_count".into(),
            json!(self.public_metrics.retweet_count),
        );
        map.insert(
            "public_metrics_reply_count".into(),
            json!(self.public_metrics.reply_count),
        );
        map.insert(
            "public_metrics_like_count".into(),
            json!(self.public_metrics.like_count),
        );
        map.insert(
            "public_metrics_quote_count".into(),
            json!(self.public_metrics.quote_count),
        );
        map.insert("possibly_sensitive".into(), json!(self.possibly_sensitive));
        map.insert(
            "reply_settings".into(),
            json!(self.reply_settings.map(|s| s.as_str())),
        );
        map.insert("source".into(), json!(&self.source));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_tweet_validates() {
        let tweet = Tweet::from_json(r#"{"id": 1}"#).unwrap();

        assert_eq!(tweet.id, 1);
        assert_eq!(tweet.text, None);
        assert!(tweet.referenced_tweets.is_empty());
        assert_eq!(tweet.public_metrics, TweetPublicMetrics::default());
    }

    #[test]
    fn test_scalar_fields_survive_entity_mapping() {
        let data = r#"
        {
            "id": 1585841080431976448,
            "text": "hello world",
            "created_at": "2022-10-28T01:02:03Z",
            "author_id": 44196397,
            "conversation_id": 1585841080431976448,
            "in_reply_to_user_id": 12,
            "public_metrics": {
                "retweet_count": 5,
                "reply_count": 2,
                "like_count": 100,
                "quote_count": 1
            },
            "possibly_sensitive": false,
            "lang": "en",
            "reply_settings": "mentionedUsers",
            "source": "Twitter Web App"
        }
        "#;

        let tweet = Tweet::from_json(data).unwrap();
        let entity = tweet.to_entity();

        assert_eq!(entity.id, 1585841080431976448);
        assert_eq!(entity.text.as_deref(), Some("hello world"));
        assert_eq!(entity.author_id, Some(44196397));
        assert_eq!(entity.conversation_id, Some(1585841080431976448));
        assert_eq!(entity.in_reply_to_user_id, Some(12));
        assert_eq!(entity.lang.as_deref(), Some("en"));
        assert_eq!(entity.public_metrics_retweet_count, Some(5));
        assert_eq!(entity.public_metrics_reply_count, Some(2));
        assert_eq!(entity.public_metrics_like_count, Some(100));
        assert_eq!(entity.public_metrics_quote_count, Some(1));
        assert_eq!(entity.possibly_sensitive, Some(false));
        assert_eq!(entity.reply_settings.as_deref(), Some("mentionedUsers"));
        assert_eq!(entity.source.as_deref(), Some("Twitter Web App"));
        assert!(entity.referenced_tweets.is_empty());
    }

    #[test]
    fn test_referenced_tweets_become_owned_children() {
        let tweet =
            Tweet::from_json(r#"{"id": 1, "referenced_tweets": [{"id": 2, "type": "quoted"}]}"#)
                .unwrap();
        let entity = tweet.to_entity();

        assert_eq!(entity.id, 1);
        assert_eq!(entity.referenced_tweets.len(), 1);
        let child = &entity.referenced_tweets[0];
        assert_eq!(child.tweet_id, 1);
        assert_eq!(child.id, 2);
        assert_eq!(child.type_, "quoted");
    }

    #[test]
    fn test_every_reference_yields_one_child() {
        let tweet = Tweet::from_json(
            r#"{"id": 7, "referenced_tweets": [
                {"id": 8, "type": "retweeted"},
                {"id": 9, "type": "replied_to"},
                {"id": 10, "type": "quoted"}
            ]}"#,
        )
        .unwrap();
        let entity = tweet.to_entity();

        assert_eq!(entity.referenced_tweets.len(), 3);
        assert!(entity.referenced_tweets.iter().all(|r| r.tweet_id == 7));
        assert_eq!(entity.referenced_tweets[1].type_, "replied_to");
    }

    #[test]
    fn test_snowflake_ids_stringified_without_loss() {
        let tweet = Tweet::from_json(
            r#"{"id": 1585841080431976448, "author_id": 896550698543874049}"#,
        )
        .unwrap();
        let mapping = tweet.to_mapping();

        assert_eq!(mapping["id"], "1585841080431976448");
        assert_eq!(mapping["author_id"], "896550698543874049");
    }

    #[test]
    fn test_absent_ids_export_as_null() {
        let mapping = Tweet::from_json(r#"{"id": 1}"#).unwrap().to_mapping();

        assert_eq!(mapping["author_id"], Value::Null);
        assert_eq!(mapping["conversation_id"], Value::Null);
        assert_eq!(mapping["in_reply_to_user_id"], Value::Null);
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let tweet = Tweet::from_json(
            r#"{"id": 3, "text": "x", "public_metrics": {"like_count": 9}}"#,
        )
        .unwrap();

        assert_eq!(tweet.to_mapping(), tweet.to_mapping());
    }

    #[test]
    fn test_absent_metrics_expand_to_all_counters() {
        let tweet = Tweet::from_json(r#"{"id": 1}"#).unwrap();

        let entity = tweet.to_entity();
        assert_eq!(entity.public_metrics_retweet_count, None);
        assert_eq!(entity.public_metrics_quote_count, None);

        let mapping = tweet.to_mapping();
        for key in [
            "public_metrics_retweet_count",
            "public_metrics_reply_count",
            "public_metrics_like_count",
            "public_metrics_quote_count",
        ] {
            assert_eq!(mapping[key], Value::Null, "missing counter {key}");
        }
    }

    #[test]
    fn test_unknown_metrics_key_rejected() {
        let err = Tweet::from_json(
            r#"{"id": 1, "public_metrics": {"retweet_count": 1, "bogus": 2}}"#,
        )
        .unwrap_err();

        assert!(err.path().unwrap().starts_with("public_metrics"));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_reference_with_unknown_key_rejected() {
        let err = Tweet::from_json(
            r#"{"id": 1, "referenced_tweets": [{"id": 2, "type": "quoted", "extra": 1}]}"#,
        )
        .unwrap_err();

        assert!(err.path().unwrap().contains("referenced_tweets"));
        assert!(err.to_string().contains("extra"));
    }

    #[test]
    fn test_reply_settings_outside_vocabulary_rejected() {
        let err = Tweet::from_json(r#"{"id": 1, "reply_settings": "nobody"}"#).unwrap_err();

        assert_eq!(err.path(), Some("reply_settings"));
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn test_reference_tag_outside_vocabulary_rejected() {
        let err =
            Tweet::from_json(r#"{"id": 1, "referenced_tweets": [{"id": 2, "type": "liked"}]}"#)
                .unwrap_err();

        assert!(err.path().unwrap().contains("referenced_tweets"));
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn test_missing_required_id_rejected() {
        let err = Tweet::from_json(r#"{"text": "no id"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn test_created_at_round_trips_through_mapping() {
        let tweet = Tweet::from_json(r#"{"id": 1, "created_at": "2022-10-28T01:02:03Z"}"#).unwrap();
        let mapping = tweet.to_mapping();

        let exported = mapping["created_at"].as_str().unwrap();
        let parsed = DateTime::parse_from_rfc3339(exported).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), tweet.created_at.unwrap());
    }

    #[test]
    fn test_mapping_preserves_declared_key_order() {
        let mapping = Tweet::from_json(r#"{"id": 1}"#).unwrap().to_mapping();
        let keys: Vec<&str> = mapping.keys().map(String::as_str).collect();

        assert_eq!(
            keys,
            vec![
                "id",
                "text",
                "author_id",
                "conversation_id",
                "created_at",
                "in_reply_to_user_id",
                "lang",
                "public_metrics_retweet_count",
                "public_metrics_reply_count",
                "public_metrics_like_count",
                "public_metrics_quote_count",
                "possibly_sensitive",
                "reply_settings",
                "source",
            ]
        );
    }
}
