use thiserror::Error;

/// Error raised when a raw payload fails schema validation.
///
/// Validation is all-or-nothing per payload: either a fully populated,
/// type-checked schema instance comes back, or this error does. The
/// conversions on a validated instance (`to_entity`, `to_mapping`) have no
/// error paths of their own.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The raw text was not parseable as JSON at all.
    #[error("malformed payload: {0}")]
    Parse(#[source] serde_json::Error),

    /// A field violated its declared constraint: required but missing, wrong
    /// type, a value outside a closed enum vocabulary, or an unrecognized key
    /// in a strict sub-schema. `path` locates the offending field.
    #[error("invalid field `{path}`: {source}")]
    Field {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ValidationError {
    /// Path of the offending field, when the payload parsed but failed
    /// validation (e.g. `referenced_tweets[0].type`).
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Field { path, .. } => Some(path),
            Self::Parse(_) => None,
        }
    }

    pub(crate) fn field(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self::Field {
            path: err.path().to_string(),
            source: err.into_inner(),
        }
    }
}
