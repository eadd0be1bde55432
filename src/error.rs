use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("candidate at index {index} is malformed: {source}")]
    Candidate {
        index: usize,
        #[source]
        source: Box<MatchError>,
    },
    #[error("dimension weights must be non-negative and sum to 1.0 (got {sum})")]
    InvalidWeights { sum: f64 },
    #[error("relevance between `{a}` and `{b}` must be in [0, 1) (got {value})")]
    InvalidRelevance { a: String, b: String, value: f64 },
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

impl MatchError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, when the error concerns a single input field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } | Self::InvalidField { field, .. } => Some(*field),
            Self::Candidate { source, .. } => source.field(),
            _ => None,
        }
    }
}
