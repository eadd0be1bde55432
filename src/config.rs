use serde::{Deserialize, Serialize};

use crate::{criteria::Weights, MatchError, Normalized};

pub const MIN_RELATED_RELEVANCE_ENV: &str = "MATCH_MIN_RELATED_RELEVANCE";
pub const DEFAULT_LIMIT_ENV: &str = "MATCH_DEFAULT_LIMIT";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub weights: Weights,
    /// Related skills below this relevance are not counted as matches.
    pub min_related_relevance: f64,
    /// Result limit used when the caller does not pass one.
    pub default_limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            min_related_relevance: 0.5,
            default_limit: 50,
        }
    }
}

impl MatchConfig {
    /// Parse a JSON document. Keys that are absent keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `MATCH_MIN_RELATED_RELEVANCE` and `MATCH_DEFAULT_LIMIT` when set. Unparseable values
    /// are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(relevance) = env_parse::<f64>(MIN_RELATED_RELEVANCE_ENV) {
            self.min_related_relevance = relevance;
        }
        if let Some(limit) = env_parse::<usize>(DEFAULT_LIMIT_ENV) {
            self.default_limit = limit;
        }
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        self.weights.validate()?;
        self.min_related_relevance()?;
        Ok(())
    }

    pub(crate) fn min_related_relevance(&self) -> Result<Normalized, MatchError> {
        Normalized::new(self.min_related_relevance).ok_or_else(|| {
            MatchError::invalid(
                "min_related_relevance",
                format!("must be in [0, 1] (got {})", self.min_related_relevance),
            )
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value = %value, "ignoring unparseable environment override");
            None
        }
    }
}
