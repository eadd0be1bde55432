use std::collections::{BTreeMap, HashMap};

use crate::{MatchError, Normalized};

/// Symmetric lookup of how closely two distinct skills are related.
///
/// Built once and never mutated afterwards, so a single table can be shared between threads
/// (wrap it in an `Arc` or hand it to a [`crate::MatchEngine`]).
#[derive(Clone, Debug, Default)]
pub struct SkillRelevanceTable {
    /// Every pair is stored under both orderings so lookups borrow their keys.
    related: HashMap<String, HashMap<String, Normalized>>,
}

impl SkillRelevanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(skill, skill, relevance)` triples. Relevance between distinct skills
    /// must lie in [0, 1). Pairs of a skill with itself are ignored, since identical names
    /// always have relevance 1.
    pub fn from_pairs<I, A, B>(pairs: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (A, B, f64)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut table = Self::default();
        for (a, b, value) in pairs {
            let (a, b) = (a.into(), b.into());
            if a.trim().is_empty() || b.trim().is_empty() {
                return Err(MatchError::MissingField {
                    field: "relevance.skill",
                });
            }
            if a == b {
                continue;
            }
            let relevance = Normalized::new(value)
                .filter(|r| *r < Normalized::ONE)
                .ok_or_else(|| MatchError::InvalidRelevance {
                    a: a.clone(),
                    b: b.clone(),
                    value,
                })?;
            if let Some(previous) = table.insert(&a, &b, relevance) {
                if previous != relevance {
                    tracing::warn!(
                        skill_a = %a,
                        skill_b = %b,
                        previous = previous.as_f64(),
                        replacement = relevance.as_f64(),
                        "conflicting relevance entries, keeping the last one"
                    );
                }
            }
        }
        Ok(table)
    }

    /// Parse a nested JSON object of the form `{"Python": {"Django": 0.8, "Flask": 0.8}}`.
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let nested: BTreeMap<String, BTreeMap<String, f64>> = serde_json::from_str(json)?;
        Self::from_pairs(nested.into_iter().flat_map(|(a, related)| {
            related
                .into_iter()
                .map(move |(b, value)| (a.clone(), b, value))
        }))
    }

    /// Relevance of `a` to `b`. Identical names are always 1, unknown pairs are 0.
    pub fn relevance(&self, a: &str, b: &str) -> Normalized {
        if a == b {
            return Normalized::ONE;
        }
        self.related
            .get(a)
            .and_then(|related| related.get(b))
            .copied()
            .unwrap_or(Normalized::ZERO)
    }

    /// Number of distinct skill pairs.
    pub fn len(&self) -> usize {
        self.related.values().map(HashMap::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.related.is_empty()
    }

    fn insert(&mut self, a: &str, b: &str, relevance: Normalized) -> Option<Normalized> {
        self.related
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), relevance);
        self.related
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), relevance)
    }
}
