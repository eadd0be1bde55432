pub mod availability;
pub mod network;
pub mod price;
pub mod reputation;
pub mod responsiveness;
pub mod skill;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::{MatchError, Normalized, Score};

#[derive(Clone, Copy, Debug)]
pub struct Alternative {
    pub score: Score,
    pub weight: Weight,
}

/// We use the [weighted sum model (WSM)](https://en.wikipedia.org/wiki/Weighted_sum_model) to
/// combine dimension scores. WSM has the following properties:
/// - A weak dimension lowers the total without zeroing it, so a candidate with no network data or
///   an expensive rate can still rank well on skills.
/// - Raising one dimension's score never lowers the total when holding the others constant. With
///   non-zero weights it strictly raises it, which lets us reason about outcomes like "all other
///   things equal, providers with better reputations are always ranked higher".
///
/// Weights are expected to sum to 1, keeping the total on the same [0, 100] scale as its inputs.
pub fn weighted_sum_model<Alternatives>(alternatives: Alternatives) -> Score
where
    Alternatives: IntoIterator<Item = Alternative>,
{
    let total: f64 = alternatives
        .into_iter()
        .map(|Alternative { score, weight }| score.as_f64() * *weight.as_f64())
        .sum();
    Score::saturating(total)
}

/// A positive non-NaN f64 value
#[derive(Clone, Copy, PartialEq)]
pub struct Weight(NotNan<f64>);

impl Weight {
    pub const ZERO: Self = Self(unsafe { NotNan::new_unchecked(0.0) });

    pub fn new(value: f64) -> Option<Self> {
        let value = NotNan::new(value).ok()?;
        if value.is_sign_negative() || value.is_infinite() {
            return None;
        }
        Some(Self(value))
    }

    pub fn as_f64(&self) -> NotNan<f64> {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl std::fmt::Debug for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    SkillMatch,
    Availability,
    Reputation,
    Price,
    Network,
    Responsiveness,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::SkillMatch,
        Dimension::Availability,
        Dimension::Reputation,
        Dimension::Price,
        Dimension::Network,
        Dimension::Responsiveness,
    ];
}

/// Relative importance of each dimension in the total score. Skills dominate; the rest support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub skill_match: f64,
    pub availability: f64,
    pub reputation: f64,
    pub price: f64,
    pub network: f64,
    pub responsiveness: f64,
}

pub const DEFAULT_WEIGHTS: Weights = Weights {
    skill_match: 0.35,
    availability: 0.15,
    reputation: 0.20,
    price: 0.15,
    network: 0.05,
    responsiveness: 0.10,
};

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::SkillMatch => self.skill_match,
            Dimension::Availability => self.availability,
            Dimension::Reputation => self.reputation,
            Dimension::Price => self.price,
            Dimension::Network => self.network,
            Dimension::Responsiveness => self.responsiveness,
        }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let sum = self.sum();
        let all_valid = Dimension::ALL
            .iter()
            .all(|d| Weight::new(self.get(*d)).is_some());
        if !all_valid || (sum - 1.0).abs() > 1e-6 {
            return Err(MatchError::InvalidWeights { sum });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DimensionScores {
    pub skill_match: Score,
    pub availability: Score,
    pub reputation: Score,
    pub price: Score,
    pub network: Score,
    pub responsiveness: Score,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> Score {
        match dimension {
            Dimension::SkillMatch => self.skill_match,
            Dimension::Availability => self.availability,
            Dimension::Reputation => self.reputation,
            Dimension::Price => self.price,
            Dimension::Network => self.network,
            Dimension::Responsiveness => self.responsiveness,
        }
    }

    /// Weighted total on the [0, 100] scale. Weights are assumed to be validated already.
    pub fn total(&self, weights: &Weights) -> Score {
        weighted_sum_model(Dimension::ALL.into_iter().map(|d| Alternative {
            score: self.get(d),
            weight: Weight::new(weights.get(d)).unwrap_or(Weight::ZERO),
        }))
    }
}

/// Logistic step descending from 1 at `x = 0`. `midpoint` is where the curve crosses roughly
/// half, `steepness` is the width of the transition.
pub(crate) fn logistic_decay(x: f64, midpoint: f64, steepness: f64) -> Normalized {
    let s = |x: f64| 1.0 + ((x - midpoint) / steepness).exp();
    Normalized::saturating(s(0.0) / s(x.max(0.0)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::num::assert_within;

    fn scores(values: [f64; 6]) -> DimensionScores {
        let [skill_match, availability, reputation, price, network, responsiveness] =
            values.map(|v| Score::new(v).unwrap());
        DimensionScores {
            skill_match,
            availability,
            reputation,
            price,
            network,
            responsiveness,
        }
    }

    #[test]
    fn default_weights_sum_to_one() {
        assert_within(DEFAULT_WEIGHTS.sum(), 1.0, 1e-9);
        DEFAULT_WEIGHTS.validate().unwrap();
        let heaviest = Dimension::ALL
            .into_iter()
            .max_by(|a, b| DEFAULT_WEIGHTS.get(*a).total_cmp(&DEFAULT_WEIGHTS.get(*b)))
            .unwrap();
        assert_eq!(heaviest, Dimension::SkillMatch);
    }

    #[test]
    fn invalid_weights_rejected() {
        let skewed = Weights {
            skill_match: 0.9,
            ..DEFAULT_WEIGHTS
        };
        assert!(matches!(
            skewed.validate(),
            Err(MatchError::InvalidWeights { .. })
        ));
        let negative = Weights {
            skill_match: 0.55,
            network: -0.15,
            ..DEFAULT_WEIGHTS
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn total_limits() {
        assert_eq!(scores([0.0; 6]).total(&DEFAULT_WEIGHTS), Score::ZERO);
        assert_within(
            scores([100.0; 6]).total(&DEFAULT_WEIGHTS).as_f64(),
            100.0,
            1e-9,
        );
        assert_within(
            scores([100.0, 0.0, 0.0, 0.0, 0.0, 0.0])
                .total(&DEFAULT_WEIGHTS)
                .as_f64(),
            35.0,
            1e-9,
        );
    }

    #[test]
    fn logistic_decay_is_monotonic() {
        assert_within(logistic_decay(0.0, 16.0, 4.0).as_f64(), 1.0, 1e-12);
        let mut previous = Normalized::ONE;
        for x in 0..48 {
            let next = logistic_decay(x as f64, 16.0, 4.0);
            assert!(next <= previous);
            previous = next;
        }
    }
}
