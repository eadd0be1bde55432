use crate::{profile::Budget, Normalized, Score};

/// Score without a budget to compare against.
pub const NEUTRAL: f64 = 75.0;
/// Score at the top of the budget range.
const AT_MAX: f64 = 90.0;
/// Over-budget rates never fall below this.
const FLOOR: f64 = 5.0;

/// Score an hourly rate against the seeker's budget. Rates under the minimum are not penalized,
/// rates inside the range score between 90 and 100, and rates above the maximum follow the
/// overrun curve below.
pub fn score(hourly_rate: f64, budget: Option<Budget>) -> Score {
    let Some(Budget { min, max }) = budget else {
        return Score::saturating(NEUTRAL);
    };
    if hourly_rate <= min {
        return Score::MAX;
    }
    if hourly_rate <= max {
        let span = max - min;
        let position = if span > 0.0 {
            (hourly_rate - min) / span
        } else {
            0.0
        };
        return Score::saturating(100.0 - (100.0 - AT_MAX) * position);
    }
    let overrun = if max > 0.0 {
        Normalized::saturating((hourly_rate - max) / max)
    } else {
        Normalized::ONE
    };
    Score::saturating((AT_MAX * score_overrun(overrun).as_f64()).max(FLOOR))
}

/// Score the given `overrun`, the fraction by which a rate exceeds the budget maximum. Small
/// overruns keep most of the score (10% over keeps ~78%) and the curve reaches zero only at
/// double the budget.
pub fn score_overrun(overrun: Normalized) -> Normalized {
    // (5_f64.sqrt() - 1.0) / 2.0
    const S: f64 = 0.6180339887498949;
    let score = (overrun.as_f64() + S).recip() - S;
    // A very small negative value can result from loss of precision as the overrun approaches 1.
    Normalized::saturating(score)
}
