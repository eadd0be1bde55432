use crate::{criteria::logistic_decay, Score};

/// Average response time, in hours, at which the score has fallen to about half.
const MIDPOINT_HOURS: f64 = 16.0;
const STEEPNESS_HOURS: f64 = 4.0;

/// Sub-hour responders score above 95, a day or more falls below 30.
pub fn score(response_time_avg_hours: f64) -> Score {
    Score::from_normalized(logistic_decay(
        response_time_avg_hours,
        MIDPOINT_HOURS,
        STEEPNESS_HOURS,
    ))
}
