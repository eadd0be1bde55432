use std::f64::consts::E;

use crate::{Normalized, Score};

const REPUTATION_SHARE: f64 = 0.6;
const EXPERIENCE_SHARE: f64 = 0.2;
const SUCCESS_SHARE: f64 = 0.2;

/// Combine platform reputation, delivery experience, and historical success into one score.
/// Inputs on the 0 to 100 scale are clamped.
pub fn score(reputation_score: f64, completed_projects: u32, success_rate: f64) -> Score {
    let reputation = Normalized::saturating(reputation_score / 100.0);
    let success = Normalized::saturating(success_rate / 100.0);
    let experience = score_experience(completed_projects);
    Score::from_normalized(Normalized::saturating(
        REPUTATION_SHARE * reputation.as_f64()
            + EXPERIENCE_SHARE * experience.as_f64()
            + SUCCESS_SHARE * success.as_f64(),
    ))
}

/// Each completed project adds less than the one before; ~10 projects reach 63%, ~30 reach 95%.
fn score_experience(completed_projects: u32) -> Normalized {
    let a = 0.1;
    Normalized::saturating(1.0 - E.powf(-a * completed_projects as f64))
}

#[cfg(test)]
mod test {
    use proptest::{prop_assert, proptest};

    use super::*;
    use crate::num::assert_within;

    #[test]
    fn limits() {
        assert!(score(100.0, 60, 100.0).as_f64() > 99.0);
        assert_eq!(score(0.0, 0, 0.0), Score::ZERO);
        assert_eq!(score(150.0, 500, 120.0), score(100.0, 500, 100.0));
    }

    #[test]
    fn experience_has_diminishing_returns() {
        let first = score_experience(1).as_f64() - score_experience(0).as_f64();
        let fiftieth = score_experience(50).as_f64() - score_experience(49).as_f64();
        assert!(first > fiftieth);
        assert_within(score_experience(10).as_f64(), 1.0 - E.recip(), 1e-9);
    }

    proptest! {
        #[test]
        fn higher_reputation_scores_higher(
            reputation in 0.0_f64..99.0,
            bump in 0.5_f64..1.0,
            projects in 0..100_u32,
            success in 0.0_f64..=100.0,
        ) {
            prop_assert!(score(reputation + bump, projects, success) > score(reputation, projects, success));
        }
    }
}
