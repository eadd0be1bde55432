use crate::{profile::AvailabilityStatus, Normalized, Score};

/// Share of the score that is earned regardless of hour coverage.
const BASE_SHARE: f64 = 0.3;

/// Highest score reachable at each availability status.
fn status_ceiling(status: AvailabilityStatus) -> f64 {
    match status {
        AvailabilityStatus::Available => 100.0,
        AvailabilityStatus::PartiallyAvailable => 75.0,
        AvailabilityStatus::Busy => 40.0,
        AvailabilityStatus::Unavailable => 10.0,
    }
}

/// Score a provider's capacity against the hours per week the seeker asked for. When no hours
/// were requested, coverage is treated as complete and only the status matters.
pub fn score(
    status: AvailabilityStatus,
    available_hours_per_week: u32,
    requested_hours_per_week: Option<u32>,
) -> Score {
    let coverage = match requested_hours_per_week {
        Some(requested) if requested > 0 => {
            Normalized::saturating(available_hours_per_week as f64 / requested as f64)
        }
        _ => Normalized::ONE,
    };
    let share = BASE_SHARE + (1.0 - BASE_SHARE) * coverage.as_f64();
    Score::saturating(status_ceiling(status) * share)
}

#[cfg(test)]
mod test {
    use proptest::{prop_assert, proptest};

    use super::*;
    use crate::num::assert_within;

    #[test]
    fn available_with_enough_hours_is_maximal() {
        assert_within(
            score(AvailabilityStatus::Available, 40, Some(40)).as_f64(),
            100.0,
            1e-9,
        );
        assert_within(
            score(AvailabilityStatus::Available, 60, Some(20)).as_f64(),
            100.0,
            1e-9,
        );
    }

    #[test]
    fn busy_and_unavailable_score_low() {
        assert!(score(AvailabilityStatus::Busy, 40, Some(20)).as_f64() < 50.0);
        assert!(score(AvailabilityStatus::Unavailable, 40, None).as_f64() < 50.0);
    }

    #[test]
    fn hours_far_below_request_score_low() {
        assert!(score(AvailabilityStatus::Available, 4, Some(40)).as_f64() < 50.0);
    }

    #[test]
    fn missing_request_ignores_hours() {
        assert_eq!(
            score(AvailabilityStatus::PartiallyAvailable, 0, None),
            score(AvailabilityStatus::PartiallyAvailable, 40, None),
        );
        assert_eq!(
            score(AvailabilityStatus::Available, 0, Some(0)),
            score(AvailabilityStatus::Available, 0, None),
        );
    }

    proptest! {
        #[test]
        fn more_hours_never_lower(
            status in 0..4_u8,
            hours in 0..80_u32,
            extra in 1..40_u32,
            requested in proptest::option::of(0..80_u32),
        ) {
            let status = match status {
                0 => AvailabilityStatus::Available,
                1 => AvailabilityStatus::PartiallyAvailable,
                2 => AvailabilityStatus::Busy,
                _ => AvailabilityStatus::Unavailable,
            };
            prop_assert!(score(status, hours + extra, requested) >= score(status, hours, requested));
        }
    }
}
