pub mod config;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod num;
pub mod outcome;
pub mod profile;
pub mod relevance;
#[cfg(test)]
mod test;

pub use crate::config::MatchConfig;
pub use crate::engine::MatchEngine;
pub use crate::error::MatchError;
pub use crate::num::{Normalized, Score};
pub use crate::outcome::{MatchOutcome, MatchQuality, Recommendation};
pub use crate::relevance::SkillRelevanceTable;
pub use arrayvec::ArrayVec;

/// Order `outcomes` by total score, highest first, and keep at most `limit` of them.
///
/// The sort is stable: outcomes with equal totals keep the order in which they were given, so
/// callers can rely on input order as the tie-break. Ranking only reorders outcomes and never
/// alters their contents.
pub fn rank(mut outcomes: Vec<MatchOutcome>, limit: usize) -> Vec<MatchOutcome> {
    let totals: Vec<Score> = outcomes.iter().map(|o| o.total_score).collect();
    let mut order = permutation::sort_by(&totals[..], |a: &Score, b: &Score| b.cmp(a));
    order.apply_slice_in_place(&mut outcomes);
    outcomes.truncate(limit);
    outcomes
}
