use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    criteria::{
        availability, network, price, reputation, responsiveness, skill, DimensionScores,
    },
    outcome::{recommend, MatchOutcome, MatchQuality},
    profile::{CandidateProfile, NetworkDatum, Requirement},
    rank, MatchConfig, MatchError, Normalized, SkillRelevanceTable,
};

/// Scores and ranks provider profiles against a seeker's requirement.
///
/// The engine owns an immutable skill relevance table and configuration and keeps no other state,
/// so one engine can serve concurrent callers.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    table: SkillRelevanceTable,
    config: MatchConfig,
    min_related_relevance: Normalized,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::with_table(SkillRelevanceTable::default())
    }
}

impl MatchEngine {
    pub fn new(table: SkillRelevanceTable, config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        let min_related_relevance = config.min_related_relevance()?;
        Ok(Self {
            table,
            config,
            min_related_relevance,
        })
    }

    /// Engine with the default configuration.
    pub fn with_table(table: SkillRelevanceTable) -> Self {
        let config = MatchConfig::default();
        let min_related_relevance = Normalized::saturating(config.min_related_relevance);
        Self {
            table,
            config,
            min_related_relevance,
        }
    }

    pub fn table(&self) -> &SkillRelevanceTable {
        &self.table
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn relevance(&self, a: &str, b: &str) -> Normalized {
        self.table.relevance(a, b)
    }

    /// Score one provider against `requirement`. `network` is the seeker's connection to this
    /// provider, if known.
    pub fn calculate_match_score(
        &self,
        requirement: &Requirement,
        profile: &CandidateProfile,
        network: Option<&NetworkDatum>,
    ) -> Result<MatchOutcome, MatchError> {
        requirement.validate()?;
        profile.validate()?;
        Ok(self.score(requirement, profile, network))
    }

    /// Score every candidate and return them best first, at most `limit` of them (the configured
    /// default limit when `None`). Candidates with equal totals keep their input order.
    ///
    /// Every candidate is validated before any is scored; the first malformed one aborts the call
    /// with [`MatchError::Candidate`] carrying its input position.
    pub fn find_matches(
        &self,
        requirement: &Requirement,
        candidates: &[CandidateProfile],
        network: Option<&HashMap<String, NetworkDatum>>,
        limit: Option<usize>,
    ) -> Result<Vec<MatchOutcome>, MatchError> {
        let limit = limit.unwrap_or(self.config.default_limit);
        let _span =
            tracing::debug_span!("find_matches", candidates = candidates.len(), limit).entered();

        requirement.validate()?;
        for (index, candidate) in candidates.iter().enumerate() {
            candidate
                .validate()
                .map_err(|source| MatchError::Candidate {
                    index,
                    source: Box::new(source),
                })?;
        }

        let network_for = |candidate: &CandidateProfile| {
            network.and_then(|network| network.get(&candidate.id))
        };

        #[cfg(feature = "parallel")]
        let outcomes: Vec<MatchOutcome> = candidates
            .par_iter()
            .map(|candidate| self.score(requirement, candidate, network_for(candidate)))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<MatchOutcome> = candidates
            .iter()
            .map(|candidate| self.score(requirement, candidate, network_for(candidate)))
            .collect();

        let ranked = rank(outcomes, limit);
        tracing::debug!(
            returned = ranked.len(),
            top_score = ranked.first().map(|o| o.total_score.as_f64()),
            "ranked candidates"
        );
        Ok(ranked)
    }

    fn score(
        &self,
        requirement: &Requirement,
        profile: &CandidateProfile,
        network: Option<&NetworkDatum>,
    ) -> MatchOutcome {
        let skill = skill::score(
            &self.table,
            self.min_related_relevance,
            &requirement.required_skills,
            &profile.skills,
        );
        let dimension_scores = DimensionScores {
            skill_match: skill.score,
            availability: availability::score(
                profile.availability_status,
                profile.available_hours_per_week,
                requirement.hours_per_week,
            ),
            reputation: reputation::score(
                profile.reputation_score,
                profile.completed_projects,
                profile.success_rate,
            ),
            price: price::score(profile.hourly_rate, requirement.budget),
            network: network::score(network),
            responsiveness: responsiveness::score(profile.response_time_avg),
        };
        let total_score = dimension_scores.total(&self.config.weights);
        tracing::trace!(
            candidate = %profile.id,
            total = total_score.as_f64(),
            ?dimension_scores,
            "scored candidate"
        );

        MatchOutcome {
            id: profile.id.clone(),
            name: profile.name.clone(),
            title: profile.title.clone(),
            total_score,
            dimension_scores,
            match_quality: MatchQuality::from_score(total_score),
            matched_skills: skill.matched_skills,
            recommendations: recommend(&dimension_scores, requirement),
        }
    }
}
