use arrayvec::ArrayVec;
use serde::{Serialize, Serializer};

use crate::{
    criteria::{skill::MatchedSkill, DimensionScores},
    profile::Requirement,
    Score,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchQuality {
    Low,
    Fair,
    Good,
    Great,
    Excellent,
}

impl MatchQuality {
    /// Lower bound of each band, highest first.
    pub const THRESHOLDS: [(f64, MatchQuality); 4] = [
        (85.0, MatchQuality::Excellent),
        (70.0, MatchQuality::Great),
        (55.0, MatchQuality::Good),
        (35.0, MatchQuality::Fair),
    ];

    pub fn from_score(total: Score) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(threshold, _)| total.as_f64() >= *threshold)
            .map(|(_, quality)| *quality)
            .unwrap_or(MatchQuality::Low)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Match",
            Self::Great => "Great Match",
            Self::Good => "Good Match",
            Self::Fair => "Fair Match",
            Self::Low => "Low Match",
        }
    }
}

impl std::fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl Serialize for MatchQuality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recommendation {
    StrongSkillFit,
    NoSkillOverlap,
    PartialSkillCoverage,
    LimitedAvailability,
    BudgetMismatch,
    LimitedTrackRecord,
    SlowResponses,
    DirectConnection,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Self::StrongSkillFit => "Strong skill fit: covers the required skills at the requested level",
            Self::NoSkillOverlap => "No required skills matched: consider broadening the skill requirements",
            Self::PartialSkillCoverage => "Partial skill coverage: review related skills before engaging",
            Self::LimitedAvailability => "Limited availability: confirm the provider can commit the requested hours",
            Self::BudgetMismatch => "Budget mismatch: hourly rate exceeds the stated budget",
            Self::LimitedTrackRecord => "Limited track record: consider a short trial engagement",
            Self::SlowResponses => "Slow average response time: agree on communication expectations up front",
            Self::DirectConnection => "Direct connection in your network",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

struct Rule {
    applies: fn(&DimensionScores, &Requirement) -> bool,
    recommendation: Recommendation,
}

pub const RULE_COUNT: usize = 8;

/// Evaluated in order; every rule whose predicate holds contributes its recommendation.
const RULES: [Rule; RULE_COUNT] = [
    Rule {
        applies: |s, _| s.skill_match.as_f64() >= 90.0,
        recommendation: Recommendation::StrongSkillFit,
    },
    Rule {
        applies: |s, r| !r.required_skills.is_empty() && s.skill_match == Score::ZERO,
        recommendation: Recommendation::NoSkillOverlap,
    },
    Rule {
        applies: |s, _| s.skill_match > Score::ZERO && s.skill_match.as_f64() < 50.0,
        recommendation: Recommendation::PartialSkillCoverage,
    },
    Rule {
        applies: |s, _| s.availability.as_f64() < 50.0,
        recommendation: Recommendation::LimitedAvailability,
    },
    Rule {
        applies: |s, _| s.price.as_f64() < 50.0,
        recommendation: Recommendation::BudgetMismatch,
    },
    Rule {
        applies: |s, _| s.reputation.as_f64() < 50.0,
        recommendation: Recommendation::LimitedTrackRecord,
    },
    Rule {
        applies: |s, _| s.responsiveness.as_f64() < 50.0,
        recommendation: Recommendation::SlowResponses,
    },
    Rule {
        applies: |s, _| s.network.as_f64() >= 70.0,
        recommendation: Recommendation::DirectConnection,
    },
];

pub fn recommend(
    scores: &DimensionScores,
    requirement: &Requirement,
) -> ArrayVec<Recommendation, RULE_COUNT> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(scores, requirement))
        .map(|rule| rule.recommendation)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub id: String,
    pub name: String,
    pub title: String,
    pub total_score: Score,
    pub dimension_scores: DimensionScores,
    pub match_quality: MatchQuality,
    pub matched_skills: Vec<MatchedSkill>,
    pub recommendations: ArrayVec<Recommendation, RULE_COUNT>,
}
