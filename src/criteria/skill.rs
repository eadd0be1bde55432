use serde::Serialize;

use crate::{
    profile::{CandidateSkill, RequiredSkill},
    Normalized, Score, SkillRelevanceTable,
};

/// Proficiency above the required minimum keeps adding credit until it reaches this multiple of
/// the minimum.
const PROFICIENCY_RATIO_CAP: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Direct,
    Related,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchedSkill {
    pub required: String,
    pub matched: String,
    pub match_type: MatchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<Normalized>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkillScore {
    pub score: Score,
    pub matched_skills: Vec<MatchedSkill>,
}

/// Score how well `candidate` covers `required`.
///
/// Each required skill is looked up first by exact name, then by the most relevant candidate skill
/// whose relevance reaches `min_relevance`. A found skill earns credit for proficiency relative to
/// the required minimum, scaled by relevance for related matches. Credits are combined as a mean
/// weighted by each required skill's weight; skills that are not found contribute nothing.
pub fn score(
    table: &SkillRelevanceTable,
    min_relevance: Normalized,
    required: &[RequiredSkill],
    candidate: &[CandidateSkill],
) -> SkillScore {
    let mut matched_skills = Vec::new();
    let mut credits = Vec::with_capacity(required.len());
    for requirement in required {
        let credit = match find_match(table, min_relevance, requirement, candidate) {
            Some((skill, relevance)) => {
                let credit = proficiency_credit(requirement, skill) * relevance.as_f64();
                let match_type = if relevance == Normalized::ONE {
                    MatchType::Direct
                } else {
                    MatchType::Related
                };
                matched_skills.push(MatchedSkill {
                    required: requirement.name.clone(),
                    matched: skill.name.clone(),
                    match_type,
                    relevance: (match_type == MatchType::Related).then_some(relevance),
                });
                credit
            }
            None => 0.0,
        };
        credits.push((credit, requirement.weight));
    }

    SkillScore {
        score: Score::saturating(weighted_mean(&credits) * 100.0),
        matched_skills,
    }
}

fn find_match<'c>(
    table: &SkillRelevanceTable,
    min_relevance: Normalized,
    requirement: &RequiredSkill,
    candidate: &'c [CandidateSkill],
) -> Option<(&'c CandidateSkill, Normalized)> {
    let direct = candidate
        .iter()
        .filter(|skill| skill.name == requirement.name)
        // When a skill is listed twice, the first entry with the highest level wins.
        .reduce(|best, skill| if skill.level() > best.level() { skill } else { best });
    if let Some(skill) = direct {
        return Some((skill, Normalized::ONE));
    }

    candidate
        .iter()
        .map(|skill| (skill, table.relevance(&requirement.name, &skill.name)))
        .filter(|(_, relevance)| !relevance.is_zero() && *relevance >= min_relevance)
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
}

/// Credit in (0, 1] for holding a skill at `skill`'s level against the requirement's minimum.
fn proficiency_credit(requirement: &RequiredSkill, skill: &CandidateSkill) -> f64 {
    let Some(minimum) = requirement.min_proficiency.filter(|m| *m > 0) else {
        return 1.0;
    };
    let ratio = skill.level() as f64 / minimum as f64;
    ratio.min(PROFICIENCY_RATIO_CAP) / PROFICIENCY_RATIO_CAP
}

/// Mean of `credits` weighted by their weights. Zero total weight falls back to an unweighted
/// mean; no credits at all yields zero.
fn weighted_mean(credits: &[(f64, f64)]) -> f64 {
    if credits.is_empty() {
        return 0.0;
    }
    let total_weight: f64 = credits.iter().map(|(_, weight)| weight).sum();
    if total_weight <= 0.0 {
        return credits.iter().map(|(credit, _)| credit).sum::<f64>() / credits.len() as f64;
    }
    credits
        .iter()
        .map(|(credit, weight)| credit * weight)
        .sum::<f64>()
        / total_weight
}
