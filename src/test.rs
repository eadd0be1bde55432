use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use proptest::{prop_assert, prop_assert_eq, prop_compose, proptest};
use rand::{rngs::SmallRng, Rng as _, SeedableRng as _};

use crate::{
    criteria::skill::MatchType,
    profile::{
        AvailabilityStatus, Budget, CandidateProfile, CandidateSkill, Proficiency, RequiredSkill,
        Requirement,
    },
    MatchEngine, MatchQuality, Recommendation, Score, SkillRelevanceTable,
};

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MatchEngine>();
    assert_send_sync::<SkillRelevanceTable>();
};

fn table() -> SkillRelevanceTable {
    SkillRelevanceTable::from_pairs([
        ("Python", "Django", 0.8),
        ("Python", "Flask", 0.7),
        ("JavaScript", "TypeScript", 0.9),
        ("Rust", "C++", 0.6),
    ])
    .unwrap()
}

fn python_requirement() -> Requirement {
    Requirement {
        required_skills: vec![RequiredSkill::new("Python").with_min_proficiency(3)],
        budget: Some(Budget {
            min: 50.0,
            max: 100.0,
        }),
        hours_per_week: Some(20),
        duration_weeks: Some(8),
    }
}

fn provider(id: &str, skills: Vec<CandidateSkill>) -> CandidateProfile {
    CandidateProfile {
        id: id.into(),
        name: format!("Provider {id}"),
        title: "Backend Engineer".into(),
        skills,
        hourly_rate: 80.0,
        availability_status: AvailabilityStatus::Available,
        available_hours_per_week: 30,
        reputation_score: 88.0,
        response_time_avg: 3.0,
        completed_projects: 25,
        success_rate: 96.0,
        network_connections: vec![],
    }
}

#[test]
fn expert_python_is_a_strong_match() {
    let engine = MatchEngine::with_table(table());
    let outcome = engine
        .calculate_match_score(
            &python_requirement(),
            &provider("a", vec![CandidateSkill::new("Python", "expert")]),
            None,
        )
        .unwrap();
    assert!(outcome.total_score.as_f64() > 70.0, "{outcome:?}");
    assert!(matches!(
        outcome.match_quality,
        MatchQuality::Excellent | MatchQuality::Great
    ));
    assert_eq!(outcome.matched_skills[0].match_type, MatchType::Direct);
}

#[test]
fn unrelated_skill_scores_zero() {
    let engine = MatchEngine::with_table(table());
    let outcome = engine
        .calculate_match_score(
            &python_requirement(),
            &provider("b", vec![CandidateSkill::new("Rust", "expert")]),
            None,
        )
        .unwrap();
    assert_eq!(outcome.dimension_scores.skill_match, Score::ZERO);
    assert!(outcome.matched_skills.is_empty());
    assert!(outcome
        .recommendations
        .contains(&Recommendation::NoSkillOverlap));
}

#[test]
fn related_only_match_has_fractional_relevance() {
    let engine = MatchEngine::with_table(table());
    let outcome = engine
        .calculate_match_score(
            &python_requirement(),
            &provider("c", vec![CandidateSkill::new("Django", "expert")]),
            None,
        )
        .unwrap();
    let matched = &outcome.matched_skills[0];
    assert_eq!(matched.match_type, MatchType::Related);
    let relevance = matched.relevance.unwrap().as_f64();
    assert!(relevance > 0.0 && relevance < 1.0);
}

#[test]
fn empty_requirement_skills_do_not_fail() {
    let engine = MatchEngine::with_table(table());
    let requirement = Requirement::default();
    let outcomes = engine
        .find_matches(
            &requirement,
            &[provider("a", vec![CandidateSkill::new("Python", 4_u8)])],
            None,
            None,
        )
        .unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].dimension_scores.skill_match, Score::ZERO);
    assert!(!outcomes[0]
        .recommendations
        .contains(&Recommendation::NoSkillOverlap));
}

#[test]
fn empty_pool_yields_no_matches() {
    let engine = MatchEngine::with_table(table());
    let outcomes = engine
        .find_matches(&python_requirement(), &[], None, Some(10))
        .unwrap();
    assert!(outcomes.is_empty());
}

#[test]
fn unrecognized_label_is_beginner() {
    assert_eq!(Proficiency::from("rockstar").level(), 1);
}

#[test]
fn ties_keep_input_order() {
    let engine = MatchEngine::with_table(table());
    let candidates: Vec<CandidateProfile> = (0..6)
        .map(|i| provider(&i.to_string(), vec![CandidateSkill::new("Python", 4_u8)]))
        .collect();
    let outcomes = engine
        .find_matches(&python_requirement(), &candidates, None, None)
        .unwrap();
    let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["0", "1", "2", "3", "4", "5"]);
}

#[test]
fn ranks_hundred_candidates_by_reputation_quickly() {
    let engine = MatchEngine::with_table(table());
    let mut rng = SmallRng::seed_from_u64(7);
    let candidates: Vec<CandidateProfile> = (0..100)
        .map(|i| {
            let mut candidate = provider(&i.to_string(), vec![CandidateSkill::new("Python", 4_u8)]);
            candidate.reputation_score = 80.0 + rng.gen_range(0.0..19.0);
            candidate
        })
        .collect();

    let started = Instant::now();
    let outcomes = engine
        .find_matches(&python_requirement(), &candidates, None, Some(100))
        .unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(1), "took {elapsed:?}");
    assert_eq!(outcomes.len(), 100);
    let reputation = |id: &str| {
        candidates
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.reputation_score)
            .unwrap()
    };
    for pair in outcomes.windows(2) {
        assert!(pair[0].total_score >= pair[1].total_score);
        assert!(reputation(&pair[0].id) >= reputation(&pair[1].id));
    }
}

#[test]
fn limit_truncates_after_ranking() {
    let engine = MatchEngine::with_table(table());
    let candidates: Vec<CandidateProfile> = (0..10)
        .map(|i| {
            let mut candidate = provider(&i.to_string(), vec![CandidateSkill::new("Python", 4_u8)]);
            candidate.reputation_score = 50.0 + i as f64;
            candidate
        })
        .collect();
    let outcomes = engine
        .find_matches(&python_requirement(), &candidates, None, Some(3))
        .unwrap();
    let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["9", "8", "7"]);
}

fn mixed_pool() -> Vec<CandidateProfile> {
    let mut rng = SmallRng::seed_from_u64(11);
    (0..60)
        .map(|i| {
            let skill = ["Python", "Django", "Rust"][i % 3];
            let mut candidate = provider(&i.to_string(), vec![CandidateSkill::new(skill, 4_u8)]);
            // Every fourth candidate keeps the default profile so that totals tie.
            if i % 4 != 0 {
                candidate.reputation_score = rng.gen_range(40.0..100.0);
                candidate.hourly_rate = rng.gen_range(30.0..150.0);
            }
            candidate
        })
        .collect()
}

#[test]
fn shared_engine_serves_concurrent_callers() {
    let engine = Arc::new(MatchEngine::with_table(table()));
    let candidates = Arc::new(mixed_pool());
    let expected = engine
        .find_matches(&python_requirement(), &candidates, None, None)
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let candidates = Arc::clone(&candidates);
            thread::spawn(move || {
                engine
                    .find_matches(&python_requirement(), &candidates, None, None)
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_scoring_matches_sequential_ranking() {
    let engine = MatchEngine::with_table(table());
    let candidates = mixed_pool();
    let sequential = candidates
        .iter()
        .map(|candidate| {
            engine
                .calculate_match_score(&python_requirement(), candidate, None)
                .unwrap()
        })
        .collect::<Vec<_>>();
    let expected = crate::rank(sequential, candidates.len());

    let outcomes = engine
        .find_matches(&python_requirement(), &candidates, None, Some(candidates.len()))
        .unwrap();
    assert_eq!(outcomes, expected);

    let baseline = outcomes.iter().find(|o| o.id == "0").unwrap().total_score;
    let tied: Vec<&str> = outcomes
        .iter()
        .filter(|o| o.total_score == baseline)
        .map(|o| o.id.as_str())
        .collect();
    assert!(tied.len() > 1);
    assert!(tied
        .windows(2)
        .all(|w| w[0].parse::<usize>().unwrap() < w[1].parse::<usize>().unwrap()));
}

prop_compose! {
    fn candidate()(
        level in 1..=5_u8,
        skill in proptest::sample::select(vec!["Python", "Django", "Flask", "Rust", "C++"]),
        hourly_rate in 0.0_f64..250.0,
        status in 0..4_u8,
        hours in 0..60_u32,
        reputation in 0.0_f64..=100.0,
        response in 0.0_f64..72.0,
        projects in 0..80_u32,
        success in 0.0_f64..=100.0,
    ) -> CandidateProfile {
        let availability_status = match status {
            0 => AvailabilityStatus::Available,
            1 => AvailabilityStatus::PartiallyAvailable,
            2 => AvailabilityStatus::Busy,
            _ => AvailabilityStatus::Unavailable,
        };
        CandidateProfile {
            id: String::new(),
            name: "generated".into(),
            title: String::new(),
            skills: vec![CandidateSkill::new(skill, level)],
            hourly_rate,
            availability_status,
            available_hours_per_week: hours,
            reputation_score: reputation,
            response_time_avg: response,
            completed_projects: projects,
            success_rate: success,
            network_connections: vec![],
        }
    }
}
prop_compose! {
    fn candidates()(mut candidates in proptest::collection::vec(candidate(), 0..40)) -> Vec<CandidateProfile> {
        for (id, candidate) in candidates.iter_mut().enumerate() {
            candidate.id = id.to_string();
        }
        candidates
    }
}

proptest! {
    #[test]
    fn output_is_sorted_and_stable(candidates in candidates(), limit in 0..50_usize) {
        let engine = MatchEngine::with_table(table());
        let outcomes = engine
            .find_matches(&python_requirement(), &candidates, None, Some(limit))
            .unwrap();
        prop_assert_eq!(outcomes.len(), candidates.len().min(limit));
        for pair in outcomes.windows(2) {
            prop_assert!(pair[0].total_score >= pair[1].total_score);
            if pair[0].total_score == pair[1].total_score {
                let position = |id: &str| id.parse::<usize>().unwrap();
                prop_assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
        for outcome in &outcomes {
            let alone = engine
                .calculate_match_score(
                    &python_requirement(),
                    &candidates[outcome.id.parse::<usize>().unwrap()],
                    None,
                )
                .unwrap();
            prop_assert_eq!(&alone, outcome);
        }
    }

    #[test]
    fn strictly_better_candidate_scores_higher(
        base in candidate(),
        level_bump in 0..=2_u8,
        extra_hours in 0..20_u32,
        reputation_bump in 0.5_f64..20.0,
        rate_cut in 0.0_f64..50.0,
    ) {
        let engine = MatchEngine::with_table(table());
        let mut worse = base;
        worse.id = "worse".into();
        worse.reputation_score = worse.reputation_score.min(79.0);
        let mut better = worse.clone();
        better.id = "better".into();
        let level = worse.skills[0].level();
        better.skills[0].proficiency = Some(Proficiency::Level((level + level_bump).min(5)));
        better.available_hours_per_week += extra_hours;
        better.reputation_score += reputation_bump;
        better.hourly_rate = (better.hourly_rate - rate_cut).max(0.0);

        let worse = engine.calculate_match_score(&python_requirement(), &worse, None).unwrap();
        let better = engine.calculate_match_score(&python_requirement(), &better, None).unwrap();
        prop_assert!(better.total_score > worse.total_score);
    }
}
