use std::{io::stdin, path::PathBuf, time::Instant};

use anyhow::{bail, Context as _};
use clap::Parser;
use opportunity_matching::{
    profile::{
        AvailabilityStatus, Budget, CandidateProfile, CandidateSkill, Proficiency, RequiredSkill,
        Requirement,
    },
    MatchConfig, MatchEngine, SkillRelevanceTable,
};
use rand::{rngs::SmallRng, seq::SliceRandom as _, Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const HEADER: &str = "id,name,title,skills,hourly_rate,availability_status,\
available_hours_per_week,reputation_score,response_time_avg,completed_projects,success_rate";

const SYNTHETIC_SKILLS: [&str; 8] = [
    "Python", "Django", "Rust", "C++", "JavaScript", "TypeScript", "SQL", "Go",
];

/// Rank provider profiles against a requirement. Candidate rows are read as CSV from stdin
/// unless `--synthetic` is given.
#[derive(Parser, Debug)]
struct Args {
    /// Required skill as NAME[:MIN_PROFICIENCY[:WEIGHT]]. Repeatable.
    #[arg(long = "skill")]
    skills: Vec<String>,
    #[arg(long, requires = "budget_max")]
    budget_min: Option<f64>,
    #[arg(long, requires = "budget_min")]
    budget_max: Option<f64>,
    #[arg(long)]
    hours: Option<u32>,
    #[arg(long)]
    duration_weeks: Option<u32>,
    #[arg(long)]
    limit: Option<usize>,
    /// Skill relevance table as nested JSON: {"Python": {"Django": 0.8}}.
    #[arg(long)]
    relevance: Option<PathBuf>,
    /// Engine configuration as JSON.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Generate this many candidates instead of reading stdin.
    #[arg(long)]
    synthetic: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Print outcomes as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    let requirement = Requirement {
        required_skills: args
            .skills
            .iter()
            .map(|s| parse_required_skill(s))
            .collect::<anyhow::Result<_>>()?,
        budget: args
            .budget_min
            .zip(args.budget_max)
            .map(|(min, max)| Budget { min, max }),
        hours_per_week: args.hours,
        duration_weeks: args.duration_weeks,
    };

    let table = match &args.relevance {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SkillRelevanceTable::from_json(&json)?
        }
        None => SkillRelevanceTable::new(),
    };
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            MatchConfig::from_json(&json)?
        }
        None => MatchConfig::default(),
    }
    .with_env_overrides();
    tracing::info!(relevance_pairs = table.len(), ?config, "engine configured");
    let engine = MatchEngine::new(table, config)?;

    let candidates = match args.synthetic {
        Some(count) => synthetic_candidates(count, args.seed),
        None => read_candidates()?,
    };

    let t0 = Instant::now();
    let outcomes = engine.find_matches(&requirement, &candidates, None, args.limit)?;
    let selection_μs = Instant::now().duration_since(t0).as_micros();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for (rank, outcome) in outcomes.iter().enumerate() {
            let matched = outcome
                .matched_skills
                .iter()
                .map(|m| m.matched.as_str())
                .collect::<Vec<_>>()
                .join(";");
            println!(
                "{:>3} {:<12} {:>6.1} {:<16} [{}]",
                rank + 1,
                outcome.id,
                outcome.total_score.as_f64(),
                outcome.match_quality,
                matched
            );
            for recommendation in &outcome.recommendations {
                println!("      - {recommendation}");
            }
        }
    }
    println!("candidates: {}", candidates.len());
    println!("selection_μs: {selection_μs}");
    Ok(())
}

fn parse_required_skill(spec: &str) -> anyhow::Result<RequiredSkill> {
    let mut fields = spec.split(':');
    let name = fields.next().filter(|n| !n.is_empty()).context("skill name")?;
    let mut skill = RequiredSkill::new(name);
    if let Some(level) = fields.next() {
        skill = skill.with_min_proficiency(level.parse::<u8>().context("min proficiency")?);
    }
    if let Some(weight) = fields.next() {
        skill = skill.with_weight(weight.parse::<f64>().context("skill weight")?);
    }
    Ok(skill)
}

/// Skills column format: `Python:expert;SQL:3`.
fn parse_candidate_skills(field: &str) -> Vec<CandidateSkill> {
    field
        .split(';')
        .filter(|s| !s.trim().is_empty())
        .map(|entry| {
            let (name, proficiency) = entry.split_once(':').unwrap_or((entry, ""));
            let proficiency = match proficiency.parse::<u8>() {
                Ok(level) => Some(Proficiency::Level(level)),
                Err(_) if proficiency.is_empty() => None,
                Err(_) => Some(Proficiency::Label(proficiency.to_string())),
            };
            CandidateSkill {
                name: name.trim().to_string(),
                proficiency,
                years: None,
            }
        })
        .collect()
}

fn parse_status(field: &str) -> anyhow::Result<AvailabilityStatus> {
    Ok(match field.trim().to_ascii_uppercase().as_str() {
        "0" | "AVAILABLE" => AvailabilityStatus::Available,
        "1" | "PARTIALLY_AVAILABLE" => AvailabilityStatus::PartiallyAvailable,
        "2" | "BUSY" => AvailabilityStatus::Busy,
        "3" | "UNAVAILABLE" => AvailabilityStatus::Unavailable,
        other => bail!("unknown availability status {other}"),
    })
}

fn read_candidates() -> anyhow::Result<Vec<CandidateProfile>> {
    let mut candidates = Vec::new();
    for (line_number, line) in stdin().lines().enumerate() {
        let line = line?;
        if line.starts_with(HEADER) || line.trim().is_empty() {
            continue;
        }
        let fields = line.split(',').collect::<Vec<&str>>();
        if fields.len() != 11 {
            bail!("line {}: expected 11 fields, got {}", line_number + 1, fields.len());
        }
        let context = |column: &str| format!("line {}: {column}", line_number + 1);
        candidates.push(CandidateProfile {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            title: fields[2].to_string(),
            skills: parse_candidate_skills(fields[3]),
            hourly_rate: fields[4].parse::<f64>().with_context(|| context("hourly_rate"))?,
            availability_status: parse_status(fields[5])
                .with_context(|| context("availability_status"))?,
            available_hours_per_week: fields[6]
                .parse::<u32>()
                .with_context(|| context("available_hours_per_week"))?,
            reputation_score: fields[7].parse::<f64>().with_context(|| context("reputation_score"))?,
            response_time_avg: fields[8].parse::<f64>().with_context(|| context("response_time_avg"))?,
            completed_projects: fields[9]
                .parse::<u32>()
                .with_context(|| context("completed_projects"))?,
            success_rate: fields[10].parse::<f64>().with_context(|| context("success_rate"))?,
            network_connections: vec![],
        });
    }
    Ok(candidates)
}

fn synthetic_candidates(count: usize, seed: u64) -> Vec<CandidateProfile> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let skills = SYNTHETIC_SKILLS
                .choose_multiple(&mut rng, 3)
                .map(|name| CandidateSkill::new(*name, rng.gen_range(1..=5_u8)))
                .collect();
            let availability_status = match rng.gen_range(0..4) {
                0 => AvailabilityStatus::Available,
                1 => AvailabilityStatus::PartiallyAvailable,
                2 => AvailabilityStatus::Busy,
                _ => AvailabilityStatus::Unavailable,
            };
            CandidateProfile {
                id: format!("provider-{i}"),
                name: format!("Provider {i}"),
                title: "Engineer".to_string(),
                skills,
                hourly_rate: rng.gen_range(20.0..200.0),
                availability_status,
                available_hours_per_week: rng.gen_range(0..=40),
                reputation_score: rng.gen_range(40.0..100.0),
                response_time_avg: rng.gen_range(0.1..48.0),
                completed_projects: rng.gen_range(0..100),
                success_rate: rng.gen_range(60.0..100.0),
                network_connections: vec![],
            }
        })
        .collect()
}
