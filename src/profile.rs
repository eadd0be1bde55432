//! Typed input records. Callers translate persisted request and provider records into these
//! shapes; [`CandidateProfile::validate`] and [`Requirement::validate`] reject malformed
//! required fields before any scoring happens.

use serde::{Deserialize, Serialize};

use crate::MatchError;

fn default_weight() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub name: String,
    /// Minimum acceptable proficiency on the 1 (beginner) to 4 (expert) scale.
    #[serde(default)]
    pub min_proficiency: Option<u8>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl RequiredSkill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_proficiency: None,
            weight: default_weight(),
        }
    }

    pub fn with_min_proficiency(mut self, level: u8) -> Self {
        self.min_proficiency = Some(level);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Proficiency as either a numeric level or a free-form label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Proficiency {
    Level(u8),
    Label(String),
}

impl Proficiency {
    pub const BEGINNER: u8 = 1;
    pub const MAX_LEVEL: u8 = 5;

    /// Numeric level in 1..=5. Labels map onto 1..=4; unknown labels count as beginner.
    pub fn level(&self) -> u8 {
        match self {
            Self::Level(level) => (*level).clamp(Self::BEGINNER, Self::MAX_LEVEL),
            Self::Label(label) => match label.trim().to_ascii_lowercase().as_str() {
                "beginner" => 1,
                "intermediate" => 2,
                "advanced" => 3,
                "expert" => 4,
                _ => Self::BEGINNER,
            },
        }
    }
}

impl From<u8> for Proficiency {
    fn from(level: u8) -> Self {
        Self::Level(level)
    }
}

impl From<&str> for Proficiency {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateSkill {
    pub name: String,
    #[serde(default)]
    pub proficiency: Option<Proficiency>,
    #[serde(default)]
    pub years: Option<u32>,
}

impl CandidateSkill {
    pub fn new(name: impl Into<String>, proficiency: impl Into<Proficiency>) -> Self {
        Self {
            name: name.into(),
            proficiency: Some(proficiency.into()),
            years: None,
        }
    }

    /// Missing proficiency counts as beginner.
    pub fn level(&self) -> u8 {
        self.proficiency
            .as_ref()
            .map(Proficiency::level)
            .unwrap_or(Proficiency::BEGINNER)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub required_skills: Vec<RequiredSkill>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub hours_per_week: Option<u32>,
    /// Carried for the caller's records; does not affect scoring.
    #[serde(default)]
    pub duration_weeks: Option<u32>,
}

impl Requirement {
    pub fn validate(&self) -> Result<(), MatchError> {
        for skill in &self.required_skills {
            if skill.name.trim().is_empty() {
                return Err(MatchError::MissingField {
                    field: "required_skills.name",
                });
            }
            if !skill.weight.is_finite() || skill.weight < 0.0 {
                return Err(MatchError::invalid(
                    "required_skills.weight",
                    format!("`{}` has weight {}", skill.name, skill.weight),
                ));
            }
        }
        if let Some(Budget { min, max }) = self.budget {
            if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
                return Err(MatchError::invalid(
                    "budget",
                    format!("bounds must be finite and non-negative ({min}..{max})"),
                ));
            }
            if min > max {
                return Err(MatchError::invalid(
                    "budget",
                    format!("min {min} exceeds max {max}"),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StatusRepr", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    #[default]
    Available = 0,
    PartiallyAvailable = 1,
    Busy = 2,
    Unavailable = 3,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<StatusRepr> for AvailabilityStatus {
    type Error = String;

    fn try_from(repr: StatusRepr) -> Result<Self, Self::Error> {
        match repr {
            StatusRepr::Code(0) => Ok(Self::Available),
            StatusRepr::Code(1) => Ok(Self::PartiallyAvailable),
            StatusRepr::Code(2) => Ok(Self::Busy),
            StatusRepr::Code(3) => Ok(Self::Unavailable),
            StatusRepr::Code(code) => Err(format!("unknown availability status code {code}")),
            StatusRepr::Name(name) => match name.to_ascii_uppercase().as_str() {
                "AVAILABLE" => Ok(Self::Available),
                "PARTIALLY_AVAILABLE" => Ok(Self::PartiallyAvailable),
                "BUSY" => Ok(Self::Busy),
                "UNAVAILABLE" => Ok(Self::Unavailable),
                _ => Err(format!("unknown availability status `{name}`")),
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub skills: Vec<CandidateSkill>,
    pub hourly_rate: f64,
    #[serde(default)]
    pub availability_status: AvailabilityStatus,
    #[serde(default)]
    pub available_hours_per_week: u32,
    #[serde(default)]
    pub reputation_score: f64,
    #[serde(default)]
    pub response_time_avg: f64,
    #[serde(default)]
    pub completed_projects: u32,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub network_connections: Vec<String>,
}

impl CandidateProfile {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.id.trim().is_empty() {
            return Err(MatchError::MissingField { field: "id" });
        }
        if self.skills.iter().any(|s| s.name.trim().is_empty()) {
            return Err(MatchError::MissingField {
                field: "skills.name",
            });
        }
        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(MatchError::invalid(
                "hourly_rate",
                format!("must be finite and non-negative (got {})", self.hourly_rate),
            ));
        }
        if !self.response_time_avg.is_finite() || self.response_time_avg < 0.0 {
            return Err(MatchError::invalid(
                "response_time_avg",
                format!(
                    "must be finite and non-negative (got {})",
                    self.response_time_avg
                ),
            ));
        }
        for (field, value) in [
            ("reputation_score", self.reputation_score),
            ("success_rate", self.success_rate),
        ] {
            if !value.is_finite() {
                return Err(MatchError::invalid(field, "must be finite"));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDatum {
    pub is_direct_connection: bool,
    #[serde(default)]
    pub mutual_connections: u32,
    #[serde(default)]
    pub connection_strength: f64,
}
