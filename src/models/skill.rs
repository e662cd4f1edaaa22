//! Skill records

use super::project::Project;
use crate::error::Error;
use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Proficiency tier, ordered from least to most proficient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            other => Err(format!("unknown proficiency level: {}", other)),
        }
    }
}

impl ToSql for ProficiencyLevel {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ProficiencyLevel {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// SQL expression ranking `proficiency_level` so that `DESC` puts experts first
pub(crate) const PROFICIENCY_RANK: &str = "CASE s.proficiency_level \
     WHEN 'expert' THEN 4 WHEN 'advanced' THEN 3 WHEN 'intermediate' THEN 2 ELSE 1 END";

/// A skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub proficiency_level: ProficiencyLevel,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Skill {
    /// Columns read by [`Skill::from_row`], qualified with the `s` alias
    pub(crate) const COLUMNS: &'static str =
        "s.id, s.name, s.proficiency_level, s.category, s.created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            proficiency_level: row.get(2)?,
            category: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

/// A skill with the number of projects tagged with it
#[derive(Debug, Clone, Serialize)]
pub struct SkillWithCount {
    #[serde(flatten)]
    pub skill: Skill,
    pub project_count: i64,
}

/// A skill with the projects that use it
#[derive(Debug, Clone, Serialize)]
pub struct SkillDetails {
    #[serde(flatten)]
    pub skill: Skill,
    pub projects: Vec<Project>,
}

/// Create/update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillInput {
    pub name: String,
    pub proficiency_level: Option<ProficiencyLevel>,
    pub category: Option<String>,
}

impl SkillInput {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Skill name is required"));
        }
        Ok(())
    }

    /// Proficiency to store, defaulting to intermediate
    pub fn level(&self) -> ProficiencyLevel {
        self.proficiency_level.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_order() {
        assert!(ProficiencyLevel::Expert > ProficiencyLevel::Advanced);
        assert!(ProficiencyLevel::Advanced > ProficiencyLevel::Intermediate);
        assert!(ProficiencyLevel::Intermediate > ProficiencyLevel::Beginner);
    }

    #[test]
    fn test_proficiency_serde_lowercase() {
        let json = serde_json::to_string(&ProficiencyLevel::Expert).unwrap();
        assert_eq!(json, "\"expert\"");
        let level: ProficiencyLevel = serde_json::from_str("\"beginner\"").unwrap();
        assert_eq!(level, ProficiencyLevel::Beginner);
        assert!(serde_json::from_str::<ProficiencyLevel>("\"guru\"").is_err());
    }

    #[test]
    fn test_input_defaults_to_intermediate() {
        let input: SkillInput = serde_json::from_str(r#"{"name": "Rust"}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.level(), ProficiencyLevel::Intermediate);
    }

    #[test]
    fn test_input_requires_name() {
        let input: SkillInput = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }
}
