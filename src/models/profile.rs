//! Profile record (at most one exists)

use super::skill::Skill;
use super::work::WorkExperience;
use crate::error::Error;
use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// The portfolio owner's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub education: Option<String>,
    pub github_link: Option<String>,
    pub linkedin_link: Option<String>,
    pub portfolio_link: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Profile {
    pub(crate) const COLUMNS: &'static str = "id, name, email, education, github_link, \
         linkedin_link, portfolio_link, created_at, updated_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            education: row.get(3)?,
            github_link: row.get(4)?,
            linkedin_link: row.get(5)?,
            portfolio_link: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

/// Profile with its skills and the full work history
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetails {
    #[serde(flatten)]
    pub profile: Profile,
    pub skills: Vec<Skill>,
    pub work_experience: Vec<WorkExperience>,
}

/// Create/update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub name: String,
    pub email: String,
    pub education: Option<String>,
    pub github_link: Option<String>,
    pub linkedin_link: Option<String>,
    pub portfolio_link: Option<String>,
}

impl ProfileInput {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(Error::Validation("Name and email are required"));
        }
        Ok(())
    }
}

/// Payload for replacing the profile's skill links
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileSkillsInput {
    pub skill_ids: Vec<i64>,
}

impl ProfileSkillsInput {
    pub fn validate(&self) -> Result<(), Error> {
        if self.skill_ids.is_empty() {
            return Err(Error::Validation("Skill IDs array is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_requires_name_and_email() {
        let input: ProfileInput = serde_json::from_str(r#"{"name": "Jane"}"#).unwrap();
        assert!(input.validate().is_err());

        let input: ProfileInput =
            serde_json::from_str(r#"{"name": "Jane", "email": "jane@example.com"}"#).unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_skills_input_rejects_empty() {
        let input: ProfileSkillsInput = serde_json::from_str("{}").unwrap();
        assert!(input.validate().is_err());
    }
}
