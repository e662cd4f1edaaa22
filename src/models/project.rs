//! Project records

use super::skill::Skill;
use crate::error::Error;
use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Project {
    /// Columns read by [`Project::from_row`], qualified with the `p` alias
    pub(crate) const COLUMNS: &'static str = "p.id, p.title, p.description, p.github_link, \
         p.live_link, p.image_url, p.created_at, p.updated_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            github_link: row.get(3)?,
            live_link: row.get(4)?,
            image_url: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

/// Listing entry: a project with the names of its skills
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub skills: Vec<String>,
}

/// A project with its full skill records
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub project: Project,
    pub skills: Vec<Skill>,
}

/// Create/update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub image_url: Option<String>,
    /// Skills to link; on update `None` leaves the links untouched
    pub skill_ids: Option<Vec<i64>>,
}

impl ProjectInput {
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(Error::Validation("Title and description are required"));
        }
        Ok(())
    }
}
