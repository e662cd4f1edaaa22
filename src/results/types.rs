//! Result type definitions

use crate::models::{Profile, Project, Skill, WorkExperience};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which entity a result was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Profile,
    Project,
    Skill,
    Work,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [Self::Profile, Self::Project, Self::Skill, Self::Work];

    /// Static relevance priority; higher sorts first
    pub fn weight(self) -> u8 {
        match self {
            Self::Profile => 3,
            Self::Project | Self::Skill => 2,
            Self::Work => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Project => "project",
            Self::Skill => "skill",
            Self::Work => "work",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or(())
    }
}

/// A single search hit, projected from one entity row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub category: Option<String>,
}

impl SearchResult {
    pub fn weight(&self) -> u8 {
        self.kind.weight()
    }
}

impl From<Profile> for SearchResult {
    fn from(profile: Profile) -> Self {
        Self {
            kind: EntityKind::Profile,
            id: profile.id,
            title: profile.name,
            description: profile.education,
            created_at: profile.created_at,
            category: Some(EntityKind::Profile.to_string()),
        }
    }
}

impl From<Project> for SearchResult {
    fn from(project: Project) -> Self {
        Self {
            kind: EntityKind::Project,
            id: project.id,
            title: project.title,
            description: project.description,
            created_at: project.created_at,
            category: Some(EntityKind::Project.to_string()),
        }
    }
}

impl From<Skill> for SearchResult {
    fn from(skill: Skill) -> Self {
        let description = match &skill.category {
            Some(category) => format!("{} level {} skill", skill.proficiency_level, category),
            None => format!("{} level skill", skill.proficiency_level),
        };
        Self {
            kind: EntityKind::Skill,
            id: skill.id,
            title: skill.name,
            description: Some(description),
            created_at: skill.created_at,
            category: skill.category,
        }
    }
}

impl From<WorkExperience> for SearchResult {
    fn from(work: WorkExperience) -> Self {
        let description = match work.description {
            Some(text) => format!("{} - {}", work.company, text),
            None => work.company,
        };
        Self {
            kind: EntityKind::Work,
            id: work.id,
            title: work.position,
            description: Some(description),
            created_at: work.created_at,
            category: Some(EntityKind::Work.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProficiencyLevel;

    fn timestamp() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-03-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_weights() {
        assert_eq!(EntityKind::Profile.weight(), 3);
        assert_eq!(EntityKind::Project.weight(), 2);
        assert_eq!(EntityKind::Skill.weight(), 2);
        assert_eq!(EntityKind::Work.weight(), 1);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("work".parse::<EntityKind>(), Ok(EntityKind::Work));
        assert!("all".parse::<EntityKind>().is_err());
        assert!("Skill".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_skill_projection() {
        let result = SearchResult::from(Skill {
            id: 4,
            name: "JavaScript".to_string(),
            proficiency_level: ProficiencyLevel::Advanced,
            category: Some("Programming".to_string()),
            created_at: timestamp(),
        });
        assert_eq!(result.kind, EntityKind::Skill);
        assert_eq!(result.title, "JavaScript");
        assert_eq!(result.description.as_deref(), Some("advanced level Programming skill"));
        assert_eq!(result.category.as_deref(), Some("Programming"));
    }

    #[test]
    fn test_work_projection() {
        let result = SearchResult::from(WorkExperience {
            id: 2,
            company: "Tech Solutions Inc.".to_string(),
            position: "Senior Developer".to_string(),
            description: Some("Led the web team".to_string()),
            start_date: None,
            end_date: None,
            current_job: true,
            created_at: timestamp(),
        });
        assert_eq!(result.title, "Senior Developer");
        assert_eq!(
            result.description.as_deref(),
            Some("Tech Solutions Inc. - Led the web team")
        );
        assert_eq!(result.category.as_deref(), Some("work"));
    }

    #[test]
    fn test_serializes_type_tag_without_weight() {
        let result = SearchResult::from(Project {
            id: 1,
            title: "Weather Dashboard".to_string(),
            description: Some("Forecasts".to_string()),
            github_link: None,
            live_link: None,
            image_url: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "project");
        assert_eq!(value["category"], "project");
        assert!(value.get("weight").is_none());
        assert!(value.get("kind").is_none());
    }
}
