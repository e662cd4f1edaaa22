//! Read-only entity sources consumed by the search engine

use super::query::{ProfileQuery, ProjectQuery, SkillQuery, WorkQuery};
use crate::error::StoreError;
use crate::models::{Profile, Project, Skill, WorkExperience};
use async_trait::async_trait;

/// Profiles matching a substring query
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn search(&self, query: &ProfileQuery) -> Result<Vec<Profile>, StoreError>;
}

/// Projects matching a substring query, optionally filtered by skill tag
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn search(&self, query: &ProjectQuery) -> Result<Vec<Project>, StoreError>;
}

/// Skills matching a substring query, optionally filtered by category
#[async_trait]
pub trait SkillSource: Send + Sync {
    async fn search(&self, query: &SkillQuery) -> Result<Vec<Skill>, StoreError>;
}

/// Work experience entries matching a substring query
#[async_trait]
pub trait WorkSource: Send + Sync {
    async fn search(&self, query: &WorkQuery) -> Result<Vec<WorkExperience>, StoreError>;
}
