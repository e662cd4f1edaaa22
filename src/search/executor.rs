//! Search execution across the four entity sources

use super::models::{AdvancedQuery, AdvancedSearchResponse, SearchResponse, ALL};
use crate::config::{AdvancedOrdering, SearchSettings};
use crate::error::{Error, Result};
use crate::results::{EntityKind, ResultContainer, ResultOrder};
use crate::store::{
    LikePattern, ProfileQuery, ProfileSource, ProjectQuery, ProjectSource, Repositories,
    SkillQuery, SkillSource, WorkOrder, WorkQuery, WorkSource,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Cross-entity search engine
///
/// Holds one read-only source per entity. Sources are queried concurrently
/// and any failure fails the whole search.
#[derive(Clone)]
pub struct SearchEngine {
    profiles: Arc<dyn ProfileSource>,
    projects: Arc<dyn ProjectSource>,
    skills: Arc<dyn SkillSource>,
    work: Arc<dyn WorkSource>,
    settings: SearchSettings,
}

impl SearchEngine {
    pub fn new(
        profiles: Arc<dyn ProfileSource>,
        projects: Arc<dyn ProjectSource>,
        skills: Arc<dyn SkillSource>,
        work: Arc<dyn WorkSource>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            profiles,
            projects,
            skills,
            work,
            settings,
        }
    }

    /// Engine backed by the database repositories
    pub fn from_repositories(repos: &Repositories, settings: SearchSettings) -> Self {
        Self::new(
            Arc::new(repos.profiles.clone()),
            Arc::new(repos.projects.clone()),
            Arc::new(repos.skills.clone()),
            Arc::new(repos.work.clone()),
            settings,
        )
    }

    /// Search every entity type, ordered by relevance weight then recency
    pub async fn search(&self, q: &str) -> Result<SearchResponse> {
        let pattern = self.pattern(q)?;
        let start = Instant::now();

        let container = self.search_all(&pattern).await?;
        let page = container.into_page(ResultOrder::Relevance, self.settings.max_results);

        debug!(
            query = q,
            total = page.total,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Global search complete"
        );

        Ok(SearchResponse {
            query: q.to_string(),
            total_results: page.total,
            results: page.results,
        })
    }

    /// Search one entity type with its filters, or all of them when no
    /// recognised type is given
    pub async fn search_advanced(&self, query: &AdvancedQuery) -> Result<AdvancedSearchResponse> {
        let pattern = self.pattern(&query.q)?;
        let kind = query.entity_kind();
        let start = Instant::now();

        let mut container = ResultContainer::new();
        let order = match kind {
            Some(EntityKind::Profile) => {
                container.extend_results(self.profiles.search(&ProfileQuery::new(pattern)).await?);
                ResultOrder::Recency
            }
            Some(EntityKind::Project) => {
                let mut projects = ProjectQuery::new(pattern);
                if let Some(skill) = query.skill_filter() {
                    projects = projects.with_skill(LikePattern::contains(skill));
                }
                container.extend_results(self.projects.search(&projects).await?);
                ResultOrder::Recency
            }
            Some(EntityKind::Skill) => {
                let mut skills = SkillQuery::new(pattern);
                if let Some(category) = query.category_filter() {
                    skills = skills.with_category(category);
                }
                container.extend_results(self.skills.search(&skills).await?);
                ResultOrder::Recency
            }
            Some(EntityKind::Work) => {
                let work = WorkQuery::new(pattern).ordered_by(WorkOrder::StartDate);
                container.extend_results(self.work.search(&work).await?);
                ResultOrder::Source
            }
            None => {
                container = self.search_all(&pattern).await?;
                match self.settings.advanced_ordering {
                    AdvancedOrdering::Relevance => ResultOrder::Relevance,
                    AdvancedOrdering::Recency => ResultOrder::Recency,
                }
            }
        };
        let page = container.into_page(order, self.settings.max_results);

        debug!(
            query = %query.q,
            kind = kind.map(EntityKind::as_str).unwrap_or(ALL),
            total = page.total,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Advanced search complete"
        );

        Ok(AdvancedSearchResponse {
            query: query.q.clone(),
            kind: kind.map(EntityKind::as_str).unwrap_or(ALL).to_string(),
            category: query.category_filter().unwrap_or(ALL).to_string(),
            skill: query.skill_filter().unwrap_or(ALL).to_string(),
            total_results: page.total,
            results: page.results,
        })
    }

    /// Validate the raw query and build its substring pattern
    fn pattern(&self, q: &str) -> Result<LikePattern> {
        let term = q.trim();
        if term.chars().count() < self.settings.min_query_length {
            return Err(Error::InvalidQuery {
                min: self.settings.min_query_length,
            });
        }
        Ok(LikePattern::contains(term))
    }

    async fn search_all(&self, pattern: &LikePattern) -> Result<ResultContainer> {
        let profiles = ProfileQuery::new(pattern.clone());
        let projects = ProjectQuery::new(pattern.clone());
        let skills = SkillQuery::new(pattern.clone());
        let work = WorkQuery::new(pattern.clone());

        let (profiles, projects, skills, work) = futures::try_join!(
            self.profiles.search(&profiles),
            self.projects.search(&projects),
            self.skills.search(&skills),
            self.work.search(&work),
        )?;

        let mut container = ResultContainer::new();
        container.extend_results(profiles);
        container.extend_results(projects);
        container.extend_results(skills);
        container.extend_results(work);
        Ok(container)
    }
}
