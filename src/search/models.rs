//! Search request and response models

use crate::results::{EntityKind, SearchResult};
use serde::{Deserialize, Serialize};

/// Echo value for a filter that was not applied
pub const ALL: &str = "all";

/// Query string of `GET /api/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Query string of `GET /api/search/advanced`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvancedQuery {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub skill: Option<String>,
}

impl AdvancedQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    /// The recognised entity type filter, if any
    pub fn entity_kind(&self) -> Option<EntityKind> {
        non_empty(&self.kind).and_then(|kind| kind.parse().ok())
    }

    pub fn category_filter(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn skill_filter(&self) -> Option<&str> {
        non_empty(&self.skill)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Body of a global search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<SearchResult>,
}

/// Body of an advanced search response, echoing the effective filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedSearchResponse {
    pub query: String,
    /// Entity type the search was restricted to, or `"all"`. An unrecognised
    /// `type` parameter is not applied, so it also reads `"all"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub skill: String,
    pub total_results: usize,
    pub results: Vec<SearchResult>,
}
