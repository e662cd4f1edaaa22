//! HTTP request handlers

use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::state::AppState;
use crate::models::{
    Profile, ProfileDetails, ProfileInput, ProfileSkillsInput, ProjectDetails, ProjectInput,
    ProjectSummary, Skill, SkillDetails, SkillInput, SkillWithCount, WorkExperience, WorkInput,
};
use crate::search::{AdvancedQuery, AdvancedSearchResponse, SearchParams, SearchResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Success body for updates and deletes that return no record
fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}

// Search

pub async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let response = state
        .search
        .search(&params.q)
        .await
        .or_api("Failed to perform search")?;
    Ok(Json(response))
}

pub async fn search_advanced(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AdvancedQuery>,
) -> ApiResult<Json<AdvancedSearchResponse>> {
    let response = state
        .search
        .search_advanced(&query)
        .await
        .or_api("Failed to perform advanced search")?;
    Ok(Json(response))
}

// Profile

pub async fn get_profile(State(state): State<AppState>) -> ApiResult<Json<ProfileDetails>> {
    state
        .repos
        .profiles
        .details()
        .await
        .or_api("Failed to fetch profile")?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Profile not found"))
}

pub async fn create_profile(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProfileInput>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    input.validate().or_api("Failed to create profile")?;
    let profile = state
        .repos
        .profiles
        .create(input)
        .await
        .or_api("Failed to create profile")?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProfileInput>,
) -> ApiResult<Json<Profile>> {
    input.validate().or_api("Failed to update profile")?;
    state
        .repos
        .profiles
        .update(input)
        .await
        .or_api("Failed to update profile")?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Profile not found"))
}

pub async fn set_profile_skills(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProfileSkillsInput>,
) -> ApiResult<Json<Value>> {
    input.validate().or_api("Failed to update profile skills")?;
    let found = state
        .repos
        .profiles
        .set_skills(input.skill_ids)
        .await
        .or_api("Failed to update profile skills")?;
    if !found {
        return Err(ApiError::not_found("Profile not found"));
    }
    Ok(message("Profile skills updated successfully"))
}

// Projects

#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub skill: Option<String>,
}

pub async fn list_projects(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ProjectFilter>,
) -> ApiResult<Json<Vec<ProjectSummary>>> {
    let skill = filter.skill.filter(|s| !s.is_empty());
    let projects = state
        .repos
        .projects
        .list(skill)
        .await
        .or_api("Failed to fetch projects")?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ProjectDetails>> {
    state
        .repos
        .projects
        .get(id)
        .await
        .or_api("Failed to fetch project")?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Project not found"))
}

pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> ApiResult<(StatusCode, Json<ProjectDetails>)> {
    input.validate().or_api("Failed to create project")?;
    let project = state
        .repos
        .projects
        .create(input)
        .await
        .or_api("Failed to create project")?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> ApiResult<Json<ProjectDetails>> {
    input.validate().or_api("Failed to update project")?;
    state
        .repos
        .projects
        .update(id, input)
        .await
        .or_api("Failed to update project")?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Project not found"))
}

pub async fn delete_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = state
        .repos
        .projects
        .delete(id)
        .await
        .or_api("Failed to delete project")?;
    if !deleted {
        return Err(ApiError::not_found("Project not found"));
    }
    Ok(message("Project deleted successfully"))
}

// Skills

#[derive(Debug, Default, Deserialize)]
pub struct TopParams {
    pub limit: Option<u32>,
}

pub async fn list_skills(State(state): State<AppState>) -> ApiResult<Json<Vec<SkillWithCount>>> {
    let skills = state
        .repos
        .skills
        .list()
        .await
        .or_api("Failed to fetch skills")?;
    Ok(Json(skills))
}

pub async fn top_skills(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TopParams>,
) -> ApiResult<Json<Vec<SkillWithCount>>> {
    let skills = state
        .repos
        .skills
        .top(params.limit.unwrap_or(10))
        .await
        .or_api("Failed to fetch top skills")?;
    Ok(Json(skills))
}

pub async fn get_skill(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<SkillDetails>> {
    state
        .repos
        .skills
        .get(id)
        .await
        .or_api("Failed to fetch skill")?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Skill not found"))
}

pub async fn create_skill(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SkillInput>,
) -> ApiResult<(StatusCode, Json<Skill>)> {
    input.validate().or_api("Failed to create skill")?;
    let skill = state
        .repos
        .skills
        .create(input)
        .await
        .or_api("Failed to create skill")?;
    Ok((StatusCode::CREATED, Json(skill)))
}

pub async fn update_skill(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<SkillInput>,
) -> ApiResult<Json<Skill>> {
    input.validate().or_api("Failed to update skill")?;
    state
        .repos
        .skills
        .update(id, input)
        .await
        .or_api("Failed to update skill")?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Skill not found"))
}

pub async fn delete_skill(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = state
        .repos
        .skills
        .delete(id)
        .await
        .or_api("Failed to delete skill")?;
    if !deleted {
        return Err(ApiError::not_found("Skill not found"));
    }
    Ok(message("Skill deleted successfully"))
}

// Work experience

pub async fn list_work(State(state): State<AppState>) -> ApiResult<Json<Vec<WorkExperience>>> {
    let work = state
        .repos
        .work
        .list()
        .await
        .or_api("Failed to fetch work experience")?;
    Ok(Json(work))
}

pub async fn get_work(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<WorkExperience>> {
    state
        .repos
        .work
        .get(id)
        .await
        .or_api("Failed to fetch work experience")?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Work experience not found"))
}

pub async fn create_work(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<WorkInput>,
) -> ApiResult<(StatusCode, Json<WorkExperience>)> {
    input.validate().or_api("Failed to create work experience")?;
    let work = state
        .repos
        .work
        .create(input)
        .await
        .or_api("Failed to create work experience")?;
    Ok((StatusCode::CREATED, Json(work)))
}

pub async fn update_work(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<WorkInput>,
) -> ApiResult<Json<WorkExperience>> {
    input.validate().or_api("Failed to update work experience")?;
    state
        .repos
        .work
        .update(id, input)
        .await
        .or_api("Failed to update work experience")?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Work experience not found"))
}

pub async fn delete_work(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = state
        .repos
        .work
        .delete(id)
        .await
        .or_api("Failed to delete work experience")?;
    if !deleted {
        return Err(ApiError::not_found("Work experience not found"));
    }
    Ok(message("Work experience deleted successfully"))
}

// Service

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime": state.uptime().as_secs_f64(),
        "version": crate::VERSION,
    }))
}

/// Describes the API
pub async fn api_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": state.instance_name(),
        "version": crate::VERSION,
        "endpoints": {
            "health": "/health",
            "profile": "/api/profile",
            "projects": "/api/projects",
            "skills": "/api/skills",
            "work": "/api/work",
            "search": "/api/search",
            "advanced_search": "/api/search/advanced",
        }
    }))
}

/// Fallback for unknown `/api` paths
pub async fn api_not_found() -> ApiError {
    ApiError::not_found("Endpoint not found")
}
