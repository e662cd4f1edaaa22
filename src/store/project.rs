//! Project repository

use super::query::{like_clause, LikePattern, ProjectQuery, SqlQuery};
use super::traits::ProjectSource;
use super::{query_rows, replace_skill_links};
use crate::db::{self, Database};
use crate::error::StoreError;
use crate::models::{Project, ProjectDetails, ProjectInput, ProjectSummary, Skill};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

#[derive(Clone)]
pub struct ProjectRepository {
    db: Database,
}

impl ProjectRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All projects newest first, optionally only those tagged with a skill
    /// whose name contains `skill`
    pub async fn list(&self, skill: Option<String>) -> Result<Vec<ProjectSummary>, StoreError> {
        self.db
            .call(move |conn| {
                let mut sql = format!("SELECT {} FROM projects p", Project::COLUMNS);
                let mut params = Vec::new();
                if let Some(skill) = skill {
                    sql.push_str(&format!(
                        " WHERE EXISTS (SELECT 1 FROM project_skills ps
                                        JOIN skills s ON s.id = ps.skill_id
                                        WHERE ps.project_id = p.id AND {})",
                        like_clause("s.name")
                    ));
                    params.push(LikePattern::contains(&skill).as_str().to_string());
                }
                sql.push_str(" ORDER BY p.created_at DESC, p.id DESC");

                let projects = query_rows(conn, &SqlQuery { sql, params }, Project::from_row)?;
                let mut names = skill_names(conn)?;

                Ok(projects
                    .into_iter()
                    .map(|project| ProjectSummary {
                        skills: names.remove(&project.id).unwrap_or_default(),
                        project,
                    })
                    .collect())
            })
            .await
    }

    /// One project with its skills
    pub async fn get(&self, id: i64) -> Result<Option<ProjectDetails>, StoreError> {
        self.db.call(move |conn| details(conn, id)).await
    }

    /// Create a project and link `skill_ids`
    pub async fn create(&self, input: ProjectInput) -> Result<ProjectDetails, StoreError> {
        self.db
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT INTO projects (title, description, github_link, live_link, image_url,
                                           created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                    params![
                        input.title,
                        input.description,
                        input.github_link,
                        input.live_link,
                        input.image_url,
                        db::now(),
                    ],
                )?;
                let id = tx.last_insert_rowid();
                if let Some(skill_ids) = &input.skill_ids {
                    replace_skill_links(&tx, "project_skills", "project_id", id, skill_ids)?;
                }
                let created = details(&tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
                tx.commit()?;
                Ok(created)
            })
            .await
    }

    /// Update a project; `skill_ids`, when given, replaces its links
    pub async fn update(&self, id: i64, input: ProjectInput) -> Result<Option<ProjectDetails>, StoreError> {
        self.db
            .call(move |conn| {
                let tx = conn.transaction()?;
                let changed = tx.execute(
                    "UPDATE projects
                     SET title = ?1, description = ?2, github_link = ?3, live_link = ?4,
                         image_url = ?5, updated_at = ?6
                     WHERE id = ?7",
                    params![
                        input.title,
                        input.description,
                        input.github_link,
                        input.live_link,
                        input.image_url,
                        db::now(),
                        id,
                    ],
                )?;
                if changed == 0 {
                    return Ok(None);
                }
                if let Some(skill_ids) = &input.skill_ids {
                    replace_skill_links(&tx, "project_skills", "project_id", id, skill_ids)?;
                }
                let updated = details(&tx, id)?;
                tx.commit()?;
                Ok(updated)
            })
            .await
    }

    /// Delete a project (its skill links cascade); `false` when it did not exist
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.db
            .call(move |conn| Ok(conn.execute("DELETE FROM projects WHERE id = ?1", [id])? > 0))
            .await
    }
}

fn details(conn: &Connection, id: i64) -> Result<Option<ProjectDetails>, StoreError> {
    let project = conn
        .query_row(
            &format!("SELECT {} FROM projects p WHERE p.id = ?1", Project::COLUMNS),
            [id],
            Project::from_row,
        )
        .optional()?;
    let Some(project) = project else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM skills s
         JOIN project_skills ps ON ps.skill_id = s.id
         WHERE ps.project_id = ?1
         ORDER BY s.name ASC",
        Skill::COLUMNS
    ))?;
    let skills = stmt
        .query_map([id], Skill::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(ProjectDetails { project, skills }))
}

/// Skill names per project id, alphabetical
fn skill_names(conn: &Connection) -> Result<HashMap<i64, Vec<String>>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT ps.project_id, s.name FROM project_skills ps
         JOIN skills s ON s.id = ps.skill_id
         ORDER BY s.name ASC",
    )?;
    let mut names: HashMap<i64, Vec<String>> = HashMap::new();
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
    for row in rows {
        let (project_id, name) = row?;
        names.entry(project_id).or_default().push(name);
    }
    Ok(names)
}

#[async_trait]
impl ProjectSource for ProjectRepository {
    async fn search(&self, query: &ProjectQuery) -> Result<Vec<Project>, StoreError> {
        let sql = query.to_sql();
        self.db
            .call(move |conn| query_rows(conn, &sql, Project::from_row))
            .await
    }
}
