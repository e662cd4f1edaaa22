//! Skill repository

use super::query::SkillQuery;
use super::query_rows;
use super::traits::SkillSource;
use crate::db::Database;
use crate::error::StoreError;
use crate::models::{Project, Skill, SkillDetails, SkillInput, SkillWithCount, PROFICIENCY_RANK};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Clone)]
pub struct SkillRepository {
    db: Database,
}

impl SkillRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Every skill with its project count, most proficient first then by name
    pub async fn list(&self) -> Result<Vec<SkillWithCount>, StoreError> {
        self.db
            .call(|conn| {
                with_counts(
                    conn,
                    &format!("ORDER BY {} DESC, s.name ASC", PROFICIENCY_RANK),
                    None,
                )
            })
            .await
    }

    /// The `limit` skills used by the most projects
    pub async fn top(&self, limit: u32) -> Result<Vec<SkillWithCount>, StoreError> {
        self.db
            .call(move |conn| {
                with_counts(
                    conn,
                    &format!("ORDER BY project_count DESC, {} DESC, s.name ASC", PROFICIENCY_RANK),
                    Some(limit),
                )
            })
            .await
    }

    /// One skill with the projects that use it
    pub async fn get(&self, id: i64) -> Result<Option<SkillDetails>, StoreError> {
        self.db
            .call(move |conn| {
                let Some(skill) = fetch(conn, id)? else {
                    return Ok(None);
                };
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM projects p
                     JOIN project_skills ps ON ps.project_id = p.id
                     WHERE ps.skill_id = ?1
                     ORDER BY p.created_at DESC, p.id DESC",
                    Project::COLUMNS
                ))?;
                let projects = stmt
                    .query_map([id], Project::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(SkillDetails { skill, projects }))
            })
            .await
    }

    /// Create a skill; names are unique
    pub async fn create(&self, input: SkillInput) -> Result<Skill, StoreError> {
        self.db
            .call(move |conn| {
                let tx = conn.transaction()?;
                if id_by_name(&tx, &input.name)?.is_some() {
                    return Err(StoreError::Conflict("Skill already exists".to_string()));
                }
                tx.execute(
                    "INSERT INTO skills (name, proficiency_level, category, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![input.name, input.level(), input.category, crate::db::now()],
                )?;
                let skill = fetch(&tx, tx.last_insert_rowid())?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
                tx.commit()?;
                Ok(skill)
            })
            .await
    }

    /// Update a skill; renaming onto another skill's name is a conflict
    pub async fn update(&self, id: i64, input: SkillInput) -> Result<Option<Skill>, StoreError> {
        self.db
            .call(move |conn| {
                let tx = conn.transaction()?;
                if fetch(&tx, id)?.is_none() {
                    return Ok(None);
                }
                if matches!(id_by_name(&tx, &input.name)?, Some(other) if other != id) {
                    return Err(StoreError::Conflict("Skill name already exists".to_string()));
                }
                tx.execute(
                    "UPDATE skills SET name = ?1, proficiency_level = ?2, category = ?3 WHERE id = ?4",
                    params![input.name, input.level(), input.category, id],
                )?;
                let skill = fetch(&tx, id)?;
                tx.commit()?;
                Ok(skill)
            })
            .await
    }

    /// Delete a skill (links cascade); `false` when it did not exist
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.db
            .call(move |conn| Ok(conn.execute("DELETE FROM skills WHERE id = ?1", [id])? > 0))
            .await
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Skill>, StoreError> {
    let skill = conn
        .query_row(
            &format!("SELECT {} FROM skills s WHERE s.id = ?1", Skill::COLUMNS),
            [id],
            Skill::from_row,
        )
        .optional()?;
    Ok(skill)
}

fn id_by_name(conn: &Connection, name: &str) -> Result<Option<i64>, StoreError> {
    let id = conn
        .query_row("SELECT id FROM skills WHERE name = ?1", [name], |row| row.get(0))
        .optional()?;
    Ok(id)
}

fn with_counts(conn: &Connection, order_by: &str, limit: Option<u32>) -> Result<Vec<SkillWithCount>, StoreError> {
    let mut sql = format!(
        "SELECT {}, COUNT(ps.project_id) AS project_count
         FROM skills s
         LEFT JOIN project_skills ps ON ps.skill_id = s.id
         GROUP BY s.id
         {}",
        Skill::COLUMNS,
        order_by
    );
    if limit.is_some() {
        sql.push_str(" LIMIT ?1");
    }

    let mut stmt = conn.prepare(&sql)?;
    let map = |row: &rusqlite::Row<'_>| {
        Ok(SkillWithCount {
            skill: Skill::from_row(row)?,
            project_count: row.get(5)?,
        })
    };
    let rows = match limit {
        Some(limit) => stmt.query_map([limit], map)?.collect::<Result<Vec<_>, _>>()?,
        None => stmt.query_map([], map)?.collect::<Result<Vec<_>, _>>()?,
    };
    Ok(rows)
}

#[async_trait]
impl SkillSource for SkillRepository {
    async fn search(&self, query: &SkillQuery) -> Result<Vec<Skill>, StoreError> {
        let sql = query.to_sql();
        self.db
            .call(move |conn| query_rows(conn, &sql, Skill::from_row))
            .await
    }
}
