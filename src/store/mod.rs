//! Entity repositories
//!
//! One repository per entity over the shared [`Database`]. Each repository
//! provides the CRUD operations behind its API routes and implements the
//! matching read-only source trait used by the search engine.

mod profile;
mod project;
pub mod query;
mod skill;
mod traits;
mod work;

pub use profile::ProfileRepository;
pub use project::ProjectRepository;
pub use query::{LikePattern, ProfileQuery, ProjectQuery, SkillQuery, SqlQuery, WorkOrder, WorkQuery};
pub use skill::SkillRepository;
pub use traits::{ProfileSource, ProjectSource, SkillSource, WorkSource};
pub use work::WorkRepository;

use crate::db::Database;
use crate::error::StoreError;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};

/// All repositories over one database
#[derive(Clone)]
pub struct Repositories {
    pub profiles: ProfileRepository,
    pub projects: ProjectRepository,
    pub skills: SkillRepository,
    pub work: WorkRepository,
}

impl Repositories {
    pub fn new(db: Database) -> Self {
        Self {
            profiles: ProfileRepository::new(db.clone()),
            projects: ProjectRepository::new(db.clone()),
            skills: SkillRepository::new(db.clone()),
            work: WorkRepository::new(db),
        }
    }
}

/// Run a rendered query and map every row
pub(crate) fn query_rows<T, F>(conn: &Connection, query: &SqlQuery, map: F) -> Result<Vec<T>, StoreError>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(&query.sql)?;
    let rows = stmt
        .query_map(params_from_iter(query.params.iter()), map)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Replace the skill links of one owner row (`project_skills` or `profile_skills`)
pub(crate) fn replace_skill_links(
    conn: &Connection,
    table: &str,
    owner_column: &str,
    owner_id: i64,
    skill_ids: &[i64],
) -> Result<(), StoreError> {
    conn.execute(
        &format!("DELETE FROM {} WHERE {} = ?1", table, owner_column),
        [owner_id],
    )?;
    for &skill_id in skill_ids {
        let exists = conn
            .query_row("SELECT 1 FROM skills WHERE id = ?1", [skill_id], |_| Ok(()))
            .optional()?;
        if exists.is_none() {
            return Err(StoreError::UnknownSkill(skill_id));
        }
        conn.execute(
            &format!(
                "INSERT OR IGNORE INTO {} ({}, skill_id) VALUES (?1, ?2)",
                table, owner_column
            ),
            [owner_id, skill_id],
        )?;
    }
    Ok(())
}
