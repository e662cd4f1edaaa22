//! Profile repository

use super::query::ProfileQuery;
use super::traits::ProfileSource;
use super::{query_rows, replace_skill_links};
use crate::db::{self, Database};
use crate::error::StoreError;
use crate::models::{Profile, ProfileDetails, ProfileInput, Skill, WorkExperience, PROFICIENCY_RANK};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Clone)]
pub struct ProfileRepository {
    db: Database,
}

impl ProfileRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The profile with its skills (most proficient first) and work history
    pub async fn details(&self) -> Result<Option<ProfileDetails>, StoreError> {
        self.db
            .call(|conn| {
                let Some(profile) = current(conn)? else {
                    return Ok(None);
                };

                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM skills s
                     JOIN profile_skills ps ON ps.skill_id = s.id
                     WHERE ps.profile_id = ?1
                     ORDER BY {} DESC, s.name ASC",
                    Skill::COLUMNS,
                    PROFICIENCY_RANK
                ))?;
                let skills = stmt
                    .query_map([profile.id], Skill::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;

                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM work_experience
                     ORDER BY start_date IS NULL, start_date DESC, created_at DESC, id",
                    WorkExperience::COLUMNS
                ))?;
                let work_experience = stmt
                    .query_map([], WorkExperience::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Some(ProfileDetails {
                    profile,
                    skills,
                    work_experience,
                }))
            })
            .await
    }

    /// Create the profile; fails with a conflict when one already exists
    pub async fn create(&self, input: ProfileInput) -> Result<Profile, StoreError> {
        self.db
            .call(move |conn| {
                let tx = conn.transaction()?;
                if current(&tx)?.is_some() {
                    return Err(StoreError::Conflict("Profile already exists".to_string()));
                }

                let now = db::now();
                tx.execute(
                    "INSERT INTO profiles (name, email, education, github_link, linkedin_link,
                                           portfolio_link, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                    params![
                        input.name,
                        input.email,
                        input.education,
                        input.github_link,
                        input.linkedin_link,
                        input.portfolio_link,
                        now,
                    ],
                )?;
                let profile = fetch(&tx, tx.last_insert_rowid())?;
                tx.commit()?;
                Ok(profile)
            })
            .await
    }

    /// Overwrite every profile field; `None` when there is no profile
    pub async fn update(&self, input: ProfileInput) -> Result<Option<Profile>, StoreError> {
        self.db
            .call(move |conn| {
                let Some(existing) = current(conn)? else {
                    return Ok(None);
                };
                conn.execute(
                    "UPDATE profiles
                     SET name = ?1, email = ?2, education = ?3, github_link = ?4,
                         linkedin_link = ?5, portfolio_link = ?6, updated_at = ?7
                     WHERE id = ?8",
                    params![
                        input.name,
                        input.email,
                        input.education,
                        input.github_link,
                        input.linkedin_link,
                        input.portfolio_link,
                        db::now(),
                        existing.id,
                    ],
                )?;
                Ok(Some(fetch(conn, existing.id)?))
            })
            .await
    }

    /// Replace the profile's skill links; `false` when there is no profile
    pub async fn set_skills(&self, skill_ids: Vec<i64>) -> Result<bool, StoreError> {
        self.db
            .call(move |conn| {
                let tx = conn.transaction()?;
                let Some(profile) = current(&tx)? else {
                    return Ok(false);
                };
                replace_skill_links(&tx, "profile_skills", "profile_id", profile.id, &skill_ids)?;
                tx.commit()?;
                Ok(true)
            })
            .await
    }
}

fn current(conn: &Connection) -> Result<Option<Profile>, StoreError> {
    let profile = conn
        .query_row(
            &format!("SELECT {} FROM profiles ORDER BY id LIMIT 1", Profile::COLUMNS),
            [],
            Profile::from_row,
        )
        .optional()?;
    Ok(profile)
}

fn fetch(conn: &Connection, id: i64) -> Result<Profile, StoreError> {
    Ok(conn.query_row(
        &format!("SELECT {} FROM profiles WHERE id = ?1", Profile::COLUMNS),
        [id],
        Profile::from_row,
    )?)
}

#[async_trait]
impl ProfileSource for ProfileRepository {
    async fn search(&self, query: &ProfileQuery) -> Result<Vec<Profile>, StoreError> {
        let sql = query.to_sql();
        self.db
            .call(move |conn| query_rows(conn, &sql, Profile::from_row))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures;
    use crate::store::LikePattern;

    fn input(name: &str) -> ProfileInput {
        ProfileInput {
            name: name.to_string(),
            email: "jane@example.com".to_string(),
            education: Some("MSc Computer Science".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_details() {
        let db = fixtures::database().await;
        let repo = ProfileRepository::new(db.clone());

        assert!(repo.details().await.unwrap().is_none());

        let created = repo.create(input("Jane")).await.unwrap();
        assert_eq!(created.name, "Jane");

        let details = repo.details().await.unwrap().unwrap();
        assert_eq!(details.profile.id, created.id);
        assert!(details.skills.is_empty());
    }

    #[tokio::test]
    async fn test_second_profile_conflicts() {
        let db = fixtures::database().await;
        let repo = ProfileRepository::new(db);

        repo.create(input("Jane")).await.unwrap();
        let err = repo.create(input("Other")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_missing_profile() {
        let db = fixtures::database().await;
        let repo = ProfileRepository::new(db);
        assert!(repo.update(input("Jane")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_skills_ordered_by_proficiency() {
        let db = fixtures::database().await;
        let repo = ProfileRepository::new(db.clone());
        repo.create(input("Jane")).await.unwrap();

        let beginner = fixtures::insert_skill(&db, "Zig", "beginner", "Programming", "2024-01-01 00:00:00").await;
        let expert = fixtures::insert_skill(&db, "Rust", "expert", "Programming", "2024-01-01 00:00:00").await;
        let advanced = fixtures::insert_skill(&db, "Go", "advanced", "Programming", "2024-01-01 00:00:00").await;

        assert!(repo.set_skills(vec![beginner, expert, advanced]).await.unwrap());

        let names: Vec<_> = repo
            .details()
            .await
            .unwrap()
            .unwrap()
            .skills
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Rust", "Go", "Zig"]);
    }

    #[tokio::test]
    async fn test_set_skills_rejects_unknown_id() {
        let db = fixtures::database().await;
        let repo = ProfileRepository::new(db);
        repo.create(input("Jane")).await.unwrap();

        let err = repo.set_skills(vec![404]).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownSkill(404)));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let db = fixtures::database().await;
        let repo = ProfileRepository::new(db.clone());
        repo.create(input("Jane")).await.unwrap();

        let query = ProfileQuery::new(LikePattern::contains("computer"));
        assert_eq!(repo.search(&query).await.unwrap().len(), 1);

        let query = ProfileQuery::new(LikePattern::contains("biology"));
        assert!(repo.search(&query).await.unwrap().is_empty());
    }
}
