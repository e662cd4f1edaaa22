//! Work experience repository

use super::query::WorkQuery;
use super::query_rows;
use super::traits::WorkSource;
use crate::db::{self, Database};
use crate::error::StoreError;
use crate::models::{WorkExperience, WorkInput};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Clone)]
pub struct WorkRepository {
    db: Database,
}

impl WorkRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Every entry, most recent start date first
    pub async fn list(&self) -> Result<Vec<WorkExperience>, StoreError> {
        self.db
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM work_experience
                     ORDER BY start_date IS NULL, start_date DESC, created_at DESC, id",
                    WorkExperience::COLUMNS
                ))?;
                let rows = stmt
                    .query_map([], WorkExperience::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<WorkExperience>, StoreError> {
        self.db.call(move |conn| fetch(conn, id)).await
    }

    pub async fn create(&self, input: WorkInput) -> Result<WorkExperience, StoreError> {
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO work_experience (company, position, description, start_date,
                                                  end_date, current_job, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        input.company,
                        input.position,
                        input.description,
                        input.start_date,
                        input.end_date,
                        input.current_job,
                        db::now(),
                    ],
                )?;
                let created = fetch(conn, conn.last_insert_rowid())?;
                Ok(created.ok_or(rusqlite::Error::QueryReturnedNoRows)?)
            })
            .await
    }

    /// Overwrite an entry; `None` when it does not exist
    pub async fn update(&self, id: i64, input: WorkInput) -> Result<Option<WorkExperience>, StoreError> {
        self.db
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE work_experience
                     SET company = ?1, position = ?2, description = ?3, start_date = ?4,
                         end_date = ?5, current_job = ?6
                     WHERE id = ?7",
                    params![
                        input.company,
                        input.position,
                        input.description,
                        input.start_date,
                        input.end_date,
                        input.current_job,
                        id,
                    ],
                )?;
                if changed == 0 {
                    return Ok(None);
                }
                fetch(conn, id)
            })
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.db
            .call(move |conn| Ok(conn.execute("DELETE FROM work_experience WHERE id = ?1", [id])? > 0))
            .await
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<WorkExperience>, StoreError> {
    let entry = conn
        .query_row(
            &format!("SELECT {} FROM work_experience WHERE id = ?1", WorkExperience::COLUMNS),
            [id],
            WorkExperience::from_row,
        )
        .optional()?;
    Ok(entry)
}

#[async_trait]
impl WorkSource for WorkRepository {
    async fn search(&self, query: &WorkQuery) -> Result<Vec<WorkExperience>, StoreError> {
        let sql = query.to_sql();
        self.db
            .call(move |conn| query_rows(conn, &sql, WorkExperience::from_row))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{fixtures, LikePattern, WorkOrder};
    use chrono::NaiveDate;

    fn input(company: &str, start: Option<(i32, u32, u32)>) -> WorkInput {
        WorkInput {
            company: company.to_string(),
            position: "Developer".to_string(),
            description: Some("Shipped features".to_string()),
            start_date: start.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let db = fixtures::database().await;
        let repo = WorkRepository::new(db);

        let created = repo.create(input("Acme", Some((2020, 1, 1)))).await.unwrap();
        assert_eq!(created.company, "Acme");
        assert_eq!(created.start_date, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert!(!created.current_job);

        let mut change = input("Acme Corp", Some((2020, 1, 1)));
        change.current_job = true;
        let updated = repo.update(created.id, change).await.unwrap().unwrap();
        assert_eq!(updated.company, "Acme Corp");
        assert!(updated.current_job);

        assert_eq!(repo.get(created.id).await.unwrap(), Some(updated));
        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_entry() {
        let db = fixtures::database().await;
        let repo = WorkRepository::new(db);
        assert!(repo.update(3, input("Ghost", None)).await.unwrap().is_none());
        assert!(!repo.delete(3).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_by_start_date_undated_last() {
        let db = fixtures::database().await;
        let repo = WorkRepository::new(db);
        repo.create(input("Old", Some((2015, 6, 1)))).await.unwrap();
        repo.create(input("Undated", None)).await.unwrap();
        repo.create(input("New", Some((2022, 2, 1)))).await.unwrap();

        let companies: Vec<_> = repo.list().await.unwrap().into_iter().map(|w| w.company).collect();
        assert_eq!(companies, vec!["New", "Old", "Undated"]);
    }

    #[tokio::test]
    async fn test_search_orders() {
        let db = fixtures::database().await;
        let first = fixtures::insert_work(&db, "Alpha Labs", "Developer", Some("2018-01-01"), "2024-01-01 00:00:00").await;
        let second = fixtures::insert_work(&db, "Beta Labs", "Developer", Some("2021-01-01"), "2024-01-01 00:00:00").await;
        fixtures::insert_work(&db, "Gamma", "Designer", None, "2024-01-01 00:00:00").await;
        let repo = WorkRepository::new(db);

        let by_id = repo.search(&WorkQuery::new(LikePattern::contains("labs"))).await.unwrap();
        assert_eq!(by_id.iter().map(|w| w.id).collect::<Vec<_>>(), vec![first, second]);

        let by_start = repo
            .search(&WorkQuery::new(LikePattern::contains("labs")).ordered_by(WorkOrder::StartDate))
            .await
            .unwrap();
        assert_eq!(by_start.iter().map(|w| w.id).collect::<Vec<_>>(), vec![second, first]);

        // Description is searched too
        let described = repo.search(&WorkQuery::new(LikePattern::contains("built"))).await.unwrap();
        assert_eq!(described.len(), 3);
    }
}
