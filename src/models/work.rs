//! Work experience records

use crate::error::Error;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub current_job: bool,
    pub created_at: NaiveDateTime,
}

impl WorkExperience {
    pub(crate) const COLUMNS: &'static str =
        "id, company, position, description, start_date, end_date, current_job, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            company: row.get(1)?,
            position: row.get(2)?,
            description: row.get(3)?,
            start_date: row.get(4)?,
            end_date: row.get(5)?,
            current_job: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}

/// Create/update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkInput {
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub current_job: bool,
}

impl WorkInput {
    pub fn validate(&self) -> Result<(), Error> {
        if self.company.trim().is_empty() || self.position.trim().is_empty() {
            return Err(Error::Validation("Company and position are required"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(Error::Validation("End date must not precede start date"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_parses_dates() {
        let input: WorkInput = serde_json::from_str(
            r#"{"company": "Acme", "position": "Engineer", "start_date": "2021-03-01"}"#,
        )
        .unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.start_date, NaiveDate::from_ymd_opt(2021, 3, 1));
        assert!(!input.current_job);
    }

    #[test]
    fn test_input_rejects_reversed_dates() {
        let input: WorkInput = serde_json::from_str(
            r#"{"company": "Acme", "position": "Engineer",
                "start_date": "2021-03-01", "end_date": "2020-01-01"}"#,
        )
        .unwrap();
        assert!(input.validate().is_err());
    }
}
