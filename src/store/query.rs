//! Typed search queries rendered to parameterized SQL
//!
//! Each entity has its own query object carrying exactly the filters that
//! entity supports. Rendering never interpolates user input; every value is
//! a bound parameter.

use crate::models::{Profile, Project, Skill, WorkExperience};

/// Case-insensitive substring pattern (`%term%`) with LIKE wildcards escaped.
///
/// Matching goes through the `fold` SQL function registered by
/// [`Database`](crate::db::Database), since SQLite's own `LIKE` only ignores
/// case for ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern(String);

impl LikePattern {
    /// Pattern matching any value that contains `term`
    pub fn contains(term: &str) -> Self {
        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Self(pattern)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `column LIKE ?` with both sides case-folded
pub(crate) fn like_clause(column: &str) -> String {
    format!("fold({}) LIKE fold(?) ESCAPE '\\'", column)
}

/// Rendered SQL with its positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl SqlQuery {
    fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append `(c1 LIKE ? OR c2 LIKE ? ...)` binding `pattern` once per column
    fn push_any_like(&mut self, columns: &[&str], pattern: &LikePattern) {
        let clause = columns
            .iter()
            .map(|c| like_clause(c))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.sql.push('(');
        self.sql.push_str(&clause);
        self.sql.push(')');
        self.params
            .extend(columns.iter().map(|_| pattern.as_str().to_string()));
    }

    fn push(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    fn bind(&mut self, value: impl Into<String>) {
        self.params.push(value.into());
    }
}

/// Profiles whose name or education contains the pattern
#[derive(Debug, Clone)]
pub struct ProfileQuery {
    pub pattern: LikePattern,
}

impl ProfileQuery {
    pub fn new(pattern: LikePattern) -> Self {
        Self { pattern }
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut query = SqlQuery::new(format!("SELECT {} FROM profiles WHERE ", Profile::COLUMNS));
        query.push_any_like(&["name", "education"], &self.pattern);
        query.push(" ORDER BY id");
        query
    }
}

/// Projects whose title or description contains the pattern, optionally
/// restricted to projects tagged with a skill whose name contains `skill`
#[derive(Debug, Clone)]
pub struct ProjectQuery {
    pub pattern: LikePattern,
    pub skill: Option<LikePattern>,
}

impl ProjectQuery {
    pub fn new(pattern: LikePattern) -> Self {
        Self {
            pattern,
            skill: None,
        }
    }

    pub fn with_skill(mut self, skill: LikePattern) -> Self {
        self.skill = Some(skill);
        self
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut query = match &self.skill {
            Some(_) => SqlQuery::new(format!(
                "SELECT DISTINCT {} FROM projects p \
                 JOIN project_skills ps ON ps.project_id = p.id \
                 JOIN skills s ON s.id = ps.skill_id WHERE ",
                Project::COLUMNS
            )),
            None => SqlQuery::new(format!("SELECT {} FROM projects p WHERE ", Project::COLUMNS)),
        };
        query.push_any_like(&["p.title", "p.description"], &self.pattern);
        if let Some(skill) = &self.skill {
            query.push(" AND ");
            query.push(&like_clause("s.name"));
            query.bind(skill.as_str());
        }
        query.push(" ORDER BY p.id");
        query
    }
}

/// Skills whose name, category or proficiency contains the pattern,
/// optionally restricted to one exact category
#[derive(Debug, Clone)]
pub struct SkillQuery {
    pub pattern: LikePattern,
    pub category: Option<String>,
}

impl SkillQuery {
    pub fn new(pattern: LikePattern) -> Self {
        Self {
            pattern,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut query = SqlQuery::new(format!("SELECT {} FROM skills s WHERE ", Skill::COLUMNS));
        query.push_any_like(&["s.name", "s.category", "s.proficiency_level"], &self.pattern);
        if let Some(category) = &self.category {
            query.push(" AND s.category = ?");
            query.bind(category.as_str());
        }
        query.push(" ORDER BY s.id");
        query
    }
}

/// Row order for work experience matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkOrder {
    /// Insertion order
    #[default]
    Id,
    /// Most recent start date first, undated entries last
    StartDate,
}

/// Work entries whose company, position or description contains the pattern
#[derive(Debug, Clone)]
pub struct WorkQuery {
    pub pattern: LikePattern,
    pub order: WorkOrder,
}

impl WorkQuery {
    pub fn new(pattern: LikePattern) -> Self {
        Self {
            pattern,
            order: WorkOrder::Id,
        }
    }

    pub fn ordered_by(mut self, order: WorkOrder) -> Self {
        self.order = order;
        self
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut query = SqlQuery::new(format!(
            "SELECT {} FROM work_experience WHERE ",
            WorkExperience::COLUMNS
        ));
        query.push_any_like(&["company", "position", "description"], &self.pattern);
        match self.order {
            WorkOrder::Id => query.push(" ORDER BY id"),
            WorkOrder::StartDate => {
                query.push(" ORDER BY start_date IS NULL, start_date DESC, created_at DESC, id")
            }
        }
        query
    }
}
