//! Sample dataset for demos and local development

use crate::error::StoreError;
use rusqlite::{params, Connection};
use tracing::info;

struct SampleSkill {
    name: &'static str,
    level: &'static str,
    category: &'static str,
}

struct SampleProject {
    title: &'static str,
    description: &'static str,
    slug: &'static str,
    /// Indexes into `SKILLS`
    skills: &'static [usize],
}

struct SampleWork {
    company: &'static str,
    position: &'static str,
    description: &'static str,
    start_date: &'static str,
    end_date: Option<&'static str>,
}

const SKILLS: &[SampleSkill] = &[
    SampleSkill { name: "JavaScript", level: "expert", category: "Programming" },
    SampleSkill { name: "Python", level: "advanced", category: "Programming" },
    SampleSkill { name: "React", level: "advanced", category: "Frontend" },
    SampleSkill { name: "Node.js", level: "advanced", category: "Backend" },
    SampleSkill { name: "MySQL", level: "intermediate", category: "Database" },
    SampleSkill { name: "Docker", level: "intermediate", category: "DevOps" },
    SampleSkill { name: "Git", level: "expert", category: "Tools" },
    SampleSkill { name: "TypeScript", level: "intermediate", category: "Programming" },
];

const PROJECTS: &[SampleProject] = &[
    SampleProject {
        title: "E-Commerce Platform",
        description: "Full-stack shop with accounts, product management, a cart and payments.",
        slug: "ecommerce",
        skills: &[0, 2, 3, 4],
    },
    SampleProject {
        title: "Task Management App",
        description: "Team task board with live updates and drag-and-drop ordering.",
        slug: "task-manager",
        skills: &[2, 7],
    },
    SampleProject {
        title: "Weather Dashboard",
        description: "Current conditions and forecasts from a public weather API, charted.",
        slug: "weather-app",
        skills: &[0, 1, 2],
    },
    SampleProject {
        title: "Portfolio Website",
        description: "Responsive site presenting projects, skills and experience.",
        slug: "portfolio",
        skills: &[0, 6],
    },
];

const WORK: &[SampleWork] = &[
    SampleWork {
        company: "Tech Solutions Inc.",
        position: "Senior Full Stack Developer",
        description: "Led web application development on React and Node.js, mentored juniors, built CI/CD.",
        start_date: "2022-01-01",
        end_date: None,
    },
    SampleWork {
        company: "StartupXYZ",
        position: "Frontend Developer",
        description: "Built responsive interfaces together with the design and backend teams.",
        start_date: "2020-06-01",
        end_date: Some("2021-12-31"),
    },
];

/// Wipe every table and load the sample dataset in one transaction
pub fn seed(conn: &mut Connection) -> Result<(), StoreError> {
    let tx = conn.transaction()?;

    tx.execute_batch(
        "DELETE FROM project_skills;
         DELETE FROM profile_skills;
         DELETE FROM work_experience;
         DELETE FROM projects;
         DELETE FROM skills;
         DELETE FROM profiles;",
    )?;

    tx.execute(
        "INSERT INTO profiles (name, email, education, github_link, linkedin_link, portfolio_link)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            "John Doe",
            "john.doe@example.com",
            "Bachelor of Science in Computer Science, University of Technology, 2020",
            "https://github.com/johndoe",
            "https://linkedin.com/in/johndoe",
            "https://johndoe.dev",
        ],
    )?;
    let profile_id = tx.last_insert_rowid();

    let mut skill_ids = Vec::with_capacity(SKILLS.len());
    for skill in SKILLS {
        tx.execute(
            "INSERT INTO skills (name, proficiency_level, category) VALUES (?1, ?2, ?3)",
            params![skill.name, skill.level, skill.category],
        )?;
        let skill_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO profile_skills (profile_id, skill_id) VALUES (?1, ?2)",
            params![profile_id, skill_id],
        )?;
        skill_ids.push(skill_id);
    }

    for project in PROJECTS {
        tx.execute(
            "INSERT INTO projects (title, description, github_link, live_link, image_url)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                project.title,
                project.description,
                format!("https://github.com/johndoe/{}", project.slug),
                format!("https://{}.johndoe.dev", project.slug),
                format!("https://via.placeholder.com/400x300?text={}", project.slug),
            ],
        )?;
        let project_id = tx.last_insert_rowid();
        for &idx in project.skills {
            tx.execute(
                "INSERT INTO project_skills (project_id, skill_id) VALUES (?1, ?2)",
                params![project_id, skill_ids[idx]],
            )?;
        }
    }

    for work in WORK {
        tx.execute(
            "INSERT INTO work_experience (company, position, description, start_date, end_date, current_job)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                work.company,
                work.position,
                work.description,
                work.start_date,
                work.end_date,
                work.end_date.is_none(),
            ],
        )?;
    }

    tx.commit()?;
    info!(
        "Seeded 1 profile, {} skills, {} projects, {} work entries",
        SKILLS.len(),
        PROJECTS.len(),
        WORK.len()
    );
    Ok(())
}
