//! Entity records and request payloads

mod profile;
mod project;
mod skill;
mod work;

pub use profile::{Profile, ProfileDetails, ProfileInput, ProfileSkillsInput};
pub use project::{Project, ProjectDetails, ProjectInput, ProjectSummary};
pub use skill::{ProficiencyLevel, Skill, SkillDetails, SkillInput, SkillWithCount};
pub use work::{WorkExperience, WorkInput};

pub(crate) use skill::PROFICIENCY_RANK;
