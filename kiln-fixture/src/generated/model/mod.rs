//! Code generated by kiln. DO NOT EDIT.
mod skill;
mod user;
mod user_skill;
pub use skill::{Skill, Skills, SkillFinder, SkillsRelations};
pub use user::{User, Users, UserFinder, UsersRelations};
pub use user_skill::{UserSkill, UserSkills, UserSkillFinder, UserSkillsRelations};
