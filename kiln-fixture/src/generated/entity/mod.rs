//! Code generated by kiln. DO NOT EDIT.
mod skill;
mod user;
mod user_skill;
pub use skill::{Skill, Skills};
pub use user::{User, Users};
pub use user_skill::{UserSkill, UserSkills};
