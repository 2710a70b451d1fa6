//! Code generated by kiln. DO NOT EDIT.
mod skill;
mod user;
mod user_skill;
pub use skill::{default_skill, rust, sql, default_skills};
pub use user::{alice, default_user, default_users};
pub use user_skill::{default_user_skill, alice_skills, default_user_skills};
