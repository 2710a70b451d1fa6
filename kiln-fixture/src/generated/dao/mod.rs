//! Code generated by kiln. DO NOT EDIT.
mod skill;
mod user;
mod user_skill;
pub use skill::{SkillDao, SkillDaoImpl, new_skill_dao};
pub use user::{UserDao, UserDaoImpl, new_user_dao};
pub use user_skill::{UserSkillDao, UserSkillDaoImpl, new_user_skill_dao};
