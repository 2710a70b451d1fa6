//! Code generated by kiln. DO NOT EDIT.
pub mod factory;
mod skill;
mod user;
mod user_skill;
pub use skill::{SkillRepositoryExpect, SkillRepositoryMock};
pub use user::{UserRepositoryExpect, UserRepositoryMock};
pub use user_skill::{UserSkillRepositoryExpect, UserSkillRepositoryMock};
