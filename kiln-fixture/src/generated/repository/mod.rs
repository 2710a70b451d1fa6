//! Code generated by kiln. DO NOT EDIT.
mod skill;
mod user;
mod user_skill;
pub use skill::{SkillRepository, SkillRepositoryImpl};
pub use user::{UserRepository, UserRepositoryImpl};
pub use user_skill::{UserSkillRepository, UserSkillRepositoryImpl};
use crate::generated::dao;
/// Every entity repository, built over one set of data-access handles.
pub struct Repository {
    skill: skill::SkillRepositoryImpl,
    user: user::UserRepositoryImpl,
    user_skill: user_skill::UserSkillRepositoryImpl,
}
impl Repository {
    /// Build every repository. Relation loaders reach sibling repositories through the returned handle.
    pub fn new(
        executor: ::std::sync::Arc<dyn ::kiln::sql::Executor>,
        cache: ::std::sync::Arc<dyn ::kiln::cache::Cache>,
        user_id: u64,
    ) -> ::std::sync::Arc<Self> {
        ::std::sync::Arc::new_cyclic(|root| Self {
            skill: skill::SkillRepositoryImpl::new(
                dao::new_skill_dao(executor.clone(), cache.clone()),
                root.clone(),
            ),
            user: user::UserRepositoryImpl::new(
                dao::new_user_dao(executor.clone()),
                root.clone(),
            ),
            user_skill: user_skill::UserSkillRepositoryImpl::new(
                dao::new_user_skill_dao(executor.clone(), user_id),
                root.clone(),
            ),
        })
    }
    pub fn skill(&self) -> &dyn SkillRepository {
        &self.skill
    }
    pub fn user(&self) -> &dyn UserRepository {
        &self.user
    }
    pub fn user_skill(&self) -> &dyn UserSkillRepository {
        &self.user_skill
    }
}
