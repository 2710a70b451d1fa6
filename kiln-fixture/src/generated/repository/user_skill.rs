//! Code generated by kiln. DO NOT EDIT.
//!
//! Repository of `user_skill`.
#![allow(dead_code, unused_imports)]
use crate::generated::{dao, entity, model};
use super::Repository;
/// Model-level operations of `user_skill`.
pub trait UserSkillRepository: model::UserSkillFinder {
    /// Insert `value`; a generated primary key is written back to it.
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::UserSkill,
    ) -> ::kiln::Result<()>;
    /// Store every column of `value`, matched by primary key.
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::UserSkill,
    ) -> ::kiln::Result<()>;
    /// Delete `value`, matched by primary key.
    fn delete(
        &self,
        ctx: &::kiln::Context,
        value: &model::UserSkill,
    ) -> ::kiln::Result<()>;
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64>;
    /// The row matching `id`, if any.
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<model::UserSkill>>;
    /// Rows whose `id` is any of the given values.
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<model::UserSkills>;
    /// The row matching `user_id`, `skill_id`, if any.
    fn find_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::Result<Option<model::UserSkill>>;
    /// Rows matching `user_id`.
    fn find_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
    ) -> ::kiln::Result<model::UserSkills>;
    /// Apply `updates` to the rows matching `id`.
    fn update_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()>;
    /// Apply `updates` to the rows matching `id`.
    fn update_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()>;
    /// Apply `updates` to the rows matching `user_id`, `skill_id`.
    fn update_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()>;
    /// Apply `updates` to the rows matching `user_id`.
    fn update_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()>;
    /// Apply `updates` to the rows matching `user_id`.
    fn update_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()>;
    /// Delete the rows matching `id`.
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()>;
    /// Delete the rows matching `id`.
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()>;
    /// Delete the rows matching `user_id`, `skill_id`.
    fn delete_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::Result<()>;
    /// Delete the rows matching `user_id`.
    fn delete_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
    ) -> ::kiln::Result<()>;
    /// Delete the rows matching `user_id`.
    fn delete_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
    ) -> ::kiln::Result<()>;
}
pub struct UserSkillRepositoryImpl {
    dao: ::std::sync::Arc<dyn dao::UserSkillDao>,
    root: ::std::sync::Weak<Repository>,
}
impl UserSkillRepositoryImpl {
    pub fn new(
        dao: ::std::sync::Arc<dyn dao::UserSkillDao>,
        root: ::std::sync::Weak<Repository>,
    ) -> Self {
        Self { dao, root }
    }
    /// A stored model bound to this repository.
    fn to_model(
        &self,
        value: entity::UserSkill,
        relations: &::std::sync::Arc<model::UserSkillsRelations>,
    ) -> model::UserSkill {
        let mut model = model::UserSkill::new(value);
        model.dao = Some(self.dao.clone());
        model.state.mark_created();
        model.state.set_saved(&model.value);
        {
            let root = self.root.clone();
            let relations = relations.clone();
            let key = model.value.skill_id.clone();
            let load: ::kiln::Loader<Option<model::Skill>> = ::std::sync::Arc::new(move |
                ctx: &::kiln::Context|
            {
                let repo = root
                    .upgrade()
                    .ok_or_else(|| ::kiln::Error::detached("user_skill"))?;
                relations.find_skill(ctx, key, &repo.skill)
            });
            model.skill_loader = Some(load);
        }
        model
    }
    fn to_single(&self, value: entity::UserSkill) -> model::UserSkill {
        let relations = ::std::sync::Arc::new(
            model::UserSkillsRelations::new(::std::slice::from_ref(&value)),
        );
        self.to_model(value, &relations)
    }
    /// Models sharing one relation memo, so each relation loads once for the whole collection.
    fn to_models(&self, values: entity::UserSkills) -> model::UserSkills {
        let relations = ::std::sync::Arc::new(model::UserSkillsRelations::new(&values));
        values.into_iter().map(|v| self.to_model(v, &relations)).collect()
    }
}
impl model::UserSkillFinder for UserSkillRepositoryImpl {
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<model::UserSkills> {
        let values = self.dao.find_all(ctx)?;
        Ok(self.to_models(values))
    }
    fn find_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
    ) -> ::kiln::Result<model::UserSkills> {
        let values = self.dao.find_by_user_ids(ctx, user_ids)?;
        Ok(self.to_models(values))
    }
}
impl UserSkillRepository for UserSkillRepositoryImpl {
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::UserSkill,
    ) -> ::kiln::Result<()> {
        value.dao = Some(self.dao.clone());
        value.create(ctx)
    }
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::UserSkill,
    ) -> ::kiln::Result<()> {
        value.dao = Some(self.dao.clone());
        value.update(ctx)
    }
    fn delete(
        &self,
        ctx: &::kiln::Context,
        value: &model::UserSkill,
    ) -> ::kiln::Result<()> {
        self.dao.delete(ctx, &value.value)
    }
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64> {
        self.dao.count(ctx)
    }
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<model::UserSkill>> {
        let value = self.dao.find_by_id(ctx, id)?;
        Ok(value.map(|v| self.to_single(v)))
    }
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<model::UserSkills> {
        let values = self.dao.find_by_ids(ctx, ids)?;
        Ok(self.to_models(values))
    }
    fn find_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::Result<Option<model::UserSkill>> {
        let value = self.dao.find_by_user_id_and_skill_id(ctx, user_id, skill_id)?;
        Ok(value.map(|v| self.to_single(v)))
    }
    fn find_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
    ) -> ::kiln::Result<model::UserSkills> {
        let values = self.dao.find_by_user_id(ctx, user_id)?;
        Ok(self.to_models(values))
    }
    fn update_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.dao.update_by_id(ctx, id, updates)
    }
    fn update_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.dao.update_by_ids(ctx, ids, updates)
    }
    fn update_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.dao.update_by_user_id_and_skill_id(ctx, user_id, skill_id, updates)
    }
    fn update_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.dao.update_by_user_id(ctx, user_id, updates)
    }
    fn update_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.dao.update_by_user_ids(ctx, user_ids, updates)
    }
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()> {
        self.dao.delete_by_id(ctx, id)
    }
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()> {
        self.dao.delete_by_ids(ctx, ids)
    }
    fn delete_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::Result<()> {
        self.dao.delete_by_user_id_and_skill_id(ctx, user_id, skill_id)
    }
    fn delete_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
    ) -> ::kiln::Result<()> {
        self.dao.delete_by_user_id(ctx, user_id)
    }
    fn delete_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
    ) -> ::kiln::Result<()> {
        self.dao.delete_by_user_ids(ctx, user_ids)
    }
}
