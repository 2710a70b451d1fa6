//! Code generated by kiln. DO NOT EDIT.
//!
//! Repository of `skill`.
#![allow(dead_code, unused_imports)]
use crate::generated::{dao, entity, model};
use super::Repository;
/// Model-level operations of `skill`.
pub trait SkillRepository: model::SkillFinder {
    /// Insert `value`; a generated primary key is written back to it.
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::Skill,
    ) -> ::kiln::Result<()>;
    /// Store every column of `value`, matched by primary key.
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::Skill,
    ) -> ::kiln::Result<()>;
    /// Delete `value`, matched by primary key.
    fn delete(&self, ctx: &::kiln::Context, value: &model::Skill) -> ::kiln::Result<()>;
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64>;
    /// The row matching `id`, if any.
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<model::Skill>>;
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
    /// Delete the rows matching `id`.
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()>;
    /// Delete the rows matching `id`.
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()>;
}
pub struct SkillRepositoryImpl {
    dao: ::std::sync::Arc<dyn dao::SkillDao>,
    root: ::std::sync::Weak<Repository>,
}
impl SkillRepositoryImpl {
    pub fn new(
        dao: ::std::sync::Arc<dyn dao::SkillDao>,
        root: ::std::sync::Weak<Repository>,
    ) -> Self {
        Self { dao, root }
    }
    /// A stored model bound to this repository.
    fn to_model(
        &self,
        value: entity::Skill,
        _relations: &::std::sync::Arc<model::SkillsRelations>,
    ) -> model::Skill {
        let mut model = model::Skill::new(value);
        model.dao = Some(self.dao.clone());
        model.state.mark_created();
        model.state.set_saved(&model.value);
        model
    }
    fn to_single(&self, value: entity::Skill) -> model::Skill {
        let relations = ::std::sync::Arc::new(
            model::SkillsRelations::new(::std::slice::from_ref(&value)),
        );
        self.to_model(value, &relations)
    }
    /// Models sharing one relation memo, so each relation loads once for the whole collection.
    fn to_models(&self, values: entity::Skills) -> model::Skills {
        let relations = ::std::sync::Arc::new(model::SkillsRelations::new(&values));
        values.into_iter().map(|v| self.to_model(v, &relations)).collect()
    }
}
impl model::SkillFinder for SkillRepositoryImpl {
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<model::Skills> {
        let values = self.dao.find_all(ctx)?;
        Ok(self.to_models(values))
    }
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<model::Skills> {
        let values = self.dao.find_by_ids(ctx, ids)?;
        Ok(self.to_models(values))
    }
}
impl SkillRepository for SkillRepositoryImpl {
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::Skill,
    ) -> ::kiln::Result<()> {
        value.dao = Some(self.dao.clone());
        value.create(ctx)
    }
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::Skill,
    ) -> ::kiln::Result<()> {
        value.dao = Some(self.dao.clone());
        value.update(ctx)
    }
    fn delete(&self, ctx: &::kiln::Context, value: &model::Skill) -> ::kiln::Result<()> {
        self.dao.delete(ctx, &value.value)
    }
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64> {
        self.dao.count(ctx)
    }
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<model::Skill>> {
        let value = self.dao.find_by_id(ctx, id)?;
        Ok(value.map(|v| self.to_single(v)))
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
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()> {
        self.dao.delete_by_id(ctx, id)
    }
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()> {
        self.dao.delete_by_ids(ctx, ids)
    }
}
