//! Code generated by kiln. DO NOT EDIT.
//!
//! Data access for `skill`.
#![allow(dead_code, unused_mut, unused_variables)]
use crate::generated::entity;
/// Storage operations of `skill`.
pub trait SkillDao: Send + Sync {
    /// Insert `value`; a generated primary key is written back to it.
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::Skill,
    ) -> ::kiln::Result<()>;
    /// Store every column of `value`, matched by primary key.
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::Skill,
    ) -> ::kiln::Result<()>;
    /// Delete `value`, matched by primary key.
    fn delete(&self, ctx: &::kiln::Context, value: &entity::Skill) -> ::kiln::Result<()>;
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<entity::Skills>;
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64>;
    /// The row matching `id`, if any.
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<entity::Skill>>;
    /// Rows whose `id` is any of the given values.
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<entity::Skills>;
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
pub struct SkillDaoImpl {
    executor: ::std::sync::Arc<dyn ::kiln::sql::Executor>,
    cache: ::std::sync::Arc<dyn ::kiln::cache::Cache>,
}
/// Build the `skill` data-access handle.
pub fn new_skill_dao(
    executor: ::std::sync::Arc<dyn ::kiln::sql::Executor>,
    cache: ::std::sync::Arc<dyn ::kiln::cache::Cache>,
) -> ::std::sync::Arc<dyn SkillDao> {
    ::std::sync::Arc::new(SkillDaoImpl { executor, cache })
}
impl SkillDao for SkillDaoImpl {
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::Skill,
    ) -> ::kiln::Result<()> {
        let mut delayed = ::kiln::hook::Delayed::default();
        let result = (|| -> ::kiln::Result<()> {
            let executor = ::kiln::cache::ReadThrough::new(
                self.executor.as_ref(),
                self.cache.as_ref(),
                entity::Skill::cache_table(),
            );
            let query = "INSERT INTO `skills` (`id`, `name`) VALUES (?, ?)";
            let result = executor.exec(ctx, query, &value.to_values())?;
            value.id = result
                .last_insert_id
                .try_into()
                .map_err(::kiln::Error::conversion)?;
            Ok(())
        })();
        if result.is_ok() {
            delayed
                .check(
                    ctx.audit("skill", "create", &::kiln::ToValue::to_value(&*value)),
                );
        }
        delayed.finish(result)
    }
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::Skill,
    ) -> ::kiln::Result<()> {
        let mut delayed = ::kiln::hook::Delayed::default();
        let result = (|| -> ::kiln::Result<()> {
            let executor = ::kiln::cache::ReadThrough::new(
                self.executor.as_ref(),
                self.cache.as_ref(),
                entity::Skill::cache_table(),
            );
            let query = "UPDATE `skills` SET `name` = ? WHERE `id` = ?";
            executor
                .exec(
                    ctx,
                    query,
                    &[
                        ::kiln::ToValue::to_value(&value.name),
                        ::kiln::ToValue::to_value(&value.id),
                    ],
                )?;
            Ok(())
        })();
        if result.is_ok() {
            delayed
                .check(
                    ctx.audit("skill", "update", &::kiln::ToValue::to_value(&*value)),
                );
        }
        delayed.finish(result)
    }
    fn delete(
        &self,
        ctx: &::kiln::Context,
        value: &entity::Skill,
    ) -> ::kiln::Result<()> {
        let mut delayed = ::kiln::hook::Delayed::default();
        let result = (|| -> ::kiln::Result<()> {
            let executor = ::kiln::cache::ReadThrough::new(
                self.executor.as_ref(),
                self.cache.as_ref(),
                entity::Skill::cache_table(),
            );
            let query = "DELETE FROM `skills` WHERE `id` = ?";
            executor.exec(ctx, query, &[::kiln::ToValue::to_value(&value.id)])?;
            Ok(())
        })();
        if result.is_ok() {
            delayed
                .check(
                    ctx.audit("skill", "delete", &::kiln::ToValue::to_value(&*value)),
                );
        }
        delayed.finish(result)
    }
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<entity::Skills> {
        let executor = ::kiln::cache::ReadThrough::new(
            self.executor.as_ref(),
            self.cache.as_ref(),
            entity::Skill::cache_table(),
        );
        let query = "SELECT `id`, `name` FROM `skills`";
        ::kiln::sql::fetch_all(&executor, ctx, query, &[])
    }
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64> {
        let executor = ::kiln::cache::ReadThrough::new(
            self.executor.as_ref(),
            self.cache.as_ref(),
            entity::Skill::cache_table(),
        );
        let query = "SELECT COUNT(*) FROM `skills`";
        ::kiln::sql::fetch_count(&executor, ctx, query, &[])
    }
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<entity::Skill>> {
        let executor = ::kiln::cache::ReadThrough::new(
            self.executor.as_ref(),
            self.cache.as_ref(),
            entity::Skill::cache_table(),
        );
        let query = "SELECT `id`, `name` FROM `skills` WHERE `id` = ?";
        ::kiln::sql::fetch_optional(
            &executor,
            ctx,
            query,
            &[::kiln::ToValue::to_value(&id)],
        )
    }
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<entity::Skills> {
        let executor = ::kiln::cache::ReadThrough::new(
            self.executor.as_ref(),
            self.cache.as_ref(),
            entity::Skill::cache_table(),
        );
        if ids.is_empty() {
            return Ok(::std::vec::Vec::new());
        }
        let query = ::kiln::sql::substitute(
            "SELECT `id`, `name` FROM `skills` WHERE `id` IN (%s)",
            &[::kiln::sql::placeholders(ids.len())],
        );
        let args = ids
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        ::kiln::sql::fetch_all(&executor, ctx, &query, &args)
    }
    fn update_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        let executor = ::kiln::cache::ReadThrough::new(
            self.executor.as_ref(),
            self.cache.as_ref(),
            entity::Skill::cache_table(),
        );
        if updates.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `skills` SET %s WHERE `id` = ?",
            &[::kiln::sql::set_clause(updates)],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.push(::kiln::ToValue::to_value(&id));
        executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn update_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        let executor = ::kiln::cache::ReadThrough::new(
            self.executor.as_ref(),
            self.cache.as_ref(),
            entity::Skill::cache_table(),
        );
        if updates.is_empty() {
            return Ok(());
        }
        if ids.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `skills` SET %s WHERE `id` IN (%s)",
            &[::kiln::sql::set_clause(updates), ::kiln::sql::placeholders(ids.len())],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.extend(ids.iter().map(::kiln::ToValue::to_value));
        executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()> {
        let executor = ::kiln::cache::ReadThrough::new(
            self.executor.as_ref(),
            self.cache.as_ref(),
            entity::Skill::cache_table(),
        );
        let query = "DELETE FROM `skills` WHERE `id` = ?";
        executor.exec(ctx, query, &[::kiln::ToValue::to_value(&id)])?;
        Ok(())
    }
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()> {
        let executor = ::kiln::cache::ReadThrough::new(
            self.executor.as_ref(),
            self.cache.as_ref(),
            entity::Skill::cache_table(),
        );
        if ids.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "DELETE FROM `skills` WHERE `id` IN (%s)",
            &[::kiln::sql::placeholders(ids.len())],
        );
        let args = ids
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        executor.exec(ctx, &query, &args)?;
        Ok(())
    }
}
