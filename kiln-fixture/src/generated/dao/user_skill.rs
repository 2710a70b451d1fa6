//! Code generated by kiln. DO NOT EDIT.
//!
//! Data access for `user_skill`.
#![allow(dead_code, unused_mut, unused_variables)]
use crate::generated::entity;
/// Storage operations of `user_skill`.
pub trait UserSkillDao: Send + Sync {
    /// Insert `value`; a generated primary key is written back to it.
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::UserSkill,
    ) -> ::kiln::Result<()>;
    /// Store every column of `value`, matched by primary key.
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::UserSkill,
    ) -> ::kiln::Result<()>;
    /// Delete `value`, matched by primary key.
    fn delete(
        &self,
        ctx: &::kiln::Context,
        value: &entity::UserSkill,
    ) -> ::kiln::Result<()>;
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<entity::UserSkills>;
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64>;
    /// The row matching `id`, if any.
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<entity::UserSkill>>;
    /// Rows whose `id` is any of the given values.
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<entity::UserSkills>;
    /// The row matching `user_id`, `skill_id`, if any.
    fn find_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::Result<Option<entity::UserSkill>>;
    /// Rows matching `user_id`.
    fn find_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
    ) -> ::kiln::Result<entity::UserSkills>;
    /// Rows whose `user_id` is any of the given values.
    fn find_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
    ) -> ::kiln::Result<entity::UserSkills>;
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
pub struct UserSkillDaoImpl {
    executor: ::std::sync::Arc<dyn ::kiln::sql::Executor>,
    user_id: u64,
}
/// Build the `user_skill` data-access handle.
pub fn new_user_skill_dao(
    executor: ::std::sync::Arc<dyn ::kiln::sql::Executor>,
    user_id: u64,
) -> ::std::sync::Arc<dyn UserSkillDao> {
    ::std::sync::Arc::new(UserSkillDaoImpl {
        executor,
        user_id,
    })
}
impl UserSkillDao for UserSkillDaoImpl {
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::UserSkill,
    ) -> ::kiln::Result<()> {
        let mut delayed = ::kiln::hook::Delayed::default();
        let result = (|| -> ::kiln::Result<()> {
            let query = "INSERT INTO `user_skills` (`id`, `user_id`, `skill_id`) VALUES (?, ?, ?)";
            let result = self.executor.exec(ctx, query, &value.to_values())?;
            value.id = result
                .last_insert_id
                .try_into()
                .map_err(::kiln::Error::conversion)?;
            Ok(())
        })();
        if result.is_ok() {
            delayed
                .check(
                    ctx
                        .audit(
                            "user_skill",
                            "create",
                            &::kiln::ToValue::to_value(&*value),
                        ),
                );
        }
        delayed.finish(result)
    }
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::UserSkill,
    ) -> ::kiln::Result<()> {
        let mut delayed = ::kiln::hook::Delayed::default();
        let result = (|| -> ::kiln::Result<()> {
            let query = "UPDATE `user_skills` SET `user_id` = ?, `skill_id` = ? WHERE `id` = ?";
            self.executor
                .exec(
                    ctx,
                    query,
                    &[
                        ::kiln::ToValue::to_value(&value.user_id),
                        ::kiln::ToValue::to_value(&value.skill_id),
                        ::kiln::ToValue::to_value(&value.id),
                    ],
                )?;
            Ok(())
        })();
        if result.is_ok() {
            delayed
                .check(
                    ctx
                        .audit(
                            "user_skill",
                            "update",
                            &::kiln::ToValue::to_value(&*value),
                        ),
                );
        }
        delayed.finish(result)
    }
    fn delete(
        &self,
        ctx: &::kiln::Context,
        value: &entity::UserSkill,
    ) -> ::kiln::Result<()> {
        let mut delayed = ::kiln::hook::Delayed::default();
        let result = (|| -> ::kiln::Result<()> {
            let query = "DELETE FROM `user_skills` WHERE `id` = ?";
            self.executor.exec(ctx, query, &[::kiln::ToValue::to_value(&value.id)])?;
            Ok(())
        })();
        if result.is_ok() {
            delayed
                .check(
                    ctx
                        .audit(
                            "user_skill",
                            "delete",
                            &::kiln::ToValue::to_value(&*value),
                        ),
                );
        }
        delayed.finish(result)
    }
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<entity::UserSkills> {
        let user_id = self.user_id;
        let query = "SELECT `id`, `user_id`, `skill_id` FROM `user_skills` WHERE `user_id` = ?";
        ::kiln::sql::fetch_all(
            self.executor.as_ref(),
            ctx,
            query,
            &[::kiln::ToValue::to_value(&user_id)],
        )
    }
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64> {
        let user_id = self.user_id;
        let query = "SELECT COUNT(*) FROM `user_skills` WHERE `user_id` = ?";
        ::kiln::sql::fetch_count(
            self.executor.as_ref(),
            ctx,
            query,
            &[::kiln::ToValue::to_value(&user_id)],
        )
    }
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<entity::UserSkill>> {
        let query = "SELECT `id`, `user_id`, `skill_id` FROM `user_skills` WHERE `id` = ?";
        ::kiln::sql::fetch_optional(
            self.executor.as_ref(),
            ctx,
            query,
            &[::kiln::ToValue::to_value(&id)],
        )
    }
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<entity::UserSkills> {
        if ids.is_empty() {
            return Ok(::std::vec::Vec::new());
        }
        let query = ::kiln::sql::substitute(
            "SELECT `id`, `user_id`, `skill_id` FROM `user_skills` WHERE `id` IN (%s)",
            &[::kiln::sql::placeholders(ids.len())],
        );
        let args = ids
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        ::kiln::sql::fetch_all(self.executor.as_ref(), ctx, &query, &args)
    }
    fn find_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::Result<Option<entity::UserSkill>> {
        let query = "SELECT `id`, `user_id`, `skill_id` FROM `user_skills` WHERE `user_id` = ? AND `skill_id` = ?";
        ::kiln::sql::fetch_optional(
            self.executor.as_ref(),
            ctx,
            query,
            &[::kiln::ToValue::to_value(&user_id), ::kiln::ToValue::to_value(&skill_id)],
        )
    }
    fn find_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
    ) -> ::kiln::Result<entity::UserSkills> {
        let query = "SELECT `id`, `user_id`, `skill_id` FROM `user_skills` WHERE `user_id` = ?";
        ::kiln::sql::fetch_all(
            self.executor.as_ref(),
            ctx,
            query,
            &[::kiln::ToValue::to_value(&user_id)],
        )
    }
    fn find_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
    ) -> ::kiln::Result<entity::UserSkills> {
        if user_ids.is_empty() {
            return Ok(::std::vec::Vec::new());
        }
        let query = ::kiln::sql::substitute(
            "SELECT `id`, `user_id`, `skill_id` FROM `user_skills` WHERE `user_id` IN (%s)",
            &[::kiln::sql::placeholders(user_ids.len())],
        );
        let args = user_ids
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        ::kiln::sql::fetch_all(self.executor.as_ref(), ctx, &query, &args)
    }
    fn update_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `user_skills` SET %s WHERE `id` = ?",
            &[::kiln::sql::set_clause(updates)],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.push(::kiln::ToValue::to_value(&id));
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn update_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        if ids.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `user_skills` SET %s WHERE `id` IN (%s)",
            &[::kiln::sql::set_clause(updates), ::kiln::sql::placeholders(ids.len())],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.extend(ids.iter().map(::kiln::ToValue::to_value));
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn update_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `user_skills` SET %s WHERE `user_id` = ? AND `skill_id` = ?",
            &[::kiln::sql::set_clause(updates)],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.push(::kiln::ToValue::to_value(&user_id));
        args.push(::kiln::ToValue::to_value(&skill_id));
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn update_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `user_skills` SET %s WHERE `user_id` = ?",
            &[::kiln::sql::set_clause(updates)],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.push(::kiln::ToValue::to_value(&user_id));
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn update_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        if user_ids.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `user_skills` SET %s WHERE `user_id` IN (%s)",
            &[
                ::kiln::sql::set_clause(updates),
                ::kiln::sql::placeholders(user_ids.len()),
            ],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.extend(user_ids.iter().map(::kiln::ToValue::to_value));
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()> {
        let query = "DELETE FROM `user_skills` WHERE `id` = ?";
        self.executor.exec(ctx, query, &[::kiln::ToValue::to_value(&id)])?;
        Ok(())
    }
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "DELETE FROM `user_skills` WHERE `id` IN (%s)",
            &[::kiln::sql::placeholders(ids.len())],
        );
        let args = ids
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn delete_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::Result<()> {
        let query = "DELETE FROM `user_skills` WHERE `user_id` = ? AND `skill_id` = ?";
        self.executor
            .exec(
                ctx,
                query,
                &[
                    ::kiln::ToValue::to_value(&user_id),
                    ::kiln::ToValue::to_value(&skill_id),
                ],
            )?;
        Ok(())
    }
    fn delete_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
    ) -> ::kiln::Result<()> {
        let query = "DELETE FROM `user_skills` WHERE `user_id` = ?";
        self.executor.exec(ctx, query, &[::kiln::ToValue::to_value(&user_id)])?;
        Ok(())
    }
    fn delete_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
    ) -> ::kiln::Result<()> {
        if user_ids.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "DELETE FROM `user_skills` WHERE `user_id` IN (%s)",
            &[::kiln::sql::placeholders(user_ids.len())],
        );
        let args = user_ids
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
}
