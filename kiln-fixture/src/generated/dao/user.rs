//! Code generated by kiln. DO NOT EDIT.
//!
//! Data access for `user`.
#![allow(dead_code, unused_mut, unused_variables)]
use crate::generated::entity;
/// Storage operations of `user`.
pub trait UserDao: Send + Sync {
    /// Insert `value`; a generated primary key is written back to it.
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::User,
    ) -> ::kiln::Result<()>;
    /// Store every column of `value`, matched by primary key.
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::User,
    ) -> ::kiln::Result<()>;
    /// Delete `value`, matched by primary key.
    fn delete(&self, ctx: &::kiln::Context, value: &entity::User) -> ::kiln::Result<()>;
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<entity::Users>;
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64>;
    /// The row matching `id`, if any.
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<entity::User>>;
    /// Rows whose `id` is any of the given values.
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<entity::Users>;
    /// The row matching `name`, if any.
    fn find_by_name(
        &self,
        ctx: &::kiln::Context,
        name: &str,
    ) -> ::kiln::Result<Option<entity::User>>;
    /// Rows whose `name` is any of the given values.
    fn find_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
    ) -> ::kiln::Result<entity::Users>;
    /// Rows matching `nick`.
    fn find_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
    ) -> ::kiln::Result<entity::Users>;
    /// Rows whose `nick` is any of the given values.
    fn find_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
    ) -> ::kiln::Result<entity::Users>;
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
    /// Apply `updates` to the rows matching `name`.
    fn update_by_name(
        &self,
        ctx: &::kiln::Context,
        name: &str,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()>;
    /// Apply `updates` to the rows matching `name`.
    fn update_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()>;
    /// Apply `updates` to the rows matching `nick`.
    fn update_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()>;
    /// Apply `updates` to the rows matching `nick`.
    fn update_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()>;
    /// Delete the rows matching `id`.
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()>;
    /// Delete the rows matching `id`.
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()>;
    /// Delete the rows matching `name`.
    fn delete_by_name(&self, ctx: &::kiln::Context, name: &str) -> ::kiln::Result<()>;
    /// Delete the rows matching `name`.
    fn delete_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
    ) -> ::kiln::Result<()>;
    /// Delete the rows matching `nick`.
    fn delete_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
    ) -> ::kiln::Result<()>;
    /// Delete the rows matching `nick`.
    fn delete_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
    ) -> ::kiln::Result<()>;
}
pub struct UserDaoImpl {
    executor: ::std::sync::Arc<dyn ::kiln::sql::Executor>,
}
/// Build the `user` data-access handle.
pub fn new_user_dao(
    executor: ::std::sync::Arc<dyn ::kiln::sql::Executor>,
) -> ::std::sync::Arc<dyn UserDao> {
    ::std::sync::Arc::new(UserDaoImpl { executor })
}
impl UserDao for UserDaoImpl {
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::User,
    ) -> ::kiln::Result<()> {
        let now = ctx.request_time()?;
        value.created_at = now;
        value.updated_at = now;
        let mut delayed = ::kiln::hook::Delayed::default();
        let result = (|| -> ::kiln::Result<()> {
            let query = "INSERT INTO `users` (`id`, `name`, `nick`, `avatar`, `score`, `created_at`, `updated_at`) VALUES (?, ?, ?, ?, ?, ?, ?)";
            let result = self.executor.exec(ctx, query, &value.to_values())?;
            value.id = result
                .last_insert_id
                .try_into()
                .map_err(::kiln::Error::conversion)?;
            Ok(())
        })();
        if result.is_ok() {
            delayed
                .check(ctx.audit("user", "create", &::kiln::ToValue::to_value(&*value)));
        }
        delayed.finish(result)
    }
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut entity::User,
    ) -> ::kiln::Result<()> {
        let now = ctx.request_time()?;
        value.updated_at = now;
        let mut delayed = ::kiln::hook::Delayed::default();
        let result = (|| -> ::kiln::Result<()> {
            let query = "UPDATE `users` SET `name` = ?, `nick` = ?, `avatar` = ?, `score` = ?, `created_at` = ?, `updated_at` = ? WHERE `id` = ?";
            self.executor
                .exec(
                    ctx,
                    query,
                    &[
                        ::kiln::ToValue::to_value(&value.name),
                        ::kiln::ToValue::to_value(&value.nick),
                        ::kiln::Value::from_bytes(&value.avatar),
                        ::kiln::ToValue::to_value(&value.score),
                        ::kiln::ToValue::to_value(&value.created_at),
                        ::kiln::ToValue::to_value(&value.updated_at),
                        ::kiln::ToValue::to_value(&value.id),
                    ],
                )?;
            Ok(())
        })();
        if result.is_ok() {
            delayed
                .check(ctx.audit("user", "update", &::kiln::ToValue::to_value(&*value)));
        }
        delayed.finish(result)
    }
    fn delete(&self, ctx: &::kiln::Context, value: &entity::User) -> ::kiln::Result<()> {
        let mut delayed = ::kiln::hook::Delayed::default();
        let result = (|| -> ::kiln::Result<()> {
            let query = "DELETE FROM `users` WHERE `id` = ?";
            self.executor.exec(ctx, query, &[::kiln::ToValue::to_value(&value.id)])?;
            Ok(())
        })();
        if result.is_ok() {
            delayed
                .check(ctx.audit("user", "delete", &::kiln::ToValue::to_value(&*value)));
        }
        delayed.finish(result)
    }
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<entity::Users> {
        let query = "SELECT `id`, `name`, `nick`, `avatar`, `score`, `created_at`, `updated_at` FROM `users`";
        ::kiln::sql::fetch_all(self.executor.as_ref(), ctx, query, &[])
    }
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64> {
        let query = "SELECT COUNT(*) FROM `users`";
        ::kiln::sql::fetch_count(self.executor.as_ref(), ctx, query, &[])
    }
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<entity::User>> {
        let query = "SELECT `id`, `name`, `nick`, `avatar`, `score`, `created_at`, `updated_at` FROM `users` WHERE `id` = ?";
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
    ) -> ::kiln::Result<entity::Users> {
        if ids.is_empty() {
            return Ok(::std::vec::Vec::new());
        }
        let query = ::kiln::sql::substitute(
            "SELECT `id`, `name`, `nick`, `avatar`, `score`, `created_at`, `updated_at` FROM `users` WHERE `id` IN (%s)",
            &[::kiln::sql::placeholders(ids.len())],
        );
        let args = ids
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        ::kiln::sql::fetch_all(self.executor.as_ref(), ctx, &query, &args)
    }
    fn find_by_name(
        &self,
        ctx: &::kiln::Context,
        name: &str,
    ) -> ::kiln::Result<Option<entity::User>> {
        let query = "SELECT `id`, `name`, `nick`, `avatar`, `score`, `created_at`, `updated_at` FROM `users` WHERE `name` = ?";
        ::kiln::sql::fetch_optional(
            self.executor.as_ref(),
            ctx,
            query,
            &[::kiln::ToValue::to_value(name)],
        )
    }
    fn find_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
    ) -> ::kiln::Result<entity::Users> {
        if names.is_empty() {
            return Ok(::std::vec::Vec::new());
        }
        let query = ::kiln::sql::substitute(
            "SELECT `id`, `name`, `nick`, `avatar`, `score`, `created_at`, `updated_at` FROM `users` WHERE `name` IN (%s)",
            &[::kiln::sql::placeholders(names.len())],
        );
        let args = names
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        ::kiln::sql::fetch_all(self.executor.as_ref(), ctx, &query, &args)
    }
    fn find_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
    ) -> ::kiln::Result<entity::Users> {
        let query = ::kiln::sql::substitute(
            "SELECT `id`, `name`, `nick`, `avatar`, `score`, `created_at`, `updated_at` FROM `users` WHERE %s",
            &[
                if nick.is_none() {
                    "`nick` IS NULL".to_string()
                } else {
                    "`nick` = ?".to_string()
                },
            ],
        );
        let mut args: Vec<::kiln::Value> = ::std::vec::Vec::new();
        if nick.is_some() {
            args.push(::kiln::ToValue::to_value(nick));
        }
        ::kiln::sql::fetch_all(self.executor.as_ref(), ctx, &query, &args)
    }
    fn find_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
    ) -> ::kiln::Result<entity::Users> {
        if nicks.is_empty() {
            return Ok(::std::vec::Vec::new());
        }
        let query = ::kiln::sql::substitute(
            "SELECT `id`, `name`, `nick`, `avatar`, `score`, `created_at`, `updated_at` FROM `users` WHERE `nick` IN (%s)",
            &[::kiln::sql::placeholders(nicks.len())],
        );
        let args = nicks
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
            "UPDATE `users` SET %s WHERE `id` = ?",
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
            "UPDATE `users` SET %s WHERE `id` IN (%s)",
            &[::kiln::sql::set_clause(updates), ::kiln::sql::placeholders(ids.len())],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.extend(ids.iter().map(::kiln::ToValue::to_value));
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn update_by_name(
        &self,
        ctx: &::kiln::Context,
        name: &str,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `users` SET %s WHERE `name` = ?",
            &[::kiln::sql::set_clause(updates)],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.push(::kiln::ToValue::to_value(name));
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn update_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        if names.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `users` SET %s WHERE `name` IN (%s)",
            &[::kiln::sql::set_clause(updates), ::kiln::sql::placeholders(names.len())],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.extend(names.iter().map(::kiln::ToValue::to_value));
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn update_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `users` SET %s WHERE %s",
            &[
                ::kiln::sql::set_clause(updates),
                if nick.is_none() {
                    "`nick` IS NULL".to_string()
                } else {
                    "`nick` = ?".to_string()
                },
            ],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        if nick.is_some() {
            args.push(::kiln::ToValue::to_value(nick));
        }
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn update_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        if nicks.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "UPDATE `users` SET %s WHERE `nick` IN (%s)",
            &[::kiln::sql::set_clause(updates), ::kiln::sql::placeholders(nicks.len())],
        );
        let mut args: Vec<::kiln::Value> = updates.values();
        args.extend(nicks.iter().map(::kiln::ToValue::to_value));
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()> {
        let query = "DELETE FROM `users` WHERE `id` = ?";
        self.executor.exec(ctx, query, &[::kiln::ToValue::to_value(&id)])?;
        Ok(())
    }
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "DELETE FROM `users` WHERE `id` IN (%s)",
            &[::kiln::sql::placeholders(ids.len())],
        );
        let args = ids
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn delete_by_name(&self, ctx: &::kiln::Context, name: &str) -> ::kiln::Result<()> {
        let query = "DELETE FROM `users` WHERE `name` = ?";
        self.executor.exec(ctx, query, &[::kiln::ToValue::to_value(name)])?;
        Ok(())
    }
    fn delete_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
    ) -> ::kiln::Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "DELETE FROM `users` WHERE `name` IN (%s)",
            &[::kiln::sql::placeholders(names.len())],
        );
        let args = names
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn delete_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
    ) -> ::kiln::Result<()> {
        let query = ::kiln::sql::substitute(
            "DELETE FROM `users` WHERE %s",
            &[
                if nick.is_none() {
                    "`nick` IS NULL".to_string()
                } else {
                    "`nick` = ?".to_string()
                },
            ],
        );
        let mut args: Vec<::kiln::Value> = ::std::vec::Vec::new();
        if nick.is_some() {
            args.push(::kiln::ToValue::to_value(nick));
        }
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
    fn delete_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
    ) -> ::kiln::Result<()> {
        if nicks.is_empty() {
            return Ok(());
        }
        let query = ::kiln::sql::substitute(
            "DELETE FROM `users` WHERE `nick` IN (%s)",
            &[::kiln::sql::placeholders(nicks.len())],
        );
        let args = nicks
            .iter()
            .map(::kiln::ToValue::to_value)
            .collect::<Vec<::kiln::Value>>();
        self.executor.exec(ctx, &query, &args)?;
        Ok(())
    }
}
