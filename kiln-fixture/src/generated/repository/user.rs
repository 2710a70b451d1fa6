//! Code generated by kiln. DO NOT EDIT.
//!
//! Repository of `user`.
#![allow(dead_code, unused_imports)]
use crate::generated::{dao, entity, model};
use super::Repository;
/// Model-level operations of `user`.
pub trait UserRepository: model::UserFinder {
    /// Insert `value`; a generated primary key is written back to it.
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::User,
    ) -> ::kiln::Result<()>;
    /// Store every column of `value`, matched by primary key.
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::User,
    ) -> ::kiln::Result<()>;
    /// Delete `value`, matched by primary key.
    fn delete(&self, ctx: &::kiln::Context, value: &model::User) -> ::kiln::Result<()>;
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64>;
    /// The row matching `id`, if any.
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<model::User>>;
    /// Rows whose `id` is any of the given values.
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<model::Users>;
    /// The row matching `name`, if any.
    fn find_by_name(
        &self,
        ctx: &::kiln::Context,
        name: &str,
    ) -> ::kiln::Result<Option<model::User>>;
    /// Rows whose `name` is any of the given values.
    fn find_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
    ) -> ::kiln::Result<model::Users>;
    /// Rows matching `nick`.
    fn find_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
    ) -> ::kiln::Result<model::Users>;
    /// Rows whose `nick` is any of the given values.
    fn find_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
    ) -> ::kiln::Result<model::Users>;
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
pub struct UserRepositoryImpl {
    dao: ::std::sync::Arc<dyn dao::UserDao>,
    root: ::std::sync::Weak<Repository>,
}
impl UserRepositoryImpl {
    pub fn new(
        dao: ::std::sync::Arc<dyn dao::UserDao>,
        root: ::std::sync::Weak<Repository>,
    ) -> Self {
        Self { dao, root }
    }
    /// A stored model bound to this repository.
    fn to_model(
        &self,
        value: entity::User,
        relations: &::std::sync::Arc<model::UsersRelations>,
    ) -> model::User {
        let mut model = model::User::new(value);
        model.dao = Some(self.dao.clone());
        model.state.mark_created();
        model.state.set_saved(&model.value);
        {
            let root = self.root.clone();
            let relations = relations.clone();
            let key = model.value.id.clone();
            let load: ::kiln::Loader<model::UserSkills> = ::std::sync::Arc::new(move |
                ctx: &::kiln::Context|
            {
                let repo = root
                    .upgrade()
                    .ok_or_else(|| ::kiln::Error::detached("user"))?;
                relations.find_user_skills(ctx, key, &repo.user_skill)
            });
            model.user_skills_loader = Some(load);
        }
        model
    }
    fn to_single(&self, value: entity::User) -> model::User {
        let relations = ::std::sync::Arc::new(
            model::UsersRelations::new(::std::slice::from_ref(&value)),
        );
        self.to_model(value, &relations)
    }
    /// Models sharing one relation memo, so each relation loads once for the whole collection.
    fn to_models(&self, values: entity::Users) -> model::Users {
        let relations = ::std::sync::Arc::new(model::UsersRelations::new(&values));
        values.into_iter().map(|v| self.to_model(v, &relations)).collect()
    }
}
impl model::UserFinder for UserRepositoryImpl {
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<model::Users> {
        let values = self.dao.find_all(ctx)?;
        Ok(self.to_models(values))
    }
}
impl UserRepository for UserRepositoryImpl {
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::User,
    ) -> ::kiln::Result<()> {
        value.dao = Some(self.dao.clone());
        value.create(ctx)
    }
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::User,
    ) -> ::kiln::Result<()> {
        value.dao = Some(self.dao.clone());
        value.update(ctx)
    }
    fn delete(&self, ctx: &::kiln::Context, value: &model::User) -> ::kiln::Result<()> {
        self.dao.delete(ctx, &value.value)
    }
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64> {
        self.dao.count(ctx)
    }
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<model::User>> {
        let value = self.dao.find_by_id(ctx, id)?;
        Ok(value.map(|v| self.to_single(v)))
    }
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<model::Users> {
        let values = self.dao.find_by_ids(ctx, ids)?;
        Ok(self.to_models(values))
    }
    fn find_by_name(
        &self,
        ctx: &::kiln::Context,
        name: &str,
    ) -> ::kiln::Result<Option<model::User>> {
        let value = self.dao.find_by_name(ctx, name)?;
        Ok(value.map(|v| self.to_single(v)))
    }
    fn find_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
    ) -> ::kiln::Result<model::Users> {
        let values = self.dao.find_by_names(ctx, names)?;
        Ok(self.to_models(values))
    }
    fn find_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
    ) -> ::kiln::Result<model::Users> {
        let values = self.dao.find_by_nick(ctx, nick)?;
        Ok(self.to_models(values))
    }
    fn find_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
    ) -> ::kiln::Result<model::Users> {
        let values = self.dao.find_by_nicks(ctx, nicks)?;
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
    fn update_by_name(
        &self,
        ctx: &::kiln::Context,
        name: &str,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.dao.update_by_name(ctx, name, updates)
    }
    fn update_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.dao.update_by_names(ctx, names, updates)
    }
    fn update_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.dao.update_by_nick(ctx, nick, updates)
    }
    fn update_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.dao.update_by_nicks(ctx, nicks, updates)
    }
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()> {
        self.dao.delete_by_id(ctx, id)
    }
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()> {
        self.dao.delete_by_ids(ctx, ids)
    }
    fn delete_by_name(&self, ctx: &::kiln::Context, name: &str) -> ::kiln::Result<()> {
        self.dao.delete_by_name(ctx, name)
    }
    fn delete_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
    ) -> ::kiln::Result<()> {
        self.dao.delete_by_names(ctx, names)
    }
    fn delete_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
    ) -> ::kiln::Result<()> {
        self.dao.delete_by_nick(ctx, nick)
    }
    fn delete_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
    ) -> ::kiln::Result<()> {
        self.dao.delete_by_nicks(ctx, nicks)
    }
}
