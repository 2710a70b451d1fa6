//! Code generated by kiln. DO NOT EDIT.
//!
//! Repository mock of `user`.
#![allow(dead_code, unused_imports, unused_variables)]
use crate::generated::{model, repository};
/// Expectations of every `UserRepository` method.
#[derive(Default)]
pub struct UserRepositoryExpect {
    create: ::kiln::mock::MockMethod<()>,
    update: ::kiln::mock::MockMethod<()>,
    delete: ::kiln::mock::MockMethod<()>,
    find_all: ::kiln::mock::MockMethod<model::Users>,
    count: ::kiln::mock::MockMethod<i64>,
    find_by_id: ::kiln::mock::MockMethod<Option<model::User>>,
    find_by_ids: ::kiln::mock::MockMethod<model::Users>,
    find_by_name: ::kiln::mock::MockMethod<Option<model::User>>,
    find_by_names: ::kiln::mock::MockMethod<model::Users>,
    find_by_nick: ::kiln::mock::MockMethod<model::Users>,
    find_by_nicks: ::kiln::mock::MockMethod<model::Users>,
    update_by_id: ::kiln::mock::MockMethod<()>,
    update_by_ids: ::kiln::mock::MockMethod<()>,
    update_by_name: ::kiln::mock::MockMethod<()>,
    update_by_names: ::kiln::mock::MockMethod<()>,
    update_by_nick: ::kiln::mock::MockMethod<()>,
    update_by_nicks: ::kiln::mock::MockMethod<()>,
    delete_by_id: ::kiln::mock::MockMethod<()>,
    delete_by_ids: ::kiln::mock::MockMethod<()>,
    delete_by_name: ::kiln::mock::MockMethod<()>,
    delete_by_names: ::kiln::mock::MockMethod<()>,
    delete_by_nick: ::kiln::mock::MockMethod<()>,
    delete_by_nicks: ::kiln::mock::MockMethod<()>,
}
impl UserRepositoryExpect {
    /// Expect one call of `create` with these arguments.
    pub fn create(&self, value: &model::User) -> ::kiln::mock::Expectation<()> {
        self.create.expect(vec![::kiln::ToValue::to_value(& value.value)]).returns(())
    }
    /// Expect one call of `update` with these arguments.
    pub fn update(&self, value: &model::User) -> ::kiln::mock::Expectation<()> {
        self.update.expect(vec![::kiln::ToValue::to_value(& value.value)]).returns(())
    }
    /// Expect one call of `delete` with these arguments.
    pub fn delete(&self, value: &model::User) -> ::kiln::mock::Expectation<()> {
        self.delete.expect(vec![::kiln::ToValue::to_value(& value.value)]).returns(())
    }
    /// Expect one call of `find_all` with these arguments.
    pub fn find_all(&self) -> ::kiln::mock::Expectation<model::Users> {
        self.find_all.expect(vec![])
    }
    /// Expect one call of `count` with these arguments.
    pub fn count(&self) -> ::kiln::mock::Expectation<i64> {
        self.count.expect(vec![])
    }
    /// Expect one call of `find_by_id` with these arguments.
    pub fn find_by_id(&self, id: u64) -> ::kiln::mock::Expectation<Option<model::User>> {
        self.find_by_id.expect(vec![::kiln::ToValue::to_value(& id)])
    }
    /// Expect one call of `find_by_ids` with these arguments.
    pub fn find_by_ids(&self, ids: &[u64]) -> ::kiln::mock::Expectation<model::Users> {
        self.find_by_ids.expect(vec![::kiln::ToValue::to_value(& ids)])
    }
    /// Expect one call of `find_by_name` with these arguments.
    pub fn find_by_name(
        &self,
        name: &str,
    ) -> ::kiln::mock::Expectation<Option<model::User>> {
        self.find_by_name.expect(vec![::kiln::ToValue::to_value(& name)])
    }
    /// Expect one call of `find_by_names` with these arguments.
    pub fn find_by_names(
        &self,
        names: &[String],
    ) -> ::kiln::mock::Expectation<model::Users> {
        self.find_by_names.expect(vec![::kiln::ToValue::to_value(& names)])
    }
    /// Expect one call of `find_by_nick` with these arguments.
    pub fn find_by_nick(
        &self,
        nick: &Option<String>,
    ) -> ::kiln::mock::Expectation<model::Users> {
        self.find_by_nick.expect(vec![::kiln::ToValue::to_value(& nick)])
    }
    /// Expect one call of `find_by_nicks` with these arguments.
    pub fn find_by_nicks(
        &self,
        nicks: &[String],
    ) -> ::kiln::mock::Expectation<model::Users> {
        self.find_by_nicks.expect(vec![::kiln::ToValue::to_value(& nicks)])
    }
    /// Expect one call of `update_by_id` with these arguments.
    pub fn update_by_id(
        &self,
        id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::mock::Expectation<()> {
        self.update_by_id
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& id), ::kiln::ToValue::to_value(& updates)
                ],
            )
            .returns(())
    }
    /// Expect one call of `update_by_ids` with these arguments.
    pub fn update_by_ids(
        &self,
        ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::mock::Expectation<()> {
        self.update_by_ids
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& ids), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
            .returns(())
    }
    /// Expect one call of `update_by_name` with these arguments.
    pub fn update_by_name(
        &self,
        name: &str,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::mock::Expectation<()> {
        self.update_by_name
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& name), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
            .returns(())
    }
    /// Expect one call of `update_by_names` with these arguments.
    pub fn update_by_names(
        &self,
        names: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::mock::Expectation<()> {
        self.update_by_names
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& names), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
            .returns(())
    }
    /// Expect one call of `update_by_nick` with these arguments.
    pub fn update_by_nick(
        &self,
        nick: &Option<String>,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::mock::Expectation<()> {
        self.update_by_nick
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& nick), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
            .returns(())
    }
    /// Expect one call of `update_by_nicks` with these arguments.
    pub fn update_by_nicks(
        &self,
        nicks: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::mock::Expectation<()> {
        self.update_by_nicks
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& nicks), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
            .returns(())
    }
    /// Expect one call of `delete_by_id` with these arguments.
    pub fn delete_by_id(&self, id: u64) -> ::kiln::mock::Expectation<()> {
        self.delete_by_id.expect(vec![::kiln::ToValue::to_value(& id)]).returns(())
    }
    /// Expect one call of `delete_by_ids` with these arguments.
    pub fn delete_by_ids(&self, ids: &[u64]) -> ::kiln::mock::Expectation<()> {
        self.delete_by_ids.expect(vec![::kiln::ToValue::to_value(& ids)]).returns(())
    }
    /// Expect one call of `delete_by_name` with these arguments.
    pub fn delete_by_name(&self, name: &str) -> ::kiln::mock::Expectation<()> {
        self.delete_by_name.expect(vec![::kiln::ToValue::to_value(& name)]).returns(())
    }
    /// Expect one call of `delete_by_names` with these arguments.
    pub fn delete_by_names(&self, names: &[String]) -> ::kiln::mock::Expectation<()> {
        self.delete_by_names.expect(vec![::kiln::ToValue::to_value(& names)]).returns(())
    }
    /// Expect one call of `delete_by_nick` with these arguments.
    pub fn delete_by_nick(
        &self,
        nick: &Option<String>,
    ) -> ::kiln::mock::Expectation<()> {
        self.delete_by_nick.expect(vec![::kiln::ToValue::to_value(& nick)]).returns(())
    }
    /// Expect one call of `delete_by_nicks` with these arguments.
    pub fn delete_by_nicks(&self, nicks: &[String]) -> ::kiln::mock::Expectation<()> {
        self.delete_by_nicks.expect(vec![::kiln::ToValue::to_value(& nicks)]).returns(())
    }
    /// Fail with the first expectation called fewer times than required.
    pub fn verify(&self) -> ::kiln::Result<()> {
        self.create.verify("UserRepository::Create")?;
        self.update.verify("UserRepository::Update")?;
        self.delete.verify("UserRepository::Delete")?;
        self.find_all.verify("UserRepository::FindAll")?;
        self.count.verify("UserRepository::Count")?;
        self.find_by_id.verify("UserRepository::FindByID")?;
        self.find_by_ids.verify("UserRepository::FindByIDs")?;
        self.find_by_name.verify("UserRepository::FindByName")?;
        self.find_by_names.verify("UserRepository::FindByNames")?;
        self.find_by_nick.verify("UserRepository::FindByNick")?;
        self.find_by_nicks.verify("UserRepository::FindByNicks")?;
        self.update_by_id.verify("UserRepository::UpdateByID")?;
        self.update_by_ids.verify("UserRepository::UpdateByIDs")?;
        self.update_by_name.verify("UserRepository::UpdateByName")?;
        self.update_by_names.verify("UserRepository::UpdateByNames")?;
        self.update_by_nick.verify("UserRepository::UpdateByNick")?;
        self.update_by_nicks.verify("UserRepository::UpdateByNicks")?;
        self.delete_by_id.verify("UserRepository::DeleteByID")?;
        self.delete_by_ids.verify("UserRepository::DeleteByIDs")?;
        self.delete_by_name.verify("UserRepository::DeleteByName")?;
        self.delete_by_names.verify("UserRepository::DeleteByNames")?;
        self.delete_by_nick.verify("UserRepository::DeleteByNick")?;
        self.delete_by_nicks.verify("UserRepository::DeleteByNicks")?;
        Ok(())
    }
}
/// Implements `UserRepository` by matching each call against registered expectations.
#[derive(Default)]
pub struct UserRepositoryMock {
    expect: UserRepositoryExpect,
}
impl UserRepositoryMock {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn expect(&self) -> &UserRepositoryExpect {
        &self.expect
    }
    pub fn verify(&self) -> ::kiln::Result<()> {
        self.expect.verify()
    }
}
impl model::UserFinder for UserRepositoryMock {
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<model::Users> {
        self.expect.find_all.call("UserRepository::FindAll", vec![])
    }
}
impl repository::UserRepository for UserRepositoryMock {
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::User,
    ) -> ::kiln::Result<()> {
        self.expect
            .create
            .call(
                "UserRepository::Create",
                vec![::kiln::ToValue::to_value(& value.value)],
            )
    }
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::User,
    ) -> ::kiln::Result<()> {
        self.expect
            .update
            .call(
                "UserRepository::Update",
                vec![::kiln::ToValue::to_value(& value.value)],
            )
    }
    fn delete(&self, ctx: &::kiln::Context, value: &model::User) -> ::kiln::Result<()> {
        self.expect
            .delete
            .call(
                "UserRepository::Delete",
                vec![::kiln::ToValue::to_value(& value.value)],
            )
    }
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64> {
        self.expect.count.call("UserRepository::Count", vec![])
    }
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<model::User>> {
        self.expect
            .find_by_id
            .call("UserRepository::FindByID", vec![::kiln::ToValue::to_value(& id)])
    }
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<model::Users> {
        self.expect
            .find_by_ids
            .call("UserRepository::FindByIDs", vec![::kiln::ToValue::to_value(& ids)])
    }
    fn find_by_name(
        &self,
        ctx: &::kiln::Context,
        name: &str,
    ) -> ::kiln::Result<Option<model::User>> {
        self.expect
            .find_by_name
            .call("UserRepository::FindByName", vec![::kiln::ToValue::to_value(& name)])
    }
    fn find_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
    ) -> ::kiln::Result<model::Users> {
        self.expect
            .find_by_names
            .call(
                "UserRepository::FindByNames",
                vec![::kiln::ToValue::to_value(& names)],
            )
    }
    fn find_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
    ) -> ::kiln::Result<model::Users> {
        self.expect
            .find_by_nick
            .call("UserRepository::FindByNick", vec![::kiln::ToValue::to_value(& nick)])
    }
    fn find_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
    ) -> ::kiln::Result<model::Users> {
        self.expect
            .find_by_nicks
            .call(
                "UserRepository::FindByNicks",
                vec![::kiln::ToValue::to_value(& nicks)],
            )
    }
    fn update_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.expect
            .update_by_id
            .call(
                "UserRepository::UpdateByID",
                vec![
                    ::kiln::ToValue::to_value(& id), ::kiln::ToValue::to_value(& updates)
                ],
            )
    }
    fn update_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.expect
            .update_by_ids
            .call(
                "UserRepository::UpdateByIDs",
                vec![
                    ::kiln::ToValue::to_value(& ids), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
    }
    fn update_by_name(
        &self,
        ctx: &::kiln::Context,
        name: &str,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.expect
            .update_by_name
            .call(
                "UserRepository::UpdateByName",
                vec![
                    ::kiln::ToValue::to_value(& name), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
    }
    fn update_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.expect
            .update_by_names
            .call(
                "UserRepository::UpdateByNames",
                vec![
                    ::kiln::ToValue::to_value(& names), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
    }
    fn update_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.expect
            .update_by_nick
            .call(
                "UserRepository::UpdateByNick",
                vec![
                    ::kiln::ToValue::to_value(& nick), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
    }
    fn update_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.expect
            .update_by_nicks
            .call(
                "UserRepository::UpdateByNicks",
                vec![
                    ::kiln::ToValue::to_value(& nicks), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
    }
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()> {
        self.expect
            .delete_by_id
            .call("UserRepository::DeleteByID", vec![::kiln::ToValue::to_value(& id)])
    }
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()> {
        self.expect
            .delete_by_ids
            .call("UserRepository::DeleteByIDs", vec![::kiln::ToValue::to_value(& ids)])
    }
    fn delete_by_name(&self, ctx: &::kiln::Context, name: &str) -> ::kiln::Result<()> {
        self.expect
            .delete_by_name
            .call(
                "UserRepository::DeleteByName",
                vec![::kiln::ToValue::to_value(& name)],
            )
    }
    fn delete_by_names(
        &self,
        ctx: &::kiln::Context,
        names: &[String],
    ) -> ::kiln::Result<()> {
        self.expect
            .delete_by_names
            .call(
                "UserRepository::DeleteByNames",
                vec![::kiln::ToValue::to_value(& names)],
            )
    }
    fn delete_by_nick(
        &self,
        ctx: &::kiln::Context,
        nick: &Option<String>,
    ) -> ::kiln::Result<()> {
        self.expect
            .delete_by_nick
            .call(
                "UserRepository::DeleteByNick",
                vec![::kiln::ToValue::to_value(& nick)],
            )
    }
    fn delete_by_nicks(
        &self,
        ctx: &::kiln::Context,
        nicks: &[String],
    ) -> ::kiln::Result<()> {
        self.expect
            .delete_by_nicks
            .call(
                "UserRepository::DeleteByNicks",
                vec![::kiln::ToValue::to_value(& nicks)],
            )
    }
}
