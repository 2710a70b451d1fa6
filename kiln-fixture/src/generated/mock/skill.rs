//! Code generated by kiln. DO NOT EDIT.
//!
//! Repository mock of `skill`.
#![allow(dead_code, unused_imports, unused_variables)]
use crate::generated::{model, repository};
/// Expectations of every `SkillRepository` method.
#[derive(Default)]
pub struct SkillRepositoryExpect {
    create: ::kiln::mock::MockMethod<()>,
    update: ::kiln::mock::MockMethod<()>,
    delete: ::kiln::mock::MockMethod<()>,
    find_all: ::kiln::mock::MockMethod<model::Skills>,
    count: ::kiln::mock::MockMethod<i64>,
    find_by_id: ::kiln::mock::MockMethod<Option<model::Skill>>,
    find_by_ids: ::kiln::mock::MockMethod<model::Skills>,
    update_by_id: ::kiln::mock::MockMethod<()>,
    update_by_ids: ::kiln::mock::MockMethod<()>,
    delete_by_id: ::kiln::mock::MockMethod<()>,
    delete_by_ids: ::kiln::mock::MockMethod<()>,
}
impl SkillRepositoryExpect {
    /// Expect one call of `create` with these arguments.
    pub fn create(&self, value: &model::Skill) -> ::kiln::mock::Expectation<()> {
        self.create.expect(vec![::kiln::ToValue::to_value(& value.value)]).returns(())
    }
    /// Expect one call of `update` with these arguments.
    pub fn update(&self, value: &model::Skill) -> ::kiln::mock::Expectation<()> {
        self.update.expect(vec![::kiln::ToValue::to_value(& value.value)]).returns(())
    }
    /// Expect one call of `delete` with these arguments.
    pub fn delete(&self, value: &model::Skill) -> ::kiln::mock::Expectation<()> {
        self.delete.expect(vec![::kiln::ToValue::to_value(& value.value)]).returns(())
    }
    /// Expect one call of `find_all` with these arguments.
    pub fn find_all(&self) -> ::kiln::mock::Expectation<model::Skills> {
        self.find_all.expect(vec![])
    }
    /// Expect one call of `count` with these arguments.
    pub fn count(&self) -> ::kiln::mock::Expectation<i64> {
        self.count.expect(vec![])
    }
    /// Expect one call of `find_by_id` with these arguments.
    pub fn find_by_id(
        &self,
        id: u64,
    ) -> ::kiln::mock::Expectation<Option<model::Skill>> {
        self.find_by_id.expect(vec![::kiln::ToValue::to_value(& id)])
    }
    /// Expect one call of `find_by_ids` with these arguments.
    pub fn find_by_ids(&self, ids: &[u64]) -> ::kiln::mock::Expectation<model::Skills> {
        self.find_by_ids.expect(vec![::kiln::ToValue::to_value(& ids)])
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
    /// Expect one call of `delete_by_id` with these arguments.
    pub fn delete_by_id(&self, id: u64) -> ::kiln::mock::Expectation<()> {
        self.delete_by_id.expect(vec![::kiln::ToValue::to_value(& id)]).returns(())
    }
    /// Expect one call of `delete_by_ids` with these arguments.
    pub fn delete_by_ids(&self, ids: &[u64]) -> ::kiln::mock::Expectation<()> {
        self.delete_by_ids.expect(vec![::kiln::ToValue::to_value(& ids)]).returns(())
    }
    /// Fail with the first expectation called fewer times than required.
    pub fn verify(&self) -> ::kiln::Result<()> {
        self.create.verify("SkillRepository::Create")?;
        self.update.verify("SkillRepository::Update")?;
        self.delete.verify("SkillRepository::Delete")?;
        self.find_all.verify("SkillRepository::FindAll")?;
        self.count.verify("SkillRepository::Count")?;
        self.find_by_id.verify("SkillRepository::FindByID")?;
        self.find_by_ids.verify("SkillRepository::FindByIDs")?;
        self.update_by_id.verify("SkillRepository::UpdateByID")?;
        self.update_by_ids.verify("SkillRepository::UpdateByIDs")?;
        self.delete_by_id.verify("SkillRepository::DeleteByID")?;
        self.delete_by_ids.verify("SkillRepository::DeleteByIDs")?;
        Ok(())
    }
}
/// Implements `SkillRepository` by matching each call against registered expectations.
#[derive(Default)]
pub struct SkillRepositoryMock {
    expect: SkillRepositoryExpect,
}
impl SkillRepositoryMock {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn expect(&self) -> &SkillRepositoryExpect {
        &self.expect
    }
    pub fn verify(&self) -> ::kiln::Result<()> {
        self.expect.verify()
    }
}
impl model::SkillFinder for SkillRepositoryMock {
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<model::Skills> {
        self.expect.find_all.call("SkillRepository::FindAll", vec![])
    }
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<model::Skills> {
        self.expect
            .find_by_ids
            .call("SkillRepository::FindByIDs", vec![::kiln::ToValue::to_value(& ids)])
    }
}
impl repository::SkillRepository for SkillRepositoryMock {
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::Skill,
    ) -> ::kiln::Result<()> {
        self.expect
            .create
            .call(
                "SkillRepository::Create",
                vec![::kiln::ToValue::to_value(& value.value)],
            )
    }
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::Skill,
    ) -> ::kiln::Result<()> {
        self.expect
            .update
            .call(
                "SkillRepository::Update",
                vec![::kiln::ToValue::to_value(& value.value)],
            )
    }
    fn delete(&self, ctx: &::kiln::Context, value: &model::Skill) -> ::kiln::Result<()> {
        self.expect
            .delete
            .call(
                "SkillRepository::Delete",
                vec![::kiln::ToValue::to_value(& value.value)],
            )
    }
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64> {
        self.expect.count.call("SkillRepository::Count", vec![])
    }
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<model::Skill>> {
        self.expect
            .find_by_id
            .call("SkillRepository::FindByID", vec![::kiln::ToValue::to_value(& id)])
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
                "SkillRepository::UpdateByID",
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
                "SkillRepository::UpdateByIDs",
                vec![
                    ::kiln::ToValue::to_value(& ids), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
    }
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()> {
        self.expect
            .delete_by_id
            .call("SkillRepository::DeleteByID", vec![::kiln::ToValue::to_value(& id)])
    }
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()> {
        self.expect
            .delete_by_ids
            .call("SkillRepository::DeleteByIDs", vec![::kiln::ToValue::to_value(& ids)])
    }
}
