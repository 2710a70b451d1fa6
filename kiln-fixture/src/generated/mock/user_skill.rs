//! Code generated by kiln. DO NOT EDIT.
//!
//! Repository mock of `user_skill`.
#![allow(dead_code, unused_imports, unused_variables)]
use crate::generated::{model, repository};
/// Expectations of every `UserSkillRepository` method.
#[derive(Default)]
pub struct UserSkillRepositoryExpect {
    create: ::kiln::mock::MockMethod<()>,
    update: ::kiln::mock::MockMethod<()>,
    delete: ::kiln::mock::MockMethod<()>,
    find_all: ::kiln::mock::MockMethod<model::UserSkills>,
    count: ::kiln::mock::MockMethod<i64>,
    find_by_id: ::kiln::mock::MockMethod<Option<model::UserSkill>>,
    find_by_ids: ::kiln::mock::MockMethod<model::UserSkills>,
    find_by_user_id_and_skill_id: ::kiln::mock::MockMethod<Option<model::UserSkill>>,
    find_by_user_id: ::kiln::mock::MockMethod<model::UserSkills>,
    find_by_user_ids: ::kiln::mock::MockMethod<model::UserSkills>,
    update_by_id: ::kiln::mock::MockMethod<()>,
    update_by_ids: ::kiln::mock::MockMethod<()>,
    update_by_user_id_and_skill_id: ::kiln::mock::MockMethod<()>,
    update_by_user_id: ::kiln::mock::MockMethod<()>,
    update_by_user_ids: ::kiln::mock::MockMethod<()>,
    delete_by_id: ::kiln::mock::MockMethod<()>,
    delete_by_ids: ::kiln::mock::MockMethod<()>,
    delete_by_user_id_and_skill_id: ::kiln::mock::MockMethod<()>,
    delete_by_user_id: ::kiln::mock::MockMethod<()>,
    delete_by_user_ids: ::kiln::mock::MockMethod<()>,
}
impl UserSkillRepositoryExpect {
    /// Expect one call of `create` with these arguments.
    pub fn create(&self, value: &model::UserSkill) -> ::kiln::mock::Expectation<()> {
        self.create.expect(vec![::kiln::ToValue::to_value(& value.value)]).returns(())
    }
    /// Expect one call of `update` with these arguments.
    pub fn update(&self, value: &model::UserSkill) -> ::kiln::mock::Expectation<()> {
        self.update.expect(vec![::kiln::ToValue::to_value(& value.value)]).returns(())
    }
    /// Expect one call of `delete` with these arguments.
    pub fn delete(&self, value: &model::UserSkill) -> ::kiln::mock::Expectation<()> {
        self.delete.expect(vec![::kiln::ToValue::to_value(& value.value)]).returns(())
    }
    /// Expect one call of `find_all` with these arguments.
    pub fn find_all(&self) -> ::kiln::mock::Expectation<model::UserSkills> {
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
    ) -> ::kiln::mock::Expectation<Option<model::UserSkill>> {
        self.find_by_id.expect(vec![::kiln::ToValue::to_value(& id)])
    }
    /// Expect one call of `find_by_ids` with these arguments.
    pub fn find_by_ids(
        &self,
        ids: &[u64],
    ) -> ::kiln::mock::Expectation<model::UserSkills> {
        self.find_by_ids.expect(vec![::kiln::ToValue::to_value(& ids)])
    }
    /// Expect one call of `find_by_user_id_and_skill_id` with these arguments.
    pub fn find_by_user_id_and_skill_id(
        &self,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::mock::Expectation<Option<model::UserSkill>> {
        self.find_by_user_id_and_skill_id
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& user_id), ::kiln::ToValue::to_value(&
                    skill_id)
                ],
            )
    }
    /// Expect one call of `find_by_user_id` with these arguments.
    pub fn find_by_user_id(
        &self,
        user_id: u64,
    ) -> ::kiln::mock::Expectation<model::UserSkills> {
        self.find_by_user_id.expect(vec![::kiln::ToValue::to_value(& user_id)])
    }
    /// Expect one call of `find_by_user_ids` with these arguments.
    pub fn find_by_user_ids(
        &self,
        user_ids: &[u64],
    ) -> ::kiln::mock::Expectation<model::UserSkills> {
        self.find_by_user_ids.expect(vec![::kiln::ToValue::to_value(& user_ids)])
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
    /// Expect one call of `update_by_user_id_and_skill_id` with these arguments.
    pub fn update_by_user_id_and_skill_id(
        &self,
        user_id: u64,
        skill_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::mock::Expectation<()> {
        self.update_by_user_id_and_skill_id
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& user_id), ::kiln::ToValue::to_value(&
                    skill_id), ::kiln::ToValue::to_value(& updates)
                ],
            )
            .returns(())
    }
    /// Expect one call of `update_by_user_id` with these arguments.
    pub fn update_by_user_id(
        &self,
        user_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::mock::Expectation<()> {
        self.update_by_user_id
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& user_id), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
            .returns(())
    }
    /// Expect one call of `update_by_user_ids` with these arguments.
    pub fn update_by_user_ids(
        &self,
        user_ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::mock::Expectation<()> {
        self.update_by_user_ids
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& user_ids), ::kiln::ToValue::to_value(&
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
    /// Expect one call of `delete_by_user_id_and_skill_id` with these arguments.
    pub fn delete_by_user_id_and_skill_id(
        &self,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::mock::Expectation<()> {
        self.delete_by_user_id_and_skill_id
            .expect(
                vec![
                    ::kiln::ToValue::to_value(& user_id), ::kiln::ToValue::to_value(&
                    skill_id)
                ],
            )
            .returns(())
    }
    /// Expect one call of `delete_by_user_id` with these arguments.
    pub fn delete_by_user_id(&self, user_id: u64) -> ::kiln::mock::Expectation<()> {
        self.delete_by_user_id
            .expect(vec![::kiln::ToValue::to_value(& user_id)])
            .returns(())
    }
    /// Expect one call of `delete_by_user_ids` with these arguments.
    pub fn delete_by_user_ids(&self, user_ids: &[u64]) -> ::kiln::mock::Expectation<()> {
        self.delete_by_user_ids
            .expect(vec![::kiln::ToValue::to_value(& user_ids)])
            .returns(())
    }
    /// Fail with the first expectation called fewer times than required.
    pub fn verify(&self) -> ::kiln::Result<()> {
        self.create.verify("UserSkillRepository::Create")?;
        self.update.verify("UserSkillRepository::Update")?;
        self.delete.verify("UserSkillRepository::Delete")?;
        self.find_all.verify("UserSkillRepository::FindAll")?;
        self.count.verify("UserSkillRepository::Count")?;
        self.find_by_id.verify("UserSkillRepository::FindByID")?;
        self.find_by_ids.verify("UserSkillRepository::FindByIDs")?;
        self.find_by_user_id_and_skill_id
            .verify("UserSkillRepository::FindByUserIDAndSkillID")?;
        self.find_by_user_id.verify("UserSkillRepository::FindByUserID")?;
        self.find_by_user_ids.verify("UserSkillRepository::FindByUserIDs")?;
        self.update_by_id.verify("UserSkillRepository::UpdateByID")?;
        self.update_by_ids.verify("UserSkillRepository::UpdateByIDs")?;
        self.update_by_user_id_and_skill_id
            .verify("UserSkillRepository::UpdateByUserIDAndSkillID")?;
        self.update_by_user_id.verify("UserSkillRepository::UpdateByUserID")?;
        self.update_by_user_ids.verify("UserSkillRepository::UpdateByUserIDs")?;
        self.delete_by_id.verify("UserSkillRepository::DeleteByID")?;
        self.delete_by_ids.verify("UserSkillRepository::DeleteByIDs")?;
        self.delete_by_user_id_and_skill_id
            .verify("UserSkillRepository::DeleteByUserIDAndSkillID")?;
        self.delete_by_user_id.verify("UserSkillRepository::DeleteByUserID")?;
        self.delete_by_user_ids.verify("UserSkillRepository::DeleteByUserIDs")?;
        Ok(())
    }
}
/// Implements `UserSkillRepository` by matching each call against registered expectations.
#[derive(Default)]
pub struct UserSkillRepositoryMock {
    expect: UserSkillRepositoryExpect,
}
impl UserSkillRepositoryMock {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn expect(&self) -> &UserSkillRepositoryExpect {
        &self.expect
    }
    pub fn verify(&self) -> ::kiln::Result<()> {
        self.expect.verify()
    }
}
impl model::UserSkillFinder for UserSkillRepositoryMock {
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<model::UserSkills> {
        self.expect.find_all.call("UserSkillRepository::FindAll", vec![])
    }
    fn find_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
    ) -> ::kiln::Result<model::UserSkills> {
        self.expect
            .find_by_user_ids
            .call(
                "UserSkillRepository::FindByUserIDs",
                vec![::kiln::ToValue::to_value(& user_ids)],
            )
    }
}
impl repository::UserSkillRepository for UserSkillRepositoryMock {
    fn create(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::UserSkill,
    ) -> ::kiln::Result<()> {
        self.expect
            .create
            .call(
                "UserSkillRepository::Create",
                vec![::kiln::ToValue::to_value(& value.value)],
            )
    }
    fn update(
        &self,
        ctx: &::kiln::Context,
        value: &mut model::UserSkill,
    ) -> ::kiln::Result<()> {
        self.expect
            .update
            .call(
                "UserSkillRepository::Update",
                vec![::kiln::ToValue::to_value(& value.value)],
            )
    }
    fn delete(
        &self,
        ctx: &::kiln::Context,
        value: &model::UserSkill,
    ) -> ::kiln::Result<()> {
        self.expect
            .delete
            .call(
                "UserSkillRepository::Delete",
                vec![::kiln::ToValue::to_value(& value.value)],
            )
    }
    fn count(&self, ctx: &::kiln::Context) -> ::kiln::Result<i64> {
        self.expect.count.call("UserSkillRepository::Count", vec![])
    }
    fn find_by_id(
        &self,
        ctx: &::kiln::Context,
        id: u64,
    ) -> ::kiln::Result<Option<model::UserSkill>> {
        self.expect
            .find_by_id
            .call("UserSkillRepository::FindByID", vec![::kiln::ToValue::to_value(& id)])
    }
    fn find_by_ids(
        &self,
        ctx: &::kiln::Context,
        ids: &[u64],
    ) -> ::kiln::Result<model::UserSkills> {
        self.expect
            .find_by_ids
            .call(
                "UserSkillRepository::FindByIDs",
                vec![::kiln::ToValue::to_value(& ids)],
            )
    }
    fn find_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::Result<Option<model::UserSkill>> {
        self.expect
            .find_by_user_id_and_skill_id
            .call(
                "UserSkillRepository::FindByUserIDAndSkillID",
                vec![
                    ::kiln::ToValue::to_value(& user_id), ::kiln::ToValue::to_value(&
                    skill_id)
                ],
            )
    }
    fn find_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
    ) -> ::kiln::Result<model::UserSkills> {
        self.expect
            .find_by_user_id
            .call(
                "UserSkillRepository::FindByUserID",
                vec![::kiln::ToValue::to_value(& user_id)],
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
                "UserSkillRepository::UpdateByID",
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
                "UserSkillRepository::UpdateByIDs",
                vec![
                    ::kiln::ToValue::to_value(& ids), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
    }
    fn update_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.expect
            .update_by_user_id_and_skill_id
            .call(
                "UserSkillRepository::UpdateByUserIDAndSkillID",
                vec![
                    ::kiln::ToValue::to_value(& user_id), ::kiln::ToValue::to_value(&
                    skill_id), ::kiln::ToValue::to_value(& updates)
                ],
            )
    }
    fn update_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.expect
            .update_by_user_id
            .call(
                "UserSkillRepository::UpdateByUserID",
                vec![
                    ::kiln::ToValue::to_value(& user_id), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
    }
    fn update_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
        updates: &::kiln::sql::Updates,
    ) -> ::kiln::Result<()> {
        self.expect
            .update_by_user_ids
            .call(
                "UserSkillRepository::UpdateByUserIDs",
                vec![
                    ::kiln::ToValue::to_value(& user_ids), ::kiln::ToValue::to_value(&
                    updates)
                ],
            )
    }
    fn delete_by_id(&self, ctx: &::kiln::Context, id: u64) -> ::kiln::Result<()> {
        self.expect
            .delete_by_id
            .call(
                "UserSkillRepository::DeleteByID",
                vec![::kiln::ToValue::to_value(& id)],
            )
    }
    fn delete_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<()> {
        self.expect
            .delete_by_ids
            .call(
                "UserSkillRepository::DeleteByIDs",
                vec![::kiln::ToValue::to_value(& ids)],
            )
    }
    fn delete_by_user_id_and_skill_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
        skill_id: u64,
    ) -> ::kiln::Result<()> {
        self.expect
            .delete_by_user_id_and_skill_id
            .call(
                "UserSkillRepository::DeleteByUserIDAndSkillID",
                vec![
                    ::kiln::ToValue::to_value(& user_id), ::kiln::ToValue::to_value(&
                    skill_id)
                ],
            )
    }
    fn delete_by_user_id(
        &self,
        ctx: &::kiln::Context,
        user_id: u64,
    ) -> ::kiln::Result<()> {
        self.expect
            .delete_by_user_id
            .call(
                "UserSkillRepository::DeleteByUserID",
                vec![::kiln::ToValue::to_value(& user_id)],
            )
    }
    fn delete_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
    ) -> ::kiln::Result<()> {
        self.expect
            .delete_by_user_ids
            .call(
                "UserSkillRepository::DeleteByUserIDs",
                vec![::kiln::ToValue::to_value(& user_ids)],
            )
    }
}
