//! Code generated by kiln. DO NOT EDIT.
//!
//! Stored columns of `user_skill`.
/// One row of `user_skills`.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    ::kiln::serde::Serialize,
    ::kiln::serde::Deserialize,
    ::kiln::MockValue
)]
#[serde(crate = "::kiln::serde")]
pub struct UserSkill {
    pub id: u64,
    pub user_id: u64,
    pub skill_id: u64,
}
pub type UserSkills = Vec<UserSkill>;
impl ::kiln::sql::FromRow for UserSkill {
    fn from_row(row: &::kiln::sql::Row) -> ::kiln::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            skill_id: row.get("skill_id")?,
        })
    }
}
impl UserSkill {
    /// Column values in declaration order, the arguments of an insert.
    pub fn to_values(&self) -> Vec<::kiln::Value> {
        vec![
            ::kiln::ToValue::to_value(& self.id), ::kiln::ToValue::to_value(& self
            .user_id), ::kiln::ToValue::to_value(& self.skill_id)
        ]
    }
    /// Whether this row belongs to `user_id`.
    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.user_id == user_id
    }
}
