//! Code generated by kiln. DO NOT EDIT.
//!
//! Stored columns of `skill`.
/// One row of `skills`.
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
pub struct Skill {
    pub id: u64,
    pub name: String,
}
pub type Skills = Vec<Skill>;
impl ::kiln::sql::FromRow for Skill {
    fn from_row(row: &::kiln::sql::Row) -> ::kiln::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}
impl Skill {
    /// Column values in declaration order, the arguments of an insert.
    pub fn to_values(&self) -> Vec<::kiln::Value> {
        vec![
            ::kiln::ToValue::to_value(& self.id), ::kiln::ToValue::to_value(& self.name)
        ]
    }
    /// Table whose cached reads a write to this entity drops.
    pub fn cache_table() -> &'static str {
        "skills"
    }
}
