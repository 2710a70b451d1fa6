//! Code generated by kiln. DO NOT EDIT.
//!
//! Stored columns of `user`.
/// One row of `users`.
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
pub struct User {
    pub id: u64,
    pub name: String,
    pub nick: Option<String>,
    pub avatar: Vec<u8>,
    pub score: f64,
    pub created_at: ::kiln::chrono::DateTime<::kiln::chrono::Utc>,
    pub updated_at: ::kiln::chrono::DateTime<::kiln::chrono::Utc>,
}
pub type Users = Vec<User>;
impl ::kiln::sql::FromRow for User {
    fn from_row(row: &::kiln::sql::Row) -> ::kiln::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            nick: row.get("nick")?,
            avatar: row.get("avatar")?,
            score: row.get("score")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
impl User {
    /// Column values in declaration order, the arguments of an insert.
    pub fn to_values(&self) -> Vec<::kiln::Value> {
        vec![
            ::kiln::ToValue::to_value(& self.id), ::kiln::ToValue::to_value(& self.name),
            ::kiln::ToValue::to_value(& self.nick), ::kiln::Value::from_bytes(& self
            .avatar), ::kiln::ToValue::to_value(& self.score),
            ::kiln::ToValue::to_value(& self.created_at), ::kiln::ToValue::to_value(&
            self.updated_at)
        ]
    }
}
