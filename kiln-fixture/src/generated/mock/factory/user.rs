//! Code generated by kiln. DO NOT EDIT.
//!
//! Model factories of `user`.
#![allow(unused_imports, clippy::needless_update)]
use crate::generated::{entity, model};
pub fn alice() -> model::User {
    let mut value = model::User::new(entity::User {
        id: 1,
        name: "alice".to_string(),
        nick: Some("al".to_string()),
        avatar: b"{\"hue\":\"teal\"}".to_vec(),
        score: 9.5,
        created_at: ::kiln::chrono::DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .map(|t| t.with_timezone(&::kiln::chrono::Utc))
            .unwrap_or_default(),
        updated_at: ::kiln::chrono::DateTime::from_timestamp(1767323045, 0)
            .unwrap_or_default(),
        ..Default::default()
    });
    {
        let user_skills = super::user_skill::alice_skills();
        let load: ::kiln::Loader<model::UserSkills> = ::std::sync::Arc::new(move |
            _ctx: &::kiln::Context|
        { Ok(user_skills.clone()) });
        value.user_skills_loader = Some(load);
    }
    value
}
pub fn default_user() -> model::User {
    let mut value = model::User::new(entity::User {
        id: 0,
        name: "".to_string(),
        avatar: b"".to_vec(),
        score: 0.0,
        created_at: ::kiln::chrono::DateTime::from_timestamp(0, 0).unwrap_or_default(),
        updated_at: ::kiln::chrono::DateTime::from_timestamp(0, 0).unwrap_or_default(),
        ..Default::default()
    });
    value
}
pub fn default_users() -> model::Users {
    let mut values: model::Users = Default::default();
    {
        let mut value = model::User::new(entity::User {
            id: 0,
            name: "".to_string(),
            avatar: b"".to_vec(),
            score: 0.0,
            created_at: ::kiln::chrono::DateTime::from_timestamp(0, 0)
                .unwrap_or_default(),
            updated_at: ::kiln::chrono::DateTime::from_timestamp(0, 0)
                .unwrap_or_default(),
            ..Default::default()
        });
        values.add(value);
    }
    values
}
