//! Code generated by kiln. DO NOT EDIT.
//!
//! Model factories of `skill`.
#![allow(unused_imports, clippy::needless_update)]
use crate::generated::{entity, model};
pub fn default_skill() -> model::Skill {
    let mut value = model::Skill::new(entity::Skill {
        id: 0,
        name: "".to_string(),
        ..Default::default()
    });
    value
}
pub fn rust() -> model::Skill {
    let mut value = model::Skill::new(entity::Skill {
        id: 100,
        name: "rust".to_string(),
        ..Default::default()
    });
    value
}
pub fn sql() -> model::Skill {
    let mut value = model::Skill::new(entity::Skill {
        id: 101,
        name: "sql".to_string(),
        ..Default::default()
    });
    value
}
pub fn default_skills() -> model::Skills {
    let mut values: model::Skills = Default::default();
    {
        let mut value = model::Skill::new(entity::Skill {
            id: 0,
            name: "".to_string(),
            ..Default::default()
        });
        values.add(value);
    }
    values
}
