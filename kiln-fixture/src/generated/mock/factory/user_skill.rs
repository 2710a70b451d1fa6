//! Code generated by kiln. DO NOT EDIT.
//!
//! Model factories of `user_skill`.
#![allow(unused_imports, clippy::needless_update)]
use crate::generated::{entity, model};
pub fn default_user_skill() -> model::UserSkill {
    let mut value = model::UserSkill::new(entity::UserSkill {
        id: 0,
        user_id: 0,
        skill_id: 0,
        ..Default::default()
    });
    value
}
pub fn alice_skills() -> model::UserSkills {
    let mut values: model::UserSkills = Default::default();
    {
        let mut value = model::UserSkill::new(entity::UserSkill {
            id: 10,
            user_id: 1,
            skill_id: 100,
            ..Default::default()
        });
        {
            let skill = super::skill::rust();
            let load: ::kiln::Loader<Option<model::Skill>> = ::std::sync::Arc::new(move |
                _ctx: &::kiln::Context|
            { Ok(Some(skill.clone())) });
            value.skill_loader = Some(load);
        }
        values.add(value);
    }
    {
        let mut value = model::UserSkill::new(entity::UserSkill {
            id: 11,
            user_id: 1,
            skill_id: 101,
            ..Default::default()
        });
        {
            let skill = super::skill::sql();
            let load: ::kiln::Loader<Option<model::Skill>> = ::std::sync::Arc::new(move |
                _ctx: &::kiln::Context|
            { Ok(Some(skill.clone())) });
            value.skill_loader = Some(load);
        }
        values.add(value);
    }
    values
}
pub fn default_user_skills() -> model::UserSkills {
    let mut values: model::UserSkills = Default::default();
    {
        let mut value = model::UserSkill::new(entity::UserSkill {
            id: 0,
            user_id: 0,
            skill_id: 0,
            ..Default::default()
        });
        values.add(value);
    }
    values
}
