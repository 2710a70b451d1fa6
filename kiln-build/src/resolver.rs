//! Merging regenerated definitions into persisted ones and resolving cross-entity references.

use std::collections::BTreeMap;

use log::debug;

use crate::entity::{Class, Member, Name, TypeRef};
use crate::error::{Error, Result};

/// Reconcile a persisted definition (`old`) with one freshly derived from the schema (`new`).
///
/// Members keep `old`'s relative order, take their type and nullability from `new` and keep their
/// hand-written relation, render and description metadata. Members only in `new` follow. Extend
/// members only in `old` are kept at the end; other members missing from `new` are dropped. The
/// index block is always `new`'s.
pub fn merge(old: &Class, new: &Class) -> Class {
    let mut members = Vec::with_capacity(new.members.len());
    for old_member in &old.members {
        let Some(fresh) = new.member_by_name(old_member.name.as_str()) else {
            continue;
        };
        let mut member = old_member.clone();
        if fresh.ty.is_some() {
            member.ty = fresh.ty.clone();
        }
        member.nullable = fresh.nullable;
        if fresh.relation.is_some() {
            member.relation = fresh.relation.clone();
        }
        members.push(member);
    }
    for fresh in &new.members {
        if old.member_by_name(fresh.name.as_str()).is_none() {
            members.push(fresh.clone());
        }
    }
    for old_member in &old.members {
        if new.member_by_name(old_member.name.as_str()).is_none() && keeps_hand_written(old_member) {
            members.push(old_member.clone());
        }
    }
    Class {
        name: old.name.clone(),
        datastore: old.datastore.clone().or_else(|| new.datastore.clone()),
        read_only: old.read_only || new.read_only,
        before_render: old.before_render || new.before_render,
        index: new.index.clone(),
        members,
    }
}

/// Extend members and relations are authored by hand and never come from a table.
fn keeps_hand_written(member: &Member) -> bool {
    member.extend || member.relation.is_some()
}

/// Validate every class and point every relation at its target entity.
///
/// The output is sorted by snake name, so the result does not depend on input order.
pub fn resolve(classes: Vec<Class>) -> Result<Vec<Class>> {
    let mut by_name = BTreeMap::new();
    for class in classes {
        class.validate()?;
        let key = class.name.snake();
        if by_name.insert(key.clone(), class).is_some() {
            return Err(Error::definition(key, "defined more than once"));
        }
    }
    let known: BTreeMap<String, Class> = by_name.clone();
    for class in by_name.values_mut() {
        let entity = class.name.snake();
        for member in &mut class.members {
            resolve_member(&entity, member, &known)?;
        }
    }
    Ok(by_name.into_values().collect())
}

fn resolve_member(entity: &str, member: &mut Member, known: &BTreeMap<String, Class>) -> Result<()> {
    let target = match (&member.ty, &member.relation) {
        (Some(TypeRef::Class(name)), _) => name.clone(),
        (None, Some(relation)) => relation.to.clone(),
        _ => return Ok(()),
    };
    let reference_error = |target: &Name| Error::Reference {
        entity: entity.to_string(),
        member: member.name.snake(),
        target: target.snake(),
    };
    let Some(target_class) = known.get(&target.snake()) else {
        return Err(reference_error(&target));
    };
    if let Some(relation) = &member.relation
        && let Some((_, external)) = relation.join()
        && target_class.member_by_name(external.as_str()).is_none()
    {
        return Err(Error::definition(
            entity,
            format!("relation of '{}' joins on unknown '{}.{external}'", member.name, target.snake()),
        ));
    }
    debug!("resolved {entity}.{} -> {}", member.name.snake(), target_class.name.snake());
    member.ty = Some(TypeRef::Class(Name::new(target_class.name.snake())));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Relation;

    fn column(name: &str, ty: &str) -> Member {
        Member::new(name, TypeRef::parse(ty))
    }

    fn skill_relation() -> Member {
        Member::relation(
            "skill",
            Relation {
                to: Name::new("Skill"),
                internal: Some(Name::new("skill_id")),
                external: Some(Name::new("id")),
                ..Relation::default()
            },
        )
    }

    fn classes() -> Vec<Class> {
        let mut user = Class::new("user");
        user.members = vec![column("id", "u64"), column("skill_id", "u64"), skill_relation()];
        let mut skill = Class::new("skill");
        skill.members = vec![column("id", "u64"), column("name", "string")];
        vec![user, skill]
    }

    #[test]
    fn test_resolve_sets_relation_type() {
        let resolved = resolve(classes()).unwrap();
        let user = resolved.iter().find(|c| c.name.snake() == "user").unwrap();
        let skill = user.member_by_name("skill").unwrap();
        assert_eq!(skill.ty, Some(TypeRef::Class(Name::new("skill"))));
    }

    #[test]
    fn test_resolve_is_order_independent() {
        let forward = resolve(classes()).unwrap();
        let mut reversed = classes();
        reversed.reverse();
        assert_eq!(forward, resolve(reversed).unwrap());
        assert_eq!(forward, resolve(forward.clone()).unwrap());
    }

    #[test]
    fn test_unknown_target_is_reference_error() {
        let mut input = classes();
        input.retain(|c| c.name.snake() != "skill");
        let err = resolve(input).unwrap_err();
        assert!(matches!(err, Error::Reference { ref target, .. } if target == "skill"));
        assert!(err.is_definition_error());
    }

    #[test]
    fn test_unknown_external_member() {
        let mut input = classes();
        input[1].members.retain(|m| m.name.snake() != "id");
        assert!(resolve(input).is_err());
    }

    #[test]
    fn test_merge_keeps_extend_and_drops_removed() {
        let mut old = Class::new("user");
        let mut nick = column("nick", "string");
        nick.extend = true;
        let mut name = column("name", "string");
        name.desc = Some("display name".into());
        old.members = vec![column("id", "u64"), name, column("legacy", "string"), nick, skill_relation()];
        old.read_only = true;

        let mut new = Class::new("user");
        new.members = vec![column("id", "u64"), column("name", "string"), column("age", "u8")];
        new.index.primary_key = Some(Name::new("id"));
        new.members[1].nullable = true;

        let merged = merge(&old, &new);
        let names: Vec<_> = merged.members.iter().map(|m| m.name.snake()).collect();
        assert_eq!(names, vec!["id", "name", "age", "nick", "skill"]);
        let name = merged.member_by_name("name").unwrap();
        assert!(name.nullable);
        assert_eq!(name.desc.as_deref(), Some("display name"));
        assert_eq!(merged.index, new.index);
        assert!(merged.read_only);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut old = Class::new("user");
        let mut nick = column("nick", "string");
        nick.extend = true;
        old.members = vec![column("id", "u64"), nick];
        let mut new = Class::new("user");
        new.members = vec![column("id", "u64"), column("email", "string")];

        let once = merge(&old, &new);
        let twice = merge(&once, &new);
        assert_eq!(once, twice);
    }
}
