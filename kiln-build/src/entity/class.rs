use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Member, Name};
use crate::error::{Error, Result};

/// Key constraints of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Name>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_keys: Vec<Vec<Name>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<Vec<Name>>,
}

/// Which index block a key group came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Primary,
    Unique,
    Plain,
}

/// An ordered group of members forming one key.
#[derive(Debug, Clone)]
pub struct KeyGroup<'a> {
    pub kind: KeyKind,
    pub members: Vec<&'a Member>,
}

/// An entity definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub name: Name,
    /// Storage backend identifier; the configured default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datastore: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    /// A hand-written `BeforeRender` impl exists for the model.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub before_render: bool,
    #[serde(default)]
    pub index: Index,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Class {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            datastore: None,
            read_only: false,
            before_render: false,
            index: Index::default(),
            members: Vec::new(),
        }
    }

    pub fn member_by_name(&self, name: &str) -> Option<&Member> {
        let wanted = Name::new(name).snake();
        self.members.iter().find(|m| m.name.snake() == wanted)
    }

    /// Members stored in table columns, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_column())
    }

    pub fn relation_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.relation.is_some())
    }

    /// Members carried only by the model: extend fields and nested entity values.
    pub fn model_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| !m.is_column() && m.relation.is_none())
    }

    pub fn primary_key(&self) -> Option<&Member> {
        let name = self.index.primary_key.as_ref()?;
        self.member_by_name(name.as_str())
    }

    /// Primary key, unique keys and plain keys, in that order.
    pub fn key_groups(&self) -> Result<Vec<KeyGroup<'_>>> {
        let mut groups = Vec::new();
        if let Some(pk) = &self.index.primary_key {
            groups.push(KeyGroup {
                kind: KeyKind::Primary,
                members: vec![self.key_member(pk)?],
            });
        }
        let blocks = [(KeyKind::Unique, &self.index.unique_keys), (KeyKind::Plain, &self.index.keys)];
        for (kind, block) in blocks {
            for columns in block {
                let members = columns.iter().map(|c| self.key_member(c)).collect::<Result<Vec<_>>>()?;
                groups.push(KeyGroup { kind, members });
            }
        }
        Ok(groups)
    }

    fn key_member(&self, name: &Name) -> Result<&Member> {
        self.member_by_name(name.as_str()).ok_or_else(|| {
            Error::generation(self.name.snake(), format!("key references unknown member '{name}'"))
        })
    }

    /// Check structural validity of the definition.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::definition("<unnamed>", "class name is required"));
        }
        let entity = self.name.snake();
        let mut seen = HashSet::new();
        for member in &self.members {
            if member.name.is_empty() {
                return Err(Error::definition(&entity, "member name is required"));
            }
            if !seen.insert(member.name.snake()) {
                return Err(Error::definition(&entity, format!("duplicate member '{}'", member.name)));
            }
            if member.ty.is_none() && member.relation.is_none() {
                return Err(Error::definition(
                    &entity,
                    format!("'{}' requires either 'type' or 'relation'", member.name),
                ));
            }
            if let Some(relation) = &member.relation
                && let Some(problem) = relation.problem()
            {
                return Err(Error::definition(&entity, format!("relation of '{}': {problem}", member.name)));
            }
            if let Some((internal, _)) = member.relation.as_ref().and_then(|r| r.join())
                && self.member_by_name(internal.as_str()).is_none()
            {
                return Err(Error::definition(
                    &entity,
                    format!("relation of '{}' joins on unknown member '{internal}'", member.name),
                ));
            }
        }
        let indexed = self
            .index
            .primary_key
            .iter()
            .chain(self.index.unique_keys.iter().flatten())
            .chain(self.index.keys.iter().flatten());
        for name in indexed {
            match self.member_by_name(name.as_str()) {
                None => return Err(Error::definition(&entity, format!("index references unknown member '{name}'"))),
                Some(member) if !member.is_column() => {
                    return Err(Error::definition(&entity, format!("index member '{name}' is not a column")));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Relation, TypeRef};

    fn user() -> Class {
        let mut class = Class::new("user");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("name", TypeRef::parse("string")),
            Member::new("skill_id", TypeRef::parse("u64")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    #[test]
    fn test_valid_class() {
        assert!(user().validate().is_ok());
    }

    #[test]
    fn test_duplicate_member() {
        let mut class = user();
        class.members.push(Member::new("Name", TypeRef::parse("string")));
        let err = class.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate member"));
    }

    #[test]
    fn test_member_without_type_or_relation() {
        let mut class = user();
        let mut member = Member::new("broken", TypeRef::parse("u64"));
        member.ty = None;
        class.members.push(member);
        assert!(class.validate().unwrap_err().is_definition_error());
    }

    #[test]
    fn test_index_on_unknown_member() {
        let mut class = user();
        class.index.keys.push(vec![Name::new("missing")]);
        assert!(class.validate().unwrap_err().to_string().contains("missing"));
    }

    #[test]
    fn test_index_on_relation_member() {
        let mut class = user();
        class.members.push(Member::relation(
            "skill",
            Relation {
                to: Name::new("skill"),
                internal: Some(Name::new("skill_id")),
                external: Some(Name::new("id")),
                ..Relation::default()
            },
        ));
        class.index.keys.push(vec![Name::new("skill")]);
        assert!(class.validate().is_err());
    }

    #[test]
    fn test_key_groups_order() {
        let mut class = user();
        class.index.unique_keys.push(vec![Name::new("name")]);
        class.index.keys.push(vec![Name::new("skill_id"), Name::new("name")]);
        let groups = class.key_groups().unwrap();
        let kinds: Vec<_> = groups.iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![KeyKind::Primary, KeyKind::Unique, KeyKind::Plain]);
        assert_eq!(groups[2].members.len(), 2);
    }
}
