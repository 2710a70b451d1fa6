//! Storage-backend table descriptions, the input of the merge step.

use serde::{Deserialize, Serialize};

use crate::entity::{Class, Index, Member, Name, PrimitiveKind, TypeRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: PrimitiveKind,
    #[serde(default)]
    pub nullable: bool,
}

/// Typed column list plus key constraints of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_key: Option<String>,
    #[serde(default)]
    pub unique_keys: Vec<Vec<String>>,
    #[serde(default)]
    pub keys: Vec<Vec<String>>,
}

impl Class {
    /// Fresh definition derived from a table description. Table names are singularised.
    pub fn from_table(table: &TableSchema) -> Class {
        let mut class = Class::new(Name::new(&table.name).singular());
        class.members = table
            .columns
            .iter()
            .map(|column| {
                let mut member = Member::new(column.name.as_str(), TypeRef::Primitive(column.kind));
                member.nullable = column.nullable;
                member
            })
            .collect();
        let names = |groups: &[Vec<String>]| -> Vec<Vec<Name>> {
            groups.iter().map(|g| g.iter().map(|c| Name::new(c.as_str())).collect()).collect()
        };
        class.index = Index {
            primary_key: table.primary_key.as_deref().map(Name::new),
            unique_keys: names(&table.unique_keys),
            keys: names(&table.keys),
        };
        class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_table() {
        let table: TableSchema = toml::from_str(
            r#"
            name = "user_skills"
            primary_key = "id"
            unique_keys = [["user_id", "skill_id"]]
            [[columns]]
            name = "id"
            kind = "u64"
            [[columns]]
            name = "user_id"
            kind = "u64"
            [[columns]]
            name = "skill_id"
            kind = "u64"
            [[columns]]
            name = "note"
            kind = "string"
            nullable = true
            "#,
        )
        .unwrap();
        let class = Class::from_table(&table);
        assert_eq!(class.name.snake(), "user_skill");
        assert_eq!(class.members.len(), 4);
        assert!(class.member_by_name("note").unwrap().nullable);
        assert_eq!(class.index.unique_keys[0].len(), 2);
        assert!(class.validate().is_ok());
    }
}
