//! Key reduction: the finder surface derived from the index block of an entity.
//!
//! A key group of length n yields one exact-match method per prefix length, longest first, and one
//! plural method over the first member once the group is reduced to length 1.

use std::collections::HashSet;

use crate::entity::{Class, KeyKind, Member, Name};
use crate::error::Result;
use crate::generate::decl::{MethodName, Returns};

/// One method derived from a key group.
#[derive(Debug, Clone)]
pub struct KeyMethod<'a> {
    pub members: Vec<&'a Member>,
    /// Matches a set of values of its single member.
    pub plural: bool,
    /// `One` for exact matches on a complete primary or unique key, `Many` otherwise.
    pub returns: Returns,
}

impl KeyMethod<'_> {
    pub fn names(&self) -> Vec<Name> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }

    pub fn name(&self, verb: &str) -> MethodName {
        MethodName::keyed(verb, self.names(), self.plural)
    }

    pub fn is_unique(&self) -> bool {
        self.returns == Returns::One
    }
}

/// Reduce one key group.
pub fn reduce_group<'a>(kind: KeyKind, members: &[&'a Member]) -> Vec<KeyMethod<'a>> {
    let mut methods = Vec::with_capacity(members.len() + 1);
    for len in (1..=members.len()).rev() {
        let unique = match kind {
            KeyKind::Primary => true,
            KeyKind::Unique => len == members.len(),
            KeyKind::Plain => false,
        };
        methods.push(KeyMethod {
            members: members[..len].to_vec(),
            plural: false,
            returns: if unique { Returns::One } else { Returns::Many },
        });
        if len == 1 {
            methods.push(KeyMethod {
                members: members[..1].to_vec(),
                plural: true,
                returns: Returns::Many,
            });
        }
    }
    methods
}

/// Key methods of every group of `class`, deduplicated by name; the first occurrence wins.
pub fn reduce(class: &Class) -> Result<Vec<KeyMethod<'_>>> {
    let mut seen = HashSet::new();
    let mut methods = Vec::new();
    for group in class.key_groups()? {
        for method in reduce_group(group.kind, &group.members) {
            if seen.insert(method.name("find_by").snake()) {
                methods.push(method);
            }
        }
    }
    Ok(methods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TypeRef;

    fn order() -> Class {
        let mut class = Class::new("order");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("customer_id", TypeRef::parse("u64")),
            Member::new("order_number", TypeRef::parse("string")),
            Member::new("status", TypeRef::parse("string")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class.index.unique_keys = vec![vec![Name::new("customer_id"), Name::new("order_number")]];
        class
    }

    fn names(class: &Class) -> Vec<String> {
        reduce(class).unwrap().iter().map(|m| m.name("find_by").snake()).collect()
    }

    #[test]
    fn test_order_example() {
        assert_eq!(
            names(&order()),
            vec![
                "find_by_id",
                "find_by_ids",
                "find_by_customer_id_and_order_number",
                "find_by_customer_id",
                "find_by_customer_ids",
            ]
        );
    }

    #[test]
    fn test_group_of_n_gives_n_exact_and_one_plural() {
        let class = order();
        let members: Vec<&Member> = class.columns().collect();
        for len in 1..=members.len() {
            let methods = reduce_group(KeyKind::Plain, &members[..len]);
            assert_eq!(methods.iter().filter(|m| !m.plural).count(), len);
            let plurals: Vec<_> = methods.iter().filter(|m| m.plural).collect();
            assert_eq!(plurals.len(), 1);
            assert_eq!(plurals[0].members.len(), 1);
        }
    }

    #[test]
    fn test_only_complete_unique_keys_return_one() {
        let entity = order();
        let methods = reduce(&entity).unwrap();
        let one: Vec<String> = methods
            .iter()
            .filter(|m| m.is_unique())
            .map(|m| m.name("find_by").snake())
            .collect();
        assert_eq!(one, vec!["find_by_id", "find_by_customer_id_and_order_number"]);
    }

    #[test]
    fn test_duplicate_groups_keep_first() {
        let mut class = order();
        class.index.keys = vec![vec![Name::new("id")], vec![Name::new("status")]];
        let methods = reduce(&class).unwrap();
        let by_id: Vec<_> = methods.iter().filter(|m| m.name("find_by").snake() == "find_by_id").collect();
        assert_eq!(by_id.len(), 1);
        assert!(by_id[0].is_unique());
        assert!(names(&class).contains(&"find_by_statuses".to_string()));
    }
}
