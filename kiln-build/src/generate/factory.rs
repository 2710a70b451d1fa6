//! Model factories: functions building ready-made models from per-entity test data, for tests that run
//! against the repository mocks.
//!
//! Test data lives in one TOML file per entity. Named single objects become `fn <name>() -> model::X`
//! and named lists become `fn <name>() -> model::Xs`; `default` and `defaults` map to
//! `default_<snake>` and `default_<plural_snake>`.
//!
//! ```toml
//! [single.default]
//! id = 1
//! name = "alice"
//! skills = "*defaults"
//!
//! [[collection.defaults]]
//! id = 1
//! ```
//!
//! A relation member takes `"*<name>"`, naming a factory of the related entity.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::model::{loaded_relations, loader_field, relation_type};
use super::{EntityPlan, GENERATED_HEADER, Layout, Plans, layer_mod, types};
use crate::entity::{Class, Member, PrimitiveKind};
use crate::error::{Error, Result};
use crate::ir::{Block, ClosureParam, Expr, FnDecl, Item, Module, Pat, Path, Stmt, Type};

pub const DEFAULT_SINGLE: &str = "default";
pub const DEFAULT_COLLECTION: &str = "defaults";

/// Test objects of one entity, by factory name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestData {
    pub single: BTreeMap<String, toml::Table>,
    pub collection: BTreeMap<String, Vec<toml::Table>>,
}

/// Zero value of a column kind as it is written to test data.
fn zero(kind: PrimitiveKind) -> toml::Value {
    match kind {
        PrimitiveKind::F32 | PrimitiveKind::F64 => toml::Value::Float(0.0),
        PrimitiveKind::Bool => toml::Value::Boolean(false),
        PrimitiveKind::String | PrimitiveKind::Bytes => toml::Value::String(String::new()),
        // integers, and times as unix seconds
        _ => toml::Value::Integer(0),
    }
}

fn default_object(class: &Class) -> toml::Table {
    class
        .columns()
        .filter(|m| !m.nullable && !types::is_custom(m))
        .filter_map(|m| types::kind(m).map(|kind| (m.name.snake(), zero(kind))))
        .collect()
}

impl TestData {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// One zero-valued `default` object and a `defaults` list holding one more. Relations are left
    /// unset, so mutually related entities never build each other.
    pub fn defaults(class: &Class) -> Self {
        let object = default_object(class);
        Self {
            single: BTreeMap::from([(DEFAULT_SINGLE.to_string(), object.clone())]),
            collection: BTreeMap::from([(DEFAULT_COLLECTION.to_string(), vec![object])]),
        }
    }

    /// Add the `default` and `defaults` entries when missing. Returns whether anything was added.
    pub fn merge_default(&mut self, class: &Class) -> bool {
        let defaults = Self::defaults(class);
        let mut added = false;
        for (name, object) in defaults.single {
            if !self.single.contains_key(&name) {
                self.single.insert(name, object);
                added = true;
            }
        }
        for (name, objects) in defaults.collection {
            if !self.collection.contains_key(&name) {
                self.collection.insert(name, objects);
                added = true;
            }
        }
        added
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

/// Factory function name of a single object.
pub fn single_fn(class_snake: &str, name: &str) -> String {
    if name == DEFAULT_SINGLE {
        format!("default_{class_snake}")
    } else {
        name.to_string()
    }
}

/// Factory function name of a list.
pub fn collection_fn(class_plural_snake: &str, name: &str) -> String {
    if name == DEFAULT_COLLECTION {
        format!("default_{class_plural_snake}")
    } else {
        name.to_string()
    }
}

struct Object<'a> {
    plan: &'a EntityPlan,
    plans: &'a Plans,
    /// Factory name, for errors.
    name: &'a str,
    values: &'a toml::Table,
}

impl Object<'_> {
    fn error(&self, member: &Member, message: impl std::fmt::Display) -> Error {
        Error::generation(
            self.plan.snake(),
            format!("test object '{}', member '{}': {message}", self.name, member.name),
        )
    }

    /// Literal of `value` for the column kind of `member`, without nullability.
    fn literal(&self, member: &Member, value: &toml::Value) -> Result<Expr> {
        let kind = types::kind(member).ok_or_else(|| self.error(member, "only columns take values"))?;
        let mismatch = || self.error(member, format!("{value} is not a {} value", kind.as_str()));
        Ok(match (kind, value) {
            (PrimitiveKind::Bool, toml::Value::Boolean(v)) => Expr::bool(*v),
            (PrimitiveKind::F32 | PrimitiveKind::F64, toml::Value::Float(v)) => {
                Expr::float(*v).ok_or_else(mismatch)?
            }
            (PrimitiveKind::F32 | PrimitiveKind::F64, toml::Value::Integer(v)) => {
                Expr::float(*v as f64).ok_or_else(mismatch)?
            }
            (PrimitiveKind::String, toml::Value::String(v)) => Expr::str(v).method("to_string", vec![]),
            (PrimitiveKind::Bytes, toml::Value::String(v)) => Expr::byte_str(v).method("to_vec", vec![]),
            (PrimitiveKind::Time, toml::Value::Integer(secs)) => Expr::call(
                "::kiln::chrono::DateTime::from_timestamp",
                vec![Expr::int(*secs), Expr::int(0)],
            )
            .method("unwrap_or_default", vec![]),
            (PrimitiveKind::Time, toml::Value::String(text)) => {
                Expr::call("::kiln::chrono::DateTime::parse_from_rfc3339", vec![Expr::str(text)])
                    .method(
                        "map",
                        vec![Expr::closure(
                            vec!["t"],
                            Expr::ident("t")
                                .method("with_timezone", vec![Expr::path("::kiln::chrono::Utc").reference()]),
                        )],
                    )
                    .method("unwrap_or_default", vec![])
            }
            (kind, toml::Value::Integer(v)) if kind.is_integer() => {
                if kind.as_str().starts_with('u') && *v < 0 {
                    return Err(mismatch());
                }
                Expr::int(*v)
            }
            _ => return Err(mismatch()),
        })
    }

    fn value(&self, member: &Member) -> Result<Option<Expr>> {
        let Some(value) = self.values.get(&member.name.snake()) else {
            return Ok(None);
        };
        if types::is_custom(member) {
            return Err(self.error(member, "custom types cannot take test data"));
        }
        let literal = self.literal(member, value)?;
        Ok(Some(if member.nullable { Expr::some(literal) } else { literal }))
    }

    /// `entity::X { col: .., ..Default::default() }`
    fn entity(&self) -> Result<Expr> {
        let mut fields = Vec::new();
        for member in self.plan.class.columns() {
            if let Some(value) = self.value(member)? {
                fields.push((member.name.snake(), value));
            }
        }
        Ok(Expr::Struct {
            path: Path::parse(&format!("entity::{}", self.plan.camel())),
            fields,
            rest: Some(Box::new(Expr::call("Default::default", vec![]))),
        })
    }

    /// Statements leaving the finished model in the local `value`.
    fn stmts(&self) -> Result<Vec<Stmt>> {
        let mut stmts = vec![Stmt::let_mut(
            "value",
            Expr::call(&format!("model::{}::new", self.plan.camel()), vec![self.entity()?]),
        )];
        for member in self.plan.class.model_members() {
            if member.relation.is_some() || !matches!(member.ty, Some(ref ty) if ty.storage_kind().is_some()) {
                continue;
            }
            if let Some(value) = self.value(member)? {
                stmts.push(Expr::ident("value").field(&member.name.snake()).assign(value).stmt());
            }
        }
        for (member, relation) in loaded_relations(self.plan) {
            let Some(reference) = self.values.get(&member.name.snake()) else {
                continue;
            };
            let factory = reference
                .as_str()
                .and_then(|r| r.strip_prefix('*'))
                .ok_or_else(|| self.error(member, "relations take \"*<factory name>\""))?;
            let target = self.plans.get(&relation.to)?;
            let function = if member.is_collection() {
                collection_fn(&target.class.name.plural_snake(), factory)
            } else {
                single_fn(&target.snake(), factory)
            };
            let related = member.name.snake();
            let loaded = if member.is_collection() {
                Expr::ident(&related).method("clone", vec![])
            } else {
                Expr::some(Expr::ident(&related).method("clone", vec![]))
            };
            let load = Expr::Closure {
                is_move: true,
                params: vec![ClosureParam {
                    pat: Pat::ident("_ctx"),
                    ty: Some(Type::path("::kiln::Context").reference()),
                }],
                ret: None,
                body: Box::new(Expr::block(vec![Expr::ok(loaded).tail()])),
            };
            stmts.push(
                Expr::Block(Block::new(vec![
                    Stmt::let_(&related, Expr::call(&format!("super::{}::{function}", target.snake()), vec![])),
                    Stmt::let_typed(
                        "load",
                        Type::generic("::kiln::Loader", vec![relation_type(member, relation)]),
                        Expr::call("::std::sync::Arc::new", vec![load]),
                    ),
                    Expr::ident("value")
                        .field(&loader_field(member))
                        .assign(Expr::some(Expr::ident("load")))
                        .stmt(),
                ]))
                .stmt(),
            );
        }
        Ok(stmts)
    }
}

fn single(plan: &EntityPlan, plans: &Plans, name: &str, values: &toml::Table) -> Result<FnDecl> {
    let object = Object { plan, plans, name, values };
    let mut body = object.stmts()?;
    body.push(Expr::ident("value").tail());
    Ok(FnDecl::new(&single_fn(&plan.snake(), name))
        .public()
        .returns(plan.layer_type("model"))
        .body(body))
}

fn collection(plan: &EntityPlan, plans: &Plans, name: &str, objects: &[toml::Table]) -> Result<FnDecl> {
    let collection = plan.layer_collection("model");
    let mut body = vec![Stmt::Let {
        pat: Pat::ident_mut("values"),
        ty: Some(collection.clone()),
        init: Some(Expr::call("Default::default", vec![])),
    }];
    for values in objects {
        let object = Object { plan, plans, name, values };
        let mut stmts = object.stmts()?;
        stmts.push(Expr::ident("values").method("add", vec![Expr::ident("value")]).stmt());
        body.push(Expr::Block(Block::new(stmts)).stmt());
    }
    body.push(Expr::ident("values").tail());
    Ok(FnDecl::new(&collection_fn(&plan.class.name.plural_snake(), name))
        .public()
        .returns(collection)
        .body(body))
}

/// Factory functions of one entity, from `data` merged over the defaults.
pub fn generate(plan: &EntityPlan, plans: &Plans, data: Option<&TestData>, layout: &Layout) -> Result<Module> {
    let mut data = data.cloned().unwrap_or_default();
    data.merge_default(&plan.class);
    debug!(
        "factories of '{}': {} single, {} collection",
        plan.snake(),
        data.single.len(),
        data.collection.len()
    );
    let mut module = Module::new(format!("{GENERATED_HEADER}\n\nModel factories of `{}`.", plan.snake()));
    module.allow = vec!["unused_imports".into(), "clippy::needless_update".into()];
    module.uses(&layout.uses(&["entity", "model"]));
    for (name, values) in &data.single {
        module.push(Item::Fn(single(plan, plans, name, values)?));
    }
    for (name, objects) in &data.collection {
        module.push(Item::Fn(collection(plan, plans, name, objects)?));
    }
    Ok(module)
}

/// `mock/factory/mod.rs`, re-exporting every factory function.
pub fn generate_mod(plans: &Plans, data: &BTreeMap<String, TestData>) -> Result<Module> {
    Ok(layer_mod(plans, |plan| {
        let mut merged = data.get(&plan.snake()).cloned().unwrap_or_default();
        merged.merge_default(&plan.class);
        let plural = plan.class.name.plural_snake();
        merged
            .single
            .keys()
            .map(|name| single_fn(&plan.snake(), name))
            .chain(merged.collection.keys().map(|name| collection_fn(&plural, name)))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Name, Relation, TypeRef};
    use crate::generate::Generator;
    use crate::ir::RustPrinter;
    use crate::plugin::PluginRegistry;

    fn skill() -> Class {
        let mut class = Class::new("skill");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("name", TypeRef::parse("string")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    fn user() -> Class {
        let mut class = Class::new("user");
        let mut nick = Member::new("nick", TypeRef::parse("string"));
        nick.nullable = true;
        let mut skills = Member::relation(
            "skills",
            Relation {
                to: Name::new("skill"),
                internal: Some(Name::new("skill_id")),
                external: Some(Name::new("id")),
                ..Relation::default()
            },
        );
        skills.has_many = true;
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("skill_id", TypeRef::parse("u64")),
            nick,
            Member::new("avatar", TypeRef::parse("bytes")),
            Member::new("score", TypeRef::parse("f64")),
            Member::new("joined_at", TypeRef::parse("time")),
            skills,
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    fn print(data: Option<&TestData>) -> String {
        let registry = PluginRegistry::with_defaults();
        let plans = Generator::new(&registry).plan(vec![skill(), user()]).unwrap();
        let plan = plans.get(&Name::new("user")).unwrap();
        RustPrinter::new("mock/factory/user.rs")
            .print(&generate(plan, &plans, data, &Layout::default()).unwrap())
            .unwrap()
    }

    #[test]
    fn test_defaults_cover_non_null_columns() {
        let data = TestData::defaults(&user());
        let object = &data.single[DEFAULT_SINGLE];
        assert_eq!(object["id"], toml::Value::Integer(0));
        assert_eq!(object["score"], toml::Value::Float(0.0));
        assert!(!object.contains_key("nick"));
        assert!(!object.contains_key("skills"));
        assert_eq!(data.collection[DEFAULT_COLLECTION].len(), 1);
    }

    #[test]
    fn test_merge_default_keeps_written_objects() {
        let mut data = TestData::parse(
            r#"
            [single.default]
            id = 7

            [single.admin]
            id = 1
            "#,
        )
        .unwrap();
        assert!(data.merge_default(&user()));
        assert_eq!(data.single[DEFAULT_SINGLE]["id"], toml::Value::Integer(7));
        assert!(data.collection.contains_key(DEFAULT_COLLECTION));
        assert!(!data.merge_default(&user()));
        let text = data.to_toml().unwrap();
        assert_eq!(TestData::parse(&text).unwrap(), data);
    }

    #[test]
    fn test_default_factories() {
        let out = print(None);
        assert!(out.contains("pub fn default_user() -> model::User {"), "{out}");
        assert!(out.contains("pub fn default_users() -> model::Users {"), "{out}");
        assert!(out.contains("let mut value = model::User::new("), "{out}");
        assert!(out.contains("entity::User {"), "{out}");
        assert!(out.contains("..Default::default()"), "{out}");
        assert!(out.contains("let mut values: model::Users = Default::default();"), "{out}");
        assert!(out.contains("values.add(value);"), "{out}");
        assert!(!out.contains("skills_loader"), "{out}");
    }

    #[test]
    fn test_written_objects_and_relation_references() {
        let data = TestData::parse(
            r#"
            [single.admin]
            id = 1
            nick = "root"
            avatar = "png"
            score = 2.5
            joined_at = "2020-01-02T03:04:05Z"
            skills = "*defaults"
            "#,
        )
        .unwrap();
        let out = print(Some(&data));
        assert!(out.contains("pub fn admin() -> model::User {"), "{out}");
        assert!(out.contains(r#"nick: Some("root".to_string()),"#), "{out}");
        assert!(out.contains(r#"avatar: b"png".to_vec(),"#), "{out}");
        assert!(out.contains("score: 2.5,"), "{out}");
        assert!(out.contains(r#"::kiln::chrono::DateTime::parse_from_rfc3339("2020-01-02T03:04:05Z")"#), "{out}");
        assert!(out.contains("let skills = super::skill::default_skills();"), "{out}");
        assert!(out.contains("let load: ::kiln::Loader<model::Skills> = ::std::sync::Arc::new("), "{out}");
        assert!(out.contains("move |_ctx: &::kiln::Context| {"), "{out}");
        assert!(out.contains("Ok(skills.clone())"), "{out}");
        assert!(out.contains("value.skills_loader = Some(load);"), "{out}");
    }

    #[test]
    fn test_bad_values_name_object_and_member() {
        let registry = PluginRegistry::with_defaults();
        let plans = Generator::new(&registry).plan(vec![skill(), user()]).unwrap();
        let plan = plans.get(&Name::new("user")).unwrap();
        for (text, needle) in [
            ("[single.bad]\nid = -1", "'id'"),
            ("[single.bad]\nscore = \"high\"", "'score'"),
            ("[single.bad]\nskills = \"defaults\"", "'skills'"),
        ] {
            let data = TestData::parse(text).unwrap();
            let err = generate(plan, &plans, Some(&data), &Layout::default()).unwrap_err();
            assert!(err.to_string().contains("'bad'"), "{err}");
            assert!(err.to_string().contains(needle), "{err}");
        }
    }

    #[test]
    fn test_mod_exports_every_factory() {
        let registry = PluginRegistry::with_defaults();
        let plans = Generator::new(&registry).plan(vec![skill(), user()]).unwrap();
        let data = BTreeMap::from([("user".to_string(), TestData::parse("[single.admin]\nid = 1").unwrap())]);
        let out = RustPrinter::new("mock/factory/mod.rs")
            .print(&generate_mod(&plans, &data).unwrap())
            .unwrap();
        assert!(out.contains("pub use skill::{default_skill, default_skills};"), "{out}");
        assert!(out.contains("pub use user::{admin, default_user, default_users};"), "{out}");
    }
}
