//! Data-access layer: the operation surface of an entity and its hook-threaded implementation.

use std::collections::HashSet;

use log::debug;

use super::decl::{self, Arg, ArgKind, MethodDecl, MethodName, ReturnTypes, Returns};
use super::keys::{self, KeyMethod};
use super::{EntityPlan, GENERATED_HEADER, Layout, Plans, layer_mod};
use crate::entity::{Class, Member};
use crate::error::{Error, Result};
use crate::ir::{Expr, FnDecl, ImplDef, Item, Module, Stmt, StructDef, TraitDef, Type, Visibility};
use crate::plugin::Operation;

fn entity_arg(class: &Class, mutable: bool) -> Arg {
    let ty = Type::path(&format!("entity::{}", class.name.camel()));
    Arg {
        name: "value".into(),
        ty: if mutable { ty.reference_mut() } else { ty.reference() },
        kind: ArgKind::Entity { mutable },
    }
}

fn updates_arg() -> Arg {
    Arg {
        name: "updates".into(),
        ty: Type::path("::kiln::sql::Updates").reference(),
        kind: ArgKind::Updates,
    }
}

fn key_list(members: &[&Member]) -> String {
    members
        .iter()
        .map(|m| format!("`{}`", m.name.snake()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn key_decl(class: &Class, method: &KeyMethod<'_>, verb: &str) -> Result<MethodDecl> {
    let (op, returns) = match (verb, method.plural) {
        ("find_by", false) => (Operation::FindBy, method.returns),
        ("find_by", true) => (Operation::FindByPlural, Returns::Many),
        ("update_by", false) => (Operation::UpdateBy, Returns::Unit),
        ("update_by", true) => (Operation::UpdateByPlural, Returns::Unit),
        ("delete_by", false) => (Operation::DeleteBy, Returns::Unit),
        ("delete_by", true) => (Operation::DeleteByPlural, Returns::Unit),
        _ => return Err(Error::generation(class.name.snake(), format!("unknown key verb '{verb}'"))),
    };
    let mut decl = MethodDecl::new(op, method.name(verb), returns);
    if method.plural {
        decl = decl.arg(decl::plural_arg(class, method.members[0])?);
    } else {
        for member in &method.members {
            decl = decl.arg(decl::key_arg(class, member)?);
        }
    }
    if verb == "update_by" {
        decl = decl.arg(updates_arg());
    }
    decl.key_members = method.names();
    let keys = key_list(&method.members);
    let doc = match (verb, method.plural) {
        ("find_by", true) => format!("Rows whose {keys} is any of the given values."),
        ("find_by", false) if method.is_unique() => format!("The row matching {keys}, if any."),
        ("find_by", false) => format!("Rows matching {keys}."),
        ("update_by", _) => format!("Apply `updates` to the rows matching {keys}."),
        _ => format!("Delete the rows matching {keys}."),
    };
    Ok(decl.doc(doc))
}

/// Method declarations of `class` before hooks adjust them.
///
/// The constructor, `find_all` and `count` are always declared. Writable entities get `create`, and
/// `update`/`delete` when they have a primary key. Every key group contributes its reduced find, update
/// and delete methods, and every relation joining on this entity a plural finder over its external member.
pub fn declarations(class: &Class, classes: &[Class]) -> Result<Vec<MethodDecl>> {
    let entity = class.name.snake();
    let mut constructor = MethodDecl::new(Operation::Constructor, MethodName::verb("new"), Returns::Handle);
    constructor.args.clear();
    let mut decls = vec![constructor];
    if !class.read_only {
        decls.push(
            MethodDecl::new(Operation::Create, MethodName::verb("create"), Returns::Unit)
                .arg(entity_arg(class, true))
                .doc("Insert `value`; a generated primary key is written back to it."),
        );
        if class.primary_key().is_some() {
            decls.push(
                MethodDecl::new(Operation::Update, MethodName::verb("update"), Returns::Unit)
                    .arg(entity_arg(class, true))
                    .doc("Store every column of `value`, matched by primary key."),
            );
            decls.push(
                MethodDecl::new(Operation::Delete, MethodName::verb("delete"), Returns::Unit)
                    .arg(entity_arg(class, false))
                    .doc("Delete `value`, matched by primary key."),
            );
        }
    }
    decls.push(MethodDecl::new(Operation::FindAll, MethodName::verb("find_all"), Returns::Many));
    decls.push(MethodDecl::new(Operation::Count, MethodName::verb("count"), Returns::Count));

    let methods = keys::reduce(class)?;
    for verb in ["find_by", "update_by", "delete_by"] {
        if verb != "find_by" && class.read_only {
            continue;
        }
        for method in &methods {
            decls.push(key_decl(class, method, verb)?);
        }
    }

    for other in classes {
        for member in other.relation_members() {
            let Some((_, external)) = member.relation.as_ref().and_then(|r| r.join()) else {
                continue;
            };
            if member.relation.as_ref().is_none_or(|r| r.to.snake() != entity) {
                continue;
            }
            let name = MethodName::keyed("find_by", vec![external.clone()], true);
            if let Some(existing) = decls.iter_mut().find(|d| d.op == Operation::FindByPlural && d.name == name) {
                existing.finder = true;
                continue;
            }
            let target = class.member_by_name(external.as_str()).ok_or_else(|| {
                Error::generation(&entity, format!("relation '{}.{}' joins on unknown '{external}'", other.name, member.name))
            })?;
            let mut finder = MethodDecl::new(Operation::FindByPlural, name, Returns::Many)
                .arg(decl::plural_arg(class, target)?)
                .doc(format!("Rows whose `{}` is any of the given values.", target.name.snake()));
            finder.key_members = vec![target.name.clone()];
            finder.finder = true;
            decls.push(finder);
        }
    }
    Ok(decls)
}

/// Run the bound declare hooks over `decls`; a method whose final name was already taken is dropped.
pub fn apply_declare_hooks(plan: &EntityPlan, decls: Vec<MethodDecl>) -> Result<Vec<MethodDecl>> {
    let ctx = plan.hook_context();
    let mut seen = HashSet::new();
    let mut declared = Vec::with_capacity(decls.len());
    for mut decl in decls {
        plan.hooks.declare(&ctx, &mut decl)?;
        if seen.insert(decl.snake()) {
            declared.push(decl);
        } else {
            debug!("'{}' of '{}' is declared twice, keeping the first", decl.snake(), plan.snake());
        }
    }
    Ok(declared)
}

fn return_types(plan: &EntityPlan) -> ReturnTypes {
    ReturnTypes {
        one: plan.layer_type("entity"),
        many: plan.layer_collection("entity"),
    }
}

/// Before statements, then the main body; with after hooks the main body runs in a closure so its
/// early returns still reach them.
fn method_body(plan: &EntityPlan, decl: &MethodDecl, ret: Type) -> Result<Vec<Stmt>> {
    let ctx = plan.hook_context();
    let mut stmts = plan.hooks.before(&ctx, decl)?;
    let main = plan.hooks.main(&ctx, decl)?;
    let after = plan.hooks.after(&ctx, decl)?;
    if after.is_empty() {
        stmts.extend(main);
        return Ok(stmts);
    }
    stmts.push(Stmt::let_mut("delayed", Expr::call("::kiln::hook::Delayed::default", vec![])));
    let body = Expr::Closure {
        is_move: false,
        params: Vec::new(),
        ret: Some(ret),
        body: Box::new(Expr::block(main)),
    };
    stmts.push(Stmt::let_(
        "result",
        Expr::Call {
            func: Box::new(body),
            args: Vec::new(),
        },
    ));
    stmts.extend(after);
    stmts.push(Expr::ident("delayed").method("finish", vec![Expr::ident("result")]).tail());
    Ok(stmts)
}

pub fn generate(plan: &EntityPlan, layout: &Layout) -> Result<Module> {
    let snake = plan.snake();
    let trait_name = format!("{}Dao", plan.camel());
    let returns = return_types(plan);
    let mut module = Module::new(format!("{GENERATED_HEADER}\n\nData access for `{snake}`."));
    module.allow = vec!["dead_code".into(), "unused_mut".into(), "unused_variables".into()];
    module.uses(&layout.uses(&["entity"]));

    module.push(Item::Trait(TraitDef {
        name: trait_name.clone(),
        vis: Visibility::Public,
        doc: Some(format!("Storage operations of `{snake}`.")),
        supertraits: vec![Type::path("Send"), Type::path("Sync")],
        methods: plan
            .methods()
            .map(|d| d.signature(returns.of(d.returns).kiln_result()))
            .collect(),
    }));

    module.push(Item::Struct(StructDef {
        name: plan.impl_name.clone(),
        vis: Visibility::Public,
        doc: None,
        attrs: Vec::new(),
        fields: plan.fields.clone(),
    }));

    let constructor = plan.constructor()?;
    let handle = Type::path(&trait_name).dyn_().arc();
    let mut new = FnDecl::new(&format!("new_{snake}_dao"))
        .public()
        .doc(format!("Build the `{snake}` data-access handle."))
        .returns(handle);
    for arg in &constructor.args {
        new = new.param(&arg.name, arg.ty.clone());
    }
    let ctx = plan.hook_context();
    module.push(Item::Fn(new.body(plan.hooks.main(&ctx, constructor)?)));

    let mut methods = Vec::new();
    for decl in plan.methods() {
        let ret = returns.of(decl.returns).kiln_result();
        let body = method_body(plan, decl, ret.clone()).map_err(|e| e.during(&decl.snake()))?;
        let mut method = decl.signature(ret).body(body);
        method.doc = None;
        methods.push(method);
    }
    module.push(Item::Impl(
        ImplDef::of_trait(Type::path(&trait_name), Type::path(&plan.impl_name)).funcs(methods),
    ));
    Ok(module)
}

pub fn generate_mod(plans: &Plans) -> Result<Module> {
    Ok(layer_mod(plans, |plan| {
        vec![
            format!("{}Dao", plan.camel()),
            plan.impl_name.clone(),
            format!("new_{}_dao", plan.snake()),
        ]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Name, Relation, TypeRef};
    use crate::ir::RustPrinter;
    use crate::plugin::{HookConfig, PluginRegistry};

    fn order() -> Class {
        let mut class = Class::new("order");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("customer_id", TypeRef::parse("u64")),
            Member::new("order_number", TypeRef::parse("string")),
            Member::new("created_at", TypeRef::parse("time")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class.index.unique_keys = vec![vec![Name::new("customer_id"), Name::new("order_number")]];
        class
    }

    fn plan(class: &Class, config: &str) -> EntityPlan {
        let config: HookConfig = toml::from_str(config).unwrap();
        let hooks = PluginRegistry::with_defaults().bind("sql", &config).unwrap();
        EntityPlan::build(class, std::slice::from_ref(class), hooks).unwrap()
    }

    fn names(plan: &EntityPlan) -> Vec<String> {
        plan.methods().map(MethodDecl::snake).collect()
    }

    fn print(plan: &EntityPlan) -> String {
        RustPrinter::new("dao/order.rs")
            .print(&generate(plan, &Layout::default()).unwrap())
            .unwrap()
    }

    #[test]
    fn test_order_surface() {
        let names = names(&plan(&order(), ""));
        for expected in [
            "create",
            "update",
            "delete",
            "find_all",
            "count",
            "find_by_id",
            "update_by_id",
            "delete_by_id",
            "find_by_customer_id_and_order_number",
            "find_by_customer_id",
            "find_by_customer_ids",
            "update_by_customer_ids",
            "delete_by_customer_id_and_order_number",
        ] {
            assert!(names.contains(&expected.to_string()), "{expected} missing from {names:?}");
        }
        assert!(!names.iter().any(|n| n.contains("order_numbers")), "{names:?}");
    }

    #[test]
    fn test_each_verb_reduces_every_group() {
        let mut class = order();
        class.index.keys = vec![vec![Name::new("created_at"), Name::new("order_number"), Name::new("customer_id")]];
        let names = names(&plan(&class, ""));
        for verb in ["find_by", "update_by", "delete_by"] {
            let exact = [
                "created_at_and_order_number_and_customer_id",
                "created_at_and_order_number",
                "created_at",
            ];
            for key in exact {
                assert!(names.contains(&format!("{verb}_{key}")), "{verb}_{key}");
            }
            assert!(names.contains(&format!("{verb}_created_ats")), "{verb}_created_ats");
        }
    }

    #[test]
    fn test_read_only_has_no_writes() {
        let mut class = order();
        class.read_only = true;
        let names = names(&plan(&class, ""));
        assert!(names.iter().all(|n| n.starts_with("find") || n == "count"), "{names:?}");
    }

    #[test]
    fn test_relation_target_declares_finder() {
        let mut customer = Class::new("customer");
        customer.members = vec![Member::new("id", TypeRef::parse("u64"))];
        customer.index.primary_key = Some(Name::new("id"));
        let mut order = order();
        order.members.push(Member::relation(
            "customer",
            Relation {
                to: Name::new("customer"),
                internal: Some(Name::new("customer_id")),
                external: Some(Name::new("id")),
                ..Relation::default()
            },
        ));
        let decls = declarations(&customer, &[customer.clone(), order]).unwrap();
        let finder = decls.iter().find(|d| d.snake() == "find_by_ids").unwrap();
        assert!(finder.finder);
        assert_eq!(decls.iter().filter(|d| d.snake() == "find_by_ids").count(), 1);
    }

    #[test]
    fn test_after_hooks_wrap_the_main_body() {
        let out = print(&plan(&order(), r#""before-create" = "request-time"
"after-create" = "audit""#));
        assert!(out.contains("let mut delayed = ::kiln::hook::Delayed::default();"), "{out}");
        assert!(out.contains("let result = (|| -> ::kiln::Result<()> {"), "{out}");
        assert!(out.contains("delayed.finish(result)"), "{out}");
        let stamp = out.find("value.created_at = now;").unwrap();
        let insert = out.find("INSERT INTO").unwrap();
        assert!(stamp < insert, "before hooks run first");
    }

    #[test]
    fn test_trait_and_constructor() {
        let out = print(&plan(&order(), ""));
        assert!(out.contains("pub trait OrderDao: Send + Sync"), "{out}");
        assert!(out.contains("customer_ids: &[u64]"), "{out}");
        assert!(out.contains("pub fn new_order_dao("), "{out}");
        assert!(out.contains("::std::sync::Arc::new(OrderDaoImpl { executor })"), "{out}");
        assert!(!out.contains("delayed"), "{out}");
    }

    #[test]
    fn test_user_id_scoping_adds_field_and_argument() {
        let mut class = order();
        class.name = Name::new("user_order");
        class.members.push(Member::new("user_id", TypeRef::parse("u64")));
        let plan = plan(&class, r#""constructor-declare" = "user-id"
"find-all" = "user-id""#);
        let constructor = plan.constructor().unwrap();
        let args: Vec<_> = constructor.args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(args, vec!["executor", "user_id"]);
        let out = RustPrinter::new("dao/user_order.rs")
            .print(&generate(&plan, &Layout::default()).unwrap())
            .unwrap();
        assert!(out.contains("let user_id = self.user_id;"), "{out}");
    }
}
