//! Repository layer: one facade per entity turning data-access results into models, plus the root
//! `Repository` that owns every facade and wires relation loaders between them.

use std::collections::HashSet;

use super::decl::{self, ArgKind, MethodDecl, ReturnTypes, Returns};
use super::model::{self as model_gen, join_members, loaded_relations, loader_field};
use super::{EntityPlan, GENERATED_HEADER, Layout, Plans, layer_mod, types};
use crate::entity::{Member, Relation};
use crate::error::Result;
use crate::ir::{
    Arm, ClosureParam, Expr, Field, FnDecl, ImplDef, Item, Module, Pat, Path, Receiver, Stmt, StructDef, TraitDef,
    Type, Visibility,
};
use crate::plugin::Operation;

pub fn trait_name(plan: &EntityPlan) -> String {
    format!("{}Repository", plan.camel())
}

pub fn impl_name(plan: &EntityPlan) -> String {
    format!("{}RepositoryImpl", plan.camel())
}

pub fn return_types(plan: &EntityPlan) -> ReturnTypes {
    ReturnTypes {
        one: plan.layer_type("model"),
        many: plan.layer_collection("model"),
    }
}

/// Signature of `decl` at the repository level: entity arguments and results become models.
///
/// Create and update run through the model, so they borrow it mutably.
pub fn signature(plan: &EntityPlan, decl: &MethodDecl) -> FnDecl {
    let mut method = decl.signature(return_types(plan).of(decl.returns).kiln_result());
    for (param, arg) in method.params.iter_mut().zip(&decl.args) {
        if let ArgKind::Entity { mutable } = arg.kind {
            let model = plan.layer_type("model");
            let lifecycle = matches!(decl.op, Operation::Create | Operation::Update);
            param.ty = if mutable || lifecycle { model.reference_mut() } else { model.reference() };
        }
    }
    method
}

/// Methods of the repository trait; finder methods live on the model's finder supertrait.
pub fn repository_methods(plan: &EntityPlan) -> impl Iterator<Item = &MethodDecl> {
    plan.methods().filter(|d| !plan.finder_methods().any(|f| f.snake() == d.snake()))
}

fn dao() -> Expr {
    Expr::self_().field("dao")
}

fn forwarded(decl: &MethodDecl) -> Vec<Expr> {
    decl.args
        .iter()
        .map(|arg| match arg.kind {
            ArgKind::Entity { mutable: true } => Expr::ident(&arg.name).field("value").reference_mut(),
            ArgKind::Entity { mutable: false } => Expr::ident(&arg.name).field("value").reference(),
            _ => Expr::ident(&arg.name),
        })
        .collect()
}

fn body(decl: &MethodDecl) -> Vec<Stmt> {
    let entity_arg = decl.args.iter().find(|a| matches!(a.kind, ArgKind::Entity { .. }));
    if let Some(arg) = entity_arg
        && matches!(decl.op, Operation::Create | Operation::Update)
    {
        let value = Expr::ident(&arg.name);
        return vec![
            value
                .clone()
                .field("dao")
                .assign(Expr::some(dao().method("clone", vec![])))
                .stmt(),
            value.method(&decl.snake(), vec![Expr::ident("ctx")]).tail(),
        ];
    }
    let call = dao().method(&decl.snake(), forwarded(decl));
    match decl.returns {
        Returns::Many => vec![
            Stmt::let_("values", call.try_()),
            Expr::ok(Expr::self_().method("to_models", vec![Expr::ident("values")])).tail(),
        ],
        Returns::One => vec![
            Stmt::let_("value", call.try_()),
            Expr::ok(Expr::ident("value").method(
                "map",
                vec![Expr::closure(
                    vec!["v"],
                    Expr::self_().method("to_single", vec![Expr::ident("v")]),
                )],
            ))
            .tail(),
        ],
        Returns::Count | Returns::Unit | Returns::Handle => vec![call.tail()],
    }
}

/// Key expression handed to the relation memo, from the owned `key` captured by the loader.
fn key_lookup(plan: &EntityPlan, plans: &Plans, member: &Member, relation: &Relation) -> Result<Expr> {
    let target = plans.get(&relation.to)?;
    let find = format!("find_{}", member.name.snake());
    let finder = Expr::ident("repo").field(&target.snake()).reference();
    let Some((internal, external)) = join_members(plan, plans, member, relation)? else {
        return Ok(Expr::ident("relations").method(&find, vec![Expr::ident("ctx"), finder]));
    };
    let value_pass = types::inner_pass(external) == types::ArgPass::Value;
    if !internal.nullable {
        let key = types::inner_arg(external, Expr::ident("key"));
        return Ok(Expr::ident("relations").method(&find, vec![Expr::ident("ctx"), key, finder]));
    }
    let key = if value_pass { Expr::ident("key").deref() } else { Expr::ident("key") };
    Ok(Expr::match_(
        Expr::ident("key").reference(),
        vec![
            Arm::new(
                Pat::some(Pat::ident("key")),
                Expr::ident("relations").method(&find, vec![Expr::ident("ctx"), key, finder]),
            ),
            Arm::new(
                Pat::Path(Path::parse("None")),
                Expr::ok(Expr::call("Default::default", vec![])),
            ),
        ],
    ))
}

/// Statements installing the loader of one relation on the local `model`.
fn loader(plan: &EntityPlan, plans: &Plans, member: &Member, relation: &Relation) -> Result<Stmt> {
    let mut stmts = vec![
        Stmt::let_("root", Expr::self_().field("root").method("clone", vec![])),
        Stmt::let_("relations", Expr::ident("relations").method("clone", vec![])),
    ];
    if let Some((internal, _)) = relation.join() {
        stmts.push(Stmt::let_(
            "key",
            Expr::ident("model")
                .field("value")
                .field(&internal.snake())
                .method("clone", vec![]),
        ));
    }
    let upgrade = Expr::ident("root")
        .method("upgrade", vec![])
        .method(
            "ok_or_else",
            vec![Expr::closure(vec![], Expr::call("::kiln::Error::detached", vec![Expr::str(plan.snake())]))],
        )
        .try_();
    let closure = Expr::Closure {
        is_move: true,
        params: vec![ClosureParam {
            pat: Pat::ident("ctx"),
            ty: Some(Type::path("::kiln::Context").reference()),
        }],
        ret: None,
        body: Box::new(Expr::block(vec![
            Stmt::let_("repo", upgrade),
            key_lookup(plan, plans, member, relation)?.tail(),
        ])),
    };
    stmts.push(Stmt::let_typed(
        "load",
        Type::generic("::kiln::Loader", vec![model_gen::relation_type(member, relation)]),
        Expr::call("::std::sync::Arc::new", vec![closure]),
    ));
    stmts.push(
        Expr::ident("model")
            .field(&loader_field(member))
            .assign(Expr::some(Expr::ident("load")))
            .stmt(),
    );
    Ok(Expr::block(stmts).stmt())
}

fn conversions(plan: &EntityPlan, plans: &Plans) -> Result<Vec<FnDecl>> {
    let relations = Type::path(&format!("model::{}", model_gen::relations_name(plan))).arc();
    let model = plan.layer_type("model");
    let mut to_model = vec![
        Stmt::let_mut(
            "model",
            Expr::call(&format!("model::{}::new", plan.camel()), vec![Expr::ident("value")]),
        ),
        Expr::ident("model")
            .field("dao")
            .assign(Expr::some(dao().method("clone", vec![])))
            .stmt(),
        Expr::ident("model").field("state").method("mark_created", vec![]).stmt(),
        Expr::ident("model")
            .field("state")
            .method("set_saved", vec![Expr::ident("model").field("value").reference()])
            .stmt(),
    ];
    let mut memo = "_relations";
    for (member, relation) in loaded_relations(plan) {
        to_model.push(loader(plan, plans, member, relation)?);
        memo = "relations";
    }
    to_model.push(Expr::ident("model").tail());
    let relations_new = format!("model::{}::new", model_gen::relations_name(plan));

    Ok(vec![
        FnDecl::new("to_model")
            .doc("A stored model bound to this repository.")
            .receiver(Receiver::Ref)
            .param("value", plan.layer_type("entity"))
            .param(memo, relations.reference())
            .returns(model.clone())
            .body(to_model),
        FnDecl::new("to_single")
            .receiver(Receiver::Ref)
            .param("value", plan.layer_type("entity"))
            .returns(model)
            .body(vec![
                Stmt::let_(
                    "relations",
                    Expr::call(
                        "::std::sync::Arc::new",
                        vec![Expr::call(
                            &relations_new,
                            vec![Expr::call("::std::slice::from_ref", vec![Expr::ident("value").reference()])],
                        )],
                    ),
                ),
                Expr::self_()
                    .method("to_model", vec![Expr::ident("value"), Expr::ident("relations").reference()])
                    .tail(),
            ]),
        FnDecl::new("to_models")
            .doc("Models sharing one relation memo, so each relation loads once for the whole collection.")
            .receiver(Receiver::Ref)
            .param("values", plan.layer_collection("entity"))
            .returns(plan.layer_collection("model"))
            .body(vec![
                Stmt::let_(
                    "relations",
                    Expr::call(
                        "::std::sync::Arc::new",
                        vec![Expr::call(&relations_new, vec![Expr::ident("values").reference()])],
                    ),
                ),
                Expr::ident("values")
                    .method("into_iter", vec![])
                    .method(
                        "map",
                        vec![Expr::closure(
                            vec!["v"],
                            Expr::self_()
                                .method("to_model", vec![Expr::ident("v"), Expr::ident("relations").reference()]),
                        )],
                    )
                    .method("collect", vec![])
                    .tail(),
            ]),
    ])
}

pub fn generate(plan: &EntityPlan, plans: &Plans, layout: &Layout) -> Result<Module> {
    let snake = plan.snake();
    let trait_name = trait_name(plan);
    let impl_name = impl_name(plan);
    let finder = format!("model::{}", model_gen::finder_name(plan));
    let mut module = Module::new(format!("{GENERATED_HEADER}\n\nRepository of `{snake}`."));
    module.allow = vec!["dead_code".into(), "unused_imports".into()];
    module.uses(&layout.uses(&["dao", "entity", "model"]));
    module.uses("super::Repository");

    module.push(Item::Trait(TraitDef {
        name: trait_name.clone(),
        vis: Visibility::Public,
        doc: Some(format!("Model-level operations of `{snake}`.")),
        supertraits: vec![Type::path(&finder)],
        methods: repository_methods(plan).map(|d| signature(plan, d)).collect(),
    }));
    let dao_handle = Type::path(&format!("dao::{}Dao", plan.camel())).dyn_().arc();
    let root = Type::generic("::std::sync::Weak", vec![Type::path("Repository")]);
    module.push(Item::Struct(StructDef {
        name: impl_name.clone(),
        vis: Visibility::Public,
        doc: None,
        attrs: Vec::new(),
        fields: vec![Field::new("dao", dao_handle.clone()), Field::new("root", root.clone())],
    }));

    let new = FnDecl::new("new")
        .public()
        .param("dao", dao_handle)
        .param("root", root)
        .returns(Type::SelfType)
        .body(vec![
            Expr::struct_lit("Self", vec![("dao", Expr::ident("dao")), ("root", Expr::ident("root"))]).tail(),
        ]);
    module.push(Item::Impl(
        ImplDef::inherent(Type::path(&impl_name))
            .func(new)
            .funcs(conversions(plan, plans)?),
    ));

    let implemented = |decls: Vec<&MethodDecl>| -> Vec<FnDecl> {
        decls
            .into_iter()
            .map(|d| {
                let mut method = signature(plan, d).body(body(d));
                method.doc = None;
                method
            })
            .collect()
    };
    module.push(Item::Impl(
        ImplDef::of_trait(Type::path(&finder), Type::path(&impl_name))
            .funcs(implemented(plan.finder_methods().collect())),
    ));
    module.push(Item::Impl(
        ImplDef::of_trait(Type::path(&trait_name), Type::path(&impl_name))
            .funcs(implemented(repository_methods(plan).collect())),
    ));
    Ok(module)
}

/// `repository/mod.rs`: every entity module plus the root `Repository`.
pub fn generate_root(plans: &Plans, layout: &Layout) -> Result<Module> {
    let mut module = layer_mod(plans, |plan| vec![trait_name(plan), impl_name(plan)]);
    module.uses(&layout.uses(&["dao"]));

    let mut params = Vec::new();
    let mut seen = HashSet::new();
    for plan in plans.iter() {
        for arg in &plan.constructor()?.args {
            if seen.insert(arg.name.clone()) {
                params.push(arg.clone());
            }
        }
    }

    let mut fields = Vec::new();
    let mut wiring = Vec::new();
    let mut accessors = Vec::new();
    for plan in plans.iter() {
        let snake = plan.snake();
        let impl_path = format!("{snake}::{}", impl_name(plan));
        fields.push(Field::new(&snake, Type::path(&impl_path)));
        let args = plan
            .constructor()?
            .args
            .iter()
            .map(|arg| {
                let passed = params.iter().find(|p| p.name == arg.name).unwrap_or(arg);
                if decl::is_copy(passed) {
                    Expr::ident(&arg.name)
                } else {
                    Expr::ident(&arg.name).method("clone", vec![])
                }
            })
            .collect();
        let dao = Expr::call(&format!("dao::new_{snake}_dao"), args);
        wiring.push((
            snake.clone(),
            Expr::call(
                &format!("{impl_path}::new"),
                vec![dao, Expr::ident("root").method("clone", vec![])],
            ),
        ));
        accessors.push(
            FnDecl::new(&snake)
                .public()
                .receiver(Receiver::Ref)
                .returns(Type::path(&trait_name(plan)).dyn_().reference())
                .body(vec![Expr::self_().field(&snake).reference().tail()]),
        );
    }

    module.push(Item::Struct(StructDef {
        name: "Repository".into(),
        vis: Visibility::Public,
        doc: Some("Every entity repository, built over one set of data-access handles.".into()),
        attrs: Vec::new(),
        fields,
    }));
    let build = Expr::Closure {
        is_move: false,
        params: vec![ClosureParam {
            pat: Pat::ident("root"),
            ty: None,
        }],
        ret: None,
        body: Box::new(Expr::Struct {
            path: Path::parse("Self"),
            fields: wiring,
            rest: None,
        }),
    };
    let mut new = FnDecl::new("new")
        .public()
        .doc("Build every repository. Relation loaders reach sibling repositories through the returned handle.");
    for param in &params {
        new = new.param(&param.name, param.ty.clone());
    }
    let new = new
        .returns(Type::SelfType.arc())
        .body(vec![Expr::call("::std::sync::Arc::new_cyclic", vec![build]).tail()]);
    module.push(Item::Impl(ImplDef::inherent(Type::path("Repository")).func(new).funcs(accessors)));
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Class, Member, Name, TypeRef};
    use crate::generate::Generator;
    use crate::ir::RustPrinter;
    use crate::plugin::{HookConfig, PluginRegistry};

    fn customer() -> Class {
        let mut class = Class::new("customer");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("name", TypeRef::parse("string")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    fn order(nullable_customer: bool) -> Class {
        let mut class = Class::new("order");
        let mut customer_id = Member::new("customer_id", TypeRef::parse("u64"));
        customer_id.nullable = nullable_customer;
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            customer_id,
            Member::relation(
                "customer",
                Relation {
                    to: Name::new("customer"),
                    internal: Some(Name::new("customer_id")),
                    external: Some(Name::new("id")),
                    ..Relation::default()
                },
            ),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    fn plans(registry: &PluginRegistry, classes: Vec<Class>) -> Plans {
        Generator::new(registry).plan(classes).unwrap()
    }

    fn print(classes: Vec<Class>, entity: &str) -> String {
        let registry = PluginRegistry::with_defaults();
        let plans = plans(&registry, classes);
        let plan = plans.get(&Name::new(entity)).unwrap();
        RustPrinter::new("repository.rs")
            .print(&generate(plan, &plans, &Layout::default()).unwrap())
            .unwrap()
    }

    #[test]
    fn test_trait_splits_finder_methods() {
        let out = print(vec![customer(), order(false)], "customer");
        assert!(out.contains("pub trait CustomerRepository: model::CustomerFinder {"), "{out}");
        assert!(out.contains("impl model::CustomerFinder for CustomerRepositoryImpl {"), "{out}");
        let trait_block = &out[out.find("pub trait CustomerRepository").unwrap()..out.find("pub struct").unwrap()];
        assert!(!trait_block.contains("fn find_all"), "{trait_block}");
        assert!(!trait_block.contains("fn find_by_ids"), "{trait_block}");
        assert!(trait_block.contains("fn find_by_id("), "{trait_block}");
    }

    #[test]
    fn test_lifecycle_goes_through_the_model() {
        let out = print(vec![customer(), order(false)], "customer");
        assert!(out.contains("value: &mut model::Customer"), "{out}");
        assert!(out.contains("value.dao = Some(self.dao.clone());"), "{out}");
        assert!(out.contains("value.update(ctx)"), "{out}");
        assert!(out.contains("self.dao.delete(ctx, &value.value)"), "{out}");
        assert!(out.contains("Ok(value.map(|v| self.to_single(v)))"), "{out}");
    }

    #[test]
    fn test_loader_reaches_sibling_through_root() {
        let out = print(vec![customer(), order(false)], "order");
        assert!(out.contains("let key = model.value.customer_id.clone();"), "{out}");
        assert!(out.contains("let load: ::kiln::Loader<Option<model::Customer>> = ::std::sync::Arc::new("), "{out}");
        assert!(out.contains("move |ctx: &::kiln::Context| {"), "{out}");
        assert!(out.contains("relations.find_customer(ctx, key, &repo.customer)"), "{out}");
        assert!(out.contains("model.customer_loader = Some(load);"), "{out}");
    }

    #[test]
    fn test_nullable_key_skips_lookup() {
        let out = print(vec![customer(), order(true)], "order");
        assert!(out.contains("match &key {"), "{out}");
        assert!(out.contains("Some(key) => relations.find_customer(ctx, *key, &repo.customer),"), "{out}");
        assert!(out.contains("None => Ok(Default::default()),"), "{out}");
    }

    #[test]
    fn test_relation_memo_is_named_only_when_loaders_use_it() {
        let out = print(vec![customer(), order(false)], "customer");
        assert!(out.contains("_relations: &::std::sync::Arc<model::CustomersRelations>"), "{out}");
        let out = print(vec![customer(), order(false)], "order");
        assert!(out.contains("relations: &::std::sync::Arc<model::OrdersRelations>"), "{out}");
        assert!(!out.contains("_relations"), "{out}");
    }

    #[test]
    fn test_root_dedupes_constructor_arguments() {
        let registry = PluginRegistry::with_defaults();
        let mut user_order = order(false);
        user_order.name = Name::new("user_order");
        user_order.members.push(Member::new("user_id", TypeRef::parse("u64")));
        let config: HookConfig = toml::from_str("\"constructor-declare\" = \"user-id\"").unwrap();
        let plans = Generator::new(&registry).hooks("sql", config).plan(vec![customer(), user_order]).unwrap();
        let out = RustPrinter::new("repository/mod.rs")
            .print(&generate_root(&plans, &Layout::default()).unwrap())
            .unwrap();
        assert!(out.contains("pub struct Repository {"), "{out}");
        assert_eq!(out.matches("executor: ::std::sync::Arc<dyn ::kiln::sql::Executor>").count(), 1, "{out}");
        assert!(out.contains("user_id: u64"), "{out}");
        assert!(out.contains("dao::new_user_order_dao(executor.clone(), user_id)"), "{out}");
        assert!(out.contains("::std::sync::Arc::new_cyclic(|root| Self {"), "{out}");
        assert!(out.contains("pub fn customer(&self) -> &dyn CustomerRepository {"), "{out}");
    }
}
