//! Domain-model layer.
//!
//! The model wraps an entity value with its data-access handle, lazily loaded relations and save state.
//! The collection type carries the in-memory query surface mirroring the key reduction of the data-access
//! layer (`first_by_*` / `filter_by_*` instead of `find_by_*`). Relations of a loaded collection share one
//! `<Plural>Relations` memo, so a relation is fetched with a single plural lookup for the whole collection.

use super::decl::{self, ArgKind, MethodDecl, ReturnTypes};
use super::keys;
use super::{EntityPlan, GENERATED_HEADER, Layout, Plans, layer_mod, render, types};
use crate::entity::{Member, Name, PrimitiveKind, Relation, TypeRef};
use crate::error::{Error, Result};
use crate::ir::{
    Arm, Attribute, BinOp, Expr, Field, FnDecl, ImplDef, Item, Module, Pat, Receiver, Stmt, StructDef,
    TraitDef, Type, Visibility,
};
use crate::plugin::Operation;

fn ctx_type() -> Type {
    Type::path("::kiln::Context").reference()
}

fn ctx() -> Expr {
    Expr::ident("ctx")
}

/// Model type of the entity `name`, as seen from inside the model layer.
fn model_of(name: &Name) -> Type {
    Type::path(&format!("model::{}", name.camel()))
}

fn models_of(name: &Name) -> Type {
    Type::path(&format!("model::{}", name.plural_camel()))
}

/// Value type a relation accessor returns.
pub fn relation_type(member: &Member, relation: &Relation) -> Type {
    if member.is_collection() {
        models_of(&relation.to)
    } else {
        model_of(&relation.to).option()
    }
}

/// Relations with a generated loader, everything but `custom`.
pub fn loaded_relations(plan: &EntityPlan) -> impl Iterator<Item = (&Member, &Relation)> {
    plan.class
        .relation_members()
        .filter_map(|m| m.relation.as_ref().map(|r| (m, r)))
        .filter(|(_, r)| !r.custom)
}

fn custom_relations(plan: &EntityPlan) -> impl Iterator<Item = (&Member, &Relation)> {
    plan.class
        .relation_members()
        .filter_map(|m| m.relation.as_ref().map(|r| (m, r)))
        .filter(|(_, r)| r.custom)
}

pub fn loader_field(member: &Member) -> String {
    format!("{}_loader", member.name.snake())
}

pub fn relations_name(plan: &EntityPlan) -> String {
    format!("{}Relations", plan.plural_camel())
}

pub fn finder_name(plan: &EntityPlan) -> String {
    format!("{}Finder", plan.camel())
}

/// Field type of a model-only member: nested entity values or plain extend values.
fn model_member_type(entity: &str, member: &Member) -> Result<Type> {
    match &member.ty {
        Some(TypeRef::Class(name)) if member.has_many => Ok(models_of(name)),
        Some(TypeRef::Class(name)) => Ok(Type::generic("Box", vec![model_of(name)]).option()),
        _ => types::member_type(entity, member),
    }
}

fn dao_trait(plan: &EntityPlan) -> Type {
    Type::path(&format!("dao::{}Dao", plan.camel()))
}

fn model_struct(plan: &EntityPlan) -> Result<Item> {
    let entity = plan.snake();
    let mut fields = vec![Field::new("value", plan.layer_type("entity")).public()];
    for member in plan.class.model_members() {
        let mut field = Field::new(&member.name.snake(), model_member_type(&entity, member)?).public();
        field.doc = member.desc.clone();
        fields.push(field);
    }
    fields.push(
        Field::new("dao", dao_trait(plan).dyn_().arc().option())
            .public()
            .doc("Handle used by the lifecycle methods; models built by hand start detached."),
    );
    for (member, relation) in loaded_relations(plan) {
        fields.push(
            Field::new(
                &loader_field(member),
                Type::generic("::kiln::Loader", vec![relation_type(member, relation)]).option(),
            )
            .public(),
        );
    }
    fields.push(Field::new("state", Type::generic("::kiln::SaveState", vec![plan.layer_type("entity")])).public());
    Ok(Item::Struct(StructDef {
        name: plan.camel(),
        vis: Visibility::Public,
        doc: Some(format!("A `{entity}` with its relations and save state.")),
        attrs: vec![Attribute::derive(&["Clone", "Default"])],
        fields,
    }))
}

fn debug_impl(plan: &EntityPlan) -> Item {
    let mut chain = Expr::ident("f").method("debug_struct", vec![Expr::str(plan.camel())]);
    let shown = std::iter::once("value".to_string()).chain(plan.class.model_members().map(|m| m.name.snake()));
    for name in shown {
        chain = chain.method("field", vec![Expr::str(&name), Expr::self_().field(&name).reference()]);
    }
    let fmt = FnDecl::new("fmt")
        .receiver(Receiver::Ref)
        .param(
            "f",
            Type::generic("::std::fmt::Formatter", vec![Type::Lifetime("'_".into())]).reference_mut(),
        )
        .returns(Type::path("::std::fmt::Result"))
        .body(vec![chain.method("finish_non_exhaustive", vec![]).tail()]);
    Item::Impl(ImplDef::of_trait(Type::path("::std::fmt::Debug"), Type::path(&plan.camel())).func(fmt))
}

fn deref_impls(plan: &EntityPlan) -> Vec<Item> {
    let model = Type::path(&plan.camel());
    let target = Type::path("Self::Target");
    vec![
        Item::Impl(
            ImplDef::of_trait(Type::path("::std::ops::Deref"), model.clone())
                .assoc_type("Target", plan.layer_type("entity"))
                .func(
                    FnDecl::new("deref")
                        .receiver(Receiver::Ref)
                        .returns(target.clone().reference())
                        .body(vec![Expr::self_().field("value").reference().tail()]),
                ),
        ),
        Item::Impl(
            ImplDef::of_trait(Type::path("::std::ops::DerefMut"), model).func(
                FnDecl::new("deref_mut")
                    .receiver(Receiver::RefMut)
                    .returns(target.reference_mut())
                    .body(vec![Expr::self_().field("value").reference_mut().tail()]),
            ),
        ),
    ]
}

/// Arguments a lifecycle method forwards to the data-access method `decl`.
fn lifecycle_args(plan: &EntityPlan, decl: &MethodDecl) -> Result<Vec<Expr>> {
    decl.args
        .iter()
        .map(|arg| match &arg.kind {
            ArgKind::Context => Ok(ctx()),
            ArgKind::Entity { mutable: true } => Ok(Expr::self_().field("value").reference_mut()),
            ArgKind::Entity { mutable: false } => Ok(Expr::self_().field("value").reference()),
            _ => Err(Error::generation(
                plan.snake(),
                format!("'{}' takes '{}', which a model cannot supply", decl.snake(), arg.name),
            )),
        })
        .collect()
}

/// `dao.<method>(..).map_err(|e| e.wrap("failed to <Camel>"))`
fn dao_call(plan: &EntityPlan, decl: &MethodDecl) -> Result<Expr> {
    let wrap = Expr::closure(
        vec!["e"],
        Expr::ident("e").method("wrap", vec![Expr::str(format!("failed to {}", decl.name.camel()))]),
    );
    Ok(Expr::ident("dao")
        .method(&decl.snake(), lifecycle_args(plan, decl)?)
        .method("map_err", vec![wrap]))
}

fn state() -> Expr {
    Expr::self_().field("state")
}

fn lifecycle(plan: &EntityPlan) -> Result<Vec<FnDecl>> {
    let entity = plan.snake();
    let unit = Type::unit().kiln_result();
    let take_dao = Stmt::let_("dao", Expr::self_().method("dao_handle", vec![]).try_());
    let mut methods = vec![
        FnDecl::new("dao_handle")
            .receiver(Receiver::Ref)
            .returns(dao_trait(plan).dyn_().arc().kiln_result())
            .body(vec![
                Expr::self_()
                    .field("dao")
                    .method("clone", vec![])
                    .method(
                        "ok_or_else",
                        vec![Expr::closure(vec![], Expr::call("::kiln::Error::detached", vec![Expr::str(&entity)]))],
                    )
                    .tail(),
            ]),
    ];
    let create = plan.method(Operation::Create);
    let update = plan.method(Operation::Update);
    if let Some(decl) = create {
        methods.push(
            FnDecl::new("create")
                .public()
                .doc("Insert the model. A model is created at most once.")
                .receiver(Receiver::RefMut)
                .param("ctx", ctx_type())
                .returns(unit.clone())
                .body(vec![
                    Expr::if_(
                        state().method("is_already_created", vec![]),
                        vec![Expr::ret(Expr::call(
                            "Err",
                            vec![Expr::call("::kiln::Error::already_created", vec![Expr::str(&entity)])],
                        ))
                        .stmt()],
                    )
                    .stmt(),
                    take_dao.clone(),
                    dao_call(plan, decl)?.try_().stmt(),
                    state().method("mark_created", vec![]).stmt(),
                    state()
                        .method("set_saved", vec![Expr::self_().field("value").reference()])
                        .stmt(),
                    Expr::ok_unit().tail(),
                ]),
        );
    }
    if let Some(decl) = update {
        methods.push(
            FnDecl::new("update")
                .public()
                .doc("Store the model; nothing is written when it equals the last saved snapshot.")
                .receiver(Receiver::RefMut)
                .param("ctx", ctx_type())
                .returns(unit.clone())
                .body(vec![
                    Expr::if_(
                        state()
                            .method("needs_update", vec![Expr::self_().field("value").reference()])
                            .not(),
                        vec![Expr::ret(Expr::ok_unit()).stmt()],
                    )
                    .stmt(),
                    take_dao.clone(),
                    dao_call(plan, decl)?.try_().stmt(),
                    state()
                        .method("set_saved", vec![Expr::self_().field("value").reference()])
                        .stmt(),
                    Expr::ok_unit().tail(),
                ]),
        );
    }
    if let Some(decl) = plan.method(Operation::Delete) {
        methods.push(
            FnDecl::new("delete")
                .public()
                .receiver(Receiver::Ref)
                .param("ctx", ctx_type())
                .returns(unit.clone())
                .body(vec![take_dao, dao_call(plan, decl)?.tail()]),
        );
    }
    if create.is_some() && update.is_some() {
        methods.push(
            FnDecl::new("save")
                .public()
                .doc("Update when the model was created already, create it otherwise.")
                .receiver(Receiver::RefMut)
                .param("ctx", ctx_type())
                .returns(unit)
                .body(vec![
                    Expr::if_else(
                        state().method("is_already_created", vec![]),
                        vec![Expr::self_().method("update", vec![ctx()]).tail()],
                        vec![Expr::self_().method("create", vec![ctx()]).tail()],
                    )
                    .tail(),
                ]),
        );
    }
    Ok(methods)
}

fn relation_accessors(plan: &EntityPlan) -> Vec<FnDecl> {
    let entity = plan.snake();
    loaded_relations(plan)
        .map(|(member, relation)| {
            let name = member.name.snake();
            let body = Expr::match_(
                Expr::self_().field(&loader_field(member)).reference(),
                vec![
                    Arm::new(
                        Pat::some(Pat::ident("load")),
                        Expr::Call {
                            func: Box::new(Expr::ident("load")),
                            args: vec![ctx()],
                        },
                    ),
                    Arm::new(
                        Pat::Path(crate::ir::Path::parse("None")),
                        Expr::call(
                            "Err",
                            vec![Expr::call("::kiln::Error::unresolved", vec![Expr::str(&entity), Expr::str(&name)])],
                        ),
                    ),
                ],
            );
            FnDecl::new(&name)
                .public()
                .doc(format!("The `{}` related through `{name}`, loaded on first use.", relation.to.snake()))
                .receiver(Receiver::Ref)
                .param("ctx", ctx_type())
                .returns(relation_type(member, relation).kiln_result())
                .body(vec![body.tail()])
        })
        .collect()
}

fn custom_trait(plan: &EntityPlan) -> Option<Item> {
    let methods: Vec<FnDecl> = custom_relations(plan)
        .map(|(member, relation)| {
            FnDecl::new(&member.name.snake())
                .receiver(Receiver::Ref)
                .param("ctx", ctx_type())
                .returns(relation_type(member, relation).kiln_result())
        })
        .collect();
    if methods.is_empty() {
        return None;
    }
    Some(Item::Trait(TraitDef {
        name: format!("{}CustomRelations", plan.camel()),
        vis: Visibility::Public,
        doc: Some(format!("Hand-written relations of `{}`.", plan.snake())),
        supertraits: Vec::new(),
        methods,
    }))
}

fn finder_trait(plan: &EntityPlan) -> Item {
    let returns = ReturnTypes {
        one: Type::path(&plan.camel()),
        many: Type::path(&plan.plural_camel()),
    };
    Item::Trait(TraitDef {
        name: finder_name(plan),
        vis: Visibility::Public,
        doc: Some(format!("Lookups relations of other entities load `{}` through.", plan.snake())),
        supertraits: vec![Type::path("Send"), Type::path("Sync")],
        methods: plan
            .finder_methods()
            .map(|d| d.signature(returns.of(d.returns).kiln_result()))
            .collect(),
    })
}

fn collection_struct(plan: &EntityPlan) -> Item {
    Item::Struct(StructDef {
        name: plan.plural_camel(),
        vis: Visibility::Public,
        doc: Some(format!("An ordered collection of `{}` models.", plan.snake())),
        attrs: vec![Attribute::derive(&["Debug", "Clone", "Default"])],
        fields: vec![Field::new("values", Type::path(&plan.camel()).vec()).public()],
    })
}

fn values() -> Expr {
    Expr::self_().field("values")
}

fn v_field(column: &str) -> Expr {
    Expr::ident("v").field("value").field(column)
}

fn predicate(model: &Type) -> Type {
    Type::fn_mut_trait(vec![model.clone().reference()], Type::path("bool"))
}

fn collection_basics(plan: &EntityPlan) -> Vec<FnDecl> {
    let model = Type::path(&plan.camel());
    let iter = || values().method("iter", vec![]);
    vec![
        FnDecl::new("new")
            .public()
            .param("values", model.clone().vec())
            .returns(Type::SelfType)
            .body(vec![Expr::struct_lit("Self", vec![("values", Expr::ident("values"))]).tail()]),
        FnDecl::new("compact")
            .public()
            .doc("Collect the present values, dropping `None`s.")
            .param("values", model.clone().option().vec())
            .returns(Type::SelfType)
            .body(vec![
                Expr::struct_lit(
                    "Self",
                    vec![(
                        "values",
                        Expr::ident("values")
                            .method("into_iter", vec![])
                            .method("flatten", vec![])
                            .method("collect", vec![]),
                    )],
                )
                .tail(),
            ]),
        FnDecl::new("len")
            .public()
            .receiver(Receiver::Ref)
            .returns(Type::path("usize"))
            .body(vec![values().method("len", vec![]).tail()]),
        FnDecl::new("is_empty")
            .public()
            .receiver(Receiver::Ref)
            .returns(Type::path("bool"))
            .body(vec![values().method("is_empty", vec![]).tail()]),
        FnDecl::new("iter")
            .public()
            .receiver(Receiver::Ref)
            .returns(Type::generic(
                "::std::slice::Iter",
                vec![Type::Lifetime("'_".into()), model.clone()],
            ))
            .body(vec![iter().tail()]),
        FnDecl::new("at")
            .public()
            .receiver(Receiver::Ref)
            .param("idx", Type::path("usize"))
            .returns(model.clone().reference().option())
            .body(vec![values().method("get", vec![Expr::ident("idx")]).tail()]),
        FnDecl::new("first")
            .public()
            .receiver(Receiver::Ref)
            .returns(model.clone().reference().option())
            .body(vec![values().method("first", vec![]).tail()]),
        FnDecl::new("last")
            .public()
            .receiver(Receiver::Ref)
            .returns(model.clone().reference().option())
            .body(vec![values().method("last", vec![]).tail()]),
        FnDecl::new("each")
            .public()
            .receiver(Receiver::Ref)
            .generic("F", vec![Type::fn_mut_trait(vec![model.clone().reference()], Type::unit())])
            .param("f", Type::path("F"))
            .body(vec![iter().method("for_each", vec![Expr::ident("f")]).stmt()]),
        FnDecl::new("map")
            .public()
            .receiver(Receiver::Ref)
            .generic("T", vec![])
            .generic("F", vec![Type::fn_mut_trait(vec![model.clone().reference()], Type::path("T"))])
            .param("f", Type::path("F"))
            .returns(Type::path("T").vec())
            .body(vec![
                iter()
                    .method("map", vec![Expr::ident("f")])
                    .method("collect", vec![])
                    .tail(),
            ]),
        FnDecl::new("any")
            .public()
            .receiver(Receiver::Ref)
            .generic("F", vec![predicate(&model)])
            .param("f", Type::path("F"))
            .returns(Type::path("bool"))
            .body(vec![iter().method("any", vec![Expr::ident("f")]).tail()]),
        FnDecl::new("all")
            .public()
            .receiver(Receiver::Ref)
            .generic("F", vec![predicate(&model)])
            .param("f", Type::path("F"))
            .returns(Type::path("bool"))
            .body(vec![iter().method("all", vec![Expr::ident("f")]).tail()]),
        FnDecl::new("filter")
            .public()
            .doc("Models for which `f` holds, in order.")
            .receiver(Receiver::Ref)
            .generic("F", vec![predicate(&model)])
            .param("f", Type::path("F"))
            .returns(Type::SelfType)
            .body(vec![
                Stmt::let_mut("values", values().method("clone", vec![])),
                Expr::ident("values").method("retain", vec![Expr::ident("f")]).stmt(),
                Expr::struct_lit("Self", vec![("values", Expr::ident("values"))]).tail(),
            ]),
        FnDecl::new("find")
            .public()
            .doc("The first model for which `f` holds.")
            .receiver(Receiver::Ref)
            .generic("F", vec![predicate(&model)])
            .param("f", Type::path("F"))
            .returns(model.clone().reference().option())
            .body(vec![
                iter()
                    .method("position", vec![Expr::ident("f")])
                    .method(
                        "map",
                        vec![Expr::closure(vec!["idx"], values().index(Expr::ident("idx")).reference())],
                    )
                    .tail(),
            ]),
        FnDecl::new("sort")
            .public()
            .receiver(Receiver::RefMut)
            .generic(
                "F",
                vec![Type::fn_mut_trait(
                    vec![model.clone().reference(), model.clone().reference()],
                    Type::path("::std::cmp::Ordering"),
                )],
            )
            .param("f", Type::path("F"))
            .body(vec![values().method("sort_unstable_by", vec![Expr::ident("f")]).stmt()]),
        FnDecl::new("sort_stable")
            .public()
            .receiver(Receiver::RefMut)
            .generic(
                "F",
                vec![Type::fn_mut_trait(
                    vec![model.clone().reference(), model.clone().reference()],
                    Type::path("::std::cmp::Ordering"),
                )],
            )
            .param("f", Type::path("F"))
            .body(vec![values().method("sort_by", vec![Expr::ident("f")]).stmt()]),
        FnDecl::new("add")
            .public()
            .receiver(Receiver::RefMut)
            .param("value", model)
            .body(vec![values().method("push", vec![Expr::ident("value")]).stmt()]),
        FnDecl::new("merge")
            .public()
            .receiver(Receiver::RefMut)
            .param("other", Type::SelfType)
            .body(vec![values().method("extend", vec![Expr::ident("other").field("values")]).stmt()]),
    ]
}

/// Columns whose values have a total order, usable as set and map keys.
fn is_orderable(member: &Member) -> bool {
    !types::is_custom(member) && !matches!(types::kind(member), Some(PrimitiveKind::F32 | PrimitiveKind::F64))
}

fn column_methods(plan: &EntityPlan) -> Result<Vec<FnDecl>> {
    let entity = plan.snake();
    let mut methods = Vec::new();
    for member in plan.class.columns() {
        let column = member.name.snake();
        let ty = types::member_type(&entity, member)?;
        methods.push(
            FnDecl::new(&member.name.plural_snake())
                .public()
                .doc(format!("Every `{column}`, in order."))
                .receiver(Receiver::Ref)
                .returns(ty.clone().vec())
                .body(vec![
                    values()
                        .method("iter", vec![])
                        .method("map", vec![Expr::closure(vec!["v"], v_field(&column).method("clone", vec![]))])
                        .method("collect", vec![])
                        .tail(),
                ]),
        );
        if !is_orderable(member) {
            continue;
        }
        methods.push(
            FnDecl::new(&format!("unique_by_{column}"))
                .public()
                .doc(format!("The first model of every distinct `{column}`."))
                .receiver(Receiver::Ref)
                .returns(Type::SelfType)
                .body(vec![
                    Stmt::let_mut("seen", Expr::call("::std::collections::BTreeSet::new", vec![])),
                    Expr::struct_lit(
                        "Self",
                        vec![(
                            "values",
                            values()
                                .method("iter", vec![])
                                .method(
                                    "filter",
                                    vec![Expr::closure(
                                        vec!["v"],
                                        Expr::ident("seen")
                                            .method("insert", vec![v_field(&column).method("clone", vec![])]),
                                    )],
                                )
                                .method("cloned", vec![])
                                .method("collect", vec![]),
                        )],
                    )
                    .tail(),
                ]),
        );
        let groups = Type::generic("::std::collections::BTreeMap", vec![ty, Type::SelfType]);
        methods.push(
            FnDecl::new(&format!("group_by_{column}"))
                .public()
                .receiver(Receiver::Ref)
                .returns(groups.clone())
                .body(vec![
                    Stmt::Let {
                        pat: Pat::ident_mut("groups"),
                        ty: Some(groups),
                        init: Some(Expr::call("::std::collections::BTreeMap::new", vec![])),
                    },
                    Expr::for_in(
                        Pat::ident("v"),
                        values().reference(),
                        vec![
                            Expr::ident("groups")
                                .method("entry", vec![v_field(&column).method("clone", vec![])])
                                .method("or_default", vec![])
                                .method("add", vec![Expr::ident("v").method("clone", vec![])])
                                .stmt(),
                        ],
                    )
                    .stmt(),
                    Expr::ident("groups").tail(),
                ]),
        );
    }
    Ok(methods)
}

/// `first_by_*` and `filter_by_*` over the reduced key groups.
fn key_methods(plan: &EntityPlan) -> Result<Vec<FnDecl>> {
    let class = &plan.class;
    let model = Type::path(&plan.camel());
    let mut methods = Vec::new();
    for method in keys::reduce(class)? {
        if method.plural {
            let arg = decl::plural_arg(class, method.members[0])?;
            let member = method.members[0];
            let field = v_field(&member.name.snake());
            let cond = if member.nullable {
                field.method("as_ref", vec![]).method(
                    "is_some_and",
                    vec![Expr::closure(
                        vec!["k"],
                        Expr::ident(&arg.name).method("contains", vec![Expr::ident("k")]),
                    )],
                )
            } else {
                Expr::ident(&arg.name).method("contains", vec![field.reference()])
            };
            methods.push(
                FnDecl::new(&method.name("filter_by").snake())
                    .public()
                    .receiver(Receiver::Ref)
                    .param(&arg.name, arg.ty)
                    .returns(Type::SelfType)
                    .body(vec![
                        Expr::self_()
                            .method("filter", vec![Expr::closure(vec!["v"], cond)])
                            .tail(),
                    ]),
            );
            continue;
        }
        let mut cond: Option<Expr> = None;
        let mut params = Vec::new();
        for member in &method.members {
            let arg = decl::key_arg(class, member)?;
            let test = types::key_matches(member, v_field(&member.name.snake()), &arg.name);
            cond = Some(match cond {
                Some(prev) => prev.binary(BinOp::And, test),
                None => test,
            });
            params.push(arg);
        }
        let Some(cond) = cond else {
            continue;
        };
        for (verb, find) in [("first_by", true), ("filter_by", false)] {
            let mut decl = FnDecl::new(&method.name(verb).snake()).public().receiver(Receiver::Ref);
            for arg in &params {
                decl = decl.param(&arg.name, arg.ty.clone());
            }
            let (ret, call) = if find {
                (model.clone().reference().option(), "find")
            } else {
                (Type::SelfType, "filter")
            };
            methods.push(decl.returns(ret).body(vec![
                Expr::self_()
                    .method(call, vec![Expr::closure(vec!["v"], cond.clone())])
                    .tail(),
            ]));
        }
    }
    Ok(methods)
}

fn bulk_lifecycle(plan: &EntityPlan) -> Vec<FnDecl> {
    let mut verbs = Vec::new();
    let create = plan.method(Operation::Create).is_some();
    let update = plan.method(Operation::Update).is_some();
    if create {
        verbs.push("create");
    }
    if update {
        verbs.push("update");
    }
    if create && update {
        verbs.push("save");
    }
    verbs
        .into_iter()
        .map(|verb| {
            FnDecl::new(&format!("{verb}_all"))
                .public()
                .doc(format!("Run `{verb}` on every model, stopping at the first failure."))
                .receiver(Receiver::RefMut)
                .param("ctx", ctx_type())
                .returns(Type::unit().kiln_result())
                .body(vec![
                    Expr::for_in(
                        Pat::ident("v"),
                        values().reference_mut(),
                        vec![Expr::ident("v").method(verb, vec![ctx()]).try_().stmt()],
                    )
                    .stmt(),
                    Expr::ok_unit().tail(),
                ])
        })
        .collect()
}

fn collection_traits(plan: &EntityPlan) -> Vec<Item> {
    let model = Type::path(&plan.camel());
    let collection = Type::path(&plan.plural_camel());
    vec![
        Item::Impl(
            ImplDef::of_trait(Type::path("IntoIterator"), collection.clone())
                .assoc_type("Item", model.clone())
                .assoc_type("IntoIter", Type::generic("::std::vec::IntoIter", vec![model.clone()]))
                .func(
                    FnDecl::new("into_iter")
                        .receiver(Receiver::Value)
                        .returns(Type::path("Self::IntoIter"))
                        .body(vec![values().method("into_iter", vec![]).tail()]),
                ),
        ),
        Item::Impl(
            ImplDef::of_trait(Type::generic("FromIterator", vec![model.clone()]), collection).func(
                FnDecl::new("from_iter")
                    .generic(
                        "I",
                        vec![Type::generic("IntoIterator", vec![Type::binding("Item", model)])],
                    )
                    .param("iter", Type::path("I"))
                    .returns(Type::SelfType)
                    .body(vec![
                        Expr::struct_lit(
                            "Self",
                            vec![("values", Expr::ident("iter").method("into_iter", vec![]).method("collect", vec![]))],
                        )
                        .tail(),
                    ]),
            ),
        ),
    ]
}

/// Join members of a pairing relation: the internal member here and the external one on the target.
pub(crate) fn join_members<'a>(
    plan: &'a EntityPlan,
    plans: &'a Plans,
    member: &Member,
    relation: &Relation,
) -> Result<Option<(&'a Member, &'a Member)>> {
    let Some((internal, external)) = relation.join() else {
        return Ok(None);
    };
    let entity = plan.snake();
    let target = plans.get(&relation.to)?;
    let internal = plan.class.member_by_name(internal.as_str()).ok_or_else(|| {
        Error::generation(&entity, format!("relation '{}' joins on unknown '{internal}'", member.name))
    })?;
    let external = target.class.member_by_name(external.as_str()).ok_or_else(|| {
        Error::generation(&entity, format!("relation '{}' joins on unknown '{}.{external}'", member.name, relation.to))
    })?;
    Ok(Some((internal, external)))
}

pub fn keys_field(member: &Member) -> String {
    format!("{}_keys", member.name.snake())
}

/// The memo shared by a loaded collection: join keys of every relation and the lazily fetched targets.
fn relations_items(plan: &EntityPlan, plans: &Plans) -> Result<Vec<Item>> {
    let entity = plan.snake();
    let name = relations_name(plan);
    let mut fields = Vec::new();
    let mut keys = Vec::new();
    let mut finders = Vec::new();
    for (member, relation) in loaded_relations(plan) {
        let field = member.name.snake();
        let target = plans.get(&relation.to)?;
        let loaded = models_of(&relation.to);
        fields.push(Field::new(&field, Type::generic("::kiln::RelationCell", vec![loaded])));
        let finder = Type::path(&format!("model::{}", finder_name(target))).dyn_().reference();
        let mut find = FnDecl::new(&format!("find_{field}"))
            .public()
            .receiver(Receiver::Ref)
            .param("ctx", ctx_type());

        let Some((internal, external)) = join_members(plan, plans, member, relation)? else {
            let load = Expr::ident("finder").method("find_all", vec![ctx()]);
            finders.push(
                find.param("finder", finder)
                    .returns(relation_type(member, relation).kiln_result())
                    .body(vec![
                        Stmt::let_(
                            "loaded",
                            Expr::self_()
                                .field(&field)
                                .method("get_or_load", vec![Expr::closure(vec![], load)])
                                .try_(),
                        ),
                        Expr::ok(Expr::ident("loaded").method("clone", vec![])).tail(),
                    ]),
            );
            continue;
        };

        let keys_name = keys_field(member);
        fields.push(Field::new(&keys_name, types::inner_type(&target.snake(), external)?.vec()));
        let pick = if internal.nullable { "filter_map" } else { "map" };
        let collected = Expr::ident("values")
            .method("iter", vec![])
            .method(
                pick,
                vec![Expr::closure(
                    vec!["v"],
                    Expr::ident("v").field(&internal.name.snake()).method("clone", vec![]),
                )],
            );
        keys.push((keys_name.clone(), Expr::call("::kiln::relation::unique_keys", vec![collected])));

        let by = target.finder_by(&external.name)?;
        if by.key_args().count() != 1 || by.args.len() != 2 {
            return Err(Error::generation(
                &entity,
                format!("relation '{}' loads through '{}', which takes extra arguments", member.name, by.snake()),
            ));
        }
        let load = Expr::ident("finder").method(
            &by.snake(),
            vec![ctx(), Expr::self_().field(&keys_name).reference()],
        );
        let test = types::inner_matches(external, v_field(&external.name.snake()), "key");
        let matched = Expr::ident("loaded").method("iter", vec![]);
        let result = if member.is_collection() {
            matched
                .method("filter", vec![Expr::closure(vec!["v"], test)])
                .method("cloned", vec![])
                .method("collect", vec![])
        } else {
            matched
                .method("find", vec![Expr::closure(vec!["v"], test)])
                .method("cloned", vec![])
        };
        find = find
            .param("key", types::inner_arg_type(&target.snake(), external)?)
            .param("finder", finder)
            .returns(relation_type(member, relation).kiln_result())
            .body(vec![
                Stmt::let_(
                    "loaded",
                    Expr::self_()
                        .field(&field)
                        .method("get_or_load", vec![Expr::closure(vec![], load)])
                        .try_(),
                ),
                Expr::ok(result).tail(),
            ]);
        finders.push(find);
    }

    let init = if keys.is_empty() {
        Expr::call("Self::default", vec![])
    } else {
        Expr::Struct {
            path: crate::ir::Path::parse("Self"),
            fields: keys,
            rest: Some(Box::new(Expr::call("Default::default", vec![]))),
        }
    };
    let new = FnDecl::new("new")
        .public()
        .param("values", plan.layer_type("entity").slice().reference())
        .returns(Type::SelfType)
        .body(vec![init.tail()]);
    Ok(vec![
        Item::Struct(StructDef {
            name: name.clone(),
            vis: Visibility::Public,
            doc: Some(format!("Relations of a loaded `{entity}` collection, fetched once for all of it.")),
            attrs: vec![Attribute::derive(&["Default"])],
            fields,
        }),
        Item::Impl(ImplDef::inherent(Type::path(&name)).func(new).funcs(finders)),
    ])
}

pub fn generate(plan: &EntityPlan, plans: &Plans, layout: &Layout) -> Result<Module> {
    let camel = plan.camel();
    let mut module = Module::new(format!("{GENERATED_HEADER}\n\nDomain model of `{}`.", plan.snake()));
    module.allow = vec!["dead_code".into(), "unused_imports".into(), "unused_variables".into()];
    module.uses(&layout.uses(&["dao", "entity", "model"]));

    module.push(model_struct(plan)?);
    module.push(debug_impl(plan));
    module.items.extend(deref_impls(plan));
    let new = FnDecl::new("new")
        .public()
        .param("value", plan.layer_type("entity"))
        .returns(Type::SelfType)
        .body(vec![
            Expr::Struct {
                path: crate::ir::Path::parse("Self"),
                fields: vec![("value".into(), Expr::ident("value"))],
                rest: Some(Box::new(Expr::call("Default::default", vec![]))),
            }
            .tail(),
        ]);
    module.push(Item::Impl(
        ImplDef::inherent(Type::path(&camel))
            .func(new)
            .funcs(lifecycle(plan)?)
            .funcs(relation_accessors(plan)),
    ));
    if let Some(custom) = custom_trait(plan) {
        module.push(custom);
    }
    module.push(finder_trait(plan));

    module.push(collection_struct(plan));
    module.push(Item::Impl(
        ImplDef::inherent(Type::path(&plan.plural_camel()))
            .funcs(collection_basics(plan))
            .funcs(column_methods(plan)?)
            .funcs(key_methods(plan)?)
            .funcs(bulk_lifecycle(plan)),
    ));
    module.items.extend(collection_traits(plan));
    module.items.extend(relations_items(plan, plans)?);
    module.items.extend(render::all_impls(plan)?);
    Ok(module)
}

pub fn generate_mod(plans: &Plans) -> Result<Module> {
    Ok(layer_mod(plans, |plan| {
        let mut names = vec![plan.camel(), plan.plural_camel(), finder_name(plan), relations_name(plan)];
        if custom_relations(plan).next().is_some() {
            names.push(format!("{}CustomRelations", plan.camel()));
        }
        names
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Class;
    use crate::generate::Generator;
    use crate::ir::RustPrinter;
    use crate::plugin::PluginRegistry;

    fn customer() -> Class {
        let mut class = Class::new("customer");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("name", TypeRef::parse("string")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class.index.keys = vec![vec![Name::new("name")]];
        class
    }

    fn order() -> Class {
        let mut class = Class::new("order");
        let mut note = Member::new("note", TypeRef::parse("string"));
        note.extend = true;
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("customer_id", TypeRef::parse("u64")),
            Member::new("total", TypeRef::parse("f64")),
            note,
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

    fn print(classes: Vec<Class>, entity: &str) -> String {
        let registry = PluginRegistry::with_defaults();
        let generator = Generator::new(&registry);
        let plans = generator.plan(classes).unwrap();
        let plan = plans.get(&Name::new(entity)).unwrap();
        let module = generate(plan, &plans, &Layout::default()).unwrap();
        RustPrinter::new("model.rs").print(&module).unwrap()
    }

    #[test]
    fn test_model_struct_and_lifecycle() {
        let out = print(vec![customer(), order()], "order");
        assert!(out.contains("pub struct Order {"), "{out}");
        assert!(out.contains("pub value: entity::Order,"), "{out}");
        assert!(out.contains("pub note: String,"), "{out}");
        assert!(out.contains("pub customer_loader: Option<::kiln::Loader<Option<model::Customer>>>,"), "{out}");
        assert!(out.contains("if !self.state.needs_update(&self.value) {"), "{out}");
        assert!(out.contains(r#"dao.create(ctx, &mut self.value).map_err(|e| e.wrap("failed to Create"))?;"#));
        assert!(out.contains("pub fn save(&mut self, ctx: &::kiln::Context) -> ::kiln::Result<()> {"), "{out}");
        assert!(out.contains(r#"None => Err(::kiln::Error::unresolved("order", "customer")),"#), "{out}");
        assert!(out.contains("type Target = entity::Order;"), "{out}");
    }

    #[test]
    fn test_read_only_model_has_no_lifecycle() {
        let mut class = customer();
        class.read_only = true;
        let out = print(vec![class], "customer");
        assert!(!out.contains("pub fn create("), "{out}");
        assert!(!out.contains("pub fn save("), "{out}");
        assert!(!out.contains("fn save_all("), "{out}");
    }

    #[test]
    fn test_collection_key_methods_mirror_reduction() {
        let out = print(vec![customer(), order()], "customer");
        for expected in [
            "pub fn first_by_id(&self, id: u64) -> Option<&Customer>",
            "pub fn filter_by_id(&self, id: u64) -> Self",
            "pub fn filter_by_ids(&self, ids: &[u64]) -> Self",
            "pub fn first_by_name(&self, name: &str) -> Option<&Customer>",
            "pub fn filter_by_names(&self, names: &[String]) -> Self",
        ] {
            assert!(out.contains(expected), "{expected} missing\n{out}");
        }
        assert!(out.contains("self.find(|v| v.value.name == name)"), "{out}");
        assert!(out.contains("pub fn group_by_name(&self)"), "{out}");
        assert!(out.contains("pub fn unique_by_id(&self) -> Self"), "{out}");
    }

    #[test]
    fn test_float_columns_are_not_grouped() {
        let out = print(vec![customer(), order()], "order");
        assert!(out.contains("pub fn totals(&self) -> Vec<f64>"), "{out}");
        assert!(!out.contains("group_by_total"), "{out}");
        assert!(out.contains("F: FnMut(&Order) -> bool"), "{out}");
    }

    #[test]
    fn test_relations_memo_loads_through_finder() {
        let out = print(vec![customer(), order()], "order");
        assert!(out.contains("pub struct OrdersRelations {"), "{out}");
        assert!(out.contains("customer_keys: Vec<u64>,"), "{out}");
        assert!(out.contains("::kiln::relation::unique_keys("), "{out}");
        assert!(out.contains("finder: &dyn model::CustomerFinder"), "{out}");
        assert!(out.contains("finder.find_by_ids(ctx, &self.customer_keys)"), "{out}");
        assert!(out.contains(".find(|v| v.value.id == key)"), "{out}");

        let customer = print(vec![customer(), order()], "customer");
        assert!(customer.contains("pub trait CustomerFinder: Send + Sync {"), "{customer}");
    }

    #[test]
    fn test_custom_relation_gets_trait_only() {
        let mut class = order();
        class.members.push(Member::relation(
            "history",
            Relation {
                to: Name::new("order"),
                custom: true,
                ..Relation::default()
            },
        ));
        let out = print(vec![customer(), class], "order");
        assert!(out.contains("pub trait OrderCustomRelations {"), "{out}");
        assert!(out.contains("fn history(&self, ctx: &::kiln::Context) -> ::kiln::Result<Option<model::Order>>;"));
        assert!(!out.contains("history_loader"), "{out}");
    }
}
