//! Renderer generators: JSON and map encodings of models.
//!
//! Both encodings share one dispatch over the members of an entity. Columns are written by kind, nested
//! entities and relations are rendered recursively and either placed under their key or spliced into the
//! parent when marked inline. The option-driven variant toggles columns by name and renders a nested value
//! only when the option includes it, passing the included sub-option down.

pub mod json;
pub mod map;

use crate::entity::{Member, TypeRef};
use crate::error::Result;
use crate::ir::{Expr, FnDecl, ImplDef, Item, Pat, Receiver, Stmt, Type};

use super::EntityPlan;

pub use json::JsonRenderer;
pub use map::MapRenderer;

/// Name of the writer local in generated render bodies.
pub const WRITER: &str = "w";

/// Encoding specific parts of a renderer.
pub trait Renderer {
    /// Protocol name used to look up per-protocol render keys.
    fn protocol(&self) -> &'static str;

    /// Path of the plain rendering trait, e.g. `::kiln::ToJson`.
    fn plain_trait(&self) -> &'static str;

    fn plain_method(&self) -> &'static str;

    fn option_trait(&self) -> &'static str;

    fn option_method(&self) -> &'static str;

    /// Rendered output type.
    fn output(&self) -> Type;

    /// Path of the writer type; it must provide `new()` and `finish()`.
    fn writer(&self) -> &'static str;

    /// Write the column value found at the place expression `place`.
    fn column(&self, key: &str, member: &Member, place: Expr) -> Result<Stmt>;

    /// Write an already rendered value under `key`.
    fn nested(&self, key: &str, rendered: Expr) -> Stmt;

    /// Splice an already rendered object into the current one.
    fn inline(&self, rendered: Expr) -> Stmt;
}

fn writer() -> Expr {
    Expr::ident(WRITER)
}

/// How a member takes part in rendering.
enum Slot {
    /// A value held directly: an entity column or a model-only scalar.
    Scalar(Expr),
    /// A nested entity value held by the model.
    Nested(Expr),
    /// A relation loaded through its accessor.
    Relation,
}

/// Where the rendered type keeps its values.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Holder {
    /// A model: columns live in the wrapped entity, relations behind accessors.
    Model,
    /// A plain struct with one field per member, such as an API response.
    Plain,
}

fn slot(member: &Member, holder: Holder) -> Slot {
    let field = member.name.snake();
    if holder == Holder::Model {
        if member.relation.is_some() {
            return Slot::Relation;
        }
        if member.is_column() {
            return Slot::Scalar(Expr::self_().field("value").field(&field));
        }
    }
    match &member.ty {
        Some(TypeRef::Class(_)) => Slot::Nested(Expr::self_().field(&field)),
        _ => Slot::Scalar(Expr::self_().field(&field)),
    }
}

/// Render `value` (an owned or place expression) through the plain trait, or the option trait with `option`.
fn render_value(renderer: &dyn Renderer, value: Expr, option: Option<&str>) -> Expr {
    match option {
        None => Expr::call(
            &format!("{}::{}", renderer.plain_trait(), renderer.plain_method()),
            vec![value.reference(), Expr::ident("ctx")],
        ),
        Some(option) => Expr::call(
            &format!("{}::{}", renderer.option_trait(), renderer.option_method()),
            vec![value.reference(), Expr::ident("ctx"), Expr::ident(option)],
        ),
    }
    .try_()
}

fn place(renderer: &dyn Renderer, member: &Member, key: &str, value: Expr, option: Option<&str>) -> Stmt {
    let rendered = render_value(renderer, value, option);
    if member.is_inline() {
        renderer.inline(rendered)
    } else {
        renderer.nested(key, rendered)
    }
}

/// Statements rendering a nested value or relation, with the sub-option named `option` if any.
fn nested_stmts(
    renderer: &dyn Renderer,
    holder: Holder,
    member: &Member,
    key: &str,
    option: Option<&str>,
) -> Vec<Stmt> {
    let field = member.name.snake();
    match slot(member, holder) {
        Slot::Nested(value) => vec![place(renderer, member, key, value, option)],
        Slot::Relation => {
            let load = Expr::self_()
                .method(&field, vec![Expr::ident("ctx")])
                .method(
                    "map_err",
                    vec![Expr::closure(
                        vec!["e"],
                        Expr::call("::kiln::render::render_error", vec![Expr::str(&field), Expr::ident("e")]),
                    )],
                )
                .try_();
            vec![
                Stmt::let_(&field, load),
                place(renderer, member, key, Expr::ident(&field), option),
            ]
        }
        Slot::Scalar(_) => Vec::new(),
    }
}

fn body(renderer: &dyn Renderer, members: &[Member], holder: Holder, with_option: bool) -> Result<Vec<Stmt>> {
    let mut stmts = vec![
        Expr::call("::kiln::render::before_render", vec![Expr::self_(), Expr::ident("ctx")])
            .try_()
            .stmt(),
        Stmt::let_mut(WRITER, Expr::call(&format!("{}::new", renderer.writer()), vec![])),
    ];
    for member in members {
        let Some(key) = member.render_key(renderer.protocol()) else {
            continue;
        };
        let name = member.name.snake();
        match (slot(member, holder), with_option) {
            (Slot::Scalar(place), false) => stmts.push(renderer.column(&key, member, place)?),
            (Slot::Scalar(place), true) => stmts.push(
                Expr::if_(
                    Expr::ident("option").method("exists", vec![Expr::str(&name)]),
                    vec![renderer.column(&key, member, place)?],
                )
                .stmt(),
            ),
            (_, false) => stmts.extend(nested_stmts(renderer, holder, member, &key, None)),
            (_, true) => {
                let included = Expr::IfLet {
                    pat: Pat::some(Pat::ident("opt")),
                    expr: Box::new(Expr::ident("option").method("include_option", vec![Expr::str(&name)])),
                    then: crate::ir::Block::new(nested_stmts(renderer, holder, member, &key, Some("opt"))),
                    els: None,
                };
                stmts.push(
                    Expr::If {
                        cond: Box::new(Expr::ident("option").method("is_include_all", vec![])),
                        then: crate::ir::Block::new(nested_stmts(renderer, holder, member, &key, None)),
                        els: Some(Box::new(included)),
                    }
                    .stmt(),
                );
            }
        }
    }
    stmts.push(Expr::ok(writer().method("finish", vec![])).tail());
    Ok(stmts)
}

fn context_param(decl: FnDecl) -> FnDecl {
    decl.receiver(Receiver::Ref).param("ctx", Type::path("::kiln::Context").reference())
}

fn option_param(decl: FnDecl) -> FnDecl {
    decl.param("option", Type::path("::kiln::RenderOption").reference())
}

/// Plain and option-driven impls for the model and its collection.
pub fn impls(renderer: &dyn Renderer, plan: &EntityPlan) -> Result<Vec<Item>> {
    let model = Type::path(&plan.camel());
    let collection = Type::path(&plan.plural_camel());
    let ret = renderer.output().kiln_result();

    let plain = context_param(FnDecl::new(renderer.plain_method())).returns(ret.clone());
    let option = option_param(context_param(FnDecl::new(renderer.option_method()))).returns(ret);
    let values = Expr::self_().field("values").method("as_slice", vec![]);
    let slice_plain = Expr::call(
        &format!("{}::{}", renderer.plain_trait(), renderer.plain_method()),
        vec![values.clone(), Expr::ident("ctx")],
    );
    let slice_option = Expr::call(
        &format!("{}::{}", renderer.option_trait(), renderer.option_method()),
        vec![values, Expr::ident("ctx"), Expr::ident("option")],
    );

    Ok(vec![
        Item::Impl(
            ImplDef::of_trait(Type::path(renderer.plain_trait()), model.clone())
                .func(plain.clone().body(body(renderer, &plan.class.members, Holder::Model, false)?)),
        ),
        Item::Impl(
            ImplDef::of_trait(Type::path(renderer.option_trait()), model)
                .func(option.clone().body(body(renderer, &plan.class.members, Holder::Model, true)?)),
        ),
        Item::Impl(
            ImplDef::of_trait(Type::path(renderer.plain_trait()), collection.clone())
                .func(plain.body(vec![slice_plain.tail()])),
        ),
        Item::Impl(
            ImplDef::of_trait(Type::path(renderer.option_trait()), collection)
                .func(option.body(vec![slice_option.tail()])),
        ),
    ])
}

/// Plain and option-driven impls for a struct holding one public field per member.
pub fn object_impls(renderer: &dyn Renderer, name: &str, members: &[Member]) -> Result<Vec<Item>> {
    let ret = renderer.output().kiln_result();
    let plain = context_param(FnDecl::new(renderer.plain_method())).returns(ret.clone());
    let option = option_param(context_param(FnDecl::new(renderer.option_method()))).returns(ret);
    Ok(vec![
        Item::Impl(
            ImplDef::of_trait(Type::path(renderer.plain_trait()), Type::path(name))
                .func(plain.body(body(renderer, members, Holder::Plain, false)?)),
        ),
        Item::Impl(
            ImplDef::of_trait(Type::path(renderer.option_trait()), Type::path(name))
                .func(option.body(body(renderer, members, Holder::Plain, true)?)),
        ),
    ])
}

/// Renderer impls of every encoding, plus the empty `BeforeRender` impl unless a hand-written one exists.
pub fn all_impls(plan: &EntityPlan) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    if !plan.class.before_render {
        items.push(Item::Impl(ImplDef::of_trait(
            Type::path("::kiln::BeforeRender"),
            Type::path(&plan.camel()),
        )));
    }
    items.extend(impls(&JsonRenderer, plan)?);
    items.extend(impls(&MapRenderer, plan)?);
    Ok(items)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::entity::{Class, Name, Relation};
    use crate::ir::{Module, RustPrinter};
    use crate::plugin::{HookConfig, PluginRegistry};

    pub(crate) fn customer() -> Class {
        let mut class = Class::new("customer");
        class.members = vec![Member::new("id", TypeRef::parse("u64"))];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    pub(crate) fn order() -> Class {
        let mut class = Class::new("order");
        let mut secret = Member::new("secret", TypeRef::parse("string"));
        secret.render = Some(toml::from_str::<RenderHolder>("render = false").unwrap().render);
        let mut customer = Member::relation(
            "customer",
            Relation {
                to: Name::new("customer"),
                internal: Some(Name::new("customer_id")),
                external: Some(Name::new("id")),
                ..Relation::default()
            },
        );
        customer.ty = Some(TypeRef::Class(Name::new("customer")));
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("customer_id", TypeRef::parse("u64")),
            Member::new("total", TypeRef::parse("f64")),
            Member::new("created_at", TypeRef::parse("time")),
            secret,
            customer,
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    #[derive(serde::Deserialize)]
    struct RenderHolder {
        render: crate::entity::RenderMeta,
    }

    pub(crate) fn print_impls(renderer: &dyn Renderer, class: &Class) -> String {
        let classes = vec![customer(), class.clone()];
        let hooks = PluginRegistry::with_defaults().bind("sql", &HookConfig::new()).unwrap();
        let plan = EntityPlan::build(class, &classes, hooks).unwrap();
        let module = Module {
            items: impls(renderer, &plan).unwrap(),
            ..Module::default()
        };
        RustPrinter::new("model/order.rs").print(&module).unwrap()
    }

    #[test]
    fn test_hidden_members_are_skipped() {
        let out = print_impls(&JsonRenderer, &order());
        assert!(!out.contains("secret"), "{out}");
        assert!(out.contains("::kiln::render::before_render(self, ctx)?;"), "{out}");
    }

    #[test]
    fn test_option_gates_columns_and_relations() {
        let out = print_impls(&JsonRenderer, &order());
        assert!(out.contains(r#"if option.exists("total") {"#), "{out}");
        assert!(out.contains("if option.is_include_all() {"), "{out}");
        assert!(out.contains(r#"} else if let Some(opt) = option.include_option("customer") {"#), "{out}");
        assert!(out.contains("::kiln::ToJsonWithOption::to_json_with_option(&customer, ctx, opt)?"), "{out}");
    }

    #[test]
    fn test_relations_render_through_accessor_only_on_models() {
        let class = order();
        let customer = class.members.iter().find(|m| m.name.snake() == "customer").unwrap();
        assert!(matches!(slot(customer, Holder::Model), Slot::Relation));
        assert!(matches!(slot(customer, Holder::Plain), Slot::Nested(_)));
        let total = class.members.iter().find(|m| m.name.snake() == "total").unwrap();
        assert!(matches!(slot(total, Holder::Model), Slot::Scalar(_)));

        let out = print_impls(&JsonRenderer, &class);
        assert!(out.contains("let customer = self"), "{out}");
        assert!(out.contains(r#"::kiln::render::render_error("customer", e)"#), "{out}");
    }

    #[test]
    fn test_collection_delegates_to_slice() {
        let out = print_impls(&MapRenderer, &order());
        assert!(out.contains("impl ::kiln::ToMap for Orders {"), "{out}");
        assert!(out.contains("::kiln::ToMap::to_map(self.values.as_slice(), ctx)"), "{out}");
    }
}
