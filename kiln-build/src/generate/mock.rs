//! Mock layer: a structural mock of each repository trait, built from the same declarations as the real
//! implementation.

use super::decl::{ArgKind, MethodDecl, Returns};
use super::model::finder_name;
use super::repository::{self, return_types, trait_name};
use super::{EntityPlan, GENERATED_HEADER, Layout, Plans, layer_mod};
use crate::error::Result;
use crate::ir::{Attribute, Expr, Field, FnDecl, ImplDef, Item, Module, Receiver, StructDef, Type, Visibility};

pub fn mock_name(plan: &EntityPlan) -> String {
    format!("{}RepositoryMock", plan.camel())
}

pub fn expect_name(plan: &EntityPlan) -> String {
    format!("{}RepositoryExpect", plan.camel())
}

/// Label reported by mock errors, e.g. `UserRepository::FindByID`.
fn label(plan: &EntityPlan, decl: &MethodDecl) -> String {
    format!("{}::{}", trait_name(plan), decl.name.camel())
}

/// Argument values a call is matched on; the context never takes part.
fn arg_values(decl: &MethodDecl) -> Expr {
    let values = decl
        .args
        .iter()
        .filter_map(|arg| {
            let value = match arg.kind {
                ArgKind::Context => return None,
                ArgKind::Entity { .. } => Expr::ident(&arg.name).field("value").reference(),
                _ => Expr::ident(&arg.name).reference(),
            };
            Some(Expr::call("::kiln::ToValue::to_value", vec![value]))
        })
        .collect();
    Expr::vec_macro(values)
}

fn expectation(plan: &EntityPlan, decl: &MethodDecl) -> Type {
    Type::generic("::kiln::mock::Expectation", vec![return_types(plan).of(decl.returns)])
}

fn expect_builder(plan: &EntityPlan, decl: &MethodDecl) -> FnDecl {
    let name = decl.snake();
    let mut builder = FnDecl::new(&name).public().receiver(Receiver::Ref);
    for arg in &decl.args {
        builder = match arg.kind {
            ArgKind::Context => builder,
            ArgKind::Entity { .. } => builder.param(&arg.name, plan.layer_type("model").reference()),
            _ => builder.param(&arg.name, arg.ty.clone()),
        };
    }
    let mut expect = Expr::self_().field(&name).method("expect", vec![arg_values(decl)]);
    if matches!(decl.returns, Returns::Unit | Returns::Handle) {
        expect = expect.method("returns", vec![Expr::unit()]);
    }
    builder
        .doc(format!("Expect one call of `{name}` with these arguments."))
        .returns(expectation(plan, decl))
        .body(vec![expect.tail()])
}

fn expect_items(plan: &EntityPlan) -> Vec<Item> {
    let name = expect_name(plan);
    let fields = plan
        .methods()
        .map(|decl| {
            Field::new(
                &decl.snake(),
                Type::generic("::kiln::mock::MockMethod", vec![return_types(plan).of(decl.returns)]),
            )
        })
        .collect();
    let mut verify = plan
        .methods()
        .map(|decl| {
            Expr::self_()
                .field(&decl.snake())
                .method("verify", vec![Expr::str(label(plan, decl))])
                .try_()
                .stmt()
        })
        .collect::<Vec<_>>();
    verify.push(Expr::ok_unit().tail());
    vec![
        Item::Struct(StructDef {
            name: name.clone(),
            vis: Visibility::Public,
            doc: Some(format!("Expectations of every `{}` method.", trait_name(plan))),
            attrs: vec![Attribute::derive(&["Default"])],
            fields,
        }),
        Item::Impl(
            ImplDef::inherent(Type::path(&name))
                .funcs(plan.methods().map(|decl| expect_builder(plan, decl)))
                .func(
                    FnDecl::new("verify")
                        .public()
                        .doc("Fail with the first expectation called fewer times than required.")
                        .receiver(Receiver::Ref)
                        .returns(Type::unit().kiln_result())
                        .body(verify),
                ),
        ),
    ]
}

fn mocked(plan: &EntityPlan, decl: &MethodDecl) -> FnDecl {
    let call = Expr::self_()
        .field("expect")
        .field(&decl.snake())
        .method("call", vec![Expr::str(label(plan, decl)), arg_values(decl)]);
    let mut method = repository::signature(plan, decl).body(vec![call.tail()]);
    method.doc = None;
    method
}

pub fn generate(plan: &EntityPlan, layout: &Layout) -> Result<Module> {
    let snake = plan.snake();
    let mock = mock_name(plan);
    let mut module = Module::new(format!("{GENERATED_HEADER}\n\nRepository mock of `{snake}`."));
    module.allow = vec!["dead_code".into(), "unused_imports".into(), "unused_variables".into()];
    module.uses(&layout.uses(&["model", "repository"]));

    for item in expect_items(plan) {
        module.push(item);
    }
    module.push(Item::Struct(StructDef {
        name: mock.clone(),
        vis: Visibility::Public,
        doc: Some(format!(
            "Implements `{}` by matching each call against registered expectations.",
            trait_name(plan)
        )),
        attrs: vec![Attribute::derive(&["Default"])],
        fields: vec![Field::new("expect", Type::path(&expect_name(plan)))],
    }));
    module.push(Item::Impl(
        ImplDef::inherent(Type::path(&mock))
            .func(
                FnDecl::new("new")
                    .public()
                    .returns(Type::SelfType)
                    .body(vec![Expr::call("Self::default", vec![]).tail()]),
            )
            .func(
                FnDecl::new("expect")
                    .public()
                    .receiver(Receiver::Ref)
                    .returns(Type::path(&expect_name(plan)).reference())
                    .body(vec![Expr::self_().field("expect").reference().tail()]),
            )
            .func(
                FnDecl::new("verify")
                    .public()
                    .receiver(Receiver::Ref)
                    .returns(Type::unit().kiln_result())
                    .body(vec![Expr::self_().field("expect").method("verify", vec![]).tail()]),
            ),
    ));

    let finders: Vec<_> = plan.finder_methods().map(|decl| mocked(plan, decl)).collect();
    module.push(Item::Impl(
        ImplDef::of_trait(Type::path(&format!("model::{}", finder_name(plan))), Type::path(&mock)).funcs(finders),
    ));
    let methods: Vec<_> = repository::repository_methods(plan).map(|decl| mocked(plan, decl)).collect();
    module.push(Item::Impl(
        ImplDef::of_trait(Type::path(&format!("repository::{}", trait_name(plan))), Type::path(&mock))
            .funcs(methods),
    ));
    Ok(module)
}

/// Mocks of every entity, and the `factory` module of model builders.
pub fn generate_mod(plans: &Plans) -> Result<Module> {
    let mut module = layer_mod(plans, |plan| vec![expect_name(plan), mock_name(plan)]);
    module.items.insert(
        0,
        Item::Mod {
            vis: Visibility::Public,
            name: "factory".into(),
        },
    );
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Class, Member, Name, TypeRef};
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

    fn print(class: Class) -> String {
        let registry = PluginRegistry::with_defaults();
        let plans = Generator::new(&registry).plan(vec![class]).unwrap();
        let plan = plans.iter().next().unwrap();
        RustPrinter::new("mock/customer.rs")
            .print(&generate(plan, &Layout::default()).unwrap())
            .unwrap()
    }

    #[test]
    fn test_mock_implements_both_traits() {
        let out = print(customer());
        assert!(out.contains("impl model::CustomerFinder for CustomerRepositoryMock {"), "{out}");
        assert!(out.contains("impl repository::CustomerRepository for CustomerRepositoryMock {"), "{out}");
        assert!(out.contains(r#"self.expect.find_all.call("CustomerRepository::FindAll", vec![])"#), "{out}");
    }

    #[test]
    fn test_calls_match_on_arguments_without_context() {
        let out = print(customer());
        assert!(out.contains(r#""CustomerRepository::FindByID""#), "{out}");
        assert!(out.contains("::kiln::ToValue::to_value(&id)"), "{out}");
        assert!(out.contains("::kiln::ToValue::to_value(&value.value)"), "{out}");
        assert!(out.contains("pub fn find_by_name("), "{out}");
        assert!(out.contains("name: &str"), "{out}");
    }

    #[test]
    fn test_unit_expectations_pin_their_return() {
        let out = print(customer());
        assert!(out.contains("pub fn delete(&self, value: &model::Customer)"), "{out}");
        assert!(out.contains(".returns(())"), "{out}");
        assert!(out.contains(r#"self.delete.verify("CustomerRepository::Delete")?;"#), "{out}");
        assert!(out.contains("find_by_id: ::kiln::mock::MockMethod<Option<model::Customer>>"), "{out}");
    }

    #[test]
    fn test_read_only_mock_has_no_writes() {
        let mut class = customer();
        class.read_only = true;
        let out = print(class);
        assert!(!out.contains("fn create("), "{out}");
        assert!(!out.contains("fn delete("), "{out}");
        assert!(out.contains("fn find_by_id("), "{out}");
    }
}
