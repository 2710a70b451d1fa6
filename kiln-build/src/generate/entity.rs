//! Entity layer: plain column structs with row decoding and argument encoding.

use super::{EntityPlan, GENERATED_HEADER, Layout, Plans, layer_mod, types};
use crate::error::Result;
use crate::ir::{Attribute, Expr, Field, FnDecl, ImplDef, Item, Module, Receiver, StructDef, Type, Visibility};

const DERIVES: &[&str] = &[
    "Debug",
    "Clone",
    "Default",
    "PartialEq",
    "::kiln::serde::Serialize",
    "::kiln::serde::Deserialize",
    "::kiln::MockValue",
];

fn fields(plan: &EntityPlan) -> Result<Vec<Field>> {
    let entity = plan.snake();
    plan.class
        .columns()
        .map(|member| {
            let mut field = Field::new(&member.name.snake(), types::member_type(&entity, member)?).public();
            field.doc = member.desc.clone();
            Ok(field)
        })
        .collect()
}

pub fn generate(plan: &EntityPlan, _layout: &Layout) -> Result<Module> {
    let camel = plan.camel();
    let snake = plan.snake();
    let mut module = Module::new(format!("{GENERATED_HEADER}\n\nStored columns of `{snake}`."));

    module.push(Item::Struct(StructDef {
        name: camel.clone(),
        vis: Visibility::Public,
        doc: Some(format!("One row of `{}`.", plan.class.name.plural_snake())),
        attrs: vec![
            Attribute::derive(DERIVES),
            Attribute::new("serde", Some("crate = \"::kiln::serde\"")),
        ],
        fields: fields(plan)?,
    }));
    module.push(Item::TypeAlias {
        name: plan.plural_camel(),
        vis: Visibility::Public,
        doc: None,
        ty: Type::path(&camel).vec(),
    });

    let columns: Vec<_> = plan.class.columns().collect();
    let decoded = columns
        .iter()
        .map(|m| {
            let name = m.name.snake();
            let value = Expr::ident("row").method("get", vec![Expr::str(&name)]).try_();
            (name, value)
        })
        .collect::<Vec<_>>();
    let from_row = FnDecl::new("from_row")
        .param("row", Type::path("::kiln::sql::Row").reference())
        .returns(Type::path("Self").kiln_result())
        .body(vec![
            Expr::ok(Expr::struct_lit("Self", decoded.iter().map(|(n, v)| (n.as_str(), v.clone())).collect())).tail(),
        ]);
    module.push(Item::Impl(
        ImplDef::of_trait(Type::path("::kiln::sql::FromRow"), Type::path(&camel)).func(from_row),
    ));

    let values = columns
        .iter()
        .map(|m| types::value_of(m, Expr::self_().field(&m.name.snake()).reference()))
        .collect();
    let to_values = FnDecl::new("to_values")
        .public()
        .doc("Column values in declaration order, the arguments of an insert.")
        .receiver(Receiver::Ref)
        .returns(Type::path("::kiln::Value").vec())
        .body(vec![Expr::vec_macro(values).tail()]);
    let added = plan.hooks.entity_methods(&plan.class)?;
    module.push(Item::Impl(ImplDef::inherent(Type::path(&camel)).func(to_values).funcs(added)));
    Ok(module)
}

pub fn generate_mod(plans: &Plans) -> Result<Module> {
    Ok(layer_mod(plans, |plan| vec![plan.camel(), plan.plural_camel()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Class, Member, Name, TypeRef};
    use crate::ir::RustPrinter;
    use crate::plugin::{HookConfig, PluginRegistry};

    fn print(class: &Class) -> String {
        print_with(class, "sql", HookConfig::new())
    }

    fn print_with(class: &Class, backend: &str, config: HookConfig) -> String {
        let hooks = PluginRegistry::with_defaults().bind(backend, &config).unwrap();
        let plan = EntityPlan::build(class, std::slice::from_ref(class), hooks).unwrap();
        RustPrinter::new("entity/user.rs")
            .print(&generate(&plan, &Layout::default()).unwrap())
            .unwrap()
    }

    #[test]
    fn test_columns_only() {
        let mut class = Class::new("user");
        let mut nick = Member::new("nick", TypeRef::parse("string"));
        nick.nullable = true;
        let mut score = Member::new("score", TypeRef::parse("u32"));
        score.extend = true;
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            nick,
            Member::new("avatar", TypeRef::parse("bytes")),
            score,
        ];
        class.index.primary_key = Some(Name::new("id"));
        let out = print(&class);
        assert!(out.contains("pub struct User {"), "{out}");
        assert!(out.contains("pub nick: Option<String>,"), "{out}");
        assert!(out.contains("pub avatar: Vec<u8>,"), "{out}");
        assert!(!out.contains("score"), "{out}");
        assert!(out.contains("pub type Users = Vec<User>;"), "{out}");
        assert!(out.contains(r#"#[serde(crate = "::kiln::serde")]"#), "{out}");
        assert!(out.contains(r#"nick: row.get("nick")?,"#), "{out}");
        assert!(out.contains("::kiln::Value::from_bytes(&self.avatar)"), "{out}");
    }

    #[test]
    fn test_backend_and_listed_plugins_add_methods() {
        let mut class = Class::new("user_skill");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("user_id", TypeRef::parse("u64")),
        ];
        class.index.primary_key = Some(Name::new("id"));

        let out = print(&class);
        assert!(!out.contains("is_owned_by"), "{out}");
        assert!(!out.contains("cache_table"), "{out}");

        let config: HookConfig = toml::from_str(r#""add-methods" = ["user-id"]"#).unwrap();
        let out = print_with(&class, "cache", config);
        assert!(out.contains("pub fn cache_table() -> &'static str {"), "{out}");
        assert!(out.contains(r#""user_skills""#), "{out}");
        assert!(out.contains("pub fn is_owned_by(&self, user_id: u64) -> bool {"), "{out}");
    }
}
