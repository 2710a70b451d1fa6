//! Cached storage backend: the SQL statements of [`SqlBackend`](super::SqlBackend), read through a
//! `::kiln::cache::Cache` and invalidated on every write.

use super::sql::{Statements, field_arg, table_name};
use super::{HookContext, HookPoint, Hooks, Operation};
use crate::entity::Class;
use crate::error::Result;
use crate::generate::decl::MethodDecl;
use crate::ir::{Expr, Field, FnDecl, Stmt, Type};

const CACHE_TABLE: &str = "cache_table";

pub struct CacheBackend;

impl CacheBackend {
    /// `let executor = ::kiln::cache::ReadThrough::new(..);` over the handle's executor and cache.
    fn read_through(ctx: &HookContext<'_>) -> Stmt {
        let table = Expr::call(&format!("entity::{}::{CACHE_TABLE}", ctx.class.name.camel()), vec![]);
        Stmt::let_(
            "executor",
            Expr::call(
                "::kiln::cache::ReadThrough::new",
                vec![
                    Expr::self_().field("executor").method("as_ref", vec![]),
                    Expr::self_().field("cache").method("as_ref", vec![]),
                    table,
                ],
            ),
        )
    }
}

impl Hooks for CacheBackend {
    fn name(&self) -> &str {
        "cache"
    }

    fn hook_points(&self) -> Vec<HookPoint> {
        HookPoint::backend_points()
    }

    fn struct_fields(&self, _class: &Class) -> Vec<Field> {
        vec![
            Field::new("executor", Type::path("::kiln::sql::Executor").dyn_().arc()),
            Field::new("cache", Type::path("::kiln::cache::Cache").dyn_().arc()),
        ]
    }

    fn declare(&self, ctx: &HookContext<'_>, decl: &mut MethodDecl) -> Result<()> {
        if decl.op == Operation::Constructor {
            decl.args = ctx.fields.iter().map(field_arg).collect();
        }
        Ok(())
    }

    fn main(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        if decl.op == Operation::Constructor {
            return Statements::direct().body(ctx, decl);
        }
        let mut stmts = vec![Self::read_through(ctx)];
        stmts.extend(Statements::local("executor").body(ctx, decl)?);
        Ok(stmts)
    }

    /// `cache_table()`, the table whose cached reads a write drops.
    fn entity_methods(&self, class: &Class) -> Result<Vec<FnDecl>> {
        Ok(vec![
            FnDecl::new(CACHE_TABLE)
                .public()
                .doc("Table whose cached reads a write to this entity drops.")
                .returns(Type::path("str").reference_static())
                .body(vec![Expr::str(table_name(class)).tail()]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Member, Name, TypeRef};
    use crate::generate::decl::{MethodName, Returns, key_arg};
    use crate::ir::{Item, Module, RustPrinter};

    fn skill() -> Class {
        let mut class = Class::new("skill");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("name", TypeRef::parse("string")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    fn print(items: Vec<Item>) -> String {
        let module = Module {
            items,
            ..Module::default()
        };
        RustPrinter::new("skill.rs").print(&module).unwrap()
    }

    fn render(class: &Class, decl: &MethodDecl) -> String {
        let fields = CacheBackend.struct_fields(class);
        let ctx = HookContext {
            class,
            impl_name: "SkillDaoImpl",
            fields: &fields,
            backend: &CacheBackend,
        };
        let body = CacheBackend.main(&ctx, decl).unwrap();
        print(vec![Item::Fn(FnDecl::new("body").body(body))])
    }

    #[test]
    fn test_reads_go_through_the_cache() {
        let class = skill();
        let name = class.member_by_name("name").unwrap();
        let decl = MethodDecl::new(
            Operation::FindBy,
            MethodName::keyed("find_by", vec![Name::new("name")], false),
            Returns::One,
        )
        .arg(key_arg(&class, name).unwrap());
        let out = render(&class, &decl);
        assert!(out.contains("let executor = ::kiln::cache::ReadThrough::new("), "{out}");
        assert!(out.contains("self.cache.as_ref()"), "{out}");
        assert!(out.contains("entity::Skill::cache_table()"), "{out}");
        assert!(out.contains("::kiln::sql::fetch_optional(&executor, ctx, query"), "{out}");
    }

    #[test]
    fn test_writes_run_on_the_read_through_executor() {
        let class = skill();
        let decl = MethodDecl::new(Operation::Delete, MethodName::verb("delete"), Returns::Unit);
        let out = render(&class, &decl);
        assert!(out.contains("DELETE FROM `skills` WHERE `id` = ?"), "{out}");
        assert!(out.contains("executor.exec(ctx, query"), "{out}");
        assert!(!out.contains("self.executor.exec"), "{out}");
    }

    #[test]
    fn test_constructor_takes_executor_and_cache() {
        let class = skill();
        let fields = CacheBackend.struct_fields(&class);
        let ctx = HookContext {
            class: &class,
            impl_name: "SkillDaoImpl",
            fields: &fields,
            backend: &CacheBackend,
        };
        let mut decl = MethodDecl::new(Operation::Constructor, MethodName::verb("new"), Returns::Handle);
        CacheBackend.declare(&ctx, &mut decl).unwrap();
        let names: Vec<_> = decl.args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["executor", "cache"]);
        let out = render(&class, &decl);
        assert!(out.contains("SkillDaoImpl { executor, cache }"), "{out}");
        assert!(!out.contains("ReadThrough"), "{out}");
    }

    #[test]
    fn test_entity_names_its_table() {
        let methods = CacheBackend.entity_methods(&skill()).unwrap();
        let out = print(methods.into_iter().map(Item::Fn).collect());
        assert!(out.contains(r#"pub fn cache_table() -> &'static str {"#), "{out}");
        assert!(out.contains(r#""skills""#), "{out}");
    }
}
