//! Reference storage backend: statement text plus `::kiln::sql` helper calls.

use super::{HookContext, HookPoint, Hooks, Operation};
use crate::entity::{Class, Member, PrimitiveKind};
use crate::error::{Error, Result};
use crate::generate::decl::{Arg, ArgKind, MethodDecl, Returns};
use crate::generate::types;
use crate::ir::{Expr, Field, Pat, Stmt, Type};

pub struct SqlBackend;

/// `` `name` ``
pub(crate) fn quote_ident(name: &str) -> String {
    format!("`{name}`")
}

pub(crate) fn table_name(class: &Class) -> String {
    class.name.plural_snake()
}

fn column_list(class: &Class) -> String {
    class
        .columns()
        .map(|m| quote_ident(&m.name.snake()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Statement bodies of every operation, run through one executor expression.
pub(crate) struct Statements {
    /// Receiver of `exec` calls.
    executor: Expr,
    /// The executor as `&dyn ::kiln::sql::Executor`, passed to the fetch helpers.
    executor_ref: Expr,
}

/// Argument carrying a backend or plugin field into the constructor.
pub(crate) fn field_arg(field: &Field) -> Arg {
    const COPY: &[&str] = &["u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64", "f32", "f64", "bool"];
    let copy = matches!(&field.ty, Type::Path(p) if p.segments.len() == 1 && COPY.contains(&p.segments[0].as_str()));
    Arg::extra(&field.name, field.ty.clone(), copy)
}

/// WHERE clause, `%s` substitution parts and argument statements derived from the key arguments of `decl`.
struct Filter {
    clause: String,
    /// Each plural argument adds one `%s` placeholder list.
    plurals: Vec<(Member, String)>,
    /// Values of the non-null keys, bound in key order.
    scalars: Vec<Expr>,
    /// Nullable keys compare with `IS NULL` when absent and bind nothing.
    nullable: usize,
    /// `%s` substitutions in clause order.
    parts: Vec<Expr>,
    /// `args.push(..)`/`args.extend(..)` in key order.
    pushes: Vec<Stmt>,
}

/// `"`col` IS NULL"` when the optional key `arg` is `None`, `"`col` = ?"` otherwise.
fn null_aware(column: &str, arg: &str) -> Expr {
    let text = |s: String| vec![Expr::str(s).method("to_string", vec![]).tail()];
    Expr::if_else(
        Expr::ident(arg).method("is_none", vec![]),
        text(format!("{column} IS NULL")),
        text(format!("{column} = ?")),
    )
}

impl Filter {
    fn of(decl: &MethodDecl) -> Filter {
        let mut conditions = Vec::new();
        let mut plurals = Vec::new();
        let mut scalars = Vec::new();
        let mut nullable = 0;
        let mut parts = Vec::new();
        let mut pushes = Vec::new();
        for arg in decl.key_args() {
            match &arg.kind {
                ArgKind::Key(member) if member.nullable => {
                    conditions.push("%s".to_string());
                    parts.push(null_aware(&quote_ident(&member.name.snake()), &arg.name));
                    let push = Expr::ident("args").method("push", vec![types::arg_value(member, &arg.name)]);
                    pushes.push(Expr::if_(Expr::ident(&arg.name).method("is_some", vec![]), vec![push.stmt()]).stmt());
                    nullable += 1;
                }
                ArgKind::Key(member) => {
                    conditions.push(format!("{} = ?", quote_ident(&member.name.snake())));
                    let value = types::arg_value(member, &arg.name);
                    scalars.push(value.clone());
                    pushes.push(Expr::ident("args").method("push", vec![value]).stmt());
                }
                ArgKind::Plural(member) => {
                    conditions.push(format!("{} IN (%s)", quote_ident(&member.name.snake())));
                    parts.push(Expr::call(
                        "::kiln::sql::placeholders",
                        vec![Expr::ident(&arg.name).method("len", vec![])],
                    ));
                    pushes.push(Expr::ident("args").method("extend", vec![plural_iter(member, &arg.name)]).stmt());
                    plurals.push((member.clone(), arg.name.clone()));
                }
                _ => {}
            }
        }
        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        Filter {
            clause,
            plurals,
            scalars,
            nullable,
            parts,
            pushes,
        }
    }

    /// Whether the statement text or its arguments depend on the argument values.
    fn is_dynamic(&self) -> bool {
        !self.plurals.is_empty() || self.nullable > 0
    }

    /// `if ids.is_empty() { return Ok(empty); }` per plural argument.
    fn empty_guards(&self, empty: Expr) -> Vec<Stmt> {
        self.plurals
            .iter()
            .map(|(_, name)| {
                Expr::if_(
                    Expr::ident(name).method("is_empty", vec![]),
                    vec![Expr::ret(Expr::ok(empty.clone())).stmt()],
                )
                .stmt()
            })
            .collect()
    }

    fn placeholder_parts(&self) -> Vec<Expr> {
        self.parts.clone()
    }
}

fn plural_iter(member: &Member, arg: &str) -> Expr {
    let convert = if types::kind(member) == Some(PrimitiveKind::Bytes) && !types::is_custom(member) {
        Expr::path("::kiln::Value::from_bytes")
    } else {
        Expr::path("::kiln::ToValue::to_value")
    };
    Expr::ident(arg).method("iter", vec![]).method("map", vec![convert])
}

/// `let query = ...;` with `%s` points substituted at run time when `parts` is not empty.
fn query_stmt(text: String, parts: Vec<Expr>) -> (Stmt, Expr) {
    if parts.is_empty() {
        (Stmt::let_("query", Expr::str(text)), Expr::ident("query"))
    } else {
        let substituted = Expr::call(
            "::kiln::sql::substitute",
            vec![Expr::str(text), Expr::Array(parts).reference()],
        );
        (Stmt::let_("query", substituted), Expr::ident("query").reference())
    }
}

fn primary_key<'a>(ctx: &HookContext<'a>, decl: &MethodDecl) -> Result<&'a Member> {
    ctx.class.primary_key().ok_or_else(|| {
        Error::generation(ctx.entity(), format!("'{}' requires a primary key", decl.snake()))
    })
}

impl Statements {
    /// Statements on the handle's own `executor` field.
    pub(crate) fn direct() -> Self {
        let executor = Expr::self_().field("executor");
        Self {
            executor_ref: executor.clone().method("as_ref", vec![]),
            executor,
        }
    }

    /// Statements on the local `name`, an executor value.
    pub(crate) fn local(name: &str) -> Self {
        Self {
            executor: Expr::ident(name),
            executor_ref: Expr::ident(name).reference(),
        }
    }

    pub(crate) fn body(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        match decl.op {
            Operation::Constructor => Ok(self.constructor(ctx)),
            Operation::Create => self.create(ctx),
            Operation::Update => self.update(ctx, decl),
            Operation::Delete => self.delete(ctx, decl),
            Operation::FindAll | Operation::Count | Operation::FindBy | Operation::FindByPlural => {
                self.select(ctx, decl)
            }
            Operation::UpdateBy | Operation::UpdateByPlural => self.update_by(ctx, decl),
            Operation::DeleteBy | Operation::DeleteByPlural => self.delete_by(ctx, decl),
        }
    }

    fn constructor(&self, ctx: &HookContext<'_>) -> Vec<Stmt> {
        let fields = ctx.fields.iter().map(|f| (f.name.as_str(), Expr::ident(&f.name))).collect();
        let value = Expr::struct_lit(ctx.impl_name, fields);
        vec![Expr::call("::std::sync::Arc::new", vec![value]).tail()]
    }

    fn create(&self, ctx: &HookContext<'_>) -> Result<Vec<Stmt>> {
        let class = ctx.class;
        let columns: Vec<&Member> = class.columns().collect();
        let text = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(&table_name(class)),
            column_list(class),
            vec!["?"; columns.len()].join(", ")
        );
        let exec = self.executor.clone().method(
            "exec",
            vec![
                Expr::ident("ctx"),
                Expr::ident("query"),
                Expr::ident("value").method("to_values", vec![]).reference(),
            ],
        );
        let mut stmts = vec![Stmt::let_("query", Expr::str(text))];
        let generated_key = class
            .primary_key()
            .filter(|pk| types::kind(pk).is_some_and(PrimitiveKind::is_integer) && !types::is_custom(pk));
        match generated_key {
            Some(pk) => {
                stmts.push(Stmt::let_("result", exec.try_()));
                let converted = Expr::ident("result")
                    .field("last_insert_id")
                    .method("try_into", vec![])
                    .method("map_err", vec![Expr::path("::kiln::Error::conversion")])
                    .try_();
                let converted = if pk.nullable { Expr::some(converted) } else { converted };
                stmts.push(Expr::ident("value").field(&pk.name.snake()).assign(converted).stmt());
            }
            None => stmts.push(exec.try_().stmt()),
        }
        stmts.push(Expr::ok_unit().tail());
        Ok(stmts)
    }

    fn update(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        let class = ctx.class;
        let pk = primary_key(ctx, decl)?;
        let pk_name = pk.name.snake();
        let assigned: Vec<&Member> = class.columns().filter(|m| m.name.snake() != pk_name).collect();
        if assigned.is_empty() {
            return Ok(vec![Expr::ok_unit().tail()]);
        }
        let text = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quote_ident(&table_name(class)),
            assigned
                .iter()
                .map(|m| format!("{} = ?", quote_ident(&m.name.snake())))
                .collect::<Vec<_>>()
                .join(", "),
            quote_ident(&pk_name)
        );
        let mut values: Vec<Expr> = assigned
            .iter()
            .map(|m| types::value_of(m, Expr::ident("value").field(&m.name.snake()).reference()))
            .collect();
        values.push(types::value_of(pk, Expr::ident("value").field(&pk_name).reference()));
        Ok(self.exec(text, Vec::new(), Expr::Array(values).reference()))
    }

    fn delete(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        let pk = primary_key(ctx, decl)?;
        let pk_name = pk.name.snake();
        let text = format!(
            "DELETE FROM {} WHERE {} = ?",
            quote_ident(&table_name(ctx.class)),
            quote_ident(&pk_name)
        );
        let value = types::value_of(pk, Expr::ident("value").field(&pk_name).reference());
        Ok(self.exec(text, Vec::new(), Expr::Array(vec![value]).reference()))
    }

    fn exec(&self, text: String, parts: Vec<Expr>, args: Expr) -> Vec<Stmt> {
        let (query, query_ref) = query_stmt(text, parts);
        vec![
            query,
            self.executor.clone().method("exec", vec![Expr::ident("ctx"), query_ref, args]).try_().stmt(),
            Expr::ok_unit().tail(),
        ]
    }

    /// Argument vector of a filtered statement; `prefix` seeds it, e.g. with update values.
    fn filter_args(&self, filter: &Filter, prefix: Option<Expr>) -> (Vec<Stmt>, Expr) {
        if prefix.is_none() && !filter.is_dynamic() {
            return (Vec::new(), Expr::Array(filter.scalars.clone()).reference());
        }
        if prefix.is_none() && filter.scalars.is_empty() && filter.nullable == 0 && filter.plurals.len() == 1 {
            let (member, name) = &filter.plurals[0];
            return (
                vec![Stmt::let_("args", types::plural_values(member, name))],
                Expr::ident("args").reference(),
            );
        }
        let init = prefix.unwrap_or_else(|| Expr::call("::std::vec::Vec::new", vec![]));
        let mut stmts = vec![Stmt::Let {
            pat: Pat::ident_mut("args"),
            ty: Some(Type::path("::kiln::Value").vec()),
            init: Some(init),
        }];
        stmts.extend(filter.pushes.iter().cloned());
        (stmts, Expr::ident("args").reference())
    }

    fn select(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        let class = ctx.class;
        let filter = Filter::of(decl);
        let (head, fetch, empty) = match decl.returns {
            Returns::Count => ("SELECT COUNT(*)".to_string(), "::kiln::sql::fetch_count", Expr::int(0)),
            Returns::One => (format!("SELECT {}", column_list(class)), "::kiln::sql::fetch_optional", Expr::none()),
            Returns::Many => (
                format!("SELECT {}", column_list(class)),
                "::kiln::sql::fetch_all",
                Expr::call("::std::vec::Vec::new", vec![]),
            ),
            other => {
                return Err(Error::generation(
                    ctx.entity(),
                    format!("'{}' cannot be a query returning {other:?}", decl.snake()),
                ));
            }
        };
        let text = format!("{head} FROM {}{}", quote_ident(&table_name(class)), filter.clause);
        let mut stmts = filter.empty_guards(empty);
        let (query, query_ref) = query_stmt(text, filter.placeholder_parts());
        stmts.push(query);
        let (arg_stmts, args) = self.filter_args(&filter, None);
        stmts.extend(arg_stmts);
        stmts.push(Expr::call(fetch, vec![self.executor_ref.clone(), Expr::ident("ctx"), query_ref, args]).tail());
        Ok(stmts)
    }

    fn update_by(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        let filter = Filter::of(decl);
        let mut stmts = vec![
            Expr::if_(
                Expr::ident("updates").method("is_empty", vec![]),
                vec![Expr::ret(Expr::ok_unit()).stmt()],
            )
            .stmt(),
        ];
        stmts.extend(filter.empty_guards(Expr::unit()));
        let text = format!("UPDATE {} SET %s{}", quote_ident(&table_name(ctx.class)), filter.clause);
        let mut parts = vec![Expr::call("::kiln::sql::set_clause", vec![Expr::ident("updates")])];
        parts.extend(filter.placeholder_parts());
        let (query, query_ref) = query_stmt(text, parts);
        stmts.push(query);
        let (arg_stmts, args) = self.filter_args(&filter, Some(Expr::ident("updates").method("values", vec![])));
        stmts.extend(arg_stmts);
        stmts.push(self.executor.clone().method("exec", vec![Expr::ident("ctx"), query_ref, args]).try_().stmt());
        stmts.push(Expr::ok_unit().tail());
        Ok(stmts)
    }

    fn delete_by(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        let filter = Filter::of(decl);
        let mut stmts = filter.empty_guards(Expr::unit());
        let text = format!("DELETE FROM {}{}", quote_ident(&table_name(ctx.class)), filter.clause);
        let (query, query_ref) = query_stmt(text, filter.placeholder_parts());
        stmts.push(query);
        let (arg_stmts, args) = self.filter_args(&filter, None);
        stmts.extend(arg_stmts);
        stmts.push(self.executor.clone().method("exec", vec![Expr::ident("ctx"), query_ref, args]).try_().stmt());
        stmts.push(Expr::ok_unit().tail());
        Ok(stmts)
    }
}

impl Hooks for SqlBackend {
    fn name(&self) -> &str {
        "sql"
    }

    fn hook_points(&self) -> Vec<HookPoint> {
        HookPoint::backend_points()
    }

    fn struct_fields(&self, _class: &Class) -> Vec<Field> {
        vec![Field::new("executor", Type::path("::kiln::sql::Executor").dyn_().arc())]
    }

    /// The constructor takes one argument per implementation field.
    fn declare(&self, ctx: &HookContext<'_>, decl: &mut MethodDecl) -> Result<()> {
        if decl.op == Operation::Constructor {
            decl.args = ctx.fields.iter().map(field_arg).collect();
        }
        Ok(())
    }

    fn main(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        Statements::direct().body(ctx, decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Name, TypeRef};
    use crate::generate::decl::{MethodName, key_arg, plural_arg};
    use crate::ir::{FnDecl, Item, Module, RustPrinter};

    fn user() -> Class {
        let mut class = Class::new("user");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("name", TypeRef::parse("string")),
            Member::new("group_id", TypeRef::parse("u64")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    fn render(class: &Class, decl: &MethodDecl) -> String {
        let fields = SqlBackend.struct_fields(class);
        let ctx = HookContext {
            class,
            impl_name: "UserDaoImpl",
            fields: &fields,
            backend: &SqlBackend,
        };
        let body = SqlBackend.main(&ctx, decl).unwrap();
        let module = Module {
            items: vec![Item::Fn(FnDecl::new("body").body(body))],
            ..Module::default()
        };
        RustPrinter::new("sql.rs").print(&module).unwrap()
    }

    #[test]
    fn test_create_assigns_generated_key() {
        let class = user();
        let decl = MethodDecl::new(Operation::Create, MethodName::verb("create"), Returns::Unit);
        let out = render(&class, &decl);
        assert!(out.contains("INSERT INTO `users` (`id`, `name`, `group_id`) VALUES (?, ?, ?)"), "{out}");
        assert!(out.contains("value.id = result.last_insert_id.try_into().map_err(::kiln::Error::conversion)?"), "{out}");
    }

    #[test]
    fn test_find_by_plural_substitutes_placeholders() {
        let class = user();
        let id = class.member_by_name("id").unwrap();
        let decl = MethodDecl::new(Operation::FindByPlural, MethodName::keyed("find_by", vec![Name::new("id")], true), Returns::Many)
            .arg(plural_arg(&class, id).unwrap());
        let out = render(&class, &decl);
        assert!(out.contains("if ids.is_empty()"), "{out}");
        assert!(out.contains("WHERE `id` IN (%s)"), "{out}");
        assert!(out.contains("::kiln::sql::placeholders(ids.len())"), "{out}");
        assert!(out.contains("::kiln::sql::fetch_all(self.executor.as_ref(), ctx, &query, &args)"), "{out}");
    }

    #[test]
    fn test_count_with_scope() {
        let class = user();
        let group = class.member_by_name("group_id").unwrap();
        let decl = MethodDecl::new(Operation::Count, MethodName::verb("count"), Returns::Count)
            .arg(key_arg(&class, group).unwrap());
        let out = render(&class, &decl);
        assert!(out.contains("SELECT COUNT(*) FROM `users` WHERE `group_id` = ?"), "{out}");
        assert!(out.contains("::kiln::sql::fetch_count"), "{out}");
    }

    #[test]
    fn test_nullable_key_matches_null_rows() {
        let mut class = user();
        class.members[2].nullable = true;
        let group = class.member_by_name("group_id").unwrap();
        let name = class.member_by_name("name").unwrap();
        let decl = MethodDecl::new(
            Operation::FindBy,
            MethodName::keyed("find_by", vec![Name::new("name"), Name::new("group_id")], false),
            Returns::Many,
        )
        .arg(key_arg(&class, name).unwrap())
        .arg(key_arg(&class, group).unwrap());
        let out = render(&class, &decl);
        assert!(out.contains("FROM `users` WHERE `name` = ? AND %s"), "{out}");
        assert!(out.contains("if group_id.is_none() {"), "{out}");
        assert!(out.contains(r#""`group_id` IS NULL".to_string()"#), "{out}");
        assert!(out.contains(r#""`group_id` = ?".to_string()"#), "{out}");
        assert!(out.contains("if group_id.is_some() {"), "{out}");
        assert!(out.contains("args.push(::kiln::ToValue::to_value(name))"), "{out}");
    }

    #[test]
    fn test_update_by_appends_key_after_updates() {
        let class = user();
        let group = class.member_by_name("group_id").unwrap();
        let decl = MethodDecl::new(Operation::UpdateBy, MethodName::keyed("update_by", vec![Name::new("group_id")], false), Returns::Unit)
            .arg(key_arg(&class, group).unwrap());
        let out = render(&class, &decl);
        assert!(out.contains("UPDATE `users` SET %s WHERE `group_id` = ?"), "{out}");
        assert!(out.contains("updates.values()"), "{out}");
        assert!(out.contains("args.push(::kiln::ToValue::to_value(&group_id))"), "{out}");
    }
}
