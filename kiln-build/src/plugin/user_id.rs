use super::{HookContext, HookPoint, Hooks, Operation, Phase};
use crate::entity::{Class, Member};
use crate::error::Result;
use crate::generate::decl::{self, Arg, MethodDecl};
use crate::generate::types;
use crate::ir::{Expr, Field, FnDecl, Receiver, Stmt, Type};

const USER_ID: &str = "user_id";

/// Scopes entities named `user_*` to the user the data-access handle was built for.
///
/// The handle gets a `user_id` field and constructor argument. `find_all` and `count` filter by it, and
/// keyed methods whose key starts with or contains `user_id` take it from the handle instead of an argument.
pub struct UserIdPlugin;

impl UserIdPlugin {
    fn applies(class: &Class) -> bool {
        class.name.snake().starts_with("user_")
    }

    fn column(class: &Class) -> Option<&Member> {
        class.columns().find(|m| m.name.snake() == USER_ID)
    }

    fn handle_binding() -> Stmt {
        Stmt::let_(USER_ID, Expr::self_().field(USER_ID))
    }

    /// The declaration as the backend expects it: `user_id` back in its key position.
    fn restored(class: &Class, decl: &MethodDecl, member: &Member) -> Result<MethodDecl> {
        let mut restored = decl.clone();
        let position = decl
            .key_members
            .iter()
            .position(|m| m.snake() == USER_ID)
            .map_or(restored.args.len(), |idx| (idx + 1).min(restored.args.len()));
        restored.args.insert(position, decl::key_arg(class, member)?);
        Ok(restored)
    }
}

impl Hooks for UserIdPlugin {
    fn name(&self) -> &str {
        "user-id"
    }

    fn hook_points(&self) -> Vec<HookPoint> {
        let mut points = vec![
            HookPoint::new(Operation::Constructor, Phase::Declare),
            HookPoint::new(Operation::FindAll, Phase::Main),
            HookPoint::new(Operation::Count, Phase::Main),
        ];
        for op in [Operation::FindBy, Operation::UpdateBy, Operation::DeleteBy] {
            points.push(HookPoint::new(op, Phase::Declare));
            points.push(HookPoint::new(op, Phase::Main));
        }
        points
    }

    fn struct_fields(&self, class: &Class) -> Vec<Field> {
        if Self::applies(class) {
            vec![Field::new(USER_ID, Type::path("u64"))]
        } else {
            Vec::new()
        }
    }

    fn declare(&self, ctx: &HookContext<'_>, decl: &mut MethodDecl) -> Result<()> {
        ctx.backend.declare(ctx, decl)?;
        if !Self::applies(ctx.class) {
            return Ok(());
        }
        match decl.op {
            Operation::Constructor => {
                if !decl.has_arg(USER_ID) {
                    decl.args.push(Arg::extra(USER_ID, Type::path("u64"), true));
                }
            }
            Operation::FindBy | Operation::UpdateBy | Operation::DeleteBy => {
                // a method keyed by user_id alone keeps its argument
                if decl.has_arg(USER_ID) && decl.key_args().count() > 1 {
                    decl.args.retain(|a| a.name != USER_ID);
                    decl.name.parts.retain(|p| p.snake() != USER_ID);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn main(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        let member = match Self::column(ctx.class) {
            Some(member) if Self::applies(ctx.class) => member,
            _ => return ctx.backend.main(ctx, decl),
        };
        let scoped = match decl.op {
            Operation::FindAll | Operation::Count => true,
            _ => decl.key_members.iter().any(|m| m.snake() == USER_ID) && !decl.has_arg(USER_ID),
        };
        if !scoped {
            return ctx.backend.main(ctx, decl);
        }
        let restored = Self::restored(ctx.class, decl, member)?;
        let mut stmts = vec![Self::handle_binding()];
        stmts.extend(ctx.backend.main(ctx, &restored)?);
        Ok(stmts)
    }

    /// `is_owned_by(user_id)` on scoped entities with a non-null `user_id` column.
    fn entity_methods(&self, class: &Class) -> Result<Vec<FnDecl>> {
        let member = match Self::column(class) {
            Some(member) if Self::applies(class) && !member.nullable => member,
            _ => return Ok(Vec::new()),
        };
        Ok(vec![
            FnDecl::new("is_owned_by")
                .public()
                .doc("Whether this row belongs to `user_id`.")
                .receiver(Receiver::Ref)
                .param(USER_ID, types::inner_type(&class.name.snake(), member)?)
                .returns(Type::path("bool"))
                .body(vec![Expr::self_().field(USER_ID).eq(Expr::ident(USER_ID)).tail()]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Name, TypeRef};
    use crate::generate::decl::{MethodName, Returns};
    use crate::ir::{FnDecl, Item, Module, RustPrinter};
    use crate::plugin::SqlBackend;

    fn user_skill() -> Class {
        let mut class = Class::new("user_skill");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("user_id", TypeRef::parse("u64")),
            Member::new("skill_id", TypeRef::parse("u64")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    fn find_by_user_and_skill(class: &Class) -> MethodDecl {
        let mut decl = MethodDecl::new(
            Operation::FindBy,
            MethodName::keyed("find_by", vec![Name::new("user_id"), Name::new("skill_id")], false),
            Returns::One,
        );
        for name in ["user_id", "skill_id"] {
            decl = decl.arg(decl::key_arg(class, class.member_by_name(name).unwrap()).unwrap());
        }
        decl.key_members = vec![Name::new("user_id"), Name::new("skill_id")];
        decl
    }

    fn print(stmts: Vec<Stmt>) -> String {
        let module = Module {
            items: vec![Item::Fn(FnDecl::new("body").body(stmts))],
            ..Module::default()
        };
        RustPrinter::new("user_skill.rs").print(&module).unwrap()
    }

    fn print_items(methods: Vec<FnDecl>) -> String {
        let module = Module {
            items: methods.into_iter().map(Item::Fn).collect(),
            ..Module::default()
        };
        RustPrinter::new("user_skill.rs").print(&module).unwrap()
    }

    #[test]
    fn test_keyed_method_takes_user_from_handle() {
        let class = user_skill();
        let fields = [Field::new("executor", Type::path("E")), Field::new(USER_ID, Type::path("u64"))];
        let ctx = HookContext {
            class: &class,
            impl_name: "UserSkillDaoImpl",
            fields: &fields,
            backend: &SqlBackend,
        };
        let mut decl = find_by_user_and_skill(&class);
        UserIdPlugin.declare(&ctx, &mut decl).unwrap();
        assert_eq!(decl.snake(), "find_by_skill_id");
        assert!(!decl.has_arg(USER_ID));
        let out = print(UserIdPlugin.main(&ctx, &decl).unwrap());
        assert!(out.contains("let user_id = self.user_id;"), "{out}");
        assert!(out.contains("WHERE `user_id` = ? AND `skill_id` = ?"), "{out}");
    }

    #[test]
    fn test_constructor_gains_user_argument() {
        let class = user_skill();
        let fields = [Field::new("executor", Type::path("E")), Field::new(USER_ID, Type::path("u64"))];
        let ctx = HookContext {
            class: &class,
            impl_name: "UserSkillDaoImpl",
            fields: &fields,
            backend: &SqlBackend,
        };
        let mut decl = MethodDecl::new(Operation::Constructor, MethodName::verb("new"), Returns::Handle);
        UserIdPlugin.declare(&ctx, &mut decl).unwrap();
        let names: Vec<_> = decl.args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["executor", "user_id"]);
    }

    #[test]
    fn test_scoped_entities_gain_ownership_check() {
        let methods = UserIdPlugin.entity_methods(&user_skill()).unwrap();
        assert_eq!(methods.len(), 1);
        let out = print_items(methods);
        assert!(out.contains("pub fn is_owned_by(&self, user_id: u64) -> bool {"), "{out}");
        assert!(out.contains("self.user_id == user_id"), "{out}");

        let mut nullable = user_skill();
        nullable.members[1].nullable = true;
        assert!(UserIdPlugin.entity_methods(&nullable).unwrap().is_empty());
    }

    #[test]
    fn test_other_entities_delegate_to_backend() {
        let mut class = user_skill();
        class.name = Name::new("skill");
        assert!(UserIdPlugin.struct_fields(&class).is_empty());
        let ctx = HookContext {
            class: &class,
            impl_name: "SkillDaoImpl",
            fields: &[],
            backend: &SqlBackend,
        };
        let decl = MethodDecl::new(Operation::Count, MethodName::verb("count"), Returns::Count);
        let out = print(UserIdPlugin.main(&ctx, &decl).unwrap());
        assert!(!out.contains("user_id"), "{out}");
    }
}
