use super::{HookContext, HookPoint, Hooks, Operation, Phase};
use crate::error::Result;
use crate::generate::decl::MethodDecl;
use crate::ir::{Expr, Stmt};

/// Reports successful writes to the context's audit sink; a failing sink becomes a delayed error.
pub struct AuditPlugin;

impl Hooks for AuditPlugin {
    fn name(&self) -> &str {
        "audit"
    }

    fn hook_points(&self) -> Vec<HookPoint> {
        [Operation::Create, Operation::Update, Operation::Delete]
            .into_iter()
            .map(|op| HookPoint::new(op, Phase::After))
            .collect()
    }

    fn after(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        let action = match decl.op {
            Operation::Create | Operation::Update | Operation::Delete => decl.op.as_str(),
            _ => return Ok(Vec::new()),
        };
        let value = Expr::call("::kiln::ToValue::to_value", vec![Expr::ident("value").deref().reference()]);
        let audit = Expr::ident("ctx").method(
            "audit",
            vec![Expr::str(ctx.entity()), Expr::str(action), value.reference()],
        );
        let check = Expr::ident("delayed").method("check", vec![audit]).stmt();
        Ok(vec![
            Expr::if_(Expr::ident("result").method("is_ok", vec![]), vec![check]).stmt(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Class;
    use crate::generate::decl::{MethodName, Returns};
    use crate::ir::{FnDecl, Item, Module, RustPrinter};
    use crate::plugin::SqlBackend;

    #[test]
    fn test_after_update_records_delayed_error() {
        let class = Class::new("user");
        let ctx = HookContext {
            class: &class,
            impl_name: "UserDaoImpl",
            fields: &[],
            backend: &SqlBackend,
        };
        let decl = MethodDecl::new(Operation::Update, MethodName::verb("update"), Returns::Unit);
        let module = Module {
            items: vec![Item::Fn(FnDecl::new("body").body(AuditPlugin.after(&ctx, &decl).unwrap()))],
            ..Module::default()
        };
        let out = RustPrinter::new("user.rs").print(&module).unwrap();
        assert!(out.contains("if result.is_ok()"), "{out}");
        assert!(out.contains("delayed.check("), "{out}");
        assert!(out.contains(r#""user""#) && out.contains(r#""update""#), "{out}");
        assert!(out.contains("::kiln::ToValue::to_value(&*value)"), "{out}");
    }
}
