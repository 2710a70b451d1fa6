use super::{HookContext, HookPoint, Hooks, Operation, Phase};
use crate::entity::{Member, PrimitiveKind};
use crate::error::{Error, Result};
use crate::generate::decl::MethodDecl;
use crate::generate::types;
use crate::ir::{Expr, Stmt};

/// Stamps `created_at`/`updated_at` with the request time carried by the context.
pub struct RequestTimePlugin;

impl RequestTimePlugin {
    fn stamp(&self, ctx: &HookContext<'_>, columns: &[&str]) -> Result<Vec<Stmt>> {
        let members = columns
            .iter()
            .filter_map(|name| ctx.class.columns().find(|m| m.name.snake() == *name))
            .collect::<Vec<&Member>>();
        if members.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmts = vec![Stmt::let_(
            "now",
            Expr::ident("ctx").method("request_time", vec![]).try_(),
        )];
        for member in members {
            if types::kind(member) != Some(PrimitiveKind::Time) || types::is_custom(member) {
                return Err(Error::generation(
                    ctx.entity(),
                    format!("'{}' must be a time member to be stamped", member.name),
                ));
            }
            let now = if member.nullable {
                Expr::some(Expr::ident("now"))
            } else {
                Expr::ident("now")
            };
            stmts.push(Expr::ident("value").field(&member.name.snake()).assign(now).stmt());
        }
        Ok(stmts)
    }
}

impl Hooks for RequestTimePlugin {
    fn name(&self) -> &str {
        "request-time"
    }

    fn hook_points(&self) -> Vec<HookPoint> {
        vec![
            HookPoint::new(Operation::Create, Phase::Before),
            HookPoint::new(Operation::Update, Phase::Before),
        ]
    }

    fn before(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        match decl.op {
            Operation::Create => self.stamp(ctx, &["created_at", "updated_at"]),
            Operation::Update => self.stamp(ctx, &["updated_at"]),
            _ => Ok(Vec::new()),
        }
    }
}
