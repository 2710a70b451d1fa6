use super::{Renderer, writer};
use crate::entity::{Member, RenderKind};
use crate::error::{Error, Result};
use crate::generate::types;
use crate::ir::{Expr, Pat, Stmt, Type};

/// Renders through `::kiln::render::ObjectWriter` into JSON bytes.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Writer call for a non-null value. `value` is a place expression, or a reference when `is_ref`.
    fn write(key: &str, kind: RenderKind, value: Expr, is_ref: bool) -> Stmt {
        let key = Expr::str(key);
        let (copied, borrowed) = if is_ref {
            (value.clone().deref(), value)
        } else {
            (value.clone(), value.reference())
        };
        let (method, arg) = match kind {
            RenderKind::Int => ("int", Expr::call("i64::from", vec![copied])),
            RenderKind::Uint => ("uint", Expr::call("u64::from", vec![copied])),
            RenderKind::Float => ("float", Expr::call("f64::from", vec![copied])),
            RenderKind::Bool => ("bool", copied),
            RenderKind::String => ("string", borrowed),
            RenderKind::Bytes => ("bytes", borrowed),
            RenderKind::Time => ("time", borrowed),
        };
        writer().method(method, vec![key, arg]).stmt()
    }
}

impl Renderer for JsonRenderer {
    fn protocol(&self) -> &'static str {
        "json"
    }

    fn plain_trait(&self) -> &'static str {
        "::kiln::ToJson"
    }

    fn plain_method(&self) -> &'static str {
        "to_json"
    }

    fn option_trait(&self) -> &'static str {
        "::kiln::ToJsonWithOption"
    }

    fn option_method(&self) -> &'static str {
        "to_json_with_option"
    }

    fn output(&self) -> Type {
        Type::path("u8").vec()
    }

    fn writer(&self) -> &'static str {
        "::kiln::render::ObjectWriter"
    }

    fn column(&self, key: &str, member: &Member, place: Expr) -> Result<Stmt> {
        if types::is_custom(member) {
            return Ok(writer()
                .method("serialized", vec![Expr::str(key), place.reference()])
                .try_()
                .stmt());
        }
        let kind = types::kind(member)
            .ok_or_else(|| Error::generation(member.name.snake(), "only columns render as scalars"))?
            .render_kind();
        if !member.nullable {
            return Ok(Self::write(key, kind, place, false));
        }
        Ok(Expr::IfLet {
            pat: Pat::some(Pat::ident("v")),
            expr: Box::new(place.reference()),
            then: crate::ir::Block::new(vec![Self::write(key, kind, Expr::ident("v"), true)]),
            els: Some(Box::new(Expr::block(vec![
                writer().method("null", vec![Expr::str(key)]).stmt(),
            ]))),
        }
        .stmt())
    }

    fn nested(&self, key: &str, rendered: Expr) -> Stmt {
        writer().method("nested", vec![Expr::str(key), rendered.reference()]).stmt()
    }

    fn inline(&self, rendered: Expr) -> Stmt {
        writer().method("inline", vec![rendered.reference()]).try_().stmt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TypeRef;
    use crate::generate::render::tests::{order, print_impls};

    #[test]
    fn test_column_kinds() {
        let out = print_impls(&JsonRenderer, &order());
        assert!(out.contains(r#"w.uint("id", u64::from(self.value.id));"#), "{out}");
        assert!(out.contains(r#"w.float("total", f64::from(self.value.total));"#), "{out}");
        assert!(out.contains(r#"w.time("createdAt", &self.value.created_at);"#), "{out}");
        assert!(out.contains("let mut w = ::kiln::render::ObjectWriter::new();"), "{out}");
        assert!(out.contains("Ok(w.finish())"), "{out}");
    }

    #[test]
    fn test_nullable_column_writes_null() {
        let mut class = order();
        class.members[2].nullable = true;
        let out = print_impls(&JsonRenderer, &class);
        assert!(out.contains("if let Some(v) = &self.value.total {"), "{out}");
        assert!(out.contains(r#"w.float("total", f64::from(*v));"#), "{out}");
        assert!(out.contains(r#"w.null("total");"#), "{out}");
    }

    #[test]
    fn test_relation_nested_and_inline() {
        let out = print_impls(&JsonRenderer, &order());
        assert!(out.contains(r#"::kiln::render::render_error("customer", e)"#), "{out}");
        assert!(out.contains("::kiln::ToJson::to_json(&customer, ctx)?"), "{out}");

        let mut class = order();
        let relation = class.members.iter_mut().find(|m| m.relation.is_some()).unwrap();
        relation.render = Some(crate::entity::RenderMeta {
            inline: true,
            ..Default::default()
        });
        let out = print_impls(&JsonRenderer, &class);
        assert!(out.contains("w.inline(&::kiln::ToJson::to_json(&customer, ctx)?)?;"), "{out}");
    }

    #[test]
    fn test_custom_type_is_serialized() {
        let mut class = order();
        class.members.push(Member::new(
            "level",
            TypeRef::Custom {
                name: "Level".into(),
                path: None,
                underlying: crate::entity::PrimitiveKind::U8,
            },
        ));
        let out = print_impls(&JsonRenderer, &class);
        assert!(out.contains(r#"w.serialized("level", &self.value.level)?;"#), "{out}");
    }
}
