use super::{Renderer, writer};
use crate::entity::{Member, PrimitiveKind};
use crate::error::Result;
use crate::generate::types;
use crate::ir::{Expr, Stmt, Type};

/// Renders into a `serde_json::Value` object through `::kiln::render::MapWriter`.
///
/// Values go through serde as they are, except times, which become unix timestamps.
pub struct MapRenderer;

impl Renderer for MapRenderer {
    fn protocol(&self) -> &'static str {
        "map"
    }

    fn plain_trait(&self) -> &'static str {
        "::kiln::ToMap"
    }

    fn plain_method(&self) -> &'static str {
        "to_map"
    }

    fn option_trait(&self) -> &'static str {
        "::kiln::ToMapWithOption"
    }

    fn option_method(&self) -> &'static str {
        "to_map_with_option"
    }

    fn output(&self) -> Type {
        Type::path("::kiln::serde_json::Value")
    }

    fn writer(&self) -> &'static str {
        "::kiln::render::MapWriter"
    }

    fn column(&self, key: &str, member: &Member, place: Expr) -> Result<Stmt> {
        let time = types::kind(member) == Some(PrimitiveKind::Time) && !types::is_custom(member);
        let value = match (time, member.nullable) {
            (true, false) => place.method("timestamp", vec![]).reference(),
            (true, true) => place
                .method("as_ref", vec![])
                .method("map", vec![Expr::closure(vec!["t"], Expr::ident("t").method("timestamp", vec![]))])
                .reference(),
            (false, _) => place.reference(),
        };
        Ok(writer().method("value", vec![Expr::str(key), value]).try_().stmt())
    }

    fn nested(&self, key: &str, rendered: Expr) -> Stmt {
        writer().method("nested", vec![Expr::str(key), rendered]).stmt()
    }

    fn inline(&self, rendered: Expr) -> Stmt {
        writer().method("inline", vec![rendered]).try_().stmt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::render::tests::{order, print_impls};

    #[test]
    fn test_values_and_timestamps() {
        let out = print_impls(&MapRenderer, &order());
        assert!(out.contains(r#"w.value("id", &self.value.id)?;"#), "{out}");
        assert!(out.contains(r#"w.value("createdAt", &self.value.created_at.timestamp())?;"#), "{out}");
        assert!(out.contains("let mut w = ::kiln::render::MapWriter::new();"), "{out}");
    }

    #[test]
    fn test_nullable_time() {
        let mut class = order();
        class.members[3].nullable = true;
        let out = print_impls(&MapRenderer, &class);
        assert!(out.contains("self.value.created_at.as_ref().map(|t| t.timestamp())"), "{out}");
    }

    #[test]
    fn test_relation_is_nested_value() {
        let out = print_impls(&MapRenderer, &order());
        assert!(out.contains(r#"w.nested("customer", ::kiln::ToMap::to_map(&customer, ctx)?);"#), "{out}");
    }
}
