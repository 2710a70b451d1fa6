//! Rust types and value conversions for entity members.

use crate::entity::{Member, PrimitiveKind, TypeRef};
use crate::error::{Error, Result};
use crate::ir::{Expr, Type};

/// How a key argument is passed to generated methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPass {
    /// By value, for `Copy` kinds.
    Value,
    /// By reference: `&str`, `&[u8]`, custom types and nullable members.
    Ref,
}

pub fn kind_type(kind: PrimitiveKind) -> Type {
    match kind {
        PrimitiveKind::String => Type::path("String"),
        PrimitiveKind::Bytes => Type::path("u8").vec(),
        PrimitiveKind::Time => time_type(),
        other => Type::path(other.as_str()),
    }
}

pub fn time_type() -> Type {
    Type::generic("::kiln::chrono::DateTime", vec![Type::path("::kiln::chrono::Utc")])
}

/// The owned storage type of a column type, without nullability.
pub fn storage_type(ty: &TypeRef) -> Option<Type> {
    match ty {
        TypeRef::Primitive(kind) => Some(kind_type(*kind)),
        TypeRef::Custom { name, path, .. } => Some(match path {
            Some(path) => Type::path(&format!("{path}::{name}")),
            None => Type::path(name),
        }),
        TypeRef::Class(_) => None,
    }
}

/// Field type of a column member.
pub fn member_type(entity: &str, member: &Member) -> Result<Type> {
    let inner = inner_type(entity, member)?;
    Ok(if member.nullable { inner.option() } else { inner })
}

/// Column type of `member` ignoring nullability.
pub fn inner_type(entity: &str, member: &Member) -> Result<Type> {
    member
        .ty
        .as_ref()
        .and_then(storage_type)
        .ok_or_else(|| Error::generation(entity, format!("member '{}' is not stored in a column", member.name)))
}

pub fn is_custom(member: &Member) -> bool {
    matches!(member.ty, Some(TypeRef::Custom { .. }))
}

pub fn kind(member: &Member) -> Option<PrimitiveKind> {
    member.ty.as_ref().and_then(TypeRef::storage_kind)
}

/// Passing convention of an exact-match key argument.
pub fn key_pass(member: &Member) -> ArgPass {
    match kind(member) {
        Some(kind) if kind.is_copy() && !member.nullable && !is_custom(member) => ArgPass::Value,
        _ => ArgPass::Ref,
    }
}

/// Parameter type of an exact-match key argument.
pub fn key_arg_type(entity: &str, member: &Member) -> Result<Type> {
    if key_pass(member) == ArgPass::Value {
        return inner_type(entity, member);
    }
    if member.nullable || is_custom(member) {
        return Ok(member_type(entity, member)?.reference());
    }
    Ok(match kind(member) {
        Some(PrimitiveKind::String) => Type::path("str").reference(),
        Some(PrimitiveKind::Bytes) => Type::path("u8").slice().reference(),
        _ => inner_type(entity, member)?.reference(),
    })
}

/// Parameter type of a plural key argument. Null never matches `IN`, so elements are never optional.
pub fn plural_arg_type(entity: &str, member: &Member) -> Result<Type> {
    Ok(inner_type(entity, member)?.slice().reference())
}

/// Key argument passing of the non-null part of `member`, used for relation keys.
pub fn inner_pass(member: &Member) -> ArgPass {
    match kind(member) {
        Some(kind) if kind.is_copy() && !is_custom(member) => ArgPass::Value,
        _ => ArgPass::Ref,
    }
}

/// Parameter type of the non-null part of `member`.
pub fn inner_arg_type(entity: &str, member: &Member) -> Result<Type> {
    if inner_pass(member) == ArgPass::Value {
        return inner_type(entity, member);
    }
    Ok(match kind(member) {
        Some(PrimitiveKind::String) if !is_custom(member) => Type::path("str").reference(),
        Some(PrimitiveKind::Bytes) if !is_custom(member) => Type::path("u8").slice().reference(),
        _ => inner_type(entity, member)?.reference(),
    })
}

/// `::kiln::Value` of `reference`, an expression of type `&T` (or `&Option<T>` for nullable members).
pub fn value_of(member: &Member, reference: Expr) -> Expr {
    let bytes = kind(member) == Some(PrimitiveKind::Bytes) && !is_custom(member);
    match (bytes, member.nullable) {
        (true, false) => Expr::call("::kiln::Value::from_bytes", vec![reference]),
        (true, true) => reference
            .method("as_ref", vec![])
            .method("map_or", vec![Expr::path("::kiln::Value::Null"), Expr::path("::kiln::Value::from_bytes")]),
        _ => Expr::call("::kiln::ToValue::to_value", vec![reference]),
    }
}

/// `::kiln::Value` of a key argument named `arg`.
pub fn arg_value(member: &Member, arg: &str) -> Expr {
    let reference = match key_pass(member) {
        ArgPass::Value => Expr::ident(arg).reference(),
        ArgPass::Ref => Expr::ident(arg),
    };
    value_of(member, reference)
}

/// `Vec<::kiln::Value>` of a plural key argument named `arg`.
pub fn plural_values(member: &Member, arg: &str) -> Expr {
    let convert = if kind(member) == Some(PrimitiveKind::Bytes) && !is_custom(member) {
        Expr::path("::kiln::Value::from_bytes")
    } else {
        Expr::path("::kiln::ToValue::to_value")
    };
    Expr::ident(arg)
        .method("iter", vec![])
        .method("map", vec![convert])
        .method_turbofish("collect", vec![Type::path("::kiln::Value").vec()], vec![])
}

/// Comparison of a model field with an exact-match key argument of the same member.
///
/// `field` is a place expression such as `v.name`.
pub fn key_matches(member: &Member, field: Expr, arg: &str) -> Expr {
    match key_pass(member) {
        ArgPass::Value => field.eq(Expr::ident(arg)),
        ArgPass::Ref if member.nullable || is_custom(member) => field.eq(Expr::ident(arg).deref()),
        ArgPass::Ref => field.eq(Expr::ident(arg)),
    }
}

/// Comparison of a model field with a key passed as in [`inner_arg_type`].
pub fn inner_matches(member: &Member, field: Expr, arg: &str) -> Expr {
    let value_pass = inner_pass(member) == ArgPass::Value;
    match (member.nullable, value_pass) {
        (false, true) => field.eq(Expr::ident(arg)),
        (false, false) if is_custom(member) => field.eq(Expr::ident(arg).deref()),
        (false, false) => field.eq(Expr::ident(arg)),
        (true, true) => field.eq(Expr::some(Expr::ident(arg))),
        (true, false) if is_custom(member) => field.method("as_ref", vec![]).eq(Expr::some(Expr::ident(arg))),
        (true, false) => field.method("as_deref", vec![]).eq(Expr::some(Expr::ident(arg))),
    }
}

/// Turn an owned value of the non-null part of `member` into the argument form of [`inner_arg_type`].
pub fn inner_arg(member: &Member, owned: Expr) -> Expr {
    match inner_pass(member) {
        ArgPass::Value => owned,
        ArgPass::Ref => owned.reference(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Item, Module, RustPrinter, Stmt};

    fn member(ty: &str, nullable: bool) -> Member {
        let mut member = Member::new("key", TypeRef::parse(ty));
        member.nullable = nullable;
        member
    }

    fn print_type(ty: Type) -> String {
        let module = Module {
            items: vec![Item::TypeAlias {
                name: "T".into(),
                vis: Default::default(),
                doc: None,
                ty,
            }],
            ..Module::default()
        };
        RustPrinter::new("t.rs").print(&module).unwrap()
    }

    #[test]
    fn test_key_argument_types() {
        assert!(print_type(key_arg_type("e", &member("u64", false)).unwrap()).contains("type T = u64;"));
        assert!(print_type(key_arg_type("e", &member("string", false)).unwrap()).contains("type T = &str;"));
        assert!(print_type(key_arg_type("e", &member("bytes", false)).unwrap()).contains("type T = &[u8];"));
        assert!(print_type(key_arg_type("e", &member("u64", true)).unwrap()).contains("type T = &Option<u64>;"));
        assert!(print_type(plural_arg_type("e", &member("string", true)).unwrap()).contains("type T = &[String];"));
    }

    #[test]
    fn test_time_is_passed_by_value() {
        assert_eq!(key_pass(&member("time", false)), ArgPass::Value);
        let printed = print_type(key_arg_type("e", &member("time", false)).unwrap());
        assert!(printed.contains("::kiln::chrono::DateTime<::kiln::chrono::Utc>"), "{printed}");
    }

    #[test]
    fn test_bytes_value_conversion() {
        let module = Module {
            items: vec![Item::Fn(crate::ir::FnDecl::new("f").body(vec![Stmt::let_(
                "v",
                arg_value(&member("bytes", false), "key"),
            )]))],
            ..Module::default()
        };
        let printed = RustPrinter::new("t.rs").print(&module).unwrap();
        assert!(printed.contains("::kiln::Value::from_bytes(key)"), "{printed}");
    }
}
