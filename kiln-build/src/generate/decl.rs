//! Method declarations shared by the data-access trait, its implementation, the repository and the mock.
//!
//! A declaration is derived once per entity and consumed by every emitter, so the real implementation
//! and its mock always agree on names, arguments and returns.

use std::fmt;

use crate::entity::{Class, Member, Name};
use crate::error::Result;
use crate::generate::types::{self, ArgPass};
use crate::ir::{FnDecl, Receiver, Type};
use crate::plugin::Operation;

/// Name of a generated method, e.g. `find_by_customer_id_and_order_number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodName {
    pub verb: Name,
    pub parts: Vec<Name>,
    /// The last part is pluralised.
    pub plural: bool,
}

impl MethodName {
    pub fn verb(verb: &str) -> Self {
        Self {
            verb: Name::new(verb),
            parts: Vec::new(),
            plural: false,
        }
    }

    pub fn keyed(verb: &str, parts: Vec<Name>, plural: bool) -> Self {
        Self {
            verb: Name::new(verb),
            parts,
            plural,
        }
    }

    pub fn snake(&self) -> String {
        let mut out = self.verb.snake();
        let last = self.parts.len().saturating_sub(1);
        for (idx, part) in self.parts.iter().enumerate() {
            out.push_str(if idx == 0 { "_" } else { "_and_" });
            if self.plural && idx == last {
                out.push_str(&part.plural_snake());
            } else {
                out.push_str(&part.snake());
            }
        }
        out
    }

    /// Camel form used in docs and mock messages, e.g. `FindByCustomerIDs`.
    pub fn camel(&self) -> String {
        let parts: Vec<String> = self
            .parts
            .iter()
            .enumerate()
            .map(|(idx, part)| {
                if self.plural && idx + 1 == self.parts.len() {
                    part.plural_camel()
                } else {
                    part.camel()
                }
            })
            .collect();
        format!("{}{}", self.verb.camel(), parts.join("And"))
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.snake())
    }
}

/// What an argument carries; emitters use it to convert and forward the argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgKind {
    /// The request context, always first.
    Context,
    /// The entity value; `mutable` for create, which assigns generated keys.
    Entity { mutable: bool },
    /// Exact-match key member.
    Key(Member),
    /// A set of values of one key member.
    Plural(Member),
    /// Column assignments of `update_by_*`.
    Updates,
    /// Anything a plugin adds, such as a constructor argument.
    Extra { copy: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: String,
    pub ty: Type,
    pub kind: ArgKind,
}

impl Arg {
    pub fn context() -> Self {
        Self {
            name: "ctx".into(),
            ty: Type::path("::kiln::Context").reference(),
            kind: ArgKind::Context,
        }
    }

    pub fn extra(name: &str, ty: Type, copy: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: ArgKind::Extra { copy },
        }
    }

    /// Member behind a key or plural argument.
    pub fn member(&self) -> Option<&Member> {
        match &self.kind {
            ArgKind::Key(member) | ArgKind::Plural(member) => Some(member),
            _ => None,
        }
    }
}

/// Result shape of an operation before layer specific types are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returns {
    Unit,
    Count,
    /// At most one entity.
    One,
    /// A collection of entities.
    Many,
    /// The constructed data-access handle.
    Handle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub op: Operation,
    pub name: MethodName,
    pub args: Vec<Arg>,
    pub returns: Returns,
    /// Key members the method was derived from, in key order.
    pub key_members: Vec<Name>,
    /// Also declared by the entity's finder trait, because a relation loads through it.
    pub finder: bool,
    pub doc: Option<String>,
}

impl MethodDecl {
    pub fn new(op: Operation, name: MethodName, returns: Returns) -> Self {
        Self {
            op,
            name,
            args: vec![Arg::context()],
            returns,
            key_members: Vec::new(),
            finder: false,
            doc: None,
        }
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn snake(&self) -> String {
        self.name.snake()
    }

    pub fn arg_by_name(&self, name: &str) -> Option<&Arg> {
        self.args.iter().find(|a| a.name == name)
    }

    /// Exact or plural key arguments, in declaration order.
    pub fn key_args(&self) -> impl Iterator<Item = &Arg> {
        self.args.iter().filter(|a| a.member().is_some())
    }

    pub fn has_arg(&self, name: &str) -> bool {
        self.arg_by_name(name).is_some()
    }

    /// Trait method signature with the given return type; the body is filled in by the caller.
    pub fn signature(&self, ret: Type) -> FnDecl {
        let mut decl = FnDecl::new(&self.snake()).receiver(Receiver::Ref);
        for arg in &self.args {
            decl = decl.param(&arg.name, arg.ty.clone());
        }
        decl.ret = Some(ret);
        if let Some(doc) = &self.doc {
            decl = decl.doc(doc.clone());
        }
        decl
    }
}

/// Types a layer substitutes into [`Returns`].
#[derive(Debug, Clone)]
pub struct ReturnTypes {
    pub one: Type,
    pub many: Type,
}

impl ReturnTypes {
    /// Plain return type, not wrapped in `::kiln::Result`.
    pub fn of(&self, returns: Returns) -> Type {
        match returns {
            Returns::Unit | Returns::Handle => Type::unit(),
            Returns::Count => Type::path("i64"),
            Returns::One => self.one.clone().option(),
            Returns::Many => self.many.clone(),
        }
    }
}

/// Argument of an exact-match key method over `member`.
pub fn key_arg(class: &Class, member: &Member) -> Result<Arg> {
    Ok(Arg {
        name: member.name.snake(),
        ty: types::key_arg_type(&class.name.snake(), member)?,
        kind: ArgKind::Key(member.clone()),
    })
}

/// Argument of a plural key method over `member`.
pub fn plural_arg(class: &Class, member: &Member) -> Result<Arg> {
    Ok(Arg {
        name: member.name.plural_snake(),
        ty: types::plural_arg_type(&class.name.snake(), member)?,
        kind: ArgKind::Plural(member.clone()),
    })
}

/// Whether the argument is used by value when forwarded.
pub fn is_copy(arg: &Arg) -> bool {
    match &arg.kind {
        ArgKind::Key(member) => types::key_pass(member) == ArgPass::Value,
        ArgKind::Extra { copy } => *copy,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_name_forms() {
        let name = MethodName::keyed("find_by", vec![Name::new("customer_id"), Name::new("order_number")], false);
        assert_eq!(name.snake(), "find_by_customer_id_and_order_number");
        assert_eq!(name.camel(), "FindByCustomerIDAndOrderNumber");
        let plural = MethodName::keyed("find_by", vec![Name::new("customer_id")], true);
        assert_eq!(plural.snake(), "find_by_customer_ids");
        assert_eq!(plural.camel(), "FindByCustomerIDs");
        assert_eq!(MethodName::verb("find_all").camel(), "FindAll");
    }
}
