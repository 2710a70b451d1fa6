//! Language-neutral syntax tree the generators build and a printer turns into source text.
//!
//! Generators never produce text directly: they assemble [`Module`]s out of items, statements and
//! expressions, and [`printer::RustPrinter`] renders them.

pub mod printer;

pub use printer::RustPrinter;

/// A path such as `::kiln::Context` or `entity::User`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub global: bool,
    pub segments: Vec<String>,
    pub generics: Vec<Type>,
}

impl Path {
    /// Parse `a::b::c`; a leading `::` marks the path as global.
    pub fn parse(text: &str) -> Self {
        let (global, rest) = match text.strip_prefix("::") {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        Self {
            global,
            segments: rest.split("::").map(str::to_string).collect(),
            generics: Vec::new(),
        }
    }

    pub fn with_generics(mut self, generics: Vec<Type>) -> Self {
        self.generics = generics;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Path(Path),
    /// `&T`, `&mut T`, or `&'a T` when a lifetime is named.
    Ref { mutable: bool, lifetime: Option<String>, inner: Box<Type> },
    Slice(Box<Type>),
    Tuple(Vec<Type>),
    /// `dyn A + B`
    Dyn(Vec<Type>),
    /// `Fn(A, B) -> R` or `FnMut(A, B) -> R`, only meaningful as a bound.
    FnTrait { mutable: bool, args: Vec<Type>, ret: Box<Type> },
    /// `'_`, only meaningful as a generic argument.
    Lifetime(String),
    /// `Item = T`, only meaningful as a generic argument of a trait bound.
    Binding { name: String, ty: Box<Type> },
    SelfType,
}

impl Type {
    pub fn path(text: &str) -> Self {
        Self::Path(Path::parse(text))
    }

    pub fn generic(text: &str, args: Vec<Type>) -> Self {
        Self::Path(Path::parse(text).with_generics(args))
    }

    pub fn unit() -> Self {
        Self::Tuple(Vec::new())
    }

    pub fn binding(name: &str, ty: Type) -> Self {
        Self::Binding {
            name: name.to_string(),
            ty: Box::new(ty),
        }
    }

    /// `Fn(args) -> ret`
    pub fn fn_trait(args: Vec<Type>, ret: Type) -> Self {
        Self::FnTrait {
            mutable: false,
            args,
            ret: Box::new(ret),
        }
    }

    /// `FnMut(args) -> ret`
    pub fn fn_mut_trait(args: Vec<Type>, ret: Type) -> Self {
        Self::FnTrait {
            mutable: true,
            args,
            ret: Box::new(ret),
        }
    }

    pub fn reference(self) -> Self {
        Self::Ref {
            mutable: false,
            lifetime: None,
            inner: Box::new(self),
        }
    }

    pub fn reference_mut(self) -> Self {
        Self::Ref {
            mutable: true,
            lifetime: None,
            inner: Box::new(self),
        }
    }

    /// `&'static Self`
    pub fn reference_static(self) -> Self {
        Self::Ref {
            mutable: false,
            lifetime: Some("'static".into()),
            inner: Box::new(self),
        }
    }

    pub fn slice(self) -> Self {
        Self::Slice(Box::new(self))
    }

    pub fn option(self) -> Self {
        Self::generic("Option", vec![self])
    }

    pub fn vec(self) -> Self {
        Self::generic("Vec", vec![self])
    }

    /// `dyn Self`
    pub fn dyn_(self) -> Self {
        Self::Dyn(vec![self])
    }

    pub fn arc(self) -> Self {
        Self::generic("::std::sync::Arc", vec![self])
    }

    /// `::kiln::Result<T>`
    pub fn kiln_result(self) -> Self {
        Self::generic("::kiln::Result", vec![self])
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Tuple(items) if items.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    Str(String),
    Int(i64),
    /// Always finite.
    Float(f64),
    Bool(bool),
    /// A byte string literal, `b"..."`.
    ByteStr(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    Add,
    Sub,
    Assign,
    AddAssign,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delim {
    Paren,
    Bracket,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pat {
    Wild,
    Ident { name: String, mutable: bool, by_ref: bool },
    /// `Some(x)`, `Ok(v)`, `Self { .. }` style patterns with positional fields.
    TupleStruct { path: Path, elems: Vec<Pat> },
    Path(Path),
    Tuple(Vec<Pat>),
}

impl Pat {
    pub fn ident(name: &str) -> Self {
        Self::Ident {
            name: name.to_string(),
            mutable: false,
            by_ref: false,
        }
    }

    pub fn ident_mut(name: &str) -> Self {
        Self::Ident {
            name: name.to_string(),
            mutable: true,
            by_ref: false,
        }
    }

    pub fn some(inner: Pat) -> Self {
        Self::TupleStruct {
            path: Path::parse("Some"),
            elems: vec![inner],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arm {
    pub pat: Pat,
    pub guard: Option<Expr>,
    pub body: Expr,
}

impl Arm {
    pub fn new(pat: Pat, body: Expr) -> Self {
        Self { pat, guard: None, body }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosureParam {
    pub pat: Pat,
    pub ty: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Path(Path),
    Lit(Lit),
    Field { base: Box<Expr>, name: String },
    MethodCall { receiver: Box<Expr>, method: String, generics: Vec<Type>, args: Vec<Expr> },
    Call { func: Box<Expr>, args: Vec<Expr> },
    Macro { path: Path, delim: Delim, args: Vec<Expr> },
    Ref { mutable: bool, expr: Box<Expr> },
    Deref(Box<Expr>),
    Try(Box<Expr>),
    Unary { op: UnOp, expr: Box<Expr> },
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Struct { path: Path, fields: Vec<(String, Expr)>, rest: Option<Box<Expr>> },
    Closure { is_move: bool, params: Vec<ClosureParam>, ret: Option<Type>, body: Box<Expr> },
    If { cond: Box<Expr>, then: Block, els: Option<Box<Expr>> },
    IfLet { pat: Pat, expr: Box<Expr>, then: Block, els: Option<Box<Expr>> },
    Match { expr: Box<Expr>, arms: Vec<Arm> },
    ForIn { pat: Pat, iter: Box<Expr>, body: Block },
    Block(Block),
    Return(Option<Box<Expr>>),
    Continue,
    Index { base: Box<Expr>, index: Box<Expr> },
    Tuple(Vec<Expr>),
    Array(Vec<Expr>),
    Cast { expr: Box<Expr>, ty: Type },
}

impl Expr {
    pub fn ident(name: &str) -> Self {
        Self::Path(Path::parse(name))
    }

    pub fn path(text: &str) -> Self {
        Self::Path(Path::parse(text))
    }

    pub fn self_() -> Self {
        Self::ident("self")
    }

    pub fn str(text: impl Into<String>) -> Self {
        Self::Lit(Lit::Str(text.into()))
    }

    pub fn int(value: i64) -> Self {
        Self::Lit(Lit::Int(value))
    }

    /// `None` for a non-finite value, which has no literal.
    pub fn float(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self::Lit(Lit::Float(value)))
    }

    pub fn bool(value: bool) -> Self {
        Self::Lit(Lit::Bool(value))
    }

    /// `b"..."`
    pub fn byte_str(text: impl Into<String>) -> Self {
        Self::Lit(Lit::ByteStr(text.into()))
    }

    pub fn unit() -> Self {
        Self::Tuple(Vec::new())
    }

    pub fn ok(value: Expr) -> Self {
        Self::call("Ok", vec![value])
    }

    pub fn ok_unit() -> Self {
        Self::ok(Self::unit())
    }

    pub fn some(value: Expr) -> Self {
        Self::call("Some", vec![value])
    }

    pub fn none() -> Self {
        Self::path("None")
    }

    pub fn call(func: &str, args: Vec<Expr>) -> Self {
        Self::Call {
            func: Box::new(Self::path(func)),
            args,
        }
    }

    pub fn macro_call(path: &str, args: Vec<Expr>) -> Self {
        Self::Macro {
            path: Path::parse(path),
            delim: Delim::Paren,
            args,
        }
    }

    pub fn vec_macro(items: Vec<Expr>) -> Self {
        Self::Macro {
            path: Path::parse("vec"),
            delim: Delim::Bracket,
            args: items,
        }
    }

    pub fn format(template: &str, args: Vec<Expr>) -> Self {
        let mut all = vec![Self::str(template)];
        all.extend(args);
        Self::macro_call("format", all)
    }

    pub fn struct_lit(path: &str, fields: Vec<(&str, Expr)>) -> Self {
        Self::Struct {
            path: Path::parse(path),
            fields: fields.into_iter().map(|(n, e)| (n.to_string(), e)).collect(),
            rest: None,
        }
    }

    pub fn closure(params: Vec<&str>, body: Expr) -> Self {
        Self::Closure {
            is_move: false,
            params: params
                .into_iter()
                .map(|p| ClosureParam {
                    pat: Pat::ident(p),
                    ty: None,
                })
                .collect(),
            ret: None,
            body: Box::new(body),
        }
    }

    pub fn move_closure(params: Vec<&str>, body: Expr) -> Self {
        let mut closure = Self::closure(params, body);
        if let Self::Closure { is_move, .. } = &mut closure {
            *is_move = true;
        }
        closure
    }

    pub fn block(stmts: Vec<Stmt>) -> Self {
        Self::Block(Block::new(stmts))
    }

    pub fn if_(cond: Expr, then: Vec<Stmt>) -> Self {
        Self::If {
            cond: Box::new(cond),
            then: Block::new(then),
            els: None,
        }
    }

    pub fn if_else(cond: Expr, then: Vec<Stmt>, els: Vec<Stmt>) -> Self {
        Self::If {
            cond: Box::new(cond),
            then: Block::new(then),
            els: Some(Box::new(Self::block(els))),
        }
    }

    pub fn if_let(pat: Pat, expr: Expr, then: Vec<Stmt>) -> Self {
        Self::IfLet {
            pat,
            expr: Box::new(expr),
            then: Block::new(then),
            els: None,
        }
    }

    pub fn for_in(pat: Pat, iter: Expr, body: Vec<Stmt>) -> Self {
        Self::ForIn {
            pat,
            iter: Box::new(iter),
            body: Block::new(body),
        }
    }

    pub fn match_(expr: Expr, arms: Vec<Arm>) -> Self {
        Self::Match {
            expr: Box::new(expr),
            arms,
        }
    }

    pub fn ret(value: Expr) -> Self {
        Self::Return(Some(Box::new(value)))
    }

    pub fn field(self, name: &str) -> Self {
        Self::Field {
            base: Box::new(self),
            name: name.to_string(),
        }
    }

    pub fn method(self, name: &str, args: Vec<Expr>) -> Self {
        Self::MethodCall {
            receiver: Box::new(self),
            method: name.to_string(),
            generics: Vec::new(),
            args,
        }
    }

    pub fn method_turbofish(self, name: &str, generics: Vec<Type>, args: Vec<Expr>) -> Self {
        Self::MethodCall {
            receiver: Box::new(self),
            method: name.to_string(),
            generics,
            args,
        }
    }

    pub fn try_(self) -> Self {
        Self::Try(Box::new(self))
    }

    pub fn reference(self) -> Self {
        Self::Ref {
            mutable: false,
            expr: Box::new(self),
        }
    }

    pub fn reference_mut(self) -> Self {
        Self::Ref {
            mutable: true,
            expr: Box::new(self),
        }
    }

    pub fn deref(self) -> Self {
        Self::Deref(Box::new(self))
    }

    pub fn not(self) -> Self {
        Self::Unary {
            op: UnOp::Not,
            expr: Box::new(self),
        }
    }

    pub fn binary(self, op: BinOp, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    pub fn eq(self, rhs: Expr) -> Self {
        self.binary(BinOp::Eq, rhs)
    }

    pub fn assign(self, rhs: Expr) -> Self {
        self.binary(BinOp::Assign, rhs)
    }

    pub fn index(self, index: Expr) -> Self {
        Self::Index {
            base: Box::new(self),
            index: Box::new(index),
        }
    }

    pub fn cast(self, ty: Type) -> Self {
        Self::Cast {
            expr: Box::new(self),
            ty,
        }
    }

    pub fn stmt(self) -> Stmt {
        Stmt::Expr(self)
    }

    pub fn tail(self) -> Stmt {
        Stmt::Tail(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let { pat: Pat, ty: Option<Type>, init: Option<Expr> },
    /// Expression followed by `;`.
    Expr(Expr),
    /// Trailing expression without `;`.
    Tail(Expr),
}

impl Stmt {
    pub fn let_(name: &str, init: Expr) -> Self {
        Self::Let {
            pat: Pat::ident(name),
            ty: None,
            init: Some(init),
        }
    }

    pub fn let_mut(name: &str, init: Expr) -> Self {
        Self::Let {
            pat: Pat::ident_mut(name),
            ty: None,
            init: Some(init),
        }
    }

    pub fn let_typed(name: &str, ty: Type, init: Expr) -> Self {
        Self::Let {
            pat: Pat::ident(name),
            ty: Some(ty),
            init: Some(init),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Visibility {
    #[default]
    Private,
    Public,
    Crate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub path: String,
    /// Comma separated arguments as written, e.g. `Debug, Clone` or `crate = "::kiln::serde"`.
    pub args: Option<String>,
}

impl Attribute {
    pub fn derive(traits: &[&str]) -> Self {
        Self {
            path: "derive".into(),
            args: Some(traits.join(", ")),
        }
    }

    pub fn new(path: &str, args: Option<&str>) -> Self {
        Self {
            path: path.into(),
            args: args.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    pub vis: Visibility,
    pub doc: Option<String>,
    pub attrs: Vec<Attribute>,
}

impl Field {
    pub fn new(name: &str, ty: Type) -> Self {
        Self {
            name: name.to_string(),
            ty,
            vis: Visibility::Private,
            doc: None,
            attrs: Vec::new(),
        }
    }

    pub fn public(mut self) -> Self {
        self.vis = Visibility::Public;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: &str, ty: Type) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Receiver {
    #[default]
    None,
    Ref,
    RefMut,
    Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenericParam {
    pub name: String,
    pub bounds: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FnDecl {
    pub name: String,
    pub vis: Visibility,
    pub doc: Option<String>,
    pub attrs: Vec<Attribute>,
    pub generics: Vec<GenericParam>,
    pub receiver: Receiver,
    pub params: Vec<Param>,
    pub ret: Option<Type>,
    /// `None` declares a trait method without a default body.
    pub body: Option<Block>,
}

impl FnDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn public(mut self) -> Self {
        self.vis = Visibility::Public;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn param(mut self, name: &str, ty: Type) -> Self {
        self.params.push(Param::new(name, ty));
        self
    }

    pub fn generic(mut self, name: &str, bounds: Vec<Type>) -> Self {
        self.generics.push(GenericParam {
            name: name.to_string(),
            bounds,
        });
        self
    }

    pub fn returns(mut self, ty: Type) -> Self {
        if !ty.is_unit() {
            self.ret = Some(ty);
        }
        self
    }

    pub fn body(mut self, stmts: Vec<Stmt>) -> Self {
        self.body = Some(Block::new(stmts));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: String,
    pub vis: Visibility,
    pub doc: Option<String>,
    pub attrs: Vec<Attribute>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitDef {
    pub name: String,
    pub vis: Visibility,
    pub doc: Option<String>,
    pub supertraits: Vec<Type>,
    pub methods: Vec<FnDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImplItem {
    Fn(FnDecl),
    /// `type Target = T;`
    Type { name: String, ty: Type },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImplDef {
    pub generics: Vec<GenericParam>,
    pub trait_: Option<Type>,
    pub self_ty: Type,
    pub items: Vec<ImplItem>,
}

impl ImplDef {
    pub fn inherent(self_ty: Type) -> Self {
        Self {
            generics: Vec::new(),
            trait_: None,
            self_ty,
            items: Vec::new(),
        }
    }

    pub fn of_trait(trait_: Type, self_ty: Type) -> Self {
        Self {
            generics: Vec::new(),
            trait_: Some(trait_),
            self_ty,
            items: Vec::new(),
        }
    }

    pub fn func(mut self, decl: FnDecl) -> Self {
        self.items.push(ImplItem::Fn(decl));
        self
    }

    pub fn funcs(mut self, decls: impl IntoIterator<Item = FnDecl>) -> Self {
        self.items.extend(decls.into_iter().map(ImplItem::Fn));
        self
    }

    pub fn assoc_type(mut self, name: &str, ty: Type) -> Self {
        self.items.push(ImplItem::Type {
            name: name.to_string(),
            ty,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Struct(StructDef),
    Trait(TraitDef),
    Impl(ImplDef),
    Fn(FnDecl),
    TypeAlias { name: String, vis: Visibility, doc: Option<String>, ty: Type },
    /// `use a::b::{c, d};` written as the use tree text, e.g. `std::sync::Arc`.
    Use { vis: Visibility, tree: String },
    Mod { vis: Visibility, name: String },
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub doc: Vec<String>,
    /// Inner `#![allow(..)]` lints.
    pub allow: Vec<String>,
    pub items: Vec<Item>,
}

impl Module {
    pub fn new(doc: impl Into<String>) -> Self {
        Self {
            doc: vec![doc.into()],
            allow: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn uses(&mut self, tree: &str) {
        self.items.push(Item::Use {
            vis: Visibility::Private,
            tree: tree.to_string(),
        });
    }
}
