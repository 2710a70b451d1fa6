//! Rust rendering of the syntax tree.

use std::str::FromStr;

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;

use super::{
    Arm, Attribute, BinOp, Block, ClosureParam, Delim, Expr, FnDecl, GenericParam, ImplDef, ImplItem, Item, Lit, Module,
    Pat, Path, Receiver, Stmt, StructDef, TraitDef, Type, UnOp, Visibility,
};
use crate::error::{Error, Result};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn", "else", "enum",
    "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move",
    "mut", "override", "priv", "pub", "ref", "return", "static", "struct", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Path segments that are keywords but cannot be written raw.
const PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Prints [`Module`]s as formatted Rust source.
#[derive(Debug, Clone, Default)]
pub struct RustPrinter {
    /// Name used in error messages, usually the output file.
    file: String,
}

impl RustPrinter {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }

    pub fn print(&self, module: &Module) -> Result<String> {
        let tokens = self.module(module)?;
        let file: syn::File = syn::parse2(tokens)
            .map_err(|e| Error::generation(&self.file, format!("generated code does not parse: {e}")))?;
        Ok(prettyplease::unparse(&file))
    }

    fn fail(&self, message: impl Into<String>) -> Error {
        Error::generation(&self.file, message)
    }

    fn ident(&self, name: &str) -> Result<Ident> {
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) => (first.is_ascii_alphabetic() || first == '_') && chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
            None => false,
        };
        if !valid || name == "_" {
            return Err(self.fail(format!("'{name}' is not a valid identifier")));
        }
        if PATH_KEYWORDS.contains(&name) {
            return Ok(Ident::new(name, Span::call_site()));
        }
        if KEYWORDS.contains(&name) {
            return Ok(Ident::new_raw(name, Span::call_site()));
        }
        Ok(Ident::new(name, Span::call_site()))
    }

    fn parse_tokens(&self, text: &str) -> Result<TokenStream> {
        TokenStream::from_str(text).map_err(|e| self.fail(format!("cannot tokenize '{text}': {e}")))
    }

    fn module(&self, module: &Module) -> Result<TokenStream> {
        let docs = module.doc.iter().flat_map(|d| d.lines()).map(|line| {
            let line = format!(" {line}");
            quote! { #![doc = #line] }
        });
        let allows = module
            .allow
            .iter()
            .map(|lint| self.parse_tokens(lint))
            .collect::<Result<Vec<_>>>()?;
        let allow = if allows.is_empty() {
            quote! {}
        } else {
            quote! { #![allow(#(#allows),*)] }
        };
        let items = module.items.iter().map(|i| self.item(i)).collect::<Result<Vec<_>>>()?;
        Ok(quote! {
            #(#docs)*
            #allow
            #(#items)*
        })
    }

    fn doc(&self, doc: &Option<String>) -> TokenStream {
        let Some(doc) = doc else {
            return quote! {};
        };
        let lines = doc.lines().map(|line| format!(" {line}"));
        quote! { #(#[doc = #lines])* }
    }

    fn attrs(&self, attrs: &[Attribute]) -> Result<TokenStream> {
        let mut out = TokenStream::new();
        for attr in attrs {
            let path = self.path(&Path::parse(&attr.path))?;
            let tokens = match &attr.args {
                Some(args) => {
                    let args = self.parse_tokens(args)?;
                    quote! { #[#path(#args)] }
                }
                None => quote! { #[#path] },
            };
            out.extend(tokens);
        }
        Ok(out)
    }

    fn vis(&self, vis: Visibility) -> TokenStream {
        match vis {
            Visibility::Private => quote! {},
            Visibility::Public => quote! { pub },
            Visibility::Crate => quote! { pub(crate) },
        }
    }

    fn item(&self, item: &Item) -> Result<TokenStream> {
        match item {
            Item::Struct(def) => self.struct_def(def),
            Item::Trait(def) => self.trait_def(def),
            Item::Impl(def) => self.impl_def(def),
            Item::Fn(decl) => self.fn_decl(decl),
            Item::TypeAlias { name, vis, doc, ty } => {
                let doc = self.doc(doc);
                let vis = self.vis(*vis);
                let name = self.ident(name)?;
                let ty = self.ty(ty)?;
                Ok(quote! { #doc #vis type #name = #ty; })
            }
            Item::Use { vis, tree } => {
                let vis = self.vis(*vis);
                let tree: syn::UseTree =
                    syn::parse_str(tree).map_err(|e| self.fail(format!("invalid use tree '{tree}': {e}")))?;
                Ok(quote! { #vis use #tree; })
            }
            Item::Mod { vis, name } => {
                let vis = self.vis(*vis);
                let name = self.ident(name)?;
                Ok(quote! { #vis mod #name; })
            }
        }
    }

    fn struct_def(&self, def: &StructDef) -> Result<TokenStream> {
        let doc = self.doc(&def.doc);
        let attrs = self.attrs(&def.attrs)?;
        let vis = self.vis(def.vis);
        let name = self.ident(&def.name)?;
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            let doc = self.doc(&field.doc);
            let attrs = self.attrs(&field.attrs)?;
            let vis = self.vis(field.vis);
            let name = self.ident(&field.name)?;
            let ty = self.ty(&field.ty)?;
            fields.push(quote! { #doc #attrs #vis #name: #ty });
        }
        Ok(quote! {
            #doc
            #attrs
            #vis struct #name {
                #(#fields),*
            }
        })
    }

    fn trait_def(&self, def: &TraitDef) -> Result<TokenStream> {
        let doc = self.doc(&def.doc);
        let vis = self.vis(def.vis);
        let name = self.ident(&def.name)?;
        let supertraits = def.supertraits.iter().map(|t| self.ty(t)).collect::<Result<Vec<_>>>()?;
        let bounds = if supertraits.is_empty() {
            quote! {}
        } else {
            quote! { : #(#supertraits)+* }
        };
        let methods = def.methods.iter().map(|m| self.fn_decl(m)).collect::<Result<Vec<_>>>()?;
        Ok(quote! {
            #doc
            #vis trait #name #bounds {
                #(#methods)*
            }
        })
    }

    fn generics(&self, generics: &[GenericParam]) -> Result<TokenStream> {
        if generics.is_empty() {
            return Ok(quote! {});
        }
        let mut params = Vec::with_capacity(generics.len());
        for param in generics {
            let name = self.ident(&param.name)?;
            let bounds = param.bounds.iter().map(|b| self.ty(b)).collect::<Result<Vec<_>>>()?;
            if bounds.is_empty() {
                params.push(quote! { #name });
            } else {
                params.push(quote! { #name: #(#bounds)+* });
            }
        }
        Ok(quote! { <#(#params),*> })
    }

    fn impl_def(&self, def: &ImplDef) -> Result<TokenStream> {
        let generics = self.generics(&def.generics)?;
        let self_ty = self.ty(&def.self_ty)?;
        let mut items = Vec::with_capacity(def.items.len());
        for item in &def.items {
            items.push(match item {
                ImplItem::Fn(decl) => self.fn_decl(decl)?,
                ImplItem::Type { name, ty } => {
                    let name = self.ident(name)?;
                    let ty = self.ty(ty)?;
                    quote! { type #name = #ty; }
                }
            });
        }
        let head = match &def.trait_ {
            Some(trait_) => {
                let trait_ = self.ty(trait_)?;
                quote! { impl #generics #trait_ for #self_ty }
            }
            None => quote! { impl #generics #self_ty },
        };
        Ok(quote! {
            #head {
                #(#items)*
            }
        })
    }

    fn fn_decl(&self, decl: &FnDecl) -> Result<TokenStream> {
        let doc = self.doc(&decl.doc);
        let attrs = self.attrs(&decl.attrs)?;
        let vis = self.vis(decl.vis);
        let name = self.ident(&decl.name)?;
        let generics = self.generics(&decl.generics)?;
        let mut params = Vec::with_capacity(decl.params.len() + 1);
        match decl.receiver {
            Receiver::None => {}
            Receiver::Ref => params.push(quote! { &self }),
            Receiver::RefMut => params.push(quote! { &mut self }),
            Receiver::Value => params.push(quote! { self }),
        }
        for param in &decl.params {
            let name = self.ident(&param.name)?;
            let ty = self.ty(&param.ty)?;
            params.push(quote! { #name: #ty });
        }
        let ret = match &decl.ret {
            Some(ty) => {
                let ty = self.ty(ty)?;
                quote! { -> #ty }
            }
            None => quote! {},
        };
        let body = match &decl.body {
            Some(block) => self.block(block)?,
            None => quote! { ; },
        };
        Ok(quote! {
            #doc
            #attrs
            #vis fn #name #generics(#(#params),*) #ret #body
        })
    }

    fn path(&self, path: &Path) -> Result<TokenStream> {
        let segments = path.segments.iter().map(|s| self.ident(s)).collect::<Result<Vec<_>>>()?;
        let leading = if path.global { quote! { :: } } else { quote! {} };
        let generics = if path.generics.is_empty() {
            quote! {}
        } else {
            let args = path.generics.iter().map(|g| self.ty(g)).collect::<Result<Vec<_>>>()?;
            quote! { <#(#args),*> }
        };
        Ok(quote! { #leading #(#segments)::* #generics })
    }

    /// Paths in expression position need a turbofish before generic arguments.
    fn expr_path(&self, path: &Path) -> Result<TokenStream> {
        if path.generics.is_empty() {
            return self.path(path);
        }
        let bare = Path {
            generics: Vec::new(),
            ..path.clone()
        };
        let bare = self.path(&bare)?;
        let args = path.generics.iter().map(|g| self.ty(g)).collect::<Result<Vec<_>>>()?;
        Ok(quote! { #bare::<#(#args),*> })
    }

    fn ty(&self, ty: &Type) -> Result<TokenStream> {
        Ok(match ty {
            Type::Path(path) => self.path(path)?,
            Type::Ref { mutable, lifetime, inner } => {
                let inner = self.ty(inner)?;
                let lifetime = lifetime.as_deref().map(|name| syn::Lifetime::new(name, Span::call_site()));
                if *mutable {
                    quote! { &#lifetime mut #inner }
                } else {
                    quote! { &#lifetime #inner }
                }
            }
            Type::Slice(inner) => {
                let inner = self.ty(inner)?;
                quote! { [#inner] }
            }
            Type::Tuple(items) => {
                let items = items.iter().map(|t| self.ty(t)).collect::<Result<Vec<_>>>()?;
                if items.len() == 1 {
                    quote! { (#(#items),*,) }
                } else {
                    quote! { (#(#items),*) }
                }
            }
            Type::Dyn(bounds) => {
                let bounds = bounds.iter().map(|b| self.ty(b)).collect::<Result<Vec<_>>>()?;
                quote! { dyn #(#bounds)+* }
            }
            Type::FnTrait { mutable, args, ret } => {
                let args = args.iter().map(|a| self.ty(a)).collect::<Result<Vec<_>>>()?;
                let name = if *mutable { quote! { FnMut } } else { quote! { Fn } };
                if ret.is_unit() {
                    quote! { #name(#(#args),*) }
                } else {
                    let ret = self.ty(ret)?;
                    quote! { #name(#(#args),*) -> #ret }
                }
            }
            Type::Lifetime(name) => {
                let lifetime = syn::Lifetime::new(name, Span::call_site());
                quote! { #lifetime }
            }
            Type::Binding { name, ty } => {
                let name = self.ident(name)?;
                let ty = self.ty(ty)?;
                quote! { #name = #ty }
            }
            Type::SelfType => quote! { Self },
        })
    }

    fn pat(&self, pat: &Pat) -> Result<TokenStream> {
        Ok(match pat {
            Pat::Wild => quote! { _ },
            Pat::Ident { name, mutable, by_ref } => {
                let name = self.ident(name)?;
                match (by_ref, mutable) {
                    (true, true) => quote! { ref mut #name },
                    (true, false) => quote! { ref #name },
                    (false, true) => quote! { mut #name },
                    (false, false) => quote! { #name },
                }
            }
            Pat::TupleStruct { path, elems } => {
                let path = self.path(path)?;
                let elems = elems.iter().map(|p| self.pat(p)).collect::<Result<Vec<_>>>()?;
                quote! { #path(#(#elems),*) }
            }
            Pat::Path(path) => self.path(path)?,
            Pat::Tuple(elems) => {
                let elems = elems.iter().map(|p| self.pat(p)).collect::<Result<Vec<_>>>()?;
                quote! { (#(#elems),*) }
            }
        })
    }

    fn block(&self, block: &Block) -> Result<TokenStream> {
        let stmts = block.stmts.iter().map(|s| self.stmt(s)).collect::<Result<Vec<_>>>()?;
        Ok(quote! { { #(#stmts)* } })
    }

    fn stmt(&self, stmt: &Stmt) -> Result<TokenStream> {
        Ok(match stmt {
            Stmt::Let { pat, ty, init } => {
                let pat = self.pat(pat)?;
                let ty = match ty {
                    Some(ty) => {
                        let ty = self.ty(ty)?;
                        quote! { : #ty }
                    }
                    None => quote! {},
                };
                match init {
                    Some(init) => {
                        let init = self.expr(init)?;
                        quote! { let #pat #ty = #init; }
                    }
                    None => quote! { let #pat #ty; },
                }
            }
            Stmt::Expr(expr) => {
                let tokens = self.expr(expr)?;
                if is_block_like(expr) {
                    tokens
                } else {
                    quote! { #tokens; }
                }
            }
            Stmt::Tail(expr) => self.expr(expr)?,
        })
    }

    fn exprs(&self, exprs: &[Expr]) -> Result<Vec<TokenStream>> {
        exprs.iter().map(|e| self.expr(e)).collect()
    }

    /// Receiver of a postfix operation; anything that is not an atom is parenthesised.
    fn postfix_base(&self, expr: &Expr) -> Result<TokenStream> {
        let tokens = self.expr(expr)?;
        let atomic = matches!(
            expr,
            Expr::Path(_)
                | Expr::Lit(_)
                | Expr::Field { .. }
                | Expr::MethodCall { .. }
                | Expr::Call { .. }
                | Expr::Macro { .. }
                | Expr::Try(_)
                | Expr::Index { .. }
                | Expr::Tuple(_)
                | Expr::Array(_)
                | Expr::Struct { .. }
        );
        Ok(if atomic { tokens } else { quote! { (#tokens) } })
    }

    fn operand(&self, expr: &Expr, parent: BinOp, rhs: bool) -> Result<TokenStream> {
        let tokens = self.expr(expr)?;
        let wrap = match expr {
            Expr::Binary { op, .. } => {
                let (child, outer) = (precedence(*op), precedence(parent));
                child < outer || (child == outer && (rhs || is_comparison(parent)))
            }
            Expr::Closure { .. } | Expr::Return(_) => true,
            Expr::Cast { .. } => is_comparison(parent) && !rhs,
            _ => false,
        };
        Ok(if wrap { quote! { (#tokens) } } else { tokens })
    }

    fn expr(&self, expr: &Expr) -> Result<TokenStream> {
        Ok(match expr {
            Expr::Path(path) => self.expr_path(path)?,
            Expr::Lit(lit) => match lit {
                Lit::Str(text) => {
                    let lit = Literal::string(text);
                    quote! { #lit }
                }
                Lit::Int(value) => {
                    let lit = Literal::i64_unsuffixed(*value);
                    quote! { #lit }
                }
                Lit::Float(value) => {
                    let lit = Literal::f64_unsuffixed(*value);
                    quote! { #lit }
                }
                Lit::Bool(true) => quote! { true },
                Lit::Bool(false) => quote! { false },
                Lit::ByteStr(text) => {
                    let lit = Literal::byte_string(text.as_bytes());
                    quote! { #lit }
                }
            },
            Expr::Field { base, name } => {
                let base = self.postfix_base(base)?;
                let name = self.ident(name)?;
                quote! { #base.#name }
            }
            Expr::MethodCall {
                receiver,
                method,
                generics,
                args,
            } => {
                let receiver = self.postfix_base(receiver)?;
                let method = self.ident(method)?;
                let args = self.exprs(args)?;
                if generics.is_empty() {
                    quote! { #receiver.#method(#(#args),*) }
                } else {
                    let generics = generics.iter().map(|g| self.ty(g)).collect::<Result<Vec<_>>>()?;
                    quote! { #receiver.#method::<#(#generics),*>(#(#args),*) }
                }
            }
            Expr::Call { func, args } => {
                let func = self.postfix_base(func)?;
                let args = self.exprs(args)?;
                quote! { #func(#(#args),*) }
            }
            Expr::Macro { path, delim, args } => {
                let path = self.path(path)?;
                let args = self.exprs(args)?;
                match delim {
                    Delim::Paren => quote! { #path!(#(#args),*) },
                    Delim::Bracket => quote! { #path![#(#args),*] },
                }
            }
            Expr::Ref { mutable, expr } => {
                let inner = self.prefix_operand(expr)?;
                if *mutable {
                    quote! { &mut #inner }
                } else {
                    quote! { &#inner }
                }
            }
            Expr::Deref(inner) => {
                let inner = self.prefix_operand(inner)?;
                quote! { *#inner }
            }
            Expr::Try(inner) => {
                let inner = self.postfix_base(inner)?;
                quote! { #inner? }
            }
            Expr::Unary { op, expr } => {
                let inner = self.prefix_operand(expr)?;
                match op {
                    UnOp::Not => quote! { !#inner },
                    UnOp::Neg => quote! { -#inner },
                }
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.operand(lhs, *op, false)?;
                let rhs = self.operand(rhs, *op, true)?;
                let op = bin_op(*op);
                quote! { #lhs #op #rhs }
            }
            Expr::Struct { path, fields, rest } => {
                let path = self.path(path)?;
                let mut inits = Vec::with_capacity(fields.len());
                for (name, value) in fields {
                    let ident = self.ident(name)?;
                    if matches!(value, Expr::Path(p) if !p.global && p.generics.is_empty() && p.segments == [name.clone()]) {
                        inits.push(quote! { #ident });
                    } else {
                        let value = self.expr(value)?;
                        inits.push(quote! { #ident: #value });
                    }
                }
                match rest {
                    Some(rest) => {
                        let rest = self.expr(rest)?;
                        quote! { #path { #(#inits,)* ..#rest } }
                    }
                    None => quote! { #path { #(#inits),* } },
                }
            }
            Expr::Closure {
                is_move,
                params,
                ret,
                body,
            } => self.closure(*is_move, params, ret.as_ref(), body)?,
            Expr::If { cond, then, els } => {
                let cond = self.expr(cond)?;
                let then = self.block(then)?;
                let els = self.else_branch(els.as_deref())?;
                quote! { if #cond #then #els }
            }
            Expr::IfLet { pat, expr, then, els } => {
                let pat = self.pat(pat)?;
                let expr = self.expr(expr)?;
                let then = self.block(then)?;
                let els = self.else_branch(els.as_deref())?;
                quote! { if let #pat = #expr #then #els }
            }
            Expr::Match { expr, arms } => {
                let expr = self.expr(expr)?;
                let arms = arms.iter().map(|a| self.arm(a)).collect::<Result<Vec<_>>>()?;
                quote! { match #expr { #(#arms)* } }
            }
            Expr::ForIn { pat, iter, body } => {
                let pat = self.pat(pat)?;
                let iter = self.expr(iter)?;
                let body = self.block(body)?;
                quote! { for #pat in #iter #body }
            }
            Expr::Block(block) => self.block(block)?,
            Expr::Return(value) => match value {
                Some(value) => {
                    let value = self.expr(value)?;
                    quote! { return #value }
                }
                None => quote! { return },
            },
            Expr::Continue => quote! { continue },
            Expr::Index { base, index } => {
                let base = self.postfix_base(base)?;
                let index = self.expr(index)?;
                quote! { #base[#index] }
            }
            Expr::Tuple(items) => {
                let items = self.exprs(items)?;
                if items.len() == 1 {
                    quote! { (#(#items),*,) }
                } else {
                    quote! { (#(#items),*) }
                }
            }
            Expr::Array(items) => {
                let items = self.exprs(items)?;
                quote! { [#(#items),*] }
            }
            Expr::Cast { expr, ty } => {
                let inner = self.prefix_operand(expr)?;
                let ty = self.ty(ty)?;
                quote! { #inner as #ty }
            }
        })
    }

    fn prefix_operand(&self, expr: &Expr) -> Result<TokenStream> {
        let tokens = self.expr(expr)?;
        let wrap = matches!(expr, Expr::Binary { .. } | Expr::Cast { .. } | Expr::Closure { .. } | Expr::Return(_));
        Ok(if wrap { quote! { (#tokens) } } else { tokens })
    }

    fn else_branch(&self, els: Option<&Expr>) -> Result<TokenStream> {
        Ok(match els {
            None => quote! {},
            Some(Expr::Block(block)) => {
                let block = self.block(block)?;
                quote! { else #block }
            }
            Some(other @ (Expr::If { .. } | Expr::IfLet { .. })) => {
                let other = self.expr(other)?;
                quote! { else #other }
            }
            Some(other) => {
                let other = self.expr(other)?;
                quote! { else { #other } }
            }
        })
    }

    fn arm(&self, arm: &Arm) -> Result<TokenStream> {
        let pat = self.pat(&arm.pat)?;
        let guard = match &arm.guard {
            Some(guard) => {
                let guard = self.expr(guard)?;
                quote! { if #guard }
            }
            None => quote! {},
        };
        let body = self.expr(&arm.body)?;
        Ok(quote! { #pat #guard => #body, })
    }

    fn closure(&self, is_move: bool, params: &[ClosureParam], ret: Option<&Type>, body: &Expr) -> Result<TokenStream> {
        let mut inputs = Vec::with_capacity(params.len());
        for param in params {
            let pat = self.pat(&param.pat)?;
            inputs.push(match &param.ty {
                Some(ty) => {
                    let ty = self.ty(ty)?;
                    quote! { #pat: #ty }
                }
                None => pat,
            });
        }
        let movability = if is_move { quote! { move } } else { quote! {} };
        match ret {
            Some(ret) => {
                let ret = self.ty(ret)?;
                let body = match body {
                    Expr::Block(block) => self.block(block)?,
                    other => {
                        let other = self.expr(other)?;
                        quote! { { #other } }
                    }
                };
                Ok(quote! { #movability |#(#inputs),*| -> #ret #body })
            }
            None => {
                let body = self.expr(body)?;
                Ok(quote! { #movability |#(#inputs),*| #body })
            }
        }
    }
}

fn is_block_like(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::If { .. } | Expr::IfLet { .. } | Expr::Match { .. } | Expr::ForIn { .. } | Expr::Block(_)
    )
}

fn precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Assign | BinOp::AddAssign => 1,
        BinOp::Or => 2,
        BinOp::And => 3,
        BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => 4,
        BinOp::Add | BinOp::Sub => 5,
    }
}

fn is_comparison(op: BinOp) -> bool {
    precedence(op) == 4
}

fn bin_op(op: BinOp) -> TokenStream {
    match op {
        BinOp::Eq => quote! { == },
        BinOp::Ne => quote! { != },
        BinOp::Lt => quote! { < },
        BinOp::Gt => quote! { > },
        BinOp::Le => quote! { <= },
        BinOp::Ge => quote! { >= },
        BinOp::And => quote! { && },
        BinOp::Or => quote! { || },
        BinOp::Add => quote! { + },
        BinOp::Sub => quote! { - },
        BinOp::Assign => quote! { = },
        BinOp::AddAssign => quote! { += },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Field, StructDef};

    fn print(module: &Module) -> String {
        RustPrinter::new("test.rs").print(module).unwrap()
    }

    #[test]
    fn test_struct_and_impl() {
        let mut module = Module::new("Generated.");
        module.push(Item::Struct(StructDef {
            name: "User".into(),
            vis: Visibility::Public,
            doc: Some("A user.".into()),
            attrs: vec![Attribute::derive(&["Debug", "Clone"])],
            fields: vec![Field::new("id", Type::path("u64")).public(), Field::new("type", Type::path("String"))],
        }));
        let body = vec![Expr::self_().field("id").eq(Expr::int(0)).tail()];
        module.push(Item::Impl(
            ImplDef::inherent(Type::path("User")).func(
                FnDecl::new("is_new")
                    .public()
                    .receiver(Receiver::Ref)
                    .returns(Type::path("bool"))
                    .body(body),
            ),
        ));
        let out = print(&module);
        assert!(out.contains("//! Generated."));
        assert!(out.contains("/// A user."));
        assert!(out.contains("#[derive(Debug, Clone)]"));
        assert!(out.contains("r#type: String"));
        assert!(out.contains("pub fn is_new(&self) -> bool"));
        assert!(out.contains("self.id == 0"));
    }

    #[test]
    fn test_closure_call_is_parenthesised() {
        let closure = Expr::Closure {
            is_move: false,
            params: Vec::new(),
            ret: Some(Type::unit().kiln_result()),
            body: Box::new(Expr::block(vec![Expr::ok_unit().tail()])),
        };
        let call = Expr::Call {
            func: Box::new(closure),
            args: Vec::new(),
        };
        let module = Module {
            items: vec![Item::Fn(FnDecl::new("run").body(vec![Stmt::let_("result", call)]))],
            ..Module::default()
        };
        let out = print(&module);
        assert!(out.contains("(|| -> ::kiln::Result<()>"), "{out}");
        assert!(out.contains("})()"), "{out}");
    }

    #[test]
    fn test_generic_path_in_expression_uses_turbofish() {
        let expr = Expr::Call {
            func: Box::new(Expr::Path(Path::parse("Vec").with_generics(vec![Type::path("u64")]))),
            args: Vec::new(),
        };
        let module = Module {
            items: vec![Item::Fn(FnDecl::new("make").body(vec![Stmt::let_("v", expr.method("len", vec![]))]))],
            ..Module::default()
        };
        assert!(print(&module).contains("Vec::<u64>()"));
    }

    #[test]
    fn test_invalid_identifier_is_generation_error() {
        let module = Module {
            items: vec![Item::Fn(FnDecl::new("not valid"))],
            ..Module::default()
        };
        let err = RustPrinter::new("bad.rs").print(&module).unwrap_err();
        assert!(matches!(err, Error::Generation { .. }));
    }
}
