//! Storage backends and cross-cutting plugins that shape generated data-access operations.
//!
//! Every operation is emitted in four phases: its declaration, `before` statements, the `main` body and
//! `after` statements. A storage backend supplies the declaration and main body of every operation.
//! Plugins are layered on top through a [`HookConfig`]: a plugin bound to a declare or main point
//! replaces the backend's, plugins bound to a before or after point are appended in order.
//!
//! Backends and plugins may also add inherent methods to the entity struct. The backend's are always
//! added; a plugin's only when it is named under [`ADD_METHODS`].

mod audit;
mod cache;
mod registry;
mod request_time;
mod sql;
mod user_id;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;

pub use audit::AuditPlugin;
pub use cache::CacheBackend;
pub use registry::{HookConfig, HookNames, PluginRegistry};
pub use request_time::RequestTimePlugin;
pub use sql::SqlBackend;
pub use user_id::UserIdPlugin;

use crate::entity::Class;
use crate::error::{Error, Result};
use crate::generate::decl::MethodDecl;
use crate::ir::{Field, FnDecl, Stmt};

/// Hook configuration key listing plugins whose entity methods are added.
pub const ADD_METHODS: &str = "add-methods";

/// A generated data-access operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Constructor,
    Create,
    Update,
    Delete,
    FindAll,
    Count,
    FindBy,
    FindByPlural,
    UpdateBy,
    UpdateByPlural,
    DeleteBy,
    DeleteByPlural,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Self::Constructor,
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::FindAll,
        Self::Count,
        Self::FindBy,
        Self::FindByPlural,
        Self::UpdateBy,
        Self::UpdateByPlural,
        Self::DeleteBy,
        Self::DeleteByPlural,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::FindAll => "find-all",
            Self::Count => "count",
            Self::FindBy => "findby",
            Self::FindByPlural => "findby-plural",
            Self::UpdateBy => "updateby",
            Self::UpdateByPlural => "updateby-plural",
            Self::DeleteBy => "deleteby",
            Self::DeleteByPlural => "deleteby-plural",
        }
    }

    /// Operations that change stored rows.
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Self::Create
                | Self::Update
                | Self::Delete
                | Self::UpdateBy
                | Self::UpdateByPlural
                | Self::DeleteBy
                | Self::DeleteByPlural
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Declare,
    Before,
    Main,
    After,
}

/// One hook point, written `create-declare`, `before-create`, `create` or `after-create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookPoint {
    pub operation: Operation,
    pub phase: Phase,
}

impl HookPoint {
    pub const fn new(operation: Operation, phase: Phase) -> Self {
        Self { operation, phase }
    }

    /// Declare and main points of every operation, the points a backend provides.
    pub fn backend_points() -> Vec<HookPoint> {
        Operation::ALL
            .iter()
            .flat_map(|op| [Self::new(*op, Phase::Declare), Self::new(*op, Phase::Main)])
            .collect()
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.operation.as_str();
        match self.phase {
            Phase::Declare => write!(f, "{op}-declare"),
            Phase::Before => write!(f, "before-{op}"),
            Phase::Main => f.write_str(op),
            Phase::After => write!(f, "after-{op}"),
        }
    }
}

impl FromStr for HookPoint {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let (phase, op) = if let Some(op) = text.strip_suffix("-declare") {
            (Phase::Declare, op)
        } else if let Some(op) = text.strip_prefix("before-") {
            (Phase::Before, op)
        } else if let Some(op) = text.strip_prefix("after-") {
            (Phase::After, op)
        } else {
            (Phase::Main, text)
        };
        Operation::ALL
            .iter()
            .find(|o| o.as_str() == op)
            .map(|operation| Self::new(*operation, phase))
            .ok_or_else(|| Error::config(format!("unknown hook point '{text}'")))
    }
}

/// What a hook function sees while one operation of one entity is emitted.
pub struct HookContext<'a> {
    pub class: &'a Class,
    /// Name of the generated implementation struct, e.g. `UserDaoImpl`.
    pub impl_name: &'a str,
    /// Every field of the implementation struct, backend fields first.
    pub fields: &'a [Field],
    /// The storage backend, for plugins that delegate to its default.
    pub backend: &'a dyn Hooks,
}

impl HookContext<'_> {
    pub fn entity(&self) -> String {
        self.class.name.snake()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

/// A storage backend or plugin.
///
/// Hook functions return statements spliced into the generated method. The generated method has the
/// receiver `self`, the declaration's arguments by name (`ctx` first) and returns
/// `::kiln::Result<_>`; main bodies end with the result expression.
pub trait Hooks: Send + Sync {
    fn name(&self) -> &str;

    /// Points this bundle provides.
    fn hook_points(&self) -> Vec<HookPoint>;

    /// Fields added to the data-access implementation struct of `class`.
    fn struct_fields(&self, _class: &Class) -> Vec<Field> {
        Vec::new()
    }

    /// Adjust the declaration of an operation: rename it or change its arguments.
    fn declare(&self, _ctx: &HookContext<'_>, _decl: &mut MethodDecl) -> Result<()> {
        Ok(())
    }

    fn before(&self, _ctx: &HookContext<'_>, _decl: &MethodDecl) -> Result<Vec<Stmt>> {
        Ok(Vec::new())
    }

    fn main(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        Err(Error::hook(
            ctx.entity(),
            HookPoint::new(decl.op, Phase::Main).to_string(),
            format!("'{}' does not provide a main body", self.name()),
        ))
    }

    fn after(&self, _ctx: &HookContext<'_>, _decl: &MethodDecl) -> Result<Vec<Stmt>> {
        Ok(Vec::new())
    }

    /// Inherent methods added to the entity struct of `class`.
    fn entity_methods(&self, _class: &Class) -> Result<Vec<FnDecl>> {
        Ok(Vec::new())
    }
}

impl fmt::Debug for dyn Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").field("name", &self.name()).finish()
    }
}

/// Hooks bound for one storage backend; produced by [`PluginRegistry::bind`].
#[derive(Clone)]
pub struct BoundHooks {
    backend: Arc<dyn Hooks>,
    overrides: HashMap<HookPoint, Arc<dyn Hooks>>,
    additive: HashMap<HookPoint, Vec<Arc<dyn Hooks>>>,
    /// Distinct plugins in binding order.
    plugins: Vec<Arc<dyn Hooks>>,
    /// Plugins named under `add-methods`.
    method_plugins: Vec<Arc<dyn Hooks>>,
}

impl BoundHooks {
    pub(crate) fn new(backend: Arc<dyn Hooks>) -> Self {
        Self {
            backend,
            overrides: HashMap::new(),
            additive: HashMap::new(),
            plugins: Vec::new(),
            method_plugins: Vec::new(),
        }
    }

    pub(crate) fn add_methods(&mut self, plugin: Arc<dyn Hooks>) {
        debug!("adding entity methods of '{}'", plugin.name());
        if !self.method_plugins.iter().any(|p| p.name() == plugin.name()) {
            self.method_plugins.push(plugin);
        }
    }

    /// Entity methods of the backend, then of each `add-methods` plugin. A later method named like an
    /// earlier one is dropped.
    pub fn entity_methods(&self, class: &Class) -> Result<Vec<FnDecl>> {
        let mut methods: Vec<FnDecl> = Vec::new();
        for hooks in std::iter::once(&self.backend).chain(&self.method_plugins) {
            let added = hooks
                .entity_methods(class)
                .map_err(|e| e.in_hook(&class.name.snake(), ADD_METHODS))?;
            for method in added {
                if methods.iter().any(|m| m.name == method.name) {
                    debug!("'{}' skips duplicate entity method '{}'", hooks.name(), method.name);
                    continue;
                }
                methods.push(method);
            }
        }
        Ok(methods)
    }

    pub(crate) fn bind(&mut self, point: HookPoint, plugin: Arc<dyn Hooks>) {
        debug!("binding '{}' to {point} of '{}'", plugin.name(), self.backend.name());
        if !self.plugins.iter().any(|p| p.name() == plugin.name()) {
            self.plugins.push(Arc::clone(&plugin));
        }
        match point.phase {
            Phase::Declare | Phase::Main => {
                self.overrides.insert(point, plugin);
            }
            Phase::Before | Phase::After => self.additive.entry(point).or_default().push(plugin),
        }
    }

    pub fn backend(&self) -> &dyn Hooks {
        self.backend.as_ref()
    }

    /// Names of the hooks bound at `point`; the backend when nothing overrides a declare or main point.
    pub fn bound_names(&self, point: HookPoint) -> Vec<String> {
        match point.phase {
            Phase::Declare | Phase::Main => {
                vec![self.overrides.get(&point).unwrap_or(&self.backend).name().to_string()]
            }
            Phase::Before | Phase::After => self
                .additive
                .get(&point)
                .map(|hooks| hooks.iter().map(|h| h.name().to_string()).collect())
                .unwrap_or_default(),
        }
    }

    /// Backend fields followed by the fields of every bound plugin, first occurrence of a name wins.
    pub fn struct_fields(&self, class: &Class) -> Vec<Field> {
        let mut fields = self.backend.struct_fields(class);
        for plugin in &self.plugins {
            for field in plugin.struct_fields(class) {
                if !fields.iter().any(|f| f.name == field.name) {
                    fields.push(field);
                }
            }
        }
        fields
    }

    fn primary(&self, point: HookPoint) -> &dyn Hooks {
        self.overrides.get(&point).unwrap_or(&self.backend).as_ref()
    }

    pub fn declare(&self, ctx: &HookContext<'_>, decl: &mut MethodDecl) -> Result<()> {
        let point = HookPoint::new(decl.op, Phase::Declare);
        self.primary(point)
            .declare(ctx, decl)
            .map_err(|e| e.in_hook(&ctx.entity(), &point.to_string()))
    }

    pub fn before(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        self.additive_stmts(ctx, decl, Phase::Before, |hooks| hooks.before(ctx, decl))
    }

    pub fn main(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        let point = HookPoint::new(decl.op, Phase::Main);
        self.primary(point)
            .main(ctx, decl)
            .map_err(|e| e.in_hook(&ctx.entity(), &point.to_string()))
    }

    pub fn after(&self, ctx: &HookContext<'_>, decl: &MethodDecl) -> Result<Vec<Stmt>> {
        self.additive_stmts(ctx, decl, Phase::After, |hooks| hooks.after(ctx, decl))
    }

    fn additive_stmts(
        &self,
        ctx: &HookContext<'_>,
        decl: &MethodDecl,
        phase: Phase,
        emit: impl Fn(&dyn Hooks) -> Result<Vec<Stmt>>,
    ) -> Result<Vec<Stmt>> {
        let point = HookPoint::new(decl.op, phase);
        let mut stmts = Vec::new();
        for hooks in self.additive.get(&point).into_iter().flatten() {
            let emitted = emit(hooks.as_ref()).map_err(|e| e.in_hook(&ctx.entity(), &point.to_string()))?;
            stmts.extend(emitted);
        }
        Ok(stmts)
    }
}

impl fmt::Debug for BoundHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundHooks")
            .field("backend", &self.backend.name())
            .field("plugins", &self.plugins.iter().map(|p| p.name().to_string()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_point_round_trip_names() {
        for text in ["create-declare", "before-create", "create", "after-create", "findby-plural-declare"] {
            let point: HookPoint = text.parse().unwrap();
            assert_eq!(point.to_string(), text);
        }
        let point: HookPoint = "before-findby-plural".parse().unwrap();
        assert_eq!(point, HookPoint::new(Operation::FindByPlural, Phase::Before));
    }

    #[test]
    fn test_unknown_hook_point() {
        assert!("before-upsert".parse::<HookPoint>().is_err());
        assert!("nothing".parse::<HookPoint>().is_err());
    }

    #[test]
    fn test_backend_points_cover_every_operation() {
        let points = HookPoint::backend_points();
        assert_eq!(points.len(), Operation::ALL.len() * 2);
        assert!(points.contains(&HookPoint::new(Operation::Count, Phase::Main)));
        assert!(!points.iter().any(|p| p.phase == Phase::Before));
    }
}
