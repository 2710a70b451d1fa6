//! Generators turning resolved entity definitions into source files.
//!
//! Each entity is planned once: its storage backend is bound with the configured plugins and the shared
//! method declarations are derived. Every layer (entity, data access, model, repository, mock) is then
//! emitted from that plan, so all layers agree on names, arguments and returns.

pub mod api;
pub mod dao;
pub mod decl;
pub mod entity;
pub mod factory;
pub mod keys;
pub mod mock;
pub mod model;
pub mod render;
pub mod repository;
pub mod types;

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::debug;

use crate::entity::{Class, Name};
use crate::error::{Error, Result};
use crate::ir::{Field, Item, Module, RustPrinter, Type, Visibility};
use crate::plugin::{BoundHooks, HookConfig, HookContext, Operation, PluginRegistry};
use crate::resolver;
use decl::MethodDecl;

pub use api::Endpoint;
pub use factory::TestData;

/// Marker placed at the top of every generated file.
pub const GENERATED_HEADER: &str = "Code generated by kiln. DO NOT EDIT.";

/// One output file, relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Where generated modules live inside the application crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Rust path of the module the output directory is mounted at, e.g. `crate::generated`.
    pub module_root: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("crate::generated")
    }
}

impl Layout {
    pub fn new(module_root: impl Into<String>) -> Self {
        Self {
            module_root: module_root.into(),
        }
    }

    /// Use tree importing sibling layers, e.g. `crate::generated::{dao, entity}`.
    pub fn uses(&self, layers: &[&str]) -> String {
        match layers {
            [layer] => format!("{}::{layer}", self.module_root),
            _ => format!("{}::{{{}}}", self.module_root, layers.join(", ")),
        }
    }

    pub fn file(&self, layer: &str, snake: &str) -> PathBuf {
        PathBuf::from(layer).join(format!("{snake}.rs"))
    }
}

/// An entity together with its bound hooks and shared method declarations.
#[derive(Debug)]
pub struct EntityPlan {
    pub class: Class,
    pub hooks: BoundHooks,
    /// Name of the data-access implementation struct.
    pub impl_name: String,
    /// Fields of the implementation struct, backend first.
    pub fields: Vec<Field>,
    /// Constructor first, then every data-access method.
    pub decls: Vec<MethodDecl>,
}

impl EntityPlan {
    pub fn build(class: &Class, classes: &[Class], hooks: BoundHooks) -> Result<Self> {
        let impl_name = format!("{}DaoImpl", class.name.camel());
        let fields = hooks.struct_fields(class);
        let decls = dao::declarations(class, classes)?;
        let mut plan = Self {
            class: class.clone(),
            hooks,
            impl_name,
            fields,
            decls: Vec::new(),
        };
        plan.decls = dao::apply_declare_hooks(&plan, decls)?;
        Ok(plan)
    }

    pub fn hook_context(&self) -> HookContext<'_> {
        HookContext {
            class: &self.class,
            impl_name: &self.impl_name,
            fields: &self.fields,
            backend: self.hooks.backend(),
        }
    }

    pub fn snake(&self) -> String {
        self.class.name.snake()
    }

    pub fn camel(&self) -> String {
        self.class.name.camel()
    }

    pub fn plural_camel(&self) -> String {
        self.class.name.plural_camel()
    }

    /// `<layer>::<Camel>`, e.g. `model::User`.
    pub fn layer_type(&self, layer: &str) -> Type {
        Type::path(&format!("{layer}::{}", self.camel()))
    }

    /// `<layer>::<PluralCamel>`, e.g. `entity::Users`.
    pub fn layer_collection(&self, layer: &str) -> Type {
        Type::path(&format!("{layer}::{}", self.plural_camel()))
    }

    pub fn constructor(&self) -> Result<&MethodDecl> {
        self.decls
            .iter()
            .find(|d| d.op == Operation::Constructor)
            .ok_or_else(|| Error::generation(self.snake(), "no constructor was declared"))
    }

    /// Data-access methods, without the constructor.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.decls.iter().filter(|d| d.op != Operation::Constructor)
    }

    pub fn method(&self, op: Operation) -> Option<&MethodDecl> {
        self.decls.iter().find(|d| d.op == op)
    }

    /// Methods of the finder trait: `find_all` and every plural lookup a relation loads through.
    pub fn finder_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods().filter(|d| d.op == Operation::FindAll || d.finder)
    }

    /// The plural finder over `member`, declared because some relation joins on it.
    pub fn finder_by(&self, member: &Name) -> Result<&MethodDecl> {
        let wanted = member.snake();
        self.decls
            .iter()
            .find(|d| d.finder && d.op == Operation::FindByPlural && d.key_members.iter().any(|m| m.snake() == wanted))
            .ok_or_else(|| Error::generation(self.snake(), format!("no finder is declared for '{wanted}'")))
    }
}

/// Every plan of a run, looked up by entity name.
#[derive(Debug)]
pub struct Plans {
    plans: Vec<EntityPlan>,
}

impl Plans {
    pub fn iter(&self) -> impl Iterator<Item = &EntityPlan> {
        self.plans.iter()
    }

    pub fn get(&self, name: &Name) -> Result<&EntityPlan> {
        let wanted = name.snake();
        self.plans
            .iter()
            .find(|p| p.snake() == wanted)
            .ok_or_else(|| Error::generation(&wanted, "entity is not part of this run"))
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Per-entity outline reported by [`Generator::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub name: String,
    pub backend: String,
    pub read_only: bool,
    pub methods: Vec<String>,
}

/// Runs the generation pipeline over a definition set.
pub struct Generator<'a> {
    registry: &'a PluginRegistry,
    layout: Layout,
    default_backend: String,
    hooks: BTreeMap<String, HookConfig>,
    endpoints: Vec<Endpoint>,
    test_data: BTreeMap<String, TestData>,
}

impl<'a> Generator<'a> {
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self {
            registry,
            layout: Layout::default(),
            default_backend: "sql".into(),
            hooks: BTreeMap::new(),
            endpoints: Vec::new(),
            test_data: BTreeMap::new(),
        }
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Backend used by entities that do not name a datastore.
    pub fn default_backend(mut self, name: impl Into<String>) -> Self {
        self.default_backend = name.into();
        self
    }

    pub fn hooks(mut self, backend: impl Into<String>, config: HookConfig) -> Self {
        self.hooks.insert(backend.into(), config);
        self
    }

    pub fn endpoints(mut self, endpoints: Vec<Endpoint>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Test objects per entity snake name, for the model factories. Entities without any get the
    /// defaults.
    pub fn test_data(mut self, data: BTreeMap<String, TestData>) -> Self {
        self.test_data = data;
        self
    }

    fn backend_of<'c>(&'c self, class: &'c Class) -> &'c str {
        class.datastore.as_deref().unwrap_or(&self.default_backend)
    }

    /// Resolve the definitions and plan every entity.
    ///
    /// Definition errors abort before any entity is planned.
    pub fn plan(&self, classes: Vec<Class>) -> Result<Plans> {
        let classes = resolver::resolve(classes)?;
        let mut bound: BTreeMap<&str, BoundHooks> = BTreeMap::new();
        let mut plans = Vec::with_capacity(classes.len());
        for class in &classes {
            let backend = self.backend_of(class);
            let hooks = match bound.get(backend) {
                Some(hooks) => hooks.clone(),
                None => {
                    let config = self.hooks.get(backend).cloned().unwrap_or_default();
                    let hooks = self.registry.bind(backend, &config).map_err(|e| e.in_entity(&class.name.snake()))?;
                    bound.insert(backend, hooks.clone());
                    hooks
                }
            };
            let plan = EntityPlan::build(class, &classes, hooks).map_err(|e| e.in_entity(&class.name.snake()))?;
            debug!("planned '{}' with {} methods", plan.snake(), plan.decls.len());
            plans.push(plan);
        }
        Ok(Plans { plans })
    }

    /// Validate, resolve and bind without emitting anything.
    pub fn check(&self, classes: Vec<Class>) -> Result<Vec<EntitySummary>> {
        let plans = self.plan(classes)?;
        if !self.endpoints.is_empty() {
            api::check(&self.endpoints, &plans)?;
        }
        Ok(plans
            .iter()
            .map(|plan| EntitySummary {
                name: plan.snake(),
                backend: self.backend_of(&plan.class).to_string(),
                read_only: plan.class.read_only,
                methods: plan.methods().map(MethodDecl::snake).collect(),
            })
            .collect())
    }

    pub fn generate(&self, classes: Vec<Class>) -> Result<Vec<GeneratedFile>> {
        let plans = self.plan(classes)?;
        let mut files = Vec::new();
        for plan in plans.iter() {
            let entity = plan.snake();
            debug!("generating '{entity}'");
            let layers = [
                ("entity", entity::generate(plan, &self.layout)),
                ("dao", dao::generate(plan, &self.layout)),
                ("model", model::generate(plan, &plans, &self.layout)),
                ("repository", repository::generate(plan, &plans, &self.layout)),
                ("mock", mock::generate(plan, &self.layout)),
                (
                    "mock/factory",
                    factory::generate(plan, &plans, self.test_data.get(&entity), &self.layout),
                ),
            ];
            for (layer, module) in layers {
                let module = module.map_err(|e| e.in_entity(&entity).during(layer))?;
                files.push(self.print(self.layout.file(layer, &entity), &module)?);
            }
        }
        for (layer, module) in [
            ("entity", entity::generate_mod(&plans)),
            ("dao", dao::generate_mod(&plans)),
            ("model", model::generate_mod(&plans)),
            ("repository", repository::generate_root(&plans, &self.layout)),
            ("mock", mock::generate_mod(&plans)),
            ("mock/factory", factory::generate_mod(&plans, &self.test_data)),
        ] {
            files.push(self.print(PathBuf::from(layer).join("mod.rs"), &module?)?);
        }
        let mut layers = vec!["dao", "entity", "mock", "model", "repository"];
        if !self.endpoints.is_empty() {
            for (path, module) in api::generate(&self.endpoints, &plans, &self.layout)? {
                files.push(self.print(path, &module)?);
            }
            layers.insert(0, "api");
        }
        files.push(self.print(PathBuf::from("mod.rs"), &root_module(&layers))?);
        Ok(files)
    }

    fn print(&self, path: PathBuf, module: &Module) -> Result<GeneratedFile> {
        let contents = RustPrinter::new(path.display().to_string()).print(module)?;
        Ok(GeneratedFile { path, contents })
    }
}

fn root_module(layers: &[&str]) -> Module {
    let mut module = Module::new(GENERATED_HEADER);
    for layer in layers {
        module.push(Item::Mod {
            vis: Visibility::Public,
            name: (*layer).to_string(),
        });
    }
    module
}

/// `mod <snake>;` plus `pub use <snake>::{..};` per plan, the body of a layer's `mod.rs`.
pub(crate) fn layer_mod(plans: &Plans, exports: impl Fn(&EntityPlan) -> Vec<String>) -> Module {
    let mut module = Module::new(GENERATED_HEADER);
    for plan in plans.iter() {
        module.push(Item::Mod {
            vis: Visibility::Private,
            name: plan.snake(),
        });
    }
    for plan in plans.iter() {
        let names = exports(plan);
        let tree = match names.as_slice() {
            [one] => format!("{}::{one}", plan.snake()),
            _ => format!("{}::{{{}}}", plan.snake(), names.join(", ")),
        };
        module.push(Item::Use {
            vis: Visibility::Public,
            tree,
        });
    }
    module
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Member, TypeRef};

    fn user() -> Class {
        let mut class = Class::new("user");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("name", TypeRef::parse("string")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    #[test]
    fn test_layout_paths() {
        let layout = Layout::default();
        assert_eq!(layout.uses(&["entity"]), "crate::generated::entity");
        assert_eq!(layout.uses(&["dao", "entity"]), "crate::generated::{dao, entity}");
        assert_eq!(layout.file("model", "user_skill"), PathBuf::from("model/user_skill.rs"));
    }

    #[test]
    fn test_generate_lays_out_every_layer() {
        let registry = PluginRegistry::with_defaults();
        let files = Generator::new(&registry).generate(vec![user()]).unwrap();
        let paths: Vec<String> = files.iter().map(|f| f.path.display().to_string()).collect();
        for expected in [
            "entity/user.rs",
            "dao/user.rs",
            "model/user.rs",
            "repository/user.rs",
            "mock/user.rs",
            "mock/factory/user.rs",
            "mock/factory/mod.rs",
            "entity/mod.rs",
            "repository/mod.rs",
            "mod.rs",
        ] {
            assert!(paths.contains(&expected.to_string()), "{expected} missing from {paths:?}");
        }
        let root = files.iter().find(|f| f.path == PathBuf::from("mod.rs")).unwrap();
        assert!(root.contents.contains("pub mod repository;"), "{}", root.contents);
        assert!(!root.contents.contains("pub mod api;"));
    }

    #[test]
    fn test_unknown_backend_is_hook_error_of_the_entity() {
        let registry = PluginRegistry::with_defaults();
        let mut class = user();
        class.datastore = Some("mongo".into());
        let err = Generator::new(&registry).generate(vec![class]).unwrap_err();
        assert!(matches!(err, Error::Hook { .. }), "{err}");
    }

    #[test]
    fn test_each_entity_binds_its_own_datastore() {
        let registry = PluginRegistry::with_defaults();
        let mut skill = Class::new("skill");
        skill.members = vec![Member::new("id", TypeRef::parse("u64"))];
        skill.index.primary_key = Some(Name::new("id"));
        skill.datastore = Some("cache".into());
        let generator = Generator::new(&registry);

        let summary = generator.check(vec![user(), skill.clone()]).unwrap();
        let backend = |name: &str| summary.iter().find(|s| s.name == name).unwrap().backend.clone();
        assert_eq!(backend("user"), "sql");
        assert_eq!(backend("skill"), "cache");

        let plans = generator.plan(vec![user(), skill.clone()]).unwrap();
        let fields = |name: &str| -> Vec<String> {
            plans.get(&Name::new(name)).unwrap().fields.iter().map(|f| f.name.clone()).collect()
        };
        assert_eq!(fields("user"), vec!["executor"]);
        assert_eq!(fields("skill"), vec!["executor", "cache"]);

        let files = generator.generate(vec![user(), skill]).unwrap();
        let file = |path: &str| &files.iter().find(|f| f.path == PathBuf::from(path)).unwrap().contents;
        assert!(file("dao/skill.rs").contains("::kiln::cache::ReadThrough::new("));
        assert!(!file("dao/user.rs").contains("ReadThrough"));
        assert!(file("entity/skill.rs").contains("pub fn cache_table()"));
        assert!(!file("entity/user.rs").contains("cache_table"));
        let root = file("repository/mod.rs");
        assert_eq!(root.matches("executor: ::std::sync::Arc<dyn ::kiln::sql::Executor>").count(), 1, "{root}");
        assert!(root.contains("cache: ::std::sync::Arc<dyn ::kiln::cache::Cache>"), "{root}");
    }

    #[test]
    fn test_check_lists_methods() {
        let registry = PluginRegistry::with_defaults();
        let summary = Generator::new(&registry).check(vec![user()]).unwrap();
        assert_eq!(summary[0].backend, "sql");
        assert!(summary[0].methods.contains(&"find_by_ids".to_string()));
        assert!(!summary[0].methods.contains(&"new".to_string()));
    }
}
