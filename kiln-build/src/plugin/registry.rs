use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    ADD_METHODS, AuditPlugin, BoundHooks, CacheBackend, HookPoint, Hooks, Phase, RequestTimePlugin, SqlBackend,
    UserIdPlugin,
};
use crate::error::{Error, Result};

/// One plugin name or an ordered list of names bound to a hook point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HookNames {
    One(String),
    Many(Vec<String>),
}

impl HookNames {
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::One(name) => vec![name.as_str()],
            Self::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Hook bindings of one storage backend, keyed by hook point name.
///
/// ```toml
/// [dao.datastore.sql.hooks]
/// "before-create" = ["request-time"]
/// "after-create" = "audit"
/// "find-all" = "user-id"
/// "add-methods" = "user-id"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookConfig {
    pub points: BTreeMap<String, HookNames>,
}

impl HookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, point: impl Into<String>, names: HookNames) -> Self {
        self.points.insert(point.into(), names);
        self
    }
}

/// Storage backends and plugins by name. Populated once, then only read.
#[derive(Default)]
pub struct PluginRegistry {
    backends: BTreeMap<String, Arc<dyn Hooks>>,
    plugins: BTreeMap<String, Arc<dyn Hooks>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `sql` and `cache` backends and the `request-time`, `user-id` and `audit` plugins.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_backend(Arc::new(SqlBackend));
        registry.register_backend(Arc::new(CacheBackend));
        registry.register_plugin(Arc::new(RequestTimePlugin));
        registry.register_plugin(Arc::new(UserIdPlugin));
        registry.register_plugin(Arc::new(AuditPlugin));
        registry
    }

    pub fn register_backend(&mut self, backend: Arc<dyn Hooks>) {
        self.backends.insert(backend.name().to_string(), backend);
    }

    pub fn register_plugin(&mut self, plugin: Arc<dyn Hooks>) {
        self.plugins.insert(plugin.name().to_string(), plugin);
    }

    pub fn backend(&self, name: &str) -> Option<&Arc<dyn Hooks>> {
        self.backends.get(name)
    }

    pub fn backends(&self) -> impl Iterator<Item = &Arc<dyn Hooks>> {
        self.backends.values()
    }

    pub fn plugins(&self) -> impl Iterator<Item = &Arc<dyn Hooks>> {
        self.plugins.values()
    }

    /// Bind the plugins named in `config` on top of `backend`.
    pub fn bind(&self, backend: &str, config: &HookConfig) -> Result<BoundHooks> {
        let base = self
            .backends
            .get(backend)
            .ok_or_else(|| Error::hook(backend, "datastore", format!("unknown storage backend '{backend}'")))?;
        let mut bound = BoundHooks::new(Arc::clone(base));
        for (text, names) in &config.points {
            if text == ADD_METHODS {
                for name in names.names() {
                    let plugin = self
                        .plugins
                        .get(name)
                        .ok_or_else(|| Error::hook(backend, ADD_METHODS, format!("unknown plugin '{name}'")))?;
                    bound.add_methods(Arc::clone(plugin));
                }
                continue;
            }
            let point: HookPoint = text
                .parse()
                .map_err(|_| Error::hook(backend, text.as_str(), "unknown hook point"))?;
            let names = names.names();
            if matches!(point.phase, Phase::Declare | Phase::Main) && names.len() != 1 {
                return Err(Error::hook(
                    backend,
                    text.as_str(),
                    format!("exactly one plugin can override this point, got {}", names.len()),
                ));
            }
            for name in names {
                let plugin = self
                    .plugins
                    .get(name)
                    .ok_or_else(|| Error::hook(backend, text.as_str(), format!("unknown plugin '{name}'")))?;
                if !plugin.hook_points().contains(&point) {
                    return Err(Error::hook(
                        backend,
                        text.as_str(),
                        format!("plugin '{name}' does not provide this point"),
                    ));
                }
                bound.bind(point, Arc::clone(plugin));
            }
        }
        Ok(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::Operation;

    fn config(text: &str) -> HookConfig {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_hook_config_accepts_one_or_many() {
        let config = config(
            r#"
            "before-create" = ["request-time", "audit"]
            "find-all" = "user-id"
            "#,
        );
        assert_eq!(config.points["before-create"].names(), vec!["request-time", "audit"]);
        assert_eq!(config.points["find-all"].names(), vec!["user-id"]);
    }

    #[test]
    fn test_bind_overrides_and_appends() {
        let registry = PluginRegistry::with_defaults();
        let bound = registry
            .bind(
                "sql",
                &config(
                    r#"
                    "before-create" = "request-time"
                    "after-create" = ["audit"]
                    "find-all" = "user-id"
                    "#,
                ),
            )
            .unwrap();
        let find_all = HookPoint::new(Operation::FindAll, Phase::Main);
        assert_eq!(bound.bound_names(find_all), vec!["user-id"]);
        assert_eq!(bound.bound_names(HookPoint::new(Operation::Count, Phase::Main)), vec!["sql"]);
        assert_eq!(bound.bound_names(HookPoint::new(Operation::Create, Phase::Before)), vec!["request-time"]);
        assert!(bound.bound_names(HookPoint::new(Operation::Update, Phase::After)).is_empty());
    }

    #[test]
    fn test_bind_errors_are_hook_errors() {
        let registry = PluginRegistry::with_defaults();
        let cases = [
            r#""before-upsert" = "audit""#,
            r#""before-create" = "missing""#,
            r#""before-find-all" = "audit""#,
            r#""find-all" = ["user-id", "audit"]"#,
        ];
        for case in cases {
            let err = registry.bind("sql", &config(case)).unwrap_err();
            assert!(matches!(err, Error::Hook { .. }), "{case}: {err}");
        }
        assert!(registry.bind("mongo", &HookConfig::new()).is_err());
        let err = registry.bind("sql", &config(r#""add-methods" = "missing""#)).unwrap_err();
        assert!(matches!(err, Error::Hook { .. }), "{err}");
    }

    #[test]
    fn test_defaults_register_both_backends() {
        let registry = PluginRegistry::with_defaults();
        let names: Vec<_> = registry.backends().map(|b| b.name().to_string()).collect();
        assert_eq!(names, vec!["cache", "sql"]);
        let bound = registry.bind("cache", &HookConfig::new()).unwrap();
        assert_eq!(bound.backend().name(), "cache");
        assert_eq!(bound.bound_names(HookPoint::new(Operation::FindBy, Phase::Main)), vec!["cache"]);
    }
}
