//! `kiln.toml` project configuration.
//!
//! ```toml
//! module_root = "crate::generated"
//! definitions = "schema"
//! api = "api.toml"
//! test_data = "testdata"
//! output = "src/generated"
//!
//! [dao]
//! default = "sql"
//!
//! [dao.datastore.sql.hooks]
//! "before-create" = "request-time"
//!
//! [[plural]]
//! singular = "cactus"
//! plural = "cacti"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::plugin::HookConfig;

pub const DEFAULT_FILE: &str = "kiln.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KilnConfig {
    /// Rust path the output directory is mounted at.
    pub module_root: String,
    /// Directory holding one `*.toml` entity definition per file.
    pub definitions: PathBuf,
    /// Optional directory of storage table descriptions merged into the definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<PathBuf>,
    /// Optional endpoint file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<PathBuf>,
    /// Optional directory of per-entity test objects for the model factories, seeded with defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_data: Option<PathBuf>,
    pub output: PathBuf,
    pub dao: DaoConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plural: Vec<PluralRule>,
}

impl Default for KilnConfig {
    fn default() -> Self {
        Self {
            module_root: "crate::generated".into(),
            definitions: PathBuf::from("schema"),
            tables: None,
            api: None,
            test_data: None,
            output: PathBuf::from("src/generated"),
            dao: DaoConfig::default(),
            plural: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaoConfig {
    /// Backend of entities that do not name a datastore.
    pub default: String,
    pub datastore: BTreeMap<String, DatastoreConfig>,
}

impl Default for DaoConfig {
    fn default() -> Self {
        Self {
            default: "sql".into(),
            datastore: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatastoreConfig {
    pub hooks: HookConfig,
}

/// An irregular plural registered before any name is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluralRule {
    pub singular: String,
    pub plural: String,
}

impl KilnConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// Read `path`; a missing file yields the defaults. Relative paths are resolved against the
    /// directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let config = match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no configuration at {}, using defaults", path.display());
                Self::default()
            }
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(config.relative_to(&base))
    }

    /// Resolve every relative path of the configuration against `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let join = |p: &Path| if p.is_relative() { base.join(p) } else { p.to_path_buf() };
        self.definitions = join(&self.definitions);
        self.output = join(&self.output);
        self.tables = self.tables.as_deref().map(join);
        self.api = self.api.as_deref().map(join);
        self.test_data = self.test_data.as_deref().map(join);
        self
    }

    pub fn hooks(&self) -> impl Iterator<Item = (&str, &HookConfig)> {
        self.dao.datastore.iter().map(|(name, store)| (name.as_str(), &store.hooks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::HookNames;

    #[test]
    fn test_parse_full_config() {
        let config = KilnConfig::parse(
            r#"
            module_root = "crate::db"
            definitions = "defs"
            api = "api.toml"
            test_data = "testdata"

            [dao]
            default = "sql"

            [dao.datastore.sql.hooks]
            "before-create" = ["request-time", "audit"]
            "find-all" = "user-id"

            [[plural]]
            singular = "cactus"
            plural = "cacti"
            "#,
        )
        .unwrap();
        assert_eq!(config.module_root, "crate::db");
        assert_eq!(config.output, PathBuf::from("src/generated"));
        let (backend, hooks) = config.hooks().next().unwrap();
        assert_eq!(backend, "sql");
        assert_eq!(
            hooks.points.get("find-all"),
            Some(&HookNames::One("user-id".into()))
        );
        assert_eq!(config.plural[0].plural, "cacti");
        let config = config.relative_to(Path::new("/app"));
        assert_eq!(config.test_data, Some(PathBuf::from("/app/testdata")));
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let err = KilnConfig::parse("outptu = \"x\"").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = KilnConfig::load(&dir.path().join(DEFAULT_FILE)).unwrap();
        assert_eq!(config.dao.default, "sql");
        assert_eq!(config.definitions, dir.path().join("schema"));
        assert!(config.api.is_none());
    }
}
