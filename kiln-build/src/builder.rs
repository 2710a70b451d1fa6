//! Entry point used from `build.rs` and the `kiln` command line.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::KilnConfig;
use crate::entity::{Class, plural};
use crate::generate::{EntitySummary, Endpoint, GeneratedFile, Generator, Layout, TestData};
use crate::loader;
use crate::plugin::PluginRegistry;

/// Outcome of writing a generation run to disk.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

/// Builder for configuring and running a generation.
pub struct Builder {
    config: KilnConfig,
    registry: PluginRegistry,
}

impl Builder {
    /// Default configuration with the built-in backend and plugins.
    pub fn new() -> Self {
        Self {
            config: KilnConfig::default(),
            registry: PluginRegistry::with_defaults(),
        }
    }

    /// Read `kiln.toml` at `path`; a missing file keeps the defaults.
    pub fn from_config(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = KilnConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(Self::new().config(config))
    }

    pub fn config(mut self, config: KilnConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the plugin registry, e.g. to add project-specific plugins.
    pub fn registry(mut self, registry: PluginRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn definitions(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.definitions = dir.into();
        self
    }

    /// Override the output directory.
    ///
    /// Default: `src/generated`
    pub fn output(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output = dir.into();
        self
    }

    pub fn settings(&self) -> &KilnConfig {
        &self.config
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.registry
    }

    fn load(&self) -> Result<(Vec<Class>, Vec<Endpoint>)> {
        for rule in &self.config.plural {
            plural::register(&rule.singular, &rule.plural);
        }
        let dir = &self.config.definitions;
        let mut classes = loader::load_definitions(dir).with_context(|| format!("Failed to load {}", dir.display()))?;
        if let Some(tables) = &self.config.tables {
            let tables = loader::load_tables(tables).with_context(|| format!("Failed to load {}", tables.display()))?;
            classes = loader::merge_tables(classes, &tables);
        }
        let endpoints = match &self.config.api {
            Some(path) => loader::load_endpoints(path).with_context(|| format!("Failed to load {}", path.display()))?,
            None => Vec::new(),
        };
        debug!("loaded {} definitions and {} endpoints", classes.len(), endpoints.len());
        Ok((classes, endpoints))
    }

    fn test_data_file(dir: &Path, class: &Class) -> PathBuf {
        dir.join(format!("{}.toml", class.name.snake()))
    }

    /// Test objects written so far, by entity. Entities without a file are absent.
    fn test_data(&self, classes: &[Class]) -> Result<BTreeMap<String, TestData>> {
        let mut data = BTreeMap::new();
        let Some(dir) = &self.config.test_data else {
            return Ok(data);
        };
        for class in classes {
            let path = Self::test_data_file(dir, class);
            if !path.exists() {
                continue;
            }
            let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            let objects = TestData::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
            data.insert(class.name.snake(), objects);
        }
        Ok(data)
    }

    /// Create or complete each entity's test data file with the default objects.
    fn seed_test_data(&self, classes: &[Class], data: &BTreeMap<String, TestData>) -> Result<Vec<PathBuf>> {
        let mut seeded = Vec::new();
        let Some(dir) = &self.config.test_data else {
            return Ok(seeded);
        };
        fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))?;
        for class in classes {
            let mut objects = data.get(&class.name.snake()).cloned().unwrap_or_default();
            if !objects.merge_default(class) {
                continue;
            }
            let path = Self::test_data_file(dir, class);
            fs::write(&path, objects.to_toml()?).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("seeded {}", path.display());
            seeded.push(path);
        }
        Ok(seeded)
    }

    fn generator(&self, endpoints: Vec<Endpoint>, test_data: BTreeMap<String, TestData>) -> Generator<'_> {
        let mut generator = Generator::new(&self.registry)
            .layout(Layout::new(self.config.module_root.clone()))
            .default_backend(self.config.dao.default.clone())
            .endpoints(endpoints)
            .test_data(test_data);
        for (backend, hooks) in self.config.hooks() {
            generator = generator.hooks(backend, hooks.clone());
        }
        generator
    }

    /// Load, validate, resolve and bind hooks without producing output.
    pub fn check(&self) -> Result<Vec<EntitySummary>> {
        let (classes, endpoints) = self.load()?;
        self.generator(endpoints, BTreeMap::new()).check(classes).context("Definition check failed")
    }

    /// Generated files, relative to the output directory.
    pub fn generate(&self) -> Result<Vec<GeneratedFile>> {
        let (classes, endpoints) = self.load()?;
        let test_data = self.test_data(&classes)?;
        self.generator(endpoints, test_data).generate(classes).context("Code generation failed")
    }

    /// Generate and write every file whose contents changed. Test data files missing the default
    /// objects are completed first.
    pub fn run(&self) -> Result<WriteReport> {
        let (classes, endpoints) = self.load()?;
        let test_data = self.test_data(&classes)?;
        let files = self
            .generator(endpoints, test_data.clone())
            .generate(classes.clone())
            .context("Code generation failed")?;
        self.seed_test_data(&classes, &test_data)?;
        write_files(&self.config.output, &files)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `files` below `root`, skipping files whose contents are unchanged.
pub fn write_files(root: &Path, files: &[GeneratedFile]) -> Result<WriteReport> {
    let mut report = WriteReport::default();
    for file in files {
        let path = root.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let should_write = match fs::read_to_string(&path) {
            Ok(existing) => existing != file.contents,
            Err(_) => true,
        };
        if should_write {
            fs::write(&path, &file.contents).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("generated {}", path.display());
            report.written.push(path);
        } else {
            debug!("unchanged {}", path.display());
            report.unchanged.push(path);
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, contents: &str) -> GeneratedFile {
        GeneratedFile {
            path: PathBuf::from(path),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_write_files_skips_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![file("model/user.rs", "// a\n"), file("mod.rs", "// b\n")];
        let first = write_files(dir.path(), &files).unwrap();
        assert_eq!(first.written.len(), 2);
        assert!(dir.path().join("model").join("user.rs").exists());

        let changed = vec![file("model/user.rs", "// a\n"), file("mod.rs", "// c\n")];
        let second = write_files(dir.path(), &changed).unwrap();
        assert_eq!(second.written, vec![dir.path().join("mod.rs")]);
        assert_eq!(second.unchanged, vec![dir.path().join("model/user.rs")]);
    }

    #[test]
    fn test_run_seeds_test_data_and_emits_factories() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema");
        fs::create_dir_all(&schema).unwrap();
        fs::write(
            schema.join("user.toml"),
            "name = \"user\"\nmembers = [{ name = \"id\", type = \"u64\" }, { name = \"name\", type = \"string\" }]\nindex = { primary_key = \"id\" }\n",
        )
        .unwrap();
        let testdata = dir.path().join("testdata");
        fs::create_dir_all(&testdata).unwrap();
        fs::write(testdata.join("user.toml"), "[single.admin]\nid = 1\nname = \"root\"\n").unwrap();

        let mut config = KilnConfig::default().relative_to(dir.path());
        config.test_data = Some(testdata.clone());
        let report = Builder::new().config(config.clone()).run().unwrap();
        let factory = config.output.join("mock/factory/user.rs");
        assert!(report.written.contains(&factory));
        let out = fs::read_to_string(&factory).unwrap();
        assert!(out.contains("pub fn admin() -> model::User {"), "{out}");
        assert!(out.contains("pub fn default_users() -> model::Users {"), "{out}");

        let seeded = TestData::parse(&fs::read_to_string(testdata.join("user.toml")).unwrap()).unwrap();
        assert!(seeded.single.contains_key("admin"));
        assert!(seeded.single.contains_key("default"));
        assert!(seeded.collection.contains_key("defaults"));

        let again = Builder::new().config(config).run().unwrap();
        assert!(again.written.is_empty(), "{:?}", again.written);
    }

    #[test]
    fn test_missing_definitions_dir_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = Builder::new().definitions(dir.path().join("absent")).check().unwrap_err();
        assert!(format!("{err:#}").contains("absent"), "{err:#}");
    }
}
