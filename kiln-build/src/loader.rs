//! Definition discovery on disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::entity::Class;
use crate::error::{Error, Result};
use crate::generate::api::{self, Endpoint};
use crate::resolver;
use crate::schema::TableSchema;

/// Every `*.toml` file below `dir`, sorted by path.
fn toml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "toml") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load one entity definition per file.
pub fn load_definitions(dir: &Path) -> Result<Vec<Class>> {
    let mut classes = Vec::new();
    for path in toml_files(dir)? {
        let class: Class = toml::from_str(&read(&path)?)
            .map_err(|e| Error::definition(path.display().to_string(), e.to_string()))?;
        debug!("loaded '{}' from {}", class.name, path.display());
        classes.push(class);
    }
    Ok(classes)
}

pub fn load_tables(dir: &Path) -> Result<Vec<TableSchema>> {
    toml_files(dir)?
        .into_iter()
        .map(|path| {
            toml::from_str(&read(&path)?)
                .map_err(|e| Error::definition(path.display().to_string(), e.to_string()))
        })
        .collect()
}

/// Fold table descriptions into the definitions: a table with a persisted definition is merged into it,
/// any other table becomes a fresh definition.
pub fn merge_tables(mut classes: Vec<Class>, tables: &[TableSchema]) -> Vec<Class> {
    for table in tables {
        let fresh = Class::from_table(table);
        match classes.iter_mut().find(|c| c.name.snake() == fresh.name.snake()) {
            Some(old) => *old = resolver::merge(old, &fresh),
            None => classes.push(fresh),
        }
    }
    classes
}

pub fn load_endpoints(path: &Path) -> Result<Vec<Endpoint>> {
    api::parse(&read(path)?).map_err(|e| match e {
        Error::Config { message } => Error::config(format!("{}: {message}", path.display())),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_nested_toml_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(
            dir.path().join("nested").join("skill.toml"),
            "name = \"skill\"\nindex = { primary_key = \"id\" }\nmembers = [{ name = \"id\", type = \"u64\" }]\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("a_user.toml"),
            "name = \"user\"\nmembers = [{ name = \"id\", type = \"u64\" }]\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        let classes = load_definitions(dir.path()).unwrap();
        let names: Vec<String> = classes.iter().map(|c| c.name.snake()).collect();
        assert_eq!(names, vec!["user", "skill"]);
    }

    #[test]
    fn test_bad_definition_names_its_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.toml"), "members = 3").unwrap();
        let err = load_definitions(dir.path()).unwrap_err();
        assert!(err.to_string().contains("broken.toml"), "{err}");
    }

    #[test]
    fn test_merge_tables_keeps_extend_members() {
        let mut user: Class = toml::from_str(
            r#"
            name = "user"
            members = [
                { name = "id", type = "u64" },
                { name = "nickname", type = "string", extend = true },
            ]
            "#,
        )
        .unwrap();
        user.index.primary_key = Some(crate::entity::Name::new("id"));
        let tables: Vec<TableSchema> = vec![toml::from_str(
            r#"
            name = "users"
            primary_key = "id"
            [[columns]]
            name = "id"
            kind = "u64"
            [[columns]]
            name = "email"
            kind = "string"
            "#,
        )
        .unwrap()];
        let merged = merge_tables(vec![user], &tables);
        assert_eq!(merged.len(), 1);
        let names: Vec<String> = merged[0].members.iter().map(|m| m.name.snake()).collect();
        assert_eq!(names, vec!["id", "email", "nickname"]);
    }
}
