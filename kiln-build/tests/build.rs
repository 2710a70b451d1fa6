use std::fs;
use std::path::Path;

use kiln_build::{Builder, Error};

const USER: &str = r#"
name = "user"
index = { primary_key = "id", keys = [["email"]] }
members = [
    { name = "id", type = "u64" },
    { name = "email", type = "string" },
    { name = "skill_id", type = "u64" },
    { name = "skill", relation = { to = "skill", internal = "skill_id", external = "id" } },
]
"#;

const SKILL: &str = r#"
name = "skill"
index = { primary_key = "id" }
members = [
    { name = "id", type = "u64" },
    { name = "name", type = "string" },
]
"#;

const CONFIG: &str = r#"
definitions = "schema"
api = "api.toml"
output = "out"

[dao.datastore.sql.hooks]
"after-create" = "audit"
"#;

const API: &str = r#"
[[endpoint]]
name = "get_user"
method = "get"
uri = "/users/{id}"

[[endpoint.request.params]]
name = "id"
type = "u64"
in = "path"
required = true

[endpoint.response.type]
members = [{ name = "user", type = "user" }]
include = [{ name = "user" }]
"#;

fn project(dir: &Path) {
    fs::create_dir_all(dir.join("schema")).unwrap();
    fs::write(dir.join("schema").join("user.toml"), USER).unwrap();
    fs::write(dir.join("schema").join("skill.toml"), SKILL).unwrap();
    fs::write(dir.join("api.toml"), API).unwrap();
    fs::write(dir.join("kiln.toml"), CONFIG).unwrap();
}

fn read(dir: &Path, path: &str) -> String {
    fs::read_to_string(dir.join("out").join(path)).unwrap()
}

#[test]
fn test_run_writes_every_layer() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let builder = Builder::from_config(dir.path().join("kiln.toml")).unwrap();
    let report = builder.run().unwrap();
    assert!(!report.written.is_empty());

    for path in [
        "mod.rs",
        "entity/user.rs",
        "dao/skill.rs",
        "model/user.rs",
        "repository/mod.rs",
        "mock/user.rs",
        "api/mod.rs",
        "api/request/get_user.rs",
        "api/response/get_user.rs",
    ] {
        assert!(dir.path().join("out").join(path).exists(), "missing {path}");
    }
    assert!(read(dir.path(), "mod.rs").contains("pub mod api;"));
    assert!(read(dir.path(), "dao/user.rs").contains("delayed.check("));
    assert!(read(dir.path(), "repository/mod.rs").contains("pub struct Repository {"));
    assert!(read(dir.path(), "model/user.rs").starts_with("//! Code generated by kiln. DO NOT EDIT."));
}

#[test]
fn test_second_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let builder = Builder::from_config(dir.path().join("kiln.toml")).unwrap();
    let first = builder.run().unwrap();
    let second = builder.run().unwrap();
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), first.written.len());
}

#[test]
fn test_check_summarises_entities() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let summaries = Builder::from_config(dir.path().join("kiln.toml")).unwrap().check().unwrap();
    let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["skill", "user"]);
    assert!(summaries.iter().all(|s| s.backend == "sql"));
    assert!(summaries[1].methods.contains(&"find_by_email".to_string()));
}

#[test]
fn test_unknown_relation_target_is_reference_error() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    fs::remove_file(dir.path().join("schema").join("skill.toml")).unwrap();
    let err = Builder::from_config(dir.path().join("kiln.toml")).unwrap().check().unwrap_err();
    let cause = err.downcast_ref::<Error>().unwrap();
    assert!(matches!(cause, Error::Reference { .. }), "{err:#}");
}

#[test]
fn test_unknown_hook_plugin_fails_check() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    fs::write(
        dir.path().join("kiln.toml"),
        "definitions = \"schema\"\n[dao.datastore.sql.hooks]\n\"after-create\" = \"missing\"\n",
    )
    .unwrap();
    let err = Builder::from_config(dir.path().join("kiln.toml")).unwrap().check().unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Hook { .. })), "{err:#}");
}
