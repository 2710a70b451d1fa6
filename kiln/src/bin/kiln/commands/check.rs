use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use kiln_build::generate::EntitySummary;
use serde::Serialize;

use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Validate definitions and hook bindings",
    commands: &["kiln check", "kiln --output json check"],
}];

#[derive(Serialize)]
struct EntityRow {
    name: String,
    backend: String,
    read_only: bool,
    methods: Vec<String>,
}

impl From<EntitySummary> for EntityRow {
    fn from(summary: EntitySummary) -> Self {
        Self {
            name: summary.name,
            backend: summary.backend,
            read_only: summary.read_only,
            methods: summary.methods,
        }
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct CheckReport {
    entities: Vec<EntityRow>,
}

impl TableDisplay for CheckReport {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["Entity", "Backend", "Read only", "Methods"]);
        for entity in &self.entities {
            table.add_row(vec![
                Cell::new(&entity.name),
                Cell::new(&entity.backend),
                Cell::new(if entity.read_only { "yes" } else { "no" }),
                Cell::new(entity.methods.join(", ")),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.entities.iter().map(|e| e.name.as_str()).collect::<Vec<_>>().join(" ")
    }
}

pub fn handle_check(config: PathBuf, output: &OutputManager) -> Result<()> {
    let builder = super::load_builder(&config, output)?;
    let settings = builder.settings();
    output.key_value("definitions", &settings.definitions.display().to_string());
    if let Some(api) = &settings.api {
        output.key_value("endpoints", &api.display().to_string());
    }
    let summaries = builder.check()?;
    if summaries.is_empty() {
        output.warning("No entity definitions found");
        return Ok(());
    }
    let report = CheckReport {
        entities: summaries.into_iter().map(EntityRow::from).collect(),
    };
    output.display(&report)?;
    output.success(&format!("{} entities are valid", report.entities.len()));
    Ok(())
}
