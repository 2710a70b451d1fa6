use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use kiln_build::plugin::Hooks;
use serde::Serialize;

use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "List storage backends and plugins",
    commands: &["kiln plugins", "kiln --output compact plugins"],
}];

#[derive(Serialize)]
struct PluginRow {
    name: String,
    kind: &'static str,
    hook_points: Vec<String>,
}

impl PluginRow {
    fn new(hooks: &dyn Hooks, kind: &'static str) -> Self {
        Self {
            name: hooks.name().to_string(),
            kind,
            hook_points: hooks.hook_points().iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct PluginReport {
    entries: Vec<PluginRow>,
}

impl TableDisplay for PluginReport {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["Name", "Kind", "Hook points"]);
        for entry in &self.entries {
            table.add_row(vec![
                Cell::new(&entry.name),
                Cell::new(entry.kind),
                Cell::new(entry.hook_points.join("\n")),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.entries.iter().map(|e| format!("{}:{}", e.kind, e.name)).collect::<Vec<_>>().join(" ")
    }
}

pub fn handle_plugins(config: PathBuf, output: &OutputManager) -> Result<()> {
    let builder = super::load_builder(&config, output)?;
    let registry = builder.plugins();
    let mut entries: Vec<PluginRow> = registry.backends().map(|b| PluginRow::new(b.as_ref(), "backend")).collect();
    entries.extend(registry.plugins().map(|p| PluginRow::new(p.as_ref(), "plugin")));
    output.display(&PluginReport { entries })
}
