use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};
use kiln_build::write_files;
use serde::Serialize;

use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};
use crate::theme::ICONS;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Generate into the configured output directory",
        commands: &["kiln generate"],
    },
    ExampleGroup {
        title: "Generate elsewhere, or only list the files",
        commands: &["kiln generate --out target/generated", "kiln generate --dry-run"],
    },
];

#[derive(Args)]
pub struct GenerateArgs {
    /// Output directory, overriding the configuration
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// List the files that would be generated without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
struct GenerateReport {
    output: PathBuf,
    written: Vec<PathBuf>,
    unchanged: Vec<PathBuf>,
}

impl TableDisplay for GenerateReport {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["File", "Status"]);
        for path in &self.written {
            table.add_row(vec![Cell::new(path.display()), Cell::new("written")]);
        }
        for path in &self.unchanged {
            table.add_row(vec![Cell::new(path.display()), Cell::new("unchanged")]);
        }
        table
    }

    fn to_compact(&self) -> String {
        format!("written={} unchanged={}", self.written.len(), self.unchanged.len())
    }
}

pub fn handle_generate(config: PathBuf, args: GenerateArgs, output: &OutputManager) -> Result<()> {
    let mut builder = super::load_builder(&config, output)?;
    if let Some(out) = args.out {
        builder = builder.output(out);
    }
    let root = builder.settings().output.clone();

    if args.dry_run {
        let files = builder.generate()?;
        output.heading(&format!("{} files would be generated", files.len()));
        for file in &files {
            output.indented(ICONS.arrow, &root.join(&file.path).display().to_string());
        }
        return Ok(());
    }

    let files = builder.generate()?;
    output.verbose(&format!("writing {} files below {}", files.len(), root.display()));
    let report = write_files(&root, &files)?;
    if output.options.verbose {
        for path in &report.unchanged {
            output.indented(ICONS.unchanged, &path.display().to_string());
        }
    }
    for path in &report.written {
        output.indented(ICONS.file, &path.display().to_string());
    }
    if report.written.is_empty() {
        output.info("Everything is up to date");
    } else {
        output.success(&format!("Generated {} of {} files", report.written.len(), files.len()));
    }
    if output.options.output_format != crate::output::OutputFormat::Table {
        output.display(&GenerateReport {
            output: root,
            written: report.written,
            unchanged: report.unchanged,
        })?;
    }
    Ok(())
}
