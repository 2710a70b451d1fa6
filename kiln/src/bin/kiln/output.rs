use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color as TableColor, Table};
use serde::Serialize;

use crate::theme::{ICONS, THEME};

/// Output format options for CLI commands
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Formatted table output (default)
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// Compact single-line output
    Compact,
}

/// Global CLI options that affect output and behavior
#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// Data that can be displayed as a table
pub trait TableDisplay {
    fn to_table(&self, output: &OutputManager) -> Table;
    fn to_compact(&self) -> String;
}

/// Output manager handles formatting and display
pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Display data according to the configured output format
    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }
        match self.options.output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                println!("{json}");
            }
            OutputFormat::Table => {
                let table = data.to_table(self);
                println!("{table}");
            }
            OutputFormat::Compact => {
                println!("{}", data.to_compact());
            }
        }
        Ok(())
    }

    /// Status lines are suppressed in JSON mode so the output stays parseable.
    fn chatty(&self) -> bool {
        !self.options.quiet && self.options.output_format != OutputFormat::Json
    }

    fn line(&self, icon: &str, message: &str, color: colored::Color) -> String {
        if self.options.no_color {
            format!("{icon} {message}")
        } else {
            format!("{} {}", icon.color(color), message.color(color))
        }
    }

    pub fn success(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.line(ICONS.success, message, THEME.success));
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.line(ICONS.error, message, THEME.error));
    }

    pub fn warning(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.line(ICONS.warning, message, THEME.warning));
        }
    }

    pub fn info(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.line(ICONS.info, message, THEME.info));
        }
    }

    /// Display verbose information (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.options.verbose && !self.options.quiet {
            eprintln!("{}", self.line(ICONS.arrow, message, THEME.muted));
        }
    }

    pub fn heading(&self, text: &str) {
        if self.chatty() {
            let output = if self.options.no_color {
                format!("\n{text}\n{}", "=".repeat(text.len()))
            } else {
                format!("\n{}", text.color(THEME.primary).bold())
            };
            println!("{output}");
        }
    }

    pub fn key_value(&self, key: &str, value: &str) {
        if self.chatty() {
            let output = if self.options.no_color {
                format!("{key}: {value}")
            } else {
                format!("{}: {}", key.color(THEME.key).bold(), value.color(THEME.value))
            };
            println!("{output}");
        }
    }

    /// Display indented text with a prefix icon
    pub fn indented(&self, icon: &str, text: &str) {
        if self.chatty() {
            let output = if self.options.no_color {
                format!("  {icon} {text}")
            } else {
                format!("  {} {text}", icon.color(THEME.muted))
            };
            println!("{output}");
            std::io::stdout().flush().ok();
        }
    }

    pub fn create_table(&self) -> Table {
        let mut table = Table::new();
        if !self.options.no_color {
            table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
        } else {
            table.load_preset(comfy_table::presets::ASCII_FULL);
        }
        table
    }

    pub fn add_table_header(&self, table: &mut Table, headers: &[&str]) {
        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h).add_attribute(Attribute::Bold);
                if self.options.no_color { cell } else { cell.fg(TableColor::Cyan) }
            })
            .collect();
        table.set_header(header_cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    impl TableDisplay for TestData {
        fn to_table(&self, output: &OutputManager) -> Table {
            let mut table = output.create_table();
            output.add_table_header(&mut table, &["Name", "Value"]);
            table.add_row(vec![Cell::new(&self.name), Cell::new(self.value.to_string())]);
            table
        }

        fn to_compact(&self) -> String {
            format!("{}={}", self.name, self.value)
        }
    }

    fn data() -> TestData {
        TestData {
            name: "test".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_output_manager_json() {
        let manager = OutputManager::new(GlobalOptions {
            output_format: OutputFormat::Json,
            ..Default::default()
        });
        assert!(manager.display(&data()).is_ok());
        assert!(!manager.chatty());
    }

    #[test]
    fn test_output_manager_quiet() {
        let manager = OutputManager::new(GlobalOptions {
            quiet: true,
            ..Default::default()
        });
        assert!(manager.display(&data()).is_ok());
    }

    #[test]
    fn test_table_has_header() {
        let manager = OutputManager::new(GlobalOptions {
            no_color: true,
            ..Default::default()
        });
        let rendered = data().to_table(&manager).to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("42"));
    }
}
