mod commands;
mod examples;
mod output;
mod theme;

use std::fmt::Write;
use std::io::{self, Write as IoWrite};
use std::path::PathBuf;

use anyhow::Result;
use clap::{
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Color as ClapColor, RgbColor, Style},
    },
    error::ErrorKind,
};
use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};
use log::LevelFilter;

use commands::{check::handle_check, generate::GenerateArgs, generate::handle_generate, plugins::handle_plugins};
use examples::{ExampleGroup, command_examples};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{ICONS, THEME};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("KILN_CONFIG", "Path of the configuration file (default: kiln.toml)"),
    ("RUST_LOG", "Log filter, e.g. kiln_build=debug"),
];

#[derive(Parser)]
#[command(name = "kiln")]
#[command(version)]
#[command(
    about = "Code generator for schema-driven data layers",
    long_about = r#"Generates the data layer of an application from declarative entity definitions:

• Entity structs, data-access traits and their SQL implementations
• Domain models with relation loading and JSON/Map rendering
• Repository traits with structural mocks for tests
• Request and response adapters for API endpoints

Commands:
  generate  Write the generated modules
  check     Validate definitions without writing anything
  plugins   List storage backends and plugins
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Configuration file
    #[arg(short = 'c', long, global = true, env = "KILN_CONFIG", default_value = "kiln.toml")]
    config: PathBuf,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "table")]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the data layer from the definitions
    Generate(GenerateArgs),

    /// Load, validate and resolve definitions and bind hooks
    Check,

    /// List registered storage backends and plugins with their hook points
    Plugins,
}

impl Cli {
    fn parse_with_styles() -> Self {
        let command = build_cli_command();
        let parsed = command
            .styles(help_styles())
            .try_get_matches()
            .and_then(|matches| Cli::from_arg_matches(&matches));
        match parsed {
            Ok(cli) => cli,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = print_blank_line_stdout();
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display help: {print_err}");
                    }
                    let _ = print_blank_line_stdout();
                    std::process::exit(0);
                }
                ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    handle_missing_subcommand(err);
                }
                _ => {
                    let exit_code = err.exit_code();
                    let _ = print_blank_line_stderr();
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display error: {print_err}");
                    }
                    let _ = print_blank_line_stderr();
                    std::process::exit(exit_code);
                }
            },
        }
    }
}

fn handle_missing_subcommand(error: clap::error::Error) -> ! {
    let mut command = build_cli_command();
    let command_name = command.get_display_name().unwrap_or_else(|| command.get_name()).to_string();

    let _ = print_blank_line_stderr();
    eprintln!("error: '{command_name}' requires a subcommand but one was not provided");
    let _ = print_blank_line_stderr();

    command = command.styles(help_styles());
    let mut stderr = io::stderr();
    if command.write_long_help(&mut stderr).is_ok() {
        let _ = IoWrite::write_all(&mut stderr, b"\n");
        let _ = IoWrite::flush(&mut stderr);
    }
    std::process::exit(error.exit_code());
}

fn build_cli_command() -> Command {
    let use_color = detect_color_support();
    let appendix = render_top_level_appendix(use_color);
    let mut command = Cli::command().after_long_help(appendix);
    command = command.color(if use_color { ColorChoice::Auto } else { ColorChoice::Never });
    for example in command_examples() {
        if let Some(subcommand) = command.find_subcommand_mut(example.name) {
            let help_text = render_examples(example.groups, use_color);
            *subcommand = subcommand.clone().after_long_help(help_text);
        }
    }
    command
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let heading = stylize("Examples:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{heading}");
    for (index, group) in groups.iter().enumerate() {
        let title = stylize(group.title, theme.primary, true, use_color);
        let _ = writeln!(buffer, "  {title}");
        for command in group.commands {
            let arrow = stylize(ICONS.arrow, theme.secondary, false, use_color);
            let command_text = stylize(command, theme.secondary, false, use_color);
            let _ = writeln!(buffer, "    {arrow} {command_text}");
        }
        if index + 1 < groups.len() {
            buffer.push('\n');
        }
    }
    buffer
}

fn render_top_level_appendix(use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let env_heading = stylize("Environment Variables:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{env_heading}");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, theme.key, true, use_color);
        let value_text = stylize(description, theme.value, false, use_color);
        let _ = writeln!(buffer, "  {key_text}  {value_text}");
    }
    buffer.push('\n');

    let tip_heading = stylize("Tip:", theme.highlight, true, use_color);
    let tip_text = stylize(
        "Use 'kiln <command> --help' to view examples for each command.",
        theme.secondary,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "{tip_heading} {tip_text}");
    buffer
}

fn print_blank_line_stdout() -> io::Result<()> {
    let mut stdout = io::stdout();
    IoWrite::write_all(&mut stdout, b"\n")?;
    IoWrite::flush(&mut stdout)
}

fn print_blank_line_stderr() -> io::Result<()> {
    let mut stderr = io::stderr();
    IoWrite::write_all(&mut stderr, b"\n")?;
    IoWrite::flush(&mut stderr)
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    let styled = text.color(color);
    if bold { styled.bold().to_string() } else { styled.to_string() }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

fn help_styles() -> Styles {
    let theme = &THEME;
    Styles::styled()
        .usage(style_from_color(theme.primary).bold())
        .header(style_from_color(theme.highlight).bold())
        .literal(style_from_color(theme.secondary))
        .placeholder(style_from_color(theme.muted))
        .valid(style_from_color(theme.success))
        .invalid(style_from_color(theme.warning))
        .error(style_from_color(theme.error).bold())
}

fn style_from_color(color: ThemeColor) -> Style {
    Style::new().fg_color(Some(color_to_clap_color(color)))
}

fn color_to_clap_color(color: ThemeColor) -> ClapColor {
    match color {
        ThemeColor::Black => ClapColor::Ansi(AnsiColor::Black),
        ThemeColor::Red => ClapColor::Ansi(AnsiColor::Red),
        ThemeColor::Green => ClapColor::Ansi(AnsiColor::Green),
        ThemeColor::Yellow => ClapColor::Ansi(AnsiColor::Yellow),
        ThemeColor::Blue => ClapColor::Ansi(AnsiColor::Blue),
        ThemeColor::Magenta => ClapColor::Ansi(AnsiColor::Magenta),
        ThemeColor::Cyan => ClapColor::Ansi(AnsiColor::Cyan),
        ThemeColor::White => ClapColor::Ansi(AnsiColor::White),
        ThemeColor::BrightBlack => ClapColor::Ansi(AnsiColor::BrightBlack),
        ThemeColor::BrightRed => ClapColor::Ansi(AnsiColor::BrightRed),
        ThemeColor::BrightGreen => ClapColor::Ansi(AnsiColor::BrightGreen),
        ThemeColor::BrightYellow => ClapColor::Ansi(AnsiColor::BrightYellow),
        ThemeColor::BrightBlue => ClapColor::Ansi(AnsiColor::BrightBlue),
        ThemeColor::BrightMagenta => ClapColor::Ansi(AnsiColor::BrightMagenta),
        ThemeColor::BrightCyan => ClapColor::Ansi(AnsiColor::BrightCyan),
        ThemeColor::BrightWhite => ClapColor::Ansi(AnsiColor::BrightWhite),
        ThemeColor::TrueColor { r, g, b } => ClapColor::Rgb(RgbColor(r, g, b)),
    }
}

/// `RUST_LOG` wins; otherwise `-v` turns on debug logging of the generator.
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Warn });
    }
    builder.format_timestamp(None).init();
}

fn main() {
    let cli = Cli::parse_with_styles();
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let output = OutputManager::new(GlobalOptions {
        output_format: cli.output.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    if let Err(err) = execute(cli, &output) {
        output.error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn execute(cli: Cli, output: &OutputManager) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => handle_generate(cli.config, args, output),
        Commands::Check => handle_check(cli.config, output),
        Commands::Plugins => handle_plugins(cli.config, output),
    }
}
