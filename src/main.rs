use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;
use toolbox::ToolboxError;
use toolbox::host::{self, OutputFormat, RawInput, Shell};
use toolbox::tools::{ToolDescriptor, ToolRegistry, builtin_factories};

fn setup_logging(default_level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolbox")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolbox.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins over the configured level
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    env_logger::Builder::new()
        .parse_filters(&filter)
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_shell(config: &Config, verbose: bool) -> Shell {
    let registry = ToolRegistry::discover_with(&builtin_factories(), |name| config.tools.is_enabled(name));

    if verbose {
        for failure in registry.failures() {
            eprintln!("{} {}", "Skipped tool:".yellow(), failure.to_error());
        }
    }

    Shell::with_default(registry, config.tools.default_tool.as_deref())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    let mut shell = build_shell(config, cli.is_verbose());

    match &cli.command {
        None => handle_overview(&shell),
        Some(Commands::List) => handle_list_command(&shell),
        Some(Commands::Describe { tool }) => handle_describe_command(&shell, tool),
        Some(Commands::Run {
            tool,
            params,
            rows,
            input,
            format,
        }) => {
            let raw = build_raw_input(params, rows, input.as_ref())?;
            handle_run_command(&mut shell, tool, &raw, format.unwrap_or(config.output.format))
        }
    }
}

fn handle_overview(shell: &Shell) -> Result<()> {
    info!("Showing tool overview");
    handle_list_command(shell)?;
    if let Some(descriptor) = shell.current_descriptor() {
        println!();
        print!("{}", host::describe(&descriptor));
    }
    Ok(())
}

fn handle_list_command(shell: &Shell) -> Result<()> {
    let current = shell.current().map(|t| t.name());
    println!("{}", "Tools".bold());
    if shell.registry().is_empty() {
        println!("  (no tools registered)");
    }
    for name in shell.tool_names() {
        if Some(name) == current {
            println!("  {} {}", "*".green(), name.green());
        } else {
            println!("    {}", name);
        }
    }
    Ok(())
}

fn handle_describe_command(shell: &Shell, tool: &str) -> Result<()> {
    info!("Describing tool: {}", tool);
    let tool = shell.registry().require(tool)?;
    print!("{}", host::describe(&ToolDescriptor::from_tool(tool)));
    Ok(())
}

fn build_raw_input(params: &[String], rows: &[String], input: Option<&PathBuf>) -> Result<RawInput> {
    if let Some(path) = input {
        return RawInput::from_file(path).context(format!("Failed to read input from {}", path.display()));
    }
    if !rows.is_empty() {
        return Ok(RawInput::from_lines(rows));
    }
    Ok(RawInput::from_assignments(params)?)
}

fn handle_run_command(shell: &mut Shell, tool: &str, raw: &RawInput, format: OutputFormat) -> Result<()> {
    info!("Running tool: {}", tool);
    if shell.select(tool).is_none() {
        return Err(eyre!("Unknown tool: {}", tool));
    }

    match shell.submit(raw) {
        Ok(output) => {
            print!("{}", host::render(&output, format)?);
            Ok(())
        }
        Err(e) if e.is_input_error() => Err(e.into()),
        Err(e) => Err(e).context(format!("Tool '{}' failed", tool)),
    }
}

/// The input-boundary error behind a failed run, if that is what it was
fn input_error(err: &eyre::Report) -> Option<&ToolboxError> {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<ToolboxError>())
        .find(|e| e.is_input_error())
}

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let (config, warnings) = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging once the configured level is known
    setup_logging(config.log_level.as_deref().unwrap_or("info")).context("Failed to setup logging")?;

    for warning in &warnings {
        warn!("{}", warning);
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    match run_application(&cli, &config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match input_error(&e) {
            Some(input) => {
                eprintln!("{} {}", "Invalid input:".red(), input);
                Ok(ExitCode::from(2))
            }
            None => Err(e).context("Application failed"),
        },
    }
}
