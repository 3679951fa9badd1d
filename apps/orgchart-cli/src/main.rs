mod commands;
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use platform_obs::{ObsConfig, init_tracing};
use platform_tabular::{InputFormat, template_csv};
use tracing::info;

use crate::{
    commands::{build_tree, load_employees, summarize_departments, to_json},
    config::AppConfig,
};

#[derive(Parser, Debug)]
#[command(name = "orgchart", version, about = "Org chart import and hierarchy tools")]
struct Cli {
    /// Enable debug logging for the import pipeline.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical employee records of an import file.
    Normalize(InputArgs),
    /// Print the org chart forest built from an import file.
    Tree {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_name = "QUERY", help = "Keep only matches and their superiors")]
        filter: Option<String>,
    },
    /// Print headcount per department.
    Departments {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_name = "YYYY-MM-DD", help = "Reference date for vacation counts")]
        today: Option<NaiveDate>,
    },
    /// Write the import template (CSV header row).
    Template {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// CSV or JSON file exported from a spreadsheet.
    file: PathBuf,
    #[arg(long, value_enum, help = "Input format (defaults to the file extension)")]
    format: Option<FormatArg>,
    #[arg(long, help = "Pretty-print JSON output")]
    pretty: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl InputArgs {
    fn format(&self) -> InputFormat {
        match self.format {
            Some(FormatArg::Csv) => InputFormat::Csv,
            Some(FormatArg::Json) => InputFormat::Json,
            None => InputFormat::from_path(&self.file),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(ObsConfig {
        service_name: "orgchart-cli",
        verbose: cli.verbose,
        ..ObsConfig::default()
    })?;
    let config = AppConfig::load()?;
    match cli.command {
        Command::Normalize(input) => {
            let employees = read_input(&config, &input)?;
            println!("{}", to_json(&employees, input.pretty)?);
            Ok(())
        }
        Command::Tree { input, filter } => {
            let employees = read_input(&config, &input)?;
            let (forest, _) = build_tree(&employees, filter.as_deref());
            println!("{}", to_json(&forest, input.pretty)?);
            Ok(())
        }
        Command::Departments { input, today } => {
            let employees = read_input(&config, &input)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let summary = summarize_departments(&employees, &config.default_department, today);
            println!("{}", to_json(&summary, input.pretty)?);
            Ok(())
        }
        Command::Template { output } => write_template(output.as_deref()),
    }
}

fn read_input(config: &AppConfig, input: &InputArgs) -> Result<Vec<orgchart::Employee>> {
    let text = std::fs::read_to_string(&input.file)
        .with_context(|| format!("failed to read {}", input.file.display()))?;
    load_employees(config, &text, input.format())
        .with_context(|| format!("failed to import {}", input.file.display()))
}

fn write_template(output: Option<&Path>) -> Result<()> {
    let csv = template_csv()?;
    match output {
        Some(path) => {
            std::fs::write(path, csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "import template written");
        }
        None => print!("{csv}"),
    }
    Ok(())
}
