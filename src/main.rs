use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use excel_vars::config::ExtractOptions;
use excel_vars::extract::extract_from_path;
use excel_vars::json_export;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Excel file path
    #[arg(required = true)]
    file_path: PathBuf,

    /// Write the JSON to this file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// JSON config file with extraction options
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Treat this sheet as a single table, dropping incomplete rows (repeatable)
    #[arg(long = "single-table", short = 's', value_name = "SHEET")]
    single_table: Vec<String>,

    /// Don't treat diagram_labels and diagram_variables as single-table sheets
    #[arg(long)]
    no_default_single_table: bool,

    /// Output only the variable with this name
    #[arg(long, short = 'g', value_name = "NAME")]
    get: Option<String>,

    /// List variable names with their shape instead of printing JSON
    #[arg(long, short = 'l')]
    list: bool,

    /// Exit with an error when any table was skipped
    #[arg(long)]
    strict: bool,

    /// More logging (-v info, -vv debug)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut options = match &cli.config {
        Some(path) => ExtractOptions::from_json_file(path)?,
        None => ExtractOptions::default(),
    };
    if cli.no_default_single_table {
        options = options.without_single_table_sheets();
    }
    for sheet in cli.single_table {
        options = options.with_single_table_sheet(sheet);
    }

    let extraction = extract_from_path(&cli.file_path, &options)
        .with_context(|| format!("Failed to extract variables from {}", cli.file_path.display()))?;
    let variables = &extraction.variables;

    if cli.list {
        for (name, binding) in variables.iter() {
            println!("{}\t{}\t{}", name, binding.shape().describe(), binding.len());
        }
    } else if let Some(path) = &cli.output {
        match &cli.get {
            Some(name) => json_export::export_binding_json(variables, name, path)?,
            None => json_export::export_variables_json(variables, path)?,
        }
    } else {
        let json_string = match &cli.get {
            Some(name) => json_export::serialize_to_json(variables.get(name)?)?,
            None => json_export::serialize_to_json(variables)?,
        };
        println!("{}", json_string);
    }

    // Skipped tables were already reported through the warn log
    if cli.strict && !extraction.diagnostics.is_empty() {
        anyhow::bail!(
            "{} table(s) were skipped, see warnings above",
            extraction.diagnostics.len()
        );
    }

    Ok(())
}
