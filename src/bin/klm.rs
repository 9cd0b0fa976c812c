//! Command-line interface for klm
//! Predicts task completion times for files of klm operators.
//!
//! Usage:
//!   klm `<path>` [--table `<name>`]... [--costs `<file>`]... [--format `<format>`]  - Estimate a file
//!   klm --list-tables                                                         - List configured cost tables
//!
//! Settings are read from the built-in defaults, then `./klm.toml` if present (or
//! the file given with `--config`), then the command-line flags.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use klm::klm::config::{KlmConfig, Loader};
use klm::klm::costs::CostTable;
use klm::klm::processor::{render, Estimator, OutputFormat};
use klm::klm::reporting::TracingReporter;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, Level};

const USER_CONFIG: &str = "klm.toml";

fn main() -> ExitCode {
    let matches = Command::new("klm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Predict task completion times with the Keystroke-Level Model")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("File with klm operators (may contain # comments)")
                .required_unless_present("list-tables")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults (default: ./klm.toml if present)"),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .short('t')
                .help("Cost table to evaluate; repeat to select several (default: evaluation.tables)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("costs")
                .long("costs")
                .help("Extra cost table file (.json, .yaml), named after the file stem")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(OutputFormat::available().to_vec()),
        )
        .arg(
            Arg::new("precision")
                .long("precision")
                .help("Decimal places for totals in text output")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Exit with status 2 if any operator is not recognized")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
        .arg(
            Arg::new("list-tables")
                .long("list-tables")
                .help("List the configured cost tables")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(&matches);

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(1);
        }
    };

    if matches.get_flag("list-tables") {
        handle_list_tables_command(&config);
        return ExitCode::SUCCESS;
    }

    match matches.get_one::<String>("path") {
        Some(path) => handle_estimate_command(&matches, &config, path),
        None => {
            eprintln!("Error: a klm file is required unless --list-tables is given");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(matches: &ArgMatches) {
    let level = if matches.get_flag("quiet") {
        Level::ERROR
    } else {
        match matches.get_count("verbose") {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<KlmConfig, config::ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(USER_CONFIG),
    };

    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(precision) = matches.get_one::<u32>("precision") {
        loader = loader.set_override("output.precision", i64::from(*precision))?;
    }
    if matches.get_flag("strict") {
        loader = loader.set_override("evaluation.strict", true)?;
    }

    loader.build()
}

/// Handle the estimate command
fn handle_estimate_command(matches: &ArgMatches, config: &KlmConfig, path: &str) -> ExitCode {
    let selection: Option<Vec<String>> = matches
        .get_many::<String>("table")
        .map(|names| names.cloned().collect());

    let mut estimator = match Estimator::from_config(config, selection.as_deref()) {
        Ok(estimator) => estimator,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("\nAvailable tables:");
            for name in config.tables.keys() {
                eprintln!("  {}", name);
            }
            return ExitCode::from(1);
        }
    };

    for costs in matches.get_many::<String>("costs").into_iter().flatten() {
        let costs = Path::new(costs);
        let table = match CostTable::load(costs) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("Error loading cost table: {}", e);
                return ExitCode::from(1);
            }
        };
        let name = costs
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| costs.display().to_string());
        debug!(table = %name, operators = table.len(), "loaded cost table");
        estimator = estimator.with_table(name, table);
    }

    let estimate = match estimator.estimate_file(path, &mut TracingReporter) {
        Ok(estimate) => estimate,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    match render(&estimate, config.output.format, config.output.precision) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    }

    if config.evaluation.strict && estimate.has_warnings() {
        eprintln!("Unrecognized operators found (strict mode)");
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

/// Handle the list-tables command
fn handle_list_tables_command(config: &KlmConfig) {
    println!("Available cost tables:\n");

    for (name, table) in &config.tables {
        let marker = if config.evaluation.tables.contains(name) {
            " (selected)"
        } else {
            ""
        };
        println!("  {}{}", name, marker);
        let costs: Vec<String> = table
            .iter()
            .map(|(code, cost)| format!("{}={}", code, cost))
            .collect();
        println!("    {}", costs.join(" "));
        println!();
    }
}
