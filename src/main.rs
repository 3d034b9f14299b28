mod analysis;
mod cli;
mod error_handling;
mod grammar;
mod parser;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let loaded = match cli.input_file() {
        Some(path) => parser::parse_file(path),
        None => Ok(parser::parse_reader(std::io::stdin().lock(), Path::new("<stdin>")))
    };
    let mut loaded = match loaded {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("{}", if cli.plain { format!("{:#}", error) } else { error.to_string() });
            return ExitCode::FAILURE;
        }
    };

    if let Some(start) = &cli.start {
        let file = cli.input_file().cloned().unwrap_or_else(|| PathBuf::from("<stdin>"));
        loaded.override_start(start, file);
    }

    for error in &loaded.errors {
        if cli.plain {
            eprintln!("{:#}", error);
        } else {
            eprintln!("{}", error);
        }
    }

    let analysis = analysis::analyze(&loaded.grammar);
    let warnings = analysis.conflicts();
    print!("{}", report::render(&analysis, &warnings, !cli.plain));

    ExitCode::SUCCESS
}
