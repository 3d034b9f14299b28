use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

#[derive(Parser)]
#[command(version, about = "Checks whether a BNF grammar can be parsed with one token of lookahead")]
pub struct Cli {
    /// File containing the grammar (default: standard input)
    pub file: Option<PathBuf>,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Print diagnostics without colours
    #[arg(long)]
    pub plain: bool,

    /// Log more about the analysis, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8
}

impl Cli {
    // `-` also means standard input
    pub fn input_file(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|path| path.as_os_str() != "-")
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace
        }
    }
}
