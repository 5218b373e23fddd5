use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "mstkdev: Metastock archive decoder", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all symbols from every EMASTER/XMASTER under the input directory
    List {
        #[arg(default_value = ".")]
        input: PathBuf,
    },

    /// Extract symbols to text files, one <SYMBOL>.TXT each
    Extract {
        /// Metastock directory (searched recursively)
        input: PathBuf,

        /// Symbols to extract
        #[arg(required_unless_present = "all")]
        symbols: Vec<String>,

        /// Extract every symbol
        #[arg(short, long)]
        all: bool,

        /// Round floats to N digits after the decimal point (default: 2)
        #[arg(short, long)]
        precision: Option<usize>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Stream one symbol's rows to stdout
    Cat {
        input: PathBuf,
        symbol: String,
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Show the column layout resolved for one symbol
    Columns { input: PathBuf, symbol: String },
}
