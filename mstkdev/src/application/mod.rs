pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use mstk_core::error::Result;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::List { input } => handlers::handle_list(input),
        Commands::Extract {
            input,
            symbols,
            all,
            precision,
            output,
        } => handlers::handle_extract(input, symbols, all, precision, output),
        Commands::Cat {
            input,
            symbol,
            precision,
        } => handlers::handle_cat(input, symbol, precision),
        Commands::Columns { input, symbol } => handlers::handle_columns(input, symbol),
    }
}
