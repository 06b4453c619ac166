use std::path::PathBuf;

use clap::Parser;

/// Build property search criteria in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Print every submitted search as a JSON line on exit
    #[arg(long, env = "PROPERTY_SEARCH_PRINT")]
    pub print: bool,

    /// Neither load nor save the search history
    #[arg(long, env = "PROPERTY_SEARCH_NO_HISTORY")]
    pub no_history: bool,

    /// Where to write logs [default: <cache dir>/property-search/property-search.log]
    #[arg(long, env = "PROPERTY_SEARCH_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}
