use clap::{Parser, Subcommand};
use sheets::cli;
use sheets::config::SheetsConfig;
use sheets::error::SheetsResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheets")]
#[command(about = "A five-column sheet editor with local persistence and Excel download.")]
#[command(long_about = "Sheets - a small grid editor (columns A to E)

Every change is saved to a local store and restored on the next run.
Typing into the last cell of column E adds a blank column; emptying the
cell to its left while that column is blank removes it again.

COMMANDS:
  show      - Print the sheet
  set       - Edit one cell (e.g. set B3 hello)
  clear     - Clear the sheet
  reset     - Start over with an empty 10 x 5 sheet
  download  - Write the sheet to an Excel file (.xlsx)
  import    - Load a sheet from an Excel file
  shell     - Interactive editing session

EXAMPLES:
  sheets set A1 Revenue
  sheets download --share
  sheets --data-dir ./data show")]
#[command(version)]
struct Cli {
    /// Directory of the local store
    #[arg(long, global = true, env = "SHEETS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory downloads are written to
    #[arg(long, global = true, env = "SHEETS_EXPORT_DIR")]
    export_dir: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sheet
    Show,

    /// Edit one cell
    Set {
        /// Cell reference, e.g. B3
        cell: String,

        /// New value (omit to empty the cell)
        #[arg(default_value = "")]
        value: String,
    },

    /// Clear the sheet (keeps the corner cell)
    Clear,

    /// Start over with an empty 10 x 5 sheet
    Reset,

    #[command(long_about = "Write the sheet to an Excel .xlsx file.

The workbook has one worksheet, Sheet1. Its first row holds the column
letters and its first column the row numbers, followed by the cell values.

EXAMPLES:
  sheets download                     # <export dir>/sheets.xlsx
  sheets download -o report.xlsx
  sheets download --share             # then open it")]
    /// Write the sheet to an Excel file
    Download {
        /// Output file (defaults to sheets.xlsx in the export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the file with the default application afterwards
        #[arg(short, long)]
        share: bool,
    },

    /// Load a sheet from an Excel file (columns past E are dropped)
    Import {
        /// Path to Excel file (.xlsx)
        input: PathBuf,
    },

    /// Interactive editing session on stdin
    Shell,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "sheets=debug" } else { "sheets=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> SheetsResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SheetsConfig::resolve(cli.data_dir, cli.export_dir);

    match cli.command {
        Commands::Show => cli::show(&config),
        Commands::Set { cell, value } => cli::set(&config, &cell, &value),
        Commands::Clear => cli::clear(&config),
        Commands::Reset => cli::reset(&config),
        Commands::Download { output, share } => cli::download(&config, output, share),
        Commands::Import { input } => cli::import(&config, input),
        Commands::Shell => cli::shell(&config),
    }
}
