use crate::config::SheetsConfig;
use crate::core::EditOutcome;
use crate::error::{SheetsError, SheetsResult};
use crate::excel::SheetExporter;
use crate::session::Session;
use crate::types::{column_letter, CellRef, Grid, MAX_EDITABLE_COLUMN};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Render the grid the way the sheet screen lays it out: a letter header,
/// then each row prefixed with its 1-based number
pub fn render_grid(grid: &Grid) -> String {
    let width = grid.column_count();
    let label_width = grid.row_count().to_string().len();

    let mut col_widths: Vec<usize> = (0..width).map(|idx| column_letter(idx).len().max(3)).collect();
    for row in grid.rows() {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(w) = col_widths.get_mut(idx) {
                *w = (*w).max(cell.as_str().chars().count());
            }
        }
    }

    let mut out = String::new();

    out.push_str(&format!("{:>label_width$}", ""));
    for (idx, w) in col_widths.iter().enumerate() {
        out.push_str(&format!(" | {:<w$}", column_letter(idx), w = *w));
    }
    out.push('\n');

    for (row_idx, row) in grid.rows().iter().enumerate() {
        out.push_str(&format!("{:>label_width$}", row_idx + 1));
        for (idx, cell) in row.iter().enumerate() {
            let w = col_widths.get(idx).copied().unwrap_or(0);
            out.push_str(&format!(" | {:<w$}", cell.as_str()));
        }
        out.push('\n');
    }

    out
}

/// One-line description of an edit result
fn describe_edit(cell: CellRef, value: &str, outcome: EditOutcome) -> String {
    match outcome {
        EditOutcome::Ignored if cell.column > MAX_EDITABLE_COLUMN => {
            format!("{} is beyond column E - edit ignored", cell)
        }
        EditOutcome::Ignored => format!("{} is outside the sheet - edit ignored", cell),
        EditOutcome::Applied => format!("{} = {:?}", cell, value),
        EditOutcome::Grew => format!("{} = {:?} (added a column)", cell, value),
        EditOutcome::Shrank => format!("{} = {:?} (removed the empty last column)", cell, value),
    }
}

fn open_session(config: &SheetsConfig) -> Session {
    Session::open(config.gateway(), config.exporter())
}

/// Execute the show command
pub fn show(config: &SheetsConfig) -> SheetsResult<()> {
    let session = open_session(config);
    let grid = session.grid();

    println!(
        "{} {}",
        "📄 Sheets".bold().green(),
        format!("({} rows x {} columns)", grid.row_count(), grid.column_count()).dimmed()
    );
    println!();
    print!("{}", render_grid(grid));

    Ok(())
}

/// Execute the set command
pub fn set(config: &SheetsConfig, cell: &str, value: &str) -> SheetsResult<()> {
    let cell = CellRef::parse(cell)?;
    let mut session = open_session(config);

    let outcome = session.set(cell, value);
    let message = describe_edit(cell, value, outcome);
    if outcome.changed() {
        println!("{} {}", "✅".green(), message);
    } else {
        println!("{} {}", "⚠️ ".yellow(), message.yellow());
    }

    Ok(())
}

/// Execute the clear command
pub fn clear(config: &SheetsConfig) -> SheetsResult<()> {
    let mut session = open_session(config);
    session.clear();
    println!("{}", "🧹 Sheet cleared".bold().green());
    Ok(())
}

/// Execute the reset command
pub fn reset(config: &SheetsConfig) -> SheetsResult<()> {
    let mut session = open_session(config);
    session.reset();
    println!("{}", "🔄 Sheet reset to 10 rows x 5 columns".bold().green());
    Ok(())
}

/// Execute the download command
///
/// Export failures are reported but do not fail the command.
pub fn download(config: &SheetsConfig, output: Option<PathBuf>, share: bool) -> SheetsResult<()> {
    let exporter = match output {
        Some(path) => SheetExporter::new(path),
        None => config.exporter(),
    };
    let session = Session::open(config.gateway(), exporter);

    println!("{}", "📊 Sheets - Download".bold().green());
    match session.download(share) {
        Ok(path) => {
            println!("{}", "✅ Excel file downloaded successfully".bold().green());
            println!("   Excel file: {}", path.display());
            if share {
                println!("   Shared with the default application");
            }
        }
        Err(e) => println!("{} {}", "❌ Download failed:".bold().red(), e),
    }

    Ok(())
}

/// Execute the import command
pub fn import(config: &SheetsConfig, input: PathBuf) -> SheetsResult<()> {
    let mut session = open_session(config);

    println!("{}", "📥 Sheets - Excel Import".bold().green());
    println!("   Input: {}\n", input.display());

    let grid = session.import(&input)?;
    println!(
        "{} {} rows x {} columns",
        "✅ Imported".bold().green(),
        grid.row_count(),
        grid.column_count()
    );

    Ok(())
}

/// Execute the interactive shell on stdin/stdout
pub fn shell(config: &SheetsConfig) -> SheetsResult<()> {
    let mut session = open_session(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(
        stdout,
        "{} (type {} for commands)",
        "📄 Sheets shell".bold().green(),
        "help".bold()
    )?;
    run_shell(&mut session, stdin.lock(), &mut stdout)
}

/// Commands understood by the interactive shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Show,
    Set(CellRef, String),
    Clear,
    Reset,
    Download { share: bool },
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> SheetsResult<Option<Self>> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "show" | "ls" => ShellCommand::Show,
            "set" => {
                let rest = rest.trim_start();
                let (cell, value) = match rest.split_once(char::is_whitespace) {
                    Some((cell, value)) => (cell, value),
                    None => (rest.trim_end(), ""),
                };
                if cell.is_empty() {
                    return Err(SheetsError::Command(
                        "usage: set <CELL> [VALUE]".to_string(),
                    ));
                }
                ShellCommand::Set(CellRef::parse(cell)?, value.to_string())
            }
            "clear" => ShellCommand::Clear,
            "reset" => ShellCommand::Reset,
            "download" => {
                let share = match rest.trim() {
                    "" => false,
                    "share" | "--share" | "-s" => true,
                    other => {
                        return Err(SheetsError::Command(format!(
                            "unexpected download argument '{}' (usage: download [share])",
                            other
                        )))
                    }
                };
                ShellCommand::Download { share }
            }
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => {
                return Err(SheetsError::Command(format!(
                    "unknown command '{}' (try 'help')",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

const SHELL_HELP: &str = "\
  show                 print the sheet
  set <CELL> [VALUE]   edit a cell, e.g. 'set B3 hello' (no value empties it)
  clear                clear the sheet
  reset                start over with an empty 10 x 5 sheet
  download [share]     write the .xlsx file (and open it)
  quit                 leave the shell";

/// Drive a session from line-oriented input until EOF or `quit`
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
) -> SheetsResult<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Invalid UTF-8 becomes U+FFFD so one bad line cannot end the session
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            ShellCommand::Show => write!(out, "{}", render_grid(session.grid()))?,
            ShellCommand::Set(cell, value) => {
                let outcome = session.set(cell, &value);
                writeln!(out, "{}", describe_edit(cell, &value, outcome))?;
            }
            ShellCommand::Clear => {
                session.clear();
                writeln!(out, "Sheet cleared")?;
            }
            ShellCommand::Reset => {
                session.reset();
                writeln!(out, "Sheet reset")?;
            }
            ShellCommand::Download { share } => match session.download(share) {
                Ok(path) => writeln!(out, "Downloaded {}", path.display())?,
                Err(e) => writeln!(out, "Download failed: {}", e)?,
            },
            ShellCommand::Help => writeln!(out, "{}", SHELL_HELP)?,
            ShellCommand::Quit => break,
        }
    }

    session.flush();
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
