use super::*;
use crate::storage::{KeyValueStore, MemoryStore, PersistenceGateway};
use crate::types::Cell;
use std::io::Cursor;
use tempfile::TempDir;

fn memory_session(dir: &TempDir) -> (Session, MemoryStore) {
    let store = MemoryStore::new();
    let session = Session::open(
        PersistenceGateway::new(store.clone()),
        SheetExporter::new(dir.path().join("sheets.xlsx")),
    );
    (session, store)
}

fn run(session: &mut Session, script: &str) -> String {
    let mut out = Vec::new();
    run_shell(session, Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =========================================================================
// render_grid Tests
// =========================================================================

#[test]
fn test_render_grid_header_and_numbers() {
    let grid = Grid::from_rows(vec![
        vec![Cell::text("a"), Cell::text("b")],
        vec![Cell::text("c"), Cell::Absent],
    ]);
    let rendered = render_grid(&grid);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "  | A   | B  ");
    assert_eq!(lines[1], "1 | a   | b  ");
    assert_eq!(lines[2], "2 | c   |    ");
}

#[test]
fn test_render_grid_widens_for_long_values() {
    let grid = Grid::from_rows(vec![vec![Cell::text("longer text")]]);
    let rendered = render_grid(&grid);
    assert!(rendered.starts_with("  | A          \n"));
    assert!(rendered.contains("1 | longer text\n"));
}

#[test]
fn test_render_grid_ten_rows_label_width() {
    let rendered = render_grid(&crate::core::engine::initial_grid());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[1].starts_with(" 1 |"));
    assert!(lines[10].starts_with("10 |"));
}

// =========================================================================
// describe_edit Tests
// =========================================================================

#[test]
fn test_describe_edit_messages() {
    let b3 = CellRef::new(2, 1);
    assert_eq!(describe_edit(b3, "x", EditOutcome::Applied), "B3 = \"x\"");
    assert!(describe_edit(b3, "x", EditOutcome::Grew).contains("added a column"));
    assert!(describe_edit(b3, "", EditOutcome::Shrank).contains("removed"));
    assert!(describe_edit(CellRef::new(0, 5), "x", EditOutcome::Ignored).contains("beyond column E"));
    assert!(describe_edit(CellRef::new(40, 0), "x", EditOutcome::Ignored).contains("outside"));
}

// =========================================================================
// ShellCommand::parse Tests
// =========================================================================

#[test]
fn test_parse_simple_commands() {
    assert_eq!(ShellCommand::parse("show").unwrap(), Some(ShellCommand::Show));
    assert_eq!(ShellCommand::parse("  CLEAR ").unwrap(), Some(ShellCommand::Clear));
    assert_eq!(ShellCommand::parse("reset").unwrap(), Some(ShellCommand::Reset));
    assert_eq!(ShellCommand::parse("quit").unwrap(), Some(ShellCommand::Quit));
    assert_eq!(ShellCommand::parse("?").unwrap(), Some(ShellCommand::Help));
    assert_eq!(ShellCommand::parse("   ").unwrap(), None);
}

#[test]
fn test_parse_download() {
    assert_eq!(
        ShellCommand::parse("download").unwrap(),
        Some(ShellCommand::Download { share: false })
    );
    assert_eq!(
        ShellCommand::parse("download share").unwrap(),
        Some(ShellCommand::Download { share: true })
    );
    assert_eq!(
        ShellCommand::parse("download --share").unwrap(),
        Some(ShellCommand::Download { share: true })
    );
    assert_eq!(
        ShellCommand::parse("download -s").unwrap(),
        Some(ShellCommand::Download { share: true })
    );
}

#[test]
fn test_parse_download_rejects_unknown_argument() {
    assert!(matches!(
        ShellCommand::parse("download --shar"),
        Err(SheetsError::Command(_))
    ));
    assert!(matches!(
        ShellCommand::parse("download now please"),
        Err(SheetsError::Command(_))
    ));
}

#[test]
fn test_parse_set_keeps_value_spacing() {
    assert_eq!(
        ShellCommand::parse("set B3 hello  world").unwrap(),
        Some(ShellCommand::Set(CellRef::new(2, 1), "hello  world".to_string()))
    );
    assert_eq!(
        ShellCommand::parse("set e10").unwrap(),
        Some(ShellCommand::Set(CellRef::new(9, 4), String::new()))
    );
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        ShellCommand::parse("set"),
        Err(SheetsError::Command(_))
    ));
    assert!(matches!(
        ShellCommand::parse("set 3B x"),
        Err(SheetsError::InvalidCellRef(_))
    ));
    assert!(matches!(
        ShellCommand::parse("frobnicate"),
        Err(SheetsError::Command(_))
    ));
}

// =========================================================================
// run_shell Tests
// =========================================================================

#[test]
fn test_shell_edit_and_persist() {
    let dir = TempDir::new().unwrap();
    let (mut session, store) = memory_session(&dir);

    let out = run(&mut session, "set A1 hello\nset E10 grow\n");
    assert!(out.contains("A1 = \"hello\""));
    assert!(out.contains("added a column"));
    assert_eq!(session.grid().column_count(), 6);

    let saved = store.get_item("gridData").unwrap().unwrap();
    assert!(saved.starts_with(r#"[["hello","#));
}

#[test]
fn test_shell_reports_bad_input_and_continues() {
    let dir = TempDir::new().unwrap();
    let (mut session, _store) = memory_session(&dir);

    let out = run(&mut session, "bogus\nset F1 x\nset B2 ok\n");
    assert!(out.contains("unknown command 'bogus'"));
    assert!(out.contains("F1 is beyond column E"));
    assert_eq!(session.grid().get(1, 1), Some(&Cell::text("ok")));
}

#[test]
fn test_shell_survives_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let (mut session, _store) = memory_session(&dir);

    let mut out = Vec::new();
    let script: &[u8] = b"set A1 \xff\xfe\r\nset B1 ok\n";
    run_shell(&mut session, Cursor::new(script), &mut out).unwrap();

    assert_eq!(
        session.grid().get(0, 0),
        Some(&Cell::text("\u{FFFD}\u{FFFD}"))
    );
    assert_eq!(session.grid().get(0, 1), Some(&Cell::text("ok")));
}

#[test]
fn test_shell_stops_at_quit() {
    let dir = TempDir::new().unwrap();
    let (mut session, _store) = memory_session(&dir);

    run(&mut session, "set A2 before\nquit\nset A3 after\n");
    assert_eq!(session.grid().get(1, 0), Some(&Cell::text("before")));
    assert_eq!(session.grid().get(2, 0), Some(&Cell::empty()));
}

#[test]
fn test_shell_clear_and_download() {
    let dir = TempDir::new().unwrap();
    let (mut session, _store) = memory_session(&dir);

    let out = run(&mut session, "set B2 x\nclear\ndownload\nshow\n");
    assert!(out.contains("Sheet cleared"));
    assert!(out.contains("Downloaded"));
    assert!(dir.path().join("sheets.xlsx").exists());
    assert_eq!(session.grid().get(1, 0), Some(&Cell::Absent));
    assert_eq!(session.grid().get(1, 1), Some(&Cell::empty()));
}
