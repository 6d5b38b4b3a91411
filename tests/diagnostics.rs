use std::{fs, path::Path};

use reckon::log::{Diagnostics, FileLog};
use tempfile::tempdir;

/// Reads the log and strips the `-- <stamp> -- ` prefix of every line.
fn messages(path: &Path) -> Vec<String> {
    fs::read_to_string(path).unwrap()
                            .lines()
                            .map(|line| {
                                let rest = line.strip_prefix("-- ")
                                               .unwrap_or_else(|| panic!("bad line: {line}"));
                                let (_, message) = rest.split_once(" -- ")
                                                       .unwrap_or_else(|| panic!("bad line: {line}"));
                                message.to_string()
                            })
                            .collect()
}

#[test]
fn rate_limit_summarizes_at_next_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let mut log = FileLog::new(&path, 1, 2);

    assert!(log.record("a"));
    assert!(log.record("b"));
    assert!(!log.record("c"));
    assert!(!log.record("d"));
    log.begin_line();
    assert!(log.record("e"));

    assert_eq!(messages(&path), ["a", "b", "2 further diagnostics suppressed", "e"]);
}

#[test]
fn file_is_opened_lazily_in_append_mode() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");

    let mut log = FileLog::new(&path, 1, 8);
    log.begin_line();
    log.flush();
    assert!(!path.exists());

    assert!(log.record("first session"));
    drop(log);

    let mut log = FileLog::new(&path, 1, 8);
    assert!(log.record("second session"));
    drop(log);

    assert_eq!(messages(&path), ["first session", "second session"]);
}

#[test]
fn drop_writes_pending_summary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");

    let mut log = FileLog::new(&path, 10, 1);
    assert!(log.record("kept"));
    assert!(!log.record("dropped"));
    drop(log);

    assert_eq!(messages(&path), ["kept", "1 further diagnostics suppressed"]);
}

#[test]
fn records_are_flushed_every_n() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let mut log = FileLog::new(&path, 3, 10);

    log.record("one");
    log.record("two");
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    log.record("three");
    assert_eq!(messages(&path), ["one", "two", "three"]);
}

#[test]
fn lines_carry_a_utc_stamp() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let mut log = FileLog::new(&path, 1, 1);
    log.record("stamped");

    let contents = fs::read_to_string(&path).unwrap();
    let line = contents.lines().next().unwrap();
    let stamp = &line["-- UTC ".len()..line.len() - " -- stamped".len()];

    assert!(line.starts_with("-- UTC "));
    assert_eq!(stamp.len(), "dd-mm-yyyy hh:mm:ss".len());
    assert_eq!(&stamp[2..3], "-");
    assert_eq!(&stamp[5..6], "-");
    assert_eq!(&stamp[13..14], ":");
    assert_eq!(&stamp[16..17], ":");
}
