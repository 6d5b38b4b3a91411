use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn reckon(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_reckon")).arg("--no-log")
                                                              .args(args)
                                                              .stdin(Stdio::piped())
                                                              .stdout(Stdio::piped())
                                                              .stderr(Stdio::piped())
                                                              .spawn()
                                                              .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn expression_argument() {
    let output = reckon(&["2 ^ 3 ^ 2"], b"");

    assert!(output.status.success());
    assert_eq!(text(&output.stdout), "512.000000000000000\n");
}

#[test]
fn stdin_lines_are_evaluated_until_exit() {
    let output = reckon(&[], b"1 + 1\n\n$missing\nexit\n3\n");

    assert!(output.status.success());
    assert_eq!(text(&output.stdout), "2.000000000000000\n");
    assert!(text(&output.stderr).contains("error: "));
}

#[test]
fn unreadable_stdin_is_reported() {
    let output = reckon(&[], b"1 + 1\n\xff\xfe\n2\n");

    assert!(!output.status.success());
    assert_eq!(text(&output.stdout), "2.000000000000000\n");
    assert!(text(&output.stderr).contains("error: cannot read input"));
}
