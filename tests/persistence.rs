use std::fs;

use reckon::{
    error::{ErrorKind, EvalError},
    interpreter::{
        parser::{
            core::{Evaluation, Parser},
            persist::{Payload, PersistError, read_record},
        },
        value::core::Value,
    },
};
use tempfile::tempdir;

fn evaluate(parser: &mut Parser, line: &str) -> Evaluation {
    parser.evaluate(line)
          .unwrap_or_else(|e| panic!("'{line}' hit a fatal error: {e}"))
}

fn assert_round_trip(declaration: &str, expected: Value) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("var.bin");
    let path = path.display();

    let mut parser = Parser::new();
    evaluate(&mut parser, declaration);
    assert_eq!(evaluate(&mut parser, &format!("export($x, \"{path}\")")),
               Evaluation::Value(Value::Bool(true)));

    let mut fresh = Parser::new();
    let imported = evaluate(&mut fresh, &format!("import(\"x\", \"{path}\")"));
    assert_eq!(imported, Evaluation::Value(expected.clone()));

    let stored = evaluate(&mut fresh, &format!("let y = import(\"x\", \"{path}\")"));
    assert_eq!(stored.value(), expected);
    assert!(!fresh.environment().has("x"));
    assert!(fresh.environment().has("y"));
}

#[test]
fn numbers_round_trip() {
    assert_round_trip("let x = 3.75", Value::Number(3.75));
}

#[test]
fn strings_round_trip() {
    assert_round_trip("let x = 'hello ' + \"world\"", Value::from("hello world"));
}

#[test]
fn booleans_round_trip() {
    assert_round_trip("let x = 1 < 2", Value::Bool(true));
}

#[test]
fn imported_values_take_part_in_expressions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("n.bin");
    let path = path.display();

    let mut parser = Parser::new();
    evaluate(&mut parser, "let n = 20");
    evaluate(&mut parser, &format!("export($n, '{path}')"));

    let result = evaluate(&mut parser, &format!("import('n', '{path}') * 2 + 2"));
    assert_eq!(result.value(), Value::Number(42.0));
}

#[test]
fn record_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("layout.bin");

    let mut parser = Parser::new();
    evaluate(&mut parser, "let s = 'ab'");
    evaluate(&mut parser, &format!("export($s, '{}')", path.display()));

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes,
               [b's', 0, 1, 2, 0, 0, 0, 0, 0, 0, 0, b'a', b'b']);

    evaluate(&mut parser, "let s = 2");
    evaluate(&mut parser, &format!("export($s, '{}')", path.display()));

    let mut expected = vec![b's', 0, 0];
    expected.extend_from_slice(&2.0f64.to_le_bytes());
    assert_eq!(fs::read(&path).unwrap(), expected);
}

#[test]
fn export_of_unknown_variable_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("none.bin");

    let mut parser = Parser::new();
    let result = evaluate(&mut parser, &format!("export($ghost, '{}')", path.display()));

    assert_eq!(result.error().map(EvalError::kind), Some(ErrorKind::Name));
    assert!(!path.exists());
}

#[test]
fn import_with_wrong_name_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.bin");
    let path = path.display();

    let mut parser = Parser::new();
    evaluate(&mut parser, "let x = 1");
    evaluate(&mut parser, &format!("export($x, '{path}')"));

    let result = evaluate(&mut parser, &format!("import('xy', '{path}')"));
    assert_eq!(result.error().map(EvalError::kind), Some(ErrorKind::Io));

    let result = evaluate(&mut parser, &format!("import('', '{path}')"));
    assert_eq!(result.error().map(EvalError::kind), Some(ErrorKind::Io));
}

#[test]
fn import_from_missing_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.bin");

    let mut parser = Parser::new();
    let result = evaluate(&mut parser, &format!("import('x', '{}')", path.display()));

    assert_eq!(result.error().map(EvalError::kind), Some(ErrorKind::Io));
}

#[test]
fn import_requires_a_string_literal_name() {
    let mut parser = Parser::new();
    let result = evaluate(&mut parser, "import(x, 'whatever.bin')");

    assert_eq!(result.error().map(EvalError::kind), Some(ErrorKind::Syntax));
}

#[test]
fn truncated_and_corrupt_records() {
    let truncated = [b'x', 0, 1, 5, 0, 0, 0, 0, 0, 0, 0, b'a'];
    assert!(matches!(read_record(&mut &truncated[..], b"x"), Err(PersistError::Io(_))));

    let unknown_tag = [b'x', 0, 9, 1];
    assert!(matches!(read_record(&mut &unknown_tag[..], b"x"),
                     Err(PersistError::UnknownTag(9))));

    let boolean = [b'x', 0, 2, 0];
    assert_eq!(read_record(&mut &boolean[..], b"x").unwrap(), Payload::Bool(false));
}
