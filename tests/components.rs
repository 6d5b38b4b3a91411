use reckon::{
    error::LexError,
    interpreter::{
        arena::{Arena, ArenaError},
        environment::{Environment, EnvironmentFull, djb2},
        lexer::{TokenKind, tokenize},
        parser::builtin::{Builtin, lookup},
        value::{core::Value, text::Text},
    },
};

fn kinds(line: &str) -> Vec<TokenKind> {
    tokenize(line).unwrap().iter().map(|t| t.kind).collect()
}

#[test]
fn tokenizer_operators() {
    use TokenKind::*;

    assert_eq!(kinds("+ - * / ^ ( ) , $"),
               [Plus, Minus, Star, Slash, Caret, LParen, RParen, Comma, Dollar, End]);
    assert_eq!(kinds("= == != ! < <= > >= && ||"),
               [Equals, EqualEqual, BangEqual, Bang, Less, LessEqual, Greater, GreaterEqual,
                AndAnd, OrOr, End]);
    assert_eq!(kinds("1<=2"), [Number, LessEqual, Number, End]);
}

#[test]
fn tokenizer_keywords_and_identifiers() {
    use TokenKind::*;

    assert_eq!(kinds("let ans exit true false"), [Let, Ans, Exit, True, False, End]);
    assert_eq!(kinds("letter answer exits x1 snake_case"),
               [Identifier, Identifier, Identifier, Identifier, Identifier, End]);
}

#[test]
fn tokenizer_spans_and_columns() {
    let line = "let total = 12.5";
    let tokens = tokenize(line).unwrap();

    assert_eq!(tokens[1].lexeme(line), "total");
    assert_eq!(tokens[1].column(line), 5);
    assert_eq!(tokens[3].lexeme(line), "12.5");
    assert_eq!(tokens[4].kind, TokenKind::End);
    assert_eq!(tokens[4].column(line), line.len() + 1);
}

#[test]
fn tokenizer_strings() {
    let line = r#"'single' + "dou\"ble""#;
    let tokens = tokenize(line).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme(line), "'single'");
    assert_eq!(tokens[2].lexeme(line), r#""dou\"ble""#);

    assert_eq!(tokenize("\"open"), Err(LexError::UnterminatedString { quote: '"' }));
}

#[test]
fn tokenizer_stops_at_lexical_errors() {
    let line = "1 & 2";
    let tokens = tokenize(line).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].lexeme(line), "& 2");
}

#[test]
fn arena_rejects_instead_of_wrapping() {
    let mut arena = Arena::new(10);

    let first = arena.alloc(b"12345").unwrap();
    let second = arena.alloc(b"6789").unwrap();
    assert_eq!(arena.used(), 9);

    assert_eq!(arena.alloc(b"ab"),
               Err(ArenaError::Exhausted { requested: 2,
                                           remaining: 1, }));
    assert_eq!(arena.alloc(&[0; 11]),
               Err(ArenaError::TooLarge { requested: 11,
                                          capacity:  10, }));

    assert_eq!(arena.get(first).unwrap(), b"12345");
    assert_eq!(arena.get(second).unwrap(), b"6789");
}

#[test]
fn arena_reset_invalidates_handles() {
    let mut arena = Arena::new(4);
    let old = Text::in_arena(&mut arena, b"abcd").unwrap();
    let owned = old.clone().into_owned(&arena).unwrap();

    arena.reset();
    let new = Text::in_arena(&mut arena, b"wxyz").unwrap();

    assert_eq!(old.bytes(&arena), Err(ArenaError::Stale));
    assert_eq!(owned.bytes(&arena).unwrap(), b"abcd");
    assert_eq!(new.bytes(&arena).unwrap(), b"wxyz");
    assert_eq!(Value::String(old).stringify(&arena, 64), "<released string>");
}

#[test]
fn environment_updates_in_place() {
    let mut env = Environment::with_capacity(8);

    assert_eq!(env.set("x", Value::from(1.0)), Ok(None));
    let slot = env.index_of("x");

    assert_eq!(env.set("x", Value::from("now text")), Ok(Some(Value::Number(1.0))));
    assert_eq!(env.index_of("x"), slot);
    assert_eq!(env.get("x"), Some(&Value::from("now text")));
    assert_eq!(env.len(), 1);
}

#[test]
fn environment_probes_past_collisions() {
    let mut env = Environment::with_capacity(1);
    env.set("only", Value::from(true)).unwrap();

    assert_eq!(env.set("other", Value::from(false)),
               Err(EnvironmentFull { capacity: 1 }));
    assert_eq!(env.get("other"), None);

    let mut env = Environment::with_capacity(3);
    for (i, name) in ["a", "b", "c"].iter().enumerate() {
        env.set(name, Value::from(f64::from(u8::try_from(i).unwrap()))).unwrap();
    }

    assert_eq!(env.get("a"), Some(&Value::Number(0.0)));
    assert_eq!(env.get("b"), Some(&Value::Number(1.0)));
    assert_eq!(env.get("c"), Some(&Value::Number(2.0)));
    assert!(env.set("d", Value::from(3.0)).is_err());

    let mut names: Vec<_> = env.iter().map(|(_, name, _)| name.to_string()).collect();
    names.sort();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn environment_home_slot_uses_djb2() {
    let mut env = Environment::new();
    env.set("abc", Value::from(1.0)).unwrap();

    let home = djb2(b"abc") as usize % 300;
    assert_eq!(env.index_of("abc"), Some(home));
    assert_eq!(env.index_of("abd"), None);
}

#[test]
fn builtin_table_is_complete() {
    let unary = ["sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "asinh",
                 "acosh", "atanh", "exp", "log", "log10", "log2", "ceil", "floor", "round",
                 "sqrt"];
    for name in unary {
        assert!(matches!(lookup(name), Some(Builtin::Unary(_))), "{name} is not unary");
    }

    assert!(matches!(lookup("atan2"), Some(Builtin::Binary(_))));
    assert!(matches!(lookup("pi"), Some(Builtin::Constant(x)) if x == std::f64::consts::PI));
    assert!(matches!(lookup("e"), Some(Builtin::Constant(x)) if x == std::f64::consts::E));

    assert!(lookup("ln").is_none());
    assert!(lookup("SIN").is_none());
    assert!(lookup("").is_none());
}

#[test]
fn values_display_without_an_arena() {
    let mut arena = Arena::new(16);
    let transient = Value::String(Text::in_arena(&mut arena, b"hi").unwrap());

    assert_eq!(Value::Number(0.5).to_string(), "0.500000000000000");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::from("owned").to_string(), "owned");
    assert_eq!(transient.to_string(), "<released string>");
}
