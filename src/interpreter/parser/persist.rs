use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::PathBuf,
    rc::Rc,
};

use tracing::debug;

use crate::{
    error::EvalError,
    interpreter::{
        arena::{Arena, ArenaError},
        lexer::{Token, TokenKind},
        parser::core::{EvalResult, Parser, Precedence, arena_failure},
        value::{
            core::{Value, ValueType},
            text::Text,
        },
    },
    util::num::{u64_to_usize_checked, usize_to_u64},
};

/// A decoded variable record, independent of any arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An 8-byte little-endian IEEE-754 double.
    Number(f64),
    /// Raw string bytes.
    String(Vec<u8>),
    /// One byte, nonzero meaning `true`.
    Bool(bool),
}

/// Errors raised while encoding or decoding a variable record.
#[derive(Debug)]
pub enum PersistError {
    /// The underlying reader or writer failed, or the record was truncated.
    Io(std::io::Error),
    /// The record stores a different variable than the one requested.
    NameMismatch {
        /// The requested name.
        expected: String,
    },
    /// The type byte is not a known [`ValueType`].
    UnknownTag(u8),
    /// A string length does not fit in memory.
    LengthOverflow(u64),
    /// A string value could not be read from the arena.
    Arena(ArenaError),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error ({e}) on"),
            Self::NameMismatch { expected } => {
                write!(f, "No record for variable '{expected}' in")
            },
            Self::UnknownTag(tag) => write!(f, "Unknown type tag {tag} in"),
            Self::LengthOverflow(len) => write!(f, "String length {len} is too large in"),
            Self::Arena(e) => write!(f, "Cannot export ({e}) to"),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<std::io::Error> for PersistError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

/// Writes one variable record to `out`.
///
/// Layout: the name's bytes, a NUL byte, the [`ValueType`] tag byte, then the
/// payload: an 8-byte little-endian `f64` for numbers, one byte for booleans,
/// or an 8-byte little-endian length followed by the raw bytes for strings.
///
/// # Errors
/// Fails if writing fails or a transient string is stale.
///
/// # Example
/// ```
/// use reckon::interpreter::{arena::Arena, parser::persist::write_record, value::core::Value};
///
/// let mut out = Vec::new();
/// write_record(&mut out, b"ok", &Value::Bool(true), &Arena::new(0)).unwrap();
///
/// assert_eq!(out, [b'o', b'k', 0, 2, 1]);
/// ```
pub fn write_record<W: Write>(out: &mut W,
                              name: &[u8],
                              value: &Value,
                              arena: &Arena)
                              -> Result<(), PersistError> {
    out.write_all(name)?;
    out.write_all(&[0, value.value_type().tag()])?;

    match value {
        Value::Number(n) => out.write_all(&n.to_le_bytes())?,
        Value::Bool(b) => out.write_all(&[u8::from(*b)])?,
        Value::String(text) => {
            let bytes = text.bytes(arena).map_err(PersistError::Arena)?;
            out.write_all(&usize_to_u64(bytes.len()).to_le_bytes())?;
            out.write_all(bytes)?;
        },
    }
    Ok(())
}

/// Reads one variable record from `input`, checking that it stores `name`.
///
/// # Errors
/// - [`PersistError::NameMismatch`] if the stored name differs from `name`.
/// - [`PersistError::UnknownTag`] for an unknown type byte.
/// - [`PersistError::Io`] if the input ends early or cannot be read.
///
/// # Example
/// ```
/// use reckon::interpreter::parser::persist::{Payload, read_record};
///
/// let bytes = [b'x', 0, 0, 0, 0, 0, 0, 0, 0, 0xF0, 0x3F];
///
/// assert_eq!(read_record(&mut &bytes[..], b"x").unwrap(), Payload::Number(1.0));
/// assert!(read_record(&mut &bytes[..], b"y").is_err());
/// ```
pub fn read_record<R: Read>(input: &mut R, name: &[u8]) -> Result<Payload, PersistError> {
    let mut stored = vec![0; name.len() + 1];
    input.read_exact(&mut stored)?;
    if stored[..name.len()] != *name || stored[name.len()] != 0 {
        return Err(PersistError::NameMismatch { expected: String::from_utf8_lossy(name).into_owned(), });
    }

    let mut tag = [0; 1];
    input.read_exact(&mut tag)?;

    match ValueType::from_tag(tag[0]) {
        Some(ValueType::Number) => {
            let mut raw = [0; 8];
            input.read_exact(&mut raw)?;
            Ok(Payload::Number(f64::from_le_bytes(raw)))
        },
        Some(ValueType::Bool) => {
            let mut raw = [0; 1];
            input.read_exact(&mut raw)?;
            Ok(Payload::Bool(raw[0] != 0))
        },
        Some(ValueType::String) => {
            let mut raw = [0; 8];
            input.read_exact(&mut raw)?;
            let declared = u64::from_le_bytes(raw);
            let len = u64_to_usize_checked(declared, PersistError::LengthOverflow(declared))?;

            let mut bytes = Vec::new();
            input.by_ref().take(declared).read_to_end(&mut bytes)?;
            if bytes.len() != len {
                return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
            }
            Ok(Payload::String(bytes))
        },
        None => Err(PersistError::UnknownTag(tag[0])),
    }
}

impl Parser {
    /// Evaluates `export($name, path)`.
    ///
    /// Writes the variable to `path`, replacing the file, and evaluates to
    /// `true`.
    pub(crate) fn export(&mut self, call: &Token) -> EvalResult<Value> {
        self.expect(TokenKind::LParen)?;
        self.expect(TokenKind::Dollar)?;
        let ident = self.expect(TokenKind::Identifier)?;

        let source = Rc::clone(&self.source);
        let name = ident.lexeme(&source);
        let Some(value) = self.env.get(name).cloned() else {
            return Err(EvalError::UnknownVariable { name:   name.to_string(),
                                                    column: ident.column(&source), }.into());
        };

        self.expect(TokenKind::Comma)?;
        let path = self.path_argument(call)?;
        let column = call.column(&source);
        let io_error = |details: String| EvalError::Io { details,
                                                         path: path.display().to_string(),
                                                         column };

        let file = File::create(&path).map_err(|e| io_error(format!("Couldn't write ({e}) to")))?;
        let mut writer = BufWriter::new(file);
        write_record(&mut writer, name.as_bytes(), &value, &self.arena).map_err(|e| io_error(e.to_string()))?;
        writer.flush()
              .map_err(|e| io_error(format!("Couldn't write ({e}) to")))?;

        debug!(variable = name, path = %path.display(), "exported");
        Ok(Value::Bool(true))
    }

    /// Evaluates `import("name", path)`.
    ///
    /// Reads the record for `name` from `path` and evaluates to its value.
    /// The variable table is left untouched; `let x = import("x", path)`
    /// stores it.
    pub(crate) fn import(&mut self, call: &Token) -> EvalResult<Value> {
        self.expect(TokenKind::LParen)?;
        let column = call.column(&self.source);

        let name = match self.expression(Precedence::None, Some(TokenKind::String))? {
            Value::String(text) => text.bytes(&self.arena)
                                       .map_err(arena_failure(column))?
                                       .to_vec(),
            other => {
                return Err(EvalError::InvalidOperation { operator:  "import".to_string(),
                                                         type_name: other.type_name(),
                                                         column }.into());
            },
        };

        self.expect(TokenKind::Comma)?;
        let path = self.path_argument(call)?;
        let io_error = |details: String| EvalError::Io { details,
                                                         path: path.display().to_string(),
                                                         column };

        let file = File::open(&path).map_err(|e| io_error(format!("Couldn't read ({e}) from")))?;
        let payload = read_record(&mut BufReader::new(file), &name).map_err(|e| io_error(e.to_string()))?;

        debug!(variable = %String::from_utf8_lossy(&name), path = %path.display(), "imported");
        match payload {
            Payload::Number(n) => Ok(Value::Number(n)),
            Payload::Bool(b) => Ok(Value::Bool(b)),
            Payload::String(bytes) => {
                let text = Text::in_arena(&mut self.arena, &bytes).map_err(arena_failure(column))?;
                Ok(Value::String(text))
            },
        }
    }

    /// Evaluates the closing `path)` argument of `export`/`import`.
    fn path_argument(&mut self, call: &Token) -> EvalResult<PathBuf> {
        match self.grouping()? {
            Value::String(text) => {
                let column = call.column(&self.source);
                let bytes = text.bytes(&self.arena).map_err(arena_failure(column))?;
                Ok(PathBuf::from(String::from_utf8_lossy(bytes).into_owned()))
            },
            other => Err(EvalError::InvalidOperation { operator:  call.lexeme(&self.source)
                                                                      .to_string(),
                                                       type_name: other.type_name(),
                                                       column:    call.column(&self.source), }.into()),
        }
    }
}
