use crate::interpreter::{
    arena::{Arena, ArenaError},
    value::text::Text,
};

/// Number of fractional digits used when rendering numbers.
pub const NUMBER_PRECISION: usize = 15;

/// Represents a runtime value in the interpreter.
///
/// Binary operators require both operands to carry the same variant; the
/// evaluator reports a type error otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A byte string, owned or stored in the evaluator's arena.
    String(Text),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) and logical
    /// operators (`&&`, `||`, `!`).
    Bool(bool),
}

/// The tag of a [`Value`].
///
/// The discriminants double as the type byte of the variable file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ValueType {
    /// [`Value::Number`]
    Number = 0,
    /// [`Value::String`]
    String = 1,
    /// [`Value::Bool`]
    Bool   = 2,
}

impl ValueType {
    /// The type byte written to variable files.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Decodes a type byte.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::value::core::ValueType;
    ///
    /// assert_eq!(ValueType::from_tag(1), Some(ValueType::String));
    /// assert_eq!(ValueType::from_tag(7), None);
    /// ```
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Number),
            1 => Some(Self::String),
            2 => Some(Self::Bool),
            _ => None,
        }
    }

    /// Human-readable name, as used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::String => "String",
            Self::Bool => "Bool",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Text::from(v))
    }
}

impl Value {
    /// Returns the tag of the value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::Bool(_) => ValueType::Bool,
        }
    }

    /// Returns the name of the value's type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Copies a transient string into owned storage; other values are
    /// returned unchanged.
    ///
    /// # Errors
    /// Fails if the string's arena was reset since it was created.
    pub fn into_owned(self, arena: &Arena) -> Result<Self, ArenaError> {
        match self {
            Self::String(text) => Ok(Self::String(text.into_owned(arena)?)),
            other => Ok(other),
        }
    }

    /// Compares two values for equality.
    ///
    /// Values of different types are never equal. Numbers use IEEE equality,
    /// strings compare their bytes.
    ///
    /// # Errors
    /// Fails if a string operand is stale.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::{
    ///     arena::Arena,
    ///     value::{core::Value, text::Text},
    /// };
    ///
    /// let mut arena = Arena::new(16);
    /// let transient = Value::String(Text::in_arena(&mut arena, b"hi").unwrap());
    ///
    /// assert!(transient.equals(&Value::from("hi"), &arena).unwrap());
    /// assert!(!Value::from(1.0).equals(&Value::from(true), &arena).unwrap());
    /// ```
    pub fn equals(&self, other: &Self, arena: &Arena) -> Result<bool, ArenaError> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => Ok(a == b),
            (Self::String(a), Self::String(b)) => a.equals(b, arena),
            (Self::Bool(a), Self::Bool(b)) => Ok(a == b),
            _ => Ok(false),
        }
    }

    /// Renders the value into a fresh string of at most `limit` bytes.
    ///
    /// Numbers use a fixed precision of [`NUMBER_PRECISION`] digits, strings
    /// are written as their raw bytes and booleans as `true`/`false`. Longer
    /// output is cut at the last character boundary within `limit`.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::{arena::Arena, value::core::Value};
    ///
    /// let arena = Arena::new(0);
    ///
    /// assert_eq!(Value::from(0.5).stringify(&arena, 64), "0.500000000000000");
    /// assert_eq!(Value::from("abcdef").stringify(&arena, 3), "abc");
    /// ```
    #[must_use]
    pub fn stringify(&self, arena: &Arena, limit: usize) -> String {
        let mut out = Rendered { value: self,
                                 arena: Some(arena), }.to_string();
        if out.len() > limit {
            let mut end = limit;
            while !out.is_char_boundary(end) {
                end -= 1;
            }
            out.truncate(end);
        }
        out
    }
}

/// A value paired with the arena needed to print its transient strings.
struct Rendered<'a> {
    value: &'a Value,
    arena: Option<&'a Arena>,
}

impl std::fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Value::Number(n) => write!(f, "{n:.NUMBER_PRECISION$}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(Text::Owned(bytes)) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            Value::String(Text::Transient(handle)) => match self.arena.map(|a| a.get(*handle)) {
                Some(Ok(bytes)) => write!(f, "{}", String::from_utf8_lossy(bytes)),
                _ => write!(f, "<released string>"),
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Rendered { value: self,
                   arena: None, }.fmt(f)
    }
}
