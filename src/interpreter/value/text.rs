use crate::interpreter::arena::{Arena, ArenaError, ArenaRef};

/// The bytes of a string value.
///
/// Strings produced while evaluating a line live in the [`Arena`] and are
/// only valid until the arena is reset. Anything that outlives the line, such
/// as a declared variable or `ans`, holds an `Owned` copy instead.
///
/// The derived `PartialEq` compares representations, so an owned string and
/// a transient one never compare equal; use [`Text::equals`] to compare
/// contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    /// Heap bytes independent of any arena.
    Owned(Box<[u8]>),
    /// Bytes stored in the evaluator's arena.
    Transient(ArenaRef),
}

impl Text {
    /// Creates an owned copy of `bytes`.
    #[must_use]
    pub fn owned(bytes: &[u8]) -> Self {
        Self::Owned(bytes.into())
    }

    /// Copies `bytes` into `arena`.
    ///
    /// # Errors
    /// Fails when the arena has no room for `bytes`.
    pub fn in_arena(arena: &mut Arena, bytes: &[u8]) -> Result<Self, ArenaError> {
        arena.alloc(bytes).map(Self::Transient)
    }

    /// Returns the string's bytes.
    ///
    /// # Errors
    /// [`ArenaError::Stale`] for a transient string whose arena was reset.
    pub fn bytes<'a>(&'a self, arena: &'a Arena) -> Result<&'a [u8], ArenaError> {
        match self {
            Self::Owned(bytes) => Ok(bytes),
            Self::Transient(handle) => arena.get(*handle),
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Owned(bytes) => bytes.len(),
            Self::Transient(handle) => handle.len(),
        }
    }

    /// Returns `true` for the empty string.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates two strings into a new arena allocation.
    ///
    /// # Errors
    /// Fails if either operand is stale or the arena has no room for the
    /// result.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::{arena::Arena, value::text::Text};
    ///
    /// let mut arena = Arena::new(64);
    /// let left = Text::in_arena(&mut arena, b"foo").unwrap();
    /// let right = Text::owned(b"bar");
    ///
    /// let joined = Text::concat(&mut arena, &left, &right).unwrap();
    /// assert_eq!(joined.bytes(&arena).unwrap(), b"foobar");
    /// ```
    pub fn concat(arena: &mut Arena, left: &Self, right: &Self) -> Result<Self, ArenaError> {
        let mut joined = Vec::with_capacity(left.len() + right.len());
        joined.extend_from_slice(left.bytes(arena)?);
        joined.extend_from_slice(right.bytes(arena)?);
        Self::in_arena(arena, &joined)
    }

    /// Compares two strings by length, then byte by byte.
    ///
    /// # Errors
    /// Fails if either operand is stale.
    pub fn equals(&self, other: &Self, arena: &Arena) -> Result<bool, ArenaError> {
        if self.len() != other.len() {
            return Ok(false);
        }
        Ok(self.bytes(arena)? == other.bytes(arena)?)
    }

    /// Converts the string into owned storage, copying it out of the arena if
    /// needed.
    ///
    /// # Errors
    /// Fails if the string is transient and stale.
    pub fn into_owned(self, arena: &Arena) -> Result<Self, ArenaError> {
        match self {
            Self::Owned(_) => Ok(self),
            Self::Transient(handle) => Ok(Self::owned(arena.get(handle)?)),
        }
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::owned(s.as_bytes())
    }
}
