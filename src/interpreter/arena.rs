/// Errors raised by the [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// The request is larger than the whole arena.
    TooLarge {
        /// Bytes requested.
        requested: usize,
        /// Total capacity of the arena.
        capacity:  usize,
    },
    /// The request fits the arena but not the space left before the next
    /// reset.
    Exhausted {
        /// Bytes requested.
        requested: usize,
        /// Bytes still free.
        remaining: usize,
    },
    /// The handle was issued before the last reset.
    Stale,
}

impl std::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLarge { requested, capacity } => write!(f,
                                                             "String of {requested} bytes does not fit the {capacity} byte string arena."),
            Self::Exhausted { requested, remaining } => write!(f,
                                                               "String arena exhausted: {requested} bytes requested, {remaining} left on this line."),
            Self::Stale => write!(f, "String storage was released before it was used."),
        }
    }
}

impl std::error::Error for ArenaError {}

/// A handle to bytes stored in an [`Arena`].
///
/// Handles are plain offsets tagged with the arena generation that issued
/// them, so a handle outliving a [`Arena::reset`] is detected instead of
/// silently reading newer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaRef {
    offset:     usize,
    len:        usize,
    generation: u64,
}

impl ArenaRef {
    /// Number of bytes behind the handle.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the handle refers to zero bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Fixed-capacity bump allocator for transient strings.
///
/// Allocation moves a cursor forward through one buffer. The cursor never
/// wraps: once the buffer is full, further allocations fail with
/// [`ArenaError::Exhausted`] until [`Arena::reset`] rewinds it, which also
/// invalidates every handle issued so far.
///
/// # Example
/// ```
/// use reckon::interpreter::arena::{Arena, ArenaError};
///
/// let mut arena = Arena::new(8);
/// let hello = arena.alloc(b"hello").unwrap();
/// assert_eq!(arena.get(hello).unwrap(), b"hello");
///
/// assert!(matches!(arena.alloc(b"world"), Err(ArenaError::Exhausted { .. })));
///
/// arena.reset();
/// assert_eq!(arena.get(hello), Err(ArenaError::Stale));
/// assert!(arena.alloc(b"world").is_ok());
/// ```
#[derive(Debug)]
pub struct Arena {
    data:       Box<[u8]>,
    cursor:     usize,
    generation: u64,
}

impl Arena {
    /// Creates an arena holding at most `capacity` bytes between resets.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { data:       vec![0; capacity].into_boxed_slice(),
               cursor:     0,
               generation: 0, }
    }

    /// Copies `bytes` into the arena and returns a handle to the copy.
    ///
    /// # Errors
    /// - [`ArenaError::TooLarge`] if `bytes` exceeds the total capacity.
    /// - [`ArenaError::Exhausted`] if the space left is too small.
    pub fn alloc(&mut self, bytes: &[u8]) -> Result<ArenaRef, ArenaError> {
        let handle = self.reserve(bytes.len())?;
        self.data[handle.offset..handle.offset + handle.len].copy_from_slice(bytes);
        Ok(handle)
    }

    /// Resolves a handle to its bytes.
    ///
    /// # Errors
    /// [`ArenaError::Stale`] if the arena was reset after the handle was
    /// issued.
    pub fn get(&self, handle: ArenaRef) -> Result<&[u8], ArenaError> {
        if handle.generation != self.generation {
            return Err(ArenaError::Stale);
        }
        Ok(&self.data[handle.offset..handle.offset + handle.len])
    }

    /// Rewinds the cursor and invalidates all outstanding handles.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.generation += 1;
    }

    /// Total number of bytes the arena can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes handed out since the last reset.
    #[must_use]
    pub const fn used(&self) -> usize {
        self.cursor
    }

    fn reserve(&mut self, len: usize) -> Result<ArenaRef, ArenaError> {
        if len > self.capacity() {
            return Err(ArenaError::TooLarge { requested: len,
                                              capacity:  self.capacity(), });
        }
        let remaining = self.capacity() - self.cursor;
        if len > remaining {
            return Err(ArenaError::Exhausted { requested: len,
                                               remaining });
        }

        let handle = ArenaRef { offset: self.cursor,
                                len,
                                generation: self.generation };
        self.cursor += len;
        Ok(handle)
    }
}
