use crate::interpreter::value::core::Value;

/// Number of slots in a default environment.
pub const DEFAULT_CAPACITY: usize = 300;

/// Returned by [`Environment::set`] when a new name finds no free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentFull {
    /// Number of slots in the table.
    pub capacity: usize,
}

impl std::fmt::Display for EnvironmentFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "All {} variable slots are in use.", self.capacity)
    }
}

impl std::error::Error for EnvironmentFull {}

#[derive(Debug, Clone)]
struct Slot {
    key:   Box<str>,
    value: Value,
}

/// The variable table behind `let name = ...` and `$name`.
///
/// A fixed number of slots addressed by open addressing: a name starts at
/// `djb2(name) % capacity` and probes linearly, wrapping around, until it
/// finds itself or an empty slot. The table never grows and entries are never
/// removed, so probe chains stay intact for the table's whole life.
///
/// # Example
/// ```
/// use reckon::interpreter::{environment::Environment, value::core::Value};
///
/// let mut env = Environment::with_capacity(4);
/// env.set("x", Value::from(5.0)).unwrap();
///
/// assert!(env.has("x"));
/// assert_eq!(env.get("x"), Some(&Value::Number(5.0)));
/// assert_eq!(env.get("y"), None);
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    slots: Vec<Option<Slot>>,
    count: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment with [`DEFAULT_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an environment with exactly `capacity` slots.
    ///
    /// A capacity of zero is raised to one so that hashing stays defined.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: vec![None; capacity.max(1)],
               count: 0, }
    }

    /// Inserts or updates a variable.
    ///
    /// Updating keeps the stored key and replaces the value in place; the
    /// previous value is returned.
    ///
    /// # Errors
    /// [`EnvironmentFull`] when `key` is new and every slot is taken.
    pub fn set(&mut self, key: &str, value: Value) -> Result<Option<Value>, EnvironmentFull> {
        let start = self.home(key);
        let capacity = self.capacity();

        for step in 0..capacity {
            let index = (start + step) % capacity;
            let slot = &mut self.slots[index];
            if let Some(existing) = slot {
                if *existing.key == *key {
                    return Ok(Some(std::mem::replace(&mut existing.value, value)));
                }
                continue;
            }

            *slot = Some(Slot { key: key.into(),
                                value });
            self.count += 1;
            return Ok(None);
        }

        Err(EnvironmentFull { capacity })
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index_of(key)
            .and_then(|index| self.slots[index].as_ref())
            .map(|slot| &slot.value)
    }

    /// Returns `true` if `key` has been declared.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Returns the slot holding `key`, if any.
    ///
    /// Probing stops at the first empty slot, since no entry is ever placed
    /// past a gap in its own probe chain.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        let start = self.home(key);
        let capacity = self.capacity();

        (0..capacity).map(|step| (start + step) % capacity)
                     .map_while(|index| self.slots[index].as_ref().map(|slot| (index, slot)))
                     .find(|(_, slot)| *slot.key == *key)
                     .map(|(index, _)| index)
    }

    /// Iterates over `(slot, name, value)` for every declared variable, in
    /// slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &Value)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|s| (index, &*s.key, &s.value)))
    }

    /// Number of declared variables.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if nothing has been declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots; the maximum number of variables.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn home(&self, key: &str) -> usize {
        djb2(key.as_bytes()) as usize % self.capacity()
    }
}

/// The DJB2 string hash: `h = h * 33 + byte`, seeded with 5381.
///
/// # Example
/// ```
/// use reckon::interpreter::environment::djb2;
///
/// assert_eq!(djb2(b""), 5381);
/// assert_eq!(djb2(b"a"), 5381 * 33 + 97);
/// ```
#[must_use]
pub fn djb2(bytes: &[u8]) -> u32 {
    bytes.iter()
         .fold(5381u32, |hash, &byte| {
             (hash << 5).wrapping_add(hash).wrapping_add(u32::from(byte))
         })
}
