//! Deterministic temporary-name allocation.
//!
//! A separate prelude generator (out of scope here) must declare storage
//! for every temporary this crate allocates, so the sequence produced for a
//! given routine must be reproducible from the routine's content alone. The
//! factory is reset at the start of each routine and yields names in the
//! exact order calls consume them.

#[derive(Debug, Clone)]
pub struct TempNameFactory {
    prefix: String,
    next: u32,
}

impl TempNameFactory {
    pub fn new(prefix: impl Into<String>) -> Self {
        TempNameFactory {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Resets the sequence to its initial state, to be called at routine
    /// entry so independent emission passes over the same routine agree.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Allocates and returns the next temporary name.
    pub fn fresh(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        name
    }
}

impl Default for TempNameFactory {
    fn default() -> Self {
        TempNameFactory::new("il_tmp_")
    }
}
