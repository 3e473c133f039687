use std::cell::Cell;

use crate::location::LocationKey;

/// Allocates location keys for a single root history instance.
///
/// Keys only need to be unique per root history; a monotonic counter is
/// enough for POP correlation to find the matching entry again.
#[derive(Debug, Default)]
pub struct KeyGenerator {
    next: Cell<u64>,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&self) -> LocationKey {
        let id = self.next.get();
        self.next.set(id + 1);

        LocationKey::from(format!("{id:06x}"))
    }
}
