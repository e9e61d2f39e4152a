//! Element types for tests that check how collections manage memory.

use std::cell::Cell;
use std::rc::Rc;

/// A zero-sized element, which a collection has to store without ever allocating for it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

/// An element which counts how many times it (or any of its clones) has been dropped. All clones
/// share one count, so a test can hand out clones and check that each is dropped exactly once.
#[derive(Debug, Clone, Default)]
pub struct CountedDrop(Rc<Cell<usize>>);

impl CountedDrop {
    pub fn new() -> CountedDrop {
        CountedDrop::default()
    }

    /// Returns the number of drops seen so far across all clones.
    pub fn drops(&self) -> usize {
        self.0.get()
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
