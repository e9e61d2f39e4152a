//! Keys and hashers for tests that need to control exactly which bucket an entry lands in.

use std::hash::{BuildHasher, Hash, Hasher};

/// A key that hashes as the provided `hash` while comparing by `value`. Combined with
/// [`PassThrough`], many distinct keys can be forced into one chain.
#[derive(Debug)]
pub struct ManualHash<T: Eq> {
    hash: u64,
    value: T,
}

impl<T: Eq> ManualHash<T> {
    pub const fn new(hash: u64, value: T) -> ManualHash<T> {
        ManualHash {
            hash,
            value,
        }
    }
}

impl<T: Eq> Hash for ManualHash<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T: Eq> PartialEq for ManualHash<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for ManualHash<T> {}

/// A hasher that finishes with the last `u64` it was given, so a [`ManualHash`] hashes to exactly
/// its chosen value.
#[derive(Debug, Default)]
pub struct PassThroughHasher {
    state: u64,
}

impl Hasher for PassThroughHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state = self.state.rotate_left(8) ^ u64::from(*byte);
        }
    }

    fn write_u64(&mut self, value: u64) {
        self.state = value;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl BuildHasher for PassThrough {
    type Hasher = PassThroughHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PassThroughHasher::default()
    }
}
