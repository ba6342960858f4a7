//! Derived-value cells — pure-function memoization and last-write-wins
//! supersession.
//!
//! Every derived value in the pipeline is a pure function of declared
//! inputs, so a cell can skip recomputation whenever the input hash is
//! unchanged, and a superseded computation can simply be dropped — no
//! cleanup side effects exist.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A single memoized derived value, keyed on the hash of its input.
///
/// `get_or_compute` recomputes only when the input changed since the
/// last call. The compute function must be pure; the cell caches on
/// input identity alone.
#[derive(Debug, Default)]
pub struct MemoCell<T> {
    key: Option<u64>,
    value: Option<T>,
}

impl<T: Clone> MemoCell<T> {
    pub fn new() -> Self {
        Self { key: None, value: None }
    }

    pub fn get_or_compute<I: Hash>(&mut self, input: &I, compute: impl FnOnce(&I) -> T) -> T {
        let key = hash_of(input);
        if self.key == Some(key) {
            if let Some(value) = &self.value {
                return value.clone();
            }
        }
        let value = compute(input);
        self.key = Some(key);
        self.value = Some(value.clone());
        value
    }

    /// Drop the cached value, forcing the next call to recompute.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.value = None;
    }
}

fn hash_of<I: Hash>(input: &I) -> u64 {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    hasher.finish()
}

/// Last-write-wins guard for derivations that may be overtaken by a
/// newer input before their result is consumed.
///
/// `begin` stamps a computation; `commit` stores its result only if no
/// newer computation began in the meantime. Stale results are discarded
/// rather than queued.
#[derive(Debug, Default)]
pub struct Superseded<T> {
    version: u64,
    value: Option<(u64, T)>,
}

/// Token identifying one in-flight computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp(u64);

impl<T> Superseded<T> {
    pub fn new() -> Self {
        Self { version: 0, value: None }
    }

    /// Start a new computation, superseding all earlier stamps.
    pub fn begin(&mut self) -> Stamp {
        self.version += 1;
        Stamp(self.version)
    }

    /// Store `value` unless a newer `begin` already happened.
    /// Returns whether the value was accepted.
    pub fn commit(&mut self, stamp: Stamp, value: T) -> bool {
        if stamp.0 != self.version {
            return false;
        }
        self.value = Some((stamp.0, value));
        true
    }

    /// The latest committed value, if it is still current.
    pub fn latest(&self) -> Option<&T> {
        match &self.value {
            Some((version, value)) if *version == self.version => Some(value),
            _ => None,
        }
    }
}
