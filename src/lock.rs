//! Property locker: pin record fields to fixed values.
//!
//! A locked key shadows whatever the source record holds. Reads return the
//! pinned value, writes to the key are dropped. Locking never fails: a
//! second lock on the same key simply replaces the pinned value.
//!
//! CHANGELOG:
//! - 10/17/2026 - Dropped unused locked_keys accessor
//! - 10/17/2026 - Initial implementation

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A read-only value. There is no way to get a `&mut T` out of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sealed<T>(T);

impl<T> Sealed<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Result of a write through [`LockedRecord::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// Key is locked; the write was dropped.
    Discarded,
}

/// A JSON object record with a set of locked keys layered on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LockedRecord {
    source: Map<String, Value>,
    locks: BTreeMap<String, Sealed<Value>>,
}

impl LockedRecord {
    pub fn new(source: Map<String, Value>) -> Self {
        Self {
            source,
            locks: BTreeMap::new(),
        }
    }

    /// Lock `key` to `value`. Returns the record for chaining.
    pub fn lock(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        tracing::trace!(key = %key, value = %value, "lock");
        self.locks.insert(key, Sealed::new(value));
        self
    }

    /// Lock several keys, in order.
    pub fn lock_all<K, V, I>(&mut self, entries: I) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.lock(key, value);
        }
        self
    }

    /// Current value of `key`: the pinned value if locked, else the source.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.locks
            .get(key)
            .map(Sealed::get)
            .or_else(|| self.source.get(key))
    }

    /// Write `key`. Silently dropped when the key is locked.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> WriteOutcome {
        let key = key.into();
        if self.locks.contains_key(&key) {
            tracing::trace!(key = %key, "write to locked key discarded");
            return WriteOutcome::Discarded;
        }
        self.source.insert(key, value.into());
        WriteOutcome::Applied
    }

    pub fn is_locked(&self, key: &str) -> bool {
        self.locks.contains_key(key)
    }

    pub fn sealed(&self, key: &str) -> Option<&Sealed<Value>> {
        self.locks.get(key)
    }

    /// Merged view with locked values applied.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut merged = self.source.clone();
        for (key, value) in &self.locks {
            merged.insert(key.clone(), value.get().clone());
        }
        merged
    }

    pub fn into_value(self) -> Value {
        let mut merged = self.source;
        for (key, value) in self.locks {
            merged.insert(key, value.into_inner());
        }
        Value::Object(merged)
    }
}

impl Serialize for LockedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}
