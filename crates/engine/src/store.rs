//! The transactional store.
//!
//! # Design
//!
//! - One `parking_lot::Mutex` guards the key map, the value index, and the
//!   transaction stack jointly, so every operation is atomic with respect
//!   to all others.
//! - `FxHashMap`: O(1) lookups, fast non-crypto hash.
//! - `SmallVec` for the frame stack: nesting is unbounded but almost
//!   always shallow, so the common depths stay inline.
//!
//! # Undo capture
//!
//! A frame records a name's prior binding only on the *first* mutation of
//! that name inside the frame. Later mutations leave the capture alone.
//! This is what makes nested rollback exact: the frame always holds the
//! binding as it was when the frame began, no matter how many times the
//! name changed inside it.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tally_core::{Error, Result};
use tracing::{debug, trace};

/// Undo log for one open transaction frame.
///
/// Maps each name touched inside the frame to the value it held when the
/// frame first touched it; `None` means the name was unbound.
type UndoLog = FxHashMap<String, Option<String>>;

/// The three structures guarded by the store's lock.
#[derive(Debug, Default)]
struct StoreInner {
    /// Current name → value bindings.
    keys: FxHashMap<String, String>,
    /// value → number of names currently bound to it.
    ///
    /// Counts are strictly positive; an entry that would reach zero is
    /// removed, never retained.
    value_counts: FxHashMap<String, usize>,
    /// Open transaction frames, innermost last.
    frames: SmallVec<[UndoLog; 4]>,
}

impl StoreInner {
    /// Move one binding's worth of index weight from `old` to `new`.
    fn shift_count(&mut self, old: Option<&str>, new: Option<&str>) {
        if let Some(old) = old {
            if let Some(count) = self.value_counts.get_mut(old) {
                *count -= 1;
                if *count == 0 {
                    self.value_counts.remove(old);
                }
            }
        }
        if let Some(new) = new {
            *self.value_counts.entry(new.to_string()).or_insert(0) += 1;
        }
    }

    /// Record `name`'s pre-mutation binding in the innermost open frame.
    ///
    /// No-op when no frame is open, and when the frame already captured
    /// `name` (first mutation wins).
    fn capture(&mut self, name: &str, old: &Option<String>) {
        if let Some(frame) = self.frames.last_mut() {
            if !frame.contains_key(name) {
                frame.insert(name.to_string(), old.clone());
            }
        }
    }
}

/// In-memory key/value store with nested transactions and a value-count
/// index.
///
/// # Thread Safety
///
/// All operations are `&self` and serialized by a single internal lock;
/// concurrent callers sharing an `Arc<Store>` observe a consistent serial
/// order with no torn reads of the index relative to the map. The lock is
/// held for the full duration of each call and released on every exit
/// path, including the `NoTransaction` returns.
///
/// # Example
///
/// ```
/// use tally_engine::Store;
///
/// let store = Store::new();
/// store.set("x", "10");
/// store.begin();
/// store.set("x", "20");
/// store.rollback().unwrap();
/// assert_eq!(store.get("x").as_deref(), Some("10"));
/// ```
pub struct Store {
    inner: Mutex<StoreInner>,
}

impl Store {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
        }
    }

    /// Create a store with pre-allocated capacity for `keys` bindings.
    pub fn with_capacity(keys: usize) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                keys: FxHashMap::with_capacity_and_hasher(keys, Default::default()),
                value_counts: FxHashMap::default(),
                frames: SmallVec::new(),
            }),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get the value bound to `name`, or `None` if unbound.
    ///
    /// Pure read; mutates nothing.
    #[inline]
    pub fn get(&self, name: &str) -> Option<String> {
        self.inner.lock().keys.get(name).cloned()
    }

    /// Number of names currently bound to `value`; 0 when none are.
    ///
    /// Served straight from the value index, never by scanning the map.
    #[inline]
    pub fn num_equal_to(&self, value: &str) -> usize {
        self.inner
            .lock()
            .value_counts
            .get(value)
            .copied()
            .unwrap_or(0)
    }

    /// Number of names currently bound.
    pub fn len(&self) -> usize {
        self.inner.lock().keys.len()
    }

    /// Check whether no names are bound.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().keys.is_empty()
    }

    /// Number of open transaction frames.
    pub fn depth(&self) -> usize {
        self.inner.lock().frames.len()
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Bind `name` to `value`, overwriting any prior binding.
    ///
    /// Absence of a prior value is a valid first set, not an error. The
    /// old binding is captured into the innermost open frame and the value
    /// index shifts one count from the old value to the new one.
    pub fn set(&self, name: &str, value: &str) {
        let mut inner = self.inner.lock();
        let old = inner.keys.get(name).cloned();
        inner.capture(name, &old);
        inner.keys.insert(name.to_string(), value.to_string());
        inner.shift_count(old.as_deref(), Some(value));
        trace!(name, value, "set");
    }

    /// Remove `name`'s binding. Unbound names are a defined no-op.
    pub fn unset(&self, name: &str) {
        let mut inner = self.inner.lock();
        let Some(old) = inner.keys.get(name).cloned() else {
            return;
        };
        let captured = Some(old.clone());
        inner.capture(name, &captured);
        inner.keys.remove(name);
        inner.shift_count(Some(old.as_str()), None);
        trace!(name, "unset");
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Open a new transaction frame. Frames nest without limit.
    pub fn begin(&self) {
        let mut inner = self.inner.lock();
        inner.frames.push(UndoLog::default());
        debug!(depth = inner.frames.len(), "begin");
    }

    /// Undo the innermost open frame.
    ///
    /// Every binding the frame captured is restored in the key map, and
    /// the value index is adjusted against the *current* value of each
    /// name at rollback time. Restoration writes directly: it must not
    /// record into any outer frame, whose own pre-frame captures stay
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`Error::NoTransaction`] when no frame is open; state is unchanged.
    pub fn rollback(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        let frame = inner.frames.pop().ok_or(Error::NoTransaction)?;
        for (name, original) in frame {
            let current = inner.keys.get(&name).cloned();
            match original {
                Some(value) => {
                    inner.shift_count(current.as_deref(), Some(value.as_str()));
                    inner.keys.insert(name, value);
                }
                None => {
                    inner.shift_count(current.as_deref(), None);
                    inner.keys.remove(&name);
                }
            }
        }
        debug!(depth = inner.frames.len(), "rollback");
        Ok(())
    }

    /// Make every outstanding change permanent.
    ///
    /// Discards the *entire* frame stack in one step, not just the
    /// innermost frame; a rollback issued afterwards reports
    /// `NoTransaction`. The key map and value index are not touched.
    ///
    /// # Errors
    ///
    /// [`Error::NoTransaction`] when no frame is open; state is unchanged.
    pub fn commit(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.frames.is_empty() {
            return Err(Error::NoTransaction);
        }
        let discarded = inner.frames.len();
        inner.frames.clear();
        debug!(discarded, "commit");
        Ok(())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Store")
            .field("keys", &inner.keys.len())
            .field("distinct_values", &inner.value_counts.len())
            .field("depth", &inner.frames.len())
            .finish()
    }
}
