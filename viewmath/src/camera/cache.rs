use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};

/// A lazily recomputed value with a validity flag.
///
/// Readers take the fast path while the flag is set. A stale value is recomputed by exactly one
/// caller while holding `guard`, and the flag is published only after the value is written.
#[derive(Debug)]
pub(crate) struct Cached<M> {
    valid: AtomicBool,
    guard: Mutex<()>,
    value: RwLock<M>,
}

impl<M: Copy> Cached<M> {
    /// A stale cache holding `placeholder` until the first recompute.
    pub fn new(placeholder: M) -> Self {
        Cached {
            valid: AtomicBool::new(false),
            guard: Mutex::new(()),
            value: RwLock::new(placeholder),
        }
    }

    pub fn get_or_update(&self, compute: impl FnOnce() -> M) -> M {
        if self.valid.load(Ordering::Acquire) {
            return *self.value.read();
        }

        let _guard = self.guard.lock();
        if self.valid.load(Ordering::Acquire) {
            return *self.value.read();
        }
        let value = compute();
        *self.value.write() = value;
        self.valid.store(true, Ordering::Release);
        value
    }

    /// Exclusive access means no reader can observe the flag change mid-recompute.
    #[inline]
    pub fn invalidate(&mut self) {
        *self.valid.get_mut() = false;
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }
}

impl<M: Copy> Clone for Cached<M> {
    fn clone(&self) -> Self {
        let _guard = self.guard.lock();
        Cached {
            valid: AtomicBool::new(self.valid.load(Ordering::Acquire)),
            guard: Mutex::new(()),
            value: RwLock::new(*self.value.read()),
        }
    }
}
