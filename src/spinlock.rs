// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
A tiny spinlock.

On the wasm main thread we can't necessarily block, so the process-wide logger state is guarded
by spinning instead of a `Mutex`.  Critical sections here must stay short: copy a few fields or
push one entry, never call into a sink while holding the lock.

[`RawSpinlock`] is also the building block for [`SpinLockHook`](crate::SpinLockHook), where
acquire and release happen in separate calls and a guard-based lock doesn't fit.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

#[derive(Debug, Default)]
pub(crate) struct RawSpinlock {
    locked: AtomicBool,
}

impl RawSpinlock {
    pub(crate) const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    pub(crate) fn lock(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Acquire, Relaxed)
            .is_err()
        {
            // wait for a plain load to see it free before retrying the CAS
            while self.locked.load(Relaxed) {
                std::hint::spin_loop();
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Acquire, Relaxed)
            .is_ok()
    }

    pub(crate) fn unlock(&self) {
        self.locked.store(false, Release);
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.locked.load(Relaxed)
    }
}

pub(crate) struct Spinlock<T> {
    raw: RawSpinlock,
    data: UnsafeCell<T>,
}

// SAFETY: access to `data` is serialized by `raw`
unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send> Sync for Spinlock<T> {}

struct Unlock<'a>(&'a RawSpinlock);

impl Drop for Unlock<'_> {
    fn drop(&mut self) {
        self.0.unlock();
    }
}

impl<T> Spinlock<T> {
    pub(crate) const fn new(data: T) -> Self {
        Spinlock {
            raw: RawSpinlock::new(),
            data: UnsafeCell::new(data),
        }
    }

    pub(crate) fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.raw.lock();
        let _unlock = Unlock(&self.raw);
        // SAFETY: we hold the lock until `_unlock` drops, even if `f` unwinds
        unsafe { f(&mut *self.data.get()) }
    }

    pub(crate) fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.with_mut(|data| f(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn raw_lock_excludes() {
        let raw = RawSpinlock::new();
        assert!(raw.try_lock());
        assert!(raw.is_locked());
        assert!(!raw.try_lock());
        raw.unlock();
        assert!(!raw.is_locked());
        raw.lock();
        assert!(raw.is_locked());
        raw.unlock();
    }

    #[test]
    fn counts_are_not_lost() {
        let lock = Arc::new(Spinlock::new(0u64));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = lock.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        lock.with_mut(|n| *n += 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(lock.with(|n| *n), 4000);
    }

    #[test]
    fn unlocks_after_panic() {
        let lock = Spinlock::new(1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            lock.with_mut(|_| panic!("inside"));
        }));
        assert!(result.is_err());
        assert_eq!(lock.with(|n| *n), 1);
    }
}
