// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional serialization of whole dispatches.
//!
//! The logger does not lock anything around sink calls on its own.  Two threads logging at once
//! may reach the same sink concurrently, and sinks writing to a shared stream may interleave.
//! Installing a [`LockHook`] with [`set_lock_hook`](crate::set_lock_hook) brackets every
//! [`log`](crate::log) call, console path and registry fan-out included, in exactly one
//! `acquire`/`release` pair.
//!
//! The setters ([`set_level`](crate::set_level), [`set_quiet`](crate::set_quiet),
//! [`set_lock_hook`](crate::set_lock_hook), registration) are *not* bracketed by the hook.
//! Each setter is individually atomic, but a setter racing with a dispatch may or may not be
//! observed by that dispatch.  Configure first, then start logging from many threads.
//!
//! # Example
//!
//! ```
//! use sinklog::{SpinLockHook, set_lock_hook};
//! use std::sync::Arc;
//!
//! set_lock_hook(Some(Arc::new(SpinLockHook::new())));
//! sinklog::info!("whole dispatches are now serialized");
//! set_lock_hook(None);
//! ```
//!
//! A closure taking `bool` (true to acquire, false to release) is a hook too:
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! static DEPTH: AtomicUsize = AtomicUsize::new(0);
//! sinklog::set_lock_hook(Some(Arc::new(|acquire: bool| {
//!     if acquire {
//!         DEPTH.fetch_add(1, Ordering::SeqCst);
//!     } else {
//!         DEPTH.fetch_sub(1, Ordering::SeqCst);
//!     }
//! })));
//! sinklog::warn!("bracketed");
//! assert_eq!(DEPTH.load(Ordering::SeqCst), 0);
//! sinklog::set_lock_hook(None);
//! ```

use crate::spinlock::RawSpinlock;

pub trait LockHook: Send + Sync {
    /// Called once at the start of a dispatch, before any sink runs.
    fn acquire(&self);
    /// Called once at the end of the same dispatch, after every sink ran.
    fn release(&self);
}

impl<F> LockHook for F
where
    F: Fn(bool) + Send + Sync,
{
    fn acquire(&self) {
        self(true)
    }

    fn release(&self) {
        self(false)
    }
}

/**
A [`LockHook`] that spins until the previous dispatch is done.

Dispatch is not re-entrant under this hook: a sink that logs from inside `emit` deadlocks.
*/
#[derive(Debug, Default)]
pub struct SpinLockHook {
    raw: RawSpinlock,
}

impl SpinLockHook {
    pub const fn new() -> Self {
        Self {
            raw: RawSpinlock::new(),
        }
    }

    /// Whether a dispatch currently holds the hook.
    pub fn is_held(&self) -> bool {
        self.raw.is_locked()
    }
}

impl LockHook for SpinLockHook {
    fn acquire(&self) {
        self.raw.lock();
    }

    fn release(&self) {
        self.raw.unlock();
    }
}

/// Releases the hook when dropped, so a panicking sink doesn't leave it held.
pub(crate) struct HookGuard<'a> {
    hook: Option<&'a dyn LockHook>,
}

impl<'a> HookGuard<'a> {
    pub(crate) fn acquire(hook: Option<&'a dyn LockHook>) -> Self {
        if let Some(hook) = hook {
            hook.acquire();
        }
        Self { hook }
    }
}

impl Drop for HookGuard<'_> {
    fn drop(&mut self) {
        if let Some(hook) = self.hook {
            hook.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn guard_brackets_scope() {
        let calls = Mutex::new(Vec::new());
        let hook = |acquire: bool| calls.lock().unwrap().push(acquire);
        {
            let _guard = HookGuard::acquire(Some(&hook));
            assert_eq!(*calls.lock().unwrap(), vec![true]);
        }
        assert_eq!(*calls.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn no_hook_is_a_no_op() {
        let _guard = HookGuard::acquire(None);
    }

    #[test]
    fn spin_hook_is_held_between_calls() {
        let hook = SpinLockHook::new();
        assert!(!hook.is_held());
        hook.acquire();
        assert!(hook.is_held());
        hook.release();
        assert!(!hook.is_held());
    }

    #[test]
    fn guard_releases_on_panic() {
        let hook = SpinLockHook::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = HookGuard::acquire(Some(&hook));
            panic!("sink blew up");
        }));
        assert!(result.is_err());
        assert!(!hook.is_held());
    }
}
