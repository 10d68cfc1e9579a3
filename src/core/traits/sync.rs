//! Synchronized state abstraction for lock-scoped access.
//!
//! This module provides the `SharedState` trait and its embassy-sync backed
//! implementation. Access is only possible through a synchronous closure, so
//! a lock can never be held across an `.await`: the critical section ends
//! when the closure returns.

use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Closure-scoped synchronized state access.
///
/// # Example
///
/// ```
/// use embassy_sync::blocking_mutex::raw::NoopRawMutex;
/// use wifly_link::core::traits::sync::{BlockingState, SharedState};
///
/// struct Counter {
///     value: u32,
/// }
///
/// fn increment<S: SharedState<Counter>>(state: &S) -> u32 {
///     state.with_mut(|counter| {
///         counter.value += 1;
///         counter.value
///     })
/// }
///
/// let state = BlockingState::<NoopRawMutex, _>::new(Counter { value: 0 });
/// assert_eq!(increment(&state), 1);
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

/// State guarded by an embassy-sync blocking mutex.
///
/// `M` selects the locking strategy:
/// - `CriticalSectionRawMutex` on target, safe against interrupts and other cores
/// - `NoopRawMutex` for single-executor use and host tests
///
/// # Panics
///
/// Re-entrant access (calling `with_mut` from inside another access closure)
/// panics with "already borrowed".
pub struct BlockingState<M: RawMutex, T> {
    inner: Mutex<M, RefCell<T>>,
}

impl<M: RawMutex, T> BlockingState<M, T> {
    /// Creates a new `BlockingState` wrapping the given value.
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }
}

impl<M: RawMutex, T> SharedState<T> for BlockingState<M, T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}
