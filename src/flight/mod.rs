//! Request Coalescing
//!
//! Deduplicates concurrent loads of the same key. The first caller for a key
//! becomes the leader and runs the work; every caller that arrives while the
//! work is in flight waits and receives a clone of the leader's result, never
//! running its own work. Once the result is delivered the key is forgotten,
//! so a later call starts a fresh load.
//!
//! A leader that is dropped mid-flight (cancelled or panicked) marks its call
//! abandoned and wakes the waiters; one of them re-enters and takes over the
//! load, so waiters never deadlock on a dead leader.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::sync::Notify;

pub struct SingleFlight<T: Clone> {
    calls: DashMap<String, Arc<Call<T>>>,
}

/// One in-flight (or just-finished) load.
///
/// The result slot is written exactly once, strictly before waiters are
/// released, and never mutated afterwards.
struct Call<T> {
    slot: OnceLock<T>,
    done: Notify,
    abandoned: AtomicBool,
}

impl<T> Call<T> {
    fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            done: Notify::new(),
            abandoned: AtomicBool::new(false),
        }
    }
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            calls: DashMap::new(),
        }
    }
}

impl<T: Clone> SingleFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `work` for `key`, coalescing with any load already in flight.
    ///
    /// At most one invocation of `work` executes per key at any moment; every
    /// concurrent caller observes the identical result. No lock is held while
    /// `work` is awaited.
    pub async fn run<F, Fut>(&self, key: &str, work: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut work = Some(work);

        loop {
            let (call, is_leader) = match self.calls.entry(key.to_string()) {
                Entry::Occupied(entry) => (entry.get().clone(), false),
                Entry::Vacant(entry) => {
                    let call = Arc::new(Call::new());
                    entry.insert(call.clone());
                    (call, true)
                }
            };

            if is_leader {
                let work = work.take().expect("leader role claimed twice");
                let guard = AbandonGuard {
                    flight: self,
                    key,
                    call: &call,
                    armed: true,
                };

                let value = work().await;

                // Result first, then unregister the key, then wake. Waiters
                // that raced past the removal still hold the call and read
                // the slot.
                let _ = call.slot.set(value.clone());
                self.forget(key, &call);
                guard.disarm();
                call.done.notify_waiters();
                return value;
            }

            match self.wait(&call).await {
                Some(value) => return value,
                // Leader died without a result; retry, possibly as the new
                // leader.
                None => continue,
            }
        }
    }

    /// Waits for the call's result. `None` means the call was abandoned.
    async fn wait(&self, call: &Arc<Call<T>>) -> Option<T> {
        loop {
            if let Some(value) = call.slot.get() {
                return Some(value.clone());
            }

            let notified = call.done.notified();
            tokio::pin!(notified);
            // Register for the wakeup before re-checking, so a notify between
            // the check and the await cannot be missed.
            notified.as_mut().enable();

            if let Some(value) = call.slot.get() {
                return Some(value.clone());
            }
            if call.abandoned.load(Ordering::Acquire) {
                return None;
            }

            notified.await;
        }
    }

    /// Removes the key's entry if it still belongs to `call`. A successor
    /// call installed after abandonment must not be evicted by a stale
    /// leader.
    fn forget(&self, key: &str, call: &Arc<Call<T>>) {
        self.calls
            .remove_if(key, |_, current| Arc::ptr_eq(current, call));
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.calls.len()
    }
}

/// Marks the call abandoned if the leader is dropped before storing a result,
/// releasing the waiters for promotion instead of leaving them parked.
struct AbandonGuard<'a, T: Clone> {
    flight: &'a SingleFlight<T>,
    key: &'a str,
    call: &'a Arc<Call<T>>,
    armed: bool,
}

impl<T: Clone> AbandonGuard<'_, T> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T: Clone> Drop for AbandonGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.call.abandoned.store(true, Ordering::Release);
            self.flight.forget(self.key, self.call);
            self.call.done.notify_waiters();
        }
    }
}
