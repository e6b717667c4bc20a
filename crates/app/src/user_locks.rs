//! Per-user write serialization.
//!
//! The address service reads before it writes ("does this user own any
//! address yet?", "is this one already default?"). [`UserLocks`] makes that
//! read-decide-write sequence exclusive per user inside one process; the
//! store's own constraint covers writers in other processes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use estore_domain::id::UserId;
use tokio::sync::OwnedMutexGuard;

/// A set of async mutexes keyed by [`UserId`], created on demand.
#[derive(Debug, Default)]
pub struct UserLocks {
    inner: Mutex<HashMap<UserId, Arc<tokio::sync::Mutex<()>>>>,
}

impl UserLocks {
    /// Wait until no other task holds `user_id`, then hold it until the
    /// returned guard is dropped.
    pub async fn lock(&self, user_id: UserId) -> UserGuard<'_> {
        let mutex = Arc::clone(self.map().entry(user_id).or_default());
        let guard = mutex.lock_owned().await;
        UserGuard {
            locks: self,
            user_id,
            guard: Some(guard),
        }
    }

    fn map(&self) -> MutexGuard<'_, HashMap<UserId, Arc<tokio::sync::Mutex<()>>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.map().len()
    }
}

/// Exclusive hold on one user's writes.
#[derive(Debug)]
pub struct UserGuard<'a> {
    locks: &'a UserLocks,
    user_id: UserId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut map = self.locks.map();
        // Only the map still references the mutex: nobody holds or awaits it.
        if map
            .get(&self.user_id)
            .is_some_and(|mutex| Arc::strong_count(mutex) == 1)
        {
            map.remove(&self.user_id);
        }
    }
}
