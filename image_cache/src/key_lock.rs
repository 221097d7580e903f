use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError, Weak},
};

use common::cache_key::CacheKey;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per cache key, alive only while someone holds or waits on it
#[derive(Default)]
pub(crate) struct KeyLocks {
    locks: Mutex<HashMap<CacheKey, Weak<AsyncMutex<()>>>>,
}

impl KeyLocks {
    pub(crate) async fn lock(&self, key: &CacheKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| lock.strong_count() > 0);

            match locks.get(key).and_then(Weak::upgrade) {
                Some(lock) => lock,
                None => {
                    let lock = Arc::new(AsyncMutex::new(()));
                    locks.insert(key.clone(), Arc::downgrade(&lock));
                    lock
                }
            }
        };

        lock.lock_owned().await
    }

    #[cfg(test)]
    pub(crate) fn live_keys(&self) -> usize {
        self.locks
            .lock()
            .unwrap()
            .values()
            .filter(|lock| lock.strong_count() > 0)
            .count()
    }
}
