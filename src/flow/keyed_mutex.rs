use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// 按 key 划分的异步互斥锁，按需创建
///
/// 每个条目记录持有者与等待者的数量，归零时立即移除；
/// 等待中的 `lock` future 被取消时同样会注销自己
#[derive(Default)]
pub struct KeyedMutex {
    locks: Mutex<HashMap<String, Slot>>,
}

struct Slot {
    mutex: Arc<AsyncMutex<()>>,
    users: usize,
}

/// 对某个 key 的登记，drop 时注销
struct Registration<'a> {
    owner: &'a KeyedMutex,
    key: String,
}

/// 临界区守卫
pub struct KeyedGuard<'a> {
    // 先释放锁，再注销登记
    _guard: OwnedMutexGuard<()>,
    registration: Registration<'a>,
}

impl KeyedMutex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> KeyedGuard<'_> {
        let (registration, mutex) = self.register(key);
        let guard = mutex.lock_owned().await;
        KeyedGuard {
            _guard: guard,
            registration,
        }
    }

    /// 当前存在锁条目的 key 数量
    pub fn active_keys(&self) -> usize {
        self.entries().len()
    }

    fn register(&self, key: &str) -> (Registration<'_>, Arc<AsyncMutex<()>>) {
        let mut locks = self.entries();
        let slot = locks.entry(key.to_string()).or_insert_with(|| Slot {
            mutex: Arc::new(AsyncMutex::new(())),
            users: 0,
        });
        slot.users += 1;
        let mutex = slot.mutex.clone();
        (
            Registration {
                owner: self,
                key: key.to_string(),
            },
            mutex,
        )
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyedGuard<'_> {
    pub fn key(&self) -> &str {
        &self.registration.key
    }
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        let mut locks = self.owner.entries();
        if let Some(slot) = locks.get_mut(&self.key) {
            slot.users -= 1;
            if slot.users == 0 {
                locks.remove(&self.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_entry_removed_after_release() {
        let locks = KeyedMutex::new();
        {
            let guard = locks.lock("a").await;
            assert_eq!(guard.key(), "a");
            assert_eq!(locks.active_keys(), 1);
        }
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_does_not_leak_entry() {
        let locks = KeyedMutex::new();
        let held = locks.lock("a").await;

        let mut waiter = Box::pin(locks.lock("a"));
        assert!(futures::poll!(&mut waiter).is_pending());

        // 持有者释放后、等待者再次被轮询前取消等待者
        drop(held);
        assert_eq!(locks.active_keys(), 1);
        drop(waiter);

        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_while_held() {
        let locks = KeyedMutex::new();
        let held = locks.lock("a").await;

        let mut waiter = Box::pin(locks.lock("a"));
        assert!(futures::poll!(&mut waiter).is_pending());
        drop(waiter);
        assert_eq!(locks.active_keys(), 1);

        drop(held);
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn test_waiter_acquires_after_release() {
        let locks = KeyedMutex::new();
        let held = locks.lock("a").await;

        let mut waiter = Box::pin(locks.lock("a"));
        assert!(futures::poll!(&mut waiter).is_pending());
        drop(held);

        let guard = waiter.await;
        assert_eq!(locks.active_keys(), 1);
        drop(guard);
        assert_eq!(locks.active_keys(), 0);
    }
}
