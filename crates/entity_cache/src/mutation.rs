//! Optimistic writes with snapshot rollback.

use std::hash::Hash;

use crate::cache::{Cache, Entry};

/// What an optimistic write displaced, stamped with the generation it was
/// applied under. Rolling back a snapshot whose generation is no longer
/// current is refused, so a rollback can never clobber a newer write.
pub struct Snapshot<K, V> {
    key: K,
    previous: Option<V>,
    generation: u64,
}

impl<K, V, E> Cache<K, V, E>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
    E: Clone + 'static,
{
    /// Write `value` immediately, before the server has confirmed anything,
    /// and return a snapshot for rolling back if it ends up rejecting the
    /// mutation. An in-flight fetch for the key is superseded.
    pub fn apply_optimistic(&self, key: K, value: V) -> Snapshot<K, V> {
        let (snapshot, superseded, listener) = {
            let mut inner = self.inner.borrow_mut();
            let generation = inner.allocate_generation();

            let entry = inner
                .entries
                .entry(key.clone())
                .or_insert_with(|| Entry::empty(generation));

            let snapshot = Snapshot {
                key,
                previous: entry.value.clone(),
                generation,
            };

            entry.generation = generation;
            entry.value = Some(value);
            entry.error = None;
            entry.stale = false;

            (snapshot, entry.waiters.take(), inner.listener.clone())
        };

        drop(superseded);

        if let Some(listener) = listener {
            listener();
        }

        snapshot
    }

    /// Restore what an optimistic write displaced.
    ///
    /// Returns `false` without touching the entry when a newer write landed
    /// after the snapshot was taken, or when the entry is gone.
    pub fn rollback(&self, snapshot: Snapshot<K, V>) -> bool {
        let listener = {
            let mut inner = self.inner.borrow_mut();
            let generation = inner.allocate_generation();

            let Some(entry) = inner.entries.get_mut(&snapshot.key) else {
                log::debug!("skipping rollback for an evicted entry");
                return false;
            };

            if entry.generation != snapshot.generation {
                log::debug!("skipping rollback; the entry moved on");
                return false;
            }

            entry.generation = generation;
            entry.value = snapshot.previous;
            entry.error = None;
            entry.stale = false;

            inner.listener.clone()
        };

        if let Some(listener) = listener {
            listener();
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use crate::cache::{Cache, CacheError, Spawner};
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Error)]
    #[error("{0}")]
    struct TestError(&'static str);

    fn test_spawner(pool: &LocalPool) -> Spawner {
        let spawner = pool.spawner();
        Rc::new(move |future| {
            spawner.spawn_local(future).unwrap();
        })
    }

    #[test]
    fn rollback_restores_the_displaced_value() {
        let mut pool = LocalPool::new();
        let cache: Cache<&str, Vec<u32>, TestError> = Cache::new(test_spawner(&pool));

        let seeded = pool.run_until(cache.get("books", || async { Ok(vec![1, 2, 3]) }));
        assert_eq!(seeded, Ok(vec![1, 2, 3]));

        let snapshot = cache.apply_optimistic("books", vec![1, 3]);
        assert_eq!(cache.peek(&"books"), Some(vec![1, 3]));

        assert!(cache.rollback(snapshot));
        assert_eq!(cache.peek(&"books"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn rollback_refuses_when_a_newer_write_landed() {
        let pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));

        let stale = cache.apply_optimistic("books", 1);
        let _newer = cache.apply_optimistic("books", 2);

        assert!(!cache.rollback(stale));
        assert_eq!(cache.peek(&"books"), Some(2));
    }

    #[test]
    fn rollback_refuses_after_an_invalidation() {
        let pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));

        let snapshot = cache.apply_optimistic("books", 1);
        cache.invalidate(&"books");

        assert!(!cache.rollback(snapshot));
        assert_eq!(cache.peek(&"books"), Some(1));
    }

    #[test]
    fn rollback_refuses_after_a_clear() {
        let pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));

        let snapshot = cache.apply_optimistic("books", 1);
        cache.clear();

        assert!(!cache.rollback(snapshot));
        assert_eq!(cache.peek(&"books"), None);
    }

    #[test]
    fn an_optimistic_write_supersedes_an_in_flight_fetch() {
        let mut pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));
        let (release, gate) = oneshot::channel::<u32>();
        let outcome: Rc<RefCell<Option<Result<u32, CacheError<TestError>>>>> =
            Rc::new(RefCell::new(None));

        {
            let cache = cache.clone();
            let outcome = Rc::clone(&outcome);
            pool.spawner()
                .spawn_local(async move {
                    let result = cache
                        .get("books", move || async move {
                            gate.await.map_err(|_| TestError("gate dropped"))
                        })
                        .await;
                    *outcome.borrow_mut() = Some(result);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        let _snapshot = cache.apply_optimistic("books", 10);
        pool.run_until_stalled();

        assert_eq!(*outcome.borrow(), Some(Err(CacheError::Superseded)));

        release.send(1).unwrap();
        pool.run_until_stalled();
        assert_eq!(cache.peek(&"books"), Some(10));
    }

    #[test]
    fn rollback_notifies_the_listener() {
        let pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));
        let bumps = Rc::new(Cell::new(0_u32));

        cache.set_listener(Rc::new({
            let bumps = Rc::clone(&bumps);
            move || bumps.set(bumps.get() + 1)
        }));

        let snapshot = cache.apply_optimistic("books", 1);
        assert_eq!(bumps.get(), 1);

        assert!(cache.rollback(snapshot));
        assert_eq!(bumps.get(), 2);
    }
}
