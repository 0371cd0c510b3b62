use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use thiserror::Error;

/// Runs a fetch future to completion off the caller's stack.
///
/// The browser app plugs in `spawn_local`; tests plug in a `LocalPool`
/// spawner.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CacheError<E> {
    /// The fetch itself failed; the inner error is the gateway's.
    #[error("{0}")]
    Fetch(E),

    /// A newer write landed while this request was in flight, so its result
    /// was discarded. Callers re-read to observe the current state.
    #[error("request superseded by a newer write")]
    Superseded,
}

pub(crate) struct Entry<V, E> {
    /// Write counter stamp. A settling fetch must present the generation it
    /// was started under or its result is dropped.
    pub(crate) generation: u64,
    pub(crate) value: Option<V>,
    pub(crate) error: Option<E>,
    /// A stale entry keeps serving its value through `peek` but the next
    /// `get` refetches.
    pub(crate) stale: bool,
    /// `Some` while a fetch is in flight; every concurrent reader parks a
    /// sender here instead of fetching again.
    pub(crate) waiters: Option<Vec<oneshot::Sender<SettledResult<V, E>>>>,
}

type SettledResult<V, E> = Result<V, CacheError<E>>;

impl<V, E> Entry<V, E> {
    pub(crate) fn empty(generation: u64) -> Self {
        Self {
            generation,
            value: None,
            error: None,
            stale: false,
            waiters: None,
        }
    }
}

pub(crate) struct Inner<K, V, E> {
    pub(crate) entries: HashMap<K, Entry<V, E>>,
    /// Generations are allocated cache-wide and never reused, so a settle
    /// racing a clear-and-refill can never be mistaken for current.
    pub(crate) next_generation: u64,
    pub(crate) listener: Option<Rc<dyn Fn()>>,
}

impl<K, V, E> Inner<K, V, E> {
    pub(crate) fn allocate_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }
}

pub struct Cache<K, V, E> {
    pub(crate) inner: Rc<RefCell<Inner<K, V, E>>>,
    spawner: Spawner,
}

impl<K, V, E> Clone for Cache<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            spawner: Rc::clone(&self.spawner),
        }
    }
}

impl<K, V, E> Cache<K, V, E>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
    E: Clone + 'static,
{
    #[must_use]
    pub fn new(spawner: Spawner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                entries: HashMap::new(),
                next_generation: 0,
                listener: None,
            })),
            spawner,
        }
    }

    /// Register a callback invoked after every cache write: settles,
    /// invalidations, optimistic updates, rollbacks, and clears. The UI uses
    /// it to resubscribe its resources.
    pub fn set_listener(&self, listener: Rc<dyn Fn()>) {
        self.inner.borrow_mut().listener = Some(listener);
    }

    /// Read through the cache.
    ///
    /// A fresh entry is returned as-is. A missing, stale, or errored entry
    /// triggers `fetch`, and every caller that arrives while that fetch is in
    /// flight awaits the same result instead of fetching again.
    ///
    /// # Errors
    ///
    /// `CacheError::Fetch` when the fetch fails, `CacheError::Superseded`
    /// when a newer write invalidated this request before it settled.
    pub async fn get<F, Fut>(&self, key: K, fetch: F) -> Result<V, CacheError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + 'static,
    {
        let joined = {
            let mut inner = self.inner.borrow_mut();

            match inner.entries.get_mut(&key) {
                Some(Entry {
                    waiters: Some(waiters),
                    ..
                }) => {
                    let (sender, receiver) = oneshot::channel();
                    waiters.push(sender);
                    Some(receiver)
                }
                Some(entry) if !entry.stale && entry.error.is_none() => {
                    if let Some(value) = entry.value.clone() {
                        return Ok(value);
                    }
                    None
                }
                _ => None,
            }
        };

        if let Some(receiver) = joined {
            return receiver.await.unwrap_or(Err(CacheError::Superseded));
        }

        let (sender, receiver) = oneshot::channel();
        let generation = {
            let mut inner = self.inner.borrow_mut();
            let generation = inner.allocate_generation();
            let entry = inner
                .entries
                .entry(key.clone())
                .or_insert_with(|| Entry::empty(generation));
            entry.generation = generation;
            entry.error = None;
            entry.waiters = Some(vec![sender]);
            generation
        };

        let cache = self.clone();
        let future = fetch();
        (self.spawner)(Box::pin(async move {
            let result = future.await;
            cache.settle(&key, generation, result);
        }));

        receiver.await.unwrap_or(Err(CacheError::Superseded))
    }

    /// Return the cached value without fetching. Stale values are served too;
    /// staleness only drives refetching.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner
            .borrow()
            .entries
            .get(key)
            .and_then(|entry| entry.value.clone())
    }

    /// Mark an entry stale. Its value stays visible through `peek` until the
    /// next `get` refetches; an in-flight fetch for the entry is superseded.
    pub fn invalidate(&self, key: &K) {
        let (superseded, listener) = {
            let mut inner = self.inner.borrow_mut();
            let generation = inner.allocate_generation();

            let Some(entry) = inner.entries.get_mut(key) else {
                return;
            };

            entry.stale = true;
            entry.generation = generation;
            entry.error = None;

            (entry.waiters.take(), inner.listener.clone())
        };

        drop(superseded);

        if let Some(listener) = listener {
            listener();
        }
    }

    /// Drop every entry. In-flight fetches are superseded; the next reads
    /// behave like first-time reads.
    pub fn clear(&self) {
        let (entries, listener) = {
            let mut inner = self.inner.borrow_mut();
            (std::mem::take(&mut inner.entries), inner.listener.clone())
        };

        drop(entries);

        if let Some(listener) = listener {
            listener();
        }
    }

    pub(crate) fn settle(&self, key: &K, generation: u64, result: Result<V, E>) {
        let (waiters, outcome, listener) = {
            let mut inner = self.inner.borrow_mut();

            let Some(entry) = inner.entries.get_mut(key) else {
                log::debug!("dropping a settled result for an evicted entry");
                return;
            };

            if entry.generation != generation {
                log::debug!("dropping a settled result that lost to a newer write");
                return;
            }

            let waiters = entry.waiters.take().unwrap_or_default();

            let outcome = match result {
                Ok(value) => {
                    entry.value = Some(value.clone());
                    entry.error = None;
                    entry.stale = false;
                    Ok(value)
                }
                Err(error) => {
                    entry.error = Some(error.clone());
                    Err(CacheError::Fetch(error))
                }
            };

            (waiters, outcome, inner.listener.clone())
        };

        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }

        if let Some(listener) = listener {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cache, CacheError, Spawner};
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
    fn concurrent_reads_share_one_fetch() {
        let mut pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));
        let calls = Rc::new(Cell::new(0_u32));

        let counted = |value: u32| {
            let calls = Rc::clone(&calls);
            move || {
                calls.set(calls.get() + 1);
                async move { Ok(value) }
            }
        };

        let (first, second, third) = pool.run_until(async {
            futures::join!(
                cache.get("books", counted(7)),
                cache.get("books", counted(8)),
                cache.get("books", counted(9)),
            )
        });

        assert_eq!(first, Ok(7));
        assert_eq!(second, Ok(7));
        assert_eq!(third, Ok(7));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn fresh_entries_are_served_without_fetching() {
        let mut pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));
        let calls = Rc::new(Cell::new(0_u32));

        for _ in 0..3 {
            let calls = Rc::clone(&calls);
            let result = pool.run_until(cache.get("books", move || {
                calls.set(calls.get() + 1);
                async { Ok(5) }
            }));
            assert_eq!(result, Ok(5));
        }

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn errors_are_returned_and_the_next_read_retries() {
        let mut pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));

        let failed = pool.run_until(cache.get("books", || async { Err(TestError("boom")) }));
        assert_eq!(failed, Err(CacheError::Fetch(TestError("boom"))));

        let retried = pool.run_until(cache.get("books", || async { Ok(3) }));
        assert_eq!(retried, Ok(3));
    }

    #[test]
    fn invalidate_keeps_the_value_visible_and_forces_a_refetch() {
        let mut pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));

        let first = pool.run_until(cache.get("books", || async { Ok(1) }));
        assert_eq!(first, Ok(1));

        cache.invalidate(&"books");
        assert_eq!(cache.peek(&"books"), Some(1));

        let second = pool.run_until(cache.get("books", || async { Ok(2) }));
        assert_eq!(second, Ok(2));
        assert_eq!(cache.peek(&"books"), Some(2));
    }

    #[test]
    fn invalidating_an_absent_key_is_a_no_op() {
        let pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));
        let bumps = Rc::new(Cell::new(0_u32));

        cache.set_listener(Rc::new({
            let bumps = Rc::clone(&bumps);
            move || bumps.set(bumps.get() + 1)
        }));

        cache.invalidate(&"missing");
        assert_eq!(bumps.get(), 0);
        assert_eq!(cache.peek(&"missing"), None);
    }

    #[test]
    fn a_write_during_a_fetch_supersedes_the_result() {
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
        assert!(outcome.borrow().is_none());

        cache.invalidate(&"books");
        pool.run_until_stalled();
        assert_eq!(*outcome.borrow(), Some(Err(CacheError::Superseded)));

        // The old fetch settles now; its result must not be applied.
        release.send(41).unwrap();
        pool.run_until_stalled();
        assert_eq!(cache.peek(&"books"), None);

        let fresh = pool.run_until(cache.get("books", || async { Ok(2) }));
        assert_eq!(fresh, Ok(2));
    }

    #[test]
    fn clear_resets_to_first_time_behavior() {
        let mut pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));
        let calls = Rc::new(Cell::new(0_u32));

        let counted = || {
            let calls = Rc::clone(&calls);
            move || {
                calls.set(calls.get() + 1);
                async { Ok(1) }
            }
        };

        let _ = pool.run_until(cache.get("books", counted()));
        cache.clear();

        assert_eq!(cache.peek(&"books"), None);

        let again = pool.run_until(cache.get("books", counted()));
        assert_eq!(again, Ok(1));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn the_listener_sees_settles_invalidations_and_clears() {
        let mut pool = LocalPool::new();
        let cache: Cache<&str, u32, TestError> = Cache::new(test_spawner(&pool));
        let bumps = Rc::new(Cell::new(0_u32));

        cache.set_listener(Rc::new({
            let bumps = Rc::clone(&bumps);
            move || bumps.set(bumps.get() + 1)
        }));

        let _ = pool.run_until(cache.get("books", || async { Ok(1) }));
        assert_eq!(bumps.get(), 1);

        cache.invalidate(&"books");
        assert_eq!(bumps.get(), 2);

        cache.clear();
        assert_eq!(bumps.get(), 3);
    }
}
