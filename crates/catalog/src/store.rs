use std::rc::Rc;

use entity_cache::{Cache, CacheError, Spawner};
use session::GatewayError;

use crate::gateway::{BookDraft, BookPatch, BooksGateway};
use crate::types::Book;

/// Cached view of the catalog.
///
/// Reads go through two caches, one for the whole collection and one per
/// book. Mutations go straight to the gateway and then invalidate whatever
/// they touched; the next read refetches, so the cached views converge on
/// what the server actually stored rather than on what we think it did.
/// Deletion is the one optimistic mutation: the book disappears from the
/// cached collection immediately and comes back if the API refuses.
pub struct BookStore<G> {
    gateway: Rc<G>,
    list: Cache<(), Vec<Book>, GatewayError>,
    items: Cache<String, Book, GatewayError>,
}

impl<G> Clone for BookStore<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
            list: self.list.clone(),
            items: self.items.clone(),
        }
    }
}

impl<G: BooksGateway + 'static> BookStore<G> {
    #[must_use]
    pub fn new(gateway: Rc<G>, spawner: Spawner) -> Self {
        Self {
            gateway,
            list: Cache::new(Rc::clone(&spawner)),
            items: Cache::new(spawner),
        }
    }

    /// Register a callback invoked after every cache write, for the UI to
    /// resubscribe its views.
    pub fn set_listener(&self, listener: Rc<dyn Fn()>) {
        self.list.set_listener(Rc::clone(&listener));
        self.items.set_listener(listener);
    }

    /// The collection, fetched at most once no matter how many views ask.
    ///
    /// # Errors
    ///
    /// See [`CacheError`].
    pub async fn list(&self) -> Result<Vec<Book>, CacheError<GatewayError>> {
        let gateway = Rc::clone(&self.gateway);
        self.list
            .get((), move || async move { gateway.list().await })
            .await
    }

    /// A single book by id.
    ///
    /// # Errors
    ///
    /// See [`CacheError`].
    pub async fn book(&self, id: &str) -> Result<Book, CacheError<GatewayError>> {
        let gateway = Rc::clone(&self.gateway);
        let fetch_id = id.to_string();
        self.items
            .get(id.to_string(), move || async move {
                gateway.fetch(&fetch_id).await
            })
            .await
    }

    /// The cached collection, if any, without fetching.
    #[must_use]
    pub fn peek_list(&self) -> Option<Vec<Book>> {
        self.list.peek(&())
    }

    /// Create a book. Win or lose, the collection is refetched on its next
    /// read; the server may have stored the book even when the response did
    /// not make it back.
    ///
    /// # Errors
    ///
    /// Passes the gateway's error through.
    pub async fn create(&self, draft: &BookDraft<G::Attachment>) -> Result<Book, GatewayError> {
        let outcome = self.gateway.create(draft).await;
        self.list.invalidate(&());
        outcome
    }

    /// Edit a book. On success both the book and the collection are marked
    /// for refetch; on failure only the collection is.
    ///
    /// # Errors
    ///
    /// Passes the gateway's error through.
    pub async fn update(
        &self,
        id: &str,
        patch: &BookPatch<G::Attachment>,
    ) -> Result<Book, GatewayError> {
        let outcome = self.gateway.update(id, patch).await;

        if outcome.is_ok() {
            self.items.invalidate(&id.to_string());
        }
        self.list.invalidate(&());

        outcome
    }

    /// Delete a book, removing it from the cached collection before the API
    /// confirms. A refusal rolls the collection back to the exact state the
    /// removal displaced, unless a newer write already replaced it.
    ///
    /// # Errors
    ///
    /// Passes the gateway's error through.
    pub async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let snapshot = self.peek_list().map(|books| {
            let remaining = books
                .into_iter()
                .filter(|book| book.id != id)
                .collect::<Vec<_>>();
            self.list.apply_optimistic((), remaining)
        });

        let outcome = self.gateway.delete(id).await;

        match &outcome {
            Ok(()) => {
                self.items.invalidate(&id.to_string());
                self.list.invalidate(&());
            }
            Err(err) => {
                log::debug!("delete refused ({err}), restoring the cached collection");
                if let Some(snapshot) = snapshot {
                    self.list.rollback(snapshot);
                }
                self.list.invalidate(&());
            }
        }

        outcome
    }

    /// Forget everything. The next reads behave like first-time reads.
    pub fn clear(&self) {
        self.list.clear();
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::BookStore;
    use crate::gateway::{BookDraft, BookPatch, BooksGateway};
    use crate::types::Book;
    use entity_cache::CacheError;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use session::GatewayError;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    fn book(id: &str, name: &str) -> Book {
        Book {
            id: id.to_string(),
            name: name.to_string(),
            author: "Some Author".to_string(),
            description: "A description long enough to pass.".to_string(),
            cover: format!("/books/cover/{id}.png"),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    enum Script<T> {
        Now(Result<T, GatewayError>),
        Gated(oneshot::Receiver<Result<T, GatewayError>>),
    }

    async fn run_script<T>(script: Option<Script<T>>, what: &str) -> Result<T, GatewayError> {
        match script {
            Some(Script::Now(result)) => result,
            Some(Script::Gated(gate)) => gate
                .await
                .unwrap_or(Err(GatewayError::Network("gate dropped".to_string()))),
            None => Err(GatewayError::Network(format!("unscripted {what}"))),
        }
    }

    #[derive(Default)]
    struct TestGateway {
        lists: RefCell<VecDeque<Script<Vec<Book>>>>,
        fetches: RefCell<VecDeque<Result<Book, GatewayError>>>,
        creates: RefCell<VecDeque<Result<Book, GatewayError>>>,
        updates: RefCell<VecDeque<Result<Book, GatewayError>>>,
        deletes: RefCell<VecDeque<Script<()>>>,
        list_calls: Cell<u32>,
        fetch_calls: Cell<u32>,
    }

    impl TestGateway {
        fn script_list(&self, result: Result<Vec<Book>, GatewayError>) {
            self.lists.borrow_mut().push_back(Script::Now(result));
        }

        fn gate_list(&self) -> oneshot::Sender<Result<Vec<Book>, GatewayError>> {
            let (sender, receiver) = oneshot::channel();
            self.lists.borrow_mut().push_back(Script::Gated(receiver));
            sender
        }

        fn script_fetch(&self, result: Result<Book, GatewayError>) {
            self.fetches.borrow_mut().push_back(result);
        }

        fn script_create(&self, result: Result<Book, GatewayError>) {
            self.creates.borrow_mut().push_back(result);
        }

        fn script_update(&self, result: Result<Book, GatewayError>) {
            self.updates.borrow_mut().push_back(result);
        }

        fn script_delete(&self, result: Result<(), GatewayError>) {
            self.deletes.borrow_mut().push_back(Script::Now(result));
        }

        fn gate_delete(&self) -> oneshot::Sender<Result<(), GatewayError>> {
            let (sender, receiver) = oneshot::channel();
            self.deletes.borrow_mut().push_back(Script::Gated(receiver));
            sender
        }
    }

    impl BooksGateway for TestGateway {
        type Attachment = ();

        async fn list(&self) -> Result<Vec<Book>, GatewayError> {
            self.list_calls.set(self.list_calls.get() + 1);
            let script = self.lists.borrow_mut().pop_front();
            run_script(script, "list").await
        }

        async fn fetch(&self, _: &str) -> Result<Book, GatewayError> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            let script = self.fetches.borrow_mut().pop_front().map(Script::Now);
            run_script(script, "fetch").await
        }

        async fn create(&self, _: &BookDraft<()>) -> Result<Book, GatewayError> {
            let script = self.creates.borrow_mut().pop_front().map(Script::Now);
            run_script(script, "create").await
        }

        async fn update(&self, _: &str, _: &BookPatch<()>) -> Result<Book, GatewayError> {
            let script = self.updates.borrow_mut().pop_front().map(Script::Now);
            run_script(script, "update").await
        }

        async fn delete(&self, _: &str) -> Result<(), GatewayError> {
            let script = self.deletes.borrow_mut().pop_front();
            run_script(script, "delete").await
        }
    }

    fn store_with(pool: &LocalPool, gateway: Rc<TestGateway>) -> BookStore<TestGateway> {
        let spawner = pool.spawner();
        BookStore::new(
            gateway,
            Rc::new(move |future| {
                spawner.spawn_local(future).unwrap();
            }),
        )
    }

    fn rename_patch(name: &str) -> BookPatch<()> {
        BookPatch {
            name: Some(name.to_string()),
            ..BookPatch::default()
        }
    }

    #[test]
    fn the_collection_is_fetched_once() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));

        let first = pool.run_until(store.list()).unwrap();
        let second = pool.run_until(store.list()).unwrap();

        assert_eq!(first, second);
        assert_eq!(gateway.list_calls.get(), 1);
    }

    #[test]
    fn concurrent_collection_reads_share_one_fetch() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));

        let (first, second) =
            pool.run_until(async { futures::join!(store.list(), store.list()) });

        assert!(first.is_ok());
        assert_eq!(first, second);
        assert_eq!(gateway.list_calls.get(), 1);
    }

    #[test]
    fn creating_a_book_refreshes_the_collection() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));
        pool.run_until(store.list()).unwrap();

        gateway.script_create(Ok(book("b-2", "Annihilation")));
        let draft = BookDraft {
            name: "Annihilation".to_string(),
            author: "Jeff VanderMeer".to_string(),
            description: "An expedition into Area X goes sideways.".to_string(),
            cover: (),
        };
        pool.run_until(store.create(&draft)).unwrap();

        gateway.script_list(Ok(vec![
            book("b-1", "Piranesi"),
            book("b-2", "Annihilation"),
        ]));
        let listed = pool.run_until(store.list()).unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(gateway.list_calls.get(), 2);
    }

    #[test]
    fn a_failed_create_also_refreshes_the_collection() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));
        pool.run_until(store.list()).unwrap();

        gateway.script_create(Err(GatewayError::Timeout));
        let draft = BookDraft {
            name: "Annihilation".to_string(),
            author: "Jeff VanderMeer".to_string(),
            description: "An expedition into Area X goes sideways.".to_string(),
            cover: (),
        };
        let err = pool.run_until(store.create(&draft)).unwrap_err();
        assert_eq!(err, GatewayError::Timeout);

        // The server may have stored it anyway; the next read checks.
        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));
        pool.run_until(store.list()).unwrap();
        assert_eq!(gateway.list_calls.get(), 2);
    }

    #[test]
    fn an_update_forces_both_views_to_refetch() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));
        gateway.script_fetch(Ok(book("b-1", "Piranesi")));
        pool.run_until(store.list()).unwrap();
        pool.run_until(store.book("b-1")).unwrap();

        gateway.script_update(Ok(book("b-1", "Piranesi, 2nd ed.")));
        pool.run_until(store.update("b-1", &rename_patch("Piranesi, 2nd ed."))).unwrap();

        gateway.script_list(Ok(vec![book("b-1", "Piranesi, 2nd ed.")]));
        gateway.script_fetch(Ok(book("b-1", "Piranesi, 2nd ed.")));

        let listed = pool.run_until(store.list()).unwrap();
        let fetched = pool.run_until(store.book("b-1")).unwrap();

        assert_eq!(listed[0].name, "Piranesi, 2nd ed.");
        assert_eq!(fetched.name, "Piranesi, 2nd ed.");
        assert_eq!(gateway.list_calls.get(), 2);
        assert_eq!(gateway.fetch_calls.get(), 2);
    }

    #[test]
    fn a_failed_update_still_refreshes_the_collection() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));
        gateway.script_fetch(Ok(book("b-1", "Piranesi")));
        pool.run_until(store.list()).unwrap();
        pool.run_until(store.book("b-1")).unwrap();

        gateway.script_update(Err(GatewayError::Rejected {
            status: 400,
            message: "name too long".to_string(),
        }));
        pool.run_until(store.update("b-1", &rename_patch("Piranesi, 2nd ed.")))
            .unwrap_err();

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));
        pool.run_until(store.list()).unwrap();
        assert_eq!(gateway.list_calls.get(), 2);

        // The detail view was not touched by the failure.
        pool.run_until(store.book("b-1")).unwrap();
        assert_eq!(gateway.fetch_calls.get(), 1);
    }

    #[test]
    fn delete_removes_the_book_before_the_api_confirms() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_list(Ok(vec![book("b-1", "Piranesi"), book("b-2", "Annihilation")]));
        pool.run_until(store.list()).unwrap();

        let gate = gateway.gate_delete();
        let outcome = Rc::new(RefCell::new(None));
        {
            let store = store.clone();
            let outcome = Rc::clone(&outcome);
            pool.spawner()
                .spawn_local(async move {
                    *outcome.borrow_mut() = Some(store.delete("b-1").await);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        assert_eq!(
            store.peek_list(),
            Some(vec![book("b-2", "Annihilation")]),
            "the book should be gone while the request is in flight"
        );

        gate.send(Ok(())).unwrap();
        pool.run_until_stalled();
        assert_eq!(*outcome.borrow(), Some(Ok(())));

        // Confirmed deletes still refetch to pick up server-side truth.
        gateway.script_list(Ok(vec![book("b-2", "Annihilation")]));
        pool.run_until(store.list()).unwrap();
        assert_eq!(gateway.list_calls.get(), 2);
    }

    #[test]
    fn a_refused_delete_restores_the_collection_exactly() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        let seeded = vec![book("b-1", "Piranesi"), book("b-2", "Annihilation")];
        gateway.script_list(Ok(seeded.clone()));
        pool.run_until(store.list()).unwrap();

        let gate = gateway.gate_delete();
        let outcome = Rc::new(RefCell::new(None));
        {
            let store = store.clone();
            let outcome = Rc::clone(&outcome);
            pool.spawner()
                .spawn_local(async move {
                    *outcome.borrow_mut() = Some(store.delete("b-1").await);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        assert_eq!(store.peek_list(), Some(vec![book("b-2", "Annihilation")]));

        gate.send(Err(GatewayError::Rejected {
            status: 500,
            message: "cannot delete".to_string(),
        }))
        .unwrap();
        pool.run_until_stalled();

        assert!(matches!(
            *outcome.borrow(),
            Some(Err(GatewayError::Rejected { .. }))
        ));
        assert_eq!(store.peek_list(), Some(seeded));

        // And the next read double-checks with the server.
        gateway.script_list(Ok(vec![book("b-1", "Piranesi"), book("b-2", "Annihilation")]));
        pool.run_until(store.list()).unwrap();
        assert_eq!(gateway.list_calls.get(), 2);
    }

    #[test]
    fn deleting_without_a_cached_collection_skips_the_optimistic_step() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_delete(Ok(()));
        pool.run_until(store.delete("b-1")).unwrap();

        assert_eq!(store.peek_list(), None);
    }

    #[test]
    fn a_late_stale_refetch_never_overwrites_newer_data() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_list(Ok(vec![book("b-1", "Original")]));
        pool.run_until(store.list()).unwrap();

        // First rename; the refetch it triggers is slow to come back.
        gateway.script_update(Ok(book("b-1", "First rename")));
        pool.run_until(store.update("b-1", &rename_patch("First rename")))
            .unwrap();

        let slow = gateway.gate_list();
        let stale_read = Rc::new(RefCell::new(None));
        {
            let store = store.clone();
            let stale_read = Rc::clone(&stale_read);
            pool.spawner()
                .spawn_local(async move {
                    *stale_read.borrow_mut() = Some(store.list().await);
                })
                .unwrap();
        }
        pool.run_until_stalled();

        // Second rename lands while that refetch is still out.
        gateway.script_update(Ok(book("b-1", "Second rename")));
        pool.run_until(store.update("b-1", &rename_patch("Second rename")))
            .unwrap();
        pool.run_until_stalled();

        assert_eq!(
            *stale_read.borrow(),
            Some(Err(CacheError::Superseded)),
            "the superseded read must not resolve with data"
        );

        gateway.script_list(Ok(vec![book("b-1", "Second rename")]));
        let current = pool.run_until(store.list()).unwrap();
        assert_eq!(current[0].name, "Second rename");

        // The slow response finally arrives carrying stale data.
        slow.send(Ok(vec![book("b-1", "First rename")])).unwrap();
        pool.run_until_stalled();

        let settled = store.peek_list().unwrap();
        assert_eq!(settled[0].name, "Second rename");
    }

    #[test]
    fn clear_resets_to_first_time_behavior() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));
        gateway.script_fetch(Ok(book("b-1", "Piranesi")));
        pool.run_until(store.list()).unwrap();
        pool.run_until(store.book("b-1")).unwrap();

        store.clear();
        assert_eq!(store.peek_list(), None);

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));
        gateway.script_fetch(Ok(book("b-1", "Piranesi")));
        pool.run_until(store.list()).unwrap();
        pool.run_until(store.book("b-1")).unwrap();

        assert_eq!(gateway.list_calls.get(), 2);
        assert_eq!(gateway.fetch_calls.get(), 2);
    }

    #[test]
    fn the_listener_follows_both_caches() {
        let mut pool = LocalPool::new();
        let gateway = Rc::new(TestGateway::default());
        let store = store_with(&pool, Rc::clone(&gateway));
        let bumps = Rc::new(Cell::new(0_u32));

        store.set_listener(Rc::new({
            let bumps = Rc::clone(&bumps);
            move || bumps.set(bumps.get() + 1)
        }));

        gateway.script_list(Ok(vec![book("b-1", "Piranesi")]));
        pool.run_until(store.list()).unwrap();
        assert_eq!(bumps.get(), 1);

        gateway.script_fetch(Ok(book("b-1", "Piranesi")));
        pool.run_until(store.book("b-1")).unwrap();
        assert_eq!(bumps.get(), 2);

        store.clear();
        assert_eq!(bumps.get(), 4, "both caches notify on clear");
    }
}
