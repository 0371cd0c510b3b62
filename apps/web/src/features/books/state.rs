//! Book store context for the frontend. One store is shared by every view;
//! a version signal bumps after each cache write so resources built on
//! [`BooksContext::track`] refetch when an invalidation lands.

use crate::app_lib::{ApiClient, config::AppConfig};
use crate::features::auth::storage::BrowserCredentialStore;
use crate::features::books::gateway::WebBooksGateway;
use catalog::BookStore;
use entity_cache::Spawner;
use leptos::prelude::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
/// Book cache context shared through Leptos. The store lives in the reactive
/// arena so the context itself is a plain handle.
pub struct BooksContext {
    store: StoredValue<BookStore<WebBooksGateway>, LocalStorage>,
    version: RwSignal<u64>,
}

impl BooksContext {
    fn new(store: BookStore<WebBooksGateway>) -> Self {
        let version = RwSignal::new(0_u64);
        store.set_listener(Rc::new(move || {
            version.update(|version| *version += 1);
        }));

        Self {
            store: StoredValue::new_local(store),
            version,
        }
    }

    /// Clone of the store for async work.
    pub fn store(&self) -> BookStore<WebBooksGateway> {
        self.store.get_value()
    }

    /// Subscribes the surrounding resource to cache writes. Call this in the
    /// synchronous part of a resource fetcher.
    pub fn track(&self) {
        self.version.get();
    }

    /// Drops everything cached, next reads fetch fresh.
    pub fn clear(&self) {
        self.store.with_value(|store| store.clear());
    }
}

/// Provides the shared book store context.
#[component]
pub fn BooksProvider(children: Children) -> impl IntoView {
    let context = match use_context::<Rc<ApiClient>>() {
        Some(api) => BooksContext::new(build_store(api)),
        None => detached_context(),
    };
    provide_context(context);

    view! { {children()} }
}

/// Returns the current books context or a detached fallback.
pub fn use_books() -> BooksContext {
    use_context::<BooksContext>().unwrap_or_else(detached_context)
}

fn build_store(api: Rc<ApiClient>) -> BookStore<WebBooksGateway> {
    let spawner: Spawner = Rc::new(|future| wasm_bindgen_futures::spawn_local(future));
    BookStore::new(Rc::new(WebBooksGateway::new(api)), spawner)
}

fn detached_context() -> BooksContext {
    let config = AppConfig::load();
    let api = Rc::new(ApiClient::new(&config, Rc::new(BrowserCredentialStore)));
    BooksContext::new(build_store(api))
}
