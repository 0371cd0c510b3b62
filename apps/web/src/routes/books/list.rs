//! Books list route. Reads through the shared store and filters client-side;
//! the search never hits the API.

use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::use_auth;
use crate::features::books::state::use_books;
use crate::routes::paths;
use entity_cache::CacheError;
use identity::Role;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn BooksListPage() -> impl IntoView {
    let auth = use_auth();
    let books = use_books();
    let (search, set_search) = signal(String::new());

    let list = LocalResource::new(move || {
        books.track();
        let store = books.store();
        async move { store.list().await }
    });

    let is_admin = Signal::derive(move || {
        auth.user
            .get()
            .is_some_and(|user| user.role == Role::Admin)
    });

    view! {
        <AppShell>
            <RequireAuth children=move || view! {
                <div class="space-y-6">
                    <div class="flex items-center justify-between">
                        <div>
                            <h1 class=Theme::HEADING>"Books"</h1>
                            <p class=Theme::SUBTEXT>"Browse and manage your book collection"</p>
                        </div>
                        <Show when=move || is_admin.get()>
                            <A
                                href=paths::BOOK_NEW
                                {..}
                                class="inline-flex items-center px-4 py-2 text-sm font-medium text-white bg-gray-900 rounded-lg hover:bg-gray-700 dark:bg-gray-100 dark:text-gray-900 dark:hover:bg-white transition-colors"
                            >
                                "Add Book"
                            </A>
                        </Show>
                    </div>

                    <input
                        type="search"
                        class=Theme::INPUT
                        placeholder="Search books..."
                        on:input=move |event| set_search.set(event_target_value(&event))
                    />

                    <Suspense fallback=move || view! { <Spinner /> }>
                        {move || match list.get() {
                            Some(Ok(collection)) => {
                                let term = search.get().trim().to_lowercase();
                                let filtered = collection
                                    .into_iter()
                                    .filter(|book| {
                                        term.is_empty()
                                            || book.name.to_lowercase().contains(&term)
                                            || book.author.to_lowercase().contains(&term)
                                            || book.description.to_lowercase().contains(&term)
                                    })
                                    .collect::<Vec<_>>();

                                if filtered.is_empty() {
                                    let message = if term.is_empty() {
                                        "No books have been added yet."
                                    } else {
                                        "No books match your search."
                                    };
                                    view! {
                                        <div class="flex flex-col items-center justify-center py-12 text-center">
                                            <h3 class="text-lg font-semibold text-gray-900 dark:text-white">
                                                "No books found"
                                            </h3>
                                            <p class=Theme::SUBTEXT>{message}</p>
                                        </div>
                                    }.into_any()
                                } else {
                                    view! {
                                        <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4">
                                            <For
                                                each=move || filtered.clone()
                                                key=|book| book.id.clone()
                                                children=|book| {
                                                    view! {
                                                        <A href=paths::book_detail(&book.id) {..} class="block">
                                                            <div class="overflow-hidden rounded-lg border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-900 shadow-sm hover:shadow-md transition-shadow">
                                                                <div class="aspect-[3/4] w-full bg-gray-100 dark:bg-gray-800">
                                                                    <img
                                                                        src=book.cover.clone()
                                                                        alt=book.name.clone()
                                                                        class="h-full w-full object-cover"
                                                                    />
                                                                </div>
                                                                <div class="p-4">
                                                                    <h3 class="font-semibold text-gray-900 dark:text-white truncate">
                                                                        {book.name}
                                                                    </h3>
                                                                    <p class=Theme::SUBTEXT>{book.author}</p>
                                                                </div>
                                                            </div>
                                                        </A>
                                                    }
                                                }
                                            />
                                        </div>
                                    }.into_any()
                                }
                            }
                            Some(Err(CacheError::Superseded)) | None => {
                                view! { <Spinner /> }.into_any()
                            }
                            Some(Err(err)) => {
                                view! {
                                    <Alert kind=AlertKind::Error message=err.to_string() />
                                }.into_any()
                            }
                        }}
                    </Suspense>
                </div>
            } />
        </AppShell>
    }
}
