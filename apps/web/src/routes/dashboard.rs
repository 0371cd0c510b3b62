//! Dashboard landing route. Shows library stats and the most recent
//! additions; data comes from the shared book store.

use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::use_auth;
use crate::features::books::state::use_books;
use crate::routes::{date_part, paths};
use entity_cache::CacheError;
use identity::Role;
use leptos::prelude::*;
use leptos_router::components::A;

const RECENT_BOOKS: usize = 5;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let books = use_books();

    let list = LocalResource::new(move || {
        books.track();
        let store = books.store();
        async move { store.list().await }
    });

    let user_name = Signal::derive(move || {
        auth.user
            .get()
            .map(|user| user.name)
            .unwrap_or_default()
    });
    let role_label = Signal::derive(move || {
        auth.user
            .get()
            .map(|user| user.role.as_str())
            .unwrap_or_default()
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
                    <div>
                        <h1 class=Theme::HEADING>"Dashboard"</h1>
                        <p class=Theme::SUBTEXT>
                            {move || format!("Welcome back, {}!", user_name.get())}
                        </p>
                    </div>

                    <Suspense fallback=move || view! { <Spinner /> }>
                        {move || match list.get() {
                            Some(Ok(collection)) => {
                                let total = collection.len();
                                let mut recent = collection;
                                recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                                recent.truncate(RECENT_BOOKS);
                                let recent_rows = recent
                                    .into_iter()
                                    .map(|book| {
                                        let added = date_part(&book.created_at).to_string();
                                        view! {
                                            <A href=paths::book_detail(&book.id) {..} class="block">
                                                <div class=format!("{} flex items-center justify-between", Theme::TILE)>
                                                    <div>
                                                        <p class="text-sm font-medium text-gray-900 dark:text-white">
                                                            {book.name}
                                                        </p>
                                                        <p class=Theme::SUBTEXT>{book.author}</p>
                                                    </div>
                                                    <span class="text-xs text-gray-400">{added}</span>
                                                </div>
                                            </A>
                                        }
                                    })
                                    .collect_view();

                                view! {
                                    <div class="space-y-6">
                                        <div class="grid gap-4 md:grid-cols-2">
                                            <div class=Theme::CARD>
                                                <p class=Theme::SUBTEXT>"Total Books"</p>
                                                <p class="text-2xl font-bold text-gray-900 dark:text-white">
                                                    {total}
                                                </p>
                                                <p class="text-xs text-gray-400">"Books in your collection"</p>
                                            </div>
                                            <div class=Theme::CARD>
                                                <p class=Theme::SUBTEXT>"User Role"</p>
                                                <p class="text-2xl font-bold text-gray-900 dark:text-white capitalize">
                                                    {move || role_label.get().to_lowercase()}
                                                </p>
                                                <p class="text-xs text-gray-400">"Your access level"</p>
                                            </div>
                                        </div>

                                        <div class=Theme::CARD>
                                            <h2 class="text-lg font-semibold mb-1 text-gray-900 dark:text-white">
                                                "Recent Books"
                                            </h2>
                                            <p class=format!("{} mb-4", Theme::SUBTEXT)>
                                                "The most recently added books"
                                            </p>
                                            {if total == 0 {
                                                view! {
                                                    <p class=Theme::SUBTEXT>"No books yet."</p>
                                                }.into_any()
                                            } else {
                                                view! {
                                                    <div class="space-y-3">{recent_rows}</div>
                                                }.into_any()
                                            }}
                                        </div>
                                    </div>
                                }.into_any()
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

                    <div class=Theme::CARD>
                        <h2 class="text-lg font-semibold mb-4 text-gray-900 dark:text-white">
                            "Quick Links"
                        </h2>
                        <div class="grid gap-3 md:grid-cols-3">
                            <A href=paths::BOOKS {..} class="block">
                                <div class=Theme::TILE>
                                    <p class="text-sm font-medium text-gray-900 dark:text-white">
                                        "View All Books"
                                    </p>
                                    <p class=Theme::SUBTEXT>"Browse the collection"</p>
                                </div>
                            </A>
                            <Show when=move || is_admin.get()>
                                <A href=paths::BOOK_NEW {..} class="block">
                                    <div class=Theme::TILE>
                                        <p class="text-sm font-medium text-gray-900 dark:text-white">
                                            "Add New Book"
                                        </p>
                                        <p class=Theme::SUBTEXT>"Create a catalog entry"</p>
                                    </div>
                                </A>
                            </Show>
                            <A href=paths::PROFILE {..} class="block">
                                <div class=Theme::TILE>
                                    <p class="text-sm font-medium text-gray-900 dark:text-white">
                                        "Update Profile"
                                    </p>
                                    <p class=Theme::SUBTEXT>"Manage your account"</p>
                                </div>
                            </A>
                        </div>
                    </div>
                </div>
            } />
        </AppShell>
    }
}
