//! Book detail route. Loads one entry through the shared store and offers
//! the admin actions; a 404 from the API renders the not-found content.

use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AppShell, ButtonVariant, Spinner, use_toasts};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::use_auth;
use crate::features::books::state::use_books;
use crate::routes::{NotFoundContent, date_part, paths};
use entity_cache::CacheError;
use identity::Role;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;
use session::GatewayError;

#[derive(Params, PartialEq, Clone)]
struct BookParams {
    id: Option<String>,
}

#[component]
pub fn BookDetailPage() -> impl IntoView {
    let auth = use_auth();
    let books = use_books();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let params = use_params::<BookParams>();
    let params_for_fetch = params;
    let book = LocalResource::new(move || {
        books.track();
        let store = books.store();
        let id = params_for_fetch
            .get()
            .ok()
            .and_then(|params| params.id)
            .unwrap_or_default();
        async move {
            if id.trim().is_empty() {
                return Err(CacheError::Fetch(GatewayError::Rejected {
                    status: 404,
                    message: "Book id is required.".to_string(),
                }));
            }

            store.book(&id).await
        }
    });

    let params_for_effect = params;
    Effect::new(move |_| {
        let _ = params_for_effect.get();
        book.refetch();
    });

    let is_admin = Signal::derive(move || {
        auth.user
            .get()
            .is_some_and(|user| user.role == Role::Admin)
    });

    let delete_action = Action::new_local(move |id: &String| {
        let store = books.store();
        let id = id.clone();
        async move { store.delete(&id).await }
    });

    Effect::new(move |_| {
        if let Some(result) = delete_action.value().get() {
            match result {
                Ok(()) => {
                    toasts.success("The book has been successfully deleted.".to_string());
                    navigate(paths::BOOKS, Default::default());
                }
                Err(err) => toasts.error(err.to_string()),
            }
        }
    });

    view! {
        <AppShell>
            <RequireAuth children=move || view! {
                <div class="space-y-6">
                    <A
                        href=paths::BOOKS
                        {..}
                        class="inline-flex items-center text-sm text-gray-500 hover:text-gray-900 dark:text-gray-400 dark:hover:text-white"
                    >
                        "Back to Books"
                    </A>

                    <Suspense fallback=move || view! { <Spinner /> }>
                        {move || match book.get() {
                            Some(Ok(detail)) => {
                                let added = date_part(&detail.created_at).to_string();
                                let updated = (detail.updated_at != detail.created_at)
                                    .then(|| date_part(&detail.updated_at).to_string());
                                let edit_href = paths::book_edit(&detail.id);
                                let delete_id = detail.id.clone();
                                let on_delete = move |_| {
                                    let confirmed = web_sys::window()
                                        .and_then(|window| {
                                            window
                                                .confirm_with_message(
                                                    "Delete this book? This cannot be undone.",
                                                )
                                                .ok()
                                        })
                                        .unwrap_or(false);
                                    if confirmed {
                                        delete_action.dispatch(delete_id.clone());
                                    }
                                };

                                view! {
                                    <div class="grid gap-6 md:grid-cols-2">
                                        <div class="aspect-[3/4] w-full max-w-md overflow-hidden rounded-lg bg-gray-100 dark:bg-gray-800">
                                            <img
                                                src=detail.cover.clone()
                                                alt=detail.name.clone()
                                                class="h-full w-full object-cover"
                                            />
                                        </div>
                                        <div class="space-y-4">
                                            <div>
                                                <h1 class=Theme::HEADING>{detail.name.clone()}</h1>
                                                <p class="text-xl text-gray-500 dark:text-gray-400">
                                                    {format!("by {}", detail.author)}
                                                </p>
                                            </div>
                                            <div class="flex items-center gap-4 text-sm text-gray-500 dark:text-gray-400">
                                                <span>{format!("Added: {added}")}</span>
                                                {updated.map(|date| view! {
                                                    <span>{format!("Updated: {date}")}</span>
                                                })}
                                            </div>
                                            <div class="pt-4">
                                                <h3 class="text-lg font-semibold text-gray-900 dark:text-white">
                                                    "Description"
                                                </h3>
                                                <p class="mt-2 text-gray-500 dark:text-gray-400 whitespace-pre-line">
                                                    {detail.description.clone()}
                                                </p>
                                            </div>
                                            <Show when=move || is_admin.get()>
                                                <div class="flex gap-4 pt-6">
                                                    <A
                                                        href=edit_href.clone()
                                                        {..}
                                                        class="inline-flex items-center px-4 py-2 text-sm font-medium text-gray-900 bg-white border border-gray-300 rounded-lg hover:bg-gray-100 dark:bg-gray-800 dark:text-white dark:border-gray-600 dark:hover:bg-gray-700 transition-colors"
                                                    >
                                                        "Edit"
                                                    </A>
                                                    <button
                                                        type="button"
                                                        class=ButtonVariant::Danger.class()
                                                        class:cursor-not-allowed=move || delete_action.pending().get()
                                                        class:opacity-70=move || delete_action.pending().get()
                                                        disabled=move || delete_action.pending().get()
                                                        on:click=on_delete.clone()
                                                    >
                                                        "Delete"
                                                    </button>
                                                </div>
                                            </Show>
                                        </div>
                                    </div>
                                }.into_any()
                            }
                            Some(Err(CacheError::Fetch(GatewayError::Rejected { status: 404, .. }))) => {
                                view! { <NotFoundContent /> }.into_any()
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
