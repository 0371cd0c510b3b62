//! Admin-only edit form. Prefills from the cached entry and sends only the
//! fields that actually changed.

use crate::app_lib::forms::{accepted_image_types, selected_file};
use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner, use_toasts};
use crate::features::auth::guards::RequireAdmin;
use crate::features::books::state::use_books;
use crate::routes::{NotFoundContent, paths};
use catalog::{Book, BookPatch};
use entity_cache::CacheError;
use identity::validate::ValidationError;
use leptos::ev::SubmitEvent;
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
pub fn BookEditPage() -> impl IntoView {
    let books = use_books();

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

    view! {
        <AppShell>
            <RequireAdmin children=move || view! {
                <div class="space-y-6 max-w-xl mx-auto">
                    <Suspense fallback=move || view! { <Spinner /> }>
                        {move || match book.get() {
                            Some(Ok(detail)) => {
                                view! { <BookEditForm book=detail /> }.into_any()
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

/// The prefilled form. Rebuilt whenever the entry is refetched, so the
/// fields always start from the current server state.
#[component]
fn BookEditForm(book: Book) -> impl IntoView {
    let books = use_books();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (name, set_name) = signal(book.name.clone());
    let (author, set_author) = signal(book.author.clone());
    let (description, set_description) = signal(book.description.clone());
    let cover = RwSignal::new_local(None::<web_sys::File>);
    let (error, set_error) = signal::<Option<String>>(None);

    let back_href = paths::book_detail(&book.id);
    let original_name = book.name.clone();
    let original_author = book.author.clone();
    let original_description = book.description.clone();

    let book_id = book.id.clone();
    let update_action = Action::new_local(move |patch: &BookPatch<web_sys::File>| {
        let store = books.store();
        let id = book_id.clone();
        let patch = patch.clone();
        async move { store.update(&id, &patch).await }
    });

    Effect::new(move |_| {
        if let Some(result) = update_action.value().get() {
            match result {
                Ok(updated) => {
                    toasts.success("The book has been updated successfully.".to_string());
                    navigate(&paths::book_detail(&updated.id), Default::default());
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let name_value = name.get_untracked().trim().to_string();
        let author_value = author.get_untracked().trim().to_string();
        let description_value = description.get_untracked().trim().to_string();
        if let Err(err) =
            catalog::validate::book_form(&name_value, &author_value, &description_value)
        {
            set_error.set(Some(err.to_string()));
            return;
        }

        let cover_file = cover.get_untracked();
        if let Some(file) = &cover_file {
            if let Err(err) = identity::validate::image_upload(file.size() as u64, &file.type_()) {
                set_error.set(Some(err.to_string()));
                return;
            }
        }

        let patch = BookPatch {
            name: (name_value != original_name).then_some(name_value),
            author: (author_value != original_author).then_some(author_value),
            description: (description_value != original_description)
                .then_some(description_value),
            cover: cover_file,
        };
        if !patch.has_changes() {
            set_error.set(Some(ValidationError::NothingToChange.to_string()));
            return;
        }

        update_action.dispatch(patch);
    };

    view! {
        <A
            href=back_href
            {..}
            class="inline-flex items-center text-sm text-gray-500 hover:text-gray-900 dark:text-gray-400 dark:hover:text-white"
        >
            "Back to Book"
        </A>

        <div>
            <h1 class=Theme::HEADING>"Edit Book"</h1>
            <p class=Theme::SUBTEXT>"Update the details of this book"</p>
        </div>

        <form class="space-y-5" on:submit=on_submit>
            <div>
                <label class=Theme::LABEL for="name">
                    "Name"
                </label>
                <input
                    id="name"
                    type="text"
                    class=Theme::INPUT
                    value=book.name.clone()
                    required
                    on:input=move |event| set_name.set(event_target_value(&event))
                />
            </div>
            <div>
                <label class=Theme::LABEL for="author">
                    "Author"
                </label>
                <input
                    id="author"
                    type="text"
                    class=Theme::INPUT
                    value=book.author.clone()
                    required
                    on:input=move |event| set_author.set(event_target_value(&event))
                />
            </div>
            <div>
                <label class=Theme::LABEL for="description">
                    "Description"
                </label>
                <textarea
                    id="description"
                    class=Theme::INPUT
                    rows="5"
                    required
                    prop:value=move || description.get()
                    on:input=move |event| set_description.set(event_target_value(&event))
                ></textarea>
            </div>
            <div>
                <label class=Theme::LABEL for="cover">
                    "Replace cover (optional)"
                </label>
                <div class="mb-3 h-32 w-24 overflow-hidden rounded bg-gray-100 dark:bg-gray-800">
                    <img
                        src=book.cover.clone()
                        alt=book.name.clone()
                        class="h-full w-full object-cover"
                    />
                </div>
                <input
                    id="cover"
                    type="file"
                    class=Theme::INPUT
                    accept=accepted_image_types()
                    on:change=move |event| cover.set(selected_file(&event))
                />
            </div>
            <Button button_type="submit" disabled=update_action.pending()>
                "Save Changes"
            </Button>
            {move || {
                update_action
                    .pending()
                    .get()
                    .then_some(view! { <div class="mt-4"><Spinner /></div> })
            }}
            {move || {
                error
                    .get()
                    .map(|message| {
                        view! {
                            <div class="mt-4">
                                <Alert kind=AlertKind::Error message=message />
                            </div>
                        }
                    })
            }}
        </form>
    }
}
