//! Admin-only create form for catalog entries. The cover upload is
//! mandatory here; editing keeps it optional.

use crate::app_lib::forms::{accepted_image_types, selected_file};
use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner, use_toasts};
use crate::features::auth::guards::RequireAdmin;
use crate::features::books::state::use_books;
use crate::routes::paths;
use catalog::BookDraft;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

#[component]
pub fn BookNewPage() -> impl IntoView {
    let books = use_books();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (name, set_name) = signal(String::new());
    let (author, set_author) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let cover = RwSignal::new_local(None::<web_sys::File>);
    let (error, set_error) = signal::<Option<String>>(None);

    let create_action = Action::new_local(move |draft: &BookDraft<web_sys::File>| {
        let store = books.store();
        let draft = draft.clone();
        async move { store.create(&draft).await }
    });

    Effect::new(move |_| {
        if let Some(result) = create_action.value().get() {
            match result {
                Ok(book) => {
                    toasts.success("The book has been created successfully.".to_string());
                    navigate(&paths::book_detail(&book.id), Default::default());
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

        let Some(file) = cover.get_untracked() else {
            set_error.set(Some("A cover image is required.".to_string()));
            return;
        };
        if let Err(err) = identity::validate::image_upload(file.size() as u64, &file.type_()) {
            set_error.set(Some(err.to_string()));
            return;
        }

        create_action.dispatch(BookDraft {
            name: name_value,
            author: author_value,
            description: description_value,
            cover: file,
        });
    };

    view! {
        <AppShell>
            <RequireAdmin children=move || view! {
                <div class="space-y-6 max-w-xl mx-auto">
                    <A
                        href=paths::BOOKS
                        {..}
                        class="inline-flex items-center text-sm text-gray-500 hover:text-gray-900 dark:text-gray-400 dark:hover:text-white"
                    >
                        "Back to Books"
                    </A>

                    <div>
                        <h1 class=Theme::HEADING>"Add New Book"</h1>
                        <p class=Theme::SUBTEXT>"Create a new book in your collection"</p>
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
                                placeholder="Book title"
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
                                placeholder="Author name"
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
                                placeholder="What is this book about?"
                                required
                                on:input=move |event| set_description.set(event_target_value(&event))
                            ></textarea>
                        </div>
                        <div>
                            <label class=Theme::LABEL for="cover">
                                "Cover image"
                            </label>
                            <input
                                id="cover"
                                type="file"
                                class=Theme::INPUT
                                accept=accepted_image_types()
                                on:change=move |event| cover.set(selected_file(&event))
                            />
                        </div>
                        <Button button_type="submit" disabled=create_action.pending()>
                            "Create Book"
                        </Button>
                        {move || {
                            create_action
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
                </div>
            } />
        </AppShell>
    }
}
