use crate::app_lib::forms::{accepted_image_types, selected_file};
use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AlreadySignedInPanel, AppShell, Button, Spinner};
use crate::features::auth::state::use_auth;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use session::Registration;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let avatar = RwSignal::new_local(None::<web_sys::File>);
    let (error, set_error) = signal::<Option<String>>(None);

    let register_action = Action::new_local(move |input: &Registration<web_sys::File>| {
        let controller = auth.controller();
        let input = input.clone();
        async move { controller.register(input).await }
    });

    Effect::new(move |_| {
        if let Some(result) = register_action.value().get() {
            // Navigation on success is driven by the session events.
            if let Err(err) = result {
                set_error.set(Some(err.to_string()));
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let name_value = name.get_untracked().trim().to_string();
        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        let confirm_value = confirm.get_untracked();
        if let Err(err) =
            session::validate::registration(&name_value, &email_value, &password_value, &confirm_value)
        {
            set_error.set(Some(err.to_string()));
            return;
        }

        let avatar_file = avatar.get_untracked();
        if let Some(file) = &avatar_file {
            if let Err(err) = identity::validate::image_upload(file.size() as u64, &file.type_()) {
                set_error.set(Some(err.to_string()));
                return;
            }
        }

        register_action.dispatch(Registration {
            name: name_value,
            email: email_value,
            password: password_value,
            avatar: avatar_file,
        });
    };

    view! {
        <AppShell>
            <Show
                when=move || is_authenticated.get()
                fallback=move || {
                    view! {
                        <form class="max-w-sm mx-auto" on:submit=on_submit>
                            <h1 class="text-xl font-semibold mb-6 text-gray-900 dark:text-white">
                                "Create an account"
                            </h1>
                            <div class="mb-5">
                                <label class=Theme::LABEL for="name">
                                    "Your name"
                                </label>
                                <input
                                    id="name"
                                    type="text"
                                    class=Theme::INPUT
                                    autocomplete="name"
                                    required
                                    on:input=move |event| set_name.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class=Theme::LABEL for="email">
                                    "Your email"
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    class=Theme::INPUT
                                    autocomplete="email"
                                    placeholder="name@inbox.im"
                                    required
                                    on:input=move |event| set_email.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class=Theme::LABEL for="password">
                                    "Your password"
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    class=Theme::INPUT
                                    autocomplete="new-password"
                                    required
                                    on:input=move |event| set_password.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class=Theme::LABEL for="confirm-password">
                                    "Confirm password"
                                </label>
                                <input
                                    id="confirm-password"
                                    type="password"
                                    class=Theme::INPUT
                                    autocomplete="new-password"
                                    required
                                    on:input=move |event| set_confirm.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class=Theme::LABEL for="avatar">
                                    "Avatar (optional)"
                                </label>
                                <input
                                    id="avatar"
                                    type="file"
                                    class=Theme::INPUT
                                    accept=accepted_image_types()
                                    on:change=move |event| avatar.set(selected_file(&event))
                                />
                            </div>
                            <Button button_type="submit" disabled=register_action.pending()>
                                "Sign up"
                            </Button>
                            {move || {
                                register_action
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
            >
                <AlreadySignedInPanel />
            </Show>
        </AppShell>
    }
}
