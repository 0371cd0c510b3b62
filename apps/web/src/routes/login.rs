use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AlreadySignedInPanel, AppShell, Button, Spinner};
use crate::features::auth::state::use_auth;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use session::LoginCredentials;

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let login_action = Action::new_local(move |input: &LoginInput| {
        let controller = auth.controller();
        let input = input.clone();
        async move {
            controller
                .login(LoginCredentials {
                    email: input.email,
                    password: input.password,
                })
                .await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            // Navigation on success is driven by the session events.
            if let Err(err) = result {
                set_error.set(Some(err.to_string()));
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_error.set(Some("Email and password are required.".to_string()));
            return;
        }

        login_action.dispatch(LoginInput {
            email: email_value,
            password: password_value,
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
                                "Sign in"
                            </h1>
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
                                    autocomplete="current-password"
                                    required
                                    on:input=move |event| set_password.set(event_target_value(&event))
                                />
                            </div>
                            <Button button_type="submit" disabled=login_action.pending()>
                                "Submit"
                            </Button>
                            {move || {
                                login_action
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
