//! Profile route for the signed-in user. Name, password, and avatar changes
//! go through the session controller so the stored profile copy stays in
//! step with what the API accepted.

use crate::app_lib::forms::{accepted_image_types, selected_file};
use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::use_auth;
use identity::User;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use session::ProfileUpdate;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <AppShell>
            <RequireAuth children=move || view! {
                <div class="space-y-6 max-w-xl mx-auto">
                    <div>
                        <h1 class=Theme::HEADING>"Profile"</h1>
                        <p class=Theme::SUBTEXT>"Manage your account settings"</p>
                    </div>
                    {move || auth.user.get().map(|user| view! { <ProfileForm user=user /> })}
                </div>
            } />
        </AppShell>
    }
}

/// The prefilled form. Rebuilt whenever the session user changes, so a
/// saved update clears the password fields and shows the accepted values.
#[component]
fn ProfileForm(user: User) -> impl IntoView {
    let auth = use_auth();

    let (name, set_name) = signal(user.name.clone());
    let (current_password, set_current_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let avatar = RwSignal::new_local(None::<web_sys::File>);
    let (error, set_error) = signal::<Option<String>>(None);

    let original_name = user.name.clone();
    let role_label = user.role.as_str().to_lowercase();

    let update_action = Action::new_local(move |update: &ProfileUpdate<web_sys::File>| {
        let controller = auth.controller();
        let update = update.clone();
        async move { controller.update_profile(update).await }
    });

    Effect::new(move |_| {
        if let Some(result) = update_action.value().get() {
            // The success toast comes from the session events.
            if let Err(err) = result {
                set_error.set(Some(err.to_string()));
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let name_value = name.get_untracked().trim().to_string();
        let name_change = (name_value != original_name).then_some(name_value);
        let current_value = current_password.get_untracked();
        let current_change = (!current_value.is_empty()).then_some(current_value);
        let new_value = new_password.get_untracked();
        let new_change = (!new_value.is_empty()).then_some(new_value);
        let avatar_file = avatar.get_untracked();

        if let Err(err) = session::validate::profile_update(
            name_change.as_deref(),
            current_change.as_deref(),
            new_change.as_deref(),
            avatar_file.is_some(),
        ) {
            set_error.set(Some(err.to_string()));
            return;
        }

        if let Some(file) = &avatar_file {
            if let Err(err) = identity::validate::image_upload(file.size() as u64, &file.type_()) {
                set_error.set(Some(err.to_string()));
                return;
            }
        }

        update_action.dispatch(ProfileUpdate {
            name: name_change,
            current_password: current_change,
            new_password: new_change,
            avatar: avatar_file,
        });
    };

    view! {
        <div class="flex items-center gap-4">
            {user.avatar.clone().map(|src| view! {
                <div class="h-16 w-16 overflow-hidden rounded-full bg-gray-100 dark:bg-gray-800">
                    <img src=src alt="Avatar" class="h-full w-full object-cover" />
                </div>
            })}
            <div>
                <p class="font-medium text-gray-900 dark:text-white">{user.email.clone()}</p>
                <p class=format!("{} capitalize", Theme::SUBTEXT)>{role_label}</p>
            </div>
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
                    value=user.name.clone()
                    autocomplete="name"
                    on:input=move |event| set_name.set(event_target_value(&event))
                />
            </div>
            <div>
                <label class=Theme::LABEL for="current-password">
                    "Current password"
                </label>
                <input
                    id="current-password"
                    type="password"
                    class=Theme::INPUT
                    autocomplete="current-password"
                    on:input=move |event| set_current_password.set(event_target_value(&event))
                />
            </div>
            <div>
                <label class=Theme::LABEL for="new-password">
                    "New password"
                </label>
                <input
                    id="new-password"
                    type="password"
                    class=Theme::INPUT
                    autocomplete="new-password"
                    on:input=move |event| set_new_password.set(event_target_value(&event))
                />
                <p class="mt-1 text-xs text-gray-400">
                    "Leave both password fields empty to keep your current password."
                </p>
            </div>
            <div>
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
