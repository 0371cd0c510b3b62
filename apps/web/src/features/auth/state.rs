//! Session state and context for the frontend. The provider restores the
//! session once on mount from the stored credential and exposes the phase as
//! a signal for guards and routes. Only non-sensitive profile data is held in
//! memory; the credential stays in its store.

use crate::app_lib::{ApiClient, config::AppConfig};
use crate::components::use_toasts;
use crate::features::auth::gateway::WebAuthGateway;
use crate::features::auth::storage::{BrowserCredentialStore, BrowserProfileStore};
use crate::features::books::state::use_books;
use identity::{CredentialStore, MemoryCredentialStore, MemoryProfileStore, ProfileStore, User};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::{LANDING_ROUTE, SIGN_IN_ROUTE, SessionController, SessionEvent, SessionPhase};
use std::rc::Rc;

#[derive(Clone, Copy)]
/// Session context shared through Leptos. The controller itself lives in the
/// reactive arena so every field is a plain handle.
pub struct AuthContext {
    controller: StoredValue<SessionController<WebAuthGateway>, LocalStorage>,
    pub phase: RwSignal<SessionPhase>,
    pub is_authenticated: Signal<bool>,
    pub user: Signal<Option<User>>,
}

impl AuthContext {
    /// Builds a context around the controller, mirroring its phase into a
    /// signal.
    fn new(controller: SessionController<WebAuthGateway>) -> Self {
        let phase = RwSignal::new(controller.phase());
        controller.on_phase_change(move |next| phase.set(next.clone()));

        let is_authenticated = Signal::derive(move || phase.get().is_authenticated());
        let user = Signal::derive(move || phase.get().user().cloned());

        Self {
            controller: StoredValue::new_local(controller),
            phase,
            is_authenticated,
            user,
        }
    }

    /// Clone of the controller for dispatching session operations.
    pub fn controller(&self) -> SessionController<WebAuthGateway> {
        self.controller.get_value()
    }
}

/// Provides the session context and restores the session once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let config = AppConfig::load();
    let credentials: Rc<dyn CredentialStore> = Rc::new(BrowserCredentialStore);
    let profile: Rc<dyn ProfileStore> = Rc::new(BrowserProfileStore);
    let api = Rc::new(ApiClient::new(&config, Rc::clone(&credentials)));

    let controller = SessionController::new(
        Rc::new(WebAuthGateway::new(Rc::clone(&api))),
        credentials,
        profile,
    );
    controller.initialize();

    let teardown = controller.clone();
    api.set_unauthorized_handler(Rc::new(move || teardown.expire_session()));

    provide_context(Rc::clone(&api));
    provide_context(AuthContext::new(controller));

    view! { {children()} }
}

/// Reacts to session events with navigation, cache teardown, and notices.
/// Mount exactly once, inside the router.
#[component]
pub fn SessionEffects() -> impl IntoView {
    let auth = use_auth();
    let books = use_books();
    let toasts = use_toasts();
    let navigate = use_navigate();

    auth.controller().on_event(move |event| match event {
        SessionEvent::SignedIn => {
            navigate(LANDING_ROUTE, Default::default());
        }
        SessionEvent::SignedOut => {
            books.clear();
            navigate(SIGN_IN_ROUTE, Default::default());
        }
        SessionEvent::SessionExpired => {
            books.clear();
            toasts.error("Your session has expired. Please sign in again.");
            navigate(SIGN_IN_ROUTE, Default::default());
        }
        SessionEvent::ProfileUpdated => {
            toasts.success("Your profile has been updated successfully.");
        }
    });
}

/// Returns the current session context or a detached fallback.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(detached_context)
}

fn detached_context() -> AuthContext {
    let config = AppConfig::load();
    let credentials: Rc<dyn CredentialStore> = Rc::new(MemoryCredentialStore::default());
    let profile: Rc<dyn ProfileStore> = Rc::new(MemoryProfileStore::default());
    let api = Rc::new(ApiClient::new(&config, Rc::clone(&credentials)));

    AuthContext::new(SessionController::new(
        Rc::new(WebAuthGateway::new(api)),
        credentials,
        profile,
    ))
}
