use crate::components::ToastProvider;
use crate::features::auth::state::{AuthProvider, SessionEffects};
use crate::features::books::state::BooksProvider;
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

/// Application root. Providers are ordered so the book store can reach the
/// API client the auth provider creates, and the session effects run inside
/// the router they navigate with.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <ToastProvider>
            <AuthProvider>
                <BooksProvider>
                    <Router>
                        <SessionEffects />
                        <AppRoutes />
                    </Router>
                </BooksProvider>
            </AuthProvider>
        </ToastProvider>
    }
}
