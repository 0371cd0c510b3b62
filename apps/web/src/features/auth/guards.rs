//! Route guards over the session phase. While the phase is unresolved they
//! render a spinner, and on denial they redirect and render nothing.

use crate::components::{Spinner, use_toasts};
use crate::features::auth::state::use_auth;
use identity::Role;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::{GateDecision, authentication_gate, role_gate};

/// Renders children only for signed-in users.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let phase = auth.phase;
    let decision = Signal::derive(move || authentication_gate(&phase.get()));

    guarded(decision, children)
}

/// Renders children only for admins. Signed-in non-admins are sent back to
/// the landing page with a notice.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let phase = auth.phase;
    let decision = Signal::derive(move || role_gate(&phase.get(), Role::Admin));

    guarded(decision, children)
}

// UX-only guard; real access control must live on the API.
fn guarded(decision: Signal<GateDecision>, children: ChildrenFn) -> impl IntoView {
    let navigate = use_navigate();
    let toasts = use_toasts();

    Effect::new(move |_| {
        if let GateDecision::Denied(denial) = decision.get() {
            if let Some(notice) = denial.notice {
                toasts.error(notice);
            }
            navigate(denial.redirect, Default::default());
        }
    });

    view! {
        {move || match decision.get() {
            GateDecision::Pending => {
                view! {
                    <div class="flex justify-center py-12">
                        <Spinner />
                    </div>
                }
                    .into_any()
            }
            GateDecision::Denied(_) => ().into_any(),
            GateDecision::Allowed => children().into_any(),
        }}
    }
}
