//! Transient notification stack. Toasts auto-dismiss after a few seconds and
//! stack bottom-right; use them for outcomes of background work, not for
//! inline form errors.

use super::alert::AlertKind;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// How long a toast stays on screen (milliseconds).
const TOAST_DISMISS_MS: u32 = 3_000;

#[derive(Clone)]
struct Toast {
    id: u64,
    kind: AlertKind,
    message: String,
}

/// Toast queue shared through Leptos context.
#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastContext {
    fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Queues a toast and schedules its removal.
    pub fn show(&self, kind: AlertKind, message: impl Into<String>) {
        let id = self.next_id.get_untracked() + 1;
        self.next_id.set(id);

        let message = message.into();
        self.toasts
            .update(|toasts| toasts.push(Toast { id, kind, message }));

        let toasts = self.toasts;
        Timeout::new(TOAST_DISMISS_MS, move || {
            toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
        })
        .forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(AlertKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(AlertKind::Error, message);
    }
}

/// Provides the toast context and renders the stack above the app content.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let context = ToastContext::new();
    provide_context(context);

    view! {
        {children()}
        <div class="fixed bottom-4 right-4 z-50 flex w-80 flex-col gap-2">
            <For
                each=move || context.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    view! {
                        <div class=format!("{} shadow-lg", toast.kind.class()) role="status">
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Returns the current toast context or a detached fallback.
pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().unwrap_or_else(ToastContext::new)
}
