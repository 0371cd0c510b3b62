//! Public landing page. It is intentionally static and does not expose any
//! session or catalog data.

use crate::components::AppShell;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

/// Renders the landing page with sign-in and registration entry points.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <AppShell>
            <section class="py-12 md:py-24">
                <div class="flex flex-col items-center space-y-4 text-center">
                    <h1 class="text-3xl font-bold tracking-tighter sm:text-4xl md:text-5xl">
                        "Book Management System"
                    </h1>
                    <p class="mx-auto max-w-[700px] text-gray-500 md:text-xl dark:text-gray-400">
                        "Manage your book collection with ease. Add, edit, and organize your books in one place."
                    </p>
                    <div class="flex gap-4">
                        <A
                            href=paths::LOGIN
                            {..}
                            class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800 transition-all"
                        >
                            "Login"
                        </A>
                        <A
                            href=paths::REGISTER
                            {..}
                            class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 dark:hover:bg-gray-700 transition-all"
                        >
                            "Register"
                        </A>
                    </div>
                </div>
            </section>
            <section class="py-12 border-t border-gray-100 dark:border-gray-800">
                <div class="grid gap-6 lg:grid-cols-3 text-center">
                    <div class="space-y-2">
                        <h3 class="text-xl font-bold">"Extensive Book Collection"</h3>
                        <p class="text-gray-500 dark:text-gray-400">
                            "Browse through the whole collection with covers and details."
                        </p>
                    </div>
                    <div class="space-y-2">
                        <h3 class="text-xl font-bold">"User-Friendly Interface"</h3>
                        <p class="text-gray-500 dark:text-gray-400">
                            "Intuitive design for easy navigation and management of your books."
                        </p>
                    </div>
                    <div class="space-y-2">
                        <h3 class="text-xl font-bold">"Secure Access"</h3>
                        <p class="text-gray-500 dark:text-gray-400">
                            "Your session and profile stay on your device; editing is reserved for admins."
                        </p>
                    </div>
                </div>
            </section>
        </AppShell>
    }
}
