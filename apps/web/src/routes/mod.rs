mod books;
mod dashboard;
mod home;
mod login;
mod not_found;
mod profile;
mod register;

pub(crate) use books::{BookDetailPage, BookEditPage, BookNewPage, BooksListPage};
pub(crate) use dashboard::DashboardPage;
pub(crate) use home::HomePage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::{NotFoundContent, NotFoundPage};
pub(crate) use profile::ProfilePage;
pub(crate) use register::RegisterPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

/// Date portion of an RFC 3339 timestamp, for display.
pub(crate) fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// Route paths, kept in one place so links and redirects stay in sync. The
/// sign-in and landing paths come from the session gates.
pub(crate) mod paths {
    pub(crate) const HOME: &str = "/";
    pub(crate) const LOGIN: &str = session::SIGN_IN_ROUTE;
    pub(crate) const REGISTER: &str = "/register";
    pub(crate) const DASHBOARD: &str = session::LANDING_ROUTE;
    pub(crate) const BOOKS: &str = "/dashboard/books";
    pub(crate) const BOOK_NEW: &str = "/dashboard/books/new";
    pub(crate) const PROFILE: &str = "/dashboard/profile";

    pub(crate) fn book_detail(id: &str) -> String {
        format!("{BOOKS}/{id}")
    }

    pub(crate) fn book_edit(id: &str) -> String {
        format!("{BOOKS}/{id}/edit")
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=HomePage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/register") view=RegisterPage />
            <Route path=path!("/dashboard") view=DashboardPage />
            <Route path=path!("/dashboard/books") view=BooksListPage />
            <Route path=path!("/dashboard/books/new") view=BookNewPage />
            <Route path=path!("/dashboard/books/:id") view=BookDetailPage />
            <Route path=path!("/dashboard/books/:id/edit") view=BookEditPage />
            <Route path=path!("/dashboard/profile") view=ProfilePage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
