//! Book catalog routes: browse, detail, and the admin-only create and
//! edit forms.

mod detail;
mod edit;
mod list;
mod new;

pub(crate) use detail::BookDetailPage;
pub(crate) use edit::BookEditPage;
pub(crate) use list::BooksListPage;
pub(crate) use new::BookNewPage;
