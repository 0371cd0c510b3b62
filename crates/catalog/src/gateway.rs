use session::GatewayError;

use crate::types::Book;

/// Fields for a new book. The cover is mandatory on creation; `A` is the
/// attachment type the gateway accepts, `web_sys::File` in the browser.
#[derive(Clone)]
pub struct BookDraft<A> {
    pub name: String,
    pub author: String,
    pub description: String,
    pub cover: A,
}

/// Fields for editing a book. Absent fields are left untouched by the API.
#[derive(Clone)]
pub struct BookPatch<A> {
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub cover: Option<A>,
}

impl<A> Default for BookPatch<A> {
    fn default() -> Self {
        Self {
            name: None,
            author: None,
            description: None,
            cover: None,
        }
    }
}

impl<A> BookPatch<A> {
    /// Whether any field is set.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.author.is_some()
            || self.description.is_some()
            || self.cover.is_some()
    }
}

/// What the book store needs from the API.
#[allow(async_fn_in_trait)]
pub trait BooksGateway {
    type Attachment;

    async fn list(&self) -> Result<Vec<Book>, GatewayError>;

    async fn fetch(&self, id: &str) -> Result<Book, GatewayError>;

    async fn create(&self, draft: &BookDraft<Self::Attachment>) -> Result<Book, GatewayError>;

    async fn update(
        &self,
        id: &str,
        patch: &BookPatch<Self::Attachment>,
    ) -> Result<Book, GatewayError>;

    async fn delete(&self, id: &str) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::BookPatch;

    #[test]
    fn an_empty_patch_has_no_changes() {
        let patch: BookPatch<()> = BookPatch::default();
        assert!(!patch.has_changes());
    }

    #[test]
    fn any_set_field_counts_as_a_change() {
        let renamed = BookPatch::<()> {
            name: Some("Ley Lines".to_string()),
            ..BookPatch::default()
        };
        assert!(renamed.has_changes());

        let recovered = BookPatch {
            cover: Some(()),
            ..BookPatch::default()
        };
        assert!(recovered.has_changes());
    }
}
