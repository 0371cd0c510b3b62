//! Browser implementation of the books gateway. Every call carries the
//! stored credential; covers travel as multipart uploads under their
//! original filename.

use crate::app_lib::{ApiClient, append_field, append_file, new_form_data};
use catalog::{Book, BookDraft, BookPatch, BooksGateway};
use session::GatewayError;
use std::rc::Rc;

pub struct WebBooksGateway {
    api: Rc<ApiClient>,
}

impl WebBooksGateway {
    pub fn new(api: Rc<ApiClient>) -> Self {
        Self { api }
    }
}

impl BooksGateway for WebBooksGateway {
    type Attachment = web_sys::File;

    async fn list(&self) -> Result<Vec<Book>, GatewayError> {
        self.api.get_json_authorized("books").await
    }

    async fn fetch(&self, id: &str) -> Result<Book, GatewayError> {
        self.api.get_json_authorized(&format!("books/{id}")).await
    }

    async fn create(&self, draft: &BookDraft<web_sys::File>) -> Result<Book, GatewayError> {
        let form = new_form_data()?;
        append_field(&form, "name", &draft.name)?;
        append_field(&form, "author", &draft.author)?;
        append_field(&form, "description", &draft.description)?;
        append_file(&form, "cover", &draft.cover)?;

        self.api.post_multipart_authorized("books", &form).await
    }

    async fn update(
        &self,
        id: &str,
        patch: &BookPatch<web_sys::File>,
    ) -> Result<Book, GatewayError> {
        let form = new_form_data()?;
        if let Some(name) = &patch.name {
            append_field(&form, "name", name)?;
        }
        if let Some(author) = &patch.author {
            append_field(&form, "author", author)?;
        }
        if let Some(description) = &patch.description {
            append_field(&form, "description", description)?;
        }
        if let Some(cover) = &patch.cover {
            append_file(&form, "cover", cover)?;
        }

        self.api
            .put_multipart_authorized(&format!("books/{id}"), &form)
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.api.delete_authorized(&format!("books/{id}")).await
    }
}
