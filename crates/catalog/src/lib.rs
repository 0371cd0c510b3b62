//! The book catalog: API types, the gateway port, and a cached store that
//! keeps the list and detail views consistent across mutations.

mod gateway;
mod store;
mod types;
pub mod validate;

pub use gateway::{BookDraft, BookPatch, BooksGateway};
pub use store::BookStore;
pub use types::Book;
