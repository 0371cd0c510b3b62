use serde::{Deserialize, Serialize};

/// A book as the API returns it. Timestamps stay strings; nothing here does
/// date arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub author: String,
    pub description: String,
    /// Path of the cover image, served by the API.
    pub cover: String,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::Book;

    #[test]
    fn deserializes_the_api_shape() {
        let json = r#"{
            "id": "b-1",
            "name": "The Left Hand of Darkness",
            "author": "Ursula K. Le Guin",
            "description": "An envoy alone on a glacial planet.",
            "cover": "/books/cover/b-1.png",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-02-01T00:00:00Z"
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();

        assert_eq!(book.id, "b-1");
        assert_eq!(book.author, "Ursula K. Le Guin");
        assert_eq!(book.created_at, "2024-01-01T00:00:00Z");
        assert_eq!(book.updated_at, "2024-02-01T00:00:00Z");
    }
}
