use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A book held by the library.
///
/// None of the fields are required. The ISBN is used as the lookup key,
/// but it is neither validated nor guaranteed to be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct Book {
    /// Title of the book.
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author of the book.
    #[serde(rename = "autor", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// ISBN of the book.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Price of the book.
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Reference or cover image URL of the book.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Book {
    pub fn has_isbn(&self, isbn: &str) -> bool {
        self.isbn.as_deref() == Some(isbn)
    }

    /// Overwrites every field but the ISBN.
    ///
    /// Fields missing from `changes` are cleared.
    pub fn apply(&mut self, changes: BookChanges) {
        let BookChanges {
            title,
            author,
            price,
            url,
        } = changes;

        self.title = title;
        self.author = author;
        self.price = price;
        self.url = url;
    }
}

/// Replacement fields of a book. The ISBN can not be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct BookChanges {
    /// Title of the book.
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author of the book.
    #[serde(rename = "autor", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Price of the book.
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Reference or cover image URL of the book.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
