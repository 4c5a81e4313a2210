use std::{ops::Deref, sync::Arc};

use tokio::sync::RwLock;

use crate::error::{ErrorVerbosity, ErrorVerbosityProvider};

pub mod books;

use books::BookStore;

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity) -> Self {
        Self::with_books(error_verbosity, BookStore::new())
    }

    pub fn with_books(error_verbosity: ErrorVerbosity, books: BookStore) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                books: RwLock::new(books),
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    books: RwLock<BookStore>,
}

impl ApiStateInner {
    /// The books held by the library.
    pub fn books(&self) -> &RwLock<BookStore> {
        &self.books
    }
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}
