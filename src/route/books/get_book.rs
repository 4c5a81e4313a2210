use axum::extract::State;

use crate::{
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider},
    extractor::path::ApiPath,
    state::ApiState,
    types::book::Book,
};

use super::BookResponse;

/// Gets the first book with the given ISBN.
#[utoipa::path(
    get,
    path = "/biblioteca/{isbn}",
    tag = "Libros",
    params(
        ("isbn" = String, Path, description = "ISBN del libro"),
    ),
    responses(
        (status = 200, description = "Detalles del libro", body = Book),
        (status = 404, description = "Libro no encontrado", body = String, content_type = "text/plain"),
    )
)]
#[tracing::instrument(skip_all, fields(%isbn))]
pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<BookResponse, ApiError> {
    let books = state.books().read().await;

    let book = books.find_first(|book| book.has_isbn(&isbn)).ok_or_else(|| {
        tracing::debug!("Book not found");

        BookNotFoundError::new(state.error_verbosity(), BookNotFoundError::LOOKUP_MESSAGE)
    })?;

    Ok(BookResponse(book.clone()))
}
