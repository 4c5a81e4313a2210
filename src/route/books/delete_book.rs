use axum::extract::State;

use crate::{
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider},
    extractor::path::ApiPath,
    state::ApiState,
    types::book::Book,
};

use super::BookResponse;

/// Removes the first book with the given ISBN and answers with it.
#[utoipa::path(
    delete,
    path = "/biblioteca/{isbn}",
    tag = "Libros",
    params(
        ("isbn" = String, Path, description = "ISBN del libro a eliminar"),
    ),
    responses(
        (status = 200, description = "Libro eliminado exitosamente", body = Book),
        (status = 404, description = "Libro no encontrado", body = String, content_type = "text/plain"),
    )
)]
#[tracing::instrument(skip_all, fields(%isbn))]
pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<BookResponse, ApiError> {
    let mut books = state.books().write().await;

    let removed = books
        .find_index(|book| book.has_isbn(&isbn))
        .and_then(|index| books.remove_at(index))
        .ok_or_else(|| {
            tracing::debug!("Book not found");

            BookNotFoundError::new(state.error_verbosity(), BookNotFoundError::DELETE_MESSAGE)
        })?;

    tracing::debug!("Book deleted");

    Ok(BookResponse(removed))
}
