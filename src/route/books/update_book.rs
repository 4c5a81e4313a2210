use axum::extract::State;

use crate::{
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider},
    extractor::{json::ApiJson, path::ApiPath},
    state::ApiState,
    types::book::{Book, BookChanges},
};

use super::BookResponse;

/// Replaces the title, author, price and URL of the first book with the given ISBN.
///
/// The ISBN itself is never changed. Fields missing from the body are cleared.
#[utoipa::path(
    put,
    path = "/biblioteca/{isbn}",
    tag = "Libros",
    params(
        ("isbn" = String, Path, description = "ISBN del libro a actualizar"),
    ),
    request_body = BookChanges,
    responses(
        (status = 200, description = "Libro actualizado exitosamente", body = Book),
        (status = 400, description = "El cuerpo de la solicitud no es válido"),
        (status = 404, description = "Libro no encontrado", body = String, content_type = "text/plain"),
    )
)]
#[tracing::instrument(skip_all, fields(%isbn))]
pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
    ApiJson(changes): ApiJson<BookChanges>,
) -> Result<BookResponse, ApiError> {
    let mut books = state.books().write().await;

    let book = books
        .find_first_mut(|book| book.has_isbn(&isbn))
        .ok_or_else(|| {
            tracing::debug!("Book not found");

            BookNotFoundError::new(state.error_verbosity(), BookNotFoundError::LOOKUP_MESSAGE)
        })?;

    book.apply(changes);

    tracing::debug!("Book updated");

    Ok(BookResponse(book.clone()))
}
