use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{extractor::json::ApiJson, state::ApiState, types::book::Book};

#[derive(Debug)]
pub struct CreateBookResponse(pub Book);

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Creates a new book.
///
/// The book is appended as is. Nothing is validated, an ISBN already in
/// the library is stored again.
#[utoipa::path(
    post,
    path = "/biblioteca",
    tag = "Libros",
    request_body = Book,
    responses(
        (status = 201, description = "Libro creado exitosamente", body = Book),
        (status = 400, description = "El cuerpo de la solicitud no es válido"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_book(
    State(state): State<ApiState>,
    ApiJson(book): ApiJson<Book>,
) -> CreateBookResponse {
    let mut books = state.books().write().await;

    books.append(book);

    let created = books.all().last().cloned().unwrap_or_default();

    tracing::debug!(isbn = ?created.isbn, count = books.len(), "Book created");

    CreateBookResponse(created)
}
