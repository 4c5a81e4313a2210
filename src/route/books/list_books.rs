use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{state::ApiState, types::book::Book};

#[derive(Debug)]
pub struct ListBooksResponse(pub Vec<Book>);

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Lists all books in creation order.
#[utoipa::path(
    get,
    path = "/biblioteca",
    tag = "Libros",
    responses(
        (status = 200, description = "Lista de libros", body = [Book]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_books(State(state): State<ApiState>) -> ListBooksResponse {
    let books = state.books().read().await.all().to_vec();

    tracing::debug!(count = books.len(), "Books listed");

    ListBooksResponse(books)
}
