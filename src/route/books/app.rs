use axum::{routing::get, Router};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .route(
            "/biblioteca",
            get(super::list_books::list_books).post(super::create_book::create_book),
        )
        .route(
            "/biblioteca/:isbn",
            get(super::get_book::get_book)
                .put(super::update_book::update_book)
                .delete(super::delete_book::delete_book),
        )
}
