use utoipa::{openapi::Server, OpenApi};

use crate::{
    route::books::{create_book, delete_book, get_book, list_books, update_book},
    types::book::{Book, BookChanges},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API de Biblioteca",
        version = "1.0.0",
        description = "API para gestionar libros en una biblioteca"
    ),
    servers((url = "http://localhost:3000")),
    paths(
        create_book::create_book,
        list_books::list_books,
        get_book::get_book,
        update_book::update_book,
        delete_book::delete_book,
    ),
    components(schemas(Book, BookChanges)),
    tags(
        (name = "Libros", description = "Gestión de libros de la biblioteca")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Builds the document, advertising `public_url` as the only server if given.
    pub fn with_public_url(public_url: Option<&str>) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();

        if let Some(url) = public_url {
            doc.servers = Some(vec![Server::new(url)]);
        }

        doc
    }
}
