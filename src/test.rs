use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
    error::{BookNotFoundError, ErrorVerbosity},
    server::{Server, ServerConfig, OPENAPI_PATH},
};

fn server_config(error_verbosity: ErrorVerbosity) -> ServerConfig {
    let socket_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

    ServerConfig::new(socket_address, error_verbosity)
}

fn create_test_router() -> Router {
    Server::new(server_config(ErrorVerbosity::Full)).app()
}

struct TestResponse {
    status: StatusCode,
    content_type: Option<String>,
    location: Option<String>,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("Response body is not UTF-8")
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let request = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let header_value = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    };
    let content_type = header_value(header::CONTENT_TYPE);
    let location = header_value(header::LOCATION);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        content_type,
        location,
        body,
    }
}

fn sample_book(isbn: &str) -> Value {
    json!({
        "titulo": "Cien años de soledad",
        "autor": "Gabriel García Márquez",
        "isbn": isbn,
        "precio": 19.95,
        "url": "https://example.com/cien-anos.jpg",
    })
}

#[tokio::test]
async fn example_config_is_valid() {
    ServerConfig::from_config_file("config.example.yaml")
        .await
        .expect("Example config is not parsable");
}

#[tokio::test]
async fn missing_config_file_is_a_read_error() {
    let err = ServerConfig::from_config_file("does-not-exist.yaml")
        .await
        .unwrap_err();

    assert!(matches!(err, crate::server::ConfigError::Read(_)));
}

#[test]
fn config_optional_fields_default() {
    let config = ServerConfig::from_yaml(
        "socket_address: 0.0.0.0:8080\nerror_verbosity: StatusCode\n",
    )
    .unwrap();

    assert_eq!(config.socket_address().port(), 8080);
    assert_eq!(config.error_verbosity(), ErrorVerbosity::StatusCode);
}

#[tokio::test]
async fn create_responds_created_with_the_book() {
    let app = create_test_router();

    let response = send(&app, Method::POST, "/biblioteca", Some(sample_book("978-1"))).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json(), sample_book("978-1"));
}

#[tokio::test]
async fn create_responds_with_the_stored_book() {
    let app = create_test_router();

    send(&app, Method::POST, "/biblioteca", Some(sample_book("first"))).await;

    let created = send(&app, Method::POST, "/biblioteca", Some(sample_book("second"))).await;
    let listed = send(&app, Method::GET, "/biblioteca", None).await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(listed.json()[1], created.json());
}

#[tokio::test]
async fn created_book_is_fetched_by_isbn() {
    let app = create_test_router();

    send(&app, Method::POST, "/biblioteca", Some(sample_book("978-1"))).await;

    let response = send(&app, Method::GET, "/biblioteca/978-1", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), sample_book("978-1"));
}

#[tokio::test]
async fn create_accepts_missing_fields() {
    let app = create_test_router();

    let response = send(&app, Method::POST, "/biblioteca", Some(json!({ "isbn": "1" }))).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json(), json!({ "isbn": "1" }));

    let response = send(&app, Method::GET, "/biblioteca", None).await;

    assert_eq!(response.json(), json!([{ "isbn": "1" }]));
}

#[tokio::test]
async fn get_unknown_isbn_is_not_found() {
    let app = create_test_router();

    let response = send(&app, Method::GET, "/biblioteca/unknown", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.text(), BookNotFoundError::LOOKUP_MESSAGE);
    assert!(response
        .content_type
        .as_deref()
        .is_some_and(|content_type| content_type.starts_with("text/plain")));
}

#[tokio::test]
async fn get_with_duplicated_isbn_returns_first_created() {
    let app = create_test_router();

    let mut second = sample_book("dup");
    second["titulo"] = json!("Otro libro");

    send(&app, Method::POST, "/biblioteca", Some(sample_book("dup"))).await;
    send(&app, Method::POST, "/biblioteca", Some(second)).await;

    let response = send(&app, Method::GET, "/biblioteca/dup", None).await;

    assert_eq!(response.json(), sample_book("dup"));
}

#[tokio::test]
async fn list_returns_books_in_creation_order() {
    let app = create_test_router();

    let isbns: Vec<String> = (0..5).map(|i| format!("isbn-{i}")).collect();

    for isbn in &isbns {
        let response = send(&app, Method::POST, "/biblioteca", Some(sample_book(isbn))).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = send(&app, Method::GET, "/biblioteca", None).await;

    assert_eq!(response.status, StatusCode::OK);

    let expected: Vec<Value> = isbns.iter().map(|isbn| sample_book(isbn)).collect();
    assert_eq!(response.json(), Value::Array(expected));
}

#[tokio::test]
async fn list_of_empty_library_is_empty() {
    let app = create_test_router();

    let response = send(&app, Method::GET, "/biblioteca", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn update_unknown_isbn_is_not_found() {
    let app = create_test_router();

    let response = send(
        &app,
        Method::PUT,
        "/biblioteca/unknown",
        Some(json!({ "titulo": "Nada" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.text(), BookNotFoundError::LOOKUP_MESSAGE);
}

#[tokio::test]
async fn update_overwrites_fields_and_keeps_isbn() {
    let app = create_test_router();

    send(&app, Method::POST, "/biblioteca", Some(sample_book("978-1"))).await;

    let changes = json!({
        "titulo": "El otoño del patriarca",
        "isbn": "978-2",
        "precio": 12.5,
    });

    let response = send(&app, Method::PUT, "/biblioteca/978-1", Some(changes)).await;

    let expected = json!({
        "titulo": "El otoño del patriarca",
        "isbn": "978-1",
        "precio": 12.5,
    });

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), expected);

    let response = send(&app, Method::GET, "/biblioteca/978-1", None).await;
    assert_eq!(response.json(), expected);

    let response = send(&app, Method::GET, "/biblioteca/978-2", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_book_once() {
    let app = create_test_router();

    send(&app, Method::POST, "/biblioteca", Some(sample_book("keep"))).await;
    send(&app, Method::POST, "/biblioteca", Some(sample_book("drop"))).await;

    let response = send(&app, Method::DELETE, "/biblioteca/drop", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), sample_book("drop"));

    let response = send(&app, Method::DELETE, "/biblioteca/drop", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.text(), BookNotFoundError::DELETE_MESSAGE);

    let response = send(&app, Method::GET, "/biblioteca", None).await;

    assert_eq!(response.json(), json!([sample_book("keep")]));
}

#[tokio::test]
async fn malformed_body_is_a_body_error() {
    let app = create_test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/biblioteca")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["error_type"], "Body");
    assert!(body["error"]["body_expected_schema"].is_string());

    let response = send(&app, Method::GET, "/biblioteca", None).await;
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn wrong_type_in_body_is_a_body_error() {
    let app = create_test_router();

    let response = send(
        &app,
        Method::POST,
        "/biblioteca",
        Some(json!({ "isbn": "1", "precio": "caro" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error_type"], "Body");
}

#[tokio::test]
async fn wrong_method_is_method_not_allowed() {
    let app = create_test_router();

    let response = send(&app, Method::PATCH, "/biblioteca", None).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.json()["error_type"], "MethodNotAllowed");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = create_test_router();

    let response = send(&app, Method::GET, "/libros", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let body = response.json();
    assert_eq!(body["error_type"], "NotFound");
    assert_eq!(body["message"], "The requested resource was not found");
}

#[tokio::test]
async fn status_code_verbosity_hides_book_not_found_message() {
    let app = Server::new(server_config(ErrorVerbosity::StatusCode)).app();

    let response = send(&app, Method::DELETE, "/biblioteca/unknown", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn none_verbosity_book_not_found_is_still_404() {
    let app = Server::new(server_config(ErrorVerbosity::None)).app();

    for method in [Method::GET, Method::DELETE] {
        let response = send(&app, method, "/biblioteca/unknown", None).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(response.body.is_empty());
    }

    let response = send(
        &app,
        Method::PUT,
        "/biblioteca/unknown",
        Some(json!({ "titulo": "Nada" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn none_verbosity_mutes_other_errors() {
    let app = Server::new(server_config(ErrorVerbosity::None)).app();

    let response = send(&app, Method::GET, "/libros", None).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn message_verbosity_hides_error_type() {
    let app = Server::new(server_config(ErrorVerbosity::Message)).app();

    let response = send(&app, Method::GET, "/libros", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json(),
        json!({ "message": "The requested resource was not found" })
    );
}

#[tokio::test]
async fn tracing_middlewares_keep_responses_intact() {
    let config = server_config(ErrorVerbosity::Full)
        .with_trace_headers(true)
        .with_trace_response_body(true);
    let app = Server::new(config).app();

    let response = send(&app, Method::POST, "/biblioteca", Some(sample_book("1"))).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json(), sample_book("1"));
}

#[tokio::test]
async fn openapi_document_describes_the_library() {
    let app = create_test_router();

    let response = send(&app, Method::GET, OPENAPI_PATH, None).await;

    assert_eq!(response.status, StatusCode::OK);

    let doc = response.json();

    assert_eq!(doc["info"]["title"], "API de Biblioteca");
    assert_eq!(doc["servers"][0]["url"], "http://localhost:3000");

    let collection = &doc["paths"]["/biblioteca"];
    assert!(collection["get"].is_object());
    assert!(collection["post"].is_object());

    let item = &doc["paths"]["/biblioteca/{isbn}"];
    assert!(item["get"].is_object());
    assert!(item["put"].is_object());
    assert!(item["delete"].is_object());

    assert!(doc["components"]["schemas"]["Book"].is_object());
    assert!(doc["components"]["schemas"]["BookChanges"].is_object());
}

#[tokio::test]
async fn openapi_document_advertises_public_url() {
    let config = server_config(ErrorVerbosity::Full).with_public_url("https://libros.example.com");
    let app = Server::new(config).app();

    let response = send(&app, Method::GET, OPENAPI_PATH, None).await;

    let doc = response.json();
    assert_eq!(doc["servers"][0]["url"], "https://libros.example.com");
    assert_eq!(doc["servers"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn swagger_ui_is_served_on_api_docs() {
    let app = create_test_router();

    let response = send(&app, Method::GET, "/api-docs", None).await;

    assert!(response.status.is_redirection());
    assert_eq!(response.location.as_deref(), Some("/api-docs/"));

    let response = send(&app, Method::GET, "/api-docs/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .content_type
        .as_deref()
        .is_some_and(|content_type| content_type.starts_with("text/html")));
    assert!(response.text().contains("<html"));
}

#[tokio::test]
async fn redoc_is_served() {
    let app = create_test_router();

    let response = send(&app, Method::GET, "/redoc", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("<html"));
}

#[test]
fn cli_describes_the_library_and_reads_config_file() {
    use clap::{CommandFactory, Parser};

    use crate::cli_args::CliArgs;

    let about = CliArgs::command()
        .get_about()
        .map(ToString::to_string)
        .unwrap_or_default();
    assert!(about.contains("library of books"));

    let args = CliArgs::try_parse_from(["server", "--config-file", "other.yaml"]).unwrap();
    assert_eq!(args.config_file, "other.yaml");
}
