use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::trace::TraceLayer;

use super::books;
use super::greeting;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Greeting
        .route("/greeting", get(greeting::greeting))
        // Cached book lookups
        .route("/books/{isbn}", get(books::get_book))
        // Book cache administration
        .route("/cache/books", delete(books::evict_all_books))
        .route("/cache/books/stats", get(books::cache_stats))
        .route("/cache/books/{isbn}", delete(books::evict_book))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::domain::book::mock::CountingBookRepository;
    use crate::infrastructure::book::CachedBookRepository;

    fn test_state() -> (AppState, Arc<CachedBookRepository<CountingBookRepository>>) {
        let books = Arc::new(CachedBookRepository::new(CountingBookRepository::new(
            "Some book",
        )));
        (AppState::new(books.clone()), books)
    }

    async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    #[tokio::test]
    async fn test_greeting_defaults_to_world_and_counts_from_one() {
        let (state, _) = test_state();
        let router = create_router(state);

        let (status, body) = send(&router, Method::GET, "/greeting").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["content"], "Hello, World!");

        let (_, body) = send(&router, Method::GET, "/greeting?name=User").await;
        assert_eq!(body["id"], 2);
        assert_eq!(body["content"], "Hello, User!");

        let (_, body) = send(&router, Method::GET, "/greeting?name=").await;
        assert_eq!(body["id"], 3);
        assert_eq!(body["content"], "Hello, World!");
    }

    #[tokio::test]
    async fn test_get_book_goes_through_cache() {
        let (state, books) = test_state();
        let router = create_router(state);

        let (status, body) = send(&router, Method::GET, "/books/isbn-1234").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isbn"], "isbn-1234");
        assert_eq!(body["title"], "Some book");

        let (status, _) = send(&router, Method::GET, "/books/isbn-1234").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(books.inner().call_count(), 1);

        let (_, stats) = send(&router, Method::GET, "/cache/books/stats").await;
        assert_eq!(stats["name"], "books");
        assert_eq!(stats["hits"], 1);
        assert_eq!(stats["loads"], 1);
        assert_eq!(stats["entries"], 1);
    }

    #[tokio::test]
    async fn test_blank_isbn_is_rejected() {
        let (state, books) = test_state();
        let router = create_router(state);

        let (status, body) = send(&router, Method::GET, "/books/%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["param"], "isbn");
        assert_eq!(body["error"]["code"], "invalid_value");
        assert_eq!(books.inner().call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_lookup_maps_to_unavailable() {
        let books = Arc::new(CachedBookRepository::new(
            CountingBookRepository::new("Some book").failing_times(1),
        ));
        let router = create_router(AppState::new(books.clone()));

        let (status, body) = send(&router, Method::GET, "/books/isbn-1").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["type"], "service_unavailable_error");
        assert_eq!(body["error"]["code"], "lookup_failed");

        let (status, _) = send(&router, Method::GET, "/books/isbn-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(books.inner().call_count(), 2);
    }

    #[tokio::test]
    async fn test_evict_book() {
        let (state, books) = test_state();
        let router = create_router(state);

        send(&router, Method::GET, "/books/isbn-1").await;

        let (status, body) = send(&router, Method::DELETE, "/cache/books/isbn-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isbn"], "isbn-1");
        assert_eq!(body["evicted"], true);

        let (_, body) = send(&router, Method::DELETE, "/cache/books/isbn-1").await;
        assert_eq!(body["evicted"], false);

        send(&router, Method::GET, "/books/isbn-1").await;
        assert_eq!(books.inner().call_count(), 2);
    }

    #[tokio::test]
    async fn test_evict_all_books() {
        let (state, _) = test_state();
        let router = create_router(state);

        send(&router, Method::GET, "/books/isbn-1").await;
        send(&router, Method::GET, "/books/isbn-2").await;

        let (status, _) = send(&router, Method::DELETE, "/cache/books").await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, stats) = send(&router, Method::GET, "/cache/books/stats").await;
        assert_eq!(stats["entries"], 0);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (state, _) = test_state();
        let router = create_router(state);

        let (status, body) = send(&router, Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&router, Method::GET, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cached_books"], 0);

        let (status, _) = send(&router, Method::GET, "/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let (state, _) = test_state();
        let router = create_router(state);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/live")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-42");
    }
}
