//! API Routes
//!
//! Configures the Axum router with all cohort and student endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::cohorts::{create_cohort, delete_cohort, get_cohort, list_cohorts, update_cohort};
use super::handlers::{health_handler, AppState};
use super::students::{
    create_student, delete_student, get_student, list_cohort_students, list_students,
    update_student,
};
use crate::config::Config;

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/cohorts", get(list_cohorts).post(create_cohort))
        .route(
            "/api/cohorts/:id",
            get(get_cohort).put(update_cohort).delete(delete_cohort),
        )
        .route("/api/students", get(list_students).post(create_student))
        .route(
            "/api/students/cohort/:cohortId",
            get(list_cohort_students),
        )
        .route(
            "/api/students/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/health", get(health_handler))
}

fn with_middleware(router: Router<AppState>) -> Router<AppState> {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router.layer(cors).layer(TraceLayer::new_for_http())
}

/// Creates the API router.
///
/// # Endpoints
/// - `GET|POST /api/cohorts`
/// - `GET|PUT|DELETE /api/cohorts/:id`
/// - `GET|POST /api/students`
/// - `GET /api/students/cohort/:cohortId`
/// - `GET|PUT|DELETE /api/students/:id`
/// - `GET /health`
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    with_middleware(api_routes()).with_state(state)
}

/// Creates the full application: the API plus the docs page at `/docs`
/// and static files from the public directory for everything else.
pub fn create_app(state: AppState, config: &Config) -> Router {
    let router = api_routes()
        .route_service("/docs", ServeFile::new(&config.docs_page))
        .fallback_service(ServeDir::new(&config.public_dir));

    with_middleware(router).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Database, StoreConfig};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    async fn test_state() -> AppState {
        let db = Database::connect(&StoreConfig::in_memory("test"))
            .await
            .unwrap();
        AppState::new(db)
    }

    async fn create_test_app() -> Router {
        create_router(test_state().await)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_endpoints() {
        for uri in ["/api/cohorts", "/api/students"] {
            let app = create_test_app().await;
            let response = app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        for uri in [
            "/api/cohorts/123",
            "/api/students/not-an-id",
            "/api/students/cohort/xyz",
        ] {
            let app = create_test_app().await;
            let response = app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_create_cohort_endpoint() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/cohorts")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"cohortName":"Web Dev Jan"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_docs_and_static_files() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        std::fs::create_dir_all(&public).unwrap();
        std::fs::write(public.join("hello.txt"), "hi").unwrap();
        let docs = dir.path().join("docs.html");
        std::fs::write(&docs, "<h1>Docs</h1>").unwrap();

        let config = Config {
            public_dir: public,
            docs_page: docs,
            ..Config::default()
        };
        let app = create_app(test_state().await, &config);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/hello.txt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/missing.txt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
