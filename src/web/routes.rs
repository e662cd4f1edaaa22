//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public_dir = state.settings.server.public_dir.clone();
    let static_files =
        ServeDir::new(&public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    let api = Router::new()
        .route("/", get(handlers::api_info))
        // Search
        .route("/search", get(handlers::search))
        .route("/search/advanced", get(handlers::search_advanced))
        // Profile
        .route(
            "/profile",
            get(handlers::get_profile)
                .post(handlers::create_profile)
                .put(handlers::update_profile),
        )
        .route("/profile/skills", post(handlers::set_profile_skills))
        // Projects
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/projects/:id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        // Skills
        .route(
            "/skills",
            get(handlers::list_skills).post(handlers::create_skill),
        )
        .route("/skills/top", get(handlers::top_skills))
        .route(
            "/skills/:id",
            get(handlers::get_skill)
                .put(handlers::update_skill)
                .delete(handlers::delete_skill),
        )
        // Work experience
        .route("/work", get(handlers::list_work).post(handlers::create_work))
        .route(
            "/work/:id",
            get(handlers::get_work)
                .put(handlers::update_work)
                .delete(handlers::delete_work),
        )
        .fallback(handlers::api_not_found);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        // Frontend
        .fallback_service(static_files)
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::db::Database;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        db: Database,
        _public: tempfile::TempDir,
    }

    impl TestApp {
        async fn new() -> Self {
            let public = tempfile::tempdir().unwrap();
            std::fs::write(public.path().join("index.html"), "<h1>Portfolio</h1>").unwrap();

            let mut settings = Settings::default();
            settings.server.public_dir = public.path().to_path_buf();

            let db = Database::open_in_memory().unwrap();
            db.migrate().await.unwrap();
            let router = create_router(AppState::new(settings, db.clone()));

            Self {
                router,
                db,
                _public: public,
            }
        }

        async fn seeded() -> Self {
            let app = Self::new().await;
            app.db.seed().await.unwrap();
            app
        }

        async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
            let mut request = Request::builder().method(method).uri(uri);
            let body = match body {
                Some(value) => {
                    request = request.header("content-type", "application/json");
                    Body::from(value.to_string())
                }
                None => Body::empty(),
            };
            let response = self
                .router
                .clone()
                .oneshot(request.body(body).unwrap())
                .await
                .unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, bytes.to_vec())
        }

        async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let (status, bytes) = self.send(method, uri, body).await;
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.json(Method::GET, uri, None).await
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["version"], crate::VERSION);
        assert!(body["uptime"].is_number());
    }

    #[tokio::test]
    async fn test_api_info_and_unknown_endpoint() {
        let app = TestApp::new().await;

        let (status, body) = app.get("/api").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["search"], "/api/search");

        let (status, body) = app.get("/api/nothing/here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Endpoint not found" }));
    }

    #[tokio::test]
    async fn test_frontend_fallback() {
        let app = TestApp::new().await;
        let (status, body) = app.send(Method::GET, "/projects/view", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>Portfolio</h1>");
    }

    #[tokio::test]
    async fn test_search_rejects_short_query() {
        let app = TestApp::new().await;

        for uri in ["/api/search", "/api/search?q=%20a%20", "/api/search/advanced?q=x&type=skill"] {
            let (status, body) = app.get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(
                body,
                json!({ "error": "Search query must be at least 2 characters long" })
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_requests_get_json_errors() {
        let app = TestApp::new().await;

        let (status, body) = app.get("/api/projects/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("abc"));

        let (status, body) = app.get("/api/skills/top?limit=ten").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = app
            .json(Method::POST, "/api/skills", Some(json!({ "name": 5 })))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_search_over_sample_data() {
        let app = TestApp::seeded().await;

        let (status, body) = app.get("/api/search?q=John").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "John");
        assert_eq!(body["results"][0]["type"], "profile");
        assert_eq!(body["results"][0]["title"], "John Doe");
        assert!(body["results"][0].get("relevance").is_none());
        assert_eq!(
            body["total_results"].as_u64().unwrap() as usize,
            body["results"].as_array().unwrap().len()
        );
    }

    #[tokio::test]
    async fn test_advanced_search_echoes_filters() {
        let app = TestApp::seeded().await;

        let (status, body) = app
            .get("/api/search/advanced?q=script&type=skill&category=Programming")
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "skill");
        assert_eq!(body["category"], "Programming");
        assert_eq!(body["skill"], "all");
        let results = body["results"].as_array().unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r["category"] == "Programming"));

        let (_, body) = app.get("/api/search/advanced?q=weather&type=project&skill=React").await;
        assert_eq!(body["skill"], "React");
        assert_eq!(body["results"][0]["title"], "Weather Dashboard");
    }

    #[tokio::test]
    async fn test_search_source_failure_is_generic_500() {
        let app = TestApp::new().await;
        app.db
            .call(|conn| Ok(conn.execute_batch("DROP TABLE work_experience")?))
            .await
            .unwrap();

        let (status, body) = app.get("/api/search?q=anything").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to perform search" }));

        let (status, body) = app.get("/api/search/advanced?q=anything").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to perform advanced search" }));
    }

    #[tokio::test]
    async fn test_profile_lifecycle() {
        let app = TestApp::new().await;

        let (status, body) = app.get("/api/profile").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Profile not found");

        let (status, body) = app
            .json(Method::POST, "/api/profile", Some(json!({ "name": "Jane" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name and email are required");

        let profile = json!({ "name": "Jane", "email": "jane@example.com" });
        let (status, _) = app.json(Method::POST, "/api/profile", Some(profile.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app.json(Method::POST, "/api/profile", Some(profile)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Profile already exists");

        let (status, body) = app
            .json(Method::POST, "/api/profile/skills", Some(json!({ "skill_ids": [] })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Skill IDs array is required");
    }

    #[tokio::test]
    async fn test_skill_crud() {
        let app = TestApp::new().await;

        let (status, created) = app
            .json(Method::POST, "/api/skills", Some(json!({ "name": "Rust", "category": "Programming" })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["proficiency_level"], "intermediate");

        let (status, body) = app
            .json(Method::POST, "/api/skills", Some(json!({ "name": "Rust" })))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Skill already exists");

        let id = created["id"].as_i64().unwrap();
        let (status, body) = app.get(&format!("/api/skills/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["projects"], json!([]));

        let (status, body) = app.get("/api/skills/top?limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["project_count"], 0);

        let (status, _) = app.json(Method::DELETE, &format!("/api/skills/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = app.json(Method::DELETE, &format!("/api/skills/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Skill not found");
    }

    #[tokio::test]
    async fn test_project_with_unknown_skill_is_bad_request() {
        let app = TestApp::new().await;
        let (status, body) = app
            .json(
                Method::POST,
                "/api/projects",
                Some(json!({ "title": "CLI", "description": "A tool", "skill_ids": [42] })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown skill id: 42");
    }

    #[tokio::test]
    async fn test_project_listing_filters_by_skill() {
        let app = TestApp::seeded().await;

        let (status, all) = app.get("/api/projects").await;
        assert_eq!(status, StatusCode::OK);
        let (_, react) = app.get("/api/projects?skill=react").await;

        let all = all.as_array().unwrap();
        let react = react.as_array().unwrap();
        assert!(!react.is_empty());
        assert!(react.len() < all.len());
        for project in react {
            let skills = project["skills"].as_array().unwrap();
            assert!(skills.iter().any(|s| s.as_str().unwrap().contains("React")));
        }
    }

    #[tokio::test]
    async fn test_work_crud() {
        let app = TestApp::new().await;

        let (status, body) = app
            .json(Method::POST, "/api/work", Some(json!({ "company": "Acme" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Company and position are required");

        let (status, created) = app
            .json(
                Method::POST,
                "/api/work",
                Some(json!({ "company": "Acme", "position": "Engineer", "start_date": "2021-04-01" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["start_date"], "2021-04-01");

        let id = created["id"].as_i64().unwrap();
        let (status, updated) = app
            .json(
                Method::PUT,
                &format!("/api/work/{}", id),
                Some(json!({ "company": "Acme", "position": "Lead", "current_job": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["position"], "Lead");
        assert_eq!(updated["current_job"], true);

        let (status, _) = app.get("/api/work/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
