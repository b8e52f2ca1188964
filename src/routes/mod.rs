//! Router assembly: HTTP endpoints, static page shell, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - form and session API under `/api/v1/...`
/// - static page shell from `./static` with index fallback
/// - CORS (allow any origin/method/headers); adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/api/v1/health", get(http::http_health))
        // Form specifications
        .route("/api/v1/forms", get(http::http_list_forms))
        .route("/api/v1/forms/:form", get(http::http_get_form))
        .route("/api/v1/forms/:form/sessions", post(http::http_open_session))
        // Form sessions (one per mounted page)
        .route(
            "/api/v1/sessions/:id",
            get(http::http_get_session)
                .patch(http::http_update_fields)
                .delete(http::http_close_session),
        )
        .route("/api/v1/sessions/:id/reload", post(http::http_reload_session))
        .route("/api/v1/sessions/:id/submit", post(http::http_submit_session))
        .route("/api/v1/score-band", get(http::http_score_band))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Page shell fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Settings;
    use crate::testing::FakeAdminApi;

    fn router(api: Arc<FakeAdminApi>) -> Router {
        build_router(Arc::new(AppState::with_api(api, Settings::default())))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    #[tokio::test]
    async fn health_and_form_listing() {
        let app = router(Arc::new(FakeAdminApi::new()));
        let (status, body) = call(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));

        let (status, body) = call(&app, Method::GET, "/api/v1/forms", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn form_spec_describes_fields_for_a_renderer() {
        let app = router(Arc::new(FakeAdminApi::new()));
        let (status, body) = call(&app, Method::GET, "/api/v1/forms/guided-observations", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resource"], json!("/api/admin/guided-observations"));
        let fields = body["fields"].as_array().unwrap();
        let zone = fields.iter().find(|f| f["name"] == json!("zoneAObservations")).unwrap();
        assert_eq!(zone["type"], json!("choices"));
        assert_eq!(zone["required"], json!(true));
        assert!(zone["options"].as_array().unwrap().contains(&json!("Focused")));
        assert_eq!(body["refinements"][0]["attachTo"], json!("linguisticModerate"));

        let (status, _) = call(&app, Method::GET, "/api/v1/forms/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn session_lifecycle_over_http() {
        let api = Arc::new(FakeAdminApi::new());
        let app = router(api.clone());

        let (status, opened) = call(
            &app,
            Method::POST,
            "/api/v1/forms/ks2-interview-questions/sessions",
            Some(json!({"applicationId": "app-9"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(opened["values"]["fullName"], json!(""));
        assert_eq!(opened["submitting"], json!(false));
        let id = opened["sessionId"].as_str().unwrap().to_string();

        // Empty form: inline errors, nothing posted upstream.
        let (status, body) = call(&app, Method::POST, &format!("/api/v1/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["fullName"], json!("This field is required"));
        assert!(api.posts().is_empty());

        let mut fields = json!({"fullName": "Noor", "age": "9", "totalScore": "45"});
        for i in 1..=12 {
            fields[format!("q{i}Score")] = json!("4");
        }
        let (status, body) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/sessions/{id}"),
            Some(json!({ "fields": fields })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["errors"].as_object().unwrap().is_empty());
        assert_eq!(body["scoreBand"]["label"], json!("Strong Fit"));

        let (status, body) = call(&app, Method::POST, &format!("/api/v1/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["redirect"], json!("/admin/applications/app-9"));
        assert_eq!(api.posts().len(), 1);

        let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bad_field_updates_are_rejected() {
        let app = router(Arc::new(FakeAdminApi::new()));
        let (_, opened) = call(
            &app,
            Method::POST,
            "/api/v1/forms/peer-dynamic-observation/sessions",
            Some(json!({"applicationId": "app-1"})),
        )
        .await;
        let id = opened["sessionId"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/sessions/{id}"),
            Some(json!({"fields": {"rolesObserved": true}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("rolesObserved"));

        let (status, _) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/sessions/{id}"),
            Some(json!({"fields": {"shoeSize": "12"}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_bad_gateway_with_message() {
        let api = Arc::new(FakeAdminApi::new().with_save_error());
        let app = router(api);
        let (_, opened) = call(
            &app,
            Method::POST,
            "/api/v1/forms/ks1-interview-questions/sessions",
            Some(json!({"applicationId": "app-2"})),
        )
        .await;
        let id = opened["sessionId"].as_str().unwrap().to_string();
        let mut fields = json!({"fullName": "Aisha", "age": "6", "parentalInterferenceFlagged": false});
        for i in 1..=14 {
            fields[format!("q{i}Score")] = json!("3");
        }
        call(&app, Method::PATCH, &format!("/api/v1/sessions/{id}"), Some(json!({ "fields": fields }))).await;

        let (status, body) = call(&app, Method::POST, &format!("/api/v1/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], json!(Settings::default().messages.network_error));

        let (_, snap) = call(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(snap["values"]["fullName"], json!("Aisha"));
    }

    #[tokio::test]
    async fn blank_application_id_is_a_bad_request() {
        let app = router(Arc::new(FakeAdminApi::new()));
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/forms/ks1-interview-questions/sessions",
            Some(json!({"applicationId": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn score_band_endpoint() {
        let app = router(Arc::new(FakeAdminApi::new()));
        let (status, body) = call(&app, Method::GET, "/api/v1/score-band?form=ks2-interview-questions&total=44", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["band"]["label"], json!("Good Fit"));
        assert_eq!(body["band"]["recommendedAction"], json!("Proceed; note areas for early support."));

        let (_, body) = call(&app, Method::GET, "/api/v1/score-band?form=ks2-interview-questions&total=abc", None).await;
        assert_eq!(body["band"], Value::Null);
    }
}
