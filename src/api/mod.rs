//! HTTP surface.
//!
//! Axum router serving the rendered profile page, the JSON view model
//! behind it, and a health probe.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use self::state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::page::showcase_page))
        .route("/api/showcase", get(routes::page::showcase_json))
        .route("/health", get(routes::health::health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for read-only access. `"*"` allows any origin.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);

    if origin.trim() == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(origin.trim()) {
        Ok(value) => layer.allow_origin(AllowOrigin::exact(value)),
        Err(e) => {
            tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
            layer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::fallback::FallbackDataset;
    use crate::models::{OwnedGame, Profile};
    use crate::steam::{MockGateway, SteamGateway};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn test_state(gateway: MockGateway, configured: bool) -> AppState {
        AppState {
            gateway: Arc::new(gateway) as Arc<dyn SteamGateway>,
            fallback: Arc::new(FallbackDataset::embedded().unwrap()),
            page: Arc::new(PageConfig::default()),
            configured,
        }
    }

    fn live_gateway() -> MockGateway {
        MockGateway::new()
            .with_profile(Profile {
                persona_name: "Gabe".to_string(),
                profile_url: "https://steamcommunity.com/id/gabelogannewell/".to_string(),
                avatar_url: "https://avatars.steamstatic.com/g_full.jpg".to_string(),
                real_name: Some("Gabe Newell".to_string()),
                country_code: Some("US".to_string()),
            })
            .with_games(vec![
                OwnedGame::new(440, "Team Fortress 2", 6000),
                OwnedGame::new(70, "Half-Life", 120),
            ])
            .with_achievements(440, &["TF_PLAY_GAME_EVERYCLASS"])
    }

    async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get_text(app, uri).await;
        let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_page_fallback_mode() {
        let app = build_router(test_state(live_gateway(), false));
        let (status, html) = get_text(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Halo, saya fjr"));
        assert!(html.contains("Portal 2"));
        assert!(!html.contains("Team Fortress 2"));
    }

    #[tokio::test]
    async fn test_page_live_mode() {
        let app = build_router(test_state(live_gateway(), true));
        let (status, html) = get_text(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Halo, saya Gabe"));
        assert!(html.contains("Team Fortress 2"));
        assert!(html.contains("TF_PLAY_GAME_EVERYCLASS"));
        assert!(!html.contains("Portal 2"));
    }

    #[tokio::test]
    async fn test_page_content_type() {
        let app = build_router(test_state(MockGateway::new(), false));
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_showcase_json_live() {
        let app = build_router(test_state(live_gateway(), true));
        let (status, json) = get_json(app, "/api/showcase").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "live");
        assert_eq!(json["configuration_notice"], false);
        assert_eq!(json["totals"]["games_shown"], 2);
        assert_eq!(json["totals"]["total_playtime_minutes"], 6120);
        assert_eq!(json["totals"]["total_achievements"], 1);
        assert_eq!(json["games"][0]["app_id"], 440);
        assert_eq!(
            json["games"][0]["achievements"][0]["description"],
            crate::models::PLACEHOLDER_DESCRIPTION
        );
    }

    #[tokio::test]
    async fn test_showcase_json_configuration_notice() {
        let app = build_router(test_state(MockGateway::new(), true));
        let (status, json) = get_json(app, "/api/showcase").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["configuration_notice"], true);
        assert_eq!(json["profile"]["persona_name"], "fjr");
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(MockGateway::new(), true));
        let (status, json) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["live"], true);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = build_router(test_state(MockGateway::new(), false));
        let (status, json) = get_json(app, "/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Not found: /nope");
    }

    #[tokio::test]
    async fn test_cors_exact_origin() {
        let app = build_router(test_state(MockGateway::new(), false))
            .layer(cors_layer("https://example.com"));
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn test_cors_any_origin() {
        let app = build_router(test_state(MockGateway::new(), false)).layer(cors_layer("*"));
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://anywhere.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
    }
}
