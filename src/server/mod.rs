mod handlers;
mod state;

use axum::Router;
use axum::routing::{get, post};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::location::Resolver;

pub fn build_router(resolver: Resolver) -> Router {
    let state = Arc::new(AppState { resolver });

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/regions", get(handlers::region_list))
        .route("/api/regions/{region}/sub-regions", get(handlers::sub_region_list))
        .route("/api/resolve", get(handlers::resolve))
        .route("/api/resolve/address", post(handlers::resolve_address))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, resolver: Resolver) -> std::io::Result<()> {
    let app = build_router(resolver);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("agri_geo server listening on http://{}", addr);
    eprintln!("  agri_geo server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{MatchConfig, Vocabulary};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let vocab = Arc::new(Vocabulary::load_embedded().unwrap());
        build_router(Resolver::new(vocab, MatchConfig::default()).unwrap())
    }

    async fn send(req: Request<Body>) -> (StatusCode, Value) {
        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["vocabulary"], "built-in");
        assert!(body["regions"].as_u64().unwrap() > 20);
    }

    #[tokio::test]
    async fn test_region_list() {
        let (status, body) = get_json("/api/regions").await;
        assert_eq!(status, StatusCode::OK);
        let names = body.as_array().unwrap();
        assert!(names.contains(&json!("kerala")));
        assert_eq!(names[0], "andhra pradesh");
    }

    #[tokio::test]
    async fn test_sub_region_list() {
        let (status, body) = get_json("/api/regions/Kerala/sub-regions").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["region"], "kerala");
        assert!(body["sub_regions"].as_array().unwrap().contains(&json!("ernakulam")));
    }

    #[tokio::test]
    async fn test_sub_region_list_unknown_region() {
        let (status, body) = get_json("/api/regions/atlantis/sub-regions").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn test_resolve_query() {
        let (status, body) = get_json("/api/resolve?region=Keralaa&sub_region=Ernakulamm").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"region": "kerala", "sub_region": "ernakulam", "warning": null}));
    }

    #[tokio::test]
    async fn test_resolve_unrecognized_is_not_an_http_error() {
        let (status, body) = get_json("/api/resolve?region=Atlantis&sub_region=Nowhere").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["region"].is_null());
        assert_eq!(body["warning"], "region 'Atlantis' not recognized");
    }

    #[tokio::test]
    async fn test_resolve_explain() {
        let (_, body) = get_json("/api/resolve?region=Orissa&sub_region=Cuttack&explain=true").await;
        assert_eq!(body["region"], "odisha");
        assert_eq!(body["region_match"]["tier"], "similarity");
        assert_eq!(body["sub_region_match"]["tier"], "exact");
    }

    #[tokio::test]
    async fn test_resolve_address() {
        let payload = json!({
            "display_name": "Patna, Bihar, India",
            "address": {"state_district": "Patna", "state": "Bihar", "country_code": "in"}
        });
        let req = Request::post("/api/resolve/address")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["region"], "bihar");
        assert_eq!(body["sub_region"], "patna");
    }

    #[tokio::test]
    async fn test_resolve_address_bad_payload() {
        let req = Request::post("/api/resolve/address")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"state": ["not", "a", "string"]}"#))
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid address payload"));
    }
}
