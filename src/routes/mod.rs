//! HTTP surface of the editor server.
//!
//! `/api/*` exposes the translation engine and editor actions, the remaining
//! routes keep the bridge contract the editor page uses to reach Caddy, and
//! anything else falls through to the embedded frontend.

pub mod caddy;
pub mod editor;
pub mod health;
pub mod json;
pub mod state;
pub mod static_files;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/translate", post(editor::translate))
        .route("/preview", post(editor::preview))
        .route("/save", post(editor::save))
        .route("/clear", post(editor::clear));

    let bridge = Router::new()
        .route(
            "/config",
            get(caddy::get_config)
                .post(caddy::update_config)
                .delete(caddy::delete_config),
        )
        .route("/config/array", post(caddy::add_to_config_array))
        .route("/config/array/insert", post(caddy::insert_into_config_array))
        .route("/adapt", post(caddy::adapt_config))
        .route("/load", post(caddy::load_config))
        .route("/pki/ca", get(caddy::get_pki_ca))
        .route("/pki/ca/certificates", get(caddy::get_pki_ca_certificates))
        .route("/reverse_proxy/upstreams", get(caddy::get_proxy_upstreams))
        .route("/stop", post(caddy::stop_server));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .merge(bridge)
        .fallback(static_files::serve_static)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::test_support::spawn_server;
    use axum::{
        body::{to_bytes, Body},
        extract::Path,
        http::{HeaderMap, Method, Request, StatusCode, Uri},
        response::{IntoResponse, Response},
        Json,
    };
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// One admin call as Caddy saw it.
    #[derive(Debug, Clone)]
    struct Recorded {
        method: Method,
        path: String,
        content_type: String,
        body: String,
    }

    impl Recorded {
        fn json(&self) -> Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    type Seen = Arc<Mutex<Vec<Recorded>>>;

    /// Stand-in for Caddy's admin endpoint. Mutations are recorded and echoed
    /// back, config reads fail the way Caddy does for unknown keys.
    async fn mock_caddy() -> (String, Seen) {
        let seen: Seen = Arc::default();
        let recorder = seen.clone();
        let admin = axum::Router::new()
            .route(
                "/pki/ca/:id",
                get(|Path(id): Path<String>| async move { Json(json!({"id": id})) }),
            )
            .fallback(
                move |method: Method, uri: Uri, headers: HeaderMap, body: String| {
                    let recorder = recorder.clone();
                    async move { record(recorder, method, uri, headers, body) }
                },
            );
        (spawn_server(admin).await, seen)
    }

    fn record(seen: Seen, method: Method, uri: Uri, headers: HeaderMap, body: String) -> Response {
        if method == Method::GET {
            let error = json!({"error": "unknown object key"});
            return (StatusCode::NOT_FOUND, Json(error)).into_response();
        }

        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        seen.lock().unwrap().push(Recorded {
            method,
            path: uri.path().to_string(),
            content_type,
            body: body.clone(),
        });

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Json(value).into_response(),
            Err(_) => StatusCode::OK.into_response(),
        }
    }

    async fn app() -> (Router, Seen) {
        let (caddy_url, seen) = mock_caddy().await;
        let config = Config {
            caddy_api_url: caddy_url,
            ..Config::default()
        };
        (create_router(AppState::from_config(&config).unwrap()), seen)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn call(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        send(app, request).await
    }

    fn workspace() -> Value {
        json!({
            "id": "workspace",
            "children": [
                {"id": "general_options", "children": [
                    {"id": "siteURL", "tag": "input", "attributes": {"data-handleinfo": ""},
                     "field": {"kind": "input", "value": "example.com"}}
                ]},
                {"id": "reverseproxy", "children": [
                    {"id": "proxyURL", "tag": "input", "attributes": {"data-handleinfo": ""},
                     "field": {"kind": "input", "value": "10.0.0.5:8080"}}
                ]}
            ]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app().await;
        let (status, body) = call(app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_translate_returns_handler() {
        let (app, _) = app().await;
        let request = json!({"workspace": workspace()});
        let (status, body) = call(app, "POST", "/api/translate", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "handle": [{"handler": "subroute", "routes": [{"handle": [
                    {"handler": "reverse_proxy", "upstreams": [{"dial": "10.0.0.5:8080"}]}
                ]}]}],
                "match": [{"host": ["example.com"]}],
                "terminal": true
            })
        );
    }

    #[tokio::test]
    async fn test_translate_finds_workspace_in_document() {
        let (app, _) = app().await;
        let document = json!({"tag": "body", "children": [workspace()]});
        let request = json!({"workspace": document});
        let (status, _) = call(app, "POST", "/api/translate", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_translate_configuration_error() {
        let (app, seen) = app().await;
        let (status, body) = call(
            app,
            "POST",
            "/api/translate",
            Some(json!({"workspace": {"id": "workspace"}})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "missing general options");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_editor_body_is_400() {
        let (app, _) = app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/translate")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app.clone(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request."));

        let request = json!({"workspace": {"children": "none"}});
        let (status, body) = call(app, "POST", "/api/save", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_save_appends_to_routes() {
        let (app, seen) = app().await;
        let request = json!({"workspace": workspace()});
        let (status, body) = call(app, "POST", "/api/save", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        let commands: Vec<&str> = body["commands"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["command"].as_str())
            .collect();
        assert_eq!(
            commands,
            ["show_busy", "hide_busy", "clear_blocks", "reset_palette", "show_banner"]
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].path, "/config/apps/http/servers/srv0/routes/...");
        assert_eq!(seen[0].json()[0]["match"][0]["host"][0], "example.com");
    }

    #[tokio::test]
    async fn test_clear_commands() {
        let (app, _) = app().await;
        let (_, body) = call(app, "POST", "/api/clear", None).await;
        assert_eq!(body["commands"][0]["command"], "clear_blocks");
    }

    #[tokio::test]
    async fn test_config_array_requires_fields() {
        let (app, _) = app().await;
        let request = json!({"path": "x"});
        let (status, body) = call(app, "POST", "/config/array", Some(request)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("\"items\""));
    }

    #[tokio::test]
    async fn test_config_array_wrong_item_type_is_400() {
        let (app, seen) = app().await;
        let request = json!({"path": "x", "items": {"a": 1}});
        let (status, body) = call(app, "POST", "/config/array", Some(request)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request."));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_config_array_forwards_to_caddy() {
        let (app, seen) = app().await;
        let (status, body) = call(
            app,
            "POST",
            "/config/array",
            Some(json!({"path": "apps/http/servers/srv0/routes", "items": [{"terminal": true}]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"terminal": true}]));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_config_array_insert_puts_at_index() {
        let (app, seen) = app().await;
        let request = json!({
            "path": "apps/http/servers/srv0/routes",
            "index": 0,
            "item": {"terminal": true}
        });
        let (status, body) = call(app.clone(), "POST", "/config/array/insert", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"terminal": true}));
        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen[0].method, Method::PUT);
            assert_eq!(seen[0].path, "/config/apps/http/servers/srv0/routes/0");
        }

        let request = json!({"path": "apps/http/servers/srv0/routes", "item": {}});
        let (status, body) = call(app, "POST", "/config/array/insert", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("\"index\""));
    }

    #[tokio::test]
    async fn test_update_config_patches_value() {
        let (app, seen) = app().await;
        let request = json!({"path": "apps/http/servers/srv0/listen", "value": [":443"]});
        let (status, _) = call(app.clone(), "POST", "/config", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen[0].method, Method::PATCH);
            assert_eq!(seen[0].path, "/config/apps/http/servers/srv0/listen");
            assert_eq!(seen[0].json(), json!([":443"]));
        }

        let request = json!({"path": "apps/http/servers/srv0/listen"});
        let (status, _) = call(app, "POST", "/config", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_config_forwards_path() {
        let (app, seen) = app().await;
        let (status, body) = call(app, "DELETE", "/config?path=apps/tls", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, Method::DELETE);
        assert_eq!(seen[0].path, "/config/apps/tls");
    }

    #[tokio::test]
    async fn test_load_sends_caddyfile_text() {
        let (app, seen) = app().await;
        let request = json!({"config": ":80\nrespond ok", "content_type": "text/caddyfile"});
        let (status, _) = call(app.clone(), "POST", "/load", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen[0].method, Method::POST);
            assert_eq!(seen[0].path, "/load");
            assert_eq!(seen[0].content_type, "text/caddyfile");
            assert_eq!(seen[0].body, ":80\nrespond ok");
        }

        let (status, body) = call(app, "POST", "/load", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("\"config\""));
    }

    #[tokio::test]
    async fn test_caddy_failure_is_500_with_error() {
        let (app, _) = app().await;
        let (status, body) = call(app, "GET", "/config?path=apps/nope", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("unknown object key"));
    }

    #[tokio::test]
    async fn test_pki_requires_id() {
        let (app, _) = app().await;
        let (status, _) = call(app.clone(), "GET", "/pki/ca", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(app, "GET", "/pki/ca?id=local", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "local");
    }
}
