//! Router construction

use axum::{
    http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{basic, hello, timer};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(basic::root))
        .route("/Hello", post(hello::hello))
        .route("/GetTimer", post(timer::get_timer))
        .route("/SetTimer", post(timer::set_timer))
        .with_state(state);

    with_layers(routes)
}

/// Fallbacks, panic recovery, tracing, and the permissive cross-origin
/// header on every response (404 and 500 included).
fn with_layers(router: Router) -> Router {
    router
        .fallback(basic::not_found)
        .method_not_allowed_fallback(basic::not_found)
        .layer(CatchPanicLayer::custom(basic::handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().include_headers(false)))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
        response::Response,
    };
    use pomodoro_core::clock::FixedClock;
    use pomodoro_core::TimerService;
    use pomodoro_infrastructure::{schema, MemoryDocumentStore, PgDocumentStore};
    use pomodoro_shared::config::StoreSettings;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const T0: i64 = 1_700_000_000_000;

    async fn app() -> (Arc<MemoryDocumentStore>, Router) {
        let store = Arc::new(MemoryDocumentStore::new());
        schema::initialize(store.as_ref()).await.unwrap();
        let service = TimerService::with_clock(store.clone(), Arc::new(FixedClock(T0)));
        (store, build_router(AppState::new(service)))
    }

    fn form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn text_body(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn allow_origin(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_root_banner() {
        let (_, app) = app().await;
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some("*"));
        assert!(text_body(response).await.contains("pomodoro"));
    }

    #[tokio::test]
    async fn test_hello() {
        let (_, app) = app().await;
        let response = app.oneshot(form("/Hello", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some("*"));
        assert_eq!(json_body(response).await, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_unknown_path_and_method_are_404() {
        let (_, app) = app().await;

        let response = app.clone().oneshot(form("/Nope", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(allow_origin(&response), Some("*"));
        assert_eq!(text_body(response).await, "page not found");

        let response = app
            .oneshot(Request::get("/SetTimer").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_timer_without_token_issues_one() {
        let (store, app) = app().await;
        let response = app.oneshot(form("/GetTimer", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["token"].as_str().map(str::len), Some(16));
        assert!(body.get("time").is_none());
        assert!(body.get("minutes").is_none());
        assert_eq!(store.len("sessions"), 0);
    }

    #[tokio::test]
    async fn test_set_then_get_scenario() {
        let (store, app) = app().await;

        let body = json_body(app.clone().oneshot(form("/SetTimer", "minutes=45")).await.unwrap()).await;
        let token = body["token"].as_str().unwrap().to_string();
        assert_eq!(body["minutes"], "45");
        assert_eq!(body["time"], "1700000000000");

        let again = json_body(
            app.clone()
                .oneshot(form("/SetTimer", &format!("token={}&minutes=5", token)))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(again, body);

        let fetched = json_body(
            app.oneshot(form("/GetTimer", &format!("token={}", token)))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(fetched, body);
        assert_eq!(store.len("sessions"), 1);
    }

    #[tokio::test]
    async fn test_body_is_decoded_without_content_type() {
        let (_, app) = app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/SetTimer")
            .body(Body::from("token=PlainTextClient1&minutes=25"))
            .unwrap();
        let body = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(body["token"], "PlainTextClient1");
        assert_eq!(body["minutes"], "25");
    }

    #[tokio::test]
    async fn test_store_outage_maps_to_503() {
        let mut settings = StoreSettings::memory();
        settings.url = "postgres://127.0.0.1:1/none".into();
        settings.connect_timeout_secs = Some(2);
        let store = Arc::new(PgDocumentStore::new(settings));
        let app = build_router(AppState::new(TimerService::new(store)));

        let response = app.oneshot(form("/GetTimer", "token=abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(allow_origin(&response), Some("*"));
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["kind"], "store_connection");
    }

    #[tokio::test]
    async fn test_panic_is_echoed_as_500() {
        let app = with_layers(Router::new().route(
            "/boom",
            get(|| async {
                if true {
                    panic!("kaboom");
                }
                ""
            }),
        ));
        let response = app
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(allow_origin(&response), Some("*"));
        assert_eq!(text_body(response).await, "kaboom");
    }
}
