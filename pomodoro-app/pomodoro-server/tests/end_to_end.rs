// Real router on an ephemeral port, driven through the client crate.

use std::sync::Arc;

use pomodoro_api::{build_router, AppState};
use pomodoro_client::{
    FileStorage, MemoryStorage, PomodoroSession, SessionCache, TimerClient, TimerView,
};
use pomodoro_core::TimerService;
use pomodoro_infrastructure::{schema, MemoryDocumentStore};

async fn spawn_server() -> (Arc<MemoryDocumentStore>, String) {
    let store = Arc::new(MemoryDocumentStore::new());
    schema::initialize(store.as_ref()).await.unwrap();
    let app = build_router(AppState::new(TimerService::new(store.clone())));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (store, format!("http://{}", addr))
}

fn session(base_url: &str, state: &std::path::Path) -> PomodoroSession {
    PomodoroSession::new(
        TimerClient::new(base_url).unwrap(),
        SessionCache::new(Box::new(MemoryStorage::new()), Box::new(FileStorage::new(state))),
    )
}

#[tokio::test]
async fn start_refresh_and_restart_keep_one_timer() {
    let (store, base_url) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");

    let tab = session(&base_url, &state);
    assert!(tab.hello().await.unwrap().success);

    let fresh = tab.refresh().await.unwrap();
    assert!(fresh.success);
    assert_eq!(TimerView::from_reply(&fresh), TimerView::Buttons);
    assert_eq!(store.len("sessions"), 0);

    let started = tab.start(45).await.unwrap();
    assert_eq!(started.minutes.as_deref(), Some("45"));
    assert_eq!(started.token, fresh.token);

    let again = tab.start(5).await.unwrap();
    assert_eq!(again, started);

    // A new process only has the durable token.
    let restarted = session(&base_url, &state);
    let fetched = restarted.refresh().await.unwrap();
    assert_eq!(fetched, started);
    assert!(matches!(TimerView::from_reply(&fetched), TimerView::Timer(t) if t.minutes == 45));
    assert_eq!(store.len("sessions"), 1);

    // Forgetting the token starts a new timer.
    restarted.forget().unwrap();
    let new_timer = restarted.start(5).await.unwrap();
    assert_ne!(new_timer.token, started.token);
    assert_eq!(new_timer.minutes.as_deref(), Some("5"));
    assert_eq!(store.len("sessions"), 2);
}
