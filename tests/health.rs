mod common;

use axum::extract::State;
use common::{FakeBackend, admin_session, state};
use wizard_admin::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() {
    let app_state = state(FakeBackend::new(Vec::new(), Vec::new()));
    app_state.sessions.insert(admin_session()).await;

    let response = health_check(State(app_state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.active_sessions, 1);
}
