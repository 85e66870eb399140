use rizz::{AuthState, Category, RizzError, Session, Settings, Tone};
use serde_json::json;
use std::path::Path;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer, data_dir: &Path) -> Settings {
    Settings {
        server_url: format!("{}/api", server.uri()),
        data_dir: Some(data_dir.to_path_buf()),
        ..Settings::default()
    }
}

fn write_credentials(data_dir: &Path, access: &str, refresh: &str) {
    std::fs::write(
        data_dir.join("credentials.json"),
        json!({ "access_token": access, "refresh_token": refresh }).to_string(),
    )
    .unwrap();
}

fn generated(input: &str) -> serde_json::Value {
    json!({
        "data": {
            "id": "resp-1",
            "input_text": input,
            "tone": "savage",
            "category": "dating",
            "response_1": "first",
            "response_2": "second",
            "response_3": "third",
            "selected_idx": 0,
            "created_at": "2026-02-14T20:15:00Z"
        }
    })
}

#[tokio::test]
async fn test_start_without_credentials() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let (session, override_task) = Session::start(&settings(&server, dir.path())).await.unwrap();
    override_task.await.unwrap();

    assert!(!session.is_authenticated());
    assert_eq!(*session.auth_state().borrow(), AuthState::LoggedOut);
}

#[tokio::test]
async fn test_login_then_generate() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "A1", "refresh_token": "R1" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/p/rizz/generate"))
        .and(header("Authorization", "Bearer A1"))
        .and(body_json(json!({
            "input_text": "she said she likes hiking",
            "tone": "savage",
            "category": "dating"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(generated("she said she likes hiking")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (session, _) = Session::start(&settings(&server, dir.path())).await.unwrap();
    session.login("sam@example.com", "hunter22").await.unwrap();
    assert!(session.is_authenticated());

    let response = session
        .generate("she said she likes hiking", Tone::Savage, Category::Dating)
        .await
        .unwrap();

    assert_eq!(response.id, "resp-1");
    assert_eq!(response.responses(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_short_input_is_rejected_locally() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(path("/api/p/rizz/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (session, _) = Session::start(&settings(&server, dir.path())).await.unwrap();
    let err = session
        .generate("hey", Tone::default(), Category::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RizzError::InputTooShort { min: 5, actual: 3 }));
}

#[tokio::test]
async fn test_quota_maps_to_limit_reached() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_credentials(dir.path(), "A1", "R1");

    Mock::given(method("POST"))
        .and(path("/api/p/rizz/generate"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "error": "Free limit used", "limit_reached": true })),
        )
        .mount(&server)
        .await;

    let (session, _) = Session::start(&settings(&server, dir.path())).await.unwrap();
    assert!(session.is_authenticated());

    let err = session
        .generate("what do I text back?", Tone::Chill, Category::Casual)
        .await
        .unwrap_err();

    assert!(matches!(err, RizzError::LimitReached));
}

#[tokio::test]
async fn test_expired_session_refreshes_transparently() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_credentials(dir.path(), "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/api/p/rizz/stats"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/p/rizz/stats"))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_streak": 2,
            "longest_streak": 2,
            "total_rizzes": 9,
            "free_uses_today": 5
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({ "refresh_token": "R1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "A2", "refresh_token": "R2" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (session, _) = Session::start(&settings(&server, dir.path())).await.unwrap();
    let stats = session.stats().await.unwrap();

    assert!(stats.limit_reached());
    let stored: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("credentials.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(stored["access_token"], "A2");
    assert_eq!(stored["refresh_token"], "R2");
}

#[tokio::test]
async fn test_revoked_refresh_logs_out() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_credentials(dir.path(), "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/api/p/rizz/stats"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let (session, _) = Session::start(&settings(&server, dir.path())).await.unwrap();
    let mut auth_state = session.auth_state();

    let err = session.stats().await.unwrap_err();

    assert!(err.is_logged_out());
    assert!(!session.is_authenticated());
    assert!(auth_state.has_changed().unwrap());
    assert_eq!(*auth_state.borrow_and_update(), AuthState::LoggedOut);
    assert!(!dir.path().join("credentials.json").exists());
}

#[tokio::test]
async fn test_select_is_fire_and_forget() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_credentials(dir.path(), "A1", "R1");

    Mock::given(method("POST"))
        .and(path("/api/p/rizz/select"))
        .and(body_json(json!({ "response_id": "resp-1", "selected_idx": 2 })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (session, _) = Session::start(&settings(&server, dir.path())).await.unwrap();

    // a failing select does not surface
    session.select("resp-1", 2).await.unwrap();
}

#[tokio::test]
async fn test_remote_override_redirects_later_requests() {
    let bootstrap = MockServer::start().await;
    let live = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_credentials(dir.path(), "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "api_base_url": live.uri() })),
        )
        .expect(1)
        .mount(&bootstrap)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/p/rizz/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_streak": 0,
            "longest_streak": 0,
            "total_rizzes": 0,
            "free_uses_today": 0
        })))
        .expect(1)
        .mount(&live)
        .await;

    let (session, override_task) = Session::start(&settings(&bootstrap, dir.path()))
        .await
        .unwrap();
    override_task.await.unwrap();

    session.stats().await.unwrap();

    // the next launch starts from the cached override
    let (restarted, _) = Session::start(&settings(&bootstrap, dir.path()))
        .await
        .unwrap();
    assert_eq!(
        restarted.client().base_urls().current().public(),
        format!("{}/api", live.uri())
    );
}

#[tokio::test]
async fn test_preferences_live_in_data_dir() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let (session, _) = Session::start(&settings(&server, dir.path())).await.unwrap();
    assert!(!session.user_preferences().await.unwrap().onboarding_complete);

    session.complete_onboarding().await.unwrap();

    assert!(session.user_preferences().await.unwrap().onboarding_complete);
    assert!(dir.path().join("preferences.json").exists());
}

#[tokio::test]
async fn test_unreadable_preferences_surface_as_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("preferences.json"), "{ not json").unwrap();

    let (session, _) = Session::start(&settings(&server, dir.path())).await.unwrap();
    let err = session.user_preferences().await.unwrap_err();

    assert!(matches!(err, RizzError::Preferences(_)));
    assert!(!err.is_logged_out());
}

#[tokio::test]
async fn test_logout_clears_credentials() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_credentials(dir.path(), "A1", "R1");

    let (session, _) = Session::start(&settings(&server, dir.path())).await.unwrap();
    assert!(session.is_authenticated());

    session.logout().unwrap();

    assert!(!session.is_authenticated());
    assert!(!dir.path().join("credentials.json").exists());
}
