//! End-to-end auth flow tests
//!
//! Each test runs a flow against the mock auth API over real HTTP and
//! persists the session to a session file in a temp directory.
//!
//! Run with: cargo test --test auth_flow_test -- --nocapture

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;

use storefront_core::adapters::google::GoogleIdentityClient;
use storefront_core::adapters::http_backend::HttpAuthBackend;
use storefront_core::adapters::session_file::FileSessionStore;
use storefront_core::config::Config;
use storefront_core::domain::{FlowState, IdentityState, Navigation, Role, Route, UserProfile};
use storefront_core::ports::{IdentityAvailability, IdentityProvider, SessionStore};
use storefront_core::services::login::GENERIC_FAILURE_MESSAGE;
use storefront_core::services::signup::{
    GOOGLE_UNAVAILABLE_MESSAGE, SIGNUP_FALLBACK_MESSAGE, SIGNUP_SUCCESS_MESSAGE,
};
use storefront_core::services::{EntryPoint, LoggingService};
use storefront_core::{Credentials, Registration, StorefrontContext};

use common::{MockAuthServer, MockConfig, MockReply};

// ============================================================================
// Test Helpers
// ============================================================================

/// Context wired to the mock server and a session file in `dir`
fn context(server: &MockAuthServer, dir: &TempDir) -> StorefrontContext {
    let mut config = Config::default();
    config.api_base_url = server.base_url();
    config.request_timeout = Some(Duration::from_secs(5));
    config.google_client_id = Some("client-123.apps.googleusercontent.com".to_string());

    let backend = Arc::new(
        HttpAuthBackend::new(&config.api_base_url, config.request_timeout)
            .expect("Failed to create backend"),
    );
    let sessions = Arc::new(FileSessionStore::new(dir.path()));

    StorefrontContext::from_parts(dir.path().to_path_buf(), config, backend, sessions)
}

fn stored_json(dir: &TempDir) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.path().join("session.json"))
        .expect("session.json should exist");
    serde_json::from_str(&content).unwrap()
}

fn google_client(
    server: &MockAuthServer,
    credential: Option<&'static str>,
) -> Arc<GoogleIdentityClient> {
    Arc::new(GoogleIdentityClient::with_script_url(
        &server.script_url(),
        Box::new(move || Ok(credential.map(str::to_string))),
    ))
}

// ============================================================================
// Login
// ============================================================================

#[test]
fn test_login_stores_token_and_role() {
    let server = MockAuthServer::start(MockConfig {
        login: MockReply::json(200, json!({"token": "T", "role": "user"})),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    let outcome = ctx.login_flow().submit(&Credentials::new("a@b.com", "x"));

    assert_eq!(outcome.state, FlowState::Success);
    assert_eq!(outcome.navigation, Some(Navigation::immediate(Route::Home)));
    assert_eq!(ctx.route_path(Route::Home), "/");

    let stored = stored_json(&dir);
    assert_eq!(stored["token"], "T");
    assert_eq!(stored["role"], "user");

    let requests = server.requests_to("/api/auth/login");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].json(), json!({"email": "a@b.com", "password": "x"}));
}

#[test]
fn test_admin_login_routes_to_admin() {
    let server = MockAuthServer::start(MockConfig {
        login: MockReply::json(200, json!({"token": "A", "role": "admin"})),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    let outcome = ctx.login_flow().submit(&Credentials::new("root@b.com", "pw"));

    assert_eq!(outcome.navigation.unwrap().route, Route::Admin);
    assert_eq!(ctx.sessions.load().unwrap().unwrap().role, Some(Role::Admin));
}

#[test]
fn test_rejected_login_leaves_storage_untouched() {
    let server = MockAuthServer::start(MockConfig {
        login: MockReply::json(401, json!({"message": "Wrong password"})),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    let outcome = ctx.login_flow().submit(&Credentials::new("a@b.com", "bad"));

    assert_eq!(outcome.state, FlowState::Failed);
    assert_eq!(outcome.message.as_deref(), Some("Wrong password"));
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_unreadable_login_error_body_is_generic_failure() {
    for body in ["<html>oops</html>", ""] {
        let server = MockAuthServer::start(MockConfig {
            login: MockReply::raw(500, body),
            ..Default::default()
        })
        .unwrap();
        let dir = TempDir::new().unwrap();
        let ctx = context(&server, &dir);

        let outcome = ctx.login_flow().submit(&Credentials::new("a@b.com", "x"));

        assert_eq!(outcome.state, FlowState::Failed, "body {:?}", body);
        assert_eq!(
            outcome.message.as_deref(),
            Some(GENERIC_FAILURE_MESSAGE),
            "body {:?}",
            body
        );
        assert!(!dir.path().join("session.json").exists());
    }
}

#[test]
fn test_json_login_error_without_message_uses_fallback() {
    let server = MockAuthServer::start(MockConfig {
        login: MockReply::json(401, json!({})),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    let outcome = ctx.login_flow().submit(&Credentials::new("a@b.com", "x"));

    assert_eq!(outcome.message.as_deref(), Some("Invalid credentials"));
}

#[test]
fn test_malformed_success_body_is_generic_failure() {
    let server = MockAuthServer::start(MockConfig {
        login: MockReply::raw(200, "not json"),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    let outcome = ctx.login_flow().submit(&Credentials::new("a@b.com", "x"));

    assert_eq!(outcome.message.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_login_failure_is_logged_without_credentials() {
    let server = MockAuthServer::start(MockConfig::default()).unwrap();
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(LoggingService::new(dir.path(), EntryPoint::Cli, "test").unwrap());
    let ctx = context(&server, &dir).with_logger(logger.clone());

    ctx.login_flow()
        .submit(&Credentials::new("secret@b.com", "hunter2"));

    let entries = logger.get_recent(10).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event, "login_failed");
    assert_eq!(entries[0].http_status, Some(401));

    let dump = format!("{:?}", entries);
    assert!(!dump.contains("hunter2"));
    assert!(!dump.contains("secret@b.com"));
}

// ============================================================================
// Signup
// ============================================================================

#[test]
fn test_signup_success_redirects_after_delay() {
    let server = MockAuthServer::start(MockConfig::default()).unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    let outcome = ctx
        .signup_flow(None)
        .submit(&Registration::new("Ada Lovelace", "ada@example.com", "pw"));

    assert_eq!(outcome.message.as_deref(), Some(SIGNUP_SUCCESS_MESSAGE));
    assert_eq!(
        outcome.navigation,
        Some(Navigation::after(Route::Login, Duration::from_millis(1500)))
    );

    let requests = server.requests_to("/api/auth/register");
    assert_eq!(
        requests[0].json(),
        json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "pw",
            "role": "user"
        })
    );
}

#[test]
fn test_duplicate_signup_redirects_to_login() {
    let server = MockAuthServer::start(MockConfig {
        register: MockReply::json(409, json!({"message": "Email already registered"})),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    let mut flow = ctx.signup_flow(None);

    let outcome = flow.submit(&Registration::new("Ada", "taken@example.com", "pw"));

    assert_eq!(outcome.message.as_deref(), Some("Email already registered"));
    let navigation = outcome.navigation.expect("should redirect");
    assert_eq!(navigation.route, Route::Login);
    assert_eq!(navigation.delay, Duration::from_millis(1500));
    assert_eq!(ctx.route_path(navigation.route), "/login");
    assert!(!flow.is_busy());
}

#[test]
fn test_signup_failure_stays_on_page() {
    let server = MockAuthServer::start(MockConfig {
        register: MockReply::json(400, json!({"message": "Password too weak"})),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    let outcome = ctx
        .signup_flow(None)
        .submit(&Registration::new("Ada", "ada@example.com", "1"));

    assert_eq!(outcome.state, FlowState::Failed);
    assert_eq!(outcome.message.as_deref(), Some("Password too weak"));
    assert!(outcome.navigation.is_none());
}

#[test]
fn test_signup_unreadable_error_body_uses_fallback() {
    let server = MockAuthServer::start(MockConfig {
        register: MockReply::raw(502, "<html>Bad Gateway</html>"),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    let outcome = ctx
        .signup_flow(None)
        .submit(&Registration::new("Ada", "ada@example.com", "1"));

    assert_eq!(outcome.state, FlowState::Failed);
    assert_eq!(outcome.message.as_deref(), Some(SIGNUP_FALLBACK_MESSAGE));
}

// ============================================================================
// Google
// ============================================================================

fn full_profile_reply() -> MockReply {
    MockReply::json(
        200,
        json!({
            "token": "G",
            "_id": "64f1c0ffee",
            "fullName": "Grace Hopper",
            "email": "grace@example.com",
            "role": "user",
            "profileImage": "https://img.example.com/grace.png"
        }),
    )
}

#[test]
fn test_google_callback_stores_full_profile() {
    let server = MockAuthServer::start(MockConfig {
        google: full_profile_reply(),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    let mut flow = ctx.signup_flow(None);

    let outcome = flow.google_sign_up("google-id-token");

    assert_eq!(outcome.state, FlowState::Success);
    assert_eq!(outcome.navigation.unwrap().route, Route::Dashboard);
    assert_eq!(flow.identity_state(), IdentityState::Success);

    let stored = stored_json(&dir);
    assert_eq!(stored["token"], "G");
    assert_eq!(
        stored["user"],
        json!({
            "_id": "64f1c0ffee",
            "fullName": "Grace Hopper",
            "email": "grace@example.com",
            "role": "user",
            "profileImage": "https://img.example.com/grace.png"
        })
    );

    let session = ctx.sessions.load().unwrap().unwrap();
    assert_eq!(
        session.user,
        Some(UserProfile {
            id: "64f1c0ffee".to_string(),
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            role: Role::User,
            profile_image: Some("https://img.example.com/grace.png".to_string()),
        })
    );

    let requests = server.requests_to("/api/auth/google");
    assert_eq!(requests[0].json(), json!({"token": "google-id-token"}));
}

#[test]
fn test_google_prompt_through_sdk() {
    let server = MockAuthServer::start(MockConfig {
        google: full_profile_reply(),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    let google = google_client(&server, Some("google-id-token"));
    let mut flow = ctx.signup_flow(Some(google.clone() as Arc<dyn IdentityProvider>));

    assert_eq!(flow.mount(), IdentityAvailability::Available);
    // A second mount must not fetch the script again
    flow.mount();
    assert_eq!(google.load_count(), 1);
    assert_eq!(server.requests_to("/gsi/client").len(), 1);

    let outcome = flow.prompt_google();
    assert!(outcome.succeeded());
    assert!(dir.path().join("session.json").exists());
}

#[test]
fn test_google_sdk_unavailable() {
    let server = MockAuthServer::start(MockConfig {
        serve_script: false,
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    let google = google_client(&server, Some("google-id-token"));
    let mut flow = ctx.signup_flow(Some(google.clone() as Arc<dyn IdentityProvider>));

    assert_eq!(flow.mount(), IdentityAvailability::Unavailable);
    assert_eq!(google.availability(), IdentityAvailability::Unavailable);

    let outcome = flow.prompt_google();
    assert_eq!(outcome.message.as_deref(), Some(GOOGLE_UNAVAILABLE_MESSAGE));
    assert!(server.requests_to("/api/auth/google").is_empty());
}

#[test]
fn test_google_exchange_rejected() {
    let server = MockAuthServer::start(MockConfig::default()).unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    let mut flow = ctx.signup_flow(None);

    let outcome = flow.google_sign_up("expired");

    assert_eq!(outcome.message.as_deref(), Some("Invalid Google token"));
    assert_eq!(flow.identity_state(), IdentityState::Failed);
    assert!(!flow.is_google_busy());
    assert!(!dir.path().join("session.json").exists());
}

// ============================================================================
// Session replacement
// ============================================================================

#[test]
fn test_new_login_replaces_google_session() {
    let server = MockAuthServer::start(MockConfig {
        login: MockReply::json(200, json!({"token": "T2", "role": "user"})),
        google: full_profile_reply(),
        ..Default::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    ctx.signup_flow(None).google_sign_up("id");
    ctx.login_flow().submit(&Credentials::new("a@b.com", "x"));

    let stored = stored_json(&dir);
    assert_eq!(stored["token"], "T2");
    assert!(stored.get("user").is_none());
}
