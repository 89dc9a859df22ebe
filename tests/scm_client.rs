//! Contract tests for the SCM permission client against a wiremock server:
//! permission-level mapping, "no access" as a normal result, and transport
//! failures staying distinguishable from denial.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use conveyor::models::user::User;
use conveyor::scm::{PermissionResolver, ScmClient, ScmError};

fn alice() -> User {
    User {
        id: 7,
        username: "alice".into(),
        scm_context: "github:github.com".into(),
    }
}

fn client(server: &MockServer, timeout: Duration) -> ScmClient {
    ScmClient::new(server.uri(), Some("scm-token".into()), timeout).unwrap()
}

const PERMISSION_PATH: &str =
    "/v1/repositories/github.com%2Forg%2Frepo/collaborators/alice/permission";

#[tokio::test]
async fn admin_permission_resolves_with_admin_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PERMISSION_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"permission": "admin"})),
        )
        .mount(&server)
        .await;

    let perms = client(&server, Duration::from_secs(5))
        .resolve(&alice(), "github.com/org/repo")
        .await
        .unwrap();
    assert!(perms.admin);
}

#[tokio::test]
async fn write_permission_is_not_admin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PERMISSION_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"permission": "write"})),
        )
        .mount(&server)
        .await;

    let perms = client(&server, Duration::from_secs(5))
        .resolve(&alice(), "github.com/org/repo")
        .await
        .unwrap();
    assert!(!perms.admin);
    assert!(perms.push);
}

#[tokio::test]
async fn not_a_collaborator_is_a_normal_empty_permission_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PERMISSION_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let perms = client(&server, Duration::from_secs(5))
        .resolve(&alice(), "github.com/org/repo")
        .await
        .unwrap();
    assert!(!perms.admin && !perms.push && !perms.pull);
}

#[tokio::test]
async fn provider_5xx_is_an_unavailable_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PERMISSION_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server, Duration::from_secs(5))
        .resolve(&alice(), "github.com/org/repo")
        .await
        .unwrap_err();
    assert!(matches!(err, ScmError::Unavailable(_)));
}

#[tokio::test]
async fn slow_provider_is_a_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PERMISSION_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"permission": "admin"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = client(&server, Duration::from_millis(200))
        .resolve(&alice(), "github.com/org/repo")
        .await
        .unwrap_err();
    assert!(matches!(err, ScmError::Timeout));
}

#[tokio::test]
async fn malformed_body_is_a_bad_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PERMISSION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server, Duration::from_secs(5))
        .resolve(&alice(), "github.com/org/repo")
        .await
        .unwrap_err();
    assert!(matches!(err, ScmError::BadResponse(_)));
}
