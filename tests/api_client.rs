//! Integration tests for the HTTP API client against a local mock server.

use std::time::Duration;

use serde_json::json;
use userdesk::domain::{
    ApiError, AuthPort, AuthToken, Credentials, Registration, UserDraft, UserId, UserPort,
};
use userdesk::infrastructure::ApiClient;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "header.payload.signature";

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap()
}

fn token() -> AuthToken {
    AuthToken::new(TOKEN).unwrap()
}

fn user_json(id: i64, name: &str, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "created_at": "2025-01-10T08:30:00Z",
        "updated_at": "2025-01-11T09:00:00Z"
    })
}

#[tokio::test]
async fn test_login_returns_user_and_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "admin@example.com", "password": "password"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "message": "Login Berhasil",
            "data": {
                "user": {"id": 1, "name": "Admin", "email": "admin@example.com"},
                "token": TOKEN
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let grant = client_for(&server)
        .login(&Credentials::new("admin@example.com", "password"))
        .await
        .unwrap();

    assert_eq!(grant.user.id(), UserId(1));
    assert_eq!(grant.user.name(), "Admin");
    assert_eq!(grant.token.as_str(), TOKEN);
}

#[tokio::test]
async fn test_login_rejection_carries_message_only() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": false,
            "message": "Email atau Password Anda Salah"
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .login(&Credentials::new("admin@example.com", "wrong"))
        .await
        .unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(error.banner(), "Email atau Password Anda Salah");
    assert!(error.fields().is_empty());
}

#[tokio::test]
async fn test_register_validation_errors_are_per_field() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": false,
            "message": "Validasi Gagal",
            "data": {
                "name": ["Nama minimal 3 karakter"],
                "password": ["Password minimal 6 karakter"]
            }
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .register(&Registration::new("Al", "al@example.com", "123"))
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(422));
    let fields = error.fields();
    assert_eq!(fields.first("name"), Some("Nama minimal 3 karakter"));
    assert_eq!(fields.first("password"), Some("Password minimal 6 karakter"));
    assert!(fields.first("email").is_none());
}

#[tokio::test]
async fn test_conflict_without_data_has_empty_fields() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "status": false,
            "message": "Email sudah terdaftar"
        })))
        .mount(&server)
        .await;

    let draft = UserDraft::new("Budi", "budi@example.com").with_password("secret1");
    let error = client_for(&server)
        .create_user(&token(), &draft)
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(409));
    assert_eq!(error.banner(), "Email sudah terdaftar");
    assert!(error.fields().is_empty());
}

#[tokio::test]
async fn test_list_users_sends_bearer_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "message": "List Data Users",
            "data": [
                user_json(2, "Budi", "budi@example.com"),
                user_json(1, "Admin", "admin@example.com")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = client_for(&server).list_users(&token()).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name(), "Budi");
    assert!(users[0].updated_at().is_some());
}

#[tokio::test]
async fn test_update_without_password_omits_field() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/2"))
        .and(body_json(json!({"name": "Budi S", "email": "budi@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "message": "User Berhasil Diupdate",
            "data": user_json(2, "Budi S", "budi@example.com")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = UserDraft::new("Budi S", "budi@example.com").with_password("");
    let user = client_for(&server)
        .update_user(&token(), UserId(2), &draft)
        .await
        .unwrap();

    assert_eq!(user.name(), "Budi S");
}

#[tokio::test]
async fn test_delete_user_accepts_null_data() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/3"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "message": "User Berhasil Dihapus",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_user(&token(), UserId(3))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_json_error_body_uses_status_text() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/5"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .get_user(&token(), UserId(5))
        .await
        .unwrap_err();

    match error {
        ApiError::Rejected {
            status,
            message,
            fields,
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
            assert!(fields.is_empty());
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_success_without_data_is_decode_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "message": "Detail Data User"
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .get_user(&token(), UserId(7))
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = ApiClient::with_base_url("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

    let error = client.list_users(&token()).await.unwrap_err();

    assert!(matches!(error, ApiError::Network { .. }));
}
