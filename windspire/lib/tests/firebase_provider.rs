//! Firebase REST adapter against a mock Identity Toolkit.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use windspire_lib::identity::{
    AuthMethod, FirebaseConfig, FirebaseRestProvider, IdentityProvider, ProviderError,
};

fn provider(server: &MockServer) -> FirebaseRestProvider {
    let config = FirebaseConfig::new("test-key")
        .identity_url(format!("{}/v1", server.uri()))
        .token_url(format!("{}/secure/v1", server.uri()));
    FirebaseRestProvider::new(config).unwrap()
}

fn firebase_error(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "error": { "code": 400, "message": message, "errors": [] }
    }))
}

#[tokio::test]
async fn test_sign_in_with_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .and(query_param("key", "test-key"))
        .and(body_json(json!({
            "email": "jane@example.com",
            "password": "hunter22",
            "returnSecureToken": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": "fb-uid",
            "email": "jane@example.com",
            "displayName": "",
            "idToken": "id-token-1",
            "registered": true,
            "refreshToken": "refresh-1",
            "expiresIn": "3600"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credential = provider(&server)
        .authenticate(AuthMethod::EmailPassword {
            email: "jane@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(credential.id_token, "id-token-1");
    assert_eq!(credential.refresh_token.as_deref(), Some("refresh-1"));
    assert_eq!(credential.local_id, "fb-uid");
    assert_eq!(credential.display_name, None);
}

#[tokio::test]
async fn test_sign_in_errors_are_translated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(firebase_error("INVALID_LOGIN_CREDENTIALS"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .authenticate(AuthMethod::EmailPassword {
            email: "jane@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some("INVALID_LOGIN_CREDENTIALS"));
    assert_eq!(
        err.to_string(),
        "Invalid email or password. Please check your credentials and try again."
    );
}

#[tokio::test]
async fn test_sign_up_sets_name_and_sends_verification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": "fb-new",
            "email": "new@example.com",
            "idToken": "id-token-signup",
            "refreshToken": "refresh-signup",
            "expiresIn": "3600"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:update"))
        .and(body_json(json!({
            "idToken": "id-token-signup",
            "displayName": "New Sailor",
            "returnSecureToken": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": "fb-new",
            "email": "new@example.com",
            "displayName": "New Sailor",
            "idToken": "id-token-named",
            "refreshToken": "refresh-named",
            "emailVerified": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:sendOobCode"))
        .and(body_json(json!({ "requestType": "VERIFY_EMAIL", "idToken": "id-token-named" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "new@example.com" })))
        .expect(1)
        .mount(&server)
        .await;

    let credential = provider(&server)
        .authenticate(AuthMethod::SignUp {
            email: "new@example.com".to_string(),
            password: "hunter22".to_string(),
            display_name: Some("New Sailor".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(credential.id_token, "id-token-named");
    assert_eq!(credential.refresh_token.as_deref(), Some("refresh-named"));
    assert_eq!(credential.display_name.as_deref(), Some("New Sailor"));
    assert!(!credential.email_verified);
}

#[tokio::test]
async fn test_sign_up_existing_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .respond_with(firebase_error("EMAIL_EXISTS"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .authenticate(AuthMethod::SignUp {
            email: "jane@example.com".to_string(),
            password: "hunter22".to_string(),
            display_name: None,
        })
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "An account with this email already exists. Please sign in instead."
    );
}

#[tokio::test]
async fn test_google_is_unsupported_without_a_request() {
    let server = MockServer::start().await;

    let err = provider(&server)
        .authenticate(AuthMethod::Google)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Unsupported { method: "Google" }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_password_reset_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:sendOobCode"))
        .and(body_json(json!({ "requestType": "PASSWORD_RESET", "email": "jane@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "jane@example.com" })))
        .expect(1)
        .mount(&server)
        .await;

    provider(&server)
        .send_password_reset("jane@example.com")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_password_reset_unknown_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:sendOobCode"))
        .respond_with(firebase_error("EMAIL_NOT_FOUND"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .send_password_reset("ghost@example.com")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "No account found with this email. Please sign up first."
    );
}

#[tokio::test]
async fn test_refresh_uses_secure_token_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/secure/v1/token"))
        .and(query_param("key", "test-key"))
        .and(body_json(json!({ "grant_type": "refresh_token", "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expires_in": "3600",
            "token_type": "Bearer",
            "refresh_token": "refresh-2",
            "id_token": "id-token-2",
            "user_id": "fb-uid",
            "project_id": "1234"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credential = provider(&server).refresh_id_token("refresh-1").await.unwrap();

    assert_eq!(credential.id_token, "id-token-2");
    assert_eq!(credential.refresh_token.as_deref(), Some("refresh-2"));
    assert_eq!(credential.local_id, "fb-uid");
}
