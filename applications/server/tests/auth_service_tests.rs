/// Authentication service tests
/// Tests JWT generation, password hashing, token validation and stored credentials
mod common;

use common::fixtures;
use numis_core::UserId;
use numis_server::{AuthService, ServerError};
use numis_storage::users;

fn create_test_auth_service() -> AuthService {
    AuthService::new("test-secret-key".to_string(), 1, 1)
}

#[tokio::test]
async fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let hash = auth_service.hash_password("MySecurePassword123!").unwrap();
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));

    let hash2 = auth_service.hash_password("MySecurePassword123!").unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

#[tokio::test]
async fn test_password_verification() {
    let auth_service = create_test_auth_service();
    let hash = auth_service.hash_password("MySecurePassword123!").unwrap();

    assert!(auth_service
        .verify_password("MySecurePassword123!", &hash)
        .unwrap());
    assert!(!auth_service.verify_password("WrongPassword", &hash).unwrap());
    assert!(auth_service
        .verify_password("password", "not-a-valid-hash")
        .is_err());
}

#[tokio::test]
async fn test_token_round_trip_and_type_enforcement() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::new("user123");

    let pair = auth_service.issue_tokens(&user_id).unwrap();
    assert_eq!(auth_service.verify_access_token(&pair.access_token).unwrap(), user_id);
    assert_eq!(auth_service.verify_refresh_token(&pair.refresh_token).unwrap(), user_id);

    assert!(matches!(
        auth_service.verify_refresh_token(&pair.access_token),
        Err(ServerError::Auth(_))
    ));
    assert!(matches!(
        auth_service.verify_access_token(&pair.refresh_token),
        Err(ServerError::Auth(_))
    ));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let issuer = AuthService::new("secret-one".to_string(), 1, 1);
    let verifier = AuthService::new("secret-two".to_string(), 1, 1);

    let token = issuer.create_access_token(&UserId::new("user123")).unwrap();
    assert!(matches!(
        verifier.verify_access_token(&token),
        Err(ServerError::Jwt(_))
    ));
}

#[tokio::test]
async fn test_malformed_tokens_rejected() {
    let auth_service = create_test_auth_service();

    assert!(auth_service.verify_access_token("not.a.jwt").is_err());
    assert!(auth_service.verify_access_token("").is_err());
}

#[tokio::test]
async fn test_zero_lifetime_token_within_leeway() {
    let auth_service = AuthService::new("test-secret-key".to_string(), 0, 0);
    let token = auth_service
        .create_access_token(&UserId::new("user123"))
        .unwrap();

    // Default validation allows 60 seconds of leeway
    let claims = auth_service.verify_token(&token).unwrap();
    assert_eq!(claims.exp, claims.iat);
}

#[tokio::test]
async fn test_stored_credentials_flow() {
    let app = common::TestApp::new().await;
    let user = app
        .create_user(fixtures::ADMIN_EMAIL, fixtures::ADMIN_PASSWORD)
        .await;

    let found = users::find_by_email(&app.pool, "ADMIN@numis.test")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);

    let hash = users::get_password_hash(&app.pool, &user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(app
        .auth_service
        .verify_password(fixtures::ADMIN_PASSWORD, &hash)
        .unwrap());
}

#[tokio::test]
async fn test_password_reset_replaces_hash() {
    let app = common::TestApp::new().await;
    let user = app.create_user("ana@numis.test", "first-password").await;

    let new_hash = app.auth_service.hash_password("second-password").unwrap();
    users::set_password_hash(&app.pool, &user.id, &new_hash)
        .await
        .unwrap();

    let stored = users::get_password_hash(&app.pool, &user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!app
        .auth_service
        .verify_password("first-password", &stored)
        .unwrap());
    assert!(app
        .auth_service
        .verify_password("second-password", &stored)
        .unwrap());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = common::TestApp::new().await;
    app.create_user("ana@numis.test", "password123").await;

    let result = users::create(&app.pool, "Ana@Numis.test").await;
    assert!(matches!(
        result,
        Err(numis_storage::StorageError::Duplicate(_))
    ));
}
