//! Integration tests for administrator accounts


use numis_core::types::UserId;
use numis_storage::StorageError;
use test_helpers::*;

#[tokio::test]
async fn test_create_and_find_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = numis_storage::users::create(pool, "Admin@Numis.test ")
        .await
        .unwrap();
    assert_eq!(user.email, "admin@numis.test");

    let found = numis_storage::users::find_by_email(pool, "ADMIN@numis.test")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, user);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    numis_storage::users::create(pool, "admin@numis.test")
        .await
        .unwrap();
    let err = numis_storage::users::create(pool, "admin@numis.test")
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Duplicate(_)));
}

#[tokio::test]
async fn test_password_hash_upsert() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = numis_storage::users::create(pool, "admin@numis.test")
        .await
        .unwrap();

    assert!(numis_storage::users::get_password_hash(pool, &user.id)
        .await
        .unwrap()
        .is_none());

    numis_storage::users::set_password_hash(pool, &user.id, "hash-1")
        .await
        .unwrap();
    numis_storage::users::set_password_hash(pool, &user.id, "hash-2")
        .await
        .unwrap();

    let hash = numis_storage::users::get_password_hash(pool, &user.id)
        .await
        .unwrap();
    assert_eq!(hash.as_deref(), Some("hash-2"));
}

#[tokio::test]
async fn test_password_for_unknown_user_fails() {
    let test_db = TestDb::new().await;

    let err = numis_storage::users::set_password_hash(
        test_db.pool(),
        &UserId::new("ghost"),
        "hash",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_users_sorted_by_email() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    numis_storage::users::create(pool, "zoe@numis.test").await.unwrap();
    numis_storage::users::create(pool, "ana@numis.test").await.unwrap();

    let users = numis_storage::users::get_all(pool).await.unwrap();
    let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["ana@numis.test", "zoe@numis.test"]);
}
