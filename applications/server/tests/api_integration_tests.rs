/// API integration tests
/// Tests complete HTTP request/response cycles with a real database and image directory
mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, body_json, coin_json, fixtures, TestApp, MAX_UPLOAD_BYTES, PUBLIC_URL};
use serde_json::json;

#[tokio::test]
async fn test_coins_require_authentication() {
    let app = TestApp::new().await;

    let response = app.get("/api/coins", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/api/coins", Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_not_accepted_as_access() {
    let app = TestApp::new().await;
    let user = app.create_user("ana@numis.test", "password123").await;
    let refresh = app.auth_service.create_refresh_token(&user.id).unwrap();

    let response = app.get("/api/coins", Some(&refresh)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_flow() {
    let app = TestApp::new().await;
    app.create_user(fixtures::ADMIN_EMAIL, fixtures::ADMIN_PASSWORD)
        .await;

    let response = app
        .send_json(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "email": "Admin@Numis.test", "password": fixtures::ADMIN_PASSWORD }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["email"], fixtures::ADMIN_EMAIL);
    let access = body["access_token"].as_str().unwrap().to_string();
    let refresh = body["refresh_token"].as_str().unwrap().to_string();

    let response = app.get("/api/auth/me", Some(&access)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["email"], fixtures::ADMIN_EMAIL);
    assert_eq!(me["id"], body["user"]["id"]);

    let response = app
        .send_json(
            "POST",
            "/api/auth/refresh",
            None,
            &json!({ "refresh_token": refresh }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["access_token"].as_str().unwrap(), access);
    assert_ne!(rotated["refresh_token"].as_str().unwrap(), refresh);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.create_user(fixtures::ADMIN_EMAIL, fixtures::ADMIN_PASSWORD)
        .await;

    let response = app
        .send_json(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "email": fixtures::ADMIN_EMAIL, "password": "nope" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email_same_message() {
    let app = TestApp::new().await;

    let response = app
        .send_json(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "email": "ghost@numis.test", "password": "whatever" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_refresh_with_access_token_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .send_json(
            "POST",
            "/api/auth/refresh",
            None,
            &json!({ "refresh_token": token }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_get_coin() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .send_json("POST", "/api/coins", Some(&token), &coin_json("peso-1995", 3, true))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "peso-1995");
    assert_eq!(created["prices"][0]["currency"], "ARS");
    assert!(created["created_at"].is_string());

    let response = app.get(&format!("/api/coins/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["stock"], 3);
    assert_eq!(fetched["images"][0]["path"], "peso-1995.jpg");
}

#[tokio::test]
async fn test_create_coin_with_empty_name_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .send_json("POST", "/api/coins", Some(&token), &coin_json("   ", 1, true))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_coin_with_zero_price_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let mut body = coin_json("centavo", 1, true);
    body["prices"] = json!([{ "amount": 0.0, "currency": "USD" }]);

    let response = app
        .send_json("POST", "/api/coins", Some(&token), &body)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_coins_newest_first_and_active_filter() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    for (name, active) in [("first", true), ("second", false), ("third", true)] {
        let response = app
            .send_json("POST", "/api/coins", Some(&token), &coin_json(name, 1, active))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let all = body_json(app.get("/api/coins", Some(&token)).await).await;
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);

    let active = body_json(app.get("/api/coins?active=true", Some(&token)).await).await;
    let names: Vec<&str> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["third", "first"]);

    let inactive = body_json(app.get("/api/coins?active=false", Some(&token)).await).await;
    assert_eq!(inactive.as_array().unwrap().len(), 1);
    assert_eq!(inactive[0]["name"], "second");
}

#[tokio::test]
async fn test_update_active_flag_only() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = body_json(
        app.send_json("POST", "/api/coins", Some(&token), &coin_json("real", 2, true))
            .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .send_json(
            "PUT",
            &format!("/api/coins/{id}"),
            Some(&token),
            &json!({ "kind": "active", "data": false }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["active"], false);
    assert_eq!(updated["name"], "real");
    assert_eq!(updated["stock"], 2);
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_update_full_replaces_fields() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = body_json(
        app.send_json("POST", "/api/coins", Some(&token), &coin_json("austral", 1, true))
            .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let mut replacement = coin_json("austral-1985", 0, false);
    replacement["country"] = json!("Argentina");
    replacement["composition"] = json!("Bronce");
    replacement["prices"] = json!([
        { "amount": 10.5, "currency": "USD" },
        { "amount": 9.0, "currency": "EUR" }
    ]);

    let response = app
        .send_json(
            "PUT",
            &format!("/api/coins/{id}"),
            Some(&token),
            &json!({ "kind": "full", "data": replacement }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "austral-1985");
    assert_eq!(updated["stock"], 0);
    assert_eq!(updated["composition"], "Bronce");
    assert_eq!(updated["prices"][1]["currency"], "EUR");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_missing_coin_is_404() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app.get("/api/coins/does-not-exist", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send_json(
            "PUT",
            "/api/coins/does-not-exist",
            Some(&token),
            &json!({ "kind": "active", "data": true }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.delete("/api/coins/does-not-exist", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_coin() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = body_json(
        app.send_json("POST", "/api/coins", Some(&token), &coin_json("patacon", 1, true))
            .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = app.delete(&format!("/api/coins/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get(&format!("/api/coins/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_serve_and_delete_image() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let data = b"\xFF\xD8\xFFfake-jpeg";

    let response = app
        .upload(
            &token,
            Some("1700000000000_peso.jpg"),
            "peso.jpg",
            "image/jpeg",
            data,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["path"], "1700000000000_peso.jpg");
    assert_eq!(
        body["url"],
        format!("{PUBLIC_URL}/images/1700000000000_peso.jpg")
    );
    assert!(app.image_storage.exists("1700000000000_peso.jpg"));

    // Served publicly
    let response = app.get("/images/1700000000000_peso.jpg", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    assert_eq!(body_bytes(response).await, data.to_vec());

    let response = app
        .delete("/api/images/1700000000000_peso.jpg", &token)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!app.image_storage.exists("1700000000000_peso.jpg"));

    let response = app
        .delete("/api/images/1700000000000_peso.jpg", &token)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_uses_file_name_without_path_field() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .upload(&token, None, "reverso.png", "image/png", b"png-bytes")
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["path"], "reverso.png");
}

#[tokio::test]
async fn test_upload_at_size_limit_accepted() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .upload(
            &token,
            Some("limit.jpg"),
            "limit.jpg",
            "image/jpeg",
            &vec![7u8; MAX_UPLOAD_BYTES],
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(app.image_storage.exists("limit.jpg"));
}

#[tokio::test]
async fn test_upload_over_size_limit_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .upload(
            &token,
            Some("big.jpg"),
            "big.jpg",
            "image/jpeg",
            &vec![7u8; MAX_UPLOAD_BYTES + 1],
        )
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!app.image_storage.exists("big.jpg"));
}

#[tokio::test]
async fn test_upload_existing_key_conflicts() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .upload(&token, Some("1_IMG_0001.jpg"), "IMG_0001.jpg", "image/jpeg", b"first")
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .upload(&token, Some("1_IMG_0001.jpg"), "IMG_0001.jpg", "image/jpeg", b"second")
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let served = app.get("/images/1_IMG_0001.jpg", None).await;
    assert_eq!(body_bytes(served).await, b"first".to_vec());
}

#[tokio::test]
async fn test_upload_rejects_unsafe_path() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .upload(&token, Some("../escape.jpg"), "x.jpg", "image/jpeg", b"data")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .upload(&token, Some("notes.txt"), "notes.txt", "text/plain", b"hello")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_requires_authentication() {
    let app = TestApp::new().await;
    let (boundary, body) = common::multipart_body(None, "a.jpg", "image/jpeg", b"data");

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/images")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}
