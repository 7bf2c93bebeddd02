//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use numis_core::{AuthUser, CoinDetails, CoinPayload, CurrencyCode, ImageRef, Price};
use numis_server::{api, services::ImageStorage, AppState, AuthService};
use numis_storage::{users, LocalRecordStore};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const PUBLIC_URL: &str = "http://numis.test";
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;

/// Test user credentials
pub mod fixtures {
    pub const ADMIN_EMAIL: &str = "admin@numis.test";
    pub const ADMIN_PASSWORD: &str = "AdminPassword456!";
}

/// A fully wired server over a real `SQLite` file and an image directory
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub image_storage: Arc<ImageStorage>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = numis_storage::create_pool(&db_url).await.unwrap();
        numis_storage::run_migrations(&pool).await.unwrap();

        let image_storage = ImageStorage::new(temp_dir.path().join("images"), PUBLIC_URL);
        image_storage.initialize().await.unwrap();
        let image_storage = Arc::new(image_storage);

        let auth_service = Arc::new(AuthService::new("test-secret-key".to_string(), 1, 1));

        let app_state = AppState::new(
            Arc::new(LocalRecordStore::new(pool.clone())),
            Arc::clone(&auth_service),
            Arc::clone(&image_storage),
            MAX_UPLOAD_BYTES,
        );

        Self {
            router: api::router(app_state),
            pool,
            auth_service,
            image_storage,
            _temp_dir: temp_dir,
        }
    }

    /// Create an administrator with a password
    pub async fn create_user(&self, email: &str, password: &str) -> AuthUser {
        let user = users::create(&self.pool, email).await.unwrap();
        let hash = self.auth_service.hash_password(password).unwrap();
        users::set_password_hash(&self.pool, &user.id, &hash)
            .await
            .unwrap();
        user
    }

    /// Create the default administrator and return an access token for it
    pub async fn admin_token(&self) -> String {
        let user = self
            .create_user(fixtures::ADMIN_EMAIL, fixtures::ADMIN_PASSWORD)
            .await;
        self.auth_service.create_access_token(&user.id).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        self.send(request("GET", uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response<Body> {
        self.send(request("DELETE", uri, Some(token)).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> Response<Body> {
        let request = request(method, uri, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap();
        self.send(request).await
    }

    /// Upload an image as multipart, with an optional `path` field
    pub async fn upload(
        &self,
        token: &str,
        path: Option<&str>,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Response<Body> {
        let (boundary, body) = multipart_body(path, file_name, content_type, data);
        let request = request("POST", "/api/images", Some(token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}

fn request(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

/// Build a multipart/form-data body by hand
pub fn multipart_body(
    path: Option<&str>,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> (String, Vec<u8>) {
    let boundary = "numis-test-boundary".to_string();
    let mut body = Vec::new();

    if let Some(path) = path {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"path\"\r\n\r\n{path}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    (boundary, body)
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Test fixture: a coin payload as the panel would send it
pub fn coin_payload(name: &str, stock: u32, active: bool) -> CoinPayload {
    CoinPayload {
        name: name.to_string(),
        prices: vec![Price::new(2500.0, CurrencyCode::Ars)],
        description: String::new(),
        country: "Argentina".to_string(),
        stock,
        active,
        images: vec![ImageRef::new(
            format!("{PUBLIC_URL}/images/{name}.jpg"),
            format!("{name}.jpg"),
        )],
        details: CoinDetails::default(),
    }
}

pub fn coin_json(name: &str, stock: u32, active: bool) -> serde_json::Value {
    serde_json::to_value(coin_payload(name, stock, active)).unwrap()
}
