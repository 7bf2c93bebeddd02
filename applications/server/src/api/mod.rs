/// API route modules
pub mod auth;
pub mod coins;
pub mod health;
pub mod images;

use crate::{middleware, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Multipart framing on top of the configured file limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Every route of the server, without transport layers
///
/// `/api/health`, `/api/auth/login` and `/api/auth/refresh` are public; the
/// rest of `/api` needs a Bearer access token. `/images/*` serves uploaded
/// files publicly.
pub fn router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);

    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh));

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        // Coins
        .route("/coins", get(coins::list_coins).post(coins::create_coin))
        .route(
            "/coins/:id",
            get(coins::get_coin)
                .put(coins::update_coin)
                .delete(coins::delete_coin),
        )
        // Images
        .route(
            "/images",
            post(images::upload_image)
                .layer(DefaultBodyLimit::max(app_state.max_upload_bytes + MULTIPART_OVERHEAD)),
        )
        .route("/images/:path", axum::routing::delete(images::delete_image))
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    let images_dir = ServeDir::new(app_state.image_storage.base_path());

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .nest_service("/images", images_dir)
        .with_state(app_state)
}
