/// Image upload and delete API routes
use crate::{
    error::{Result, ServerError},
    services::image_storage::normalize_key,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub path: String,
}

/// POST /api/images
///
/// Multipart form with a `file` part and an optional `path` text field. The
/// key is `path` when given, else the file name of the `file` part. An
/// existing key is refused with 409.
pub async fn upload_image(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| ServerError::BadRequest("Expected multipart/form-data".to_string()))?;

    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut requested_path: Option<String> = None;
    let mut file: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "path" => {
                requested_path = Some(field.text().await.map_err(|e| {
                    ServerError::BadRequest(format!("Failed to read path: {}", e))
                })?);
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let declared = field.content_type().map(|m| m.essence_str().to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Failed to read file: {}", e)))?;
                file = Some((file_name, declared, data));
            }
            _ => {}
        }
    }

    let (file_name, declared, data) =
        file.ok_or_else(|| ServerError::BadRequest("Missing file".to_string()))?;
    if data.is_empty() {
        return Err(ServerError::BadRequest("Empty file".to_string()));
    }
    // The body limit leaves room for multipart framing; the file itself is
    // held to the configured maximum
    if data.len() > app_state.max_upload_bytes {
        return Err(ServerError::PayloadTooLarge(format!(
            "Image exceeds {} bytes",
            app_state.max_upload_bytes
        )));
    }

    let key = normalize_key(requested_path.as_deref().unwrap_or(&file_name))?;

    let content_type = declared
        .filter(|c| c != "application/octet-stream")
        .unwrap_or_else(|| crate::services::image_storage::content_type_for(&key));
    if !content_type.starts_with("image/") {
        return Err(ServerError::BadRequest(format!(
            "Only images can be uploaded, got {content_type}"
        )));
    }

    let stored = app_state.image_storage.store(&key, &data).await?;
    tracing::info!(path = %stored.path, size = data.len(), "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: stored.url,
            path: stored.path,
        }),
    ))
}

/// DELETE /api/images/:path
pub async fn delete_image(
    Path(path): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state.image_storage.delete(&path).await?;
    tracing::info!(path = %path, "Image deleted");
    Ok(StatusCode::NO_CONTENT)
}
