// API handlers for the web server

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::ApiError,
    extract_request_data::extract_adjust_request,
    image_ops::{adjust_brightness_contrast, channel_histograms, decode_image, encode_png_base64},
    models::{AdjustResponse, AdjustmentParams},
};

// --- POST / ---
// Adjusts brightness/contrast of an uploaded image and returns both images
// (base64 PNG) together with their per-channel histograms.
pub async fn adjust_image(request: Request) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();

    let upload = extract_adjust_request(request).await?;
    let params = AdjustmentParams::from_fields(upload.alpha.as_deref(), upload.beta.as_deref())?;

    info!(
        "Adjust request: {} byte upload, alpha={}, beta={}, request_id={}",
        upload.file_data.len(),
        params.alpha,
        params.beta,
        request_id
    );

    // Decode, transform, histogram and re-encode are all CPU-bound; run the
    // whole pipeline on the blocking pool.
    let response = tokio::task::spawn_blocking(move || process_upload(&upload.file_data, params))
        .await
        .map_err(|e| ApiError::InternalServerError(format!("Error processing image: {}", e)))??;

    debug!("Adjust request {} completed", request_id);

    Ok(([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(response)).into_response())
}

fn process_upload(file_data: &[u8], params: AdjustmentParams) -> Result<AdjustResponse, ApiError> {
    let original = decode_image(file_data)
        .map_err(|e| ApiError::BadRequest(format!("Error reading image: {}", e)))?;

    debug!(
        "Input image decoded: {}x{}",
        original.width(),
        original.height()
    );

    let adjusted = adjust_brightness_contrast(&original, params);

    let original_histogram = channel_histograms(&original);
    let adjusted_histogram = channel_histograms(&adjusted);

    let original_image = encode_png_base64(&original)
        .map_err(|e| ApiError::InternalServerError(format!("Error processing image: {}", e)))?;
    let adjusted_image = encode_png_base64(&adjusted)
        .map_err(|e| ApiError::InternalServerError(format!("Error processing image: {}", e)))?;

    Ok(AdjustResponse {
        original_image,
        adjusted_image,
        original_histogram,
        adjusted_histogram,
    })
}

// --- OPTIONS / ---
// CORS preflight; answered unconditionally with no body.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}
