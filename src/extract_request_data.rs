// Multipart extraction for the adjustment endpoint

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Raw fields of an adjustment upload, before numeric parsing.
#[derive(Debug)]
pub struct AdjustUpload {
    pub file_data: Vec<u8>,
    pub alpha: Option<String>,
    pub beta: Option<String>,
}

pub async fn extract_adjust_request(request: Request) -> Result<AdjustUpload, ApiError> {
    // Get the content type from the request headers
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.starts_with(mime::MULTIPART_FORM_DATA.essence_str()) {
        return Err(ApiError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    // Convert Request to Multipart
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to process multipart request: {}", e)))?;

    let mut file_data_opt: Option<Vec<u8>> = None;
    let mut alpha: Option<String> = None;
    let mut beta: Option<String> = None;

    // Loop through all fields, collecting "file", "alpha" and "beta"
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to process multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or("unnamed").to_string();

        match field_name.as_str() {
            "file" => {
                if file_data_opt.is_some() {
                    warn!("Multiple 'file' fields found in multipart request, using the last one");
                }

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        ApiError::BadRequest(format!("Failed to read file data: {}", e))
                    })?
                    .to_vec();

                file_data_opt = Some(data);
            }
            "alpha" => {
                alpha = Some(read_text_field(field, "alpha").await?);
            }
            "beta" => {
                beta = Some(read_text_field(field, "beta").await?);
            }
            _ => {
                debug!("Ignoring multipart field: {}", field_name);
            }
        }
    }

    // An absent file field and an empty one are the same client error.
    match file_data_opt {
        Some(data) if !data.is_empty() => Ok(AdjustUpload {
            file_data: data,
            alpha,
            beta,
        }),
        _ => Err(ApiError::BadRequest("No file provided".to_string())),
    }
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read '{}' field: {}", name, e)))
}
