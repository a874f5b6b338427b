// API data models for the adjustment endpoint

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Brightness/contrast parameters for the affine transform
/// `output = alpha * input + beta`, saturated to the 8-bit range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentParams {
    pub alpha: f64,
    pub beta: i32,
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 0,
        }
    }
}

impl AdjustmentParams {
    /// Parses the raw multipart field values. Absent fields take the
    /// defaults (alpha 1.0, beta 0); unparsable values are a client error.
    pub fn from_fields(alpha: Option<&str>, beta: Option<&str>) -> Result<Self, ApiError> {
        let alpha = alpha.unwrap_or("1.0").trim().parse::<f64>();
        let beta = beta.unwrap_or("0").trim().parse::<i32>();

        match (alpha, beta) {
            (Ok(alpha), Ok(beta)) => Ok(Self { alpha, beta }),
            _ => Err(ApiError::BadRequest(
                "Invalid alpha or beta value".to_string(),
            )),
        }
    }
}

/// Per-channel pixel counts: index i counts pixels whose channel value is
/// exactly i, so each channel sums to width * height.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistograms {
    pub blue: Vec<u64>,
    pub green: Vec<u64>,
    pub red: Vec<u64>,
}

/// Response envelope for a successful adjustment request.
/// Key names are a compatibility contract with existing clients.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdjustResponse {
    pub original_image: String,
    pub adjusted_image: String,
    pub original_histogram: ChannelHistograms,
    pub adjusted_histogram: ChannelHistograms,
}
