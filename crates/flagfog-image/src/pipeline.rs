//! Fetch, blur and encode.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use flagfog_core::{Config, ImageError, ImagePair, ImageProcessor};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Translate a symmetric Gaussian kernel size into the sigma the blur
/// actually runs with, using the OpenCV rule for sigma = 0:
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8`. The default kernel of 99 maps to
/// sigma 15.2, strong enough to hide the flag's shapes.
pub fn sigma_for_kernel(kernel: u32) -> f32 {
    let k = kernel.max(3) as f32;
    0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
}

/// Decode `bytes`, normalize to RGB keeping the original dimensions, blur
/// one copy, and encode both as PNG `data:` URIs.
pub fn derive_pair(bytes: &[u8], sigma: f32) -> Result<ImagePair, ImageError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
    let rgb = decoded.to_rgb8();
    let blurred = image::imageops::blur(&rgb, sigma);

    Ok(ImagePair {
        blurred: encode_data_uri(&blurred)?,
        unblurred: encode_data_uri(&rgb)?,
    })
}

/// PNG-encode a buffer and wrap it as `data:image/png;base64,...`.
fn encode_data_uri(img: &RgbImage) -> Result<String, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(buf.into_inner())
    ))
}

/// HTTP-backed flag processor.
pub struct FlagProcessor {
    client: reqwest::Client,
    blur_sigma: f32,
}

impl FlagProcessor {
    /// Create a processor from the runtime config. TLS verification stays
    /// on; the fetch timeout is the configured bound.
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.fetch_timeout)
                .build()
                .unwrap_or_default(),
            blur_sigma: sigma_for_kernel(config.blur_kernel),
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ImageError::Fetch(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageProcessor for FlagProcessor {
    async fn process(&self, flag_url: &str) -> Result<ImagePair, ImageError> {
        let bytes = self.fetch_bytes(flag_url).await?;
        tracing::debug!("fetched flag {} ({} bytes)", flag_url, bytes.len());
        derive_pair(&bytes, self.blur_sigma)
    }
}
