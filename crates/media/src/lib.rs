//! Cloudinary admin-API client.
//!
//! Only the one operation this backend needs is wrapped: batched deletion
//! of uploaded images by public id. Callers treat deletion as best-effort;
//! this client reports failures faithfully and leaves the swallowing
//! decision to the caller.

use std::time::Duration;

/// Cloudinary caps `delete_resources` at 100 public ids per request.
const MAX_BATCH: usize = 100;

/// HTTP request timeout for a single admin-API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for admin-API failures.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Cloudinary returned a non-2xx status code.
    #[error("Cloudinary returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Cloudinary credentials, loaded from the environment.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl MediaConfig {
    /// Load Cloudinary configuration from environment variables.
    ///
    /// | Env Var                 | Required |
    /// |-------------------------|----------|
    /// | `CLOUDINARY_CLOUD_NAME` | **yes**  |
    /// | `CLOUDINARY_API_KEY`    | **yes**  |
    /// | `CLOUDINARY_API_SECRET` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if any variable is unset; image cleanup cannot run without
    /// credentials and we want misconfiguration to fail at startup.
    pub fn from_env() -> Self {
        let cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME")
            .expect("CLOUDINARY_CLOUD_NAME must be set in the environment");
        let api_key = std::env::var("CLOUDINARY_API_KEY")
            .expect("CLOUDINARY_API_KEY must be set in the environment");
        let api_secret = std::env::var("CLOUDINARY_API_SECRET")
            .expect("CLOUDINARY_API_SECRET must be set in the environment");

        Self {
            cloud_name,
            api_key,
            api_secret,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Thin client over the Cloudinary admin API.
pub struct MediaClient {
    client: reqwest::Client,
    config: MediaConfig,
}

impl MediaClient {
    /// Create a client with a pre-configured HTTP client.
    pub fn new(config: MediaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Delete uploaded images by public id.
    ///
    /// Ids are sent in batches of at most 100 (the admin-API limit). The
    /// first failing batch aborts the call; already-deleted batches stay
    /// deleted, which is acceptable because the operation is best-effort.
    pub async fn delete_images(&self, public_ids: &[String]) -> Result<(), MediaError> {
        for batch in public_ids.chunks(MAX_BATCH) {
            self.delete_batch(batch).await?;
        }
        Ok(())
    }

    async fn delete_batch(&self, public_ids: &[String]) -> Result<(), MediaError> {
        let url = delete_resources_url(&self.config.cloud_name);
        let params: Vec<(&str, &str)> = public_ids
            .iter()
            .map(|id| ("public_ids[]", id.as_str()))
            .collect();

        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::HttpStatus(status.as_u16()));
        }

        tracing::debug!(count = public_ids.len(), "Deleted hosted images");
        Ok(())
    }
}

/// Admin-API endpoint for deleting uploaded image resources.
fn delete_resources_url(cloud_name: &str) -> String {
    format!("https://api.cloudinary.com/v1_1/{cloud_name}/resources/image/upload")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_url_embeds_cloud_name() {
        assert_eq!(
            delete_resources_url("rmu-demo"),
            "https://api.cloudinary.com/v1_1/rmu-demo/resources/image/upload"
        );
    }
}
