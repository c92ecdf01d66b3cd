use anyhow::{Context, Result};
use std::env;

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bucket holding every object this service manages (required)
    pub bucket: String,

    /// AWS region (default: "us-east-1")
    pub region: String,

    /// Custom S3 endpoint for MinIO-style deployments; when set, the client
    /// switches to path-style addressing
    pub endpoint_url: Option<String>,

    /// Successful uploads allowed per client (default: 2)
    pub upload_quota: u32,

    /// Maximum upload size in bytes (default: 10 MiB)
    pub max_upload_size: usize,

    /// Per-operation timeout for store calls in seconds (default: 30)
    pub store_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables. Credentials are not
    /// read here; the SDK's default provider chain picks up
    /// AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY on its own.
    pub fn from_env() -> Result<Self> {
        let bucket = env::var("S3_BUCKET_NAME").context("S3_BUCKET_NAME must be set")?;

        Ok(Self {
            bucket,

            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),

            endpoint_url: env::var("S3_ENDPOINT").ok(),

            upload_quota: env::var("UPLOAD_QUOTA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 1024 * 1024),

            store_timeout_secs: env::var("STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}
