use crate::config::AppConfig;
use crate::services::storage::S3ObjectStore;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::config::Region;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builds the S3 client and makes sure the configured bucket exists.
pub async fn setup_storage(config: &AppConfig) -> Arc<S3ObjectStore> {
    info!(
        "☁️  S3 Storage: bucket '{}' (region {}, endpoint {})",
        config.bucket,
        config.region,
        config.endpoint_url.as_deref().unwrap_or("default")
    );

    // Bounded per-operation timeout so a hung store call cannot hang the
    // request that issued it.
    let timeouts = TimeoutConfig::builder()
        .operation_timeout(Duration::from_secs(config.store_timeout_secs))
        .build();

    let mut loader = aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .timeout_config(timeouts);
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    let aws_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&aws_config);
    if config.endpoint_url.is_some() {
        // MinIO and friends route by path, not by virtual host
        builder = builder.force_path_style(true);
    }
    let s3_client = aws_sdk_s3::Client::from_conf(builder.build());

    match s3_client.head_bucket().bucket(&config.bucket).send().await {
        Ok(_) => info!("✅ Bucket '{}' is ready", config.bucket),
        Err(_) => {
            info!("🪣 Bucket '{}' not found, creating...", config.bucket);
            if let Err(e) = s3_client
                .create_bucket()
                .bucket(&config.bucket)
                .send()
                .await
            {
                tracing::error!("❌ Failed to create bucket '{}': {}", config.bucket, e);
            } else {
                info!("✅ Bucket '{}' created successfully", config.bucket);
            }
        }
    }

    Arc::new(S3ObjectStore::new(s3_client, config.bucket.clone()))
}
