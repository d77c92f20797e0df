use std::sync::Arc;

use anyhow::Result;
use object_store::{ObjectStore, aws::AmazonS3Builder};

use crate::config::StorageConfig;

/// S3-compatible store with path-style addressing. Plain HTTP endpoints are allowed for
/// local MinIO.
pub fn create_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    let store = AmazonS3Builder::new()
        .with_endpoint(&config.endpoint)
        .with_access_key_id(&config.access_key)
        .with_secret_access_key(&config.secret_key)
        .with_region(&config.region)
        .with_bucket_name(&config.bucket)
        .with_virtual_hosted_style_request(false)
        .with_allow_http(true)
        .build()?;

    tracing::info!(
        endpoint = %config.endpoint,
        bucket = %config.bucket,
        "Object store configured"
    );

    Ok(Arc::new(store))
}
