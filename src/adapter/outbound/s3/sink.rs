//! `PutObject` sink.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use tracing::info;

use super::settings::UploadConfig;
use crate::error::{Error, Result};
use crate::port::outbound::SnapshotSink;

/// Publishes the document with a single `PutObject`.
pub struct S3Sink {
    bucket: String,
    config: UploadConfig,
}

impl S3Sink {
    #[must_use]
    pub fn new(bucket: String, config: UploadConfig) -> Self {
        Self { bucket, config }
    }

    async fn client(&self) -> Client {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.config.region.clone()))
            .load()
            .await;
        Client::new(&shared)
    }
}

#[async_trait]
impl SnapshotSink for S3Sink {
    async fn write(&self, body: &str) -> Result<()> {
        self.client()
            .await
            .put_object()
            .bucket(&self.bucket)
            .key(&self.config.key)
            .body(ByteStream::from(body.as_bytes().to_vec()))
            .acl(ObjectCannedAcl::from(self.config.acl.as_str()))
            .cache_control(&self.config.cache_control)
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| Error::Storage(DisplayErrorContext(&e).to_string()))?;

        info!(bucket = %self.bucket, key = %self.config.key, "Snapshot uploaded");
        Ok(())
    }

    fn name(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.config.key)
    }
}
