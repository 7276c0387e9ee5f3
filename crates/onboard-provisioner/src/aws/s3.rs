use aws_sdk_s3::Client;

use crate::error::{ProviderError, format_err_chain};
use crate::service::{BoxFuture, StorageService};

/// S3-backed storage operations.
pub struct S3StorageService {
    client: Client,
    region: String,
}

impl S3StorageService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        let region = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "us-east-1".to_string());
        Self {
            client: Client::new(config),
            region,
        }
    }
}

fn api_err(call: &str, e: &dyn std::error::Error) -> ProviderError {
    ProviderError::Api(format!("{call} failed: {}", format_err_chain(e)))
}

impl StorageService for S3StorageService {
    fn create_bucket(&self, bucket: &str) -> BoxFuture<'_, Result<(), ProviderError>> {
        let bucket = bucket.to_string();
        Box::pin(async move {
            let mut builder = self.client.create_bucket().bucket(&bucket);

            if self.region != "us-east-1" {
                builder = builder.create_bucket_configuration(
                    aws_sdk_s3::types::CreateBucketConfiguration::builder()
                        .location_constraint(aws_sdk_s3::types::BucketLocationConstraint::from(
                            self.region.as_str(),
                        ))
                        .build(),
                );
            }

            match builder.send().await {
                Ok(_) => {
                    tracing::debug!(bucket = %bucket, "bucket created");
                    Ok(())
                }
                Err(e) => {
                    if let Some(se) = e.as_service_error() {
                        // Owned-by-caller and owned-by-someone-else are the
                        // two outcomes the workflow must tell apart.
                        if se.is_bucket_already_owned_by_you() {
                            return Err(ProviderError::AlreadyExists);
                        }
                        if se.is_bucket_already_exists() {
                            return Err(ProviderError::OwnedByAnother);
                        }
                    }
                    Err(api_err("s3:CreateBucket", &e))
                }
            }
        })
    }

    fn put_public_access_block(&self, bucket: &str) -> BoxFuture<'_, Result<(), ProviderError>> {
        let bucket = bucket.to_string();
        Box::pin(async move {
            self.client
                .put_public_access_block()
                .bucket(&bucket)
                .public_access_block_configuration(
                    aws_sdk_s3::types::PublicAccessBlockConfiguration::builder()
                        .block_public_acls(true)
                        .ignore_public_acls(true)
                        .block_public_policy(true)
                        .restrict_public_buckets(true)
                        .build(),
                )
                .send()
                .await
                .map_err(|e| api_err("s3:PutPublicAccessBlock", &e))?;
            Ok(())
        })
    }

    fn put_bucket_policy(
        &self,
        bucket: &str,
        document: &serde_json::Value,
    ) -> BoxFuture<'_, Result<(), ProviderError>> {
        let bucket = bucket.to_string();
        let policy = document.to_string();
        Box::pin(async move {
            self.client
                .put_bucket_policy()
                .bucket(&bucket)
                .policy(policy)
                .send()
                .await
                .map_err(|e| api_err("s3:PutBucketPolicy", &e))?;
            Ok(())
        })
    }

    fn put_lifecycle_rule(
        &self,
        bucket: &str,
        days_after_initiation: u32,
    ) -> BoxFuture<'_, Result<(), ProviderError>> {
        let bucket = bucket.to_string();
        Box::pin(async move {
            let rule = aws_sdk_s3::types::LifecycleRule::builder()
                .id(format!("delete_after_{days_after_initiation}_days"))
                .status(aws_sdk_s3::types::ExpirationStatus::Enabled)
                .filter(
                    aws_sdk_s3::types::LifecycleRuleFilter::builder()
                        .prefix("")
                        .build(),
                )
                .abort_incomplete_multipart_upload(
                    aws_sdk_s3::types::AbortIncompleteMultipartUpload::builder()
                        .days_after_initiation(days_after_initiation as i32)
                        .build(),
                )
                .build()
                .map_err(|e| ProviderError::Api(e.to_string()))?;

            self.client
                .put_bucket_lifecycle_configuration()
                .bucket(&bucket)
                .lifecycle_configuration(
                    aws_sdk_s3::types::BucketLifecycleConfiguration::builder()
                        .rules(rule)
                        .build()
                        .map_err(|e| ProviderError::Api(e.to_string()))?,
                )
                .send()
                .await
                .map_err(|e| api_err("s3:PutBucketLifecycleConfiguration", &e))?;
            Ok(())
        })
    }

    fn put_default_encryption(&self, bucket: &str) -> BoxFuture<'_, Result<(), ProviderError>> {
        let bucket = bucket.to_string();
        Box::pin(async move {
            self.client
                .put_bucket_encryption()
                .bucket(&bucket)
                .server_side_encryption_configuration(
                    aws_sdk_s3::types::ServerSideEncryptionConfiguration::builder()
                        .rules(
                            aws_sdk_s3::types::ServerSideEncryptionRule::builder()
                                .apply_server_side_encryption_by_default(
                                    aws_sdk_s3::types::ServerSideEncryptionByDefault::builder()
                                        .sse_algorithm(
                                            aws_sdk_s3::types::ServerSideEncryption::Aes256,
                                        )
                                        .build()
                                        .map_err(|e| ProviderError::Api(e.to_string()))?,
                                )
                                .build(),
                        )
                        .build()
                        .map_err(|e| ProviderError::Api(e.to_string()))?,
                )
                .send()
                .await
                .map_err(|e| api_err("s3:PutBucketEncryption", &e))?;
            Ok(())
        })
    }

    fn put_notification(
        &self,
        bucket: &str,
        queue_arn: &str,
    ) -> BoxFuture<'_, Result<(), ProviderError>> {
        let bucket = bucket.to_string();
        let queue_arn = queue_arn.to_string();
        Box::pin(async move {
            let queue_config = aws_sdk_s3::types::QueueConfiguration::builder()
                .id(format!("{bucket}-notification"))
                .queue_arn(&queue_arn)
                .events(aws_sdk_s3::types::Event::from("s3:ObjectCreated:*"))
                .build()
                .map_err(|e| ProviderError::Api(e.to_string()))?;

            self.client
                .put_bucket_notification_configuration()
                .bucket(&bucket)
                .notification_configuration(
                    aws_sdk_s3::types::NotificationConfiguration::builder()
                        .queue_configurations(queue_config)
                        .build(),
                )
                .send()
                .await
                .map_err(|e| api_err("s3:PutBucketNotificationConfiguration", &e))?;

            tracing::debug!(bucket = %bucket, queue_arn = %queue_arn, "notification wired");
            Ok(())
        })
    }
}
