use aws_sdk_sqs::Client;
use aws_sdk_sqs::types::QueueAttributeName;

use onboard_core::QueueSettings;

use crate::error::{ProviderError, format_err_chain};
use crate::service::{BoxFuture, QueueService};

/// SQS-backed queue operations.
pub struct SqsQueueService {
    client: Client,
}

impl SqsQueueService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

impl QueueService for SqsQueueService {
    fn create_queue(
        &self,
        queue: &str,
        settings: &QueueSettings,
    ) -> BoxFuture<'_, Result<String, ProviderError>> {
        let queue = queue.to_string();
        let settings = settings.clone();
        Box::pin(async move {
            let resp = self
                .client
                .create_queue()
                .queue_name(&queue)
                .attributes(
                    QueueAttributeName::MessageRetentionPeriod,
                    settings.message_retention_secs.to_string(),
                )
                .attributes(
                    QueueAttributeName::VisibilityTimeout,
                    settings.visibility_timeout_secs.to_string(),
                )
                .send()
                .await
                .map_err(|e| {
                    ProviderError::Api(format!("sqs:CreateQueue failed: {}", format_err_chain(&e)))
                })?;

            resp.queue_url()
                .map(str::to_string)
                .ok_or_else(|| ProviderError::Api("sqs:CreateQueue returned no queue URL".into()))
        })
    }

    fn queue_arn(&self, queue_url: &str) -> BoxFuture<'_, Result<String, ProviderError>> {
        let queue_url = queue_url.to_string();
        Box::pin(async move {
            let resp = self
                .client
                .get_queue_attributes()
                .queue_url(&queue_url)
                .attribute_names(QueueAttributeName::QueueArn)
                .send()
                .await
                .map_err(|e| {
                    ProviderError::Api(format!(
                        "sqs:GetQueueAttributes failed: {}",
                        format_err_chain(&e)
                    ))
                })?;

            resp.attributes()
                .and_then(|attrs| attrs.get(&QueueAttributeName::QueueArn))
                .cloned()
                .ok_or_else(|| ProviderError::Api("queue has no QueueArn attribute".into()))
        })
    }

    fn set_queue_policy(
        &self,
        queue_url: &str,
        document: &serde_json::Value,
    ) -> BoxFuture<'_, Result<(), ProviderError>> {
        let queue_url = queue_url.to_string();
        let policy = document.to_string();
        Box::pin(async move {
            self.client
                .set_queue_attributes()
                .queue_url(&queue_url)
                .attributes(QueueAttributeName::Policy, policy)
                .send()
                .await
                .map_err(|e| {
                    ProviderError::Api(format!(
                        "sqs:SetQueueAttributes failed: {}",
                        format_err_chain(&e)
                    ))
                })?;
            Ok(())
        })
    }
}
