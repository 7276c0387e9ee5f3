use serde::{Deserialize, Serialize};

/// Immutable configuration for a provisioning run.
///
/// Passed by reference into the provisioner, never read from process-wide
/// state. The defaults reproduce the values the onboarding scripts have
/// always used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionerConfig {
    /// AWS region the resources are created in.
    pub region: String,
    /// Bucket names are `{bucket_prefix}{customer_id}`.
    pub bucket_prefix: String,
    /// Queue names are `{bucket_prefix}{customer_id}{queue_suffix}`.
    pub queue_suffix: String,
    /// IAM group granting baseline API-consumer permissions.
    pub access_group: String,
    /// Incomplete multipart uploads are aborted after this many days.
    pub bucket_lifecycle_days: u32,
    /// Queue provisioning settings. `None` skips the queue phase entirely
    /// (the bucket-only onboarding variant).
    pub queue: Option<QueueSettings>,
}

/// SQS queue attributes applied at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSettings {
    /// How long messages are retained before SQS drops them.
    pub message_retention_secs: u32,
    /// How long a received-but-not-deleted message stays invisible.
    pub visibility_timeout_secs: u32,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            region: "us-east-2".into(),
            bucket_prefix: "acme-test-".into(),
            queue_suffix: "-queue".into(),
            access_group: "api-consumers".into(),
            bucket_lifecycle_days: 62,
            queue: Some(QueueSettings::default()),
        }
    }
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            // 2 days
            message_retention_secs: 172_800,
            // 4 minutes
            visibility_timeout_secs: 240,
        }
    }
}
