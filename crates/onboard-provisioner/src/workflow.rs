//! The provisioning workflow.
//!
//! A single-pass, strictly ordered procedure: identity, then bucket, then
//! queue. The identity ARN appears in the bucket policy and the bucket ARN
//! appears in the queue wiring, so the order is a hard dependency chain, not
//! a convention. Each step tolerates "already exists" from a prior run by
//! switching to a lookup, which makes re-running the recovery mechanism for
//! a run that aborted partway: nothing is ever rolled back.

use std::time::Duration;

use onboard_core::naming::{self, ResourceNames};
use onboard_core::{CustomerContext, ProvisionerConfig, QueueSettings};

use crate::error::{ProviderError, ProvisionError};
use crate::outcome::{
    Ensured, ProvisionOutcome, ProvisionedBucket, ProvisionedIdentity, ProvisionedQueue,
};
use crate::policy;
use crate::service::{IdentityService, QueueService, StorageService};

/// Poll bounds for the post-create identity settle.
const SETTLE_ATTEMPTS: u32 = 6;
const SETTLE_INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const SETTLE_MAX_BACKOFF: Duration = Duration::from_secs(4);
/// Applied once if the identity still hasn't resolved when the poll budget
/// runs out.
const SETTLE_FALLBACK: Duration = Duration::from_secs(10);

pub struct Provisioner {
    identity: Box<dyn IdentityService>,
    storage: Box<dyn StorageService>,
    queue: Box<dyn QueueService>,
    config: ProvisionerConfig,
}

impl Provisioner {
    pub fn new(
        identity: Box<dyn IdentityService>,
        storage: Box<dyn StorageService>,
        queue: Box<dyn QueueService>,
        config: ProvisionerConfig,
    ) -> Self {
        Self {
            identity,
            storage,
            queue,
            config,
        }
    }

    /// Ensure the customer's identity, bucket, and (optionally) queue exist
    /// and are wired together.
    ///
    /// On any provider error outside the two recognized conflict shapes the
    /// run aborts where it stands. Already-created resources stay in place;
    /// a re-run for the same customer targets the same names and completes
    /// whatever is missing.
    pub async fn provision(
        &self,
        customer: &CustomerContext,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        let names = ResourceNames::for_customer(&self.config, customer);
        tracing::info!(
            login = %customer.login,
            bucket = %names.bucket,
            queue = %names.queue,
            "starting provisioning run"
        );

        let identity = self.ensure_identity(&customer.login).await?;
        let bucket = self.ensure_bucket(&names.bucket, &identity.get().arn).await?;

        let queue = match &self.config.queue {
            Some(settings) => Some(
                self.ensure_queue(&names.queue, &names.bucket, &identity.get().arn, settings)
                    .await?,
            ),
            None => None,
        };

        Ok(ProvisionOutcome {
            identity,
            bucket,
            queue,
        })
    }

    async fn ensure_identity(
        &self,
        login: &str,
    ) -> Result<Ensured<ProvisionedIdentity>, ProvisionError> {
        let step = |source| ProvisionError::Identity {
            login: login.to_string(),
            source,
        };

        match self.identity.create_identity(login).await {
            Ok(arn) => {
                tracing::info!(login, %arn, "identity created");
                self.identity
                    .add_to_group(login, &self.config.access_group)
                    .await
                    .map_err(step)?;
                // Only chance to capture the secret half of the pair.
                let credentials = self.identity.create_credentials(login).await.map_err(step)?;
                self.wait_until_visible(login).await;
                Ok(Ensured::Created(ProvisionedIdentity {
                    arn,
                    credentials: Some(credentials),
                }))
            }
            Err(ProviderError::AlreadyExists) => {
                let arn = self.identity.lookup_identity(login).await.map_err(step)?;
                tracing::info!(login, %arn, "identity already exists, reusing");
                // A prior run may have died between create and add; the add
                // is idempotent at the provider.
                self.identity
                    .add_to_group(login, &self.config.access_group)
                    .await
                    .map_err(step)?;
                Ok(Ensured::AlreadyExists(ProvisionedIdentity {
                    arn,
                    credentials: None,
                }))
            }
            Err(e) => Err(step(e)),
        }
    }

    /// A newly created identity is not immediately visible to the bucket
    /// policy that references it. Poll until it resolves; if it never does
    /// within the budget, apply one flat settling delay and proceed rather
    /// than failing the run.
    async fn wait_until_visible(&self, login: &str) {
        let mut backoff = SETTLE_INITIAL_BACKOFF;
        for attempt in 0..SETTLE_ATTEMPTS {
            if self.identity.lookup_identity(login).await.is_ok() {
                tracing::debug!(login, attempt, "identity resolved");
                return;
            }
            tokio::time::sleep(backoff).await;
            backoff = (backoff * 2).min(SETTLE_MAX_BACKOFF);
        }
        tracing::debug!(login, "identity still settling, applying flat delay");
        tokio::time::sleep(SETTLE_FALLBACK).await;
    }

    async fn ensure_bucket(
        &self,
        bucket: &str,
        identity_arn: &str,
    ) -> Result<Ensured<ProvisionedBucket>, ProvisionError> {
        let step = |source| ProvisionError::Bucket {
            name: bucket.to_string(),
            source,
        };
        let provisioned = ProvisionedBucket {
            name: bucket.to_string(),
            arn: naming::bucket_arn(bucket),
        };

        let outcome = match self.storage.create_bucket(bucket).await {
            Ok(()) => {
                tracing::info!(bucket, "bucket created");
                Ensured::Created(provisioned)
            }
            Err(ProviderError::AlreadyExists) => {
                tracing::info!(bucket, "bucket already exists, reapplying configuration");
                Ensured::AlreadyExists(provisioned)
            }
            Err(ProviderError::OwnedByAnother) => {
                return Err(ProvisionError::BucketOwnershipConflict {
                    name: bucket.to_string(),
                });
            }
            Err(e) => return Err(step(e)),
        };

        // All four puts are idempotent overwrites, so they run on both
        // paths: a prior run may have died between creation and
        // configuration, and re-running must finish the job.
        self.storage
            .put_public_access_block(bucket)
            .await
            .map_err(step)?;
        let document = policy::bucket_read_policy(bucket, identity_arn);
        self.storage
            .put_bucket_policy(bucket, &document)
            .await
            .map_err(step)?;
        self.storage
            .put_lifecycle_rule(bucket, self.config.bucket_lifecycle_days)
            .await
            .map_err(step)?;
        self.storage
            .put_default_encryption(bucket)
            .await
            .map_err(step)?;

        Ok(outcome)
    }

    async fn ensure_queue(
        &self,
        queue: &str,
        bucket: &str,
        identity_arn: &str,
        settings: &QueueSettings,
    ) -> Result<ProvisionedQueue, ProvisionError> {
        let step = |source| ProvisionError::Queue {
            name: queue.to_string(),
            source,
        };

        // No conflict branch here: creating an existing queue with identical
        // settings returns the same URL.
        let url = self
            .queue
            .create_queue(queue, settings)
            .await
            .map_err(step)?;
        let arn = self.queue.queue_arn(&url).await.map_err(step)?;
        tracing::info!(queue, %arn, "queue ready");

        let document = policy::queue_policy(&arn, bucket, identity_arn);
        self.queue
            .set_queue_policy(&url, &document)
            .await
            .map_err(step)?;
        self.storage
            .put_notification(bucket, &arn)
            .await
            .map_err(step)?;

        Ok(ProvisionedQueue { url, arn })
    }
}
