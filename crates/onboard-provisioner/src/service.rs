use std::future::Future;
use std::pin::Pin;

use onboard_core::QueueSettings;

use crate::error::ProviderError;
use crate::outcome::CredentialPair;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Identity-service operations the workflow depends on.
///
/// One method per remote call, so tests can fake the seam and record exactly
/// which calls fired in which order. Methods return boxed futures for dyn
/// compatibility.
pub trait IdentityService: Send + Sync {
    /// Create the identity and return its ARN.
    /// `Err(AlreadyExists)` when a principal with this login already exists.
    fn create_identity(&self, login: &str) -> BoxFuture<'_, Result<String, ProviderError>>;

    /// Resolve an existing identity's ARN. `Err(NotFound)` while the
    /// identity does not (yet) resolve; new identities take a moment to
    /// become visible to the rest of the provider.
    fn lookup_identity(&self, login: &str) -> BoxFuture<'_, Result<String, ProviderError>>;

    /// Add the identity to the access group. Idempotent at the provider:
    /// re-adding an existing member is a no-op.
    fn add_to_group(&self, login: &str, group: &str) -> BoxFuture<'_, Result<(), ProviderError>>;

    /// Mint a long-lived credential pair. The secret half exists only in the
    /// returned value; it cannot be fetched again later.
    fn create_credentials(
        &self,
        login: &str,
    ) -> BoxFuture<'_, Result<CredentialPair, ProviderError>>;
}

/// Object-storage operations. Every `put_*` is an idempotent overwrite, so
/// the workflow is free to re-issue them on the already-exists path.
pub trait StorageService: Send + Sync {
    /// `Err(AlreadyExists)` when the caller already owns this bucket;
    /// `Err(OwnedByAnother)` when someone else does.
    fn create_bucket(&self, bucket: &str) -> BoxFuture<'_, Result<(), ProviderError>>;

    /// Deny all public ACLs and policies on the bucket.
    fn put_public_access_block(&self, bucket: &str) -> BoxFuture<'_, Result<(), ProviderError>>;

    fn put_bucket_policy(
        &self,
        bucket: &str,
        document: &serde_json::Value,
    ) -> BoxFuture<'_, Result<(), ProviderError>>;

    /// Abort incomplete multipart uploads after the given number of days.
    fn put_lifecycle_rule(
        &self,
        bucket: &str,
        days_after_initiation: u32,
    ) -> BoxFuture<'_, Result<(), ProviderError>>;

    /// Default server-side encryption (AES256).
    fn put_default_encryption(&self, bucket: &str) -> BoxFuture<'_, Result<(), ProviderError>>;

    /// Wire the bucket's object-created events into the queue.
    fn put_notification(
        &self,
        bucket: &str,
        queue_arn: &str,
    ) -> BoxFuture<'_, Result<(), ProviderError>>;
}

/// Notification-queue operations.
pub trait QueueService: Send + Sync {
    /// Create the queue and return its URL. Creating a queue that already
    /// exists with identical settings returns the existing URL.
    fn create_queue(
        &self,
        queue: &str,
        settings: &QueueSettings,
    ) -> BoxFuture<'_, Result<String, ProviderError>>;

    /// Creation only returns a locator; resolving the ARN is a second call.
    fn queue_arn(&self, queue_url: &str) -> BoxFuture<'_, Result<String, ProviderError>>;

    fn set_queue_policy(
        &self,
        queue_url: &str,
        document: &serde_json::Value,
    ) -> BoxFuture<'_, Result<(), ProviderError>>;
}
