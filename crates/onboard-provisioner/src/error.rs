use thiserror::Error;

/// Error taxonomy at the provider seam.
///
/// The AWS adapters collapse every SDK failure into one of these variants.
/// Only the first two carry meaning for control flow; anything landing in
/// `Api` aborts the run on first sight, with no retry and no classification
/// beyond the two recognized conflict shapes.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The resource exists and belongs to the caller. The workflow treats
    /// this as success and switches to a lookup path.
    #[error("resource already exists")]
    AlreadyExists,

    /// The name is taken by a different principal. Never recoverable.
    #[error("resource name is owned by another principal")]
    OwnedByAnother,

    /// A lookup found nothing.
    #[error("resource not found")]
    NotFound,

    /// Any other provider failure, with the flattened SDK error chain.
    #[error("{0}")]
    Api(String),
}

/// A failed provisioning run. Resources created before the failure are left
/// in place; re-running the provisioner is the recovery mechanism.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("identity step failed for {login}: {source}")]
    Identity {
        login: String,
        #[source]
        source: ProviderError,
    },

    /// The bucket name exists under a different account. Distinct from the
    /// owned-by-caller conflict, which proceeds.
    #[error("bucket {name} already exists under another account")]
    BucketOwnershipConflict { name: String },

    #[error("bucket step failed for {name}: {source}")]
    Bucket {
        name: String,
        #[source]
        source: ProviderError,
    },

    #[error("queue step failed for {name}: {source}")]
    Queue {
        name: String,
        #[source]
        source: ProviderError,
    },
}

/// Walk the full error chain and join all causes into one string.
///
/// AWS SDK errors often have terse `Display` impls (e.g. "service error")
/// but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
