use serde::Serialize;

/// Outcome of one conflict-tolerant ensure step.
///
/// Conflicts are data, not caught exceptions: callers branch on the variant
/// instead of comparing provider error codes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ensured<T> {
    /// The resource did not exist and was created this run.
    Created(T),
    /// The resource was already in place from a prior run.
    AlreadyExists(T),
}

impl<T> Ensured<T> {
    /// The provisioned resource, whichever way it got there.
    pub fn get(&self) -> &T {
        match self {
            Ensured::Created(v) | Ensured::AlreadyExists(v) => v,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Ensured::Created(_))
    }
}

/// A long-lived access key pair.
///
/// The secret half exists nowhere else: the provider hands it out exactly
/// once, at creation, and it is not re-derivable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialPair {
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedIdentity {
    pub arn: String,
    /// `Some` only when the identity was created this run.
    pub credentials: Option<CredentialPair>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedBucket {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedQueue {
    pub url: String,
    pub arn: String,
}

/// Everything a successful run created or found.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionOutcome {
    pub identity: Ensured<ProvisionedIdentity>,
    pub bucket: Ensured<ProvisionedBucket>,
    /// `None` when queue provisioning is disabled in config.
    pub queue: Option<ProvisionedQueue>,
}
