use serde::{Deserialize, Serialize};

/// The customer a provisioning run is for.
///
/// In production these fields arrive from the subscription message bus;
/// the CLI accepts them as arguments. Immutable for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerContext {
    /// Login identifier, e.g. an email address. Doubles as the IAM user name.
    pub login: String,
    /// Numeric customer id. Bucket and queue names are derived from it.
    pub id: u64,
}
