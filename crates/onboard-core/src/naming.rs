//! Resource naming conventions.
//!
//! Pure string functions — no AWS SDK dependency. Names are derived only
//! from the configured prefix/suffix and the customer id, so every run for
//! the same customer targets the same resources. That determinism is what
//! makes re-running the provisioner safe.

use crate::config::ProvisionerConfig;
use crate::customer::CustomerContext;

/// The full set of names a provisioning run will target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub bucket: String,
    pub queue: String,
}

impl ResourceNames {
    pub fn for_customer(config: &ProvisionerConfig, customer: &CustomerContext) -> Self {
        Self {
            bucket: bucket_name(&config.bucket_prefix, customer.id),
            queue: queue_name(&config.bucket_prefix, customer.id, &config.queue_suffix),
        }
    }
}

pub fn bucket_name(prefix: &str, customer_id: u64) -> String {
    format!("{prefix}{customer_id}")
}

pub fn queue_name(prefix: &str, customer_id: u64, suffix: &str) -> String {
    format!("{prefix}{customer_id}{suffix}")
}

pub fn bucket_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_deterministic() {
        assert_eq!(bucket_name("acme-test-", 123), "acme-test-123");
        assert_eq!(queue_name("acme-test-", 123, "-queue"), "acme-test-123-queue");
        assert_eq!(bucket_name("acme-test-", 123), bucket_name("acme-test-", 123));
    }

    #[test]
    fn distinct_ids_never_collide() {
        let mut seen = std::collections::HashSet::new();
        for id in 0..10_000u64 {
            assert!(seen.insert(bucket_name("acme-test-", id)));
        }
    }

    #[test]
    fn names_flow_from_config() {
        let config = ProvisionerConfig::default();
        let customer = CustomerContext {
            login: "user@example.com".into(),
            id: 123,
        };
        let names = ResourceNames::for_customer(&config, &customer);
        assert_eq!(names.bucket, "acme-test-123");
        assert_eq!(names.queue, "acme-test-123-queue");
    }

    #[test]
    fn bucket_arn_uses_global_partition() {
        assert_eq!(bucket_arn("acme-test-123"), "arn:aws:s3:::acme-test-123");
    }
}
