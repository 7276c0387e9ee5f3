//! Environment configuration for the CLI.
//!
//! Every knob has a default matching the values the onboarding scripts have
//! always used, so a bare `onboard <login> <id>` run against a configured
//! AWS environment does the right thing.

use onboard_core::{ProvisionerConfig, QueueSettings};

pub fn from_env() -> eyre::Result<ProvisionerConfig> {
    let queue = if env_flag("ONBOARD_SKIP_QUEUE") {
        None
    } else {
        Some(QueueSettings {
            message_retention_secs: env_u32("ONBOARD_QUEUE_RETENTION_SECS", 172_800)?,
            visibility_timeout_secs: env_u32("ONBOARD_QUEUE_VISIBILITY_SECS", 240)?,
        })
    };

    Ok(ProvisionerConfig {
        region: env_or("AWS_REGION", "us-east-2"),
        bucket_prefix: env_or("ONBOARD_BUCKET_PREFIX", "acme-test-"),
        queue_suffix: env_or("ONBOARD_QUEUE_SUFFIX", "-queue"),
        access_group: env_or("ONBOARD_ACCESS_GROUP", "api-consumers"),
        bucket_lifecycle_days: env_u32("ONBOARD_BUCKET_LIFECYCLE_DAYS", 62)?,
        queue,
    })
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u32(name: &str, default: u32) -> eyre::Result<u32> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("{name} must be an integer: {e}")),
        Err(_) => Ok(default),
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| {
            let v = v.trim();
            !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false")
        })
        .unwrap_or(false)
}
