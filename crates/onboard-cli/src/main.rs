//! Per-customer onboarding provisioner.
//!
//! Ensures the customer's IAM user, S3 bucket, and SQS notification queue
//! exist and are wired together. Safe to re-run: existing resources are
//! found and reused, and a run that aborted partway is completed by the
//! next one.
//!
//! Usage:
//!   AWS_REGION=us-east-2 onboard user@example.com 123
//!
//! Configuration (all optional): ONBOARD_BUCKET_PREFIX, ONBOARD_QUEUE_SUFFIX,
//! ONBOARD_ACCESS_GROUP, ONBOARD_BUCKET_LIFECYCLE_DAYS,
//! ONBOARD_QUEUE_RETENTION_SECS, ONBOARD_QUEUE_VISIBILITY_SECS,
//! ONBOARD_SKIP_QUEUE. AWS credentials come from the default chain.

use onboard_core::CustomerContext;
use onboard_provisioner::aws::{IamIdentityService, S3StorageService, SqsQueueService};
use onboard_provisioner::{Ensured, ProvisionOutcome, Provisioner};

mod aws;
mod config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let usage = || eyre::eyre!("usage: onboard <login> <customer-id>");
    let login = args.next().ok_or_else(usage)?;
    let id: u64 = args
        .next()
        .ok_or_else(usage)?
        .parse()
        .map_err(|e| eyre::eyre!("customer id must be an integer: {e}"))?;
    let customer = CustomerContext { login, id };

    let cfg = config::from_env()?;

    let sdk_config = aws::build_aws_config(&cfg.region).await;
    let caller = aws::validate_credentials(&sdk_config).await?;
    tracing::info!(
        account = %caller.account_id,
        arn = %caller.arn,
        region = %cfg.region,
        "credentials validated"
    );

    let provisioner = Provisioner::new(
        Box::new(IamIdentityService::new(&sdk_config)),
        Box::new(S3StorageService::new(&sdk_config)),
        Box::new(SqsQueueService::new(&sdk_config)),
        cfg,
    );

    let outcome = provisioner.provision(&customer).await?;
    report(&outcome);
    Ok(())
}

fn report(outcome: &ProvisionOutcome) {
    match &outcome.identity {
        Ensured::Created(identity) => {
            println!("IAM user created: {}", identity.arn);
            if let Some(creds) = &identity.credentials {
                println!("API key: {}", creds.access_key_id);
                println!("Secret key: {}", creds.secret_access_key);
                println!("Store the secret now, it cannot be retrieved again.");
            }
        }
        Ensured::AlreadyExists(identity) => {
            println!("IAM user found: {}", identity.arn);
        }
    }

    match &outcome.bucket {
        Ensured::Created(bucket) => println!("S3 bucket created: {}", bucket.name),
        Ensured::AlreadyExists(bucket) => println!("S3 bucket exists: {}", bucket.name),
    }

    if let Some(queue) = &outcome.queue {
        println!("Queue configured: {}", queue.url);
    }
}
