//! SDK config construction and credential validation.

/// Identity information returned by STS `GetCallerIdentity`.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub account_id: String,
    pub arn: String,
}

/// Build an `SdkConfig` for the given region from the default credential
/// chain (env vars, `~/.aws/credentials`, `AWS_PROFILE`, instance roles).
pub async fn build_aws_config(region: &str) -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await
}

/// Call STS `GetCallerIdentity` to validate credentials before touching any
/// resource.
pub async fn validate_credentials(
    config: &aws_config::SdkConfig,
) -> eyre::Result<CallerIdentity> {
    let sts = aws_sdk_sts::Client::new(config);
    let resp = sts
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| eyre::eyre!("STS GetCallerIdentity failed: {e}"))?;

    Ok(CallerIdentity {
        account_id: resp.account().unwrap_or_default().to_string(),
        arn: resp.arn().unwrap_or_default().to_string(),
    })
}
