use aws_sdk_iam::Client;

use crate::error::{ProviderError, format_err_chain};
use crate::outcome::CredentialPair;
use crate::service::{BoxFuture, IdentityService};

/// IAM-backed identity operations: one user per customer login.
pub struct IamIdentityService {
    client: Client,
}

impl IamIdentityService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

impl IdentityService for IamIdentityService {
    fn create_identity(&self, login: &str) -> BoxFuture<'_, Result<String, ProviderError>> {
        let login = login.to_string();
        Box::pin(async move {
            match self.client.create_user().user_name(&login).send().await {
                Ok(resp) => resp
                    .user()
                    .map(|u| u.arn().to_string())
                    .ok_or_else(|| ProviderError::Api("iam:CreateUser returned no user".into())),
                Err(e) => {
                    let is_conflict = e
                        .as_service_error()
                        .map(|se| se.is_entity_already_exists_exception())
                        .unwrap_or(false);
                    if is_conflict {
                        Err(ProviderError::AlreadyExists)
                    } else {
                        Err(ProviderError::Api(format!(
                            "iam:CreateUser failed: {}",
                            format_err_chain(&e)
                        )))
                    }
                }
            }
        })
    }

    fn lookup_identity(&self, login: &str) -> BoxFuture<'_, Result<String, ProviderError>> {
        let login = login.to_string();
        Box::pin(async move {
            match self.client.get_user().user_name(&login).send().await {
                Ok(resp) => resp
                    .user()
                    .map(|u| u.arn().to_string())
                    .ok_or_else(|| ProviderError::Api("iam:GetUser returned no user".into())),
                Err(e) => {
                    let is_not_found = e
                        .as_service_error()
                        .map(|se| se.is_no_such_entity_exception())
                        .unwrap_or(false);
                    if is_not_found {
                        Err(ProviderError::NotFound)
                    } else {
                        Err(ProviderError::Api(format!(
                            "iam:GetUser failed: {}",
                            format_err_chain(&e)
                        )))
                    }
                }
            }
        })
    }

    fn add_to_group(&self, login: &str, group: &str) -> BoxFuture<'_, Result<(), ProviderError>> {
        let login = login.to_string();
        let group = group.to_string();
        Box::pin(async move {
            self.client
                .add_user_to_group()
                .group_name(&group)
                .user_name(&login)
                .send()
                .await
                .map_err(|e| {
                    ProviderError::Api(format!(
                        "iam:AddUserToGroup failed: {}",
                        format_err_chain(&e)
                    ))
                })?;

            tracing::debug!(login = %login, group = %group, "added identity to group");
            Ok(())
        })
    }

    fn create_credentials(
        &self,
        login: &str,
    ) -> BoxFuture<'_, Result<CredentialPair, ProviderError>> {
        let login = login.to_string();
        Box::pin(async move {
            let resp = self
                .client
                .create_access_key()
                .user_name(&login)
                .send()
                .await
                .map_err(|e| {
                    ProviderError::Api(format!(
                        "iam:CreateAccessKey failed: {}",
                        format_err_chain(&e)
                    ))
                })?;

            let key = resp
                .access_key()
                .ok_or_else(|| ProviderError::Api("iam:CreateAccessKey returned no key".into()))?;

            tracing::debug!(access_key_id = %key.access_key_id(), "created access key");
            Ok(CredentialPair {
                access_key_id: key.access_key_id().to_string(),
                secret_access_key: key.secret_access_key().to_string(),
            })
        })
    }
}
