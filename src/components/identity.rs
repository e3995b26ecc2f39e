// Resolves bearer tokens to the signed-in user's id.
use std::{collections::HashMap, fmt};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::configuration::Identity as IdentityConfig;
use crate::domain::{error::CommonError, user_id::UserId};

pub const WHO_AM_I_URI: &str = "/v1/whoami";

#[derive(Deserialize, Serialize, Debug)]
pub struct WhoAmIResponse {
    pub user_id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider {
    async fn who_am_i(&self, token: &str) -> Result<UserId, CommonError>;
}

pub struct IdentityComponent {
    identity_url: String,
    static_tokens: HashMap<String, String>,
    client: reqwest::Client,
}

impl fmt::Debug for IdentityComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityComponent")
            .field("identity_url", &self.identity_url)
            .field("static_tokens", &self.static_tokens.len())
            .finish()
    }
}

impl IdentityComponent {
    pub fn new(config: &IdentityConfig) -> Self {
        if config.url.is_empty() && config.static_tokens.is_empty() {
            log::warn!("No identity provider URL nor static tokens configured, every token will be rejected");
        }

        Self {
            identity_url: config.url.trim_end_matches('/').to_string(),
            static_tokens: config.static_tokens.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_who_am_i(&self, token: &str) -> Result<UserId, CommonError> {
        let url = format!("{}{}", self.identity_url, WHO_AM_I_URI);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| {
                log::error!("Identity > Who am I > Request failed: {err}");
                CommonError::Unknown("Couldn't reach the identity provider".to_owned())
            })?;

        match response.status() {
            StatusCode::OK => {
                let body = response.json::<WhoAmIResponse>().await.map_err(|err| {
                    log::error!("Identity > Who am I > Invalid response: {err}");
                    CommonError::Unknown("Invalid identity provider response".to_owned())
                })?;
                if body.user_id.is_empty() {
                    return Err(CommonError::Unauthorized("Empty user id".to_owned()));
                }
                Ok(UserId(body.user_id))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(CommonError::Unauthorized("Invalid token".to_owned()))
            }
            status => {
                log::error!("Identity > Who am I > Unexpected status {status}");
                Err(CommonError::Unknown(format!(
                    "Identity provider answered {status}"
                )))
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityComponent {
    #[tracing::instrument(name = "Resolve token to user", skip(token))]
    async fn who_am_i(&self, token: &str) -> Result<UserId, CommonError> {
        if let Some(user_id) = self.static_tokens.get(token) {
            return Ok(UserId(user_id.clone()));
        }

        if self.identity_url.is_empty() {
            return Err(CommonError::Unauthorized("Invalid token".to_owned()));
        }

        self.fetch_who_am_i(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(url: &str, tokens: &[(&str, &str)]) -> IdentityComponent {
        IdentityComponent::new(&IdentityConfig {
            url: url.to_string(),
            static_tokens: tokens
                .iter()
                .map(|(token, user)| (token.to_string(), user.to_string()))
                .collect(),
        })
    }

    #[actix_web::test]
    async fn test_static_token() {
        let identity = component("", &[("a-token", "alice")]);

        assert_eq!(identity.who_am_i("a-token").await.unwrap(), UserId::from("alice"));
    }

    #[actix_web::test]
    async fn test_unknown_token_without_provider_is_unauthorized() {
        let identity = component("", &[("a-token", "alice")]);

        assert_eq!(
            identity.who_am_i("other").await.unwrap_err(),
            CommonError::Unauthorized("".to_owned())
        );
    }
}
