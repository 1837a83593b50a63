use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::lifecycle::AuthorizedContext;
use crate::utils::constants::{STOREFRONT_PATH, USER_TOKEN_HEADER};

/// Minimal catalog API client: attaches the authorized context and probes the storefront.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontProbe {
    pub api_response_status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storefront: Option<Storefront>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Storefront {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub default_language: String,
    pub supported_languages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StorefrontResponse {
    #[serde(default)]
    data: Vec<StorefrontResource>,
}

#[derive(Debug, Deserialize)]
struct StorefrontResource {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    attributes: StorefrontAttributes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorefrontAttributes {
    name: String,
    #[serde(default)]
    default_language_tag: String,
    #[serde(default)]
    supported_language_tags: Vec<String>,
}

impl From<StorefrontResource> for Storefront {
    fn from(resource: StorefrontResource) -> Self {
        Self {
            id: resource.id,
            kind: resource.kind,
            name: resource.attributes.name,
            default_language: resource.attributes.default_language_tag,
            supported_languages: resource.attributes.supported_language_tags,
        }
    }
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// `GET /v1/me/storefront`, aborted once `timeout` elapses.
    pub async fn storefront(
        &self,
        ctx: &AuthorizedContext,
        timeout: Duration,
    ) -> Result<StorefrontProbe, CatalogError> {
        match tokio::time::timeout(timeout, self.fetch_storefront(ctx)).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Timeout(timeout)),
        }
    }

    async fn fetch_storefront(&self, ctx: &AuthorizedContext) -> Result<StorefrontProbe, CatalogError> {
        let url = format!("{}{}", self.base_url, STOREFRONT_PATH);
        debug!("catalog probe, url '{}'", url);

        let mut request = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", ctx.developer_token()));
        if let Some(user_token) = ctx.user_token() {
            request = request.header(USER_TOKEN_HEADER, user_token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: StorefrontResponse = response.json().await?;
        info!("catalog probe succeeded, status {}", status);
        Ok(StorefrontProbe {
            api_response_status: status.as_u16(),
            storefront: parsed.data.into_iter().next().map(Storefront::from),
        })
    }
}
