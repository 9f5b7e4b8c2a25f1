//! Native HTTP client using reqwest

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::{CreateOutcome, SubscriptionApi, COLLECTION_PATH};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::record::{CreateSubscriptionRequest, SubscriptionId};

pub struct HttpSubscriptionApi {
    client: Client,
    base_url: Url,
    credential_placeholder: String,
}

impl HttpSubscriptionApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config
            .parsed_base_url()
            .map_err(|_| ApiError::InvalidUrl {
                url: config.base_url.clone(),
            })?;

        // A zero timeout fails every request before it is sent
        if config.timeout_secs == 0 {
            return Err(ApiError::Client {
                message: "timeout_secs must be positive".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            credential_placeholder: config.credential_placeholder.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/subscriptions/zotero`
    pub fn collection_url(&self) -> Result<Url, ApiError> {
        self.endpoint(None)
    }

    /// `{base}/api/subscriptions/zotero/{id}`, id encoded as one segment
    pub fn item_url(&self, id: &SubscriptionId) -> Result<Url, ApiError> {
        self.endpoint(Some(id.as_str()))
    }

    fn endpoint(&self, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
            })?;
            segments.pop_if_empty().extend(COLLECTION_PATH);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

impl SubscriptionApi for HttpSubscriptionApi {
    async fn create(&self, query: &str, alias: &str) -> Result<CreateOutcome, ApiError> {
        let url = self.collection_url()?;
        let request = CreateSubscriptionRequest {
            zotero_id: query.to_string(),
            api_key: self.credential_placeholder.clone(),
            alias: alias.to_string(),
        };

        tracing::debug!(%url, "Creating smart subscription");
        let response = self.client.post(url).json(&request).send().await?;
        let status = response.status().as_u16();

        // An unreadable body is treated like an empty one
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status, "Create subscription answered");

        Ok(CreateOutcome::from_response(status, &body))
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<u16, ApiError> {
        let url = self.item_url(id)?;

        tracing::debug!(%url, "Deleting smart subscription");
        let response = self.client.delete(url).send().await?;
        Ok(response.status().as_u16())
    }
}
