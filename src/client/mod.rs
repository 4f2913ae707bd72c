mod builder;

use crate::error::{ClientError, Result};
pub use builder::ClientBuilder;
use reqwest::Client as ReqwestClient;
use url::Url;

#[derive(Debug)]
pub struct ClientResponse {
    pub status: u16,
    pub content: String,
}

pub struct Client {
    inner: ReqwestClient,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Single GET with no retry. Non-2xx statuses, connection failures and
    /// timeouts each map to their own [`ClientError`] variant.
    pub async fn get(&self, url: &str) -> Result<ClientResponse> {
        let url = Url::parse(url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;

        let response = self
            .inner
            .get(url.as_str())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status_code: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let content = response.text().await.map_err(classify)?;

        Ok(ClientResponse {
            status: status.as_u16(),
            content,
        })
    }
}

fn classify(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout(error.to_string())
    } else if error.is_connect() {
        ClientError::Connect(error.to_string())
    } else {
        ClientError::RequestFailed(error.to_string())
    }
}
