use reqwest::header::{HeaderMap, HeaderValue, FROM, USER_AGENT};
use reqwest::Client;
use tracing::info;

use crate::config::config::SourceConfig;
use crate::errors::FetchError;

/// Anything that can hand over the markup of the FAQ page.
#[allow(async_fn_in_trait)]
pub trait FetchPage {
    async fn fetch_page(&self) -> Result<String, FetchError>;
}

/// Fetches the FAQ page over HTTP with identifying headers and a timeout.
pub struct FaqFetcher {
    client: Client,
    url: String,
}

impl FaqFetcher {
    pub fn new(source: &SourceConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user agent", &source.user_agent)?);
        if !source.contact.is_empty() {
            headers.insert(FROM, header_value("contact", &source.contact)?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(source.timeout())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            url: source.url.clone(),
        })
    }
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|_| FetchError::InvalidHeader {
        header,
        value: value.to_string(),
    })
}

impl FetchPage for FaqFetcher {
    async fn fetch_page(&self) -> Result<String, FetchError> {
        info!(url = %self.url, "Fetching FAQ page");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: self.url.clone(),
            source,
        })?;

        info!(bytes = body.len(), "FAQ page fetched");
        Ok(body)
    }
}
