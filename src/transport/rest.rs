//! `reqwest`-backed implementation of the transport traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::domain::Resource;
use crate::domain::document::Document;
use crate::domain::notice::{NewNotice, Notice};
use crate::domain::patient::Patient;
use crate::domain::types::{DocumentId, NoticeId, PatientId};
use crate::dto::api::{NoticeReadPatch, PageParams, PageResponse};
use crate::models::config::ClientConfig;
use crate::pagination::Page;
use crate::query::QueryState;
use crate::transport::errors::{TransportError, TransportResult};
use crate::transport::{DocumentWriter, NoticeWriter, PatientWriter, Transport};

/// HTTP client for the `/api/v1` collections.
#[derive(Clone, Debug)]
pub struct RestTransport {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestTransport {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        token: Option<String>,
    ) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Unexpected(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn from_config(config: &ClientConfig) -> TransportResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.request_timeout(),
            config.api_token.clone(),
        )
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.base_url)
    }

    fn item_url(&self, collection: &str, id: impl std::fmt::Display) -> String {
        format!("{}/{collection}/{id}", self.base_url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> TransportResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            message: message.trim().to_string(),
        })
    }

    async fn decode<B: DeserializeOwned>(response: Response) -> TransportResult<B> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn delete(&self, collection: &str, id: impl std::fmt::Display) -> TransportResult<()> {
        let url = self.item_url(collection, id);
        log::debug!("DELETE {url}");
        self.send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }
}

/// Encodes the list query string for `query`.
pub fn encode_query(query: &QueryState) -> TransportResult<String> {
    serde_html_form::to_string(PageParams::from(query))
        .map_err(|e| TransportError::Unexpected(format!("failed to encode query: {e}")))
}

#[async_trait]
impl<T> Transport<T> for RestTransport
where
    T: Resource + DeserializeOwned,
{
    async fn fetch_page(&self, query: &QueryState) -> TransportResult<Page<T>> {
        let url = format!("{}?{}", self.collection_url(T::COLLECTION), encode_query(query)?);
        log::debug!("GET {url}");

        let response = self.send(self.request(Method::GET, &url)).await?;
        let page: PageResponse<T> = Self::decode(response).await?;

        Ok(page.into())
    }
}

#[async_trait]
impl NoticeWriter for RestTransport {
    async fn delete_notice(&self, id: NoticeId) -> TransportResult<()> {
        self.delete(Notice::COLLECTION, id).await
    }

    async fn set_notice_read(&self, id: NoticeId, is_read: bool) -> TransportResult<()> {
        let url = self.item_url(Notice::COLLECTION, id);
        log::debug!("PATCH {url}");
        self.send(
            self.request(Method::PATCH, &url)
                .json(&NoticeReadPatch { is_read }),
        )
        .await?;
        Ok(())
    }

    async fn create_notice(&self, notice: &NewNotice) -> TransportResult<Notice> {
        let url = self.collection_url(Notice::COLLECTION);
        log::debug!("POST {url}");
        let response = self
            .send(self.request(Method::POST, &url).json(notice))
            .await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl PatientWriter for RestTransport {
    async fn delete_patient(&self, id: PatientId) -> TransportResult<()> {
        self.delete(Patient::COLLECTION, id).await
    }
}

#[async_trait]
impl DocumentWriter for RestTransport {
    async fn delete_document(&self, id: DocumentId) -> TransportResult<()> {
        self.delete(Document::COLLECTION, id).await
    }
}
