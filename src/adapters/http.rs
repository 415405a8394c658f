use crate::domain::model::{Document, QueryFilter, QueryOptions};
use crate::domain::ports::{ConfigProvider, ContentStore};
use crate::utils::error::{ContentError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    filter: &'a QueryFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    items: Vec<Document>,
    #[serde(rename = "totalCount")]
    total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    item: Option<Document>,
}

/// Client for the hosted content store.
///
/// Collection queries are `POST {endpoint}/collections/{name}/query` and
/// single records are `GET {endpoint}/collections/{name}/items/{id}`.
#[derive(Debug, Clone)]
pub struct HttpContentStore {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpContentStore {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_client(Client::new(), endpoint, None)
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Self::with_client(
            client,
            config.store_endpoint(),
            config.api_key().map(str::to_string),
        )
    }

    fn with_client(client: Client, endpoint: &str, api_key: Option<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| ContentError::InvalidConfigValueError {
            field: "store.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ContentError::InvalidConfigValueError {
                field: "store.endpoint".to_string(),
                value: endpoint.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn collection_url(&self, collection: &str, tail: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        // checked in with_client
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["collections", collection])
                .extend(tail);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn query(
        &self,
        collection: &str,
        filter: &QueryFilter,
        options: &QueryOptions,
    ) -> Result<Vec<Document>> {
        let url = self.collection_url(collection, &["query"]);
        let body = QueryRequest {
            filter,
            limit: options.limit,
        };

        tracing::debug!(collection, %url, limit = ?options.limit, "Querying content store");
        let response = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ContentError::retrieval(collection, e.to_string()))?;

        let status = response.status();
        tracing::debug!(collection, %status, "Content store responded");
        if !status.is_success() {
            return Err(ContentError::retrieval(
                collection,
                format!("store responded with {}", status),
            ));
        }

        let page: QueryResponse = response
            .json()
            .await
            .map_err(|e| ContentError::retrieval(collection, format!("invalid response body: {}", e)))?;

        tracing::debug!(
            collection,
            returned = page.items.len(),
            total = ?page.total_count,
            "Received collection page"
        );
        Ok(page.items)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let url = self.collection_url(collection, &["items", id]);

        tracing::debug!(collection, id, %url, "Fetching record");
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| ContentError::retrieval(collection, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ContentError::retrieval(
                collection,
                format!("store responded with {}", status),
            ));
        }

        let body: GetResponse = response
            .json()
            .await
            .map_err(|e| ContentError::retrieval(collection, format!("invalid response body: {}", e)))?;
        Ok(body.item)
    }
}
