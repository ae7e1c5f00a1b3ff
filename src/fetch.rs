use std::collections::BTreeMap;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{FetchError, GraphqlError};
use crate::models::SpeciesQueryResult;
use crate::query::OPERATION_NAME;

pub const POKEAPI_GRAPHQL_ENDPOINT: &str = "https://graphql.pokeapi.co/v1beta2";

pub type Variables = BTreeMap<String, String>;

/// Builds the `{name: ...}` variables map the details query expects.
pub fn name_variables(name: &str) -> Variables {
    let mut vars = Variables::new();
    vars.insert("name".to_string(), name.to_string());
    vars
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

/// Shared by the HTTP endpoint and the terminal view. Every call is a single
/// POST with no retry, caching or timeout.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    endpoint: String,
    http: reqwest::Client,
}

impl Default for GraphqlClient {
    fn default() -> Self {
        Self::new(POKEAPI_GRAPHQL_ENDPOINT)
    }
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http(endpoint, reqwest::Client::new())
    }

    pub fn with_http(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run the species details query.
    pub async fn fetch(
        &self,
        query: &str,
        variables: &Variables,
    ) -> Result<SpeciesQueryResult, FetchError> {
        self.execute(query, variables).await
    }

    /// Post `query` and decode `data` into `T`. GraphQL errors win over any
    /// partial data that came with them.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: &Variables,
    ) -> Result<T, FetchError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
            "operationName": OPERATION_NAME,
        });
        debug!(endpoint = %self.endpoint, ?variables, "posting GraphQL query");

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "GraphQL request failed");
            // the status is the failure; a broken body must not replace it
            let bytes = response.bytes().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&bytes),
            });
        }

        let bytes = response.bytes().await?;
        let envelope: Envelope = serde_json::from_slice(&bytes)?;
        if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
            warn!(count = errors.len(), "GraphQL response carried errors");
            return Err(FetchError::Graphql { errors });
        }

        match envelope.data {
            Some(serde_json::Value::Null) | None => Err(FetchError::MissingData),
            Some(data) => Ok(serde_json::from_value(data)?),
        }
    }
}

fn truncate_body(bytes: &[u8]) -> String {
    const MAX_LEN: usize = 4096;
    let mut body = String::from_utf8_lossy(bytes).to_string();
    if body.len() > MAX_LEN {
        let mut cut = MAX_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    body
}
