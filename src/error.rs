//! Failure type for species lookups.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of a GraphQL `errors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Upstream answered with a non-2xx status.
    #[error("GraphQL Fetch Failed: {status}")]
    HttpStatus { status: u16, body: String },

    /// The request never produced a response.
    #[error("GraphQL Fetch Failed: {0}")]
    Network(String),

    #[error("GraphQL response could not be decoded: {0}")]
    Decode(String),

    /// HTTP succeeded but the upstream reported application errors.
    #[error("GraphQL errors: {}", join_messages(errors))]
    Graphql { errors: Vec<GraphqlError> },

    #[error("GraphQL response carried no data")]
    MissingData,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl FetchError {
    /// `true` when the HTTP exchange itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Network(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Every message carried by this failure, in upstream order.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Graphql { errors } => errors.iter().map(|e| e.message.clone()).collect(),
            other => vec![other.to_string()],
        }
    }

    /// Stable machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::HttpStatus { .. } | Self::Network(_) => "upstream_transport",
            Self::Graphql { .. } => "upstream_graphql",
            Self::Decode(_) | Self::MissingData => "upstream_decode",
        }
    }

    /// All messages folded into the single line shown to users.
    pub fn report(&self) -> String {
        format!(
            "Could Not Retrieve Pokemon. Error: {}",
            self.messages().join("; ")
        )
    }
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gql(message: &str) -> GraphqlError {
        GraphqlError {
            message: message.to_string(),
            extensions: None,
        }
    }

    #[test]
    fn report_keeps_every_graphql_message() {
        let err = FetchError::Graphql {
            errors: vec![gql("field 'foo' not found"), gql("validation failed")],
        };
        assert_eq!(
            err.report(),
            "Could Not Retrieve Pokemon. Error: field 'foo' not found; validation failed"
        );
        assert_eq!(err.code(), "upstream_graphql");
        assert!(!err.is_transport());
    }

    #[test]
    fn http_status_is_transport() {
        let err = FetchError::HttpStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.report(), "Could Not Retrieve Pokemon. Error: GraphQL Fetch Failed: 500");
    }
}
