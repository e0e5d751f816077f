// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP client for the deployment API gateway

use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

/// Production `/create` route of the deployment API.
pub const DEFAULT_API_URL: &str =
    "https://0ym4rbvub6.execute-api.us-east-1.amazonaws.com/production/create";

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Deployment API returned {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct TriggerResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TriggerResponse {
    /// Fails unless the status is 2xx.
    pub fn error_for_status(self) -> Result<Self, TriggerError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(TriggerError::UnexpectedStatus {
                status: self.status,
                body: self.body,
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildTrigger {
    client: Client,
    api_url: String,
}

impl BuildTrigger {
    pub fn new(api_url: impl Into<String>) -> Result<Self, TriggerError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(TriggerError::Client)?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// Values are inserted verbatim; callers pass CI-provided identifiers.
    pub fn url(&self, branch_name: &str, commit_hash: &str) -> String {
        format!(
            "{}?branch_name={}&commit_hash={}",
            self.api_url, branch_name, commit_hash
        )
    }

    /// One GET, no retry. Any HTTP status is returned as a response.
    pub async fn kick(&self, url: &str) -> Result<TriggerResponse, TriggerError> {
        let transport = |source| TriggerError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        debug!(%status, bytes = body.len(), "Deployment API responded");

        Ok(TriggerResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_contains_values_verbatim() {
        let trigger = BuildTrigger::new(DEFAULT_API_URL).unwrap();
        let url = trigger.url("feature/login", "9fceb02d0ae598e95dc970b74767f19372d61af8");

        assert_eq!(
            url,
            "https://0ym4rbvub6.execute-api.us-east-1.amazonaws.com/production/create\
             ?branch_name=feature/login&commit_hash=9fceb02d0ae598e95dc970b74767f19372d61af8"
        );
    }

    #[test]
    fn test_url_does_not_escape_reserved_characters() {
        let trigger = BuildTrigger::new("http://deploy.local/create").unwrap();
        let cases = [
            ("a&b", "c=d", "http://deploy.local/create?branch_name=a&b&commit_hash=c=d"),
            ("my branch", "abc 123", "http://deploy.local/create?branch_name=my branch&commit_hash=abc 123"),
            ("", "", "http://deploy.local/create?branch_name=&commit_hash="),
            ("release/1.0?x", "#1", "http://deploy.local/create?branch_name=release/1.0?x&commit_hash=#1"),
        ];

        for (branch, commit, expected) in cases {
            let url = trigger.url(branch, commit);
            assert_eq!(url, expected);
            assert!(url.contains(&format!("branch_name={}", branch)));
            assert!(url.contains(&format!("commit_hash={}", commit)));
        }
    }

    #[test]
    fn test_status_classification() {
        let ok = TriggerResponse { status: StatusCode::NO_CONTENT, body: String::new() };
        assert!(ok.error_for_status().is_ok());

        for status in [StatusCode::MOVED_PERMANENTLY, StatusCode::FORBIDDEN, StatusCode::BAD_GATEWAY] {
            let response = TriggerResponse { status, body: "nope".to_string() };
            let err = response.error_for_status().unwrap_err();
            assert!(matches!(err, TriggerError::UnexpectedStatus { status: s, .. } if s == status));
        }
    }
}
