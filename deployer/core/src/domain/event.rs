// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Invocation contract of the deployment function: API gateway proxy event in,
//! proxy response out.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::task_definition::image_tag;

pub const PARAM_BRANCH_NAME: &str = "branch_name";
pub const PARAM_COMMIT_HASH: &str = "commit_hash";

/// Branch and commit to deploy, read from `queryStringParameters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub branch_name: String,
    pub commit_hash: String,
}

impl DeploymentRequest {
    /// Returns the name of the first missing parameter on failure.
    pub fn from_event(event: &Value) -> Result<Self, &'static str> {
        let params = &event["queryStringParameters"];
        let param = |name: &'static str| {
            params
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(name)
        };

        Ok(Self {
            branch_name: param(PARAM_BRANCH_NAME)?,
            commit_hash: param(PARAM_COMMIT_HASH)?,
        })
    }

    pub fn image_tag(&self) -> String {
        image_tag(&self.branch_name, &self.commit_hash)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ProxyResponse {
    /// 200 response whose body is the JSON form of `event`.
    pub fn echo(event: &Value) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code: 200,
            headers: HashMap::new(),
            body: serde_json::to_string(event)?,
            is_base64_encoded: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_from_event() {
        let event = json!({
            "queryStringParameters": { "branch_name": "main", "commit_hash": "abc123" }
        });

        let request = DeploymentRequest::from_event(&event).unwrap();
        assert_eq!(request.branch_name, "main");
        assert_eq!(request.commit_hash, "abc123");
        assert_eq!(request.image_tag(), "main_abc123");
    }

    #[test]
    fn test_missing_parameters() {
        let no_params = json!({ "path": "/create" });
        assert_eq!(DeploymentRequest::from_event(&no_params), Err("branch_name"));

        let null_params = json!({ "queryStringParameters": null });
        assert_eq!(DeploymentRequest::from_event(&null_params), Err("branch_name"));

        let no_commit = json!({ "queryStringParameters": { "branch_name": "main" } });
        assert_eq!(DeploymentRequest::from_event(&no_commit), Err("commit_hash"));
    }

    #[test]
    fn test_echo_response_shape() {
        let event = json!({ "queryStringParameters": { "branch_name": "x", "commit_hash": "y" } });
        let response = ProxyResponse::echo(&event).unwrap();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["headers"], json!({}));
        assert_eq!(json["isBase64Encoded"], false);
        assert_eq!(response.body, serde_json::to_string(&event).unwrap());
    }
}
