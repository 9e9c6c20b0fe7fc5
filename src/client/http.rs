use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::client::{AgentClient, ClientError};

/// Either response shape of `POST /api/agent`.
#[derive(Debug, Deserialize)]
struct AgentReply {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub struct HttpAgentClient {
    client: Client,
    endpoint: String,
}

impl HttpAgentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/agent", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn ask(&self, input: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "input": input }))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        interpret_reply(status, &body)
    }
}

fn interpret_reply(status: reqwest::StatusCode, body: &str) -> Result<String, ClientError> {
    let reply: Option<AgentReply> = serde_json::from_str(body).ok();

    if !status.is_success() {
        let reason = reply
            .and_then(|r| r.error)
            .unwrap_or_else(|| "Something went wrong".to_string());
        return Err(ClientError::Server(reason));
    }

    let reply = reply.ok_or_else(|| ClientError::Malformed(format!("not JSON: {}", body)))?;
    reply
        .output
        .ok_or_else(|| ClientError::Malformed("missing output field".to_string()))
}
