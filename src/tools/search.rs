use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::config::SearchConfig;
use crate::llm::models::{FunctionDefinition, ToolDefinition};
use crate::tools::{Tool, ToolError};

pub const PERPLEXITY_SEARCH: &str = "perplexity_search";

/// Web search backed by the Perplexity Search API.
///
/// The response body is returned pretty-printed and otherwise untouched; the
/// model reads it as-is.
pub struct PerplexitySearchTool {
    client: Client,
    api_base: String,
    api_key: Option<String>,
    max_results: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct SearchArguments {
    query: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
}

impl PerplexitySearchTool {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_results: config.max_results,
        }
    }

    async fn search(&self, query: &str) -> Result<serde_json::Value, ToolError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ToolError::MissingCredential("Perplexity"))?;

        let response = self
            .client
            .post(format!("{}/search", self.api_base))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&SearchRequest {
                query,
                max_results: self.max_results,
            })
            .send()
            .await
            .map_err(|e| ToolError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ToolError::Api(format!("Perplexity Error {}: {}", status, text)));
        }

        response
            .json()
            .await
            .map_err(|e| ToolError::Api(format!("Unreadable search response: {}", e)))
    }
}

#[async_trait]
impl Tool for PerplexitySearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            r#type: "function".to_string(),
            function: FunctionDefinition {
                name: PERPLEXITY_SEARCH.to_string(),
                description: "Search the web using Perplexity to find current information".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query to look up"
                        }
                    },
                    "required": ["query"]
                }),
            },
        }
    }

    async fn call(&self, arguments: &str) -> Result<String, ToolError> {
        let args: SearchArguments = serde_json::from_str(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        info!("Searching Perplexity for: {:?}", args.query);

        match self.search(&args.query).await {
            Ok(result) => {
                info!("Search completed successfully");
                serde_json::to_string_pretty(&result)
                    .map_err(|e| ToolError::Api(e.to_string()))
            }
            Err(e) => {
                error!("Perplexity search error: {}", e);
                Err(e)
            }
        }
    }
}
