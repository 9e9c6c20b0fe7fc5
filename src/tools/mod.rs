pub mod search;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::llm::models::ToolDefinition;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
    #[error("{0} API key is not configured")]
    MissingCredential(&'static str),
    #[error("Network Error: {0}")]
    Network(String),
    #[error("API Error: {0}")]
    Api(String),
    #[error("Tool '{0}' not found")]
    UnknownTool(String),
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Runs the tool with the model's JSON-encoded arguments and returns the
    /// payload handed back to the model.
    async fn call(&self, arguments: &str) -> Result<String, ToolError>;
}

pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub async fn call_tool(&self, name: &str, arguments: &str) -> Result<String, ToolError> {
        for tool in &self.tools {
            if tool.definition().function.name == name {
                return tool.call(arguments).await;
            }
        }
        Err(ToolError::UnknownTool(name.to_string()))
    }
}
