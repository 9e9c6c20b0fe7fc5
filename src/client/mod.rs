pub mod http;
pub mod session;

pub use http::HttpAgentClient;
pub use session::{ChatMessage, ChatSession, Role};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Server(String),
    #[error("Network Error: {0}")]
    Network(String),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Transport used by [`ChatSession`] to reach the answer endpoint.
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn ask(&self, input: &str) -> Result<String, ClientError>;
}
