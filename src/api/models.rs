use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AgentRequest {
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AgentSuccess {
    pub success: bool,
    pub output: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AgentFailure {
    pub success: bool,
    pub error: String,
}

/// Body of 4xx responses; carries no `success` field.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}
