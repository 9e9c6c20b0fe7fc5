//! Single-tool reasoning loop.
//!
//! An [`AgentExecutor`] is built for every request and thrown away after it
//! answers. It alternates between the model and the tool registry until the
//! model produces a final answer or the round bound is hit.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::llm::{
    models::{ChatOptions, Message},
    LlmError, LlmProvider,
};
use crate::tools::{Tool, ToolError, ToolRegistry};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    Llm(#[from] LlmError),
    #[error("{0}")]
    Tool(#[from] ToolError),
    #[error("Agent stopped due to max iterations ({0}) without a final answer")]
    MaxIterations(usize),
}

/// Knobs shared by every executor the factory builds.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub system_prompt: String,
    pub max_iterations: usize,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl AgentSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            system_prompt: config.agent.system_prompt.clone(),
            max_iterations: config.agent.max_iterations,
            model: config.llm.openai.as_ref().map(|o| o.default_model.clone()),
            temperature: Some(config.llm.temperature),
            max_tokens: Some(config.llm.max_tokens),
        }
    }
}

/// Immutable ingredients for building executors; safe to share across requests.
#[derive(Clone)]
pub struct AgentFactory {
    llm: Arc<dyn LlmProvider>,
    tool: Arc<dyn Tool>,
    settings: AgentSettings,
}

impl AgentFactory {
    pub fn new(llm: Arc<dyn LlmProvider>, tool: Arc<dyn Tool>, settings: AgentSettings) -> Self {
        Self { llm, tool, settings }
    }

    pub fn build(&self) -> AgentExecutor {
        AgentExecutor {
            llm: self.llm.clone(),
            tools: ToolRegistry::new(vec![self.tool.clone()]),
            settings: self.settings.clone(),
        }
    }
}

pub struct AgentExecutor {
    llm: Arc<dyn LlmProvider>,
    tools: ToolRegistry,
    settings: AgentSettings,
}

impl AgentExecutor {
    /// Runs the loop for one user input and returns the model's final text.
    pub async fn invoke(&self, input: &str) -> Result<String, AgentError> {
        info!(
            provider = self.llm.name(),
            tools = self.tools.definitions().len(),
            "Entering agent executor"
        );

        let options = ChatOptions {
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            tools: self.tools.definitions(),
        };

        let mut conversation = vec![
            Message::system(self.settings.system_prompt.clone()),
            Message::user(input),
        ];

        for round in 1..=self.settings.max_iterations {
            let response = self.llm.chat(&conversation, options.clone()).await?;

            if response.is_final() {
                info!(round, model = %response.model, "Agent finished");
                return Ok(response.content);
            }

            debug!(
                round,
                calls = response.tool_calls.len(),
                "Model requested tool calls"
            );

            let calls = response.tool_calls.clone();
            conversation.push(Message::assistant_tool_calls(response.content, calls.clone()));

            for call in calls {
                debug!(tool = %call.function.name, args = %call.function.arguments, "Invoking tool");
                let output = self
                    .tools
                    .call_tool(&call.function.name, &call.function.arguments)
                    .await?;
                conversation.push(Message::tool_result(call.id, output));
            }
        }

        warn!(
            max_iterations = self.settings.max_iterations,
            "Agent did not converge"
        );
        Err(AgentError::MaxIterations(self.settings.max_iterations))
    }
}
