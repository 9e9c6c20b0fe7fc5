#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use scout::agent::AgentSettings;
use scout::llm::models::{
    ChatOptions, ChatResponse, FunctionCall, FunctionDefinition, Message, ToolCall, ToolDefinition,
};
use scout::llm::{LlmError, LlmProvider};
use scout::tools::{Tool, ToolError};

pub fn settings(max_iterations: usize) -> AgentSettings {
    AgentSettings {
        system_prompt: "You are a test assistant.".to_string(),
        max_iterations,
        model: Some("stub-model".to_string()),
        temperature: Some(0.7),
        max_tokens: Some(2000),
    }
}

pub fn answer(text: &str) -> ChatResponse {
    ChatResponse {
        content: text.to_string(),
        tool_calls: vec![],
        model: "stub-model".to_string(),
        usage: None,
    }
}

pub fn search_call(id: &str, query: &str) -> ChatResponse {
    ChatResponse {
        content: String::new(),
        tool_calls: vec![ToolCall {
            id: id.to_string(),
            r#type: "function".to_string(),
            function: FunctionCall {
                name: "perplexity_search".to_string(),
                arguments: json!({ "query": query }).to_string(),
            },
        }],
        model: "stub-model".to_string(),
        usage: None,
    }
}

/// Replays a fixed script of replies; once exhausted, repeats `then`.
pub struct ScriptedLlm {
    script: Mutex<VecDeque<Result<ChatResponse, LlmError>>>,
    then: Option<ChatResponse>,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<Vec<Message>>>,
    pub options: Mutex<Vec<ChatOptions>>,
}

impl ScriptedLlm {
    pub fn new(script: Vec<Result<ChatResponse, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            then: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(vec![]),
            options: Mutex::new(vec![]),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::new(vec![Ok(answer(text))])
    }

    /// Never settles on an answer.
    pub fn always_searching() -> Self {
        let mut llm = Self::new(vec![]);
        llm.then = Some(search_call("call_loop", "again"));
        llm
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, messages: &[Message], options: ChatOptions) -> Result<ChatResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(messages.to_vec());
        self.options.lock().unwrap().push(options);

        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }
        self.then
            .clone()
            .ok_or_else(|| LlmError::Api("script exhausted".to_string()))
    }
}

pub struct StubSearch {
    result: Result<serde_json::Value, String>,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl StubSearch {
    pub fn returning(payload: serde_json::Value) -> Self {
        Self {
            result: Ok(payload),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(vec![]),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(vec![]),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Tool for StubSearch {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            r#type: "function".to_string(),
            function: FunctionDefinition {
                name: "perplexity_search".to_string(),
                description: "stubbed search".to_string(),
                parameters: json!({ "type": "object" }),
            },
        }
    }

    async fn call(&self, arguments: &str) -> Result<String, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(arguments.to_string());
        match &self.result {
            Ok(payload) => Ok(serde_json::to_string_pretty(payload).unwrap()),
            Err(reason) => Err(ToolError::Network(reason.clone())),
        }
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
