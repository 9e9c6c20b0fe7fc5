mod common;

#[cfg(test)]
mod tests {
    use super::common::{answer, search_call, settings, shared, ScriptedLlm, StubSearch};
    use scout::agent::{AgentError, AgentFactory};
    use scout::llm::LlmError;
    use serde_json::json;

    #[tokio::test]
    async fn test_direct_answer_skips_tool() {
        let llm = shared(ScriptedLlm::answering("Paris"));
        let search = shared(StubSearch::returning(json!({})));
        let factory = AgentFactory::new(llm.clone(), search.clone(), settings(5));

        let output = factory.build().invoke("What is the capital of France?").await.unwrap();

        assert_eq!(output, "Paris");
        assert_eq!(llm.call_count(), 1);
        assert_eq!(search.call_count(), 0);

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[0][0].role, "system");
        assert_eq!(seen[0].iter().filter(|m| m.role == "system").count(), 1);
        assert_eq!(seen[0][1].role, "user");
        assert_eq!(seen[0][1].content, "What is the capital of France?");

        let options = llm.options.lock().unwrap();
        assert_eq!(options[0].tools.len(), 1);
        assert_eq!(options[0].tools[0].function.name, "perplexity_search");
        assert_eq!(options[0].max_tokens, Some(2000));
    }

    #[tokio::test]
    async fn test_search_result_is_fed_back_verbatim() {
        let payload = json!({ "results": [{ "title": "Rust 1.80", "url": "https://blog.rust-lang.org" }] });
        let llm = shared(ScriptedLlm::new(vec![
            Ok(search_call("call_1", "latest rust release")),
            Ok(answer("Rust 1.80 is out.")),
        ]));
        let search = shared(StubSearch::returning(payload.clone()));
        let factory = AgentFactory::new(llm.clone(), search.clone(), settings(5));

        let output = factory.build().invoke("What's new in Rust?").await.unwrap();

        assert_eq!(output, "Rust 1.80 is out.");
        assert_eq!(search.call_count(), 1);
        assert!(search.queries.lock().unwrap()[0].contains("latest rust release"));

        let seen = llm.seen.lock().unwrap();
        let second_round = &seen[1];
        assert_eq!(second_round.len(), 4);
        assert_eq!(second_round[2].role, "assistant");
        assert!(second_round[2].tool_calls.is_some());
        assert_eq!(second_round[3].role, "tool");
        assert_eq!(second_round[3].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(second_round[3].content, serde_json::to_string_pretty(&payload).unwrap());
    }

    #[tokio::test]
    async fn test_tool_failure_aborts_run() {
        let llm = shared(ScriptedLlm::new(vec![
            Ok(search_call("call_1", "weather")),
            Ok(answer("should not be reached")),
        ]));
        let search = shared(StubSearch::failing("connection refused"));
        let factory = AgentFactory::new(llm.clone(), search, settings(5));

        let err = factory.build().invoke("weather?").await.unwrap_err();

        assert!(matches!(err, AgentError::Tool(_)));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_round_limit_is_enforced() {
        let llm = shared(ScriptedLlm::always_searching());
        let search = shared(StubSearch::returning(json!({ "results": [] })));
        let factory = AgentFactory::new(llm.clone(), search.clone(), settings(5));

        let err = factory.build().invoke("loop forever").await.unwrap_err();

        assert!(matches!(err, AgentError::MaxIterations(5)));
        assert!(err.to_string().contains("max iterations"));
        assert_eq!(llm.call_count(), 5);
        assert_eq!(search.call_count(), 5);
    }

    #[tokio::test]
    async fn test_model_error_propagates() {
        let llm = shared(ScriptedLlm::new(vec![Err(LlmError::RateLimited)]));
        let search = shared(StubSearch::returning(json!({})));
        let factory = AgentFactory::new(llm, search, settings(5));

        let err = factory.build().invoke("hi").await.unwrap_err();
        assert!(matches!(err, AgentError::Llm(LlmError::RateLimited)));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let mut call = search_call("call_x", "q");
        call.tool_calls[0].function.name = "calculator".to_string();
        let llm = shared(ScriptedLlm::new(vec![Ok(call)]));
        let search = shared(StubSearch::returning(json!({})));
        let factory = AgentFactory::new(llm, search.clone(), settings(5));

        let err = factory.build().invoke("2+2").await.unwrap_err();
        assert!(err.to_string().contains("calculator"));
        assert_eq!(search.call_count(), 0);
    }
}
