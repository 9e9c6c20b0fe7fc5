use serde::Deserialize;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful research assistant. \
Use the perplexity_search tool when you need to find current information.";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiConfig {
    pub api_base: String,
    pub api_key: String,
    pub default_model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub openai: Option<OpenAiConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub api_base: String,
    /// Empty or unset keeps the server up; the search tool then fails per call.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    pub system_prompt: String,
    pub max_iterations: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub agent: AgentConfig,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("llm.provider", "openai")?
            .set_default("llm.temperature", 0.7)?
            .set_default("llm.max_tokens", 2000)?
            .set_default("llm.openai.api_base", "https://api.openai.com/v1")?
            .set_default("llm.openai.api_key", "${OPENAI_API_KEY}")?
            .set_default("llm.openai.default_model", "gpt-4o-mini")?
            .set_default("search.api_base", "https://api.perplexity.ai")?
            .set_default("search.api_key", "${PERPLEXITY_API_KEY}")?
            .set_default("agent.system_prompt", DEFAULT_SYSTEM_PROMPT)?
            .set_default("agent.max_iterations", 5)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SCOUT").separator("__"))
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;

        // Expand environment variables if present like ${OPENAI_API_KEY}
        app_config.server.host = expand_env(&app_config.server.host);

        if let Some(ref mut openai) = app_config.llm.openai {
            openai.api_key = expand_env(&openai.api_key);
        }

        app_config.search.api_key = app_config
            .search
            .api_key
            .as_deref()
            .map(expand_env)
            .filter(|key| !key.trim().is_empty());

        Ok(app_config)
    }
}

fn expand_env(val: &str) -> String {
    if val.starts_with("${") && val.ends_with('}') {
        let var_name = &val[2..val.len() - 1];
        std::env::var(var_name).unwrap_or_default()
    } else {
        val.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_braced_variables_only() {
        std::env::set_var("SCOUT_TEST_EXPAND", "secret");
        assert_eq!(expand_env("${SCOUT_TEST_EXPAND}"), "secret");
        assert_eq!(expand_env("plain-value"), "plain-value");
        assert_eq!(expand_env("${SCOUT_TEST_DEFINITELY_UNSET}"), "");
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = AppConfig::load("does-not-exist").unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.llm.max_tokens, 2000);
        assert_eq!(
            config.llm.openai.unwrap().default_model,
            "gpt-4o-mini"
        );
    }
}
