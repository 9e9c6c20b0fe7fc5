use actix_web::{error::InternalError, get, post, web, HttpResponse, Responder, Result as WebResult};
use std::sync::Arc;
use tracing::{error, warn};

use crate::agent::{AgentFactory, AgentSettings};
use crate::api::models::{AgentFailure, AgentRequest, AgentSuccess, ErrorBody};
use crate::config::AppConfig;
use crate::llm::{LlmProvider, ProviderFactory};
use crate::tools::{search::PerplexitySearchTool, Tool};

/// Everything a request handler needs. Immutable once built.
#[derive(Clone)]
pub struct AppState {
    pub agents: AgentFactory,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmProvider>, search: Arc<dyn Tool>, settings: AgentSettings) -> Self {
        Self {
            agents: AgentFactory::new(llm, search, settings),
        }
    }

    /// Wires the configured model provider and the Perplexity tool.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let llm = ProviderFactory::create_default(config)?;
        let search: Arc<dyn Tool> = Arc::new(PerplexitySearchTool::new(&config.search));
        Some(Self::new(llm, search, AgentSettings::from_config(config)))
    }
}

#[post("/api/agent")]
pub async fn run_agent(
    state: web::Data<AppState>,
    req: web::Json<AgentRequest>,
) -> WebResult<HttpResponse> {
    let input = match req.into_inner().input {
        Some(input) if !input.is_empty() => input,
        _ => {
            return Ok(HttpResponse::BadRequest().json(ErrorBody {
                error: "Input is required".to_string(),
            }))
        }
    };

    let executor = state.agents.build();

    match executor.invoke(&input).await {
        Ok(output) => Ok(HttpResponse::Ok().json(AgentSuccess {
            success: true,
            output,
        })),
        Err(e) => {
            error!("Agent API Error: {}", e);
            Ok(HttpResponse::InternalServerError().json(AgentFailure {
                success: false,
                error: e.to_string(),
            }))
        }
    }
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "healthy"}))
}

#[get("/")]
pub async fn index() -> impl Responder {
    let html = include_str!("../../static/index.html");
    HttpResponse::Ok().content_type("text/html").body(html)
}

/// Unparseable bodies get the same JSON error shape as a missing input.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        let response = HttpResponse::BadRequest().json(ErrorBody {
            error: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(run_agent)
        .service(health)
        .service(index);
}
