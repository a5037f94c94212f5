use crate::core::lambda::{hello_response, LambdaResponse};
use crate::domain::model::{ServiceKind, ServiceSpec};
use axum::{extract::State, routing::get, Router};
use std::sync::Arc;

#[derive(Clone)]
struct GreetingState {
    service: Arc<str>,
    greeting: Arc<str>,
}

/// `GET /` answers with the greeting as plain text.
pub fn greeting_router(service: &str, greeting: &str) -> Router {
    let state = GreetingState {
        service: Arc::from(service),
        greeting: Arc::from(greeting),
    };
    Router::new().route("/", get(greet)).with_state(state)
}

/// `GET /` (and CORS preflight) answers with the serverless payload.
pub fn lambda_router() -> Router {
    Router::new().route("/", get(lambda).options(lambda))
}

pub fn router_for(spec: &ServiceSpec) -> Router {
    match spec.kind {
        ServiceKind::Greeting => {
            greeting_router(&spec.name, spec.greeting.as_deref().unwrap_or_default())
        }
        ServiceKind::Lambda => lambda_router(),
    }
}

async fn greet(State(state): State<GreetingState>) -> String {
    tracing::debug!("{} served GET /", state.service);
    state.greeting.to_string()
}

async fn lambda() -> LambdaResponse {
    tracing::debug!("lambda route served");
    hello_response()
}
