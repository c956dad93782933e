//! Greeting endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::domain::Greeting;

#[derive(Debug, Default, Deserialize)]
pub struct GreetingParams {
    pub name: Option<String>,
}

/// GET /greeting?name=<string>
pub async fn greeting(
    State(state): State<AppState>,
    Query(params): Query<GreetingParams>,
) -> Json<Greeting> {
    Json(state.greeting_counter.greet(params.name.as_deref()))
}
