use crate::errors::ServiceError;
use crate::features::flags;
use crate::handlers::common::DeleteConfirmation;
use crate::services::plans::PlanCreate;
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<PlanCreate>,
) -> Result<impl IntoResponse, ServiceError> {
    state.features.require(flags::PLANS_WRITE)?;
    let created = state.services.plans.create_plan(payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let plan = state.services.plans.get_plan(id).await?;
    Ok(Json(plan))
}

async fn list_plans(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let plans = state.services.plans.list_plans().await?;
    Ok(Json(plans))
}

async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.features.require(flags::PLANS_WRITE)?;
    state.services.plans.delete_plan(id).await?;
    Ok(Json(DeleteConfirmation::new("Plan deleted")))
}

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_plan).get(list_plans))
        .route("/:id", get(get_plan).delete(delete_plan))
}
