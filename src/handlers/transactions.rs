use crate::errors::ServiceError;
use crate::features::flags;
use crate::handlers::common::PaginationParams;
use crate::services::transactions::TransactionCreate;
use crate::AppState;
use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::post,
    Router,
};

async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<TransactionCreate>,
) -> Result<impl IntoResponse, ServiceError> {
    state.features.require(flags::TRANSACTIONS_WRITE)?;
    let created = state
        .services
        .transactions
        .create_transaction(payload)
        .await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn list_transactions(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let transactions = state
        .services
        .transactions
        .list_transactions(page.skip, page.limit)
        .await?;
    Ok(Json(transactions))
}

pub fn transaction_routes() -> Router<AppState> {
    Router::new().route("/", post(create_transaction).get(list_transactions))
}
