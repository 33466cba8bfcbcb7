use crate::entities::MembershipStatus;
use crate::errors::ServiceError;
use crate::features::flags;
use crate::handlers::common::DeleteConfirmation;
use crate::handlers::invoices;
use crate::services::customers::{CustomerCreate, CustomerUpdate};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LinkPlanParams {
    #[serde(default)]
    status: MembershipStatus,
}

#[derive(Debug, Deserialize)]
struct PlanStatusFilter {
    status: MembershipStatus,
}

async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CustomerCreate>,
) -> Result<impl IntoResponse, ServiceError> {
    state.features.require(flags::CUSTOMERS_WRITE)?;
    let created = state.services.customers.create_customer(payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.get_customer(id).await?;
    Ok(Json(customer))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CustomerUpdate>,
) -> Result<impl IntoResponse, ServiceError> {
    state.features.require(flags::CUSTOMERS_WRITE)?;
    let updated = state.services.customers.update_customer(id, payload).await?;
    Ok(Json(updated))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.features.require(flags::CUSTOMERS_WRITE)?;
    state.services.customers.delete_customer(id).await?;
    Ok(Json(DeleteConfirmation::new("Customer deleted")))
}

async fn list_customers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let customers = state.services.customers.list_customers().await?;
    Ok(Json(customers))
}

async fn link_plan(
    State(state): State<AppState>,
    Path((id, plan_id)): Path<(i32, i32)>,
    Query(params): Query<LinkPlanParams>,
) -> Result<impl IntoResponse, ServiceError> {
    state.features.require(flags::MEMBERSHIPS_WRITE)?;
    let link = state
        .services
        .memberships
        .link_plan(id, plan_id, params.status)
        .await?;
    Ok((axum::http::StatusCode::CREATED, Json(link)))
}

async fn list_customer_plans(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(filter): Query<PlanStatusFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let plans = state
        .services
        .memberships
        .list_plans_for_customer(id, filter.status)
        .await?;
    Ok(Json(plans))
}

async fn unlink_plan(
    State(state): State<AppState>,
    Path((id, plan_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ServiceError> {
    state.features.require(flags::MEMBERSHIPS_WRITE)?;
    state.services.memberships.unlink_plan(id, plan_id).await?;
    Ok(Json(DeleteConfirmation::new("Customer plan deleted")))
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route(
            "/:id",
            get(get_customer)
                .patch(update_customer)
                .delete(delete_customer),
        )
        .route("/:id/plans", get(list_customer_plans))
        .route("/:id/plans/:plan_id", post(link_plan).delete(unlink_plan))
        .route("/:id/invoice", get(invoices::customer_invoice))
}
