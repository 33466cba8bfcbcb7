use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};

/// Builds the derived invoice for a customer. Mounted under
/// `/customers/:id/invoice`; read-only, so no feature gate applies.
pub async fn customer_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoice = state.services.invoices.build_invoice(id).await?;
    Ok(Json(invoice))
}
