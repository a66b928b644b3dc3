//! Invoice HTTP handlers

use super::model::{InvoiceDetail, InvoiceUpdate, NewInvoice};
use crate::core::{ApiError, InvoiceService, JsonBody};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Invoice-specific AppState
#[derive(Clone)]
pub struct InvoiceAppState {
    pub invoices: Arc<dyn InvoiceService>,
}

/// Parse the `{id}` path segment
///
/// A segment that is not an integer cannot name any invoice, so it is
/// reported as not found rather than as a storage error.
fn parse_invoice_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::not_found("invoice", raw))
}

/// GET /invoices
pub async fn list_invoices(State(state): State<InvoiceAppState>) -> Result<Json<Value>, ApiError> {
    let invoices = state.invoices.list().await?;
    tracing::debug!(count = invoices.len(), "listed invoices");
    Ok(Json(json!({ "invoices": invoices })))
}

/// GET /invoices/{id}
pub async fn get_invoice(
    State(state): State<InvoiceAppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_invoice_id(&raw_id)?;
    let row = state
        .invoices
        .get_with_company(id)
        .await?
        .ok_or_else(|| ApiError::not_found("invoice", id))?;

    Ok(Json(json!({ "invoice": InvoiceDetail::from(row) })))
}

/// POST /invoices
pub async fn create_invoice(
    State(state): State<InvoiceAppState>,
    JsonBody(body): JsonBody<NewInvoice>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = body.validate()?;
    let invoice = state.invoices.create(draft).await?;
    tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "created invoice");
    Ok((StatusCode::CREATED, Json(json!({ "invoice": invoice }))))
}

/// PUT /invoices/{id}
///
/// The body is checked before the id, so a bad body on an unknown invoice
/// is a 400.
pub async fn update_invoice(
    State(state): State<InvoiceAppState>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody<InvoiceUpdate>,
) -> Result<Json<Value>, ApiError> {
    let amt = body.validate()?;
    let id = parse_invoice_id(&raw_id)?;
    let invoice = state
        .invoices
        .update_amount(id, amt)
        .await?
        .ok_or_else(|| ApiError::not_found("invoice", id))?;
    Ok(Json(json!({ "invoice": invoice })))
}

/// DELETE /invoices/{id}
pub async fn delete_invoice(
    State(state): State<InvoiceAppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_invoice_id(&raw_id)?;
    if !state.invoices.delete(id).await? {
        return Err(ApiError::not_found("invoice", id));
    }
    tracing::info!(id, "deleted invoice");
    Ok(Json(json!({ "status": "deleted" })))
}
