//! Company HTTP handlers

use super::model::{CompanyDetail, CompanyUpdate, NewCompany};
use crate::core::{ApiError, CompanyService, InvoiceService, JsonBody};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Company-specific AppState
///
/// Holds the invoice service too: the single-company view lists the ids of
/// the invoices the company owns.
#[derive(Clone)]
pub struct CompanyAppState {
    pub companies: Arc<dyn CompanyService>,
    pub invoices: Arc<dyn InvoiceService>,
}

/// GET /companies
pub async fn list_companies(State(state): State<CompanyAppState>) -> Result<Json<Value>, ApiError> {
    let companies = state.companies.list().await?;
    tracing::debug!(count = companies.len(), "listed companies");
    Ok(Json(json!({ "companies": companies })))
}

/// GET /companies/{code}
///
/// The invoice-id lookup runs only once the company itself was found.
pub async fn get_company(
    State(state): State<CompanyAppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let company = state
        .companies
        .get(&code)
        .await?
        .ok_or_else(|| ApiError::not_found("company", &code))?;

    let invoices = state.invoices.ids_for_company(&code).await?;
    let detail = CompanyDetail::new(company, invoices);
    Ok(Json(json!({ "company": detail })))
}

/// POST /companies
pub async fn create_company(
    State(state): State<CompanyAppState>,
    JsonBody(body): JsonBody<NewCompany>,
) -> Result<impl IntoResponse, ApiError> {
    let company = state.companies.create(body).await?;
    tracing::info!(code = %company.code, "created company");
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// PUT /companies/{code}
pub async fn update_company(
    State(state): State<CompanyAppState>,
    Path(code): Path<String>,
    JsonBody(body): JsonBody<CompanyUpdate>,
) -> Result<Json<Value>, ApiError> {
    let changes = body.validate()?;
    let company = state
        .companies
        .update(&code, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("company", &code))?;
    Ok(Json(json!({ "company": company })))
}

/// DELETE /companies/{code}
pub async fn delete_company(
    State(state): State<CompanyAppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.companies.delete(&code).await? {
        return Err(ApiError::not_found("company", &code));
    }
    tracing::info!(%code, "deleted company");
    Ok(Json(json!({ "status": "deleted" })))
}
