//! Transaction API endpoints - JSON API

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ezpay_core::{
    validation, CoreError, RegistryStats, TransactionRecord, TransactionRegistry,
    TransactionsResponse,
};
use std::sync::Arc;

use super::params::{
    parse_id, parse_kind, CreateTransactionRequest, ListParams, RecentParams,
    StatusUpdateRequest, VerifyRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Resolve the registry for the `:kind` segment and apply simulated latency
async fn registry(state: &AppState, kind: &str) -> ApiResult<Arc<TransactionRegistry>> {
    let kind = parse_kind(kind)?;
    state.simulate_latency().await;
    Ok(state.registries.get(kind).clone())
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// Create a PENDING transfer (JSON API)
pub async fn api_create_transaction(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TransactionRecord>)> {
    let registry = registry(&state, &kind).await?;
    let request = body(payload)?;

    if let Some(confirmation) = request.confirm_account_number.as_deref() {
        validation::validate_account_confirmation(
            request.counterparty.identifier(),
            confirmation,
        )?;
    }
    let new = request.into_new_transaction();
    validation::validate_new_transaction(&new, registry.kind())?;

    let record = registry.create(new)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List transactions with filters and pagination (JSON API)
pub async fn api_transactions(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<TransactionsResponse>> {
    let registry = registry(&state, &kind).await?;
    let filter = params.filter()?;
    let (limit, offset) = params.page();

    let (transactions, total_count) = registry.query(&filter, limit, offset);
    Ok(Json(TransactionsResponse {
        transactions,
        total_count,
        page: offset / limit + 1,
        page_size: limit,
    }))
}

/// Most recent transactions (JSON API)
pub async fn api_recent_transactions(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<RecentParams>,
) -> ApiResult<Json<Vec<TransactionRecord>>> {
    let registry = registry(&state, &kind).await?;
    let limit = params.limit(state.config.registry.recent_limit);
    Ok(Json(registry.recent(limit)))
}

/// Counts per status and net settled amount (JSON API)
pub async fn api_transaction_summary(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<Json<RegistryStats>> {
    let registry = registry(&state, &kind).await?;
    Ok(Json(registry.stats()))
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Json<TransactionRecord>> {
    let registry = registry(&state, &kind).await?;
    let id = parse_id(&id)?;
    registry
        .get(id)
        .map(Json)
        .ok_or_else(|| CoreError::TransactionNotFound { id }.into())
}

/// Overwrite the status of a transaction (JSON API)
pub async fn api_update_status(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<TransactionRecord>> {
    let registry = registry(&state, &kind).await?;
    let id = parse_id(&id)?;
    let status = body(payload)?.status()?;
    Ok(Json(registry.update_status(id, status)?))
}

/// Settle a PENDING transaction (JSON API)
pub async fn api_process_transaction(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Json<TransactionRecord>> {
    let registry = registry(&state, &kind).await?;
    let id = parse_id(&id)?;
    Ok(Json(registry.process(id)?))
}

/// PIN-entry step (JSON API): checks the PIN format, then settles the transaction
///
/// There is no stored PIN, so any well-formed PIN is accepted.
pub async fn api_verify_transaction(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> ApiResult<Json<TransactionRecord>> {
    let registry = registry(&state, &kind).await?;
    let id = parse_id(&id)?;
    let request = body(payload)?;
    validation::validate_pin(&request.pin)?;
    Ok(Json(registry.process(id)?))
}

/// Remove a transaction (JSON API)
pub async fn api_delete_transaction(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let registry = registry(&state, &kind).await?;
    let id = parse_id(&id)?;
    if registry.delete(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::TransactionNotFound { id }.into())
    }
}
