use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    CartItem, CartSession, CheckoutError, GatewayEvent, LoyaltyError, PaymentMethod,
    RedirectOutcome,
};
use crate::service::{CheckoutOutcome, LedgerView, ReconcileOutcome};

use super::{error::AppError, state::AppState};

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub notes: String,
    pub payment_method: PaymentMethod,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub order_id: Uuid,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
    pub cart_cleared: bool,
}

/// Submit a cart snapshot as an order.
pub async fn submit_order(
    State(app): State<Arc<AppState>>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let user = app.identity.current_user().await;
    let mut cart = CartSession::hydrate(request.items, request.notes);

    let outcome = app
        .checkout
        .submit(user.as_ref(), &mut cart, request.payment_method)
        .await?;

    let response = match outcome {
        CheckoutOutcome::Submitted { order, .. } => CheckoutResponse {
            order_id: order.id,
            status: "placed".to_string(),
            payment_url: None,
            transaction_reference: None,
            cart_cleared: true,
        },
        CheckoutOutcome::RedirectToPayment {
            order,
            payment_url,
            transaction_reference,
        } => CheckoutResponse {
            order_id: order.id,
            status: "awaiting_payment".to_string(),
            payment_url: Some(payment_url),
            transaction_reference: Some(transaction_reference),
            cart_cleared: false,
        },
    };

    Ok(Json(response))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub event_id: String,
    pub event_details: WebhookDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDetails {
    pub transaction_reference: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub amount: Option<WebhookAmount>,
}

#[derive(Deserialize)]
pub struct WebhookAmount {
    pub value: i64,
}

/// Gateway webhook. Always acknowledges with 200 - a processing failure is
/// our problem to chase from the logs, not a reason for the gateway to
/// hammer us with retries.
pub async fn payment_webhook(
    State(app): State<Arc<AppState>>,
    Json(payload): Json<WebhookPayload>,
) -> impl IntoResponse {
    let event = GatewayEvent {
        event_id: payload.event_id,
        transaction_reference: payload.event_details.transaction_reference,
        event_type: payload.event_details.event_type,
        amount_minor: payload.event_details.amount.map(|a| a.value),
    };

    match app.reconciler.handle_webhook(&event).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "received": true }))),
        Err(e) => {
            tracing::error!(
                reference = %event.transaction_reference,
                event_id = %event.event_id,
                "Webhook processing failed: {}",
                e
            );
            (
                StatusCode::OK,
                Json(json!({ "received": true, "error": e.to_string() })),
            )
        }
    }
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub order: Uuid,
}

/// Landing route for the gateway's result URLs.
pub async fn payment_redirect(
    State(app): State<Arc<AppState>>,
    Path(outcome): Path<String>,
    Query(query): Query<RedirectQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let outcome: RedirectOutcome = outcome
        .parse()
        .map_err(|_| LoyaltyError::Checkout(CheckoutError::InvalidTransactionReference))?;

    let user = app.identity.current_user().await;
    let result = app
        .reconciler
        .handle_redirect(user.as_ref(), outcome, query.order)
        .await?;

    let settled = matches!(
        result,
        ReconcileOutcome::RewardsApplied(_) | ReconcileOutcome::AlreadyProcessed
    );

    Ok(Json(json!({
        "order": query.order,
        "settled": settled,
    })))
}

#[derive(Deserialize)]
pub struct ScanRequest {
    pub payload: String,
}

pub async fn staff_scan(
    State(app): State<Arc<AppState>>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<LedgerView>, AppError> {
    let view = app.terminal.scan(&request.payload).await?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct StaffActionRequest {
    pub user_id: Uuid,
}

pub async fn staff_stamp(
    State(app): State<Arc<AppState>>,
    Json(request): Json<StaffActionRequest>,
) -> Result<Json<LedgerView>, AppError> {
    let admin = app.identity.current_user().await.map(|u| u.id);
    let view = app.terminal.add_stamp(request.user_id, admin).await?;
    Ok(Json(view))
}

pub async fn staff_redeem(
    State(app): State<Arc<AppState>>,
    Json(request): Json<StaffActionRequest>,
) -> Result<Json<LedgerView>, AppError> {
    let admin = app.identity.current_user().await.map(|u| u.id);
    let view = app.terminal.redeem(request.user_id, admin).await?;
    Ok(Json(view))
}
