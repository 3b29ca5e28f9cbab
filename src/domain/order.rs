use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    AwaitingPayment,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "in-store")]
    InStore,
}

/// Payment state of an order. Unknown gateway event types are recorded
/// verbatim rather than rejected, so operators can see exactly what the
/// gateway reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    Authorized,
    Completed,
    Settled,
    Refused,
    Cancelled,
    Expired,
    Error,
    InStore,
    Other(String),
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => PaymentStatus::Pending,
            "authorized" => PaymentStatus::Authorized,
            "completed" => PaymentStatus::Completed,
            "settled" => PaymentStatus::Settled,
            "refused" => PaymentStatus::Refused,
            "cancelled" => PaymentStatus::Cancelled,
            "expired" => PaymentStatus::Expired,
            "error" => PaymentStatus::Error,
            "in_store" => PaymentStatus::InStore,
            _ => PaymentStatus::Other(s),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Pending => "pending".to_string(),
            PaymentStatus::Authorized => "authorized".to_string(),
            PaymentStatus::Completed => "completed".to_string(),
            PaymentStatus::Settled => "settled".to_string(),
            PaymentStatus::Refused => "refused".to_string(),
            PaymentStatus::Cancelled => "cancelled".to_string(),
            PaymentStatus::Expired => "expired".to_string(),
            PaymentStatus::Error => "error".to_string(),
            PaymentStatus::InStore => "in_store".to_string(),
            PaymentStatus::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total: f64,
    pub notes: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    /// Transaction reference of the hosted payment session, set when one is
    /// created for this order.
    pub payment_reference: Option<String>,
    /// Single-flight marker: once reward effects have been committed for
    /// this order, every later settlement callback is a no-op.
    pub rewards_processed: bool,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Whether the stored payment state confirms a successful authorization.
    /// A `pending` payment status is interim and does not confirm; a
    /// `pending` or `confirmed` order status does, because only a successful
    /// settlement moves an online order out of `awaiting_payment`.
    pub fn payment_confirmed(&self) -> bool {
        matches!(
            self.payment_status,
            PaymentStatus::Authorized | PaymentStatus::Completed | PaymentStatus::Settled
        ) || matches!(self.status, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// Snapshot of one purchased line, decoupled from live menu pricing. The
/// category and reward flag are captured so settlement can recompute reward
/// eligibility from the order alone, without a client cart in hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
    pub category: Option<String>,
    pub reward_applied: bool,
}

/// Fields for order creation; the store assigns id and creation time.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total: f64,
    pub notes: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

/// Partial order update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_reference: Option<String>,
}

/// Amount in minor currency units, as the payment gateway expects.
pub fn minor_units(total: f64) -> u64 {
    (total * 100.0).round() as u64
}

pub const REFERENCE_PREFIX: &str = "ORDER";

/// Unique reference for a hosted payment session:
/// `ORDER-<order id first 8 chars>-<millis>`.
pub fn transaction_reference(order_id: Uuid, at: DateTime<Utc>) -> String {
    let id = order_id.to_string();
    format!("{}-{}-{}", REFERENCE_PREFIX, &id[..8], at.timestamp_millis())
}

/// Recover the order-id prefix from a transaction reference. Returns `None`
/// unless the reference has the exact `ORDER-<8 hex>-<digits>` shape.
pub fn parse_transaction_reference(reference: &str) -> Option<&str> {
    let rest = reference.strip_prefix(REFERENCE_PREFIX)?.strip_prefix('-')?;
    let (prefix, rest) = rest.split_at_checked(8)?;
    if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let timestamp = rest.strip_prefix('-')?;
    if timestamp.is_empty() || !timestamp.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(prefix)
}

/// Map a gateway webhook event type onto payment and order status. Unknown
/// types record the raw type and leave the order status alone.
pub fn map_gateway_event(event_type: &str, current: &Order) -> (PaymentStatus, OrderStatus) {
    match event_type {
        "authorized" => (PaymentStatus::Authorized, OrderStatus::Pending),
        "sentForSettlement" => (PaymentStatus::Settled, OrderStatus::Pending),
        "refused" => (PaymentStatus::Refused, OrderStatus::Cancelled),
        "cancelled" => (PaymentStatus::Cancelled, OrderStatus::Cancelled),
        "expired" => (PaymentStatus::Expired, OrderStatus::Cancelled),
        "error" => (PaymentStatus::Error, OrderStatus::AwaitingPayment),
        other => (
            PaymentStatus::Other(other.to_string()),
            current.status.clone(),
        ),
    }
}

/// Parsed webhook notification from the payment gateway.
#[derive(Debug, Clone)]
pub struct GatewayEvent {
    pub event_id: String,
    pub transaction_reference: String,
    pub event_type: String,
    pub amount_minor: Option<i64>,
}

/// User-facing outcome carried in the payment redirect path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectOutcome {
    Success,
    Failure,
    Cancel,
    Pending,
    Error,
}

impl FromStr for RedirectOutcome {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(RedirectOutcome::Success),
            "failure" => Ok(RedirectOutcome::Failure),
            "cancel" => Ok(RedirectOutcome::Cancel),
            "pending" => Ok(RedirectOutcome::Pending),
            "error" => Ok(RedirectOutcome::Error),
            _ => Err(()),
        }
    }
}

/// Map a redirect outcome onto payment and order status. Unlike the webhook
/// mapping, a failed or cancelled redirect keeps the order awaiting payment:
/// the user may retry from the cart, and the authoritative webhook can still
/// cancel it later.
pub fn map_redirect_outcome(outcome: RedirectOutcome) -> (PaymentStatus, OrderStatus) {
    match outcome {
        RedirectOutcome::Success => (PaymentStatus::Completed, OrderStatus::Confirmed),
        RedirectOutcome::Failure => (PaymentStatus::Refused, OrderStatus::AwaitingPayment),
        RedirectOutcome::Cancel => (PaymentStatus::Cancelled, OrderStatus::AwaitingPayment),
        RedirectOutcome::Pending => (PaymentStatus::Pending, OrderStatus::AwaitingPayment),
        RedirectOutcome::Error => (PaymentStatus::Error, OrderStatus::AwaitingPayment),
    }
}
