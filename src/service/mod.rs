mod boot;
pub mod checkout;
pub mod reconcile;
pub mod scan;

pub use boot::*;
pub use checkout::{CheckoutOutcome, CheckoutService, CheckoutSettings, RewardOutcome};
pub use reconcile::{ReconcileOutcome, Reconciler};
pub use scan::{LedgerView, StaffTerminal};
