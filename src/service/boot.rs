use crate::adapter::{InMemoryLedgerStore, InMemoryOrderStore, InMemoryTransactionLog, LedgerRegistry};
use crate::port::{LedgerStore, OrderStore, PaymentGateway, TransactionLog};
use std::sync::Arc;

/// Everything the service layer needs, wired together.
pub struct Services {
    pub registry: LedgerRegistry,
    pub log: Arc<dyn TransactionLog + Send + Sync>,
    pub ledgers: Arc<dyn LedgerStore>,
    pub orders: Arc<dyn OrderStore>,
    pub gateway: Arc<dyn PaymentGateway>,
}

/// Setup the loyalty core and return its wired services.
///
/// This creates all the infrastructure:
/// - InMemoryTransactionLog (shared append-only reward log)
/// - InMemoryLedgerStore (per-user ledger rows)
/// - InMemoryOrderStore (orders and line-item snapshots)
/// - LedgerRegistry (spawns per-user ledger actors on demand)
///
/// Architecture:
/// - HTTP/staff terminal → services → LedgerRegistry → LedgerActor (per user)
/// - Each LedgerActor writes through to the ledger store and appends to the
///   shared log
/// - Simple, efficient, ready for database replacement
pub async fn boot(gateway: Arc<dyn PaymentGateway>) -> Services {
    boot_with_namespace(gateway, String::new()).await
}

/// Boot with a namespaced actor registry.
///
/// ## Warning: This is NOT MEANT FOR PRODUCTION USE. Only for testing purposes.
pub async fn boot_with_namespace(gateway: Arc<dyn PaymentGateway>, namespace: String) -> Services {
    let log: Arc<dyn TransactionLog + Send + Sync> = Arc::new(InMemoryTransactionLog::new());
    let ledgers: Arc<dyn LedgerStore> = Arc::new(InMemoryLedgerStore::new());
    let orders: Arc<dyn OrderStore> = Arc::new(InMemoryOrderStore::new());

    let registry = if namespace.is_empty() {
        LedgerRegistry::new(log.clone(), ledgers.clone(), orders.clone())
    } else {
        LedgerRegistry::with_namespace(log.clone(), ledgers.clone(), orders.clone(), namespace)
    };

    tracing::info!("Loyalty core initialized");

    Services {
        registry,
        log,
        ledgers,
        orders,
        gateway,
    }
}
