//! WorkflowOrchestrator - atomic cross-entity operations
//!
//! # Write Flow
//!
//! ```text
//! operation(args)
//!     ├─ 1. Validate input (pure, nothing held)
//!     ├─ 2. Collaborator reads (menu, customer)
//!     ├─ 3. Acquire write gate
//!     ├─ 4. Begin SQLite transaction
//!     ├─ 5. Load entities, run lifecycle guards
//!     ├─ 6. Apply writes (+ table flips, cascades)
//!     ├─ 7. Commit (drop = rollback on any earlier `?`)
//!     ├─ 8. Release gate
//!     └─ 9. Dispatch outbox: audit entries, then events
//! ```
//!
//! Guards run before the first write; an error anywhere before commit
//! leaves the store untouched.

mod kitchen;
mod orders;
mod reservations;

#[cfg(test)]
mod tests;

pub use reservations::SeatedReservation;

use std::sync::Arc;

use sqlx::SqliteConnection;

use shared::message::{DiningEvent, TableStatusPayload};
use shared::models::{DiningTable, KitchenOrder, Order, OrderDetail, Reservation, TableStatus};

use crate::audit::{AuditEntry, AuditLog, AuditService, AuditWorker};
use crate::core::ReservationPolicy;
use crate::db::DbService;
use crate::db::repository::{dining_table, kitchen_order, order, order_item, reservation};
use crate::message::{EventBus, EventNotifier};
use crate::services::{
    BillingModule, CustomerDirectory, MenuCatalog, SqliteBilling, SqliteCustomerDirectory,
    SqliteMenuCatalog,
};
use crate::utils::error::not_found;
use crate::utils::{AppResult, Clock, ErrorCode, SystemClock};

/// Side effects released after commit
#[derive(Debug, Default)]
pub(crate) struct Outbox {
    events: Vec<DiningEvent>,
    audits: Vec<AuditEntry>,
}

impl Outbox {
    pub(crate) fn event(&mut self, event: DiningEvent) {
        self.events.push(event);
    }

    pub(crate) fn audit(&mut self, entry: AuditEntry) {
        self.audits.push(entry);
    }
}

/// 编排器
///
/// Owns no entity state: everything lives in SQLite, the orchestrator holds
/// the pool, the injected collaborators and the booking policy.
pub struct WorkflowOrchestrator {
    db: DbService,
    clock: Arc<dyn Clock>,
    policy: ReservationPolicy,
    menu: Arc<dyn MenuCatalog>,
    billing: Arc<dyn BillingModule>,
    customers: Arc<dyn CustomerDirectory>,
    audit: Arc<dyn AuditLog>,
    notifier: Arc<dyn EventNotifier>,
}

impl std::fmt::Debug for WorkflowOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowOrchestrator")
            .field("db", &self.db)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl WorkflowOrchestrator {
    pub fn builder(db: DbService) -> OrchestratorBuilder {
        OrchestratorBuilder {
            db,
            clock: None,
            policy: None,
            menu: None,
            billing: None,
            customers: None,
            audit: None,
            notifier: None,
        }
    }

    pub fn policy(&self) -> &ReservationPolicy {
        &self.policy
    }

    pub fn db(&self) -> &DbService {
        &self.db
    }

    fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Audit first (durable trail), then notify subscribers
    async fn dispatch(&self, outbox: Outbox) {
        for entry in outbox.audits {
            self.audit.record(entry).await;
        }
        for event in outbox.events {
            self.notifier.emit(event).await;
        }
    }

    // ========== Reads shared by every operation ==========

    async fn conn(&self) -> AppResult<sqlx::pool::PoolConnection<sqlx::Sqlite>> {
        Ok(self.db.pool.acquire().await?)
    }
}

// ========== Loaders (NotFound mapped to the entity code) ==========

pub(crate) async fn load_reservation(conn: &mut SqliteConnection, id: i64) -> AppResult<Reservation> {
    reservation::find_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::ReservationNotFound, id))
}

pub(crate) async fn load_order(conn: &mut SqliteConnection, id: i64) -> AppResult<Order> {
    order::find_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::OrderNotFound, id))
}

pub(crate) async fn load_table(conn: &mut SqliteConnection, id: i64) -> AppResult<DiningTable> {
    dining_table::find_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::TableNotFound, id))
}

pub(crate) async fn load_kitchen_order(conn: &mut SqliteConnection, id: i64) -> AppResult<KitchenOrder> {
    kitchen_order::find_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::KitchenOrderNotFound, id))
}

pub(crate) async fn load_detail(conn: &mut SqliteConnection, order: Order) -> AppResult<OrderDetail> {
    let items = order_item::find_by_order(conn, order.id).await?;
    let kitchen_order = kitchen_order::find_by_order(conn, order.id).await?;
    Ok(OrderDetail {
        order,
        items,
        kitchen_order,
    })
}

/// Flip a table, emitting `table_status_changed` only on an actual change
pub(crate) async fn set_table_status(
    conn: &mut SqliteConnection,
    table_id: i64,
    status: TableStatus,
    now: i64,
    outbox: &mut Outbox,
) -> AppResult<()> {
    let table = load_table(conn, table_id).await?;
    if table.status == status {
        return Ok(());
    }
    dining_table::set_status(conn, table_id, status, now).await?;
    tracing::debug!(table_id, table = %table.name, %status, "Table status changed");
    outbox.event(DiningEvent::TableStatusChanged(TableStatusPayload {
        table_id,
        table_name: table.name,
        status,
    }));
    Ok(())
}

/// Release a table unless some active order still holds it
pub(crate) async fn release_table_if_idle(
    conn: &mut SqliteConnection,
    table_id: i64,
    now: i64,
    outbox: &mut Outbox,
) -> AppResult<()> {
    if let Some(holder) = order::find_active_for_table(conn, table_id).await? {
        tracing::debug!(
            table_id,
            order_number = %holder.order_number,
            "Table kept occupied by active order"
        );
        return Ok(());
    }
    set_table_status(conn, table_id, TableStatus::Available, now, outbox).await
}

/// 编排器构建器
///
/// Every collaborator defaults to its SQLite implementation over the same
/// database; `build` must run inside a Tokio runtime when no audit log is
/// given, since it spawns the default [`AuditWorker`].
pub struct OrchestratorBuilder {
    db: DbService,
    clock: Option<Arc<dyn Clock>>,
    policy: Option<ReservationPolicy>,
    menu: Option<Arc<dyn MenuCatalog>>,
    billing: Option<Arc<dyn BillingModule>>,
    customers: Option<Arc<dyn CustomerDirectory>>,
    audit: Option<Arc<dyn AuditLog>>,
    notifier: Option<Arc<dyn EventNotifier>>,
}

impl OrchestratorBuilder {
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn policy(mut self, policy: ReservationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn menu(mut self, menu: Arc<dyn MenuCatalog>) -> Self {
        self.menu = Some(menu);
        self
    }

    pub fn billing(mut self, billing: Arc<dyn BillingModule>) -> Self {
        self.billing = Some(billing);
        self
    }

    pub fn customers(mut self, customers: Arc<dyn CustomerDirectory>) -> Self {
        self.customers = Some(customers);
        self
    }

    pub fn audit(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn EventNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> WorkflowOrchestrator {
        let db = self.db;
        let pool = db.pool.clone();
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let audit = self.audit.unwrap_or_else(|| {
            let (service, rx) = AuditService::new(crate::core::config::DEFAULT_AUDIT_BUFFER_SIZE);
            tokio::spawn(AuditWorker::new(db.clone()).run(rx));
            service
        });
        let notifier = self.notifier.unwrap_or_else(|| {
            Arc::new(EventBus::new(
                crate::core::config::DEFAULT_EVENT_CHANNEL_CAPACITY,
                clock.clone(),
            ))
        });

        WorkflowOrchestrator {
            policy: self.policy.unwrap_or_default(),
            menu: self
                .menu
                .unwrap_or_else(|| Arc::new(SqliteMenuCatalog::new(pool.clone()))),
            billing: self
                .billing
                .unwrap_or_else(|| Arc::new(SqliteBilling::new(pool.clone()))),
            customers: self.customers.unwrap_or_else(|| {
                Arc::new(SqliteCustomerDirectory::new(clock.clone()))
            }),
            audit,
            notifier,
            clock,
            db,
        }
    }
}
