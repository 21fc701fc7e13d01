use super::*;

use chrono::TimeZone;
use tokio::sync::{broadcast, mpsc};

use shared::message::DiningMessage;
use shared::models::{
    DiningTableCreate, KitchenOrderStatus, MenuItem, OrderCreate, OrderItemInput, OrderStatus,
    ReservationCreate, ReservationStatus, TableChoice,
};

use crate::audit::AuditAction;
use crate::db::repository::{bill, menu_item};
use crate::utils::{AppError, FixedClock};

mod test_concurrency;
mod test_kitchen;
mod test_reservations;

// ========================================================================
// 时间基准
// ========================================================================

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    chrono::Utc
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .timestamp_millis()
}

/// 2024-12-24 19:00 UTC
fn now_ms() -> i64 {
    utc(2024, 12, 24, 19, 0)
}

/// 2024-12-25 19:00 UTC
fn dinner_ms() -> i64 {
    utc(2024, 12, 25, 19, 0)
}

const MINUTE: i64 = 60_000;

// ========================================================================
// Harness
// ========================================================================

struct Harness {
    orch: Arc<WorkflowOrchestrator>,
    clock: Arc<FixedClock>,
    events: broadcast::Receiver<DiningMessage>,
    audits: mpsc::Receiver<AuditEntry>,
    _dir: tempfile::TempDir,
}

impl Harness {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dine.db");
        let db = DbService::new(path.to_str().unwrap()).await.unwrap();

        let clock = Arc::new(FixedClock::new(now_ms()));
        let bus = EventBus::new(512, clock.clone());
        let events = bus.subscribe();
        let (audit, audits) = AuditService::new(1024);

        let orch = WorkflowOrchestrator::builder(db)
            .clock(clock.clone())
            .audit(audit)
            .notifier(Arc::new(bus))
            .build();

        Self {
            orch: Arc::new(orch),
            clock,
            events,
            audits,
            _dir: dir,
        }
    }

    async fn table(&self, name: &str, capacity: i32) -> DiningTable {
        let mut conn = self.orch.db().pool.acquire().await.unwrap();
        dining_table::create(
            &mut conn,
            DiningTableCreate {
                name: name.to_string(),
                capacity,
                min_capacity: None,
                floor: None,
                section: None,
            },
        )
        .await
        .unwrap()
    }

    async fn menu(&self, name: &str, price: f64) -> MenuItem {
        let mut conn = self.orch.db().pool.acquire().await.unwrap();
        menu_item::create(&mut conn, name, price).await.unwrap()
    }

    async fn bill(&self, order_id: i64, amount: f64) {
        let mut conn = self.orch.db().pool.acquire().await.unwrap();
        bill::create(&mut conn, order_id, amount, self.clock.now_millis())
            .await
            .unwrap();
    }

    async fn table_status(&self, table_id: i64) -> TableStatus {
        let mut conn = self.orch.db().pool.acquire().await.unwrap();
        load_table(&mut conn, table_id).await.unwrap().status
    }

    async fn book(&self, table_id: i64, start_time: i64) -> AppResult<Reservation> {
        self.orch
            .create_reservation(booking(TableChoice::Explicit { table_id }, start_time, 2), Some(7))
            .await
    }

    /// Book for dinner, confirm, move the clock to five minutes before and seat
    async fn seat_at(&self, table_id: i64) -> SeatedReservation {
        let r = self.book(table_id, dinner_ms()).await.unwrap();
        self.orch.confirm_reservation(r.id, Some(7)).await.unwrap();
        self.clock.set(dinner_ms() - 5 * MINUTE);
        self.orch.seat_reservation(r.id, Some(7)).await.unwrap()
    }

    /// Walk-in order with the given lines
    async fn walk_in(&self, table_id: i64, items: Vec<OrderItemInput>) -> OrderDetail {
        self.orch
            .create_order(
                OrderCreate {
                    table_id,
                    customer_name: Some("Walk-in".to_string()),
                    customer_phone: None,
                    party_size: 2,
                    notes: None,
                    items,
                },
                Some(3),
            )
            .await
            .unwrap()
    }

    fn drain_events(&mut self) -> Vec<&'static str> {
        let mut names = Vec::new();
        while let Ok(message) = self.events.try_recv() {
            names.push(message.name());
        }
        names
    }

    fn drain_audits(&mut self) -> Vec<AuditEntry> {
        let mut entries = Vec::new();
        while let Ok(entry) = self.audits.try_recv() {
            entries.push(entry);
        }
        entries
    }
}

fn booking(table: TableChoice, start_time: i64, party_size: i32) -> ReservationCreate {
    ReservationCreate {
        customer_name: "Alice Martin".to_string(),
        customer_phone: "+34600111222".to_string(),
        customer_email: Some("alice@example.com".to_string()),
        party_size,
        start_time,
        duration_minutes: None,
        table,
        floor: None,
        section: None,
        special_request: None,
        notes: None,
    }
}

fn line(menu_item_id: i64, quantity: i32) -> OrderItemInput {
    OrderItemInput {
        menu_item_id,
        quantity,
        special_request: None,
    }
}

fn code_of<T: std::fmt::Debug>(result: AppResult<T>) -> ErrorCode {
    let err: AppError = result.expect_err("operation should fail");
    err.code
}
