//! Kitchen workflows

use serde_json::json;

use shared::message::{DiningEvent, KitchenTransitionPayload};
use shared::models::{KitchenOrder, KitchenOrderStatus, KitchenPriority, OrderItemStatus, OrderStatus};

use super::orders::{kitchen_payload, order_transition};
use super::{Outbox, WorkflowOrchestrator, load_kitchen_order, load_order};
use crate::audit::{AuditAction, AuditEntityType, AuditEntry};
use crate::db::repository::{kitchen_order, order, order_item};
use crate::lifecycle::kitchen as lifecycle;
use crate::lifecycle::order as order_lifecycle;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text};
use crate::utils::AppResult;

impl WorkflowOrchestrator {
    /// 出餐：厨房单 ready，pending 明细 → ready，订单 → ready
    pub async fn mark_kitchen_order_ready(
        &self,
        kitchen_order_id: i64,
        staff_id: Option<i64>,
    ) -> AppResult<KitchenOrder> {
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_kitchen_order(&mut tx, kitchen_order_id).await?;
        lifecycle::check_mark_ready(&current)?;
        let parent = load_order(&mut tx, current.order_id).await?;

        let mut ticket = current.clone();
        ticket.status = KitchenOrderStatus::Ready;
        ticket.completed_at = Some(now);
        ticket.staff_id = staff_id.or(current.staff_id);
        ticket.updated_at = now;
        kitchen_order::update(&mut tx, &ticket).await?;

        let moved = order_item::transition_all(
            &mut tx,
            parent.id,
            OrderItemStatus::Pending,
            OrderItemStatus::Ready,
            None,
            now,
        )
        .await?;

        let mut outbox = Outbox::default();
        if order_lifecycle::can_transition(parent.status, OrderStatus::Ready) {
            order::set_status(&mut tx, parent.id, OrderStatus::Ready, now).await?;
            let mut ready = parent.clone();
            ready.status = OrderStatus::Ready;
            outbox.event(order_transition(&ready, parent.status));
            outbox.audit(
                AuditEntry::new(AuditEntityType::Order, parent.id, AuditAction::OrderStatusChanged, now)
                    .actor(staff_id)
                    .transition(parent.status, OrderStatus::Ready)
                    .metadata(json!({ "order_number": parent.order_number, "kitchen_order_id": ticket.id })),
            );
        } else if parent.status != OrderStatus::Ready {
            tracing::debug!(
                order_number = %parent.order_number,
                order_status = %parent.status,
                "Order left unchanged by kitchen ready"
            );
        }
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            kitchen_order_id,
            order_number = %parent.order_number,
            table_id = parent.table_id,
            items_ready = moved,
            "Kitchen order ready"
        );

        outbox.audit(
            AuditEntry::new(
                AuditEntityType::KitchenOrder,
                ticket.id,
                AuditAction::KitchenOrderStatusChanged,
                now,
            )
            .actor(staff_id)
            .transition(current.status, ticket.status)
            .metadata(json!({
                "order_id": parent.id,
                "order_number": parent.order_number,
                "items_ready": moved,
            })),
        );
        outbox.event(DiningEvent::KitchenOrderDone(kitchen_payload(&ticket, &parent)));
        self.dispatch(outbox).await;
        Ok(ticket)
    }

    /// ready → completed，不影响订单
    pub async fn mark_kitchen_order_completed(
        &self,
        kitchen_order_id: i64,
        staff_id: Option<i64>,
    ) -> AppResult<KitchenOrder> {
        self.transition_kitchen_order(kitchen_order_id, KitchenOrderStatus::Completed, staff_id, None)
            .await
    }

    /// 接单 (pending → acknowledged)
    pub async fn acknowledge_kitchen_order(
        &self,
        kitchen_order_id: i64,
        staff_id: Option<i64>,
    ) -> AppResult<KitchenOrder> {
        self.transition_kitchen_order(kitchen_order_id, KitchenOrderStatus::Acknowledged, staff_id, None)
            .await
    }

    /// 开始制作，记录 `started_at` 与工位
    pub async fn start_preparing(
        &self,
        kitchen_order_id: i64,
        staff_id: Option<i64>,
        station: Option<String>,
    ) -> AppResult<KitchenOrder> {
        validate_optional_text(&station, "station", MAX_NAME_LEN)?;
        self.transition_kitchen_order(kitchen_order_id, KitchenOrderStatus::Preparing, staff_id, station)
            .await
    }

    pub async fn cancel_kitchen_order(
        &self,
        kitchen_order_id: i64,
        staff_id: Option<i64>,
    ) -> AppResult<KitchenOrder> {
        self.transition_kitchen_order(kitchen_order_id, KitchenOrderStatus::Cancelled, staff_id, None)
            .await
    }

    async fn transition_kitchen_order(
        &self,
        kitchen_order_id: i64,
        to: KitchenOrderStatus,
        staff_id: Option<i64>,
        station: Option<String>,
    ) -> AppResult<KitchenOrder> {
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_kitchen_order(&mut tx, kitchen_order_id).await?;
        lifecycle::check_transition(&current, to)?;
        let parent = load_order(&mut tx, current.order_id).await?;

        let mut ticket = current.clone();
        ticket.status = to;
        ticket.staff_id = staff_id.or(current.staff_id);
        ticket.updated_at = now;
        if to == KitchenOrderStatus::Preparing {
            ticket.started_at = Some(now);
            if station.is_some() {
                ticket.station = station;
            }
        }
        kitchen_order::update(&mut tx, &ticket).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            kitchen_order_id,
            order_number = %parent.order_number,
            from = %current.status,
            to = %ticket.status,
            "Kitchen order status changed"
        );

        let mut outbox = Outbox::default();
        outbox.audit(
            AuditEntry::new(
                AuditEntityType::KitchenOrder,
                ticket.id,
                AuditAction::KitchenOrderStatusChanged,
                now,
            )
            .actor(staff_id)
            .transition(current.status, ticket.status)
            .metadata(json!({ "order_id": parent.id, "order_number": parent.order_number })),
        );
        outbox.event(DiningEvent::KitchenOrderStatusChanged(KitchenTransitionPayload {
            kitchen_order_id: ticket.id,
            order_id: parent.id,
            order_number: parent.order_number.clone(),
            table_id: parent.table_id,
            from: current.status,
            to: ticket.status,
        }));
        self.dispatch(outbox).await;
        Ok(ticket)
    }

    /// 调整优先级（仅未结束的厨房单）
    pub async fn set_kitchen_priority(
        &self,
        kitchen_order_id: i64,
        priority: KitchenPriority,
        staff_id: Option<i64>,
    ) -> AppResult<KitchenOrder> {
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_kitchen_order(&mut tx, kitchen_order_id).await?;
        if current.status.is_terminal() {
            return Err(crate::utils::error::invalid_transition(
                "kitchen order",
                current.id,
                current.status,
                current.status,
            )
            .with_detail("priority", priority.as_str()));
        }
        let mut ticket = current.clone();
        ticket.priority = priority;
        ticket.updated_at = now;
        kitchen_order::update(&mut tx, &ticket).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(kitchen_order_id, from = %current.priority, to = %priority, "Kitchen priority changed");

        let mut outbox = Outbox::default();
        outbox.audit(
            AuditEntry::new(
                AuditEntityType::KitchenOrder,
                ticket.id,
                AuditAction::KitchenPriorityChanged,
                now,
            )
            .actor(staff_id)
            .metadata(json!({ "from": current.priority, "to": priority })),
        );
        self.dispatch(outbox).await;
        Ok(ticket)
    }

    // ========== Reads ==========

    pub async fn get_kitchen_order(&self, kitchen_order_id: i64) -> AppResult<KitchenOrder> {
        let mut conn = self.conn().await?;
        load_kitchen_order(&mut conn, kitchen_order_id).await
    }

    /// Open tickets, most urgent first then oldest first
    pub async fn kitchen_queue(&self) -> AppResult<Vec<KitchenOrder>> {
        let mut conn = self.conn().await?;
        let mut queue = kitchen_order::find_open(&mut conn).await?;
        queue.sort_by_key(|t| (std::cmp::Reverse(t.priority.weight()), t.created_at, t.id));
        Ok(queue)
    }
}
