//! Order workflows
//!
//! Walk-in creation, item changes (with reopen), cancellation and the
//! status machine, each in one write unit.

use std::collections::HashMap;

use serde_json::json;
use sqlx::SqliteConnection;

use shared::message::{
    DiningEvent, KitchenOrderPayload, OrderCancelledPayload, OrderItemPayload,
    OrderItemsAddedPayload, OrderPayload, OrderTransitionPayload,
};
use shared::models::{
    KitchenOrder, KitchenPriority, MenuItem, Order, OrderCreate, OrderDetail, OrderItem,
    OrderItemInput, OrderItemStatus, OrderStatus, TableStatus,
};
use shared::util::{DAY_MS, snowflake_id};

use super::{
    Outbox, WorkflowOrchestrator, load_detail, load_order, load_table, release_table_if_idle,
    set_table_status,
};
use crate::audit::{AuditAction, AuditEntityType, AuditEntry};
use crate::db::repository::{kitchen_order, order, order_item};
use crate::lifecycle::order::{self as lifecycle, Mutation, MutationMode};
use crate::money;
use crate::utils::error::not_found;
use crate::utils::time::{date_key, day_start_millis};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PHONE_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Order number prefix
const ORDER_NUMBER_PREFIX: &str = "ORD";

/// First daily sequence is `ORDER_SEQUENCE_BASE + 1`
const ORDER_SEQUENCE_BASE: i64 = 10_000;

fn order_payload(o: &Order) -> OrderPayload {
    OrderPayload {
        order_id: o.id,
        order_number: o.order_number.clone(),
        table_id: o.table_id,
        reservation_id: o.reservation_id,
        status: o.status,
        total_amount: o.total_amount,
    }
}

pub(crate) fn order_transition(o: &Order, from: OrderStatus) -> DiningEvent {
    DiningEvent::OrderStatusChanged(OrderTransitionPayload {
        order_id: o.id,
        order_number: o.order_number.clone(),
        table_id: o.table_id,
        from,
        to: o.status,
    })
}

pub(crate) fn kitchen_payload(ticket: &KitchenOrder, o: &Order) -> KitchenOrderPayload {
    KitchenOrderPayload {
        kitchen_order_id: ticket.id,
        order_id: o.id,
        order_number: o.order_number.clone(),
        table_id: o.table_id,
        status: ticket.status,
        priority: ticket.priority,
        staff_id: ticket.staff_id,
    }
}

/// A validated line, ready to insert
#[derive(Debug, Clone)]
struct PricedLine {
    input: OrderItemInput,
    menu_item: MenuItem,
}

impl PricedLine {
    fn into_item(self, order_id: i64, now: i64) -> OrderItem {
        OrderItem {
            id: snowflake_id(),
            order_id,
            menu_item_id: self.menu_item.id,
            item_name: self.menu_item.name,
            quantity: self.input.quantity,
            unit_price: self.menu_item.price,
            total_price: money::line_total(self.menu_item.price, self.input.quantity),
            status: OrderItemStatus::Pending,
            special_request: self.input.special_request,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Recompute and persist totals, returns the new total
async fn refresh_totals(conn: &mut SqliteConnection, order_id: i64, now: i64) -> AppResult<f64> {
    let items = order_item::find_by_order(conn, order_id).await?;
    let total = money::order_total(&items);
    order::set_totals(conn, order_id, total, total, now).await?;
    Ok(total)
}

/// Create the kitchen ticket when the order has none
async fn ensure_kitchen_order(
    conn: &mut SqliteConnection,
    o: &Order,
    now: i64,
    outbox: &mut Outbox,
) -> AppResult<KitchenOrder> {
    if let Some(existing) = kitchen_order::find_by_order(conn, o.id).await? {
        return Ok(existing);
    }
    let ticket = kitchen_order::create(conn, o.id, KitchenPriority::Normal, now).await?;
    tracing::debug!(order_number = %o.order_number, kitchen_order_id = ticket.id, "Kitchen order created");
    outbox.event(DiningEvent::KitchenOrderCreated(kitchen_payload(&ticket, o)));
    Ok(ticket)
}

/// Give new items a live ticket: a finished ticket is recreated as `pending`,
/// a missing one is created, a live one is kept
async fn reissue_kitchen_order(
    conn: &mut SqliteConnection,
    o: &Order,
    now: i64,
    outbox: &mut Outbox,
) -> AppResult<KitchenOrder> {
    match kitchen_order::find_by_order(conn, o.id).await? {
        Some(ticket) if ticket.status.is_terminal() => {
            kitchen_order::delete_by_order(conn, o.id).await?;
            let fresh = kitchen_order::create(conn, o.id, ticket.priority, now).await?;
            tracing::debug!(
                order_number = %o.order_number,
                kitchen_order_id = fresh.id,
                "Kitchen order reissued"
            );
            outbox.event(DiningEvent::KitchenOrderCreated(kitchen_payload(&fresh, o)));
            Ok(fresh)
        }
        Some(ticket) => Ok(ticket),
        None => ensure_kitchen_order(conn, o, now, outbox).await,
    }
}

impl WorkflowOrchestrator {
    /// `ORD` + `YYYYMMDD` + daily sequence from 10001
    pub(crate) async fn next_order_number(
        &self,
        conn: &mut SqliteConnection,
        now: i64,
    ) -> AppResult<String> {
        let day_start = day_start_millis(now);
        let today = order::count_created_between(conn, day_start, day_start + DAY_MS).await?;
        Ok(format!(
            "{ORDER_NUMBER_PREFIX}{}{}",
            date_key(now),
            ORDER_SEQUENCE_BASE + today + 1
        ))
    }

    /// Validate quantities and look every line up in the catalog
    async fn price_lines(&self, inputs: Vec<OrderItemInput>) -> AppResult<Vec<PricedLine>> {
        for input in &inputs {
            lifecycle::check_quantity(input.quantity)?;
            validate_optional_text(&input.special_request, "special_request", MAX_NOTE_LEN)?;
        }
        let ids: Vec<i64> = inputs.iter().map(|i| i.menu_item_id).collect();
        let catalog: HashMap<i64, MenuItem> = self.menu.lookup_items(&ids).await?;

        inputs
            .into_iter()
            .map(|input| {
                let menu_item = catalog
                    .get(&input.menu_item_id)
                    .cloned()
                    .ok_or_else(|| not_found(ErrorCode::MenuItemNotFound, input.menu_item_id))?;
                if !menu_item.is_active {
                    return Err(AppError::new(ErrorCode::MenuItemNotActive)
                        .with_detail("menu_item_id", menu_item.id)
                        .with_detail("name", menu_item.name.clone()));
                }
                if !menu_item.is_available {
                    return Err(AppError::new(ErrorCode::MenuItemNotAvailable)
                        .with_detail("menu_item_id", menu_item.id)
                        .with_detail("name", menu_item.name.clone()));
                }
                Ok(PricedLine { input, menu_item })
            })
            .collect()
    }

    /// 散客开单：桌台占用 + 订单 + 明细
    pub async fn create_order(&self, data: OrderCreate, staff_id: Option<i64>) -> AppResult<OrderDetail> {
        self.check_party_size(data.party_size)?;
        validate_optional_text(&data.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&data.customer_phone, "customer_phone", MAX_PHONE_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        let lines = self.price_lines(data.items).await?;

        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let table = load_table(&mut tx, data.table_id).await?;
        if !table.is_active {
            return Err(AppError::with_message(
                ErrorCode::TableNotAvailable,
                format!("Table {} is not in service", table.name),
            )
            .with_detail("table_id", table.id));
        }
        if let Some(holder) = order::find_active_for_table(&mut tx, table.id).await? {
            return Err(AppError::new(ErrorCode::TableOccupied)
                .with_detail("table_id", table.id)
                .with_detail("order_number", holder.order_number));
        }

        let mut created = Order {
            id: snowflake_id(),
            order_number: self.next_order_number(&mut tx, now).await?,
            table_id: table.id,
            reservation_id: None,
            staff_id,
            customer_name: data.customer_name,
            customer_phone: data.customer_phone,
            party_size: data.party_size,
            notes: data.notes,
            status: OrderStatus::Pending,
            total_amount: 0.0,
            final_amount: 0.0,
            confirmed_at: None,
            completed_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        };
        order::insert(&mut tx, &created).await?;
        let items: Vec<OrderItem> = lines.into_iter().map(|l| l.into_item(created.id, now)).collect();
        for item in &items {
            order_item::insert(&mut tx, item).await?;
        }
        let total = money::order_total(&items);
        order::set_totals(&mut tx, created.id, total, total, now).await?;
        created.total_amount = total;
        created.final_amount = total;

        let mut outbox = Outbox::default();
        set_table_status(&mut tx, table.id, TableStatus::Occupied, now, &mut outbox).await?;
        let detail = load_detail(&mut tx, created).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            order_id = detail.order.id,
            order_number = %detail.order.order_number,
            table = %table.name,
            items = detail.items.len(),
            total,
            "Order created"
        );

        outbox.audit(
            AuditEntry::new(AuditEntityType::Order, detail.order.id, AuditAction::OrderCreated, now)
                .actor(staff_id)
                .metadata(json!({
                    "order_number": detail.order.order_number,
                    "table_id": detail.order.table_id,
                    "items": detail.items.len(),
                    "total_amount": total,
                })),
        );
        outbox.event(DiningEvent::OrderCreated(order_payload(&detail.order)));
        self.dispatch(outbox).await;
        Ok(detail)
    }

    /// 加菜；已完成且未结账的订单会被重新打开
    pub async fn add_items(
        &self,
        order_id: i64,
        items: Vec<OrderItemInput>,
        staff_id: Option<i64>,
    ) -> AppResult<OrderDetail> {
        if items.is_empty() {
            return Err(AppError::validation("items must not be empty").with_detail("field", "items"));
        }
        let lines = self.price_lines(items).await?;

        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_order(&mut tx, order_id).await?;
        let billed = self.billing.bill_exists_for(order_id).await?;
        let mode = lifecycle::check_mutation(&current, billed, Mutation::AddItems)?;

        let mut outbox = Outbox::default();
        match mode {
            MutationMode::Reopen => self.reopen_order(&mut tx, &current, now, &mut outbox).await?,
            // 已下厨的订单加菜需要一张未结束的厨房单
            MutationMode::InPlace if current.status != OrderStatus::Pending => {
                reissue_kitchen_order(&mut tx, &current, now, &mut outbox).await?;
            }
            MutationMode::InPlace => {}
        }

        let new_items: Vec<OrderItem> = lines.into_iter().map(|l| l.into_item(order_id, now)).collect();
        for item in &new_items {
            order_item::insert(&mut tx, item).await?;
        }
        let total = refresh_totals(&mut tx, order_id, now).await?;
        let updated = load_order(&mut tx, order_id).await?;
        let detail = load_detail(&mut tx, updated).await?;
        tx.commit().await?;
        drop(gate);

        let reopened = mode == MutationMode::Reopen;
        tracing::info!(
            order_number = %detail.order.order_number,
            added = new_items.len(),
            reopened,
            total,
            "Items added to order"
        );

        let item_ids: Vec<i64> = new_items.iter().map(|i| i.id).collect();
        outbox.audit(
            AuditEntry::new(
                AuditEntityType::Order,
                order_id,
                if reopened {
                    AuditAction::OrderReopened
                } else {
                    AuditAction::OrderItemsAdded
                },
                now,
            )
            .actor(staff_id)
            .transition(current.status, detail.order.status)
            .metadata(json!({
                "order_number": detail.order.order_number,
                "item_ids": item_ids,
                "total_amount": total,
            })),
        );
        outbox.event(DiningEvent::OrderItemsAdded(OrderItemsAddedPayload {
            order_id,
            order_number: detail.order.order_number.clone(),
            table_id: detail.order.table_id,
            item_ids,
            reopened,
            total_amount: total,
        }));
        self.dispatch(outbox).await;
        Ok(detail)
    }

    /// completed → confirmed: clear `completed_at`, fresh kitchen ticket, table re-occupied
    async fn reopen_order(
        &self,
        conn: &mut SqliteConnection,
        current: &Order,
        now: i64,
        outbox: &mut Outbox,
    ) -> AppResult<()> {
        if let Some(holder) = order::find_active_for_table(conn, current.table_id).await?
            && holder.id != current.id
        {
            return Err(AppError::with_message(
                ErrorCode::TableOccupied,
                format!(
                    "Cannot reopen {}: table is held by {}",
                    current.order_number, holder.order_number
                ),
            )
            .with_detail("table_id", current.table_id));
        }

        let mut reopened = current.clone();
        reopened.status = OrderStatus::Confirmed;
        reopened.completed_at = None;
        reopened.confirmed_at = current.confirmed_at.or(Some(now));
        reopened.updated_at = now;
        order::update_state(conn, &reopened).await?;

        reissue_kitchen_order(conn, &reopened, now, outbox).await?;

        set_table_status(conn, current.table_id, TableStatus::Occupied, now, outbox).await?;
        outbox.event(order_transition(&reopened, current.status));
        tracing::info!(order_number = %current.order_number, "Completed order reopened");
        Ok(())
    }

    /// 退菜（仅 pending 明细）
    pub async fn cancel_item(
        &self,
        order_id: i64,
        item_id: i64,
        reason: Option<String>,
        staff_id: Option<i64>,
    ) -> AppResult<OrderDetail> {
        validate_optional_text(&reason, "cancellation_reason", MAX_NOTE_LEN)?;
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_order(&mut tx, order_id).await?;
        let billed = self.billing.bill_exists_for(order_id).await?;
        lifecycle::check_mutation(&current, billed, Mutation::CancelItem)?;

        let items = order_item::find_by_order(&mut tx, order_id).await?;
        let item = items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| not_found(ErrorCode::OrderItemNotFound, item_id))?;
        lifecycle::check_item_transition(item, OrderItemStatus::Cancelled)?;

        order_item::set_status(&mut tx, item_id, OrderItemStatus::Cancelled, reason.as_deref(), now)
            .await?;
        let total = refresh_totals(&mut tx, order_id, now).await?;
        let updated = load_order(&mut tx, order_id).await?;
        let detail = load_detail(&mut tx, updated).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            order_number = %detail.order.order_number,
            item_id,
            item = %item.item_name,
            total,
            "Order item cancelled"
        );

        let mut outbox = Outbox::default();
        outbox.audit(
            AuditEntry::new(AuditEntityType::OrderItem, item_id, AuditAction::OrderItemCancelled, now)
                .actor(staff_id)
                .transition(item.status, OrderItemStatus::Cancelled)
                .metadata(json!({
                    "order_id": order_id,
                    "order_number": detail.order.order_number,
                    "reason": reason,
                    "total_amount": total,
                })),
        );
        outbox.event(DiningEvent::OrderItemCancelled(OrderItemPayload {
            order_id,
            order_number: detail.order.order_number.clone(),
            table_id: detail.order.table_id,
            item_id,
            item_name: item.item_name.clone(),
            status: OrderItemStatus::Cancelled,
            total_amount: total,
        }));
        self.dispatch(outbox).await;
        Ok(detail)
    }

    /// 整单取消：明细全部取消、删除厨房单、释放桌台
    ///
    /// An owning seated reservation stays seated.
    pub async fn cancel_order(
        &self,
        order_id: i64,
        reason: Option<String>,
        staff_id: Option<i64>,
    ) -> AppResult<Order> {
        validate_optional_text(&reason, "cancellation_reason", MAX_NOTE_LEN)?;
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_order(&mut tx, order_id).await?;
        let billed = self.billing.bill_exists_for(order_id).await?;
        lifecycle::check_mutation(&current, billed, Mutation::CancelOrder)?;

        for from in [
            OrderItemStatus::Pending,
            OrderItemStatus::Ready,
            OrderItemStatus::Served,
        ] {
            order_item::transition_all(
                &mut tx,
                order_id,
                from,
                OrderItemStatus::Cancelled,
                reason.as_deref(),
                now,
            )
            .await?;
        }
        let had_ticket = kitchen_order::delete_by_order(&mut tx, order_id).await?;

        let mut cancelled = current.clone();
        cancelled.status = OrderStatus::Cancelled;
        cancelled.cancelled_at = Some(now);
        cancelled.cancellation_reason = reason.clone();
        cancelled.updated_at = now;
        order::update_state(&mut tx, &cancelled).await?;
        refresh_totals(&mut tx, order_id, now).await?;

        let mut outbox = Outbox::default();
        set_table_status(&mut tx, current.table_id, TableStatus::Available, now, &mut outbox).await?;
        let cancelled = load_order(&mut tx, order_id).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            order_number = %cancelled.order_number,
            kitchen_order_deleted = had_ticket,
            reason = reason.as_deref().unwrap_or("-"),
            "Order cancelled"
        );

        outbox.audit(
            AuditEntry::new(AuditEntityType::Order, order_id, AuditAction::OrderCancelled, now)
                .actor(staff_id)
                .transition(current.status, OrderStatus::Cancelled)
                .metadata(json!({
                    "order_number": cancelled.order_number,
                    "table_id": cancelled.table_id,
                    "reason": reason,
                })),
        );
        outbox.event(DiningEvent::OrderCancelled(OrderCancelledPayload {
            order_id,
            order_number: cancelled.order_number.clone(),
            table_id: cancelled.table_id,
            reason,
        }));
        self.dispatch(outbox).await;
        Ok(cancelled)
    }

    /// 订单状态流转；目标为 cancelled 时等同整单取消
    pub async fn update_order_status(
        &self,
        order_id: i64,
        to: OrderStatus,
        staff_id: Option<i64>,
    ) -> AppResult<Order> {
        if to == OrderStatus::Cancelled {
            return self.cancel_order(order_id, None, staff_id).await;
        }

        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_order(&mut tx, order_id).await?;
        lifecycle::check_transition(&current, to)?;

        let mut next = current.clone();
        next.status = to;
        next.updated_at = now;
        let mut outbox = Outbox::default();
        match to {
            OrderStatus::Confirmed => {
                let items = order_item::find_by_order(&mut tx, order_id).await?;
                if !items.iter().any(|i| i.status != OrderItemStatus::Cancelled) {
                    return Err(AppError::new(ErrorCode::OrderEmpty).with_detail("order_id", order_id));
                }
                next.confirmed_at = Some(now);
                order::update_state(&mut tx, &next).await?;
                ensure_kitchen_order(&mut tx, &next, now, &mut outbox).await?;
            }
            OrderStatus::Completed => {
                next.completed_at = Some(now);
                order::update_state(&mut tx, &next).await?;
                release_table_if_idle(&mut tx, next.table_id, now, &mut outbox).await?;
            }
            _ => {
                order::update_state(&mut tx, &next).await?;
            }
        }
        let updated = load_order(&mut tx, order_id).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            order_number = %updated.order_number,
            from = %current.status,
            to = %updated.status,
            "Order status changed"
        );
        self.finish_order_transition(&updated, current.status, staff_id, now, outbox)
            .await;
        Ok(updated)
    }

    /// 上菜：ready → served；全部上齐后订单完成
    pub async fn mark_item_served(
        &self,
        order_id: i64,
        item_id: i64,
        staff_id: Option<i64>,
    ) -> AppResult<OrderDetail> {
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_order(&mut tx, order_id).await?;
        if current.status.is_terminal() {
            return Err(crate::utils::error::invalid_transition(
                "order",
                order_id,
                current.status,
                OrderStatus::Serving,
            ));
        }
        let mut items = order_item::find_by_order(&mut tx, order_id).await?;
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| not_found(ErrorCode::OrderItemNotFound, item_id))?;
        lifecycle::check_item_transition(item, OrderItemStatus::Served)?;
        order_item::set_status(&mut tx, item_id, OrderItemStatus::Served, None, now).await?;
        item.status = OrderItemStatus::Served;
        let item_name = item.item_name.clone();

        let mut outbox = Outbox::default();
        let mut next = current.clone();
        if lifecycle::all_served(&items) && lifecycle::can_transition(next.status, OrderStatus::Completed) {
            next.status = OrderStatus::Completed;
            next.completed_at = Some(now);
        } else if lifecycle::can_transition(next.status, OrderStatus::Serving) {
            next.status = OrderStatus::Serving;
        }
        if next.status != current.status {
            next.updated_at = now;
            order::update_state(&mut tx, &next).await?;
            if next.status == OrderStatus::Completed {
                release_table_if_idle(&mut tx, next.table_id, now, &mut outbox).await?;
            }
        }
        let updated = load_order(&mut tx, order_id).await?;
        let detail = load_detail(&mut tx, updated).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            order_number = %detail.order.order_number,
            item_id,
            order_status = %detail.order.status,
            "Order item served"
        );

        outbox.audit(
            AuditEntry::new(AuditEntityType::OrderItem, item_id, AuditAction::OrderItemServed, now)
                .actor(staff_id)
                .transition(OrderItemStatus::Ready, OrderItemStatus::Served)
                .metadata(json!({ "order_id": order_id, "order_number": detail.order.order_number })),
        );
        outbox.event(DiningEvent::OrderItemServed(OrderItemPayload {
            order_id,
            order_number: detail.order.order_number.clone(),
            table_id: detail.order.table_id,
            item_id,
            item_name,
            status: OrderItemStatus::Served,
            total_amount: detail.order.total_amount,
        }));
        if detail.order.status != current.status {
            self.finish_order_transition(&detail.order, current.status, staff_id, now, outbox)
                .await;
        } else {
            self.dispatch(outbox).await;
        }
        Ok(detail)
    }

    async fn finish_order_transition(
        &self,
        updated: &Order,
        from: OrderStatus,
        staff_id: Option<i64>,
        now: i64,
        mut outbox: Outbox,
    ) {
        outbox.audit(
            AuditEntry::new(AuditEntityType::Order, updated.id, AuditAction::OrderStatusChanged, now)
                .actor(staff_id)
                .transition(from, updated.status)
                .metadata(json!({
                    "order_number": updated.order_number,
                    "table_id": updated.table_id,
                })),
        );
        outbox.event(order_transition(updated, from));
        self.dispatch(outbox).await;
    }

    // ========== Reads ==========

    pub async fn get_order(&self, order_id: i64) -> AppResult<OrderDetail> {
        let mut conn = self.conn().await?;
        let found = load_order(&mut conn, order_id).await?;
        load_detail(&mut conn, found).await
    }

    pub async fn find_order_by_number(&self, order_number: &str) -> AppResult<OrderDetail> {
        let mut conn = self.conn().await?;
        let found = order::find_by_number(&mut conn, order_number.trim())
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::OrderNotFound).with_detail("order_number", order_number.trim())
            })?;
        load_detail(&mut conn, found).await
    }

    /// The table's live order, `None` when the table is free of orders
    pub async fn find_active_order_for_table(&self, table_id: i64) -> AppResult<Option<OrderDetail>> {
        let mut conn = self.conn().await?;
        load_table(&mut conn, table_id).await?;
        match order::find_active_for_table(&mut conn, table_id).await? {
            Some(found) => Ok(Some(load_detail(&mut conn, found).await?)),
            None => Ok(None),
        }
    }
}
