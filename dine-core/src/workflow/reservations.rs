//! Reservation workflows
//!
//! create / reschedule / confirm / seat / complete / cancel / no-show, plus
//! the reservation reads and the availability lookup.

use serde::{Deserialize, Serialize};
use serde_json::json;

use shared::message::{DiningEvent, OrderPayload, ReservationPayload, ReservationTransitionPayload};
use shared::models::{
    AvailabilityQuery, DiningTable, Order, OrderStatus, Reservation, ReservationCreate,
    ReservationFilter, ReservationStatus, ReservationUpdate, TableChoice, TableStatus,
};
use shared::util::{interval_end, reservation_code, snowflake_id};

use super::{
    Outbox, WorkflowOrchestrator, load_reservation, release_table_if_idle, set_table_status,
};
use crate::audit::{AuditAction, AuditEntityType, AuditEntry};
use crate::availability::{self, SlotRequest};
use crate::db::repository::{order, reservation};
use crate::lifecycle::reservation as lifecycle;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PHONE_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Result of seating: the reservation and the order it spawned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatedReservation {
    pub reservation: Reservation,
    pub order: Order,
}

fn snapshot(r: &Reservation) -> ReservationPayload {
    ReservationPayload {
        reservation_id: r.id,
        code: r.code.clone(),
        table_id: r.table_id,
        party_size: r.party_size,
        start_time: r.start_time,
        duration_minutes: r.duration_minutes,
        status: r.status,
    }
}

fn transition_event(
    r: &Reservation,
    from: ReservationStatus,
    order: Option<&Order>,
) -> DiningEvent {
    DiningEvent::ReservationStatusChanged(ReservationTransitionPayload {
        reservation_id: r.id,
        code: r.code.clone(),
        table_id: r.table_id,
        from,
        to: r.status,
        order_id: order.map(|o| o.id),
        order_number: order.map(|o| o.order_number.clone()),
    })
}

fn audit_action(to: ReservationStatus) -> AuditAction {
    match to {
        ReservationStatus::Pending => AuditAction::ReservationCreated,
        ReservationStatus::Confirmed => AuditAction::ReservationConfirmed,
        ReservationStatus::Seated => AuditAction::ReservationSeated,
        ReservationStatus::Completed => AuditAction::ReservationCompleted,
        ReservationStatus::Cancelled => AuditAction::ReservationCancelled,
        ReservationStatus::NoShow => AuditAction::ReservationNoShow,
    }
}

fn validate_contact(
    name: &str,
    phone: &str,
    email: &Option<String>,
    special_request: &Option<String>,
    notes: &Option<String>,
) -> AppResult<()> {
    validate_required_text(name, "customer_name", MAX_NAME_LEN)?;
    validate_required_text(phone, "customer_phone", MAX_PHONE_LEN)?;
    validate_email(email)?;
    validate_optional_text(special_request, "special_request", MAX_NOTE_LEN)?;
    validate_optional_text(notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}

/// Refuse the transition while an order spawned by the reservation is live
async fn ensure_no_active_order(
    conn: &mut sqlx::SqliteConnection,
    r: &Reservation,
) -> AppResult<()> {
    if let Some(active) = order::find_active_for_reservation(conn, r.id).await? {
        return Err(AppError::new(ErrorCode::ReservationHasActiveOrder)
            .with_detail("reservation_id", r.id)
            .with_detail("order_number", active.order_number));
    }
    Ok(())
}

impl WorkflowOrchestrator {
    /// Time window, party size and duration checks against the policy
    ///
    /// Order: in the future, past the minimum lead time, inside the horizon,
    /// party size, duration.
    fn check_booking_window(
        &self,
        start_time: i64,
        duration_minutes: i32,
        party_size: i32,
        now: i64,
    ) -> AppResult<()> {
        let policy = &self.policy;
        if start_time <= now {
            return Err(AppError::with_message(
                ErrorCode::InvalidReservationDate,
                "Reservation must start in the future",
            )
            .with_detail("start_time", start_time));
        }
        let lead = start_time - now;
        if lead < policy.min_advance_ms() {
            return Err(AppError::with_message(
                ErrorCode::ReservationTooEarly,
                format!(
                    "Reservations must be made at least {} minutes in advance",
                    policy.min_advance_minutes
                ),
            )
            .with_detail("start_time", start_time));
        }
        if lead > policy.max_advance_ms() {
            return Err(AppError::with_message(
                ErrorCode::ReservationTooFar,
                format!(
                    "Reservations can be made at most {} days in advance",
                    policy.max_advance_days
                ),
            )
            .with_detail("start_time", start_time));
        }
        self.check_party_size(party_size)?;
        if duration_minutes < 1 || duration_minutes > policy.max_duration_minutes {
            return Err(AppError::with_message(
                ErrorCode::InvalidReservationDuration,
                format!(
                    "Duration must be between 1 and {} minutes, got {duration_minutes}",
                    policy.max_duration_minutes
                ),
            )
            .with_detail("duration_minutes", duration_minutes));
        }
        Ok(())
    }

    pub(crate) fn check_party_size(&self, party_size: i32) -> AppResult<()> {
        let policy = &self.policy;
        if party_size < policy.min_party_size || party_size > policy.max_party_size {
            return Err(AppError::with_message(
                ErrorCode::InvalidPartySize,
                format!(
                    "Party size must be between {} and {}, got {party_size}",
                    policy.min_party_size, policy.max_party_size
                ),
            )
            .with_detail("party_size", party_size));
        }
        Ok(())
    }

    /// 创建预订
    pub async fn create_reservation(
        &self,
        data: ReservationCreate,
        created_by: Option<i64>,
    ) -> AppResult<Reservation> {
        let now = self.now();
        let duration = data
            .duration_minutes
            .unwrap_or(self.policy.default_duration_minutes);
        self.check_booking_window(data.start_time, duration, data.party_size, now)?;
        validate_contact(
            &data.customer_name,
            &data.customer_phone,
            &data.customer_email,
            &data.special_request,
            &data.notes,
        )?;

        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;
        let mut request = SlotRequest::new(
            data.start_time,
            interval_end(data.start_time, duration),
            data.party_size,
        );
        request.floor = data.floor;
        request.section = data.section.clone();

        let table = match data.table {
            TableChoice::Explicit { table_id } => {
                availability::validate_explicit_table(&mut tx, table_id, &request).await?
            }
            TableChoice::Auto { preferred_table_id } => {
                request.preferred_table_id = preferred_table_id;
                availability::assign_table(&mut tx, &request).await?
            }
        };

        // 桌位落定后再建档，失败时随事务一起回滚
        let customer_id = self
            .customers
            .find_or_create(
                &mut tx,
                data.customer_name.trim(),
                data.customer_phone.trim(),
                data.customer_email.as_deref(),
            )
            .await?;

        let created = Reservation {
            id: snowflake_id(),
            code: reservation_code(),
            customer_id: Some(customer_id),
            table_id: table.id,
            customer_name: data.customer_name.trim().to_string(),
            customer_phone: data.customer_phone.trim().to_string(),
            customer_email: data.customer_email,
            party_size: data.party_size,
            start_time: data.start_time,
            duration_minutes: duration,
            status: ReservationStatus::Pending,
            special_request: data.special_request,
            notes: data.notes,
            confirmed_at: None,
            seated_at: None,
            completed_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            created_by,
            created_at: now,
            updated_at: now,
        };
        reservation::insert(&mut tx, &created).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            reservation_id = created.id,
            code = %created.code,
            table = %table.name,
            party_size = created.party_size,
            "Reservation created"
        );

        let mut outbox = Outbox::default();
        outbox.audit(
            AuditEntry::new(
                AuditEntityType::Reservation,
                created.id,
                AuditAction::ReservationCreated,
                now,
            )
            .actor(created_by)
            .metadata(json!({
                "code": created.code,
                "table_id": created.table_id,
                "start_time": created.start_time,
                "party_size": created.party_size,
            })),
        );
        outbox.event(DiningEvent::ReservationCreated(snapshot(&created)));
        self.dispatch(outbox).await;
        Ok(created)
    }

    /// 修改预订（改期 / 换桌 / 联系方式）
    ///
    /// The current table is kept while it still fits; otherwise a new one
    /// is auto-assigned unless `table_id` asks for a specific table.
    pub async fn update_reservation(
        &self,
        reservation_id: i64,
        update: ReservationUpdate,
        actor_id: Option<i64>,
    ) -> AppResult<Reservation> {
        let now = self.now();
        let gate = self.db.write_gate().await;

        let current = {
            let mut conn = self.conn().await?;
            load_reservation(&mut conn, reservation_id).await?
        };
        lifecycle::check_editable(&current)?;

        let mut next = current.clone();
        if let Some(start_time) = update.start_time {
            next.start_time = start_time;
        }
        if let Some(duration) = update.duration_minutes {
            next.duration_minutes = duration;
        }
        if let Some(party_size) = update.party_size {
            next.party_size = party_size;
        }
        if let Some(name) = &update.customer_name {
            next.customer_name = name.trim().to_string();
        }
        if let Some(phone) = &update.customer_phone {
            next.customer_phone = phone.trim().to_string();
        }
        if update.customer_email.is_some() {
            next.customer_email = update.customer_email.clone();
        }
        if update.special_request.is_some() {
            next.special_request = update.special_request.clone();
        }
        if update.notes.is_some() {
            next.notes = update.notes.clone();
        }

        if update.start_time.is_some() || update.duration_minutes.is_some() {
            self.check_booking_window(next.start_time, next.duration_minutes, next.party_size, now)?;
        } else {
            self.check_party_size(next.party_size)?;
        }
        validate_contact(
            &next.customer_name,
            &next.customer_phone,
            &next.customer_email,
            &next.special_request,
            &next.notes,
        )?;

        let contact_changed = next.customer_name != current.customer_name
            || next.customer_phone != current.customer_phone
            || next.customer_email != current.customer_email;

        let mut tx = self.db.pool.begin().await?;
        if update.touches_interval() {
            let mut request = SlotRequest::new(next.start_time, next.end_time(), next.party_size);
            request.exclude_reservation = Some(current.id);

            let table: DiningTable = match update.table_id {
                Some(table_id) => {
                    availability::validate_explicit_table(&mut tx, table_id, &request).await?
                }
                None => {
                    match availability::validate_explicit_table(&mut tx, current.table_id, &request)
                        .await
                    {
                        Ok(table) => table,
                        Err(e) if e.code == ErrorCode::TableNotAvailable => {
                            tracing::debug!(
                                reservation_id,
                                table_id = current.table_id,
                                "Current table no longer fits, reassigning"
                            );
                            availability::assign_table(&mut tx, &request).await?
                        }
                        Err(e) => return Err(e),
                    }
                }
            };
            next.table_id = table.id;
        }
        if contact_changed {
            let customer_id = self
                .customers
                .find_or_create(
                    &mut tx,
                    &next.customer_name,
                    &next.customer_phone,
                    next.customer_email.as_deref(),
                )
                .await?;
            next.customer_id = Some(customer_id);
        }
        next.updated_at = now;
        reservation::update_details(&mut tx, &next).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            reservation_id,
            code = %next.code,
            table_id = next.table_id,
            start_time = next.start_time,
            "Reservation updated"
        );

        let mut outbox = Outbox::default();
        outbox.audit(
            AuditEntry::new(
                AuditEntityType::Reservation,
                next.id,
                AuditAction::ReservationRescheduled,
                now,
            )
            .actor(actor_id)
            .metadata(json!({
                "code": next.code,
                "from": { "table_id": current.table_id, "start_time": current.start_time, "duration_minutes": current.duration_minutes, "party_size": current.party_size },
                "to": { "table_id": next.table_id, "start_time": next.start_time, "duration_minutes": next.duration_minutes, "party_size": next.party_size },
            })),
        );
        outbox.event(DiningEvent::ReservationRescheduled(snapshot(&next)));
        self.dispatch(outbox).await;
        Ok(next)
    }

    /// 确认预订 (pending → confirmed)
    pub async fn confirm_reservation(
        &self,
        reservation_id: i64,
        actor_id: Option<i64>,
    ) -> AppResult<Reservation> {
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_reservation(&mut tx, reservation_id).await?;
        lifecycle::check_transition(&current, ReservationStatus::Confirmed)?;
        reservation::set_status(&mut tx, current.id, ReservationStatus::Confirmed, None, now).await?;
        let updated = load_reservation(&mut tx, reservation_id).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(reservation_id, code = %updated.code, "Reservation confirmed");
        self.finish_reservation_transition(&updated, current.status, None, actor_id, now, Outbox::default())
            .await;
        Ok(updated)
    }

    /// 入座：桌台占用 + 预订 seated + 新建订单，一个事务完成
    pub async fn seat_reservation(
        &self,
        reservation_id: i64,
        staff_id: Option<i64>,
    ) -> AppResult<SeatedReservation> {
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_reservation(&mut tx, reservation_id).await?;
        lifecycle::check_seat(&current, now, self.policy.grace_period_ms())?;
        if let Some(holder) = order::find_active_for_table(&mut tx, current.table_id).await? {
            return Err(AppError::new(ErrorCode::TableOccupied)
                .with_detail("table_id", current.table_id)
                .with_detail("order_number", holder.order_number));
        }

        let mut outbox = Outbox::default();
        set_table_status(&mut tx, current.table_id, TableStatus::Occupied, now, &mut outbox).await?;
        reservation::set_status(&mut tx, current.id, ReservationStatus::Seated, None, now).await?;

        let new_order = Order {
            id: snowflake_id(),
            order_number: self.next_order_number(&mut tx, now).await?,
            table_id: current.table_id,
            reservation_id: Some(current.id),
            staff_id,
            customer_name: Some(current.customer_name.clone()),
            customer_phone: Some(current.customer_phone.clone()),
            party_size: current.party_size,
            notes: None,
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
        order::insert(&mut tx, &new_order).await?;

        let seated = load_reservation(&mut tx, reservation_id).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            reservation_id,
            code = %seated.code,
            order_number = %new_order.order_number,
            table_id = seated.table_id,
            "Reservation seated"
        );

        outbox.audit(
            AuditEntry::new(
                AuditEntityType::Order,
                new_order.id,
                AuditAction::OrderCreated,
                now,
            )
            .actor(staff_id)
            .metadata(json!({
                "order_number": new_order.order_number,
                "table_id": new_order.table_id,
                "reservation_id": seated.id,
            })),
        );
        outbox.event(DiningEvent::OrderCreated(OrderPayload {
            order_id: new_order.id,
            order_number: new_order.order_number.clone(),
            table_id: new_order.table_id,
            reservation_id: new_order.reservation_id,
            status: new_order.status,
            total_amount: new_order.total_amount,
        }));
        self.finish_reservation_transition(&seated, current.status, Some(&new_order), staff_id, now, outbox)
            .await;

        Ok(SeatedReservation {
            reservation: seated,
            order: new_order,
        })
    }

    /// 完成预订 (seated → completed)，释放桌台
    pub async fn complete_reservation(
        &self,
        reservation_id: i64,
        actor_id: Option<i64>,
    ) -> AppResult<Reservation> {
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_reservation(&mut tx, reservation_id).await?;
        lifecycle::check_transition(&current, ReservationStatus::Completed)?;
        ensure_no_active_order(&mut tx, &current).await?;

        let mut outbox = Outbox::default();
        reservation::set_status(&mut tx, current.id, ReservationStatus::Completed, None, now).await?;
        release_table_if_idle(&mut tx, current.table_id, now, &mut outbox).await?;
        let updated = load_reservation(&mut tx, reservation_id).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(reservation_id, code = %updated.code, "Reservation completed");
        self.finish_reservation_transition(&updated, current.status, None, actor_id, now, outbox)
            .await;
        Ok(updated)
    }

    /// 取消预订；已入座时释放桌台
    pub async fn cancel_reservation(
        &self,
        reservation_id: i64,
        reason: Option<String>,
        actor_id: Option<i64>,
    ) -> AppResult<Reservation> {
        validate_optional_text(&reason, "cancellation_reason", MAX_NOTE_LEN)?;
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_reservation(&mut tx, reservation_id).await?;
        lifecycle::check_transition(&current, ReservationStatus::Cancelled)?;
        ensure_no_active_order(&mut tx, &current).await?;

        let mut outbox = Outbox::default();
        reservation::set_status(
            &mut tx,
            current.id,
            ReservationStatus::Cancelled,
            reason.as_deref(),
            now,
        )
        .await?;
        if current.status == ReservationStatus::Seated {
            release_table_if_idle(&mut tx, current.table_id, now, &mut outbox).await?;
        }
        let updated = load_reservation(&mut tx, reservation_id).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(
            reservation_id,
            code = %updated.code,
            reason = reason.as_deref().unwrap_or("-"),
            "Reservation cancelled"
        );
        self.finish_reservation_transition(&updated, current.status, None, actor_id, now, outbox)
            .await;
        Ok(updated)
    }

    /// 标记未到店 (confirmed → no_show)
    ///
    /// The table is released only when no active order holds it.
    pub async fn mark_no_show(
        &self,
        reservation_id: i64,
        actor_id: Option<i64>,
    ) -> AppResult<Reservation> {
        let now = self.now();
        let gate = self.db.write_gate().await;
        let mut tx = self.db.pool.begin().await?;

        let current = load_reservation(&mut tx, reservation_id).await?;
        lifecycle::check_transition(&current, ReservationStatus::NoShow)?;

        let mut outbox = Outbox::default();
        reservation::set_status(&mut tx, current.id, ReservationStatus::NoShow, None, now).await?;
        release_table_if_idle(&mut tx, current.table_id, now, &mut outbox).await?;
        let updated = load_reservation(&mut tx, reservation_id).await?;
        tx.commit().await?;
        drop(gate);

        tracing::info!(reservation_id, code = %updated.code, "Reservation marked as no-show");
        self.finish_reservation_transition(&updated, current.status, None, actor_id, now, outbox)
            .await;
        Ok(updated)
    }

    async fn finish_reservation_transition(
        &self,
        updated: &Reservation,
        from: ReservationStatus,
        spawned: Option<&Order>,
        actor_id: Option<i64>,
        now: i64,
        mut outbox: Outbox,
    ) {
        let mut metadata = json!({ "code": updated.code, "table_id": updated.table_id });
        if let Some(order) = spawned {
            metadata["order_id"] = json!(order.id);
            metadata["order_number"] = json!(order.order_number);
        }
        if let Some(reason) = &updated.cancellation_reason {
            metadata["reason"] = json!(reason);
        }
        outbox.audit(
            AuditEntry::new(
                AuditEntityType::Reservation,
                updated.id,
                audit_action(updated.status),
                now,
            )
            .actor(actor_id)
            .transition(from, updated.status)
            .metadata(metadata),
        );
        outbox.event(transition_event(updated, from, spawned));
        self.dispatch(outbox).await;
    }

    // ========== Reads ==========

    pub async fn get_reservation(&self, reservation_id: i64) -> AppResult<Reservation> {
        let mut conn = self.conn().await?;
        load_reservation(&mut conn, reservation_id).await
    }

    pub async fn find_reservation_by_code(&self, code: &str) -> AppResult<Reservation> {
        let mut conn = self.conn().await?;
        reservation::find_by_code(&mut conn, code.trim())
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::ReservationNotFound).with_detail("code", code.trim())
            })
    }

    pub async fn list_reservations(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        let mut conn = self.conn().await?;
        Ok(reservation::list(&mut conn, filter).await?)
    }

    /// Free tables for a prospective booking, best first
    pub async fn find_available_tables(&self, query: &AvailabilityQuery) -> AppResult<Vec<DiningTable>> {
        let duration = query
            .duration_minutes
            .unwrap_or(self.policy.default_duration_minutes);
        self.check_party_size(query.party_size)?;
        let mut request = SlotRequest::new(
            query.start_time,
            interval_end(query.start_time, duration),
            query.party_size,
        );
        request.floor = query.floor;
        request.section = query.section.clone();
        request.preferred_table_id = query.preferred_table_id;

        let mut conn = self.conn().await?;
        availability::find_candidates(&mut conn, &request).await
    }
}
