use super::*;

use shared::models::{AvailabilityQuery, ReservationFilter, ReservationUpdate};

use crate::db::repository::customer;

// ========================================================================
// 创建 / 分桌
// ========================================================================

#[tokio::test]
async fn test_create_reservation_auto_assigns_smallest_fit() {
    let mut h = Harness::new().await;
    let _two = h.table("T2", 2).await;
    let four = h.table("T4", 4).await;
    let _six = h.table("T6", 6).await;

    let r = h
        .orch
        .create_reservation(booking(TableChoice::default(), dinner_ms(), 3), Some(7))
        .await
        .unwrap();

    assert_eq!(r.table_id, four.id);
    assert_eq!(r.status, ReservationStatus::Pending);
    assert_eq!(r.duration_minutes, 120);
    assert!(r.customer_id.is_some());
    assert!(r.code.starts_with("RSV"));

    assert_eq!(h.drain_events(), vec!["reservation_created"]);
    let audits = h.drain_audits();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, AuditAction::ReservationCreated);
    assert_eq!(audits[0].actor_id, Some(7));
}

#[tokio::test]
async fn test_create_reservation_prefers_requested_table() {
    let h = Harness::new().await;
    let _four = h.table("T4", 4).await;
    let six = h.table("T6", 6).await;

    let r = h
        .orch
        .create_reservation(
            booking(
                TableChoice::Auto {
                    preferred_table_id: Some(six.id),
                },
                dinner_ms(),
                4,
            ),
            None,
        )
        .await
        .unwrap();
    assert_eq!(r.table_id, six.id);
}

#[tokio::test]
async fn test_no_double_booking() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;

    // 19:00-21:00
    h.book(t.id, dinner_ms()).await.unwrap();

    // 19:30 overlaps
    let clash = h.book(t.id, dinner_ms() + 30 * MINUTE).await;
    assert_eq!(code_of(clash), ErrorCode::TableNotAvailable);

    // 21:00 touches the end, half-open interval
    let later = h.book(t.id, dinner_ms() + 120 * MINUTE).await.unwrap();
    assert_eq!(later.table_id, t.id);

    // 17:00-19:00 touches the start
    h.book(t.id, dinner_ms() - 120 * MINUTE).await.unwrap();
}

#[tokio::test]
async fn test_auto_assign_without_free_table() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    h.book(t.id, dinner_ms()).await.unwrap();

    let result = h
        .orch
        .create_reservation(booking(TableChoice::default(), dinner_ms() + 60 * MINUTE, 2), None)
        .await;
    assert_eq!(code_of(result), ErrorCode::NoTablesAvailable);
}

#[tokio::test]
async fn test_cancelled_reservation_frees_the_slot() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let first = h.book(t.id, dinner_ms()).await.unwrap();

    h.orch
        .cancel_reservation(first.id, Some("change of plans".into()), None)
        .await
        .unwrap();
    let second = h.book(t.id, dinner_ms()).await.unwrap();
    assert_eq!(second.table_id, t.id);
}

async fn customer_name_for(h: &Harness, phone: &str) -> Option<String> {
    let mut conn = h.orch.db().pool.acquire().await.unwrap();
    customer::find_by_phone(&mut conn, phone)
        .await
        .unwrap()
        .map(|c| c.name)
}

#[tokio::test]
async fn test_failed_booking_leaves_customers_untouched() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    h.book(t.id, dinner_ms()).await.unwrap();
    assert_eq!(
        customer_name_for(&h, "+34600111222").await.as_deref(),
        Some("Alice Martin")
    );

    // 新顾客：桌位冲突时不建档
    let mut stranger = booking(TableChoice::Explicit { table_id: t.id }, dinner_ms() + 30 * MINUTE, 2);
    stranger.customer_name = "Mallory".to_string();
    stranger.customer_phone = "+34999000111".to_string();
    let result = h.orch.create_reservation(stranger, None).await;
    assert_eq!(code_of(result), ErrorCode::TableNotAvailable);
    assert_eq!(customer_name_for(&h, "+34999000111").await, None);

    // 老顾客：失败的请求不改名
    let mut renamed = booking(TableChoice::Auto { preferred_table_id: None }, dinner_ms(), 2);
    renamed.customer_name = "Renamed".to_string();
    let result = h.orch.create_reservation(renamed, None).await;
    assert_eq!(code_of(result), ErrorCode::NoTablesAvailable);
    assert_eq!(
        customer_name_for(&h, "+34600111222").await.as_deref(),
        Some("Alice Martin")
    );
}

#[tokio::test]
async fn test_explicit_table_rules() {
    let h = Harness::new().await;
    let small = h.table("T2", 2).await;

    let too_big = h
        .orch
        .create_reservation(booking(TableChoice::Explicit { table_id: small.id }, dinner_ms(), 5), None)
        .await;
    assert_eq!(code_of(too_big), ErrorCode::TableNotAvailable);

    let missing = h.book(999_999, dinner_ms()).await;
    assert_eq!(code_of(missing), ErrorCode::TableNotFound);
}

#[tokio::test]
async fn test_booking_window_validation() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;

    let past = h.book(t.id, now_ms() - MINUTE).await;
    assert_eq!(code_of(past), ErrorCode::InvalidReservationDate);

    let too_early = h.book(t.id, now_ms() + 10 * MINUTE).await;
    assert_eq!(code_of(too_early), ErrorCode::ReservationTooEarly);

    let too_far = h.book(t.id, now_ms() + 91 * 24 * 60 * MINUTE).await;
    assert_eq!(code_of(too_far), ErrorCode::ReservationTooFar);

    let empty_party = h
        .orch
        .create_reservation(booking(TableChoice::Explicit { table_id: t.id }, dinner_ms(), 0), None)
        .await;
    assert_eq!(code_of(empty_party), ErrorCode::InvalidPartySize);

    let mut no_name = booking(TableChoice::Explicit { table_id: t.id }, dinner_ms(), 2);
    no_name.customer_name = "   ".to_string();
    let result = h.orch.create_reservation(no_name, None).await;
    assert_eq!(code_of(result), ErrorCode::ValidationFailed);

    // 失败的请求不产生任何副作用
    assert!(h.drain_events().is_empty());
    assert!(h.drain_audits().is_empty());
    let all = h
        .orch
        .list_reservations(&ReservationFilter::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

// ========================================================================
// 状态流转
// ========================================================================

#[tokio::test]
async fn test_illegal_transition_changes_nothing() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();
    h.drain_events();
    h.drain_audits();

    let result = h.orch.complete_reservation(r.id, None).await;
    assert_eq!(code_of(result), ErrorCode::InvalidStatusTransition);

    let result = h.orch.mark_no_show(r.id, None).await;
    assert_eq!(code_of(result), ErrorCode::InvalidStatusTransition);

    let unchanged = h.orch.get_reservation(r.id).await.unwrap();
    assert_eq!(unchanged, r);
    assert!(h.drain_events().is_empty());
    assert!(h.drain_audits().is_empty());
}

#[tokio::test]
async fn test_confirm_twice_reports_already_confirmed() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();

    let confirmed = h.orch.confirm_reservation(r.id, Some(7)).await.unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);
    assert!(confirmed.confirmed_at.is_some());

    let again = h.orch.confirm_reservation(r.id, Some(7)).await;
    assert_eq!(code_of(again), ErrorCode::ReservationAlreadyConfirmed);

    h.orch.cancel_reservation(r.id, None, None).await.unwrap();
    let after_cancel = h.orch.confirm_reservation(r.id, None).await;
    assert_eq!(code_of(after_cancel), ErrorCode::ReservationAlreadyCancelled);
}

#[tokio::test]
async fn test_seat_is_atomic() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();
    h.orch.confirm_reservation(r.id, None).await.unwrap();
    h.clock.set(dinner_ms() - 5 * MINUTE);
    h.drain_events();
    h.drain_audits();

    let seated = h.orch.seat_reservation(r.id, Some(3)).await.unwrap();

    assert_eq!(seated.reservation.status, ReservationStatus::Seated);
    assert!(seated.reservation.seated_at.is_some());
    assert_eq!(seated.order.reservation_id, Some(r.id));
    assert_eq!(seated.order.table_id, t.id);
    assert_eq!(seated.order.status, OrderStatus::Pending);
    assert_eq!(seated.order.party_size, r.party_size);
    assert_eq!(seated.order.order_number, "ORD2024122510001");
    assert_eq!(h.table_status(t.id).await, TableStatus::Occupied);

    let events = h.drain_events();
    assert_eq!(
        events,
        vec!["table_status_changed", "order_created", "reservation_status_changed"]
    );
    let actions: Vec<AuditAction> = h.drain_audits().into_iter().map(|a| a.action).collect();
    assert_eq!(
        actions,
        vec![AuditAction::OrderCreated, AuditAction::ReservationSeated]
    );
}

#[tokio::test]
async fn test_seat_fails_on_occupied_table_without_side_effects() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();
    h.orch.confirm_reservation(r.id, None).await.unwrap();
    h.clock.set(dinner_ms() - 5 * MINUTE);

    // 散客先占了桌
    let walk_in = h.walk_in(t.id, vec![]).await;
    h.drain_events();

    let result = h.orch.seat_reservation(r.id, None).await;
    assert_eq!(code_of(result), ErrorCode::TableOccupied);

    let still = h.orch.get_reservation(r.id).await.unwrap();
    assert_eq!(still.status, ReservationStatus::Confirmed);
    assert!(still.seated_at.is_none());
    let holder = h.orch.find_active_order_for_table(t.id).await.unwrap().unwrap();
    assert_eq!(holder.order.id, walk_in.order.id);
    assert!(h.drain_events().is_empty());
}

#[tokio::test]
async fn test_seat_after_grace_period_expires() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();
    h.orch.confirm_reservation(r.id, None).await.unwrap();

    // 宽限期 15 分钟，边界仍可入座
    h.clock.set(dinner_ms() + 16 * MINUTE);
    let result = h.orch.seat_reservation(r.id, None).await;
    assert_eq!(code_of(result), ErrorCode::ReservationExpired);
    assert_eq!(h.table_status(t.id).await, TableStatus::Available);

    h.clock.set(dinner_ms() + 15 * MINUTE);
    let seated = h.orch.seat_reservation(r.id, None).await.unwrap();
    assert_eq!(seated.reservation.status, ReservationStatus::Seated);
}

#[tokio::test]
async fn test_pending_reservation_cannot_be_seated() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();
    h.clock.set(dinner_ms());

    let result = h.orch.seat_reservation(r.id, None).await;
    assert_eq!(code_of(result), ErrorCode::InvalidStatusTransition);
}

#[tokio::test]
async fn test_complete_requires_no_active_order() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let seated = h.seat_at(t.id).await;

    let blocked = h.orch.complete_reservation(seated.reservation.id, None).await;
    assert_eq!(code_of(blocked), ErrorCode::ReservationHasActiveOrder);
    let blocked = h
        .orch
        .cancel_reservation(seated.reservation.id, None, None)
        .await;
    assert_eq!(code_of(blocked), ErrorCode::ReservationHasActiveOrder);

    h.orch
        .cancel_order(seated.order.id, Some("left early".into()), None)
        .await
        .unwrap();
    // 整单取消后预订仍为 seated
    let still = h.orch.get_reservation(seated.reservation.id).await.unwrap();
    assert_eq!(still.status, ReservationStatus::Seated);

    let done = h
        .orch
        .complete_reservation(seated.reservation.id, None)
        .await
        .unwrap();
    assert_eq!(done.status, ReservationStatus::Completed);
    assert!(done.completed_at.is_some());
    assert_eq!(h.table_status(t.id).await, TableStatus::Available);
}

#[tokio::test]
async fn test_cancel_seated_reservation_releases_table() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let seated = h.seat_at(t.id).await;
    h.orch
        .cancel_order(seated.order.id, Some("left early".into()), None)
        .await
        .unwrap();
    assert_eq!(h.table_status(t.id).await, TableStatus::Available);

    // 服务员手动把桌台标回占用，取消预订时应当释放
    {
        let mut conn = h.orch.db().pool.acquire().await.unwrap();
        dining_table::set_status(&mut conn, t.id, TableStatus::Occupied, now_ms())
            .await
            .unwrap();
    }

    let cancelled = h
        .orch
        .cancel_reservation(seated.reservation.id, Some("guest left".into()), None)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(h.table_status(t.id).await, TableStatus::Available);
}

#[tokio::test]
async fn test_no_show_keeps_table_for_walk_in() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();
    h.orch.confirm_reservation(r.id, None).await.unwrap();

    h.clock.set(dinner_ms() + 30 * MINUTE);
    let walk_in = h.walk_in(t.id, vec![]).await;

    let no_show = h.orch.mark_no_show(r.id, Some(7)).await.unwrap();
    assert_eq!(no_show.status, ReservationStatus::NoShow);
    // 散客订单仍占用桌台
    assert_eq!(h.table_status(t.id).await, TableStatus::Occupied);
    assert!(walk_in.order.status.is_active());
}

#[tokio::test]
async fn test_no_show_releases_idle_table() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();
    h.orch.confirm_reservation(r.id, None).await.unwrap();
    {
        let mut conn = h.orch.db().pool.acquire().await.unwrap();
        dining_table::set_status(&mut conn, t.id, TableStatus::Occupied, now_ms())
            .await
            .unwrap();
    }

    h.clock.set(dinner_ms() + 30 * MINUTE);
    h.orch.mark_no_show(r.id, None).await.unwrap();
    assert_eq!(h.table_status(t.id).await, TableStatus::Available);
}

#[tokio::test]
async fn test_cancel_records_reason() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();
    h.drain_audits();

    let cancelled = h
        .orch
        .cancel_reservation(r.id, Some("guest called".into()), Some(9))
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("guest called"));
    assert!(cancelled.cancelled_at.is_some());

    let audits = h.drain_audits();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, AuditAction::ReservationCancelled);
    assert_eq!(audits[0].old_status.as_deref(), Some("pending"));
    assert_eq!(audits[0].new_status.as_deref(), Some("cancelled"));
    assert_eq!(audits[0].metadata["reason"], "guest called");

    let again = h.orch.cancel_reservation(r.id, None, None).await;
    assert_eq!(code_of(again), ErrorCode::ReservationAlreadyCancelled);
}

// ========================================================================
// 修改预订
// ========================================================================

#[tokio::test]
async fn test_reschedule_keeps_table_and_ignores_own_slot() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let r = h.book(t.id, dinner_ms()).await.unwrap();
    h.drain_events();

    let moved = h
        .orch
        .update_reservation(
            r.id,
            ReservationUpdate {
                start_time: Some(dinner_ms() + 30 * MINUTE),
                ..Default::default()
            },
            Some(7),
        )
        .await
        .unwrap();
    assert_eq!(moved.table_id, t.id);
    assert_eq!(moved.start_time, dinner_ms() + 30 * MINUTE);
    assert_eq!(moved.code, r.code);
    assert_eq!(h.drain_events(), vec!["reservation_rescheduled"]);
}

#[tokio::test]
async fn test_reschedule_moves_to_free_table() {
    let h = Harness::new().await;
    let a = h.table("A", 4).await;
    let b = h.table("B", 4).await;
    let mine = h.book(a.id, dinner_ms()).await.unwrap();
    // B 在 21:00 被占
    h.book(b.id, dinner_ms() + 120 * MINUTE).await.unwrap();
    // A 在 21:00 之后也被占
    h.book(a.id, dinner_ms() + 180 * MINUTE).await.unwrap();

    // 推迟到 20:30：A 冲突，B 也冲突 → 无桌
    let result = h
        .orch
        .update_reservation(
            mine.id,
            ReservationUpdate {
                start_time: Some(dinner_ms() + 90 * MINUTE),
                ..Default::default()
            },
            None,
        )
        .await;
    assert_eq!(code_of(result), ErrorCode::NoTablesAvailable);

    // 人数变大，原桌不够 → 换到更大的桌
    let c = h.table("C", 6).await;
    let bigger = h
        .orch
        .update_reservation(
            mine.id,
            ReservationUpdate {
                party_size: Some(6),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(bigger.table_id, c.id);
    assert_eq!(bigger.party_size, 6);

    let unchanged = h.orch.get_reservation(mine.id).await.unwrap();
    assert_eq!(unchanged.start_time, dinner_ms());
}

#[tokio::test]
async fn test_explicit_table_on_update_is_strict() {
    let h = Harness::new().await;
    let a = h.table("A", 4).await;
    let b = h.table("B", 4).await;
    let mine = h.book(a.id, dinner_ms()).await.unwrap();
    h.book(b.id, dinner_ms()).await.unwrap();

    let result = h
        .orch
        .update_reservation(
            mine.id,
            ReservationUpdate {
                table_id: Some(b.id),
                ..Default::default()
            },
            None,
        )
        .await;
    assert_eq!(code_of(result), ErrorCode::TableNotAvailable);
    assert_eq!(h.orch.get_reservation(mine.id).await.unwrap().table_id, a.id);
}

#[tokio::test]
async fn test_failed_update_keeps_customer_record() {
    let h = Harness::new().await;
    let a = h.table("A", 4).await;
    let b = h.table("B", 4).await;
    let mine = h.book(a.id, dinner_ms()).await.unwrap();
    h.book(b.id, dinner_ms()).await.unwrap();

    let result = h
        .orch
        .update_reservation(
            mine.id,
            ReservationUpdate {
                table_id: Some(b.id),
                customer_name: Some("Bob Stone".into()),
                customer_phone: Some("+34600999888".into()),
                ..Default::default()
            },
            None,
        )
        .await;
    assert_eq!(code_of(result), ErrorCode::TableNotAvailable);
    assert_eq!(customer_name_for(&h, "+34600999888").await, None);

    let kept = h.orch.get_reservation(mine.id).await.unwrap();
    assert_eq!(kept.customer_name, "Alice Martin");
    assert_eq!(kept.customer_id, mine.customer_id);

    // 成功的修改才建档
    let moved = h
        .orch
        .update_reservation(
            mine.id,
            ReservationUpdate {
                customer_name: Some("Bob Stone".into()),
                customer_phone: Some("+34600999888".into()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(
        customer_name_for(&h, "+34600999888").await.as_deref(),
        Some("Bob Stone")
    );
    assert_ne!(moved.customer_id, mine.customer_id);
}

#[tokio::test]
async fn test_seated_reservation_is_not_editable() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let seated = h.seat_at(t.id).await;

    let result = h
        .orch
        .update_reservation(
            seated.reservation.id,
            ReservationUpdate {
                notes: Some("window seat".into()),
                ..Default::default()
            },
            None,
        )
        .await;
    assert_eq!(code_of(result), ErrorCode::InvalidStatusTransition);
}

// ========================================================================
// 查询
// ========================================================================

#[tokio::test]
async fn test_reads_and_availability() {
    let h = Harness::new().await;
    let a = h.table("A", 2).await;
    let b = h.table("B", 4).await;
    let r = h.book(a.id, dinner_ms()).await.unwrap();

    let by_code = h.orch.find_reservation_by_code(&r.code).await.unwrap();
    assert_eq!(by_code.id, r.id);
    let missing = h.orch.find_reservation_by_code("NOPE0000").await;
    assert_eq!(code_of(missing), ErrorCode::ReservationNotFound);

    let free = h
        .orch
        .find_available_tables(&AvailabilityQuery {
            start_time: dinner_ms() + 60 * MINUTE,
            duration_minutes: Some(60),
            party_size: 2,
            floor: None,
            section: None,
            preferred_table_id: None,
        })
        .await
        .unwrap();
    let ids: Vec<i64> = free.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![b.id]);

    let pending = h
        .orch
        .list_reservations(&ReservationFilter {
            status: Some(ReservationStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    let missing = h.orch.get_reservation(42).await;
    assert_eq!(code_of(missing), ErrorCode::ReservationNotFound);
}
