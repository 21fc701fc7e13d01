use super::*;

use shared::models::{KitchenPriority, OrderItemStatus};

/// Walk-in with two lines, confirmed so the kitchen has a ticket
async fn confirmed_with_ticket(h: &Harness, table_id: i64) -> (OrderDetail, KitchenOrder) {
    let pasta = h.menu("Pasta", 12.0).await;
    let salad = h.menu("Salad", 8.0).await;
    let detail = h.walk_in(table_id, vec![line(pasta.id, 1), line(salad.id, 2)]).await;
    h.orch
        .update_order_status(detail.order.id, OrderStatus::Confirmed, None)
        .await
        .unwrap();
    let detail = h.orch.get_order(detail.order.id).await.unwrap();
    let ticket = detail.kitchen_order.clone().unwrap();
    (detail, ticket)
}

#[tokio::test]
async fn test_kitchen_ready_cascades_to_items_and_order() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let (detail, ticket) = confirmed_with_ticket(&h, t.id).await;
    h.drain_events();
    h.drain_audits();

    let done = h.orch.mark_kitchen_order_ready(ticket.id, Some(11)).await.unwrap();
    assert_eq!(done.status, KitchenOrderStatus::Ready);
    assert_eq!(done.staff_id, Some(11));
    assert!(done.completed_at.is_some());

    let after = h.orch.get_order(detail.order.id).await.unwrap();
    assert_eq!(after.order.status, OrderStatus::Ready);
    assert!(after.items.iter().all(|i| i.status == OrderItemStatus::Ready));

    assert_eq!(
        h.drain_events(),
        vec!["order_status_changed", "kitchen_order_done"]
    );
    let actions: Vec<AuditAction> = h.drain_audits().into_iter().map(|a| a.action).collect();
    assert_eq!(
        actions,
        vec![
            AuditAction::OrderStatusChanged,
            AuditAction::KitchenOrderStatusChanged
        ]
    );
}

#[tokio::test]
async fn test_kitchen_ready_skips_cancelled_items() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let (detail, ticket) = confirmed_with_ticket(&h, t.id).await;
    h.orch
        .cancel_item(detail.order.id, detail.items[0].id, None, None)
        .await
        .unwrap();

    h.orch.mark_kitchen_order_ready(ticket.id, None).await.unwrap();
    let after = h.orch.get_order(detail.order.id).await.unwrap();
    let first = after.item(detail.items[0].id).unwrap();
    let second = after.item(detail.items[1].id).unwrap();
    assert_eq!(first.status, OrderItemStatus::Cancelled);
    assert_eq!(second.status, OrderItemStatus::Ready);
}

#[tokio::test]
async fn test_kitchen_ticket_lifecycle() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let (detail, ticket) = confirmed_with_ticket(&h, t.id).await;

    let acked = h.orch.acknowledge_kitchen_order(ticket.id, Some(11)).await.unwrap();
    assert_eq!(acked.status, KitchenOrderStatus::Acknowledged);

    h.drain_events();
    let cooking = h
        .orch
        .start_preparing(ticket.id, Some(11), Some("grill".into()))
        .await
        .unwrap();
    assert_eq!(cooking.status, KitchenOrderStatus::Preparing);
    assert_eq!(cooking.station.as_deref(), Some("grill"));
    assert!(cooking.started_at.is_some());
    assert_eq!(h.drain_events(), vec!["kitchen_order_status_changed"]);
    // 制作中不影响订单状态
    let order = h.orch.get_order(detail.order.id).await.unwrap().order;
    assert_eq!(order.status, OrderStatus::Confirmed);

    h.orch.mark_kitchen_order_ready(ticket.id, None).await.unwrap();
    let closed = h.orch.mark_kitchen_order_completed(ticket.id, Some(11)).await.unwrap();
    assert_eq!(closed.status, KitchenOrderStatus::Completed);
    // 厨房单完成不联动订单
    let order = h.orch.get_order(detail.order.id).await.unwrap().order;
    assert_eq!(order.status, OrderStatus::Ready);

    let again = h.orch.mark_kitchen_order_ready(ticket.id, None).await;
    assert_eq!(code_of(again), ErrorCode::InvalidStatusTransition);
}

#[tokio::test]
async fn test_illegal_kitchen_transition_changes_nothing() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let (_, ticket) = confirmed_with_ticket(&h, t.id).await;
    h.drain_events();
    h.drain_audits();

    let result = h.orch.mark_kitchen_order_completed(ticket.id, None).await;
    assert_eq!(code_of(result), ErrorCode::InvalidStatusTransition);

    let unchanged = h.orch.get_kitchen_order(ticket.id).await.unwrap();
    assert_eq!(unchanged, ticket);
    assert!(h.drain_events().is_empty());
    assert!(h.drain_audits().is_empty());

    let missing = h.orch.get_kitchen_order(12345).await;
    assert_eq!(code_of(missing), ErrorCode::KitchenOrderNotFound);
}

#[tokio::test]
async fn test_kitchen_queue_orders_by_priority_then_age() {
    let h = Harness::new().await;
    let a = h.table("A", 4).await;
    let b = h.table("B", 4).await;
    let c = h.table("C", 4).await;

    let (_, first) = confirmed_with_ticket(&h, a.id).await;
    h.clock.advance_minutes(1);
    let (_, second) = confirmed_with_ticket(&h, b.id).await;
    h.clock.advance_minutes(1);
    let (_, third) = confirmed_with_ticket(&h, c.id).await;

    let urgent = h
        .orch
        .set_kitchen_priority(third.id, KitchenPriority::Urgent, Some(11))
        .await
        .unwrap();
    assert_eq!(urgent.priority, KitchenPriority::Urgent);

    let queue: Vec<i64> = h.orch.kitchen_queue().await.unwrap().iter().map(|k| k.id).collect();
    assert_eq!(queue, vec![third.id, first.id, second.id]);

    // 出餐后的单据不再进入队列
    h.orch.mark_kitchen_order_ready(first.id, None).await.unwrap();
    h.orch.mark_kitchen_order_completed(first.id, None).await.unwrap();
    let queue: Vec<i64> = h.orch.kitchen_queue().await.unwrap().iter().map(|k| k.id).collect();
    assert_eq!(queue, vec![third.id, second.id]);

    let frozen = h
        .orch
        .set_kitchen_priority(first.id, KitchenPriority::High, None)
        .await;
    assert_eq!(code_of(frozen), ErrorCode::InvalidStatusTransition);
}

#[tokio::test]
async fn test_cancel_kitchen_order_leaves_order_untouched() {
    let mut h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let (detail, ticket) = confirmed_with_ticket(&h, t.id).await;
    h.drain_events();

    let cancelled = h.orch.cancel_kitchen_order(ticket.id, Some(11)).await.unwrap();
    assert_eq!(cancelled.status, KitchenOrderStatus::Cancelled);
    assert_eq!(h.drain_events(), vec!["kitchen_order_status_changed"]);

    let after = h.orch.get_order(detail.order.id).await.unwrap();
    assert_eq!(after.order.status, OrderStatus::Confirmed);
    assert!(h.orch.kitchen_queue().await.unwrap().is_empty());

    let again = h.orch.cancel_kitchen_order(ticket.id, None).await;
    assert_eq!(code_of(again), ErrorCode::InvalidStatusTransition);
}
