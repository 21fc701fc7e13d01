use super::*;

use crate::db::repository::reservation;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_for_same_slot() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;

    let mut handles = Vec::new();
    for i in 0..4 {
        let orch = h.orch.clone();
        let table_id = t.id;
        handles.push(tokio::spawn(async move {
            let start = dinner_ms() + i * 10 * MINUTE;
            orch.create_reservation(booking(TableChoice::Explicit { table_id }, start, 2), None)
                .await
        }));
    }

    let mut booked = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => booked += 1,
            Err(e) => assert_eq!(e.code, ErrorCode::TableNotAvailable),
        }
    }
    assert_eq!(booked, 1);

    let all = h
        .orch
        .list_reservations(&shared::models::ReservationFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_walk_ins_for_same_table() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;

    let mut handles = Vec::new();
    for _ in 0..3 {
        let orch = h.orch.clone();
        let table_id = t.id;
        handles.push(tokio::spawn(async move {
            orch.create_order(
                OrderCreate {
                    table_id,
                    customer_name: None,
                    customer_phone: None,
                    party_size: 2,
                    notes: None,
                    items: vec![],
                },
                None,
            )
            .await
        }));
    }

    let mut opened = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(detail) => opened.push(detail.order.order_number),
            Err(e) => assert_eq!(e.code, ErrorCode::TableOccupied),
        }
    }
    assert_eq!(opened, vec!["ORD2024122410001".to_string()]);
}

#[tokio::test]
async fn test_store_rejects_overlap_written_around_the_engine() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let existing = h.book(t.id, dinner_ms()).await.unwrap();

    let mut sneaky = existing.clone();
    sneaky.id = existing.id + 1;
    sneaky.code = "RSVSNEAKY1".to_string();
    sneaky.start_time = dinner_ms() + 60 * MINUTE;

    let mut conn = h.orch.db().pool.acquire().await.unwrap();
    let err: AppError = reservation::insert(&mut conn, &sneaky).await.unwrap_err().into();
    assert_eq!(err.code, ErrorCode::TableNotAvailable);
}

#[tokio::test]
async fn test_store_rejects_second_active_order() {
    let h = Harness::new().await;
    let t = h.table("T1", 4).await;
    let first = h.walk_in(t.id, vec![]).await;

    let mut second = first.order.clone();
    second.id = first.order.id + 1;
    second.order_number = "ORD2024122419999".to_string();

    let mut conn = h.orch.db().pool.acquire().await.unwrap();
    let err: AppError = order::insert(&mut conn, &second).await.unwrap_err().into();
    assert_eq!(err.code, ErrorCode::TableOccupied);
}
