//! End-to-end rental lifecycle tests against a real database file.

mod support;

use rust_decimal_macros::dec;

use fleetledger::app::lifecycle::RentalLifecycle;
use fleetledger::domain::client::{Client, ClientStatus};
use fleetledger::domain::id::{ClientId, VehicleId};
use fleetledger::domain::rental::RentalStatus;
use fleetledger::domain::vehicle::Vehicle;
use fleetledger::error::{Error, LifecycleError};
use fleetledger::port::store::{ClientStore, RentalStore, VehicleStore};

use support::{date, fixed_today, TestDb};

async fn seed_vehicle(store: &fleetledger::adapter::sqlite::SqliteFleetStore, plate: &str) -> VehicleId {
    let vehicle =
        Vehicle::try_new(plate, "toyota", "camry", 2020, dec!(50), None, fixed_today()).unwrap();
    VehicleStore::insert(store, &vehicle).await.unwrap().id().unwrap()
}

async fn seed_client(
    store: &fleetledger::adapter::sqlite::SqliteFleetStore,
    email: &str,
) -> ClientId {
    let client = Client::try_new("Ana", "Pop", email, None, None, ClientStatus::Active).unwrap();
    ClientStore::insert(store, &client).await.unwrap().id().unwrap()
}

// ---- full lifecycle ----

#[tokio::test]
async fn rent_return_and_rent_again() {
    let db = TestDb::new();
    let store = db.store();
    let lifecycle = RentalLifecycle::new(store.clone());

    let vid = seed_vehicle(&store, "AB123CD").await;
    let cid = seed_client(&store, "ana@example.com").await;

    // start
    let rental = lifecycle
        .start(vid, cid, Some(date(2024, 6, 10)))
        .await
        .unwrap();
    assert!(rental.is_active());

    // while out, the vehicle cannot be double-booked
    let other = seed_client(&store, "ion@example.com").await;
    let err = lifecycle.start(vid, other, None).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Lifecycle(LifecycleError::VehicleAlreadyRented { .. })
    ));

    // return
    let done = lifecycle
        .complete(rental.id().unwrap(), Some(date(2024, 6, 14)))
        .await
        .unwrap();
    assert_eq!(done.status(), RentalStatus::Completed);
    assert_eq!(done.return_date(), Some(date(2024, 6, 14)));

    // the rental history survives, and the vehicle is free again
    assert!(store.active_for_vehicle(vid).await.unwrap().is_none());
    assert!(lifecycle.start(vid, other, None).await.is_ok());

    let history = store.list_for_client(cid).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status(), RentalStatus::Completed);
}

#[tokio::test]
async fn cancelled_rental_is_terminal_and_frees_the_vehicle() {
    let db = TestDb::new();
    let store = db.store();
    let lifecycle = RentalLifecycle::new(store.clone());

    let vid = seed_vehicle(&store, "AB123CD").await;
    let cid = seed_client(&store, "ana@example.com").await;

    let rental = lifecycle.start(vid, cid, None).await.unwrap();
    let id = rental.id().unwrap();

    let cancelled = lifecycle.cancel(id, None).await.unwrap();
    assert_eq!(cancelled.status(), RentalStatus::Cancelled);

    // no further transitions from a terminal state
    assert!(matches!(
        lifecycle.complete(id, None).await.unwrap_err(),
        Error::Transition(_)
    ));
    assert!(matches!(
        lifecycle.cancel(id, None).await.unwrap_err(),
        Error::Transition(_)
    ));

    assert!(store.active_for_vehicle(vid).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_return_leaves_the_rental_untouched() {
    let db = TestDb::new();
    let store = db.store();
    let lifecycle = RentalLifecycle::new(store.clone());

    let vid = seed_vehicle(&store, "AB123CD").await;
    let cid = seed_client(&store, "ana@example.com").await;

    let rental = lifecycle
        .start(vid, cid, Some(date(2024, 6, 10)))
        .await
        .unwrap();
    let id = rental.id().unwrap();

    let err = lifecycle
        .complete(id, Some(date(2024, 6, 9)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let loaded = RentalStore::find(&store, id).await.unwrap().unwrap();
    assert!(loaded.is_active());
    assert_eq!(loaded.return_date(), None);
}

// ---- concurrency ----

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_starts_for_one_vehicle_admit_exactly_one() {
    let db = TestDb::new();
    let store = db.store();
    let lifecycle = RentalLifecycle::new(store.clone());

    let vid = seed_vehicle(&store, "AB123CD").await;
    let mut clients = Vec::new();
    for i in 0..4 {
        clients.push(seed_client(&store, &format!("c{i}@example.com")).await);
    }

    let mut handles = Vec::new();
    for cid in clients {
        let lifecycle = lifecycle.clone();
        handles.push(tokio::spawn(async move {
            lifecycle.start(vid, cid, None).await
        }));
    }

    let mut won = 0;
    let mut lost = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(rental) => {
                assert!(rental.is_active());
                won += 1;
            }
            Err(Error::Lifecycle(LifecycleError::VehicleAlreadyRented { vehicle_id })) => {
                assert_eq!(vehicle_id, vid);
                lost += 1;
            }
            Err(other) => panic!("unexpected error from racing start: {other:?}"),
        }
    }

    assert_eq!(won, 1, "exactly one racer may win");
    assert_eq!(lost, 3);

    // exactly one active rental row exists afterwards
    let active = store.active_for_vehicle(vid).await.unwrap();
    assert!(active.is_some());
    let all = RentalStore::list(&store).await.unwrap();
    assert_eq!(all.iter().filter(|r| r.is_active()).count(), 1);
}
