//! In-memory reservation store

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use crate::domain::reservation::{NewReservation, Reservation, ReservationRepository};
use crate::domain::{DomainError, DomainResult};

/// Ordered record list plus the id counter. Only ever touched under the
/// store lock.
#[derive(Debug)]
struct Ledger {
    reservations: Vec<Reservation>,
    next_id: i32,
}

impl Ledger {
    fn new() -> Self {
        Self {
            reservations: Vec::new(),
            next_id: 1,
        }
    }

    /// Current counter value, then increment. Fails once the id space is
    /// exhausted; the counter is left untouched in that case.
    fn next_id(&mut self) -> DomainResult<i32> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| DomainError::Storage("reservation id space exhausted".into()))?;
        Ok(id)
    }

    fn append(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter()
    }

    fn filtered<P>(&self, predicate: P) -> Vec<Reservation>
    where
        P: Fn(&Reservation) -> bool,
    {
        self.iter().filter(|r| predicate(r)).cloned().collect()
    }
}

/// Process-lifetime reservation store.
///
/// A single `RwLock` guards both the records and the counter, so every
/// repository call is atomic: creates never share an id and readers never
/// see a half-applied write.
pub struct InMemoryReservationStore {
    ledger: RwLock<Ledger>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self {
            ledger: RwLock::new(Ledger::new()),
        }
    }
}

impl Default for InMemoryReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationStore {
    async fn create(&self, new: NewReservation) -> DomainResult<Reservation> {
        let mut ledger = self.ledger.write().await;
        let reservation = Reservation::new(ledger.next_id()?, new);
        debug!("Saving reservation: {}", reservation.id);
        ledger.append(reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let ledger = self.ledger.read().await;
        let found = ledger.iter().find(|r| r.id == id).cloned();
        Ok(found)
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.ledger.read().await.filtered(|_| true))
    }

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .ledger
            .read()
            .await
            .filtered(|r| r.client_id == client_id))
    }

    async fn find_by_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .ledger
            .read()
            .await
            .filtered(|r| r.vehicle_id == vehicle_id))
    }

    async fn cancel(&self, id: i32) -> DomainResult<bool> {
        let mut ledger = self.ledger.write().await;
        match ledger.reservations.iter_mut().find(|r| r.id == id) {
            Some(reservation) => {
                debug!("Cancelling reservation: {}", id);
                reservation.cancel();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.ledger.read().await.reservations.len())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::ReservationStatus;

    fn draft(client_id: i32, vehicle_id: i32) -> NewReservation {
        NewReservation {
            client_id,
            vehicle_id,
            date_start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            date_end: Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let store = InMemoryReservationStore::new();
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(store.create(draft(1, 1)).await.unwrap().id);
        }
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let store = InMemoryReservationStore::new();
        store.create(draft(3, 30)).await.unwrap();
        store.create(draft(1, 10)).await.unwrap();
        store.create(draft(2, 20)).await.unwrap();

        let clients: Vec<i32> = store
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.client_id)
            .collect();
        assert_eq!(clients, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn iteration_reflects_later_writes() {
        let store = InMemoryReservationStore::new();
        store.create(draft(1, 10)).await.unwrap();
        let before = store.find_all().await.unwrap();

        store.cancel(1).await.unwrap();
        store.create(draft(1, 11)).await.unwrap();
        let after = store.find_all().await.unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].status, ReservationStatus::Active);
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancel_unknown_id_changes_nothing() {
        let store = InMemoryReservationStore::new();
        store.create(draft(1, 10)).await.unwrap();

        assert!(!store.cancel(99).await.unwrap());
        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, ReservationStatus::Active);
    }

    #[tokio::test]
    async fn cancel_is_repeatable() {
        let store = InMemoryReservationStore::new();
        store.create(draft(1, 10)).await.unwrap();

        assert!(store.cancel(1).await.unwrap());
        assert!(store.cancel(1).await.unwrap());
        let r = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(r.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn filters_by_client_and_vehicle() {
        let store = InMemoryReservationStore::new();
        store.create(draft(1, 10)).await.unwrap();
        store.create(draft(2, 10)).await.unwrap();
        store.create(draft(1, 20)).await.unwrap();

        let by_client: Vec<i32> = store
            .find_by_client(1)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(by_client, vec![1, 3]);

        let by_vehicle: Vec<i32> = store
            .find_by_vehicle(10)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(by_vehicle, vec![1, 2]);

        assert!(store.find_by_client(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_id_hits_and_misses() {
        let store = InMemoryReservationStore::new();
        store.create(draft(1, 10)).await.unwrap();
        store.create(draft(2, 20)).await.unwrap();

        let found = store.find_by_id(2).await.unwrap().unwrap();
        assert_eq!(found.client_id, 2);
        assert!(store.find_by_id(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn exhausted_id_space_is_a_storage_error() {
        let store = InMemoryReservationStore {
            ledger: RwLock::new(Ledger {
                reservations: Vec::new(),
                next_id: i32::MAX - 1,
            }),
        };

        let last = store.create(draft(1, 10)).await.unwrap();
        assert_eq!(last.id, i32::MAX - 1);

        let err = store.create(draft(1, 11)).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_never_share_an_id() {
        let store = Arc::new(InMemoryReservationStore::new());
        let mut tasks = Vec::new();
        for i in 0..64 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.create(draft(i, i)).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=64).collect::<Vec<i32>>());

        // Stored order must match id order.
        let stored: Vec<i32> = store.find_all().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(stored, (1..=64).collect::<Vec<i32>>());
    }
}
