//! The event book owns the authoritative event collection.
//!
//! Every write replaces the whole collection and then persists it under the
//! configured storage key. Reads always see the latest replaced collection,
//! even when persisting it failed.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use eventgrid_core::calendar::{
    build_month_grid, events_on, filter_events_by_search_term, find_conflicts, find_event,
    find_projected_conflicts, move_event_to_date, occurrences_between, occurs_on, remove_event,
    upsert_event, validate_event, CreateEventRequest, DateRange, DayCell, Event,
    UpdateEventRequest,
};
use eventgrid_core::storage::{load_events, save_events, BlobStore};

use crate::error::{BookError, Result};

pub struct EventBook {
    store: Arc<dyn BlobStore>,
    key: String,
    events: RwLock<Vec<Event>>,
}

impl EventBook {
    /// Loads the collection stored under `key`. A missing or unreadable
    /// collection starts the book empty.
    pub async fn open(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let events = load_events(store.as_ref(), &key).await;
        tracing::debug!(key = %key, count = events.len(), "Opened event book");

        Self {
            store,
            key,
            events: RwLock::new(events),
        }
    }

    /// Snapshot of the whole collection, in insertion order.
    pub async fn events(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Result<Event> {
        let events = self.events.read().await;
        find_event(&events, id)
            .cloned()
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    /// The 42-cell grid for the month containing `reference`.
    pub async fn month(&self, reference: NaiveDate, today: NaiveDate) -> Vec<DayCell> {
        let events = self.events.read().await;
        build_month_grid(reference, today, &events)
    }

    pub async fn search(&self, term: &str) -> Vec<Event> {
        let events = self.events.read().await;
        filter_events_by_search_term(&events, term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Events with an occurrence on `day`.
    pub async fn on_day(&self, day: NaiveDate) -> Vec<Event> {
        let events = self.events.read().await;
        events_on(day, &events).into_iter().cloned().collect()
    }

    pub async fn occurs(&self, id: &str, day: NaiveDate) -> Result<bool> {
        let event = self.get(id).await?;
        Ok(occurs_on(&event, day))
    }

    /// Days within `range` on which the event occurs.
    pub async fn occurrences(&self, id: &str, range: DateRange) -> Result<Vec<NaiveDate>> {
        let event = self.get(id).await?;
        Ok(occurrences_between(&event, range))
    }

    /// Events that would conflict with `candidate`.
    ///
    /// With `projected` set, recurring events take part through their
    /// occurrence on the candidate's day instead of only their anchor.
    pub async fn conflicts_with(&self, candidate: &Event, projected: bool) -> Vec<Event> {
        let events = self.events.read().await;
        let found = if projected {
            find_projected_conflicts(candidate, &events)
        } else {
            find_conflicts(candidate, &events)
        };
        found.into_iter().cloned().collect()
    }

    /// Adds a new event. Fails with [`BookError::Conflicts`] when it overlaps
    /// existing events, unless `force` is set.
    pub async fn create(&self, request: CreateEventRequest, force: bool) -> Result<Event> {
        let event = request.into_event()?;
        let mut events = self.events.write().await;
        self.commit(&mut events, event, force).await
    }

    /// Edits the event with the given id.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateEventRequest,
        force: bool,
    ) -> Result<Event> {
        let mut events = self.events.write().await;
        let current =
            find_event(&events, id).ok_or_else(|| BookError::NotFound(id.to_string()))?;
        let edited = request.apply_to(current)?;
        self.commit(&mut events, edited, force).await
    }

    /// Moves the event to another day, keeping time-of-day and duration.
    pub async fn move_to(&self, id: &str, date: NaiveDate, force: bool) -> Result<Event> {
        let mut events = self.events.write().await;
        let current =
            find_event(&events, id).ok_or_else(|| BookError::NotFound(id.to_string()))?;
        let moved = move_event_to_date(current, date);
        self.commit(&mut events, moved, force).await
    }

    /// Removes the event and returns it.
    pub async fn delete(&self, id: &str) -> Result<Event> {
        let mut events = self.events.write().await;
        let removed = find_event(&events, id)
            .cloned()
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;
        let remaining =
            remove_event(&events, id).ok_or_else(|| BookError::NotFound(id.to_string()))?;

        *events = remaining;
        self.persist(&events).await?;

        tracing::info!(id = %removed.id, title = %removed.title, "Deleted event");
        Ok(removed)
    }

    /// Validates `event`, checks it against the rest of the collection and
    /// stores it. Callers hold the write guard for the whole lookup-to-persist
    /// sequence.
    async fn commit(&self, events: &mut Vec<Event>, event: Event, force: bool) -> Result<Event> {
        validate_event(&event)?;

        let conflicts: Vec<Event> = find_conflicts(&event, events.as_slice())
            .into_iter()
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            if !force {
                return Err(BookError::Conflicts(conflicts));
            }
            tracing::warn!(
                id = %event.id,
                conflicts = conflicts.len(),
                "Saving event despite conflicts"
            );
        }

        *events = upsert_event(events.as_slice(), event.clone());
        self.persist(events.as_slice()).await?;

        tracing::info!(id = %event.id, title = %event.title, start = %event.start, "Saved event");
        Ok(event)
    }

    async fn persist(&self, events: &[Event]) -> Result<()> {
        save_events(self.store.as_ref(), &self.key, events)
            .await
            .map_err(|e| {
                tracing::error!(key = %self.key, error = %e, "Failed to persist events");
                BookError::Storage(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveTime, Weekday};
    use eventgrid_core::calendar::{EventError, RecurrenceKind};
    use eventgrid_core::storage::StorageError;

    use crate::storage::InMemoryStore;

    const KEY: &str = "calendar-events";

    struct ReadOnlyStore;

    #[async_trait]
    impl BlobStore for ReadOnlyStore {
        async fn read(&self, _key: &str) -> eventgrid_core::storage::Result<Option<String>> {
            Ok(None)
        }

        async fn write(&self, _key: &str, _value: &str) -> eventgrid_core::storage::Result<()> {
            Err(StorageError::Io("read-only".to_string()))
        }

        async fn remove(&self, _key: &str) -> eventgrid_core::storage::Result<()> {
            Err(StorageError::Io("read-only".to_string()))
        }
    }

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn meeting(title: &str, date: NaiveDate, from: u32, to: u32) -> CreateEventRequest {
        CreateEventRequest::new(title, date, make_time(from, 0)).with_end_time(make_time(to, 0))
    }

    async fn empty_book() -> (EventBook, InMemoryStore) {
        let store = InMemoryStore::new();
        let book = EventBook::open(Arc::new(store.clone()), KEY).await;
        (book, store)
    }

    #[tokio::test]
    async fn test_create_persists() {
        let (book, store) = empty_book().await;

        let event = book
            .create(meeting("Review", make_date(2024, 3, 4), 14, 15), false)
            .await
            .unwrap();

        assert_eq!(book.events().await, vec![event.clone()]);
        assert_eq!(load_events(&store, KEY).await, vec![event]);
    }

    #[tokio::test]
    async fn test_reopen_restores_collection() {
        let (book, store) = empty_book().await;
        let event = book
            .create(meeting("Review", make_date(2024, 3, 4), 14, 15), false)
            .await
            .unwrap();

        let reopened = EventBook::open(Arc::new(store), KEY).await;
        assert_eq!(reopened.get(&event.id).await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_request() {
        let (book, _) = empty_book().await;

        let result = book
            .create(
                CreateEventRequest::new("", make_date(2024, 3, 4), make_time(9, 0)),
                false,
            )
            .await;

        assert!(matches!(result, Err(BookError::Validation(_))));
        assert!(book.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_reports_conflicts_unless_forced() {
        let (book, _) = empty_book().await;
        let day = make_date(2024, 3, 4);
        let first = book.create(meeting("Review", day, 9, 10), false).await.unwrap();

        let result = book.create(meeting("Sync", day, 10, 11), false).await;
        assert_eq!(result, Err(BookError::Conflicts(vec![first])));
        assert_eq!(book.events().await.len(), 1);

        book.create(meeting("Sync", day, 10, 11), true).await.unwrap();
        assert_eq!(book.events().await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_does_not_conflict_with_itself() {
        let (book, _) = empty_book().await;
        let event = book
            .create(meeting("Review", make_date(2024, 3, 4), 9, 10), false)
            .await
            .unwrap();

        let edited = book
            .update(
                &event.id,
                UpdateEventRequest::new().with_title("Design review"),
                false,
            )
            .await
            .unwrap();

        assert_eq!(edited.id, event.id);
        assert_eq!(book.get(&event.id).await.unwrap().title, "Design review");
        assert_eq!(book.events().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_event() {
        let (book, _) = empty_book().await;
        let result = book.update("nope", UpdateEventRequest::new(), false).await;
        assert_eq!(result, Err(BookError::NotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn test_move_to_keeps_time() {
        let (book, _) = empty_book().await;
        let event = book
            .create(meeting("Review", make_date(2024, 3, 4), 9, 10), false)
            .await
            .unwrap();

        let moved = book
            .move_to(&event.id, make_date(2024, 3, 7), false)
            .await
            .unwrap();

        assert_eq!(moved.start, make_date(2024, 3, 7).and_time(make_time(9, 0)));
        assert_eq!(moved.end, Some(make_date(2024, 3, 7).and_time(make_time(10, 0))));
    }

    #[tokio::test]
    async fn test_move_past_end_date_is_rejected() {
        let (book, store) = empty_book().await;
        let standup = book
            .create(
                meeting("Standup", make_date(2024, 3, 4), 9, 10)
                    .with_recurrence(RecurrenceKind::Weekly, 1)
                    .with_weekdays(vec![1])
                    .with_end_date(make_date(2024, 3, 10)),
                false,
            )
            .await
            .unwrap();

        let moved = book
            .move_to(&standup.id, make_date(2024, 3, 20), false)
            .await;
        assert_eq!(
            moved,
            Err(BookError::Validation(EventError::EndDateBeforeStart))
        );

        let edited = book
            .update(
                &standup.id,
                UpdateEventRequest::new().with_date(make_date(2024, 3, 20)),
                false,
            )
            .await;
        assert_eq!(edited, moved);

        assert_eq!(book.get(&standup.id).await.unwrap(), standup);
        assert_eq!(load_events(&store, KEY).await, vec![standup]);
    }

    #[tokio::test]
    async fn test_move_missing_event() {
        let (book, _) = empty_book().await;
        let result = book.move_to("nope", make_date(2024, 3, 7), false).await;
        assert_eq!(result, Err(BookError::NotFound("nope".to_string())));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_edit_and_delete_never_resurrects() {
        for _ in 0..50 {
            let store = InMemoryStore::new();
            let book = Arc::new(EventBook::open(Arc::new(store.clone()), KEY).await);
            let event = book
                .create(meeting("Review", make_date(2024, 3, 4), 9, 10), false)
                .await
                .unwrap();

            let editor = {
                let book = Arc::clone(&book);
                let id = event.id.clone();
                tokio::spawn(async move {
                    let request = UpdateEventRequest::new().with_title("Design review");
                    book.update(&id, request, false).await
                })
            };
            let mover = {
                let book = Arc::clone(&book);
                let id = event.id.clone();
                tokio::spawn(async move { book.move_to(&id, make_date(2024, 3, 5), false).await })
            };
            let deleter = {
                let book = Arc::clone(&book);
                let id = event.id.clone();
                tokio::spawn(async move { book.delete(&id).await })
            };

            let edited = editor.await.unwrap();
            let moved = mover.await.unwrap();
            deleter.await.unwrap().unwrap();

            for result in [edited, moved] {
                assert!(matches!(result, Ok(_) | Err(BookError::NotFound(_))));
            }
            assert!(book.events().await.is_empty());
            assert!(load_events(&store, KEY).await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_delete() {
        let (book, store) = empty_book().await;
        let event = book
            .create(meeting("Review", make_date(2024, 3, 4), 9, 10), false)
            .await
            .unwrap();

        let removed = book.delete(&event.id).await.unwrap();
        assert_eq!(removed, event);
        assert!(book.events().await.is_empty());
        assert!(load_events(&store, KEY).await.is_empty());

        assert_eq!(
            book.delete(&event.id).await,
            Err(BookError::NotFound(event.id.clone()))
        );
    }

    #[tokio::test]
    async fn test_month_and_occurrence_queries() {
        let (book, _) = empty_book().await;
        let standup = book
            .create(
                meeting("Standup", make_date(2024, 3, 4), 9, 10)
                    .with_recurrence(RecurrenceKind::Weekly, 1)
                    .with_weekdays(vec![1]),
                false,
            )
            .await
            .unwrap();

        let grid = book.month(make_date(2024, 3, 1), make_date(2024, 3, 11)).await;
        let mondays = grid.iter().filter(|c| !c.is_empty()).count();
        assert_eq!(mondays, 5);

        assert!(book.occurs(&standup.id, make_date(2024, 3, 18)).await.unwrap());
        assert!(!book.occurs(&standup.id, make_date(2024, 3, 19)).await.unwrap());
        assert_eq!(book.on_day(make_date(2024, 3, 25)).await.len(), 1);

        let march = DateRange::month(2024, 3).unwrap();
        assert_eq!(
            book.occurrences(&standup.id, march).await.unwrap().len(),
            4
        );
        assert_eq!(standup.recurrence.weekdays(), &[Weekday::Mon]);
    }

    #[tokio::test]
    async fn test_conflicts_with_projected() {
        let (book, _) = empty_book().await;
        book.create(
            meeting("Standup", make_date(2024, 3, 4), 9, 10)
                .with_recurrence(RecurrenceKind::Weekly, 1)
                .with_weekdays(vec![1]),
            false,
        )
        .await
        .unwrap();

        let candidate = meeting("Review", make_date(2024, 3, 11), 9, 10)
            .into_event()
            .unwrap();

        assert!(book.conflicts_with(&candidate, false).await.is_empty());
        assert_eq!(book.conflicts_with(&candidate, true).await.len(), 1);
    }

    #[tokio::test]
    async fn test_search() {
        let (book, _) = empty_book().await;
        let day = make_date(2024, 3, 4);
        book.create(meeting("Team lunch", day, 12, 13), false)
            .await
            .unwrap();
        book.create(meeting("Dentist", day, 15, 16), false)
            .await
            .unwrap();

        assert_eq!(book.search("TEAM").await.len(), 1);
        assert_eq!(book.search("").await.len(), 2);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_new_collection_in_memory() {
        let book = EventBook::open(Arc::new(ReadOnlyStore), KEY).await;

        let result = book
            .create(meeting("Review", make_date(2024, 3, 4), 9, 10), false)
            .await;

        assert_eq!(
            result,
            Err(BookError::Storage(StorageError::Io("read-only".to_string())))
        );
        assert_eq!(book.events().await.len(), 1);
    }
}
