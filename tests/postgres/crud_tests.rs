//! Insert, lookup, update, and delete against `PostgreSQL`.

use crate::postgres::helpers::{PreparedStore, payload, store};
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use taskdesk::task::{
    domain::{Priority, Status, TaskChanges},
    ports::{TaskRepository, TaskRepositoryError},
    services::{TaskService, UpdateMode},
};

#[rstest]
fn insert_assigns_ids_and_round_trips(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        let draft = store
            .draft("Persisted", Priority::High, Status::InProgress)
            .with_description("Stored in Postgres")
            .with_due_date(chrono::DateTime::UNIX_EPOCH);

        let first = store.repo.insert(&draft).await?;
        let second = store.repo.insert(&draft).await?;
        let fetched = store.repo.find_by_id(first.id()).await?;

        assert!(second.id() > first.id());
        assert_eq!(first.created_at(), first.updated_at());
        assert_eq!(fetched, Some(first));
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn update_returns_the_stored_row(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        let task = store
            .repo
            .insert(&store.draft("Before", Priority::Low, Status::Pending))
            .await?;

        let updated = store
            .repo
            .update(
                task.id(),
                &TaskChanges::default()
                    .with_status(Status::Completed)
                    .with_priority(Priority::Medium),
                store.clock.utc(),
            )
            .await?;

        let fetched = store.repo.find_by_id(task.id()).await?;
        assert_eq!(updated.status(), Status::Completed);
        assert!(updated.updated_at() > task.updated_at());
        assert_eq!(fetched, Some(updated));
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn responses_match_what_a_later_read_returns(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        let service = TaskService::new(Arc::new(store.repo.clone()), Arc::new(DefaultClock));
        let created = service
            .create(&payload(json!({
                "title": "Precise",
                "due_date": "2026-11-05T17:00:00.123456789Z",
            })))
            .await?;
        assert_eq!(service.retrieve(created.id()).await?, created);

        let patched = service
            .update(
                created.id(),
                &payload(json!({"status": "completed"})),
                UpdateMode::Partial,
            )
            .await?;
        assert_eq!(service.retrieve(created.id()).await?, patched);

        let batch = service
            .bulk_update(
                &[created.id()],
                &payload(json!({"due_date": "2027-01-01T00:00:00.000000999Z"})),
            )
            .await?;
        let fetched = service.retrieve(created.id()).await?;
        assert_eq!(batch.first(), Some(&fetched));
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn delete_removes_the_row_once(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        let task = store
            .repo
            .insert(&store.draft("Doomed", Priority::Low, Status::Pending))
            .await?;

        store.repo.delete(task.id()).await?;
        let again = store.repo.delete(task.id()).await;
        let update = store
            .repo
            .update(task.id(), &TaskChanges::default(), store.clock.utc())
            .await;

        assert!(store.repo.find_by_id(task.id()).await?.is_none());
        assert!(matches!(again, Err(TaskRepositoryError::NotFound(_))));
        assert!(matches!(update, Err(TaskRepositoryError::NotFound(_))));
        Ok::<_, eyre::Report>(())
    })
}
