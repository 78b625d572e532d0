//! Atomic multi-row updates against `PostgreSQL`.

use crate::postgres::helpers::{PreparedStore, store};
use mockable::Clock;
use rstest::rstest;
use taskdesk::task::{
    domain::{Priority, Status, Task, TaskChanges, TaskId},
    ports::TaskRepository,
};

#[rstest]
fn bulk_status_update_commits_together(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        let mut ids = Vec::new();
        for title in ["A", "B", "C"] {
            let task = store
                .repo
                .insert(&store.draft(title, Priority::Low, Status::Pending))
                .await?;
            ids.push(task.id());
        }

        let count = store
            .service()
            .bulk_update_status(&ids, Status::InProgress)
            .await?;

        assert_eq!(count, 3);
        for id in ids {
            let task = store.repo.find_by_id(id).await?;
            assert_eq!(task.map(|found| found.status()), Some(Status::InProgress));
        }
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn batch_skips_rows_that_are_gone(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        let kept = store
            .repo
            .insert(&store.draft("Kept", Priority::Low, Status::Pending))
            .await?;
        let removed = store
            .repo
            .insert(&store.draft("Removed", Priority::Low, Status::Pending))
            .await?;
        store.repo.delete(removed.id()).await?;

        let updated = store
            .repo
            .update_many(
                &[removed.id(), kept.id(), TaskId::new(i64::MAX)],
                &TaskChanges::default().with_status(Status::Completed),
                store.clock.utc(),
            )
            .await?;

        let ids: Vec<TaskId> = updated.iter().map(Task::id).collect();
        assert_eq!(ids, [kept.id()]);
        let stored = store.repo.find_by_id(kept.id()).await?;
        assert_eq!(stored.as_ref(), updated.first());
        assert_eq!(stored.map(|task| task.status()), Some(Status::Completed));
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn batch_builds_on_the_latest_stored_fields(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        let task = store
            .repo
            .insert(&store.draft("Original", Priority::Low, Status::Pending))
            .await?;
        store
            .repo
            .update(
                task.id(),
                &TaskChanges::default().with_priority(Priority::High),
                store.clock.utc(),
            )
            .await?;

        let updated = store
            .service()
            .bulk_update_status(&[task.id()], Status::Completed)
            .await?;

        let stored = store.repo.find_by_id(task.id()).await?;
        assert_eq!(updated, 1);
        assert_eq!(stored.as_ref().map(Task::priority), Some(Priority::High));
        assert_eq!(stored.map(|found| found.status()), Some(Status::Completed));
        Ok::<_, eyre::Report>(())
    })
}
