//! Filters, ordering, and statistics against `PostgreSQL`.

use crate::postgres::helpers::{PreparedStore, store};
use rstest::rstest;
use taskdesk::task::{
    domain::{Priority, Status, TaskStatistics},
    ports::{TaskFilter, TaskRepository},
    services::ListTasksRequest,
};

async fn seed(store: &PreparedStore) -> eyre::Result<()> {
    for (title, priority, status) in [
        ("Task 1", Priority::High, Status::Pending),
        ("Task 2", Priority::Medium, Status::InProgress),
        ("Task 3", Priority::Low, Status::Completed),
        ("Task 4", Priority::High, Status::Completed),
        ("Task 5", Priority::High, Status::Pending),
    ] {
        store.repo.insert(&store.draft(title, priority, status)).await?;
    }
    Ok(())
}

#[rstest]
fn list_filters_and_orders_newest_first(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        seed(&store).await?;

        let all = store.repo.list(&TaskFilter::all()).await?;
        let completed_high = store
            .repo
            .list(
                &TaskFilter::all()
                    .with_status(Status::Completed)
                    .with_priority(Priority::High),
            )
            .await?;

        let titles: Vec<&str> = all.iter().map(|task| task.title().as_str()).collect();
        assert_eq!(titles, ["Task 5", "Task 4", "Task 3", "Task 2", "Task 1"]);
        assert_eq!(completed_high.len(), 1);
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn open_high_priority_excludes_completed(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        seed(&store).await?;

        let tasks = store.service().high_priority().await?;

        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|task| task.status() == Status::Pending));
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn statistics_are_counted_in_sql(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        seed(&store).await?;

        let stats = store.repo.statistics().await?;

        assert_eq!(
            stats,
            TaskStatistics {
                total: 5,
                pending: 2,
                in_progress: 1,
                completed: 2,
                high_priority: 3,
            }
        );
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn unknown_filter_value_lists_nothing(store: PreparedStore) -> eyre::Result<()> {
    store.block_on(async {
        seed(&store).await?;

        let tasks = store
            .service()
            .list(&ListTasksRequest::new().with_priority("critical"))
            .await?;

        assert!(tasks.is_empty());
        Ok::<_, eyre::Report>(())
    })
}
