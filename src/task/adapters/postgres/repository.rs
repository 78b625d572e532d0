//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, StatisticsRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        NewTask, PersistedTaskData, Priority, Status, Task, TaskChanges, TaskId, TaskStatistics,
        TaskTitle,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use diesel::sql_types::Text;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

const STATISTICS_SQL: &str = concat!(
    "SELECT COUNT(*) AS total, ",
    "COUNT(*) FILTER (WHERE status = $1) AS pending, ",
    "COUNT(*) FILTER (WHERE status = $2) AS in_progress, ",
    "COUNT(*) FILTER (WHERE status = $3) AS completed, ",
    "COUNT(*) FILTER (WHERE priority = $4) AS high_priority ",
    "FROM tasks",
);

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot open its
/// initial connections.
pub fn connect_pool(database_url: &str, max_size: u32) -> TaskRepositoryResult<TaskPgPool> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let pending = changes.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|conn| {
                let task = lock_rows(conn, vec![id.value()])?
                    .pop()
                    .ok_or(TaskRepositoryError::NotFound(id))?;
                write_applied(conn, task, pending, now)
            })
        })
        .await
    }

    async fn update_many(
        &self,
        ids: &[TaskId],
        changes: &TaskChanges,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let raw_ids: Vec<i64> = ids.iter().copied().map(TaskId::value).collect();
        let pending = changes.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|conn| {
                lock_rows(conn, raw_ids)?
                    .into_iter()
                    .map(|task| write_applied(conn, task, pending.clone(), now))
                    .collect()
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let statuses: Vec<&'static str> =
            filter.statuses().iter().copied().map(Status::as_str).collect();
        let priority = filter.priority().map(Priority::as_str);

        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if !statuses.is_empty() {
                query = query.filter(tasks::status.eq_any(statuses));
            }
            if let Some(required) = priority {
                query = query.filter(tasks::priority.eq(required));
            }

            let rows = query
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn statistics(&self) -> TaskRepositoryResult<TaskStatistics> {
        self.run_blocking(|connection| {
            let row = diesel::sql_query(STATISTICS_SQL)
                .bind::<Text, _>(Status::Pending.as_str())
                .bind::<Text, _>(Status::InProgress.as_str())
                .bind::<Text, _>(Status::Completed.as_str())
                .bind::<Text, _>(Priority::High.as_str())
                .get_result::<StatisticsRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_statistics(&row)
        })
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// Loads the existing rows among `ids` and locks them until the transaction
/// ends. Rows are locked in identifier order.
fn lock_rows(connection: &mut PgConnection, ids: Vec<i64>) -> TaskRepositoryResult<Vec<Task>> {
    let rows = tasks::table
        .filter(tasks::id.eq_any(ids))
        .order(tasks::id.asc())
        .select(TaskRow::as_select())
        .for_update()
        .load::<TaskRow>(connection)?;
    rows.into_iter().map(row_to_task).collect()
}

fn write_applied(
    connection: &mut PgConnection,
    mut task: Task,
    changes: TaskChanges,
    now: DateTime<Utc>,
) -> TaskRepositoryResult<Task> {
    task.apply_at(changes, now);
    let row = diesel::update(tasks::table.find(task.id().value()))
        .set(&to_changeset(&task))
        .returning(TaskRow::as_returning())
        .get_result::<TaskRow>(connection)?;
    row_to_task(row)
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.created_at(),
        due_date: task.due_date(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        updated_at: task.updated_at(),
        due_date: task.due_date(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        priority: persisted_priority,
        status: persisted_status,
        created_at,
        updated_at,
        due_date,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let priority = Priority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let status =
        Status::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        priority,
        status,
        created_at,
        updated_at,
        due_date,
    }))
}

fn row_to_statistics(row: &StatisticsRow) -> TaskRepositoryResult<TaskStatistics> {
    let count = |value: i64| u64::try_from(value).map_err(TaskRepositoryError::persistence);
    Ok(TaskStatistics {
        total: count(row.total)?,
        pending: count(row.pending)?,
        in_progress: count(row.in_progress)?,
        completed: count(row.completed)?,
        high_priority: count(row.high_priority)?,
    })
}
