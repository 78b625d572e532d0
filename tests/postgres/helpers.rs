//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::BoxError;
use super::cluster::TestDatabase;
pub use crate::test_helpers::SteppingClock;
use rstest::fixture;
use std::future::Future;
use std::sync::Arc;
use taskdesk::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{NewTask, Priority, Status, TaskTitle},
    services::TaskService,
    validation::TaskPayload,
};
use tokio::runtime::Runtime;

/// Creates a tokio runtime for driving async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Repository over a private database, removed with the value.
pub struct PreparedStore {
    /// Repository scoped to the private database.
    pub repo: PostgresTaskRepository,
    /// Clock shared with tasks built by the test.
    pub clock: Arc<SteppingClock>,
    runtime: Runtime,
    // Declared last so the pool closes before the database is dropped.
    _database: TestDatabase,
}

impl PreparedStore {
    /// Provisions a migrated database and opens a pool on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be provisioned or reached.
    pub fn create() -> Result<Self, BoxError> {
        let database = TestDatabase::provision()?;
        let pool = database.pool()?;
        Ok(Self {
            repo: PostgresTaskRepository::new(pool),
            clock: Arc::new(SteppingClock::default()),
            runtime: test_runtime()?,
            _database: database,
        })
    }

    /// Drives `test` to completion on the store's runtime.
    pub fn block_on<F: Future>(&self, test: F) -> F::Output {
        self.runtime.block_on(test)
    }

    /// Builds a service over the repository and the stepping clock.
    pub fn service(&self) -> TaskService<PostgresTaskRepository, SteppingClock> {
        TaskService::new(Arc::new(self.repo.clone()), Arc::clone(&self.clock))
    }

    /// Builds a task draft with the given attributes.
    pub fn draft(&self, title: &str, priority: Priority, status: Status) -> NewTask {
        NewTask::new(
            TaskTitle::new(title).expect("valid title"),
            self.clock.as_ref(),
        )
        .with_priority(priority)
        .with_status(status)
    }
}

/// Provides a repository over a freshly migrated database.
#[fixture]
pub fn store() -> PreparedStore {
    PreparedStore::create().expect("test database setup")
}

/// Builds a payload from a JSON object literal.
pub fn payload(value: serde_json::Value) -> TaskPayload {
    TaskPayload::from_json(value).expect("payload should be a JSON object")
}
