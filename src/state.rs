use std::sync::Arc;
use std::time::{Instant, SystemTime};

use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    started_at: Instant,
    started_at_system: SystemTime,
    pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(Inner {
                started_at: Instant::now(),
                started_at_system: SystemTime::now(),
                pool,
            }),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.inner.started_at_system
    }
}
