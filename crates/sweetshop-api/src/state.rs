//! Shared application state

use sqlx::SqlitePool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use sweetshop_core::AppConfig;

/// State shared across all request handlers.
///
/// Built once in `main` and handed to the router behind an `Arc`; middleware
/// and handlers never read the environment themselves.
pub struct AppState {
    pub config: AppConfig,
    pub db_pool: SqlitePool,
    pub start_time: Instant,
    request_count: AtomicU64,
}

impl AppState {
    pub fn new(config: AppConfig, db_pool: SqlitePool) -> Self {
        Self {
            config,
            db_pool,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
