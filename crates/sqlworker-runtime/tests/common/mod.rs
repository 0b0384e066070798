use async_trait::async_trait;
use sqlworker_core::{
    DatabaseHandle, Engine, EngineLoader, ResourceResolver, Result, WorkerError,
    DEFAULT_ASSET_NAME,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Observations shared between a `SlowLoader` and the test
#[derive(Default)]
pub struct LoaderStats {
    pub databases: AtomicUsize,
    pub closed: AtomicUsize,
    pub threads: Mutex<Vec<Option<String>>>,
}

impl LoaderStats {
    pub fn databases(&self) -> usize {
        self.databases.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn threads(&self) -> Vec<Option<String>> {
        self.threads.lock().unwrap().clone()
    }
}

/// Loader whose initialization sleeps, so later messages queue behind it
pub struct SlowLoader {
    delay: Duration,
    stats: Arc<LoaderStats>,
}

impl SlowLoader {
    pub fn new(delay: Duration) -> (Self, Arc<LoaderStats>) {
        let stats = Arc::new(LoaderStats::default());
        (
            Self {
                delay,
                stats: Arc::clone(&stats),
            },
            stats,
        )
    }
}

#[async_trait]
impl EngineLoader for SlowLoader {
    async fn initialize(&self, resolver: &dyn ResourceResolver) -> Result<Box<dyn Engine>> {
        let _location = resolver.locate(DEFAULT_ASSET_NAME);
        self.stats
            .threads
            .lock()
            .unwrap()
            .push(std::thread::current().name().map(str::to_string));
        tokio::time::sleep(self.delay).await;
        Ok(Box::new(CountingEngine {
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct CountingEngine {
    stats: Arc<LoaderStats>,
}

impl Engine for CountingEngine {
    fn new_database(&self) -> Result<Box<dyn DatabaseHandle>> {
        self.stats.databases.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingDatabase {
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct CountingDatabase {
    stats: Arc<LoaderStats>,
}

impl DatabaseHandle for CountingDatabase {
    fn exec(&mut self, sql: &str) -> Result<()> {
        if sql.starts_with("INVALID") {
            return Err(WorkerError::execution("near \"INVALID\": syntax error"));
        }
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
